use thiserror::Error;

use crate::raster::Cell;

/// Convenient result alias for the terrapath library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when raster input is empty, ragged, or not integer-valued.
    #[error("malformed raster input: {message}")]
    MalformedRaster { message: String },

    /// Raised when normalizing a raster whose cells are all identical.
    #[error("cannot normalize flat raster (every cell is {value})")]
    DegenerateRaster { value: i64 },

    /// Raised when the response stream violates request/response framing.
    /// Fatal: the connection can no longer be trusted for further requests.
    #[error("protocol desync: {message}")]
    ProtocolDesync { message: String },

    /// Raised when a path coordinate lies outside the raster bounds.
    #[error("coordinate {cell} outside raster bounds {rows}x{cols}")]
    OutOfBounds {
        cell: Cell,
        rows: usize,
        cols: usize,
    },

    /// Wrapper for IO errors on the service connection or local files.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
