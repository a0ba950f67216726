//! Wire protocol for the remote search service.
//!
//! A request is one length-prefixed UTF-8 text frame: a `u32` big-endian
//! payload length (not counting itself) followed by newline-terminated
//! fields `rows`, `cols`, `start.row`, `start.col`, `goal.row`, `goal.col`,
//! then every raster cell in row-major order, one per line.
//!
//! A response is a stream of newline-terminated text lines ending with the
//! sentinel line `END`. A response whose first line is `No path found`
//! carries no events; its sentinel is still consumed so the connection stays
//! aligned for the next request.

use std::io::{BufRead, Read, Write};

use crate::error::{Error, Result};
use crate::raster::{Cell, ElevationRaster};

/// Literal line terminating every response stream.
pub const SENTINEL: &str = "END";

/// Literal first line of a response carrying no path.
pub const NO_PATH_MARKER: &str = "No path found";

/// One search round trip: the raster plus its two endpoints.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub raster: ElevationRaster,
    pub start: Cell,
    pub goal: Cell,
}

/// Raw decoded body of one response stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawResponse {
    /// Event lines of a found-path stream, sentinel excluded.
    Lines(Vec<String>),
    /// The service reported no path between the endpoints.
    NoPath,
}

/// Encode a request into its framed wire representation.
pub fn encode_request(request: &SearchRequest) -> Vec<u8> {
    let payload = encode_payload(request);
    let mut frame = Vec::with_capacity(4 + payload.len());
    frame.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    frame.extend_from_slice(payload.as_bytes());
    frame
}

/// Write a framed request and flush. The service sends nothing back until
/// the full payload has been received.
pub fn write_request<W: Write>(writer: &mut W, request: &SearchRequest) -> Result<()> {
    writer.write_all(&encode_request(request))?;
    writer.flush()?;
    Ok(())
}

/// Decode one framed request from `reader`: the inverse of
/// [`encode_request`], used by tests and harnesses standing in for the
/// service.
pub fn decode_request<R: Read>(reader: &mut R) -> Result<SearchRequest> {
    let mut prefix = [0u8; 4];
    reader.read_exact(&mut prefix)?;
    let length = u32::from_be_bytes(prefix) as usize;

    let mut payload = vec![0u8; length];
    reader.read_exact(&mut payload)?;
    let text = String::from_utf8(payload)
        .map_err(|_| desync("request payload is not valid UTF-8"))?;

    let mut lines = text.lines();
    let rows = parse_field(&mut lines, "rows")?;
    let cols = parse_field(&mut lines, "cols")?;
    let start = Cell::new(
        parse_field(&mut lines, "start row")?,
        parse_field(&mut lines, "start col")?,
    );
    let goal = Cell::new(
        parse_field(&mut lines, "goal row")?,
        parse_field(&mut lines, "goal col")?,
    );

    if rows == 0 || cols == 0 {
        return Err(desync(format!(
            "request declares degenerate raster shape {}x{}",
            rows, cols
        )));
    }

    let mut cells = Vec::with_capacity(rows * cols);
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let value = line
            .parse::<i64>()
            .map_err(|_| desync(format!("invalid elevation value {:?} in payload", line)))?;
        cells.push(value);
    }
    if cells.len() != rows * cols {
        return Err(desync(format!(
            "request payload holds {} cells, expected {}",
            cells.len(),
            rows * cols
        )));
    }

    Ok(SearchRequest {
        raster: ElevationRaster::from_flat(rows, cols, cells),
        start,
        goal,
    })
}

/// Consume one full response from `reader`, up to and including the
/// sentinel.
///
/// A leading no-path marker still consumes the sentinel that follows it, so
/// the stream is left aligned for the next request. Reaching end-of-stream
/// before the sentinel is a fatal [`Error::ProtocolDesync`].
pub fn read_response<R: BufRead>(reader: &mut R) -> Result<RawResponse> {
    let mut lines = Vec::new();
    let mut first = true;
    loop {
        let raw = read_line(reader)?;
        let line = raw.trim();
        if line == SENTINEL {
            return Ok(RawResponse::Lines(lines));
        }
        if first && line == NO_PATH_MARKER {
            loop {
                let raw = read_line(reader)?;
                if raw.trim() == SENTINEL {
                    return Ok(RawResponse::NoPath);
                }
            }
        }
        first = false;
        lines.push(line.to_string());
    }
}

fn encode_payload(request: &SearchRequest) -> String {
    let raster = &request.raster;
    let mut payload = format!(
        "{}\n{}\n{}\n{}\n{}\n{}\n",
        raster.rows(),
        raster.cols(),
        request.start.row,
        request.start.col,
        request.goal.row,
        request.goal.col
    );
    for value in raster.values() {
        payload.push_str(&value.to_string());
        payload.push('\n');
    }
    payload
}

fn parse_field(lines: &mut std::str::Lines<'_>, name: &str) -> Result<usize> {
    let line = lines
        .next()
        .ok_or_else(|| desync(format!("request payload missing {}", name)))?;
    line.trim()
        .parse::<usize>()
        .map_err(|_| desync(format!("request payload has invalid {}: {:?}", name, line)))
}

fn read_line<R: BufRead>(reader: &mut R) -> Result<String> {
    let mut buffer = String::new();
    let read = reader.read_line(&mut buffer)?;
    if read == 0 {
        return Err(desync("stream ended before response sentinel"));
    }
    Ok(buffer)
}

fn desync(message: impl Into<String>) -> Error {
    Error::ProtocolDesync {
        message: message.into(),
    }
}
