//! Terrapath library entry points.
//!
//! This crate exposes the elevation raster model, the wire protocol used to
//! talk to the remote search service, the event parser and replay state
//! machine that reconstruct its streamed progress, and the local greedy
//! baseline planner together with the elevation-change metric that scores
//! both paths. Higher-level consumers (the CLI) should only depend on the
//! items exported here instead of reimplementing behavior.

#![deny(warnings)]

pub mod client;
pub mod error;
pub mod event;
pub mod greedy;
pub mod metrics;
pub mod protocol;
pub mod raster;
pub mod replay;

pub use client::{SearchClient, SearchOutcome};
pub use error::{Error, Result};
pub use event::{parse_event, Event};
pub use greedy::greedy_path;
pub use metrics::elevation_change;
pub use protocol::{
    decode_request, encode_request, read_response, write_request, RawResponse, SearchRequest,
    NO_PATH_MARKER, SENTINEL,
};
pub use raster::{Cell, ElevationRaster, NormalizedRaster};
pub use replay::{reconstruct, replay, ReplayFrame, SearchPhase, SearchState};
