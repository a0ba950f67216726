use std::io::{BufReader, BufWriter};
use std::net::{TcpStream, ToSocketAddrs};

use tracing::debug;

use crate::error::Result;
use crate::event::{parse_event, Event};
use crate::protocol::{read_response, write_request, RawResponse, SearchRequest};
use crate::raster::Cell;

/// Blocking session with the remote search service.
///
/// One connection carries any number of sequential round trips. Each call to
/// [`SearchClient::search`] writes a full request and consumes the response
/// through its sentinel before returning, which keeps the stream aligned for
/// the next request. There is no retry and no timeout: transport failures
/// surface to the caller, who decides whether to abandon the batch.
pub struct SearchClient {
    reader: BufReader<TcpStream>,
    writer: BufWriter<TcpStream>,
}

impl SearchClient {
    /// Connect to the search service.
    pub fn connect<A: ToSocketAddrs>(addr: A) -> Result<Self> {
        let stream = TcpStream::connect(addr)?;
        let reader = BufReader::new(stream.try_clone()?);
        let writer = BufWriter::new(stream);
        Ok(Self { reader, writer })
    }

    /// Execute one search round trip.
    ///
    /// Response lines that fail to parse are dropped with a debug log;
    /// everything else becomes an ordered event sequence.
    pub fn search(&mut self, request: &SearchRequest) -> Result<SearchOutcome> {
        write_request(&mut self.writer, request)?;
        match read_response(&mut self.reader)? {
            RawResponse::NoPath => Ok(SearchOutcome::NoPath),
            RawResponse::Lines(lines) => {
                let mut events = Vec::with_capacity(lines.len());
                for line in &lines {
                    let event = parse_event(line);
                    if event.is_malformed() {
                        debug!(line = %line, "skipping malformed response line");
                        continue;
                    }
                    events.push(event);
                }
                Ok(SearchOutcome::Found { events })
            }
        }
    }
}

/// Result of one search round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The service streamed progress events, normally ending in a full path.
    Found { events: Vec<Event> },
    /// The service reported that no path exists.
    NoPath,
}

impl SearchOutcome {
    /// The service's final path, taken from the last full-path event.
    pub fn full_path(&self) -> Option<&[Cell]> {
        self.events().iter().rev().find_map(|event| match event {
            Event::FullPath(path) => Some(path.as_slice()),
            _ => None,
        })
    }

    /// Events in arrival order; empty for no-path outcomes.
    pub fn events(&self) -> &[Event] {
        match self {
            SearchOutcome::Found { events } => events,
            SearchOutcome::NoPath => &[],
        }
    }
}
