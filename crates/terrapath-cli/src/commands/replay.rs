//! Replay command: run one search and print its frame-by-frame
//! reconstruction.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::warn;

use terrapath_lib::{
    replay, Cell, ElevationRaster, ReplayFrame, SearchClient, SearchOutcome, SearchRequest,
    SearchState,
};

use crate::output::OutputFormat;

/// Everything a rendering backend needs to draw the replay: the 8-bit
/// backdrop (when the raster is not flat) plus the per-event frames.
#[derive(Debug, Serialize)]
struct ReplayDump {
    raster: Option<Vec<Vec<u8>>>,
    frames: Vec<ReplayFrame>,
    final_state: SearchState,
}

pub fn run(
    addr: &str,
    format: OutputFormat,
    raster_path: &Path,
    start: Cell,
    goal: Option<Cell>,
) -> Result<()> {
    let input = fs::read_to_string(raster_path)
        .with_context(|| format!("failed to read raster from {}", raster_path.display()))?;
    let raster = ElevationRaster::parse(&input)
        .with_context(|| format!("failed to parse raster from {}", raster_path.display()))?;
    let goal = goal.unwrap_or_else(|| Cell::new(start.row, raster.cols() - 1));

    let mut client = SearchClient::connect(addr)
        .with_context(|| format!("failed to connect to search service at {}", addr))?;
    let outcome = client
        .search(&SearchRequest {
            raster: raster.clone(),
            start,
            goal,
        })
        .with_context(|| format!("search round trip for start {} failed", start))?;

    let (frames, final_state) = match &outcome {
        SearchOutcome::NoPath => (Vec::new(), SearchState::new().mark_no_path()),
        SearchOutcome::Found { events } => {
            let frames = replay(events);
            let final_state = frames
                .last()
                .map(|frame| frame.state.clone())
                .unwrap_or_else(SearchState::new)
                .finish();
            (frames, final_state)
        }
    };

    match format {
        OutputFormat::Json => {
            let backdrop = match raster.normalize() {
                Ok(normalized) => Some(normalized.to_rows()),
                Err(error) => {
                    warn!(%error, "skipping backdrop for flat raster");
                    None
                }
            };
            let dump = ReplayDump {
                raster: backdrop,
                frames,
                final_state,
            };
            println!("{}", serde_json::to_string_pretty(&dump)?);
        }
        OutputFormat::Text => {
            for (index, frame) in frames.iter().enumerate() {
                let state = &frame.state;
                let mut line = format!(
                    "frame {}: {} (expanding {}, expanded {}, forward {}, backward {}",
                    index + 1,
                    frame.action,
                    state.expanding.len(),
                    state.expanded.len(),
                    state.forward.len(),
                    state.backward.len()
                );
                if let Some(cell) = state.meeting_point {
                    line.push_str(&format!(", meeting point {}", cell));
                }
                if let Some(path) = &state.full_path {
                    line.push_str(&format!(", full path {} nodes", path.len()));
                }
                line.push(')');
                println!("{}", line);
            }
            match final_state.full_path {
                Some(path) => println!("search converged with a {} node path", path.len()),
                None => println!("no path found between {} and {}", start, goal),
            }
        }
    }

    Ok(())
}
