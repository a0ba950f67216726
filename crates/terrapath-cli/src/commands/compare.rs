//! Compare command: sweep start rows across the raster and score the
//! service's paths against the greedy baseline.

use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use terrapath_lib::{
    elevation_change, greedy_path, Cell, ElevationRaster, SearchClient, SearchRequest,
};

use crate::output::OutputFormat;

/// Score pair for one start/goal sweep entry.
#[derive(Debug, Serialize)]
struct ComparisonRow {
    start: Cell,
    goal: Cell,
    /// Elevation change of the service's path; absent when the service
    /// reported no path.
    service: Option<i64>,
    /// Elevation change of the greedy baseline path.
    greedy: i64,
}

pub fn run(
    addr: &str,
    format: OutputFormat,
    raster_path: &Path,
    steps: usize,
    pad_goal_column: bool,
) -> Result<()> {
    if steps == 0 {
        bail!("--steps must be at least 1");
    }

    let input = fs::read_to_string(raster_path)
        .with_context(|| format!("failed to read raster from {}", raster_path.display()))?;
    let raster = ElevationRaster::parse(&input)
        .with_context(|| format!("failed to parse raster from {}", raster_path.display()))?;
    let raster = if pad_goal_column {
        raster.pad_goal_column()
    } else {
        raster
    };

    let mut client = SearchClient::connect(addr)
        .with_context(|| format!("failed to connect to search service at {}", addr))?;

    // Start rows evenly spaced down the first column, goals on the last
    // column of the same row.
    let step = (raster.rows() - 1) / steps;
    let mut rows = Vec::with_capacity(steps);
    for index in 0..steps {
        let start = Cell::new(index * step, 0);
        let goal = Cell::new(index * step, raster.cols() - 1);

        let request = SearchRequest {
            raster: raster.clone(),
            start,
            goal,
        };
        let started = Instant::now();
        let outcome = client
            .search(&request)
            .with_context(|| format!("search round trip for start {} failed", start))?;
        info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            %start,
            %goal,
            "search round trip complete"
        );

        let service = match outcome.full_path() {
            Some(path) => Some(elevation_change(&raster, path)?),
            None => {
                warn!(%start, %goal, "service reported no path");
                None
            }
        };

        let baseline = greedy_path(&raster, start)?;
        let greedy = elevation_change(&raster, &baseline)?;

        rows.push(ComparisonRow {
            start,
            goal,
            service,
            greedy,
        });
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        OutputFormat::Text => {
            for row in &rows {
                match row.service {
                    Some(service) => println!(
                        "start {} -> goal {}: service {}, greedy {}",
                        row.start, row.goal, service, row.greedy
                    ),
                    None => println!(
                        "start {} -> goal {}: service found no path, greedy {}",
                        row.start, row.goal, row.greedy
                    ),
                }
            }
        }
    }

    Ok(())
}
