//! Reconstruction of a streamed search into renderable snapshots.
//!
//! Events fold into a [`SearchState`] one at a time via [`SearchState::apply`];
//! each intermediate snapshot is a complete picture of the search so far, so
//! a renderer can replay the response frame by frame without touching the
//! connection.

use serde::Serialize;

use crate::event::Event;
use crate::raster::Cell;

/// Lifecycle of one reconstructed search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPhase {
    /// Progress events are still being folded in.
    Streaming,
    /// A full path has been recorded; the exploration display is frozen.
    Converged,
    /// The response terminator has been consumed; the state is final.
    Done,
    /// The service reported that no path exists.
    NoPath,
}

/// Accumulated view of one request's search progress.
///
/// One instance per request; a new request starts from [`SearchState::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchState {
    pub phase: SearchPhase,
    /// Frontier coordinates in arrival order. Duplicates are kept: the
    /// accumulation mirrors the event stream rather than deduplicating it.
    pub expanding: Vec<Cell>,
    /// Visited and fully-expanded coordinates in arrival order. `Visiting`
    /// and `Expanded` events both accumulate here.
    pub expanded: Vec<Cell>,
    /// Latest reported forward partial path.
    pub forward: Vec<Cell>,
    /// Latest reported backward partial path.
    pub backward: Vec<Cell>,
    /// Set only for the frame whose event was a meeting point arriving
    /// after the full path; cleared again on the next fold step.
    pub meeting_point: Option<Cell>,
    pub full_path: Option<Vec<Cell>>,
}

impl SearchState {
    pub fn new() -> Self {
        Self {
            phase: SearchPhase::Streaming,
            expanding: Vec::new(),
            expanded: Vec::new(),
            forward: Vec::new(),
            backward: Vec::new(),
            meeting_point: None,
            full_path: None,
        }
    }

    /// Fold one event into the state, returning the next snapshot.
    ///
    /// Never fails; malformed events are filtered before they reach the
    /// fold. Once a full path is recorded, node and partial-path events no
    /// longer change the snapshot.
    pub fn apply(mut self, event: &Event) -> SearchState {
        if matches!(self.phase, SearchPhase::Done | SearchPhase::NoPath) {
            return self;
        }

        self.meeting_point = None;
        match event {
            Event::FullPath(path) => {
                self.full_path = Some(path.clone());
                self.forward.clear();
                self.backward.clear();
                self.phase = SearchPhase::Converged;
            }
            Event::MeetingPoint(cell) => {
                if self.full_path.is_some() {
                    self.meeting_point = Some(*cell);
                }
            }
            _ if self.full_path.is_some() => {}
            Event::Expanding(cell) => self.expanding.push(*cell),
            Event::Visiting(cell) | Event::Expanded(cell) => self.expanded.push(*cell),
            Event::ForwardPath(path) => self.forward = path.clone(),
            Event::BackwardPath(path) => self.backward = path.clone(),
            Event::Malformed => {}
        }
        self
    }

    /// Consume the response terminator: the state becomes final.
    pub fn finish(mut self) -> SearchState {
        if self.phase != SearchPhase::NoPath {
            self.phase = SearchPhase::Done;
        }
        self
    }

    /// Record a response that began with the no-path marker. Terminal: no
    /// full path exists and later events are ignored.
    pub fn mark_no_path(mut self) -> SearchState {
        self.phase = SearchPhase::NoPath;
        self
    }
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new()
    }
}

/// One renderable step of a replayed response: the snapshot after applying
/// an event, plus that event's action label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayFrame {
    pub action: String,
    pub state: SearchState,
}

/// Fold an ordered event sequence into per-event frames, one per applied
/// event, suitable for frame-by-frame rendering.
pub fn replay(events: &[Event]) -> Vec<ReplayFrame> {
    let mut frames = Vec::with_capacity(events.len());
    let mut state = SearchState::new();
    for event in events {
        if event.is_malformed() {
            continue;
        }
        state = state.apply(event);
        frames.push(ReplayFrame {
            action: event.label().to_string(),
            state: state.clone(),
        });
    }
    frames
}

/// Fold a complete event sequence into its final state, including the
/// terminator transition.
pub fn reconstruct(events: &[Event]) -> SearchState {
    events
        .iter()
        .filter(|event| !event.is_malformed())
        .fold(SearchState::new(), |state, event| state.apply(event))
        .finish()
}
