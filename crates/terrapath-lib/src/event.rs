use crate::raster::Cell;

/// One decoded unit of search progress reported by the search service.
///
/// The wire encodes coordinates in `col,row` order; parsing swaps them into
/// canonical `(row, col)` [`Cell`]s, matching how downstream consumers plot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A node entering the frontier.
    Expanding(Cell),
    /// A node being visited by either search direction.
    Visiting(Cell),
    /// A node whose neighbours have been fully explored.
    Expanded(Cell),
    /// Best forward partial path so far; each report replaces the previous.
    ForwardPath(Vec<Cell>),
    /// Best backward partial path so far; each report replaces the previous.
    BackwardPath(Vec<Cell>),
    /// Coordinate where the two search frontiers met.
    MeetingPoint(Cell),
    /// Final path from start to goal.
    FullPath(Vec<Cell>),
    /// Line that did not match any recognized action; consumers skip it.
    Malformed,
}

impl Event {
    /// Human-readable action label, used as the per-frame title.
    pub fn label(&self) -> &'static str {
        match self {
            Event::Expanding(_) => "Expanding node",
            Event::Visiting(_) => "Visiting node",
            Event::Expanded(_) => "Expanded node",
            Event::ForwardPath(_) => "Best path forward",
            Event::BackwardPath(_) => "Best path backward",
            Event::MeetingPoint(_) => "Meeting point",
            Event::FullPath(_) => "Full path",
            Event::Malformed => "Malformed line",
        }
    }

    /// `true` for lines that failed to parse.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Event::Malformed)
    }
}

/// Parse one response line into an [`Event`].
///
/// Never fails: lines that do not match `"<Action>: <payload>"`, or whose
/// payload is not a valid coordinate or coordinate list, become
/// [`Event::Malformed`] for the caller to filter.
pub fn parse_event(line: &str) -> Event {
    let Some((action, payload)) = line.split_once(": ") else {
        return Event::Malformed;
    };
    match action {
        "Expanding node" => cell_event(payload, Event::Expanding),
        "Visiting node" => cell_event(payload, Event::Visiting),
        "Expanded node" => cell_event(payload, Event::Expanded),
        "Meeting point" => cell_event(payload, Event::MeetingPoint),
        "Best path forward" => path_event(payload, Event::ForwardPath),
        "Best path backward" => path_event(payload, Event::BackwardPath),
        "Full path" => path_event(payload, Event::FullPath),
        _ => Event::Malformed,
    }
}

fn cell_event(payload: &str, make: fn(Cell) -> Event) -> Event {
    match parse_cell(payload) {
        Some(cell) => make(cell),
        None => Event::Malformed,
    }
}

fn path_event(payload: &str, make: fn(Vec<Cell>) -> Event) -> Event {
    match parse_path(payload) {
        Some(path) => make(path),
        None => Event::Malformed,
    }
}

// Wire order is `col,row`; swap on the way in.
fn parse_cell(payload: &str) -> Option<Cell> {
    let (col, row) = payload.trim().split_once(',')?;
    let col = col.trim().parse().ok()?;
    let row = row.trim().parse().ok()?;
    Some(Cell { row, col })
}

fn parse_path(payload: &str) -> Option<Vec<Cell>> {
    let mut cells = Vec::new();
    for node in payload.split(" -> ") {
        cells.push(parse_cell(node)?);
    }
    Some(cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_events_swap_wire_order_into_row_col() {
        assert_eq!(
            parse_event("Expanding node: 1,2"),
            Event::Expanding(Cell::new(2, 1))
        );
        assert_eq!(
            parse_event("Visiting node: 4,0"),
            Event::Visiting(Cell::new(0, 4))
        );
        assert_eq!(
            parse_event("Expanded node: 0,3"),
            Event::Expanded(Cell::new(3, 0))
        );
        assert_eq!(
            parse_event("Meeting point: 5,6"),
            Event::MeetingPoint(Cell::new(6, 5))
        );
    }

    #[test]
    fn path_events_swap_every_node() {
        assert_eq!(
            parse_event("Best path forward: 0,0 -> 1,0 -> 1,1"),
            Event::ForwardPath(vec![Cell::new(0, 0), Cell::new(0, 1), Cell::new(1, 1)])
        );
        assert_eq!(
            parse_event("Full path: 0,0 -> 1,1 -> 2,2"),
            Event::FullPath(vec![Cell::new(0, 0), Cell::new(1, 1), Cell::new(2, 2)])
        );
    }

    #[test]
    fn backward_path_parses() {
        assert_eq!(
            parse_event("Best path backward: 9,9 -> 8,9"),
            Event::BackwardPath(vec![Cell::new(9, 9), Cell::new(9, 8)])
        );
    }

    #[test]
    fn unrecognized_lines_are_malformed() {
        assert_eq!(parse_event(""), Event::Malformed);
        assert_eq!(parse_event("data sent"), Event::Malformed);
        assert_eq!(parse_event("Teleporting node: 1,2"), Event::Malformed);
    }

    #[test]
    fn bad_payloads_are_malformed() {
        assert_eq!(parse_event("Expanding node: 1"), Event::Malformed);
        assert_eq!(parse_event("Expanding node: x,y"), Event::Malformed);
        assert_eq!(parse_event("Expanding node: -1,2"), Event::Malformed);
        assert_eq!(parse_event("Full path: 0,0 -> oops"), Event::Malformed);
    }

    #[test]
    fn labels_match_wire_actions() {
        assert_eq!(parse_event("Expanding node: 1,2").label(), "Expanding node");
        assert_eq!(
            parse_event("Full path: 0,0 -> 1,1").label(),
            "Full path"
        );
    }
}
