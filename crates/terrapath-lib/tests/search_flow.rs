//! End-to-end flow over in-memory streams: raw response bytes through the
//! codec, the event parser, and the replay fold.

use std::io::Cursor;

use terrapath_lib::{
    elevation_change, greedy_path, parse_event, read_response, reconstruct, replay, Cell,
    ElevationRaster, Event, RawResponse, SearchPhase, SearchState,
};

#[test]
fn response_stream_reconstructs_into_a_converged_state() {
    let mut reader = Cursor::new(
        "Expanding node: 0,0\n\
         Visiting node: 1,0\n\
         Best path forward: 0,0 -> 1,0\n\
         Best path backward: 2,2 -> 1,2\n\
         Full path: 0,0 -> 1,0 -> 2,1 -> 2,2\n\
         Meeting point: 1,0\n\
         END\n",
    );

    let RawResponse::Lines(lines) = read_response(&mut reader).expect("response reads") else {
        panic!("expected a found-path response");
    };
    let events: Vec<Event> = lines.iter().map(|line| parse_event(line)).collect();

    let frames = replay(&events);
    assert_eq!(frames.len(), events.len());

    // The meeting point is visible exactly on its own frame.
    let meeting_frame = &frames[5];
    assert_eq!(meeting_frame.action, "Meeting point");
    assert_eq!(meeting_frame.state.meeting_point, Some(Cell::new(0, 1)));
    assert_eq!(frames[4].state.meeting_point, None);

    let state = reconstruct(&events);
    assert_eq!(state.phase, SearchPhase::Done);
    assert_eq!(
        state.full_path,
        Some(vec![
            Cell::new(0, 0),
            Cell::new(0, 1),
            Cell::new(1, 2),
            Cell::new(2, 2),
        ])
    );
    assert!(state.forward.is_empty());
    assert!(state.backward.is_empty());
}

#[test]
fn no_path_response_reconstructs_into_the_no_path_phase() {
    let mut reader = Cursor::new("No path found\nEND\n");
    let response = read_response(&mut reader).expect("response reads");
    assert_eq!(response, RawResponse::NoPath);

    let state = SearchState::new().mark_no_path();
    assert_eq!(state.phase, SearchPhase::NoPath);
    assert_eq!(state.full_path, None);
}

#[test]
fn service_and_greedy_paths_share_the_same_metric() {
    let raster = ElevationRaster::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]])
        .expect("fixture raster builds");

    let greedy = greedy_path(&raster, Cell::new(0, 0)).expect("plans");
    assert_eq!(elevation_change(&raster, &greedy).expect("scores"), 2);

    let service_path = match parse_event("Full path: 0,0 -> 1,0 -> 2,0") {
        Event::FullPath(path) => path,
        other => panic!("unexpected event {:?}", other),
    };
    assert_eq!(
        elevation_change(&raster, &service_path).expect("scores"),
        2
    );
}

#[test]
fn snapshots_serialize_for_rendering_consumers() {
    let events = [
        parse_event("Expanding node: 1,2"),
        parse_event("Full path: 0,0 -> 1,1 -> 2,2"),
    ];
    let frames = replay(&events);
    let value = serde_json::to_value(&frames).expect("serializes");

    assert_eq!(value[0]["action"], "Expanding node");
    assert_eq!(value[0]["state"]["phase"], "streaming");
    assert_eq!(value[1]["state"]["phase"], "converged");
    assert_eq!(value[1]["state"]["full_path"][1]["row"], 1);
}
