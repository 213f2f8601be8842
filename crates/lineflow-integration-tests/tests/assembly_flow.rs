//! Cross-crate flow tests: orders travel the line post by post and their
//! completion events land in the statistics registrars.

use lineflow_core::error::{ErrorKind, LineError};
use lineflow_core::event::LineEvent;
use lineflow_core::id::OrderId;
use lineflow_core::state::LineState;
use lineflow_core::test_utils::*;
use lineflow_stats::{Fixed64, StatisticsBoard};

/// The canonical walkthrough: a 3-post line (Body, Drivetrain, Accessories)
/// and one order with one task per post.
#[test]
fn one_order_walks_the_line() {
    let mut line = standard_line();
    line.observe_time(ts(0, 6, 0)).unwrap();

    // Entering the line places the order on post 0.
    let result = line.advance(vec![standard_order(1, 180)]).unwrap();
    assert_eq!(result.completions().count(), 0);
    assert_eq!(line.work_post_views()[0].order, Some(OrderId(1)));
    assert_eq!(line.state(), LineState::OperationalActive);

    // Complete the Body task, advance: the order moves to post 1 and post 0
    // stays empty because no new order is available.
    line.observe_time(ts(0, 7, 0)).unwrap();
    line.complete_task(0, 0, 55).unwrap();
    line.advance(Vec::new()).unwrap();
    let views = line.work_post_views();
    assert_eq!(views[0].order, None);
    assert_eq!(views[1].order, Some(OrderId(1)));

    // Same for posts 1 and 2.
    line.observe_time(ts(0, 8, 0)).unwrap();
    line.complete_task(1, 1, 50).unwrap();
    line.advance(Vec::new()).unwrap();
    assert_eq!(line.work_post_views()[2].order, Some(OrderId(1)));

    line.observe_time(ts(0, 9, 10)).unwrap();
    line.complete_task(2, 2, 60).unwrap();
    let result = line.advance(Vec::new()).unwrap();

    // Exactly one completion, with delay = elapsed - expected = 190 - 180.
    let completions: Vec<_> = result.completions().collect();
    assert_eq!(completions.len(), 1);
    assert_eq!(completions[0].0, OrderId(1));
    assert_eq!(completions[0].1.delay, 10);

    // The line drained back to Idle.
    assert!(line.is_empty());
    assert_eq!(line.state(), LineState::OperationalIdle);
}

#[test]
fn completion_events_feed_the_statistics_board() {
    let mut line = standard_line();
    let mut board = StatisticsBoard::new();
    line.observe_time(ts(0, 6, 0)).unwrap();

    // Three orders with distinct delays: each takes 60 minutes of line time
    // per post (driven by the clock), against different expectations.
    for (i, expected) in [(1u32, 170), (2u32, 180), (3u32, 190)] {
        let order = standard_order(i, expected);
        let result = line.advance(vec![order]).unwrap();
        for event in &result.events {
            board.record_event(event);
        }
        for post in 0..3 {
            let now = line.scheduler().now();
            line.observe_time(now.plus_hours(1)).unwrap();
            line.complete_task(post, post, 20).unwrap();
            let result = line.advance(Vec::new()).unwrap();
            for event in &result.events {
                board.record_event(event);
            }
        }
    }
    board.end_day();

    // Each order spent 180 line minutes: delays 10, 0, -10.
    assert_eq!(board.delay().count(), 3);
    assert_eq!(board.median_delay(), Some(Fixed64::from_num(0)));
    assert_eq!(board.delay().average(), Fixed64::ZERO);
    assert_eq!(board.throughput().samples().len(), 1);
    assert_eq!(board.throughput().samples()[0].value, 3);
}

#[test]
fn broken_line_rejects_everything_until_operator_action() {
    let mut line = standard_line();
    line.advance(vec![standard_order(1, 60)]).unwrap();
    line.set_state(LineState::Broken);

    for (post, task) in [(0usize, 0usize), (1, 1), (7, 7)] {
        let err = line.complete_task(post, task, 5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState, "post {post}");
    }
    assert!(matches!(
        line.advance(Vec::new()),
        Err(LineError::AdvanceRejected {
            state: LineState::Broken
        })
    ));
    assert!(matches!(
        line.advance(vec![standard_order(2, 60)]),
        Err(LineError::AdvanceRejected { .. })
    ));

    line.set_state(LineState::OperationalActive);
    line.complete_task(0, 0, 5).unwrap();
}

#[test]
fn maintenance_drains_the_line_without_intake() {
    let mut line = standard_line();
    line.observe_time(ts(1, 6, 0)).unwrap();
    line.advance(vec![standard_order(1, 30)]).unwrap();
    line.set_state(LineState::Maintenance);

    // Advancing under Maintenance shifts work but pulls nothing new.
    line.complete_task(0, 0, 10).unwrap();
    line.advance(Vec::new()).unwrap();
    assert!(line.work_post_views()[0].order.is_none());
    assert_eq!(line.state(), LineState::Maintenance);

    line.complete_task(1, 1, 10).unwrap();
    line.advance(Vec::new()).unwrap();
    line.complete_task(2, 2, 10).unwrap();
    line.observe_time(ts(1, 10, 0)).unwrap();
    let result = line.advance(Vec::new()).unwrap();

    // Drained: the state machine lifts maintenance and schedules the 4-hour
    // re-check for the caller's scheduler.
    assert_eq!(line.state(), LineState::OperationalIdle);
    let recheck = result.events.iter().find_map(|e| match e {
        LineEvent::MaintenanceRecheckScheduled { at } => Some(*at),
        _ => None,
    });
    assert_eq!(recheck, Some(ts(1, 14, 0)));
}

#[test]
fn helper_runs_an_order_end_to_end() {
    let mut line = standard_line();
    let completions = run_order_through(&mut line, standard_order(9, 45), 15);
    assert_eq!(completions, 1);
    assert!(line.is_empty());
}
