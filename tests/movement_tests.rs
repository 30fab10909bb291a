//! Board movement integration tests.
//!
//! These cover step-by-step notification counts, overshoot handling, and
//! the edge cases of `Board::move_chessman`.

mod common;

use common::{count, line_engine, record};
use dice_race::core::{ChessmanRef, PlayerId};
use dice_race::engine::Board;
use dice_race::events::{EventKind, EventPayload};
use proptest::prelude::*;

const MOVE_EVENTS: &[EventKind] = &[
    EventKind::ChessmanMoveEasing,
    EventKind::ChessmanMoved,
    EventKind::ChessmanOverEnd,
];

fn first() -> ChessmanRef {
    ChessmanRef::new(PlayerId::new(0), 0)
}

#[test]
fn test_forward_move_counts() {
    let (mut engine, _) = line_engine(20, 2, 1);
    let ctx = engine.context_mut();
    ctx.place(first(), 2).unwrap();
    let log = record(ctx, MOVE_EVENTS);

    assert!(Board::move_chessman(ctx, first(), 4));

    assert_eq!(ctx.chessman(first()).unwrap().position(), 6);
    assert_eq!(count(&log, EventKind::ChessmanMoveEasing), 3);
    assert_eq!(count(&log, EventKind::ChessmanMoved), 1);
    assert_eq!(count(&log, EventKind::ChessmanOverEnd), 0);

    // Easing covers every step but the last.
    let log = log.lock().unwrap();
    let steps: Vec<(i32, i32)> = log
        .iter()
        .filter_map(|e| match e.payload {
            EventPayload::ChessmanMoveEasing { from, to, .. } => Some((from, to)),
            _ => None,
        })
        .collect();
    assert_eq!(steps, vec![(2, 3), (3, 4), (4, 5)]);
    assert!(matches!(
        log.last().unwrap().payload,
        EventPayload::ChessmanMoved { from: 5, to: 6, .. }
    ));
}

#[test]
fn test_single_step_has_no_easing() {
    let (mut engine, _) = line_engine(20, 2, 1);
    let ctx = engine.context_mut();
    ctx.place(first(), 0).unwrap();
    let log = record(ctx, MOVE_EVENTS);

    assert!(Board::move_chessman(ctx, first(), 1));
    assert_eq!(count(&log, EventKind::ChessmanMoveEasing), 0);
    assert_eq!(count(&log, EventKind::ChessmanMoved), 1);
}

#[test]
fn test_overshoot_bounces_back() {
    let (mut engine, _) = line_engine(10, 2, 1);
    let ctx = engine.context_mut();
    ctx.place(first(), 7).unwrap();
    let log = record(ctx, MOVE_EVENTS);

    assert!(!Board::move_chessman(ctx, first(), 5));

    let over = log
        .lock()
        .unwrap()
        .iter()
        .find_map(|e| match e.payload {
            EventPayload::ChessmanOverEnd {
                target_position,
                end_position,
                over_steps,
                ..
            } => Some((target_position, end_position, over_steps)),
            _ => None,
        })
        .unwrap();
    assert_eq!(over, (12, 9, 3));
    assert_eq!(ctx.chessman(first()).unwrap().position(), 6);
    assert_eq!(count(&log, EventKind::ChessmanOverEnd), 1);
}

#[test]
fn test_zero_steps_publishes_nothing() {
    let (mut engine, _) = line_engine(10, 2, 1);
    let ctx = engine.context_mut();
    ctx.place(first(), 3).unwrap();
    let log = record(
        ctx,
        &[
            EventKind::ChessmanMoveEasing,
            EventKind::ChessmanMoved,
            EventKind::ChessmanOverEnd,
            EventKind::BlockEffect,
        ],
    );

    assert!(!Board::move_chessman(ctx, first(), 0));
    assert!(log.lock().unwrap().is_empty());
    assert_eq!(ctx.chessman(first()).unwrap().position(), 3);
}

#[test]
fn test_backward_move_clamps_at_start() {
    let (mut engine, _) = line_engine(10, 2, 1);
    let ctx = engine.context_mut();
    ctx.place(first(), 2).unwrap();
    let log = record(ctx, MOVE_EVENTS);

    assert!(Board::move_chessman(ctx, first(), -5));
    assert_eq!(ctx.chessman(first()).unwrap().position(), 0);
    assert_eq!(count(&log, EventKind::ChessmanMoveEasing), 4);
    assert_eq!(count(&log, EventKind::ChessmanMoved), 1);
}

#[test]
fn test_shared_cells_have_no_effect() {
    let (mut engine, _) = line_engine(10, 2, 1);
    let ctx = engine.context_mut();
    let other = ChessmanRef::new(PlayerId::new(1), 0);
    ctx.place(other, 4).unwrap();
    ctx.place(first(), 2).unwrap();

    assert!(Board::move_chessman(ctx, first(), 2));

    assert_eq!(ctx.chessman(other).unwrap().position(), 4);
    assert_eq!(Board::chessmen_at(ctx, 4), vec![first(), other]);
}

proptest! {
    #[test]
    fn prop_n_steps_give_n_minus_one_easings(start in 0i32..20, steps in 1i32..10) {
        // Path of 30 keeps every target short of the destination cell.
        let (mut engine, _) = line_engine(30, 2, 1);
        let ctx = engine.context_mut();
        ctx.place(first(), start).unwrap();
        let log = record(ctx, MOVE_EVENTS);

        prop_assert!(Board::move_chessman(ctx, first(), steps));
        prop_assert_eq!(ctx.chessman(first()).unwrap().position(), start + steps);
        prop_assert_eq!(count(&log, EventKind::ChessmanMoveEasing), (steps - 1) as usize);
        prop_assert_eq!(count(&log, EventKind::ChessmanMoved), 1);
    }

    #[test]
    fn prop_overshoot_lands_inside_path(start in 0i32..10, steps in 1i32..20) {
        let (mut engine, _) = line_engine(10, 2, 1);
        let ctx = engine.context_mut();
        ctx.place(first(), start).unwrap();

        Board::move_chessman(ctx, first(), steps);

        let position = ctx.chessman(first()).unwrap().position();
        prop_assert!((0..=9).contains(&position));
        let expected = if start + steps <= 9 { start + steps } else { 9 - (start + steps - 9) };
        prop_assert_eq!(position, expected.max(0));
    }
}
