mod common;

use common::{flat_course, hole, players, run, setup};
use golfcard::aggregate::match_status_history;
use golfcard::course::{HoleScoreEntry, Player, Side};
use golfcard::formats::match_play::{MatchOutcome, MatchResult, MatchSide};
use golfcard::formats::{GameFormat, GameOutcome};
use golfcard::api::GameSetup;
use proptest::prelude::*;

fn singles() -> GameFormat {
    GameFormat::MatchPlay {
        side_a: Side::new("A", &["a"]),
        side_b: Side::new("B", &["b"]),
    }
}

fn play(s: &GameSetup, entries: &[HoleScoreEntry]) -> MatchOutcome {
    match run(s, entries).outcome {
        GameOutcome::Match(o) => o,
        other => panic!("unexpected outcome {:?}", other),
    }
}

#[test]
fn test_closed_out_ten_up_with_eight_to_play() {
    let s = setup("m", flat_course(18), players(&["a", "b"]), singles());
    let entries: Vec<_> = (1..=18)
        .map(|h| {
            if h <= 10 {
                hole(h, &[("a", 3), ("b", 5)])
            } else {
                hole(h, &[("a", 6), ("b", 3)])
            }
        })
        .collect();
    let o = play(&s, &entries);

    assert_eq!(o.state.decided_at, Some(10));
    assert_eq!(o.state.status, 10);
    assert_eq!(o.margin, "10 UP with 8 to play");
    assert_eq!(o.result_a, Some(MatchResult::Win));
    assert_eq!(o.result_b, Some(MatchResult::Loss));
    assert!(o.holes[10..].iter().all(|h| !h.counted && h.status_after == 10));
}

#[test]
fn test_open_match_margin() {
    let s = setup("m", flat_course(18), players(&["a", "b"]), singles());
    let o = play(
        &s,
        &[
            hole(1, &[("a", 4), ("b", 5)]),
            hole(2, &[("a", 4), ("b", 4)]),
            hole(3, &[("a", 6), ("b", 4)]),
            hole(4, &[("a", 6), ("b", 4)]),
        ],
    );
    assert_eq!(o.margin, "1 DOWN");
    assert_eq!(o.state.margin_text(MatchSide::B), "1 UP");
    assert_eq!(o.result_a, None);
    let history: Vec<i32> = match_status_history(&o).iter().map(|p| p.status).collect();
    assert_eq!(history, vec![1, 1, 0, -1]);
}

#[test]
fn test_incomplete_hole_does_not_move_status() {
    let s = setup("m", flat_course(18), players(&["a", "b"]), singles());
    let o = play(&s, &[HoleScoreEntry::new(1).with_strokes("a", 3)]);
    assert!(!o.holes[0].resolved);
    assert_eq!(o.state.status, 0);
    assert_eq!(o.state.holes_played, 0);
}

#[test]
fn test_handicap_strokes_change_the_winner() {
    let mut s = setup(
        "m",
        flat_course(18),
        vec![Player::new("a", "A", Some(2.0)), Player::new("b", "B", Some(3.0))],
        singles(),
    );
    s.use_handicaps = true;
    // Off the low, b gets one stroke on stroke index 1.
    let o = play(&s, &[hole(1, &[("a", 4), ("b", 5)]), hole(2, &[("a", 4), ("b", 5)])]);
    assert_eq!(o.holes[0].winner, None);
    assert_eq!(o.holes[1].winner, Some(MatchSide::A));
}

#[test]
fn test_nine_hole_handicap_gives_one_stroke_per_hole() {
    let mut s = setup(
        "m9",
        flat_course(9),
        vec![Player::new("a", "A", Some(18.0)), Player::new("b", "B", Some(0.0))],
        singles(),
    );
    s.use_handicaps = true;
    let o = play(&s, &[hole(1, &[("a", 6), ("b", 5)]), hole(9, &[("a", 5), ("b", 5)])]);
    assert_eq!(o.holes[0].side_a_score, Some(5));
    assert_eq!(o.holes[0].winner, None);
    assert!(o.holes[0].resolved);
    assert_eq!(o.holes[1].side_a_score, Some(4));
    assert_eq!(o.holes[1].winner, Some(MatchSide::A));
}

#[test]
fn test_best_ball_uses_low_ball() {
    let game = GameFormat::BestBall {
        side_a: Side::new("AB", &["a", "b"]),
        side_b: Side::new("CD", &["c", "d"]),
    };
    let s = setup("bb", flat_course(18), players(&["a", "b", "c", "d"]), game);
    let conceded = HoleScoreEntry::new(2)
        .with_conceded("a")
        .with_strokes("b", 5)
        .with_strokes("c", 5)
        .with_strokes("d", 6);
    let o = play(
        &s,
        &[hole(1, &[("a", 6), ("b", 3), ("c", 4), ("d", 4)]), conceded],
    );
    assert_eq!(o.holes[0].side_a_score, Some(3));
    assert_eq!(o.holes[0].winner, Some(MatchSide::A));
    assert_eq!(o.holes[1].winner, None);
    assert_eq!(o.margin, "1 UP");
}

#[test]
fn test_singles_rejects_teams() {
    let game = GameFormat::MatchPlay {
        side_a: Side::new("AB", &["a", "b"]),
        side_b: Side::new("C", &["c"]),
    };
    let s = setup("m", flat_course(18), players(&["a", "b", "c"]), game);
    let err = golfcard::api::score_game(&s, &[], &Default::default()).unwrap_err();
    assert_eq!(err.field(), Some("sides"));
}

proptest! {
    #[test]
    fn test_match_status_bound(scores in prop::collection::vec((3u8..7, 3u8..7), 1..=18)) {
        let s = setup("m", flat_course(18), players(&["a", "b"]), singles());
        let entries: Vec<_> = scores
            .iter()
            .enumerate()
            .map(|(i, (a, b))| hole(i as u8 + 1, &[("a", *a), ("b", *b)]))
            .collect();
        let o = play(&s, &entries);

        let mut played = 0i32;
        let mut frozen: Option<i32> = None;
        for h in &o.holes {
            played += 1;
            prop_assert!(h.status_after.abs() <= played);
            if let Some(f) = frozen {
                prop_assert_eq!(h.status_after, f);
            } else if h.status_after.unsigned_abs() > h.holes_remaining as u32 {
                frozen = Some(h.status_after);
            }
        }
    }
}
