mod common;

use common::{flat_course, hole, players, setup};
use golfcard::api::{request_press, score_game, HoleStore, MemoryStore, ScoringService};
use golfcard::config::EngineConfig;
use golfcard::course::{HoleScoreEntry, PlayerId};
use golfcard::formats::copenhagen::{CopenhagenOutcome, PressRequest, RankPattern};
use golfcard::formats::{GameFormat, GameOutcome};
use golfcard::error::GcResult;
use proptest::prelude::*;

fn play_with(
    presses: Vec<PressRequest>,
    entries: &[HoleScoreEntry],
    config: &EngineConfig,
) -> GcResult<CopenhagenOutcome> {
    let s = setup(
        "cph",
        flat_course(18),
        players(&["p1", "p2", "p3"]),
        GameFormat::Copenhagen { presses },
    );
    match score_game(&s, entries, config)?.outcome {
        GameOutcome::Copenhagen(o) => Ok(o),
        other => panic!("unexpected outcome {:?}", other),
    }
}

fn play(entries: &[HoleScoreEntry]) -> CopenhagenOutcome {
    play_with(vec![], entries, &EngineConfig::default()).unwrap()
}

#[test]
fn test_birdie_beating_both_sweeps() {
    let o = play(&[hole(1, &[("p1", 3), ("p2", 4), ("p3", 4)])]);
    let h = &o.holes[0];
    assert_eq!(h.points, [6, 0, 0]);
    assert!(h.is_sweep);
    assert_eq!(h.sweep_winner, Some(PlayerId::from("p1")));
}

#[test]
fn test_par_beating_both_does_not_sweep() {
    let o = play(&[hole(1, &[("p1", 4), ("p2", 5), ("p3", 5)])]);
    assert_eq!(o.holes[0].points, [4, 1, 1]);
    assert_eq!(o.holes[0].pattern, Some(RankPattern::TieSecond));
    assert!(!o.holes[0].is_sweep);
}

#[test]
fn test_sweeps_can_be_switched_off() {
    let config = EngineConfig {
        copenhagen_sweep_under_par: false,
        ..Default::default()
    };
    let o = play_with(vec![], &[hole(1, &[("p1", 3), ("p2", 4), ("p3", 5)])], &config).unwrap();
    assert_eq!(o.holes[0].points, [4, 2, 0]);
}

#[test]
fn test_totals_accumulate() {
    let o = play(&[
        hole(1, &[("p1", 4), ("p2", 5), ("p3", 6)]),
        hole(2, &[("p1", 5), ("p2", 4), ("p3", 4)]),
        hole(3, &[("p1", 4), ("p2", 4), ("p3", 4)]),
    ]);
    assert_eq!(o.totals, [6, 7, 5]);
}

#[test]
fn test_press_scores_from_next_hole() {
    let entries = [
        hole(1, &[("p1", 4), ("p2", 5), ("p3", 6)]),
        hole(2, &[("p1", 4), ("p2", 5), ("p3", 6)]),
        hole(3, &[("p1", 6), ("p2", 5), ("p3", 4)]),
    ];
    let presses = vec![
        PressRequest { after_hole: 2, player: PlayerId::from("p3") },
        PressRequest { after_hole: 1, player: PlayerId::from("p2") },
    ];
    let o = play_with(presses, &entries, &EngineConfig::default()).unwrap();

    assert_eq!(o.totals, [8, 6, 4]);
    assert_eq!(o.presses.len(), 2);
    assert_eq!(o.presses[0].id, 1);
    assert_eq!(o.presses[0].start_hole, 3);
    assert_eq!(o.presses[0].initiating_player_index, 2);
    assert_eq!(o.presses[0].totals, [0, 2, 4]);
    assert_eq!(o.presses[1].start_hole, 2);
    assert_eq!(o.presses[1].totals, [4, 4, 4]);
    assert!(o.presses.iter().all(|p| p.is_active));
}

fn three_ball() -> golfcard::api::GameSetup {
    setup(
        "cph",
        flat_course(18),
        players(&["p1", "p2", "p3"]),
        GameFormat::Copenhagen { presses: vec![] },
    )
}

#[test]
fn test_leader_cannot_press() {
    let entries = [hole(1, &[("p1", 4), ("p2", 5), ("p3", 6)])];
    let press = |p: &str| PressRequest { after_hole: 1, player: PlayerId::from(p) };
    let config = EngineConfig::default();

    let err = request_press(&three_ball(), &entries, &config, press("p1")).unwrap_err();
    assert_eq!(err.field(), Some("presses"));
    assert!(request_press(&three_ball(), &entries, &config, press("zed")).is_err());

    let updated = request_press(&three_ball(), &entries, &config, press("p2")).unwrap();
    assert_eq!(updated.game, GameFormat::Copenhagen { presses: vec![press("p2")] });
}

#[test]
fn test_press_survives_edit_of_earlier_hole() {
    let service = ScoringService::new(MemoryStore::new(), EngineConfig::default()).unwrap();
    let s = three_ball();
    service.record_hole(&s, hole(1, &[("p1", 4), ("p2", 5), ("p3", 6)])).unwrap();
    let s = service
        .request_press(&s, PressRequest { after_hole: 1, player: PlayerId::from("p2") })
        .unwrap();
    service.record_hole(&s, hole(2, &[("p1", 5), ("p2", 4), ("p3", 6)])).unwrap();

    // p2 now leads after hole 1, but the press taken earlier still counts.
    let report = service.record_hole(&s, hole(1, &[("p1", 5), ("p2", 4), ("p3", 6)])).unwrap();
    let GameOutcome::Copenhagen(o) = report.outcome else {
        panic!("expected copenhagen");
    };
    assert_eq!(o.totals, [4, 8, 0]);
    assert_eq!(o.presses.len(), 1);
    assert_eq!(o.presses[0].start_hole, 2);
    assert_eq!(o.presses[0].totals, [2, 4, 0]);
    assert_eq!(service.store().read_holes("cph").unwrap().len(), 2);
}

#[test]
fn test_press_needs_copenhagen() {
    let s = setup("sp", flat_course(18), players(&["p1", "p2", "p3"]), GameFormat::StrokePlay);
    let press = PressRequest { after_hole: 1, player: PlayerId::from("p2") };
    assert!(request_press(&s, &[], &EngineConfig::default(), press).is_err());
}

#[test]
fn test_press_after_last_hole_is_rejected() {
    let presses = vec![PressRequest { after_hole: 18, player: PlayerId::from("p2") }];
    assert!(play_with(presses, &[], &EngineConfig::default()).is_err());
}

#[test]
fn test_needs_three_players() {
    let s = setup(
        "cph",
        flat_course(18),
        players(&["p1", "p2"]),
        GameFormat::Copenhagen { presses: vec![] },
    );
    assert!(score_game(&s, &[], &EngineConfig::default()).is_err());
}

proptest! {
    #[test]
    fn test_six_points_every_resolved_hole(
        scores in prop::collection::vec(prop::array::uniform3(prop::option::weighted(0.9, 2u8..9)), 1..=18)
    ) {
        let entries: Vec<_> = scores
            .iter()
            .enumerate()
            .map(|(i, s)| {
                ["p1", "p2", "p3"].iter().zip(s).fold(HoleScoreEntry::new(i as u8 + 1), |e, (p, v)| match v {
                    Some(v) => e.with_strokes(p, *v),
                    None => e.with_conceded(p),
                })
            })
            .collect();
        let o = play(&entries);
        for h in o.holes.iter().filter(|h| h.resolved) {
            prop_assert_eq!(h.points.iter().map(|p| *p as u32).sum::<u32>(), 6);
        }
        prop_assert_eq!(o.totals.iter().sum::<u32>(), 6 * o.holes.len() as u32);
    }
}
