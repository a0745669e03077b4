#![allow(dead_code)]

use golfcard::api::{score_game, GameReport, GameSetup};
use golfcard::config::EngineConfig;
use golfcard::course::{Course, HoleScoreEntry, Player};
use golfcard::formats::GameFormat;

/// 18 holes, all par 4, stroke index equal to hole number.
pub fn flat_course(holes: u8) -> Course {
    let pars = vec![4u8; holes as usize];
    let indices: Vec<u8> = (1..=holes).collect();
    Course::from_pars(&pars, &indices).unwrap()
}

pub fn players(ids: &[&str]) -> Vec<Player> {
    ids.iter().map(|id| Player::new(id, &id.to_uppercase(), None)).collect()
}

pub fn setup(game_id: &str, course: Course, players: Vec<Player>, game: GameFormat) -> GameSetup {
    GameSetup {
        game_id: game_id.to_string(),
        course,
        players,
        use_handicaps: false,
        game,
    }
}

/// Entry with the given gross scores in roster order.
pub fn hole(number: u8, scores: &[(&str, u8)]) -> HoleScoreEntry {
    scores
        .iter()
        .fold(HoleScoreEntry::new(number), |e, (p, s)| e.with_strokes(p, *s))
}

pub fn run(setup: &GameSetup, entries: &[HoleScoreEntry]) -> GameReport {
    score_game(setup, entries, &EngineConfig::default()).unwrap()
}
