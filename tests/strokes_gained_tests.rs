use golfcard::strokes_gained::loader::{load_baseline, load_long_game_table, load_putting_table};
use golfcard::strokes_gained::{
    calculate_strokes_gained, calculate_strokes_gained_raw, BaselineTable, Lie, LieCurve,
    SgCategory, ShotEnd, ShotInput, ShotType,
};
use proptest::prelude::*;
use rstest::rstest;
use std::io::Write;
use tempfile::NamedTempFile;

const EPS: f64 = 1e-9;

fn table() -> BaselineTable {
    BaselineTable::standard().unwrap()
}

// --- BASELINE ---

#[rstest]
#[case(6.0, 1.72)]
#[case(1.0, 1.04)]
#[case(1.25, 1.085)] // halfway between 1.04 and 1.13
#[case(0.1, 1.00)] // clamped below
#[case(60.0, 2.27)] // clamped above, never extrapolated
fn test_putting_interpolation(#[case] distance: f64, #[case] expected: f64) {
    assert!((table().expected_putting(distance) - expected).abs() < EPS);
}

#[test]
fn test_zero_distance_expects_nothing() {
    let t = table();
    assert_eq!(t.expected_putting(0.0), 0.0);
    assert_eq!(t.expected_for_lie(0.0, Lie::Rough), 0.0);
}

#[test]
fn test_lie_selects_curve() {
    let t = table();
    let fairway = t.expected_for_lie(150.0, Lie::Fairway);
    assert_eq!(t.expected_for_lie(150.0, Lie::Tee), fairway);
    assert!(t.expected_for_lie(150.0, Lie::Rough) > fairway);
    assert!(t.expected_for_lie(150.0, Lie::Recovery) > t.expected_for_lie(150.0, Lie::Rough));
    assert_eq!(t.expected_for_lie(5.0, Lie::Green), t.expected_putting(5.0));
}

#[rstest]
#[case("Bunker", Lie::Sand)]
#[case("sand", Lie::Sand)]
#[case("TREES", Lie::Recovery)]
#[case("fringe", Lie::Fairway)]
#[case("", Lie::Fairway)]
fn test_lenient_lie_parsing(#[case] raw: &str, #[case] lie: Lie) {
    assert_eq!(Lie::parse_lenient(raw), lie);
}

// --- LOADER ---

#[test]
fn test_loader_skips_bad_rows() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "distance_m,expected_strokes").unwrap();
    writeln!(file, "1,1.05").unwrap();
    writeln!(file, "oops,1.2").unwrap();
    writeln!(file, "3").unwrap();
    writeln!(file, " 2 , 1.25 ").unwrap();

    let curve = load_putting_table(std::fs::File::open(file.path()).unwrap()).unwrap();
    assert_eq!(curve.points(), &[(1.0, 1.05), (2.0, 1.25)]);
}

#[test]
fn test_loader_rejects_empty_table() {
    let data = "distance_m,expected_strokes\nx,y\n";
    assert!(load_putting_table(data.as_bytes()).is_err());
}

#[test]
fn test_long_game_loader_groups_by_lie() {
    let data = "lie,distance_m,expected_strokes\n\
                fairway,100,2.80\n\
                fairway,200,3.20\n\
                bunker,100,3.20\n\
                lava,100,9.0\n";
    let curves = load_long_game_table(data.as_bytes()).unwrap();
    let lies: Vec<LieCurve> = curves.iter().map(|(l, _)| *l).collect();
    assert_eq!(lies, vec![LieCurve::Fairway, LieCurve::Sand]);
}

#[test]
fn test_missing_lie_reuses_fairway() {
    let mut putting = NamedTempFile::new().unwrap();
    writeln!(putting, "distance_m,expected_strokes\n1,1.0\n10,2.0").unwrap();
    let mut long_game = NamedTempFile::new().unwrap();
    writeln!(long_game, "lie,distance_m,expected_strokes\nfairway,100,2.8\nfairway,200,3.2").unwrap();

    let t = load_baseline(putting.path(), long_game.path()).unwrap();
    assert_eq!(t.expected_for_lie(150.0, Lie::Rough), t.expected_for_lie(150.0, Lie::Fairway));
    assert!((t.expected_for_lie(150.0, Lie::Fairway) - 3.0).abs() < EPS);
}

#[test]
fn test_baseline_without_fairway_is_an_error() {
    let mut putting = NamedTempFile::new().unwrap();
    writeln!(putting, "distance_m,expected_strokes\n1,1.0").unwrap();
    let mut long_game = NamedTempFile::new().unwrap();
    writeln!(long_game, "lie,distance_m,expected_strokes\nrough,100,3.0").unwrap();
    assert!(load_baseline(putting.path(), long_game.path()).is_err());
}

// --- CALCULATOR ---

#[test]
fn test_six_metre_putt() {
    let t = table();
    let holed = calculate_strokes_gained(&t, SgCategory::Putting, 6.0, Lie::Green, ShotEnd::Holed).unwrap();
    assert!((holed - (t.expected_putting(6.0) - 1.0)).abs() < EPS);

    let left = calculate_strokes_gained(
        &t,
        SgCategory::Putting,
        6.0,
        Lie::Green,
        ShotEnd::Rest { distance: 1.0, lie: Lie::Green },
    )
    .unwrap();
    assert!((left - (t.expected_putting(6.0) - 1.0 - t.expected_putting(1.0))).abs() < EPS);
}

#[test]
fn test_putting_ignores_lie() {
    let t = table();
    let a = calculate_strokes_gained(&t, SgCategory::Putting, 4.0, Lie::Rough, ShotEnd::Holed).unwrap();
    let b = calculate_strokes_gained(&t, SgCategory::Putting, 4.0, Lie::Green, ShotEnd::Holed).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_zero_start_is_zero() {
    let t = table();
    assert_eq!(
        calculate_strokes_gained(&t, SgCategory::LongGame, 0.0, Lie::Fairway, ShotEnd::Holed).unwrap(),
        0.0
    );
}

#[rstest]
#[case(-1.0)]
#[case(f64::NAN)]
#[case(f64::INFINITY)]
fn test_bad_start_distance_is_rejected(#[case] d: f64) {
    let err = calculate_strokes_gained(&table(), SgCategory::LongGame, d, Lie::Fairway, ShotEnd::Holed)
        .unwrap_err();
    assert_eq!(err.field(), Some("startDistance"));
}

#[test]
fn test_raw_contract_validation() {
    let t = table();
    assert!(calculate_strokes_gained_raw(&t, SgCategory::Putting, 3.0, "green", true, None, None).is_ok());
    assert!(calculate_strokes_gained_raw(&t, SgCategory::Putting, 3.0, "green", true, None, Some(1.0)).is_err());
    assert!(calculate_strokes_gained_raw(&t, SgCategory::Putting, 3.0, "green", false, Some("green"), None).is_err());

    // Unknown lie falls back to the fairway curve rather than failing.
    let odd = calculate_strokes_gained_raw(&t, SgCategory::LongGame, 150.0, "cart path", false, Some("fairway"), Some(20.0)).unwrap();
    let fairway = calculate_strokes_gained_raw(&t, SgCategory::LongGame, 150.0, "fairway", false, Some("fairway"), Some(20.0)).unwrap();
    assert_eq!(odd, fairway);
}

#[test]
fn test_shot_input_record() {
    let input: ShotInput = serde_json::from_str(
        r#"{"holeNumber":4,"type":"approach","startDistance":140,"startLie":"rough","endDistance":8,"endLie":"green"}"#,
    )
    .unwrap();
    let rec = input.record(&table()).unwrap();
    assert_eq!(rec.shot_type, ShotType::Approach);
    assert_eq!(rec.start_lie, Lie::Rough);
    assert!(!rec.holed());
    let t = table();
    let expected = t.expected_for_lie(140.0, Lie::Rough) - 1.0 - t.expected_putting(8.0);
    assert!((rec.strokes_gained - expected).abs() < EPS);
}

proptest! {
    #[test]
    fn test_shot_going_nowhere_loses_a_stroke(d in 0.5f64..400.0, lie_idx in 0usize..5) {
        let lie = [Lie::Fairway, Lie::Rough, Lie::Sand, Lie::Recovery, Lie::Green][lie_idx];
        let sg = calculate_strokes_gained(
            &table(),
            SgCategory::LongGame,
            d,
            lie,
            ShotEnd::Rest { distance: d, lie },
        )
        .unwrap();
        prop_assert!((sg + 1.0).abs() < EPS);
    }
}
