use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use golfcard::aggregate::{RoundAverages, SgBucket};
use golfcard::api::GameReport;
use golfcard::formats::copenhagen::CopenhagenOutcome;
use golfcard::formats::match_play::{MatchOutcome, MatchSide};
use golfcard::formats::scramble::UmbriagoOutcome;
use golfcard::formats::skins::SkinsOutcome;
use golfcard::formats::stroke_play::StrokePlayOutcome;
use golfcard::formats::wolf::{WolfChoice, WolfOutcome};
use golfcard::formats::GameOutcome;
use golfcard::strokes_gained::{ShotEnd, ShotRecord};

fn new_table(header: Vec<Cell>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    let width = header.len();
    table.add_row(header);
    for i in 1..width {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
    table
}

fn bold(s: impl ToString) -> Cell {
    Cell::new(s.to_string()).add_attribute(Attribute::Bold)
}

fn sg_cell(v: f64) -> Cell {
    let text = format!("{:+.2}", v);
    if v > 0.0 {
        Cell::new(text).fg(Color::Green)
    } else if v < 0.0 {
        Cell::new(text).fg(Color::Red)
    } else {
        Cell::new(text)
    }
}

fn opt<T: ToString>(v: Option<T>) -> String {
    v.map(|x| x.to_string()).unwrap_or_else(|| "-".to_string())
}

pub fn print_game_report(report: &GameReport) {
    println!(
        "\n=== {} ({}) | {} holes resolved{} ===",
        report.game_id,
        report.format,
        report.holes_resolved,
        if report.round_complete { ", complete" } else { "" }
    );
    match &report.outcome {
        GameOutcome::StrokePlay(o) | GameOutcome::Scramble(o) => print_stroke_play(o),
        GameOutcome::Match(o) => print_match(o),
        GameOutcome::Skins(o) => print_skins(o),
        GameOutcome::Wolf(o) => print_wolf(o),
        GameOutcome::Copenhagen(o) => print_copenhagen(o),
        GameOutcome::Umbriago(o) => print_umbriago(o),
    }

    let mut table = new_table(vec![bold("Player / Side"), bold("Total")]);
    for line in &report.totals {
        table.add_row(vec![Cell::new(&line.name), Cell::new(&line.display)]);
    }
    println!("{}", table);
}

fn print_stroke_play(o: &StrokePlayOutcome) {
    let mut holes = new_table(vec![bold("Hole"), bold("Par"), bold("Gross"), bold("Net")]);
    for h in &o.holes {
        let gross: Vec<String> = h
            .gross
            .iter()
            .map(|(id, s)| format!("{}:{}", id, i32::from(*s)))
            .collect();
        let net: Vec<String> = h.net.iter().map(|(id, n)| format!("{}:{}", id, n)).collect();
        holes.add_row(vec![
            Cell::new(h.hole_number),
            Cell::new(h.par),
            Cell::new(gross.join(" ")),
            Cell::new(net.join(" ")),
        ]);
    }
    println!("{}", holes);

    let mut table = new_table(vec![
        bold("Pos"),
        bold("Player"),
        bold("Gross"),
        bold("Net"),
        Cell::new("To Par").fg(Color::Cyan),
        bold("Thru"),
    ]);
    for s in &o.standings {
        table.add_row(vec![
            Cell::new(s.position_label()),
            Cell::new(&s.player),
            Cell::new(s.gross_total),
            Cell::new(s.net_total),
            Cell::new(s.to_par_label()).fg(Color::Cyan),
            Cell::new(s.holes_played),
        ]);
    }
    println!("{}", table);
}

fn print_match(o: &MatchOutcome) {
    let mut table = new_table(vec![
        bold("Hole"),
        bold(&o.side_a.name),
        bold(&o.side_b.name),
        bold("Winner"),
        bold("Status"),
    ]);
    for h in &o.holes {
        let winner = match h.winner {
            Some(MatchSide::A) => o.side_a.name.clone(),
            Some(MatchSide::B) => o.side_b.name.clone(),
            None if h.resolved => "halved".to_string(),
            None => "-".to_string(),
        };
        let status = Cell::new(h.status_after);
        table.add_row(vec![
            Cell::new(h.hole_number),
            Cell::new(opt(h.side_a_score)),
            Cell::new(opt(h.side_b_score)),
            Cell::new(winner),
            if h.counted { status } else { status.fg(Color::DarkGrey) },
        ]);
    }
    println!("{}", table);
    println!("{}: {}", o.side_a.name, o.state.margin_text(MatchSide::A));
}

fn print_skins(o: &SkinsOutcome) {
    let mut table = new_table(vec![bold("Hole"), bold("Low"), bold("Winner"), bold("Skins")]);
    for h in &o.holes {
        let winner = match (&h.winner_id, h.is_carryover) {
            (Some(w), _) => Cell::new(w).fg(Color::Green),
            (None, true) => Cell::new("carry").fg(Color::Yellow),
            (None, false) => Cell::new("-"),
        };
        table.add_row(vec![
            Cell::new(h.hole_number),
            Cell::new(opt(h.low_score)),
            winner,
            Cell::new(h.skins_available),
        ]);
    }
    println!("{}", table);
    if o.carryover > 0 {
        println!("Unclaimed skins: {}", o.carryover);
    }
}

fn print_wolf(o: &WolfOutcome) {
    let mut header = vec![bold("Hole"), bold("Wolf"), bold("Choice"), bold("Result")];
    header.extend(o.total_points.keys().map(bold));
    let mut table = new_table(header);
    for h in &o.holes {
        let choice = match &h.choice {
            Some(WolfChoice::Lone) => "lone".to_string(),
            Some(WolfChoice::Partner(p)) => format!("+{}", p),
            None => "-".to_string(),
        };
        let mut row = vec![
            Cell::new(h.hole_number),
            Cell::new(&h.wolf),
            Cell::new(choice),
            Cell::new(opt(h.result)),
        ];
        row.extend(
            o.total_points
                .keys()
                .map(|id| Cell::new(opt(h.hole_points.get(id)))),
        );
        table.add_row(row);
    }
    println!("{}", table);
    let leaders: Vec<&str> = o.leaders.iter().map(|p| p.as_str()).collect();
    println!("Leader(s): {}", leaders.join(", "));
}

fn print_copenhagen(o: &CopenhagenOutcome) {
    let mut header = vec![bold("Hole")];
    header.extend(o.players.iter().map(bold));
    header.push(bold("Sweep"));
    let mut table = new_table(header);
    for h in &o.holes {
        let mut row = vec![Cell::new(h.hole_number)];
        row.extend(h.points.iter().map(|p| {
            if h.resolved {
                Cell::new(p)
            } else {
                Cell::new("-")
            }
        }));
        row.push(match &h.sweep_winner {
            Some(w) => Cell::new(w).fg(Color::Green),
            None => Cell::new(""),
        });
        table.add_row(row);
    }
    println!("{}", table);

    if o.presses.is_empty() {
        return;
    }
    let mut header = vec![bold("Press"), bold("From"), bold("By")];
    header.extend(o.players.iter().map(bold));
    let mut presses = new_table(header);
    for p in &o.presses {
        let by = o
            .players
            .get(p.initiating_player_index)
            .map(|id| id.to_string())
            .unwrap_or_default();
        let mut row = vec![Cell::new(p.id), Cell::new(p.start_hole), Cell::new(by)];
        row.extend(p.totals.iter().map(Cell::new));
        presses.add_row(row);
    }
    println!("{}", presses);
}

fn print_umbriago(o: &UmbriagoOutcome) {
    let side = |s: Option<MatchSide>| match s {
        Some(MatchSide::A) => o.side_a.name.clone(),
        Some(MatchSide::B) => o.side_b.name.clone(),
        None => "-".to_string(),
    };
    let mut table = new_table(vec![
        bold("Hole"),
        bold("Low ball"),
        bold("Low total"),
        bold("Birdies"),
        bold("CTP"),
        bold(&o.side_a.name),
        bold(&o.side_b.name),
    ]);
    for h in &o.holes {
        table.add_row(vec![
            Cell::new(h.hole_number),
            Cell::new(side(h.low_ball)),
            Cell::new(side(h.low_total)),
            Cell::new(format!("{}-{}", h.birdies_a, h.birdies_b)),
            Cell::new(side(h.closest_to_pin)),
            Cell::new(h.points_a),
            Cell::new(h.points_b),
        ]);
    }
    println!("{}", table);
}

pub fn print_shots(round_id: &str, shots: &[ShotRecord]) {
    println!("\nRound: {}", round_id);
    let mut table = new_table(vec![
        bold("Hole"),
        bold("Type"),
        bold("Start"),
        bold("Lie"),
        bold("End"),
        Cell::new("SG").fg(Color::Cyan),
    ]);
    for s in shots {
        let end = match s.end {
            ShotEnd::Holed => "holed".to_string(),
            ShotEnd::Rest { distance, lie } => {
                format!("{:.1}m {}", distance, lie)
            }
        };
        table.add_row(vec![
            Cell::new(s.hole_number),
            Cell::new(s.shot_type),
            Cell::new(format!("{:.1}m", s.start_distance)),
            Cell::new(s.start_lie),
            Cell::new(end),
            sg_cell(s.strokes_gained),
        ]);
    }
    println!("{}", table);
}

pub fn print_rollup(buckets: &[SgBucket]) {
    let mut table = new_table(vec![
        bold("Type"),
        bold("Band"),
        bold("Lie"),
        bold("Shots"),
        bold("Total"),
        bold("Avg"),
    ]);
    for b in buckets {
        table.add_row(vec![
            Cell::new(b.shot_type),
            Cell::new(&b.band),
            Cell::new(opt(b.lie)),
            Cell::new(b.shots),
            sg_cell(b.total),
            sg_cell(b.average()),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_round_averages(avg: Option<&RoundAverages>) {
    let Some(avg) = avg else {
        println!("No complete rounds; per-round averages skipped.");
        return;
    };
    let mut table = new_table(vec![bold(format!("Per round ({} complete)", avg.rounds)), bold("SG")]);
    for (t, v) in &avg.by_type {
        table.add_row(vec![Cell::new(t), sg_cell(*v)]);
    }
    table.add_row(vec![bold("Total"), sg_cell(avg.total)]);
    println!("\n{}", table);
}
