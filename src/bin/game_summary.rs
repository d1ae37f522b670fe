use std::fs;

use anyhow::{Context, Result};

use pitch_terminal::aggregate;
use pitch_terminal::api::parse_recent_games_json;
use pitch_terminal::strike_zone::{AtBatFilter, ZoneCanvas, ZoneScheme, classify_coordinates};

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "tests/fixtures/recent_games.json".to_string());
    let raw = fs::read_to_string(&path).with_context(|| format!("read {path}"))?;
    let games = parse_recent_games_json(&raw).with_context(|| format!("parse {path}"))?;
    if games.is_empty() {
        println!("no games in {path}");
        return Ok(());
    }

    for game in &games {
        let summary = aggregate::summarize_events(&game.details);
        println!(
            "Game {} {} vs {}",
            game.game_pk,
            game.game_date.as_deref().unwrap_or("?"),
            game.opponent.as_deref().unwrap_or("?")
        );
        println!(
            "  K {}  BB {}  K:BB {}  H {}  Hard {}  Strikes {} ({:.1}%)  Balls {} ({:.1}%)",
            summary.strikeouts,
            summary.walks,
            summary.k_bb,
            summary.hits,
            summary.hard_hit,
            summary.strikes,
            summary.strike_pct,
            summary.balls,
            summary.ball_pct
        );

        let groups = aggregate::group_by_at_bat(&game.details);
        let breaks = aggregate::inning_breaks(&groups);
        for (idx, group) in groups.iter().enumerate() {
            if breaks.contains(&idx) {
                let inning = group.inning().map(|i| i.to_string()).unwrap_or_default();
                println!("  -- inning {inning} --");
            }
            println!(
                "  {:>2}. batter {:<8} {}",
                idx + 1,
                group.batter().map(|b| b.to_string()).unwrap_or_default(),
                aggregate::at_bat_label(group)
            );
        }

        let series = classify_coordinates(&groups, AtBatFilter::All);
        let markers = series.markers(ZoneCanvas::AGGREGATE, ZoneScheme::Detailed);
        let mut tally: Vec<(&str, usize)> = Vec::new();
        for marker in &markers {
            let label = marker.category.label();
            match tally.iter_mut().find(|(l, _)| *l == label) {
                Some((_, n)) => *n += 1,
                None => tally.push((label, 1)),
            }
        }
        let tally = tally
            .into_iter()
            .map(|(label, n)| format!("{label} {n}"))
            .collect::<Vec<_>>()
            .join(", ");
        println!("  zone: {} plotted ({tally})", markers.len());
        println!();
    }
    Ok(())
}
