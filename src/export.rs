use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::aggregate::{self, AtBatGroup};
use crate::api::RecentGame;
use crate::strike_zone::{PitchCategory, is_plottable};

pub struct ExportReport {
    pub at_bats: usize,
    pub pitches: usize,
}

/// Writes one game to a workbook with Summary, AtBats and Pitches sheets.
pub fn export_game(
    path: &Path,
    pitcher: &str,
    game: &RecentGame,
    names: &HashMap<u32, String>,
) -> Result<ExportReport> {
    let summary_rows = summary_rows(pitcher, game);
    let groups = aggregate::group_by_at_bat(&game.details);
    let at_bat_rows = at_bat_rows(&groups, names);
    let pitch_rows = pitch_rows(&groups);

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Summary")?;
        write_rows(sheet, &summary_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("AtBats")?;
        write_rows(sheet, &at_bat_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Pitches")?;
        write_rows(sheet, &pitch_rows)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;

    Ok(ExportReport {
        at_bats: at_bat_rows.len().saturating_sub(1),
        pitches: pitch_rows.len().saturating_sub(1),
    })
}

pub fn summary_rows(pitcher: &str, game: &RecentGame) -> Vec<Vec<String>> {
    let summary = aggregate::summarize_events(&game.details);
    let row = |label: &str, value: String| vec![label.to_string(), value];
    vec![
        row("Pitcher", pitcher.to_string()),
        row("Game", game.game_pk.clone()),
        row("Date", game.game_date.clone().unwrap_or_default()),
        row("Opponent", game.opponent.clone().unwrap_or_default()),
        row("Strikeouts", summary.strikeouts.to_string()),
        row("Walks", summary.walks.to_string()),
        row("K:BB", summary.k_bb.to_string()),
        row("Hits", summary.hits.to_string()),
        row("Hit hard", summary.hard_hit.to_string()),
        row("Strikes", summary.strikes.to_string()),
        row("Strike %", format!("{:.1}", summary.strike_pct)),
        row("Balls", summary.balls.to_string()),
        row("Ball %", format!("{:.1}", summary.ball_pct)),
        row("Pitches", summary.pitches().to_string()),
    ]
}

fn at_bat_rows(groups: &[AtBatGroup], names: &HashMap<u32, String>) -> Vec<Vec<String>> {
    let mut rows = vec![vec![
        "#".to_string(),
        "At-bat".to_string(),
        "Inning".to_string(),
        "Batter".to_string(),
        "Result".to_string(),
        "Pitches".to_string(),
    ]];
    for (idx, group) in groups.iter().enumerate() {
        let batter = group
            .batter()
            .map(|id| names.get(&id).cloned().unwrap_or_else(|| id.to_string()))
            .unwrap_or_default();
        rows.push(vec![
            (idx + 1).to_string(),
            group.at_bat_number.to_string(),
            group.inning().map(|i| i.to_string()).unwrap_or_default(),
            batter,
            aggregate::at_bat_label(group),
            group.events.len().to_string(),
        ]);
    }
    rows
}

fn pitch_rows(groups: &[AtBatGroup]) -> Vec<Vec<String>> {
    let mut rows = vec![vec![
        "At-bat".to_string(),
        "Inning".to_string(),
        "Count".to_string(),
        "Pitch".to_string(),
        "Velo".to_string(),
        "Description".to_string(),
        "Event".to_string(),
        "plate_x".to_string(),
        "plate_z".to_string(),
        "Zone category".to_string(),
    ]];
    for group in groups {
        for event in &group.events {
            let category = if is_plottable(event) {
                PitchCategory::from_description(event.description())
                    .label()
                    .to_string()
            } else {
                String::new()
            };
            rows.push(vec![
                event.at_bat_number.to_string(),
                event.inning.to_string(),
                event.count_label().unwrap_or_default(),
                event.pitch_type.clone().unwrap_or_default(),
                opt_f64(event.release_speed, 1),
                event.description().unwrap_or_default().to_string(),
                event.outcome().unwrap_or_default().to_string(),
                opt_f64(event.plate_x.get(), 2),
                opt_f64(event.plate_z.get(), 2),
                category,
            ]);
        }
    }
    rows
}

fn opt_f64(value: Option<f64>, decimals: usize) -> String {
    value
        .map(|v| format!("{v:.decimals$}"))
        .unwrap_or_default()
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pitch::PitchEvent;

    #[test]
    fn summary_sheet_uses_sentinel_ratio() {
        let game = RecentGame {
            game_pk: "745123".to_string(),
            game_date: Some("2024-09-01".to_string()),
            opponent: Some("NYY".to_string()),
            details: vec![PitchEvent {
                at_bat_number: 1,
                events: Some("strikeout".to_string()),
                description: Some("swinging_strike".to_string()).into(),
                ..PitchEvent::default()
            }],
        };
        let rows = summary_rows("Test Pitcher", &game);
        let kbb = rows.iter().find(|r| r[0] == "K:BB").expect("K:BB row");
        assert_eq!(kbb[1], "∞");
        let strikes = rows.iter().find(|r| r[0] == "Strike %").expect("strike row");
        assert_eq!(strikes[1], "100.0");
    }
}
