//! Offline provider that answers every command with generated data.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;
use std::time::Duration;

use chrono::{Duration as ChronoDuration, Local};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::api::{
    ArsenalResponse, ArsenalRow, CountStats, HitOutcome, HitOutcomeResponse, HitOutcomeSummary,
    PitchData, PitchVelocity, PitcherRoster, PitcherSeasonRow, ProgressionRow, RecentGame,
};
use crate::export;
use crate::pitch::{Field, PitchEvent};
use crate::state::{Delta, ProviderCommand};

const DEMO_PITCHERS: &[(&str, &str)] = &[
    ("Alder Voss", "SP"),
    ("Marco Ibarra", "SP"),
    ("Theo Landry", "RP"),
    ("Kenji Arata", "SP"),
    ("Rafael Quint", "RP"),
];
const DEMO_OPPONENTS: &[&str] = &["NYY", "BOS", "LAD", "SEA", "TOR", "HOU"];
const DEMO_PITCH_TYPES: &[(&str, &str, f64)] = &[
    ("FF", "4-Seam Fastball", 95.1),
    ("SL", "Slider", 86.4),
    ("CH", "Changeup", 87.9),
    ("CU", "Curveball", 79.8),
];
const FIRST_BATTER_ID: u32 = 600_000;

pub fn spawn_demo_provider(tx: Sender<Delta>, cmd_rx: Receiver<ProviderCommand>) {
    thread::spawn(move || {
        let mut rng = rand::thread_rng();
        let _ = tx.send(Delta::Log("[INFO] Demo provider active".to_string()));

        while let Ok(cmd) = cmd_rx.recv() {
            // Keep the loading states visible for a moment.
            thread::sleep(Duration::from_millis(150));
            match cmd {
                ProviderCommand::FetchRoster => {
                    let _ = tx.send(Delta::SetRoster(demo_roster(&mut rng)));
                }
                ProviderCommand::LoadPitcher { generation, name } => {
                    let id = DEMO_PITCHERS
                        .iter()
                        .position(|(n, _)| *n == name)
                        .map(|idx| 500_000 + idx as u32)
                        .unwrap_or(500_999);
                    let _ = tx.send(Delta::SetPitcherId { generation, id });
                    send_dashboard(&tx, &mut rng, generation);
                }
                ProviderCommand::RefreshPitcher { generation, .. } => {
                    send_dashboard(&tx, &mut rng, generation);
                }
                ProviderCommand::FetchPlayerNames { ids } => {
                    let names = ids
                        .into_iter()
                        .map(|id| (id, format!("Batter {}", id.saturating_sub(FIRST_BATTER_ID) + 1)))
                        .collect();
                    let _ = tx.send(Delta::SetPlayerNames(names));
                }
                ProviderCommand::ExportGame {
                    path,
                    pitcher,
                    game,
                    names,
                } => {
                    let result =
                        export::export_game(&PathBuf::from(&path), &pitcher, &game, &names)
                            .map(|report| report.pitches)
                            .map_err(|err| format!("{err:#}"));
                    let _ = tx.send(Delta::ExportFinished { path, result });
                }
            }
        }
    });
}

fn send_dashboard(tx: &Sender<Delta>, rng: &mut impl Rng, generation: u64) {
    let _ = tx.send(Delta::SetRecentGames {
        generation,
        games: demo_recent_games(rng, 4),
    });
    let _ = tx.send(Delta::SetArsenal {
        generation,
        arsenal: demo_arsenal(rng),
    });
    let _ = tx.send(Delta::SetCountStats {
        generation,
        counts: demo_counts(rng),
    });
    let _ = tx.send(Delta::SetProgression {
        generation,
        rows: demo_progression(rng),
    });
    let _ = tx.send(Delta::SetHitOutcome {
        generation,
        outcome: demo_hit_outcome(rng),
    });
}

fn demo_roster(rng: &mut impl Rng) -> PitcherRoster {
    let data = DEMO_PITCHERS
        .iter()
        .map(|(name, pos)| {
            let so = rng.gen_range(40..220);
            let bb = rng.gen_range(10..70);
            PitcherSeasonRow {
                name: name.to_string(),
                age: rng.gen_range(22..36).to_string(),
                pos: pos.to_string(),
                year: "2024".to_string(),
                wins: rng.gen_range(2..16).to_string(),
                losses: rng.gen_range(2..12).to_string(),
                era: format!("{:.2}", rng.gen_range(2.2..5.4)),
                strikeouts: so.to_string(),
                walks: bb.to_string(),
                so_per_walk: format!("{:.2}", so as f64 / bb as f64),
                whip: format!("{:.2}", rng.gen_range(0.95..1.45)),
                ..PitcherSeasonRow::default()
            }
        })
        .collect();
    PitcherRoster {
        pitcher_names: DEMO_PITCHERS.iter().map(|(n, _)| n.to_string()).collect(),
        data,
    }
}

/// Synthetic games, newest first.
pub fn demo_recent_games(rng: &mut impl Rng, games: usize) -> Vec<RecentGame> {
    let today = Local::now().date_naive();
    (0..games)
        .map(|g| {
            let date = today - ChronoDuration::days(5 * (g as i64 + 1));
            RecentGame {
                game_pk: (746_000 + 10 * games - 10 * g).to_string(),
                game_date: Some(date.format("%Y-%m-%d").to_string()),
                opponent: DEMO_OPPONENTS.choose(rng).map(|s| s.to_string()),
                details: demo_game_pitches(rng),
            }
        })
        .collect()
}

fn demo_game_pitches(rng: &mut impl Rng) -> Vec<PitchEvent> {
    let mut pitches = Vec::new();
    let mut at_bat = 1u32;
    for inning in 1..=rng.gen_range(5..=7u32) {
        let mut outs = 0;
        while outs < 3 {
            let batter = FIRST_BATTER_ID + (at_bat - 1) % 9;
            let (mut balls, mut strikes) = (0u32, 0u32);
            loop {
                let (pitch_type, _, velo) = DEMO_PITCH_TYPES[rng.gen_range(0..DEMO_PITCH_TYPES.len())];
                let count_before = (balls, strikes);
                let roll: f64 = rng.r#gen();
                let (description, mut outcome) = if roll < 0.36 {
                    balls += 1;
                    ("ball", (balls == 4).then_some("walk"))
                } else if roll < 0.40 {
                    balls += 1;
                    ("blocked_ball", (balls == 4).then_some("walk"))
                } else if roll < 0.56 {
                    strikes += 1;
                    ("called_strike", (strikes == 3).then_some("strikeout"))
                } else if roll < 0.68 {
                    strikes += 1;
                    ("swinging_strike", (strikes == 3).then_some("strikeout"))
                } else if roll < 0.84 {
                    strikes = (strikes + 1).min(2);
                    ("foul", None)
                } else if roll < 0.85 {
                    ("hit_by_pitch", Some("hit_by_pitch"))
                } else {
                    let result = ["field_out", "field_out", "field_out", "single", "double", "home_run"]
                        .choose(rng)
                        .copied();
                    ("hit_into_play", result)
                };
                if outcome == Some("field_out") && rng.gen_bool(0.2) {
                    outcome = Some("force_out");
                }
                let in_play = description == "hit_into_play";
                pitches.push(PitchEvent {
                    at_bat_number: at_bat,
                    inning,
                    batter: Some(batter),
                    events: outcome.map(str::to_string),
                    description: Field::Value(description.to_string()),
                    launch_speed: in_play.then(|| rng.gen_range(70.0..110.0)),
                    launch_angle: in_play.then(|| rng.gen_range(-20.0..45.0)),
                    plate_x: Field::Value(rng.gen_range(-1.6..1.6)),
                    plate_z: Field::Value(rng.gen_range(0.8..4.2)),
                    sz_top: Field::Value(rng.gen_range(3.2..3.6)),
                    sz_bot: Field::Value(rng.gen_range(1.5..1.7)),
                    pitch_type: Some(pitch_type.to_string()),
                    release_speed: Some(velo + rng.gen_range(-1.5..1.5)),
                    balls: Some(count_before.0),
                    strikes: Some(count_before.1),
                    ..PitchEvent::default()
                });
                if let Some(result) = outcome {
                    if matches!(result, "strikeout" | "field_out" | "force_out") {
                        outs += 1;
                    }
                    break;
                }
            }
            at_bat += 1;
        }
    }
    pitches
}

fn demo_arsenal(rng: &mut impl Rng) -> ArsenalResponse {
    let original_arsenal = DEMO_PITCH_TYPES
        .iter()
        .map(|(code, name, _)| ArsenalRow {
            pitch_name: name.to_string(),
            pitch_type: code.to_string(),
            pitches: Some(rng.gen_range(150.0..900.0_f64).round()),
            ba: Some(rng.gen_range(0.150..0.320)),
            slg: Some(rng.gen_range(0.250..0.600)),
            woba: Some(rng.gen_range(0.220..0.400)),
            hard_hit_percent: Some(rng.gen_range(20.0..50.0)),
            k_percent: Some(rng.gen_range(10.0..40.0)),
            whiff_percent: Some(rng.gen_range(10.0..45.0)),
            ..ArsenalRow::default()
        })
        .collect();
    let pitch_velocities = DEMO_PITCH_TYPES
        .iter()
        .map(|(code, _, velo)| PitchVelocity {
            pitch_type: code.to_string(),
            average_velocity: Some(*velo),
        })
        .collect();
    ArsenalResponse {
        original_arsenal,
        pitch_velocities,
        ..ArsenalResponse::default()
    }
}

fn demo_counts(rng: &mut impl Rng) -> CountStats {
    let mut counts = HashMap::new();
    for balls in 0..=3 {
        for strikes in 0..=2 {
            let weights: Vec<f64> = DEMO_PITCH_TYPES.iter().map(|_| rng.gen_range(1.0..10.0)).collect();
            let total: f64 = weights.iter().sum();
            let scenario = DEMO_PITCH_TYPES
                .iter()
                .zip(&weights)
                .map(|((code, _, _), w)| {
                    let strike = rng.gen_range(30.0..60.0_f64);
                    let in_play = rng.gen_range(5.0..25.0_f64);
                    (
                        code.to_string(),
                        PitchData {
                            strike_percentage: strike,
                            in_play_percentage: in_play,
                            ball_percentage: 100.0 - strike - in_play,
                            total_pitch_count: (w * 12.0).round(),
                            total_pitch_percentage: w / total * 100.0,
                        },
                    )
                })
                .collect();
            counts.insert(format!("{balls}-{strikes}"), scenario);
        }
    }
    CountStats { counts }
}

fn demo_progression(rng: &mut impl Rng) -> Vec<ProgressionRow> {
    let today = Local::now().date_naive();
    let mut rows = Vec::new();
    for g in (0..8).rev() {
        let date = (today - ChronoDuration::days(5 * (g + 1))).format("%Y-%m-%d").to_string();
        for (code, _, velo) in DEMO_PITCH_TYPES {
            let pfx_x: f64 = rng.gen_range(-1.2..1.2);
            let pfx_z: f64 = rng.gen_range(-0.8..1.6);
            rows.push(ProgressionRow {
                game_date: date.clone(),
                pitch_type: code.to_string(),
                mean_release_speed: Some(*velo + rng.gen_range(-1.0..1.0)),
                mean_release_spin_rate: Some(rng.gen_range(1800.0..2700.0)),
                mean_spin_axis: Some(rng.gen_range(90.0..270.0)),
                mean_release_extension: Some(rng.gen_range(5.8..7.0)),
                mean_pfx_x: Some(pfx_x),
                mean_pfx_z: Some(pfx_z),
                mean_pfx_hypotenuse: Some(pfx_x.hypot(pfx_z)),
                strike_percentage: Some(rng.gen_range(55.0..72.0)),
            });
        }
    }
    rows
}

fn demo_hit_outcome(rng: &mut impl Rng) -> HitOutcomeResponse {
    let kinds = ["ground_ball", "line_drive", "fly_ball", "popup"];
    let hit_outcomes: Vec<HitOutcome> = (0..40)
        .map(|_| HitOutcome {
            launch_angle: Some(rng.gen_range(-20.0..50.0)),
            bb_type: kinds.choose(rng).map(|s| s.to_string()),
            launch_speed: Some(rng.gen_range(60.0..112.0)),
            hit_distance_sc: Some(rng.gen_range(20.0..430.0)),
            events: Some("single".to_string()),
            ..HitOutcome::default()
        })
        .collect();
    let mut hits_by_type = HashMap::new();
    for outcome in &hit_outcomes {
        if let Some(kind) = outcome.bb_type.as_ref() {
            *hits_by_type.entry(kind.clone()).or_insert(0.0) += 1.0;
        }
    }
    let speeds: Vec<f64> = hit_outcomes.iter().filter_map(|h| h.launch_speed).collect();
    let mean_launch_speed = speeds.iter().sum::<f64>() / speeds.len() as f64;
    HitOutcomeResponse {
        summary: HitOutcomeSummary {
            total_hits: hit_outcomes.len() as f64,
            hits_by_type,
            mean_launch_speed,
            min_launch_speed: speeds.iter().copied().fold(f64::INFINITY, f64::min),
            max_launch_speed: speeds.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            ..HitOutcomeSummary::default()
        },
        hit_outcomes,
    }
}
