use std::fs;
use std::path::PathBuf;

use pitch_terminal::aggregate::{KbbRatio, group_by_at_bat, summarize_events};
use pitch_terminal::api::{
    ProgressionMetric, parse_arsenal_json, parse_count_stats_json, parse_hit_outcome_json,
    parse_pitchers_json, parse_player_id_json, parse_player_names_json, parse_progression_json,
    parse_recent_games_json, progression_pitch_types, progression_series, split_name,
};
use pitch_terminal::pitch::Field;

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_recent_games_fixture() {
    let games = parse_recent_games_json(&read_fixture("recent_games.json")).expect("fixture should parse");
    let ids: Vec<&str> = games.iter().map(|g| g.game_pk.as_str()).collect();
    assert_eq!(ids, vec!["745100", "745001", "744900"]);

    assert_eq!(games[0].game_date.as_deref(), Some("2024-04-08"));
    assert_eq!(games[1].game_date.as_deref(), Some("2024-04-02"));
    assert_eq!(games[1].opponent.as_deref(), Some("NYY"));
    assert_eq!(games[2].game_date, None);
    assert_eq!(games[2].details.len(), 1);
    assert_eq!(games[2].details[0].at_bat_number, 1);

    let game = &games[1];
    assert_eq!(game.details.len(), 11);
    let first = &game.details[0];
    assert_eq!(first.batter, Some(660271));
    assert_eq!(first.launch_speed, None);
    assert_eq!(first.count_label().as_deref(), Some("0-2"));
    assert_eq!(
        first.extra.get("des").and_then(|v| v.as_str()),
        Some("struck out on a NaN-free slider")
    );
    assert_eq!(game.details[1].events, None);
    assert_eq!(game.details[5].plate_x, Field::Null);
    assert_eq!(game.details[8].inning, 2);
    assert_eq!(game.details[10].plate_x, Field::Missing);
}

#[test]
fn fixture_game_summary() {
    let games = parse_recent_games_json(&read_fixture("recent_games.json")).expect("fixture should parse");
    let game = games.iter().find(|g| g.game_pk == "745001").expect("fixture game");

    let summary = summarize_events(&game.details);
    assert_eq!(summary.strikes, 6);
    assert_eq!(summary.balls, 5);
    assert_eq!(summary.strike_pct, 54.5);
    assert_eq!(summary.ball_pct, 45.5);
    assert_eq!(summary.strikeouts, 1);
    assert_eq!(summary.walks, 1);
    assert_eq!(summary.k_bb, KbbRatio::Finite(1.0));
    assert_eq!(summary.hits, 2);
    assert_eq!(summary.hard_hit, 1);

    let groups = group_by_at_bat(&game.details);
    let order: Vec<u32> = groups.iter().map(|g| g.at_bat_number).collect();
    assert_eq!(order, vec![1, 2, 3, 4]);

    let newest = summarize_events(&games[0].details);
    assert_eq!(newest.k_bb.to_string(), "∞");
}

#[test]
fn empty_and_null_bodies_parse_to_nothing() {
    assert!(parse_recent_games_json("").expect("empty body").is_empty());
    assert!(parse_recent_games_json("null").expect("null body").is_empty());
    assert!(parse_pitchers_json("null").expect("null body").pitcher_names.is_empty());
    assert!(parse_progression_json("{}").expect("empty object").is_empty());
    assert!(parse_recent_games_json("{not json").is_err());
}

#[test]
fn parses_pitchers_fixture() {
    let roster = parse_pitchers_json(&read_fixture("pitchers.json")).expect("fixture should parse");
    assert_eq!(roster.pitcher_names.len(), 3);

    let cole = roster.season_row("Gerrit Cole").expect("season row");
    assert_eq!(cole.era, "2.63");
    assert_eq!(cole.so_per_walk, "4.63");
    assert_eq!(cole.record(), "15-4");
    assert!(cole.extra.contains_key("Team"));
    assert_eq!(cole.headline()[0], ("ERA", "2.63"));

    let burnes = roster.season_row("Corbin Burnes").expect("season row");
    assert_eq!(burnes.age, "28");
    assert_eq!(burnes.record(), "---");
    assert!(roster.season_row("Luis Castillo Jr.").is_none());
}

#[test]
fn parses_player_id_and_names() {
    assert_eq!(
        parse_player_id_json(&read_fixture("player_id.json")).expect("player id"),
        543037
    );
    assert!(parse_player_id_json(r#"{"error": "not found"}"#).is_err());

    let names = parse_player_names_json(&read_fixture("names.json")).expect("names");
    assert_eq!(names.len(), 2);
    assert_eq!(names.get(&660271).map(String::as_str), Some("Shohei Ohtani"));
    assert!(!names.contains_key(&605141));
}

#[test]
fn splits_roster_names_on_first_two_tokens() {
    assert_eq!(split_name("Gerrit Cole"), Some(("Gerrit", "Cole")));
    assert_eq!(split_name("Luis Castillo Jr."), Some(("Luis", "Castillo")));
    assert_eq!(split_name("  Ichiro  "), None);
}

#[test]
fn parses_count_stats_fixture() {
    let counts = parse_count_stats_json(&read_fixture("by_count.json")).expect("fixture should parse");
    assert_eq!(counts.ordered_counts(), vec!["0-0", "0-2", "1-0", "3-2"]);

    let first_pitch = counts.pitches_for("0-0");
    let order: Vec<&str> = first_pitch.iter().map(|(code, _)| *code).collect();
    assert_eq!(order, vec!["FF", "SL", "CH"]);
    assert_eq!(first_pitch[0].1.total_pitch_count, 120.0);
    assert!(first_pitch[2].1.is_empty());
    assert!(counts.pitches_for("0-2").is_empty());
    assert!(counts.pitches_for("2-2").is_empty());
}

#[test]
fn parses_arsenal_fixture() {
    let arsenal = parse_arsenal_json(&read_fixture("arsenal.json")).expect("fixture should parse");
    assert_eq!(arsenal.original_arsenal.len(), 2);
    assert_eq!(arsenal.original_arsenal[0].pitch_name, "4-Seam Fastball");
    assert_eq!(arsenal.original_arsenal[1].ba, None);
    assert_eq!(arsenal.velocity_for("SL"), Some(88.9));
    assert_eq!(arsenal.velocity_for("KN"), None);
    assert!(arsenal.pitch_movement_x.get("FF").is_some());
}

#[test]
fn parses_progression_fixture() {
    let rows = parse_progression_json(&read_fixture("progression.json")).expect("fixture should parse");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].game_date, "2024-03-31");
    assert_eq!(progression_pitch_types(&rows), vec!["FF", "SL"]);

    let all = progression_series(&rows, ProgressionMetric::SpinAxis, None);
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].1.len(), 2);
    // The slider's NaN spin axis is dropped.
    assert!(all[1].1.is_empty());

    let fastball = progression_series(&rows, ProgressionMetric::ReleaseSpeed, Some("FF"));
    assert_eq!(fastball.len(), 1);
    assert_eq!(
        fastball[0].1,
        vec![("2024-03-31".to_string(), 96.4), ("2024-04-06".to_string(), 96.9)]
    );
    assert_eq!(ProgressionMetric::PfxHypotenuse.next(), ProgressionMetric::ReleaseSpeed);
}

#[test]
fn parses_hit_outcome_fixture() {
    let outcome = parse_hit_outcome_json(&read_fixture("hit_outcome.json")).expect("fixture should parse");
    assert_eq!(outcome.summary.total_hits, 3.0);
    assert_eq!(outcome.summary.hits_by_type.get("single"), Some(&2.0));
    assert_eq!(outcome.hit_outcomes.len(), 3);
    assert_eq!(outcome.hit_outcomes[2].hit_distance_sc, None);
    assert_eq!(outcome.hit_outcomes[1].events.as_deref(), Some("home_run"));
}

#[test]
fn malformed_pitch_fields_only_drop_their_own_tally() {
    let raw = r#"{"1": {"game_date": "2024-05-01", "opponent": "SEA", "details": [
        {"at_bat_number": 1, "inning": 1, "description": "ball"},
        {"at_bat_number": 1, "inning": 1, "description": "called_strike", "launch_speed": "n/a"},
        {"at_bat_number": 1, "inning": 1, "description": "swinging_strike",
         "events": "strikeout", "plate_x": "left"},
        {"at_bat_number": 2, "inning": 1, "description": 7},
        "not a pitch"
    ]}}"#;
    let games = parse_recent_games_json(raw).expect("bad fields should not fail the response");
    assert_eq!(games.len(), 1);
    let details = &games[0].details;
    assert_eq!(details.len(), 4);
    assert_eq!(details[1].launch_speed, None);
    assert_eq!(details[2].plate_x, Field::Null);
    assert_eq!(details[3].description, Field::Null);

    let summary = summarize_events(details);
    assert_eq!(summary.balls, 1);
    assert_eq!(summary.strikes, 2);
    assert_eq!(summary.strikeouts, 1);
    assert_eq!(summary.hard_hit, 0);
}

#[test]
fn games_with_equal_dates_order_by_numeric_id() {
    let raw = r#"{"99999": [], "100000": [], "abc": [],
                  "5": {"game_date": "2024-05-01", "details": []}}"#;
    let games = parse_recent_games_json(raw).expect("valid json");
    let ids: Vec<&str> = games.iter().map(|g| g.game_pk.as_str()).collect();
    assert_eq!(ids, vec!["5", "100000", "99999", "abc"]);
}
