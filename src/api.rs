use std::cmp::Ordering;
use std::collections::HashMap;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::http_client::{api_base, fetch_text, http_client};
use crate::pitch::{PitchEvent, value_to_u32};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PitcherRoster {
    #[serde(default)]
    pub pitcher_names: Vec<String>,
    #[serde(default)]
    pub data: Vec<PitcherSeasonRow>,
}

impl PitcherRoster {
    pub fn season_row(&self, name: &str) -> Option<&PitcherSeasonRow> {
        self.data.iter().find(|row| row.name == name)
    }
}

/// One season line from the pitching leaderboard. The backend sends these as
/// strings or numbers depending on the column, so everything is kept as text.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PitcherSeasonRow {
    #[serde(rename = "Name", default, deserialize_with = "string_or_default")]
    pub name: String,
    #[serde(rename = "Age", default, deserialize_with = "string_or_default")]
    pub age: String,
    #[serde(rename = "Pos", default, deserialize_with = "string_or_default")]
    pub pos: String,
    #[serde(rename = "Year", default, deserialize_with = "string_or_default")]
    pub year: String,
    #[serde(rename = "W", default, deserialize_with = "string_or_default")]
    pub wins: String,
    #[serde(rename = "L", default, deserialize_with = "string_or_default")]
    pub losses: String,
    #[serde(rename = "ERA", default, deserialize_with = "string_or_default")]
    pub era: String,
    #[serde(rename = "G", default, deserialize_with = "string_or_default")]
    pub games: String,
    #[serde(rename = "GS", default, deserialize_with = "string_or_default")]
    pub games_started: String,
    #[serde(rename = "IP", default, deserialize_with = "string_or_default")]
    pub innings: String,
    #[serde(rename = "SO", default, deserialize_with = "string_or_default")]
    pub strikeouts: String,
    #[serde(rename = "BB", default, deserialize_with = "string_or_default")]
    pub walks: String,
    #[serde(rename = "WHIP", default, deserialize_with = "string_or_default")]
    pub whip: String,
    #[serde(rename = "FIP", default, deserialize_with = "string_or_default")]
    pub fip: String,
    #[serde(rename = "SO9", default, deserialize_with = "string_or_default")]
    pub so9: String,
    #[serde(rename = "BB9", default, deserialize_with = "string_or_default")]
    pub bb9: String,
    #[serde(rename = "SOW", default, deserialize_with = "string_or_default")]
    pub so_per_walk: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PitcherSeasonRow {
    /// Headline stats for the player card, in display order.
    pub fn headline(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("ERA", self.era.as_str()),
            ("G", self.games.as_str()),
            ("GS", self.games_started.as_str()),
            ("IP", self.innings.as_str()),
            ("SO", self.strikeouts.as_str()),
            ("BB", self.walks.as_str()),
            ("WHIP", self.whip.as_str()),
            ("FIP", self.fip.as_str()),
            ("SO9", self.so9.as_str()),
            ("BB9", self.bb9.as_str()),
            ("SO/W", self.so_per_walk.as_str()),
        ]
    }

    pub fn record(&self) -> String {
        format!("{}-{}", dash_if_empty(&self.wins), dash_if_empty(&self.losses))
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ArsenalResponse {
    #[serde(default)]
    pub original_arsenal: Vec<ArsenalRow>,
    #[serde(default)]
    pub pitch_velocities: Vec<PitchVelocity>,
    #[serde(default)]
    pub pitch_movement_x: Value,
    #[serde(default)]
    pub pitch_movement_z: Value,
}

impl ArsenalResponse {
    pub fn velocity_for(&self, pitch_type: &str) -> Option<f64> {
        self.pitch_velocities
            .iter()
            .find(|v| v.pitch_type == pitch_type)
            .and_then(|v| v.average_velocity)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ArsenalRow {
    #[serde(default, deserialize_with = "string_or_default")]
    pub pitch_name: String,
    #[serde(default, deserialize_with = "string_or_default")]
    pub pitch_type: String,
    #[serde(default, deserialize_with = "string_or_default")]
    pub team_name_alt: String,
    #[serde(default)]
    pub pa: Option<f64>,
    #[serde(default)]
    pub pitches: Option<f64>,
    #[serde(default)]
    pub ba: Option<f64>,
    #[serde(default)]
    pub slg: Option<f64>,
    #[serde(default)]
    pub woba: Option<f64>,
    #[serde(default)]
    pub hard_hit_percent: Option<f64>,
    #[serde(default)]
    pub k_percent: Option<f64>,
    #[serde(default)]
    pub whiff_percent: Option<f64>,
    #[serde(default)]
    pub run_value: Option<f64>,
    #[serde(default)]
    pub put_away: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PitchVelocity {
    #[serde(default, deserialize_with = "string_or_default")]
    pub pitch_type: String,
    #[serde(default)]
    pub average_velocity: Option<f64>,
}

/// Outcome split for one pitch type thrown in one ball-strike count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct PitchData {
    #[serde(default, deserialize_with = "float_or_zero")]
    pub ball_percentage: f64,
    #[serde(default, deserialize_with = "float_or_zero")]
    pub in_play_percentage: f64,
    #[serde(default, deserialize_with = "float_or_zero")]
    pub strike_percentage: f64,
    #[serde(default, deserialize_with = "float_or_zero")]
    pub total_pitch_count: f64,
    #[serde(default, deserialize_with = "float_or_zero")]
    pub total_pitch_percentage: f64,
}

impl PitchData {
    pub fn is_empty(&self) -> bool {
        self.strike_percentage == 0.0 && self.in_play_percentage == 0.0 && self.ball_percentage == 0.0
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountStats {
    pub counts: HashMap<String, HashMap<String, PitchData>>,
}

impl CountStats {
    /// Count labels ordered by balls, then strikes (`0-0`, `0-1`, … `3-2`).
    pub fn ordered_counts(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.counts.keys().map(String::as_str).collect();
        keys.sort_by(|a, b| count_sort_key(a).cmp(&count_sort_key(b)).then(a.cmp(b)));
        keys
    }

    /// Pitch types thrown in `count`, most used first.
    pub fn pitches_for(&self, count: &str) -> Vec<(&str, &PitchData)> {
        let Some(scenario) = self.counts.get(count) else {
            return Vec::new();
        };
        let mut rows: Vec<(&str, &PitchData)> =
            scenario.iter().map(|(k, v)| (k.as_str(), v)).collect();
        rows.sort_by(|a, b| {
            b.1.total_pitch_percentage
                .partial_cmp(&a.1.total_pitch_percentage)
                .unwrap_or(Ordering::Equal)
                .then(a.0.cmp(b.0))
        });
        rows
    }
}

fn count_sort_key(label: &str) -> (u32, u32) {
    let mut parts = label.split('-').map(|p| p.trim().parse::<u32>().unwrap_or(u32::MAX));
    (
        parts.next().unwrap_or(u32::MAX),
        parts.next().unwrap_or(u32::MAX),
    )
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecentGame {
    pub game_pk: String,
    pub game_date: Option<String>,
    pub opponent: Option<String>,
    pub details: Vec<PitchEvent>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProgressionRow {
    #[serde(default, deserialize_with = "string_or_default")]
    pub game_date: String,
    #[serde(default, deserialize_with = "string_or_default")]
    pub pitch_type: String,
    #[serde(default)]
    pub mean_release_speed: Option<f64>,
    #[serde(default)]
    pub mean_release_spin_rate: Option<f64>,
    #[serde(default)]
    pub mean_spin_axis: Option<f64>,
    #[serde(default)]
    pub mean_release_extension: Option<f64>,
    #[serde(default)]
    pub mean_pfx_x: Option<f64>,
    #[serde(default)]
    pub mean_pfx_z: Option<f64>,
    #[serde(default)]
    pub mean_pfx_hypotenuse: Option<f64>,
    #[serde(default)]
    pub strike_percentage: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressionMetric {
    #[default]
    ReleaseSpeed,
    SpinRate,
    SpinAxis,
    Extension,
    PfxX,
    PfxZ,
    PfxHypotenuse,
}

impl ProgressionMetric {
    pub const ALL: [ProgressionMetric; 7] = [
        ProgressionMetric::ReleaseSpeed,
        ProgressionMetric::SpinRate,
        ProgressionMetric::SpinAxis,
        ProgressionMetric::Extension,
        ProgressionMetric::PfxX,
        ProgressionMetric::PfxZ,
        ProgressionMetric::PfxHypotenuse,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ProgressionMetric::ReleaseSpeed => "Release Speed",
            ProgressionMetric::SpinRate => "Release Spin Rate",
            ProgressionMetric::SpinAxis => "Spin Axis",
            ProgressionMetric::Extension => "Release Extension",
            ProgressionMetric::PfxX => "PFX X",
            ProgressionMetric::PfxZ => "PFX Z",
            ProgressionMetric::PfxHypotenuse => "PFX Hypotenuse",
        }
    }

    pub fn value(self, row: &ProgressionRow) -> Option<f64> {
        match self {
            ProgressionMetric::ReleaseSpeed => row.mean_release_speed,
            ProgressionMetric::SpinRate => row.mean_release_spin_rate,
            ProgressionMetric::SpinAxis => row.mean_spin_axis,
            ProgressionMetric::Extension => row.mean_release_extension,
            ProgressionMetric::PfxX => row.mean_pfx_x,
            ProgressionMetric::PfxZ => row.mean_pfx_z,
            ProgressionMetric::PfxHypotenuse => row.mean_pfx_hypotenuse,
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

/// Distinct pitch types in first-seen order.
pub fn progression_pitch_types(rows: &[ProgressionRow]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for row in rows {
        if !seen.iter().any(|p| *p == row.pitch_type) {
            seen.push(row.pitch_type.clone());
        }
    }
    seen
}

/// Per-pitch-type `(game_date, value)` points for one metric, optionally
/// restricted to a single pitch type. Rows without a value are skipped.
pub fn progression_series(
    rows: &[ProgressionRow],
    metric: ProgressionMetric,
    pitch_type: Option<&str>,
) -> Vec<(String, Vec<(String, f64)>)> {
    progression_pitch_types(rows)
        .into_iter()
        .filter(|pt| pitch_type.is_none_or(|want| want == pt))
        .map(|pt| {
            let points = rows
                .iter()
                .filter(|row| row.pitch_type == pt)
                .filter_map(|row| Some((row.game_date.clone(), metric.value(row)?)))
                .collect();
            (pt, points)
        })
        .collect()
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HitOutcome {
    #[serde(default)]
    pub launch_angle: Option<f64>,
    #[serde(default)]
    pub bb_type: Option<String>,
    #[serde(default)]
    pub launch_speed: Option<f64>,
    #[serde(default)]
    pub launch_speed_angle: Option<f64>,
    #[serde(default)]
    pub hc_x: Option<f64>,
    #[serde(default)]
    pub hc_y: Option<f64>,
    #[serde(default)]
    pub hit_distance_sc: Option<f64>,
    #[serde(default)]
    pub events: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HitOutcomeSummary {
    #[serde(default, deserialize_with = "float_or_zero")]
    pub total_hits: f64,
    #[serde(default)]
    pub hits_by_type: HashMap<String, f64>,
    #[serde(default, deserialize_with = "float_or_zero")]
    pub mean_launch_speed: f64,
    #[serde(default, deserialize_with = "float_or_zero")]
    pub std_dev_launch_speed: f64,
    #[serde(default, deserialize_with = "float_or_zero")]
    pub min_launch_speed: f64,
    #[serde(default, deserialize_with = "float_or_zero")]
    pub max_launch_speed: f64,
    #[serde(default, deserialize_with = "float_or_zero")]
    pub mean_launch_angle: f64,
    #[serde(default, deserialize_with = "float_or_zero")]
    pub std_dev_launch_angle: f64,
    #[serde(default, deserialize_with = "float_or_zero")]
    pub min_launch_angle: f64,
    #[serde(default, deserialize_with = "float_or_zero")]
    pub max_launch_angle: f64,
    #[serde(default, deserialize_with = "float_or_zero")]
    pub mean_hit_distance: f64,
    #[serde(default, deserialize_with = "float_or_zero")]
    pub std_dev_hit_distance: f64,
    #[serde(default, deserialize_with = "float_or_zero")]
    pub min_hit_distance: f64,
    #[serde(default, deserialize_with = "float_or_zero")]
    pub max_hit_distance: f64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HitOutcomeResponse {
    #[serde(default)]
    pub summary: HitOutcomeSummary,
    #[serde(default)]
    pub hit_outcomes: Vec<HitOutcome>,
}

pub fn fetch_pitchers() -> Result<PitcherRoster> {
    let body = get(&format!("{}/all/pitchers", api_base()))?;
    parse_pitchers_json(&body)
}

pub fn fetch_player_id(first: &str, last: &str) -> Result<u32> {
    let body = get(&format!("{}/id/{first}/{last}", api_base()))?;
    parse_player_id_json(&body)
}

pub fn fetch_arsenal(pitcher_id: u32) -> Result<ArsenalResponse> {
    let body = get(&format!("{}/stats/pitcher/by_arsenal/{pitcher_id}", api_base()))?;
    parse_arsenal_json(&body)
}

pub fn fetch_count_stats(pitcher_id: u32) -> Result<CountStats> {
    let body = get(&format!("{}/stats/pitcher/by_count/{pitcher_id}", api_base()))?;
    parse_count_stats_json(&body)
}

pub fn fetch_recent_games(pitcher_id: u32) -> Result<Vec<RecentGame>> {
    let body = get(&format!("{}/stats/pitcher/recent/{pitcher_id}", api_base()))?;
    parse_recent_games_json(&body)
}

pub fn fetch_progression(pitcher_id: u32) -> Result<Vec<ProgressionRow>> {
    let body = get(&format!("{}/stats/pitcher/progression/{pitcher_id}", api_base()))?;
    parse_progression_json(&body)
}

pub fn fetch_hit_outcome(pitcher_id: u32) -> Result<HitOutcomeResponse> {
    let body = get(&format!("{}/stats/pitcher/hit_outcome/{pitcher_id}", api_base()))?;
    parse_hit_outcome_json(&body)
}

pub fn fetch_player_names(ids: &[u32]) -> Result<HashMap<u32, String>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let joined = ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",");
    let body = get(&format!("{}/get/name?ids={joined}", api_base()))?;
    parse_player_names_json(&body)
}

fn get(url: &str) -> Result<String> {
    let client = http_client()?;
    fetch_text(client, url)
}

/// Splits a roster name into the first/last pair the id lookup expects.
pub fn split_name(full: &str) -> Option<(&str, &str)> {
    let mut parts = full.split_whitespace();
    let first = parts.next()?;
    let last = parts.next()?;
    Some((first, last))
}

/// Replaces bare `NaN` tokens with `null` so pandas output parses as JSON.
/// String literals are left alone.
pub fn sanitize_nan(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = String::with_capacity(raw.len());
    let mut in_string = false;
    let mut escaped = false;
    let mut last = 0;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            i += 1;
            continue;
        }
        if b == b'"' {
            in_string = true;
        } else if bytes[i..].starts_with(b"NaN") {
            out.push_str(&raw[last..i]);
            out.push_str("null");
            i += 3;
            last = i;
            continue;
        }
        i += 1;
    }
    out.push_str(&raw[last..]);
    out
}

fn parse_value(raw: &str, what: &str) -> Result<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&sanitize_nan(trimmed)).with_context(|| format!("invalid {what} json"))
}

fn parse_or_default<T>(raw: &str, what: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de> + Default,
{
    let value = parse_value(raw, what)?;
    if value.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(value).with_context(|| format!("unexpected {what} shape"))
}

pub fn parse_pitchers_json(raw: &str) -> Result<PitcherRoster> {
    parse_or_default(raw, "pitchers")
}

pub fn parse_player_id_json(raw: &str) -> Result<u32> {
    let value = parse_value(raw, "player id")?;
    value
        .get("player_id")
        .and_then(value_to_u32)
        .context("missing player_id")
}

pub fn parse_arsenal_json(raw: &str) -> Result<ArsenalResponse> {
    parse_or_default(raw, "arsenal")
}

pub fn parse_count_stats_json(raw: &str) -> Result<CountStats> {
    let counts: HashMap<String, HashMap<String, PitchData>> = parse_or_default(raw, "count stats")?;
    Ok(CountStats { counts })
}

pub fn parse_progression_json(raw: &str) -> Result<Vec<ProgressionRow>> {
    #[derive(Deserialize, Default)]
    struct Wrapper {
        #[serde(default)]
        progression: Vec<ProgressionRow>,
    }
    let wrapper: Wrapper = parse_or_default(raw, "progression")?;
    Ok(wrapper
        .progression
        .into_iter()
        .map(|mut row| {
            if let Some(date) = normalize_game_date(&row.game_date) {
                row.game_date = date;
            }
            row
        })
        .collect())
}

pub fn parse_hit_outcome_json(raw: &str) -> Result<HitOutcomeResponse> {
    parse_or_default(raw, "hit outcome")
}

pub fn parse_player_names_json(raw: &str) -> Result<HashMap<u32, String>> {
    let value = parse_value(raw, "player names")?;
    let Some(names) = value.get("player_names").and_then(Value::as_object) else {
        return Ok(HashMap::new());
    };
    Ok(names
        .iter()
        .filter_map(|(id, name)| {
            let id = id.trim().parse::<u32>().ok()?;
            Some((id, name.as_str()?.to_string()))
        })
        .collect())
}

/// Games keyed by `game_pk`, newest first. Accepts both the
/// `{ game_date, opponent, details }` wrapper and a bare pitch array.
pub fn parse_recent_games_json(raw: &str) -> Result<Vec<RecentGame>> {
    let value = parse_value(raw, "recent games")?;
    let Value::Object(map) = value else {
        return Ok(Vec::new());
    };

    let mut games = Vec::with_capacity(map.len());
    for (game_pk, entry) in map {
        let game = match entry {
            Value::Array(_) => RecentGame {
                game_pk,
                game_date: None,
                opponent: None,
                details: pitches_from_value(entry),
            },
            Value::Object(mut obj) => {
                let details = obj.remove("details").unwrap_or(Value::Array(Vec::new()));
                RecentGame {
                    game_pk,
                    game_date: obj
                        .get("game_date")
                        .and_then(Value::as_str)
                        .map(|d| normalize_game_date(d).unwrap_or_else(|| d.to_string())),
                    opponent: obj.get("opponent").and_then(Value::as_str).map(str::to_string),
                    details: pitches_from_value(details),
                }
            }
            _ => continue,
        };
        games.push(game);
    }

    games.sort_by(|a, b| {
        b.game_date
            .cmp(&a.game_date)
            .then_with(|| compare_game_pk(&b.game_pk, &a.game_pk))
    });
    Ok(games)
}

/// Pitch records of one game. Records that are not objects are skipped so a
/// single bad row does not cost the rest of the game.
fn pitches_from_value(details: Value) -> Vec<PitchEvent> {
    match details {
        Value::Array(rows) => rows
            .into_iter()
            .filter_map(|row| serde_json::from_value(row).ok())
            .collect(),
        _ => Vec::new(),
    }
}

// Numeric ids compare as numbers and rank above any non-numeric id.
fn compare_game_pk(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<u64>(), b.trim().parse::<u64>()) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        (Ok(_), Err(_)) => Ordering::Greater,
        (Err(_), Ok(_)) => Ordering::Less,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Normalizes the date shapes the backend emits (ISO dates, ISO timestamps,
/// RFC 2822 from Flask) to `YYYY-MM-DD`.
pub fn normalize_game_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.format("%Y-%m-%d").to_string());
    }
    if let Some(prefix) = raw.get(..10)
        && let Ok(date) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d")
    {
        return Some(date.format("%Y-%m-%d").to_string());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.date_naive().format("%Y-%m-%d").to_string());
    }
    let gmt = raw.strip_suffix("GMT").map(|s| format!("{}+0000", s));
    if let Some(gmt) = gmt
        && let Ok(dt) = DateTime::parse_from_rfc2822(&gmt)
    {
        return Some(dt.date_naive().format("%Y-%m-%d").to_string());
    }
    None
}

fn dash_if_empty(value: &str) -> &str {
    if value.trim().is_empty() { "-" } else { value }
}

fn string_or_default<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

fn float_or_zero<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or_default(),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or_default(),
        _ => 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_leaves_strings_alone() {
        let raw = r#"{"a": NaN, "b": "NaNa \"NaN\"", "c": [NaN,1]}"#;
        assert_eq!(
            sanitize_nan(raw),
            r#"{"a": null, "b": "NaNa \"NaN\"", "c": [null,1]}"#
        );
    }

    #[test]
    fn count_keys_sort_numerically() {
        let mut counts = HashMap::new();
        for key in ["1-0", "0-2", "3-2", "0-0", "0-1"] {
            counts.insert(key.to_string(), HashMap::new());
        }
        let stats = CountStats { counts };
        assert_eq!(stats.ordered_counts(), vec!["0-0", "0-1", "0-2", "1-0", "3-2"]);
    }

    #[test]
    fn normalizes_flask_dates() {
        assert_eq!(
            normalize_game_date("Sun, 01 Sep 2024 00:00:00 GMT").as_deref(),
            Some("2024-09-01")
        );
        assert_eq!(
            normalize_game_date("2024-08-27T00:00:00").as_deref(),
            Some("2024-08-27")
        );
        assert_eq!(normalize_game_date("yesterday"), None);
    }
}
