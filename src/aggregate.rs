use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::pitch::PitchEvent;

pub const HARD_HIT_MPH: f64 = 95.0;

const STRIKE_DESCRIPTIONS: &[&str] = &[
    "called_strike",
    "swinging_strike",
    "foul",
    "foul_tip",
    "hit_into_play",
];
const BALL_DESCRIPTIONS: &[&str] = &["ball", "blocked_ball"];
const WALK_EVENTS: &[&str] = &["walk", "hit_by_pitch"];
const HIT_EVENTS: &[&str] = &["single", "double", "triple", "home_run"];

/// Strikeout-to-walk ratio. With no walks the ratio is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum KbbRatio {
    Finite(f64),
    Infinite,
}

impl KbbRatio {
    pub fn from_counts(strikeouts: u32, walks: u32) -> Self {
        if walks == 0 {
            return KbbRatio::Infinite;
        }
        KbbRatio::Finite(round_to(strikeouts as f64 / walks as f64, 2))
    }

    pub fn as_f64(self) -> f64 {
        match self {
            KbbRatio::Finite(v) => v,
            KbbRatio::Infinite => f64::INFINITY,
        }
    }
}

impl fmt::Display for KbbRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KbbRatio::Finite(v) => write!(f, "{v:.2}"),
            KbbRatio::Infinite => write!(f, "∞"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventSummary {
    pub hits: u32,
    pub hard_hit: u32,
    pub strikeouts: u32,
    pub walks: u32,
    pub k_bb: KbbRatio,
    pub balls: u32,
    pub strikes: u32,
    pub ball_pct: f64,
    pub strike_pct: f64,
}

impl EventSummary {
    /// Pitches that landed in either the ball or strike tally.
    pub fn pitches(&self) -> u32 {
        self.balls + self.strikes
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AtBatGroup {
    pub at_bat_number: u32,
    pub events: Vec<PitchEvent>,
}

impl AtBatGroup {
    pub fn first(&self) -> Option<&PitchEvent> {
        self.events.first()
    }

    pub fn inning(&self) -> Option<u32> {
        self.first().map(|e| e.inning)
    }

    pub fn batter(&self) -> Option<u32> {
        self.first().and_then(|e| e.batter)
    }
}

pub fn is_strike_description(description: &str) -> bool {
    STRIKE_DESCRIPTIONS.contains(&description)
}

pub fn is_ball_description(description: &str) -> bool {
    BALL_DESCRIPTIONS.contains(&description)
}

pub fn is_hard_hit(event: &PitchEvent) -> bool {
    let Some(speed) = event.launch_speed else {
        return false;
    };
    speed >= HARD_HIT_MPH && event.description() != Some("foul")
}

pub fn summarize_events(events: &[PitchEvent]) -> EventSummary {
    let mut hits = 0u32;
    let mut hard_hit = 0u32;
    let mut strikeouts = 0u32;
    let mut walks = 0u32;
    let mut balls = 0u32;
    let mut strikes = 0u32;

    for event in events {
        if let Some(description) = event.description() {
            if is_strike_description(description) {
                strikes += 1;
            } else if is_ball_description(description) {
                balls += 1;
            }
        }

        if is_hard_hit(event) {
            hard_hit += 1;
        }

        if let Some(outcome) = event.outcome() {
            if outcome == "strikeout" {
                strikeouts += 1;
            } else if WALK_EVENTS.contains(&outcome) {
                walks += 1;
            }
            if HIT_EVENTS.contains(&outcome) {
                hits += 1;
            }
        }
    }

    let total = balls + strikes;
    let (ball_pct, strike_pct) = if total > 0 {
        (
            round_to(balls as f64 / total as f64 * 100.0, 1),
            round_to(strikes as f64 / total as f64 * 100.0, 1),
        )
    } else {
        (0.0, 0.0)
    };

    EventSummary {
        hits,
        hard_hit,
        strikeouts,
        walks,
        k_bb: KbbRatio::from_counts(strikeouts, walks),
        balls,
        strikes,
        ball_pct,
        strike_pct,
    }
}

/// Groups pitches by plate appearance. Group order follows the first time each
/// at-bat number shows up, not the numeric order.
pub fn group_by_at_bat(events: &[PitchEvent]) -> Vec<AtBatGroup> {
    let mut groups: Vec<AtBatGroup> = Vec::new();
    let mut index: HashMap<u32, usize> = HashMap::new();

    for event in events {
        let slot = *index.entry(event.at_bat_number).or_insert_with(|| {
            groups.push(AtBatGroup {
                at_bat_number: event.at_bat_number,
                events: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].events.push(event.clone());
    }

    groups
}

/// Positions in `groups` where a new inning starts.
pub fn inning_breaks(groups: &[AtBatGroup]) -> Vec<usize> {
    let mut breaks = Vec::new();
    let mut prev: Option<Option<u32>> = None;
    for (idx, group) in groups.iter().enumerate() {
        let inning = group.inning();
        if prev != Some(inning) {
            breaks.push(idx);
        }
        prev = Some(inning);
    }
    breaks
}

/// Scorebook shorthand for an at-bat, read off the group's first pitch.
pub fn at_bat_label(group: &AtBatGroup) -> String {
    let Some(first) = group.first() else {
        return String::new();
    };
    outcome_abbreviation(first.outcome().unwrap_or_default(), first.description())
}

pub fn outcome_abbreviation(outcome: &str, description: Option<&str>) -> String {
    let abbr = match outcome {
        "strikeout" => {
            if description == Some("called_strike") {
                "ꓘ"
            } else {
                "K"
            }
        }
        "field_out" | "force_out" => "FO",
        "single" => "1B",
        "double" => "2B",
        "triple" => "3B",
        "home_run" => "HR",
        "grounded_into_double_play" => "DP",
        "walk" => "BB",
        "hit_by_pitch" => "HP",
        "sac_fly" => "SF",
        "balk" => "BK",
        "fielder_choice" => "FC",
        "wild_pitch" => "WP",
        "passed_ball" => "PB",
        "stolen_base" => "SB",
        "error" => "E",
        "bunt" => "B",
        "line_drive" => "L",
        "unassisted" => "U",
        "foul_fly" => "F",
        "intentional_walk" => "IBB",
        other => other,
    };
    abbr.to_string()
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
