use serde::Serialize;

use crate::aggregate::AtBatGroup;
use crate::pitch::PitchEvent;

/// Width in pixels of the strike zone box drawn on the canvas.
pub const ZONE_WIDTH_PX: f64 = 288.0;
/// Horizontal plate range in feet covered by half the zone width.
pub const ZONE_X_RANGE_FT: f64 = 1.0;
/// Vertical range in feet mapped onto the full canvas height.
pub const ZONE_Z_RANGE_FT: f64 = 5.0;
/// Half the plate (17in) plus the radius of a ball, in feet.
pub const ZONE_HALF_WIDTH_FT: f64 = 0.83;

const OPACITY_MAX: f64 = 0.8;
const OPACITY_MIN: f64 = 0.3;
const OPACITY_SATURATION: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PitchCategory {
    Strike,
    Swinging,
    Ball,
    BadBalls,
    Hit,
    Unknown,
}

impl PitchCategory {
    pub fn from_description(description: Option<&str>) -> Self {
        match description.unwrap_or_default() {
            "called_strike" => PitchCategory::Strike,
            "swinging_strike" | "foul" | "foul_tip" | "swinging_strike_blocked" | "foul_bunt" => {
                PitchCategory::Swinging
            }
            "ball" => PitchCategory::Ball,
            "blocked_ball" | "hit_by_pitch" => PitchCategory::BadBalls,
            "hit_into_play" => PitchCategory::Hit,
            _ => PitchCategory::Unknown,
        }
    }

    /// The older three-bucket grouping used by the single at-bat chart.
    pub fn simple_from_description(description: Option<&str>) -> Self {
        match description.unwrap_or_default() {
            "called_strike" | "swinging_strike" | "foul" | "foul_tip" => PitchCategory::Strike,
            "ball" | "blocked_ball" => PitchCategory::Ball,
            _ => PitchCategory::Hit,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PitchCategory::Strike => "strike",
            PitchCategory::Swinging => "swinging",
            PitchCategory::Ball => "ball",
            PitchCategory::BadBalls => "badBalls",
            PitchCategory::Hit => "hit",
            PitchCategory::Unknown => "unknown",
        }
    }

    pub fn color(self, scheme: ZoneScheme) -> MarkerColor {
        match (scheme, self) {
            (ZoneScheme::Detailed, PitchCategory::Strike) => MarkerColor::RED,
            (ZoneScheme::Detailed, PitchCategory::Swinging) => MarkerColor::DARK_RED,
            (ZoneScheme::Detailed, PitchCategory::Ball) => MarkerColor::GREEN,
            (ZoneScheme::Detailed, PitchCategory::BadBalls) => MarkerColor::VERY_DARK_GREEN,
            (ZoneScheme::Detailed, PitchCategory::Hit) => MarkerColor::GRAY,
            (ZoneScheme::Detailed, PitchCategory::Unknown) => MarkerColor::WHITE,
            (ZoneScheme::Simple, PitchCategory::Strike) => MarkerColor::RED,
            (ZoneScheme::Simple, PitchCategory::Ball) => MarkerColor::GREEN,
            (ZoneScheme::Simple, _) => MarkerColor::GRAY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZoneScheme {
    #[default]
    Detailed,
    Simple,
}

impl ZoneScheme {
    pub fn categorize(self, description: Option<&str>) -> PitchCategory {
        match self {
            ZoneScheme::Detailed => PitchCategory::from_description(description),
            ZoneScheme::Simple => PitchCategory::simple_from_description(description),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerColor {
    pub name: &'static str,
    pub rgb: (u8, u8, u8),
}

impl MarkerColor {
    pub const RED: Self = Self { name: "red", rgb: (255, 0, 0) };
    pub const DARK_RED: Self = Self { name: "darkred", rgb: (139, 0, 0) };
    pub const GREEN: Self = Self { name: "green", rgb: (0, 128, 0) };
    pub const VERY_DARK_GREEN: Self = Self { name: "#013220", rgb: (1, 50, 32) };
    pub const GRAY: Self = Self { name: "gray", rgb: (128, 128, 128) };
    pub const WHITE: Self = Self { name: "white", rgb: (255, 255, 255) };
}

/// Which pitches to plot: every at-bat of the game, or a single one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AtBatFilter {
    #[default]
    All,
    AtBat(u32),
}

/// Parallel coordinate columns for the strike zone plot. `None` entries are
/// values the backend sent as `null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoneSeries {
    pub plate_x: Vec<Option<f64>>,
    pub plate_z: Vec<Option<f64>>,
    pub sz_top: Vec<Option<f64>>,
    pub sz_bot: Vec<Option<f64>>,
    pub categories: Vec<PitchCategory>,
}

impl ZoneSeries {
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    fn push(&mut self, event: &PitchEvent, scheme: ZoneScheme) {
        self.plate_x.push(event.plate_x.get());
        self.plate_z.push(event.plate_z.get());
        self.sz_top.push(event.sz_top.get());
        self.sz_bot.push(event.sz_bot.get());
        self.categories.push(scheme.categorize(event.description()));
    }

    /// Mean strike zone bounds over the non-null entries.
    pub fn mean_zone_bounds(&self) -> Option<(f64, f64)> {
        Some((mean(&self.sz_top)?, mean(&self.sz_bot)?))
    }

    /// Projected markers, skipping entries with a null plate coordinate.
    pub fn markers(&self, canvas: ZoneCanvas, scheme: ZoneScheme) -> Vec<Marker> {
        let opacity = marker_opacity(self.len());
        self.plate_x
            .iter()
            .zip(&self.plate_z)
            .zip(&self.categories)
            .filter_map(|((x, z), category)| {
                let (px, py) = canvas.project(x.as_ref().copied()?, z.as_ref().copied()?);
                Some(Marker {
                    x: px,
                    y: py,
                    category: *category,
                    color: category.color(scheme),
                    opacity,
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub x: f64,
    pub y: f64,
    pub category: PitchCategory,
    pub color: MarkerColor,
    pub opacity: f64,
}

pub fn is_plottable(event: &PitchEvent) -> bool {
    event.plate_x.is_defined()
        && event.plate_z.is_defined()
        && event.sz_top.is_defined()
        && event.sz_bot.is_defined()
        && event.description.is_defined()
}

pub fn classify_coordinates(groups: &[AtBatGroup], filter: AtBatFilter) -> ZoneSeries {
    classify_coordinates_with(groups, filter, ZoneScheme::Detailed)
}

pub fn classify_coordinates_with(
    groups: &[AtBatGroup],
    filter: AtBatFilter,
    scheme: ZoneScheme,
) -> ZoneSeries {
    let mut series = ZoneSeries::default();
    let selected = groups.iter().filter(|group| match filter {
        AtBatFilter::All => true,
        AtBatFilter::AtBat(n) => group.at_bat_number == n,
    });
    for group in selected {
        for event in group.events.iter().filter(|e| is_plottable(e)) {
            series.push(event, scheme);
        }
        if matches!(filter, AtBatFilter::AtBat(_)) {
            break;
        }
    }
    series
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneCanvas {
    pub width: f64,
    pub height: f64,
}

impl ZoneCanvas {
    /// Single at-bat view.
    pub const DETAIL: Self = Self {
        width: 640.0,
        height: 640.0,
    };
    /// Whole-game view.
    pub const AGGREGATE: Self = Self {
        width: 1000.0,
        height: 640.0,
    };

    pub fn for_filter(filter: AtBatFilter) -> Self {
        match filter {
            AtBatFilter::All => Self::AGGREGATE,
            AtBatFilter::AtBat(_) => Self::DETAIL,
        }
    }

    pub fn project_x(&self, plate_x: f64) -> f64 {
        self.width / 2.0 + (plate_x / ZONE_X_RANGE_FT) * (ZONE_WIDTH_PX / 2.0)
    }

    pub fn project_y(&self, plate_z: f64) -> f64 {
        self.height - (plate_z / ZONE_Z_RANGE_FT) * self.height
    }

    pub fn project(&self, plate_x: f64, plate_z: f64) -> (f64, f64) {
        (self.project_x(plate_x), self.project_y(plate_z))
    }

    /// Strike zone box as `(left, top, right, bottom)` in pixels.
    pub fn strike_zone_rect(&self, sz_top: f64, sz_bot: f64) -> (f64, f64, f64, f64) {
        (
            self.project_x(-ZONE_HALF_WIDTH_FT),
            self.project_y(sz_top),
            self.project_x(ZONE_HALF_WIDTH_FT),
            self.project_y(sz_bot),
        )
    }
}

/// Markers fade as the plot gets busier.
pub fn marker_opacity(points: usize) -> f64 {
    let n = points.min(OPACITY_SATURATION) as f64;
    let max = OPACITY_SATURATION as f64;
    OPACITY_MIN + ((max - n) / max) * (OPACITY_MAX - OPACITY_MIN)
}

fn mean(values: &[Option<f64>]) -> Option<f64> {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    if present.is_empty() {
        return None;
    }
    Some(present.iter().sum::<f64>() / present.len() as f64)
}
