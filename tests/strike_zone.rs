use std::fs;
use std::path::PathBuf;

use pitch_terminal::aggregate::group_by_at_bat;
use pitch_terminal::api::parse_recent_games_json;
use pitch_terminal::pitch::{Field, PitchEvent};
use pitch_terminal::strike_zone::{
    AtBatFilter, MarkerColor, PitchCategory, ZoneCanvas, ZoneScheme, classify_coordinates,
    classify_coordinates_with, is_plottable, marker_opacity,
};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn located(at_bat: u32, description: &str, x: f64, z: f64) -> PitchEvent {
    PitchEvent {
        at_bat_number: at_bat,
        description: Field::Value(description.to_string()),
        plate_x: Field::Value(x),
        plate_z: Field::Value(z),
        sz_top: Field::Value(3.5),
        sz_bot: Field::Value(1.5),
        ..PitchEvent::default()
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn categories_follow_detailed_vocabulary() {
    let cases = [
        ("called_strike", PitchCategory::Strike),
        ("swinging_strike", PitchCategory::Swinging),
        ("foul", PitchCategory::Swinging),
        ("foul_tip", PitchCategory::Swinging),
        ("swinging_strike_blocked", PitchCategory::Swinging),
        ("foul_bunt", PitchCategory::Swinging),
        ("ball", PitchCategory::Ball),
        ("blocked_ball", PitchCategory::BadBalls),
        ("hit_by_pitch", PitchCategory::BadBalls),
        ("hit_into_play", PitchCategory::Hit),
        ("pitchout", PitchCategory::Unknown),
    ];
    for (description, expected) in cases {
        assert_eq!(
            PitchCategory::from_description(Some(description)),
            expected,
            "{description}"
        );
    }
    assert_eq!(PitchCategory::from_description(None), PitchCategory::Unknown);
}

#[test]
fn simple_scheme_folds_swings_into_strikes() {
    let scheme = ZoneScheme::Simple;
    assert_eq!(scheme.categorize(Some("foul")), PitchCategory::Strike);
    assert_eq!(scheme.categorize(Some("blocked_ball")), PitchCategory::Ball);
    assert_eq!(scheme.categorize(Some("pitchout")), PitchCategory::Hit);
    assert_eq!(PitchCategory::Hit.color(scheme), MarkerColor::GRAY);
    assert_eq!(PitchCategory::Swinging.color(scheme), MarkerColor::GRAY);
}

#[test]
fn detailed_colors_are_fixed() {
    let scheme = ZoneScheme::Detailed;
    assert_eq!(PitchCategory::Strike.color(scheme).name, "red");
    assert_eq!(PitchCategory::Swinging.color(scheme).name, "darkred");
    assert_eq!(PitchCategory::Ball.color(scheme).name, "green");
    assert_eq!(PitchCategory::BadBalls.color(scheme).rgb, (1, 50, 32));
    assert_eq!(PitchCategory::Hit.color(scheme).name, "gray");
    assert_eq!(PitchCategory::Unknown.color(scheme).name, "white");
}

#[test]
fn null_fields_are_defined_but_missing_ones_are_not() {
    let mut null_x = located(1, "ball", 0.0, 2.0);
    null_x.plate_x = Field::Null;
    assert!(is_plottable(&null_x));

    let mut zero = located(1, "ball", 0.0, 0.0);
    zero.sz_bot = Field::Value(0.0);
    assert!(is_plottable(&zero));

    let mut missing_top = located(1, "ball", 0.0, 2.0);
    missing_top.sz_top = Field::Missing;
    assert!(!is_plottable(&missing_top));

    let mut missing_description = located(1, "ball", 0.0, 2.0);
    missing_description.description = Field::Missing;
    assert!(!is_plottable(&missing_description));
}

#[test]
fn filter_selects_one_at_bat_or_concatenates_all() {
    let mut incomplete = located(2, "ball", 0.4, 1.0);
    incomplete.plate_z = Field::Missing;
    let events = vec![
        located(2, "called_strike", 0.1, 2.0),
        located(1, "ball", -1.0, 4.0),
        incomplete,
        located(2, "hit_into_play", 0.3, 2.4),
        located(1, "foul", 0.9, 3.3),
    ];
    let groups = group_by_at_bat(&events);

    let all = classify_coordinates(&groups, AtBatFilter::All);
    assert_eq!(all.len(), 4);
    assert_eq!(all.plate_x.len(), 4);
    assert_eq!(all.sz_bot.len(), 4);
    assert_eq!(
        all.categories,
        vec![
            PitchCategory::Strike,
            PitchCategory::Hit,
            PitchCategory::Ball,
            PitchCategory::Swinging,
        ]
    );

    let first = classify_coordinates(&groups, AtBatFilter::AtBat(1));
    assert_eq!(first.plate_x, vec![Some(-1.0), Some(0.9)]);

    let none = classify_coordinates(&groups, AtBatFilter::AtBat(7));
    assert!(none.is_empty());

    let simple = classify_coordinates_with(&groups, AtBatFilter::AtBat(1), ZoneScheme::Simple);
    assert_eq!(simple.categories, vec![PitchCategory::Ball, PitchCategory::Strike]);
}

#[test]
fn projection_matches_canvas_geometry() {
    let detail = ZoneCanvas::DETAIL;
    assert!(close(detail.project_x(0.0), 320.0));
    assert!(close(detail.project_x(1.0), 464.0));
    assert!(close(detail.project_x(-1.0), 176.0));
    assert!(close(detail.project_y(0.0), 640.0));
    assert!(close(detail.project_y(5.0), 0.0));
    assert!(close(detail.project_y(2.5), 320.0));

    let aggregate = ZoneCanvas::for_filter(AtBatFilter::All);
    assert_eq!(aggregate, ZoneCanvas::AGGREGATE);
    assert!(close(aggregate.project_x(0.5), 572.0));
    assert_eq!(ZoneCanvas::for_filter(AtBatFilter::AtBat(3)), ZoneCanvas::DETAIL);

    let (left, top, right, bottom) = detail.strike_zone_rect(3.5, 1.5);
    assert!(close(left, 320.0 - 0.83 * 144.0));
    assert!(close(right, 320.0 + 0.83 * 144.0));
    assert!(close(top, 640.0 - 3.5 / 5.0 * 640.0));
    assert!(close(bottom, 640.0 - 1.5 / 5.0 * 640.0));
    assert!(top < bottom);
}

#[test]
fn opacity_fades_linearly_with_point_count() {
    assert!(close(marker_opacity(0), 0.8));
    assert!(close(marker_opacity(500), 0.55));
    assert!(close(marker_opacity(1000), 0.3));
    assert!(close(marker_opacity(5000), 0.3));
}

#[test]
fn fixture_game_plots_complete_pitches_only() {
    let games = parse_recent_games_json(&read_fixture("recent_games.json")).expect("fixture should parse");
    let game = games
        .iter()
        .find(|g| g.game_pk == "745001")
        .expect("fixture game");
    let groups = group_by_at_bat(&game.details);

    let series = classify_coordinates(&groups, AtBatFilter::All);
    // One ball has no plate_x key at all.
    assert_eq!(series.len(), game.details.len() - 1);

    let markers = series.markers(ZoneCanvas::AGGREGATE, ZoneScheme::Detailed);
    // The NaN coordinates survive classification but cannot be drawn.
    assert_eq!(markers.len(), series.len() - 1);
    assert!(markers.iter().all(|m| close(m.opacity, marker_opacity(series.len()))));

    let walk = classify_coordinates(&groups, AtBatFilter::AtBat(2));
    assert_eq!(
        walk.categories,
        vec![
            PitchCategory::Ball,
            PitchCategory::BadBalls,
            PitchCategory::Ball,
            PitchCategory::Strike,
            PitchCategory::Ball,
        ]
    );
    assert_eq!(walk.plate_x[2], None);
    let (top, bot) = walk.mean_zone_bounds().expect("zone bounds");
    assert!(close(top, 3.6));
    assert!(close(bot, 1.7));
}
