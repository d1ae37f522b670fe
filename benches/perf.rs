use criterion::{Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::hint::black_box;

use pitch_terminal::aggregate::{group_by_at_bat, inning_breaks, summarize_events};
use pitch_terminal::api::{parse_count_stats_json, parse_recent_games_json, sanitize_nan};
use pitch_terminal::demo_feed::demo_recent_games;
use pitch_terminal::pitch::PitchEvent;
use pitch_terminal::strike_zone::{AtBatFilter, ZoneCanvas, ZoneScheme, classify_coordinates};

fn season_of_pitches() -> Vec<PitchEvent> {
    let mut rng = StdRng::seed_from_u64(7);
    demo_recent_games(&mut rng, 30)
        .into_iter()
        .flat_map(|game| game.details)
        .collect()
}

fn bench_recent_games_parse(c: &mut Criterion) {
    c.bench_function("recent_games_parse", |b| {
        b.iter(|| {
            let games = parse_recent_games_json(black_box(RECENT_GAMES_JSON)).expect("valid fixture json");
            black_box(games.len());
        })
    });
}

fn bench_nan_sanitize(c: &mut Criterion) {
    let raw = RECENT_GAMES_JSON.repeat(50);
    c.bench_function("nan_sanitize", |b| {
        b.iter(|| {
            black_box(sanitize_nan(black_box(&raw)).len());
        })
    });
}

fn bench_count_stats_parse(c: &mut Criterion) {
    c.bench_function("count_stats_parse", |b| {
        b.iter(|| {
            let counts = parse_count_stats_json(black_box(BY_COUNT_JSON)).expect("valid fixture json");
            black_box(counts.ordered_counts().len());
        })
    });
}

fn bench_summarize_season(c: &mut Criterion) {
    let events = season_of_pitches();
    c.bench_function("summarize_season", |b| {
        b.iter(|| {
            let summary = summarize_events(black_box(&events));
            black_box(summary.pitches());
        })
    });
}

fn bench_group_and_classify(c: &mut Criterion) {
    let events = season_of_pitches();
    c.bench_function("group_and_classify", |b| {
        b.iter(|| {
            let groups = group_by_at_bat(black_box(&events));
            black_box(inning_breaks(&groups).len());
            let series = classify_coordinates(&groups, AtBatFilter::All);
            let markers = series.markers(ZoneCanvas::AGGREGATE, ZoneScheme::Detailed);
            black_box(markers.len());
        })
    });
}

criterion_group!(
    perf,
    bench_recent_games_parse,
    bench_nan_sanitize,
    bench_count_stats_parse,
    bench_summarize_season,
    bench_group_and_classify
);
criterion_main!(perf);

static RECENT_GAMES_JSON: &str = include_str!("../tests/fixtures/recent_games.json");
static BY_COUNT_JSON: &str = include_str!("../tests/fixtures/by_count.json");
