use pitch_terminal::aggregate::{
    self, KbbRatio, group_by_at_bat, inning_breaks, is_ball_description, is_strike_description,
    summarize_events,
};
use pitch_terminal::pitch::PitchEvent;

fn pitch(at_bat: u32, description: Option<&str>, events: Option<&str>) -> PitchEvent {
    PitchEvent {
        at_bat_number: at_bat,
        description: description.map(str::to_string).into(),
        events: events.map(str::to_string),
        ..PitchEvent::default()
    }
}

fn in_inning(mut event: PitchEvent, inning: u32) -> PitchEvent {
    event.inning = inning;
    event
}

#[test]
fn summarizes_three_pitch_example() {
    let events = vec![
        pitch(1, Some("ball"), None),
        pitch(1, Some("called_strike"), None),
        pitch(2, Some("swinging_strike"), Some("strikeout")),
    ];
    let summary = summarize_events(&events);
    assert_eq!(summary.balls, 1);
    assert_eq!(summary.strikes, 2);
    assert_eq!(summary.strikeouts, 1);
    assert_eq!(summary.walks, 0);
    assert_eq!(summary.k_bb, KbbRatio::Infinite);
    assert_eq!(summary.ball_pct, 33.3);
    assert_eq!(summary.strike_pct, 66.7);

    let groups = group_by_at_bat(&events);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].at_bat_number, 1);
    assert_eq!(groups[0].events.len(), 2);
    assert_eq!(groups[1].at_bat_number, 2);
    assert_eq!(groups[1].events.len(), 1);
}

#[test]
fn empty_input_yields_zeroes() {
    let summary = summarize_events(&[]);
    assert_eq!(summary.pitches(), 0);
    assert_eq!(summary.ball_pct, 0.0);
    assert_eq!(summary.strike_pct, 0.0);
    assert_eq!(summary.k_bb, KbbRatio::Infinite);
    assert!(group_by_at_bat(&[]).is_empty());
}

#[test]
fn hard_hit_threshold_is_inclusive_and_ignores_fouls() {
    let mut in_play = pitch(1, Some("hit_into_play"), Some("single"));
    in_play.launch_speed = Some(95.0);
    let mut foul = pitch(2, Some("foul"), None);
    foul.launch_speed = Some(95.0);
    let mut soft = pitch(3, Some("hit_into_play"), Some("field_out"));
    soft.launch_speed = Some(94.9);
    let no_speed = pitch(4, Some("hit_into_play"), Some("double"));

    assert!(aggregate::is_hard_hit(&in_play));
    assert!(!aggregate::is_hard_hit(&foul));
    assert!(!aggregate::is_hard_hit(&soft));
    assert!(!aggregate::is_hard_hit(&no_speed));

    let summary = summarize_events(&[in_play, foul, soft, no_speed]);
    assert_eq!(summary.hard_hit, 1);
    assert_eq!(summary.hits, 2);
    assert_eq!(summary.strikes, 4);
}

#[test]
fn outcome_and_description_tallies_are_independent() {
    let events = vec![
        pitch(1, Some("ball"), Some("walk")),
        pitch(2, Some("hit_by_pitch"), Some("hit_by_pitch")),
        pitch(3, Some("hit_into_play"), Some("home_run")),
        pitch(4, None, Some("strikeout")),
    ];
    let summary = summarize_events(&events);
    assert_eq!(summary.walks, 2);
    assert_eq!(summary.strikeouts, 1);
    assert_eq!(summary.hits, 1);
    assert_eq!(summary.balls, 1);
    assert_eq!(summary.strikes, 1);
    assert_eq!(summary.k_bb, KbbRatio::Finite(0.5));
}

#[test]
fn kbb_rounds_to_two_decimals() {
    assert_eq!(KbbRatio::from_counts(7, 3), KbbRatio::Finite(2.33));
    assert_eq!(KbbRatio::from_counts(0, 4), KbbRatio::Finite(0.0));
    assert_eq!(KbbRatio::from_counts(0, 0), KbbRatio::Infinite);
    assert!(KbbRatio::from_counts(5, 0).as_f64().is_infinite());
}

#[test]
fn tallies_match_vocabulary_membership() {
    let descriptions = [
        "ball",
        "called_strike",
        "swinging_strike",
        "foul",
        "foul_tip",
        "blocked_ball",
        "hit_into_play",
        "hit_by_pitch",
        "swinging_strike_blocked",
        "pitchout",
    ];
    let events: Vec<PitchEvent> = descriptions
        .iter()
        .cycle()
        .take(37)
        .enumerate()
        .map(|(i, d)| pitch(i as u32 / 4, Some(d), None))
        .collect();
    let expected = events
        .iter()
        .filter_map(|e| e.description())
        .filter(|d| is_strike_description(d) || is_ball_description(d))
        .count() as u32;

    let summary = summarize_events(&events);
    assert_eq!(summary.balls + summary.strikes, expected);
    assert!((summary.ball_pct + summary.strike_pct - 100.0).abs() <= 0.1);
}

#[test]
fn grouping_keeps_first_occurrence_order() {
    let events = vec![
        pitch(5, Some("ball"), None),
        pitch(2, Some("ball"), None),
        pitch(5, Some("foul"), None),
        pitch(9, Some("ball"), None),
        pitch(2, Some("called_strike"), Some("strikeout")),
    ];
    let groups = group_by_at_bat(&events);
    let order: Vec<u32> = groups.iter().map(|g| g.at_bat_number).collect();
    assert_eq!(order, vec![5, 2, 9]);
    assert_eq!(groups[0].events[1].description(), Some("foul"));
    assert_eq!(groups[1].events[1].outcome(), Some("strikeout"));

    let flattened: Vec<PitchEvent> = groups.iter().flat_map(|g| g.events.clone()).collect();
    assert_eq!(group_by_at_bat(&flattened), groups);
}

#[test]
fn inning_breaks_follow_first_event_of_each_group() {
    let events = vec![
        in_inning(pitch(1, Some("ball"), None), 1),
        in_inning(pitch(2, Some("ball"), None), 1),
        in_inning(pitch(3, Some("ball"), None), 2),
        in_inning(pitch(3, Some("ball"), None), 3),
        in_inning(pitch(4, Some("ball"), None), 3),
    ];
    let groups = group_by_at_bat(&events);
    assert_eq!(inning_breaks(&groups), vec![0, 2, 3]);
}

#[test]
fn abbreviations_distinguish_looking_strikeouts() {
    assert_eq!(
        aggregate::outcome_abbreviation("strikeout", Some("called_strike")),
        "ꓘ"
    );
    assert_eq!(
        aggregate::outcome_abbreviation("strikeout", Some("swinging_strike")),
        "K"
    );
    assert_eq!(aggregate::outcome_abbreviation("home_run", None), "HR");
    assert_eq!(aggregate::outcome_abbreviation("catcher_interf", None), "catcher_interf");

    let groups = group_by_at_bat(&[pitch(1, Some("ball"), Some("walk"))]);
    assert_eq!(aggregate::at_bat_label(&groups[0]), "BB");
}
