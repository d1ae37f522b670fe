use std::collections::{HashMap, HashSet, VecDeque};

use crate::aggregate::{self, AtBatGroup, EventSummary};
use crate::api::{
    ArsenalResponse, CountStats, HitOutcomeResponse, PitcherRoster, PitcherSeasonRow,
    ProgressionMetric, ProgressionRow, RecentGame, progression_pitch_types,
};
use crate::strike_zone::{self, AtBatFilter, ZoneScheme, ZoneSeries};

const MAX_LOGS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Selection,
    Dashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardTab {
    Games,
    Arsenal,
    Counts,
    Progression,
    HitOutcome,
}

impl DashboardTab {
    pub const ALL: [DashboardTab; 5] = [
        DashboardTab::Games,
        DashboardTab::Arsenal,
        DashboardTab::Counts,
        DashboardTab::Progression,
        DashboardTab::HitOutcome,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DashboardTab::Games => "Recent Games",
            DashboardTab::Arsenal => "Arsenal",
            DashboardTab::Counts => "By Count",
            DashboardTab::Progression => "Progression",
            DashboardTab::HitOutcome => "Hit Outcomes",
        }
    }
}

/// A backend resource with its own loading/error slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    Roster,
    PlayerId,
    Arsenal,
    Counts,
    Recent,
    Progression,
    HitOutcome,
    Names,
}

impl Panel {
    pub const PITCHER_SCOPED: [Panel; 6] = [
        Panel::PlayerId,
        Panel::Arsenal,
        Panel::Counts,
        Panel::Recent,
        Panel::Progression,
        Panel::HitOutcome,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Panel::Roster => "pitchers",
            Panel::PlayerId => "pitcher id",
            Panel::Arsenal => "arsenal stats",
            Panel::Counts => "count stats",
            Panel::Recent => "recent games",
            Panel::Progression => "progression",
            Panel::HitOutcome => "hit outcomes",
            Panel::Names => "player names",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectedPitcher {
    pub name: String,
    pub id: Option<u32>,
    pub season: Option<PitcherSeasonRow>,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub screen: Screen,
    pub tab: DashboardTab,
    pub roster: PitcherRoster,
    pub roster_selected: usize,
    pub roster_search: String,
    pub roster_search_active: bool,
    pub pitcher: Option<SelectedPitcher>,
    /// Bumped on every pitcher change. Responses tagged with an older value
    /// are dropped.
    pub generation: u64,
    pub arsenal: Option<ArsenalResponse>,
    pub counts: Option<CountStats>,
    pub recent: Vec<RecentGame>,
    pub progression: Vec<ProgressionRow>,
    pub hit_outcome: Option<HitOutcomeResponse>,
    pub loading: HashSet<Panel>,
    pub errors: HashMap<Panel, String>,
    pub game_selected: usize,
    pub at_bat_filter: AtBatFilter,
    pub zone_scheme: ZoneScheme,
    pub count_selected: usize,
    pub progression_metric: ProgressionMetric,
    pub progression_pitch_type: Option<String>,
    pub player_names: HashMap<u32, String>,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
    pub export_status: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub enum Delta {
    SetRoster(PitcherRoster),
    SetPitcherId {
        generation: u64,
        id: u32,
    },
    SetArsenal {
        generation: u64,
        arsenal: ArsenalResponse,
    },
    SetCountStats {
        generation: u64,
        counts: CountStats,
    },
    SetRecentGames {
        generation: u64,
        games: Vec<RecentGame>,
    },
    SetProgression {
        generation: u64,
        rows: Vec<ProgressionRow>,
    },
    SetHitOutcome {
        generation: u64,
        outcome: HitOutcomeResponse,
    },
    SetPlayerNames(HashMap<u32, String>),
    FetchFailed {
        generation: Option<u64>,
        panel: Panel,
        message: String,
    },
    ExportFinished {
        path: String,
        result: Result<usize, String>,
    },
    Log(String),
}

#[derive(Debug, Clone)]
pub enum ProviderCommand {
    FetchRoster,
    /// Look up the id for `name`, then load every dashboard panel.
    LoadPitcher {
        generation: u64,
        name: String,
    },
    /// Reload the dashboard panels for an already resolved pitcher.
    RefreshPitcher {
        generation: u64,
        pitcher_id: u32,
    },
    FetchPlayerNames {
        ids: Vec<u32>,
    },
    ExportGame {
        path: String,
        pitcher: String,
        game: RecentGame,
        names: HashMap<u32, String>,
    },
}

impl AppState {
    pub fn new() -> Self {
        Self {
            screen: Screen::Selection,
            tab: DashboardTab::Games,
            roster: PitcherRoster::default(),
            roster_selected: 0,
            roster_search: String::new(),
            roster_search_active: false,
            pitcher: None,
            generation: 0,
            arsenal: None,
            counts: None,
            recent: Vec::new(),
            progression: Vec::new(),
            hit_outcome: None,
            loading: HashSet::from([Panel::Roster]),
            errors: HashMap::new(),
            game_selected: 0,
            at_bat_filter: AtBatFilter::All,
            zone_scheme: ZoneScheme::Detailed,
            count_selected: 0,
            progression_metric: ProgressionMetric::default(),
            progression_pitch_type: None,
            player_names: HashMap::new(),
            logs: VecDeque::new(),
            help_overlay: false,
            export_status: None,
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    pub fn is_loading(&self, panel: Panel) -> bool {
        self.loading.contains(&panel)
    }

    pub fn error(&self, panel: Panel) -> Option<&str> {
        self.errors.get(&panel).map(String::as_str)
    }

    pub fn filtered_roster(&self) -> Vec<&str> {
        let needle = self.roster_search.trim().to_ascii_lowercase();
        self.roster
            .pitcher_names
            .iter()
            .filter(|name| needle.is_empty() || name.to_ascii_lowercase().contains(&needle))
            .map(String::as_str)
            .collect()
    }

    pub fn select_roster_next(&mut self) {
        let len = self.filtered_roster().len();
        if len == 0 {
            self.roster_selected = 0;
            return;
        }
        self.roster_selected = (self.roster_selected + 1).min(len - 1);
    }

    pub fn select_roster_prev(&mut self) {
        self.roster_selected = self.roster_selected.saturating_sub(1);
    }

    pub fn clamp_roster_selection(&mut self) {
        let len = self.filtered_roster().len();
        if self.roster_selected >= len {
            self.roster_selected = len.saturating_sub(1);
        }
    }

    /// Switches to the dashboard for the highlighted roster entry. Returns the
    /// command that loads its data.
    pub fn open_selected_pitcher(&mut self) -> Option<ProviderCommand> {
        let name = self.filtered_roster().get(self.roster_selected)?.to_string();
        Some(self.open_pitcher(name))
    }

    pub fn open_pitcher(&mut self, name: String) -> ProviderCommand {
        self.generation += 1;
        let season = self.roster.season_row(&name).cloned();
        self.pitcher = Some(SelectedPitcher {
            name: name.clone(),
            id: None,
            season,
        });
        self.clear_pitcher_data();
        self.loading.extend(Panel::PITCHER_SCOPED);
        self.screen = Screen::Dashboard;
        self.tab = DashboardTab::Games;
        ProviderCommand::LoadPitcher {
            generation: self.generation,
            name,
        }
    }

    pub fn refresh_pitcher(&mut self) -> Option<ProviderCommand> {
        let pitcher_id = self.pitcher.as_ref()?.id?;
        self.generation += 1;
        for panel in Panel::PITCHER_SCOPED {
            if panel != Panel::PlayerId {
                self.loading.insert(panel);
                self.errors.remove(&panel);
            }
        }
        Some(ProviderCommand::RefreshPitcher {
            generation: self.generation,
            pitcher_id,
        })
    }

    /// Leaves the dashboard. In-flight responses for the old pitcher become
    /// stale.
    pub fn back_to_selection(&mut self) {
        self.generation += 1;
        self.screen = Screen::Selection;
        self.pitcher = None;
        self.clear_pitcher_data();
    }

    fn clear_pitcher_data(&mut self) {
        self.arsenal = None;
        self.counts = None;
        self.recent.clear();
        self.progression.clear();
        self.hit_outcome = None;
        for panel in Panel::PITCHER_SCOPED {
            self.loading.remove(&panel);
            self.errors.remove(&panel);
        }
        self.game_selected = 0;
        self.at_bat_filter = AtBatFilter::All;
        self.count_selected = 0;
        self.progression_pitch_type = None;
        self.export_status = None;
    }

    pub fn cycle_tab(&mut self) {
        let idx = DashboardTab::ALL
            .iter()
            .position(|t| *t == self.tab)
            .unwrap_or(0);
        self.tab = DashboardTab::ALL[(idx + 1) % DashboardTab::ALL.len()];
    }

    pub fn selected_game(&self) -> Option<&RecentGame> {
        self.recent.get(self.game_selected)
    }

    pub fn select_game_next(&mut self) {
        if self.recent.is_empty() {
            return;
        }
        self.game_selected = (self.game_selected + 1).min(self.recent.len() - 1);
        self.at_bat_filter = AtBatFilter::All;
    }

    pub fn select_game_prev(&mut self) {
        self.game_selected = self.game_selected.saturating_sub(1);
        self.at_bat_filter = AtBatFilter::All;
    }

    pub fn game_groups(&self) -> Vec<AtBatGroup> {
        self.selected_game()
            .map(|game| aggregate::group_by_at_bat(&game.details))
            .unwrap_or_default()
    }

    pub fn game_summary(&self) -> Option<EventSummary> {
        self.selected_game()
            .map(|game| aggregate::summarize_events(&game.details))
    }

    pub fn zone_series(&self) -> ZoneSeries {
        strike_zone::classify_coordinates_with(
            &self.game_groups(),
            self.at_bat_filter,
            self.zone_scheme,
        )
    }

    pub fn toggle_zone_scheme(&mut self) {
        self.zone_scheme = match self.zone_scheme {
            ZoneScheme::Detailed => ZoneScheme::Simple,
            ZoneScheme::Simple => ZoneScheme::Detailed,
        };
    }

    /// Steps the plotted at-bat: all → first → … → last → all.
    pub fn select_at_bat_next(&mut self) {
        let order: Vec<u32> = self.game_groups().iter().map(|g| g.at_bat_number).collect();
        self.at_bat_filter = step_at_bat(&order, self.at_bat_filter, true);
    }

    pub fn select_at_bat_prev(&mut self) {
        let order: Vec<u32> = self.game_groups().iter().map(|g| g.at_bat_number).collect();
        self.at_bat_filter = step_at_bat(&order, self.at_bat_filter, false);
    }

    /// Batters in the selected game whose names are not cached yet.
    pub fn missing_batter_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = Vec::new();
        let Some(game) = self.selected_game() else {
            return ids;
        };
        for id in game.details.iter().filter_map(|e| e.batter) {
            if !self.player_names.contains_key(&id) && !ids.contains(&id) {
                ids.push(id);
            }
        }
        ids
    }

    pub fn batter_name(&self, id: Option<u32>) -> &str {
        id.and_then(|id| self.player_names.get(&id))
            .map(String::as_str)
            .unwrap_or("Loading...")
    }

    pub fn selected_count(&self) -> Option<&str> {
        let counts = self.counts.as_ref()?;
        counts.ordered_counts().get(self.count_selected).copied()
    }

    pub fn cycle_count(&mut self, forward: bool) {
        let Some(counts) = self.counts.as_ref() else {
            return;
        };
        let len = counts.ordered_counts().len();
        if len == 0 {
            return;
        }
        self.count_selected = if forward {
            (self.count_selected + 1) % len
        } else {
            (self.count_selected + len - 1) % len
        };
    }

    pub fn cycle_progression_metric(&mut self) {
        self.progression_metric = self.progression_metric.next();
    }

    /// All → each pitch type in first-seen order → all.
    pub fn cycle_progression_pitch_type(&mut self) {
        let types = progression_pitch_types(&self.progression);
        self.progression_pitch_type = match self.progression_pitch_type.as_ref() {
            None => types.first().cloned(),
            Some(current) => {
                let idx = types.iter().position(|t| t == current);
                idx.and_then(|i| types.get(i + 1)).cloned()
            }
        };
    }

    fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }
}

fn step_at_bat(order: &[u32], current: AtBatFilter, forward: bool) -> AtBatFilter {
    if order.is_empty() {
        return AtBatFilter::All;
    }
    let pos = match current {
        AtBatFilter::All => None,
        AtBatFilter::AtBat(n) => order.iter().position(|x| *x == n),
    };
    let next = match (pos, forward) {
        (None, true) => Some(0),
        (None, false) => Some(order.len() - 1),
        (Some(i), true) if i + 1 < order.len() => Some(i + 1),
        (Some(i), false) if i > 0 => Some(i - 1),
        _ => None,
    };
    next.map(|i| AtBatFilter::AtBat(order[i]))
        .unwrap_or(AtBatFilter::All)
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::SetRoster(roster) => {
            state.loading.remove(&Panel::Roster);
            state.errors.remove(&Panel::Roster);
            state.push_log(format!(
                "[INFO] Loaded {} pitchers",
                roster.pitcher_names.len()
            ));
            state.roster = roster;
            state.clamp_roster_selection();
        }
        Delta::SetPitcherId { generation, id } => {
            if !accept(state, generation, Panel::PlayerId) {
                return;
            }
            if let Some(pitcher) = state.pitcher.as_mut() {
                pitcher.id = Some(id);
            }
        }
        Delta::SetArsenal {
            generation,
            arsenal,
        } => {
            if accept(state, generation, Panel::Arsenal) {
                state.arsenal = Some(arsenal);
            }
        }
        Delta::SetCountStats { generation, counts } => {
            if accept(state, generation, Panel::Counts) {
                state.count_selected = counts
                    .ordered_counts()
                    .iter()
                    .position(|c| *c == "0-0")
                    .unwrap_or(0);
                state.counts = Some(counts);
            }
        }
        Delta::SetRecentGames { generation, games } => {
            if accept(state, generation, Panel::Recent) {
                state.push_log(format!("[INFO] Loaded {} recent games", games.len()));
                state.recent = games;
                state.game_selected = 0;
                state.at_bat_filter = AtBatFilter::All;
            }
        }
        Delta::SetProgression { generation, rows } => {
            if accept(state, generation, Panel::Progression) {
                state.progression = rows;
                state.progression_pitch_type = None;
            }
        }
        Delta::SetHitOutcome {
            generation,
            outcome,
        } => {
            if accept(state, generation, Panel::HitOutcome) {
                state.hit_outcome = Some(outcome);
            }
        }
        Delta::SetPlayerNames(names) => {
            state.loading.remove(&Panel::Names);
            state.player_names.extend(names);
        }
        Delta::FetchFailed {
            generation,
            panel,
            message,
        } => {
            if let Some(generation) = generation
                && !state.is_current(generation)
            {
                return;
            }
            state.loading.remove(&panel);
            // Without an id nothing else for this pitcher can load.
            if panel == Panel::PlayerId {
                for other in Panel::PITCHER_SCOPED {
                    state.loading.remove(&other);
                }
            }
            state.push_log(format!("[WARN] Failed to fetch {}: {message}", panel.label()));
            state
                .errors
                .insert(panel, format!("Failed to fetch {}.", panel.label()));
        }
        Delta::ExportFinished { path, result } => match result {
            Ok(rows) => {
                state.push_log(format!("[INFO] Exported {rows} pitches to {path}"));
                state.export_status = Some(format!("Saved {path}"));
            }
            Err(err) => {
                state.push_log(format!("[WARN] Export failed: {err}"));
                state.export_status = Some("Export failed".to_string());
            }
        },
        Delta::Log(msg) => state.push_log(msg),
    }
}

fn accept(state: &mut AppState, generation: u64, panel: Panel) -> bool {
    if !state.is_current(generation) {
        state.push_log(format!(
            "[INFO] Dropped stale {} response (gen {generation}, now {})",
            panel.label(),
            state.generation
        ));
        return false;
    }
    state.loading.remove(&panel);
    state.errors.remove(&panel);
    true
}
