use std::collections::HashMap;
use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use chrono::Local;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::widgets::canvas::{Canvas, Points, Rectangle};
use ratatui::widgets::{
    Axis, Block, Borders, Cell, Chart, Clear, Dataset, GraphType, Paragraph, Row, Table, Tabs,
};

use pitch_terminal::aggregate::{self, AtBatGroup};
use pitch_terminal::api::progression_series;
use pitch_terminal::pitch_types::{pitch_color, pitch_name, position_label, team_name};
use pitch_terminal::state::{
    self, AppState, DashboardTab, Panel, ProviderCommand, Screen, apply_delta,
};
use pitch_terminal::strike_zone::{
    AtBatFilter, PitchCategory, ZoneCanvas, ZoneScheme, marker_opacity,
};
use pitch_terminal::{demo_feed, feed};

struct App {
    state: AppState,
    should_quit: bool,
    cmd_tx: Option<mpsc::Sender<ProviderCommand>>,
    names_requested_for: Option<(u64, usize)>,
}

impl App {
    fn new(cmd_tx: Option<mpsc::Sender<ProviderCommand>>) -> Self {
        Self {
            state: AppState::new(),
            should_quit: false,
            cmd_tx,
            names_requested_for: None,
        }
    }

    fn send(&mut self, cmd: ProviderCommand, what: &str) {
        let Some(tx) = &self.cmd_tx else {
            self.state.push_log(format!("[INFO] {what} unavailable"));
            return;
        };
        if tx.send(cmd).is_err() {
            self.state.push_log(format!("[WARN] {what} request failed"));
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.roster_search_active {
            self.on_search_key(key);
            return;
        }
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            _ => match self.state.screen {
                Screen::Selection => self.on_selection_key(key),
                Screen::Dashboard => self.on_dashboard_key(key),
            },
        }
    }

    fn on_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => self.state.roster_search_active = false,
            KeyCode::Backspace => {
                self.state.roster_search.pop();
            }
            KeyCode::Char(c) => self.state.roster_search.push(c),
            _ => {}
        }
        self.state.roster_selected = 0;
        self.state.clamp_roster_selection();
    }

    fn on_selection_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.select_roster_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_roster_prev(),
            KeyCode::Char('/') => self.state.roster_search_active = true,
            KeyCode::Char('r') => {
                self.state.loading.insert(Panel::Roster);
                self.send(ProviderCommand::FetchRoster, "Pitcher list");
            }
            KeyCode::Enter | KeyCode::Char('d') => {
                if let Some(cmd) = self.state.open_selected_pitcher() {
                    self.names_requested_for = None;
                    self.send(cmd, "Pitcher load");
                }
            }
            _ => {}
        }
    }

    fn on_dashboard_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('b') | KeyCode::Esc => self.state.back_to_selection(),
            KeyCode::Tab => self.state.cycle_tab(),
            KeyCode::Char('r') => {
                if let Some(cmd) = self.state.refresh_pitcher() {
                    self.send(cmd, "Dashboard refresh");
                }
            }
            _ => match self.state.tab {
                DashboardTab::Games => self.on_games_key(key),
                DashboardTab::Counts => match key.code {
                    KeyCode::Char('l') | KeyCode::Right => self.state.cycle_count(true),
                    KeyCode::Char('h') | KeyCode::Left => self.state.cycle_count(false),
                    _ => {}
                },
                DashboardTab::Progression => match key.code {
                    KeyCode::Char('m') => self.state.cycle_progression_metric(),
                    KeyCode::Char('p') => self.state.cycle_progression_pitch_type(),
                    _ => {}
                },
                DashboardTab::Arsenal | DashboardTab::HitOutcome => {}
            },
        }
    }

    fn on_games_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.select_game_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_game_prev(),
            KeyCode::Char('l') | KeyCode::Right => self.state.select_at_bat_next(),
            KeyCode::Char('h') | KeyCode::Left => self.state.select_at_bat_prev(),
            KeyCode::Char('a') => self.state.at_bat_filter = AtBatFilter::All,
            KeyCode::Char('c') => self.state.toggle_zone_scheme(),
            KeyCode::Char('e') => self.request_export(),
            _ => {}
        }
    }

    fn request_export(&mut self) {
        let Some(game) = self.state.selected_game().cloned() else {
            self.state.push_log("[INFO] No game selected for export");
            return;
        };
        let pitcher = self
            .state
            .pitcher
            .as_ref()
            .map(|p| p.name.clone())
            .unwrap_or_default();
        let path = format!(
            "pitch_terminal_{}_{}.xlsx",
            game.game_pk,
            Local::now().format("%Y%m%d_%H%M%S")
        );
        self.state.export_status = Some(format!("Exporting {path}..."));
        let names: HashMap<u32, String> = self.state.player_names.clone();
        self.send(
            ProviderCommand::ExportGame {
                path,
                pitcher,
                game,
                names,
            },
            "Export",
        );
    }

    /// Asks for batter names once per (pitcher, game) selection.
    fn maybe_request_names(&mut self) {
        if self.state.screen != Screen::Dashboard || self.state.recent.is_empty() {
            return;
        }
        let key = (self.state.generation, self.state.game_selected);
        if self.names_requested_for == Some(key) {
            return;
        }
        self.names_requested_for = Some(key);
        let ids = self.state.missing_batter_ids();
        if !ids.is_empty() {
            self.state.loading.insert(Panel::Names);
            self.send(ProviderCommand::FetchPlayerNames { ids }, "Player names");
        }
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let demo = std::env::var("PITCH_DEMO")
        .map(|val| val == "1" || val.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    if demo {
        demo_feed::spawn_demo_provider(tx, cmd_rx);
    } else {
        feed::spawn_provider(tx, cmd_rx);
    }

    let mut app = App::new(Some(cmd_tx));
    app.send(ProviderCommand::FetchRoster, "Pitcher list");
    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<state::Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        app.maybe_request_names();

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.state.screen {
        Screen::Selection => render_selection(frame, chunks[1], &app.state),
        Screen::Dashboard => render_dashboard(frame, chunks[1], &app.state),
    }

    let console = Paragraph::new(console_text(&app.state, chunks[2].height.saturating_sub(1)))
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text(&app.state));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        let area = frame.size();
        render_help_overlay(frame, area);
    }
}

fn header_text(state: &AppState) -> String {
    let title = match (&state.screen, state.pitcher.as_ref()) {
        (Screen::Dashboard, Some(pitcher)) => {
            format!("PITCH TERMINAL | {} | {}", pitcher.name, state.tab.label())
        }
        _ => "PITCH TERMINAL | Select a pitcher".to_string(),
    };
    let line1 = format!("   __   {title}");
    let line2 = "  (  )".to_string();
    let line3 = "   ‾‾".to_string();
    format!("{line1}\n{line2}\n{line3}")
}

fn footer_text(state: &AppState) -> String {
    if state.roster_search_active {
        return "Type to filter | Enter/Esc Done | Backspace Delete".to_string();
    }
    match state.screen {
        Screen::Selection => {
            "j/k/↑/↓ Move | Enter Open | / Search | r Reload | ? Help | q Quit".to_string()
        }
        Screen::Dashboard => match state.tab {
            DashboardTab::Games => {
                "Tab Next tab | j/k Game | h/l At-bat | a All | c Colors | e Export | r Refresh | b Back | q Quit"
                    .to_string()
            }
            DashboardTab::Counts => "Tab Next tab | h/l Count | r Refresh | b Back | q Quit".to_string(),
            DashboardTab::Progression => {
                "Tab Next tab | m Metric | p Pitch type | r Refresh | b Back | q Quit".to_string()
            }
            _ => "Tab Next tab | r Refresh | b Back | q Quit".to_string(),
        },
    }
}

fn console_text(state: &AppState, lines: u16) -> String {
    let skip = state.logs.len().saturating_sub(lines as usize);
    state
        .logs
        .iter()
        .skip(skip)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_selection(frame: &mut Frame, area: Rect, state: &AppState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let search_style = if state.roster_search_active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let search = Paragraph::new(format!("Search: {}", state.roster_search)).style(search_style);
    frame.render_widget(search, sections[0]);

    let list_area = sections[1];
    if let Some(err) = state.error(Panel::Roster) {
        let msg = Paragraph::new(err).style(Style::default().fg(Color::Red));
        frame.render_widget(msg, list_area);
        return;
    }
    if state.is_loading(Panel::Roster) {
        let msg = Paragraph::new("Loading pitchers...").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(msg, list_area);
        return;
    }

    let roster = state.filtered_roster();
    if roster.is_empty() {
        let msg = Paragraph::new("No pitchers").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(msg, list_area);
        return;
    }

    let (start, end) = visible_range(state.roster_selected, roster.len(), list_area.height as usize);
    let lines: Vec<Line> = (start..end)
        .map(|idx| {
            let name = roster[idx];
            let mut text = format!("  {name}");
            if let Some(row) = state.roster.season_row(name) {
                text = format!(
                    "  {name:<28} {:<4} ERA {:<6} SO {:<5} WHIP {}",
                    row.pos, row.era, row.strikeouts, row.whip
                );
            }
            if idx == state.roster_selected {
                Line::styled(text, Style::default().fg(Color::White).bg(Color::DarkGray))
            } else {
                Line::raw(text)
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), list_area);
}

fn render_dashboard(frame: &mut Frame, area: Rect, state: &AppState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(area);

    frame.render_widget(Paragraph::new(player_card_text(state)), sections[0]);

    let titles: Vec<&str> = DashboardTab::ALL.iter().map(|t| t.label()).collect();
    let selected = DashboardTab::ALL
        .iter()
        .position(|t| *t == state.tab)
        .unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, sections[1]);

    let body = sections[2];
    if let Some(err) = state.error(Panel::PlayerId) {
        let msg = Paragraph::new(err).style(Style::default().fg(Color::Red));
        frame.render_widget(msg, body);
        return;
    }

    match state.tab {
        DashboardTab::Games => render_games(frame, body, state),
        DashboardTab::Arsenal => render_arsenal(frame, body, state),
        DashboardTab::Counts => render_counts(frame, body, state),
        DashboardTab::Progression => render_progression(frame, body, state),
        DashboardTab::HitOutcome => render_hit_outcome(frame, body, state),
    }
}

fn player_card_text(state: &AppState) -> String {
    let Some(pitcher) = state.pitcher.as_ref() else {
        return String::new();
    };
    let id = pitcher
        .id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "…".to_string());
    let Some(season) = pitcher.season.as_ref() else {
        return format!("{}  (id {id})", pitcher.name);
    };
    let line1 = format!(
        "{}  (id {id})  {} | Year {} | Age {} | W-L {}",
        pitcher.name,
        position_label(&season.pos),
        season.year,
        season.age,
        season.record()
    );
    let line2 = season
        .headline()
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(label, value)| format!("{label} {value}"))
        .collect::<Vec<_>>()
        .join("  ");
    format!("{line1}\n{line2}")
}

/// Placeholder for a panel that is still loading or failed. Returns true when
/// something was drawn.
fn render_panel_status(frame: &mut Frame, area: Rect, state: &AppState, panel: Panel) -> bool {
    if let Some(err) = state.error(panel) {
        frame.render_widget(Paragraph::new(err).style(Style::default().fg(Color::Red)), area);
        return true;
    }
    if state.is_loading(panel) {
        let msg = format!("Loading {}...", panel.label());
        frame.render_widget(
            Paragraph::new(msg).style(Style::default().fg(Color::DarkGray)),
            area,
        );
        return true;
    }
    false
}

fn render_games(frame: &mut Frame, area: Rect, state: &AppState) {
    if render_panel_status(frame, area, state, Panel::Recent) {
        return;
    }
    if state.recent.is_empty() {
        frame.render_widget(Paragraph::new("No recent games"), area);
        return;
    }

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(24),
            Constraint::Min(30),
            Constraint::Length(40),
        ])
        .split(area);

    let games: Vec<Line> = state
        .recent
        .iter()
        .enumerate()
        .map(|(idx, game)| {
            let opponent = game.opponent.as_deref().map(team_name).unwrap_or("?");
            let text = format!(
                "{} {}",
                game.game_date.as_deref().unwrap_or(&game.game_pk),
                opponent
            );
            if idx == state.game_selected {
                Line::styled(text, Style::default().fg(Color::White).bg(Color::DarkGray))
            } else {
                Line::raw(text)
            }
        })
        .collect();
    frame.render_widget(
        Paragraph::new(games).block(Block::default().title("Games").borders(Borders::ALL)),
        cols[0],
    );

    let groups = state.game_groups();
    render_strike_zone(frame, cols[1], state);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(1)])
        .split(cols[2]);
    frame.render_widget(
        Paragraph::new(summary_text(state))
            .block(Block::default().title("Game Summary").borders(Borders::ALL)),
        side[0],
    );
    render_at_bats(frame, side[1], state, &groups);
}

fn summary_text(state: &AppState) -> String {
    let Some(summary) = state.game_summary() else {
        return String::new();
    };
    let mut lines = vec![
        format!("Strikeouts: {:<6} Walks: {}", summary.strikeouts, summary.walks),
        format!(
            "Strikes: {} ({:.1}%)  Balls: {} ({:.1}%)",
            summary.strikes, summary.strike_pct, summary.balls, summary.ball_pct
        ),
        format!("Hits: {:<12} Hit hard: {}", summary.hits, summary.hard_hit),
        format!("K:W: {:<13} Pitches: {}", summary.k_bb.to_string(), summary.pitches()),
    ];
    if let Some(status) = state.export_status.as_ref() {
        lines.push(status.clone());
    }
    lines.join("\n")
}

fn render_at_bats(frame: &mut Frame, area: Rect, state: &AppState, groups: &[AtBatGroup]) {
    let breaks = aggregate::inning_breaks(groups);
    let selected = match state.at_bat_filter {
        AtBatFilter::All => None,
        AtBatFilter::AtBat(n) => Some(n),
    };

    let mut lines: Vec<Line> = Vec::new();
    let mut selected_line = 0usize;
    for (idx, group) in groups.iter().enumerate() {
        if breaks.contains(&idx) {
            let inning = group
                .inning()
                .map(|i| i.to_string())
                .unwrap_or_else(|| "?".to_string());
            lines.push(Line::styled(
                format!("── Inning {inning} ──"),
                Style::default().fg(Color::DarkGray),
            ));
        }
        let text = format!(
            "{:>2}. {} {}",
            idx + 1,
            state.batter_name(group.batter()),
            aggregate::at_bat_label(group)
        );
        if selected == Some(group.at_bat_number) {
            selected_line = lines.len();
            lines.push(Line::styled(text, Style::default().fg(Color::White).bg(Color::Blue)));
        } else {
            lines.push(Line::raw(text));
        }
    }

    let visible = area.height.saturating_sub(2) as usize;
    let (start, end) = visible_range(selected_line, lines.len(), visible);
    let window: Vec<Line> = lines.into_iter().skip(start).take(end - start).collect();
    frame.render_widget(
        Paragraph::new(window).block(Block::default().title("At-bats").borders(Borders::ALL)),
        area,
    );
}

fn render_strike_zone(frame: &mut Frame, area: Rect, state: &AppState) {
    let filter = state.at_bat_filter;
    let canvas = ZoneCanvas::for_filter(filter);
    let scheme = state.zone_scheme;
    let series = state.zone_series();
    let markers = series.markers(canvas, scheme);
    let opacity = marker_opacity(series.len());
    let zone = series
        .mean_zone_bounds()
        .map(|(top, bot)| canvas.strike_zone_rect(top, bot));

    let mut by_category: Vec<(PitchCategory, Vec<(f64, f64)>)> = Vec::new();
    for marker in &markers {
        // Canvas y grows upward, pixel y grows downward.
        let point = (marker.x, canvas.height - marker.y);
        match by_category.iter_mut().find(|(c, _)| *c == marker.category) {
            Some((_, points)) => points.push(point),
            None => by_category.push((marker.category, vec![point])),
        }
    }

    let scope = match filter {
        AtBatFilter::All => "all at-bats".to_string(),
        AtBatFilter::AtBat(n) => format!("at-bat {n}"),
    };
    let legend = match scheme {
        ZoneScheme::Detailed => "strike/swinging/ball/bad ball/hit",
        ZoneScheme::Simple => "strike/ball/other",
    };
    let title = format!(
        "Strike zone | {scope} | {} pitches | {legend}",
        series.len()
    );
    let zone_canvas = Canvas::default()
        .block(Block::default().title(title).borders(Borders::ALL))
        .marker(symbols::Marker::Braille)
        .x_bounds([0.0, canvas.width])
        .y_bounds([0.0, canvas.height])
        .paint(|ctx| {
            if let Some((left, top, right, bottom)) = zone {
                ctx.draw(&Rectangle {
                    x: left,
                    y: canvas.height - bottom,
                    width: right - left,
                    height: bottom - top,
                    color: Color::Gray,
                });
            }
            for (category, points) in &by_category {
                let (r, g, b) = category.color(scheme).rgb;
                ctx.draw(&Points {
                    coords: points,
                    color: fade((r, g, b), opacity),
                });
            }
        });
    frame.render_widget(zone_canvas, area);
}

/// Blends a marker color toward the black background by `opacity`.
fn fade((r, g, b): (u8, u8, u8), opacity: f64) -> Color {
    let scale = |c: u8| (c as f64 * opacity).round().clamp(0.0, 255.0) as u8;
    Color::Rgb(scale(r), scale(g), scale(b))
}

fn render_arsenal(frame: &mut Frame, area: Rect, state: &AppState) {
    if render_panel_status(frame, area, state, Panel::Arsenal) {
        return;
    }
    let Some(arsenal) = state.arsenal.as_ref() else {
        frame.render_widget(Paragraph::new("No arsenal data"), area);
        return;
    };

    let header = Row::new(vec![
        "Pitch", "Velo", "BA", "SLG", "wOBA", "Hard Hit %", "K %", "Whiff %",
    ])
    .style(Style::default().add_modifier(Modifier::BOLD));
    let rows: Vec<Row> = arsenal
        .original_arsenal
        .iter()
        .map(|row| {
            let (r, g, b) = pitch_color(&row.pitch_type);
            let velo = arsenal
                .velocity_for(&row.pitch_type)
                .map(|v| format!("{v:.1} mph"))
                .unwrap_or_else(|| "N/A".to_string());
            Row::new(vec![
                Cell::from(row.pitch_name.clone()).style(Style::default().fg(Color::Rgb(r, g, b))),
                Cell::from(velo),
                Cell::from(opt_fmt(row.ba, 3)),
                Cell::from(opt_fmt(row.slg, 3)),
                Cell::from(opt_fmt(row.woba, 3)),
                Cell::from(opt_fmt(row.hard_hit_percent, 1)),
                Cell::from(opt_fmt(row.k_percent, 1)),
                Cell::from(opt_fmt(row.whiff_percent, 1)),
            ])
        })
        .collect();
    let widths = [
        Constraint::Length(20),
        Constraint::Length(11),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Length(11),
        Constraint::Length(7),
        Constraint::Length(8),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title("Arsenal").borders(Borders::ALL));
    frame.render_widget(table, area);
}

fn render_counts(frame: &mut Frame, area: Rect, state: &AppState) {
    if render_panel_status(frame, area, state, Panel::Counts) {
        return;
    }
    let Some(counts) = state.counts.as_ref() else {
        frame.render_widget(Paragraph::new("No count data"), area);
        return;
    };

    let selected = state.selected_count();
    let mut lines: Vec<Line> = Vec::new();
    let selector: Vec<Span> = counts
        .ordered_counts()
        .into_iter()
        .map(|count| {
            let style = if Some(count) == selected {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default().fg(Color::Gray)
            };
            Span::styled(format!(" {count} "), style)
        })
        .collect();
    lines.push(Line::from(selector));
    lines.push(Line::raw(""));

    let Some(count) = selected else {
        frame.render_widget(Paragraph::new(lines), area);
        return;
    };
    let bar_width = area.width.saturating_sub(48).max(10) as f64;
    for (code, data) in counts.pitches_for(count) {
        let (r, g, b) = pitch_color(code);
        let mut spans = vec![
            Span::styled("● ", Style::default().fg(Color::Rgb(r, g, b))),
            Span::raw(format!(
                "{:<20} {:>5.1}% ({:>4}) ",
                pitch_name(code),
                data.total_pitch_percentage,
                data.total_pitch_count
            )),
        ];
        if data.is_empty() {
            spans.push(Span::styled("No data", Style::default().fg(Color::DarkGray)));
        } else {
            for (pct, color, label) in [
                (data.strike_percentage, Color::Green, 'S'),
                (data.in_play_percentage, Color::Gray, 'P'),
                (data.ball_percentage, Color::Red, 'B'),
            ] {
                let cells = (pct / 100.0 * bar_width).round().max(0.0) as usize;
                let mut text = label.to_string().repeat(cells.min(1));
                text.push_str(&" ".repeat(cells.saturating_sub(1)));
                spans.push(Span::styled(text, Style::default().fg(Color::Black).bg(color)));
            }
        }
        lines.push(Line::from(spans));
    }
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().title("Pitch usage by count").borders(Borders::ALL)),
        area,
    );
}

fn render_progression(frame: &mut Frame, area: Rect, state: &AppState) {
    if render_panel_status(frame, area, state, Panel::Progression) {
        return;
    }
    if state.progression.is_empty() {
        frame.render_widget(Paragraph::new("No progression data"), area);
        return;
    }

    let mut dates: Vec<&str> = state.progression.iter().map(|r| r.game_date.as_str()).collect();
    dates.sort_unstable();
    dates.dedup();

    let series = progression_series(
        &state.progression,
        state.progression_metric,
        state.progression_pitch_type.as_deref(),
    );
    let points: Vec<(String, Vec<(f64, f64)>)> = series
        .into_iter()
        .map(|(pitch_type, values)| {
            let pts = values
                .into_iter()
                .filter_map(|(date, value)| {
                    let x = dates.iter().position(|d| *d == date)? as f64;
                    Some((x, value))
                })
                .collect();
            (pitch_type, pts)
        })
        .collect();

    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for (_, pts) in &points {
        for (_, y) in pts {
            y_min = y_min.min(*y);
            y_max = y_max.max(*y);
        }
    }
    if !y_min.is_finite() || !y_max.is_finite() {
        (y_min, y_max) = (0.0, 1.0);
    }
    let pad = ((y_max - y_min) * 0.1).max(0.5);

    let datasets: Vec<Dataset> = points
        .iter()
        .map(|(pitch_type, pts)| {
            let (r, g, b) = pitch_color(pitch_type);
            Dataset::default()
                .name(pitch_type.clone())
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(Color::Rgb(r, g, b)))
                .data(pts)
        })
        .collect();

    let x_labels: Vec<Span> = [dates.first(), dates.get(dates.len() / 2), dates.last()]
        .into_iter()
        .flatten()
        .map(|d| Span::raw(d.to_string()))
        .collect();
    let title = format!(
        "{} | {}",
        state.progression_metric.label(),
        state.progression_pitch_type.as_deref().unwrap_or("All")
    );
    let chart = Chart::new(datasets)
        .block(Block::default().title(title).borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .title("Game Date")
                .bounds([0.0, (dates.len().max(2) - 1) as f64])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(state.progression_metric.label())
                .bounds([y_min - pad, y_max + pad])
                .labels(vec![
                    Span::raw(format!("{:.1}", y_min - pad)),
                    Span::raw(format!("{:.1}", y_max + pad)),
                ]),
        );
    frame.render_widget(chart, area);
}

fn render_hit_outcome(frame: &mut Frame, area: Rect, state: &AppState) {
    if render_panel_status(frame, area, state, Panel::HitOutcome) {
        return;
    }
    let Some(outcome) = state.hit_outcome.as_ref() else {
        frame.render_widget(Paragraph::new("No hit outcome data"), area);
        return;
    };

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let points: Vec<(f64, f64)> = outcome
        .hit_outcomes
        .iter()
        .filter_map(|h| Some((h.launch_speed?, h.hit_distance_sc?)))
        .collect();
    let x_max = points.iter().map(|(x, _)| *x).fold(120.0_f64, f64::max);
    let y_max = points.iter().map(|(_, y)| *y).fold(450.0_f64, f64::max);
    let dataset = Dataset::default()
        .name("Hit Outcomes")
        .marker(symbols::Marker::Dot)
        .graph_type(GraphType::Scatter)
        .style(Style::default().fg(Color::Rgb(0x88, 0x84, 0xd8)))
        .data(&points);
    let chart = Chart::new(vec![dataset])
        .block(Block::default().title("Launch speed vs distance").borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .title("Launch Speed")
                .bounds([0.0, x_max])
                .labels(vec![Span::raw("0"), Span::raw(format!("{x_max:.0}"))]),
        )
        .y_axis(
            Axis::default()
                .title("Hit Distance")
                .bounds([0.0, y_max])
                .labels(vec![Span::raw("0"), Span::raw(format!("{y_max:.0}"))]),
        );
    frame.render_widget(chart, cols[0]);

    let s = &outcome.summary;
    let mut by_type: Vec<(&String, &f64)> = s.hits_by_type.iter().collect();
    by_type.sort_by(|a, b| a.0.cmp(b.0));
    let by_type = by_type
        .into_iter()
        .map(|(k, v)| format!("{k}: {v:.0}"))
        .collect::<Vec<_>>()
        .join(", ");
    let text = [
        format!("Total Hits: {:.0}", s.total_hits),
        format!(
            "Launch Speed: mean {:.2} | sd {:.2} | min {:.2} | max {:.2}",
            s.mean_launch_speed, s.std_dev_launch_speed, s.min_launch_speed, s.max_launch_speed
        ),
        format!(
            "Launch Angle: mean {:.2} | sd {:.2} | min {:.2} | max {:.2}",
            s.mean_launch_angle, s.std_dev_launch_angle, s.min_launch_angle, s.max_launch_angle
        ),
        format!(
            "Hit Distance: mean {:.2} | sd {:.2} | min {:.2} | max {:.2}",
            s.mean_hit_distance, s.std_dev_hit_distance, s.min_hit_distance, s.max_hit_distance
        ),
        format!("Hits by Type: {by_type}"),
    ]
    .join("\n");
    frame.render_widget(
        Paragraph::new(text)
            .wrap(ratatui::widgets::Wrap { trim: true })
            .block(Block::default().title("Summary").borders(Borders::ALL)),
        cols[1],
    );
}

fn opt_fmt(value: Option<f64>, decimals: usize) -> String {
    value
        .map(|v| format!("{v:.decimals$}"))
        .unwrap_or_else(|| "-".to_string())
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Pitch Terminal - Help",
        "",
        "Global:",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "Pitcher list:",
        "  j/k or ↑/↓   Move",
        "  Enter / d    Open dashboard",
        "  /            Search by name",
        "  r            Reload list",
        "",
        "Dashboard:",
        "  Tab          Next tab",
        "  r            Refresh pitcher data",
        "  b / Esc      Back to list",
        "  Games: j/k game, h/l at-bat, a all at-bats, c color scheme, e export .xlsx",
        "  By Count: h/l count",
        "  Progression: m metric, p pitch type",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
