//! Terminal dashboard.
//!
//! Shows the connection badge, swarm stats, the 10x10 agent grid, the
//! disaster list and the report panel, and takes slash commands for every
//! user intent.
//!
//! Launch with `rgrid` (or `rgrid --headless` to skip it).

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};

use rgrid_client::ConnectionState;
use rgrid_protocol::{
    Agent, AgentStatus, Disaster, Report, Severity, GRID_WIDTH, OFFLINE_ROLE, SWARM_SIZE,
};
use rgrid_state::{grid_view, AgentFilter, DisasterFilter, Stats};

use crate::dashboard::{ActivationState, Dashboard};

/// Console output lines kept in memory.
const MAX_MESSAGES: usize = 500;

/// Everything one frame needs, read under a single store lock.
struct ConsoleSnapshot {
    connection: ConnectionState,
    activation: ActivationState,
    simulation: bool,
    stats: Stats,
    reporting: usize,
    grid: Vec<Agent>,
    agent_filter: AgentFilter,
    disaster_filter: DisasterFilter,
    disasters: Vec<Disaster>,
    total_disasters: usize,
    reports: Vec<Report>,
    selected_agent: Option<Agent>,
}

struct Console<'a> {
    dashboard: &'a mut Dashboard,
    input: String,
    /// Cursor position in chars.
    cursor_pos: usize,
    history: Vec<String>,
    history_pos: Option<usize>,
    /// Id of the report being read. None follows the newest.
    selected_report: Option<String>,
    report_scroll: u16,
    console_messages: Vec<(chrono::DateTime<chrono::Utc>, String, Color)>,
}

impl<'a> Console<'a> {
    fn new(dashboard: &'a mut Dashboard) -> Self {
        let mut console = Self {
            dashboard,
            input: String::new(),
            cursor_pos: 0,
            history: Vec::new(),
            history_pos: None,
            selected_report: None,
            report_scroll: 0,
            console_messages: Vec::new(),
        };
        console.add_message("ResilienceGrid dashboard ready.", Color::Cyan);
        console.add_message(
            "Commands: /activate, /filter, /disasters, /disaster, /report, /read, /select, /status, /help, /quit",
            Color::DarkGray,
        );
        console
    }

    async fn snapshot(&self) -> ConsoleSnapshot {
        let store = self.dashboard.store().read().await;
        let disaster_filter = self.dashboard.disaster_filter();

        ConsoleSnapshot {
            connection: self.dashboard.connection_state(),
            activation: self.dashboard.activation_state().await,
            simulation: self.dashboard.is_simulation(),
            stats: store.stats(),
            reporting: store.agents().len(),
            grid: grid_view(store.agents()),
            agent_filter: self.dashboard.agent_filter(),
            disaster_filter,
            disasters: disaster_filter
                .apply(store.active_disasters())
                .into_iter()
                .cloned()
                .collect(),
            total_disasters: store.active_disasters().len(),
            reports: store.reports().to_vec(),
            selected_agent: store.selected_agent().cloned(),
        }
    }

    async fn process_input(&mut self) {
        let input = self.input.trim().to_string();
        if input.is_empty() {
            return;
        }

        self.history.push(input.clone());
        self.history_pos = None;

        if input.starts_with('/') {
            self.process_command(&input).await;
        } else {
            self.add_message("Commands start with '/'. Try /help.", Color::Yellow);
        }

        self.input.clear();
        self.cursor_pos = 0;
    }

    async fn process_command(&mut self, cmd: &str) {
        let mut parts = cmd.splitn(2, ' ');
        let command = parts.next().unwrap_or_default();
        let args = parts.next().unwrap_or("").trim();

        match command {
            "/help" => {
                self.add_message("Available commands:", Color::Cyan);
                for line in [
                    "  /activate                 - Activate the swarm",
                    "  /filter <all|active|alert|processing>",
                    "  /disasters <all|fire|flood|earthquake|other>",
                    "  /disaster <lat> <lng>     - Drop a disaster marker",
                    "  /report                   - Generate a situation report",
                    "  /read <n>                 - Show report n (1 = newest)",
                    "  /select <id>              - Inspect an agent, e.g. A005",
                    "  /status                   - Connection and swarm status",
                    "  /quit                     - Exit",
                ] {
                    self.add_message(line, Color::White);
                }
            }
            "/activate" => {
                if self.dashboard.activate_swarm().await {
                    self.add_message("Swarm activation requested.", Color::Green);
                } else {
                    let state = self.dashboard.activation_state().await;
                    self.add_message(
                        &format!("Activation not started: swarm is already {}.", state.label()),
                        Color::Yellow,
                    );
                }
            }
            "/filter" => match args.parse::<AgentFilter>() {
                Ok(filter) => {
                    self.dashboard.set_filter(filter);
                    self.add_message(&format!("Agent filter: {}", filter.label()), Color::Cyan);
                }
                Err(e) => self.add_message(&e, Color::Red),
            },
            "/disasters" => match args.parse::<DisasterFilter>() {
                Ok(filter) => {
                    self.dashboard.set_disaster_filter(filter);
                    self.add_message(&format!("Disaster filter: {}", filter.label()), Color::Cyan);
                }
                Err(e) => self.add_message(&e, Color::Red),
            },
            "/disaster" => match parse_coordinates(args) {
                Ok((lat, lng)) => {
                    let d = self.dashboard.add_disaster_at(lat, lng).await;
                    self.add_message(
                        &format!(
                            "Added {} {} ({}) at {:.4}, {:.4}",
                            d.id,
                            d.kind.as_str(),
                            d.severity.as_str(),
                            lat,
                            lng
                        ),
                        Color::Green,
                    );
                }
                Err(e) => self.add_message(&e, Color::Red),
            },
            "/report" => {
                let report = self.dashboard.generate_report().await;
                self.selected_report = Some(report.id.clone());
                self.report_scroll = 0;
                self.add_message(&format!("Generated '{}'", report.title), Color::Green);
            }
            "/read" => match args.parse::<usize>() {
                Ok(n) if n >= 1 => {
                    let store = self.dashboard.store().read().await;
                    let count = store.reports().len();
                    let picked = store.reports().get(n - 1).map(|r| r.id.clone());
                    drop(store);
                    match picked {
                        Some(id) => {
                            self.selected_report = Some(id);
                            self.report_scroll = 0;
                        }
                        None => self.add_message(&format!("Only {count} reports."), Color::Red),
                    }
                }
                _ => self.add_message("Usage: /read <n>", Color::Red),
            },
            "/select" => {
                if args.is_empty() {
                    self.dashboard.clear_selection().await;
                    self.add_message("Selection cleared.", Color::DarkGray);
                } else {
                    let id = args.to_ascii_uppercase();
                    match self.dashboard.select_agent(&id).await {
                        Some(agent) => self.add_message(
                            &format!(
                                "Selected {} ({}) status {}",
                                agent.id,
                                agent.role,
                                agent.status
                            ),
                            status_color(&agent),
                        ),
                        None => self.add_message(&format!("No agent {id} in the grid."), Color::Red),
                    }
                }
            }
            "/status" => {
                let snap = self.snapshot().await;
                let lines = vec![
                    format!("  Connection: {}", connection_label(&snap.connection)),
                    format!("  Activation: {}", snap.activation.label()),
                    format!("  Agents reporting: {}/{}", snap.reporting, SWARM_SIZE),
                    format!("  Active: {}  Alerts: {}", snap.stats.active, snap.stats.alerts),
                    format!("  Throughput: {:.0} ops/m", snap.stats.throughput),
                    format!("  Disasters: {}", snap.total_disasters),
                    format!("  Reports: {}", snap.reports.len()),
                ];
                self.add_message("Swarm status:", Color::Cyan);
                for line in lines {
                    self.add_message(&line, Color::White);
                }
            }
            _ => {
                self.add_message(&format!("Unknown command: {command}"), Color::Red);
            }
        }
    }

    fn add_message(&mut self, msg: &str, color: Color) {
        self.console_messages
            .push((chrono::Utc::now(), msg.to_string(), color));
        if self.console_messages.len() > MAX_MESSAGES {
            self.console_messages.remove(0);
        }
    }

    fn render(&self, frame: &mut Frame, snap: &ConsoleSnapshot) {
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(12),
                Constraint::Length(5),
            ])
            .split(frame.area());

        self.render_status_bar(frame, outer[0], snap);
        self.render_main_area(frame, outer[1], snap);
        self.render_input(frame, outer[2]);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect, snap: &ConsoleSnapshot) {
        let title = if snap.simulation {
            " ResilienceGrid Swarm Monitor [simulation] "
        } else {
            " ResilienceGrid Swarm Monitor "
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let line = Line::from(vec![
            Span::styled("  ", Style::default()),
            Span::styled(
                format!(" {} ", connection_label(&snap.connection)),
                Style::default()
                    .fg(Color::Black)
                    .bg(connection_color(&snap.connection))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  |  Swarm: ", Style::default().fg(Color::Gray)),
            Span::styled(snap.activation.label(), Style::default().fg(activation_color(snap.activation))),
            Span::styled("  |  Active: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}/{}", snap.stats.active, SWARM_SIZE),
                Style::default().fg(Color::Green),
            ),
            Span::styled("  |  Alerts: ", Style::default().fg(Color::Gray)),
            Span::styled(snap.stats.alerts.to_string(), Style::default().fg(Color::Red)),
            Span::styled("  |  Throughput: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{:.0} ops/m", snap.stats.throughput),
                Style::default().fg(Color::Magenta),
            ),
        ]);

        frame.render_widget(Paragraph::new(line).block(block), area);
    }

    fn render_main_area(&self, frame: &mut Frame, area: Rect, snap: &ConsoleSnapshot) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(area);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(16), Constraint::Min(4)])
            .split(columns[0]);
        self.render_grid(frame, left[0], snap);
        self.render_console_output(frame, left[1]);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(8), Constraint::Min(6)])
            .split(columns[1]);
        self.render_disasters(frame, right[0], snap);
        self.render_reports(frame, right[1], snap);
    }

    fn render_grid(&self, frame: &mut Frame, area: Rect, snap: &ConsoleSnapshot) {
        let block = Block::default()
            .title(" Agent Swarm ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::LightBlue));

        let mut tabs = vec![Span::styled("  Filter: ", Style::default().fg(Color::Gray))];
        for filter in AgentFilter::ALL {
            let style = if filter == snap.agent_filter {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            tabs.push(Span::styled(format!(" {} ", filter.label()), style));
            tabs.push(Span::raw(" "));
        }

        let mut lines = vec![Line::from(tabs), Line::from("")];
        for row in snap.grid.chunks(GRID_WIDTH) {
            let mut spans = vec![Span::raw("  ")];
            for agent in row {
                let selected = snap
                    .selected_agent
                    .as_ref()
                    .is_some_and(|s| s.id == agent.id);
                let mut style = if snap.agent_filter.matches(agent) {
                    Style::default().fg(status_color(agent))
                } else {
                    Style::default().fg(Color::Rgb(60, 60, 60))
                };
                if selected {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                spans.push(Span::styled(short_id(&agent.id), style));
                spans.push(Span::raw(" "));
            }
            lines.push(Line::from(spans));
        }

        lines.push(Line::from(""));
        lines.push(match &snap.selected_agent {
            Some(agent) => Line::from(vec![
                Span::styled("  Selected: ", Style::default().fg(Color::Gray)),
                Span::styled(
                    format!("{} {} ({})", agent.id, agent.role, agent.status),
                    Style::default().fg(status_color(agent)),
                ),
                Span::styled(
                    format!("  last ping {}", format_ping(agent.last_ping)),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            None => Line::from(Span::styled(
                format!("  {} of {} agents reporting", snap.reporting, SWARM_SIZE),
                Style::default().fg(Color::DarkGray),
            )),
        });

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_disasters(&self, frame: &mut Frame, area: Rect, snap: &ConsoleSnapshot) {
        let block = Block::default()
            .title(format!(
                " Disasters ({} of {}, filter: {}) ",
                snap.disasters.len(),
                snap.total_disasters,
                snap.disaster_filter.label()
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red));

        let inner_height = area.height.saturating_sub(2) as usize;
        if snap.disasters.is_empty() {
            let text = Paragraph::new(Line::from(Span::styled(
                "  No active disasters",
                Style::default().fg(Color::DarkGray),
            )))
            .block(block);
            frame.render_widget(text, area);
            return;
        }

        let start = snap.disasters.len().saturating_sub(inner_height);
        let lines: Vec<Line> = snap.disasters[start..]
            .iter()
            .map(|d| {
                Line::from(vec![
                    Span::styled(format!("  {:<16}", d.id), Style::default().fg(Color::White)),
                    Span::styled(format!("{:<11}", d.kind.as_str()), Style::default().fg(Color::Yellow)),
                    Span::styled(
                        format!("{:<9}", d.severity.as_str()),
                        Style::default().fg(severity_color(d)),
                    ),
                    Span::styled(
                        format!("{:>9.4}, {:>9.4}", d.location.lat, d.location.lng),
                        Style::default().fg(Color::Gray),
                    ),
                    Span::styled(
                        d.affected_area
                            .map(|a| format!("  {a:.0} km"))
                            .unwrap_or_default(),
                        Style::default().fg(Color::DarkGray),
                    ),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_reports(&self, frame: &mut Frame, area: Rect, snap: &ConsoleSnapshot) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(34), Constraint::Min(20)])
            .split(area);

        let list_block = Block::default()
            .title(" Reports ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green));
        let selected = self.report_position(&snap.reports);
        let list: Vec<Line> = snap
            .reports
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let style = if i == selected {
                    Style::default().fg(Color::Black).bg(Color::Green)
                } else {
                    Style::default().fg(Color::Gray)
                };
                Line::from(Span::styled(
                    format!("{:>2}. {} {}", i + 1, r.timestamp.format("%H:%M:%S"), r.title),
                    style,
                ))
            })
            .collect();
        frame.render_widget(Paragraph::new(list).block(list_block), columns[0]);

        let body_block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green));
        let body = match snap.reports.get(selected) {
            Some(report) => {
                let mut lines = vec![
                    Line::from(Span::styled(
                        report.title.clone(),
                        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        format!("Generated: {}", report.timestamp.format("%Y-%m-%d %H:%M:%S UTC")),
                        Style::default().fg(Color::DarkGray),
                    )),
                    Line::from(""),
                ];
                lines.extend(report_lines(&report.content));
                Paragraph::new(lines)
                    .block(body_block.title(" Report "))
                    .wrap(Wrap { trim: false })
                    .scroll((self.report_scroll, 0))
            }
            None => Paragraph::new("  No reports yet").block(body_block.title(" Report ")),
        };
        frame.render_widget(body, columns[1]);
    }

    /// Position of the report being read. Falls back to the newest when the
    /// selected id is gone.
    fn report_position(&self, reports: &[Report]) -> usize {
        self.selected_report
            .as_deref()
            .and_then(|id| reports.iter().position(|r| r.id == id))
            .unwrap_or(0)
    }

    fn render_console_output(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Console Output ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White));

        let inner_height = area.height.saturating_sub(2) as usize;
        let start = self.console_messages.len().saturating_sub(inner_height);
        let lines: Vec<Line> = self.console_messages[start..]
            .iter()
            .map(|(ts, msg, color)| {
                Line::from(vec![
                    Span::styled(
                        format!("  [{}] ", ts.format("%H:%M:%S")),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(msg.as_str(), Style::default().fg(*color)),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_input(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Command (/help for commands, /quit to exit) ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green));

        let input_display = if self.input.is_empty() {
            Line::from(vec![
                Span::styled("  > ", Style::default().fg(Color::Green)),
                Span::styled("/activate, /disaster <lat> <lng>, /report ...", Style::default().fg(Color::DarkGray)),
            ])
        } else {
            Line::from(vec![
                Span::styled("  > ", Style::default().fg(Color::Green)),
                Span::styled(&self.input, Style::default().fg(Color::White)),
            ])
        };

        let hint_line = Line::from(Span::styled(
            "  Ctrl+C to exit  |  Up/Down for history  |  PgUp/PgDn scroll report",
            Style::default().fg(Color::DarkGray),
        ));

        frame.render_widget(
            Paragraph::new(vec![Line::from(""), input_display, hint_line]).block(block),
            area,
        );

        let cursor_x = area.x + 4 + self.cursor_pos as u16;
        frame.set_cursor_position((cursor_x, area.y + 2));
    }

    fn byte_pos(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.cursor_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }

    /// Returns `true` if the console should exit.
    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        let len = self.input.chars().count();
        match (code, modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => return true,
            (KeyCode::Char(c), _) => {
                let at = self.byte_pos();
                self.input.insert(at, c);
                self.cursor_pos += 1;
            }
            (KeyCode::Backspace, _) if self.cursor_pos > 0 => {
                self.cursor_pos -= 1;
                let at = self.byte_pos();
                self.input.remove(at);
            }
            (KeyCode::Delete, _) if self.cursor_pos < len => {
                let at = self.byte_pos();
                self.input.remove(at);
            }
            (KeyCode::Left, _) => self.cursor_pos = self.cursor_pos.saturating_sub(1),
            (KeyCode::Right, _) => self.cursor_pos = (self.cursor_pos + 1).min(len),
            (KeyCode::Home, _) => self.cursor_pos = 0,
            (KeyCode::End, _) => self.cursor_pos = len,
            (KeyCode::Up, _) if !self.history.is_empty() => {
                let pos = match self.history_pos {
                    Some(p) => p.saturating_sub(1),
                    None => self.history.len() - 1,
                };
                self.history_pos = Some(pos);
                self.input = self.history[pos].clone();
                self.cursor_pos = self.input.chars().count();
            }
            (KeyCode::Down, _) => {
                if let Some(pos) = self.history_pos {
                    if pos + 1 < self.history.len() {
                        self.history_pos = Some(pos + 1);
                        self.input = self.history[pos + 1].clone();
                    } else {
                        self.history_pos = None;
                        self.input.clear();
                    }
                    self.cursor_pos = self.input.chars().count();
                }
            }
            (KeyCode::PageUp, _) => self.report_scroll = self.report_scroll.saturating_sub(5),
            (KeyCode::PageDown, _) => self.report_scroll = self.report_scroll.saturating_add(5),
            _ => {}
        }
        false
    }
}

/// Parse `<lat> <lng>` in degrees.
fn parse_coordinates(args: &str) -> Result<(f64, f64), String> {
    let mut parts = args.split(|c: char| c == ',' || c.is_whitespace()).filter(|s| !s.is_empty());
    let (Some(lat), Some(lng), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err("Usage: /disaster <lat> <lng>".to_string());
    };
    let lat: f64 = lat.parse().map_err(|_| format!("Invalid latitude '{lat}'"))?;
    let lng: f64 = lng.parse().map_err(|_| format!("Invalid longitude '{lng}'"))?;
    if !(-90.0..=90.0).contains(&lat) {
        return Err(format!("Latitude {lat} out of range"));
    }
    if !(-180.0..=180.0).contains(&lng) {
        return Err(format!("Longitude {lng} out of range"));
    }
    Ok((lat, lng))
}

/// "A005" -> "005".
fn short_id(id: &str) -> &str {
    id.strip_prefix('A').unwrap_or(id)
}

fn format_ping(last_ping: i64) -> String {
    if last_ping <= 0 {
        return "never".to_string();
    }
    chrono::DateTime::from_timestamp_millis(last_ping)
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string())
}

/// Style report text: `#` headings, `##` sections, `-` bullets.
fn report_lines(content: &str) -> Vec<Line<'static>> {
    content
        .lines()
        .map(|line| {
            if let Some(rest) = line.strip_prefix("# ") {
                Line::from(Span::styled(
                    rest.to_string(),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ))
            } else if let Some(rest) = line.strip_prefix("## ") {
                Line::from(Span::styled(
                    rest.to_string(),
                    Style::default().fg(Color::LightBlue).add_modifier(Modifier::BOLD),
                ))
            } else if let Some(rest) = line.strip_prefix("- ") {
                Line::from(vec![
                    Span::styled("  • ", Style::default().fg(Color::DarkGray)),
                    Span::styled(rest.to_string(), Style::default().fg(Color::White)),
                ])
            } else {
                Line::from(Span::styled(line.to_string(), Style::default().fg(Color::Gray)))
            }
        })
        .collect()
}

fn connection_label(state: &ConnectionState) -> String {
    match state {
        ConnectionState::Connecting { attempt } if *attempt > 1 => {
            format!("CONNECTING (attempt {attempt})")
        }
        other => other.label().to_ascii_uppercase(),
    }
}

fn connection_color(state: &ConnectionState) -> Color {
    match state {
        ConnectionState::Connected => Color::Green,
        ConnectionState::Connecting { .. } => Color::Yellow,
        ConnectionState::Disconnected => Color::Red,
    }
}

fn activation_color(state: ActivationState) -> Color {
    match state {
        ActivationState::Idle => Color::Gray,
        ActivationState::Activating => Color::Yellow,
        ActivationState::Activated => Color::Green,
    }
}

fn status_color(agent: &Agent) -> Color {
    if agent.role == OFFLINE_ROLE {
        return Color::DarkGray;
    }
    match agent.status {
        AgentStatus::Active => Color::Green,
        AgentStatus::Alert => Color::Red,
        AgentStatus::Processing => Color::Yellow,
        AgentStatus::Error => Color::Magenta,
        AgentStatus::Idle => Color::Gray,
    }
}

fn severity_color(disaster: &Disaster) -> Color {
    match disaster.severity {
        Severity::Low => Color::Green,
        Severity::Medium => Color::Yellow,
        Severity::High => Color::LightRed,
        Severity::Critical => Color::Red,
    }
}

/// Enter raw mode on the alternate screen.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

/// Leave raw mode and the alternate screen.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the dashboard console until the operator quits.
pub async fn run_console(dashboard: &mut Dashboard) -> Result<(), anyhow::Error> {
    use std::io::IsTerminal;
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        return Err(anyhow::anyhow!(
            "The dashboard console requires a terminal (TTY); use --headless instead."
        ));
    }

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let mut terminal = setup_terminal()?;
    let mut console = Console::new(dashboard);
    let tick_rate = Duration::from_millis(100);

    let result = async {
        loop {
            let snapshot = console.snapshot().await;
            terminal.draw(|frame| console.render(frame, &snapshot))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if key.code == KeyCode::Enter {
                        let trimmed = console.input.trim();
                        if matches!(trimmed, "/quit" | "/exit" | "/q") {
                            break;
                        }
                        console.process_input().await;
                    } else if console.handle_key(key.code, key.modifiers) {
                        break;
                    }
                }
            }
        }
        Ok::<(), anyhow::Error>(())
    }
    .await;

    restore_terminal(&mut terminal)?;
    result
}
