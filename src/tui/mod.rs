// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! The interactive shell (ratatui + crossterm) around [`HistoryBrowser`]: a
//! commit table with a cell-level graph column, filter prompts, and a context
//! menu fed by the action resolver. Engine calls run on the tokio blocking
//! pool and post their results back through a channel; the UI loop drains it
//! every tick, so the browser model is only ever touched here.
//!
//! The graph column is a character-cell projection of the same per-row edge
//! sets the raster renderer consumes; `--export` produces the authoritative
//! pixel rendering.

use std::{
    error::Error,
    io,
    sync::Arc,
    time::{Duration, Instant},
};

use chrono::NaiveDate;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table,
        TableState, Wrap},
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::actions::{ActionIcon, ActionKind, ResolvedAction};
use crate::browser::{
    dispatch_action, ActionFollowUp, ActionInput, ActionOutcome, BrowserPhase, HistoryBrowser,
};
use crate::history::CommitFilter;
use crate::model::{CommitId, CommitRecord, EdgeShape, RefLabel};
use crate::render::{GraphGeometry, LanePalette};
use crate::repo::{ChangeSet, MemoryRepository, RepoError, Repository};

mod theme;

use theme::TuiTheme;

const TICK: Duration = Duration::from_millis(250);
const TOAST_TTL: Duration = Duration::from_secs(5);
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Runs the TUI against the built-in demo engine.
pub fn run_demo() -> Result<(), Box<dyn Error>> {
    run_with_repository(Arc::new(MemoryRepository::demo()), LanePalette::default())
}

pub fn run_with_repository(
    repo: Arc<dyn Repository>,
    palette: LanePalette,
) -> Result<(), Box<dyn Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(repo, palette, runtime.handle().clone());
    app.start_refresh();

    while !app.should_quit {
        app.drain_engine_events();
        app.expire_toast();
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }
    }

    Ok(())
}

/// Raw-mode + alternate-screen guard around the ratatui terminal.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err);
        }
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;
        Ok(Self { terminal })
    }

    fn draw(&mut self, render: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(render)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Completion of an engine call started on the blocking pool.
enum EngineEvent {
    RefreshDone(Result<Vec<CommitRecord>, RepoError>),
    ActionDone(Result<ActionOutcome, RepoError>),
}

enum Mode {
    Browse,
    Menu {
        actions: Vec<ResolvedAction>,
        state: ListState,
    },
    Prompt {
        purpose: Prompt,
        buffer: String,
    },
    Changes(ChangeSet),
}

#[derive(Clone)]
enum Prompt {
    FilterText,
    FilterStart,
    FilterEnd,
    ActionName { kind: ActionKind, title: String },
    ActionLayer { kind: ActionKind, hint: String },
}

struct App {
    repo: Arc<dyn Repository>,
    runtime: tokio::runtime::Handle,
    events_tx: UnboundedSender<EngineEvent>,
    events_rx: UnboundedReceiver<EngineEvent>,
    browser: HistoryBrowser,
    theme: TuiTheme,
    mode: Mode,
    table_state: TableState,
    cursor: usize,
    picked: Vec<CommitId>,
    filter_text: String,
    filter_start: Option<NaiveDate>,
    filter_end: Option<NaiveDate>,
    toast: Option<(String, Instant)>,
    should_quit: bool,
}

impl App {
    fn new(repo: Arc<dyn Repository>, palette: LanePalette, runtime: tokio::runtime::Handle) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let theme = TuiTheme::from_palette(&palette);
        Self {
            repo,
            runtime,
            events_tx,
            events_rx,
            browser: HistoryBrowser::new(GraphGeometry::default(), palette),
            theme,
            mode: Mode::Browse,
            table_state: TableState::default(),
            cursor: 0,
            picked: Vec::new(),
            filter_text: String::new(),
            filter_start: None,
            filter_end: None,
            toast: None,
            should_quit: false,
        }
    }

    fn start_refresh(&mut self) {
        self.browser.begin_refresh();
        let repo = Arc::clone(&self.repo);
        let tx = self.events_tx.clone();
        self.runtime.spawn_blocking(move || {
            let _ = tx.send(EngineEvent::RefreshDone(repo.list_commits()));
        });
    }

    fn start_action(&mut self, kind: ActionKind, input: ActionInput) {
        self.browser.begin_action();
        let repo = Arc::clone(&self.repo);
        let tx = self.events_tx.clone();
        self.runtime.spawn_blocking(move || {
            let result = dispatch_action(repo.as_ref(), &kind, &input);
            let _ = tx.send(EngineEvent::ActionDone(result));
        });
    }

    fn drain_engine_events(&mut self) {
        while let Ok(engine_event) = self.events_rx.try_recv() {
            match engine_event {
                EngineEvent::RefreshDone(result) => {
                    self.browser.complete_refresh(result);
                    let error = self.browser.last_error().map(str::to_owned);
                    if let Some(message) = error {
                        self.set_toast(message);
                    }
                    let browser = &self.browser;
                    self.picked
                        .retain(|id| browser.model().lookup(id).is_ok());
                    self.clamp_cursor();
                }
                EngineEvent::ActionDone(result) => match self.browser.complete_action(result) {
                    ActionFollowUp::ShowChanges(changes) => {
                        self.mode = Mode::Changes(changes);
                    }
                    ActionFollowUp::RefreshRequired { message } => {
                        self.set_toast(message);
                        self.start_refresh();
                    }
                    ActionFollowUp::Failed { message } => {
                        self.set_toast(message);
                    }
                },
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match self.mode {
            Mode::Browse => self.handle_browse_key(key),
            Mode::Menu { .. } => self.handle_menu_key(key),
            Mode::Prompt { .. } => self.handle_prompt_key(key),
            Mode::Changes(_) => self.handle_changes_key(key),
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc => self.clear_picks(),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::Char('g') => self.cursor = 0,
            KeyCode::Char('G') => {
                self.cursor = self.visible_rows().len().saturating_sub(1);
            }
            KeyCode::Char(' ') => self.toggle_pick(),
            KeyCode::Enter | KeyCode::Char('m') => self.open_menu(),
            KeyCode::Char('r') => {
                if !self.engine_busy() {
                    self.start_refresh();
                }
            }
            KeyCode::Char('/') => {
                self.mode = Mode::Prompt {
                    purpose: Prompt::FilterText,
                    buffer: self.filter_text.clone(),
                };
            }
            KeyCode::Char('s') => {
                self.mode = Mode::Prompt {
                    purpose: Prompt::FilterStart,
                    buffer: date_buffer(self.filter_start),
                };
            }
            KeyCode::Char('e') => {
                self.mode = Mode::Prompt {
                    purpose: Prompt::FilterEnd,
                    buffer: date_buffer(self.filter_end),
                };
            }
            KeyCode::Char('c') => {
                self.filter_text.clear();
                self.filter_start = None;
                self.filter_end = None;
                self.apply_filter();
                self.set_toast("Filter cleared");
            }
            KeyCode::Char('y') => self.copy_commit_id(),
            _ => {}
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        let Mode::Menu { actions, state } = &mut self.mode else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.mode = Mode::Browse,
            KeyCode::Up | KeyCode::Char('k') => {
                let at = state.selected().unwrap_or(0);
                state.select(Some(at.saturating_sub(1)));
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let at = state.selected().unwrap_or(0);
                state.select(Some((at + 1).min(actions.len().saturating_sub(1))));
            }
            KeyCode::Enter => {
                let chosen = state
                    .selected()
                    .and_then(|at| actions.get(at))
                    .cloned();
                self.mode = Mode::Browse;
                if let Some(action) = chosen {
                    self.launch_action(action);
                }
            }
            _ => {}
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        let Mode::Prompt { purpose, buffer } = &mut self.mode else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.mode = Mode::Browse,
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(ch) => buffer.push(ch),
            KeyCode::Enter => {
                let purpose = purpose.clone();
                let entered = buffer.clone();
                self.mode = Mode::Browse;
                self.submit_prompt(purpose, entered);
            }
            _ => {}
        }
    }

    fn handle_changes_key(&mut self, key: KeyEvent) {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')
        ) {
            self.mode = Mode::Browse;
        }
    }

    fn submit_prompt(&mut self, purpose: Prompt, entered: String) {
        match purpose {
            Prompt::FilterText => {
                self.filter_text = entered;
                self.apply_filter();
            }
            Prompt::FilterStart => match parse_filter_date(&entered) {
                Ok(date) => {
                    self.filter_start = date;
                    self.apply_filter();
                }
                Err(message) => self.set_toast(message),
            },
            Prompt::FilterEnd => match parse_filter_date(&entered) {
                Ok(date) => {
                    self.filter_end = date;
                    self.apply_filter();
                }
                Err(message) => self.set_toast(message),
            },
            Prompt::ActionName { kind, .. } => {
                self.start_action(kind, ActionInput::Name(entered.trim().to_owned()));
            }
            Prompt::ActionLayer { kind, .. } => {
                let trimmed = entered.trim();
                let layer = if trimmed.is_empty() || trimmed == "*" {
                    None
                } else {
                    Some(trimmed.to_owned())
                };
                self.start_action(kind, ActionInput::Layer(layer));
            }
        }
    }

    fn launch_action(&mut self, action: ResolvedAction) {
        match action.kind {
            ActionKind::CreateBranchAt { .. } => {
                self.mode = Mode::Prompt {
                    purpose: Prompt::ActionName {
                        kind: action.kind,
                        title: "Name of branch to create".to_owned(),
                    },
                    buffer: String::new(),
                };
            }
            ActionKind::CreateTagAt { .. } => {
                self.mode = Mode::Prompt {
                    purpose: Prompt::ActionName {
                        kind: action.kind,
                        title: "Name of tag to create".to_owned(),
                    },
                    buffer: String::new(),
                };
            }
            ActionKind::RestoreWorkingLayers { .. } => match self.repo.working_layers() {
                Ok(layers) => {
                    self.mode = Mode::Prompt {
                        purpose: Prompt::ActionLayer {
                            kind: action.kind,
                            hint: format!("Layer to restore, empty = all ({})", layers.join(", ")),
                        },
                        buffer: String::new(),
                    };
                }
                Err(err) => self.set_toast(err.to_string()),
            },
            kind => self.start_action(kind, ActionInput::None),
        }
    }

    fn open_menu(&mut self) {
        if self.browser.phase() != BrowserPhase::Ready {
            return;
        }
        let ids = if self.picked.is_empty() {
            match self.cursor_commit_id() {
                Some(id) => vec![id],
                None => return,
            }
        } else {
            self.picked.clone()
        };

        self.browser.set_selection(ids);
        let actions = self.browser.resolve_actions();
        if actions.is_empty() {
            self.set_toast("No actions for this selection");
            return;
        }

        let mut state = ListState::default();
        state.select(Some(0));
        self.mode = Mode::Menu { actions, state };
    }

    fn apply_filter(&mut self) {
        self.browser.set_filter(CommitFilter::new(
            &self.filter_text,
            self.filter_start.unwrap_or(NaiveDate::MIN),
            self.filter_end.unwrap_or(NaiveDate::MAX),
        ));
        self.clamp_cursor();
    }

    fn visible_rows(&self) -> Vec<usize> {
        self.browser.model().visible_indices().collect()
    }

    fn clamp_cursor(&mut self) {
        let visible = self.visible_rows().len();
        if visible == 0 {
            self.cursor = 0;
        } else if self.cursor >= visible {
            self.cursor = visible - 1;
        }
    }

    fn move_cursor(&mut self, delta: i64) {
        let visible = self.visible_rows().len();
        if visible == 0 {
            return;
        }
        let at = self.cursor as i64 + delta;
        self.cursor = at.clamp(0, visible as i64 - 1) as usize;
    }

    fn cursor_record(&self) -> Option<&CommitRecord> {
        let row = *self.visible_rows().get(self.cursor)?;
        self.browser.model().record(row)
    }

    fn cursor_commit_id(&self) -> Option<CommitId> {
        self.cursor_record().map(|record| record.id().clone())
    }

    fn toggle_pick(&mut self) {
        let Some(id) = self.cursor_commit_id() else {
            return;
        };
        if let Some(at) = self.picked.iter().position(|picked| picked == &id) {
            self.picked.remove(at);
        } else {
            self.picked.push(id);
        }
    }

    fn clear_picks(&mut self) {
        self.picked.clear();
        self.browser.clear_selection();
    }

    fn copy_commit_id(&mut self) {
        let Some(id) = self.cursor_commit_id() else {
            return;
        };
        match copy_to_clipboard(id.as_str()) {
            Ok(via) => self.set_toast(format!("Copied {} ({via})", id.abbreviated())),
            Err(err) => self.set_toast(format!("Copy failed: {err}")),
        }
    }

    fn engine_busy(&self) -> bool {
        matches!(
            self.browser.phase(),
            BrowserPhase::Loading | BrowserPhase::ActionInFlight
        )
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some((message.into(), Instant::now()));
    }

    fn expire_toast(&mut self) {
        if let Some((_, shown_at)) = &self.toast {
            if shown_at.elapsed() > TOAST_TTL {
                self.toast = None;
            }
        }
    }

    fn filter_summary(&self) -> Option<String> {
        let mut parts = Vec::new();
        if !self.filter_text.trim().is_empty() {
            parts.push(format!("text '{}'", self.filter_text.trim()));
        }
        if let Some(start) = self.filter_start {
            parts.push(format!("after {start}"));
        }
        if let Some(end) = self.filter_end {
            parts.push(format!("before {end}"));
        }
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

fn date_buffer(date: Option<NaiveDate>) -> String {
    date.map(|date| date.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

fn parse_filter_date(entered: &str) -> Result<Option<NaiveDate>, String> {
    let trimmed = entered.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map(Some)
        .map_err(|_| format!("Invalid date '{trimmed}' (expected YYYY-MM-DD)"))
}

fn copy_to_clipboard(text: &str) -> Result<&'static str, String> {
    let mut stdout = io::stdout();
    execute!(stdout, Print(osc52_sequence(text))).map_err(|err| err.to_string())?;
    Ok("osc52")
}

fn osc52_sequence(text: &str) -> String {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;

    let encoded = STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x1b\\")
}

/// Two character cells per lane: the lane position itself (node or vertical)
/// and the half-lane slot to its right, where diagonals cross. The node cell
/// is colored like its raster counterpart.
fn graph_cell(theme: &TuiTheme, record: &CommitRecord, lane_count: usize) -> Line<'static> {
    let row = record.graph();
    let above = row.above();
    let below = row.below();
    let has =
        |edges: &crate::model::EdgeSet, shape: EdgeShape, lane: u16| edges.lanes(shape).contains(&lane);

    let mut spans = Vec::with_capacity(lane_count * 2);
    for lane in 0..lane_count as u16 {
        let (glyph, style) = if lane == row.lane() {
            ("●", Style::default().fg(theme.lane_color(usize::from(lane))))
        } else if has(above, EdgeShape::Vertical, lane) && has(below, EdgeShape::Vertical, lane) {
            ("│", theme.base_style())
        } else if has(above, EdgeShape::Vertical, lane) {
            ("╵", theme.base_style())
        } else if has(below, EdgeShape::Vertical, lane) {
            ("╷", theme.base_style())
        } else {
            (" ", theme.base_style())
        };
        spans.push(Span::styled(glyph.to_owned(), style));

        let left_leaning = has(above, EdgeShape::DiagonalLeft, lane)
            || has(below, EdgeShape::DiagonalLeft, lane);
        let right_leaning = has(above, EdgeShape::DiagonalRight, lane)
            || has(below, EdgeShape::DiagonalRight, lane);
        let filler = match (left_leaning, right_leaning) {
            (true, true) => "╳",
            (true, false) => "╲",
            (false, true) => "╱",
            (false, false) => " ",
        };
        spans.push(Span::styled(filler.to_owned(), theme.base_style()));
    }
    Line::from(spans)
}

fn refs_cell(theme: &TuiTheme, record: &CommitRecord) -> Line<'static> {
    let mut spans = Vec::new();
    for label in record.refs() {
        let text = match label {
            RefLabel::Head { branch } => branch.clone(),
            RefLabel::Tag { name } => name.clone(),
            RefLabel::Branch { name } => name.clone(),
        };
        spans.push(Span::styled(format!(" {text} "), theme.ref_style(label)));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn icon_glyph(icon: ActionIcon) -> &'static str {
    match icon {
        ActionIcon::Diff => "±",
        ActionIcon::Reset => "↺",
        ActionIcon::CreateBranch => "⎇",
        ActionIcon::CreateTag => "◈",
        ActionIcon::Restore => "⟳",
        ActionIcon::Checkout => "→",
        ActionIcon::Delete => "✗",
    }
}

fn phase_label(phase: BrowserPhase) -> &'static str {
    match phase {
        BrowserPhase::Idle => "idle",
        BrowserPhase::Loading => "loading…",
        BrowserPhase::Ready => "ready",
        BrowserPhase::ActionInFlight => "working…",
        BrowserPhase::Failed => "failed",
    }
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.size();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(6),
            Constraint::Length(1),
        ])
        .split(area);

    draw_history_table(frame, layout[0], app);
    draw_details(frame, layout[1], app);
    if matches!(app.mode, Mode::Prompt { .. }) {
        draw_prompt(frame, layout[2], app);
    } else {
        draw_status(frame, layout[2], app);
    }

    if matches!(app.mode, Mode::Menu { .. }) {
        draw_menu(frame, area, app);
    } else if let Mode::Changes(changes) = &app.mode {
        draw_changes(frame, area, &app.theme, changes);
    }
}

fn draw_history_table(frame: &mut Frame<'_>, area: Rect, app: &mut App) {
    let lane_count = app.browser.lane_count();
    let visible = app.visible_rows();

    let header = Row::new(vec!["Graph", "Refs", "Description", "Author", "Date", "Commit"])
        .style(app.theme.header_style());

    let model = app.browser.model();
    let rows: Vec<Row<'static>> = visible
        .iter()
        .filter_map(|&at| model.record(at))
        .map(|record| {
            let picked = app.picked.iter().any(|id| id == record.id());
            let style = if picked {
                app.theme.picked_style()
            } else {
                app.theme.base_style()
            };
            Row::new(vec![
                Cell::from(graph_cell(&app.theme, record, lane_count)),
                Cell::from(refs_cell(&app.theme, record)),
                Cell::from(record.summary().to_owned()),
                Cell::from(record.author_name().to_owned()),
                Cell::from(record.author_timestamp().format("%Y-%m-%d %H:%M").to_string()),
                Cell::from(record.abbreviated_id().to_owned()),
            ])
            .style(style)
        })
        .collect();

    let graph_width = (lane_count * 2).max(5) as u16;
    let widths = [
        Constraint::Length(graph_width),
        Constraint::Length(24),
        Constraint::Min(24),
        Constraint::Length(10),
        Constraint::Length(16),
        Constraint::Length(9),
    ];

    let title = format!(
        " History ({}/{}) ",
        visible.len(),
        app.browser.model().len()
    );
    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .highlight_style(app.theme.cursor_style())
        .block(Block::default().borders(Borders::ALL).title(title));

    app.table_state.select(if visible.is_empty() {
        None
    } else {
        Some(app.cursor)
    });
    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn draw_details(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let mut lines = Vec::new();
    if let Some(record) = app.cursor_record() {
        lines.push(Line::from(vec![
            Span::styled("Commit:  ", app.theme.header_style()),
            Span::raw(record.id().to_string()),
        ]));
        let parents = record
            .parent_ids()
            .iter()
            .map(|id| id.abbreviated().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(Line::from(vec![
            Span::styled("Parents: ", app.theme.header_style()),
            Span::raw(if parents.is_empty() {
                "(root)".to_owned()
            } else {
                parents
            }),
        ]));
        let refs = record
            .refs()
            .iter()
            .map(|label| label.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        if !refs.is_empty() {
            lines.push(Line::from(vec![
                Span::styled("Refs:    ", app.theme.header_style()),
                Span::raw(refs),
            ]));
        }
        lines.push(Line::from(vec![
            Span::styled("Message: ", app.theme.header_style()),
            Span::raw(record.message().to_owned()),
        ]));
    }

    let details = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Commit "));
    frame.render_widget(details, area);
}

fn draw_status(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        format!(" {} ", phase_label(app.browser.phase())),
        if app.browser.phase() == BrowserPhase::Failed {
            app.theme.error_style()
        } else {
            app.theme.hint_label_style()
        },
    )];

    if !app.picked.is_empty() {
        spans.push(Span::styled(
            format!("picked {} ", app.picked.len()),
            app.theme.picked_style(),
        ));
    }
    if let Some(summary) = app.filter_summary() {
        spans.push(Span::styled(
            format!("filter: {summary} "),
            app.theme.hint_label_style(),
        ));
    }

    if let Some((message, _)) = &app.toast {
        spans.push(Span::styled(format!("· {message} "), app.theme.toast_style()));
    } else if let Some(error) = app.browser.last_error() {
        spans.push(Span::styled(format!("· {error} "), app.theme.error_style()));
    } else {
        for (key, label) in [
            ("↑↓", "move"),
            ("space", "pick"),
            ("enter", "actions"),
            ("/", "filter"),
            ("s/e", "dates"),
            ("r", "refresh"),
            ("y", "copy"),
            ("q", "quit"),
        ] {
            spans.push(Span::styled(format!("{key} "), app.theme.hint_key_style()));
            spans.push(Span::styled(format!("{label}  "), app.theme.hint_label_style()));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_prompt(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let Mode::Prompt { purpose, buffer } = &app.mode else {
        return;
    };
    let title = match purpose {
        Prompt::FilterText => "Filter text (empty shows all)",
        Prompt::FilterStart => "Show commits after date, YYYY-MM-DD (empty clears)",
        Prompt::FilterEnd => "Show commits before date, YYYY-MM-DD (empty clears)",
        Prompt::ActionName { title, .. } => title.as_str(),
        Prompt::ActionLayer { hint, .. } => hint.as_str(),
    };
    let line = Line::from(vec![
        Span::styled(format!(" {title}: "), app.theme.header_style()),
        Span::raw(buffer.clone()),
        Span::styled("▏", app.theme.hint_key_style()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_menu(frame: &mut Frame<'_>, area: Rect, app: &mut App) {
    let Mode::Menu { actions, state } = &mut app.mode else {
        return;
    };

    let width = actions
        .iter()
        .map(|action| action.label.len() as u16 + 6)
        .max()
        .unwrap_or(20)
        .min(area.width.saturating_sub(4));
    let height = (actions.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup = centered_rect(area, width, height);

    let items: Vec<ListItem<'_>> = actions
        .iter()
        .map(|action| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!(" {} ", icon_glyph(action.icon)),
                    app.theme.hint_key_style(),
                ),
                Span::raw(action.label.clone()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .highlight_style(app.theme.cursor_style())
        .block(Block::default().borders(Borders::ALL).title(" Actions "));

    frame.render_widget(Clear, popup);
    frame.render_stateful_widget(list, popup, state);
}

fn draw_changes(frame: &mut Frame<'_>, area: Rect, theme: &TuiTheme, changes: &ChangeSet) {
    let mut lines = vec![Line::from(Span::styled(
        format!(
            "{}..{}",
            changes.older().abbreviated(),
            changes.newer().abbreviated()
        ),
        theme.header_style(),
    ))];

    if changes.is_empty() {
        lines.push(Line::from("no layer changes"));
    }
    for entry in changes.entries() {
        lines.push(Line::from(format!(
            "{}: +{} ~{} -{}",
            entry.layer, entry.inserts, entry.updates, entry.deletes
        )));
    }
    lines.push(Line::from(Span::styled(
        "esc to close",
        theme.hint_label_style(),
    )));

    let width = lines
        .iter()
        .map(|line| line.width() as u16 + 4)
        .max()
        .unwrap_or(20)
        .min(area.width.saturating_sub(4));
    let height = (lines.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup = centered_rect(area, width, height);

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Changes "));
    frame.render_widget(Clear, popup);
    frame.render_widget(paragraph, popup);
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

#[cfg(test)]
mod tests;
