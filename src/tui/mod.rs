//! Ratatui-based terminal UI.
//!
//! The TUI renders the fetched statement series as a table with
//! sortable columns, a modal form for range filters, and a status line
//! that doubles as the diagnostic channel for fetch failures.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

use crate::app::pipeline;
use crate::cli::ShowArgs;
use crate::data::{FmpClient, StatementSnapshot};
use crate::domain::{ColumnKey, FilterCriteria, IncomeRecord, SortSpec, ViewConfig};
use crate::error::AppError;
use crate::form::apply_submission;
use crate::report::format::{cell, header_label};

mod modal;

use modal::{Modal, ModalOutcome};

/// Start the TUI.
pub fn run(args: ShowArgs) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(crate::app::view_config_from_args(&args))?;
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Session state: raw records, criteria, sort spec, and modal flag all
/// live here, and every engine receives the slice it needs as an input.
struct App {
    config: ViewConfig,
    client: FmpClient,
    snapshot: Option<StatementSnapshot>,
    criteria: FilterCriteria,
    sort: SortSpec,
    visible: Vec<IncomeRecord>,
    table: TableState,
    modal: Modal,
    status: String,
}

impl App {
    fn new(config: ViewConfig) -> Result<Self, AppError> {
        let client = FmpClient::from_env()?;
        let mut app = Self {
            config,
            client,
            snapshot: None,
            criteria: FilterCriteria::default(),
            sort: SortSpec::default(),
            visible: Vec::new(),
            table: TableState::default(),
            modal: Modal::Closed,
            status: "Fetching income statements...".to_string(),
        };
        app.refresh_snapshot();
        Ok(app)
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.modal.is_open() {
            self.handle_modal_key(code);
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('f') => {
                // Every open starts from a fresh form: category back to
                // date, all field buffers cleared.
                self.modal = Modal::open();
                self.status =
                    "Filter: Tab category, Up/Down field, Enter apply, x reset, Esc close."
                        .to_string();
            }
            KeyCode::Char('c') => {
                self.criteria.reset();
                self.refresh_rows();
                self.status = "Filters cleared.".to_string();
            }
            KeyCode::Char('r') => {
                self.refresh_snapshot();
            }
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::Char(c @ '1'..='6') => {
                let column = ColumnKey::ALL[(c as usize) - ('1' as usize)];
                let before = self.sort;
                self.sort.select(column);
                if self.sort != before {
                    self.refresh_rows();
                    self.status = format!("sort: {}", header_label(column, self.sort));
                }
            }
            _ => {}
        }

        false
    }

    fn handle_modal_key(&mut self, code: KeyCode) {
        let Modal::Open(form) = &mut self.modal else {
            return;
        };

        match modal::handle_key(form, code) {
            ModalOutcome::Pending => {}
            ModalOutcome::Close => {
                self.modal = Modal::Closed;
                self.status = "Filter canceled.".to_string();
            }
            ModalOutcome::Reset => {
                self.criteria.reset();
                self.modal = Modal::Closed;
                self.refresh_rows();
                self.status = "Filters reset.".to_string();
            }
            ModalOutcome::Submit(submitted) => {
                let applied = apply_submission(&mut self.criteria, &submitted);
                self.modal = Modal::Closed;
                self.refresh_rows();
                self.status = match applied {
                    Some(_) => format!("filter: {}", self.criteria.describe()),
                    None => "No complete range entered; filters unchanged.".to_string(),
                };
            }
        }
    }

    fn move_selection(&mut self, delta: i32) {
        if self.visible.is_empty() {
            return;
        }
        let max = self.visible.len() - 1;
        let current = self.table.selected().unwrap_or(0);
        let next = if delta < 0 {
            current.saturating_sub(delta.unsigned_abs() as usize)
        } else {
            (current + delta as usize).min(max)
        };
        self.table.select(Some(next));
    }

    /// One outbound fetch; a failure is reported on the status line and
    /// the record set stays empty. No automatic retry.
    fn refresh_snapshot(&mut self) {
        self.status = "Fetching income statements...".to_string();
        match self.client.fetch_income_statements(
            &self.config.symbol,
            self.config.period,
            self.config.limit,
        ) {
            Ok(snapshot) => {
                self.status = format!(
                    "Fetched {} rows for {} (as of {}).",
                    snapshot.records.len(),
                    snapshot.symbol,
                    snapshot.as_of
                );
                self.snapshot = Some(snapshot);
            }
            Err(err) => {
                self.snapshot = None;
                self.status = format!("Fetch failed: {err}");
            }
        }
        self.refresh_rows();
    }

    /// Recompute the derived view from scratch.
    fn refresh_rows(&mut self) {
        let records: &[IncomeRecord] = self
            .snapshot
            .as_ref()
            .map(|s| s.records.as_slice())
            .unwrap_or(&[]);
        self.visible = pipeline::derive_rows(records, &self.criteria, self.sort);

        if self.visible.is_empty() {
            self.table.select(None);
        } else {
            let row = self.table.selected().unwrap_or(0).min(self.visible.len() - 1);
            self.table.select(Some(row));
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_table(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);

        if let Modal::Open(form) = &self.modal {
            modal::draw(frame, size, form);
        }
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("fin", Style::default().fg(Color::Cyan)),
            Span::raw(format!(" - {} income statements", self.config.symbol)),
        ]));

        let fetched = self
            .snapshot
            .as_ref()
            .map(|s| s.records.len())
            .unwrap_or(0);
        let skipped = self.snapshot.as_ref().map(|s| s.rows_skipped).unwrap_or(0);

        let mut summary = format!(
            "period: {} | rows: {}/{fetched} | filter: {} | sort: {}",
            self.config.period.as_str(),
            self.visible.len(),
            self.criteria.describe(),
            header_label(sort_column(self.sort), self.sort).to_lowercase(),
        );
        if skipped > 0 {
            summary.push_str(&format!(" | skipped: {skipped}"));
        }
        lines.push(Line::from(Span::styled(
            summary,
            Style::default().fg(Color::Gray),
        )));

        let p = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_table(&mut self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let header = Row::new(ColumnKey::ALL.map(|column| {
            let style = if column.sort_key() == Some(self.sort.key) {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else if column.is_sortable() {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Cell::from(header_label(column, self.sort)).style(style)
        }))
        .height(1);

        let rows = self.visible.iter().map(|record| {
            Row::new(ColumnKey::ALL.map(|column| Cell::from(cell(record, column))))
        });

        let widths = [
            Constraint::Length(12),
            Constraint::Length(20),
            Constraint::Length(20),
            Constraint::Length(20),
            Constraint::Length(8),
            Constraint::Length(18),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().title("Income Statements").borders(Borders::ALL))
            .row_highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        frame.render_stateful_widget(table, area, &mut self.table);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ move  1-6 sort column  f filter  c clear  r refresh  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn sort_column(sort: SortSpec) -> ColumnKey {
    match sort.key {
        crate::domain::SortKey::Date => ColumnKey::Date,
        crate::domain::SortKey::Revenue => ColumnKey::Revenue,
        crate::domain::SortKey::NetIncome => ColumnKey::NetIncome,
    }
}
