//! Ratatui-based terminal UI.
//!
//! An editable x/y point table on the left, keys to add/remove rows, and a
//! "verify" action that runs the engine and renders the winning law's curve
//! over the sample points on the right, titled with the family name and
//! fitted equation.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Terminal,
};

use crate::app::pipeline::{self, RunOutput};
use crate::cli::FitArgs;
use crate::domain::SamplePoint;
use crate::error::AppError;
use crate::fit::fitted_grid;
use crate::io::grid_range;

mod plotters_chart;

use plotters_chart::FitPlottersChart;

/// Start the TUI.
pub fn run(args: FitArgs) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(args)?;
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

struct App {
    config: crate::domain::FitConfig,
    /// Editable cells: one `[x, y]` text pair per table row.
    rows: Vec<[String; 2]>,
    /// Selected (row, column).
    cursor: (usize, usize),
    /// Edit buffer when a cell is being edited.
    editing: Option<String>,
    status: String,
    run: Option<RunOutput>,
}

impl App {
    fn new(args: FitArgs) -> Result<Self, AppError> {
        let config = crate::app::fit_config_from_args(&args)?;

        // If the CLI flags name a point source, prefill the table from it and
        // verify immediately; otherwise start with a single empty row.
        let prefill = pipeline::gather_points(&config).ok();
        let rows = match &prefill {
            Some(points) => points
                .iter()
                .map(|p| [format_cell(p.x), format_cell(p.y)])
                .collect(),
            None => vec![[String::from("0"), String::from("0")]],
        };

        let mut app = Self {
            config,
            rows,
            cursor: (0, 0),
            editing: None,
            status: "a add row | d remove last | Enter edit | v verify | q quit".to_string(),
            run: None,
        };
        if prefill.is_some() {
            app.verify();
        }
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
        if self.editing.is_some() {
            self.handle_cell_edit(code);
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Up => {
                if self.cursor.0 > 0 {
                    self.cursor.0 -= 1;
                }
            }
            KeyCode::Down => {
                if self.cursor.0 + 1 < self.rows.len() {
                    self.cursor.0 += 1;
                }
            }
            KeyCode::Left => self.cursor.1 = 0,
            KeyCode::Right | KeyCode::Tab => self.cursor.1 = 1,
            KeyCode::Enter => {
                let current = self.rows[self.cursor.0][self.cursor.1].clone();
                self.editing = Some(current);
                self.status = "Editing cell. Enter to apply, Esc to cancel.".to_string();
            }
            KeyCode::Char('a') => {
                self.rows.push([String::from("0"), String::from("0")]);
                self.cursor = (self.rows.len() - 1, 0);
                self.status = format!("Added row {}.", self.rows.len());
            }
            KeyCode::Char('d') => {
                if self.rows.len() > 1 {
                    self.rows.pop();
                    self.cursor.0 = self.cursor.0.min(self.rows.len() - 1);
                    self.status = "Removed last row.".to_string();
                } else {
                    self.status = "The table keeps at least one row.".to_string();
                }
            }
            KeyCode::Char('v') => self.verify(),
            _ => {}
        }

        false
    }

    fn handle_cell_edit(&mut self, code: KeyCode) {
        let Some(buffer) = self.editing.as_mut() else {
            return;
        };
        match code {
            KeyCode::Esc => {
                self.editing = None;
                self.status = "Cell edit canceled.".to_string();
            }
            KeyCode::Enter => {
                let text = self.editing.take().unwrap_or_default();
                self.rows[self.cursor.0][self.cursor.1] = text;
                self.status = "Cell updated. Press v to verify.".to_string();
            }
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(c) => {
                // Numeric text only; full validation happens on verify.
                if c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E') {
                    buffer.push(c);
                }
            }
            _ => {}
        }
    }

    /// Parse the table and run the fit pipeline.
    fn verify(&mut self) {
        let points = match self.parse_table() {
            Ok(points) => points,
            Err(message) => {
                self.status = message;
                return;
            }
        };

        match pipeline::run_fit_with_points(&self.config, points) {
            Ok(run) => {
                self.status = format!(
                    "{}: {} (R² = {})",
                    run.selection.best.display_name,
                    run.selection.best.equation,
                    run.selection.best.r2
                );
                self.run = Some(run);
            }
            Err(err) => {
                self.status = err.to_string();
            }
        }
    }

    fn parse_table(&self) -> Result<Vec<SamplePoint>, String> {
        let mut points = Vec::with_capacity(self.rows.len());
        for (i, row) in self.rows.iter().enumerate() {
            let x: f64 = row[0]
                .trim()
                .parse()
                .map_err(|_| format!("Row {}: invalid x '{}'.", i + 1, row[0]))?;
            let y: f64 = row[1]
                .trim()
                .parse()
                .map_err(|_| format!("Row {}: invalid y '{}'.", i + 1, row[1]))?;
            points.push(SamplePoint::new(x, y));
        }
        Ok(points)
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("lawfit", Style::default().fg(Color::Cyan)),
            Span::raw(" - best-fit elementary law"),
        ]));

        match &self.run {
            Some(run) => {
                lines.push(Line::from(Span::styled(
                    format!(
                        "{} | {} | R² = {}",
                        run.selection.best.display_name,
                        run.selection.best.equation,
                        run.selection.best.r2
                    ),
                    Style::default().fg(Color::Gray),
                )));
            }
            None => {
                lines.push(Line::from(Span::styled(
                    "No law fitted yet. Enter points and press v.",
                    Style::default().fg(Color::Gray),
                )));
            }
        }

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        // Table 2/5 of the width, chart 3/5.
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(area);

        self.draw_table(frame, chunks[0]);
        self.draw_chart(frame, chunks[1]);
    }

    fn draw_table(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let header = Row::new(vec![Cell::from("X"), Cell::from("Y")])
            .style(Style::default().add_modifier(Modifier::BOLD));

        let selected = Style::default().fg(Color::Black).bg(Color::White);
        let editing = Style::default().fg(Color::Black).bg(Color::Yellow);

        let rows: Vec<Row> = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let cells: Vec<Cell> = (0..2)
                    .map(|col| {
                        let is_cursor = (i, col) == self.cursor;
                        let text = match (&self.editing, is_cursor) {
                            (Some(buffer), true) => format!("{buffer}_"),
                            _ => row[col].clone(),
                        };
                        let mut cell = Cell::from(text);
                        if is_cursor {
                            cell = cell.style(if self.editing.is_some() { editing } else { selected });
                        }
                        cell
                    })
                    .collect();
                Row::new(cells)
            })
            .collect();

        let table = Table::new(rows, [Constraint::Percentage(50), Constraint::Percentage(50)])
            .header(header)
            .block(Block::default().title("Sample points").borders(Borders::ALL));

        frame.render_widget(table, area);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let title = self
            .run
            .as_ref()
            .map(|r| r.selection.best.display_name.clone())
            .unwrap_or_else(|| "No law fitted".to_string());
        let block = Block::default().title(title).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(run) = &self.run else {
            let msg = Paragraph::new("Waiting for a verify run...")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default());
            frame.render_widget(msg, inner);
            return;
        };

        let (curve, points, x_bounds, y_bounds) = chart_series(run);

        let widget = FitPlottersChart {
            curve: &curve,
            points: &points,
            x_bounds,
            y_bounds,
            x_label: "x",
            y_label: "y",
        };
        frame.render_widget(widget, inner);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓/←/→ select  Enter edit  a add  d remove  v verify  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Render a table cell from a parsed number (shortest round-trippable form).
fn format_cell(v: f64) -> String {
    format!("{v}")
}

/// Build chart series for Plotters.
fn chart_series(run: &RunOutput) -> (Vec<(f64, f64)>, Vec<(f64, f64)>, [f64; 2], [f64; 2]) {
    let best = &run.selection.best;
    let (x0, x1) = grid_range(best, &run.points);
    let x_bounds = [x0, x1];

    let points: Vec<(f64, f64)> = run.points.iter().map(|p| (p.x, p.y)).collect();

    let curve: Vec<(f64, f64)> = fitted_grid(best, x0, x1, 200)
        .into_iter()
        .map(|p| (p.x, p.y))
        .collect();

    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(_, y) in points.iter().chain(curve.iter()) {
        if y.is_finite() {
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
    }

    if !y_min.is_finite() || !y_max.is_finite() || y_max <= y_min {
        y_min = 0.0;
        y_max = 1.0;
    }

    let pad = ((y_max - y_min).abs() * 0.05).max(1e-12);
    let y_bounds = [y_min - pad, y_max + pad];

    (curve, points, x_bounds, y_bounds)
}
