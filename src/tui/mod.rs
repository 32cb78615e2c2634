//! Ratatui-based terminal UI.
//!
//! The TUI provides a settings panel for the visible year range, mood filter,
//! and comparison years, then renders the anomaly chart, headline metrics, and
//! mood frequency.

use std::io;
use std::time::Duration;

use chrono::{Datelike, Local};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use crate::app::pipeline::{RunOutput, run_with_data};
use crate::domain::{DashboardConfig, MoodBand};
use crate::error::AppError;
use crate::io::ingest::IngestedData;
use crate::mood::MoodScale;

mod plotters_chart;

use plotters_chart::MoodPlottersChart;

/// Settings rows: from, to, one per mood, compare A, compare B.
const FIXED_FIELDS: usize = 4;

/// Start the TUI.
pub fn run(config: DashboardConfig) -> Result<(), AppError> {
    // Load before entering raw mode so fetch errors print normally.
    let data = crate::data::load(&config.source)?;
    let mut app = App::new(config, data)?;

    let _guard = TerminalGuard::new()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::terminal(format!("Failed to initialize terminal: {e}")))?;

    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::terminal(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::terminal(format!("Failed to enter alternate screen: {e}")));
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
    config: DashboardConfig,
    scale: MoodScale<'static>,
    /// One flag per scale band; the mood filter is derived from these.
    mood_enabled: Vec<bool>,
    selected_field: usize,
    status: String,
    data: IngestedData,
    /// Inclusive year span of the loaded data.
    years: (i32, i32),
    run: Option<RunOutput>,
}

impl App {
    fn new(config: DashboardConfig, data: IngestedData) -> Result<Self, AppError> {
        let scale = MoodScale::earth();
        let mood_enabled = scale
            .bands()
            .iter()
            .map(|b| {
                config.moods.is_empty() || config.moods.iter().any(|m| m.eq_ignore_ascii_case(b.label))
            })
            .collect();

        let mut app = Self {
            years: year_span(&data),
            config,
            scale,
            mood_enabled,
            selected_field: 0,
            status: String::new(),
            data,
            run: None,
        };
        app.clamp_years();
        app.recompute()?;
        app.status = format!("Loaded {} months from {}.", app.data.samples.len(), app.data.source);
        Ok(app)
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::terminal(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::terminal(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::terminal(format!("Event read error: {e}")))? {
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

    fn field_count(&self) -> usize {
        FIXED_FIELDS + self.scale.len()
    }

    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => {
                self.selected_field = self.selected_field.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.selected_field + 1 < self.field_count() {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::PageDown => self.adjust_field(-10),
            KeyCode::PageUp => self.adjust_field(10),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(idx) = self.mood_index(self.selected_field) {
                    self.toggle_mood(idx);
                }
            }
            KeyCode::Char('c') => {
                self.config.from_year = None;
                self.config.to_year = None;
                self.config.compare = None;
                self.config.moods.clear();
                self.mood_enabled.iter_mut().for_each(|m| *m = true);
                self.status = "Filters cleared.".to_string();
                self.refresh();
            }
            KeyCode::Char('r') => self.refetch(),
            KeyCode::Char('s') => self.save_snapshot(),
            _ => {}
        }

        false
    }

    /// Map a settings row to a mood index, if the row is a mood toggle.
    fn mood_index(&self, field: usize) -> Option<usize> {
        (2..2 + self.scale.len()).contains(&field).then(|| field - 2)
    }

    fn adjust_field(&mut self, delta: i32) {
        let (first, last) = self.years;
        let field = self.selected_field;
        let compare_a = 2 + self.scale.len();

        if let Some(idx) = self.mood_index(field) {
            self.toggle_mood(idx);
            return;
        }

        match field {
            0 => {
                let to = self.config.to_year.unwrap_or(last);
                let cur = self.config.from_year.unwrap_or(first);
                self.config.from_year = Some((cur + delta).clamp(first, to.max(first)));
                self.status = format!("from: {}", fmt_year(self.config.from_year));
            }
            1 => {
                let from = self.config.from_year.unwrap_or(first);
                let cur = self.config.to_year.unwrap_or(last);
                self.config.to_year = Some((cur + delta).clamp(from.min(last), last));
                self.status = format!("to: {}", fmt_year(self.config.to_year));
            }
            f if f == compare_a || f == compare_a + 1 => {
                let (mut a, mut b) = self.config.compare.unwrap_or((first, last));
                if f == compare_a {
                    a = (a + delta).clamp(first, last);
                } else {
                    b = (b + delta).clamp(first, last);
                }
                self.config.compare = Some((a, b));
                self.status = format!("compare: {a} vs {b}");
            }
            _ => return,
        }
        self.refresh();
    }

    fn toggle_mood(&mut self, idx: usize) {
        let Some(band) = self.scale.bands().get(idx) else {
            return;
        };
        let enabled = self.mood_enabled.iter().filter(|&&m| m).count();
        if self.mood_enabled[idx] && enabled == 1 {
            self.status = "At least one mood must stay visible.".to_string();
            return;
        }

        self.mood_enabled[idx] = !self.mood_enabled[idx];
        self.config.moods = selected_moods(self.scale.bands(), &self.mood_enabled);
        self.status = format!(
            "{} {}",
            band.display_name(),
            if self.mood_enabled[idx] { "shown" } else { "hidden" }
        );
        self.refresh();
    }

    fn refetch(&mut self) {
        self.status = "Fetching GISTEMP data...".to_string();
        match crate::data::load(&self.config.source) {
            Ok(data) => {
                tracing::info!(samples = data.samples.len(), "refetched data");
                self.years = year_span(&data);
                self.data = data;
                self.clamp_years();
                match self.recompute() {
                    Ok(()) => {
                        self.status = format!(
                            "Reloaded {} months at {}.",
                            self.data.samples.len(),
                            self.data.loaded_at.format("%H:%M:%S")
                        );
                    }
                    Err(err) => self.status = format!("Reload failed: {err}"),
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "refetch failed");
                self.status = format!("Fetch failed: {err}");
            }
        }
    }

    fn save_snapshot(&mut self) {
        let Some(run) = &self.run else {
            self.status = "Nothing to save yet.".to_string();
            return;
        };
        let path = crate::report::markdown::default_report_path(Local::now());
        self.status = match crate::report::write_markdown_report(&path, run, &self.config) {
            Ok(()) => format!("Wrote snapshot: {}", path.display()),
            Err(err) => format!("Snapshot write failed: {err}"),
        };
    }

    /// Recompute after a settings change. Failures go to the status bar and
    /// the previous run stays on screen.
    fn refresh(&mut self) {
        if let Err(err) = self.recompute() {
            tracing::warn!(error = %err, "recompute failed");
            self.status = format!("Cannot apply settings: {err}");
        }
    }

    /// Pull the visible year range inside the loaded data, keeping from <= to.
    fn clamp_years(&mut self) {
        let (first, last) = self.years;
        let from = self.config.from_year.map(|y| y.clamp(first, last));
        let to = self.config.to_year.map(|y| y.clamp(first, last));
        self.config.from_year = from;
        self.config.to_year = match (from, to) {
            (Some(f), Some(t)) if t < f => Some(f),
            _ => to,
        };
    }

    fn recompute(&mut self) -> Result<(), AppError> {
        let run = run_with_data(&self.config, self.data.clone())?;
        self.run = Some(run);
        Ok(())
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("cmood", Style::default().fg(Color::Cyan)),
            Span::raw(format!(" - Earth's mood | {}", self.data.source)),
        ]));

        if let Some(run) = &self.run {
            let s = &run.summary;
            let mut spans = vec![Span::raw("latest: ")];
            match &s.latest {
                Some(latest) => {
                    spans.push(Span::styled(
                        latest.band.display_name(),
                        Style::default().fg(band_color(&latest.band)).add_modifier(Modifier::BOLD),
                    ));
                    spans.push(Span::raw(format!(
                        " ({:+.2}°C, {})",
                        latest.sample.value,
                        latest.sample.date.format("%Y-%m")
                    )));
                }
                None => spans.push(Span::raw("-")),
            }
            spans.push(Span::raw(format!(
                " | {}-yr trend: {:+.3}°C/yr ({})",
                s.trend_years,
                s.trend_per_year,
                s.trend_direction.label()
            )));
            lines.push(Line::from(spans));

            let mut metrics = format!(
                "correlation: {}",
                s.correlation.map(|r| format!("{r:.2}")).unwrap_or_else(|| "-".to_string())
            );
            for p in &s.projections {
                metrics.push_str(&format!(" | {}: {:+.2}°C", p.year, p.anomaly));
            }
            lines.push(Line::from(Span::styled(metrics, Style::default().fg(Color::Gray))));
        }

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(34)])
            .split(area);

        self.draw_chart(frame, chunks[0]);

        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length((self.field_count() + 2) as u16),
                Constraint::Min(0),
            ])
            .split(chunks[1]);
        self.draw_settings(frame, side[0]);
        self.draw_moods(frame, side[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Temperature anomaly").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(run) = self.run.as_ref().filter(|r| !r.chart.is_empty()) else {
            let msg = Paragraph::new("No months match the current filters.")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default());
            frame.render_widget(msg, inner);
            return;
        };

        let chart = &run.chart;
        let (chart_rect, insets) = chart_layout(inner);
        let widget = MoodPlottersChart {
            line: &chart.line,
            rolling: &chart.rolling,
            bands: &chart.by_band,
            x_bounds: chart.x_bounds,
            y_bounds: chart.y_bounds,
            x_label: "year",
            y_label: "anomaly (°C)",
            fmt_x: fmt_axis_year,
            fmt_y: fmt_axis_celsius,
        };

        frame.render_widget(widget, chart_rect);
        if let Some(insets) = insets {
            draw_axis_ticks(frame, inner, chart_rect, insets, chart.x_bounds, chart.y_bounds);
        }
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let (first, last) = self.years;
        let mut items = Vec::new();
        items.push(ListItem::new(format!(
            "From: {}",
            self.config.from_year.unwrap_or(first)
        )));
        items.push(ListItem::new(format!("To: {}", self.config.to_year.unwrap_or(last))));
        for (band, &on) in self.scale.bands().iter().zip(&self.mood_enabled) {
            let mark = if on { "[x]" } else { "[ ]" };
            items.push(ListItem::new(Line::from(vec![
                Span::raw(format!("{mark} ")),
                Span::styled(band.display_name(), Style::default().fg(band_color(band))),
            ])));
        }
        let (a, b) = self
            .config
            .compare
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .unwrap_or_else(|| ("-".to_string(), "-".to_string()));
        items.push(ListItem::new(format!("Compare A: {a}")));
        items.push(ListItem::new(format!("Compare B: {b}")));

        let list = List::new(items)
            .block(Block::default().title("Settings").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_moods(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        if let Some(run) = &self.run {
            lines.push(Line::from(format!("visible months: {}", run.visible.len())));
            for c in &run.frequency {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("{:<10}", c.band.display_name()),
                        Style::default().fg(band_color(&c.band)),
                    ),
                    Span::raw(format!(" {:>5} {:>5.1}%", c.count, c.share * 100.0)),
                ]));
            }
            if let Some(cmp) = &run.comparison {
                lines.push(Line::from(""));
                lines.push(Line::from(format!(
                    "{}: {:+.2}°C  {}: {:+.2}°C",
                    cmp.year_a, cmp.mean_a, cmp.year_b, cmp.mean_b
                )));
                lines.push(Line::from(Span::styled(
                    format!("change: {:+.2}°C", cmp.delta),
                    Style::default().add_modifier(Modifier::BOLD),
                )));
            }
        }

        let p = Paragraph::new(Text::from(lines))
            .block(Block::default().title("Mood frequency").borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ ±1  PgUp/PgDn ±10  Enter toggle  c clear  r refetch  s save  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn year_span(data: &IngestedData) -> (i32, i32) {
    let first = data.samples.first().map(|s| s.year());
    let last = data.samples.last().map(|s| s.year());
    match (first, last) {
        (Some(a), Some(b)) => (a, b),
        _ => {
            let y = Local::now().year();
            (y, y)
        }
    }
}

/// Mood filter for the config. All moods enabled means "no filter".
fn selected_moods(bands: &[MoodBand], enabled: &[bool]) -> Vec<String> {
    if enabled.iter().all(|&m| m) {
        return Vec::new();
    }
    bands
        .iter()
        .zip(enabled)
        .filter(|(_, on)| **on)
        .map(|(b, _)| b.label.to_string())
        .collect()
}

fn band_color(band: &MoodBand) -> Color {
    let [r, g, b] = band.color;
    Color::Rgb(r, g, b)
}

fn fmt_year(year: Option<i32>) -> String {
    year.map(|y| y.to_string()).unwrap_or_else(|| "-".to_string())
}

fn fmt_axis_year(v: f64) -> String {
    format!("{v:.0}")
}

fn fmt_axis_celsius(v: f64) -> String {
    format!("{v:.1}")
}

#[derive(Debug, Clone, Copy)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets {
        left: 8,
        right: 2,
        top: 1,
        bottom: 2,
    };

    if inner.width <= insets.left + insets.right + 10
        || inner.height <= insets.top + insets.bottom + 5
    {
        return (inner, None);
    }

    let rect = Rect {
        x: inner.x + insets.left,
        y: inner.y + insets.top,
        width: inner.width - insets.left - insets.right,
        height: inner.height - insets.top - insets.bottom,
    };

    (rect, Some(insets))
}

fn draw_axis_ticks(
    frame: &mut ratatui::Frame<'_>,
    inner: Rect,
    chart: Rect,
    insets: AxisInsets,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
) {
    let ticks = 5usize;
    let style = Style::default().fg(Color::Gray);

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let x_val = x_bounds[0] + u * (x_bounds[1] - x_bounds[0]);
        let x = chart.x + ((chart.width - 1) as f64 * u).round() as u16;
        let label = fmt_axis_year(x_val);
        let label_len = label.len() as u16;
        let start = x.saturating_sub((label.len() / 2) as u16);
        let y = chart.y + chart.height;
        if y >= inner.y + inner.height - 1 {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let y_val = y_bounds[0] + u * (y_bounds[1] - y_bounds[0]);
        let y = chart.y + (chart.height - 1) - ((chart.height - 1) as f64 * u).round() as u16;
        let label = format!("{y_val:+.1}");
        let label_len = label.len() as u16;
        let x = inner.x + insets.left.saturating_sub(1);
        let start = x.saturating_sub(label.len() as u16);
        if start < inner.x {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    let x_label = Paragraph::new("year")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    let x_rect = Rect {
        x: chart.x,
        y: chart.y + chart.height + 1,
        width: chart.width,
        height: 1,
    };
    if x_rect.y < inner.y + inner.height {
        frame.render_widget(x_label, x_rect);
    }

    let y_label = Paragraph::new("°C")
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));
    let y_rect = Rect {
        x: inner.x,
        y: inner.y,
        width: insets.left.saturating_sub(1),
        height: 1,
    };
    frame.render_widget(y_label, y_rect);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AnomalySample;
    use crate::io::ingest::ParsedTable;
    use chrono::NaiveDate;

    fn app() -> App {
        app_with(DashboardConfig::default())
    }

    fn app_with(config: DashboardConfig) -> App {
        let samples = (1990..2000)
            .flat_map(|y| {
                (1..=12).map(move |m| {
                    AnomalySample::new(
                        NaiveDate::from_ymd_opt(y, m, 1).unwrap(),
                        -0.2 + 0.2 * (y - 1990) as f64,
                    )
                })
            })
            .collect();
        let data = IngestedData::from_table(
            "unit",
            ParsedTable {
                samples,
                rows_read: 10,
                missing_cells: 0,
            },
        );
        App::new(config, data).unwrap()
    }

    #[test]
    fn years_outside_the_data_are_pulled_in() {
        let mut app = app_with(DashboardConfig {
            from_year: Some(2100),
            to_year: Some(1950),
            ..DashboardConfig::default()
        });
        assert_eq!(app.config.from_year, Some(1999));
        assert_eq!(app.config.to_year, Some(1999));
        assert_eq!(app.run.as_ref().unwrap().visible.len(), 12);

        app.handle_key(KeyCode::Down);
        assert!(!app.handle_key(KeyCode::Left));
        assert!(!app.handle_key(KeyCode::PageDown));
        let (from, to) = (app.config.from_year.unwrap(), app.config.to_year.unwrap());
        assert!(from <= to, "{from} > {to}");
        assert!(app.run.is_some());
    }

    #[test]
    fn year_fields_clamp_to_data() {
        let mut app = app();
        assert_eq!(app.years, (1990, 1999));

        app.handle_key(KeyCode::Left);
        assert_eq!(app.config.from_year, Some(1990));
        app.handle_key(KeyCode::PageUp);
        assert_eq!(app.config.from_year, Some(1999));

        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::PageDown);
        // `to` cannot move before `from`.
        assert_eq!(app.config.to_year, Some(1999));
        assert_eq!(app.run.as_ref().unwrap().visible.len(), 12);
    }

    #[test]
    fn mood_toggles_filter_visible_months() {
        let mut app = app();
        // Row 2 is the first band (Cold).
        app.selected_field = 2;
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.config.moods, ["Stable", "Warm", "Hot"]);
        let run = app.run.as_ref().unwrap();
        assert!(run.visible.iter().all(|r| r.band.label != "Cold"));

        app.handle_key(KeyCode::Char(' '));
        assert!(app.config.moods.is_empty());
    }

    #[test]
    fn last_mood_cannot_be_hidden() {
        let mut app = app();
        for field in 2..5 {
            app.selected_field = field;
            app.handle_key(KeyCode::Enter);
        }
        assert_eq!(app.config.moods, ["Hot"]);

        app.selected_field = 5;
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.config.moods, ["Hot"]);
        assert!(app.status.contains("At least one mood"));
    }

    #[test]
    fn compare_fields_start_at_data_edges() {
        let mut app = app();
        app.selected_field = 6;
        app.handle_key(KeyCode::Right);
        assert_eq!(app.config.compare, Some((1991, 1999)));
        let cmp = app.run.as_ref().unwrap().comparison.unwrap();
        assert!((cmp.delta - 1.6).abs() < 1e-9);
    }

    #[test]
    fn clear_and_quit_keys() {
        let mut app = app();
        app.handle_key(KeyCode::Right);
        app.handle_key(KeyCode::Char('c'));
        assert_eq!(app.config.from_year, None);
        assert!(app.handle_key(KeyCode::Char('q')));
    }
}
