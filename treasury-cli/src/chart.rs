//! Yield curve chart - maturity on the x axis, yield on the y axis.
//!
//! One line per sampled year (or month). The legend sits in its own panel
//! to the right of the plot so it never hides a curve.

use std::io;
use std::sync::Arc;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::{
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Widget},
    Terminal,
};
use treasury_core::{BucketKey, Sample};

use crate::theme::Theme;

/// Chart widget over a (filtered) sample.
pub struct CurveChart<'a, K> {
    sample: &'a Sample<K>,
    tenors: &'a [String],
    theme: &'a Theme,
}

impl<'a, K: BucketKey> CurveChart<'a, K> {
    pub fn new(sample: &'a Sample<K>, tenors: &'a [String], theme: &'a Theme) -> Self {
        Self {
            sample,
            tenors,
            theme,
        }
    }

    /// `US Treasury Yields {first}-{last}, {Month DD}`
    pub fn title(&self) -> String {
        match (self.sample.key_range(), self.sample.latest_date()) {
            (Some((first, last)), Some(latest)) => format!(
                "US Treasury Yields {first}-{last}, {}",
                latest.format("%B %d")
            ),
            _ => "US Treasury Yields".to_string(),
        }
    }

    /// (tenor index, yield) points per row, skipping missing tenors.
    fn series(&self) -> Vec<(String, Vec<(f64, f64)>)> {
        self.sample
            .rows
            .iter()
            .map(|row| {
                let points = self
                    .tenors
                    .iter()
                    .enumerate()
                    .filter_map(|(i, t)| self.sample.value(row, t).map(|y| (i as f64, y)))
                    .collect();
                (row.key.to_string(), points)
            })
            .collect()
    }
}

impl<K: BucketKey> Widget for CurveChart<'_, K> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!(" {} ", self.title());
        let frame = Block::default()
            .title(Span::styled(
                title,
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent))
            .style(Style::default().bg(self.theme.background));

        let series = self.series();
        if series.iter().all(|(_, points)| points.is_empty()) {
            Paragraph::new("No yield curves matched the request.")
                .block(frame)
                .render(area, buf);
            return;
        }

        let legend_width = series
            .iter()
            .map(|(name, _)| name.len() as u16 + 7)
            .max()
            .unwrap_or(10)
            .max(10);
        let [plot_area, legend_area] =
            Layout::horizontal([Constraint::Min(20), Constraint::Length(legend_width)])
                .areas(area);

        let (y_min, y_max) = series
            .iter()
            .flat_map(|(_, points)| points.iter().map(|&(_, y)| y))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
                (lo.min(y), hi.max(y))
            });
        let y_pad = if y_max > y_min { (y_max - y_min) * 0.05 } else { 0.5 };
        let y_lower = (y_min - y_pad).max(0.0_f64.min(y_min));
        let y_upper = y_max + y_pad;
        let x_max = self.tenors.len().saturating_sub(1).max(1) as f64;

        let datasets: Vec<Dataset> = series
            .iter()
            .enumerate()
            .map(|(i, (name, points))| {
                Dataset::default()
                    .name(name.clone())
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(self.theme.series_color(i)))
                    .data(points)
            })
            .collect();

        let axis_title = |text: &'static str| {
            Span::styled(text, Style::default().fg(self.theme.text_secondary))
        };
        let y_mid = (y_lower + y_upper) / 2.0;

        Chart::new(datasets)
            .block(frame)
            .legend_position(None)
            .x_axis(
                Axis::default()
                    .title(axis_title("Maturity"))
                    .style(Style::default().fg(self.theme.muted))
                    .bounds([0.0, x_max])
                    .labels(self.tenors.iter().map(|t| Span::raw(t.clone()))),
            )
            .y_axis(
                Axis::default()
                    .title(axis_title("Yield"))
                    .style(Style::default().fg(self.theme.muted))
                    .bounds([y_lower, y_upper])
                    .labels([
                        Span::raw(format!("{y_lower:.2}")),
                        Span::raw(format!("{y_mid:.2}")),
                        Span::raw(format!("{y_upper:.2}")),
                    ]),
            )
            .render(plot_area, buf);

        let entries: Vec<Line> = series
            .iter()
            .enumerate()
            .map(|(i, (name, _))| {
                Line::from(vec![
                    Span::styled("━━ ", Style::default().fg(self.theme.series_color(i))),
                    Span::raw(name.clone()),
                ])
            })
            .collect();
        Paragraph::new(entries)
            .block(
                Block::default()
                    .title(" Legend ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.muted))
                    .style(Style::default().bg(self.theme.background)),
            )
            .render(legend_area, buf);
    }
}

/// Draw the chart full-screen and wait for any key.
pub fn show<K: BucketKey>(sample: &Sample<K>, tenors: &[String]) -> Result<()> {
    with_terminal_panic_hook(|| -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.clear()?;

        let theme = Theme::default();
        let result = draw_until_key(&mut terminal, sample, tenors, &theme);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    })
}

/// Run `f` with a panic hook that leaves raw mode and the alternate screen
/// before delegating to the current hook. The current hook is reinstated
/// once `f` returns.
fn with_terminal_panic_hook<T>(f: impl FnOnce() -> T) -> T {
    let previous = Arc::new(std::panic::take_hook());
    let chained = Arc::clone(&previous);
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        (**chained)(info);
    }));

    let out = f();

    // dropping our hook releases its clone of `previous`
    drop(std::panic::take_hook());
    match Arc::try_unwrap(previous) {
        Ok(hook) => std::panic::set_hook(hook),
        Err(shared) => std::panic::set_hook(Box::new(move |info| (**shared)(info))),
    }
    out
}

fn draw_until_key<K: BucketKey>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    sample: &Sample<K>,
    tenors: &[String],
    theme: &Theme,
) -> Result<()> {
    loop {
        terminal.draw(|f| {
            f.render_widget(CurveChart::new(sample, tenors, theme), f.area());
        })?;
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(()),
            // redraw on resize
            _ => {}
        }
    }
}
