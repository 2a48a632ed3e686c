//! Ratatui rendering of the dashboard surface.
//!
//! One full-screen view: header (title, aggregate stats, sort selector),
//! phase-grouped card list with a detail panel, footer key help. Loading and
//! failed states get dedicated screens.

use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

use crate::app::{App, LoadState};
use crate::models::SortBy;

mod colors {
    use ratatui::style::Color;

    pub const ACCENT: Color = Color::Rgb(237, 29, 36);
    pub const TEXT: Color = Color::Rgb(230, 230, 230);
    pub const DIM: Color = Color::Rgb(130, 130, 140);
    pub const WATCHED: Color = Color::Rgb(133, 153, 0);
    pub const ERROR: Color = Color::Rgb(220, 50, 47);
}

pub fn draw(frame: &mut Frame, app: &App) {
    match &app.load {
        LoadState::Loading => draw_loading(frame),
        LoadState::Failed(message) => draw_failed(frame, message),
        LoadState::Ready => draw_ready(frame, app),
    }
}

fn draw_loading(frame: &mut Frame) {
    let area = centered_band(frame.area(), 3);
    let text = vec![
        Line::from(Span::styled(
            "Loading MCU productions...",
            Style::default().fg(colors::TEXT).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled("q: quit", Style::default().fg(colors::DIM))),
    ];
    frame.render_widget(
        Paragraph::new(text).alignment(Alignment::Center),
        area,
    );
}

fn draw_failed(frame: &mut Frame, message: &str) {
    let area = centered_band(frame.area(), 4);
    let text = vec![
        Line::from(Span::styled(
            "Failed to load the catalog",
            Style::default().fg(colors::ERROR).bold(),
        )),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(colors::TEXT),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "r: retry    q: quit",
            Style::default().fg(colors::DIM),
        )),
    ];
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_ready(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(5), // Stats boxes
            Constraint::Length(1), // Sort selector
            Constraint::Min(5),    // Catalog + detail
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    draw_title(frame, chunks[0]);
    draw_stats(frame, chunks[1], app);
    draw_sort_selector(frame, chunks[2], app.sort_by);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
        .split(chunks[3]);
    draw_catalog(frame, body[0], app);
    draw_detail(frame, body[1], app);

    draw_footer(frame, chunks[4], app);
}

fn draw_title(frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            " MCU PRODUCTIONS ",
            Style::default().fg(Color::White).bg(colors::ACCENT).bold(),
        ),
        Span::raw(" "),
        Span::styled("DASHBOARD", Style::default().fg(colors::TEXT).bold()),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

fn draw_stats(frame: &mut Frame, area: Rect, app: &App) {
    let stats = app.stats();
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    draw_stat_box(frame, chunks[0], "TOTAL", &stats.total.to_string(), colors::TEXT);
    draw_stat_box(
        frame,
        chunks[1],
        "WATCHED",
        &stats.watched.to_string(),
        colors::WATCHED,
    );
    draw_stat_box(
        frame,
        chunks[2],
        "PROGRESS",
        &format!("{}%", stats.percent),
        colors::ACCENT,
    );
}

fn draw_stat_box(frame: &mut Frame, area: Rect, label: &str, value: &str, value_color: Color) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(colors::DIM));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let text = vec![
        Line::from(Span::styled(label, Style::default().fg(colors::DIM))),
        Line::from(Span::styled(
            value.to_string(),
            Style::default().fg(value_color).bold(),
        )),
    ];
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), inner);
}

fn draw_sort_selector(frame: &mut Frame, area: Rect, sort_by: SortBy) {
    let mode = |label: &str, active: bool| {
        if active {
            Span::styled(
                format!(" {label} "),
                Style::default().fg(Color::White).bg(colors::ACCENT).bold(),
            )
        } else {
            Span::styled(format!(" {label} "), Style::default().fg(colors::DIM))
        }
    };
    let line = Line::from(vec![
        Span::styled("Sort: ", Style::default().fg(colors::DIM)),
        mode("[c] Chronological", sort_by == SortBy::Chronology),
        Span::raw(" "),
        mode("[r] Release", sort_by == SortBy::Release),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_catalog(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(colors::DIM))
        .title(" Catalog ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    let mut selected_row = 0usize;
    let mut card_index = 0usize;

    for group in app.groups() {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            format!("{} ({})", group.phase, group.productions.len()),
            Style::default().fg(colors::ACCENT).bold(),
        )));

        for production in &group.productions {
            let checkbox = if app.watched.is_watched(&production.title) {
                "[x]"
            } else {
                "[ ]"
            };
            let selected = card_index == app.selected();
            if selected {
                selected_row = lines.len();
            }

            let mut style = Style::default().fg(colors::TEXT);
            if app.watched.is_watched(&production.title) {
                style = style.fg(colors::WATCHED);
            }
            if selected {
                style = style.add_modifier(Modifier::REVERSED);
            }

            lines.push(Line::from(vec![
                Span::styled(format!(" {checkbox} "), style),
                Span::styled(production.title.clone(), style.bold()),
                Span::styled(
                    format!(" ({}) · {}", production.release_year, production.production_type),
                    style,
                ),
            ]));
            card_index += 1;
        }
    }

    // Keep the selected row in view.
    let visible = inner.height as usize;
    let scroll = selected_row.saturating_sub(visible.saturating_sub(1)) as u16;
    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);
}

fn draw_detail(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(colors::DIM))
        .title(" Detail ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(production) = app.selected_production() else {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No productions",
                Style::default().fg(colors::DIM),
            )),
            inner,
        );
        return;
    };

    let expanded = app.is_expanded(&production.title);
    let watched = app.watched.is_watched(&production.title);
    let width = inner.width.max(1) as usize;

    let synopsis = if expanded {
        production.synopsis.clone()
    } else {
        truncate_to_lines(&production.synopsis, width, 2)
    };

    let mut lines = vec![
        Line::from(Span::styled(
            production.title.clone(),
            Style::default().fg(colors::TEXT).bold(),
        )),
        Line::from(Span::styled(
            format!(
                "{} · {} · {}",
                production.production_type, production.release_year, production.phase
            ),
            Style::default().fg(colors::DIM),
        )),
        Line::from(Span::styled(
            if watched { "Watched" } else { "Not watched" },
            Style::default().fg(if watched { colors::WATCHED } else { colors::DIM }),
        )),
        Line::from(Span::styled(
            format!("Poster: {}", production.poster()),
            Style::default().fg(colors::DIM),
        )),
        Line::from(""),
    ];
    lines.push(Line::from(Span::styled(
        synopsis,
        Style::default().fg(colors::TEXT),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        if expanded {
            "enter: hide synopsis"
        } else {
            "enter: full synopsis"
        },
        Style::default().fg(colors::DIM),
    )));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let text = match &app.notice {
        Some(notice) => Line::from(Span::styled(
            notice.clone(),
            Style::default().fg(colors::ERROR),
        )),
        None => Line::from(Span::styled(
            " ↑/↓ select · space watched · enter synopsis · c/r sort · q quit",
            Style::default().fg(colors::DIM),
        )),
    };
    frame.render_widget(Paragraph::new(text), area);
}

/// Vertically centered band of `height` rows spanning the full width
fn centered_band(area: Rect, height: u16) -> Rect {
    let top = area.height.saturating_sub(height) / 2;
    Rect {
        x: area.x,
        y: area.y + top,
        width: area.width,
        height: height.min(area.height),
    }
}

/// Character-based truncation to roughly `lines` rows of `width` columns,
/// with an ellipsis when the text was cut
fn truncate_to_lines(text: &str, width: usize, lines: usize) -> String {
    let budget = width.saturating_mul(lines);
    if budget == 0 || text.chars().count() <= budget {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(budget.saturating_sub(1)).collect();
    truncated.push('…');
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_not_truncated() {
        assert_eq!(truncate_to_lines("short", 40, 2), "short");
    }

    #[test]
    fn test_long_text_gets_ellipsis() {
        let text = "a".repeat(100);
        let truncated = truncate_to_lines(&text, 40, 2);
        assert_eq!(truncated.chars().count(), 80);
        assert!(truncated.ends_with('…'));
    }

    #[test]
    fn test_zero_width_passes_text_through() {
        assert_eq!(truncate_to_lines("anything", 0, 2), "anything");
    }
}
