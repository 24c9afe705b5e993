mod draft_popup;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Popup};
use crate::series::{Lifecycle, Series};
use crate::theme::Theme;

/// Visible text of one list item: title, then id
pub fn series_row(series: &Series) -> String {
    format!("{} {}", series.title, series.id)
}

/// One row per series, same order, nothing dropped
pub fn series_rows<'a>(series: impl IntoIterator<Item = &'a Series>) -> Vec<String> {
    series.into_iter().map(series_row).collect()
}

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info line
            Constraint::Min(5),    // Series + details
            Constraint::Length(1), // Footer
        ])
        .split(area);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);

    draw_info_line(f, app, chunks[0]);
    draw_series_list(f, app, body[0]);
    draw_details(f, app, body[1]);
    draw_footer(f, app, chunks[2]);

    match app.popup {
        Popup::None => {}
        Popup::Help => draw_help_popup(f, &app.theme),
        Popup::Draft => draft_popup::draw(f, app),
    }
}

fn draw_info_line(f: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;
    let line = if let Some(ref status) = app.status_message {
        let color = if app.status_is_error { t.danger } else { t.accent };
        Line::from(Span::styled(status.as_str(), Style::default().fg(color)))
    } else if app.filter {
        Line::from(vec![
            Span::styled("Viewing as ", Style::default().fg(t.text_dim)),
            Span::styled(app.viewer.label(), Style::default().fg(t.text)),
        ])
    } else {
        Line::from(Span::styled("Ready", Style::default().fg(t.text_dim)))
    };

    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn draw_series_list(f: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;
    let rows = app.rows();

    let block = Block::default()
        .title(Span::styled(
            format!(" Series ({}) ", rows.len()),
            Style::default().fg(t.accent).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(t.accent));

    if rows.is_empty() {
        let message = match app.series.state() {
            Lifecycle::Uninitialized => "  Not mounted",
            Lifecycle::Populated => "  No series to show",
        };
        let empty = Paragraph::new(message)
            .style(Style::default().fg(t.text_dim))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = series_rows(rows.iter().copied())
        .into_iter()
        .map(|row| ListItem::new(Line::styled(row, Style::default().fg(t.text))))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(t.bg_selected).fg(t.text))
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(app.selected));
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_details(f: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;
    let block = Block::default()
        .title(Span::styled(" Details ", Style::default().fg(t.inactive)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(t.inactive));

    let Some(series) = app.selected_series() else {
        let help = Paragraph::new("No series selected")
            .style(Style::default().fg(t.text_dim))
            .block(block);
        f.render_widget(help, area);
        return;
    };

    let label = |name: &'static str| Span::styled(format!("{:<14}", name), Style::default().fg(t.header));
    let value = |v: String| Span::styled(v, Style::default().fg(t.text));

    let participants = series
        .participants
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    let draft_line = match app.draft_for_selected() {
        Some(d) if d.progress.complete => value("complete".to_string()),
        Some(d) => value(format!("round {}, pick {}", d.progress.round, d.progress.pick)),
        None => Span::styled("not generated (d)", Style::default().fg(t.text_dim)),
    };

    let lines = vec![
        Line::from(vec![label("Title"), value(series.title.clone())]),
        Line::from(vec![label("Id"), value(series.id.to_string())]),
        Line::from(vec![label("Organizer"), value(series.organizer.clone())]),
        Line::from(vec![label("Participants"), value(participants)]),
        Line::from(vec![label("Draft"), draft_line]),
    ];

    let details = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(details, area);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;
    let key = |k: &'static str| Span::styled(k, Style::default().fg(t.accent));
    let desc = |d: &'static str| Span::styled(d, Style::default().fg(t.text_dim));

    let footer = Line::from(vec![
        key("j/k"),
        desc(" move  "),
        key("d"),
        desc(" draft  "),
        key("Enter"),
        desc(" open draft  "),
        key("f"),
        desc(" filter  "),
        key("?"),
        desc(" help  "),
        key("q"),
        desc(" quit"),
    ]);

    f.render_widget(Paragraph::new(footer).alignment(Alignment::Center), area);
}

fn draw_help_popup(f: &mut Frame, t: &Theme) {
    let popup_area = centered_rect(70, 80, f.area());
    f.render_widget(Clear, popup_area);

    let heading = |s: &'static str| {
        Line::from(Span::styled(s, Style::default().fg(t.header).add_modifier(Modifier::BOLD)))
    };
    let entry = |k: &'static str, d: &'static str| {
        Line::from(vec![Span::styled(k, Style::default().fg(t.accent)), Span::raw(d)])
    };

    let help_text = vec![
        heading("═══ Navigation ═══"),
        entry("  ↑/↓ j/k   ", "Move up/down in the series list"),
        entry("  f         ", "Toggle visibility filter for the configured viewer"),
        Line::from(""),
        heading("═══ Draft ═══"),
        entry("  d         ", "Generate a draft order for the selected series"),
        entry("  Enter     ", "Open the selected series' draft"),
        entry("  Space     ", "In the draft: current picker claims the next open event"),
        Line::from(""),
        heading("═══ Command Line ═══"),
        entry("  seriesboard --list        ", "Print series rows"),
        entry("  seriesboard --json        ", "Print series as JSON"),
        entry("  seriesboard --draft 1     ", "Print a draft order for series 1"),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", Style::default().fg(t.text_dim)),
            Span::styled("h", Style::default().fg(t.accent)),
            Span::styled("/", Style::default().fg(t.text_dim)),
            Span::styled("?", Style::default().fg(t.accent)),
            Span::styled("/", Style::default().fg(t.text_dim)),
            Span::styled("Esc", Style::default().fg(t.accent)),
            Span::styled(" to close", Style::default().fg(t.text_dim)),
        ]),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(Span::styled(" seriesboard Help ", Style::default().fg(t.accent)))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(t.accent)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
