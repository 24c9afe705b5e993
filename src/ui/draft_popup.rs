//! Draft order popup: rounds on the left, events and their hosts on the right

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table},
    Frame,
};

use super::centered_rect;
use crate::app::App;

pub(super) fn draw(f: &mut Frame, app: &App) {
    let t = &app.theme;
    let Some(draft) = app.draft_for_selected() else {
        return;
    };

    let popup_area = centered_rect(80, 80, f.area());
    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(Span::styled(
            format!(" Draft · Series {} ", draft.series_id),
            Style::default().fg(t.accent),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(t.accent));
    f.render_widget(block, popup_area);

    let inner = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(popup_area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner[0]);

    // Rounds, with the pick that is up highlighted
    let round_lines: Vec<Line> = draft
        .order
        .rounds
        .iter()
        .enumerate()
        .map(|(r, picks)| {
            let mut spans = vec![Span::styled(
                format!("Round {:<3}", r + 1),
                Style::default().fg(t.header),
            )];
            for (p, user) in picks.iter().enumerate() {
                let is_current = !draft.progress.complete
                    && draft.progress.round == r + 1
                    && draft.progress.pick == p + 1;
                let style = if is_current {
                    Style::default().fg(t.accent).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(t.text)
                };
                spans.push(Span::styled(format!(" {}", user), style));
            }
            Line::from(spans)
        })
        .collect();

    let rounds = Paragraph::new(round_lines).block(
        Block::default()
            .title(Span::styled(" Order ", Style::default().fg(t.header)))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.inactive)),
    );
    f.render_widget(rounds, columns[0]);

    let rows: Vec<Row> = draft
        .events
        .iter()
        .map(|event| {
            let (host, color) = match event.host {
                Some(h) => (format!("participant {}", h), t.success),
                None => ("open".to_string(), t.text_dim),
            };
            Row::new(vec![
                Span::styled(event.description.clone(), Style::default().fg(t.text)),
                Span::styled(host, Style::default().fg(color)),
            ])
        })
        .collect();

    let events = Table::new(rows, [Constraint::Percentage(50), Constraint::Percentage(50)])
        .header(Row::new(vec![
            Span::styled("Event", Style::default().fg(t.header)),
            Span::styled("Host", Style::default().fg(t.header)),
        ]))
        .block(
            Block::default()
                .title(Span::styled(" Events ", Style::default().fg(t.header)))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(t.inactive)),
        );
    f.render_widget(events, columns[1]);

    let status = match draft.current_picker() {
        Some(user) => Line::from(vec![
            Span::styled(format!("Participant {} is up", user), Style::default().fg(t.accent)),
            Span::styled(
                format!(" · {} left over · Space claims · Esc closes", draft.order.remainder),
                Style::default().fg(t.text_dim),
            ),
        ]),
        None => Line::from(Span::styled(
            "Draft complete · Esc closes",
            Style::default().fg(t.success),
        )),
    };
    f.render_widget(Paragraph::new(status), inner[1]);
}

#[cfg(test)]
mod tests {
    use crate::app::{App, Popup};
    use crate::config::AppConfig;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_popup_shows_rounds_and_hosts() {
        let mut config = AppConfig::default();
        config.draft.seed = Some(2);
        config.draft.event_count = 5;
        let mut app = App::new(config);
        app.mount();
        app.handle_key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::NONE))
            .unwrap();
        app.handle_key(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE))
            .unwrap();
        assert_eq!(app.popup, Popup::Draft);

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| super::super::draw(f, &app)).unwrap();
        let buffer = terminal.backend().buffer();
        let text: String = (0..buffer.area.height)
            .flat_map(|y| (0..buffer.area.width).map(move |x| (x, y)))
            .map(|pos| buffer[pos].symbol().to_string())
            .collect();

        assert!(text.contains("Round 1"));
        assert!(text.contains("Round 2"));
        assert!(!text.contains("Round 3"));
        assert!(text.contains("Event 5"));
        assert!(text.contains("open"));
        assert!(text.contains("1 left over"));
    }
}
