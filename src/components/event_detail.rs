use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::calendar::CalendarEvent;
use crate::theme;

pub struct EventDetail;

impl EventDetail {
    pub fn render(frame: &mut Frame, area: Rect, ev: &CalendarEvent) {
        let popup = centered(area, 60, 14);
        frame.render_widget(Clear, popup);

        let theme = theme::current();
        let block = Block::default()
            .title(format!(" {} ", ev.title))
            .title_style(theme.accent.add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(theme.accent);

        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let mut lines = vec![
            Line::from(vec![
                Span::styled("Date: ", theme.dim),
                Span::raw(ev.date.format("%A, %B %d, %Y").to_string()),
            ]),
            Line::from(vec![
                Span::styled("Time: ", theme.dim),
                Span::raw(ev.duration_display()),
            ]),
        ];

        if let Some(desc) = ev.description() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled("Description:", theme.dim)));
            lines.extend(desc.lines().map(|l| Line::from(l.to_string())));
        }

        lines.push(Line::from(""));
        let key = Style::default().add_modifier(Modifier::BOLD);
        lines.push(Line::from(vec![
            Span::styled("e", key),
            Span::styled(":Edit ", theme.dim),
            Span::styled("d", key),
            Span::styled(":Delete ", theme.dim),
            Span::styled("Esc", key),
            Span::styled(":Close", theme.dim),
        ]));

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}

/// A `w` x `h` rectangle centered in `area`, shrunk to fit.
pub fn centered(area: Rect, w: u16, h: u16) -> Rect {
    let w = w.min(area.width);
    let h = h.min(area.height);
    let x = area.x + (area.width - w) / 2;
    let y = area.y + (area.height - h) / 2;
    Rect::new(x, y, w, h)
}
