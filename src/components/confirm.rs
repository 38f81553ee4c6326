use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::event_detail::centered;
use crate::calendar::CalendarEvent;
use crate::theme;

pub struct ConfirmDelete;

impl ConfirmDelete {
    pub fn render(frame: &mut Frame, area: Rect, ev: &CalendarEvent, processing: bool) {
        let popup = centered(area, 48, 7);
        frame.render_widget(Clear, popup);

        let theme = theme::current();
        let block = Block::default()
            .title(" Delete Event ")
            .title_style(theme.error.add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(theme.error);

        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let key = Style::default().add_modifier(Modifier::BOLD);
        let footer = if processing {
            Line::from(Span::styled("Processing...", theme.highlight))
        } else {
            Line::from(vec![
                Span::styled("y", key),
                Span::styled(":Delete ", theme.dim),
                Span::styled("n", key),
                Span::styled(":Keep", theme.dim),
            ])
        };

        let lines = vec![
            Line::from("Are you sure you want to delete this event?"),
            Line::from(Span::styled(
                format!("{} ({})", ev.title, ev.date.format("%Y-%m-%d")),
                theme.event,
            )),
            Line::from(""),
            footer,
        ];
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
    }
}
