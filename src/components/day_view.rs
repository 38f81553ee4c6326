use chrono::NaiveDate;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::calendar::CalendarEvent;
use crate::theme;

/// Agenda for the selected day, shown beside the month grid on wide
/// terminals.
pub struct DayView;

impl DayView {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        date: NaiveDate,
        events: &[&CalendarEvent],
        selected: usize,
    ) {
        let theme = theme::current();
        let w = area.width as usize;

        let title = if w >= 30 {
            format!(" {} ", date.format("%A, %B %d, %Y"))
        } else {
            format!(" {} ", date.format("%b %d"))
        };

        let n = events.len();
        let count = if n == 0 {
            String::new()
        } else {
            format!(" {} event{} ", n, if n == 1 { "" } else { "s" })
        };

        let block = Block::default()
            .title(title)
            .title_style(theme.header)
            .title_bottom(Line::from(Span::styled(count, theme.dim)))
            .borders(Borders::ALL)
            .border_style(theme.border);

        if events.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let msg = Paragraph::new("No events. Enter to add one.").style(theme.dim);
            frame.render_widget(msg, inner);
            return;
        }

        let items: Vec<ListItem> = events
            .iter()
            .enumerate()
            .map(|(i, ev)| format_event(ev, i == selected))
            .collect();

        frame.render_widget(List::new(items).block(block), area);
    }
}

fn format_event(ev: &CalendarEvent, selected: bool) -> ListItem<'static> {
    let theme = theme::current();
    let title_style = if selected { theme.highlight } else { Style::default() };

    let mut lines = vec![Line::from(vec![
        Span::styled(format!("{} ", ev.duration_display()), theme.event),
        Span::styled(ev.title.clone(), title_style),
    ])];
    if let Some(desc) = ev.description() {
        let first = desc.lines().next().unwrap_or_default();
        lines.push(Line::from(Span::styled(format!("  {first}"), theme.dim)));
    }

    ListItem::new(lines)
}
