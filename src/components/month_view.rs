use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::calendar::{DayCell, GridCell, MonthGrid};
use crate::theme;

const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub struct MonthView;

impl MonthView {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        grid: &MonthGrid,
        selected_date: NaiveDate,
        selected_event: usize,
        loading: bool,
    ) {
        let theme = theme::current();
        let title = if loading {
            format!(" {} (loading...) ", grid.month)
        } else {
            format!(" {} ", grid.month)
        };

        let block = Block::default()
            .title(title)
            .title_style(theme.header)
            .borders(Borders::ALL)
            .border_style(theme.border);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut constraints = vec![Constraint::Length(1)];
        constraints.extend((0..grid.row_count()).map(|_| Constraint::Fill(1)));
        let rows = Layout::vertical(constraints).split(inner);

        let header_cols = columns(rows[0]);
        for (name, col) in DAY_NAMES.iter().zip(header_cols.iter()) {
            let label = if col.width >= 5 { *name } else { &name[..1] };
            frame.render_widget(
                Paragraph::new(Span::styled(label, theme.header)).centered(),
                *col,
            );
        }

        for (week, row) in grid.weeks().zip(rows.iter().skip(1)) {
            for (cell, col) in week.iter().zip(columns(*row).iter()) {
                if let GridCell::Day(day) = cell {
                    let selected = day.date == selected_date;
                    render_day(frame, *col, day, selected.then_some(selected_event));
                }
            }
        }
    }
}

fn columns(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::horizontal([Constraint::Ratio(1, 7); 7]).split(area)
}

/// One day: number on the first line, then as many event labels as fit.
/// `highlight` is the index of the selected event when this day is selected.
fn render_day(frame: &mut Frame, area: Rect, day: &DayCell, highlight: Option<usize>) {
    let theme = theme::current();
    let number_style = match (day.is_today, highlight.is_some()) {
        (true, true) => theme.today.add_modifier(Modifier::BOLD | Modifier::REVERSED),
        (true, false) => theme.today,
        (false, true) => theme.selected,
        (false, false) => Style::default(),
    };

    let compact = area.height < 2 || area.width < 8;
    let mut lines = Vec::new();
    let marker = if compact && !day.events.is_empty() { "*" } else { "" };
    lines.push(Line::from(Span::styled(
        format!("{:>2}{marker}", day.number),
        number_style,
    )));

    if !compact {
        let room = area.height.saturating_sub(1) as usize;
        let total = day.events.len();
        let shown = if total > room { room.saturating_sub(1) } else { total };

        for (i, ev) in day.events.iter().take(shown).enumerate() {
            let style = if highlight == Some(i) {
                theme.highlight
            } else {
                theme.event
            };
            lines.push(Line::from(Span::styled(ev.label(), style)));
        }
        if shown < total {
            lines.push(Line::from(Span::styled(
                format!("+{} more", total - shown),
                theme.dim,
            )));
        }
    }

    frame.render_widget(Paragraph::new(lines), area);
}
