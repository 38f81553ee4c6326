use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::calendar::event::DATE_FORMAT;
use crate::calendar::{CalendarEvent, EventFields};
use crate::theme;

pub const DEFAULT_START: &str = "09:00";
pub const DEFAULT_END: &str = "10:00";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Date,
    StartTime,
    EndTime,
    Description,
}

impl FormField {
    pub fn next(&self) -> Self {
        match self {
            FormField::Title => FormField::Date,
            FormField::Date => FormField::StartTime,
            FormField::StartTime => FormField::EndTime,
            FormField::EndTime => FormField::Description,
            FormField::Description => FormField::Title,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            FormField::Title => FormField::Description,
            FormField::Date => FormField::Title,
            FormField::StartTime => FormField::Date,
            FormField::EndTime => FormField::StartTime,
            FormField::Description => FormField::EndTime,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFormState {
    pub fields: EventFields,
    pub active_field: FormField,
}

impl EventFormState {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            fields: EventFields {
                title: String::new(),
                date: date.format(DATE_FORMAT).to_string(),
                start_time: DEFAULT_START.to_string(),
                end_time: DEFAULT_END.to_string(),
                description: String::new(),
            },
            active_field: FormField::Title,
        }
    }

    pub fn edit(event: &CalendarEvent) -> Self {
        Self {
            fields: EventFields::from(event),
            active_field: FormField::Title,
        }
    }

    fn active_mut(&mut self) -> &mut String {
        match self.active_field {
            FormField::Title => &mut self.fields.title,
            FormField::Date => &mut self.fields.date,
            FormField::StartTime => &mut self.fields.start_time,
            FormField::EndTime => &mut self.fields.end_time,
            FormField::Description => &mut self.fields.description,
        }
    }

    pub fn input_char(&mut self, c: char) {
        self.active_mut().push(c);
    }

    pub fn backspace(&mut self) {
        self.active_mut().pop();
    }

    pub fn next_field(&mut self) {
        self.active_field = self.active_field.next();
    }

    pub fn prev_field(&mut self) {
        self.active_field = self.active_field.prev();
    }
}

pub struct EventForm;

impl EventForm {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        state: &EventFormState,
        mode: FormMode,
        processing: bool,
    ) {
        let form_w = area.width.clamp(30, 56);
        let form_h = area.height.clamp(10, 13);
        let x = area.x + (area.width.saturating_sub(form_w)) / 2;
        let y = area.y + (area.height.saturating_sub(form_h)) / 2;
        let form_area = Rect::new(x, y, form_w, form_h).intersection(area);

        frame.render_widget(Clear, form_area);

        let title = match mode {
            FormMode::Create => " Add Event ",
            FormMode::Edit => " Edit Event ",
        };
        let accent = theme::current().accent;
        let block = Block::default()
            .title(title)
            .title_style(accent.add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(accent);

        let inner = block.inner(form_area);
        frame.render_widget(block, form_area);

        let rows = Layout::vertical([
            Constraint::Length(1), // title
            Constraint::Length(1), // date
            Constraint::Length(1), // start time
            Constraint::Length(1), // end time
            Constraint::Length(3), // description
            Constraint::Length(1), // spacer
            Constraint::Length(1), // help
            Constraint::Min(0),
        ])
        .split(inner);

        let f = &state.fields;
        let active = |field: FormField| !processing && state.active_field == field;
        render_field(frame, rows[0], "Title:", &f.title, active(FormField::Title));
        render_field(frame, rows[1], "Date:", &f.date, active(FormField::Date));
        render_field(frame, rows[2], "Start:", &f.start_time, active(FormField::StartTime));
        render_field(frame, rows[3], "End:", &f.end_time, active(FormField::EndTime));
        render_field(frame, rows[4], "Notes:", &f.description, active(FormField::Description));

        let dim = theme::current().dim;
        let help = if processing {
            Line::from(Span::styled("Processing...", theme::current().highlight))
        } else {
            let mut spans = vec![
                Span::styled("Tab", Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(":Next ", dim),
                Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(":Save ", dim),
            ];
            if mode == FormMode::Edit {
                spans.push(Span::styled("^D", Style::default().add_modifier(Modifier::BOLD)));
                spans.push(Span::styled(":Delete ", dim));
            }
            spans.push(Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)));
            spans.push(Span::styled(":Cancel", dim));
            Line::from(spans)
        };
        frame.render_widget(Paragraph::new(help), rows[6]);
    }
}

fn render_field(frame: &mut Frame, area: Rect, label: &str, value: &str, active: bool) {
    let cursor = if active { "_" } else { "" };
    let style = if active {
        theme::current().accent
    } else {
        Style::default()
    };

    let mut lines = value.split('\n');
    let first = lines.next().unwrap_or_default();
    let mut out = vec![Line::from(vec![
        Span::styled(format!("{label:<7}"), theme::current().dim),
        Span::styled(first.to_string(), style),
    ])];
    out.extend(lines.map(|l| Line::from(Span::styled(format!("{:7}{l}", ""), style))));
    if let Some(last) = out.last_mut() {
        last.push_span(Span::styled(cursor, style));
    }

    frame.render_widget(Paragraph::new(out), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::EventId;

    #[test]
    fn new_form_uses_default_times() {
        let form = EventFormState::new(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(form.fields.date, "2024-03-15");
        assert_eq!(form.fields.start_time, "09:00");
        assert_eq!(form.fields.end_time, "10:00");
        assert!(form.fields.title.is_empty());
    }

    #[test]
    fn edit_form_copies_event() {
        let ev = CalendarEvent {
            id: EventId::new("3"),
            title: "AGM".into(),
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            start_time: "18:00".into(),
            end_time: "20:00".into(),
            description: None,
        };
        let form = EventFormState::edit(&ev);
        assert_eq!(form.fields.title, "AGM");
        assert_eq!(form.fields.start_time, "18:00");
        assert_eq!(form.fields.description, "");
    }

    #[test]
    fn typing_goes_to_active_field() {
        let mut form = EventFormState::new(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        form.input_char('R');
        form.input_char('i');
        form.next_field();
        form.next_field();
        form.backspace();
        form.input_char('5');
        assert_eq!(form.fields.title, "Ri");
        assert_eq!(form.fields.start_time, "09:05");

        form.prev_field();
        form.prev_field();
        form.prev_field();
        assert_eq!(form.active_field, FormField::Description);
    }
}
