use chrono::NaiveDate;

use super::event::{CalendarEvent, EventId};
use super::month::YearMonth;

/// One event as it appears inside a day cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSummary {
    pub id: EventId,
    pub start_time: String,
    pub title: String,
}

impl EventSummary {
    pub fn label(&self) -> String {
        format!("{} {}", self.start_time, self.title)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub number: u32,
    pub is_today: bool,
    pub events: Vec<EventSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridCell {
    /// Padding before the 1st, standing in for days of the previous month.
    Blank,
    Day(DayCell),
}

impl GridCell {
    pub fn as_day(&self) -> Option<&DayCell> {
        match self {
            GridCell::Day(day) => Some(day),
            GridCell::Blank => None,
        }
    }
}

/// Month view model: Sunday-first rows of seven cells.
///
/// Cells hold `start_weekday` blanks followed by one cell per day; the last
/// row is not padded, renderers fill it themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub month: YearMonth,
    pub cells: Vec<GridCell>,
}

impl MonthGrid {
    pub fn build(month: YearMonth, events: &[CalendarEvent], today: NaiveDate) -> Self {
        let leading = month.start_weekday() as usize;
        let days = month.days_in_month();

        let mut cells = Vec::with_capacity(leading + days as usize);
        cells.extend(std::iter::repeat(GridCell::Blank).take(leading));

        for number in 1..=days {
            let Some(date) = month.day(number) else {
                continue;
            };

            let mut on_day: Vec<&CalendarEvent> =
                events.iter().filter(|ev| ev.date == date).collect();
            on_day.sort_by(|a, b| a.cmp_start(b));

            cells.push(GridCell::Day(DayCell {
                date,
                number,
                is_today: date == today,
                events: on_day
                    .into_iter()
                    .map(|ev| EventSummary {
                        id: ev.id.clone(),
                        start_time: ev.start_time.clone(),
                        title: ev.title.clone(),
                    })
                    .collect(),
            }));
        }

        Self { month, cells }
    }

    pub fn leading_blanks(&self) -> usize {
        self.cells
            .iter()
            .take_while(|c| matches!(c, GridCell::Blank))
            .count()
    }

    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().filter_map(GridCell::as_day)
    }

    pub fn day(&self, number: u32) -> Option<&DayCell> {
        self.days().find(|d| d.number == number)
    }

    pub fn weeks(&self) -> std::slice::Chunks<'_, GridCell> {
        self.cells.chunks(7)
    }

    pub fn row_count(&self) -> usize {
        self.cells.len().div_ceil(7)
    }
}
