pub mod api;
pub mod event;
pub mod grid;
#[cfg(test)]
pub mod mock;
pub mod month;

pub use api::{EventsApi, HttpEventsApi};
pub use event::{CalendarEvent, EventDraft, EventFields, EventId};
pub use grid::{DayCell, GridCell, MonthGrid};
pub use month::YearMonth;
