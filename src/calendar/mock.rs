//! Scripted `EventsApi` for tests: an in-memory event table that records
//! every call and can be told to fail the next ones.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::api::EventsApi;
use super::event::{CalendarEvent, EventDraft, EventId};
use super::month::YearMonth;
use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List(YearMonth),
    Create(EventDraft),
    Update(EventId, EventDraft),
    Delete(EventId),
}

impl Call {
    /// HTTP method and path the production client would use.
    pub fn route(&self) -> String {
        match self {
            Call::List(m) => format!("GET /api/calendar/events?year={}&month={}", m.year(), m.month()),
            Call::Create(_) => "POST /api/calendar/events".to_string(),
            Call::Update(id, _) => format!("PUT /api/calendar/events/{id}"),
            Call::Delete(id) => format!("DELETE /api/calendar/events/{id}"),
        }
    }
}

#[derive(Debug, Default)]
struct State {
    events: Vec<CalendarEvent>,
    next_id: u64,
    calls: Vec<Call>,
    failures: VecDeque<ApiError>,
}

#[derive(Debug, Default)]
pub struct MockEventsApi {
    state: Mutex<State>,
}

impl MockEventsApi {
    pub fn with_events(events: Vec<CalendarEvent>) -> Self {
        let next_id = events.len() as u64 + 100;
        Self {
            state: Mutex::new(State {
                events,
                next_id,
                ..Default::default()
            }),
        }
    }

    /// The next call fails with `err` instead of touching the table.
    pub fn fail_next(&self, err: ApiError) {
        self.state.lock().unwrap().failures.push_back(err);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn routes(&self) -> Vec<String> {
        self.calls().iter().map(Call::route).collect()
    }

    fn record(&self, call: Call) -> Result<std::sync::MutexGuard<'_, State>, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        match state.failures.pop_front() {
            Some(err) => Err(err),
            None => Ok(state),
        }
    }
}

fn from_draft(id: EventId, draft: &EventDraft) -> CalendarEvent {
    CalendarEvent {
        id,
        title: draft.title.clone(),
        date: draft.date,
        start_time: draft.start_time.clone(),
        end_time: draft.end_time.clone(),
        description: Some(draft.description.clone()),
    }
}

fn not_found() -> ApiError {
    ApiError::Status {
        status: 404,
        message: None,
    }
}

#[async_trait]
impl EventsApi for MockEventsApi {
    async fn list_month(&self, month: YearMonth) -> Result<Vec<CalendarEvent>, ApiError> {
        let state = self.record(Call::List(month))?;
        Ok(state
            .events
            .iter()
            .filter(|ev| month.contains(ev.date))
            .cloned()
            .collect())
    }

    async fn create(&self, draft: &EventDraft) -> Result<CalendarEvent, ApiError> {
        let mut state = self.record(Call::Create(draft.clone()))?;
        state.next_id += 1;
        let event = from_draft(EventId::new(state.next_id.to_string()), draft);
        state.events.push(event.clone());
        Ok(event)
    }

    async fn update(&self, id: &EventId, draft: &EventDraft) -> Result<CalendarEvent, ApiError> {
        let mut state = self.record(Call::Update(id.clone(), draft.clone()))?;
        let slot = state
            .events
            .iter_mut()
            .find(|ev| &ev.id == id)
            .ok_or_else(not_found)?;
        *slot = from_draft(id.clone(), draft);
        Ok(slot.clone())
    }

    async fn delete(&self, id: &EventId) -> Result<(), ApiError> {
        let mut state = self.record(Call::Delete(id.clone()))?;
        let before = state.events.len();
        state.events.retain(|ev| &ev.id != id);
        if state.events.len() == before {
            return Err(not_found());
        }
        Ok(())
    }
}
