use std::time::{Duration, Instant};

use chrono::{Datelike, NaiveDate};
use tracing::{debug, error, info, warn};

use crate::calendar::{CalendarEvent, EventDraft, EventFields, EventId, EventsApi, MonthGrid, YearMonth};
use crate::components::event_form::{EventFormState, FormMode};
use crate::error::ApiError;

/// How long a notification stays on screen.
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

const SAVED: &str = "Event saved successfully!";
const DELETED: &str = "Event deleted successfully!";
const SAVE_FAILED: &str = "Failed to save event";
const DELETE_FAILED: &str = "Failed to delete event";
const LOAD_FAILED: &str = "Failed to load events";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    raised: Instant,
}

impl Notice {
    fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            raised: Instant::now(),
        }
    }

    pub fn expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.raised) >= NOTICE_TTL
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    Closed,
    Details,
    Form(EventFormState),
    /// Delete confirmation, remembering what it was opened over.
    ConfirmDelete { previous: Box<Modal> },
}

/// A mutation in flight. Month loads are tracked separately since
/// navigation never waits on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Busy {
    Saving,
    Deleting,
}

/// A network operation the widget wants performed.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    LoadMonth { month: YearMonth, seq: u64 },
    Create(EventDraft),
    Update { id: EventId, draft: EventDraft },
    Delete { id: EventId },
}

/// A settled `Request`, fed back through `CalendarWidget::apply`.
#[derive(Debug)]
pub enum Outcome {
    Loaded {
        month: YearMonth,
        seq: u64,
        result: Result<Vec<CalendarEvent>, ApiError>,
    },
    Saved(Result<CalendarEvent, ApiError>),
    Deleted(Result<(), ApiError>),
}

impl Request {
    pub async fn execute(self, api: &dyn EventsApi) -> Outcome {
        match self {
            Request::LoadMonth { month, seq } => Outcome::Loaded {
                month,
                seq,
                result: api.list_month(month).await,
            },
            Request::Create(draft) => Outcome::Saved(api.create(&draft).await),
            Request::Update { id, draft } => Outcome::Saved(api.update(&id, &draft).await),
            Request::Delete { id } => Outcome::Deleted(api.delete(&id).await),
        }
    }
}

/// The month calendar: displayed month, cached events, open dialog.
///
/// Every method is synchronous. Those that need the network hand back a
/// [`Request`]; its [`Outcome`] goes to [`CalendarWidget::apply`], which may
/// answer with a follow-up request (the reload after a save or delete).
#[derive(Debug)]
pub struct CalendarWidget {
    month: YearMonth,
    events: Vec<CalendarEvent>,
    today: NaiveDate,
    selected_date: NaiveDate,
    selected_event: usize,
    form_mode: FormMode,
    current_event: Option<CalendarEvent>,
    modal: Modal,
    loading: bool,
    busy: Option<Busy>,
    load_seq: u64,
    notice: Option<Notice>,
}

impl CalendarWidget {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            month: YearMonth::of(today),
            events: Vec::new(),
            today,
            selected_date: today,
            selected_event: 0,
            form_mode: FormMode::Create,
            current_event: None,
            modal: Modal::Closed,
            loading: false,
            busy: None,
            load_seq: 0,
            notice: None,
        }
    }

    // ── accessors ──

    pub fn month(&self) -> YearMonth {
        self.month
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn form_mode(&self) -> FormMode {
        self.form_mode
    }

    pub fn current_event(&self) -> Option<&CalendarEvent> {
        self.current_event.as_ref()
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn busy(&self) -> Option<Busy> {
        self.busy
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Events on the selected day, in start-time order.
    pub fn day_events(&self) -> Vec<&CalendarEvent> {
        let mut day: Vec<&CalendarEvent> = self
            .events
            .iter()
            .filter(|ev| ev.date == self.selected_date)
            .collect();
        day.sort_by(|a, b| a.cmp_start(b));
        day
    }

    pub fn selected_event_index(&self) -> usize {
        self.selected_event
    }

    pub fn selected_event(&self) -> Option<&CalendarEvent> {
        self.day_events().get(self.selected_event).copied()
    }

    /// Month view model for the displayed month.
    pub fn render_month(&self) -> MonthGrid {
        MonthGrid::build(self.month, &self.events, self.today)
    }

    // ── housekeeping ──

    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
    }

    pub fn expire_notice(&mut self, now: Instant) {
        if self.notice.as_ref().is_some_and(|n| n.expired(now)) {
            self.notice = None;
        }
    }

    pub fn notify(&mut self, kind: NoticeKind, message: impl Into<String>) {
        self.notice = Some(Notice::new(kind, message));
    }

    // ── month navigation ──

    pub fn load_month(&mut self, year: i32, month: u32) -> Option<Request> {
        let Some(month) = YearMonth::new(year, month) else {
            warn!(year, month, "ignoring load of invalid month");
            return None;
        };
        Some(self.show_month(month))
    }

    pub fn reload(&mut self) -> Request {
        self.show_month(self.month)
    }

    pub fn go_to_previous_month(&mut self) -> Request {
        self.show_month(self.month.pred())
    }

    pub fn go_to_next_month(&mut self) -> Request {
        self.show_month(self.month.succ())
    }

    pub fn go_to_today(&mut self) -> Option<Request> {
        self.select_date(self.today)
    }

    /// Moves the day cursor, loading the new month when it is left.
    pub fn move_selection(&mut self, days: i64) -> Option<Request> {
        let target = self
            .selected_date
            .checked_add_signed(chrono::Duration::days(days))
            .unwrap_or(self.selected_date);
        self.select_date(target)
    }

    pub fn select_date(&mut self, date: NaiveDate) -> Option<Request> {
        self.selected_date = date;
        self.selected_event = 0;
        if self.month.contains(date) {
            None
        } else {
            Some(self.begin_load(YearMonth::of(date)))
        }
    }

    /// Cycles the highlighted event within the selected day.
    pub fn cycle_event(&mut self) {
        let count = self.day_events().len();
        if count > 0 {
            self.selected_event = (self.selected_event + 1) % count;
        }
    }

    fn show_month(&mut self, month: YearMonth) -> Request {
        if month != self.month {
            self.selected_date = month.clamp_day(self.selected_date.day());
            self.selected_event = 0;
        }
        self.begin_load(month)
    }

    fn begin_load(&mut self, month: YearMonth) -> Request {
        self.month = month;
        self.load_seq += 1;
        self.loading = true;
        debug!(%month, seq = self.load_seq, "loading month");
        Request::LoadMonth {
            month,
            seq: self.load_seq,
        }
    }

    // ── dialogs ──

    pub fn open_create_form(&mut self, preset: Option<NaiveDate>) {
        if self.busy.is_some() {
            return;
        }
        self.current_event = None;
        self.form_mode = FormMode::Create;
        self.modal = Modal::Form(EventFormState::new(preset.unwrap_or(self.today)));
    }

    pub fn open_edit_form(&mut self, event: CalendarEvent) {
        if self.busy.is_some() {
            return;
        }
        self.form_mode = FormMode::Edit;
        self.modal = Modal::Form(EventFormState::edit(&event));
        self.current_event = Some(event);
    }

    pub fn show_event_details(&mut self, event: CalendarEvent) {
        if self.busy.is_some() {
            return;
        }
        self.form_mode = FormMode::Create;
        self.current_event = Some(event);
        self.modal = Modal::Details;
    }

    /// Edits whatever event is current (from the details dialog).
    pub fn edit_current(&mut self) {
        match self.current_event.clone() {
            Some(event) => self.open_edit_form(event),
            None => warn!("no current event to edit"),
        }
    }

    /// Details for the highlighted event, or a new event on an empty day.
    pub fn activate_selection(&mut self) {
        match self.selected_event().cloned() {
            Some(event) => self.show_event_details(event),
            None => self.open_create_form(Some(self.selected_date)),
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut EventFormState> {
        match &mut self.modal {
            Modal::Form(form) if self.busy.is_none() => Some(form),
            _ => None,
        }
    }

    /// Ignored while a save or delete is pending; the dialog that sent it
    /// stays up until the outcome arrives.
    pub fn close_modal(&mut self) {
        if self.busy.is_some() {
            debug!("close ignored while a request is pending");
            return;
        }
        self.modal = Modal::Closed;
        self.current_event = None;
        self.form_mode = FormMode::Create;
    }

    // ── mutations ──

    /// Submits the open form's fields.
    pub fn submit_open_form(&mut self) -> Option<Request> {
        let fields = match &self.modal {
            Modal::Form(form) => form.fields.clone(),
            _ => return None,
        };
        self.submit_form(fields)
    }

    pub fn submit_form(&mut self, fields: EventFields) -> Option<Request> {
        if self.busy.is_some() {
            debug!("submit ignored while a request is pending");
            return None;
        }

        let draft = match fields.validate() {
            Ok(draft) => draft,
            Err(err) => {
                debug!(%err, "form rejected");
                self.notify(NoticeKind::Error, err.to_string());
                return None;
            }
        };

        self.busy = Some(Busy::Saving);
        match (&self.form_mode, &self.current_event) {
            (FormMode::Edit, Some(target)) => Some(Request::Update {
                id: target.id.clone(),
                draft,
            }),
            _ => Some(Request::Create(draft)),
        }
    }

    /// Asks for confirmation before deleting `event`. Nothing is sent until
    /// [`CalendarWidget::confirm_delete`].
    pub fn delete_event(&mut self, event: CalendarEvent) {
        if self.busy.is_some() {
            return;
        }
        let previous = std::mem::replace(&mut self.modal, Modal::Closed);
        let previous = match previous {
            Modal::ConfirmDelete { previous } => previous,
            other => Box::new(other),
        };
        self.current_event = Some(event);
        self.modal = Modal::ConfirmDelete { previous };
    }

    pub fn delete_current(&mut self) {
        match self.current_event.clone() {
            Some(event) => self.delete_event(event),
            None => warn!("no current event to delete"),
        }
    }

    pub fn confirm_delete(&mut self) -> Option<Request> {
        if self.busy.is_some() || !matches!(self.modal, Modal::ConfirmDelete { .. }) {
            return None;
        }
        let id = self.current_event.as_ref()?.id.clone();
        self.busy = Some(Busy::Deleting);
        Some(Request::Delete { id })
    }

    pub fn cancel_delete(&mut self) {
        if self.busy.is_some() {
            return;
        }
        if let Modal::ConfirmDelete { .. } = self.modal {
            self.restore_previous_modal();
        }
    }

    fn restore_previous_modal(&mut self) {
        self.modal = match std::mem::replace(&mut self.modal, Modal::Closed) {
            Modal::ConfirmDelete { previous } => *previous,
            other => other,
        };
        if self.modal == Modal::Closed {
            self.current_event = None;
        }
    }

    // ── settling ──

    /// Folds a settled request into the widget state. Returns the reload
    /// that has to follow a successful mutation.
    pub fn apply(&mut self, outcome: Outcome) -> Option<Request> {
        match outcome {
            Outcome::Loaded { month, seq, result } => {
                if seq != self.load_seq {
                    debug!(%month, seq, latest = self.load_seq, "discarding stale month load");
                    return None;
                }
                self.loading = false;
                match result {
                    Ok(mut events) => {
                        events.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.cmp_start(b)));
                        debug!(%month, count = events.len(), "month loaded");
                        self.events = events;
                    }
                    Err(err) => {
                        warn!(%month, error = %err, "failed to load events");
                        self.events.clear();
                        self.notify(NoticeKind::Error, err.user_message(LOAD_FAILED));
                    }
                }
                let count = self.day_events().len();
                if self.selected_event >= count {
                    self.selected_event = count.saturating_sub(1);
                }
                None
            }
            Outcome::Saved(result) => {
                self.busy = None;
                match result {
                    Ok(event) => {
                        info!(id = %event.id, title = %event.title, "event saved");
                        self.close_modal();
                        self.notify(NoticeKind::Success, SAVED);
                        Some(self.reload())
                    }
                    Err(err) => {
                        log_failure("save", &err);
                        self.notify(NoticeKind::Error, err.user_message(SAVE_FAILED));
                        None
                    }
                }
            }
            Outcome::Deleted(result) => {
                self.busy = None;
                match result {
                    Ok(()) => {
                        info!(id = ?self.current_event.as_ref().map(|e| &e.id), "event deleted");
                        self.close_modal();
                        self.notify(NoticeKind::Success, DELETED);
                        Some(self.reload())
                    }
                    Err(err) => {
                        log_failure("delete", &err);
                        self.restore_previous_modal();
                        self.notify(NoticeKind::Error, err.user_message(DELETE_FAILED));
                        None
                    }
                }
            }
        }
    }

    /// Runs `request` and every follow-up to completion.
    pub async fn drive(&mut self, api: &dyn EventsApi, request: Request) {
        let mut next = Some(request);
        while let Some(request) = next {
            let outcome = request.execute(api).await;
            next = self.apply(outcome);
        }
    }
}

fn log_failure(action: &str, err: &ApiError) {
    if err.is_transport() {
        error!(action, error = %err, "events API unreachable");
    } else {
        warn!(action, error = %err, "events API request failed");
    }
}
