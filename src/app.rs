use std::sync::Arc;
use std::time::Instant;

use chrono::{Local, NaiveDate};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use crate::calendar::EventsApi;
use crate::widget::{CalendarWidget, Outcome, Request};

/// Runs the widget's requests on the tokio runtime and feeds the results
/// back from the UI loop, so the screen keeps redrawing while they are in
/// flight.
pub struct App {
    pub running: bool,
    pub show_help: bool,
    pub widget: CalendarWidget,
    api: Arc<dyn EventsApi>,
    tx: UnboundedSender<Outcome>,
    rx: UnboundedReceiver<Outcome>,
}

impl App {
    pub fn new(api: Arc<dyn EventsApi>, today: NaiveDate) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            running: true,
            show_help: false,
            widget: CalendarWidget::new(today),
            api,
            tx,
            rx,
        }
    }

    /// Loads the current month before the UI starts.
    pub async fn load_initial(&mut self) {
        let request = self.widget.reload();
        self.widget.drive(self.api.as_ref(), request).await;
    }

    pub fn dispatch(&self, request: Option<Request>) {
        let Some(request) = request else {
            return;
        };
        debug!(?request, "dispatching");
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = request.execute(api.as_ref()).await;
            // The receiver only goes away on shutdown.
            let _ = tx.send(outcome);
        });
    }

    /// Applies every settled request, dispatching the reloads they ask for.
    pub fn settle(&mut self) {
        while let Ok(outcome) = self.rx.try_recv() {
            let next = self.widget.apply(outcome);
            self.dispatch(next);
        }
    }

    /// Once per UI loop iteration.
    pub fn tick(&mut self) {
        self.widget.set_today(Local::now().date_naive());
        self.widget.expire_notice(Instant::now());
        self.settle();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::calendar::mock::MockEventsApi;
    use crate::widget::Modal;

    #[tokio::test]
    async fn dispatched_save_settles_into_a_reload() {
        let api = Arc::new(MockEventsApi::default());
        let mut app = App::new(api.clone(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        app.load_initial().await;

        app.widget.open_create_form(None);
        if let Some(form) = app.widget.form_mut() {
            form.input_char('X');
        }
        let request = app.widget.submit_open_form();
        app.dispatch(request);

        // save, then the reload it triggers
        for _ in 0..50 {
            app.settle();
            if api.calls().len() == 3 && !app.widget.is_loading() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        assert_eq!(api.calls().len(), 3);
        assert_eq!(app.widget.modal(), &Modal::Closed);
        assert_eq!(app.widget.events().len(), 1);
    }
}
