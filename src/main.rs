mod app;
mod calendar;
mod components;
mod config;
mod error;
mod logging;
mod theme;
mod tui;
mod widget;

use std::sync::Arc;
use std::time::Duration;

use app::App;
use calendar::HttpEventsApi;
use chrono::Local;
use color_eyre::Result;
use config::Config;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use tracing::info;
use widget::{Modal, NoticeKind};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = Config::load()?;
    logging::init(&config.log)?;
    theme::init(&config.theme);

    let api = HttpEventsApi::new(&config.api.base_url, config.api.timeout())?;
    info!(base_url = %config.api.base_url, "starting club calendar");

    eprintln!("Loading events from {}...", config.api.base_url);
    let mut app = App::new(Arc::new(api), Local::now().date_naive());
    app.load_initial().await;

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app);
    tui::restore()?;
    info!("club calendar closed");
    result
}

fn run(terminal: &mut tui::Tui, app: &mut App) -> Result<()> {
    while app.running {
        app.tick();

        terminal.draw(|frame| {
            let area = frame.area();
            let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);

            render_main(frame, layout[0], app);
            render_modal(frame, area, app.widget.modal(), app);

            if app.show_help {
                render_help(frame, area);
            }

            components::StatusBar::render(frame, layout[1], &app.widget);
        })?;

        if let Some(key) = tui::next_key_event(Duration::from_millis(100))? {
            handle_key(app, key);
        }
    }

    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.running = false;
        return;
    }

    // Help overlay takes priority
    if app.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
            app.show_help = false;
        }
        return;
    }

    let handler: fn(&mut App, KeyEvent) = match app.widget.modal() {
        Modal::Closed => handle_normal_input,
        Modal::Details => handle_details_input,
        Modal::Form(_) => handle_form_input,
        Modal::ConfirmDelete { .. } => handle_confirm_input,
    };
    handler(app, key);
}

fn handle_normal_input(app: &mut App, key: KeyEvent) {
    let widget = &mut app.widget;
    let request = match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            None
        }
        KeyCode::Char('?') => {
            app.show_help = true;
            None
        }
        KeyCode::Left | KeyCode::Char('h') => widget.move_selection(-1),
        KeyCode::Right | KeyCode::Char('l') => widget.move_selection(1),
        KeyCode::Up | KeyCode::Char('k') => widget.move_selection(-7),
        KeyCode::Down | KeyCode::Char('j') => widget.move_selection(7),
        KeyCode::Char('[') => Some(widget.go_to_previous_month()),
        KeyCode::Char(']') => Some(widget.go_to_next_month()),
        KeyCode::Char('t') => widget.go_to_today(),
        KeyCode::Char('r') => {
            widget.notify(NoticeKind::Info, format!("Reloading {}", widget.month()));
            Some(widget.reload())
        }
        KeyCode::Tab => {
            widget.cycle_event();
            None
        }
        KeyCode::Enter => {
            widget.activate_selection();
            None
        }
        KeyCode::Char('n') => {
            widget.open_create_form(Some(widget.selected_date()));
            None
        }
        KeyCode::Char('e') => {
            if let Some(ev) = widget.selected_event().cloned() {
                widget.open_edit_form(ev);
            }
            None
        }
        KeyCode::Char('d') => {
            if let Some(ev) = widget.selected_event().cloned() {
                widget.delete_event(ev);
            }
            None
        }
        _ => None,
    };
    app.dispatch(request);
}

fn handle_details_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.widget.close_modal(),
        KeyCode::Char('e') => app.widget.edit_current(),
        KeyCode::Char('d') => app.widget.delete_current(),
        _ => {}
    }
}

fn handle_form_input(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('d') && app.widget.current_event().is_some() {
            app.widget.delete_current();
        }
        return;
    }

    match key.code {
        KeyCode::Esc => app.widget.close_modal(),
        KeyCode::Enter => {
            let request = app.widget.submit_open_form();
            app.dispatch(request);
        }
        code => {
            // None while a save is pending: input is locked.
            let Some(form) = app.widget.form_mut() else {
                return;
            };
            match code {
                KeyCode::Tab => form.next_field(),
                KeyCode::BackTab => form.prev_field(),
                KeyCode::Backspace => form.backspace(),
                KeyCode::Char(c) => form.input_char(c),
                _ => {}
            }
        }
    }
}

fn handle_confirm_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            let request = app.widget.confirm_delete();
            app.dispatch(request);
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.widget.cancel_delete(),
        _ => {}
    }
}

fn render_main(frame: &mut ratatui::Frame, area: Rect, app: &App) {
    let widget = &app.widget;
    let grid = widget.render_month();

    let month_area = if area.width >= 100 {
        let content = Layout::horizontal([Constraint::Min(60), Constraint::Length(38)]).split(area);
        components::DayView::render(
            frame,
            content[1],
            widget.selected_date(),
            &widget.day_events(),
            widget.selected_event_index(),
        );
        content[0]
    } else {
        area
    };

    components::MonthView::render(
        frame,
        month_area,
        &grid,
        widget.selected_date(),
        widget.selected_event_index(),
        widget.is_loading(),
    );
}

fn render_modal(frame: &mut ratatui::Frame, area: Rect, modal: &Modal, app: &App) {
    let widget = &app.widget;
    let processing = widget.busy().is_some();
    match modal {
        Modal::Closed => {}
        Modal::Details => {
            if let Some(ev) = widget.current_event() {
                components::EventDetail::render(frame, area, ev);
            }
        }
        Modal::Form(form) => {
            components::EventForm::render(frame, area, form, widget.form_mode(), processing)
        }
        Modal::ConfirmDelete { previous } => {
            render_modal(frame, area, previous, app);
            if let Some(ev) = widget.current_event() {
                components::ConfirmDelete::render(frame, area, ev, processing);
            }
        }
    }
}

fn render_help(frame: &mut ratatui::Frame, area: Rect) {
    use ratatui::style::{Modifier, Style};
    use ratatui::text::{Line, Span};
    use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

    let popup_area = components::event_detail::centered(area, 52, 24);
    frame.render_widget(Clear, popup_area);

    let theme = theme::current();
    let block = Block::default()
        .title(" Keybindings ")
        .title_style(theme.accent.add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(theme.accent);

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = Style::default().add_modifier(Modifier::BOLD);
    let section_style = Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    let entry = |keys: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {keys:<10}"), key_style),
            Span::raw(desc),
        ])
    };

    let lines = vec![
        Line::from(Span::styled("Calendar", section_style)),
        entry("h/l", "Previous/next day"),
        entry("j/k", "Next/previous week"),
        entry("[/]", "Previous/next month"),
        entry("t", "Jump to today"),
        entry("r", "Reload month"),
        entry("Tab", "Next event on the day"),
        entry("Enter", "Event details, or add on empty day"),
        entry("n/e/d", "New / edit / delete event"),
        Line::from(""),
        Line::from(Span::styled("Event form", section_style)),
        entry("Tab", "Next field (Shift-Tab back)"),
        entry("Enter", "Save"),
        entry("Ctrl-D", "Delete the event being edited"),
        entry("Esc", "Cancel"),
        Line::from(""),
        Line::from(Span::styled("Details", section_style)),
        entry("e / d", "Edit / delete"),
        Line::from(""),
        entry("?", "Toggle this help"),
        entry("q", "Quit / close dialog"),
    ];

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
