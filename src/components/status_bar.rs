use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme;
use crate::widget::{Busy, CalendarWidget, Modal, NoticeKind};

pub struct StatusBar;

impl StatusBar {
    pub fn render(frame: &mut Frame, area: Rect, widget: &CalendarWidget) {
        let theme = theme::current();
        let w = area.width as usize;

        let activity = match (widget.busy(), widget.is_loading()) {
            (Some(Busy::Saving), _) => " [Saving...]",
            (Some(Busy::Deleting), _) => " [Deleting...]",
            (None, true) => " [Loading...]",
            (None, false) => "",
        };
        let left = format!(" {}{} ", widget.month(), activity);

        let (right, right_style) = match widget.notice() {
            Some(notice) => {
                let style = match notice.kind {
                    NoticeKind::Success => theme.success,
                    NoticeKind::Error => theme.error,
                    NoticeKind::Info => theme.status,
                };
                (format!(" {} ", notice.message), style)
            }
            None => (hints(widget.modal(), w).to_string(), theme.status),
        };

        let padding = " ".repeat(w.saturating_sub(left.chars().count() + right.chars().count()));
        let line = Line::from(vec![
            Span::styled(left, theme.status),
            Span::styled(padding, theme.status),
            Span::styled(right, right_style),
        ]);

        frame.render_widget(Paragraph::new(line).style(theme.status), area);
    }
}

fn hints(modal: &Modal, w: usize) -> &'static str {
    match modal {
        Modal::Form(_) => " Tab:Field Enter:Save Esc:Cancel ",
        Modal::Details => " e:Edit d:Delete Esc:Close ",
        Modal::ConfirmDelete { .. } => " y:Delete n:Keep ",
        Modal::Closed if w >= 90 => {
            " hjkl:Day [/]:Month t:Today Tab:Event Enter:Open n:New e:Edit d:Del ?:Help q:Quit "
        }
        Modal::Closed if w >= 50 => " [/]:Month Enter:Open n:New ?:Help q:Quit ",
        Modal::Closed => " ?:Help q:Quit ",
    }
}
