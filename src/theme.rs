use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Get the active theme. Falls back to the default if `init` never ran.
pub fn current() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

/// Install the theme described by the `[theme]` config section. Only the
/// first call has any effect.
pub fn init(config: &ThemeConfig) {
    let _ = THEME.set(config.to_theme());
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub today: Style,
    pub selected: Style,
    pub header: Style,
    pub dim: Style,
    pub border: Style,
    pub status: Style,
    pub highlight: Style,
    pub accent: Style,
    pub event: Style,
    pub success: Style,
    pub error: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            today: Style::default().fg(Color::Black).bg(Color::Yellow),
            selected: Style::default().fg(Color::Black).bg(Color::Cyan),
            header: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::DarkGray),
            border: Style::default().fg(Color::Gray),
            status: Style::default().fg(Color::White).bg(Color::DarkGray),
            highlight: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            accent: Style::default().fg(Color::Green),
            // wheat, as on the club site
            event: Style::default().fg(Color::Rgb(245, 222, 179)),
            success: Style::default().fg(Color::Black).bg(Color::Green),
            error: Style::default().fg(Color::White).bg(Color::Red),
        }
    }
}

impl Theme {
    /// Built-in preset by name; unknown names give the default.
    pub fn preset(name: &str) -> Self {
        match name {
            "nord" => Self::nord(),
            "gruvbox" => Self::gruvbox(),
            _ => Self::default(),
        }
    }

    fn nord() -> Self {
        let fg = Color::Rgb(229, 233, 240);
        let panel = Color::Rgb(67, 76, 94);
        Self {
            today: Style::default().fg(Color::Black).bg(Color::Rgb(235, 203, 139)),
            selected: Style::default().fg(Color::Black).bg(Color::Rgb(136, 192, 208)),
            header: Style::default().fg(fg).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(76, 86, 106)),
            border: Style::default().fg(panel),
            status: Style::default().fg(fg).bg(panel),
            highlight: Style::default().bg(panel).add_modifier(Modifier::BOLD),
            accent: Style::default().fg(Color::Rgb(163, 190, 140)),
            event: Style::default().fg(Color::Rgb(208, 135, 112)),
            success: Style::default().fg(Color::Black).bg(Color::Rgb(163, 190, 140)),
            error: Style::default().fg(fg).bg(Color::Rgb(191, 97, 106)),
        }
    }

    fn gruvbox() -> Self {
        let fg = Color::Rgb(235, 219, 178);
        let panel = Color::Rgb(80, 73, 69);
        Self {
            today: Style::default().fg(Color::Black).bg(Color::Rgb(250, 189, 47)),
            selected: Style::default().fg(Color::Black).bg(Color::Rgb(131, 165, 152)),
            header: Style::default().fg(fg).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(146, 131, 116)),
            border: Style::default().fg(Color::Rgb(102, 92, 84)),
            status: Style::default().fg(fg).bg(panel),
            highlight: Style::default().bg(panel).add_modifier(Modifier::BOLD),
            accent: Style::default().fg(Color::Rgb(184, 187, 38)),
            event: Style::default().fg(Color::Rgb(254, 128, 25)),
            success: Style::default().fg(Color::Black).bg(Color::Rgb(184, 187, 38)),
            error: Style::default().fg(fg).bg(Color::Rgb(204, 36, 29)),
        }
    }
}

// ── `[theme]` config section ──

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    pub preset: Option<String>,
    pub today_fg: Option<String>,
    pub today_bg: Option<String>,
    pub selected_fg: Option<String>,
    pub selected_bg: Option<String>,
    pub header_fg: Option<String>,
    pub dim_fg: Option<String>,
    pub border_fg: Option<String>,
    pub status_fg: Option<String>,
    pub status_bg: Option<String>,
    pub highlight_bg: Option<String>,
    pub accent_fg: Option<String>,
    pub event_fg: Option<String>,
}

impl ThemeConfig {
    pub fn to_theme(&self) -> Theme {
        let mut theme = self
            .preset
            .as_deref()
            .map(Theme::preset)
            .unwrap_or_default();

        recolor(&mut theme.today, &self.today_fg, &self.today_bg);
        recolor(&mut theme.selected, &self.selected_fg, &self.selected_bg);
        recolor(&mut theme.header, &self.header_fg, &None);
        recolor(&mut theme.dim, &self.dim_fg, &None);
        recolor(&mut theme.border, &self.border_fg, &None);
        recolor(&mut theme.status, &self.status_fg, &self.status_bg);
        recolor(&mut theme.highlight, &None, &self.highlight_bg);
        recolor(&mut theme.accent, &self.accent_fg, &None);
        recolor(&mut theme.event, &self.event_fg, &None);

        theme
    }
}

fn recolor(style: &mut Style, fg: &Option<String>, bg: &Option<String>) {
    if let Some(c) = fg.as_deref().and_then(parse_color) {
        *style = style.fg(c);
    }
    if let Some(c) = bg.as_deref().and_then(parse_color) {
        *style = style.bg(c);
    }
}

/// Parse a color string: hex "#rrggbb", or named colors.
fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        return Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?));
    }
    match s.to_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" => Some(Color::DarkGray),
        _ => None,
    }
}
