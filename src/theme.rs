use ratatui::style::{Color, Modifier, Style};

use crate::notify::ToastKind;

/// Theme configuration for the composer
#[derive(Clone, Debug)]
pub struct Theme {
    /// Foreground (text) color for the status bar
    pub status_bar_fg: Color,

    /// Color for the host file name in the status bar
    pub host_path_color: Color,

    /// Color for the prompt preview text
    pub preview_fg: Color,

    /// Border color of the input box
    pub input_border_fg: Color,

    /// Foreground color for dropdown options
    pub dropdown_fg: Color,

    /// Background color for the dropdown overlay
    pub dropdown_bg: Color,

    /// Border color of the dropdown overlay
    pub dropdown_border_fg: Color,

    /// Foreground color for the focused dropdown option
    pub dropdown_focused_fg: Color,

    /// Background color for the focused dropdown option
    pub dropdown_focused_bg: Color,

    /// Foreground color for matched query text inside option names
    pub match_fg: Color,

    /// Background color for matched query text inside option names
    pub match_bg: Color,

    /// Color of the per-option delete control
    pub delete_fg: Color,

    /// Foreground color for the form popup
    pub form_fg: Color,

    /// Background color for the form popup
    pub form_bg: Color,

    /// Color for form field labels
    pub form_label_fg: Color,

    /// Color for inline validation messages
    pub form_error_fg: Color,

    /// Background color used to dim the screen behind the form
    pub backdrop_bg: Color,

    /// Foreground color for success toasts
    pub toast_success_fg: Color,

    /// Background color for success toasts
    pub toast_success_bg: Color,

    /// Foreground color for error toasts
    pub toast_error_fg: Color,

    /// Background color for error toasts
    pub toast_error_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            status_bar_fg: Color::White,
            host_path_color: Color::LightYellow,
            preview_fg: Color::Gray,
            input_border_fg: Color::DarkGray,
            dropdown_fg: Color::White,
            dropdown_bg: Color::Black,
            dropdown_border_fg: Color::Gray,
            dropdown_focused_fg: Color::Black,
            dropdown_focused_bg: Color::White,
            match_fg: Color::Black,
            match_bg: Color::LightYellow,
            delete_fg: Color::LightRed,
            form_fg: Color::White,
            form_bg: Color::Black,
            form_label_fg: Color::LightBlue,
            form_error_fg: Color::LightRed,
            backdrop_bg: Color::DarkGray,
            toast_success_fg: Color::Black,
            toast_success_bg: Color::LightGreen,
            toast_error_fg: Color::White,
            toast_error_bg: Color::LightRed,
        }
    }
}

impl Theme {
    /// Create a new theme with default colors
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the style for the status bar
    pub fn status_bar_style(&self) -> Style {
        Style::default().fg(self.status_bar_fg)
    }

    /// Get the style for the host file name in the status bar
    pub fn host_path_style(&self) -> Style {
        Style::default().fg(self.host_path_color)
    }

    /// Get the style for the prompt preview
    pub fn preview_style(&self) -> Style {
        Style::default().fg(self.preview_fg)
    }

    /// Get the style for the input box border
    pub fn input_border_style(&self) -> Style {
        Style::default().fg(self.input_border_fg)
    }

    /// Get the style for the dropdown overlay
    pub fn dropdown_style(&self) -> Style {
        Style::default().fg(self.dropdown_fg).bg(self.dropdown_bg)
    }

    /// Get the style for the dropdown border
    pub fn dropdown_border_style(&self) -> Style {
        Style::default().fg(self.dropdown_border_fg)
    }

    /// Get the style for the focused dropdown option
    pub fn dropdown_focused_style(&self) -> Style {
        Style::default()
            .fg(self.dropdown_focused_fg)
            .bg(self.dropdown_focused_bg)
    }

    /// Get the style for the parts of an option name that matched the query
    pub fn match_style(&self) -> Style {
        Style::default()
            .fg(self.match_fg)
            .bg(self.match_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Get the style for the per-option delete control
    pub fn delete_style(&self) -> Style {
        Style::default().fg(self.delete_fg)
    }

    /// Get the style for the form popup
    pub fn form_style(&self) -> Style {
        Style::default().fg(self.form_fg).bg(self.form_bg)
    }

    /// Get the style for form field labels
    pub fn form_label_style(&self) -> Style {
        Style::default()
            .fg(self.form_label_fg)
            .add_modifier(Modifier::BOLD)
    }

    /// Get the style for inline validation messages
    pub fn form_error_style(&self) -> Style {
        Style::default().fg(self.form_error_fg)
    }

    /// Get the style for the backdrop behind the form
    pub fn backdrop_style(&self) -> Style {
        Style::default().bg(self.backdrop_bg)
    }

    /// Get the style for a toast of the given kind
    pub fn toast_style(&self, kind: ToastKind) -> Style {
        match kind {
            ToastKind::Success => Style::default()
                .fg(self.toast_success_fg)
                .bg(self.toast_success_bg),
            ToastKind::Error => Style::default()
                .fg(self.toast_error_fg)
                .bg(self.toast_error_bg),
        }
    }
}
