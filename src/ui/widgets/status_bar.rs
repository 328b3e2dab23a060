use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::App;
use crate::vim::VimMode;

/// Dynamic status bar hints, updated as the app changes state
#[derive(Debug, Clone, Default)]
pub struct StatusBarState {
    pub left_hint: String,
    pub right_hint: String,
}

impl StatusBarState {
    pub fn welcome() -> Self {
        Self {
            left_hint: String::new(),
            right_hint: "Enter: start signup  q: quit".to_string(),
        }
    }

    pub fn form_normal(on_verification: bool) -> Self {
        let left = if on_verification {
            "i: edit  r: resend code".to_string()
        } else {
            "j/k: rows  i: edit  Space: toggle".to_string()
        };
        Self {
            left_hint: left,
            right_hint: "n: next  b: back  :help".to_string(),
        }
    }

    pub fn form_insert() -> Self {
        Self {
            left_hint: "Type to enter text".to_string(),
            right_hint: "Esc: normal  Tab: next row  Enter: submit".to_string(),
        }
    }

    pub fn command_mode() -> Self {
        Self {
            left_hint: String::new(),
            right_hint: "Enter: run  Esc: cancel".to_string(),
        }
    }

    pub fn submitting() -> Self {
        Self {
            left_hint: "Working...".to_string(),
            right_hint: String::new(),
        }
    }

    pub fn done() -> Self {
        Self {
            left_hint: String::new(),
            right_hint: "Enter: open dashboard and exit".to_string(),
        }
    }
}

pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mode = app.vim_mode.display_name();
    let mode_span = Span::styled(format!(" {mode} "), app.theme.mode_style(mode));

    let mut spans = vec![mode_span, Span::raw(" ")];

    if app.vim_mode == VimMode::Command {
        spans.push(Span::styled(
            format!(":{}", app.command_buffer.content()),
            app.theme.style(),
        ));
        spans.push(Span::styled("_", app.theme.primary_style()));
    } else {
        spans.push(Span::styled(
            app.status_bar.left_hint.clone(),
            app.theme.muted_style(),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);

    // Right-aligned hints
    if app.vim_mode != VimMode::Command && !app.status_bar.right_hint.is_empty() {
        let right = format!("{} ", app.status_bar.right_hint);
        let width = right.chars().count() as u16;
        if width < area.width {
            let right_area = Rect::new(area.x + area.width - width, area.y, width, 1);
            frame.render_widget(
                Paragraph::new(right).style(app.theme.muted_style()),
                right_area,
            );
        }
    }
}
