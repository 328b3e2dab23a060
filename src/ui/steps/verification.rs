use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::App;
use crate::ui::widgets::draw_text_field;
use crate::vim::VimMode;
use crate::wizard::FieldId;

pub fn draw_verification_step(frame: &mut Frame, area: Rect, app: &App) {
    if area.height < 8 || area.width < 40 {
        return;
    }

    let mut y = area.y + 1;

    if app.wizard.code_sent() {
        let banner = if app.wizard.code_resent() {
            format!(
                "We've re-sent a verification code to {}",
                app.wizard.form().email
            )
        } else {
            format!(
                "We've sent a verification code to {}",
                app.wizard.form().email
            )
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(app.theme.secondary_style());
        let banner_area = Rect::new(area.x + 2, y, area.width.saturating_sub(4), 3);
        frame.render_widget(Paragraph::new(banner).block(block), banner_area);
        y += 4;
    }

    let focused = app.focused == 0;
    let insert = app.vim_mode == VimMode::Insert;
    if let Some(buffer) = app.buffer(FieldId::VerificationCode) {
        let row = Rect::new(area.x + 2, y, area.width.saturating_sub(4), 1);
        draw_text_field(
            frame,
            row,
            &app.theme,
            "Code",
            buffer,
            focused,
            insert,
        );
    }
    y += 2;

    let hint = Line::from(vec![
        Span::styled("Didn't receive the code? Press ", app.theme.muted_style()),
        Span::styled("r", app.theme.secondary_style().add_modifier(Modifier::BOLD)),
        Span::styled(" to resend", app.theme.muted_style()),
    ]);
    frame.render_widget(
        Paragraph::new(hint),
        Rect::new(area.x + 2, y, area.width.saturating_sub(4), 1),
    );
}
