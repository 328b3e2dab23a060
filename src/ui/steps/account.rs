use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{App, Control};
use crate::ui::widgets::{draw_checkbox_row, draw_text_field};
use crate::vim::VimMode;
use crate::wizard::FieldId;

fn field_label(field: FieldId) -> &'static str {
    match field {
        FieldId::FirstName => "First Name",
        FieldId::LastName => "Last Name",
        FieldId::Email => "Email",
        FieldId::Password => "Password",
        FieldId::ConfirmPassword => "Confirm",
        _ => "",
    }
}

pub fn draw_account_step(frame: &mut Frame, area: Rect, app: &App) {
    if area.height < 10 || area.width < 30 {
        return;
    }

    let insert = app.vim_mode == VimMode::Insert;
    let mut y = area.y + 1;

    frame.render_widget(
        Paragraph::new("Create Account")
            .style(app.theme.primary_style().add_modifier(Modifier::BOLD)),
        Rect::new(area.x + 2, y, area.width - 4, 1),
    );
    y += 2;

    for (idx, control) in app.controls.iter().enumerate() {
        if y >= area.y + area.height {
            break;
        }
        let focused = idx == app.focused;
        let row = Rect::new(area.x + 2, y, area.width.saturating_sub(4), 1);

        match control {
            Control::Input(field) => {
                if let Some(buffer) = app.buffer(*field) {
                    draw_text_field(
                        frame,
                        row,
                        &app.theme,
                        field_label(*field),
                        buffer,
                        focused,
                        insert,
                    );
                }
            }
            Control::Toggle(_) => {
                draw_checkbox_row(
                    frame,
                    row,
                    &app.theme,
                    "I agree to the Terms of Service and Privacy Policy",
                    app.wizard.form().agree_to_terms,
                    focused,
                );
            }
            _ => {}
        }
        y += 2;
    }
}
