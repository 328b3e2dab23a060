use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{App, Control};
use crate::ui::widgets::{draw_checkbox_row, draw_radio_row};
use crate::wizard::FieldId;

fn section_title(field: FieldId) -> &'static str {
    match field {
        FieldId::Experience => "Investment Experience",
        FieldId::RiskTolerance => "Risk Tolerance",
        FieldId::AnnualIncome => "Annual Income",
        _ => "",
    }
}

pub fn draw_profile_step(frame: &mut Frame, area: Rect, app: &App) {
    if area.height < 10 || area.width < 40 {
        return;
    }

    let form = app.wizard.form();
    let mut y = area.y;
    let mut last_section = "";

    for (idx, control) in app.controls.iter().enumerate() {
        let focused = idx == app.focused;

        // Section header whenever the group changes
        let section = match control {
            Control::Choice { field, .. } => section_title(*field),
            Control::Goal { .. } => "Investment Goals (select all that apply)",
            _ => "",
        };
        if section != last_section {
            if y + 2 >= area.y + area.height {
                break;
            }
            frame.render_widget(
                Paragraph::new(section)
                    .style(app.theme.primary_style().add_modifier(Modifier::BOLD)),
                Rect::new(area.x + 2, y, area.width.saturating_sub(4), 1),
            );
            y += 1;
            last_section = section;
        }

        if y >= area.y + area.height {
            break;
        }
        let row = Rect::new(area.x + 4, y, area.width.saturating_sub(6), 1);

        match control {
            Control::Choice { field, value, label } => {
                let selected = form.text(*field) == Some(value.as_str());
                draw_radio_row(frame, row, &app.theme, label, selected, focused);
            }
            Control::Goal { value } => {
                draw_checkbox_row(frame, row, &app.theme, value, form.has_goal(value), focused);
            }
            _ => {}
        }
        y += 1;
    }
}
