use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::ui::Theme;

/// Draw one single-choice row: `(•) label` when selected
pub fn draw_radio_row(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    label: &str,
    selected: bool,
    focused: bool,
) {
    draw_marked_row(frame, area, theme, label, selected, focused, "(•)", "( )");
}

/// Draw one multi-select row: `[x] label` when checked
pub fn draw_checkbox_row(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    label: &str,
    checked: bool,
    focused: bool,
) {
    draw_marked_row(frame, area, theme, label, checked, focused, "[x]", "[ ]")
}

#[allow(clippy::too_many_arguments)]
fn draw_marked_row(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    label: &str,
    active: bool,
    focused: bool,
    on_mark: &str,
    off_mark: &str,
) {
    let mark = if active { on_mark } else { off_mark };
    let mark_style = if active {
        theme.secondary_style().add_modifier(Modifier::BOLD)
    } else {
        theme.muted_style()
    };
    let label_style = if focused {
        theme.primary_style().add_modifier(Modifier::BOLD)
    } else {
        theme.style()
    };

    let line = Line::from(vec![
        Span::styled(mark.to_string(), mark_style),
        Span::raw(" "),
        Span::styled(label.to_string(), label_style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
