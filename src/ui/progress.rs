use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{App, Screen};

/// One-line step indicator: `[1] Create Account ── [2] Investment Profile ── ...`
/// with the active step highlighted and completed steps checked off.
pub fn draw_progress(frame: &mut Frame, area: Rect, app: &App) {
    if app.screen != Screen::Form {
        return;
    }

    let current = app.wizard.current_step();
    let mut spans: Vec<Span> = vec![Span::raw(" ")];

    for (idx, step) in app.wizard.steps().iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled(" ── ", app.theme.muted_style()));
        }

        let done = idx < current || app.wizard.is_complete();
        let marker = if done {
            format!("[✓] {}", step.title)
        } else {
            format!("[{}] {}", idx + 1, step.title)
        };

        let style = if idx == current && !app.wizard.is_complete() {
            app.theme.primary_style().add_modifier(Modifier::BOLD)
        } else if done {
            app.theme.success_style()
        } else {
            app.theme.muted_style()
        };
        spans.push(Span::styled(marker, style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);

    // Step description on the second line
    if area.height > 1 {
        let description = app.wizard.current_definition().description;
        let desc_area = Rect::new(area.x + 1, area.y + 1, area.width.saturating_sub(1), 1);
        frame.render_widget(
            Paragraph::new(description).style(app.theme.muted_style()),
            desc_area,
        );
    }
}
