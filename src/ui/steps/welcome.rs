use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::App;

pub fn draw_welcome_screen(frame: &mut Frame, area: Rect, app: &App) {
    if area.height < 8 {
        return;
    }

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            app.config.general.title.clone(),
            app.theme.primary_style().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            app.config.general.subtitle.clone(),
            app.theme.muted_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Create Your Account",
            app.theme.style().add_modifier(Modifier::BOLD),
        )),
        Line::from("Join thousands of investors using AI-powered financial analysis"),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", app.theme.muted_style()),
            Span::styled(
                "Enter",
                app.theme.secondary_style().add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to begin", app.theme.muted_style()),
        ]),
    ];

    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        area,
    );
}
