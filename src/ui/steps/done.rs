use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::App;
use crate::ui::Layout;

pub fn draw_done_screen(frame: &mut Frame, area: Rect, app: &App) {
    let box_area = Layout::centered_box(area, 54, 8);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Registration complete!",
            app.theme.success_style().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("You're all set, {}.", app.wizard.form().first_name)),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", app.theme.muted_style()),
            Span::styled(
                "Enter",
                app.theme.secondary_style().add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to open your dashboard", app.theme.muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.success_style())
        .title(" Welcome ")
        .title_style(app.theme.success_style().add_modifier(Modifier::BOLD));

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center),
        box_area,
    );
}
