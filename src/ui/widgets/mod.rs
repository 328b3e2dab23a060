mod choice;
mod message_panel;
mod status_bar;
mod text_field;

pub use choice::{draw_checkbox_row, draw_radio_row};
pub use message_panel::draw_message_panel;
pub use status_bar::{StatusBarState, draw_status_bar};
pub use text_field::draw_text_field;

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::ui::Layout;

pub fn draw_confirm_quit(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Abandon signup and quit?",
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "  y",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" - Yes    "),
            Span::styled(
                "n",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" - No"),
        ]),
    ];

    let dialog_area = Layout::centered_box(area, 40, 6);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Quit ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

    frame.render_widget(Clear, dialog_area);
    frame.render_widget(
        Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center),
        dialog_area,
    );
}

pub fn draw_help(frame: &mut Frame, area: Rect) {
    let help_text = vec![
        Line::from(Span::styled(
            "Normal Mode",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("  j/k      Move between rows"),
        Line::from("  i        Edit the focused field"),
        Line::from("  Space    Toggle checkbox / select option"),
        Line::from("  n        Next step"),
        Line::from("  b        Previous step"),
        Line::from("  r        Resend verification code"),
        Line::from("  :        Enter command mode"),
        Line::from(""),
        Line::from(Span::styled(
            "Insert Mode",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("  Escape   Return to normal mode"),
        Line::from("  Tab      Next field"),
        Line::from("  Enter    Next field / submit step"),
        Line::from(""),
        Line::from(Span::styled(
            "Commands",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("  :next     Advance to the next step"),
        Line::from("  :back     Go back one step"),
        Line::from("  :resend   Resend the verification email"),
        Line::from("  :help     Show this help"),
        Line::from("  :q        Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Press Escape to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let height = help_text.len() as u16 + 2;
    let width = 45u16.min(area.width.saturating_sub(4));
    let help_area = Layout::centered_box(area, width, height);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Help ")
        .title_style(Style::default().fg(Color::Cyan));

    frame.render_widget(Clear, help_area);
    frame.render_widget(Paragraph::new(help_text).block(block), help_area);
}
