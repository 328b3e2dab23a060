mod layout;
mod progress;
mod theme;
pub mod steps;
pub mod widgets;

pub use layout::Layout;
pub use theme::Theme;

use chrono::Local;
use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};

use crate::app::{App, Screen};

pub fn draw(frame: &mut Frame, app: &App) {
    let layout = Layout::new(frame.area());

    frame.render_widget(Clear, layout.full);

    draw_header(frame, layout.header, app);
    progress::draw_progress(frame, layout.progress, app);

    match app.screen {
        Screen::Welcome => steps::draw_welcome_screen(frame, layout.content, app),
        Screen::Done => steps::draw_done_screen(frame, layout.content, app),
        Screen::Form => match app.wizard.current_definition().id {
            "account" => steps::draw_account_step(frame, layout.content, app),
            "profile" => steps::draw_profile_step(frame, layout.content, app),
            "verification" => steps::draw_verification_step(frame, layout.content, app),
            _ => {}
        },
    }

    // Always reserved; shows content only when there's a message or work
    widgets::draw_message_panel(frame, layout.message, app);
    widgets::draw_status_bar(frame, layout.status, app);

    // Popups render on top of everything
    if app.show_help {
        widgets::draw_help(frame, layout.content);
    }
    if app.confirm_quit {
        widgets::draw_confirm_quit(frame, layout.content);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let title = format!(
        " {} Signup (v{}) ",
        app.config.general.title,
        env!("CARGO_PKG_VERSION")
    );
    frame.render_widget(
        Paragraph::new(title).style(app.theme.primary_style().add_modifier(Modifier::BOLD)),
        area,
    );

    let demo = if app.config.general.demo {
        "[Demo] "
    } else {
        ""
    };
    let clock = Local::now().format("%H:%M").to_string();
    let right = format!("{demo}{clock} ");
    let width = right.chars().count() as u16;
    if width < area.width {
        let right_area = Rect::new(area.x + area.width - width, area.y, width, 1);
        frame.render_widget(
            Paragraph::new(right).style(app.theme.muted_style()),
            right_area,
        );
    }
}
