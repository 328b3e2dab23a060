use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::ui::Theme;
use crate::vim::InputBuffer;

/// Draw one labeled input row with a vim-style cursor.
///
/// Insert mode shows a bar cursor, focused normal mode a block cursor.
pub fn draw_text_field(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    label: &str,
    buffer: &InputBuffer,
    focused: bool,
    insert: bool,
) {
    let label_width = 16u16;
    let label_style = if focused {
        theme.primary_style()
    } else {
        theme.style()
    };
    frame.render_widget(
        Paragraph::new(label.to_string()).style(label_style),
        Rect::new(area.x, area.y, label_width.min(area.width), 1),
    );

    let field_x = area.x + label_width;
    let field_width = area.width.saturating_sub(label_width);
    if field_width == 0 {
        return;
    }
    let field_area = Rect::new(field_x, area.y, field_width, 1);

    let display = buffer.display('*');

    if insert && focused {
        let cursor = buffer.cursor();
        let before: String = display.chars().take(cursor).collect();
        let after: String = display.chars().skip(cursor).collect();
        let line = Line::from(vec![
            Span::styled(before, theme.style()),
            Span::styled("|", theme.primary_style().add_modifier(Modifier::BOLD)),
            Span::styled(after, theme.style()),
        ]);
        frame.render_widget(Paragraph::new(line), field_area);
    } else if focused {
        let cursor = buffer.cursor();
        let chars: Vec<char> = display.chars().collect();
        let mut spans = Vec::new();
        for (i, ch) in chars.iter().enumerate() {
            let style = if i == cursor {
                theme.style().add_modifier(Modifier::REVERSED)
            } else {
                theme.style()
            };
            spans.push(Span::styled(ch.to_string(), style));
        }
        if cursor >= chars.len() {
            spans.push(Span::styled(
                " ",
                theme.style().add_modifier(Modifier::REVERSED),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), field_area);
    } else {
        let (text, style) = if display.is_empty() {
            ("(empty)".to_string(), theme.muted_style())
        } else {
            (display, theme.style())
        };
        frame.render_widget(Paragraph::new(text).style(style), field_area);
    }
}
