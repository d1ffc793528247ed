use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let snap_str = if app.controller.is_settling() {
            "SNAPPING"
        } else if app.snap_enabled() {
            "SNAP ON"
        } else {
            "SNAP OFF (narrow)"
        };

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else {
            format!(
                " {} | {:.0}px / {:.0}px | width {:.0}px | parts: {}",
                snap_str,
                app.animator.current_scroll(),
                app.page.content_height(),
                app.viewport_width(),
                app.controller.parts().len()
            )
        };

        let help_hint = " wheel/↓/↑:scroll r:re-measure q:quit ";
        let padding_len = area
            .width
            .saturating_sub(status_text.chars().count() as u16 + help_hint.chars().count() as u16)
            as usize;

        let line = Line::from(vec![
            Span::styled(
                status_text,
                Style::default().fg(Color::Black).bg(Color::Cyan),
            ),
            Span::styled(" ".repeat(padding_len), Style::default().bg(Color::Cyan)),
            Span::styled(
                help_hint,
                Style::default().fg(Color::DarkGray).bg(Color::Cyan),
            ),
        ]);

        let paragraph = Paragraph::new(line);
        frame.render_widget(paragraph, area);
    }
}
