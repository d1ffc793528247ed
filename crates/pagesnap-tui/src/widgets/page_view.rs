use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, CELL_HEIGHT_PX};

pub struct PageViewWidget;

impl PageViewWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let scroll = app.animator.current_scroll();
        let selector = &app.config.snap.part;

        let mut offset = 0.0;
        for section in &app.page.sections {
            let top_px = offset - scroll;
            offset += section.height;

            // Section rows relative to the viewport, before clipping
            let top = area.y as i32 + (top_px / CELL_HEIGHT_PX).round() as i32;
            let bottom = top + (section.height / CELL_HEIGHT_PX).round() as i32;

            // Clip to the visible area
            let y0 = top.max(area.top() as i32);
            let y1 = bottom.min(area.bottom() as i32);
            if y1 <= y0 {
                continue;
            }

            let snappable = &section.tag == selector;
            let style = if snappable {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            };

            let rect = Rect::new(area.x, y0 as u16, area.width, (y1 - y0) as u16);
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(style)
                .title(section.title.as_str());
            frame.render_widget(block, rect);

            if snappable {
                let inner = Rect::new(
                    rect.x + 2,
                    rect.y + rect.height / 2,
                    rect.width.saturating_sub(4),
                    1.min(rect.height),
                );
                let label = format!("{} ({}px)", section.title, section.height as i64);
                frame.render_widget(Paragraph::new(label).style(style), inner);
            }
        }
    }
}
