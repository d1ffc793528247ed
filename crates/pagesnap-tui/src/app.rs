//! Host application state for the terminal demo.
//!
//! The terminal plays the role of the browsing context: cells map to a
//! fixed number of pixels so the width gate and wheel step keep their
//! pixel-tuned meaning, the animator owns the scroll position, and input
//! events are routed through the snap controller before any default
//! scrolling happens.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use tracing::debug;

use pagesnap_core::{
    normalize_delta, AppConfig, NavKey, SnapController, ViewportMetrics, WheelEvent,
};

use crate::page::Page;
use crate::scroll::ScrollAnimator;

/// Horizontal pixels represented by one terminal column
pub const CELL_WIDTH_PX: f64 = 8.0;
/// Vertical pixels represented by one terminal row
pub const CELL_HEIGHT_PX: f64 = 20.0;
/// Wheel delta reported per scroll notch, classic mouse-wheel units
const WHEEL_DELTA_PER_NOTCH: f64 = 120.0;

/// Snapshot of the viewport handed to the controller for one event
pub struct TerminalViewport {
    pub scroll: f64,
    pub height: f64,
    pub width: f64,
}

impl ViewportMetrics for TerminalViewport {
    fn scroll_offset(&self) -> f64 {
        self.scroll
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn width(&self) -> f64 {
        self.width
    }
}

/// Application state
pub struct App {
    /// Application configuration
    pub config: AppConfig,
    /// The demo document
    pub page: Page,
    /// The snap decision state machine
    pub controller: SnapController,
    /// The smooth-scroll surface; owns the viewport scroll position
    pub animator: ScrollAnimator,
    /// Terminal width in cells
    pub term_cols: u16,
    /// Terminal height in cells (including the status bar row)
    pub term_rows: u16,
    /// Status message
    pub status_message: Option<String>,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig, page: Page) -> Self {
        let controller = SnapController::new(config.snap.clone(), &page);
        let animator = ScrollAnimator::new(config.ui.scroll.clone());
        Self {
            config,
            page,
            controller,
            animator,
            term_cols: 0,
            term_rows: 0,
            status_message: None,
            should_quit: false,
        }
    }

    /// Viewport width in pixels; the snap width gate compares against this
    pub fn viewport_width(&self) -> f64 {
        self.term_cols as f64 * CELL_WIDTH_PX
    }

    /// Viewport height in pixels; the status bar row is not part of the
    /// scrollable viewport
    pub fn viewport_height(&self) -> f64 {
        self.term_rows.saturating_sub(1) as f64 * CELL_HEIGHT_PX
    }

    /// Whether snapping is active at the current terminal width
    pub fn snap_enabled(&self) -> bool {
        self.viewport_width() > self.config.snap.min_viewport_width
    }

    /// Track the terminal size and re-clamp the scrollable range
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.term_cols = cols;
        self.term_rows = rows;
        let max = (self.page.content_height() - self.viewport_height()).max(0.0);
        self.animator.set_max_scroll(max);
    }

    fn viewport(&self) -> TerminalViewport {
        TerminalViewport {
            scroll: self.animator.current_scroll(),
            height: self.viewport_height(),
            width: self.viewport_width(),
        }
    }

    /// Route a mouse event; scroll notches become wheel events
    pub fn on_mouse(&mut self, mouse: MouseEvent) {
        let event = match mouse.kind {
            MouseEventKind::ScrollUp => WheelEvent::new(WHEEL_DELTA_PER_NOTCH),
            MouseEventKind::ScrollDown => WheelEvent::new(-WHEEL_DELTA_PER_NOTCH),
            _ => return,
        };
        let event = if mouse.modifiers.contains(KeyModifiers::CONTROL) {
            event.with_ctrl()
        } else {
            event
        };
        self.dispatch_wheel(event);
    }

    fn dispatch_wheel(&mut self, event: WheelEvent) {
        let view = self.viewport();
        let suppressed = self.controller.on_wheel(&event, &view, &mut self.animator);
        if !suppressed {
            // Default scroll: one wheel step against the delta direction
            // (delta -1 means toward later content, increasing offset).
            let delta = normalize_delta(&event);
            if delta != 0.0 {
                self.animator.scroll_by(-delta * self.config.snap.wheel_step);
            }
        }
        debug!(suppressed, "wheel event dispatched");
    }

    /// Route a key event
    pub fn on_key(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::NONE) | (KeyCode::Esc, KeyModifiers::NONE) => {
                self.should_quit = true;
            }
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            (KeyCode::Down, KeyModifiers::NONE) => {
                let view = self.viewport();
                self.controller
                    .on_key(NavKey::ArrowDown, &view, &mut self.animator);
            }
            (KeyCode::Up, KeyModifiers::NONE) => {
                let view = self.viewport();
                self.controller
                    .on_key(NavKey::ArrowUp, &view, &mut self.animator);
            }
            (KeyCode::Char('r'), KeyModifiers::NONE) => {
                self.controller.refresh(&self.page);
                self.set_status("parts re-measured");
            }
            _ => {}
        }
    }

    /// Advance the scroll animation one frame
    pub fn tick(&mut self) {
        self.animator.update();
    }

    /// Whether the main loop should poll at the animation rate
    pub fn needs_fast_update(&self) -> bool {
        self.animator.needs_update()
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let mut app = App::new(AppConfig::default(), Page::demo());
        // 160 cols * 8px = 1280px wide, 31 rows -> 30 * 20px = 600px tall
        app.resize(160, 31);
        app
    }

    fn wheel(kind: MouseEventKind, modifiers: KeyModifiers) -> MouseEvent {
        MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers,
        }
    }

    #[test]
    fn test_cell_to_pixel_mapping() {
        let app = app();
        assert_eq!(app.viewport_width(), 1280.0);
        assert_eq!(app.viewport_height(), 600.0);
        assert!(app.snap_enabled());
    }

    #[test]
    fn test_narrow_terminal_disables_snapping() {
        let mut app = app();
        // 112 cols * 8px = 896px, below the 900px gate
        app.resize(112, 31);
        assert!(!app.snap_enabled());

        app.on_mouse(wheel(MouseEventKind::ScrollDown, KeyModifiers::NONE));
        // Default scroll still proceeds: a full wheel step is pending.
        app.animator.update();
        assert_eq!(app.animator.target_scroll(), 300.0);
    }

    #[test]
    fn test_scroll_down_from_top_snaps_to_first_boundary() {
        let mut app = app();

        app.on_mouse(wheel(MouseEventKind::ScrollDown, KeyModifiers::NONE));

        // Hero is 800px tall with a 600px viewport: overscroll
        // prevention aligns its bottom with the viewport bottom.
        assert!(app.controller.is_settling());
        assert_eq!(app.animator.target_scroll(), 200.0);
    }

    #[test]
    fn test_ctrl_wheel_is_never_hijacked() {
        let mut app = app();

        app.on_mouse(wheel(MouseEventKind::ScrollDown, KeyModifiers::CONTROL));

        assert!(!app.controller.is_settling());
        // Default scroll proceeds for the zoom chord as well.
        app.animator.update();
        assert_eq!(app.animator.target_scroll(), 300.0);
    }

    #[test]
    fn test_arrow_down_snaps_without_default_scroll() {
        let mut app = app();

        app.on_key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));

        assert!(app.controller.is_settling());
        assert_eq!(app.animator.target_scroll(), 200.0);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        app.on_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(app.should_quit);
    }

    #[test]
    fn test_refresh_rebinds_page_measurements() {
        let mut app = app();
        app.page.sections[0].height = 1100.0;

        app.on_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE));

        assert_eq!(app.controller.parts()[0].height, 1100.0);
    }
}
