// Keyboard and mouse event handling
//
// This module contains the event handlers that process user input and
// update the application state accordingly.

use super::AppState;
use crate::hexbin::HexbinClick;
use crate::ui::hexbin::DOTS_PER_ROW;
use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};

/// Terminal rows scrolled per mouse wheel notch
const WHEEL_ROWS: f64 = 3.0;

/// Handle keyboard events and update application state
///
/// Returns `true` if the application should continue running,
/// `false` if it should exit.
///
/// # Key Bindings
/// - `q`, `Q`, `Esc` - Quit the application
/// - `r`, `R` - Refresh records and alerts now
/// - `+`, `=` - Increase refresh rate
/// - `-`, `_` - Decrease refresh rate
/// - `Left` / `Right` - Move hover to previous / next hexagon
/// - `Enter` - Click the hovered hexagon
/// - `c`, `C` - Clear the host filter
/// - `b`, `B` - Toggle alert blinking
/// - `l`, `L` - Toggle host labels
/// - `PageUp` / `PageDown` - Scroll the honeycomb
pub fn handle_key_event(app: &mut AppState, key: KeyCode) -> bool {
    match key {
        // Quit on 'q', 'Q', or Esc
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
            app.shutdown();
            false
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.force_refresh();
            true
        }
        // + = faster refresh (shorter interval)
        // - = slower refresh (longer interval)
        KeyCode::Char('+') | KeyCode::Char('=') => {
            app.increase_refresh_rate();
            true
        }
        KeyCode::Char('-') | KeyCode::Char('_') => {
            app.decrease_refresh_rate();
            true
        }
        KeyCode::Right => {
            app.hover_next();
            true
        }
        KeyCode::Left => {
            app.hover_previous();
            true
        }
        KeyCode::Enter => {
            app.click_hovered();
            true
        }
        KeyCode::Char('c') | KeyCode::Char('C') => {
            app.clear_filter();
            true
        }
        KeyCode::Char('b') | KeyCode::Char('B') => {
            app.hexbin_settings.blink_enabled = !app.hexbin_settings.blink_enabled;
            true
        }
        KeyCode::Char('l') | KeyCode::Char('L') => {
            app.hexbin_settings.labels_enabled = !app.hexbin_settings.labels_enabled;
            true
        }
        KeyCode::PageDown => {
            let page = page_height(app);
            app.scroll_hexbin(page);
            true
        }
        KeyCode::PageUp => {
            let page = page_height(app);
            app.scroll_hexbin(-page);
            true
        }
        _ => true,
    }
}

fn page_height(app: &AppState) -> f64 {
    app.viewport.map(|vp| vp.size.height).unwrap_or(0.0)
}

/// Handle mouse events from crossterm mouse capture
///
/// Returns the hexagon click emitted by this event, if any.
pub fn handle_mouse_event(app: &mut AppState, mouse: MouseEvent) -> Option<HexbinClick> {
    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            app.on_pointer_move(mouse.column, mouse.row);
            None
        }
        MouseEventKind::Down(MouseButton::Left) => app.on_pointer_click(mouse.column, mouse.row),
        MouseEventKind::ScrollDown => {
            app.scroll_hexbin(WHEEL_ROWS * DOTS_PER_ROW);
            None
        }
        MouseEventKind::ScrollUp => {
            app.scroll_hexbin(-WHEEL_ROWS * DOTS_PER_ROW);
            None
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Settings;
    use crate::telemetry::SimulatedFleetSource;
    use crossterm::event::KeyModifiers;
    use ratatui::layout::Rect;

    fn test_app(hosts: usize) -> AppState {
        AppState::with_source(
            Box::new(SimulatedFleetSource::new(hosts)),
            Settings::default(),
        )
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_quit_keys() {
        let mut app = test_app(3);

        // Test 'q' key
        assert!(app.running);
        let result = handle_key_event(&mut app, KeyCode::Char('q'));
        assert!(!result);
        assert!(!app.running);

        // Reset and test Esc key
        app.running = true;
        let result = handle_key_event(&mut app, KeyCode::Esc);
        assert!(!result);
        assert!(!app.running);
    }

    #[test]
    fn test_toggle_blink_and_labels() {
        let mut app = test_app(3);

        assert!(app.hexbin_settings.blink_enabled);
        handle_key_event(&mut app, KeyCode::Char('b'));
        assert!(!app.hexbin_settings.blink_enabled);
        handle_key_event(&mut app, KeyCode::Char('B'));
        assert!(app.hexbin_settings.blink_enabled);

        assert!(app.hexbin_settings.labels_enabled);
        handle_key_event(&mut app, KeyCode::Char('l'));
        assert!(!app.hexbin_settings.labels_enabled);
    }

    #[test]
    fn test_refresh_rate_controls() {
        let mut app = test_app(3);
        let initial_rate = app.refresh_config.refresh_ms;

        // Increase rate (decrease interval)
        handle_key_event(&mut app, KeyCode::Char('+'));
        assert!(app.refresh_config.refresh_ms < initial_rate);

        // Decrease rate (increase interval)
        handle_key_event(&mut app, KeyCode::Char('-'));
        assert_eq!(app.refresh_config.refresh_ms, initial_rate);
    }

    #[test]
    fn test_refresh_key_forces_poll() {
        let mut app = test_app(3);
        let generation = app.records_generation;
        handle_key_event(&mut app, KeyCode::Char('r'));
        app.on_tick();
        assert_eq!(app.records_generation, generation + 1);
    }

    #[test]
    fn test_keyboard_click_and_clear() {
        let mut app = test_app(4);
        app.sync_hexbin(Rect::new(0, 0, 40, 12));

        handle_key_event(&mut app, KeyCode::Right);
        handle_key_event(&mut app, KeyCode::Right);
        handle_key_event(&mut app, KeyCode::Enter);
        assert_eq!(app.filtered_host, "host-1");

        handle_key_event(&mut app, KeyCode::Char('c'));
        assert!(app.filtered_host.is_empty());
    }

    #[test]
    fn test_mouse_click_filters() {
        let mut app = test_app(4);
        app.sync_hexbin(Rect::new(0, 0, 40, 12));

        // First hexagon center (8, 11) dots -> terminal cell (4, 2)
        handle_mouse_event(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), 4, 2));
        assert_eq!(app.filtered_host, "host-0");

        // Same hexagon again clears the filter
        handle_mouse_event(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), 4, 2));
        assert!(app.filtered_host.is_empty());
    }

    #[test]
    fn test_mouse_emits_one_click_per_press() {
        let mut app = test_app(4);
        app.sync_hexbin(Rect::new(0, 0, 40, 12));

        let events = [
            mouse(MouseEventKind::Moved, 4, 2),
            mouse(MouseEventKind::Down(MouseButton::Left), 4, 2),
            mouse(MouseEventKind::Up(MouseButton::Left), 4, 2),
            mouse(MouseEventKind::Drag(MouseButton::Left), 5, 2),
            mouse(MouseEventKind::Down(MouseButton::Right), 4, 2),
            mouse(MouseEventKind::ScrollDown, 4, 2),
        ];
        let clicks: Vec<HexbinClick> = events
            .into_iter()
            .filter_map(|event| handle_mouse_event(&mut app, event))
            .collect();

        assert_eq!(
            clicks,
            vec![HexbinClick {
                host: "host-0".to_string(),
                previous_filtered: String::new(),
            }]
        );
        assert_eq!(app.filtered_host, "host-0");

        // A press over a gap emits nothing
        let miss = handle_mouse_event(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), 0, 0));
        assert_eq!(miss, None);
        assert_eq!(app.filtered_host, "host-0");
    }

    #[test]
    fn test_mouse_wheel_scrolls() {
        let mut app = test_app(80);
        app.sync_hexbin(Rect::new(0, 0, 20, 5));

        handle_mouse_event(&mut app, mouse(MouseEventKind::ScrollDown, 3, 3));
        let scrolled = app.viewport.map(|vp| vp.scroll_y).unwrap_or_default();
        assert_eq!(scrolled, WHEEL_ROWS * DOTS_PER_ROW);

        handle_mouse_event(&mut app, mouse(MouseEventKind::ScrollUp, 3, 3));
        assert_eq!(app.viewport.map(|vp| vp.scroll_y), Some(0.0));
    }

    #[test]
    fn test_page_keys_scroll() {
        let mut app = test_app(80);
        app.sync_hexbin(Rect::new(0, 0, 20, 5));

        handle_key_event(&mut app, KeyCode::PageDown);
        assert_eq!(app.viewport.map(|vp| vp.scroll_y), Some(20.0));
        handle_key_event(&mut app, KeyCode::PageUp);
        assert_eq!(app.viewport.map(|vp| vp.scroll_y), Some(0.0));
    }
}
