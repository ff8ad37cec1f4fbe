// UI rendering module
//
// This module contains all UI rendering components for hexwatch.
// The main draw() function orchestrates rendering of all UI panels.

mod banner;
pub mod hexbin;
mod host_list;
mod inspector;
mod status_bar;

use crate::app::AppState;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use banner::render_banner;
use hexbin::render_hexbin;
use host_list::render_host_list;
use inspector::render_host_inspector;
use status_bar::render_status_bar;

/// Main UI drawing function
pub fn draw(f: &mut Frame, app: &mut AppState) {
    let size = f.area();

    // Main layout: banner, body, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Banner
            Constraint::Min(0),    // Body
            Constraint::Length(3), // Status bar
        ])
        .split(size);

    // Banner
    render_banner(f, chunks[0], app);

    // Body: Honeycomb + right panels
    let body_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(70), // Honeycomb
            Constraint::Percentage(30), // Right panels
        ])
        .split(chunks[1]);

    render_hexbin(f, body_chunks[0], app);

    // Right side: Host detail + host list
    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(55), // Host detail
            Constraint::Percentage(45), // Host list
        ])
        .split(body_chunks[1]);

    render_host_inspector(f, right_chunks[0], app);
    render_host_list(f, right_chunks[1], app);

    // Status bar
    render_status_bar(f, chunks[2], app);
}
