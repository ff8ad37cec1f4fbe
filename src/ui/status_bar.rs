// Status Bar rendering module
//
// Renders the bottom status bar with keyboard shortcuts and toggle indicators.

use crate::app::AppState;
use crate::theme::{ACCENT_BLUE, HEALTH_CRITICAL, HEALTH_GOOD, TEXT_NEUTRAL};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

struct Hint {
    priority: u8,
    key: &'static str,
    desc: &'static str,
    color: Color,
}

static HINTS: [Hint; 8] = [
    Hint { priority: 1, key: "Q:", desc: "Quit | ", color: HEALTH_CRITICAL },
    Hint { priority: 1, key: "←→:", desc: "Hover | ", color: ACCENT_BLUE },
    Hint { priority: 1, key: "Enter:", desc: "Filter | ", color: ACCENT_BLUE },
    Hint { priority: 2, key: "C:", desc: "Clear | ", color: ACCENT_BLUE },
    Hint { priority: 2, key: "R:", desc: "Refresh | ", color: ACCENT_BLUE },
    Hint { priority: 2, key: "+/-:", desc: "Speed | ", color: ACCENT_BLUE },
    Hint { priority: 3, key: "B/L:", desc: "Blink/Labels | ", color: ACCENT_BLUE },
    Hint { priority: 3, key: "PgUp/PgDn:", desc: "Scroll | ", color: ACCENT_BLUE },
];

/// Hints that fit into `available_width`, highest priority first
///
/// Order within the bar follows the hint table, not the priority.
fn visible_hints(available_width: usize) -> Vec<&'static Hint> {
    let mut chosen = vec![false; HINTS.len()];
    let mut current_length = 0;

    // Process hints by priority
    for priority in 1..=3 {
        for (idx, hint) in HINTS.iter().enumerate() {
            if hint.priority == priority {
                let hint_length = hint.key.chars().count() + hint.desc.len();
                if current_length + hint_length <= available_width {
                    chosen[idx] = true;
                    current_length += hint_length;
                }
            }
        }
    }

    HINTS
        .iter()
        .zip(chosen)
        .filter(|(_, keep)| *keep)
        .map(|(hint, _)| hint)
        .collect()
}

pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    // Calculate available width for hints (subtract borders, icon, and toggles)
    let available_width = area.width.saturating_sub(4 + 18) as usize;

    let mut spans = vec![Span::styled(" ⬡ ", Style::default().fg(ACCENT_BLUE))];
    for hint in visible_hints(available_width) {
        spans.push(Span::styled(
            hint.key,
            Style::default().fg(hint.color).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(hint.desc));
    }

    // Add toggle status indicators (always shown)
    spans.push(Span::raw(" "));
    spans.extend(build_toggle_indicators(app));

    let status_bar = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(ACCENT_BLUE)),
        )
        .alignment(Alignment::Left);

    f.render_widget(status_bar, area);
}

fn toggle_spans(key: &'static str, enabled: bool) -> [Span<'static>; 3] {
    let (state, color) = if enabled {
        ("ON", HEALTH_GOOD)
    } else {
        ("OFF", TEXT_NEUTRAL)
    };
    [
        Span::styled(format!("[{}:", key), Style::default().fg(TEXT_NEUTRAL)),
        Span::styled(state, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled("] ", Style::default().fg(TEXT_NEUTRAL)),
    ]
}

/// Build toggle status indicator spans for the status bar
/// Shows [B:ON/OFF] [L:ON/OFF], green for ON and neutral for OFF
pub fn build_toggle_indicators(app: &AppState) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    spans.extend(toggle_spans("B", app.hexbin_settings.blink_enabled));
    spans.extend(toggle_spans("L", app.hexbin_settings.labels_enabled));
    spans
}
