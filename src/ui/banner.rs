// Banner rendering module
//
// Renders the top banner with the application title, the active source,
// and global fleet stats.

use crate::app::AppState;
use crate::theme::{ACCENT_BLUE, HEALTH_CRITICAL, HEALTH_GOOD, TEXT_NEUTRAL};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

/// Stats text shown next to the title
pub fn stats_text(app: &AppState) -> String {
    let updated = match app.last_update {
        Some(at) => format!("{}s ago", at.elapsed().as_secs()),
        None => "never".to_string(),
    };
    format!(
        " [Hosts: {}] [Alerts: {}] [Updated: {}]",
        app.records.len(),
        app.alert_hosts.len(),
        updated
    )
}

pub fn render_banner(f: &mut Frame, area: Rect, app: &AppState) {
    let alert_color = if app.alert_hosts.is_empty() {
        HEALTH_GOOD
    } else {
        HEALTH_CRITICAL
    };

    let mut source_spans = vec![
        Span::styled("  Source: ", Style::default().fg(Color::Gray)),
        Span::styled(app.source_label.clone(), Style::default().fg(Color::Cyan)),
    ];
    if let Some(err) = &app.source_error {
        source_spans.push(Span::styled(
            format!("  (error: {})", err),
            Style::default().fg(HEALTH_CRITICAL),
        ));
    }

    let banner_text = vec![
        Line::from(vec![
            Span::styled(
                "  ⬡ hexwatch",
                Style::default()
                    .fg(ACCENT_BLUE)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  node health honeycomb", Style::default().fg(TEXT_NEUTRAL)),
        ]),
        Line::from(source_spans),
        Line::from(vec![Span::styled(stats_text(app), Style::default().fg(alert_color))]),
    ];

    let banner = Paragraph::new(banner_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(ACCENT_BLUE)),
        )
        .alignment(Alignment::Left);

    f.render_widget(banner, area);
}
