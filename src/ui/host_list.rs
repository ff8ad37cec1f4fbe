// Host List rendering module
//
// Renders the scrollable list of hosts in source order with health-based
// coloring. The filtered host is highlighted and kept in view.

use crate::app::AppState;
use crate::hexbin::HostStatusLevel;
use crate::telemetry::HostStatusRecord;
use crate::theme::{health_color, HEALTH_CRITICAL, HEALTH_WARNING, SELECTION_BG};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem},
    Frame,
};

/// One row of the host list: "name  cpu% / mem%  [LEVEL]"
pub fn host_line(record: &HostStatusRecord) -> String {
    format!(
        " {} {:>5.1}% / {:>5.1}% [{}]",
        record.name,
        record.cpu,
        record.memory,
        HostStatusLevel::from_record(record).label()
    )
}

pub fn render_host_list(f: &mut Frame, area: Rect, app: &mut AppState) {
    let mut items = Vec::new();

    for (idx, record) in app.records.iter().enumerate() {
        let level_color = health_color(HostStatusLevel::from_record(record));

        // Alert marker if the host is in the alert list
        let alert_tag = if app.alert_hosts.contains(&record.name) {
            Span::styled(
                " !",
                Style::default()
                    .fg(HEALTH_CRITICAL)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::raw("")
        };

        items.push(ListItem::new(Line::from(vec![
            Span::styled(format!("{:3}.", idx + 1), Style::default().fg(Color::DarkGray)),
            Span::styled(host_line(record), Style::default().fg(level_color)),
            alert_tag,
        ])));
    }

    let title = format!("━ Hosts ({}) ", app.records.len());

    let list = List::new(items)
        .block(
            Block::default()
                .title(vec![
                    Span::styled(
                        title,
                        Style::default()
                            .fg(HEALTH_WARNING)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled("━━━━━━━", Style::default().fg(HEALTH_WARNING)),
                ])
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(HEALTH_WARNING)),
        )
        .highlight_style(Style::default().bg(SELECTION_BG));

    f.render_stateful_widget(list, area, &mut app.host_list_state);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_line_format() {
        let line = host_line(&HostStatusRecord::new("web-01", 5.0, 72.3, 0.0));
        assert_eq!(line, " web-01   5.0% /  72.3% [Good]");
    }

    #[test]
    fn test_host_line_level() {
        let line = host_line(&HostStatusRecord::new("db", 99.0, 95.0, 0.0));
        assert!(line.ends_with("[Critical]"));
    }
}
