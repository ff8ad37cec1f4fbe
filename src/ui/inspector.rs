// Host Inspector rendering module
//
// Renders the detail panel for the filtered host (or a fleet overview when
// nothing is filtered): current metrics, health level, a load sparkline,
// and the alert list.

use crate::app::AppState;
use crate::hexbin::HostStatusLevel;
use crate::telemetry::alerts::is_alerting;
use crate::theme::{
    get_refresh_color, health_color, usage_color, ACCENT_BLUE, HEALTH_CRITICAL, HEALTH_WARNING,
    TEXT_NEUTRAL,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Sparkline},
    Frame,
};

// ============================================================================
// Host Inspector View Model
// ============================================================================

/// View model for the inspector panel
///
/// Contains all data needed to render the inspector, extracted from AppState.
/// This separates data extraction from rendering logic.
#[derive(Debug, Clone, PartialEq)]
pub struct HostDetailView {
    /// Host name, or "FLEET" for the overview
    pub target_name: String,
    /// CPU usage (percent); fleet average in the overview
    pub cpu: f64,
    /// Memory usage (percent); fleet average in the overview
    pub memory: f64,
    /// Traffic rate; fleet total in the overview
    pub traffic: f64,
    /// Health level of the target
    pub level: HostStatusLevel,
    /// Whether the target is alerting (overview: any host alerting)
    pub alerting: bool,
    /// Hosts covered (1 for a single host)
    pub host_count: usize,
    /// Alerting hosts to list
    pub alert_hosts: Vec<String>,
    /// Current UI refresh interval in milliseconds
    pub refresh_ms: u64,
    /// Whether a single host is shown
    pub has_selection: bool,
}

impl Default for HostDetailView {
    fn default() -> Self {
        Self {
            target_name: "FLEET".to_string(),
            cpu: 0.0,
            memory: 0.0,
            traffic: 0.0,
            level: HostStatusLevel::Good,
            alerting: false,
            host_count: 0,
            alert_hosts: Vec::new(),
            refresh_ms: 500,
            has_selection: false,
        }
    }
}

/// Build HostDetailView from AppState
///
/// - Filtered host present: shows that host's metrics
/// - Otherwise: shows fleet averages
pub fn build_host_detail_view(app: &AppState) -> HostDetailView {
    let mut view = HostDetailView {
        refresh_ms: app.refresh_config.refresh_ms,
        alert_hosts: app.alert_hosts.clone(),
        ..Default::default()
    };

    if let Some(record) = app.filtered_record() {
        view.target_name = record.name.clone();
        view.cpu = record.cpu;
        view.memory = record.memory;
        view.traffic = record.traffic;
        view.level = HostStatusLevel::from_record(record);
        view.alerting = app.alert_hosts.contains(&record.name)
            || is_alerting(record, &app.alert_config);
        view.host_count = 1;
        view.has_selection = true;
        return view;
    }

    let count = app.records.len();
    view.host_count = count;
    if count > 0 {
        view.cpu = app.records.iter().map(|r| r.cpu).sum::<f64>() / count as f64;
        view.memory = app.records.iter().map(|r| r.memory).sum::<f64>() / count as f64;
        view.traffic = app.records.iter().map(|r| r.traffic).sum();
        view.level = HostStatusLevel::from_load((view.cpu + view.memory) / 2.0);
    }
    view.alerting = !app.alert_hosts.is_empty();
    view
}

pub fn render_host_inspector(f: &mut Frame, area: Rect, app: &AppState) {
    // Build view model from app state
    let view = build_host_detail_view(app);

    // Split area for content, sparkline, and alerts
    let inspector_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9), // Metrics with refresh rate
            Constraint::Length(5), // Sparkline
            Constraint::Min(0),    // Alert list
        ])
        .split(area);

    // Check if refresh interval was recently changed
    let recently_changed = app
        .refresh_config
        .last_change
        .map(|last| last.elapsed() < crate::app::CHANGE_HIGHLIGHT_DURATION)
        .unwrap_or(false);

    let refresh_color = get_refresh_color(
        view.refresh_ms,
        crate::app::config::DEFAULT_REFRESH_MS,
        recently_changed,
    );

    // Apply highlight style if recently changed
    let refresh_style = if recently_changed {
        Style::default()
            .fg(refresh_color)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        Style::default().fg(refresh_color)
    };

    let level_color = health_color(view.level);
    let target_label = if view.has_selection {
        view.target_name.clone()
    } else {
        format!("{} ({} hosts)", view.target_name, view.host_count)
    };
    let alert_indicator = if view.alerting {
        Span::styled(
            " [ALERT]",
            Style::default()
                .fg(HEALTH_CRITICAL)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::raw("")
    };

    let top_content = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("  TARGET: "),
            Span::styled(
                target_label,
                Style::default()
                    .fg(ACCENT_BLUE)
                    .add_modifier(Modifier::BOLD),
            ),
            alert_indicator,
        ]),
        Line::from(vec![
            Span::raw("  STATUS: "),
            Span::styled(
                view.level.label(),
                Style::default()
                    .fg(level_color)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::raw("  CPU: "),
            Span::styled(
                format!("{:.1}%", view.cpu),
                Style::default().fg(usage_color(view.cpu)),
            ),
            Span::raw("  |  MEM: "),
            Span::styled(
                format!("{:.1}%", view.memory),
                Style::default().fg(usage_color(view.memory)),
            ),
        ]),
        Line::from(vec![
            Span::raw("  Traffic: "),
            Span::styled(format!("{:.1}", view.traffic), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::raw("  Refresh: "),
            Span::styled(format!("{}ms", view.refresh_ms), refresh_style),
        ]),
    ];

    let top_paragraph = Paragraph::new(top_content).block(
        Block::default()
            .title(vec![
                Span::styled(
                    "━ Host Detail ",
                    Style::default()
                        .fg(ACCENT_BLUE)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled("━━━━━━", Style::default().fg(ACCENT_BLUE)),
            ])
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(if view.alerting {
                HEALTH_CRITICAL
            } else {
                ACCENT_BLUE
            })),
    );

    f.render_widget(top_paragraph, inspector_chunks[0]);

    // Sparkline for load history
    let history: &[u64] = if view.has_selection {
        app.load_history
            .get(&view.target_name)
            .map(|h| h.as_slice())
            .unwrap_or(&[])
    } else {
        &app.fleet_history
    };
    let sparkline = Sparkline::default()
        .block(
            Block::default()
                .title(vec![Span::styled(
                    " Load History ",
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                )])
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(ACCENT_BLUE)),
        )
        .data(history)
        .style(Style::default().fg(level_color))
        .max(100);

    f.render_widget(sparkline, inspector_chunks[1]);

    // Alert list
    let mut alert_lines = vec![Line::from("")];
    if view.alert_hosts.is_empty() {
        alert_lines.push(Line::from(vec![Span::styled(
            "  (no alerts)",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]));
    } else {
        for host in &view.alert_hosts {
            let style = if *host == view.target_name {
                Style::default()
                    .fg(HEALTH_CRITICAL)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(TEXT_NEUTRAL)
            };
            alert_lines.push(Line::from(vec![
                Span::styled("  ! ", Style::default().fg(HEALTH_CRITICAL)),
                Span::styled(host.clone(), style),
            ]));
        }
    }

    let alert_paragraph = Paragraph::new(alert_lines).block(
        Block::default()
            .title(vec![Span::styled(
                format!(" Alerts ({}) ", view.alert_hosts.len()),
                Style::default()
                    .fg(HEALTH_WARNING)
                    .add_modifier(Modifier::BOLD),
            )])
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(ACCENT_BLUE)),
    );

    f.render_widget(alert_paragraph, inspector_chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Settings;
    use crate::hexbin::HexbinClick;
    use crate::telemetry::{FleetSnapshot, HostSource, HostStatusRecord, SourceError};

    struct FixedSource(Vec<HostStatusRecord>);

    impl HostSource for FixedSource {
        fn label(&self) -> String {
            "fixed".to_string()
        }

        fn fetch(&mut self) -> Result<FleetSnapshot, SourceError> {
            Ok(FleetSnapshot {
                hosts: self.0.clone(),
                alerts: Vec::new(),
            })
        }
    }

    fn app(records: Vec<HostStatusRecord>) -> AppState {
        let mut app = AppState::with_source(Box::new(FixedSource(records)), Settings::default());
        app.refresh_alerts();
        app
    }

    #[test]
    fn test_overview_averages_fleet() {
        let app = app(vec![
            HostStatusRecord::new("a", 20.0, 40.0, 10.0),
            HostStatusRecord::new("b", 40.0, 60.0, 5.0),
        ]);
        let view = build_host_detail_view(&app);

        assert!(!view.has_selection);
        assert_eq!(view.target_name, "FLEET");
        assert_eq!(view.host_count, 2);
        assert_eq!(view.cpu, 30.0);
        assert_eq!(view.memory, 50.0);
        assert_eq!(view.traffic, 15.0);
        assert_eq!(view.level, HostStatusLevel::Good);
        assert!(!view.alerting);
    }

    #[test]
    fn test_filtered_host_detail() {
        let mut app = app(vec![
            HostStatusRecord::new("a", 20.0, 40.0, 10.0),
            HostStatusRecord::new("b", 95.0, 60.0, 5.0),
        ]);
        app.on_hexbin_click(HexbinClick {
            host: "b".to_string(),
            previous_filtered: String::new(),
        });
        let view = build_host_detail_view(&app);

        assert!(view.has_selection);
        assert_eq!(view.target_name, "b");
        assert_eq!(view.cpu, 95.0);
        assert_eq!(view.level, HostStatusLevel::Warning);
        assert!(view.alerting);
        assert_eq!(view.alert_hosts, vec!["b".to_string()]);
    }

    #[test]
    fn test_empty_fleet_overview() {
        let view = build_host_detail_view(&app(Vec::new()));
        assert_eq!(view.host_count, 0);
        assert_eq!(view.cpu, 0.0);
        assert!(!view.alerting);
    }
}
