// Hexbin (Node Health) rendering module
//
// Draws the honeycomb on a Braille canvas, one hexagon per host, colored by
// health level. Alerting hosts blink, the filtered host gets an accent
// outline, and the hovered host shows a tooltip.
//
// Layout space is measured in Braille dots: two per terminal column, four per
// terminal row. Layout y grows downwards while canvas y grows upwards, so
// every point is flipped against the visible height before drawing.

use crate::app::AppState;
use crate::hexbin::{hexagon_vertices, HexGeometry, HostStatusLevel, Point, Size, Viewport};
use crate::telemetry::HostStatusRecord;
use crate::theme::{
    dimmed, health_color, ACCENT_BLUE, HEALTH_CRITICAL, SELECTION_BG, TEXT_NEUTRAL,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine, Points},
        Block, BorderType, Borders, Clear, Paragraph,
    },
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Braille dots per terminal column
pub const DOTS_PER_COL: f64 = 2.0;

/// Braille dots per terminal row
pub const DOTS_PER_ROW: f64 = 4.0;

/// Sampling step for hexagon fill, in dots
const FILL_STEP: f64 = 1.0;

// ============================================================================
// Coordinate helpers
// ============================================================================

/// Map a terminal cell inside `area` to view coordinates (dot at the cell center)
///
/// Returns None when the cell lies outside `area`.
pub fn cell_to_view(area: Rect, col: u16, row: u16) -> Option<Point> {
    let inside = col >= area.x
        && row >= area.y
        && col < area.x.saturating_add(area.width)
        && row < area.y.saturating_add(area.height);
    if !inside {
        return None;
    }
    Some(Point::new(
        (col - area.x) as f64 * DOTS_PER_COL + DOTS_PER_COL / 2.0,
        (row - area.y) as f64 * DOTS_PER_ROW + DOTS_PER_ROW / 2.0,
    ))
}

/// Map a view point to the terminal cell that contains it
pub fn view_to_cell(area: Rect, point: Point) -> (u16, u16) {
    let col = (point.x.max(0.0) / DOTS_PER_COL).floor() as u16;
    let row = (point.y.max(0.0) / DOTS_PER_ROW).floor() as u16;
    (area.x.saturating_add(col), area.y.saturating_add(row))
}

/// Content point to canvas coordinates (y flipped)
fn to_canvas(point: Point, viewport: &Viewport) -> (f64, f64) {
    let view = viewport.to_view(point);
    (view.x, viewport.size.height - view.y)
}

// ============================================================================
// Tooltip
// ============================================================================

/// Text lines shown in a host tooltip
pub fn tooltip_lines(record: &HostStatusRecord) -> Vec<String> {
    let level = HostStatusLevel::from_record(record);
    vec![
        record.name.clone(),
        format!("Status:  {}", level.label()),
        format!("CPU:     {:.1}%", record.cpu),
        format!("Memory:  {:.1}%", record.memory),
        format!("Traffic: {:.1}", record.traffic),
    ]
}

/// Tooltip size in dots, including its border
///
/// Measured from the text before anything is drawn so the first frame a
/// tooltip appears in is already clamped.
pub fn tooltip_size(record: &HostStatusRecord) -> Size {
    let lines = tooltip_lines(record);
    let text_width = lines.iter().map(|l| l.width()).max().unwrap_or(0);
    let cols = text_width + 4; // border + one space each side
    let rows = lines.len() + 2; // border
    Size::new(cols as f64 * DOTS_PER_COL, rows as f64 * DOTS_PER_ROW)
}

/// Fit a host name into `max_cols` terminal columns, keeping the tail
///
/// Host names usually differ at the end (web-01, web-02), so the tail is the
/// part worth showing.
pub fn short_label(name: &str, max_cols: usize) -> String {
    if name.width() <= max_cols {
        return name.to_string();
    }
    let mut width = 0;
    let mut tail: Vec<char> = Vec::new();
    for c in name.chars().rev() {
        let w = c.width().unwrap_or(0);
        if width + w > max_cols {
            break;
        }
        width += w;
        tail.push(c);
    }
    tail.into_iter().rev().collect()
}

// ============================================================================
// Rendering
// ============================================================================

/// One hexagon prepared for the canvas closure
struct HexSprite {
    fill: Vec<(f64, f64)>,
    fill_color: Color,
    outline: Vec<(f64, f64, f64, f64)>,
    outline_color: Color,
    label: Option<(f64, f64, String)>,
}

fn outline_segments(vertices: &[Point; 6], viewport: &Viewport) -> Vec<(f64, f64, f64, f64)> {
    (0..6)
        .map(|k| {
            let (x1, y1) = to_canvas(vertices[k], viewport);
            let (x2, y2) = to_canvas(vertices[(k + 1) % 6], viewport);
            (x1, y1, x2, y2)
        })
        .collect()
}

fn build_sprite(
    hex: &HexGeometry,
    viewport: &Viewport,
    blink_dim: bool,
    labels_enabled: bool,
) -> HexSprite {
    let base = health_color(hex.health);
    let fill_color = if blink_dim { dimmed(base) } else { base };

    let outline_color = if hex.highlighted {
        ACCENT_BLUE
    } else if hex.blink {
        HEALTH_CRITICAL
    } else {
        dimmed(base)
    };

    let fill = hex
        .interior_points(FILL_STEP)
        .into_iter()
        .map(|(x, y)| to_canvas(Point::new(x, y), viewport))
        .collect();

    let mut outline = outline_segments(&hex.vertices, viewport);
    if hex.highlighted {
        // Second ring just outside the first so the selection reads clearly
        let outer = hexagon_vertices(hex.center, hex.radius + 1.0);
        outline.extend(outline_segments(&outer, viewport));
    }

    let label = if labels_enabled {
        let max_cols = (3f64.sqrt() * hex.radius / DOTS_PER_COL).floor() as usize;
        let text = short_label(&hex.name, max_cols);
        if text.is_empty() {
            None
        } else {
            let (cx, cy) = to_canvas(hex.center, viewport);
            let half = text.width() as f64 * DOTS_PER_COL / 2.0;
            Some((cx - half, cy, text))
        }
    } else {
        None
    };

    HexSprite {
        fill,
        fill_color,
        outline,
        outline_color,
        label,
    }
}

pub fn render_hexbin(f: &mut Frame, area: Rect, app: &mut AppState) {
    // Split: summary line + canvas
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);

    let canvas_block = Block::default()
        .borders(Borders::BOTTOM | Borders::LEFT | Borders::RIGHT)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT_BLUE));
    let inner = canvas_block.inner(chunks[1]);

    // Bring layout and bins up to date with the measured area
    app.sync_hexbin(inner);

    // Summary line
    let filter_text = if app.filtered_host.is_empty() {
        "none".to_string()
    } else {
        app.filtered_host.clone()
    };
    let summary = Paragraph::new(Line::from(vec![
        Span::styled(" ⬡ ", Style::default().fg(ACCENT_BLUE)),
        Span::styled(
            format!(
                "Hosts: {} | Alerts: {} | Filter: {}",
                app.records.len(),
                app.alert_hosts.len(),
                filter_text
            ),
            Style::default().fg(TEXT_NEUTRAL),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::TOP | Borders::LEFT | Borders::RIGHT)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(ACCENT_BLUE))
            .title(vec![Span::styled(
                "━ Node Health ━",
                Style::default()
                    .fg(ACCENT_BLUE)
                    .add_modifier(Modifier::BOLD),
            )]),
    );
    f.render_widget(summary, chunks[0]);

    let Some(viewport) = app.viewport else {
        f.render_widget(canvas_block, chunks[1]);
        return;
    };

    // Message shown instead of the honeycomb
    let message = match (&app.source_error, app.bins.is_empty()) {
        (Some(err), _) => Some((format!("Source error: {}", err), HEALTH_CRITICAL)),
        (None, true) => Some(("No hosts reported".to_string(), TEXT_NEUTRAL)),
        (None, false) => None,
    };

    // Prepare visible hexagons
    let blink_enabled = app.hexbin_settings.blink_enabled;
    let blink_on = app.blink_on;
    let labels_enabled = app.hexbin_settings.labels_enabled;
    let sprites: Vec<HexSprite> = if message.is_some() {
        Vec::new()
    } else {
        app.bins
            .hexagons
            .iter()
            .filter(|hex| {
                let y = viewport.to_view(hex.center).y;
                y + hex.radius >= 0.0 && y - hex.radius <= viewport.size.height
            })
            .map(|hex| {
                let blink_dim = hex.blink && blink_enabled && !blink_on;
                build_sprite(hex, &viewport, blink_dim, labels_enabled)
            })
            .collect()
    };

    let width = viewport.size.width;
    let height = viewport.size.height;
    let show_tooltip = message.is_none();

    // Canvas with Braille markers
    let canvas = Canvas::default()
        .block(canvas_block)
        .marker(Marker::Braille)
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(move |ctx| {
            if let Some((text, color)) = &message {
                let offset = text.width() as f64 * DOTS_PER_COL / 2.0;
                ctx.print(
                    (width / 2.0 - offset).max(0.0),
                    height / 2.0,
                    Span::styled(
                        text.clone(),
                        Style::default().fg(*color).add_modifier(Modifier::ITALIC),
                    ),
                );
                return;
            }

            for sprite in &sprites {
                ctx.draw(&Points {
                    coords: &sprite.fill,
                    color: sprite.fill_color,
                });
                for &(x1, y1, x2, y2) in &sprite.outline {
                    ctx.draw(&CanvasLine {
                        x1,
                        y1,
                        x2,
                        y2,
                        color: sprite.outline_color,
                    });
                }
            }

            // Labels go on top of every shape
            ctx.layer();
            for sprite in &sprites {
                if let Some((x, y, text)) = &sprite.label {
                    ctx.print(
                        *x,
                        *y,
                        Span::styled(
                            text.clone(),
                            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                        ),
                    );
                }
            }
        });

    f.render_widget(canvas, chunks[1]);

    if show_tooltip {
        render_tooltip(f, inner, app);
    }
}

fn render_tooltip(f: &mut Frame, inner: Rect, app: &AppState) {
    let Some((position, record)) = app.tooltip_anchor() else {
        return;
    };

    let size = tooltip_size(record);
    let (x, y) = view_to_cell(inner, position);
    let rect = Rect {
        x,
        y,
        width: (size.width / DOTS_PER_COL) as u16,
        height: (size.height / DOTS_PER_ROW) as u16,
    }
    .intersection(inner);
    if rect.width == 0 || rect.height == 0 {
        return;
    }

    let color = health_color(HostStatusLevel::from_record(record));
    let lines: Vec<Line> = tooltip_lines(record)
        .into_iter()
        .enumerate()
        .map(|(idx, text)| {
            let style = if idx == 0 {
                Style::default().fg(color).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(TEXT_NEUTRAL)
            };
            Line::from(Span::styled(format!(" {} ", text), style))
        })
        .collect();

    let tooltip = Paragraph::new(lines).style(Style::default().bg(SELECTION_BG)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color)),
    );

    f.render_widget(Clear, rect);
    f.render_widget(tooltip, rect);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_to_view_inside_and_outside() {
        let area = Rect::new(2, 3, 10, 5);
        assert_eq!(cell_to_view(area, 2, 3), Some(Point::new(1.0, 2.0)));
        assert_eq!(cell_to_view(area, 6, 5), Some(Point::new(9.0, 10.0)));
        assert_eq!(cell_to_view(area, 1, 3), None);
        assert_eq!(cell_to_view(area, 12, 3), None);
        assert_eq!(cell_to_view(area, 2, 8), None);
    }

    #[test]
    fn test_view_to_cell_inverts_cell_to_view() {
        let area = Rect::new(4, 1, 30, 10);
        for (col, row) in [(4, 1), (10, 5), (33, 10)] {
            let point = cell_to_view(area, col, row).unwrap();
            assert_eq!(view_to_cell(area, point), (col, row));
        }
    }

    #[test]
    fn test_tooltip_size_covers_text() {
        let record = HostStatusRecord::new("a-very-long-host-name", 12.0, 34.0, 5.0);
        let size = tooltip_size(&record);
        let longest = tooltip_lines(&record)
            .iter()
            .map(|l| l.width())
            .max()
            .unwrap();
        assert_eq!(size.width, (longest + 4) as f64 * DOTS_PER_COL);
        assert_eq!(size.height, 7.0 * DOTS_PER_ROW);
    }

    #[test]
    fn test_tooltip_lines_show_level() {
        let lines = tooltip_lines(&HostStatusRecord::new("db-1", 95.0, 91.0, 0.0));
        assert_eq!(lines[0], "db-1");
        assert!(lines[1].contains("Critical"));
        assert!(lines[2].contains("95.0%"));
    }

    #[test]
    fn test_short_label_keeps_tail() {
        assert_eq!(short_label("web-01", 8), "web-01");
        assert_eq!(short_label("web-prod-01", 5), "od-01");
        assert_eq!(short_label("abc", 0), "");
    }

    #[test]
    fn test_short_label_wide_chars() {
        // Each CJK character takes two columns
        assert_eq!(short_label("노드노드", 5), "노드");
    }
}
