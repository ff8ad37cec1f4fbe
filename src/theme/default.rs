// Default theme functions
//
// Maps host health and refresh settings to colors.

use ratatui::style::Color;

use super::{HEALTH_CRITICAL, HEALTH_FAIR, HEALTH_GOOD, HEALTH_WARNING};
use crate::hexbin::HostStatusLevel;

/// Fill color for a hexagon at the given health level
pub fn health_color(level: HostStatusLevel) -> Color {
    match level {
        HostStatusLevel::Good => HEALTH_GOOD,
        HostStatusLevel::Fair => HEALTH_FAIR,
        HostStatusLevel::Warning => HEALTH_WARNING,
        HostStatusLevel::Critical => HEALTH_CRITICAL,
    }
}

/// Dimmed fill used for the "off" phase of a blinking hexagon
pub fn dimmed(color: Color) -> Color {
    match color {
        Color::Rgb(r, g, b) => interpolate_color((r, g, b), (26, 27, 38), 0.65),
        other => other,
    }
}

/// Interpolate between two RGB colors based on a ratio (0.0 ~ 1.0)
///
/// # Arguments
/// * `color1` - Starting color as (r, g, b) tuple
/// * `color2` - Ending color as (r, g, b) tuple
/// * `ratio` - Interpolation ratio (0.0 = color1, 1.0 = color2)
///
/// # Returns
/// Interpolated Color::Rgb value
pub fn interpolate_color(color1: (u8, u8, u8), color2: (u8, u8, u8), ratio: f32) -> Color {
    let ratio = ratio.clamp(0.0, 1.0);
    let r = (color1.0 as f32 + (color2.0 as f32 - color1.0 as f32) * ratio) as u8;
    let g = (color1.1 as f32 + (color2.1 as f32 - color1.1 as f32) * ratio) as u8;
    let b = (color1.2 as f32 + (color2.2 as f32 - color1.2 as f32) * ratio) as u8;
    Color::Rgb(r, g, b)
}

/// Color for a percentage gauge (CPU, memory)
pub fn usage_color(percent: f64) -> Color {
    health_color(HostStatusLevel::from_load(percent))
}

/// Get color for refresh interval based on its value relative to default
///
/// Color coding:
/// - Green: default value or slower
/// - Orange: faster than default
/// - Red: more than twice as fast as default
///
/// If recently_changed is true, returns a brighter version of the color
pub fn get_refresh_color(interval_ms: u64, default_ms: u64, recently_changed: bool) -> Color {
    let base_color = if interval_ms >= default_ms {
        HEALTH_GOOD
    } else {
        let ratio = (default_ms - interval_ms) as f32 / default_ms as f32;
        if ratio > 0.5 {
            HEALTH_CRITICAL
        } else {
            HEALTH_WARNING
        }
    };

    // If recently changed, make the color brighter
    if recently_changed {
        match base_color {
            Color::Rgb(r, g, b) => {
                // Increase brightness by 20%
                let r = ((r as f32 * 1.2).min(255.0)) as u8;
                let g = ((g as f32 * 1.2).min(255.0)) as u8;
                let b = ((b as f32 * 1.2).min(255.0)) as u8;
                Color::Rgb(r, g, b)
            }
            _ => base_color,
        }
    } else {
        base_color
    }
}
