// Theme module - Color constants and theme re-exports
//
// This module provides the color palette and theme functions for the
// hexwatch UI: panel accents plus one color per host health level.

pub mod default;

use ratatui::style::Color;

// Core palette used throughout the UI

/// Primary accent color - used for borders, titles, highlighted hexagons
/// RGB: (122, 162, 247)
pub const ACCENT_BLUE: Color = Color::Rgb(122, 162, 247);

/// Healthy host indicator
/// RGB: (158, 206, 106)
pub const HEALTH_GOOD: Color = Color::Rgb(158, 206, 106);

/// Moderately loaded host
/// RGB: (224, 175, 104)
pub const HEALTH_FAIR: Color = Color::Rgb(224, 175, 104);

/// Heavily loaded host, also used for warnings in panels
/// RGB: (255, 158, 100)
pub const HEALTH_WARNING: Color = Color::Rgb(255, 158, 100);

/// Critical host, alerts and errors
/// RGB: (247, 118, 142)
pub const HEALTH_CRITICAL: Color = Color::Rgb(247, 118, 142);

/// Neutral text - used for general text and labels
/// RGB: (169, 177, 214)
pub const TEXT_NEUTRAL: Color = Color::Rgb(169, 177, 214);

/// Selection background for lists and tooltips
/// RGB: (47, 51, 77)
pub const SELECTION_BG: Color = Color::Rgb(47, 51, 77);

// Re-export theme functions for convenient access
pub use default::*;
