// Application configuration types
//
// This module contains configuration structs and enums for:
// - Hexbin geometry and visual toggles
// - Alert thresholds
// - Refresh intervals
// - Telemetry source selection

use std::path::PathBuf;
use std::time::{Duration, Instant};

// ============================================================================
// Constants
// ============================================================================

/// Minimum refresh interval in milliseconds
pub const MIN_REFRESH_MS: u64 = 50;

/// Maximum refresh interval in milliseconds
pub const MAX_REFRESH_MS: u64 = 10000;

/// Refresh interval adjustment step in milliseconds
pub const REFRESH_STEP: u64 = 50;

/// Default UI refresh interval in milliseconds
pub const DEFAULT_REFRESH_MS: u64 = 500;

/// Data refresh multiplier (records refresh at N times the UI interval)
pub const DATA_REFRESH_MULTIPLIER: u64 = 4;

/// Alert refresh multiplier (alerts re-evaluate at N times the UI interval)
pub const ALERT_REFRESH_MULTIPLIER: u64 = 2;

/// Duration to highlight recently changed refresh intervals
pub const CHANGE_HIGHLIGHT_DURATION: Duration = Duration::from_millis(500);

/// Blink interval for alerting hexagons (500ms)
pub const BLINK_INTERVAL_MS: u128 = 500;

/// Samples of load history kept per host (for the detail sparkline)
pub const HISTORY_LEN: usize = 60;

/// Default hexagon radius in braille dots
pub const DEFAULT_HEX_RADIUS: f64 = 6.0;

/// Default padding around each hexagon in braille dots
/// Must stay at or above a quarter of the radius to keep rows from overlapping
pub const DEFAULT_HEX_PADDING: f64 = 2.0;

/// Default CPU alert threshold (percent)
pub const DEFAULT_ALERT_CPU: f64 = 90.0;

/// Default memory alert threshold (percent)
pub const DEFAULT_ALERT_MEMORY: f64 = 90.0;

// ============================================================================
// Enums
// ============================================================================

/// Where host status records come from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SourceKind {
    /// The machine hexwatch runs on (default)
    #[default]
    Local,
    /// JSON fleet file, re-read on every poll
    FleetFile(PathBuf),
    /// Synthetic fleet with the given number of hosts
    Simulated(usize),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Geometry and visual settings for the hexbin panel
#[derive(Debug, Clone)]
pub struct HexbinSettings {
    /// Hexagon circumradius in braille dots
    pub radius: f64,

    /// Padding kept around each hexagon in braille dots
    pub padding: f64,

    /// Blink alerting hexagons (toggle with 'b' key)
    pub blink_enabled: bool,

    /// Print host names inside hexagons (toggle with 'l' key)
    pub labels_enabled: bool,
}

impl Default for HexbinSettings {
    fn default() -> Self {
        Self {
            radius: DEFAULT_HEX_RADIUS,
            padding: DEFAULT_HEX_PADDING,
            blink_enabled: true,
            labels_enabled: true,
        }
    }
}

/// Thresholds at which a host is reported as alerting
#[derive(Debug, Clone, PartialEq)]
pub struct AlertConfig {
    /// CPU usage (percent) at or above which a host alerts
    pub cpu_threshold: f64,

    /// Memory usage (percent) at or above which a host alerts
    pub memory_threshold: f64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            cpu_threshold: DEFAULT_ALERT_CPU,
            memory_threshold: DEFAULT_ALERT_MEMORY,
        }
    }
}

/// Configuration for refresh intervals (unified)
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// UI refresh interval in milliseconds
    /// Record polling uses this * DATA_REFRESH_MULTIPLIER
    pub refresh_ms: u64,

    /// Timestamp of last interval change (for visual feedback)
    pub last_change: Option<Instant>,
}

impl RefreshConfig {
    /// Create a new RefreshConfig with default values
    pub fn new() -> Self {
        Self::with_interval(DEFAULT_REFRESH_MS)
    }

    /// Create a RefreshConfig with a starting interval, clamped to the allowed range
    pub fn with_interval(refresh_ms: u64) -> Self {
        Self {
            refresh_ms: refresh_ms.clamp(MIN_REFRESH_MS, MAX_REFRESH_MS),
            last_change: None,
        }
    }

    /// Get UI refresh interval as Duration
    pub fn ui_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_ms)
    }

    /// Get record polling interval as Duration
    pub fn data_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_ms * DATA_REFRESH_MULTIPLIER)
    }

    /// Get alert evaluation interval as Duration
    pub fn alert_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_ms * ALERT_REFRESH_MULTIPLIER)
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything needed to start the application
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub source: SourceKind,
    pub refresh: RefreshConfig,
    pub alerts: AlertConfig,
    pub hexbin: HexbinSettings,
}
