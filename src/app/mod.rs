// Application state management
//
// This module contains the main AppState struct and re-exports
// configuration types from the config submodule.

pub mod config;
pub mod event;
pub mod poll;

// Re-export config types for convenience
pub use config::{
    AlertConfig, HexbinSettings, RefreshConfig, Settings, SourceKind, CHANGE_HIGHLIGHT_DURATION,
};

use crate::hexbin::{
    bin_cells, interaction::TOOLTIP_OFFSET, HexBins, HexbinClick, InteractionTracker,
    LayoutCache, LayoutParams, Point, Size, Viewport,
};
use crate::telemetry::{
    alerts::evaluate_alerts, FleetFileSource, HostSource, HostStatusRecord, LocalHostSource,
    SimulatedFleetSource,
};
use crate::ui::hexbin::{cell_to_view, tooltip_size, DOTS_PER_COL, DOTS_PER_ROW};
use config::{BLINK_INTERVAL_MS, HISTORY_LEN};
use poll::Poller;
use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use std::collections::HashMap;
use std::time::Instant;

/// Main application state
pub struct AppState {
    /// Whether the application is running
    pub running: bool,

    /// Supplier of host status records
    source: Box<dyn HostSource>,

    /// Label of the active source, shown in the header
    pub source_label: String,

    /// Latest host status records, in source order
    pub records: Vec<HostStatusRecord>,

    /// Bumped every time `records` is replaced
    pub records_generation: u64,

    /// Alerts reported by the source itself
    source_alerts: Vec<String>,

    /// Hosts currently in alarm
    pub alert_hosts: Vec<String>,

    /// Last fetch error message (if any)
    pub source_error: Option<String>,

    /// Host pinned by a hexbin click (empty when none)
    pub filtered_host: String,

    /// Load history per host (last HISTORY_LEN samples)
    pub load_history: HashMap<String, Vec<u64>>,

    /// Average fleet load history (last HISTORY_LEN samples)
    pub fleet_history: Vec<u64>,

    /// Time of the last successful record fetch
    pub last_update: Option<Instant>,

    /// Record polling loop
    pub records_poller: Poller,

    /// Alert evaluation loop
    pub alert_poller: Poller,

    /// Refresh interval configuration
    pub refresh_config: RefreshConfig,

    /// Alert thresholds
    pub alert_config: AlertConfig,

    /// Hexbin geometry and visual toggles
    pub hexbin_settings: HexbinSettings,

    /// Cached honeycomb layout
    layout: LayoutCache,

    /// Renderable hexagons for the current layout
    pub bins: HexBins,

    /// Visible window onto the honeycomb (None until first measured)
    pub viewport: Option<Viewport>,

    /// Terminal area the honeycomb was last drawn into
    pub hexbin_area: Option<Rect>,

    /// Hover/tooltip state machine
    pub tracker: InteractionTracker,

    /// Blink state for alerting hexagons (true = lit)
    pub blink_on: bool,

    /// Last blink toggle time
    last_blink: Instant,

    /// List state for the host list (follows the filtered host)
    pub host_list_state: ListState,
}

impl AppState {
    /// Create an AppState with the source described by `settings`
    pub fn new(settings: Settings) -> Self {
        let source: Box<dyn HostSource> = match &settings.source {
            SourceKind::Local => Box::new(LocalHostSource::new()),
            SourceKind::FleetFile(path) => Box::new(FleetFileSource::new(path.clone())),
            SourceKind::Simulated(count) => Box::new(SimulatedFleetSource::new(*count)),
        };
        Self::with_source(source, settings)
    }

    /// Create an AppState around an existing source
    pub fn with_source(source: Box<dyn HostSource>, settings: Settings) -> Self {
        let now = Instant::now();
        let source_label = source.label();

        let mut records_poller = Poller::new("records", settings.refresh.data_interval());
        let mut alert_poller = Poller::new("alerts", settings.refresh.alert_interval());
        records_poller.start();
        alert_poller.start();

        let mut state = Self {
            running: true,
            source,
            source_label,
            records: Vec::new(),
            records_generation: 0,
            source_alerts: Vec::new(),
            alert_hosts: Vec::new(),
            source_error: None,
            filtered_host: String::new(),
            load_history: HashMap::new(),
            fleet_history: vec![0; HISTORY_LEN],
            last_update: None,
            records_poller,
            alert_poller,
            refresh_config: settings.refresh,
            alert_config: settings.alerts,
            hexbin_settings: settings.hexbin,
            layout: LayoutCache::new(),
            bins: HexBins::default(),
            viewport: None,
            hexbin_area: None,
            tracker: InteractionTracker::new(TOOLTIP_OFFSET),
            blink_on: true,
            last_blink: now,
            host_list_state: ListState::default(),
        };

        // Perform initial data load immediately on startup
        state.on_tick();

        state
    }

    /// Update state on each tick
    pub fn on_tick(&mut self) {
        let now = Instant::now();

        // Toggle blink every 500ms
        if now.duration_since(self.last_blink).as_millis() >= BLINK_INTERVAL_MS {
            self.last_blink = now;
            self.blink_on = !self.blink_on;
        }

        if self.records_poller.poll(now) {
            self.refresh_records();
        }
        if self.alert_poller.poll(now) {
            self.refresh_alerts();
        }
    }

    /// Fetch records from the source
    ///
    /// On failure the previous records stay in place and the error is kept
    /// for display.
    pub fn refresh_records(&mut self) {
        match self.source.fetch() {
            Ok(snapshot) => {
                tracing::debug!(
                    source = %self.source_label,
                    hosts = snapshot.hosts.len(),
                    "Fetched host records"
                );
                self.source_alerts = snapshot.alerts;
                self.set_records(snapshot.hosts);
                self.source_error = None;
                self.last_update = Some(Instant::now());
            }
            Err(e) => {
                tracing::warn!(source = %self.source_label, error = %e, "Failed to fetch host records");
                self.source_error = Some(e.to_string());
                // The honeycomb is replaced by the error message
                self.tracker.component_exit();
            }
        }
    }

    /// Replace the record list
    pub fn set_records(&mut self, records: Vec<HostStatusRecord>) {
        self.update_history(&records);
        self.records = records;
        self.records_generation += 1;
        self.sync_host_list_selection();
    }

    fn update_history(&mut self, records: &[HostStatusRecord]) {
        self.load_history
            .retain(|name, _| records.iter().any(|r| &r.name == name));

        for record in records {
            let history = self.load_history.entry(record.name.clone()).or_default();
            history.push(record.load().round() as u64);
            if history.len() > HISTORY_LEN {
                history.remove(0);
            }
        }

        let fleet_load = if records.is_empty() {
            0
        } else {
            (records.iter().map(|r| r.load()).sum::<f64>() / records.len() as f64).round() as u64
        };
        self.fleet_history.push(fleet_load);
        if self.fleet_history.len() > HISTORY_LEN {
            self.fleet_history.remove(0);
        }
    }

    /// Recompute the alert host list and re-apply blink flags
    pub fn refresh_alerts(&mut self) {
        let alerts = evaluate_alerts(&self.records, &self.source_alerts, &self.alert_config);
        if alerts != self.alert_hosts {
            tracing::info!(count = alerts.len(), "Alert host list changed");
            self.alert_hosts = alerts;
            self.bins.apply_status(&self.alert_hosts, &self.filtered_host);
        }
    }

    /// Request an immediate refresh of records and alerts
    pub fn force_refresh(&mut self) {
        self.records_poller.force();
        self.alert_poller.force();
    }

    fn layout_params(&self) -> LayoutParams {
        LayoutParams::new(self.hexbin_settings.radius, self.hexbin_settings.padding)
    }

    /// Bring layout and bins up to date with the area the panel is drawn into
    ///
    /// Called once per frame by the renderer. The layout only re-runs when
    /// the width or the record list changed.
    pub fn sync_hexbin(&mut self, area: Rect) {
        self.hexbin_area = Some(area);

        let size = Size::new(
            area.width as f64 * DOTS_PER_COL,
            area.height as f64 * DOTS_PER_ROW,
        );
        if size.width <= 0.0 || size.height <= 0.0 {
            self.viewport = None;
            return;
        }

        let params = self.layout_params();
        let (cells, fresh) =
            self.layout
                .sync(&self.records, self.records_generation, &params, size.width);

        let rebinned = fresh || self.bins.extent != size;
        if rebinned {
            self.bins = bin_cells(
                cells,
                size,
                params.radius,
                &self.alert_hosts,
                &self.filtered_host,
            );
        }

        let mut viewport = self.viewport.unwrap_or_default();
        if viewport.size != size {
            // Tooltip positions were computed for the old size
            self.tracker.component_exit();
        }
        viewport.size = size;
        viewport.scroll_by(0.0, self.bins.content_height);
        self.viewport = Some(viewport);

        if rebinned {
            self.tracker
                .refresh_hovered(self.layout.cells(), self.viewport, &tooltip_size);
        }
    }

    /// Whether the honeycomb is hidden behind a fetch error
    ///
    /// Hexagons are not drawn in that state, so they take no pointer or
    /// keyboard input either.
    fn honeycomb_hidden(&self) -> bool {
        self.source_error.is_some()
    }

    /// Terminal was resized; force a fresh layout on the next frame
    pub fn on_resize(&mut self) {
        self.layout.invalidate();
        self.tracker.component_exit();
    }

    // ========================================================================
    // Pointer and selection
    // ========================================================================

    /// Mouse moved to terminal cell (col, row)
    pub fn on_pointer_move(&mut self, col: u16, row: u16) {
        if self.honeycomb_hidden() {
            self.tracker.component_exit();
            return;
        }
        let Some(area) = self.hexbin_area else {
            return;
        };
        match cell_to_view(area, col, row) {
            Some(point) => self.tracker.pointer_move(
                point,
                &self.bins,
                self.layout.cells(),
                self.viewport,
                tooltip_size,
            ),
            None => self.tracker.component_exit(),
        }
    }

    /// Mouse clicked at terminal cell (col, row)
    ///
    /// Returns the click that was applied, if the pointer was over a hexagon.
    pub fn on_pointer_click(&mut self, col: u16, row: u16) -> Option<HexbinClick> {
        if self.honeycomb_hidden() {
            self.tracker.component_exit();
            return None;
        }
        let point = self
            .hexbin_area
            .and_then(|area| cell_to_view(area, col, row))?;
        let click = self
            .tracker
            .pointer_click(point, &self.bins, self.viewport, &self.filtered_host)?;
        self.on_hexbin_click(click.clone());
        Some(click)
    }

    /// Handle a click on a hexagon
    ///
    /// Clicking the filtered host clears the filter; clicking any other host
    /// filters to it.
    pub fn on_hexbin_click(&mut self, click: HexbinClick) {
        if click.host == click.previous_filtered {
            tracing::info!(host = %click.host, "Cleared host filter");
            self.filtered_host.clear();
        } else {
            tracing::info!(host = %click.host, previous = %click.previous_filtered, "Filtered to host");
            self.filtered_host = click.host;
        }
        self.bins.apply_status(&self.alert_hosts, &self.filtered_host);
        self.sync_host_list_selection();
    }

    /// Clear the host filter
    pub fn clear_filter(&mut self) {
        if !self.filtered_host.is_empty() {
            self.filtered_host.clear();
            self.bins.apply_status(&self.alert_hosts, &self.filtered_host);
            self.sync_host_list_selection();
        }
    }

    fn sync_host_list_selection(&mut self) {
        let idx = self
            .records
            .iter()
            .position(|r| !self.filtered_host.is_empty() && r.name == self.filtered_host);
        self.host_list_state.select(idx);
    }

    /// Record for the filtered host, if it is still present
    pub fn filtered_record(&self) -> Option<&HostStatusRecord> {
        if self.filtered_host.is_empty() {
            return None;
        }
        self.records.iter().find(|r| r.name == self.filtered_host)
    }

    /// Scroll the honeycomb by `delta` braille dots
    pub fn scroll_hexbin(&mut self, delta: f64) {
        let content_height = self.bins.content_height;
        if let Some(viewport) = self.viewport.as_mut() {
            viewport.scroll_by(delta, content_height);
            self.tracker.component_exit();
        }
    }

    /// Move keyboard hover to the next hexagon
    pub fn hover_next(&mut self) {
        self.hover_step(1);
    }

    /// Move keyboard hover to the previous hexagon
    pub fn hover_previous(&mut self) {
        self.hover_step(-1);
    }

    fn hover_step(&mut self, step: isize) {
        let count = self.layout.cells().len();
        if count == 0 || self.viewport.is_none() || self.honeycomb_hidden() {
            return;
        }
        let next = match self.tracker.hovered_cell() {
            None if step > 0 => 0,
            None => count - 1,
            Some(idx) => (idx as isize + step).rem_euclid(count as isize) as usize,
        };
        self.scroll_into_view(next);

        if let Some(viewport) = self.viewport {
            self.tracker
                .focus_cell(next, self.layout.cells(), viewport, &tooltip_size);
        }
    }

    fn scroll_into_view(&mut self, cell: usize) {
        let Some(hex) = self.layout.cells().get(cell) else {
            return;
        };
        let radius = self.hexbin_settings.radius;
        let padding = self.hexbin_settings.padding;
        let (top, bottom) = (hex.y - radius - padding, hex.y + radius + padding);
        let content_height = self.bins.content_height;

        if let Some(viewport) = self.viewport.as_mut() {
            if top < viewport.scroll_y {
                viewport.scroll_by(top - viewport.scroll_y, content_height);
            } else if bottom > viewport.scroll_y + viewport.size.height {
                viewport.scroll_by(bottom - viewport.scroll_y - viewport.size.height, content_height);
            }
        }
    }

    /// Click the hexagon under the keyboard hover
    pub fn click_hovered(&mut self) {
        if self.honeycomb_hidden() {
            return;
        }
        let host = self
            .tracker
            .hovered_cell()
            .and_then(|idx| self.layout.cells().get(idx))
            .map(|cell| cell.record.name.clone());
        if let Some(host) = host {
            let click = self.tracker.click(&host, &self.filtered_host);
            self.on_hexbin_click(click);
        }
    }

    /// Tooltip anchor in terminal cells, when a tooltip is visible
    pub fn tooltip_anchor(&self) -> Option<(Point, &HostStatusRecord)> {
        let tooltip = self.tracker.tooltip();
        if !tooltip.active {
            return None;
        }
        tooltip.record.as_ref().map(|r| (tooltip.position, r))
    }

    // ========================================================================
    // Refresh rate
    // ========================================================================

    /// Increase refresh rate (decrease interval by 50ms, clamp to 50ms minimum)
    pub fn increase_refresh_rate(&mut self) {
        let new_interval = self
            .refresh_config
            .refresh_ms
            .saturating_sub(config::REFRESH_STEP);
        self.refresh_config.refresh_ms = new_interval.max(config::MIN_REFRESH_MS);
        self.apply_refresh_interval();
    }

    /// Decrease refresh rate (increase interval by 50ms, clamp to maximum)
    pub fn decrease_refresh_rate(&mut self) {
        let new_interval = self
            .refresh_config
            .refresh_ms
            .saturating_add(config::REFRESH_STEP);
        self.refresh_config.refresh_ms = new_interval.min(config::MAX_REFRESH_MS);
        self.apply_refresh_interval();
    }

    fn apply_refresh_interval(&mut self) {
        self.refresh_config.last_change = Some(Instant::now());
        self.records_poller
            .set_interval(self.refresh_config.data_interval());
        self.alert_poller
            .set_interval(self.refresh_config.alert_interval());
    }

    /// Stop both poll loops (application shutting down)
    pub fn shutdown(&mut self) {
        self.records_poller.stop();
        self.alert_poller.stop();
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::{FleetSnapshot, SourceError};
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Source returning queued results, one per fetch
    struct ScriptedSource {
        results: Rc<RefCell<Vec<Result<FleetSnapshot, SourceError>>>>,
    }

    impl HostSource for ScriptedSource {
        fn label(&self) -> String {
            "scripted".to_string()
        }

        fn fetch(&mut self) -> Result<FleetSnapshot, SourceError> {
            let mut results = self.results.borrow_mut();
            if results.is_empty() {
                Ok(FleetSnapshot::default())
            } else {
                results.remove(0)
            }
        }
    }

    fn fleet(names: &[&str]) -> Vec<HostStatusRecord> {
        names
            .iter()
            .map(|n| HostStatusRecord::new(*n, 10.0, 20.0, 5.0))
            .collect()
    }

    fn app_with(results: Vec<Result<FleetSnapshot, SourceError>>) -> AppState {
        let source = ScriptedSource {
            results: Rc::new(RefCell::new(results)),
        };
        AppState::with_source(Box::new(source), Settings::default())
    }

    fn snapshot(names: &[&str]) -> Result<FleetSnapshot, SourceError> {
        Ok(FleetSnapshot {
            hosts: fleet(names),
            alerts: Vec::new(),
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Clicking a host filters to it; clicking it again clears the
        /// filter. Exactly one hexagon is highlighted while filtered.
        #[test]
        fn prop_click_toggle_consistency(hosts in 1usize..12, pick in 0usize..12) {
            let names: Vec<String> = (0..hosts).map(|i| format!("host-{}", i)).collect();
            let refs: Vec<&str> = names.iter().map(|s| s.as_str()).collect();
            let mut app = app_with(vec![snapshot(&refs)]);
            app.sync_hexbin(Rect::new(0, 0, 60, 20));

            let host = names[pick % hosts].clone();

            let click = app.tracker.click(&host, &app.filtered_host);
            app.on_hexbin_click(click);
            prop_assert_eq!(&app.filtered_host, &host);
            prop_assert_eq!(app.bins.hexagons.iter().filter(|h| h.highlighted).count(), 1);

            let click = app.tracker.click(&host, &app.filtered_host);
            app.on_hexbin_click(click);
            prop_assert!(app.filtered_host.is_empty());
            prop_assert_eq!(app.bins.hexagons.iter().filter(|h| h.highlighted).count(), 0);
        }

        /// Any sequence of refresh rate changes stays within bounds and
        /// keeps the record poller in step with the config
        #[test]
        fn prop_refresh_rate_bounded(steps in proptest::collection::vec(any::<bool>(), 0..300)) {
            let mut app = app_with(vec![]);
            for faster in steps {
                if faster {
                    app.increase_refresh_rate();
                } else {
                    app.decrease_refresh_rate();
                }
                prop_assert!(app.refresh_config.refresh_ms >= config::MIN_REFRESH_MS);
                prop_assert!(app.refresh_config.refresh_ms <= config::MAX_REFRESH_MS);
                prop_assert_eq!(app.records_poller.interval(), app.refresh_config.data_interval());
            }
        }
    }

    #[test]
    fn test_initial_load_on_startup() {
        let app = app_with(vec![snapshot(&["a", "b", "c"])]);
        assert_eq!(app.records.len(), 3);
        assert_eq!(app.records_generation, 1);
        assert!(app.source_error.is_none());
        assert!(app.last_update.is_some());
    }

    #[test]
    fn test_fetch_error_keeps_records() {
        let mut app = app_with(vec![
            snapshot(&["a", "b"]),
            Err(SourceError::InvalidRecord {
                name: "x".to_string(),
                reason: "bad".to_string(),
            }),
        ]);
        app.refresh_records();

        assert_eq!(app.records.len(), 2);
        assert_eq!(app.records_generation, 1);
        let err = app.source_error.as_deref().unwrap_or_default();
        assert!(err.contains("invalid record"));

        // Next good fetch clears the error
        app.refresh_records();
        assert!(app.source_error.is_none());
    }

    #[test]
    fn test_sync_hexbin_builds_bins() {
        let mut app = app_with(vec![snapshot(&["a", "b", "c", "d"])]);
        assert!(app.viewport.is_none());

        app.sync_hexbin(Rect::new(0, 0, 40, 10));
        assert_eq!(app.bins.len(), 4);
        let vp = app.viewport.unwrap();
        assert_eq!(vp.size, Size::new(80.0, 40.0));
    }

    #[test]
    fn test_zero_area_leaves_viewport_unmeasured() {
        let mut app = app_with(vec![snapshot(&["a"])]);
        app.sync_hexbin(Rect::new(0, 0, 0, 0));
        assert!(app.viewport.is_none());

        // Pointer events before measurement are ignored
        app.on_pointer_click(1, 1);
        assert!(app.filtered_host.is_empty());
    }

    #[test]
    fn test_click_toggles_filter() {
        let mut app = app_with(vec![snapshot(&["host-6", "host-7"])]);
        app.sync_hexbin(Rect::new(0, 0, 40, 10));

        let click = app.tracker.click("host-7", &app.filtered_host);
        assert_eq!(click.previous_filtered, "");
        app.on_hexbin_click(click);
        assert_eq!(app.filtered_host, "host-7");
        assert!(app.bins.hexagons[1].highlighted);
        assert_eq!(app.host_list_state.selected(), Some(1));

        // Clicking the filtered host again clears it
        let click = app.tracker.click("host-7", &app.filtered_host);
        app.on_hexbin_click(click);
        assert!(app.filtered_host.is_empty());
        assert!(app.bins.hexagons.iter().all(|h| !h.highlighted));
        assert_eq!(app.host_list_state.selected(), None);
    }

    #[test]
    fn test_mouse_click_on_hexagon() {
        let mut app = app_with(vec![snapshot(&["a", "b"])]);
        let area = Rect::new(2, 3, 40, 10);
        app.sync_hexbin(area);

        // First hexagon center sits at (R + P, P + 1.5R) = (8, 11) dots
        let col = area.x + (8.0 / DOTS_PER_COL) as u16;
        let row = area.y + (11.0 / DOTS_PER_ROW) as u16;
        app.on_pointer_click(col, row);
        assert_eq!(app.filtered_host, "a");
    }

    #[test]
    fn test_mouse_hover_and_exit() {
        let mut app = app_with(vec![snapshot(&["a", "b"])]);
        let area = Rect::new(0, 0, 40, 10);
        app.sync_hexbin(area);

        app.on_pointer_move(4, 2);
        assert_eq!(app.tracker.hovered_cell(), Some(0));
        assert!(app.tooltip_anchor().is_some());

        // Outside the panel
        app.on_pointer_move(60, 2);
        assert_eq!(app.tracker.hovered_cell(), None);
        assert!(app.tooltip_anchor().is_none());
    }

    #[test]
    fn test_pointer_ignored_while_error_shown() {
        let mut app = app_with(vec![
            snapshot(&["a", "b"]),
            Err(SourceError::InvalidRecord {
                name: "x".to_string(),
                reason: "bad".to_string(),
            }),
            snapshot(&["a", "b"]),
        ]);
        let area = Rect::new(0, 0, 40, 10);
        app.sync_hexbin(area);
        app.on_pointer_move(4, 2);
        assert_eq!(app.tracker.hovered_cell(), Some(0));

        // The error hides the hovered tooltip straight away
        app.refresh_records();
        assert!(app.tooltip_anchor().is_none());
        app.sync_hexbin(area);

        app.on_pointer_move(4, 2);
        assert_eq!(app.tracker.hovered_cell(), None);
        assert!(app.tooltip_anchor().is_none());

        assert_eq!(app.on_pointer_click(4, 2), None);
        assert!(app.filtered_host.is_empty());

        app.hover_next();
        app.click_hovered();
        assert_eq!(app.tracker.hovered_cell(), None);
        assert!(app.filtered_host.is_empty());

        // A good fetch brings the honeycomb back
        app.refresh_records();
        app.sync_hexbin(area);
        app.on_pointer_move(4, 2);
        assert_eq!(app.tracker.hovered_cell(), Some(0));
    }

    #[test]
    fn test_hovered_tooltip_follows_refresh() {
        let mut updated = fleet(&["a", "b"]);
        updated[0].cpu = 99.0;
        let mut app = app_with(vec![
            snapshot(&["a", "b"]),
            Ok(FleetSnapshot {
                hosts: updated,
                alerts: Vec::new(),
            }),
            snapshot(&["z", "b"]),
        ]);
        let area = Rect::new(0, 0, 40, 10);
        app.sync_hexbin(area);
        app.on_pointer_move(4, 2);
        let cpu = |app: &AppState| app.tooltip_anchor().map(|(_, r)| r.cpu);
        assert_eq!(cpu(&app), Some(10.0));

        app.refresh_records();
        app.sync_hexbin(area);
        assert_eq!(app.tracker.hovered_cell(), Some(0));
        assert_eq!(cpu(&app), Some(99.0));

        // Another host took over the hovered slot
        app.refresh_records();
        app.sync_hexbin(area);
        assert_eq!(app.tracker.hovered_cell(), None);
        assert!(app.tooltip_anchor().is_none());
    }

    #[test]
    fn test_alerts_apply_blink() {
        let mut app = app_with(vec![Ok(FleetSnapshot {
            hosts: vec![
                HostStatusRecord::new("host-1", 10.0, 20.0, 0.0),
                HostStatusRecord::new("host-2", 10.0, 20.0, 0.0),
                HostStatusRecord::new("host-3", 99.0, 20.0, 0.0),
            ],
            alerts: Vec::new(),
        })]);
        app.sync_hexbin(Rect::new(0, 0, 40, 10));
        app.refresh_alerts();

        assert_eq!(app.alert_hosts, vec!["host-3".to_string()]);
        let blinking: Vec<_> = app
            .bins
            .hexagons
            .iter()
            .filter(|h| h.blink)
            .map(|h| h.name.as_str())
            .collect();
        assert_eq!(blinking, vec!["host-3"]);
    }

    #[test]
    fn test_keyboard_hover_wraps_and_clicks() {
        let mut app = app_with(vec![snapshot(&["a", "b", "c"])]);
        app.sync_hexbin(Rect::new(0, 0, 40, 10));

        app.hover_next();
        assert_eq!(app.tracker.hovered_cell(), Some(0));
        app.hover_previous();
        assert_eq!(app.tracker.hovered_cell(), Some(2));
        app.hover_next();
        assert_eq!(app.tracker.hovered_cell(), Some(0));

        app.click_hovered();
        assert_eq!(app.filtered_host, "a");
    }

    #[test]
    fn test_keyboard_hover_scrolls_into_view() {
        let names: Vec<String> = (0..60).map(|i| format!("host-{}", i)).collect();
        let refs: Vec<&str> = names.iter().map(|s| s.as_str()).collect();
        let mut app = app_with(vec![snapshot(&refs)]);
        app.sync_hexbin(Rect::new(0, 0, 20, 5));

        app.hover_previous();
        assert_eq!(app.tracker.hovered_cell(), Some(59));
        assert!(app.viewport.unwrap().scroll_y > 0.0);
    }

    #[test]
    fn test_new_records_regenerate_layout() {
        let mut app = app_with(vec![snapshot(&["a"]), snapshot(&["a", "b", "c"])]);
        app.sync_hexbin(Rect::new(0, 0, 40, 10));
        assert_eq!(app.bins.len(), 1);

        app.refresh_records();
        app.sync_hexbin(Rect::new(0, 0, 40, 10));
        assert_eq!(app.bins.len(), 3);
    }

    #[test]
    fn test_history_tracks_hosts() {
        let mut app = app_with(vec![snapshot(&["a", "b"]), snapshot(&["b"])]);
        assert_eq!(app.load_history.len(), 2);
        app.refresh_records();
        assert_eq!(app.load_history.len(), 1);
        assert_eq!(app.load_history["b"], vec![15, 15]);
        assert_eq!(app.fleet_history.len(), HISTORY_LEN);
    }

    #[test]
    fn test_refresh_rate_updates_pollers() {
        let mut app = app_with(vec![]);
        let before = app.records_poller.interval();
        app.decrease_refresh_rate();
        assert!(app.records_poller.interval() > before);
        app.increase_refresh_rate();
        assert_eq!(app.records_poller.interval(), before);
    }

    #[test]
    fn test_shutdown_stops_pollers() {
        let mut app = app_with(vec![]);
        app.shutdown();
        assert!(!app.running);
        assert!(!app.records_poller.is_running());
        assert!(!app.alert_poller.is_running());
    }
}
