// Pointer interaction tracker
//
// Maps pointer movement over the honeycomb back to host records and keeps
// the tooltip placed inside the visible container. Clicks are reported to
// the caller as HexbinClick events; the tracker never changes the selection
// itself.
//
// State machine:
//   Idle --enter--> Hovering --place--> TooltipVisible
//   Hovering | TooltipVisible --leave / component exit--> Idle

use super::binning::HexBins;
use super::layout::HexCell;
use super::{Point, Size, Viewport};
use crate::telemetry::HostStatusRecord;

/// Default distance between a hexagon center and its tooltip, in layout units
pub const TOOLTIP_OFFSET: f64 = 4.0;

/// Tracker state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TrackerState {
    #[default]
    Idle,
    /// Pointer is over `cell`; `anchor` is the unclamped tooltip position
    Hovering { cell: usize, anchor: Point },
    /// Tooltip for `cell` is shown at `position` (view coordinates)
    TooltipVisible { cell: usize, position: Point },
}

impl TrackerState {
    /// Cell the pointer is currently over
    pub fn cell(&self) -> Option<usize> {
        match self {
            TrackerState::Idle => None,
            TrackerState::Hovering { cell, .. } | TrackerState::TooltipVisible { cell, .. } => {
                Some(*cell)
            }
        }
    }
}

/// What the tooltip should show
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TooltipState {
    pub active: bool,
    pub position: Point,
    pub record: Option<HostStatusRecord>,
}

/// Click on a hexagon, reported upward
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexbinClick {
    pub host: String,
    /// Filtered host at the time of the click (empty when none)
    pub previous_filtered: String,
}

/// Place a tooltip so it stays inside the container
///
/// Overflowing the right edge flips the tooltip to the other side of the
/// hexagon center. Overflowing the bottom shifts it up by the overflow.
/// When the flipped tooltip would start left of the container it is pinned
/// against the nearest edge that keeps it inside. A tooltip larger than the
/// container is pinned at 0 and overhangs the far edge.
pub fn clamp_tooltip(anchor: Point, tooltip: Size, container: Size, offset: f64) -> Point {
    let mut x = anchor.x;
    let mut y = anchor.y;

    if x + tooltip.width > container.width {
        x = anchor.x - tooltip.width - 2.0 * offset;
    }

    let overflow = y + tooltip.height - container.height;
    if overflow > 0.0 {
        y -= overflow;
    }

    let x = x.min(container.width - tooltip.width).max(0.0);
    let y = y.min(container.height - tooltip.height).max(0.0);
    Point::new(x, y)
}

#[derive(Debug, Clone, Default)]
pub struct InteractionTracker {
    state: TrackerState,
    tooltip: TooltipState,
    offset: f64,
}

impl InteractionTracker {
    pub fn new(offset: f64) -> Self {
        Self {
            state: TrackerState::Idle,
            tooltip: TooltipState::default(),
            offset,
        }
    }

    pub fn state(&self) -> TrackerState {
        self.state
    }

    pub fn tooltip(&self) -> &TooltipState {
        &self.tooltip
    }

    pub fn hovered_cell(&self) -> Option<usize> {
        self.state.cell()
    }

    /// Pointer entered a hexagon
    ///
    /// `center` is in view coordinates. The tooltip stays hidden until
    /// `place_tooltip` runs.
    pub fn pointer_enter(&mut self, cell: usize, center: Point, record: &HostStatusRecord) {
        let anchor = Point::new(center.x + self.offset, center.y + self.offset);
        self.state = TrackerState::Hovering { cell, anchor };
        self.tooltip = TooltipState {
            active: false,
            position: anchor,
            record: Some(record.clone()),
        };
    }

    /// Clamp the hovered anchor into the container and show the tooltip
    ///
    /// No-op when nothing is hovered or the container has not been measured.
    pub fn place_tooltip(&mut self, container: Option<Size>, tooltip_size: Size) -> Option<Point> {
        let container = container?;
        let (cell, anchor) = match self.state {
            TrackerState::Hovering { cell, anchor } => (cell, anchor),
            TrackerState::TooltipVisible { .. } | TrackerState::Idle => return None,
        };

        let position = clamp_tooltip(anchor, tooltip_size, container, self.offset);
        self.state = TrackerState::TooltipVisible { cell, position };
        self.tooltip.active = true;
        self.tooltip.position = position;
        Some(position)
    }

    /// Pointer left the hovered hexagon
    pub fn pointer_leave(&mut self) {
        self.reset();
    }

    /// Pointer left the whole component
    pub fn component_exit(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.state = TrackerState::Idle;
        self.tooltip = TooltipState::default();
    }

    /// Report a click on `host`
    pub fn click(&self, host: &str, filtered_host: &str) -> HexbinClick {
        HexbinClick {
            host: host.to_string(),
            previous_filtered: filtered_host.to_string(),
        }
    }

    /// Drive the state machine from a pointer position in view coordinates
    ///
    /// Hit-tests the bins, then enters, places or leaves as needed. Staying
    /// over the same hexagon keeps the current tooltip. `measure` sizes the
    /// tooltip for a record before it is shown. Does nothing until the
    /// viewport has been measured.
    pub fn pointer_move<F>(
        &mut self,
        point: Point,
        bins: &HexBins,
        cells: &[HexCell],
        viewport: Option<Viewport>,
        measure: F,
    ) where
        F: Fn(&HostStatusRecord) -> Size,
    {
        let Some(viewport) = viewport else {
            return;
        };

        let inside = point.x >= 0.0
            && point.y >= 0.0
            && point.x < viewport.size.width
            && point.y < viewport.size.height;
        if !inside {
            self.component_exit();
            return;
        }

        let hit = bins.hit_test(viewport.to_content(point)).map(|hex| hex.cell);
        match hit {
            Some(cell) if self.state.cell() == Some(cell) => {}
            Some(cell) => self.focus_cell(cell, cells, viewport, &measure),
            None => {
                if self.state != TrackerState::Idle {
                    self.pointer_leave();
                }
            }
        }
    }

    /// Hover a cell directly (keyboard navigation)
    pub fn focus_cell<F>(&mut self, cell: usize, cells: &[HexCell], viewport: Viewport, measure: &F)
    where
        F: Fn(&HostStatusRecord) -> Size,
    {
        let Some(hex_cell) = cells.get(cell) else {
            return;
        };
        let center = viewport.to_view(Point::new(hex_cell.x, hex_cell.y));
        self.pointer_enter(cell, center, &hex_cell.record);
        self.place_tooltip(Some(viewport.size), measure(&hex_cell.record));
    }

    /// Click at a pointer position in view coordinates
    pub fn pointer_click(
        &self,
        point: Point,
        bins: &HexBins,
        viewport: Option<Viewport>,
        filtered_host: &str,
    ) -> Option<HexbinClick> {
        let viewport = viewport?;
        bins.hit_test(viewport.to_content(point))
            .map(|hex| self.click(&hex.name, filtered_host))
    }

    /// Re-read the hovered cell after the layout was regenerated
    ///
    /// The tooltip picks up the new record and is placed again at the cell's
    /// new center. Hover is dropped when the cell is gone or now belongs to a
    /// different host.
    pub fn refresh_hovered<F>(&mut self, cells: &[HexCell], viewport: Option<Viewport>, measure: &F)
    where
        F: Fn(&HostStatusRecord) -> Size,
    {
        let Some(cell) = self.state.cell() else {
            return;
        };
        let same_host = match (cells.get(cell), self.tooltip.record.as_ref()) {
            (Some(hex_cell), Some(record)) => hex_cell.record.name == record.name,
            _ => false,
        };
        if !same_host {
            self.reset();
            return;
        }

        let hex_cell = &cells[cell];
        match viewport {
            Some(viewport) => {
                let visible = matches!(self.state, TrackerState::TooltipVisible { .. });
                let center = viewport.to_view(Point::new(hex_cell.x, hex_cell.y));
                self.pointer_enter(cell, center, &hex_cell.record);
                if visible {
                    self.place_tooltip(Some(viewport.size), measure(&hex_cell.record));
                }
            }
            None => self.tooltip.record = Some(hex_cell.record.clone()),
        }
    }
}
