// Hex binning adapter
//
// Turns laid-out cells into renderable hexagons: six vertices around each
// center, a health level for coloring, and the blink/highlight flags driven
// by the alert list and the filtered host.

use super::layout::{content_height, HexCell};
use super::{Point, Size};
use crate::telemetry::HostStatusRecord;

/// Health level of a host, judged on the average of CPU and memory usage
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HostStatusLevel {
    /// Load below 50%
    Good,
    /// Load 50-70%
    Fair,
    /// Load 70-90%
    Warning,
    /// Load 90% and above
    Critical,
}

impl HostStatusLevel {
    pub fn from_load(load: f64) -> Self {
        if load >= 90.0 {
            HostStatusLevel::Critical
        } else if load >= 70.0 {
            HostStatusLevel::Warning
        } else if load >= 50.0 {
            HostStatusLevel::Fair
        } else {
            HostStatusLevel::Good
        }
    }

    pub fn from_record(record: &HostStatusRecord) -> Self {
        Self::from_load(record.load())
    }

    pub fn label(&self) -> &'static str {
        match self {
            HostStatusLevel::Good => "Good",
            HostStatusLevel::Fair => "Fair",
            HostStatusLevel::Warning => "Warning",
            HostStatusLevel::Critical => "Critical",
        }
    }
}

/// A renderable hexagon
#[derive(Debug, Clone, PartialEq)]
pub struct HexGeometry {
    /// Index into the cell list this hexagon was built from
    pub cell: usize,
    pub name: String,
    pub center: Point,
    pub radius: f64,
    /// Pointy-top vertices, clockwise in y-down space starting at 30°
    pub vertices: [Point; 6],
    pub health: HostStatusLevel,
    /// Host is in the alert list
    pub blink: bool,
    /// Host is the currently filtered host
    pub highlighted: bool,
}

impl HexGeometry {
    /// Point-in-hexagon test
    ///
    /// Uses the pointy-top hexagon's symmetry: fold the point into the first
    /// quadrant and check it against the flat side and the slanted edge.
    pub fn contains(&self, point: Point) -> bool {
        let dx = (point.x - self.center.x).abs();
        let dy = (point.y - self.center.y).abs();
        let half_width = 3f64.sqrt() / 2.0 * self.radius;

        if dx > half_width || dy > self.radius {
            return false;
        }
        // Slanted edge from (half_width, r/2) to (0, r)
        dy <= self.radius - dx / 3f64.sqrt()
    }

    /// Sample points inside the hexagon on a grid of the given step
    pub fn interior_points(&self, step: f64) -> Vec<(f64, f64)> {
        if step <= 0.0 {
            return Vec::new();
        }
        let half_width = 3f64.sqrt() / 2.0 * self.radius;
        let mut points = Vec::new();

        let mut y = self.center.y - self.radius;
        while y <= self.center.y + self.radius {
            let mut x = self.center.x - half_width;
            while x <= self.center.x + half_width {
                let p = Point::new(x, y);
                if self.contains(p) {
                    points.push((x, y));
                }
                x += step;
            }
            y += step;
        }

        points
    }
}

/// Vertices of a pointy-top hexagon centered at `center`
pub fn hexagon_vertices(center: Point, radius: f64) -> [Point; 6] {
    let mut vertices = [Point::default(); 6];
    for (k, vertex) in vertices.iter_mut().enumerate() {
        let angle = (30.0 + 60.0 * k as f64).to_radians();
        *vertex = Point::new(
            center.x + radius * angle.cos(),
            center.y + radius * angle.sin(),
        );
    }
    vertices
}

/// Output of the binning pass
#[derive(Debug, Clone, Default)]
pub struct HexBins {
    pub hexagons: Vec<HexGeometry>,
    /// Visible extent the bins were computed for
    pub extent: Size,
    /// Height needed to scroll through every hexagon
    pub content_height: f64,
}

impl HexBins {
    /// Re-apply alert and filter flags without touching geometry
    pub fn apply_status(&mut self, alert_hosts: &[String], filtered_host: &str) {
        for hex in &mut self.hexagons {
            hex.blink = alert_hosts.iter().any(|h| *h == hex.name);
            hex.highlighted = !filtered_host.is_empty() && hex.name == filtered_host;
        }
    }

    /// Topmost hexagon under `point`, if any
    pub fn hit_test(&self, point: Point) -> Option<&HexGeometry> {
        self.hexagons.iter().rev().find(|hex| hex.contains(point))
    }

    pub fn is_empty(&self) -> bool {
        self.hexagons.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hexagons.len()
    }
}

/// Build renderable hexagons for the cells
pub fn bin_cells(
    cells: &[HexCell],
    extent: Size,
    radius: f64,
    alert_hosts: &[String],
    filtered_host: &str,
) -> HexBins {
    let hexagons = cells
        .iter()
        .enumerate()
        .map(|(idx, cell)| {
            let center = Point::new(cell.x, cell.y);
            HexGeometry {
                cell: idx,
                name: cell.record.name.clone(),
                center,
                radius,
                vertices: hexagon_vertices(center, radius),
                health: HostStatusLevel::from_record(&cell.record),
                blink: false,
                highlighted: false,
            }
        })
        .collect();

    let mut bins = HexBins {
        hexagons,
        extent,
        content_height: content_height(cells, radius),
    };
    bins.apply_status(alert_hosts, filtered_host);
    bins
}
