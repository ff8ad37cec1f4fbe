// Honeycomb layout generator
//
// Packs host records into hexagon centers, left to right, wrapping rows at
// the container width. Odd rows are pushed right to form the honeycomb
// stagger. Coordinates use a y-down space with the origin at the top-left
// of the container.

use crate::telemetry::HostStatusRecord;

/// Horizontal stagger of odd rows, in radii
const ODD_ROW_STAGGER: f64 = 1.5;

/// Vertical advance between rows, as a fraction of hexagon height
const ROW_ADVANCE_RATIO: f64 = 0.75;

/// Geometry parameters for the layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    /// Hexagon circumradius
    pub radius: f64,
    /// Padding kept around every cell
    pub padding: f64,
}

impl LayoutParams {
    pub fn new(radius: f64, padding: f64) -> Self {
        Self { radius, padding }
    }

    /// Width of a pointy-top hexagon (flat side to flat side)
    pub fn hex_width(&self) -> f64 {
        3f64.sqrt() * self.radius
    }

    /// Height of a pointy-top hexagon (point to point)
    pub fn hex_height(&self) -> f64 {
        2.0 * self.radius
    }

    /// Distance between neighbouring centers in a row
    pub fn pitch(&self) -> f64 {
        self.radius + self.hex_width() / 2.0 + 2.0 * self.padding
    }

    /// Vertical distance between rows
    pub fn row_advance(&self) -> f64 {
        ROW_ADVANCE_RATIO * self.hex_height()
    }

    /// Horizontal offset applied to odd rows
    pub fn stagger(&self) -> f64 {
        ODD_ROW_STAGGER * self.radius
    }

    /// Smallest container width that fits one cell per row
    pub fn min_width(&self) -> f64 {
        2.0 * self.radius + 2.0 * self.padding
    }

    fn first_x(&self) -> f64 {
        self.radius + self.padding
    }

    fn first_y(&self) -> f64 {
        self.padding + self.row_advance()
    }

    fn fits(&self, x: f64, width: f64) -> bool {
        x + self.radius + self.padding <= width
    }
}

/// One laid-out hexagon
#[derive(Debug, Clone, PartialEq)]
pub struct HexCell {
    pub x: f64,
    pub y: f64,
    pub row: usize,
    pub col: usize,
    /// Position of the record in the input list
    pub source_index: usize,
    pub record: HostStatusRecord,
}

/// Lay records out on the honeycomb
///
/// Returns exactly one cell per record, in input order. Each row holds at
/// least one cell. When an odd row is too narrow for even one staggered cell
/// it is laid out unstaggered so cells stay inside the width.
pub fn generate_layout(
    records: &[HostStatusRecord],
    params: &LayoutParams,
    width: f64,
) -> Vec<HexCell> {
    let mut cells = Vec::with_capacity(records.len());

    let mut row = 0usize;
    let mut col = 0usize;
    let mut row_start = row_start_x(params, row, width);

    for (source_index, record) in records.iter().enumerate() {
        let mut x = row_start + col as f64 * params.pitch();

        if col > 0 && !params.fits(x, width) {
            row += 1;
            col = 0;
            row_start = row_start_x(params, row, width);
            x = row_start;
        }

        cells.push(HexCell {
            x,
            y: params.first_y() + row as f64 * params.row_advance(),
            row,
            col,
            source_index,
            record: record.clone(),
        });
        col += 1;
    }

    cells
}

fn row_start_x(params: &LayoutParams, row: usize, width: f64) -> f64 {
    let base = params.first_x();
    if row % 2 == 1 && params.fits(base + params.stagger(), width) {
        base + params.stagger()
    } else {
        base
    }
}

/// Height needed to show every cell: the lowest center plus one radius
pub fn content_height(cells: &[HexCell], radius: f64) -> f64 {
    cells
        .iter()
        .map(|c| c.y + radius)
        .fold(0.0, f64::max)
}

/// Key deciding whether a cached layout is still valid
#[derive(Debug, Clone, Copy, PartialEq)]
struct LayoutKey {
    width: f64,
    generation: u64,
    len: usize,
    params: LayoutParams,
}

/// Layout memoised on container width and record generation
///
/// Callers bump the generation whenever they replace the record list, and
/// pass the measured width on every frame. The layout only re-runs when one
/// of them changed.
#[derive(Debug, Default)]
pub struct LayoutCache {
    key: Option<LayoutKey>,
    cells: Vec<HexCell>,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return cells for the given inputs, regenerating when stale
    ///
    /// Returns `true` as the second value when a new layout was produced.
    pub fn sync(
        &mut self,
        records: &[HostStatusRecord],
        generation: u64,
        params: &LayoutParams,
        width: f64,
    ) -> (&[HexCell], bool) {
        let key = LayoutKey {
            width,
            generation,
            len: records.len(),
            params: *params,
        };

        let stale = self.key != Some(key);
        if stale {
            self.cells = generate_layout(records, params, width);
            self.key = Some(key);
            tracing::debug!(
                cells = self.cells.len(),
                width,
                generation,
                "Regenerated hexbin layout"
            );
        }

        (&self.cells, stale)
    }

    /// Forget the cached layout (container resized)
    pub fn invalidate(&mut self) {
        self.key = None;
    }

    pub fn cells(&self) -> &[HexCell] {
        &self.cells
    }
}
