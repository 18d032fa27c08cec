//! N-up grid geometry
//!
//! Pure layout arithmetic: given a sheet size and a grid shape, compute the
//! uniform scale and the per-cell placement of each source page. No PDF types
//! appear here so the math can be tested on its own.

use crate::error::{Error, Result};

/// Target sheet dimensions in PDF points (1/72 inch)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetSize {
    pub width: f64,
    pub height: f64,
}

impl SheetSize {
    /// Landscape A4: portrait A4 (595 x 842 pt) with the axes swapped
    pub fn a4_landscape() -> Self {
        Self {
            width: 842.0,
            height: 595.0,
        }
    }
}

/// Bounding box of a source page, in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Uniform scale plus translation for one composited page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub scale: f64,
    pub x: f64,
    pub y: f64,
}

/// Grid shape for one output sheet
///
/// Can only be constructed through [`NupGrid::new`], which enforces
/// `columns * rows == pages_per_sheet` before any document is touched.
#[derive(Debug, Clone, Copy)]
pub struct NupGrid {
    pages_per_sheet: usize,
    columns: usize,
    rows: usize,
}

impl NupGrid {
    /// Create a grid, rejecting shapes where `columns * rows` differs from
    /// `pages_per_sheet`
    pub fn new(pages_per_sheet: usize, columns: usize, rows: usize) -> Result<Self> {
        if columns == 0 || rows == 0 || columns * rows != pages_per_sheet {
            return Err(Error::InvalidGrid {
                columns,
                rows,
                pages_per_sheet,
            });
        }
        Ok(Self {
            pages_per_sheet,
            columns,
            rows,
        })
    }

    /// The default 6-up layout: 3 columns x 2 rows
    pub fn six_up() -> Self {
        Self {
            pages_per_sheet: 6,
            columns: 3,
            rows: 2,
        }
    }

    pub fn pages_per_sheet(&self) -> usize {
        self.pages_per_sheet
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Width of one grid cell on the given sheet
    pub fn cell_width(&self, sheet: SheetSize) -> f64 {
        sheet.width / self.columns as f64
    }

    /// Height of one grid cell on the given sheet
    pub fn cell_height(&self, sheet: SheetSize) -> f64 {
        sheet.height / self.rows as f64
    }

    /// Uniform scale that fits `page` inside one cell without distortion
    ///
    /// Derived from the first page of a document and reused for all of its
    /// pages. The smaller of the two per-axis candidates wins, so the scaled
    /// page never overflows its cell; the other axis may leave a margin.
    pub fn fit_scale(&self, sheet: SheetSize, page: &PageBox) -> f64 {
        let scale_x = self.cell_width(sheet) / page.width;
        let scale_y = self.cell_height(sheet) / page.height;
        scale_x.min(scale_y)
    }

    /// Placement for grid slot `slot` (0-indexed within one sheet)
    ///
    /// Slots fill row-major in reading order: slot 0 is the top-left cell,
    /// the last slot the bottom-right. PDF coordinates put the origin at the
    /// bottom-left of the sheet, so the visual top row is the highest band.
    /// The scaled page is centered inside its cell on both axes.
    ///
    /// `slot` must be less than `pages_per_sheet`.
    pub fn placement(&self, sheet: SheetSize, slot: usize, page: &PageBox, scale: f64) -> Placement {
        debug_assert!(slot < self.pages_per_sheet);

        let col = slot % self.columns;
        let row = slot / self.columns;

        let cell_w = self.cell_width(sheet);
        let cell_h = self.cell_height(sheet);
        let cell_x = col as f64 * cell_w;
        let cell_y = (self.rows - 1 - row) as f64 * cell_h;

        let scaled_w = page.width * scale;
        let scaled_h = page.height * scale;

        Placement {
            scale,
            x: cell_x + (cell_w - scaled_w) / 2.0,
            y: cell_y + (cell_h - scaled_h) / 2.0,
        }
    }

    /// Number of output sheets needed for `page_count` source pages
    pub fn sheets_required(&self, page_count: usize) -> usize {
        (page_count + self.pages_per_sheet - 1) / self.pages_per_sheet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn a4_portrait_page() -> PageBox {
        PageBox {
            x: 0.0,
            y: 0.0,
            width: 595.0,
            height: 842.0,
        }
    }

    #[test]
    fn test_six_up_grid_is_valid() {
        let grid = NupGrid::six_up();
        assert_eq!(grid.pages_per_sheet(), 6);
        assert_eq!(grid.columns() * grid.rows(), 6);
    }

    #[test]
    fn test_mismatched_grid_rejected() {
        let result = NupGrid::new(6, 4, 2);
        assert!(matches!(
            result,
            Err(Error::InvalidGrid {
                columns: 4,
                rows: 2,
                pages_per_sheet: 6
            })
        ));
    }

    #[test]
    fn test_zero_dimension_grid_rejected() {
        assert!(NupGrid::new(0, 0, 2).is_err());
        assert!(NupGrid::new(6, 3, 0).is_err());
    }

    #[test]
    fn test_cell_size_divides_sheet() {
        let grid = NupGrid::six_up();
        let sheet = SheetSize::a4_landscape();
        assert!((grid.cell_width(sheet) - 842.0 / 3.0).abs() < EPSILON);
        assert!((grid.cell_height(sheet) - 595.0 / 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_fit_scale_never_overflows_cell() {
        let grid = NupGrid::six_up();
        let sheet = SheetSize::a4_landscape();
        let page = a4_portrait_page();

        let scale = grid.fit_scale(sheet, &page);
        assert!(page.width * scale <= grid.cell_width(sheet) + EPSILON);
        assert!(page.height * scale <= grid.cell_height(sheet) + EPSILON);
    }

    #[test]
    fn test_fit_scale_preserves_aspect_ratio() {
        let grid = NupGrid::six_up();
        let sheet = SheetSize::a4_landscape();
        let page = a4_portrait_page();

        let scale = grid.fit_scale(sheet, &page);
        let scaled_ratio = (page.width * scale) / (page.height * scale);
        assert!((scaled_ratio - page.width / page.height).abs() < EPSILON);
    }

    #[test]
    fn test_wide_page_constrained_by_width() {
        let grid = NupGrid::six_up();
        let sheet = SheetSize::a4_landscape();
        // Wider than tall, so the horizontal candidate must win
        let page = PageBox {
            x: 0.0,
            y: 0.0,
            width: 1000.0,
            height: 100.0,
        };

        let scale = grid.fit_scale(sheet, &page);
        assert!((scale - grid.cell_width(sheet) / 1000.0).abs() < EPSILON);
    }

    #[test]
    fn test_slot_zero_lands_top_left() {
        let grid = NupGrid::six_up();
        let sheet = SheetSize::a4_landscape();
        let page = a4_portrait_page();
        let scale = grid.fit_scale(sheet, &page);

        let place = grid.placement(sheet, 0, &page, scale);
        // First column, and the top band in bottom-left-origin coordinates
        assert!(place.x < grid.cell_width(sheet));
        assert!(place.y >= grid.cell_height(sheet));
    }

    #[test]
    fn test_last_slot_lands_bottom_right() {
        let grid = NupGrid::six_up();
        let sheet = SheetSize::a4_landscape();
        let page = a4_portrait_page();
        let scale = grid.fit_scale(sheet, &page);

        let place = grid.placement(sheet, 5, &page, scale);
        assert!(place.x >= 2.0 * grid.cell_width(sheet));
        assert!(place.y < grid.cell_height(sheet));
    }

    #[test]
    fn test_page_centered_within_cell() {
        let grid = NupGrid::six_up();
        let sheet = SheetSize::a4_landscape();
        let page = a4_portrait_page();
        let scale = grid.fit_scale(sheet, &page);

        let place = grid.placement(sheet, 0, &page, scale);
        let cell_w = grid.cell_width(sheet);
        let cell_h = grid.cell_height(sheet);

        // Equal margins on both sides of the cell
        let left_margin = place.x;
        let right_margin = cell_w - (place.x + page.width * scale);
        assert!((left_margin - right_margin).abs() < EPSILON);

        let bottom_margin = place.y - cell_h; // top band starts at cell_h
        let top_margin = 2.0 * cell_h - (place.y + page.height * scale);
        assert!((bottom_margin - top_margin).abs() < EPSILON);
    }

    #[test]
    fn test_reading_order_across_all_slots() {
        let grid = NupGrid::six_up();
        let sheet = SheetSize::a4_landscape();
        let page = a4_portrait_page();
        let scale = grid.fit_scale(sheet, &page);

        let places: Vec<Placement> = (0..6)
            .map(|slot| grid.placement(sheet, slot, &page, scale))
            .collect();

        // Left to right within a row
        assert!(places[0].x < places[1].x && places[1].x < places[2].x);
        assert!(places[3].x < places[4].x && places[4].x < places[5].x);
        // Top row above bottom row
        assert!(places[0].y > places[3].y);
        assert!(places[2].y > places[5].y);
    }

    #[test]
    #[should_panic]
    fn test_slot_beyond_sheet_rejected() {
        let grid = NupGrid::six_up();
        let sheet = SheetSize::a4_landscape();
        let page = a4_portrait_page();
        grid.placement(sheet, 6, &page, 1.0);
    }

    #[test]
    fn test_sheets_required() {
        let grid = NupGrid::six_up();
        assert_eq!(grid.sheets_required(12), 2);
        assert_eq!(grid.sheets_required(7), 2);
        assert_eq!(grid.sheets_required(6), 1);
        assert_eq!(grid.sheets_required(1), 1);
        assert_eq!(grid.sheets_required(13), 3);
        assert_eq!(grid.sheets_required(0), 0);
    }
}
