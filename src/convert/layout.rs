//! Page geometry for text-to-PDF conversion.

/// Points per millimetre.
const PT_PER_MM: f32 = 72.0 / 25.4;

/// Fixed page geometry: A4 portrait, one text cell per line.
///
/// Cells start at the top margin and stack downwards. A new page begins
/// once the next cell would cross the page-break margin at the bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    /// Left and top margin.
    pub margin_mm: f32,
    /// Distance from the bottom edge at which a page break is triggered.
    pub break_margin_mm: f32,
    /// Horizontal padding inside a cell.
    pub cell_padding_mm: f32,
    pub line_height_mm: f32,
    pub font_size_pt: f32,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_mm: 10.0,
            break_margin_mm: 20.0,
            cell_padding_mm: 1.0,
            line_height_mm: 10.0,
            font_size_pt: 12.0,
        }
    }
}

impl PageLayout {
    /// Number of cells that fit on one page (at least one).
    pub fn rows_per_page(&self) -> usize {
        let usable = self.page_height_mm - self.margin_mm - self.break_margin_mm;
        ((usable / self.line_height_mm).floor() as usize).max(1)
    }

    /// Page size in points, for the MediaBox.
    pub fn media_box(&self) -> (f32, f32) {
        (
            self.page_width_mm * PT_PER_MM,
            self.page_height_mm * PT_PER_MM,
        )
    }

    /// Text origin of the `row`-th cell on a page, in PDF points
    /// (origin bottom-left).
    pub fn baseline(&self, row: usize) -> (f32, f32) {
        let font_size_mm = self.font_size_pt / PT_PER_MM;
        let cell_top = self.margin_mm + row as f32 * self.line_height_mm;
        let baseline_from_top = cell_top + 0.5 * self.line_height_mm + 0.3 * font_size_mm;

        let x = (self.margin_mm + self.cell_padding_mm) * PT_PER_MM;
        let y = (self.page_height_mm - baseline_from_top) * PT_PER_MM;
        (x, y)
    }
}
