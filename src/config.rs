use crate::layout::{Cell, Placement};
use crate::pagesize::{self, PageSize};
use crate::qr::RecoveryLevel;
use crate::units::{Pt, Unit};
use crate::LabelError;

/// How big the paper is
#[derive(Debug, Clone, PartialEq)]
pub enum PageSizeSpec {
    /// A well-known paper size such as `A4` or `Letter`, see [pagesize::named]
    Named(String),
    /// Explicit dimensions, in the unit of the [PageLayout]
    Custom { width: f32, height: f32 },
}

impl Default for PageSizeSpec {
    fn default() -> Self {
        PageSizeSpec::Named("A4".to_string())
    }
}

impl PageSizeSpec {
    /// Resolves the page dimensions in points
    pub fn resolve(&self, unit: Unit) -> Result<PageSize, LabelError> {
        match self {
            PageSizeSpec::Named(name) => {
                pagesize::named(name).ok_or_else(|| LabelError::UnknownPageSize(name.clone()))
            }
            PageSizeSpec::Custom { width, height } => {
                let valid = |v: &f32| v.is_finite() && *v > 0.0;
                if !valid(width) || !valid(height) {
                    return Err(LabelError::InvalidPageDimensions {
                        width: *width,
                        height: *height,
                    });
                }
                Ok((unit.to_pt(*width), unit.to_pt(*height)))
            }
        }
    }
}

/// The immutable geometry of a sheet of labels, validated up front
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub cell: Cell,
    pub rows: usize,
    pub cols: usize,
    /// The unit the user gave dimensions in
    pub unit: Unit,
    pub page_size: PageSizeSpec,
    /// `page_size` resolved to points
    pub page: PageSize,
    pub placement: Placement,
    /// The caption font size labels start out with
    pub font_size: Pt,
}

impl PageLayout {
    /// Builds a layout from dimensions given in `unit`. The font size is always in
    /// points.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        width: f32,
        height: f32,
        rows: usize,
        cols: usize,
        unit: Unit,
        page_size: PageSizeSpec,
        placement: Placement,
        font_size: f32,
    ) -> Result<PageLayout, LabelError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(LabelError::InvalidCell { width, height });
        }
        if rows == 0 || cols == 0 {
            return Err(LabelError::InvalidGrid { rows, cols });
        }
        if !(font_size.is_finite() && font_size >= 1.0) {
            return Err(LabelError::InvalidFontSize(font_size));
        }
        let page = page_size.resolve(unit)?;

        Ok(PageLayout {
            cell: Cell::new(unit.to_pt(width), unit.to_pt(height)),
            rows,
            cols,
            unit,
            page_size,
            page,
            placement,
            font_size: Pt(font_size),
        })
    }

    /// How many labels fit on one page
    pub fn labels_per_page(&self) -> usize {
        self.rows * self.cols
    }
}

/// What to do with a label whose content the QR encoder rejects
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum EncodeFailurePolicy {
    /// Leave the label out, warn, and carry on with the rest
    #[default]
    Skip,
    /// Stop rendering and report the error
    Abort,
}

/// Everything that controls how a sheet is rendered
#[derive(Debug, Clone, PartialEq)]
pub struct SheetOptions {
    pub layout: PageLayout,
    pub recovery_level: RecoveryLevel,
    /// The QR code may not shrink below this share of the cell, in percent
    pub min_qr_size_percentage: f32,
    /// Draw a thin outline around each cell, useful for cutting
    pub border: bool,
    pub on_encode_error: EncodeFailurePolicy,
    /// Written to the document information dictionary
    pub title: Option<String>,
}

impl SheetOptions {
    pub const DEFAULT_MIN_QR_SIZE_PERCENTAGE: f32 = 40.0;

    pub fn new(layout: PageLayout) -> SheetOptions {
        SheetOptions {
            layout,
            recovery_level: RecoveryLevel::default(),
            min_qr_size_percentage: Self::DEFAULT_MIN_QR_SIZE_PERCENTAGE,
            border: false,
            on_encode_error: EncodeFailurePolicy::default(),
            title: None,
        }
    }

    pub fn validate(&self) -> Result<(), LabelError> {
        let pct = self.min_qr_size_percentage;
        if !(0.0..=100.0).contains(&pct) {
            return Err(LabelError::InvalidQrPercentage(pct));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(width: f32, height: f32, rows: usize, cols: usize) -> Result<PageLayout, LabelError> {
        PageLayout::new(
            width,
            height,
            rows,
            cols,
            Unit::Mm,
            PageSizeSpec::default(),
            Placement::Right,
            10.0,
        )
    }

    #[test]
    fn converts_cells_to_points() {
        let layout = layout(25.4, 12.7, 10, 5).unwrap();
        assert!((layout.cell.width.0 - 72.0).abs() < 1e-3);
        assert!((layout.cell.height.0 - 36.0).abs() < 1e-3);
        assert_eq!(layout.page, pagesize::A4);
        assert_eq!(layout.labels_per_page(), 50);
    }

    #[test]
    fn rejects_degenerate_cells_and_grids() {
        assert!(matches!(
            layout(0.0, 10.0, 1, 1),
            Err(LabelError::InvalidCell { .. })
        ));
        assert!(matches!(
            layout(10.0, f32::NAN, 1, 1),
            Err(LabelError::InvalidCell { .. })
        ));
        assert!(matches!(
            layout(10.0, 10.0, 0, 1),
            Err(LabelError::InvalidGrid { .. })
        ));
    }

    #[test]
    fn resolves_page_sizes() {
        assert_eq!(
            PageSizeSpec::Named("letter".into()).resolve(Unit::Mm).unwrap(),
            pagesize::LETTER
        );
        assert!(matches!(
            PageSizeSpec::Named("B7".into()).resolve(Unit::Mm),
            Err(LabelError::UnknownPageSize(_))
        ));
        assert_eq!(
            PageSizeSpec::Custom {
                width: 2.0,
                height: 3.0
            }
            .resolve(Unit::In)
            .unwrap(),
            (Pt(144.0), Pt(216.0))
        );
        assert!(matches!(
            PageSizeSpec::Custom {
                width: -1.0,
                height: 3.0
            }
            .resolve(Unit::In),
            Err(LabelError::InvalidPageDimensions { .. })
        ));
    }

    #[test]
    fn rejects_out_of_range_percentages() {
        let mut options = SheetOptions::new(layout(38.0, 21.2, 10, 5).unwrap());
        assert!(options.validate().is_ok());
        options.min_qr_size_percentage = 120.0;
        assert!(matches!(
            options.validate(),
            Err(LabelError::InvalidQrPercentage(_))
        ));
    }
}
