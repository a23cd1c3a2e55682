use std::str::FromStr;

use crate::config::PageLayout;
use crate::labels::Label;
use crate::layout::flow::Cursor;
use crate::layout::text::{longest_line_width, wrap_text, TextMeasure};
use crate::rect::Frame;
use crate::units::Pt;
use crate::LabelError;

/// Slack allowed when comparing accumulated floating point lengths
pub const TOLERANCE: Pt = Pt(1e-3);

/// The physical size of one label on the sheet
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Cell {
    pub width: Pt,
    pub height: Pt,
}

impl Cell {
    pub fn new(width: Pt, height: Pt) -> Cell {
        Cell { width, height }
    }

    /// The largest square that fits the cell has sides this long
    pub fn smallest_dimension(&self) -> Pt {
        self.width.min(self.height)
    }
}

/// Where the caption sits relative to its QR code
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Placement {
    Top,
    Bottom,
    Left,
    #[default]
    Right,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Axis {
    /// caption and code are stacked on top of each other
    Vertical,
    /// caption and code sit side by side
    Horizontal,
}

impl Placement {
    fn axis(self) -> Axis {
        match self {
            Placement::Top | Placement::Bottom => Axis::Vertical,
            Placement::Left | Placement::Right => Axis::Horizontal,
        }
    }

    /// The short code accepted on the command line
    pub fn code(self) -> &'static str {
        match self {
            Placement::Top => "T",
            Placement::Bottom => "B",
            Placement::Left => "L",
            Placement::Right => "R",
        }
    }
}

impl FromStr for Placement {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "t" | "top" => Ok(Placement::Top),
            "b" | "bottom" => Ok(Placement::Bottom),
            "l" | "left" => Ok(Placement::Left),
            "r" | "right" => Ok(Placement::Right),
            _ => Err(LabelError::UnknownPlacement(s.to_string())),
        }
    }
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Something worth telling the user about a label that was laid out, none of which
/// stop the label from being drawn
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum LayoutDiagnostic {
    /// The caption only fit after shrinking the font
    FontReduced { from: Pt, to: Pt },
    /// Even at the smallest font size the QR code is smaller than requested
    QrBelowMinimum { size: Pt, minimum: Pt },
    /// Even at the smallest font size the caption spills out of its cell by this much
    CaptionOverflow { overflow: Pt },
}

/// Where everything in one cell goes, in sheet space
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    /// The square the QR code is drawn into
    pub qr: Frame,
    /// The part of the cell left over for the caption, `None` when there is no caption
    pub caption: Option<Frame>,
    /// The caption, already wrapped to fit `caption`
    pub lines: Vec<String>,
    /// The font size the caption must be set in
    pub font_size: Pt,
    /// The line height at `font_size`
    pub line_height: Pt,
    /// Breathing space shared between the QR code and the caption
    pub cell_margin: Pt,
    pub diagnostics: Vec<LayoutDiagnostic>,
}

impl LayoutResult {
    /// The tight box around the caption lines, centered in the caption area
    pub fn text_block<M: TextMeasure + ?Sized>(&self, measure: &M) -> Option<Frame> {
        let area = self.caption?;
        let width = longest_line_width(measure, &self.lines, self.font_size);
        let height = self.line_height * self.lines.len() as f32;
        Some(Frame::new(
            area.x + (area.width - width) / 2.0,
            area.y + (area.height - height) / 2.0,
            width,
            height,
        ))
    }

    pub fn font_reduced(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| matches!(d, LayoutDiagnostic::FontReduced { .. }))
    }
}

/// The outcome of fitting a caption next to a QR code
struct Fit {
    qr_size: Pt,
    lines: Vec<String>,
    font_size: Pt,
    line_height: Pt,
    min_qr_size: Pt,
}

/// Lays out one label in the cell whose top-left corner is at the cursor.
///
/// The QR code is always square and never larger than the smallest cell dimension. The
/// caption is wrapped to the space the code leaves; if the code would end up smaller
/// than `min_qr_size_percentage` of the cell (or, side by side, the caption would not
/// fit the cell height), the font shrinks one point at a time down to 1pt. A caption
/// that still does not fit is laid out anyway and reported in
/// [LayoutResult::diagnostics]. An empty caption never shrinks the font.
///
/// The code is inset from its cell edge by at most half the room the caption leaves
/// spare, so the inset never pushes it into the caption band.
pub fn layout_cell<M: TextMeasure + ?Sized>(
    layout: &PageLayout,
    label: &Label,
    min_qr_size_percentage: f32,
    cursor: &Cursor,
    measure: &M,
) -> LayoutResult {
    let cell = layout.cell;
    let fraction = min_qr_size_percentage.clamp(0.0, 100.0) / 100.0;

    let fit = match layout.placement.axis() {
        Axis::Vertical => fit_stacked(cell, &label.caption, layout.font_size, fraction, measure),
        Axis::Horizontal => {
            fit_side_by_side(cell, &label.caption, layout.font_size, fraction, measure)
        }
    };

    let qr_size = fit.qr_size;
    let cell_margin = (cell.height - qr_size).min(cell.width - qr_size);
    let text_height = fit.line_height * fit.lines.len() as f32;
    let text_width = longest_line_width(measure, &fit.lines, fit.font_size);

    let mut diagnostics = Vec::new();
    if fit.font_size < layout.font_size && !fit.lines.is_empty() {
        tracing::info!(
            content = %label.content,
            "Decreased font size to {:.1} to fit label",
            fit.font_size.0
        );
        diagnostics.push(LayoutDiagnostic::FontReduced {
            from: layout.font_size,
            to: fit.font_size,
        });
    }
    if qr_size + TOLERANCE < fit.min_qr_size {
        tracing::warn!(
            content = %label.content,
            "QR code is {:.1}pt, smaller than the requested {:.1}pt",
            qr_size.0,
            fit.min_qr_size.0
        );
        diagnostics.push(LayoutDiagnostic::QrBelowMinimum {
            size: qr_size,
            minimum: fit.min_qr_size,
        });
    }

    let (x, y) = (cursor.x, cursor.y);
    let (qr, caption) = if fit.lines.is_empty() {
        // nothing to make room for, center the code in the cell
        let qr = Frame::new(
            x + (cell.width - qr_size) / 2.0,
            y + (cell.height - qr_size) / 2.0,
            qr_size,
            qr_size,
        );
        (qr, None)
    } else {
        let (band, extent) = match layout.placement.axis() {
            Axis::Vertical => (cell.height - qr_size, text_height),
            Axis::Horizontal => (cell.width - qr_size, text_width),
        };
        let inset = cell_margin.min(band - extent).max(Pt(0.0)) / 2.0;

        match layout.placement {
            Placement::Bottom => {
                let qr = Frame::new(x + (cell.width - qr_size) / 2.0, y + inset, qr_size, qr_size);
                let top = qr.bottom();
                let caption = Frame::new(x, top, cell.width, y + cell.height - top);
                (qr, Some(caption))
            }
            Placement::Top => {
                let qr = Frame::new(
                    x + (cell.width - qr_size) / 2.0,
                    y + cell.height - qr_size - inset,
                    qr_size,
                    qr_size,
                );
                let caption = Frame::new(x, y, cell.width, qr.y - y);
                (qr, Some(caption))
            }
            Placement::Left => {
                let qr = Frame::new(
                    x + cell.width - qr_size - inset,
                    y + (cell.height - qr_size) / 2.0,
                    qr_size,
                    qr_size,
                );
                let caption = Frame::new(x, y, qr.x - x, cell.height);
                (qr, Some(caption))
            }
            Placement::Right => {
                let qr = Frame::new(x + inset, y + (cell.height - qr_size) / 2.0, qr_size, qr_size);
                let left = qr.right();
                let caption = Frame::new(left, y, x + cell.width - left, cell.height);
                (qr, Some(caption))
            }
        }
    };

    if let Some(area) = caption {
        let overflow = (text_height - area.height).max(text_width - area.width);
        if overflow > TOLERANCE {
            tracing::warn!(
                content = %label.content,
                "caption does not fit its cell even at {:.1}pt, overflowing by {:.1}pt",
                fit.font_size.0,
                overflow.0
            );
            diagnostics.push(LayoutDiagnostic::CaptionOverflow { overflow });
        }
    }

    LayoutResult {
        qr,
        caption,
        lines: fit.lines,
        font_size: fit.font_size,
        line_height: fit.line_height,
        cell_margin,
        diagnostics,
    }
}

/// Upper bound on font shrinking steps, one per point of the starting size
fn max_steps(font_size: Pt) -> usize {
    font_size.0.ceil().max(0.0) as usize
}

fn shrink(font_size: Pt) -> Pt {
    (font_size - Pt(1.0)).max(Pt(1.0))
}

/// Caption above or below the code: the caption gets the full cell width and the code
/// gets whatever height the caption leaves
fn fit_stacked<M: TextMeasure + ?Sized>(
    cell: Cell,
    caption: &str,
    font_size: Pt,
    fraction: f32,
    measure: &M,
) -> Fit {
    let smallest = cell.smallest_dimension();
    let min_qr_size = cell.height * fraction;
    let candidate = |lines: &[String], line_height: Pt| {
        smallest
            .min(cell.height - line_height * lines.len() as f32)
            .max(Pt(0.0))
    };

    let mut font_size = font_size;
    let mut line_height = measure.line_height(font_size);
    let mut lines = wrap_text(measure, caption, font_size, cell.width);
    let mut qr_size = candidate(&lines, line_height);

    let limit = max_steps(font_size);
    let mut steps = 0;
    // without lines a smaller font frees no room for the code
    while !lines.is_empty()
        && qr_size + TOLERANCE < min_qr_size
        && font_size > Pt(1.0)
        && steps < limit
    {
        font_size = shrink(font_size);
        line_height = measure.line_height(font_size);
        lines = wrap_text(measure, caption, font_size, cell.width);
        qr_size = candidate(&lines, line_height);
        steps += 1;
    }

    Fit {
        qr_size,
        lines,
        font_size,
        line_height,
        min_qr_size,
    }
}

/// Caption left or right of the code: the code starts as large as the cell allows and
/// gives up width to the caption's longest line, never dropping below the minimum
fn fit_side_by_side<M: TextMeasure + ?Sized>(
    cell: Cell,
    caption: &str,
    font_size: Pt,
    fraction: f32,
    measure: &M,
) -> Fit {
    let smallest = cell.smallest_dimension();
    let min_qr_size = cell.width * fraction;
    let limit = max_steps(font_size);

    let mut font_size = font_size;
    let mut line_height = measure.line_height(font_size);
    let mut qr_size = smallest;
    let mut lines = wrap_text(measure, caption, font_size, cell.width - qr_size);

    let mut steps = 0;
    loop {
        let longest = longest_line_width(measure, &lines, font_size);
        qr_size = (cell.width - longest).max(min_qr_size).min(smallest);

        let fits = line_height * lines.len() as f32 <= cell.height + TOLERANCE;
        if fits || lines.is_empty() || font_size <= Pt(1.0) || steps >= limit {
            break;
        }

        font_size = shrink(font_size);
        line_height = measure.line_height(font_size);
        lines = wrap_text(measure, caption, font_size, cell.width - qr_size);
        steps += 1;
    }

    Fit {
        qr_size,
        lines,
        font_size,
        line_height,
        min_qr_size,
    }
}
