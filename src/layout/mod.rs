//! Laying out labels on a sheet.
//!
//! A sheet is a grid of equally sized cells. Each cell holds one label: a square QR
//! code and a caption that is wrapped (and shrunk, if it has to be) into whatever
//! space the code leaves.
//!
//! - [`layout_cell`](crate::layout::layout_cell) decides where the QR code and the
//!   caption go inside a single cell
//! - [`PageFlow`](crate::layout::PageFlow) decides which cell comes next, and when a
//!   new row or a new page is needed
//! - [`wrap_text`](crate::layout::wrap_text) breaks a caption into lines that fit a
//!   given width, measured by any [`TextMeasure`](crate::layout::TextMeasure)
//!
//! All coordinates here are in "sheet space": measured in points from the top-left
//! corner of the page, growing down. They are flipped into PDF space only when the
//! page is drawn.
//!
//! # Example
//!
//! ```
//! use qrlabel::layout::{layout_cell, FlowEvent, PageFlow, Placement};
//! use qrlabel::{Font, Label, PageLayout, PageSizeSpec, Unit};
//!
//! let layout = PageLayout::new(
//!     38.0,
//!     21.2,
//!     10,
//!     5,
//!     Unit::Mm,
//!     PageSizeSpec::Named("A4".into()),
//!     Placement::Right,
//!     10.0,
//! )
//! .expect("layout is valid");
//! let font = Font::default();
//!
//! let mut flow = PageFlow::new(&layout, layout.page);
//! let (cursor, event) = flow.advance();
//! assert_eq!(event, FlowEvent::NewPage);
//!
//! let label = Label::new("https://example.org", "A very long label text that does not fit");
//! let result = layout_cell(&layout, &label, 40.0, &cursor, &font);
//!
//! // the code never drops below 40% of the cell width
//! assert!(result.qr.width >= layout.cell.width * 0.4);
//! assert!(result.qr.width <= layout.cell.height);
//! assert!(!result.lines.is_empty());
//! ```

mod cell;
mod flow;
mod margins;
mod text;

pub use cell::*;
pub use flow::*;
pub use margins::*;
pub use text::*;
