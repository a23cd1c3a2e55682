//! Render sheets of printable QR code labels, each with a caption, to PDF.
//!
//! Labels are laid out on a grid of equally sized cells centered on the page. Each
//! cell holds a square QR code and a caption placed above, below, left or right of
//! it; captions are wrapped, and shrunk if they have to be, so they fit next to a
//! code that stays large enough to scan.
//!
//! ```no_run
//! use qrlabel::layout::Placement;
//! use qrlabel::{parse_labels, render_sheet, write_sheet, Font, PageLayout, PageSizeSpec};
//! use qrlabel::{SheetOptions, Unit};
//!
//! # fn main() -> Result<(), qrlabel::LabelError> {
//! let layout = PageLayout::new(
//!     38.0,
//!     21.2,
//!     10,
//!     5,
//!     Unit::Mm,
//!     PageSizeSpec::Named("A4".into()),
//!     Placement::Right,
//!     10.0,
//! )?;
//! let labels = parse_labels("https://example.org;Example\nSHELF-12;Shelf 12\n", ";");
//!
//! let (document, report) = render_sheet(&SheetOptions::new(layout), Font::default(), &labels)?;
//! let path = write_sheet(document, "labels")?;
//! println!("{} labels on {} page(s) in {}", report.rendered, report.pages, path.display());
//! # Ok(())
//! # }
//! ```

mod colour;
pub use colour::*;

mod config;
pub use config::*;

pub(crate) mod content;

mod document;
pub use document::*;

mod font;
pub use font::*;

mod image;
pub use self::image::*;

mod info;
pub use info::*;

mod labels;
pub use labels::*;

/// Laying out labels within cells and cells on pages
pub mod layout;

mod page;
pub use page::*;

/// Paper sizes
pub mod pagesize;

mod qr;
pub use qr::*;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod sheet;
pub use sheet::*;

mod standard_font;
pub use standard_font::*;

mod units;
pub use units::*;

mod error;
pub use error::*;

/// Re-export PDF-writer functionality, mostly for custom [pdf_writer::Content] generation
pub use pdf_writer;
