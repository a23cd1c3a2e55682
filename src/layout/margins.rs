use crate::units::Pt;

/// Margins are used when laying out objects on a page. There is no control
/// preventing objects on pages to overflow the margins—the margins are there
/// as guidelines for layout functions. Additionally, the margins are applied
/// to [`Page`](crate::Page)s to determine the `ArtBox` attribute of each page in the
/// generated PDF
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: Pt,
    pub right: Pt,
    pub bottom: Pt,
    pub left: Pt,
}

impl Margins {
    /// Create margins where all values are equal
    pub fn all<D: Into<Pt>>(value: D) -> Margins {
        let value: Pt = value.into();
        Margins {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Create margins by specifying different values for vertical (top and bottom)
    /// and horizontal (left and right) margins
    pub fn symmetric(vertical: Pt, horizontal: Pt) -> Margins {
        Margins {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Create margins where all values are 0.0
    pub fn empty() -> Margins {
        Margins::all(Pt(0.0))
    }

    /// The margins that center a `cols` x `rows` grid of `cell_width` x `cell_height`
    /// cells on a page. A grid larger than the page gets no margin on that axis.
    pub fn centering_grid(
        page: (Pt, Pt),
        cell_width: Pt,
        cell_height: Pt,
        rows: usize,
        cols: usize,
    ) -> Margins {
        let horizontal = ((page.0 - cell_width * cols as f32) / 2.0).max(Pt(0.0));
        let vertical = ((page.1 - cell_height * rows as f32) / 2.0).max(Pt(0.0));
        Margins::symmetric(vertical, horizontal)
    }
}
