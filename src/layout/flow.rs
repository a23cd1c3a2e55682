use crate::config::PageLayout;
use crate::layout::{Margins, TOLERANCE};
use crate::pagesize::PageSize;
use crate::units::Pt;

/// Where the next cell goes. `x` and `y` are the top-left corner of the cell in sheet
/// space (measured from the top-left corner of the page).
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Cursor {
    pub page: usize,
    pub row: usize,
    pub col: usize,
    pub x: Pt,
    pub y: Pt,
}

impl Cursor {
    /// A cursor on the first cell of the first page at the given position
    pub fn at(x: Pt, y: Pt) -> Cursor {
        Cursor {
            x,
            y,
            ..Default::default()
        }
    }
}

/// What moving the cursor to the next cell required
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FlowEvent {
    /// The cell sits to the right of the previous one
    SameRow,
    /// The previous row was full, the cell starts the next row
    NewRow,
    /// The cell starts a page that does not exist yet
    NewPage,
}

/// Walks cells across a sheet row by row, page by page.
///
/// Pages are only asked for when a cell actually needs one: the first call to
/// [PageFlow::advance] reports [FlowEvent::NewPage], as does the first cell that no
/// longer fits below the last row. Filling exactly `rows × cols` cells therefore never
/// produces a trailing blank page.
#[derive(Debug, Clone)]
pub struct PageFlow {
    cell_width: Pt,
    cell_height: Pt,
    rows: usize,
    cols: usize,
    page_width: Pt,
    page_height: Pt,
    margins: Margins,
    cursor: Option<Cursor>,
}

impl PageFlow {
    pub fn new(layout: &PageLayout, page: PageSize) -> PageFlow {
        let margins = Margins::centering_grid(
            page,
            layout.cell.width,
            layout.cell.height,
            layout.rows,
            layout.cols,
        );
        PageFlow {
            cell_width: layout.cell.width,
            cell_height: layout.cell.height,
            rows: layout.rows,
            cols: layout.cols,
            page_width: page.0,
            page_height: page.1,
            margins,
            cursor: None,
        }
    }

    /// The margins that center the grid on each page
    pub fn margins(&self) -> Margins {
        self.margins
    }

    /// The cell most recently handed out, if any
    pub fn cursor(&self) -> Option<Cursor> {
        self.cursor
    }

    /// The number of pages opened so far
    pub fn pages(&self) -> usize {
        self.cursor.map(|c| c.page + 1).unwrap_or(0)
    }

    fn origin(&self, page: usize) -> Cursor {
        Cursor {
            page,
            row: 0,
            col: 0,
            x: self.margins.left,
            y: self.margins.top,
        }
    }

    fn right_edge(&self) -> Pt {
        self.page_width - self.margins.right
    }

    fn bottom_edge(&self) -> Pt {
        self.page_height - self.margins.bottom
    }

    /// Moves to the next cell and reports how it got there
    pub fn advance(&mut self) -> (Cursor, FlowEvent) {
        let (next, event) = match self.cursor {
            None => (self.origin(0), FlowEvent::NewPage),
            Some(current) => {
                let x = current.x + self.cell_width;
                let row_full = current.col + 1 >= self.cols
                    || x + self.cell_width > self.right_edge() + TOLERANCE;
                if !row_full {
                    let next = Cursor {
                        col: current.col + 1,
                        x,
                        ..current
                    };
                    (next, FlowEvent::SameRow)
                } else {
                    let y = current.y + self.cell_height;
                    let page_full = current.row + 1 >= self.rows
                        || y + self.cell_height > self.bottom_edge() + TOLERANCE;
                    if page_full {
                        tracing::debug!(page = current.page + 1, "starting a new page");
                        (self.origin(current.page + 1), FlowEvent::NewPage)
                    } else {
                        let next = Cursor {
                            row: current.row + 1,
                            col: 0,
                            x: self.margins.left,
                            y,
                            ..current
                        };
                        (next, FlowEvent::NewRow)
                    }
                }
            }
        };

        self.cursor = Some(next);
        (next, event)
    }
}
