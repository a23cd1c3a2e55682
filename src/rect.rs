use crate::units::*;

/// A rectangle in PDF space, specified by two opposite corners. The origin is the
/// lower-left corner of the page and y grows upwards.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    /// The x-coordinate of the first (typically, lower-left) corner.
    pub x1: Pt,
    /// The y-coordinate of the first (typically, lower-left) corner.
    pub y1: Pt,
    /// The x-coordinate of the second (typically, upper-right) corner.
    pub x2: Pt,
    /// The y-coordinate of the second (typically, upper-right) corner.
    pub y2: Pt,
}

impl Rect {
    pub fn width(&self) -> Pt {
        self.x2 - self.x1
    }

    pub fn height(&self) -> Pt {
        self.y2 - self.y1
    }
}

impl From<Rect> for pdf_writer::Rect {
    fn from(r: Rect) -> Self {
        pdf_writer::Rect {
            x1: r.x1.into(),
            y1: r.y1.into(),
            x2: r.x2.into(),
            y2: r.y2.into(),
        }
    }
}

impl From<&Rect> for pdf_writer::Rect {
    fn from(r: &Rect) -> Self {
        pdf_writer::Rect {
            x1: r.x1.into(),
            y1: r.y1.into(),
            x2: r.x2.into(),
            y2: r.y2.into(),
        }
    }
}

/// A rectangle in sheet space: the origin is the top-left corner of the page and y
/// grows downwards, the way labels are read and the way the cursor walks a sheet.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Frame {
    pub x: Pt,
    pub y: Pt,
    pub width: Pt,
    pub height: Pt,
}

impl Frame {
    pub fn new(x: Pt, y: Pt, width: Pt, height: Pt) -> Frame {
        Frame {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> Pt {
        self.x + self.width
    }

    pub fn bottom(&self) -> Pt {
        self.y + self.height
    }

    /// Whether `other` lies entirely within this frame, allowing for `tolerance` of
    /// floating point slack on every edge
    pub fn contains(&self, other: &Frame, tolerance: Pt) -> bool {
        other.x >= self.x - tolerance
            && other.y >= self.y - tolerance
            && other.right() <= self.right() + tolerance
            && other.bottom() <= self.bottom() + tolerance
    }

    /// Whether the two frames share any area, ignoring touching edges
    pub fn overlaps(&self, other: &Frame, tolerance: Pt) -> bool {
        self.x + tolerance < other.right()
            && other.x + tolerance < self.right()
            && self.y + tolerance < other.bottom()
            && other.y + tolerance < self.bottom()
    }

    /// Flip the frame into PDF space on a page of the given height
    pub fn to_pdf(&self, page_height: Pt) -> Rect {
        Rect {
            x1: self.x,
            y1: page_height - self.bottom(),
            x2: self.right(),
            y2: page_height - self.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flips_frames_into_pdf_space() {
        let frame = Frame::new(Pt(10.0), Pt(20.0), Pt(30.0), Pt(40.0));
        let rect = frame.to_pdf(Pt(100.0));
        assert_eq!(
            rect,
            Rect {
                x1: Pt(10.0),
                y1: Pt(40.0),
                x2: Pt(40.0),
                y2: Pt(80.0),
            }
        );
        assert_eq!(rect.width(), frame.width);
        assert_eq!(rect.height(), frame.height);
    }

    #[test]
    fn adjacent_frames_do_not_overlap() {
        let top = Frame::new(Pt(0.0), Pt(0.0), Pt(10.0), Pt(5.0));
        let bottom = Frame::new(Pt(0.0), Pt(5.0), Pt(10.0), Pt(5.0));
        assert!(!top.overlaps(&bottom, Pt(1e-3)));
        assert!(top.overlaps(&Frame::new(Pt(2.0), Pt(2.0), Pt(2.0), Pt(2.0)), Pt(1e-3)));
    }
}
