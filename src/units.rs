use derive_more::{Add, AddAssign, Display, From, Into, Neg, Sub, SubAssign, Sum};
use std::ops::{Div, DivAssign, Mul, MulAssign};
use std::str::FromStr;

use crate::error::LabelError;

/// PDF points, 1/72 of an inch. Every layout calculation in the crate happens in points.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Neg,
    Sum,
    Display,
    From,
    Into,
)]
pub struct Pt(pub f32);

/// Millimetres
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Display, From, Into)]
pub struct Mm(pub f32);

/// Centimetres
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Display, From, Into)]
pub struct Cm(pub f32);

/// Inches
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Display, From, Into)]
pub struct In(pub f32);

const PT_PER_IN: f32 = 72.0;
const PT_PER_MM: f32 = 72.0 / 25.4;
const PT_PER_CM: f32 = 72.0 / 2.54;

impl Pt {
    /// The smaller of two lengths
    pub fn min(self, other: Pt) -> Pt {
        Pt(self.0.min(other.0))
    }

    /// The larger of two lengths
    pub fn max(self, other: Pt) -> Pt {
        Pt(self.0.max(other.0))
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl Mul<f32> for Pt {
    type Output = Pt;

    fn mul(self, rhs: f32) -> Pt {
        Pt(self.0 * rhs)
    }
}

impl Mul<Pt> for f32 {
    type Output = Pt;

    fn mul(self, rhs: Pt) -> Pt {
        Pt(self * rhs.0)
    }
}

impl MulAssign<f32> for Pt {
    fn mul_assign(&mut self, rhs: f32) {
        self.0 *= rhs;
    }
}

impl Div<f32> for Pt {
    type Output = Pt;

    fn div(self, rhs: f32) -> Pt {
        Pt(self.0 / rhs)
    }
}

impl DivAssign<f32> for Pt {
    fn div_assign(&mut self, rhs: f32) {
        self.0 /= rhs;
    }
}

impl From<Mm> for Pt {
    fn from(value: Mm) -> Pt {
        Pt(value.0 * PT_PER_MM)
    }
}

impl From<Cm> for Pt {
    fn from(value: Cm) -> Pt {
        Pt(value.0 * PT_PER_CM)
    }
}

impl From<In> for Pt {
    fn from(value: In) -> Pt {
        Pt(value.0 * PT_PER_IN)
    }
}

impl From<Pt> for Mm {
    fn from(value: Pt) -> Mm {
        Mm(value.0 / PT_PER_MM)
    }
}

impl From<Pt> for In {
    fn from(value: Pt) -> In {
        In(value.0 / PT_PER_IN)
    }
}

/// The unit of measurement user supplied dimensions are expressed in
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Unit {
    Pt,
    #[default]
    Mm,
    Cm,
    In,
}

impl Unit {
    /// Convert a value expressed in this unit into points
    pub fn to_pt(self, value: f32) -> Pt {
        match self {
            Unit::Pt => Pt(value),
            Unit::Mm => Mm(value).into(),
            Unit::Cm => Cm(value).into(),
            Unit::In => In(value).into(),
        }
    }

    /// Convert a length in points back into this unit
    pub fn from_pt(self, value: Pt) -> f32 {
        match self {
            Unit::Pt => value.0,
            Unit::Mm => value.0 / PT_PER_MM,
            Unit::Cm => value.0 / PT_PER_CM,
            Unit::In => value.0 / PT_PER_IN,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Unit::Pt => "pt",
            Unit::Mm => "mm",
            Unit::Cm => "cm",
            Unit::In => "in",
        }
    }
}

impl FromStr for Unit {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pt" => Ok(Unit::Pt),
            "mm" => Ok(Unit::Mm),
            "cm" => Ok(Unit::Cm),
            "in" | "inch" => Ok(Unit::In),
            _ => Err(LabelError::UnknownUnit(s.to_string())),
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
