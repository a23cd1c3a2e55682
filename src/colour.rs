/// Ink colours. Labels are printed on office printers, so only device colour spaces
/// are supported.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Colour {
    /// DeviceGray, 0.0 is black and 1.0 is white
    Grey { g: f32 },
    /// DeviceRGB, each channel from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
}

pub mod colours {
    use super::Colour;

    /// Caption text
    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
    /// Cutting guides around cells, light enough that scanners ignore it
    pub const GUIDE: Colour = Colour::Grey { g: 0.6 };
}
