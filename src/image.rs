use crate::refs::{ObjectReferences, RefType};
use crate::LabelError;
use image::{GrayImage, ImageFormat};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Pdf};

/// A greyscale bitmap, such as a rendered QR code, re-encoded as a flate stream when
/// the document is written
pub struct Image {
    pub bitmap: GrayImage,
    /// Whether readers should smooth the image when scaling it. QR codes must stay
    /// crisp, so this is off unless asked for.
    pub interpolate: bool,
}

impl Image {
    /// Decode a PNG from memory. Colour and alpha are dropped, only the luminance is kept.
    pub fn new_raster_from_memory(data: &[u8]) -> Result<Image, LabelError> {
        let image = image::load_from_memory_with_format(data, ImageFormat::Png)?;
        Ok(Self::new_raster(image.to_luma8()))
    }

    pub fn new_raster(bitmap: GrayImage) -> Image {
        Image {
            bitmap,
            interpolate: false,
        }
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.bitmap.width()
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.bitmap.height()
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        image_index: usize,
        writer: &mut Pdf,
    ) -> Result<(), LabelError> {
        let id = refs.gen(RefType::Image(image_index));
        let level = CompressionLevel::DefaultLevel as u8;
        let bytes = compress_to_vec_zlib(self.bitmap.as_raw(), level);

        let mut image = writer.image_xobject(id, bytes.as_slice());
        image.filter(Filter::FlateDecode);
        image.width(self.width() as i32);
        image.height(self.height() as i32);
        image.color_space().device_gray();
        image.bits_per_component(8);
        image.interpolate(self.interpolate);
        image.finish();

        Ok(())
    }
}
