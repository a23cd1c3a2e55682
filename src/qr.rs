//! Turning label contents into QR code bitmaps.

use std::io::Cursor;
use std::str::FromStr;
use std::sync::mpsc::{self, Receiver};
use std::thread;

use image::{DynamicImage, GrayImage, ImageFormat, Luma};
use qrcode::{Color, EcLevel, QrCode};

use crate::labels::Label;
use crate::LabelError;

/// How much of the code can be damaged and still be read
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum RecoveryLevel {
    /// About 7%
    Low,
    /// About 15%
    #[default]
    Medium,
    /// About 25%
    High,
    /// About 30%
    Highest,
}

impl RecoveryLevel {
    pub fn ec_level(self) -> EcLevel {
        match self {
            RecoveryLevel::Low => EcLevel::L,
            RecoveryLevel::Medium => EcLevel::M,
            RecoveryLevel::High => EcLevel::Q,
            RecoveryLevel::Highest => EcLevel::H,
        }
    }
}

impl From<RecoveryLevel> for EcLevel {
    fn from(level: RecoveryLevel) -> Self {
        level.ec_level()
    }
}

impl TryFrom<u8> for RecoveryLevel {
    type Error = LabelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(RecoveryLevel::Low),
            1 => Ok(RecoveryLevel::Medium),
            2 => Ok(RecoveryLevel::High),
            3 => Ok(RecoveryLevel::Highest),
            _ => Err(LabelError::UnknownRecoveryLevel(value.to_string())),
        }
    }
}

impl FromStr for RecoveryLevel {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "low" | "l" => Ok(RecoveryLevel::Low),
            "1" | "medium" | "m" => Ok(RecoveryLevel::Medium),
            "2" | "high" | "q" => Ok(RecoveryLevel::High),
            "3" | "highest" | "h" => Ok(RecoveryLevel::Highest),
            _ => Err(LabelError::UnknownRecoveryLevel(s.to_string())),
        }
    }
}

/// Encodes `content` as a QR code and returns it as a PNG: one pixel per module and no
/// quiet zone, since the label cell already provides the white space around it.
pub fn encode_png(content: &str, level: RecoveryLevel) -> Result<Vec<u8>, LabelError> {
    let code = QrCode::with_error_correction_level(content.as_bytes(), level.ec_level())
        .map_err(|source| LabelError::QrEncoding {
            content: content.to_string(),
            source,
        })?;

    let width = code.width() as u32;
    let mut bitmap = GrayImage::from_pixel(width, width, Luma([255u8]));
    for (i, colour) in code.to_colors().iter().enumerate() {
        if *colour == Color::Dark {
            let i = i as u32;
            bitmap.put_pixel(i % width, i / width, Luma([0u8]));
        }
    }

    let mut png = Cursor::new(Vec::new());
    DynamicImage::ImageLuma8(bitmap).write_to(&mut png, ImageFormat::Png)?;
    Ok(png.into_inner())
}

fn encode_label(index: usize, label: &Label, level: RecoveryLevel) -> Result<Vec<u8>, LabelError> {
    if label.content.is_empty() {
        return Err(LabelError::EmptyContent { index });
    }
    encode_png(&label.content, level)
}

/// How many encoded codes may wait for the renderer before the encoder blocks
const QUEUE_DEPTH: usize = 8;

/// Encoded QR codes, handed over one per label in input order
pub struct QrStream {
    receiver: Receiver<Result<Vec<u8>, LabelError>>,
}

impl QrStream {
    /// Blocks until the code for the next label is ready. The inner result is the
    /// per-label outcome; the outer one fails only if the encoder went away early.
    pub fn next_code(&mut self) -> Result<Result<Vec<u8>, LabelError>, LabelError> {
        self.receiver.recv().map_err(|_| LabelError::EncoderStopped)
    }
}

/// Encodes every label on a helper thread while `render` consumes the results.
///
/// The encoder runs ahead of the renderer by at most a few labels. Results arrive in
/// exactly the order of `labels`; a label that cannot be encoded yields an error for
/// that label only.
pub fn with_encoded_labels<R, F>(labels: &[Label], level: RecoveryLevel, render: F) -> R
where
    F: FnOnce(&mut QrStream) -> R,
{
    thread::scope(|scope| {
        let (sender, receiver) = mpsc::sync_channel(QUEUE_DEPTH);

        scope.spawn(move || {
            for (index, label) in labels.iter().enumerate() {
                let encoded = encode_label(index, label, level);
                if sender.send(encoded).is_err() {
                    // the renderer stopped listening
                    tracing::debug!(index, "QR encoder stopping early");
                    break;
                }
            }
        });

        let mut stream = QrStream { receiver };
        let result = render(&mut stream);
        // unblocks the encoder if the renderer bailed out before the last label
        drop(stream);
        result
    })
}
