use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum LabelError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsingError(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// [image] failed to decode or encode a QR bitmap
    Image(#[from] image::ImageError),

    #[error("cell dimensions must be positive, got {width}x{height}")]
    /// Zero, negative or non-finite cell width / height
    InvalidCell { width: f32, height: f32 },

    #[error("grid must have at least one row and one column, got {rows}x{cols}")]
    InvalidGrid { rows: usize, cols: usize },

    #[error("page dimensions must be positive, got {width}x{height}")]
    InvalidPageDimensions { width: f32, height: f32 },

    #[error("unknown page size {0:?}")]
    UnknownPageSize(String),

    #[error("unknown unit {0:?}, expected one of pt, mm, cm, in")]
    UnknownUnit(String),

    #[error("unknown label position {0:?}, expected one of T, B, L, R")]
    UnknownPlacement(String),

    #[error("unknown recovery level {0:?}, expected 0-3 or low, medium, high, highest")]
    UnknownRecoveryLevel(String),

    #[error("minimum QR size must be between 0 and 100 percent, got {0}")]
    InvalidQrPercentage(f32),

    #[error("font size must be at least 1pt, got {0}")]
    InvalidFontSize(f32),

    #[error("label {index} has no QR content")]
    /// The content string of a label is empty and cannot be encoded
    EmptyContent { index: usize },

    #[error("cannot encode {content:?} as a QR code: {source}")]
    /// The QR encoder rejected the content, usually because it is too long for the
    /// requested recovery level
    QrEncoding {
        content: String,
        #[source]
        source: qrcode::types::QrError,
    },

    #[error("the QR encoder stopped before all labels were encoded")]
    EncoderStopped,

    #[error("a page went missing from the document")]
    PageMissing,
}
