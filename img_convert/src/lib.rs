//! Batch JPEG ⇄ PNG conversion with an optional per-file size ceiling.
//!
//! ```no_run
//! use img_convert::{convert_batch, ConversionRequest};
//!
//! let request = ConversionRequest::from_user_input("photos", "out", "2", Some(200), None)?;
//! let report = convert_batch(request)?;
//! println!("{} file(s)", report.files.len());
//! # Ok::<(), img_convert::ConvertError>(())
//! ```

pub mod codec;
pub mod compressor;
pub mod converter;
pub mod naming;
pub mod request;

pub use codec::{decode_image, encode_to_vec, save_image, OutputFormat};
pub use compressor::{compress_to_target, CompressionOutcome, QualityAttempt, QualitySearch};
pub use converter::{convert_batch, BatchReport, FileOutcome, FileReport};
pub use naming::ConvertibleFile;
pub use request::{
    ConversionRequest, DecodePolicy, Direction, EncodeMode, QualityLevel, WriteStrategy,
    DEFAULT_JPEG_QUALITY,
};

pub use shared_utils::{ConvertError, Result};
