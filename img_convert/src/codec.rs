//! Decode/encode helpers for the two supported formats.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::error::{ImageError, ParameterError, ParameterErrorKind};
use image::{DynamicImage, ImageReader};
use serde::{Deserialize, Serialize};
use shared_utils::{ConvertError, FileSize, Result};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Png,
    Jpeg,
}

impl OutputFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            OutputFormat::Png => "PNG",
            OutputFormat::Jpeg => "JPEG",
        }
    }

    /// PNG is lossless and ignores the quality parameter.
    pub const fn uses_quality(self) -> bool {
        matches!(self, OutputFormat::Jpeg)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decode an image, letting the file content pick the decoder.
pub fn decode_image(path: &Path) -> Result<DynamicImage> {
    let reader = ImageReader::open(path)
        .map_err(|e| ConvertError::io(path, e))?
        .with_guessed_format()
        .map_err(|e| ConvertError::io(path, e))?;
    reader.decode().map_err(|e| ConvertError::decode(path, e))
}

/// Encode `image` in `format` at `quality` (1..=100, ignored for PNG).
///
/// JPEG has no alpha channel: 8-bit grayscale is kept as luma, everything
/// else is flattened to 8-bit RGB. A JPEG quality outside 1..=100 is an
/// [`ConvertError::Encode`]. `path` only labels errors.
pub fn encode_to_vec(
    image: &DynamicImage,
    format: OutputFormat,
    quality: u8,
    path: &Path,
) -> Result<Vec<u8>> {
    if format.uses_quality() && !(1..=100).contains(&quality) {
        let kind = ParameterErrorKind::Generic(format!(
            "JPEG quality must be between 1 and 100, got {quality}"
        ));
        return Err(ConvertError::encode(
            path,
            ImageError::Parameter(ParameterError::from_kind(kind)),
        ));
    }

    let mut buf = Vec::new();
    let encoded = match format {
        OutputFormat::Jpeg => {
            let encoder = JpegEncoder::new_with_quality(&mut buf, quality);
            match image {
                DynamicImage::ImageLuma8(gray) => gray.write_with_encoder(encoder),
                other => other.to_rgb8().write_with_encoder(encoder),
            }
        }
        OutputFormat::Png => image.write_with_encoder(PngEncoder::new(&mut buf)),
    };
    encoded.map_err(|e| ConvertError::encode(path, e))?;
    Ok(buf)
}

/// Write encoded bytes, replacing any existing file, and return the size
/// measured on disk.
pub fn write_encoded(path: &Path, bytes: &[u8]) -> Result<FileSize> {
    std::fs::write(path, bytes).map_err(|e| ConvertError::io(path, e))?;
    file_size(path)
}

pub fn file_size(path: &Path) -> Result<FileSize> {
    std::fs::metadata(path)
        .map(|m| FileSize::new(m.len()))
        .map_err(|e| ConvertError::io(path, e))
}

/// Encode and write in one step.
pub fn save_image(
    image: &DynamicImage,
    path: &Path,
    format: OutputFormat,
    quality: u8,
) -> Result<FileSize> {
    let bytes = encode_to_vec(image, format, quality, path)?;
    write_encoded(path, &bytes)
}


#[cfg(test)]
mod tests {
    use super::test_images::*;
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_output_format_names() {
        assert_eq!(OutputFormat::Png.extension(), "png");
        assert_eq!(OutputFormat::Jpeg.extension(), "jpg");
        assert!(OutputFormat::Jpeg.uses_quality());
        assert!(!OutputFormat::Png.uses_quality());
    }

    #[test]
    fn test_encode_produces_expected_container() {
        let img = gradient(32, 16);
        let path = Path::new("mem");

        let jpeg = encode_to_vec(&img, OutputFormat::Jpeg, 80, path).unwrap();
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
        assert_eq!(image::guess_format(&jpeg).unwrap(), image::ImageFormat::Jpeg);

        let png = encode_to_vec(&img, OutputFormat::Png, 80, path).unwrap();
        assert_eq!(image::guess_format(&png).unwrap(), image::ImageFormat::Png);
    }

    #[test]
    fn test_jpeg_quality_changes_size_png_ignores_it() {
        let img = noise(64, 64, 7);
        let path = Path::new("mem");

        let high = encode_to_vec(&img, OutputFormat::Jpeg, 95, path).unwrap();
        let low = encode_to_vec(&img, OutputFormat::Jpeg, 10, path).unwrap();
        assert!(low.len() < high.len());

        let a = encode_to_vec(&img, OutputFormat::Png, 95, path).unwrap();
        let b = encode_to_vec(&img, OutputFormat::Png, 10, path).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_jpeg_flattens_alpha() {
        let img = translucent(16, 16);
        let bytes = encode_to_vec(&img, OutputFormat::Jpeg, 75, Path::new("mem")).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), 16);
        assert!(!decoded.color().has_alpha());
    }

    #[test]
    fn test_jpeg_out_of_range_quality_is_encode_error() {
        for quality in [0, 101] {
            let err = encode_to_vec(&gradient(4, 4), OutputFormat::Jpeg, quality, Path::new("mem"))
                .unwrap_err();
            assert!(matches!(err, ConvertError::Encode { .. }), "{err:?}");
            assert!(!err.is_validation());
        }
        // PNG has no quality to reject
        assert!(encode_to_vec(&gradient(4, 4), OutputFormat::Png, 0, Path::new("mem")).is_ok());
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let img = noise(40, 30, 3);
        let path = Path::new("mem");
        for format in [OutputFormat::Jpeg, OutputFormat::Png] {
            let a = encode_to_vec(&img, format, 75, path).unwrap();
            let b = encode_to_vec(&img, format, 75, path).unwrap();
            assert_eq!(a, b, "{format} output should be stable");
        }
    }

    #[test]
    fn test_save_and_decode_round_trip_dimensions() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("g.png");

        let size = save_image(&gradient(20, 10), &path, OutputFormat::Png, 75).unwrap();
        assert_eq!(size.bytes(), std::fs::metadata(&path).unwrap().len());

        let decoded = decode_image(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (20, 10));
    }

    #[test]
    fn test_decode_sniffs_content_over_extension() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("actually_png.jpg");
        save_image(&gradient(8, 8), &path, OutputFormat::Png, 75).unwrap();

        assert!(decode_image(&path).is_ok());
    }

    #[test]
    fn test_decode_errors() {
        let temp = TempDir::new().unwrap();

        let garbage = temp.path().join("broken.jpg");
        std::fs::write(&garbage, b"definitely not an image").unwrap();
        assert!(matches!(
            decode_image(&garbage),
            Err(ConvertError::Decode { .. })
        ));

        let missing = temp.path().join("missing.png");
        assert!(matches!(decode_image(&missing), Err(ConvertError::Io { .. })));
    }

    #[test]
    fn test_write_into_missing_directory_is_io_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("no/such/dir/x.png");
        let err = save_image(&gradient(4, 4), &path, OutputFormat::Png, 75).unwrap_err();
        assert!(matches!(err, ConvertError::Io { .. }));
    }
}
