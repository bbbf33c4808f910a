//! First-page rendering via `pdftoppm` (poppler-utils), recoloured and
//! re-encoded with `image`.

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::process::Command;

use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, DynamicImage, ImageFormat, RgbImage};

use convert_core::error::{ConvertError, Result};
use convert_core::format::ImageKind;
use convert_core::options::ConversionOptions;

use crate::document;
use crate::output;

/// Check that the configured pdftoppm is available on the system.
///
/// A path with a directory component must name an existing file; a bare
/// name is looked up on `PATH` with `which`.
pub fn check_pdftoppm(pdftoppm: &Path) -> Result<()> {
    let has_dir = pdftoppm
        .parent()
        .is_some_and(|p| !p.as_os_str().is_empty());

    let found = if has_dir {
        pdftoppm.is_file()
    } else {
        Command::new("which")
            .arg(pdftoppm)
            .output()
            .map_err(|e| {
                ConvertError::Library(format!("Failed to check for pdftoppm: {}", e))
            })?
            .status
            .success()
    };

    if !found {
        return Err(ConvertError::Library(format!(
            "{} (poppler-utils) is required for image output. \
             Install with: brew install poppler (macOS) or apt install poppler-utils (Linux)",
            pdftoppm.display()
        )));
    }
    Ok(())
}

/// Render the first page of `input` and write it to `output` as `kind`.
///
/// Returns the page count of the input document.
pub fn render_page_to_image(
    input: &Path,
    output: &Path,
    kind: ImageKind,
    options: &ConversionOptions,
) -> Result<usize> {
    let doc = document::load(input)?;
    let num_pages = document::page_numbers(&doc).len();
    if num_pages == 0 {
        return Err(ConvertError::DocumentOpen {
            path: input.to_path_buf(),
            reason: "document has no pages".to_string(),
        });
    }
    drop(doc);

    check_pdftoppm(&options.pdftoppm)?;

    let page = render_first_page(input, options)?;
    log::debug!(
        "Rendered page 1: {}x{} {:?}",
        page.width(),
        page.height(),
        page.color()
    );

    let rgb = normalize_color(page);
    let data = encode(rgb, kind, options.jpeg_quality)?;
    output::write_atomically(output, &data)?;

    log::info!("Wrote {} ({} bytes)", output.display(), data.len());
    Ok(num_pages)
}

/// Rasterise page 1 into a scratch directory and decode it.
fn render_first_page(pdf_path: &Path, options: &ConversionOptions) -> Result<DynamicImage> {
    let tmp_dir = tempfile::TempDir::new()
        .map_err(|e| ConvertError::Library(format!("Failed to create temp dir: {}", e)))?;
    let prefix = tmp_dir.path().join("page");

    let mut cmd = Command::new(&options.pdftoppm);
    cmd.arg("-png")
        .arg("-f")
        .arg("1")
        .arg("-l")
        .arg("1")
        .arg("-singlefile");
    if let Some(dpi) = options.pdf_dpi {
        cmd.arg("-r").arg(dpi.to_string());
    }
    cmd.arg(pdf_path.as_os_str()).arg(prefix.as_os_str());

    log::info!("Rendering page 1 of {} with pdftoppm", pdf_path.display());

    let output = cmd
        .output()
        .map_err(|e| ConvertError::Library(format!("Failed to run pdftoppm: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ConvertError::Library(format!(
            "pdftoppm failed: {}",
            stderr.trim()
        )));
    }

    let rendered = rendered_path(&prefix);
    image::open(&rendered).map_err(|e| {
        ConvertError::Library(format!(
            "Failed to decode rendered page {}: {}",
            rendered.display(),
            e
        ))
    })
}

/// `-singlefile` writes `<prefix>.png` with no page-number suffix.
fn rendered_path(prefix: &Path) -> PathBuf {
    prefix.with_extension("png")
}

/// Force a decoded page into 8-bit RGB.
///
/// Grayscale pages are promoted to true colour; anything else (alpha,
/// 16-bit, float) is converted as well. Colour profiles attached to the
/// source are not carried over.
pub fn normalize_color(page: DynamicImage) -> RgbImage {
    match page.color() {
        ColorType::Rgb8 => {}
        ColorType::L8 | ColorType::La8 | ColorType::L16 | ColorType::La16 => {
            log::debug!("Promoting grayscale page to RGB");
        }
        other => log::debug!("Converting {:?} page to RGB", other),
    }
    page.into_rgb8()
}

fn image_format(kind: ImageKind) -> ImageFormat {
    match kind {
        ImageKind::Jpeg => ImageFormat::Jpeg,
        ImageKind::Png => ImageFormat::Png,
        ImageKind::Bmp => ImageFormat::Bmp,
        ImageKind::Tiff => ImageFormat::Tiff,
        ImageKind::Gif => ImageFormat::Gif,
    }
}

/// Encode an RGB page in the requested container.
pub(crate) fn encode(rgb: RgbImage, kind: ImageKind, jpeg_quality: u8) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    let page = DynamicImage::ImageRgb8(rgb);

    let encoded = match kind {
        ImageKind::Jpeg => {
            let encoder = JpegEncoder::new_with_quality(&mut buf, jpeg_quality.clamp(1, 100));
            page.write_with_encoder(encoder)
        }
        // GIF frames are RGBA; every pixel stays opaque.
        ImageKind::Gif => {
            DynamicImage::ImageRgba8(page.to_rgba8()).write_to(&mut buf, ImageFormat::Gif)
        }
        other => page.write_to(&mut buf, image_format(other)),
    };
    encoded.map_err(|e| {
        ConvertError::Library(format!("Failed to encode {}: {}", kind.extension(), e))
    })?;

    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, GrayImage, Luma, Rgb, Rgba, RgbaImage};

    fn gray_page() -> DynamicImage {
        DynamicImage::ImageLuma8(GrayImage::from_fn(16, 12, |x, _| Luma([(x * 10) as u8])))
    }

    #[test]
    fn test_normalize_grayscale_to_rgb() {
        let rgb = normalize_color(gray_page());
        assert_eq!(rgb.dimensions(), (16, 12));
        assert_eq!(rgb.get_pixel(3, 0), &Rgb([30, 30, 30]));
    }

    #[test]
    fn test_normalize_drops_alpha() {
        let rgba = RgbaImage::from_pixel(4, 4, Rgba([10, 20, 30, 128]));
        let rgb = normalize_color(DynamicImage::ImageRgba8(rgba));
        assert_eq!(rgb.get_pixel(0, 0), &Rgb([10, 20, 30]));
    }

    #[test]
    fn test_encode_matches_requested_kind() {
        for (kind, expected) in [
            (ImageKind::Jpeg, ImageFormat::Jpeg),
            (ImageKind::Png, ImageFormat::Png),
            (ImageKind::Bmp, ImageFormat::Bmp),
            (ImageKind::Tiff, ImageFormat::Tiff),
            (ImageKind::Gif, ImageFormat::Gif),
        ] {
            let data = encode(normalize_color(gray_page()), kind, 92).unwrap();
            assert_eq!(image::guess_format(&data).unwrap(), expected, "{:?}", kind);
        }
    }

    #[test]
    fn test_grayscale_page_encodes_as_rgb() {
        for kind in [ImageKind::Png, ImageKind::Jpeg, ImageKind::Bmp, ImageKind::Tiff] {
            let data = encode(normalize_color(gray_page()), kind, 92).unwrap();
            let decoded = image::load_from_memory(&data).unwrap();
            assert_eq!(decoded.color(), ColorType::Rgb8, "{:?}", kind);
        }
    }

    #[test]
    fn test_rendered_path() {
        assert_eq!(
            rendered_path(Path::new("/tmp/x/page")),
            PathBuf::from("/tmp/x/page.png")
        );
    }

    #[test]
    fn test_missing_pdftoppm() {
        let err = check_pdftoppm(Path::new("pdftoppm-does-not-exist-7f3a")).unwrap_err();
        assert!(matches!(err, ConvertError::Library(_)));
    }

    #[test]
    fn test_pdftoppm_path_checked_as_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let tool = dir.path().join("pdftoppm");
        assert!(check_pdftoppm(&tool).is_err());

        std::fs::write(&tool, b"").unwrap();
        check_pdftoppm(&tool).unwrap();

        // A directory is not an executable.
        assert!(check_pdftoppm(dir.path()).is_err());
    }

    /// Write an executable shell script standing in for pdftoppm.
    #[cfg(unix)]
    fn fake_pdftoppm(dir: &Path, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("fake-pdftoppm");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    /// A fake pdftoppm that records its arguments and copies a grayscale
    /// PNG to `<last arg>.png`, as `-singlefile` does.
    #[cfg(unix)]
    fn grayscale_renderer(dir: &Path) -> (PathBuf, PathBuf) {
        let gray = dir.join("gray.png");
        gray_page().save(&gray).unwrap();
        let args = dir.join("args.txt");
        let body = format!(
            "for last; do :; done\necho \"$@\" > '{}'\ncp '{}' \"$last.png\"",
            args.display(),
            gray.display()
        );
        (fake_pdftoppm(dir, &body), args)
    }

    #[cfg(unix)]
    fn sample_input(dir: &Path) -> PathBuf {
        let input = dir.join("in.pdf");
        crate::fixtures::write_text_pdf(&input, &["cover", "body"]).unwrap();
        input
    }

    #[cfg(unix)]
    #[test]
    fn test_render_writes_every_kind_as_rgb() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = sample_input(dir.path());
        let (tool, _) = grayscale_renderer(dir.path());
        let options = ConversionOptions {
            pdftoppm: tool,
            ..ConversionOptions::default()
        };

        for (kind, expected) in [
            (ImageKind::Jpeg, ImageFormat::Jpeg),
            (ImageKind::Png, ImageFormat::Png),
            (ImageKind::Bmp, ImageFormat::Bmp),
            (ImageKind::Tiff, ImageFormat::Tiff),
            (ImageKind::Gif, ImageFormat::Gif),
        ] {
            let output = dir.path().join(format!("out.{}", kind.extension()));
            let pages = render_page_to_image(&input, &output, kind, &options).unwrap();
            assert_eq!(pages, 2);

            let data = std::fs::read(&output).unwrap();
            assert_eq!(image::guess_format(&data).unwrap(), expected, "{:?}", kind);
            let decoded = image::load_from_memory(&data).unwrap();
            assert_eq!(decoded.dimensions(), (16, 12));
            if kind != ImageKind::Gif {
                assert_eq!(decoded.color(), ColorType::Rgb8, "{:?}", kind);
            }
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_render_requests_only_first_page() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = sample_input(dir.path());
        let (tool, args) = grayscale_renderer(dir.path());
        let output = dir.path().join("out.png");

        let options = ConversionOptions {
            pdftoppm: tool.clone(),
            ..ConversionOptions::default()
        };
        render_page_to_image(&input, &output, ImageKind::Png, &options).unwrap();
        let recorded = std::fs::read_to_string(&args).unwrap();
        assert!(recorded.starts_with("-png -f 1 -l 1 -singlefile "), "{}", recorded);
        assert!(!recorded.contains("-r "));
        assert!(recorded.contains(input.to_str().unwrap()));

        let options = ConversionOptions {
            pdftoppm: tool,
            pdf_dpi: Some(72),
            ..ConversionOptions::default()
        };
        render_page_to_image(&input, &output, ImageKind::Png, &options).unwrap();
        let recorded = std::fs::read_to_string(&args).unwrap();
        assert!(recorded.contains("-singlefile -r 72 "), "{}", recorded);
    }

    #[cfg(unix)]
    #[test]
    fn test_renderer_failure_leaves_no_output() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = sample_input(dir.path());
        let tool = fake_pdftoppm(dir.path(), "echo 'Syntax Error: broken xref' >&2\nexit 3");
        let output = dir.path().join("out.jpg");
        let options = ConversionOptions {
            pdftoppm: tool,
            ..ConversionOptions::default()
        };

        let err = render_page_to_image(&input, &output, ImageKind::Jpeg, &options).unwrap_err();
        match err {
            ConvertError::Library(msg) => assert!(msg.contains("broken xref"), "{}", msg),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(!output.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_renderer_without_output_file_is_library_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = sample_input(dir.path());
        let tool = fake_pdftoppm(dir.path(), "exit 0");
        let output = dir.path().join("out.png");
        let options = ConversionOptions {
            pdftoppm: tool,
            ..ConversionOptions::default()
        };

        let err = render_page_to_image(&input, &output, ImageKind::Png, &options).unwrap_err();
        assert!(matches!(err, ConvertError::Library(_)));
        assert!(!output.exists());
    }

    #[test]
    fn test_missing_input_creates_no_output() {
        let dir = tempfile::TempDir::new().unwrap();
        let output = dir.path().join("out.png");
        let err = render_page_to_image(
            &dir.path().join("missing.pdf"),
            &output,
            ImageKind::Png,
            &ConversionOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ConvertError::DocumentOpen { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn test_not_a_pdf_creates_no_output() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("fake.pdf");
        std::fs::write(&input, b"this is not a pdf").unwrap();
        let output = dir.path().join("out.jpg");
        let err =
            render_page_to_image(&input, &output, ImageKind::Jpeg, &ConversionOptions::default())
                .unwrap_err();
        assert!(matches!(err, ConvertError::DocumentOpen { .. }));
        assert!(!output.exists());
    }
}
