// Copyright 2025. Pattern output library for the dither-gamma CLI.
//
// Provides image file writers and the config/request plumbing used by main.rs.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use dither_gamma::PixelBuffer;
use thiserror::Error;

pub mod config;
pub mod request;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),
    #[error("Gray output needs a .png path, got {0}")]
    GrayFormat(String),
}

/// Output file format, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Bmp,
    Png,
    Raw,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Result<Self, OutputError> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("bmp") => Ok(OutputFormat::Bmp),
            Some("png") => Ok(OutputFormat::Png),
            Some("raw") | Some("rgba") => Ok(OutputFormat::Raw),
            _ => Err(OutputError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

// ============================================================================
// BMP I/O (32-bit BGRA, top-down)
// ============================================================================

const BMP_HEADER_SIZE: u32 = 14 + 40;

/// Row, image and file sizes of a 32-bit BMP. BMP headers hold these as
/// u32 (and the height as i32), so oversized images are rejected.
fn bmp_sizes(w: u32, h: u32) -> io::Result<(u32, u32, u32)> {
    let too_large = || {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{}x{} is too large for a BMP file", w, h),
        )
    };
    if h > i32::MAX as u32 {
        return Err(too_large());
    }
    let row_size = w.checked_mul(4).ok_or_else(too_large)?;
    let image_size = row_size.checked_mul(h).ok_or_else(too_large)?;
    let file_size = image_size
        .checked_add(BMP_HEADER_SIZE)
        .ok_or_else(too_large)?;
    Ok((row_size, image_size, file_size))
}

/// Write a pixel buffer as a 32-bit BMP (top-down, BGRA).
pub fn write_bmp<W: Write>(mut f: W, buf: &PixelBuffer) -> io::Result<()> {
    let w = buf.width();
    let h = buf.height();
    let (row_size, image_size, file_size) = bmp_sizes(w, h)?;

    // BMP file header (14 bytes)
    f.write_all(b"BM")?;
    f.write_all(&file_size.to_le_bytes())?;
    f.write_all(&[0u8; 4])?; // reserved
    f.write_all(&BMP_HEADER_SIZE.to_le_bytes())?; // pixel data offset

    // BITMAPINFOHEADER (40 bytes)
    f.write_all(&40u32.to_le_bytes())?; // header size
    f.write_all(&w.to_le_bytes())?; // width
    f.write_all(&(-(h as i32)).to_le_bytes())?; // negative height = top-down
    f.write_all(&1u16.to_le_bytes())?; // planes
    f.write_all(&32u16.to_le_bytes())?; // bits per pixel
    f.write_all(&0u32.to_le_bytes())?; // compression (BI_RGB)
    f.write_all(&image_size.to_le_bytes())?; // image size
    f.write_all(&[0u8; 4])?; // x pixels per meter
    f.write_all(&[0u8; 4])?; // y pixels per meter
    f.write_all(&0u32.to_le_bytes())?; // colors used
    f.write_all(&0u32.to_le_bytes())?; // important colors

    // Pixel data: convert RGBA to BGRA
    let mut out = vec![0u8; row_size as usize];
    for row in buf.rows() {
        for (dst, src) in out.chunks_exact_mut(4).zip(row.chunks_exact(4)) {
            dst[0] = src[2]; // B
            dst[1] = src[1]; // G
            dst[2] = src[0]; // R
            dst[3] = src[3]; // A
        }
        f.write_all(&out)?;
    }
    f.flush()
}

pub fn save_bmp(path: &Path, buf: &PixelBuffer) -> io::Result<()> {
    write_bmp(BufWriter::new(File::create(path)?), buf)
}

// ============================================================================
// Raw RGBA I/O
// ============================================================================

/// Write raw RGBA with a simple header: [width:u32][height:u32][rgba_data].
pub fn write_raw<W: Write>(mut f: W, buf: &PixelBuffer) -> io::Result<()> {
    f.write_all(&buf.width().to_le_bytes())?;
    f.write_all(&buf.height().to_le_bytes())?;
    f.write_all(buf.as_bytes())?;
    f.flush()
}

pub fn save_raw(path: &Path, buf: &PixelBuffer) -> io::Result<()> {
    write_raw(BufWriter::new(File::create(path)?), buf)
}

// ============================================================================
// PNG
// ============================================================================

pub fn save_png(path: &Path, buf: &PixelBuffer) -> Result<(), OutputError> {
    image::save_buffer(
        path,
        buf.as_bytes(),
        buf.width(),
        buf.height(),
        image::ExtendedColorType::Rgba8,
    )?;
    Ok(())
}

/// Save an 8-bit single-channel luma buffer (`width * height` bytes) as PNG.
pub fn save_gray_png(path: &Path, width: u32, height: u32, luma: &[u8]) -> Result<(), OutputError> {
    if OutputFormat::from_path(path)? != OutputFormat::Png {
        return Err(OutputError::GrayFormat(path.display().to_string()));
    }
    image::save_buffer(path, luma, width, height, image::ExtendedColorType::L8)?;
    Ok(())
}

/// Save an image file, detecting format by extension.
pub fn save_image(path: &Path, buf: &PixelBuffer) -> Result<(), OutputError> {
    match OutputFormat::from_path(path)? {
        OutputFormat::Bmp => save_bmp(path, buf)?,
        OutputFormat::Raw => save_raw(path, buf)?,
        OutputFormat::Png => save_png(path, buf)?,
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
