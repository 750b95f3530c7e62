//! Report exporter.
//!
//! Turns a captured result region into a paginated document: the region is
//! scaled to a fixed page width (aspect ratio preserved), sliced into pages,
//! and written as PNG files under a timestamp-stamped name. A failure at any
//! point leaves no partial file behind.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::errors::{ClientError, ClientResult};

/// Fixed page width in pixels (A4 at 96 dpi).
pub const PAGE_WIDTH: u32 = 794;
/// Page height in pixels (A4 at 96 dpi).
pub const PAGE_HEIGHT: u32 = 1123;

/// A rendered result region handed over by the rendering collaborator.
#[derive(Debug, Clone)]
pub struct CapturedRegion {
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA8 pixel data, row-major.
    pub pixels: Vec<u8>,
}

impl CapturedRegion {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Load a capture from an image file on disk.
    pub fn from_image_file(path: &Path) -> ClientResult<Self> {
        let img = image::open(path)
            .map_err(|e| ClientError::Export(format!("Failed to read capture: {}", e)))?
            .to_rgba8();
        Ok(Self {
            width: img.width(),
            height: img.height(),
            pixels: img.into_raw(),
        })
    }

    fn into_image(self) -> ClientResult<RgbaImage> {
        if self.width == 0 || self.height == 0 {
            return Err(ClientError::Export("Captured region is empty".to_string()));
        }
        let expected = self.width as usize * self.height as usize * 4;
        if self.pixels.len() != expected {
            return Err(ClientError::Export(format!(
                "Capture buffer length {} does not match {}x{} RGBA",
                self.pixels.len(),
                self.width,
                self.height
            )));
        }
        RgbaImage::from_raw(self.width, self.height, self.pixels)
            .ok_or_else(|| ClientError::Export("Capture buffer rejected".to_string()))
    }
}

/// A finished export: one PNG per page, all sharing one timestamped stem.
#[derive(Debug, Clone)]
pub struct ExportedReport {
    pub pages: Vec<PathBuf>,
    pub page_width: u32,
    /// Total height of the scaled region across all pages.
    pub scaled_height: u32,
}

/// Writes paginated report documents into a target directory.
#[derive(Debug, Clone)]
pub struct ReportExporter {
    out_dir: PathBuf,
}

impl ReportExporter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// Export the captured region as a paginated document.
    ///
    /// The file stem embeds a millisecond timestamp, so repeated exports in
    /// one session never collide. On failure every page already written is
    /// removed before the error surfaces.
    pub fn export(&self, region: CapturedRegion) -> ClientResult<ExportedReport> {
        let image = region.into_image()?;

        // Scale to the fixed page width, preserving aspect ratio
        let scaled_height = ((image.height() as f64 * PAGE_WIDTH as f64 / image.width() as f64)
            .round() as u32)
            .max(1);
        let scaled = imageops::resize(&image, PAGE_WIDTH, scaled_height, FilterType::Triangle);

        fs::create_dir_all(&self.out_dir)
            .map_err(|e| ClientError::Export(format!("Failed to create export dir: {}", e)))?;

        // Sequence number breaks ties between exports within one millisecond
        static EXPORT_SEQ: AtomicU64 = AtomicU64::new(1);
        let stem = format!(
            "report-{}-{}",
            chrono::Local::now().format("%Y%m%d-%H%M%S%.3f"),
            EXPORT_SEQ.fetch_add(1, Ordering::Relaxed)
        );
        let page_count = scaled_height.div_ceil(PAGE_HEIGHT);

        let mut pages = Vec::new();
        let result = self.write_pages(&scaled, scaled_height, page_count, &stem, &mut pages);
        if let Err(e) = result {
            // No partial document may remain
            for page in &pages {
                if let Err(remove_err) = fs::remove_file(page) {
                    tracing::warn!("Failed to remove partial page {:?}: {}", page, remove_err);
                }
            }
            return Err(e);
        }

        tracing::info!(pages = pages.len(), stem = %stem, "Report exported");
        Ok(ExportedReport {
            pages,
            page_width: PAGE_WIDTH,
            scaled_height,
        })
    }

    fn write_pages(
        &self,
        scaled: &RgbaImage,
        scaled_height: u32,
        page_count: u32,
        stem: &str,
        pages: &mut Vec<PathBuf>,
    ) -> ClientResult<()> {
        for page_index in 0..page_count {
            let top = page_index * PAGE_HEIGHT;
            let slice_height = PAGE_HEIGHT.min(scaled_height - top);
            let page = imageops::crop_imm(scaled, 0, top, PAGE_WIDTH, slice_height).to_image();

            let file_name = if page_count == 1 {
                format!("{}.png", stem)
            } else {
                format!("{}-page{}.png", stem, page_index + 1)
            };
            let path = self.out_dir.join(file_name);
            page.save(&path)
                .map_err(|e| ClientError::Export(format!("Failed to write page: {}", e)))?;
            pages.push(path);
        }
        Ok(())
    }
}
