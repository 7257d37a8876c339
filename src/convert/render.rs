//! PDF rasterization via pdfium.
//!
//! pdfium is a C++ library with thread-local state; all calls here are
//! synchronous and run inside `tokio::task::spawn_blocking` (see the
//! manager). Each page is rendered at the requested DPI and handed to the
//! caller as an RGB raster together with the page's physical size, so the
//! assembled output can keep the source page geometry.

use std::path::Path;

use image::RgbImage;
use pdfium_render::prelude::*;
use tracing::debug;

use super::error::ConvertFailure;

/// PDF user-space units per inch.
const POINTS_PER_INCH: f32 = 72.0;

/// One rasterized page with its physical page size in points.
pub(super) struct PageRaster {
    /// Pixel data, RGB8.
    pub image: RgbImage,
    /// Source page width in points.
    pub width_pt: f32,
    /// Source page height in points.
    pub height_pt: f32,
}

/// Rasterizes every page of `pdf_path` at `dpi`.
///
/// Blocking; must run on a blocking thread. The returned rasters are the
/// only copy of the page pixels; dropping the vector releases them.
pub(super) fn rasterize_all_pages(
    pdf_path: &Path,
    dpi: u32,
) -> Result<Vec<PageRaster>, ConvertFailure> {
    let pdfium = Pdfium::default();

    let document = pdfium
        .load_pdf_from_file(pdf_path, None)
        .map_err(|e| ConvertFailure::Open {
            detail: format!("{e:?}"),
        })?;

    let pages = document.pages();
    let mut rasters = Vec::with_capacity(usize::from(pages.len()));

    for (index, page) in pages.iter().enumerate() {
        let width_pt = page.width().value;
        let height_pt = page.height().value;

        // Pixel size follows the page's physical width; pdfium keeps the
        // aspect ratio when only the target width is set.
        #[allow(clippy::cast_possible_truncation)]
        let target_width = (width_pt * dpi as f32 / POINTS_PER_INCH).round() as i32;
        let config = PdfRenderConfig::new().set_target_width(target_width.max(1));

        let bitmap = page
            .render_with_config(&config)
            .map_err(|e| ConvertFailure::Render {
                page: index + 1,
                detail: format!("{e:?}"),
            })?;

        let image = bitmap.as_image().to_rgb8();
        debug!(
            page = index + 1,
            width = image.width(),
            height = image.height(),
            "rendered page"
        );

        rasters.push(PageRaster {
            image,
            width_pt,
            height_pt,
        });
    }

    Ok(rasters)
}
