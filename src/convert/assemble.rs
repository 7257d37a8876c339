//! Output PDF assembly: JPEG-encode page rasters and build one multi-page
//! document around them.
//!
//! Each page becomes a DCTDecode image XObject drawn over the full page
//! box, so the output keeps the source page geometry while the pixel data
//! is stored as plain JPEG. The JPEG streams are already compressed;
//! nothing here recompresses them.

use image::codecs::jpeg::JpegEncoder;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

use super::error::ConvertFailure;
use super::render::PageRaster;

/// Serializes `rasters` into the bytes of a multi-page PDF.
///
/// Page order and count follow the input. Every page is JPEG-encoded at
/// `jpeg_quality` (1-100) before being embedded.
pub(super) fn assemble_pdf(
    rasters: &[PageRaster],
    jpeg_quality: u8,
) -> Result<Vec<u8>, ConvertFailure> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let mut page_ids: Vec<Object> = Vec::with_capacity(rasters.len());

    for (index, raster) in rasters.iter().enumerate() {
        let jpeg = encode_jpeg(raster, jpeg_quality).map_err(|source| ConvertFailure::Encode {
            page: index + 1,
            source,
        })?;

        let image_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => i64::from(raster.image.width()),
                "Height" => i64::from(raster.image.height()),
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "Filter" => "DCTDecode",
            },
            jpeg,
        ));

        // Scale the unit image square to the full page box.
        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        raster.width_pt.into(),
                        0.into(),
                        0.into(),
                        raster.height_pt.into(),
                        0.into(),
                        0.into(),
                    ],
                ),
                Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
                Operation::new("Q", vec![]),
            ],
        };
        let encoded = content.encode().map_err(|e| ConvertFailure::Assemble {
            detail: e.to_string(),
        })?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                raster.width_pt.into(),
                raster.height_pt.into(),
            ],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "XObject" => dictionary! { "Im0" => image_id },
            },
        });
        page_ids.push(page_id.into());
    }

    let page_count = page_ids.len();
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids,
            "Count" => i64::try_from(page_count).unwrap_or(i64::MAX),
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| ConvertFailure::Assemble {
            detail: e.to_string(),
        })?;
    Ok(bytes)
}

/// Encodes one page raster as a lossy JPEG.
fn encode_jpeg(raster: &PageRaster, quality: u8) -> Result<Vec<u8>, image::ImageError> {
    let mut jpeg = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut jpeg, quality);
    raster.image.write_with_encoder(encoder)?;
    Ok(jpeg)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn raster(width: u32, height: u32) -> PageRaster {
        PageRaster {
            image: RgbImage::from_pixel(width, height, image::Rgb([200, 200, 200])),
            width_pt: width as f32 * 72.0 / 150.0,
            height_pt: height as f32 * 72.0 / 150.0,
        }
    }

    #[test]
    fn test_assembled_pdf_has_one_page_per_raster() {
        let rasters = vec![raster(100, 140), raster(100, 140), raster(80, 80)];
        let bytes = assemble_pdf(&rasters, 70).unwrap();
        assert!(bytes.starts_with(b"%PDF"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 3);
    }

    #[test]
    fn test_empty_input_assembles_zero_page_document() {
        let bytes = assemble_pdf(&[], 70).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 0);
    }

    #[test]
    fn test_jpeg_quality_drives_output_size() {
        let rasters = vec![PageRaster {
            image: RgbImage::from_fn(200, 200, |x, y| {
                image::Rgb([(x % 251) as u8, (y % 241) as u8, ((x + y) % 233) as u8])
            }),
            width_pt: 96.0,
            height_pt: 96.0,
        }];
        let low = assemble_pdf(&rasters, 20).unwrap();
        let high = assemble_pdf(&rasters, 95).unwrap();
        assert!(low.len() < high.len());
    }
}
