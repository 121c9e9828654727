//! Single-page PDF composition of a decoded image.

use std::io::{self, Write};

use flate2::{Compression, write::ZlibEncoder};
use image::DynamicImage;
use log::trace;
use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect, Ref, TextStr};

use umlgen_core::geometry::{Placement, Size};

use crate::strategy::StrategyError;

const IMAGE_NAME: Name<'static> = Name(b"Im1");

/// Scales `image` onto a page of `page` points and returns the PDF bytes.
///
/// The image is converted to 8-bit RGB (alpha is dropped), uniformly scaled
/// so its limiting dimension fills `1.0 - margin` of the page, and centered.
///
/// # Errors
///
/// Returns [`StrategyError::Compose`] for an empty image, an unusable
/// margin, or dimensions a PDF cannot describe.
pub fn compose_page(
    image: &DynamicImage,
    page: Size,
    margin: f32,
    title: &str,
) -> Result<Vec<u8>, StrategyError> {
    let rgb = image.to_rgb8();
    let (pixel_width, pixel_height) = rgb.dimensions();

    let placement = Placement::fit_centered(
        Size::new(pixel_width as f32, pixel_height as f32),
        page,
        margin,
    )
    .ok_or_else(|| {
        StrategyError::Compose(format!(
            "cannot place a {pixel_width}x{pixel_height} image on a {}x{} page",
            page.width(),
            page.height()
        ))
    })?;
    let width = i32::try_from(pixel_width)
        .map_err(|_| StrategyError::Compose(format!("image width {pixel_width} is too large")))?;
    let height = i32::try_from(pixel_height)
        .map_err(|_| StrategyError::Compose(format!("image height {pixel_height} is too large")))?;

    let pixels = zlib(rgb.as_raw()).map_err(|err| StrategyError::Compose(err.to_string()))?;
    trace!(width, height, compressed = pixels.len(), scale = placement.scale(); "Composing page");

    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let page_id = Ref::new(3);
    let image_id = Ref::new(4);
    let content_id = Ref::new(5);
    let info_id = Ref::new(6);

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id).kids([page_id]).count(1);

    let mut pdf_page = pdf.page(page_id);
    pdf_page.media_box(Rect::new(0.0, 0.0, page.width(), page.height()));
    pdf_page.parent(page_tree_id);
    pdf_page.contents(content_id);
    pdf_page.resources().x_objects().pair(IMAGE_NAME, image_id);
    pdf_page.finish();

    let mut xobject = pdf.image_xobject(image_id, &pixels);
    xobject.filter(Filter::FlateDecode);
    xobject.width(width);
    xobject.height(height);
    xobject.color_space().device_rgb();
    xobject.bits_per_component(8);
    xobject.finish();

    let origin = placement.origin();
    let size = placement.size();
    let mut content = Content::new();
    content.save_state();
    content.transform([size.width(), 0.0, 0.0, size.height(), origin.x(), origin.y()]);
    content.x_object(IMAGE_NAME);
    content.restore_state();
    pdf.stream(content_id, &content.finish());

    pdf.document_info(info_id)
        .title(TextStr(title))
        .producer(TextStr("umlgen"));

    Ok(pdf.finish())
}

fn zlib(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}
