use std::io::Cursor;

use image::{ImageFormat, RgbaImage};

use crate::error::ExportResult;

/// Encodings the canvas can be saved as
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Png,
}

impl ExportFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            ExportFormat::Png => ImageFormat::Png,
        }
    }
}

/// Encodes a snapshot of the canvas into `format`
pub fn encode(snapshot: &RgbaImage, format: ExportFormat) -> ExportResult<Vec<u8>> {
    let mut bytes = Vec::new();
    snapshot.write_to(&mut Cursor::new(&mut bytes), format.image_format())?;
    log::debug!(
        "Encoded {}x{} canvas as {} ({} bytes)",
        snapshot.width(),
        snapshot.height(),
        format.extension(),
        bytes.len()
    );
    Ok(bytes)
}

/// Hands the encoded image to the user: a file in the working directory on
/// native, a browser download on the web.
#[cfg(not(target_arch = "wasm32"))]
pub fn deliver(bytes: &[u8], file_name: &str, format: ExportFormat) -> ExportResult<()> {
    std::fs::write(file_name, bytes)?;
    log::info!("Saved {} drawing to {}", format.extension(), file_name);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
pub fn deliver(bytes: &[u8], file_name: &str, format: ExportFormat) -> ExportResult<()> {
    trigger_download(bytes, file_name, format)?;
    log::info!("Triggered download of {}", file_name);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn trigger_download(bytes: &[u8], file_name: &str, format: ExportFormat) -> ExportResult<()> {
    use crate::error::ExportError;
    use eframe::wasm_bindgen::{JsCast as _, JsValue};
    use web_sys::js_sys;

    let web_err = |err: JsValue| ExportError::Web(format!("{err:?}"));

    let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(format.mime_type());
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(web_err)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(web_err)?;

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| ExportError::Web("no document available".to_owned()))?;
    let anchor = document
        .create_element("a")
        .map_err(web_err)?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|element| web_err(element.into()))?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    web_sys::Url::revoke_object_url(&url).map_err(web_err)?;
    Ok(())
}
