//! Export actions: TikZ markup on every target, PNG on native targets only.
//!
//! Native builds save through `rfd` dialogs spawned on the tokio runtime;
//! wasm builds hand the file to the browser as a download.

use super::state::GraphEditorApp;
use crate::error::ExportError;
use crate::surface::EguiTextMeasure;
use eframe::egui;

impl GraphEditorApp {
    /// Renders the scene as TikZ and opens the output window.
    pub fn export_tikz(&mut self, ctx: &egui::Context) {
        let measure = EguiTextMeasure::new(ctx, self.editor.settings.font_size);
        self.tikz_output = Some(self.editor.export_markup(&measure));
        self.status = None;
    }

    /// Saves the last TikZ export to a file chosen by the user.
    pub fn save_tikz(&mut self) {
        let Some(markup) = self.tikz_output.clone() else {
            return;
        };

        #[cfg(target_arch = "wasm32")]
        {
            if let Err(e) = Self::trigger_download("graph.tex", &markup, "application/x-tex") {
                log::error!("{e}");
                self.status = Some(e.to_string());
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            tokio::spawn(async move {
                if let Some(handle) = rfd::AsyncFileDialog::new()
                    .add_filter("TeX", &["tex"])
                    .set_file_name("graph.tex")
                    .save_file()
                    .await
                {
                    let path = handle.path().to_path_buf();
                    match std::fs::write(&path, markup.as_bytes()).map_err(ExportError::from) {
                        Ok(()) => log::info!("saved TikZ to {}", path.display()),
                        Err(e) => log::error!("{e}"),
                    }
                }
            });
        }
    }

    /// Renders the canvas area to PNG and offers to save it (native builds only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn export_png(&mut self) {
        let size = self.canvas_rect.size();
        let width = size.x.max(0.0).round() as u32;
        let height = size.y.max(0.0).round() as u32;
        let fonts = self.fonts();

        let png = match self.editor.export_image(width, height, fonts) {
            Ok(png) => png,
            Err(e) => {
                log::error!("{e}");
                self.status = Some(e.to_string());
                return;
            }
        };
        self.status = None;

        tokio::spawn(async move {
            if let Some(handle) = rfd::AsyncFileDialog::new()
                .add_filter("PNG", &["png"])
                .set_file_name("graph.png")
                .save_file()
                .await
            {
                let path = handle.path().to_path_buf();
                match std::fs::write(&path, &png).map_err(ExportError::from) {
                    Ok(()) => log::info!("saved PNG to {}", path.display()),
                    Err(e) => log::error!("{e}"),
                }
            }
        });
    }

    /// Hands `content` to the browser as a file download.
    #[cfg(target_arch = "wasm32")]
    fn trigger_download(filename: &str, content: &str, mime: &str) -> Result<(), ExportError> {
        use eframe::wasm_bindgen::{JsCast, JsValue};

        let fail = |what: &str| ExportError::Download(what.to_string());
        let window = web_sys::window().ok_or_else(|| fail("no window"))?;
        let document = window.document().ok_or_else(|| fail("no document"))?;

        let parts = js_sys::Array::new();
        parts.push(&JsValue::from_str(content));
        let options = web_sys::BlobPropertyBag::new();
        options.set_type(mime);
        let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)
            .map_err(|_| fail("could not create blob"))?;
        let url = web_sys::Url::create_object_url_with_blob(&blob)
            .map_err(|_| fail("could not create object URL"))?;

        let anchor = document
            .create_element("a")
            .map_err(|_| fail("could not create anchor"))?
            .dyn_into::<web_sys::HtmlAnchorElement>()
            .map_err(|_| fail("element is not an anchor"))?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.style().set_property("display", "none").ok();

        let body = document.body().ok_or_else(|| fail("no body"))?;
        body.append_child(&anchor)
            .map_err(|_| fail("could not attach anchor"))?;
        anchor.click();
        body.remove_child(&anchor).ok();
        web_sys::Url::revoke_object_url(&url).ok();
        Ok(())
    }
}
