use egui::{RichText, Sense, vec2};

use crate::config::SketchConfig;
use crate::context::SketchContext;
use crate::error::ExportResult;
use crate::input::{Action, InputHandler, route_action, route_event};
use crate::renderer::Renderer;
use crate::tool::ToolKind;

/// The eframe shell around [`SketchContext`]: toolbar, canvas and the custom sticker prompt
#[derive(Debug)]
pub struct SketchApp {
    sketch: SketchContext,
    renderer: Renderer,
    input: InputHandler,
    // State for the custom sticker modal
    show_modal: bool,
    custom_sticker: String,
    /// Outcome of the last export, shown under the export button
    status: Option<String>,
}

impl SketchApp {
    /// Called once before the first frame.
    pub fn new(_cc: &eframe::CreationContext<'_>, config: SketchConfig) -> Self {
        Self::from_context(SketchContext::new(config))
    }

    pub fn from_context(sketch: SketchContext) -> Self {
        let renderer = Renderer::new(&sketch);
        Self {
            sketch,
            renderer,
            input: InputHandler::new(),
            show_modal: false,
            custom_sticker: String::new(),
            status: None,
        }
    }

    pub fn sketch(&self) -> &SketchContext {
        &self.sketch
    }

    fn tools_panel(&mut self, ui: &mut egui::Ui) -> Vec<Action> {
        let mut actions = Vec::new();
        let tool = self.sketch.tool().clone();
        let glyphs = self.sketch.palette().glyphs().to_vec();

        ui.heading("Sketchpad");
        ui.horizontal(|ui| {
            if ui.button("Clear").clicked() {
                actions.push(Action::Clear);
            }
            if ui.button("Undo").clicked() {
                actions.push(Action::Undo);
            }
            if ui.button("Redo").clicked() {
                actions.push(Action::Redo);
            }
        });

        ui.separator();
        ui.label("Tools:");
        for kind in ToolKind::DRAWING {
            if ui.selectable_label(tool.kind() == kind, kind.label()).clicked() {
                actions.push(Action::SelectTool(kind));
            }
        }

        ui.separator();
        ui.label("Stickers:");
        ui.horizontal_wrapped(|ui| {
            for glyph in &glyphs {
                let selected = tool.sticker_glyph() == Some(glyph.as_str());
                if ui.selectable_label(selected, RichText::new(glyph).size(24.0)).clicked() {
                    actions.push(Action::SelectSticker(glyph.clone()));
                }
            }
        });
        if ui.button("Custom sticker…").clicked() {
            self.show_modal = true;
        }

        ui.separator();
        if ui.button("Export").clicked() {
            self.export();
        }
        if let Some(status) = &self.status {
            ui.label(status);
        }

        actions
    }

    fn custom_sticker_modal(&mut self, ctx: &egui::Context) -> Option<Action> {
        let mut action = None;
        let mut close = false;
        egui::Window::new("Custom sticker")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("Sticker text:");
                let response = ui.text_edit_singleline(&mut self.custom_sticker);
                let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                ui.horizontal(|ui| {
                    if ui.button("Add").clicked() || submitted {
                        action = Some(Action::RegisterCustomSticker(self.custom_sticker.clone()));
                        close = true;
                    }
                    if ui.button("Cancel").clicked() {
                        close = true;
                    }
                });
            });
        if close {
            self.show_modal = false;
            self.custom_sticker.clear();
        }
        action
    }

    fn export(&mut self) {
        let size = self.sketch.config().export_size;
        let result = self
            .sketch
            .export_png(size)
            .and_then(|bytes| save_export(&bytes, &self.sketch.config().export_path));
        self.status = Some(match result {
            Ok(()) => format!("Exported {}x{}", size[0], size[1]),
            Err(err) => {
                log::error!("Export failed: {}", err);
                format!("Export failed: {err}")
            }
        });
    }
}

impl eframe::App for SketchApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut actions = egui::SidePanel::left("tools_panel")
            .show(ctx, |ui| self.tools_panel(ui))
            .inner;

        if self.show_modal {
            actions.extend(self.custom_sticker_modal(ctx));
        }

        for action in &actions {
            route_action(action, &mut self.sketch);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let [width, height] = self.sketch.config().canvas_size;
            let (response, painter) =
                ui.allocate_painter(vec2(width as f32, height as f32), Sense::click_and_drag());
            let rect = response.rect;

            for event in self.input.process_input(&response) {
                route_event(&event, &mut self.sketch);
            }

            self.renderer.update(&self.sketch);
            self.renderer.present(ctx, &painter, rect);
        });

        if self.renderer.needs_redraw() {
            ctx.request_repaint();
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn save_export(bytes: &[u8], file_name: &str) -> ExportResult<()> {
    std::fs::write(file_name, bytes)?;
    log::info!("Wrote {}", file_name);
    Ok(())
}

/// Hands the PNG to the browser as a file download
#[cfg(target_arch = "wasm32")]
fn save_export(bytes: &[u8], file_name: &str) -> ExportResult<()> {
    use crate::error::ExportError;
    use wasm_bindgen::JsCast;

    let js_err = |err: wasm_bindgen::JsValue| ExportError::Browser(format!("{err:?}"));

    let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("image/png");
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_err)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_err)?;

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| ExportError::Browser("no document".to_owned()))?;
    let anchor = document
        .create_element("a")
        .map_err(js_err)?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| ExportError::Browser("created element is not an anchor".to_owned()))?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    web_sys::Url::revoke_object_url(&url).map_err(js_err)?;
    Ok(())
}
