use egui::{Color32, Rect, TextureHandle, TextureOptions};

use crate::brush::{Brush, BrushShape, SIDE_PANEL_WIDTH};
use crate::input::InputHandler;
use crate::stroke::StrokeController;
use crate::surface::Surface;

/// We derive Deserialize/Serialize so we can persist the brush on shutdown.
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct SketchApp {
    brush: Brush,

    // Everything below is per-session state; only the brush survives
    // restarts.
    #[serde(skip)]
    surface: Option<Surface>,
    /// The surface is acquired on the first frame and never again, even
    /// when acquisition failed.
    #[serde(skip)]
    mounted: bool,
    #[serde(skip)]
    controller: StrokeController,
    #[serde(skip)]
    input_handler: InputHandler,
    #[serde(skip)]
    canvas_texture: Option<TextureHandle>,
    #[serde(skip)]
    surface_dirty: bool,
}

impl Default for SketchApp {
    fn default() -> Self {
        Self {
            brush: Brush::default(),
            surface: None,
            mounted: false,
            controller: StrokeController::new(),
            input_handler: InputHandler::new(),
            canvas_texture: None,
            surface_dirty: false,
        }
    }
}

impl SketchApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Restore the brush from the previous session, if any.
        if let Some(storage) = cc.storage {
            return eframe::get_value(storage, eframe::APP_KEY).unwrap_or_default();
        }

        Self::default()
    }

    /// Size the drawing surface from the viewport, exactly once.
    fn mount(&mut self, ctx: &egui::Context) {
        self.mounted = true;
        let viewport = ctx.screen_rect().size();
        self.surface = Surface::from_viewport(viewport);
        match &self.surface {
            Some(surface) => {
                log::info!(
                    "Mounted a {}x{} drawing surface",
                    surface.width(),
                    surface.height()
                );
                self.surface_dirty = true;
            }
            None => log::warn!(
                "Viewport {}x{} leaves no room for a drawing surface; painting is disabled",
                viewport.x,
                viewport.y
            ),
        }
    }

    fn tools_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("tools_panel")
            .exact_width(SIDE_PANEL_WIDTH)
            .resizable(false)
            .show(ctx, |ui| {
                ui.heading("Brush");
                ui.separator();

                ui.horizontal(|ui| {
                    for shape in BrushShape::ALL {
                        if ui
                            .selectable_label(self.brush.shape == shape, shape.label())
                            .clicked()
                        {
                            self.brush.shape = shape;
                        }
                    }
                });

                ui.horizontal(|ui| {
                    ui.label("Primary:");
                    egui::color_picker::color_edit_button_srgba(
                        ui,
                        &mut self.brush.primary_color,
                        egui::color_picker::Alpha::Opaque,
                    );
                    ui.label("Secondary:");
                    egui::color_picker::color_edit_button_srgba(
                        ui,
                        &mut self.brush.secondary_color,
                        egui::color_picker::Alpha::Opaque,
                    );
                });

                ui.add(egui::Slider::new(&mut self.brush.opacity, 0.0..=1.0).text("Opacity"));
                ui.add(egui::Slider::new(&mut self.brush.width, 1.0..=128.0).text("Width"));
                ui.add(egui::Slider::new(&mut self.brush.height, 1.0..=128.0).text("Height"));

                ui.separator();
                ui.heading("Export");
                match self.controller.last_export() {
                    Some(url) => {
                        ui.label(format!("PNG data URL, {} bytes", url.len()));
                        if ui.button("Copy to clipboard").clicked() {
                            ctx.copy_text(url.to_owned());
                        }
                    }
                    None => {
                        ui.label("Finish a stroke to export.");
                    }
                }
            });
    }

    fn central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let available_size = ui.available_size();
                let (response, painter) = ui.allocate_painter(available_size, egui::Sense::drag());
                let rect = response.rect;

                if !self.mounted {
                    self.mount(ctx);
                }

                // Feed this frame's pointer input through the stroke
                // controller.
                self.input_handler.set_canvas_rect(rect);
                for event in self.input_handler.process_input(ctx) {
                    if self
                        .controller
                        .handle_event(&event, self.surface.as_mut(), &self.brush)
                    {
                        self.surface_dirty = true;
                    }
                }

                if self.surface_dirty {
                    if let Some(surface) = &self.surface {
                        let image = surface.to_color_image();
                        match &mut self.canvas_texture {
                            Some(texture) => texture.set(image, TextureOptions::NEAREST),
                            None => {
                                self.canvas_texture =
                                    Some(ctx.load_texture("canvas", image, TextureOptions::NEAREST));
                            }
                        }
                    }
                    self.surface_dirty = false;
                }

                if let (Some(texture), Some(surface)) = (&self.canvas_texture, &self.surface) {
                    // The surface keeps its mount-time size even if the
                    // window has changed since; draw it 1:1 over a white
                    // backdrop.
                    let canvas_rect = Rect::from_min_size(rect.min, surface.size());
                    painter.rect_filled(canvas_rect, 0.0, Color32::WHITE);
                    painter.image(
                        texture.id(),
                        canvas_rect,
                        Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                        Color32::WHITE,
                    );
                }
            });
    }
}

impl eframe::App for SketchApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.tools_panel(ctx);
        self.central_panel(ctx);
    }
}
