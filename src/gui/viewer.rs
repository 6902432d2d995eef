// src/gui/viewer.rs
// Minimal chart window: one texture, scaled to fit, closed by the user.

use std::error::Error;

use eframe::egui::{self, ColorImage, IconData, TextureHandle, TextureOptions, ViewportBuilder};
use eframe::egui::load::SizedTexture;
use image::{Rgba, RgbaImage};

use crate::chart::ChartArtifact;

struct ChartViewer {
    texture: TextureHandle,
}

impl eframe::App for ChartViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(egui::Color32::WHITE))
            .show(ctx, |ui| {
                ui.centered_and_justified(|ui| {
                    ui.add(
                        egui::Image::from_texture(SizedTexture::from_handle(&self.texture))
                            .shrink_to_fit(),
                    );
                });
            });
    }
}

/// Open a window showing `chart`. Blocks until the window is closed.
pub fn show(chart: &ChartArtifact, title: &str) -> Result<(), Box<dyn Error>> {
    let rgba = image::load_from_memory(&chart.png)?.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let pixels = rgba.into_raw();

    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_title(title)
            .with_inner_size([chart.width as f32, chart.height as f32])
            .with_icon(app_icon()),
        ..Default::default()
    };

    logd!("Viewer: opening {}x{} chart", size[0], size[1]);
    eframe::run_native(
        title,
        options,
        Box::new(move |cc| {
            let image = ColorImage::from_rgba_unmultiplied(size, &pixels);
            let texture = cc.egui_ctx.load_texture("chart", image, TextureOptions::LINEAR);
            Ok(Box::new(ChartViewer { texture }))
        }),
    )?;
    Ok(())
}

/// 32×32 gold tile with a dark rim; no bundled asset needed.
fn app_icon() -> IconData {
    const SIDE: u32 = 32;
    let rgba = RgbaImage::from_fn(SIDE, SIDE, |x, y| {
        let edge = x < 2 || y < 2 || x >= SIDE - 2 || y >= SIDE - 2;
        if edge { Rgba([30, 30, 30, 255]) } else { Rgba([245, 197, 24, 255]) }
    });
    IconData { rgba: rgba.into_raw(), width: SIDE, height: SIDE }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_is_square_rgba() {
        let icon = app_icon();
        assert_eq!(icon.rgba.len(), (icon.width * icon.height * 4) as usize);
        assert_eq!(&icon.rgba[..4], &[30, 30, 30, 255]);
    }
}
