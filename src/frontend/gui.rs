// SPDX-License-Identifier: PMPL-1.0-or-later

//! Minimal desktop window for the greeter.

use crate::session::Screen;
use crate::view::GreeterView;
use anyhow::{anyhow, Result};
use eframe::{egui, App, Frame, NativeOptions};
use std::time::Duration;

const BUTTON_COLOR: egui::Color32 = egui::Color32::from_rgb(41, 98, 204);

pub struct GreeterGui {
    view: GreeterView,
}

impl GreeterGui {
    pub fn run(view: GreeterView) -> Result<()> {
        let options = NativeOptions {
            viewport: egui::ViewportBuilder::default().with_inner_size([420.0, 320.0]),
            ..Default::default()
        };
        let app = Self { view };
        eframe::run_native("Hello World", options, Box::new(|_cc| Box::new(app)))
            .map_err(|err| anyhow!("failed to launch greeter window: {err}"))?;
        Ok(())
    }
}

impl App for GreeterGui {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.view.poll();
        // Keep draining the lookup channel while a result is outstanding.
        if self.view.lookups_in_flight() > 0 {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| match self.view.session().screen() {
                Screen::Input => self.render_input(ui),
                Screen::Greeting => self.render_greeting(ui),
            });
        });
    }
}

impl GreeterGui {
    fn render_input(&mut self, ui: &mut egui::Ui) {
        ui.add_space(20.0);
        ui.heading("Enter your name:");
        ui.add(egui::TextEdit::singleline(self.view.name_mut()).hint_text("Your name"));

        ui.add_space(20.0);
        ui.heading("Choose language:");
        let session = self.view.session();
        let current = session.language();
        let mut picked = current;
        ui.horizontal_wrapped(|ui| {
            for lang in session.revision().languages() {
                ui.selectable_value(&mut picked, *lang, lang.name());
            }
        });
        if picked != current {
            if let Err(err) = self.view.select_language(picked) {
                tracing::debug!(error = %err, "ignoring language outside the catalog");
            }
        }

        ui.add_space(20.0);
        let enabled = self.view.session().can_submit();
        let button = egui::Button::new(egui::RichText::new("Say Hello").color(egui::Color32::WHITE))
            .fill(if enabled {
                BUTTON_COLOR
            } else {
                egui::Color32::GRAY
            })
            .rounding(10.0);
        if ui.add_enabled(enabled, button).clicked() {
            self.view.submit();
        }
    }

    fn render_greeting(&mut self, ui: &mut egui::Ui) {
        let Some(card) = self.view.session().card() else {
            return;
        };
        ui.add_space(40.0);
        if let Some(flag) = card.flag {
            ui.label(egui::RichText::new(flag).size(64.0));
        }
        ui.label(egui::RichText::new(&card.greeting).size(32.0).strong());
        if let Some(ip) = &card.ip {
            let line = match card.from_label {
                Some(label) => format!("{} {}", label, ip),
                None => ip.clone(),
            };
            ui.label(egui::RichText::new(line).weak());
        }

        ui.add_space(40.0);
        let button = egui::Button::new(egui::RichText::new("Try Again").color(egui::Color32::WHITE))
            .fill(BUTTON_COLOR)
            .rounding(10.0);
        if ui.add(button).clicked() {
            self.view.reset();
        }
    }
}
