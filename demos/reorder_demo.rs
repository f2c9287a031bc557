#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use std::time::Duration;

use eframe::egui;
use egui_reorder::{DragStartPolicy, ReorderOptions, ReorderableList, ScrollAxis};

#[derive(Clone, Debug)]
struct Track {
    title: String,
    minutes: u32,
}

struct App {
    tracks: Vec<Track>,
    track_list: ReorderableList,

    colors: Vec<egui::Color32>,
    color_list: ReorderableList,

    show_debug_log: bool,
}

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 640.0])
            .with_title("egui_reorder demo"),
        ..Default::default()
    };

    eframe::run_native(
        "egui_reorder demo",
        options,
        Box::new(|_cc| Ok(Box::new(App::new()?))),
    )
}

impl App {
    fn new() -> Result<Self, egui_reorder::ReorderOptionsError> {
        let tracks = (1..=40)
            .map(|n| Track {
                title: format!("Track {n}"),
                minutes: 2 + n % 5,
            })
            .collect();
        let track_list = ReorderableList::new(
            "tracks",
            ReorderOptions {
                item_extent: 36.0,
                debug_event_log: true,
                ..Default::default()
            },
        )?
        .on_item_reorder(|from, to| log::info!("track moved {from} -> {to}"));

        let colors = (0..16)
            .map(|i| egui::ecolor::Hsva::new(i as f32 / 16.0, 0.6, 0.8, 1.0).into())
            .collect();
        let color_list = ReorderableList::new(
            "colors",
            ReorderOptions {
                axis: ScrollAxis::Horizontal,
                item_extent: 64.0,
                handle_alignment: -1.0,
                handle_thickness: 20.0,
                drag_start: DragStartPolicy::Delayed(Duration::from_millis(200)),
                ..Default::default()
            },
        )?;

        Ok(Self {
            tracks,
            track_list,
            colors,
            color_list,
            show_debug_log: false,
        })
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("egui_reorder_demo_help").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.add(
                    egui::Label::new(
                        "Drag a handle to reorder. The swatches need a short long-press first.",
                    )
                    .selectable(false),
                );
                ui.checkbox(&mut self.show_debug_log, "Debug log");
            });
        });

        egui::TopBottomPanel::bottom("egui_reorder_demo_colors")
            .exact_height(110.0)
            .show(ctx, |ui| {
                let response = self.color_list.show(ui, &mut self.colors, |ui, color, cx| {
                    let rect = ui.max_rect().shrink(4.0);
                    ui.painter().rect_filled(rect, 4.0, *color);
                    if cx.is_floating {
                        ui.painter().rect_stroke(
                            rect,
                            4.0,
                            ui.visuals().selection.stroke,
                            egui::StrokeKind::Outside,
                        );
                    }
                });
                if let Some(commit) = response.moved {
                    log::info!("swatch moved {} -> {}", commit.from, commit.to);
                }
            });

        if self.show_debug_log {
            egui::SidePanel::right("egui_reorder_demo_log")
                .default_width(260.0)
                .show(ctx, |ui| {
                    if ui.button("Clear").clicked() {
                        self.track_list.debug_log_clear();
                    }
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        ui.monospace(self.track_list.debug_log_text());
                    });
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.track_list.show(ui, &mut self.tracks, |ui, track, cx| {
                ui.add_space(8.0);
                ui.label(format!("{:>2}.", cx.row + 1));
                ui.strong(&track.title);
                ui.weak(format!("{} min", track.minutes));
            });
        });
    }
}
