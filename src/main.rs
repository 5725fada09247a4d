//! StreamView - IPTV channel browser
//! Header with search and a view-mode toggle, category sidebar, channel
//! grid/list, and a playback overlay over a built-in catalog.

// Hide console window on Windows release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

// Use mimalloc for faster memory allocation (Linux, macOS)
#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::time::Instant;

use anyhow::{Context, Result};
use eframe::egui;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod catalog;
mod config;
mod filter;
mod models;
mod player;
mod state;

use catalog::{builtin_catalog, categories, ALL_CATEGORY};
use config::AppConfig;
use filter::filter_channels;
use models::{Channel, ViewMode};
use player::{PlaybackPhase, PlayerController};
use state::{Action, UiState};

const CARD_WIDTH: f32 = 220.0;

fn category_glyph(category: &str) -> &'static str {
    match category {
        "All" => "🏠",
        "Sports" => "🏆",
        "Movies" => "🎬",
        "News" => "📰",
        "Kids" => "🧸",
        "Documentary" => "📚",
        "Entertainment" => "🎮",
        "Music" => "🎵",
        _ => "📺",
    }
}

/// Stable stand-in for a live viewer figure
fn viewer_count(channel_id: &str) -> u32 {
    let hash = channel_id
        .bytes()
        .fold(7u32, |acc, b| acc.wrapping_mul(31).wrapping_add(u32::from(b)));
    100 + hash % 1000
}

/// Tile backdrop derived from the category label, stable across frames
fn tile_color(category: &str) -> egui::Color32 {
    let hash = category
        .bytes()
        .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(u32::from(b)));
    let r = 30 + (hash % 40) as u8;
    let g = 30 + ((hash >> 8) % 40) as u8;
    let b = 45 + ((hash >> 16) % 50) as u8;
    egui::Color32::from_rgb(r, g, b)
}

/// Procedural window icon: rounded gradient square with a play mark
fn load_icon() -> egui::IconData {
    let size: usize = 64;
    let mut rgba = vec![0u8; size * size * 4];

    for y in 0..size {
        for x in 0..size {
            let idx = (y * size + x) * 4;

            let nx = x as f32 / size as f32;
            let ny = y as f32 / size as f32;

            // Rounded rectangle check
            let corner_radius = 0.125;
            let in_rounded_rect = {
                let dx = if nx < corner_radius {
                    corner_radius - nx
                } else if nx > 1.0 - corner_radius {
                    nx - (1.0 - corner_radius)
                } else {
                    0.0
                };
                let dy = if ny < corner_radius {
                    corner_radius - ny
                } else if ny > 1.0 - corner_radius {
                    ny - (1.0 - corner_radius)
                } else {
                    0.0
                };
                dx * dx + dy * dy <= corner_radius * corner_radius
            };

            if !in_rounded_rect {
                rgba[idx] = 0;
                rgba[idx + 1] = 0;
                rgba[idx + 2] = 0;
                rgba[idx + 3] = 0;
                continue;
            }

            // Blue to purple gradient (#3b82f6 to #9333ea)
            let gradient_t = nx * 0.5 + ny * 0.5;
            let r = (59.0 + (147.0 - 59.0) * gradient_t) as u8;
            let g = (130.0 + (51.0 - 130.0) * gradient_t) as u8;
            let b = (246.0 + (234.0 - 246.0) * gradient_t) as u8;

            // Play triangle pointing right, centered
            let px = nx - 0.40;
            let py = ny - 0.50;
            let in_play = px >= 0.0 && px <= 0.28 && py.abs() <= (0.28 - px) * 0.72;

            if in_play {
                rgba[idx] = 255;
                rgba[idx + 1] = 255;
                rgba[idx + 2] = 255;
                rgba[idx + 3] = 255;
            } else {
                rgba[idx] = r;
                rgba[idx + 1] = g;
                rgba[idx + 2] = b;
                rgba[idx + 3] = 255;
            }
        }
    }

    egui::IconData {
        rgba,
        width: size as u32,
        height: size as u32,
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::default();
    let dark_mode = config.dark_mode;
    let catalog = builtin_catalog().context("failed to load the built-in catalog")?;
    info!(channels = catalog.len(), "catalog loaded");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size)
            .with_icon(load_icon()),
        vsync: true,
        hardware_acceleration: eframe::HardwareAcceleration::Preferred,
        ..Default::default()
    };

    let app = StreamViewApp::new(config, catalog);
    eframe::run_native(
        "StreamView",
        options,
        Box::new(move |cc| {
            // Add emoji font support for the category and transport glyphs
            let mut fonts = egui::FontDefinitions::default();

            #[cfg(target_os = "windows")]
            {
                if let Ok(font_data) = std::fs::read("C:\\Windows\\Fonts\\seguiemj.ttf") {
                    fonts.font_data.insert(
                        "emoji".to_owned(),
                        egui::FontData::from_owned(font_data).into(),
                    );
                    fonts
                        .families
                        .entry(egui::FontFamily::Proportional)
                        .or_default()
                        .push("emoji".to_owned());
                }
            }

            #[cfg(target_os = "linux")]
            {
                let emoji_paths = [
                    "/usr/share/fonts/truetype/noto/NotoColorEmoji.ttf",
                    "/usr/share/fonts/noto-emoji/NotoColorEmoji.ttf",
                    "/usr/share/fonts/google-noto-emoji/NotoColorEmoji.ttf",
                    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
                ];
                for path in emoji_paths {
                    if let Ok(font_data) = std::fs::read(path) {
                        fonts.font_data.insert(
                            "emoji".to_owned(),
                            egui::FontData::from_owned(font_data).into(),
                        );
                        fonts
                            .families
                            .entry(egui::FontFamily::Proportional)
                            .or_default()
                            .push("emoji".to_owned());
                        break;
                    }
                }
            }

            #[cfg(target_os = "macos")]
            {
                if let Ok(font_data) = std::fs::read("/System/Library/Fonts/Apple Color Emoji.ttc") {
                    fonts.font_data.insert(
                        "emoji".to_owned(),
                        egui::FontData::from_owned(font_data).into(),
                    );
                    fonts
                        .families
                        .entry(egui::FontFamily::Proportional)
                        .or_default()
                        .push("emoji".to_owned());
                }
            }

            cc.egui_ctx.set_fonts(fonts);
            cc.egui_ctx.set_visuals(if dark_mode {
                egui::Visuals::dark()
            } else {
                egui::Visuals::light()
            });
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("window system error: {e}"))
}

struct StreamViewApp {
    config: AppConfig,
    catalog: Vec<Channel>,
    category_labels: Vec<String>,
    ui_state: UiState,
    player: Option<PlayerController>,

    // Console log
    console_log: Vec<String>,
    status_message: String,
}

impl StreamViewApp {
    fn new(config: AppConfig, catalog: Vec<Channel>) -> Self {
        let category_labels = categories(&catalog);
        let status_message = format!("{} channels available", catalog.len());
        Self {
            config,
            catalog,
            category_labels,
            ui_state: UiState::default(),
            player: None,
            console_log: Vec::new(),
            status_message,
        }
    }

    fn log(&mut self, message: &str) {
        info!("{message}");
        let line = format!("[{}] {}", chrono::Local::now().format("%H:%M:%S"), message);
        self.console_log.push(line);
        if self.console_log.len() > 200 {
            self.console_log.remove(0);
        }
        self.status_message = message.to_string();
    }

    /// Run side effects for an action, then apply the state transition.
    fn dispatch(&mut self, action: Action) {
        match &action {
            Action::SelectChannel(channel) => {
                // replaces any prior controller; only one playback state lives
                self.player = Some(PlayerController::new(channel.clone(), Instant::now()));
                let message = format!("Now playing: {}", channel.name);
                self.log(&message);
            }
            Action::ClosePlayer => {
                self.player = None;
                self.log("Playback closed");
            }
            Action::UploadPlaylist(path) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                // playlist ingestion is not implemented; the pick is logged and dropped
                let message = format!("Processing M3U file: {name}");
                self.log(&message);
            }
            _ => {}
        }
        self.ui_state.apply(action);
    }

    fn show_header(&mut self, ctx: &egui::Context, narrow: bool, actions: &mut Vec<Action>) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if narrow {
                    let glyph = if self.ui_state.sidebar_open { "✕" } else { "☰" };
                    if ui.button(glyph).clicked() {
                        actions.push(Action::ToggleSidebar);
                    }
                }
                ui.label(egui::RichText::new("▶ StreamView").strong().size(18.0));
                ui.add_space(8.0);

                let mut search = self.ui_state.search_term.clone();
                let response = ui.add(
                    egui::TextEdit::singleline(&mut search)
                        .hint_text("Search channels...")
                        .desired_width(260.0),
                );
                if response.changed() {
                    actions.push(Action::SetSearch(search));
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("📂 Upload M3U").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("M3U Playlists", &["m3u", "m3u8"])
                            .pick_file()
                        {
                            actions.push(Action::UploadPlaylist(path));
                        }
                    }
                    ui.separator();
                    let view = self.ui_state.view_mode;
                    if ui.selectable_label(view == ViewMode::List, "☰ List").clicked() {
                        actions.push(Action::SetViewMode(ViewMode::List));
                    }
                    if ui.selectable_label(view == ViewMode::Grid, "⊞ Grid").clicked() {
                        actions.push(Action::SetViewMode(ViewMode::Grid));
                    }
                });
            });
            ui.add_space(4.0);
        });
    }

    fn show_sidebar(&mut self, ctx: &egui::Context, actions: &mut Vec<Action>) {
        egui::SidePanel::left("category_panel")
            .resizable(false)
            .default_width(180.0)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.label(egui::RichText::new("CATEGORIES").weak().small());
                ui.add_space(4.0);

                for label in &self.category_labels {
                    let selected = *label == self.ui_state.selected_category;
                    let text = format!("{} {}", category_glyph(label), label);
                    if ui.selectable_label(selected, text).clicked() {
                        actions.push(Action::SetCategory(label.clone()));
                    }
                }

                ui.add_space(12.0);
                ui.separator();
                ui.group(|ui| {
                    ui.label(egui::RichText::new("Premium Features").strong());
                    ui.label(
                        egui::RichText::new("Unlock HD streaming, premium channels, and more")
                            .weak()
                            .small(),
                    );
                    ui.add_enabled(false, egui::Button::new("Upgrade Now"));
                });
            });
    }

    fn show_status_bar(&mut self, ctx: &egui::Context, visible_count: usize) {
        egui::TopBottomPanel::bottom("bottom_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.status_message);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(format!(
                            "{}/{} channels",
                            visible_count,
                            self.catalog.len()
                        ))
                        .weak(),
                    );
                });
            });
            egui::CollapsingHeader::new("Activity log").show(ui, |ui| {
                egui::ScrollArea::vertical()
                    .max_height(120.0)
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for line in &self.console_log {
                            ui.monospace(line);
                        }
                    });
            });
        });
    }

    fn show_central(&mut self, ctx: &egui::Context, visible: &[Channel], actions: &mut Vec<Action>) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().auto_shrink([false; 2]).show(ui, |ui| {
                if let Some(player) = self.player.as_mut() {
                    let response = player.show(ui);
                    if response.close_requested {
                        actions.push(Action::ClosePlayer);
                    }
                    if let Some(fullscreen) = response.fullscreen {
                        ui.ctx()
                            .send_viewport_cmd(egui::ViewportCommand::Fullscreen(fullscreen));
                    }
                    ui.add_space(12.0);
                }

                ui.horizontal(|ui| {
                    let title = if self.ui_state.selected_category == ALL_CATEGORY {
                        "All Channels".to_string()
                    } else {
                        self.ui_state.selected_category.clone()
                    };
                    ui.heading(title);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let noun = if visible.len() == 1 { "channel" } else { "channels" };
                        ui.label(egui::RichText::new(format!("{} {noun}", visible.len())).weak());
                    });
                });
                ui.add_space(8.0);

                if visible.is_empty() {
                    show_empty_state(ui);
                } else {
                    match self.ui_state.view_mode {
                        ViewMode::Grid => show_channel_grid(ui, visible, actions),
                        ViewMode::List => show_channel_list(ui, visible, actions),
                    }
                }
            });
        });
    }
}

impl eframe::App for StreamViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        if let Some(player) = self.player.as_mut() {
            player.update(now);
        }

        let narrow = ctx.screen_rect().width() < self.config.narrow_breakpoint;
        let mut actions: Vec<Action> = Vec::new();

        let visible: Vec<Channel> = filter_channels(
            &self.catalog,
            &self.ui_state.search_term,
            &self.ui_state.selected_category,
        )
        .into_iter()
        .cloned()
        .collect();

        self.show_header(ctx, narrow, &mut actions);
        if !narrow || self.ui_state.sidebar_open {
            self.show_sidebar(ctx, &mut actions);
        }
        self.show_status_bar(ctx, visible.len());
        self.show_central(ctx, &visible, &mut actions);

        for action in actions {
            self.dispatch(action);
        }

        // keep the playback clock and the controls-hide timer ticking
        if self.player.as_ref().is_some_and(|p| {
            matches!(p.phase(), PlaybackPhase::Playing | PlaybackPhase::Loading)
                || p.controls_visible()
        }) {
            ctx.request_repaint();
        }
    }
}

fn show_empty_state(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(80.0);
        ui.label(egui::RichText::new("▶").size(40.0).weak());
        ui.add_space(8.0);
        ui.heading("No channels found");
        ui.label(egui::RichText::new("Try adjusting your search or category filters").weak());
    });
}

fn show_channel_grid(ui: &mut egui::Ui, channels: &[Channel], actions: &mut Vec<Action>) {
    let columns = ((ui.available_width() + 12.0) / (CARD_WIDTH + 12.0))
        .floor()
        .max(1.0) as usize;
    for row in channels.chunks(columns) {
        ui.horizontal(|ui| {
            for channel in row {
                show_channel_card(ui, channel, actions);
            }
        });
        ui.add_space(10.0);
    }
}

fn show_channel_card(ui: &mut egui::Ui, channel: &Channel, actions: &mut Vec<Action>) {
    let response = ui
        .allocate_ui(egui::vec2(CARD_WIDTH, 10.0), |ui| {
            ui.group(|ui| {
                ui.set_width(CARD_WIDTH - 12.0);
                ui.vertical(|ui| {
                    logo_tile(
                        ui,
                        channel,
                        egui::vec2(CARD_WIDTH - 12.0, (CARD_WIDTH - 12.0) * 9.0 / 16.0),
                    );
                    ui.label(egui::RichText::new(&channel.name).strong());
                    if let Some(description) = &channel.description {
                        ui.label(egui::RichText::new(description).weak().small());
                    }
                    ui.horizontal(|ui| {
                        ui.label(
                            egui::RichText::new(format!("{} viewers", viewer_count(&channel.id)))
                                .weak()
                                .small(),
                        );
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.label(
                                egui::RichText::new("HD")
                                    .small()
                                    .color(egui::Color32::from_rgb(80, 200, 120)),
                            );
                        });
                    });
                });
            })
            .response
        })
        .inner
        .interact(egui::Sense::click())
        .on_hover_cursor(egui::CursorIcon::PointingHand);

    if response.clicked() {
        actions.push(Action::SelectChannel(channel.clone()));
    }
}

fn show_channel_list(ui: &mut egui::Ui, channels: &[Channel], actions: &mut Vec<Action>) {
    for channel in channels {
        let response = ui
            .group(|ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    logo_tile(ui, channel, egui::vec2(96.0, 54.0));
                    ui.vertical(|ui| {
                        ui.label(egui::RichText::new(&channel.name).strong());
                        if let Some(description) = &channel.description {
                            ui.label(egui::RichText::new(description).weak().small());
                        }
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!("{} viewers", viewer_count(&channel.id)))
                                .weak()
                                .small(),
                        );
                        ui.label(egui::RichText::new(&channel.category).small());
                    });
                });
            })
            .response
            .interact(egui::Sense::click())
            .on_hover_cursor(egui::CursorIcon::PointingHand);

        if response.clicked() {
            actions.push(Action::SelectChannel(channel.clone()));
        }
        ui.add_space(6.0);
    }
}

fn logo_tile(ui: &mut egui::Ui, channel: &Channel, size: egui::Vec2) {
    let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, egui::CornerRadius::same(4), tile_color(&channel.category));

    let initial = channel.name.chars().next().unwrap_or('#').to_string();
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        initial,
        egui::FontId::proportional(26.0),
        egui::Color32::WHITE,
    );

    painter.circle_filled(
        rect.left_top() + egui::vec2(12.0, 12.0),
        3.0,
        egui::Color32::from_rgb(220, 50, 50),
    );
    painter.text(
        rect.left_top() + egui::vec2(20.0, 12.0),
        egui::Align2::LEFT_CENTER,
        "LIVE",
        egui::FontId::proportional(10.0),
        egui::Color32::WHITE,
    );
    painter.text(
        rect.right_top() + egui::vec2(-10.0, 12.0),
        egui::Align2::RIGHT_CENTER,
        &channel.category,
        egui::FontId::proportional(10.0),
        egui::Color32::from_gray(200),
    );

    // artwork URLs are carried in the catalog but nothing fetches them;
    // mark the slot the way a broken image renders
    if channel.logo.is_some() {
        painter.text(
            rect.right_bottom() + egui::vec2(-8.0, -8.0),
            egui::Align2::RIGHT_BOTTOM,
            "🖼",
            egui::FontId::proportional(10.0),
            egui::Color32::from_gray(120),
        );
    }
}
