use eframe::egui;
use egui::{pos2, vec2, Align2, Color32, FontId, Rect, Stroke};
use log::{error, info};
use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::catalog::GameRecord;
use crate::config::LauncherConfig;
use crate::launcher::assets::{FsAssets, LauncherImages};
use crate::launcher::input::{self, AxisGate, GamepadInput};
use crate::launcher::process::{ProcessLauncher, SystemLauncher};
use crate::launcher::sound::{self, SoundPlayer};
use crate::launcher::view_state::{Effect, LauncherEvent, ViewState, COVER_HEIGHT, COVER_WIDTH};
use crate::launcher::wrap::wrap_text;
use crate::ui::helpers::{self, FontMeasure};

const BACKGROUND_COLOR: Color32 = Color32::from_rgb(30, 30, 30);
const FONT_COLOR: Color32 = Color32::from_rgb(240, 240, 240);
const HIGHLIGHT_COLOR: Color32 = Color32::from_rgb(200, 150, 0);

/// Scale of the highlighted cover
const SELECTED_SCALE: f32 = 1.1;

const TITLE_SIZE: f32 = 48.0;
const DESCRIPTION_SIZE: f32 = 24.0;
const PANEL_MARGIN: f32 = 40.0;
const PANEL_PADDING: f32 = 20.0;

/// Launcher logic without any window: catalog, view state and side effects
pub struct LauncherCore<L, S> {
    records: Vec<GameRecord>,
    view: ViewState,
    launcher: L,
    sound: S,
}

impl<L: ProcessLauncher, S: SoundPlayer> LauncherCore<L, S> {
    pub fn new(records: Vec<GameRecord>, launcher: L, sound: S) -> Self {
        Self {
            records,
            view: ViewState::new(),
            launcher,
            sound,
        }
    }

    pub fn records(&self) -> &[GameRecord] {
        &self.records
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Run one frame. Returns false once the launcher should close.
    pub fn step(&mut self, events: &[LauncherEvent]) -> bool {
        let mut running = true;
        self.launcher.reap();

        for effect in self.view.update(events, &self.records) {
            match effect {
                Effect::PlaySound(cue) => self.sound.play(cue),
                Effect::Launch(index) => self.launch(index),
                Effect::Quit => running = false,
            }
        }

        running
    }

    fn launch(&self, index: usize) {
        let Some(record) = self.records.get(index) else {
            return;
        };

        info!("Launching {}", record.display_name());
        if let Err(e) = self.launcher.launch(&record.command) {
            error!("Error running '{}': {}", record.display_name(), e);
        }
    }
}

/// Full-screen carousel window
pub struct LauncherApp {
    core: LauncherCore<SystemLauncher, Box<dyn SoundPlayer>>,
    covers: Vec<egui::TextureHandle>,
    backgrounds: HashMap<String, egui::TextureHandle>,
    gamepad: Option<GamepadInput>,
    pending: Vec<LauncherEvent>,
    frame_interval: Duration,
    last_tick: Instant,
}

impl LauncherApp {
    /// Decode every asset up front and open input and audio devices
    pub fn new(cc: &eframe::CreationContext<'_>, config: LauncherConfig, records: Vec<GameRecord>) -> Self {
        let ctx = &cc.egui_ctx;

        if let Some(font) = &config.font {
            helpers::install_font(ctx, font);
        }

        let assets = FsAssets::from_working_dir();
        let images = LauncherImages::decode(&records, &assets, &config.placeholder_cover.to_string_lossy());
        let covers = images
            .covers
            .iter()
            .enumerate()
            .map(|(i, image)| helpers::load_texture_from_image(ctx, image, &format!("cover_{}", i)))
            .collect();
        let backgrounds = images
            .backgrounds
            .iter()
            .map(|(path, image)| {
                let texture = helpers::load_texture_from_image(ctx, image, &format!("background_{}", path));
                (path.clone(), texture)
            })
            .collect();

        let gate = AxisGate::new(config.axis_threshold, Duration::from_millis(config.axis_repeat_delay_ms));
        let gamepad = GamepadInput::open(gate);
        let sound = sound::open_player(config.navigate_sound.as_deref(), config.select_sound.as_deref());

        Self {
            core: LauncherCore::new(records, SystemLauncher::default(), sound),
            covers,
            backgrounds,
            gamepad,
            pending: Vec::new(),
            frame_interval: Duration::from_secs(1) / config.frame_rate.max(1),
            last_tick: Instant::now(),
        }
    }

    fn draw(&self, ui: &mut egui::Ui) {
        let painter = ui.painter();
        let screen = ui.max_rect();
        let view = self.core.view();
        let records = self.core.records();

        painter.rect_filled(screen, 0.0, BACKGROUND_COLOR);
        self.draw_backgrounds(painter, screen, view);

        if records.is_empty() {
            painter.text(
                pos2(screen.center().x, screen.top() + 100.0),
                Align2::CENTER_TOP,
                "No games found!",
                FontId::proportional(TITLE_SIZE),
                FONT_COLOR,
            );
            return;
        }

        if let Some(record) = records.get(view.selected_index) {
            draw_info_panel(ui, screen, record);
        }
        self.draw_carousel(painter, screen, view);
    }

    /// Old background under the new one, the new one at the fade opacity
    fn draw_backgrounds(&self, painter: &egui::Painter, screen: Rect, view: &ViewState) {
        let incoming = view.background.as_ref().and_then(|path| self.backgrounds.get(path));
        let outgoing = view.previous_background.as_ref().and_then(|path| self.backgrounds.get(path));

        if let Some(texture) = outgoing {
            // Without an incoming image the old one fades out over the plain backdrop
            let alpha = if incoming.is_some() { 1.0 } else { 1.0 - view.fade_alpha };
            paint_image(painter, texture, screen, alpha);
        }
        if let Some(texture) = incoming {
            paint_image(painter, texture, screen, view.fade_alpha);
        }
    }

    fn draw_carousel(&self, painter: &egui::Painter, screen: Rect, view: &ViewState) {
        let base_y = screen.bottom() - COVER_HEIGHT - 60.0;

        for (i, texture) in self.covers.iter().enumerate() {
            let center_x = screen.center().x + view.cover_offset(i);
            if center_x + COVER_WIDTH < screen.left() || center_x - COVER_WIDTH > screen.right() {
                continue;
            }

            let selected = i == view.selected_index;
            let scale = if selected { SELECTED_SCALE } else { 1.0 };
            let center = pos2(center_x, base_y + COVER_HEIGHT / 2.0 + view.cover_lift(i));
            let rect = Rect::from_center_size(center, vec2(COVER_WIDTH * scale, COVER_HEIGHT * scale));

            paint_image(painter, texture, rect, 1.0);
            if selected {
                painter.rect_stroke(rect.expand(3.0), 4.0, Stroke::new(3.0, HIGHLIGHT_COLOR));
            }
        }
    }
}

fn paint_image(painter: &egui::Painter, texture: &egui::TextureHandle, rect: Rect, alpha: f32) {
    let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
    let tint = Color32::from_white_alpha((alpha.clamp(0.0, 1.0) * 255.0) as u8);
    painter.image(texture.id(), rect, uv, tint);
}

/// Translucent panel with the title and wrapped description
fn draw_info_panel(ui: &egui::Ui, screen: Rect, record: &GameRecord) {
    let painter = ui.painter();
    let panel = Rect::from_min_size(
        screen.min + vec2(PANEL_MARGIN, PANEL_MARGIN),
        vec2(screen.width() * 0.6, screen.height() * 0.4),
    );
    painter.rect_filled(panel, 8.0, Color32::from_black_alpha(160));

    let title_pos = panel.min + vec2(PANEL_PADDING, PANEL_PADDING);
    let title_rect = painter.text(
        title_pos,
        Align2::LEFT_TOP,
        record.display_name(),
        FontId::proportional(TITLE_SIZE),
        FONT_COLOR,
    );

    let font = FontId::proportional(DESCRIPTION_SIZE);
    let line_height = ui.fonts(|f| f.row_height(&font)) + 4.0;
    let measure = FontMeasure { ctx: ui.ctx(), font: font.clone() };
    let lines = wrap_text(&record.description, &measure, panel.width() - 2.0 * PANEL_PADDING);

    let mut y = title_rect.bottom() + 12.0;
    for line in lines {
        if y + line_height > panel.bottom() - PANEL_PADDING {
            break;
        }
        painter.text(pos2(title_pos.x, y), Align2::LEFT_TOP, line.trim_end(), font.clone(), FONT_COLOR);
        y += line_height;
    }
}

impl eframe::App for LauncherApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        let keys = ctx.input(input::keyboard_events);
        self.pending.extend(keys);
        if let Some(gamepad) = &mut self.gamepad {
            self.pending.extend(gamepad.poll());
        }

        // Animations advance by fixed steps, however often egui repaints
        if self.last_tick.elapsed() >= self.frame_interval {
            self.last_tick = Instant::now();
            let events = std::mem::take(&mut self.pending);
            if !self.core.step(&events) {
                info!("Quitting launcher");
                frame.close();
                return;
            }
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| self.draw(ui));

        ctx.request_repaint_after(self.frame_interval);
    }
}
