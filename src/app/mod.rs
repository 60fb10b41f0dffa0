mod input;
mod state;
mod timing;

use state::{ShellState, ThemeBackground};

use crate::form::{CoreForm, CoreSnapshot, FaceId, FrameInput, Section};
use crate::render::camera::pointer_ndc;
use crate::render::{self, egui_overlay, pick, GraffitiLayer, OrbitCamera};
use crate::scene::{serialization, SceneTuning};
use crate::ui::{self, OverlayModel, UiAction};
use input::{InputAction, InputState};
use timing::FrameTiming;

use glam::Vec2;
use std::time::Instant;

pub const WINDOW_TITLE: &str = "Thought Form";

/// Radians of orbit per dragged pixel.
const ORBIT_SPEED: f32 = 0.005;

pub struct ThoughtFormApp {
    tuning: SceneTuning,
    core: CoreForm,
    shell: ShellState,
    camera: OrbitCamera,
    theme: ThemeBackground,
    graffiti: GraffitiLayer,
    input: InputState,
    timing: FrameTiming,
    hovered_face: Option<FaceId>,
    pointer_ndc: Vec2,
}

impl ThoughtFormApp {
    pub fn new(tuning: SceneTuning) -> Self {
        let camera = OrbitCamera::new(tuning.camera_distance, tuning.camera_fov_deg);
        let theme = ThemeBackground::new(&tuning);
        let core = CoreForm::new(tuning.clone());
        log::info!(
            "Core ready: {} faces, camera at {:.1} units",
            core.faces().map(|faces| faces.len()).unwrap_or(0),
            tuning.camera_distance
        );
        Self {
            tuning,
            core,
            shell: ShellState::new(),
            camera,
            theme,
            graffiti: GraffitiLayer::new(),
            input: InputState::default(),
            timing: FrameTiming::new(WINDOW_TITLE.to_string()),
            hovered_face: None,
            pointer_ndc: Vec2::ZERO,
        }
    }

    fn apply_input_action(&mut self, action: InputAction) {
        match action {
            InputAction::SelectSection(section) => self.shell.select_section(section),
            InputAction::ToggleExplode => self.shell.toggle_explode(),
            InputAction::ToggleMenu => self.shell.toggle_menu(),
            InputAction::CloseMenu => self.shell.close_menu(),
            InputAction::None => {}
        }
    }

    fn apply_ui_action(&mut self, action: UiAction) {
        match action {
            UiAction::ToggleExplode => self.shell.toggle_explode(),
            UiAction::SelectSection(section) => self.shell.select_section(Some(section)),
            UiAction::ToggleMenu => self.shell.toggle_menu(),
            UiAction::CloseMenu => self.shell.close_menu(),
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        let keys: Vec<(egui::Key, bool)> = ctx.input(|input| {
            input
                .events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Key {
                        key,
                        pressed,
                        repeat: false,
                        ..
                    } => Some((*key, *pressed)),
                    _ => None,
                })
                .collect()
        });
        for (key, pressed) in keys {
            let action = self.input.handle_key(key, pressed);
            self.apply_input_action(action);
        }
    }

    /// Moves hover to whatever face is under the pointer, emitting leave
    /// before enter like the pointer events of a scene graph would.
    fn update_hover(&mut self, hit: Option<&pick::PickHit>) {
        let target = hit.and_then(|hit| hit.face().map(|face| (face, hit.point)));
        let next = target.map(|(face, _)| face);
        if next == self.hovered_face {
            return;
        }
        if let Some(previous) = self.hovered_face.take() {
            self.core.pointer_leave(previous, &mut self.shell);
        }
        if let Some((face, point)) = target {
            self.core.pointer_enter(face, point, &mut self.shell);
            self.hovered_face = Some(face);
        }
    }

    fn viewport(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let rect = response.rect;
        let size = Vec2::new(rect.width(), rect.height());

        self.shell.rotating = response.dragged();
        if self.shell.rotating {
            let delta = response.drag_delta();
            self.camera.orbit(-delta.x * ORBIT_SPEED, -delta.y * ORBIT_SPEED);
        }

        let pointer = ui
            .ctx()
            .pointer_latest_pos()
            .filter(|pos| rect.contains(*pos))
            .map(|pos| Vec2::new(pos.x - rect.min.x, pos.y - rect.min.y));
        if let Some(pointer) = pointer {
            self.pointer_ndc = pointer_ndc(pointer, size);
        }

        self.core.sync(&self.shell.core_inputs());
        self.core.frame(&FrameInput {
            dt: self.timing.frame_dt,
            elapsed: self.timing.elapsed,
            pointer: self.pointer_ndc,
        });
        let snapshot = self.core.snapshot();

        let hit = pointer
            .filter(|_| !self.shell.rotating)
            .and_then(|pointer| pick::pick(&self.camera.ray(pointer, size), &snapshot));
        self.update_hover(hit.as_ref());
        if response.clicked() {
            self.handle_click(hit.is_some());
        }

        let started = Instant::now();
        self.graffiti.paint(&painter, rect);
        self.paint_scene(&painter, rect, &snapshot);
        self.timing
            .set_paint_ms(started.elapsed().as_secs_f32() * 1000.0);
    }

    fn handle_click(&mut self, on_core: bool) {
        if on_core {
            self.core.click(&mut self.shell);
        } else {
            self.core.pointer_miss(&mut self.shell);
            self.hovered_face = None;
        }
    }

    fn paint_scene(&self, painter: &egui::Painter, rect: egui::Rect, snapshot: &CoreSnapshot) {
        let stats = render::paint_core(painter, rect, &self.camera, snapshot);
        log::trace!("Painted {} triangles ({} culled)", stats.triangles, stats.culled);
        if let Some(detail) = self.shell.selected_detail.as_ref() {
            egui_overlay::paint_detail_label(painter, rect, &self.camera, detail);
        }
    }
}

impl eframe::App for ThoughtFormApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(title) = self.timing.update(Instant::now()) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title));
        }
        let dt = self.timing.frame_dt;

        self.handle_keys(ctx);

        self.theme.set_section(self.shell.active_section, &self.tuning);
        self.theme.advance(dt);
        let street = self.shell.active_section == Some(Section::GraffitiStyle);
        self.graffiti.set_active(street, &mut rand::rng());
        self.graffiti.advance(dt);

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(self.theme.color32()))
            .show(ctx, |ui| self.viewport(ui));

        let model = OverlayModel::new(
            self.shell.active_section,
            self.shell.exploded,
            self.shell.menu_open,
        );
        for action in ui::draw(ctx, &model) {
            self.apply_ui_action(action);
        }

        ctx.request_repaint();
    }
}

pub fn run() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    log::info!("Thought Form - polyhedral core");
    log::info!("   Keys: 1-4 sections, 0 reset, Space explode, M menu, Esc close menu");

    let mut args = std::env::args().skip(1);
    let first = args.next();
    if first.as_deref() == Some("--write-tuning") {
        write_default_tuning(args.next());
        return;
    }
    let path = serialization::tuning_path(first, std::env::var(serialization::TUNING_ENV).ok());
    let tuning = serialization::resolve_tuning(path.as_deref());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(ThoughtFormApp::new(tuning)))),
    );
    if let Err(err) = result {
        log::error!("Window closed with error: {}", err);
        std::process::exit(1);
    }

    log::info!("Goodbye!");
}

fn write_default_tuning(path: Option<String>) {
    let Some(path) = path else {
        log::error!("--write-tuning needs a file path");
        std::process::exit(2);
    };
    let path = std::path::PathBuf::from(path);
    match serialization::save_tuning_to_file(&SceneTuning::default(), &path) {
        Ok(()) => log::info!("Wrote default scene tuning to {}", path.display()),
        Err(err) => {
            log::error!("Failed to write scene tuning to {}: {}", path.display(), err);
            std::process::exit(1);
        }
    }
}
