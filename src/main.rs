use std::sync::Arc;
use std::time::Instant;

use rand::rngs::StdRng;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use delve::config::{GameConfig, load_config};
use delve::input::KeyboardState;
use delve::rng::create_rng;
use delve::scene::{SceneMachine, Services, TitleScene};
use delve::score::ScoreBoard;
use delve::ui::{DrawList, Theme};

/// Game logic runs at a fixed 60 frames per second; key repeat and the
/// exploration clock are counted in these frames.
const FRAMES_PER_SEC: f64 = 60.0;
const FRAME_INTERVAL: f64 = 1.0 / FRAMES_PER_SEC;
/// Cap catch-up after a stall so one redraw never runs a long burst.
const MAX_FRAMES_PER_REDRAW: u32 = 4;

/// Seed used when the config does not pin one.
const DEFAULT_SEED: u64 = 42;

struct App {
    window: Option<Arc<Window>>,
    machine: Option<SceneMachine>,
    keyboard: KeyboardState,
    draw: DrawList,
    scores: ScoreBoard,
    rng: StdRng,
    config: GameConfig,
    theme: Theme,
    last_frame_time: Instant,
    frame_accumulator: f64,
}

impl App {
    /// Advance one fixed frame. Returns false once the game has exited.
    fn frame(&mut self) -> bool {
        self.draw.clear();
        let mut cx = Services {
            input: &mut self.keyboard,
            surface: &mut self.draw,
            scores: &mut self.scores,
            dice: &mut self.rng,
            config: &self.config,
            theme: &self.theme,
        };
        let running = match self.machine.as_mut() {
            Some(machine) => machine.step(&mut cx),
            None => {
                self.machine = Some(SceneMachine::start(Box::new(TitleScene::new(cx.theme)), &mut cx));
                true
            }
        };
        self.keyboard.end_frame();
        log::trace!("frame drew {} commands", self.draw.len());
        running
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Delve")
            .with_resizable(false)
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.width as f64,
                self.config.height as f64,
            ));

        let window = Arc::new(event_loop.create_window(attrs).expect("create window"));
        window.request_redraw();
        self.window = Some(window);
        self.last_frame_time = Instant::now();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Focused(false) => self.keyboard.release_all(),
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    match event.state {
                        ElementState::Pressed => self.keyboard.press(code),
                        ElementState::Released => self.keyboard.release(code),
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let elapsed = now.duration_since(self.last_frame_time).as_secs_f64();
                self.last_frame_time = now;
                self.frame_accumulator += elapsed;

                let mut frames = 0;
                while self.frame_accumulator >= FRAME_INTERVAL && frames < MAX_FRAMES_PER_REDRAW {
                    self.frame_accumulator -= FRAME_INTERVAL;
                    frames += 1;
                    if !self.frame() {
                        event_loop.exit();
                        return;
                    }
                }
                if frames == MAX_FRAMES_PER_REDRAW {
                    self.frame_accumulator = 0.0;
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

fn main() {
    env_logger::init();

    let config = load_config("data/game.ron");
    let scores = ScoreBoard::load(&config.score_path);
    let rng = create_rng(config.seed.unwrap_or(DEFAULT_SEED));
    log::info!("{} scores loaded from {}", scores.scores().len(), config.score_path);

    let event_loop = EventLoop::new().expect("create event loop");
    let mut app = App {
        window: None,
        machine: None,
        keyboard: KeyboardState::new(),
        draw: DrawList::new(),
        scores,
        rng,
        config,
        theme: Theme::default(),
        last_frame_time: Instant::now(),
        frame_accumulator: 0.0,
    };
    event_loop.run_app(&mut app).expect("run event loop");
}
