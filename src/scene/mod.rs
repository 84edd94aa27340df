//! Scene state machine: exactly one scene is active and gets one `update`
//! per frame; the value it returns decides what runs next.

mod exploration;
mod intermission;
mod result;
mod title;

pub use exploration::ExplorationScene;
pub use intermission::IntermissionScene;
pub use result::{ResultCommand, ResultScene, ScoreList, score_list};
pub use title::{TitleCommand, TitleScene};

use crate::config::GameConfig;
use crate::input::{InputSource, Key, KeyBindings};
use crate::rng::Dice;
use crate::score::ScoreBoard;
use crate::ui::{Surface, Theme};

/// Everything a scene may touch during a frame, borrowed from the app root.
pub struct Services<'a> {
    pub input: &'a mut dyn InputSource,
    pub surface: &'a mut dyn Surface,
    pub scores: &'a mut ScoreBoard,
    pub dice: &'a mut dyn Dice,
    pub config: &'a GameConfig,
    pub theme: &'a Theme,
}

impl Services<'_> {
    /// Auto-repeat for the physical keys behind `keys`.
    pub fn set_key_repeat(&mut self, bindings: &KeyBindings, keys: &[Key], (delay, interval): (u32, u32)) {
        for &key in keys {
            if let Some(code) = bindings.code_for(key) {
                self.input.set_key_repeat(code, delay, interval);
            }
        }
    }
}

/// What the active scene asks for at the end of a frame.
pub enum Transition {
    Continue,
    Switch(Box<dyn Scene>),
    Exit,
}

impl std::fmt::Debug for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Transition::Continue => f.write_str("Continue"),
            Transition::Switch(scene) => write!(f, "Switch({})", scene.name()),
            Transition::Exit => f.write_str("Exit"),
        }
    }
}

pub trait Scene {
    fn name(&self) -> &'static str;

    /// Runs when the scene becomes active.
    fn init(&mut self, _cx: &mut Services<'_>) {}

    /// One frame: route input, advance, draw.
    fn update(&mut self, cx: &mut Services<'_>) -> Transition;

    /// Runs when the scene is replaced or the game exits.
    fn quit(&mut self, _cx: &mut Services<'_>) {}
}

/// Owns the active scene and applies transitions.
pub struct SceneMachine {
    scene: Box<dyn Scene>,
    running: bool,
}

impl SceneMachine {
    /// Activate `scene`.
    pub fn start(mut scene: Box<dyn Scene>, cx: &mut Services<'_>) -> Self {
        log::info!("scene: start {}", scene.name());
        scene.init(cx);
        Self {
            scene,
            running: true,
        }
    }

    pub fn current(&self) -> &'static str {
        self.scene.name()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Run one frame. Returns false once the machine has exited.
    pub fn step(&mut self, cx: &mut Services<'_>) -> bool {
        if !self.running {
            return false;
        }
        match self.scene.update(cx) {
            Transition::Continue => {}
            Transition::Switch(mut next) => {
                log::info!("scene: {} -> {}", self.scene.name(), next.name());
                self.scene.quit(cx);
                next.init(cx);
                self.scene = next;
            }
            Transition::Exit => {
                log::info!("scene: {} -> exit", self.scene.name());
                self.scene.quit(cx);
                self.running = false;
            }
        }
        self.running
    }
}

/// Frame source for `run`: hands out per-frame services and is told when
/// the frame is over.
pub trait Platform {
    /// False stops the loop (window closed, script exhausted).
    fn begin_frame(&mut self) -> bool;

    fn services(&mut self) -> Services<'_>;

    fn end_frame(&mut self);
}

/// Run `initial` until it exits or the platform stops. Returns whether the
/// game exited on its own.
pub fn run(initial: Box<dyn Scene>, platform: &mut dyn Platform) -> bool {
    let mut machine = SceneMachine::start(initial, &mut platform.services());
    while platform.begin_frame() {
        let running = machine.step(&mut platform.services());
        platform.end_frame();
        if !running {
            return true;
        }
    }
    false
}
