//! Full scene flows driven frame by frame through `SceneMachine`, with a
//! `KeyboardState` for input and a `DrawList` standing in for the screen.

use winit::keyboard::KeyCode;

use delve::config::GameConfig;
use delve::input::KeyboardState;
use delve::rng::ScriptedDice;
use delve::scene::{SceneMachine, Services, TitleScene};
use delve::score::ScoreBoard;
use delve::ui::{DrawList, Theme};

struct Harness {
    input: KeyboardState,
    draw: DrawList,
    scores: ScoreBoard,
    dice: ScriptedDice,
    config: GameConfig,
    theme: Theme,
    machine: Option<SceneMachine>,
}

impl Harness {
    fn new(config: GameConfig, scores: ScoreBoard) -> Self {
        let mut harness = Self {
            input: KeyboardState::new(),
            draw: DrawList::new(),
            scores,
            dice: ScriptedDice::zeros(),
            config,
            theme: Theme::default(),
            machine: None,
        };
        let title = TitleScene::new(&harness.theme);
        let machine = SceneMachine::start(Box::new(title), &mut harness.services());
        harness.machine = Some(machine);
        harness
    }

    fn services(&mut self) -> Services<'_> {
        Services {
            input: &mut self.input,
            surface: &mut self.draw,
            scores: &mut self.scores,
            dice: &mut self.dice,
            config: &self.config,
            theme: &self.theme,
        }
    }

    fn frame(&mut self) -> bool {
        self.draw.clear();
        let Some(mut machine) = self.machine.take() else {
            return false;
        };
        let running = machine.step(&mut self.services());
        self.machine = Some(machine);
        self.input.end_frame();
        running
    }

    /// Press and release `code` within one frame.
    fn tap(&mut self, code: KeyCode) -> bool {
        self.input.press(code);
        let running = self.frame();
        self.input.release(code);
        running
    }

    fn idle(&mut self, frames: u32) {
        for _ in 0..frames {
            self.frame();
        }
    }

    fn scene(&self) -> &'static str {
        self.machine.as_ref().map_or("none", |m| m.current())
    }
}

/// A party that starves to death on the first clock tick.
fn doomed_config() -> GameConfig {
    GameConfig {
        explorers: 2,
        max_life: 1,
        max_stamina: 0,
        food: 0,
        ..GameConfig::default()
    }
}

#[test]
fn title_start_enters_town() {
    let mut h = Harness::new(GameConfig::default(), ScoreBoard::in_memory());
    assert_eq!(h.scene(), "title");
    h.frame();
    assert!(h.draw.has_text("Start"));

    assert!(h.tap(KeyCode::KeyZ));
    assert_eq!(h.scene(), "intermission");
    h.frame();
    assert!(h.draw.has_text("SCORE"));
    assert!(h.draw.has_text("-200 GOLD"));
}

#[test]
fn walk_out_and_back_to_town() {
    let mut h = Harness::new(GameConfig::default(), ScoreBoard::in_memory());
    h.tap(KeyCode::KeyZ);
    // Up wraps from the inn to the explore entry.
    h.tap(KeyCode::ArrowUp);
    h.tap(KeyCode::KeyZ);
    assert_eq!(h.scene(), "exploration");
    h.frame();
    assert!(h.draw.has_text("POS"));
    assert!(!h.draw.has_text("GAME OVER"));

    h.tap(KeyCode::ArrowLeft);
    assert_eq!(h.scene(), "intermission");
}

#[test]
fn death_records_score_and_returns_to_title() {
    let mut h = Harness::new(doomed_config(), ScoreBoard::in_memory());
    h.tap(KeyCode::KeyZ);
    h.tap(KeyCode::ArrowUp);
    h.tap(KeyCode::KeyZ);
    assert_eq!(h.scene(), "exploration");

    h.tap(KeyCode::ArrowRight);
    h.tap(KeyCode::ArrowRight);
    h.idle(60);
    assert!(h.draw.has_text("GAME OVER"));

    // Movement is ignored once everyone is dead.
    h.tap(KeyCode::ArrowLeft);
    assert_eq!(h.scene(), "exploration");

    h.tap(KeyCode::KeyZ);
    assert_eq!(h.scene(), "result");
    assert_eq!(h.scores.scores().len(), 1);
    assert_eq!(h.scores.last().map(|s| (s.point, s.depth)), Some((0, 2)));
    h.frame();
    assert!(h.draw.has_text("1ST"));
    assert!(h.draw.has_text("Back to title"));

    h.tap(KeyCode::KeyZ);
    assert_eq!(h.scene(), "title");
}

#[test]
fn game_over_persists_scores() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("dat").join("score.dat");

    let mut h = Harness::new(doomed_config(), ScoreBoard::load(&path));
    h.tap(KeyCode::KeyZ);
    h.tap(KeyCode::ArrowUp);
    h.tap(KeyCode::KeyZ);
    h.idle(60);
    h.tap(KeyCode::KeyZ);
    assert_eq!(h.scene(), "result");

    let reloaded = ScoreBoard::load(&path);
    assert_eq!(reloaded.scores(), h.scores.scores());
}

#[test]
fn scores_entry_and_back() {
    let mut h = Harness::new(GameConfig::default(), ScoreBoard::in_memory());
    h.tap(KeyCode::ArrowDown);
    h.tap(KeyCode::KeyZ);
    assert_eq!(h.scene(), "result");
    h.frame();
    assert!(!h.draw.has_text("1ST"));
    h.tap(KeyCode::KeyZ);
    assert_eq!(h.scene(), "title");
}

#[test]
fn quit_stops_the_machine() {
    let mut h = Harness::new(GameConfig::default(), ScoreBoard::in_memory());
    h.tap(KeyCode::ArrowDown);
    h.tap(KeyCode::ArrowDown);
    assert!(!h.tap(KeyCode::KeyZ));
    assert!(!h.frame());
}

#[test]
fn held_down_repeats_after_delay() {
    let mut h = Harness::new(GameConfig::default(), ScoreBoard::in_memory());
    h.tap(KeyCode::KeyZ);
    assert_eq!(h.scene(), "intermission");

    // Pushes on frames 0 and 24 of the hold: inn -> food -> oil.
    h.input.press(KeyCode::ArrowDown);
    h.idle(25);
    h.input.release(KeyCode::ArrowDown);
    assert!(h.draw.has_text("-100 GOLD >> 1 OIL"));
}

#[test]
fn shopping_without_gold_changes_nothing() {
    let mut h = Harness::new(GameConfig::default(), ScoreBoard::in_memory());
    h.tap(KeyCode::KeyZ);
    h.tap(KeyCode::ArrowDown);
    h.tap(KeyCode::KeyZ);
    // Still in town, still full of food.
    assert_eq!(h.scene(), "intermission");
    h.frame();
    assert!(h.draw.has_text("Room for 0 more"));
}
