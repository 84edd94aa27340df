//! Cross-module invariants checked over long random input sequences.
//!
//! A seeded walk presses random keys through the controller and runs the
//! exploration clock; party state is validated after every frame.

use rand::RngExt;
use rand::rngs::StdRng;
use winit::keyboard::KeyCode;

use delve::config::GameConfig;
use delve::controller::Controller;
use delve::exploration::{Exploration, ExplorationSignal};
use delve::input::KeyboardState;
use delve::intermission::Intermission;
use delve::party::Party;
use delve::rng::create_rng;
use delve::ui::Theme;

const KEYS: [Option<KeyCode>; 5] = [
    None,
    Some(KeyCode::ArrowLeft),
    Some(KeyCode::ArrowRight),
    Some(KeyCode::ArrowRight),
    Some(KeyCode::KeyZ),
];

fn validate_party(party: &Party) {
    assert!(party.x >= party.departure, "x {} left of departure", party.x);
    assert!(party.x <= party.destination, "x {} past destination", party.x);
    assert!(party.frontier >= party.x, "frontier {} behind x {}", party.frontier, party.x);
    assert!(party.food >= 0);
    assert!(party.oil >= 0);
    assert!(party.oil <= party.max_oil);
    assert!(party.treasure >= 0);
    for (i, e) in party.explorers.iter().enumerate() {
        assert!((0..=e.max_life).contains(&e.life), "explorer {i} life {}", e.life);
        assert!(
            (0..=e.max_stamina).contains(&e.stamina),
            "explorer {i} stamina {}",
            e.stamina
        );
    }
}

/// Drive `frames` random frames; returns the exploration and any signal
/// that ended it early.
fn random_walk(seed: u64, frames: u32) -> (Exploration, Option<ExplorationSignal>) {
    let config = GameConfig::default();
    let mut run = Exploration::new(config.new_party(), config.destination());
    // Start a little way in so Left does not immediately end the run.
    for _ in 0..20 {
        run.party.move_right();
    }
    let controller: Controller<Exploration> = Controller::new();
    let mut keys: StdRng = create_rng(seed);
    let mut dice: StdRng = create_rng(seed.wrapping_add(1));
    let mut input = KeyboardState::new();

    let mut last_frontier = run.party.frontier;
    for _ in 0..frames {
        let pick = KEYS[keys.random_range(0..KEYS.len())];
        if let Some(code) = pick {
            input.press(code);
        }
        controller.update(&mut run, &input, &mut dice);
        run.update();
        input.end_frame();
        if let Some(code) = pick {
            input.release(code);
        }

        validate_party(&run.party);
        assert!(run.party.frontier >= last_frontier, "frontier went back");
        last_frontier = run.party.frontier;

        if let Some(signal) = run.take_signal() {
            return (run, Some(signal));
        }
    }
    (run, None)
}

#[test]
fn party_invariants_hold_over_random_walks() {
    for seed in 0..20 {
        random_walk(seed, 5_000);
    }
}

#[test]
fn same_seed_same_outcome() {
    let (a, sig_a) = random_walk(7, 3_000);
    let (b, sig_b) = random_walk(7, 3_000);
    assert_eq!(a.party, b.party);
    assert_eq!(a.dungeon, b.dungeon);
    assert_eq!(sig_a, sig_b);
}

#[test]
fn dead_party_stays_put() {
    let (mut run, _) = random_walk(3, 10);
    for e in &mut run.party.explorers {
        e.life = 0;
    }
    let before = run.party.clone();
    let controller: Controller<Exploration> = Controller::new();
    let mut dice = create_rng(0);
    let mut input = KeyboardState::new();
    for code in [KeyCode::ArrowLeft, KeyCode::ArrowRight] {
        input.press(code);
        assert!(!controller.update(&mut run, &input, &mut dice));
        input.release(code);
    }
    for _ in 0..120 {
        run.update();
    }
    assert_eq!(run.party, before);
}

/// Walk right for `frames` frames, lighting a torch now and then.
fn push_deeper(party: Party, seed: u64, frames: u32, dice: &mut StdRng) -> Exploration {
    let mut run = Exploration::new(party, 640);
    let controller: Controller<Exploration> = Controller::new();
    let mut keys = create_rng(seed);
    let mut input = KeyboardState::new();
    for _ in 0..frames {
        let code = if keys.random_range(0..4) == 0 {
            KeyCode::KeyZ
        } else {
            KeyCode::ArrowRight
        };
        input.press(code);
        controller.update(&mut run, &input, dice);
        run.update();
        input.end_frame();
        input.release(code);
        validate_party(&run.party);
    }
    run
}

#[test]
fn town_visits_keep_invariants() {
    let mut dice = create_rng(11);
    let mut party = GameConfig::default().new_party();
    for seed in 0..30 {
        let run = push_deeper(party, seed, 600, &mut dice);
        let banked = run.party.gold + run.party.treasure;
        let mut town = Intermission::new(run.finish(), &Theme::default());
        assert_eq!(town.party.gold, banked);
        assert_eq!(town.party.treasure, 0);

        let gold_before = town.party.gold;
        if town.inn(&mut dice) {
            assert!(town.party.gold == gold_before || town.party.gold == gold_before - 200);
        }
        while town.buy_food() {}
        while town.buy_oil() {}
        assert!(town.party.gold >= 0);
        assert!(town.party.food >= town.party.max_food || town.party.gold < 20);
        assert!(town.party.oil == town.party.max_oil || town.party.gold < 100);

        party = std::mem::take(&mut town.party);
    }
}
