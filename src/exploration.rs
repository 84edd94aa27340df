use crate::controller::{KeyHandlers, Model};
use crate::dungeon::Dungeon;
use crate::input::Key;
use crate::party::Party;
use crate::rng::Dice;

/// Row the party marker walks along.
pub const PARTY_Y: i64 = 238;

/// Frames per simulation tick.
pub const CLOCK_PERIOD: u32 = 60;

/// Fires once every `period` ticks, on the last tick of each period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    period: u32,
    count: u32,
}

impl Clock {
    pub fn new(period: u32) -> Self {
        Self {
            period: period.max(1),
            count: 0,
        }
    }

    pub fn tick(&mut self) -> bool {
        self.count += 1;
        if self.count >= self.period {
            self.count = 0;
            true
        } else {
            false
        }
    }
}

/// Requests from the exploration model to whoever runs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplorationSignal {
    /// Left pushed at the entrance.
    ReturnToTown,
    /// Z pushed after the party died.
    GameOver,
}

/// One trip into the dungeon.
pub struct Exploration {
    pub party: Party,
    pub dungeon: Dungeon,
    clock: Clock,
    idle: bool,
    signal: Option<ExplorationSignal>,
}

impl Exploration {
    /// Put `party` at the entrance of a dungeon `destination` steps deep.
    pub fn new(mut party: Party, destination: i64) -> Self {
        party.x = party.departure;
        party.y = PARTY_Y;
        party.destination = destination;
        let dungeon = Dungeon::for_score(party.score);
        log::info!("entering dungeon, enemy level {}", dungeon.enemy_level);
        Self {
            party,
            dungeon,
            clock: Clock::new(CLOCK_PERIOD),
            idle: false,
            signal: None,
        }
    }

    /// Per-frame step. Every clock period the party eats and drains, and
    /// rests if it stood still by a torch this frame.
    pub fn update(&mut self) {
        if self.party.is_alive() && self.clock.tick() {
            self.party.update();
            if self.idle && self.dungeon.torch_at(&self.party) {
                self.party.rest();
            }
        }
        self.idle = false;
    }

    pub fn is_idle(&self) -> bool {
        self.idle
    }

    pub fn take_signal(&mut self) -> Option<ExplorationSignal> {
        self.signal.take()
    }

    /// Bank the run: treasure turns into score and gold.
    pub fn settle(&mut self) {
        let party = &mut self.party;
        let earned = party.treasure * self.dungeon.enemy_level / 10;
        party.score += earned;
        party.gold += party.treasure;
        log::info!(
            "run settled: {} treasure, +{} score, frontier {}",
            party.treasure,
            earned,
            party.frontier
        );
        party.treasure = 0;
    }

    /// Settle and hand the party back.
    pub fn finish(mut self) -> Party {
        self.settle();
        self.party
    }

    fn walk_left(&mut self, _dice: &mut dyn Dice) -> bool {
        if self.party.is_dead() {
            return false;
        }
        if self.party.x == self.party.departure {
            self.signal = Some(ExplorationSignal::ReturnToTown);
        } else {
            self.party.move_left();
        }
        true
    }

    fn walk_right(&mut self, dice: &mut dyn Dice) -> bool {
        if self.party.is_dead() {
            return false;
        }
        self.party.move_right();
        if self.dungeon.encounter(dice) {
            self.dungeon.battle(&mut self.party, dice);
        }
        true
    }

    fn act(&mut self, _dice: &mut dyn Dice) -> bool {
        if self.party.is_dead() {
            self.signal = Some(ExplorationSignal::GameOver);
        } else if self.dungeon.torch(&mut self.party) {
            log::debug!("torch lit at {}", self.party.x);
        }
        true
    }
}

impl Model for Exploration {
    fn key_handlers() -> KeyHandlers<Self> {
        KeyHandlers::new()
            .on_push(Key::Left, Self::walk_left)
            .on_push(Key::Right, Self::walk_right)
            .on_push(Key::Z, Self::act)
    }

    fn idle(&mut self) {
        self.idle = true;
    }
}
