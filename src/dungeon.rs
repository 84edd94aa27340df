use crate::party::Party;
use crate::rng::Dice;

/// Distance within which a torch lets an idle party rest.
pub const TORCH_RADIUS: i64 = 10;

/// Chance of an encounter per step to the right, as one in `ENCOUNTER_ODDS`.
const ENCOUNTER_ODDS: i64 = 20;

/// A lit torch left on the depth axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TorchMarker {
    pub x: i64,
    pub y: i64,
}

/// What one battle did to the party.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BattleReport {
    pub damage: i64,
    pub food: i64,
    pub treasure: i64,
    pub wiped: bool,
}

/// Encounter odds, combat resolution and torch placement for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dungeon {
    pub enemy_level: i64,
    pub torches: Vec<TorchMarker>,
}

impl Dungeon {
    pub fn new(enemy_level: i64) -> Self {
        Self {
            enemy_level,
            torches: Vec::new(),
        }
    }

    /// Enemy level for a party with the given score: `10 + floor(ln(score + 1))`.
    pub fn for_score(score: i64) -> Self {
        let scale = ((score.max(0) + 1) as f64).ln().floor() as i64;
        Self::new(10 + scale)
    }

    pub fn encounter(&self, dice: &mut dyn Dice) -> bool {
        dice.below(ENCOUNTER_ODDS) == 1
    }

    /// Every living explorer takes a round. The opposition grows as the
    /// party is whittled down. Survivors pick up food and treasure.
    pub fn battle(&self, party: &mut Party, dice: &mut dyn Dice) -> BattleReport {
        let mut report = BattleReport::default();
        let depth_threat = (party.x as f64).ln().max(self.enemy_level as f64).floor() as i64;
        for i in 0..party.explorers.len() {
            if party.explorers[i].is_dead() {
                continue;
            }
            let opposition = depth_threat - party.alive_count() as i64;
            report.damage += party.explorers[i].fight(self.enemy_level, opposition, dice);
        }

        if party.is_alive() {
            report.food = dice.below(11) / 7 + dice.below(13) / 9 + dice.below(15) / 11;
            report.treasure = dice.below(party.x * self.enemy_level / 10);
            party.food += report.food;
            party.treasure += report.treasure;
            party.battled = true;
            party.total_battled += 1;
        } else {
            report.wiped = true;
        }
        log::debug!(
            "battle at {}: {} damage, +{} food, +{} treasure",
            party.x,
            report.damage,
            report.food,
            report.treasure
        );
        report
    }

    /// Light a torch where the party stands, if it has oil.
    pub fn torch(&mut self, party: &mut Party) -> bool {
        match party.torch() {
            Some(marker) => {
                self.torches.push(marker);
                true
            }
            None => false,
        }
    }

    pub fn torch_at(&self, party: &Party) -> bool {
        self.torches
            .iter()
            .any(|t| (party.x - t.x).abs() <= TORCH_RADIUS)
    }
}
