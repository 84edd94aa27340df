use crate::dungeon::TorchMarker;
use crate::rng::Dice;

/// One member of the party.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explorer {
    pub life: i64,
    pub max_life: i64,
    pub stamina: i64,
    pub max_stamina: i64,
}

impl Default for Explorer {
    fn default() -> Self {
        Self::new(10, 10)
    }
}

impl Explorer {
    pub fn new(max_life: i64, max_stamina: i64) -> Self {
        Self {
            life: max_life,
            max_life,
            stamina: max_stamina,
            max_stamina,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0
    }

    pub fn is_dead(&self) -> bool {
        !self.is_alive()
    }

    pub fn has_stamina(&self) -> bool {
        self.stamina > 0
    }

    pub fn is_damaged(&self) -> bool {
        self.life < self.max_life
    }

    pub fn is_wearied(&self) -> bool {
        self.stamina < self.max_stamina
    }

    pub fn needs_rest(&self) -> bool {
        self.is_alive() && (self.is_damaged() || self.is_wearied())
    }

    /// Take one round of damage, then pay the exertion (one stamina, or one
    /// life when spent). Life never goes below zero.
    pub fn fight(&mut self, enemy_level: i64, opposition: i64, dice: &mut dyn Dice) -> i64 {
        let blow = dice.below((enemy_level / 5).max(2));
        let press = dice.below((opposition - self.stamina).max(2));
        let damage = blow.max(press);
        self.life -= damage;
        if self.has_stamina() {
            self.stamina -= 1;
        } else {
            self.life -= 1;
        }
        self.life = self.life.max(0);
        damage
    }

    /// Passive drain for one clock period: one stamina if any is left,
    /// otherwise one life.
    pub fn update(&mut self) {
        if self.has_stamina() {
            self.stamina -= 1;
        } else {
            self.life = (self.life - 1).max(0);
        }
    }

    /// Recover a tenth (rounded up) of whichever stat is short, capped at max.
    pub fn rest(&mut self) {
        if self.is_damaged() {
            self.life = (self.life + tenth(self.max_life)).min(self.max_life);
        }
        if self.is_wearied() {
            self.stamina = (self.stamina + tenth(self.max_stamina)).min(self.max_stamina);
        }
    }

    /// Full heal, used by the inn.
    pub fn restore(&mut self) {
        self.life = self.max_life;
        self.stamina = self.max_stamina;
    }
}

fn tenth(max: i64) -> i64 {
    (max + 9).div_euclid(10)
}

/// The player's group and everything it carries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Party {
    pub explorers: Vec<Explorer>,

    /// Current depth.
    pub x: i64,
    /// Row the party marker is drawn on.
    pub y: i64,
    /// Left bound of the depth axis.
    pub departure: i64,
    /// Deepest x reached. Never decreases.
    pub frontier: i64,
    /// Right bound of the depth axis.
    pub destination: i64,

    pub food: i64,
    pub oil: i64,
    pub gold: i64,
    /// Loot carried during a run; banked as gold on return.
    pub treasure: i64,
    pub max_food: i64,
    pub max_oil: i64,

    pub score: i64,
    pub level: i64,
    pub battled: bool,
    pub total_battled: i64,
}

impl Party {
    pub fn new(explorers: Vec<Explorer>, food: i64, oil: i64) -> Self {
        Self {
            explorers,
            food,
            max_food: food,
            oil,
            max_oil: oil,
            level: 1,
            ..Self::default()
        }
    }

    pub fn move_left(&mut self) {
        self.x = (self.x - 1).max(self.departure);
    }

    pub fn move_right(&mut self) {
        self.x = (self.x + 1).min(self.destination);
        self.frontier = self.frontier.max(self.x);
    }

    pub fn has_food(&self) -> bool {
        self.food > 0
    }

    pub fn has_oil(&self) -> bool {
        self.oil > 0
    }

    /// Burn one unit of oil for a torch at the party's position.
    pub fn torch(&mut self) -> Option<TorchMarker> {
        if !self.has_oil() {
            return None;
        }
        self.oil -= 1;
        Some(TorchMarker {
            x: self.x,
            y: self.y,
        })
    }

    /// Any explorer hurt or tired, dead ones included.
    pub fn needs_rest(&self) -> bool {
        self.explorers
            .iter()
            .any(|e| e.is_damaged() || e.is_wearied())
    }

    pub fn alive_count(&self) -> usize {
        self.explorers.iter().filter(|e| e.is_alive()).count()
    }

    pub fn is_alive(&self) -> bool {
        self.explorers.iter().any(Explorer::is_alive)
    }

    pub fn is_dead(&self) -> bool {
        !self.is_alive()
    }

    /// One clock period of travel: living explorers eat (one stamina back
    /// while food lasts) and then drain; food goes down by one.
    pub fn update(&mut self) {
        let fed = self.has_food();
        for explorer in self.explorers.iter_mut().filter(|e| e.is_alive()) {
            if fed {
                explorer.stamina += 1;
            }
            explorer.update();
        }
        if fed {
            self.food -= 1;
        }
    }

    /// Rest by torchlight. Needs food; the food itself is not used up.
    pub fn rest(&mut self) {
        if !self.has_food() {
            return;
        }
        for explorer in self.explorers.iter_mut().filter(|e| e.needs_rest()) {
            explorer.rest();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedDice;

    fn party_of(n: usize) -> Party {
        let mut party = Party::new(vec![Explorer::default(); n], 10, 5);
        party.destination = 640;
        party
    }

    #[test]
    fn starving_explorer_without_stamina_dies() {
        let mut party = Party::new(
            vec![Explorer {
                life: 1,
                max_life: 10,
                stamina: 0,
                max_stamina: 10,
            }],
            0,
            0,
        );
        party.update();
        let e = &party.explorers[0];
        assert_eq!(e.life, 0);
        assert!(!e.is_alive());
        assert!(party.is_dead());
    }

    #[test]
    fn fed_explorer_keeps_stamina() {
        let mut party = party_of(2);
        party.update();
        assert_eq!(party.food, 9);
        for e in &party.explorers {
            assert_eq!(e.stamina, 10);
            assert_eq!(e.life, 10);
        }
    }

    #[test]
    fn hungry_explorer_loses_stamina_first() {
        let mut party = Party::new(vec![Explorer::default()], 0, 0);
        party.update();
        assert_eq!(party.explorers[0].stamina, 9);
        assert_eq!(party.explorers[0].life, 10);
        assert_eq!(party.food, 0);
    }

    #[test]
    fn dead_explorers_do_not_drain() {
        let mut party = party_of(2);
        party.explorers[1].life = 0;
        party.food = 0;
        party.update();
        assert_eq!(party.explorers[1].stamina, 10);
        assert_eq!(party.explorers[1].life, 0);
    }

    #[test]
    fn move_right_clamps_to_destination() {
        let mut party = party_of(1);
        party.destination = 3;
        for _ in 0..10 {
            party.move_right();
        }
        assert_eq!(party.x, 3);
        assert_eq!(party.frontier, 3);
    }

    #[test]
    fn move_left_clamps_to_departure() {
        let mut party = party_of(1);
        party.move_left();
        assert_eq!(party.x, 0);
    }

    #[test]
    fn frontier_never_decreases() {
        let mut party = party_of(1);
        let moves = [1, 1, 1, -1, -1, 1, -1, -1, -1, -1, 1, 1, 1, 1];
        let mut last_frontier = 0;
        for m in moves {
            if m > 0 {
                party.move_right();
            } else {
                party.move_left();
            }
            assert!(party.frontier >= last_frontier);
            assert!(party.frontier >= party.x);
            last_frontier = party.frontier;
        }
        assert_eq!(party.frontier, 4);
    }

    #[test]
    fn torch_spends_oil() {
        let mut party = party_of(1);
        party.oil = 1;
        party.x = 12;
        let torch = party.torch();
        assert_eq!(torch, Some(TorchMarker { x: 12, y: 0 }));
        assert_eq!(party.oil, 0);
        assert_eq!(party.torch(), None);
    }

    #[test]
    fn fight_takes_larger_roll_and_exertion() {
        let mut e = Explorer::new(20, 3);
        // blow bound max(2, 10/5) = 2, press bound max(2, 12 - 3) = 9.
        let mut dice = ScriptedDice::new([1, 6]);
        let damage = e.fight(10, 12, &mut dice);
        assert_eq!(damage, 6);
        assert_eq!(dice.requested, vec![2, 9]);
        assert_eq!(e.life, 14);
        assert_eq!(e.stamina, 2);
    }

    #[test]
    fn fight_without_stamina_costs_life_and_floors_at_zero() {
        let mut e = Explorer {
            life: 2,
            max_life: 10,
            stamina: 0,
            max_stamina: 10,
        };
        let mut dice = ScriptedDice::new([1, 5]);
        e.fight(10, 10, &mut dice);
        assert_eq!(e.life, 0);
    }

    #[test]
    fn rest_recovers_a_tenth_rounded_up() {
        let mut e = Explorer::new(15, 10);
        e.life = 3;
        e.stamina = 9;
        e.rest();
        assert_eq!(e.life, 5); // ceil(1.5)
        assert_eq!(e.stamina, 10); // capped
    }

    #[test]
    fn party_rest_needs_food() {
        let mut party = party_of(1);
        party.explorers[0].life = 5;
        party.food = 0;
        party.rest();
        assert_eq!(party.explorers[0].life, 5);
        party.food = 1;
        party.rest();
        assert_eq!(party.explorers[0].life, 6);
        assert_eq!(party.food, 1);
    }
}
