use crate::controller::{KeyHandlers, Model};
use crate::menu::{Menu, MenuModel, menu_key_handlers};
use crate::party::Party;
use crate::rng::Dice;
use crate::ui::NodeSpec;
use crate::ui::Theme;

pub const INN_COST: i64 = 200;
pub const FOOD_COST: i64 = 20;
pub const OIL_COST: i64 = 100;

pub const INN_LABEL: &str = "Stay at the inn";
pub const FOOD_LABEL: &str = "Buy food";
pub const OIL_LABEL: &str = "Buy oil";
pub const EXPLORE_LABEL: &str = "Set out!";

/// Row the explore entry is pinned to, apart from the shop entries.
const EXPLORE_Y: f32 = 420.0;

/// Town menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TownCommand {
    Inn,
    BuyFood,
    BuyOil,
    Explore,
}

impl TownCommand {
    /// In menu order.
    pub const ALL: [TownCommand; 4] = [
        TownCommand::Inn,
        TownCommand::BuyFood,
        TownCommand::BuyOil,
        TownCommand::Explore,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TownCommand::Inn => INN_LABEL,
            TownCommand::BuyFood => FOOD_LABEL,
            TownCommand::BuyOil => OIL_LABEL,
            TownCommand::Explore => EXPLORE_LABEL,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

/// The town between runs: rest, restock, set out.
pub struct Intermission {
    pub party: Party,
    menu: Menu<TownCommand>,
}

impl Intermission {
    pub fn new(party: Party, theme: &Theme) -> Self {
        let entries = TownCommand::ALL.map(|c| NodeSpec::button(c.label()).themed(theme));
        let mut menu = Menu::new(NodeSpec::container(entries).at(48.0, 176.0));
        for (index, command) in TownCommand::ALL.into_iter().enumerate() {
            if let Some(id) = menu.entry(index) {
                menu.on_confirm(id, command);
            }
        }
        if let Some(explore) = menu.entry(TownCommand::ALL.len() - 1) {
            let x = menu.tree().get(explore).map_or(48.0, |n| n.rect.x);
            menu.tree_mut().set_position(explore, x, EXPLORE_Y);
        }
        Self { party, menu }
    }

    pub fn menu(&self) -> &Menu<TownCommand> {
        &self.menu
    }

    pub fn take_commands(&mut self) -> Vec<TownCommand> {
        self.menu.take_commands()
    }

    /// Entry under the cursor.
    pub fn selected(&self) -> Option<TownCommand> {
        self.menu.selected_text().and_then(TownCommand::from_label)
    }

    /// Level the party up if it fought enough, then heal everyone for a
    /// single fee. Needs `INN_COST` gold and something to do.
    pub fn inn(&mut self, dice: &mut dyn Dice) -> bool {
        let party = &mut self.party;
        if party.gold < INN_COST || !(party.needs_rest() || party.battled) {
            return false;
        }

        let threshold = party.level * party.level;
        if party.battled && party.total_battled > threshold {
            let rounds = party.total_battled - threshold;
            for _ in 0..rounds {
                for explorer in &mut party.explorers {
                    explorer.max_life += dice.below(11) / 7;
                    explorer.max_stamina += dice.below(15) / 11;
                }
                party.level += 1;
            }
            party.battled = false;
            log::debug!("party grew {rounds} levels to {}", party.level);
        }

        if party.needs_rest() {
            for explorer in &mut party.explorers {
                explorer.restore();
            }
            party.gold -= INN_COST;
            log::debug!("stayed at the inn, {} gold left", party.gold);
        }
        true
    }

    pub fn buy_food(&mut self) -> bool {
        let party = &mut self.party;
        if party.gold < FOOD_COST || party.food >= party.max_food {
            return false;
        }
        party.gold -= FOOD_COST;
        party.food += 1;
        log::debug!("bought food ({}/{})", party.food, party.max_food);
        true
    }

    pub fn buy_oil(&mut self) -> bool {
        let party = &mut self.party;
        if party.gold < OIL_COST || party.oil >= party.max_oil {
            return false;
        }
        party.gold -= OIL_COST;
        party.oil += 1;
        log::debug!("bought oil ({}/{})", party.oil, party.max_oil);
        true
    }

    /// How many more units of the selected supply fit, for shop entries.
    pub fn capacity(&self, command: TownCommand) -> Option<i64> {
        match command {
            TownCommand::BuyFood => Some((self.party.max_food - self.party.food).max(0)),
            TownCommand::BuyOil => Some((self.party.max_oil - self.party.oil).max(0)),
            TownCommand::Inn | TownCommand::Explore => None,
        }
    }
}

impl MenuModel for Intermission {
    type Command = TownCommand;

    fn menu_mut(&mut self) -> &mut Menu<TownCommand> {
        &mut self.menu
    }
}

impl Model for Intermission {
    fn key_handlers() -> KeyHandlers<Self> {
        menu_key_handlers()
    }

    fn idle(&mut self) {}
}
