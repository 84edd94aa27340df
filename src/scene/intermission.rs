use super::{ExplorationScene, Scene, Services, Transition};
use crate::controller::Controller;
use crate::exploration::Exploration;
use crate::input::Key;
use crate::intermission::{Intermission, TownCommand};
use crate::ui::Theme;
use crate::view::IntermissionView;

pub struct IntermissionScene {
    town: Intermission,
    view: IntermissionView,
    controller: Controller<Intermission>,
}

impl IntermissionScene {
    pub fn new(town: Intermission, theme: &Theme) -> Self {
        Self {
            town,
            view: IntermissionView::new(theme),
            controller: Controller::new(),
        }
    }

    pub fn town(&self) -> &Intermission {
        &self.town
    }
}

impl Scene for IntermissionScene {
    fn name(&self) -> &'static str {
        "intermission"
    }

    fn init(&mut self, cx: &mut Services<'_>) {
        let repeat = cx.config.menu_repeat;
        cx.set_key_repeat(self.controller.bindings(), &[Key::Down, Key::Up], repeat);
    }

    fn update(&mut self, cx: &mut Services<'_>) -> Transition {
        self.controller
            .update(&mut self.town, &*cx.input, &mut *cx.dice);

        let mut explore = false;
        for command in self.town.take_commands() {
            match command {
                TownCommand::Inn => {
                    self.town.inn(&mut *cx.dice);
                }
                TownCommand::BuyFood => {
                    self.town.buy_food();
                }
                TownCommand::BuyOil => {
                    self.town.buy_oil();
                }
                TownCommand::Explore => explore = true,
            }
        }
        self.view.draw(&self.town, &mut *cx.surface);

        if !explore {
            return Transition::Continue;
        }
        let party = std::mem::take(&mut self.town.party);
        let run = Exploration::new(party, cx.config.destination());
        Transition::Switch(Box::new(ExplorationScene::new(run, cx.theme)))
    }
}
