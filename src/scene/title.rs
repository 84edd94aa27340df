use super::{IntermissionScene, ResultScene, Scene, Services, Transition};
use crate::controller::Controller;
use crate::input::Key;
use crate::intermission::Intermission;
use crate::menu::Menu;
use crate::ui::{NodeSpec, Sprite, Theme};

pub const START_LABEL: &str = "Start";
pub const SCORES_LABEL: &str = "Scores";
pub const QUIT_LABEL: &str = "Quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleCommand {
    Start,
    Scores,
    Quit,
}

pub struct TitleScene {
    menu: Menu<TitleCommand>,
    controller: Controller<Menu<TitleCommand>>,
}

impl Default for TitleScene {
    fn default() -> Self {
        Self::new(&Theme::default())
    }
}

impl TitleScene {
    pub fn new(theme: &Theme) -> Self {
        let entry = |text: &str| NodeSpec::button(text).themed(theme);
        let mut menu = Menu::new(
            NodeSpec::container([entry(START_LABEL), entry(SCORES_LABEL), entry(QUIT_LABEL)])
                .at(280.0, 320.0),
        );
        let commands = [TitleCommand::Start, TitleCommand::Scores, TitleCommand::Quit];
        for (index, command) in commands.into_iter().enumerate() {
            if let Some(id) = menu.entry(index) {
                menu.on_confirm(id, command);
            }
        }
        Self {
            menu,
            controller: Controller::new(),
        }
    }
}

impl Scene for TitleScene {
    fn name(&self) -> &'static str {
        "title"
    }

    fn init(&mut self, cx: &mut Services<'_>) {
        let repeat = cx.config.menu_repeat;
        cx.set_key_repeat(self.controller.bindings(), &[Key::Down, Key::Up], repeat);
    }

    fn update(&mut self, cx: &mut Services<'_>) -> Transition {
        self.controller.update(&mut self.menu, &*cx.input, &mut *cx.dice);
        cx.surface.draw_sprite(0.0, 0.0, 0, Sprite::TitleBackground);
        self.menu.draw(&mut *cx.surface);

        let mut next = Transition::Continue;
        for command in self.menu.take_commands() {
            next = match command {
                TitleCommand::Start => {
                    let town = Intermission::new(cx.config.new_party(), cx.theme);
                    Transition::Switch(Box::new(IntermissionScene::new(town, cx.theme)))
                }
                TitleCommand::Scores => {
                    Transition::Switch(Box::new(ResultScene::new(cx.scores, cx.theme)))
                }
                TitleCommand::Quit => Transition::Exit,
            };
        }
        next
    }
}
