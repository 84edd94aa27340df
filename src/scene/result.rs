use super::{Scene, Services, TitleScene, Transition};
use crate::controller::Controller;
use crate::input::Key;
use crate::menu::Menu;
use crate::score::{ScoreBoard, rank_label};
use crate::ui::{NodeSpec, Theme};

pub const HEADER: &str = "RANK       SCORE       DEPTH";
pub const BACK_LABEL: &str = "Back to title";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultCommand {
    BackToTitle,
}

/// Ranking table, the last submission and a way back to the title.
pub type ScoreList = Menu<ResultCommand>;

/// Build the score list menu from the current board.
pub fn score_list(board: &ScoreBoard, theme: &Theme) -> ScoreList {
    let line = |text: &str| NodeSpec::label(text).themed(theme);
    let rows = board
        .scores()
        .iter()
        .enumerate()
        .map(|(i, score)| line(&format!("{:>4}  {}", rank_label(i), score.row())));
    let table = NodeSpec::container(std::iter::once(line(HEADER)).chain(rows)).at(104.0, 24.0);
    let last = board.last().map(|s| s.detail()).unwrap_or_default();
    let detail = NodeSpec::container([line(&last)]).at(104.0, 352.0);
    let back = NodeSpec::button(BACK_LABEL).themed(theme).at(440.0, 388.0);

    let mut menu = Menu::new(NodeSpec::container([table, detail, back]));
    if let Some(id) = menu.entry(0) {
        menu.on_confirm(id, ResultCommand::BackToTitle);
    }
    menu
}

pub struct ResultScene {
    list: ScoreList,
    controller: Controller<ScoreList>,
}

impl ResultScene {
    pub fn new(board: &ScoreBoard, theme: &Theme) -> Self {
        Self {
            list: score_list(board, theme),
            controller: Controller::new(),
        }
    }
}

impl Scene for ResultScene {
    fn name(&self) -> &'static str {
        "result"
    }

    fn init(&mut self, cx: &mut Services<'_>) {
        let repeat = cx.config.menu_repeat;
        cx.set_key_repeat(self.controller.bindings(), &[Key::Down, Key::Up], repeat);
    }

    fn update(&mut self, cx: &mut Services<'_>) -> Transition {
        self.controller
            .update(&mut self.list, &*cx.input, &mut *cx.dice);
        self.list.draw(&mut *cx.surface);

        if self.list.take_commands().contains(&ResultCommand::BackToTitle) {
            Transition::Switch(Box::new(TitleScene::new(cx.theme)))
        } else {
            Transition::Continue
        }
    }
}
