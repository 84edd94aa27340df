use super::{IntermissionScene, ResultScene, Scene, Services, Transition};
use crate::controller::Controller;
use crate::exploration::{Exploration, ExplorationSignal};
use crate::input::Key;
use crate::intermission::Intermission;
use crate::score::Score;
use crate::ui::Theme;
use crate::view::ExplorationView;

pub struct ExplorationScene {
    run: Option<Exploration>,
    view: ExplorationView,
    controller: Controller<Exploration>,
}

impl ExplorationScene {
    pub fn new(run: Exploration, theme: &Theme) -> Self {
        Self {
            run: Some(run),
            view: ExplorationView::new(theme),
            controller: Controller::new(),
        }
    }
}

impl Scene for ExplorationScene {
    fn name(&self) -> &'static str {
        "exploration"
    }

    fn init(&mut self, cx: &mut Services<'_>) {
        let repeat = cx.config.walk_repeat;
        cx.set_key_repeat(self.controller.bindings(), &[Key::Left, Key::Right], repeat);
    }

    fn update(&mut self, cx: &mut Services<'_>) -> Transition {
        let Some(run) = self.run.as_mut() else {
            return Transition::Continue;
        };
        self.controller.update(run, &*cx.input, &mut *cx.dice);
        run.update();
        self.view.draw(run, &mut *cx.surface);

        match run.take_signal() {
            None => Transition::Continue,
            Some(ExplorationSignal::ReturnToTown) => {
                let Some(run) = self.run.take() else {
                    return Transition::Continue;
                };
                let town = Intermission::new(run.finish(), cx.theme);
                Transition::Switch(Box::new(IntermissionScene::new(town, cx.theme)))
            }
            Some(ExplorationSignal::GameOver) => {
                let party = &run.party;
                let score = Score::new(party.score, party.frontier);
                if cx.scores.register(score).is_some()
                    && let Err(e) = cx.scores.save()
                {
                    log::warn!("could not save scores: {e}");
                }
                Transition::Switch(Box::new(ResultScene::new(cx.scores, cx.theme)))
            }
        }
    }
}
