use crate::controller::{KeyHandlers, Model};
use crate::input::Key;
use crate::ui::{EventKind, NodeSpec, Surface, WidgetId, WidgetTree};

/// A widget tree with a navigable root container.
///
/// Up/Down move the root cursor. Every key the menu accepts is pushed into
/// the tree as a Push event; commands emitted by button handlers queue up
/// until the owner drains them with `take_commands`.
pub struct Menu<C> {
    tree: WidgetTree<C>,
    root: WidgetId,
    outbox: Vec<C>,
}

impl<C: 'static> Menu<C> {
    pub fn new(spec: NodeSpec<C>) -> Self {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(spec);
        tree.add_event_handler(root, EventKind::Push, |key, ctx| match key {
            Key::Up => {
                ctx.backward_cursor();
                true
            }
            Key::Down => {
                ctx.forward_cursor();
                true
            }
            _ => false,
        });
        tree.relayout(root);
        Self {
            tree,
            root,
            outbox: Vec::new(),
        }
    }

    pub fn root(&self) -> WidgetId {
        self.root
    }

    pub fn tree(&self) -> &WidgetTree<C> {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut WidgetTree<C> {
        &mut self.tree
    }

    /// The `index`-th selectable entry of the root container.
    pub fn entry(&self, index: usize) -> Option<WidgetId> {
        self.tree.selectable_children(self.root).get(index).copied()
    }

    /// Make `id` emit `command` when Z is pushed on it.
    ///
    /// # Panics
    /// If `id` is not Controllable.
    pub fn on_confirm(&mut self, id: WidgetId, command: C)
    where
        C: Clone,
    {
        self.tree.add_event_handler(id, EventKind::Push, move |key, ctx| {
            if key == Key::Z {
                ctx.emit(command.clone());
                true
            } else {
                false
            }
        });
    }

    /// Feed a pushed key to the tree. Returns whether it was consumed.
    pub fn push(&mut self, key: Key) -> bool {
        self.tree
            .handle_event(self.root, EventKind::Push, key, &mut self.outbox)
    }

    pub fn take_commands(&mut self) -> Vec<C> {
        std::mem::take(&mut self.outbox)
    }

    pub fn cursor(&self) -> usize {
        self.tree.cursor(self.root).unwrap_or(0)
    }

    pub fn selected_text(&self) -> Option<&str> {
        self.tree
            .selected(self.root)
            .and_then(|id| self.tree.text(id))
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        self.tree.draw(surface);
    }
}

/// A model whose keys drive a `Menu`.
pub trait MenuModel: Sized {
    type Command: 'static;

    fn menu_mut(&mut self) -> &mut Menu<Self::Command>;
}

/// Up/Down/Z/X pushes forwarded to the model's menu.
pub fn menu_key_handlers<T: MenuModel>() -> KeyHandlers<T> {
    KeyHandlers::<T>::new()
        .on_push(Key::Up, |m, _| m.menu_mut().push(Key::Up))
        .on_push(Key::Down, |m, _| m.menu_mut().push(Key::Down))
        .on_push(Key::Z, |m, _| m.menu_mut().push(Key::Z))
        .on_push(Key::X, |m, _| m.menu_mut().push(Key::X))
}

impl<C: 'static> MenuModel for Menu<C> {
    type Command = C;

    fn menu_mut(&mut self) -> &mut Menu<C> {
        self
    }
}

impl<C: 'static> Model for Menu<C> {
    fn key_handlers() -> KeyHandlers<Self> {
        menu_key_handlers()
    }

    fn idle(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Controller;
    use crate::input::KeyboardState;
    use crate::rng::ScriptedDice;
    use winit::keyboard::KeyCode;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Pick {
        First,
        Second,
    }

    fn two_entry_menu() -> Menu<Pick> {
        let mut menu = Menu::new(
            NodeSpec::container([
                NodeSpec::label("Pick one").font_size(16),
                NodeSpec::button("first").font_size(16),
                NodeSpec::button("second").font_size(16),
            ])
            .at(100.0, 100.0),
        );
        let first = menu.entry(0).expect("first entry");
        let second = menu.entry(1).expect("second entry");
        menu.on_confirm(first, Pick::First);
        menu.on_confirm(second, Pick::Second);
        menu
    }

    #[test]
    fn confirm_emits_selected_command() {
        let mut menu = two_entry_menu();
        assert!(menu.push(Key::Z));
        assert!(menu.push(Key::Down));
        assert!(menu.push(Key::Z));
        assert_eq!(menu.take_commands(), vec![Pick::First, Pick::Second]);
        assert!(menu.take_commands().is_empty());
    }

    #[test]
    fn cancel_is_not_consumed_by_plain_buttons() {
        let mut menu = two_entry_menu();
        assert!(!menu.push(Key::X));
        assert!(menu.take_commands().is_empty());
    }

    #[test]
    fn up_wraps_to_last_entry() {
        let mut menu = two_entry_menu();
        menu.push(Key::Up);
        assert_eq!(menu.cursor(), 1);
        assert_eq!(menu.selected_text(), Some("second"));
    }

    #[test]
    fn controller_drives_menu() {
        let controller: Controller<Menu<Pick>> = Controller::new();
        let mut menu = two_entry_menu();
        let mut input = KeyboardState::new();
        let mut dice = ScriptedDice::zeros();

        input.press(KeyCode::ArrowDown);
        assert!(controller.update(&mut menu, &input, &mut dice));
        input.end_frame();
        input.release(KeyCode::ArrowDown);
        input.press(KeyCode::KeyZ);
        assert!(controller.update(&mut menu, &input, &mut dice));
        assert_eq!(menu.take_commands(), vec![Pick::Second]);
    }

    #[test]
    fn selected_entry_is_marked_when_drawn() {
        let menu = two_entry_menu();
        let mut dl = crate::ui::DrawList::new();
        menu.draw(&mut dl);
        assert!(dl.has_text("Pick one"));
        assert_eq!(dl.sprites.len(), 1);
    }
}
