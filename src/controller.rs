use std::collections::HashMap;

use crate::input::{InputSource, Key, KeyBindings};
use crate::rng::Dice;

/// Key handler: returns true if the key did something this frame.
pub type KeyHandler<M> = fn(&mut M, &mut dyn Dice) -> bool;

/// Which semantic keys a model accepts, and what to call for each.
/// A key without an entry is simply not accepted.
pub struct KeyHandlers<M> {
    pushed: HashMap<Key, KeyHandler<M>>,
    pressed: HashMap<Key, KeyHandler<M>>,
}

impl<M> Default for KeyHandlers<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> KeyHandlers<M> {
    pub fn new() -> Self {
        Self {
            pushed: HashMap::new(),
            pressed: HashMap::new(),
        }
    }

    /// Handler for a key pushed this frame.
    pub fn on_push(mut self, key: Key, handler: KeyHandler<M>) -> Self {
        self.pushed.insert(key, handler);
        self
    }

    /// Handler for a held key.
    pub fn on_press(mut self, key: Key, handler: KeyHandler<M>) -> Self {
        self.pressed.insert(key, handler);
        self
    }

    pub fn accepts_push(&self, key: Key) -> bool {
        self.pushed.contains_key(&key)
    }

    pub fn accepts_press(&self, key: Key) -> bool {
        self.pressed.contains_key(&key)
    }
}

/// A model the controller can drive.
pub trait Model: Sized {
    fn key_handlers() -> KeyHandlers<Self>;

    /// Called on frames where no key did anything.
    fn idle(&mut self);
}

/// Routes keyboard state to a model's key handlers once per frame.
pub struct Controller<M> {
    handlers: KeyHandlers<M>,
    bindings: KeyBindings,
}

impl<M: Model> Default for Controller<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Model> Controller<M> {
    pub fn new() -> Self {
        Self::with_bindings(KeyBindings::defaults())
    }

    pub fn with_bindings(bindings: KeyBindings) -> Self {
        Self {
            handlers: M::key_handlers(),
            bindings,
        }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Walk the bound keys in order. A pushed key with a push handler runs
    /// it; otherwise a held key with a press handler runs that. The walk
    /// stops at the first handler that reports true. If none does, the
    /// model's idle hook runs. Returns whether any handler reported true.
    pub fn update(&self, model: &mut M, input: &dyn InputSource, dice: &mut dyn Dice) -> bool {
        for (key, code) in self.bindings.iter() {
            let handler = if input.is_pushed(code) && self.handlers.accepts_push(key) {
                self.handlers.pushed.get(&key)
            } else if input.is_down(code) && self.handlers.accepts_press(key) {
                self.handlers.pressed.get(&key)
            } else {
                None
            };
            if let Some(handler) = handler
                && handler(&mut *model, &mut *dice)
            {
                return true;
            }
        }
        model.idle();
        false
    }
}
