use std::collections::HashMap;

use winit::keyboard::KeyCode;

/// Semantic keys the game reacts to. Models bind handlers to these,
/// never to physical key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    /// Confirm / act.
    Z,
    /// Cancel.
    X,
    C,
}

impl Key {
    /// Fixed dispatch order used by the controller.
    pub const ALL: [Key; 7] = [
        Key::Up,
        Key::Left,
        Key::Down,
        Key::Right,
        Key::Z,
        Key::X,
        Key::C,
    ];
}

/// Physical key → semantic key map.
pub struct KeyBindings {
    map: HashMap<KeyCode, Key>,
    /// Reverse lookup: key → physical code, in `Key::ALL` order.
    ordered: Vec<(Key, KeyCode)>,
}

impl KeyBindings {
    /// Arrow keys plus Z/X/C.
    pub fn defaults() -> Self {
        Self::from_pairs([
            (KeyCode::ArrowUp, Key::Up),
            (KeyCode::ArrowLeft, Key::Left),
            (KeyCode::ArrowDown, Key::Down),
            (KeyCode::ArrowRight, Key::Right),
            (KeyCode::KeyZ, Key::Z),
            (KeyCode::KeyX, Key::X),
            (KeyCode::KeyC, Key::C),
        ])
    }

    /// Build from `(code, key)` pairs. When several codes map to one key,
    /// the first pair listed is its reverse lookup.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (KeyCode, Key)>) -> Self {
        let pairs: Vec<(KeyCode, Key)> = pairs.into_iter().collect();
        let ordered = Self::build_ordered(&pairs);
        let map = pairs.into_iter().collect();
        Self { map, ordered }
    }

    /// Look up the semantic key for a physical key.
    pub fn lookup(&self, code: KeyCode) -> Option<Key> {
        self.map.get(&code).copied()
    }

    /// Physical code bound to `key`.
    pub fn code_for(&self, key: Key) -> Option<KeyCode> {
        self.ordered
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, code)| *code)
    }

    /// Bound pairs in dispatch order.
    pub fn iter(&self) -> impl Iterator<Item = (Key, KeyCode)> + '_ {
        self.ordered.iter().copied()
    }

    fn build_ordered(pairs: &[(KeyCode, Key)]) -> Vec<(Key, KeyCode)> {
        Key::ALL
            .iter()
            .filter_map(|&key| {
                pairs
                    .iter()
                    .find(|(_, k)| *k == key)
                    .map(|&(code, _)| (key, code))
            })
            .collect()
    }
}

/// Per-frame keyboard queries the core needs from the platform.
pub trait InputSource {
    /// Freshly pressed this frame, or an auto-repeat pulse of a held key.
    fn is_pushed(&self, code: KeyCode) -> bool;
    /// Currently held.
    fn is_down(&self, code: KeyCode) -> bool;
    /// Auto-repeat policy for `code`: first repeat after `delay` frames,
    /// then every `interval` frames. Set once at scene entry.
    fn set_key_repeat(&mut self, code: KeyCode, delay: u32, interval: u32);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Repeat {
    delay: u32,
    interval: u32,
}

/// Frame-stepped keyboard state fed by window events.
///
/// `press`/`release` record events as they arrive; `end_frame` advances
/// held-key counters after the frame's update has read them.
#[derive(Debug, Default)]
pub struct KeyboardState {
    /// Frames each held key has been down (0 = pressed this frame).
    held: HashMap<KeyCode, u32>,
    repeat: HashMap<KeyCode, Repeat>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, code: KeyCode) {
        // OS key repeat delivers extra presses, keep the original counter.
        self.held.entry(code).or_insert(0);
    }

    pub fn release(&mut self, code: KeyCode) {
        self.held.remove(&code);
    }

    pub fn end_frame(&mut self) {
        for frames in self.held.values_mut() {
            *frames = frames.saturating_add(1);
        }
    }

    pub fn release_all(&mut self) {
        self.held.clear();
    }
}

impl InputSource for KeyboardState {
    fn is_pushed(&self, code: KeyCode) -> bool {
        let Some(&frames) = self.held.get(&code) else {
            return false;
        };
        if frames == 0 {
            return true;
        }
        match self.repeat.get(&code) {
            Some(r) if r.interval > 0 && frames >= r.delay => (frames - r.delay) % r.interval == 0,
            _ => false,
        }
    }

    fn is_down(&self, code: KeyCode) -> bool {
        self.held.contains_key(&code)
    }

    fn set_key_repeat(&mut self, code: KeyCode, delay: u32, interval: u32) {
        self.repeat.insert(code, Repeat { delay, interval });
    }
}
