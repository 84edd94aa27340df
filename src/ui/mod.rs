pub mod draw;
mod theme;
mod widget;

use std::collections::HashMap;

pub use draw::{DrawList, FontCache, FontId, FontSpec, Rgba, Sprite, Surface, TextCommand};
pub use theme::{Theme, hex, hex_a};
pub use widget::{CursorStep, EventCtx, EventKind, Handler, NodeSpec, Sizing, Text, Widget};

use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;

use crate::input::Key;

new_key_type! {
    /// Handle into the widget arena. Stable across insertions/removals.
    pub struct WidgetId;
}

/// Approximate glyph advance as a fraction of the font size.
const GLYPH_ADVANCE: f32 = 0.6;

// ---------------------------------------------------------------------------
// Geometry primitives
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// How a node is drawn this frame, decided by its parent container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visual {
    Plain,
    /// Under the cursor but not focussed.
    Selected,
    Focussed,
}

// ---------------------------------------------------------------------------
// Widget node (arena entry)
// ---------------------------------------------------------------------------

/// Child list and cursor of a Containable node.
#[derive(Debug, Clone, Default)]
pub struct Children {
    pub ids: Vec<WidgetId>,
    /// Index into the selectable subsequence of `ids`.
    pub cursor: usize,
}

/// Arena entry pairing a widget with its optional capability components.
pub struct WidgetNode<M> {
    pub widget: Widget,
    pub parent: Option<WidgetId>,
    /// Explicit position. `None` = placed by the parent's flow.
    pub at: Option<(f32, f32)>,
    pub z: i32,
    pub margin: f32,
    pub padding: f32,
    pub bg_color: Rgba,
    pub width: Sizing,
    pub height: Sizing,
    /// Computed layout rect (set by relayout).
    pub rect: Rect,
    /// Describable.
    pub text: Option<Text>,
    /// Focussable: `Some(focus)`.
    pub focus: Option<bool>,
    /// Controllable.
    handlers: Option<HashMap<EventKind, Handler<M>>>,
    /// Containable.
    pub children: Option<Children>,
}

impl<M> WidgetNode<M> {
    pub fn is_controllable(&self) -> bool {
        self.handlers.is_some()
    }

    pub fn has_handler(&self, kind: EventKind) -> bool {
        self.handlers
            .as_ref()
            .is_some_and(|table| table.contains_key(&kind))
    }

    fn text_size(&self) -> (f32, f32) {
        match &self.text {
            Some(t) => {
                let size = t.font.size as f32;
                let width = if t.text.is_empty() {
                    size
                } else {
                    t.text.chars().count() as f32 * size * GLYPH_ADVANCE
                };
                (width, size)
            }
            None => (0.0, 0.0),
        }
    }
}

// ---------------------------------------------------------------------------
// WidgetTree
// ---------------------------------------------------------------------------

/// Arena-backed retained widget tree. `M` is the command type handlers emit.
pub struct WidgetTree<M> {
    arena: SlotMap<WidgetId, WidgetNode<M>>,
    roots: Vec<WidgetId>,
}

impl<M> Default for WidgetTree<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> WidgetTree<M> {
    pub fn new() -> Self {
        Self {
            arena: SlotMap::with_key(),
            roots: Vec::new(),
        }
    }

    /// Build `spec` as a new root (no parent). Returns the root's id.
    pub fn insert_root(&mut self, spec: NodeSpec<M>) -> WidgetId {
        let id = self.build(None, spec);
        self.roots.push(id);
        id
    }

    /// Build `spec` and append it as the last child of `parent`.
    ///
    /// # Panics
    /// If `parent` is not a container.
    pub fn insert(&mut self, parent: WidgetId, spec: NodeSpec<M>) -> WidgetId {
        assert!(
            self.arena
                .get(parent)
                .is_some_and(|p| p.children.is_some()),
            "insert target is not a container"
        );
        let id = self.build(Some(parent), spec);
        if let Some(children) = self.arena.get_mut(parent).and_then(|p| p.children.as_mut()) {
            children.ids.push(id);
        }
        id
    }

    fn build(&mut self, parent: Option<WidgetId>, spec: NodeSpec<M>) -> WidgetId {
        let NodeSpec {
            widget,
            text,
            at,
            z,
            margin,
            padding,
            bg_color,
            width,
            height,
            handlers,
            children,
        } = spec;

        let id = self.arena.insert(WidgetNode {
            widget,
            parent,
            at,
            z,
            margin,
            padding,
            bg_color,
            width,
            height,
            rect: Rect {
                x: at.map_or(0.0, |(x, _)| x),
                y: at.map_or(0.0, |(_, y)| y),
                width: 0.0,
                height: 0.0,
            },
            text,
            focus: widget.is_focussable().then_some(false),
            handlers: widget
                .is_controllable()
                .then(|| handlers.into_iter().collect()),
            children: widget.is_container().then(Children::default),
        });

        let child_ids: Vec<WidgetId> = children
            .into_iter()
            .map(|child| self.build(Some(id), child))
            .collect();
        if let Some(list) = self.arena.get_mut(id).and_then(|n| n.children.as_mut()) {
            list.ids = child_ids;
        }
        id
    }

    /// Remove a widget and all its descendants. The parent's cursor is
    /// pulled back into range.
    pub fn remove(&mut self, id: WidgetId) {
        let mut to_remove = Vec::new();
        Self::collect_subtree(&self.arena, id, &mut to_remove);

        let parent = self.arena.get(id).and_then(|n| n.parent);
        if let Some(parent_id) = parent
            && let Some(list) = self
                .arena
                .get_mut(parent_id)
                .and_then(|p| p.children.as_mut())
        {
            list.ids.retain(|c| *c != id);
        }
        self.roots.retain(|r| *r != id);

        for rid in to_remove {
            self.arena.remove(rid);
        }

        if let Some(parent_id) = parent {
            let count = self.selectable_children(parent_id).len();
            if let Some(list) = self
                .arena
                .get_mut(parent_id)
                .and_then(|p| p.children.as_mut())
                && list.cursor >= count
            {
                list.cursor = 0;
            }
        }
    }

    fn collect_subtree(
        arena: &SlotMap<WidgetId, WidgetNode<M>>,
        id: WidgetId,
        out: &mut Vec<WidgetId>,
    ) {
        out.push(id);
        if let Some(list) = arena.get(id).and_then(|n| n.children.as_ref()) {
            for &child in &list.ids {
                Self::collect_subtree(arena, child, out);
            }
        }
    }

    pub fn get(&self, id: WidgetId) -> Option<&WidgetNode<M>> {
        self.arena.get(id)
    }

    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut WidgetNode<M>> {
        self.arena.get_mut(id)
    }

    pub fn roots(&self) -> &[WidgetId] {
        &self.roots
    }

    /// All children of a container, selectable or not.
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.arena
            .get(id)
            .and_then(|n| n.children.as_ref())
            .map_or(&[], |list| list.ids.as_slice())
    }

    /// Text of a Describable node.
    pub fn text(&self, id: WidgetId) -> Option<&str> {
        self.arena
            .get(id)?
            .text
            .as_ref()
            .map(|t| t.text.as_str())
    }

    /// Move a node to an explicit position, taking it out of its parent's flow.
    pub fn set_position(&mut self, id: WidgetId, x: f32, y: f32) {
        if let Some(node) = self.arena.get_mut(id) {
            node.at = Some((x, y));
            node.rect.x = x;
            node.rect.y = y;
        }
    }

    // ------------------------------------------------------------------
    // Capabilities
    // ------------------------------------------------------------------

    /// A node is selectable when it is Controllable and, for containers,
    /// has at least one selectable child.
    pub fn is_selectable(&self, id: WidgetId) -> bool {
        let Some(node) = self.arena.get(id) else {
            return false;
        };
        if !node.is_controllable() {
            return false;
        }
        match &node.children {
            Some(list) => list.ids.iter().any(|&c| self.is_selectable(c)),
            None => true,
        }
    }

    pub fn is_focussed(&self, id: WidgetId) -> bool {
        self.arena
            .get(id)
            .and_then(|n| n.focus)
            .unwrap_or(false)
    }

    /// # Panics
    /// If the node is not Focussable.
    pub fn set_focus(&mut self, id: WidgetId, focus: bool) {
        match self.arena.get_mut(id).map(|n| &mut n.focus) {
            Some(Some(state)) => *state = focus,
            _ => panic!("set_focus on a node that is not focussable"),
        }
    }

    /// Register (or replace) the handler for `kind`.
    ///
    /// # Panics
    /// If the node is not Controllable.
    pub fn add_event_handler(
        &mut self,
        id: WidgetId,
        kind: EventKind,
        handler: impl FnMut(Key, &mut EventCtx<'_, M>) -> bool + 'static,
    ) {
        match self.arena.get_mut(id).and_then(|n| n.handlers.as_mut()) {
            Some(table) => {
                table.insert(kind, Box::new(handler));
            }
            None => panic!("add_event_handler on a node that is not controllable"),
        }
    }

    // ------------------------------------------------------------------
    // Cursor
    // ------------------------------------------------------------------

    /// Selectable children of a container, in child order.
    pub fn selectable_children(&self, id: WidgetId) -> SmallVec<[WidgetId; 8]> {
        self.children(id)
            .iter()
            .copied()
            .filter(|&c| self.is_selectable(c))
            .collect()
    }

    /// The selectable child under the cursor.
    pub fn selected(&self, id: WidgetId) -> Option<WidgetId> {
        let cursor = self.cursor(id)?;
        self.selectable_children(id).get(cursor).copied()
    }

    pub fn cursor(&self, id: WidgetId) -> Option<usize> {
        self.arena.get(id)?.children.as_ref().map(|l| l.cursor)
    }

    pub fn forward_cursor(&mut self, id: WidgetId) {
        self.step_cursor(id, CursorStep::Forward);
    }

    pub fn backward_cursor(&mut self, id: WidgetId) {
        self.step_cursor(id, CursorStep::Backward);
    }

    /// Move the cursor one selectable child, wrapping at both ends.
    /// No-op without selectable children.
    fn step_cursor(&mut self, id: WidgetId, step: CursorStep) {
        let count = self.selectable_children(id).len();
        if count == 0 {
            return;
        }
        if let Some(list) = self.arena.get_mut(id).and_then(|n| n.children.as_mut()) {
            list.cursor = match step {
                CursorStep::Forward => (list.cursor + 1) % count,
                CursorStep::Backward => (list.cursor + count - 1) % count,
            };
        }
    }

    // ------------------------------------------------------------------
    // Event dispatch
    // ------------------------------------------------------------------

    /// Dispatch an event at `id`. Returns true if it was consumed.
    ///
    /// A container whose selected child is focussed skips its own table,
    /// otherwise it tries its own table first. Unconsumed events go on to
    /// the selected child. Commands emitted by handlers land in `outbox`.
    pub fn handle_event(
        &mut self,
        id: WidgetId,
        kind: EventKind,
        key: Key,
        outbox: &mut Vec<M>,
    ) -> bool {
        let Some(node) = self.arena.get(id) else {
            return false;
        };
        if node.children.is_none() {
            return self.run_handler(id, kind, key, outbox);
        }

        let Some(selected) = self.selected(id) else {
            return false;
        };
        let mut consumed = false;
        if !self.is_focussed(selected) {
            consumed = self.run_handler(id, kind, key, outbox);
        }
        if !consumed {
            consumed = self.handle_event(selected, kind, key, outbox);
        }
        consumed
    }

    fn run_handler(&mut self, id: WidgetId, kind: EventKind, key: Key, outbox: &mut Vec<M>) -> bool {
        // Take the handler out so it can run while the tree is borrowed.
        let Some(mut handler) = self
            .arena
            .get_mut(id)
            .and_then(|n| n.handlers.as_mut())
            .and_then(|table| table.remove(&kind))
        else {
            return false;
        };

        let mut ctx = EventCtx::new(outbox);
        let consumed = handler(key, &mut ctx);
        let steps = std::mem::take(&mut ctx.steps);

        if let Some(table) = self.arena.get_mut(id).and_then(|n| n.handlers.as_mut()) {
            table.entry(kind).or_insert(handler);
        }
        for step in steps {
            self.step_cursor(id, step);
        }
        consumed
    }

    // ------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------

    /// Stack children of `id` vertically, recursing into nested containers.
    ///
    /// Flowed children get `x = parent.x + padding + margin` and
    /// `y = offset + margin`, where the offset starts at
    /// `parent.y + 2 * padding` and advances by
    /// `height + margin + 2 * padding` of each flowed child. Children with
    /// an explicit position keep it and do not advance the offset.
    pub fn relayout(&mut self, id: WidgetId) {
        let Some(node) = self.arena.get(id) else {
            return;
        };
        let Rect { x, y, .. } = node.rect;
        let padding = node.padding;
        let child_ids: Vec<WidgetId> = self.children(id).to_vec();

        let mut offset = y + padding * 2.0;
        let mut extent_w: f32 = 0.0;
        for child in child_ids {
            let Some(child_node) = self.arena.get_mut(child) else {
                continue;
            };
            let flowed = child_node.at.is_none();
            if flowed {
                child_node.rect.x = x + padding + child_node.margin;
                child_node.rect.y = offset + child_node.margin;
            }

            if child_node.children.is_some() {
                self.relayout(child);
            } else {
                self.resolve_size(child);
            }

            let Some(child_node) = self.arena.get(child) else {
                continue;
            };
            if flowed {
                offset += child_node.rect.height + child_node.margin + child_node.padding * 2.0;
                extent_w = extent_w.max(child_node.rect.x + child_node.rect.width - x);
            }
        }

        let content_h = offset - y;
        if let Some(node) = self.arena.get_mut(id) {
            node.rect.width = match node.width {
                Sizing::Fixed(w) => w,
                Sizing::Fit => extent_w + padding,
            };
            node.rect.height = match node.height {
                Sizing::Fixed(h) => h,
                Sizing::Fit => content_h,
            };
        }
    }

    fn resolve_size(&mut self, id: WidgetId) {
        if let Some(node) = self.arena.get_mut(id) {
            let (text_w, text_h) = node.text_size();
            node.rect.width = match node.width {
                Sizing::Fixed(w) => w,
                Sizing::Fit => text_w,
            };
            node.rect.height = match node.height {
                Sizing::Fixed(h) => h,
                Sizing::Fit => text_h,
            };
        }
    }

    // ------------------------------------------------------------------
    // Draw
    // ------------------------------------------------------------------

    /// Render every root.
    pub fn draw(&self, surface: &mut dyn Surface) {
        for &root in &self.roots {
            self.draw_node(root, Visual::Plain, surface);
        }
    }

    /// Render one node and its subtree in the given visual state.
    pub fn draw_node(&self, id: WidgetId, visual: Visual, surface: &mut dyn Surface) {
        let Some(node) = self.arena.get(id) else {
            return;
        };

        let r = node.rect;
        if !draw::is_clear(node.bg_color) {
            surface.draw_rect(r.x, r.y, node.z, r.width, r.height, node.bg_color);
        }

        match node.widget {
            Widget::Label => self.draw_text(node, node_color(node), surface),
            Widget::Button | Widget::OptionButton => {
                let font_size = node.text.as_ref().map_or(0.0, |t| t.font.size as f32);
                match visual {
                    Visual::Plain => {}
                    Visual::Selected => surface.draw_sprite(
                        r.x - font_size,
                        r.y + node.padding,
                        node.z,
                        Sprite::SelectionMarker,
                    ),
                    Visual::Focussed => {
                        surface.draw_sprite(r.x, r.y, node.z, Sprite::SelectionMarker)
                    }
                }
                let color = match (visual, &node.text) {
                    (Visual::Focussed, Some(t)) => t.focussed_color,
                    _ => node_color(node),
                };
                self.draw_text(node, color, surface);
            }
            Widget::Container => {
                let selected = self.selected(id);
                for &child in self.children(id) {
                    let child_visual = if Some(child) == selected {
                        if self.is_focussed(child) {
                            Visual::Focussed
                        } else {
                            Visual::Selected
                        }
                    } else {
                        Visual::Plain
                    };
                    self.draw_node(child, child_visual, surface);
                }
            }
        }
    }

    fn draw_text(&self, node: &WidgetNode<M>, color: Rgba, surface: &mut dyn Surface) {
        let Some(t) = &node.text else {
            return;
        };
        if t.text.is_empty() {
            return;
        }
        surface.draw_text(
            node.rect.x + node.padding,
            node.rect.y + node.padding,
            node.z,
            &t.text,
            &t.font,
            color,
        );
    }
}

fn node_color<M>(node: &WidgetNode<M>) -> Rgba {
    node.text.as_ref().map_or([1.0; 4], |t| t.color)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
