use super::draw::{FontSpec, Rgba};
use super::theme::Theme;
use crate::input::Key;

/// Flat enum widget identity.
/// Closed set of widget types. Capabilities are carried as
/// optional components on the node, see `WidgetNode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Widget {
    /// Static text. Describable only.
    Label,
    /// Selectable text entry. Describable + Controllable.
    Button,
    /// Button that can also hold focus. Describable + Controllable + Focussable.
    OptionButton,
    /// Ordered children with a selection cursor.
    /// Containable + Controllable.
    Container,
}

/// Event kinds a handler table is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Key went down this frame (or auto-repeat pulse).
    Push,
    /// Key is held.
    Press,
}

/// Cursor step requested by a handler, applied to the node that owns the
/// handler once it returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorStep {
    Forward,
    Backward,
}

/// What a running handler may do besides reporting consumption.
pub struct EventCtx<'a, M> {
    pub(crate) steps: Vec<CursorStep>,
    pub(crate) outbox: &'a mut Vec<M>,
}

impl<'a, M> EventCtx<'a, M> {
    pub(crate) fn new(outbox: &'a mut Vec<M>) -> Self {
        Self {
            steps: Vec::new(),
            outbox,
        }
    }

    /// Queue a command for the model that owns the tree.
    pub fn emit(&mut self, message: M) {
        self.outbox.push(message);
    }

    pub fn forward_cursor(&mut self) {
        self.steps.push(CursorStep::Forward);
    }

    pub fn backward_cursor(&mut self) {
        self.steps.push(CursorStep::Backward);
    }
}

/// Event handler: consumes a key and returns whether the event was consumed.
pub type Handler<M> = Box<dyn FnMut(Key, &mut EventCtx<'_, M>) -> bool>;

/// Text content and font of a Describable node.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub text: String,
    pub color: Rgba,
    /// Text colour while the node is focussed.
    pub focussed_color: Rgba,
    pub font: FontSpec,
}

/// Width/height mode.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Sizing {
    Fixed(f32),
    /// Derived from text or children.
    #[default]
    Fit,
}

/// Declarative node description. Each constructor returns a finished spec
/// that is handed to its parent's `container` call; `WidgetTree::insert_root`
/// turns the nested spec into arena nodes.
pub struct NodeSpec<M> {
    pub(crate) widget: Widget,
    pub(crate) text: Option<Text>,
    /// Explicit position. `None` = placed by the parent's vertical flow.
    pub(crate) at: Option<(f32, f32)>,
    pub(crate) z: i32,
    pub(crate) margin: f32,
    pub(crate) padding: f32,
    pub(crate) bg_color: Rgba,
    pub(crate) width: Sizing,
    pub(crate) height: Sizing,
    pub(crate) handlers: Vec<(EventKind, Handler<M>)>,
    pub(crate) children: Vec<NodeSpec<M>>,
}

impl<M> NodeSpec<M> {
    fn new(widget: Widget, text: Option<&str>) -> Self {
        let theme = Theme::default();
        Self {
            widget,
            text: text.map(|t| Text {
                text: t.to_string(),
                color: theme.text,
                focussed_color: theme.text_focussed,
                font: FontSpec::sized(theme.font_default_size),
            }),
            at: None,
            z: 0,
            margin: 0.0,
            padding: 0.0,
            bg_color: theme.bg_none,
            width: Sizing::Fit,
            height: Sizing::Fit,
            handlers: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn label(text: &str) -> Self {
        Self::new(Widget::Label, Some(text))
    }

    pub fn button(text: &str) -> Self {
        Self::new(Widget::Button, Some(text))
    }

    pub fn option(text: &str) -> Self {
        Self::new(Widget::OptionButton, Some(text))
    }

    pub fn container(children: impl IntoIterator<Item = NodeSpec<M>>) -> Self {
        let mut spec = Self::new(Widget::Container, None);
        spec.children = children.into_iter().collect();
        spec
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.at = Some((x, y));
        self
    }

    pub fn margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    pub fn padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    pub fn bg(mut self, color: Rgba) -> Self {
        self.bg_color = color;
        self
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = Sizing::Fixed(width);
        self
    }

    pub fn height(mut self, height: f32) -> Self {
        self.height = Sizing::Fixed(height);
        self
    }

    /// Font size of a text node.
    ///
    /// # Panics
    /// On a node without text.
    pub fn font_size(mut self, size: u16) -> Self {
        self.text_mut("font_size").font.size = size;
        self
    }

    /// Menu styling from `theme`: text colours, font size and padding.
    pub fn themed(mut self, theme: &Theme) -> Self {
        if let Some(text) = self.text.as_mut() {
            text.color = theme.text;
            text.focussed_color = theme.text_focussed;
            text.font.size = theme.font_size;
        }
        self.padding = theme.menu_padding;
        self
    }

    /// Register a handler at construction time.
    ///
    /// # Panics
    /// On a Label, which has no handler table.
    pub fn on(
        mut self,
        kind: EventKind,
        handler: impl FnMut(Key, &mut EventCtx<'_, M>) -> bool + 'static,
    ) -> Self {
        assert!(
            self.widget != Widget::Label,
            "label nodes cannot take event handlers"
        );
        self.handlers.push((kind, Box::new(handler)));
        self
    }

    fn text_mut(&mut self, attr: &str) -> &mut Text {
        match self.text.as_mut() {
            Some(text) => text,
            None => panic!("`{attr}` set on a {:?} node, which has no text", self.widget),
        }
    }
}

impl Widget {
    pub fn is_controllable(self) -> bool {
        !matches!(self, Widget::Label)
    }

    pub fn is_focussable(self) -> bool {
        matches!(self, Widget::OptionButton)
    }

    pub fn is_container(self) -> bool {
        matches!(self, Widget::Container)
    }
}
