//! Read-only renderers for the game models.
//!
//! Views hold positions and fonts, never state: everything drawn is read
//! from the model passed to `draw`.

use crate::exploration::Exploration;
use crate::intermission::{Intermission, TownCommand};
use crate::party::Party;
use crate::ui::{FontSpec, Rgba, Sprite, Surface, Theme};

/// Fixed-width column the HUD right-aligns values into, in glyphs.
const VALUE_COLUMN: i64 = 11;
/// Glyphs between successive entries of a list row.
const LIST_STRIDE: i64 = 5;

#[derive(Debug, Clone)]
struct Hud {
    font: FontSpec,
    color: Rgba,
}

impl Hud {
    fn new(theme: &Theme) -> Self {
        Self {
            font: FontSpec::sized(theme.font_size),
            color: theme.text,
        }
    }

    fn size(&self) -> f32 {
        self.font.size as f32
    }

    fn text(&self, surface: &mut dyn Surface, x: f32, y: f32, text: &str) {
        surface.draw_text(x, y, 0, text, &self.font, self.color);
    }

    /// `label` at `x`, `value` right-aligned to the value column.
    fn labelled(&self, surface: &mut dyn Surface, x: f32, y: f32, label: &str, value: &str) {
        self.text(surface, x, y, label);
        let shift = VALUE_COLUMN - value.chars().count() as i64;
        self.text(surface, x + self.size() * shift as f32, y, value);
    }

    /// `label` followed by one right-aligned column per value.
    fn list(&self, surface: &mut dyn Surface, x: f32, y: f32, label: &str, values: &[String]) {
        self.text(surface, x, y, label);
        for (i, value) in values.iter().enumerate() {
            let shift = LIST_STRIDE * i as i64 + VALUE_COLUMN - value.chars().count() as i64;
            self.text(surface, x + self.size() * shift as f32, y, value);
        }
    }
}

/// Supplies, gold and per-explorer life/stamina.
#[derive(Debug, Clone)]
pub struct PartyView {
    x: f32,
    y: f32,
    hud: Hud,
}

impl PartyView {
    pub fn new(x: f32, y: f32, theme: &Theme) -> Self {
        Self {
            x,
            y,
            hud: Hud::new(theme),
        }
    }

    pub fn draw(&self, party: &Party, surface: &mut dyn Surface) {
        let (x, y, s) = (self.x, self.y, self.hud.size());
        let hud = &self.hud;
        hud.labelled(surface, x, y, "FOOD", &party.food.to_string());
        hud.labelled(surface, x + s * 15.0, y, "OIL", &party.oil.to_string());
        hud.labelled(surface, x, y + s, "GOLD", &(party.gold + party.treasure).to_string());

        let life: Vec<String> = party.explorers.iter().map(|e| e.life.to_string()).collect();
        let stamina: Vec<String> = party.explorers.iter().map(|e| e.stamina.to_string()).collect();
        hud.list(surface, x, y + 4.0 + s * 3.0, "LIFE", &life);
        hud.list(surface, x, y + 4.0 + s * 4.0, "STAMINA", &stamina);
    }
}

/// Top-left anchor shared by the HUD screens.
fn hud_origin(theme: &Theme) -> (f32, f32) {
    let s = theme.font_size as f32;
    (s * 7.0, 8.0 + s)
}

pub struct ExplorationView {
    x: f32,
    y: f32,
    hud: Hud,
    party: PartyView,
    theme: Theme,
}

impl ExplorationView {
    pub fn new(theme: &Theme) -> Self {
        let (x, y) = hud_origin(theme);
        let s = theme.font_size as f32;
        Self {
            x,
            y,
            hud: Hud::new(theme),
            party: PartyView::new(x, y + s * 2.0, theme),
            theme: theme.clone(),
        }
    }

    pub fn draw(&self, exploration: &Exploration, surface: &mut dyn Surface) {
        let party = &exploration.party;
        let theme = &self.theme;

        for torch in &exploration.dungeon.torches {
            let (tx, ty) = (torch.x as f32, torch.y as f32);
            surface.draw_line(tx, ty - 4.0, tx, ty, theme.torch);
            surface.draw_line(tx - 1.0, ty - 4.0, tx - 1.0, ty, theme.torch);
            surface.draw_sprite(tx - 10.0, ty - 15.0, 0, Sprite::TorchGlow);
        }

        let s = self.hud.size();
        self.hud
            .labelled(surface, self.x, self.y, "POS", &party.x.to_string());
        self.hud.labelled(
            surface,
            self.x + s * 15.0,
            self.y,
            "DEPTH",
            &party.frontier.to_string(),
        );
        self.party.draw(party, surface);

        surface.draw_sprite(
            (party.x - 1) as f32,
            (party.y - 1) as f32,
            0,
            Sprite::PartyMarker,
        );
        let (from, to) = (party.departure as f32, party.frontier as f32);
        surface.draw_line(from, 239.0, to, 239.0, theme.explored);
        surface.draw_line(from, 240.0, to, 240.0, theme.explored);

        if party.is_dead() {
            surface.draw_text(256.0, 240.0, 0, "GAME OVER", &self.hud.font, theme.danger);
        }
    }
}

pub fn message(command: TownCommand) -> &'static str {
    match command {
        TownCommand::Inn => "Rest and recover at the inn",
        TownCommand::BuyFood => "Restock food",
        TownCommand::BuyOil => "Restock lamp oil",
        TownCommand::Explore => "Head into the dungeon",
    }
}

pub fn cost(command: TownCommand) -> Option<&'static str> {
    match command {
        TownCommand::Inn => Some("-200 GOLD"),
        TownCommand::BuyFood => Some("-20 GOLD >> 1 FOOD"),
        TownCommand::BuyOil => Some("-100 GOLD >> 1 OIL"),
        TownCommand::Explore => None,
    }
}

pub struct IntermissionView {
    x: f32,
    y: f32,
    hud: Hud,
    party: PartyView,
}

impl IntermissionView {
    pub fn new(theme: &Theme) -> Self {
        let (x, y) = hud_origin(theme);
        let s = theme.font_size as f32;
        Self {
            x,
            y,
            hud: Hud::new(theme),
            party: PartyView::new(x, y + s * 2.0, theme),
        }
    }

    pub fn draw(&self, town: &Intermission, surface: &mut dyn Surface) {
        town.menu().draw(surface);
        self.hud
            .labelled(surface, self.x, self.y, "SCORE", &town.party.score.to_string());
        self.party.draw(&town.party, surface);

        let Some(selected) = town.selected() else {
            return;
        };
        self.hud.text(surface, 320.0, 362.0, message(selected));
        if let Some(cost) = cost(selected) {
            self.hud.text(surface, 320.0, 394.0, cost);
        }
        if let Some(room) = town.capacity(selected) {
            self.hud
                .text(surface, 320.0, 426.0, &format!("Room for {room} more"));
        }
    }
}
