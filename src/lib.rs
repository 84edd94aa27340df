pub mod config;
pub mod controller;
pub mod dungeon;
pub mod exploration;
pub mod input;
pub mod intermission;
pub mod menu;
pub mod party;
pub mod rng;
pub mod scene;
pub mod score;
pub mod ui;
pub mod view;
