use wasm_bindgen::prelude::*;

mod game;
pub mod level;
pub mod motion;
pub mod settings;

pub use game::TileWorldDemo;

tileworld_web::export_game!(TileWorldDemo, "tile-world");
