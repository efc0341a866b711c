pub mod entity;
pub mod sprite;
pub mod tilemap;
