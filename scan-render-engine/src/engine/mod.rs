pub mod assembly;
pub mod colour;
pub mod config;
pub mod coordinates;
pub mod core;
pub mod error;
pub mod input;
pub mod loading;
pub mod primitive;
pub mod query;
pub mod scene;
