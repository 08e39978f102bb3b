pub mod db;
pub mod engine;
pub mod gas;

pub use db::{ChainDb, WorldState};
pub use engine::StateEngine;
