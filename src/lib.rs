pub mod app;
pub mod board;
pub mod core;
pub mod debug;
pub mod gameplay;
pub mod interaction;
pub mod physics;
pub mod rendering;

// Curated re-exports
pub use crate::app::game::GamePlugin;
pub use crate::core::components::{Ball, BallPhase, Bucket, BucketKind};
pub use crate::core::config::GameConfig;
