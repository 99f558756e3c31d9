//! Central system ordering labels to make the update sequence explicit.
//! Stages (high-level):
//! 1. PrePhysics (pointer input, drops, drag velocity edits before Rapier)
//! 2. Rapier (handled by plugin)
//! 3. PostPhysicsAdjust (collision routing, countdowns, held-ball clamp)
//! 4. Rendering (implicit)
use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct PrePhysicsSet;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct PostPhysicsAdjustSet;
