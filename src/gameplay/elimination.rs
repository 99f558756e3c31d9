use bevy::prelude::*;
use bevy_rapier2d::prelude::CollisionEvent;

use crate::core::components::{Ball, BallEffect, BallPhase, DelayedEffect, KillWall};
use crate::core::config::GameConfig;
use crate::core::system_order::PostPhysicsAdjustSet;

pub struct EliminationPlugin;

impl Plugin for EliminationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            eliminate_escaped_balls.in_set(PostPhysicsAdjustSet),
        );
    }
}

/// Destroys balls that escape the play area through the left/right/top sensor
/// walls. `Eliminated` is one-shot: repeat contacts in the same or later steps
/// are ignored, so removal is scheduled exactly once.
pub fn eliminate_escaped_balls(
    mut commands: Commands,
    mut collisions: EventReader<CollisionEvent>,
    kill_walls: Query<(), With<KillWall>>,
    mut balls: Query<&mut BallPhase, With<Ball>>,
    cfg: Res<GameConfig>,
) {
    for ev in collisions.read() {
        let CollisionEvent::Started(a, b, _) = ev else {
            continue;
        };
        let other = if kill_walls.get(*a).is_ok() {
            *b
        } else if kill_walls.get(*b).is_ok() {
            *a
        } else {
            continue;
        };
        let Ok(mut phase) = balls.get_mut(other) else {
            continue;
        };
        // Scored balls already have a pending outcome; held balls are fair
        // game (escaping geometry while dragged still counts as escaping).
        match *phase {
            BallPhase::Falling | BallPhase::Held => {}
            BallPhase::Scored | BallPhase::Eliminated => continue,
        }
        *phase = BallPhase::Eliminated;
        commands.entity(other).insert(DelayedEffect::new(
            cfg.timings.eliminate_delay,
            BallEffect::Remove,
        ));
    }
}
