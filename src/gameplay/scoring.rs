use bevy::prelude::*;
use bevy_rapier2d::prelude::Velocity;

use crate::board::setup::BoardGeometry;
use crate::core::components::{Ball, BallEffect, BallPhase, Bucket, BucketKind, DelayedEffect};
use crate::core::config::GameConfig;
use crate::core::system_order::PostPhysicsAdjustSet;
use crate::gameplay::routing::{route_barrier_contacts, BallScored};
use crate::gameplay::spawn::spawn_position;

pub struct ScoringPlugin;

impl Plugin for ScoringPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                apply_bucket_outcome.after(route_barrier_contacts),
                tick_delayed_effects.after(apply_bucket_outcome),
            )
                .in_set(PostPhysicsAdjustSet),
        );
    }
}

/// Win/loss effect per bucket kind. Red schedules removal after a visual
/// beat; green schedules a respawn at the top. The bucket kind is read at
/// scoring time, so toggles never affect balls already scored.
pub fn apply_bucket_outcome(
    mut commands: Commands,
    mut scored: EventReader<BallScored>,
    buckets: Query<(&Bucket, &BucketKind)>,
    balls: Query<(), With<Ball>>,
    cfg: Res<GameConfig>,
) {
    for ev in scored.read() {
        if balls.get(ev.ball).is_err() {
            continue;
        }
        // Unmatched bucket index: silent no-op, the ball just keeps falling
        // onto the floor.
        let Some((_, kind)) = buckets.iter().find(|(b, _)| b.index == ev.bucket_index) else {
            continue;
        };
        let effect = match kind {
            BucketKind::Red => DelayedEffect::new(cfg.timings.remove_delay, BallEffect::Remove),
            BucketKind::Green => DelayedEffect::new(cfg.timings.respawn_delay, BallEffect::Respawn),
        };
        commands.entity(ev.ball).insert(effect);
    }
}

/// Decrements pending countdowns once per pass and applies the effect when
/// the count reaches zero. Respawn is the only transition that returns a
/// `Scored` ball to `Falling`.
pub fn tick_delayed_effects(
    mut commands: Commands,
    mut balls: Query<
        (
            Entity,
            &mut DelayedEffect,
            &mut BallPhase,
            &mut Transform,
            &mut Velocity,
        ),
        With<Ball>,
    >,
    geometry: Option<Res<BoardGeometry>>,
    cfg: Res<GameConfig>,
) {
    for (entity, mut effect, mut phase, mut tf, mut vel) in balls.iter_mut() {
        effect.ticks_left = effect.ticks_left.saturating_sub(1);
        if effect.ticks_left > 0 {
            continue;
        }
        match effect.effect {
            BallEffect::Remove => {
                commands.entity(entity).despawn();
            }
            BallEffect::Respawn => {
                commands.entity(entity).remove::<DelayedEffect>();
                let Some(geometry) = geometry.as_ref() else {
                    continue;
                };
                let mut rng = rand::thread_rng();
                let x = spawn_position(geometry.width, cfg.ball.spawn_std_dev, &mut rng);
                let world = geometry.to_world(Vec2::new(x, geometry.spawn_y));
                tf.translation.x = world.x;
                tf.translation.y = world.y;
                *vel = Velocity::zero();
                *phase = BallPhase::Falling;
            }
        }
    }
}
