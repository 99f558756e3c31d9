use bevy::prelude::*;
use bevy_rapier2d::prelude::CollisionEvent;

use crate::board::setup::BoardGeometry;
use crate::core::components::{Ball, BallPhase, Barrier};
use crate::core::system_order::PostPhysicsAdjustSet;

/// A falling ball crossed the barrier and was matched to a bucket slot.
#[derive(Event, Debug, Clone, Copy)]
pub struct BallScored {
    pub ball: Entity,
    pub bucket_index: usize,
}

pub struct RoutingPlugin;

impl Plugin for RoutingPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<BallScored>().add_systems(
            Update,
            route_barrier_contacts.in_set(PostPhysicsAdjustSet),
        );
    }
}

/// Index of the fall position nearest to `x`. Distances are compared with
/// strict `<`, so equal distances resolve to the lower index (first wins).
pub fn nearest_fall_index(x: f32, fall_positions: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &fx) in fall_positions.iter().enumerate() {
        let d = (x - fx).abs();
        if best.map_or(true, |(_, bd)| d < bd) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}

/// Collision router: on a ball's first barrier contact, mark it `Scored` and
/// dispatch the nearest bucket. Later barrier contacts for the same ball are
/// ignored until a green-bucket respawn resets its phase.
pub fn route_barrier_contacts(
    mut collisions: EventReader<CollisionEvent>,
    barriers: Query<(), With<Barrier>>,
    mut balls: Query<(&Transform, &mut BallPhase), With<Ball>>,
    geometry: Option<Res<BoardGeometry>>,
    mut scored: EventWriter<BallScored>,
) {
    let Some(geometry) = geometry else {
        return;
    };
    for ev in collisions.read() {
        let CollisionEvent::Started(a, b, _) = ev else {
            continue;
        };
        let other = if barriers.get(*a).is_ok() {
            *b
        } else if barriers.get(*b).is_ok() {
            *a
        } else {
            continue;
        };
        let Ok((tf, mut phase)) = balls.get_mut(other) else {
            continue;
        };
        if *phase != BallPhase::Falling {
            continue;
        }
        *phase = BallPhase::Scored;
        // The bucket match uses the ball's x at crossing time only; the
        // trajectory before the barrier is irrelevant for routing.
        let board_x = geometry.to_board(tf.translation.truncate()).x;
        if let Some(bucket_index) = nearest_fall_index(board_x, &geometry.fall_positions) {
            scored.write(BallScored {
                ball: other,
                bucket_index,
            });
        }
    }
}
