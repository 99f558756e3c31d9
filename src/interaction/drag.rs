use bevy::prelude::*;
use bevy_rapier2d::prelude::{CollisionGroups, Velocity};

use crate::board::setup::BoardGeometry;
use crate::core::components::{ball_groups, held_ball_groups, Ball, BallPhase};
use crate::core::config::GameConfig;
use crate::core::system_order::{PostPhysicsAdjustSet, PrePhysicsSet};
use crate::interaction::pointer::{pointer_pressed, pointer_released, primary_pointer_world_pos};

/// The ball currently pinned to the pointer, if any.
#[derive(Resource, Default, Debug)]
pub struct ActiveDrag {
    pub entity: Option<Entity>,
}

pub struct DragPlugin;

impl Plugin for DragPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ActiveDrag::default())
            .add_systems(
                Update,
                (begin_or_end_drag, follow_pointer.after(begin_or_end_drag))
                    .in_set(PrePhysicsSet),
            )
            .add_systems(Update, clamp_held_ball.in_set(PostPhysicsAdjustSet));
    }
}

/// Held balls may never cross the drag-limit line into the scoring zone
/// (board space, y grows downward).
pub fn held_clamp(board_pos: Vec2, drag_limit_y: f32) -> Vec2 {
    Vec2::new(board_pos.x, board_pos.y.min(drag_limit_y))
}

/// Where a released ball ends up: past the snap line it returns to the spawn
/// area with its x preserved, otherwise it stays where it was let go.
pub fn release_destination(board_pos: Vec2, release_snap_y: f32, spawn_y: f32) -> Vec2 {
    if board_pos.y > release_snap_y {
        Vec2::new(board_pos.x, spawn_y)
    } else {
        board_pos
    }
}

#[allow(clippy::too_many_arguments)]
fn begin_or_end_drag(
    buttons: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows_q: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform)>,
    mut active: ResMut<ActiveDrag>,
    mut balls: Query<
        (
            Entity,
            &mut Transform,
            &mut BallPhase,
            &mut CollisionGroups,
            &mut Velocity,
        ),
        With<Ball>,
    >,
    geometry: Option<Res<BoardGeometry>>,
    cfg: Res<GameConfig>,
) {
    if !cfg.drag.enabled {
        return;
    }
    let Some(geometry) = geometry else {
        return;
    };
    // A held ball can be despawned out from under us (elimination).
    if let Some(entity) = active.entity {
        if balls.get(entity).is_err() {
            active.entity = None;
        }
    }

    if pointer_released(&buttons, &touches) {
        if let Some(entity) = active.entity.take() {
            if let Ok((_, mut tf, mut phase, mut groups, mut vel)) = balls.get_mut(entity) {
                *groups = ball_groups();
                if *phase == BallPhase::Held {
                    *phase = BallPhase::Falling;
                }
                let board = geometry.to_board(tf.translation.truncate());
                let dest = release_destination(board, geometry.release_snap_y, geometry.spawn_y);
                if dest != board {
                    let world = geometry.to_world(dest);
                    tf.translation.x = world.x;
                    tf.translation.y = world.y;
                    *vel = Velocity::zero();
                }
            }
        }
        return;
    }

    if active.entity.is_some() || !pointer_pressed(&buttons, &touches) {
        return;
    }
    let Ok(window) = windows_q.single() else {
        return;
    };
    let Some(world_pos) = primary_pointer_world_pos(window, &touches, &camera_q) else {
        return;
    };

    // Nearest-point search within the per-ball sensing radius; a pointer
    // directly over the ball shape is the trivial subset of this.
    let grab_r2 = cfg.ball.grab_radius * cfg.ball.grab_radius;
    let mut nearest: Option<(Entity, f32)> = None;
    for (entity, tf, phase, _, _) in balls.iter() {
        if *phase != BallPhase::Falling {
            continue;
        }
        let d2 = tf.translation.truncate().distance_squared(world_pos);
        if d2 <= grab_r2 && nearest.map_or(true, |(_, best)| d2 < best) {
            nearest = Some((entity, d2));
        }
    }
    if let Some((entity, _)) = nearest {
        if let Ok((_, _, mut phase, mut groups, mut vel)) = balls.get_mut(entity) {
            *phase = BallPhase::Held;
            *groups = held_ball_groups();
            *vel = Velocity::zero();
            active.entity = Some(entity);
        }
    }
}

/// Pin the held ball to the pointer, clamped above the drag-limit line.
fn follow_pointer(
    windows_q: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform)>,
    touches: Res<Touches>,
    active: Res<ActiveDrag>,
    geometry: Option<Res<BoardGeometry>>,
    mut balls: Query<(&mut Transform, &mut Velocity, &BallPhase), With<Ball>>,
) {
    let Some(entity) = active.entity else {
        return;
    };
    let Some(geometry) = geometry else {
        return;
    };
    let Ok(window) = windows_q.single() else {
        return;
    };
    let Some(world_pos) = primary_pointer_world_pos(window, &touches, &camera_q) else {
        return;
    };
    let Ok((mut tf, mut vel, phase)) = balls.get_mut(entity) else {
        return;
    };
    if *phase != BallPhase::Held {
        return;
    }
    let board = held_clamp(geometry.to_board(world_pos), geometry.drag_limit_y);
    let world = geometry.to_world(board);
    tf.translation.x = world.x;
    tf.translation.y = world.y;
    *vel = Velocity::zero();
}

/// Post-physics correction: the solver can nudge a held ball past the limit
/// within a step; pull it back before rendering.
fn clamp_held_ball(
    active: Res<ActiveDrag>,
    geometry: Option<Res<BoardGeometry>>,
    mut balls: Query<(&mut Transform, &BallPhase), With<Ball>>,
) {
    let Some(entity) = active.entity else {
        return;
    };
    let Some(geometry) = geometry else {
        return;
    };
    let Ok((mut tf, phase)) = balls.get_mut(entity) else {
        return;
    };
    if *phase != BallPhase::Held {
        return;
    }
    let board = geometry.to_board(tf.translation.truncate());
    let clamped = held_clamp(board, geometry.drag_limit_y);
    if clamped != board {
        let world = geometry.to_world(clamped);
        tf.translation.x = world.x;
        tf.translation.y = world.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_only_affects_y_beyond_limit() {
        assert_eq!(
            held_clamp(Vec2::new(120.0, 500.0), 407.0),
            Vec2::new(120.0, 407.0)
        );
        assert_eq!(
            held_clamp(Vec2::new(120.0, 100.0), 407.0),
            Vec2::new(120.0, 100.0)
        );
    }

    #[test]
    fn release_past_snap_line_returns_to_spawn() {
        let dest = release_destination(Vec2::new(211.0, 430.0), 417.0, 50.0);
        assert_eq!(dest, Vec2::new(211.0, 50.0));
    }

    #[test]
    fn release_above_snap_line_stays_put() {
        let pos = Vec2::new(211.0, 300.0);
        assert_eq!(release_destination(pos, 417.0, 50.0), pos);
    }
}
