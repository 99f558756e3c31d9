use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use rand::Rng;

use crate::board::setup::BoardGeometry;
use crate::core::components::{ball_groups, Ball, BallPhase};
use crate::core::config::GameConfig;
use crate::core::system_order::PrePhysicsSet;
use crate::interaction::pointer::{pointer_pressed, primary_pointer_world_pos};
use crate::rendering::palette;

/// Request to drop one ball; written by input (Space) or any host UI layer.
#[derive(Event, Debug, Default)]
pub struct DropBall;

/// Anti-spam guard, counted in drop-system passes.
#[derive(Resource, Default, Debug)]
pub struct DropCooldown {
    pub ticks_left: u32,
}

pub struct BallDropPlugin;

impl Plugin for BallDropPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<DropBall>()
            .init_resource::<DropCooldown>()
            .add_systems(
                Update,
                (
                    request_drop_on_key,
                    request_drop_on_click,
                    drop_balls
                        .after(request_drop_on_key)
                        .after(request_drop_on_click),
                )
                    .in_set(PrePhysicsSet),
            );
    }
}

/// Horizontally jittered drop x: Box-Muller normal sample scaled by `std_dev`,
/// hard-clamped to a symmetric band of `width / 15` around the board center.
/// The clamp guarantees the bound regardless of sampling tail events.
pub fn spawn_position(width: f32, std_dev: f32, rng: &mut impl Rng) -> f32 {
    let u1: f32 = rng.gen_range(f32::EPSILON..1.0);
    let u2: f32 = rng.gen_range(0.0..1.0);
    let z0 = (-2.0 * u1.ln()).sqrt() * (std::f32::consts::TAU * u2).cos();
    let band = width / 15.0;
    width / 2.0 + (z0 * std_dev).clamp(-band, band)
}

fn request_drop_on_key(keys: Res<ButtonInput<KeyCode>>, mut drops: EventWriter<DropBall>) {
    if keys.just_pressed(KeyCode::Space) {
        drops.write(DropBall);
    }
}

/// Pointer alternative to the Space key: a press in the strip above the peg
/// field requests a drop. Presses lower on the board belong to drag and
/// bucket interaction.
fn request_drop_on_click(
    buttons: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows_q: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform)>,
    geometry: Option<Res<BoardGeometry>>,
    mut drops: EventWriter<DropBall>,
) {
    if !pointer_pressed(&buttons, &touches) {
        return;
    }
    let Some(geometry) = geometry else {
        return;
    };
    let Ok(window) = windows_q.single() else {
        return;
    };
    let Some(world_pos) = primary_pointer_world_pos(window, &touches, &camera_q) else {
        return;
    };
    if geometry.in_drop_strip(geometry.to_board(world_pos)) {
        drops.write(DropBall);
    }
}

fn drop_balls(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut drops: EventReader<DropBall>,
    mut cooldown: ResMut<DropCooldown>,
    geometry: Option<Res<BoardGeometry>>,
    cfg: Res<GameConfig>,
) {
    cooldown.ticks_left = cooldown.ticks_left.saturating_sub(1);
    if drops.is_empty() {
        return;
    }
    drops.clear();
    // Dropping before the board exists is a silent no-op.
    let Some(geometry) = geometry else {
        return;
    };
    if cooldown.ticks_left > 0 {
        return;
    }
    cooldown.ticks_left = cfg.timings.drop_cooldown;

    let mut rng = rand::thread_rng();
    let x = spawn_position(geometry.width, cfg.ball.spawn_std_dev, &mut rng);
    let world = geometry.to_world(Vec2::new(x, geometry.spawn_y));
    commands.spawn((
        Ball,
        BallPhase::default(),
        RigidBody::Dynamic,
        Collider::ball(cfg.ball.radius),
        Restitution::coefficient(cfg.ball.restitution),
        Friction::coefficient(cfg.ball.friction),
        Damping {
            linear_damping: cfg.ball.linear_damping,
            angular_damping: 0.0,
        },
        ColliderMassProperties::Density(cfg.ball.density),
        ball_groups(),
        ActiveEvents::COLLISION_EVENTS,
        Velocity::zero(),
        Mesh2d(meshes.add(Circle::new(cfg.ball.radius))),
        MeshMaterial2d(materials.add(palette::BALL)),
        Transform::from_translation(world.extend(2.0)),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn spawn_position_stays_in_band() {
        let mut rng = StdRng::seed_from_u64(7);
        for width in [150.0_f32, 600.0, 1200.0] {
            let band = width / 15.0;
            for _ in 0..5_000 {
                let x = spawn_position(width, 10.0, &mut rng);
                assert!(
                    x >= width / 2.0 - band && x <= width / 2.0 + band,
                    "{x} escapes band for width {width}"
                );
            }
        }
    }

    #[test]
    fn spawn_position_clamps_huge_deviation() {
        // std_dev far beyond the band: every sample must still be clamped
        let mut rng = StdRng::seed_from_u64(42);
        let width = 600.0;
        for _ in 0..1_000 {
            let x = spawn_position(width, 10_000.0, &mut rng);
            assert!((260.0..=340.0).contains(&x));
        }
    }

    #[test]
    fn spawn_position_varies() {
        let mut rng = StdRng::seed_from_u64(3);
        let first = spawn_position(600.0, 10.0, &mut rng);
        let distinct = (0..100)
            .map(|_| spawn_position(600.0, 10.0, &mut rng))
            .any(|x| (x - first).abs() > 1e-3);
        assert!(distinct, "jitter should not be constant");
    }
}
