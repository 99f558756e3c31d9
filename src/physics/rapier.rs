use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::config::GameConfig;

/// Wrapper configuring Rapier for the board: pixel-scale world, straight-down
/// gravity from config.
pub struct PhysicsSetupPlugin;

impl Plugin for PhysicsSetupPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(100.0))
            .add_systems(Startup, configure_gravity);
    }
}

fn configure_gravity(mut contexts: Query<&mut RapierConfiguration>, cfg: Res<GameConfig>) {
    let Ok(mut rapier_cfg) = contexts.single_mut() else {
        return;
    };
    rapier_cfg.gravity = Vect::new(0.0, cfg.gravity.y);
}
