// This file is part of Pegfall.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use bevy::prelude::*;

use crate::board::setup::BoardPlugin;
use crate::core::config::GameConfig;
use crate::core::system_order::{PostPhysicsAdjustSet, PrePhysicsSet};
use crate::debug::DebugPlugin;
use crate::gameplay::elimination::EliminationPlugin;
use crate::gameplay::routing::RoutingPlugin;
use crate::gameplay::scoring::ScoringPlugin;
use crate::gameplay::spawn::BallDropPlugin;
use crate::interaction::buckets::BucketInteractionPlugin;
use crate::interaction::drag::DragPlugin;
use crate::interaction::session::AutoClosePlugin;
use crate::physics::rapier::PhysicsSetupPlugin;
use crate::rendering::ball_color::BallColorPlugin;
use crate::rendering::camera::CameraPlugin;
use crate::rendering::hud::HudPlugin;

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (PrePhysicsSet, PostPhysicsAdjustSet.after(PrePhysicsSet)),
        )
        .add_plugins((
            CameraPlugin,
            PhysicsSetupPlugin,
            BoardPlugin,
            BallDropPlugin,
            RoutingPlugin,
            ScoringPlugin,
            EliminationPlugin,
            DragPlugin,
            BucketInteractionPlugin,
            BallColorPlugin,
            HudPlugin,
            AutoClosePlugin,
            DebugPlugin,
        ))
        .add_systems(Startup, log_config_warnings);
    }
}

fn log_config_warnings(cfg: Res<GameConfig>) {
    for warning in cfg.validate() {
        warn!("config: {warning}");
    }
}
