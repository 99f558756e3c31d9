use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::board::layout::BoardLayout;
use crate::core::components::{
    bucket_groups, peg_groups, wall_groups, Barrier, BottomWall, Bucket, KillWall, Peg,
};
use crate::core::config::GameConfig;
use crate::rendering::palette;

/// World-facing geometry published once the static bodies exist. Runtime
/// systems treat its absence as "no simulation yet" and no-op.
#[derive(Resource, Debug, Clone)]
pub struct BoardGeometry {
    pub width: f32,
    pub height: f32,
    /// Board-space x of every fall-through slot (index == bucket index).
    pub fall_positions: Vec<f32>,
    pub bucket_y: f32,
    pub bucket_height: f32,
    /// Held balls may not be dragged below this board-space line.
    pub drag_limit_y: f32,
    /// Releases below this line snap the ball back to the spawn area.
    pub release_snap_y: f32,
    pub spawn_y: f32,
    /// Clicks above this board-space line (the first peg row) request a drop.
    pub drop_strip_y: f32,
    pub bucket_zones: Vec<BucketZone>,
}

#[derive(Debug, Clone, Copy)]
pub struct BucketZone {
    pub index: usize,
    pub center_x: f32,
    pub width: f32,
}

impl BoardGeometry {
    /// Board space (y down from the top-left) -> world space (y up, centered).
    pub fn to_world(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x - self.width / 2.0, self.height / 2.0 - p.y)
    }

    pub fn to_board(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x + self.width / 2.0, self.height / 2.0 - p.y)
    }

    /// True when the pointer sits in the ball-drop strip above the peg field.
    pub fn in_drop_strip(&self, board_pos: Vec2) -> bool {
        (0.0..=self.width).contains(&board_pos.x) && board_pos.y < self.drop_strip_y
    }

    /// Containment hit test against the bucket zones (board space).
    pub fn bucket_at(&self, board_pos: Vec2) -> Option<usize> {
        if (board_pos.y - self.bucket_y).abs() > self.bucket_height / 2.0 {
            return None;
        }
        self.bucket_zones
            .iter()
            .find(|z| (board_pos.x - z.center_x).abs() <= z.width / 2.0)
            .map(|z| z.index)
    }
}

pub struct BoardPlugin;

impl Plugin for BoardPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_board);
    }
}

fn spawn_board(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    cfg: Res<GameConfig>,
) {
    let layout = BoardLayout::build(&cfg.board);
    let geometry = BoardGeometry {
        width: cfg.board.width,
        height: cfg.board.height,
        fall_positions: layout.fall_positions.clone(),
        bucket_y: layout.bucket_y,
        bucket_height: cfg.board.bucket_height,
        drag_limit_y: layout.bucket_y - cfg.drag.clamp_margin,
        release_snap_y: layout.bucket_y - cfg.drag.release_snap_margin,
        spawn_y: cfg.ball.spawn_y,
        drop_strip_y: cfg.board.top_margin,
        bucket_zones: layout
            .buckets
            .iter()
            .map(|b| BucketZone {
                index: b.index,
                center_x: b.center_x,
                width: b.width,
            })
            .collect(),
    };

    let peg_material = materials.add(palette::PEG);
    for peg in &layout.pegs {
        let world = geometry.to_world(peg.pos);
        commands.spawn((
            Peg,
            RigidBody::Fixed,
            Collider::ball(peg.radius),
            Restitution::coefficient(0.7),
            Friction::coefficient(0.1),
            peg_groups(),
            Mesh2d(meshes.add(Circle::new(peg.radius))),
            MeshMaterial2d(peg_material.clone()),
            Transform::from_translation(world.extend(1.0)),
        ));
    }

    for bucket in &layout.buckets {
        let world = geometry.to_world(Vec2::new(bucket.center_x, layout.bucket_y));
        commands.spawn((
            Bucket {
                index: bucket.index,
            },
            bucket.kind,
            RigidBody::Fixed,
            Collider::cuboid(bucket.width / 2.0, cfg.board.bucket_height / 2.0),
            Sensor,
            bucket_groups(),
            Sprite {
                color: palette::bucket_color(bucket.kind),
                custom_size: Some(Vec2::new(bucket.width, cfg.board.bucket_height)),
                ..default()
            },
            Transform::from_translation(world.extend(0.0)),
        ));
    }

    // Sensing barrier just below the last peg row; routing reacts to its
    // contact-begin events.
    let barrier_world = geometry.to_world(Vec2::new(cfg.board.width / 2.0, layout.barrier_y));
    commands.spawn((
        Barrier,
        RigidBody::Fixed,
        Collider::cuboid(cfg.board.width / 2.0, 2.5),
        Sensor,
        wall_groups(),
        ActiveEvents::COLLISION_EVENTS,
        Transform::from_translation(barrier_world.extend(0.0)),
    ));

    let walls = layout.walls(&cfg.board);
    for spec in [walls.left, walls.right, walls.top] {
        let world = geometry.to_world(spec.center);
        commands.spawn((
            KillWall,
            RigidBody::Fixed,
            Collider::cuboid(spec.half_extents.x, spec.half_extents.y),
            Sensor,
            wall_groups(),
            ActiveEvents::COLLISION_EVENTS,
            Transform::from_translation(world.extend(0.0)),
        ));
    }
    let bottom_world = geometry.to_world(walls.bottom.center);
    commands.spawn((
        BottomWall,
        RigidBody::Fixed,
        Collider::cuboid(walls.bottom.half_extents.x, walls.bottom.half_extents.y),
        wall_groups(),
        Transform::from_translation(bottom_world.extend(0.0)),
    ));

    commands.insert_resource(geometry);
}
