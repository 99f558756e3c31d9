use bevy::prelude::*;
use bevy_rapier2d::prelude::{CollisionEvent, Velocity};
use bevy_rapier2d::rapier::prelude::CollisionEventFlags;

use pegfall::board::setup::{BoardGeometry, BucketZone};
use pegfall::core::components::{Ball, BallPhase, Barrier, Bucket, BucketKind};
use pegfall::core::system_order::{PostPhysicsAdjustSet, PrePhysicsSet};
use pegfall::gameplay::routing::{BallScored, RoutingPlugin};
use pegfall::GameConfig;

/// Every BallScored emission, captured for assertions.
#[derive(Resource, Default)]
struct ScoredLog(Vec<(Entity, usize)>);

fn capture_scored(mut log: ResMut<ScoredLog>, mut scored: EventReader<BallScored>) {
    for ev in scored.read() {
        log.0.push((ev.ball, ev.bucket_index));
    }
}

fn two_slot_geometry() -> BoardGeometry {
    BoardGeometry {
        width: 600.0,
        height: 600.0,
        fall_positions: vec![284.0, 316.0],
        bucket_y: 447.0,
        bucket_height: 30.0,
        drag_limit_y: 407.0,
        release_snap_y: 417.0,
        spawn_y: 50.0,
        drop_strip_y: 60.0,
        bucket_zones: vec![
            BucketZone {
                index: 0,
                center_x: 284.0,
                width: 32.0,
            },
            BucketZone {
                index: 1,
                center_x: 316.0,
                width: 32.0,
            },
        ],
    }
}

fn test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.configure_sets(
        Update,
        (PrePhysicsSet, PostPhysicsAdjustSet.after(PrePhysicsSet)),
    );
    app.insert_resource(GameConfig::default());
    app.insert_resource(two_slot_geometry());
    app.init_resource::<ScoredLog>();
    app.add_event::<CollisionEvent>();
    app.add_plugins(RoutingPlugin);
    app.add_systems(Update, capture_scored.in_set(PostPhysicsAdjustSet));
    app
}

fn spawn_ball_at_board_x(app: &mut App, board_x: f32) -> Entity {
    // board (x, 430) -> world (x - 300, 300 - 430)
    app.world_mut()
        .spawn((
            Ball,
            BallPhase::default(),
            Transform::from_xyz(board_x - 300.0, -130.0, 0.0),
            Velocity::zero(),
        ))
        .id()
}

fn spawn_barrier(app: &mut App) -> Entity {
    app.world_mut()
        .spawn((Barrier, Transform::from_xyz(0.0, -144.0, 0.0)))
        .id()
}

fn barrier_contact(app: &mut App, barrier: Entity, ball: Entity) {
    app.world_mut().send_event(CollisionEvent::Started(
        barrier,
        ball,
        CollisionEventFlags::SENSOR,
    ));
}

#[test]
fn ball_routes_to_nearest_slot() {
    let mut app = test_app();
    let barrier = spawn_barrier(&mut app);
    let ball = spawn_ball_at_board_x(&mut app, 310.0);
    barrier_contact(&mut app, barrier, ball);
    app.update();

    let log = app.world().resource::<ScoredLog>();
    assert_eq!(log.0, vec![(ball, 1)]);
    assert_eq!(
        *app.world().get::<BallPhase>(ball).unwrap(),
        BallPhase::Scored
    );
}

#[test]
fn centered_ball_tie_breaks_to_lower_index() {
    let mut app = test_app();
    let barrier = spawn_barrier(&mut app);
    let ball = spawn_ball_at_board_x(&mut app, 300.0);
    barrier_contact(&mut app, barrier, ball);
    app.update();

    let log = app.world().resource::<ScoredLog>();
    assert_eq!(log.0, vec![(ball, 0)]);
}

#[test]
fn repeat_barrier_contacts_route_once() {
    let mut app = test_app();
    let barrier = spawn_barrier(&mut app);
    let ball = spawn_ball_at_board_x(&mut app, 290.0);
    // duplicate contacts in the same step, then another one a step later
    barrier_contact(&mut app, barrier, ball);
    barrier_contact(&mut app, barrier, ball);
    app.update();
    barrier_contact(&mut app, barrier, ball);
    app.update();

    let log = app.world().resource::<ScoredLog>();
    assert_eq!(log.0.len(), 1, "processed flag must be one-shot");
}

#[test]
fn event_order_within_pair_does_not_matter() {
    let mut app = test_app();
    let barrier = spawn_barrier(&mut app);
    let ball = spawn_ball_at_board_x(&mut app, 290.0);
    app.world_mut().send_event(CollisionEvent::Started(
        ball,
        barrier,
        CollisionEventFlags::SENSOR,
    ));
    app.update();
    assert_eq!(app.world().resource::<ScoredLog>().0, vec![(ball, 0)]);
}

#[test]
fn non_ball_contacts_are_ignored() {
    let mut app = test_app();
    let barrier = spawn_barrier(&mut app);
    // a bucket brushing the barrier is not a ball
    let bucket = app
        .world_mut()
        .spawn((Bucket { index: 0 }, BucketKind::Red))
        .id();
    barrier_contact(&mut app, barrier, bucket);
    app.update();
    assert!(app.world().resource::<ScoredLog>().0.is_empty());
}
