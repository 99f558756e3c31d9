use bevy::prelude::*;

use crate::core::components::{Ball, BallPhase, Bucket, BucketKind};

#[derive(Resource)]
pub struct DebugLogState {
    pub time_accum: f32,
    pub log_interval: f32,
}
impl Default for DebugLogState {
    fn default() -> Self {
        Self {
            time_accum: 0.0,
            log_interval: 5.0,
        }
    }
}

pub fn debug_logging_system(
    time: Res<Time>,
    mut state: ResMut<DebugLogState>,
    balls: Query<&BallPhase, With<Ball>>,
    buckets: Query<&BucketKind, With<Bucket>>,
) {
    state.time_accum += time.delta_secs();
    if state.time_accum < state.log_interval {
        return;
    }
    state.time_accum = 0.0;
    let (mut falling, mut held, mut scored, mut eliminated) = (0, 0, 0, 0);
    for phase in balls.iter() {
        match phase {
            BallPhase::Falling => falling += 1,
            BallPhase::Held => held += 1,
            BallPhase::Scored => scored += 1,
            BallPhase::Eliminated => eliminated += 1,
        }
    }
    let red = buckets.iter().filter(|k| **k == BucketKind::Red).count();
    let green = buckets.iter().filter(|k| **k == BucketKind::Green).count();
    info!(
        "SIM t={:.1}s balls={} falling={} held={} scored={} eliminated={} buckets r/g={}/{}",
        time.elapsed_secs(),
        falling + held + scored + eliminated,
        falling,
        held,
        scored,
        eliminated,
        red,
        green
    );
}
