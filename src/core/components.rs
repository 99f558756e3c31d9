use bevy::prelude::*;
use bevy_rapier2d::prelude::{CollisionGroups, Group};

/// Marker component identifying a ball entity (dynamic body + collider).
#[derive(Component)]
pub struct Ball;

/// Per-ball state machine replacing the original ad-hoc `processed` /
/// `eliminationProcessed` flags. `Scored` means the ball crossed the barrier
/// and has been routed to a bucket; only the green-bucket respawn path returns
/// it to `Falling`. `Eliminated` is terminal.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BallPhase {
    #[default]
    Falling,
    Held,
    Scored,
    Eliminated,
}

/// Marker component for a peg (fixed circular body).
#[derive(Component)]
pub struct Peg;

/// Structured bucket identity; replaces the original `bucket-<i>-<color>`
/// string labels.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    pub index: usize,
}

/// Mutable bucket type, toggled red<->green by clicking the bucket.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketKind {
    Red,
    Green,
}
impl BucketKind {
    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            BucketKind::Red => BucketKind::Green,
            BucketKind::Green => BucketKind::Red,
        }
    }
}

/// Cosmetic marker: the pointer is currently over this bucket.
#[derive(Component)]
pub struct BucketHovered;

/// Sensor line just below the last peg row; a ball's first crossing routes it
/// to a bucket.
#[derive(Component)]
pub struct Barrier;

/// Sensor walls (left/right/top) that eliminate escaped balls.
#[derive(Component)]
pub struct KillWall;

/// Solid floor under the bucket line.
#[derive(Component)]
pub struct BottomWall;

/// What happens to a ball when its countdown expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallEffect {
    Remove,
    Respawn,
}

/// Tick-counted deferred effect; the countdown system decrements `ticks_left`
/// once per pass and applies `effect` at zero. Replaces the original
/// wall-clock `setTimeout` staggering so outcomes are deterministic in tests.
#[derive(Component, Debug, Clone, Copy)]
pub struct DelayedEffect {
    pub ticks_left: u32,
    pub effect: BallEffect,
}
impl DelayedEffect {
    pub fn new(ticks_left: u32, effect: BallEffect) -> Self {
        Self { ticks_left, effect }
    }
}

// Collision categories (same partitioning as the original game).
pub const BALL_GROUP: Group = Group::GROUP_1;
pub const PEG_GROUP: Group = Group::GROUP_2;
pub const BUCKET_GROUP: Group = Group::GROUP_3;
pub const WALL_GROUP: Group = Group::GROUP_4;

/// Free-falling balls collide with pegs and walls.
pub fn ball_groups() -> CollisionGroups {
    CollisionGroups::new(BALL_GROUP, PEG_GROUP | WALL_GROUP)
}

/// Held balls pass through pegs; walls still apply.
pub fn held_ball_groups() -> CollisionGroups {
    CollisionGroups::new(BALL_GROUP, WALL_GROUP)
}

/// Buckets are pure zones: they collide with nothing and are located by
/// containment, never by physics response.
pub fn bucket_groups() -> CollisionGroups {
    CollisionGroups::new(BUCKET_GROUP, Group::NONE)
}

pub fn peg_groups() -> CollisionGroups {
    CollisionGroups::new(PEG_GROUP, Group::ALL)
}

pub fn wall_groups() -> CollisionGroups {
    CollisionGroups::new(WALL_GROUP, Group::ALL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_toggle_round_trips() {
        assert_eq!(BucketKind::Red.toggled(), BucketKind::Green);
        assert_eq!(BucketKind::Red.toggled().toggled(), BucketKind::Red);
    }

    #[test]
    fn held_balls_ignore_pegs() {
        assert!(ball_groups().filters.contains(PEG_GROUP));
        assert!(!held_ball_groups().filters.contains(PEG_GROUP));
        assert!(held_ball_groups().filters.contains(WALL_GROUP));
        assert_eq!(bucket_groups().filters, Group::NONE);
    }
}
