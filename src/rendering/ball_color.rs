use bevy::prelude::*;

use crate::core::components::{Ball, BallEffect, BallPhase, DelayedEffect};
use crate::rendering::palette;

pub struct BallColorPlugin;

impl Plugin for BallColorPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, sync_ball_colors);
    }
}

/// Render color derived from ball state, replacing the original direct
/// `render.fillStyle` writes scattered through the game logic:
/// held -> amber, eliminated -> alert red, scored -> the matched bucket's
/// color while the staggered effect is pending, otherwise the default pink.
pub fn ball_color(phase: BallPhase, pending: Option<BallEffect>) -> Color {
    match (phase, pending) {
        (BallPhase::Held, _) => palette::BALL_HELD,
        (BallPhase::Eliminated, _) => palette::ALERT,
        (BallPhase::Scored, Some(BallEffect::Remove)) => palette::RED_BUCKET,
        (BallPhase::Scored, _) => palette::GREEN_BUCKET,
        (BallPhase::Falling, _) => palette::BALL,
    }
}

fn sync_ball_colors(
    balls: Query<
        (
            &BallPhase,
            Option<&DelayedEffect>,
            &MeshMaterial2d<ColorMaterial>,
        ),
        With<Ball>,
    >,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    for (phase, effect, material) in balls.iter() {
        let color = ball_color(*phase, effect.map(|e| e.effect));
        if let Some(mat) = materials.get_mut(&material.0) {
            if mat.color != color {
                mat.color = color;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scored_color_tracks_pending_outcome() {
        assert_eq!(
            ball_color(BallPhase::Scored, Some(BallEffect::Remove)),
            palette::RED_BUCKET
        );
        assert_eq!(
            ball_color(BallPhase::Scored, Some(BallEffect::Respawn)),
            palette::GREEN_BUCKET
        );
    }

    #[test]
    fn respawned_ball_returns_to_default_color() {
        assert_eq!(ball_color(BallPhase::Falling, None), palette::BALL);
        assert_eq!(ball_color(BallPhase::Held, None), palette::BALL_HELD);
        assert_eq!(ball_color(BallPhase::Eliminated, None), palette::ALERT);
    }
}
