//! Centralized color palette & helpers: single source of truth for board,
//! ball state, and bucket visuals.

use bevy::prelude::*;

use crate::core::components::BucketKind;

pub const BACKGROUND: Color = Color::srgb(0.055, 0.086, 0.129); // #0e1621
pub const PEG: Color = Color::srgb(1.0, 1.0, 1.0);
pub const BALL: Color = Color::srgb(1.0, 0.333, 0.533); // #ff5588
pub const BALL_HELD: Color = Color::srgb(1.0, 0.8, 0.0); // #ffcc00
pub const RED_BUCKET: Color = Color::srgb(1.0, 0.2, 0.4); // #ff3366
pub const GREEN_BUCKET: Color = Color::srgb(0.2, 0.8, 0.4); // #33cc66
pub const ALERT: Color = Color::srgb(1.0, 0.0, 0.0);
pub const HIGHLIGHT: Color = Color::srgb(1.0, 1.0, 1.0);

#[inline]
pub fn bucket_color(kind: BucketKind) -> Color {
    match kind {
        BucketKind::Red => RED_BUCKET,
        BucketKind::Green => GREEN_BUCKET,
    }
}

/// Hovered buckets blend toward the highlight color.
#[inline]
pub fn bucket_hover_color(kind: BucketKind) -> Color {
    bucket_color(kind).mix(&HIGHLIGHT, 0.35)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_colors_distinct() {
        assert!(bucket_color(BucketKind::Red) != bucket_color(BucketKind::Green));
    }

    #[test]
    fn hover_tint_changes_color() {
        for kind in [BucketKind::Red, BucketKind::Green] {
            assert!(bucket_hover_color(kind) != bucket_color(kind));
        }
    }
}
