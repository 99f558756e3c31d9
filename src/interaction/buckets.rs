use bevy::prelude::*;

use crate::board::setup::BoardGeometry;
use crate::core::components::{Bucket, BucketHovered, BucketKind};
use crate::core::system_order::PrePhysicsSet;
use crate::interaction::pointer::{pointer_pressed, primary_pointer_world_pos};
use crate::rendering::palette;

pub struct BucketInteractionPlugin;

impl Plugin for BucketInteractionPlugin {
    fn build(&self, app: &mut App) {
        // sync_bucket_colors is the sole writer of bucket sprite colors; the
        // chain keeps kind flips and hover markers settled before it runs.
        app.add_systems(
            Update,
            (toggle_bucket_on_click, hover_buckets, sync_bucket_colors)
                .chain()
                .in_set(PrePhysicsSet),
        );
    }
}

/// Pointer-down hit test against the bucket zones: flips the bucket
/// red<->green. Balls already in flight or scored are unaffected; the kind is
/// read again at scoring time.
fn toggle_bucket_on_click(
    buttons: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows_q: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform)>,
    geometry: Option<Res<BoardGeometry>>,
    mut buckets: Query<(&Bucket, &mut BucketKind)>,
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
    let Some(index) = geometry.bucket_at(geometry.to_board(world_pos)) else {
        return;
    };
    if let Some((_, mut kind)) = buckets.iter_mut().find(|(b, _)| b.index == index) {
        *kind = kind.toggled();
    }
}

/// Tracks which bucket the pointer is inside via the `BucketHovered` marker.
fn hover_buckets(
    mut commands: Commands,
    windows_q: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform)>,
    touches: Res<Touches>,
    geometry: Option<Res<BoardGeometry>>,
    buckets: Query<(Entity, &Bucket, Has<BucketHovered>)>,
) {
    let Some(geometry) = geometry else {
        return;
    };
    let hovered_index = windows_q
        .single()
        .ok()
        .and_then(|window| primary_pointer_world_pos(window, &touches, &camera_q))
        .and_then(|world_pos| geometry.bucket_at(geometry.to_board(world_pos)));

    for (entity, bucket, was_hovered) in buckets.iter() {
        let is_hovered = hovered_index == Some(bucket.index);
        if is_hovered && !was_hovered {
            commands.entity(entity).insert(BucketHovered);
        } else if !is_hovered && was_hovered {
            commands.entity(entity).remove::<BucketHovered>();
        }
    }
}

/// Repaints bucket sprites from their current kind and hover state.
pub fn sync_bucket_colors(
    mut buckets: Query<(&BucketKind, &mut Sprite, Has<BucketHovered>), With<Bucket>>,
) {
    for (kind, mut sprite, hovered) in buckets.iter_mut() {
        let want = if hovered {
            palette::bucket_hover_color(*kind)
        } else {
            palette::bucket_color(*kind)
        };
        if sprite.color != want {
            sprite.color = want;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_systems(Update, sync_bucket_colors);
        app
    }

    #[test]
    fn colors_follow_kind_flips() {
        let mut app = color_app();
        let bucket = app
            .world_mut()
            .spawn((Bucket { index: 0 }, BucketKind::Red, Sprite::default()))
            .id();
        app.update();
        assert_eq!(
            app.world().get::<Sprite>(bucket).unwrap().color,
            palette::bucket_color(BucketKind::Red)
        );

        *app.world_mut().get_mut::<BucketKind>(bucket).unwrap() = BucketKind::Green;
        app.update();
        assert_eq!(
            app.world().get::<Sprite>(bucket).unwrap().color,
            palette::bucket_color(BucketKind::Green)
        );
    }

    #[test]
    fn toggle_while_hovered_keeps_hover_tint() {
        let mut app = color_app();
        let bucket = app
            .world_mut()
            .spawn((
                Bucket { index: 0 },
                BucketKind::Red,
                Sprite::default(),
                BucketHovered,
            ))
            .id();
        app.update();
        assert_eq!(
            app.world().get::<Sprite>(bucket).unwrap().color,
            palette::bucket_hover_color(BucketKind::Red)
        );

        // flipping the kind mid-hover repaints with the new kind's hover tint
        *app.world_mut().get_mut::<BucketKind>(bucket).unwrap() = BucketKind::Green;
        app.update();
        assert_eq!(
            app.world().get::<Sprite>(bucket).unwrap().color,
            palette::bucket_hover_color(BucketKind::Green)
        );

        app.world_mut().entity_mut(bucket).remove::<BucketHovered>();
        app.update();
        assert_eq!(
            app.world().get::<Sprite>(bucket).unwrap().color,
            palette::bucket_color(BucketKind::Green)
        );
    }
}
