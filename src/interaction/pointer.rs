use bevy::prelude::*;

pub fn cursor_world_pos(
    camera_q: &Query<(&Camera, &GlobalTransform)>,
    screen_pos: Vec2,
) -> Option<Vec2> {
    let (camera, cam_tf) = camera_q.iter().next()?;
    camera.viewport_to_world_2d(cam_tf, screen_pos).ok()
}

/// First active touch wins over the mouse cursor.
pub fn primary_pointer_world_pos(
    window: &Window,
    touches: &Touches,
    camera_q: &Query<(&Camera, &GlobalTransform)>,
) -> Option<Vec2> {
    if let Some(touch) = touches.iter().next() {
        return cursor_world_pos(camera_q, touch.position());
    }
    let cursor = window.cursor_position()?;
    cursor_world_pos(camera_q, cursor)
}

pub fn pointer_pressed(buttons: &ButtonInput<MouseButton>, touches: &Touches) -> bool {
    buttons.just_pressed(MouseButton::Left) || touches.iter_just_pressed().next().is_some()
}

pub fn pointer_released(buttons: &ButtonInput<MouseButton>, touches: &Touches) -> bool {
    buttons.just_released(MouseButton::Left) || touches.iter_just_released().next().is_some()
}
