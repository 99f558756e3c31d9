use bevy::prelude::*;
use bevy::sprite::Anchor;

use crate::core::components::Ball;
use crate::core::config::GameConfig;

#[derive(Component)]
struct HudText;

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_hud)
            .add_systems(Update, update_hud);
    }
}

fn setup_hud(mut commands: Commands, cfg: Res<GameConfig>) {
    let top_left = Vec2::new(-cfg.board.width / 2.0 + 8.0, cfg.board.height / 2.0 - 8.0);
    commands.spawn((
        HudText,
        Text2d::new("balls: 0"),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        TextColor(Color::srgb(0.75, 0.85, 0.95)),
        Anchor::TopLeft,
        Transform::from_translation(top_left.extend(10.0)),
    ));
}

/// The running ball counter the host UI owes the player, plus the drop hint.
fn update_hud(balls: Query<(), With<Ball>>, mut text_q: Query<&mut Text2d, With<HudText>>) {
    let Ok(mut text) = text_q.single_mut() else {
        return;
    };
    let count = balls.iter().count();
    text.0 = format!("balls: {count}   [space] or click top to drop   click bucket to toggle");
}
