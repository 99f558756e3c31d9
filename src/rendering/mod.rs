pub mod ball_color;
pub mod camera;
pub mod hud;
pub mod palette;
