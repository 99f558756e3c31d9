use bevy::prelude::*;
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    #[serde(rename = "autoClose")]
    pub auto_close: f32,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 600.0,
            title: "Pegfall".into(),
            auto_close: 0.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GravityConfig {
    pub y: f32,
}
impl Default for GravityConfig {
    fn default() -> Self {
        Self { y: -900.0 }
    }
}

/// Static board geometry parameters. All lengths are pixels in board space
/// (x to the right from the left edge, y downward from the top edge).
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BoardConfig {
    pub width: f32,
    pub height: f32,
    pub start_pins: usize,
    pub rows: usize,
    pub peg_spacing: f32,
    pub top_margin: f32,
    pub peg_radius: f32,
    pub bucket_height: f32,
}
impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 600.0,
            start_pins: 3,
            rows: 12,
            peg_spacing: 32.0,
            top_margin: 60.0,
            peg_radius: 5.0,
            bucket_height: 30.0,
        }
    }
}
impl BoardConfig {
    #[inline]
    pub fn last_row_pins(&self) -> usize {
        self.start_pins + self.rows.saturating_sub(1)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BallConfig {
    pub radius: f32,
    /// Pointer pick-up radius around a ball (larger than the collider).
    pub grab_radius: f32,
    pub restitution: f32,
    pub friction: f32,
    pub linear_damping: f32,
    pub density: f32,
    /// Board-space y at which new and respawned balls appear.
    pub spawn_y: f32,
    /// Standard deviation of the Box-Muller spawn jitter.
    pub spawn_std_dev: f32,
}
impl Default for BallConfig {
    fn default() -> Self {
        Self {
            radius: 10.0,
            grab_radius: 25.0,
            restitution: 0.5,
            friction: 0.1,
            linear_damping: 0.01,
            density: 0.8,
            spawn_y: 50.0,
            spawn_std_dev: 10.0,
        }
    }
}

/// Delays counted in countdown-system passes (one per frame), not wall-clock.
/// Defaults approximate the original 60 Hz timings: 150ms drop cooldown,
/// 300ms removal beat, 35ms respawn beat, 100ms elimination beat.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TimingConfig {
    pub drop_cooldown: u32,
    pub remove_delay: u32,
    pub respawn_delay: u32,
    pub eliminate_delay: u32,
}
impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            drop_cooldown: 9,
            remove_delay: 18,
            respawn_delay: 2,
            eliminate_delay: 6,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DragConfig {
    pub enabled: bool,
    /// Held balls are clamped this far (board-space) above the bucket line.
    pub clamp_margin: f32,
    /// Releasing below (bucket line - this margin) snaps the ball back to spawn.
    pub release_snap_margin: f32,
}
impl Default for DragConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            clamp_margin: 40.0,
            release_snap_margin: 30.0,
        }
    }
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq, Default)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub gravity: GravityConfig,
    pub board: BoardConfig,
    pub ball: BallConfig,
    pub timings: TimingConfig,
    pub drag: DragConfig,
}

impl GameConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        ron::from_str(&data).map_err(|e| format!("parse RON: {e}"))
    }

    /// Missing or malformed config falls back to defaults with a warning.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load_from_file(&path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("config {}: {e}; using defaults", path.as_ref().display());
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push("window dimensions must be > 0".into());
        }
        if self.window.auto_close < 0.0 {
            w.push(format!(
                "window.autoClose {} negative -> treated as disabled (should be >= 0)",
                self.window.auto_close
            ));
        }
        if self.gravity.y >= 0.0 {
            w.push(format!(
                "gravity.y {} is not downward; balls will never reach the buckets",
                self.gravity.y
            ));
        }
        let b = &self.board;
        if b.width <= 0.0 || b.height <= 0.0 {
            w.push("board dimensions must be > 0".into());
        }
        if b.start_pins < 2 {
            w.push(format!(
                "board.start_pins {} < 2 -> degenerate first row",
                b.start_pins
            ));
        }
        if b.rows == 0 {
            w.push("board.rows is 0; no pegs will spawn".into());
        }
        if b.peg_spacing <= 0.0 {
            w.push("board.peg_spacing must be > 0".into());
        } else if b.peg_radius * 2.0 >= b.peg_spacing {
            w.push(format!(
                "board.peg_radius {} too large for spacing {} (pegs overlap)",
                b.peg_radius, b.peg_spacing
            ));
        }
        let row_span = (b.last_row_pins().saturating_sub(1)) as f32 * b.peg_spacing;
        if row_span > b.width {
            w.push(format!(
                "last peg row spans {row_span} but board.width is {}; edge buckets land off-board",
                b.width
            ));
        }
        if self.ball.radius <= 0.0 {
            w.push("ball.radius must be > 0".into());
        }
        if self.ball.grab_radius < self.ball.radius {
            w.push(format!(
                "ball.grab_radius {} smaller than ball.radius {} -> balls hard to pick up",
                self.ball.grab_radius, self.ball.radius
            ));
        }
        if !(0.0..=1.5).contains(&self.ball.restitution) {
            w.push(format!(
                "ball.restitution {} outside recommended 0..1.5",
                self.ball.restitution
            ));
        }
        if self.ball.density <= 0.0 {
            w.push("ball.density must be > 0".into());
        }
        if self.ball.spawn_std_dev < 0.0 {
            w.push("ball.spawn_std_dev negative".into());
        }
        if self.ball.spawn_y >= b.top_margin {
            w.push(format!(
                "ball.spawn_y {} at or below the first peg row (top_margin {})",
                self.ball.spawn_y, b.top_margin
            ));
        }
        if self.timings.remove_delay == 0 {
            w.push("timings.remove_delay 0 -> losing balls vanish with no visual beat".into());
        }
        if self.drag.enabled && self.drag.clamp_margin < self.drag.release_snap_margin {
            w.push(format!(
                "drag.clamp_margin {} below release_snap_margin {} -> every release snaps to spawn",
                self.drag.clamp_margin, self.drag.release_snap_margin
            ));
        }
        w
    }
}
