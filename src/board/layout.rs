//! Static board geometry, computed in board space: x grows rightward from the
//! left edge, y grows downward from the top edge (the frame all the classic
//! Plinko numbers are stated in). `board::setup` converts to world space when
//! spawning bodies.

use bevy::math::Vec2;

use crate::core::components::BucketKind;
use crate::core::config::BoardConfig;

/// Vertical gap between the last peg row (plus peg radius) and the bucket line.
const BUCKET_DROP_OFFSET: f32 = 30.0;
/// Edge buckets are this many peg spacings wide.
const EDGE_BUCKET_SCALE: f32 = 1.8;
/// Edge buckets shift outward by this fraction of a spacing to avoid
/// overlapping their neighbor.
const EDGE_BUCKET_SHIFT: f32 = 0.4;

#[derive(Debug, Clone, Copy)]
pub struct PegSpec {
    pub pos: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct BucketSpec {
    pub index: usize,
    pub center_x: f32,
    pub width: f32,
    pub kind: BucketKind,
}

/// Axis-aligned rectangle described by center and half extents (board space).
#[derive(Debug, Clone, Copy)]
pub struct WallSpec {
    pub center: Vec2,
    pub half_extents: Vec2,
}

#[derive(Debug, Clone, Copy)]
pub struct WallSet {
    /// Solid floor under the bucket line (non-eliminating).
    pub bottom: WallSpec,
    /// Elimination sensors just outside the play area.
    pub left: WallSpec,
    pub right: WallSpec,
    pub top: WallSpec,
}

#[derive(Debug, Clone)]
pub struct BoardLayout {
    pub pegs: Vec<PegSpec>,
    /// One slot between each adjacent last-row peg pair plus one beyond each
    /// edge peg; always `last_row_pins + 1` entries.
    pub fall_positions: Vec<f32>,
    pub buckets: Vec<BucketSpec>,
    pub last_peg_row_y: f32,
    pub barrier_y: f32,
    pub bucket_y: f32,
}

/// Peg radius interpolated by normalized distance from the row center; center
/// pegs are enlarged, edge pegs keep the base radius.
pub fn peg_radius(normalized_distance: f32, base_radius: f32) -> f32 {
    if normalized_distance < 0.8 {
        base_radius * (1.3 - 0.6 * normalized_distance)
    } else {
        base_radius
    }
}

impl BoardLayout {
    pub fn build(cfg: &BoardConfig) -> Self {
        // Degenerate configs (flagged by validate()) are clamped to a one-pin
        // grid instead of underflowing the row math.
        let start_pins = cfg.start_pins.max(1);
        let mut pegs = Vec::new();
        let mut last_peg_row_y = cfg.top_margin;

        for row in 0..cfg.rows {
            let pins = start_pins + row;
            let row_width = (pins - 1) as f32 * cfg.peg_spacing;
            let row_offset = (cfg.width - row_width) / 2.0;
            let y = cfg.top_margin + row as f32 * cfg.peg_spacing;
            last_peg_row_y = y;

            let half_span = (pins - 1) as f32 / 2.0;
            for col in 0..pins {
                let mut x = row_offset + col as f32 * cfg.peg_spacing;
                let distance = (col as f32 - half_span).abs();
                let normalized = if half_span > 0.0 {
                    distance / half_span
                } else {
                    0.0
                };
                // Middle-band pegs tilt slightly toward the center (funnel effect).
                if normalized > 0.4 && normalized < 0.8 {
                    let direction = if (col as f32) < half_span { 1.0 } else { -1.0 };
                    x += 2.0 * (normalized - 0.4) * direction;
                }
                pegs.push(PegSpec {
                    pos: Vec2::new(x, y),
                    radius: peg_radius(normalized, cfg.peg_radius),
                });
            }
        }

        let last_pins = start_pins + cfg.rows.saturating_sub(1);
        let row_width = (last_pins - 1) as f32 * cfg.peg_spacing;
        let row_offset = (cfg.width - row_width) / 2.0;

        let mut fall_positions = Vec::with_capacity(last_pins + 1);
        fall_positions.push(row_offset - cfg.peg_spacing / 2.0);
        for i in 0..last_pins - 1 {
            fall_positions.push(row_offset + i as f32 * cfg.peg_spacing + cfg.peg_spacing / 2.0);
        }
        fall_positions
            .push(row_offset + (last_pins - 1) as f32 * cfg.peg_spacing + cfg.peg_spacing / 2.0);

        let last = fall_positions.len() - 1;
        let buckets = fall_positions
            .iter()
            .enumerate()
            .map(|(index, &x)| {
                let (center_x, width) = if index == 0 {
                    (
                        x - cfg.peg_spacing * EDGE_BUCKET_SHIFT,
                        cfg.peg_spacing * EDGE_BUCKET_SCALE,
                    )
                } else if index == last {
                    (
                        x + cfg.peg_spacing * EDGE_BUCKET_SHIFT,
                        cfg.peg_spacing * EDGE_BUCKET_SCALE,
                    )
                } else {
                    (x, cfg.peg_spacing)
                };
                let kind = if index % 2 == 0 {
                    BucketKind::Red
                } else {
                    BucketKind::Green
                };
                BucketSpec {
                    index,
                    center_x,
                    width,
                    kind,
                }
            })
            .collect();

        Self {
            pegs,
            fall_positions,
            buckets,
            last_peg_row_y,
            barrier_y: last_peg_row_y + cfg.peg_spacing / 2.0,
            bucket_y: last_peg_row_y + cfg.peg_radius + BUCKET_DROP_OFFSET,
        }
    }

    pub fn walls(&self, cfg: &BoardConfig) -> WallSet {
        WallSet {
            bottom: WallSpec {
                center: Vec2::new(cfg.width / 2.0, self.bucket_y + cfg.bucket_height),
                half_extents: Vec2::new(cfg.width / 2.0, 5.0),
            },
            left: WallSpec {
                center: Vec2::new(-15.0, cfg.height / 2.0),
                half_extents: Vec2::new(20.0, cfg.height * 0.75),
            },
            right: WallSpec {
                center: Vec2::new(cfg.width + 15.0, cfg.height / 2.0),
                half_extents: Vec2::new(20.0, cfg.height * 0.75),
            },
            top: WallSpec {
                center: Vec2::new(cfg.width / 2.0, -15.0),
                half_extents: Vec2::new(cfg.width * 0.6, 20.0),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classic() -> BoardConfig {
        BoardConfig::default() // width 600, 3 start pins, 12 rows, spacing 32
    }

    #[test]
    fn classic_board_counts() {
        let cfg = classic();
        let layout = BoardLayout::build(&cfg);
        assert_eq!(cfg.last_row_pins(), 14);
        assert_eq!(layout.fall_positions.len(), 15);
        assert_eq!(layout.buckets.len(), 15);
        // rows of 3..=14 pegs
        assert_eq!(layout.pegs.len(), (3..=14).sum::<usize>());
    }

    #[test]
    fn fall_positions_bracket_the_last_row() {
        let layout = BoardLayout::build(&classic());
        // last row: offset (600 - 13*32)/2 = 92, pegs at 92 + i*32
        assert_eq!(layout.fall_positions[0], 92.0 - 16.0);
        assert_eq!(layout.fall_positions[1], 92.0 + 16.0);
        assert_eq!(layout.fall_positions[14], 92.0 + 13.0 * 32.0 + 16.0);
        assert!(layout
            .fall_positions
            .windows(2)
            .all(|w| w[0] < w[1]));
    }

    #[test]
    fn edge_buckets_enlarged_and_shifted() {
        let layout = BoardLayout::build(&classic());
        let first = layout.buckets[0];
        let last = layout.buckets[14];
        assert_eq!(first.width, 32.0 * 1.8);
        assert_eq!(last.width, 32.0 * 1.8);
        assert!(first.center_x < layout.fall_positions[0]);
        assert!(last.center_x > layout.fall_positions[14]);
        assert_eq!(layout.buckets[1].width, 32.0);
        // shifted centers keep edge buckets clear of their neighbors
        assert!(first.center_x + first.width / 2.0 <= layout.buckets[1].center_x - 16.0 + 1e-3);
    }

    #[test]
    fn bucket_kinds_alternate_from_red() {
        let layout = BoardLayout::build(&classic());
        for bucket in &layout.buckets {
            let expected = if bucket.index % 2 == 0 {
                BucketKind::Red
            } else {
                BucketKind::Green
            };
            assert_eq!(bucket.kind, expected, "bucket {}", bucket.index);
        }
    }

    #[test]
    fn center_pegs_enlarged_edges_base() {
        assert_eq!(peg_radius(1.0, 5.0), 5.0);
        assert!(peg_radius(0.0, 5.0) > peg_radius(0.5, 5.0));
        assert!((peg_radius(0.0, 5.0) - 6.5).abs() < 1e-6);
    }

    #[test]
    fn middle_band_pegs_tilt_toward_center() {
        let layout = BoardLayout::build(&classic());
        // last row (14 pegs): col 2 has normalized distance |2-6.5|/6.5 ~ 0.692,
        // inside the (0.4, 0.8) band, so it is nudged rightward (toward center).
        let last_row: Vec<_> = layout
            .pegs
            .iter()
            .filter(|p| (p.pos.y - layout.last_peg_row_y).abs() < 1e-6)
            .collect();
        assert_eq!(last_row.len(), 14);
        let untilted = 92.0 + 2.0 * 32.0;
        assert!(last_row[2].pos.x > untilted);
        // mirrored peg on the right side tilts leftward
        let untilted_right = 92.0 + 11.0 * 32.0;
        assert!(last_row[11].pos.x < untilted_right);
    }

    #[test]
    fn degenerate_config_builds_without_panicking() {
        // start_pins: 0 / rows: 1 parses fine and only warns in validate();
        // the builder must clamp instead of underflowing the row math.
        let mut cfg = classic();
        cfg.start_pins = 0;
        cfg.rows = 1;
        let layout = BoardLayout::build(&cfg);
        assert_eq!(layout.pegs.len(), 1);
        assert_eq!(layout.fall_positions.len(), 2);
        assert_eq!(layout.buckets.len(), 2);

        cfg.rows = 0;
        let layout = BoardLayout::build(&cfg);
        assert!(layout.pegs.is_empty());
        assert_eq!(layout.fall_positions.len(), 2);
        assert!(layout.fall_positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn barrier_sits_between_last_row_and_buckets() {
        let cfg = classic();
        let layout = BoardLayout::build(&cfg);
        assert_eq!(layout.last_peg_row_y, 60.0 + 11.0 * 32.0);
        assert_eq!(layout.barrier_y, layout.last_peg_row_y + 16.0);
        assert_eq!(layout.bucket_y, layout.last_peg_row_y + 5.0 + 30.0);
        assert!(layout.barrier_y < layout.bucket_y);
    }
}
