/// Width of one hex column in projected space (odd-q layout).
pub const HEX_WIDTH: f32 = 1.732_050_8; // sqrt(3)
/// Height of one hex row in projected space.
pub const HEX_HEIGHT: f32 = 1.5;
pub const HALF_HEX_HEIGHT: f32 = HEX_HEIGHT / 2.0;

/// Neighbour offsets `(dx, dy)` for tiles in even columns.
///
/// Order matters: boundary detection records the first differing neighbour.
pub const EVEN_COL_OFFSETS: [(i32, i32); 6] = [(-1, 0), (1, 0), (0, -1), (0, 1), (-1, -1), (1, -1)];
/// Neighbour offsets `(dx, dy)` for tiles in odd columns.
pub const ODD_COL_OFFSETS: [(i32, i32); 6] = [(-1, 0), (1, 0), (0, -1), (0, 1), (-1, 1), (1, 1)];

// Boundary classification thresholds, tuned against the rotation-as-displacement movement formula.
pub const CONVERGENT_THRESHOLD: f32 = 0.25;
pub const DIVERGENT_THRESHOLD: f32 = -0.15;
pub const TRANSFORM_THRESHOLD: f32 = 0.4;

/// Quality gate: max share of tiles with nonzero closeness, and of raw boundary tiles.
pub const SATURATION_LIMIT: f32 = 0.45;
/// Quality gate: max average closeness (0..255) among influenced tiles.
pub const CLOSENESS_LIMIT: f32 = 80.0;

/// Site coordinates are drawn on a grid of this many steps per axis.
pub const SITE_RESOLUTION: u32 = 10_000;
/// Lloyd iterations applied to auxiliary region-cell sites.
pub const REGION_CELL_RELAXATION_STEPS: usize = 2;

/// Plate speed is `SPEED_BASE + rng(SPEED_STEPS) / SPEED_DIVISOR`, i.e. 0.5..1.0.
pub const SPEED_BASE: f32 = 0.5;
pub const SPEED_STEPS: u32 = 100;
pub const SPEED_DIVISOR: f32 = 200.0;
/// Rotation is `(rng(ROTATION_STEPS) - ROTATION_STEPS / 2) * ROTATION_SCALE` degrees, about ±3°.
pub const ROTATION_STEPS: u32 = 60;
pub const ROTATION_SCALE: f32 = 0.1;

/// Default magnitude variance when a directionality block omits it.
pub const DEFAULT_MAGNITUDE_VARIANCE: f32 = 0.35;

/// Per-tile kinematics are stored as `round(value * KINEMATIC_SCALE)` clamped to ±127.
pub const KINEMATIC_SCALE: f32 = 100.0;

pub const MIN_PLATE_COUNT: usize = 2;
pub const MAX_PLATE_COUNT: usize = 32;
pub const MAX_RELAXATION_STEPS: usize = 50;
pub const MAX_ROTATION_MULTIPLE: f32 = 5.0;
