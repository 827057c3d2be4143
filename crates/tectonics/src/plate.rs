use glam::Vec2;

/// One tectonic plate. Immutable for the lifetime of a generation attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plate {
    pub id: usize,
    /// Seed point in grid coordinates.
    pub seed: Vec2,
    pub translation: Vec2,
    pub rotation_deg: f32,
}

impl Plate {
    pub fn new(id: usize, seed: Vec2, translation: Vec2, rotation_deg: f32) -> Self {
        Self {
            id,
            seed,
            translation,
            rotation_deg,
        }
    }

    /// Local movement of the plate at `pos`.
    ///
    /// Translation plus the displacement of `pos` when rotated about the seed by
    /// `rotation_deg * rotation_multiple`. The displacement term stands in for angular velocity;
    /// boundary thresholds are calibrated against exactly this sum.
    pub fn movement_at(&self, pos: Vec2, rotation_multiple: f32) -> Vec2 {
        let rel = pos - self.seed;
        let angle = self.rotation_deg.to_radians() * rotation_multiple;
        let rotated = Vec2::from_angle(angle).rotate(rel);
        (rel - rotated) + self.translation
    }
}
