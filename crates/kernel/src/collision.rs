use courier_common::Aabb;

/// Static obstacles the player cannot walk into.
///
/// Boxes are fixed at construction. Every query pads each box outward by
/// the player's collision radius on X and Z, so the player is treated as a
/// point against the padded box.
#[derive(Debug, Clone, Default)]
pub struct ObstacleSet {
    boxes: Vec<Aabb>,
    player_radius: f32,
}

impl ObstacleSet {
    pub fn new(boxes: Vec<Aabb>, player_radius: f32) -> Self {
        Self {
            boxes,
            player_radius,
        }
    }

    /// True if `(x, z)` falls inside any padded obstacle box. Boundaries
    /// count as blocked.
    pub fn collides(&self, x: f32, z: f32) -> bool {
        self.boxes
            .iter()
            .any(|b| b.expanded_xz(self.player_radius).contains_xz(x, z))
    }

    pub fn boxes(&self) -> &[Aabb] {
        &self.boxes
    }

    pub fn player_radius(&self) -> f32 {
        self.player_radius
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}
