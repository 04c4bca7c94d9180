/// Fixed wall slots for the 3D gallery
///
/// The reference layout is two rows of three frames, the second row set
/// back along the depth axis. Index to slot is a pure lookup so a gallery
/// re-renders without jitter.
use cgmath::Vector3;

/// Reference slot table: front row at z = 0, back row at z = -8
pub const REFERENCE_SLOTS: [[f32; 3]; 6] = [
    [-4.0, 1.0, 0.0],
    [0.0, 1.0, 0.0],
    [4.0, 1.0, 0.0],
    [-4.0, 1.0, -8.0],
    [0.0, 1.0, -8.0],
    [4.0, 1.0, -8.0],
];

/// Where artworks beyond the table are hung
pub const FALLBACK_POSITION: [f32; 3] = [0.0, 1.0, 0.0];

/// Where the empty-gallery prompt is shown
pub const PLACEHOLDER_POSITION: [f32; 3] = [0.0, 0.0, -5.0];

/// A 3D position assigned to one artwork index
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    /// Artwork index this slot was requested for
    pub index: usize,
    pub position: Vector3<f32>,
}

impl Slot {
    /// True when the index is past the table and the fallback was used
    pub fn is_overflow(&self, layout: &SlotLayout) -> bool {
        self.index >= layout.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlotLayout {
    positions: Vec<Vector3<f32>>,
    fallback: Vector3<f32>,
    placeholder: Vector3<f32>,
}

impl Default for SlotLayout {
    fn default() -> Self {
        Self::new(REFERENCE_SLOTS, FALLBACK_POSITION, PLACEHOLDER_POSITION)
    }
}

impl SlotLayout {
    pub fn new(
        positions: impl IntoIterator<Item = [f32; 3]>,
        fallback: [f32; 3],
        placeholder: [f32; 3],
    ) -> Self {
        Self {
            positions: positions.into_iter().map(Vector3::from).collect(),
            fallback: fallback.into(),
            placeholder: placeholder.into(),
        }
    }

    /// Slot for the artwork at `index`
    ///
    /// Indices past the table get the fallback position, so overflow
    /// artworks stay visible.
    pub fn slot_for(&self, index: usize) -> Slot {
        let position = self.positions.get(index).copied().unwrap_or(self.fallback);
        Slot { index, position }
    }

    /// Slot of the empty-gallery placeholder
    pub fn placeholder_slot(&self) -> Slot {
        Slot {
            index: 0,
            position: self.placeholder,
        }
    }

    /// Number of distinct table slots
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
