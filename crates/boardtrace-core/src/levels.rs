// Rust guideline compliant 2026-02-06

//! Stage ordering and movement classification.
//!
//! Only four stages take part in the ordered chain used for regression
//! handling:
//!
//! - None (0) → Proposed (1) → Accepted (2) → In-Progress (3) → Done (4)
//!
//! Blocked and Unmapped sit outside the chain. A card can enter and leave
//! them from anywhere, but they are never compared against the ordered
//! stages.

use crate::Stage;

/// Highest level in the ordered chain.
pub const MAX_LEVEL: u8 = 4;

/// Direction of a card move relative to the ordered chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    /// The card moved to a higher level.
    Forward,
    /// The card moved to a lower level.
    Regression,
    /// The card stayed on the same level.
    Lateral,
}

impl Movement {
    /// Classifies a move between two levels.
    pub fn between(from_level: u8, to_level: u8) -> Self {
        match to_level.cmp(&from_level) {
            std::cmp::Ordering::Greater => Self::Forward,
            std::cmp::Ordering::Less => Self::Regression,
            std::cmp::Ordering::Equal => Self::Lateral,
        }
    }
}

impl Stage {
    /// The stages that carry an entry timestamp, lowest first.
    pub const ORDERED: [Stage; 4] = [
        Stage::Proposed,
        Stage::Accepted,
        Stage::InProgress,
        Stage::Done,
    ];

    /// Returns the stage's position in the ordered chain.
    ///
    /// Blocked and Unmapped have no level.
    pub const fn level(self) -> Option<u8> {
        match self {
            Stage::None => Some(0),
            Stage::Proposed => Some(1),
            Stage::Accepted => Some(2),
            Stage::InProgress => Some(3),
            Stage::Done => Some(MAX_LEVEL),
            Stage::Blocked | Stage::Unmapped => None,
        }
    }

    /// Returns the stage sitting at `level` of the ordered chain.
    pub const fn from_level(level: u8) -> Option<Stage> {
        match level {
            0 => Some(Stage::None),
            1 => Some(Stage::Proposed),
            2 => Some(Stage::Accepted),
            3 => Some(Stage::InProgress),
            MAX_LEVEL => Some(Stage::Done),
            _ => None,
        }
    }

    /// Returns true if the stage takes part in regression comparisons.
    pub const fn is_ordered(self) -> bool {
        self.level().is_some()
    }
}
