//! Recall rating given by the learner after seeing an item.
use crate::error::{Result, SrsError};

/// Four-button rating. Discriminants match the values the UI layer sends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rating {
    Again = 0,
    Hard = 1,
    Good = 2,
    Easy = 3,
}

impl Rating {
    pub const ALL: [Rating; 4] = [Rating::Again, Rating::Hard, Rating::Good, Rating::Easy];

    /// SM-2 quality score (0-5 scale) for this rating.
    pub fn quality(self) -> u8 {
        match self {
            Rating::Again => 0,
            Rating::Hard => 3,
            Rating::Good => 4,
            Rating::Easy => 5,
        }
    }

    pub fn is_success(self) -> bool {
        self != Rating::Again
    }
}

impl TryFrom<u8> for Rating {
    type Error = SrsError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Rating::Again),
            1 => Ok(Rating::Hard),
            2 => Ok(Rating::Good),
            3 => Ok(Rating::Easy),
            other => Err(SrsError::InvalidRating(other)),
        }
    }
}
