//! Fixed 33-point body-pose landmark layout.
//!
//! The upstream pose tracker delivers landmarks in a fixed-index layout;
//! these named indices are the only place the layout is spelled out. The
//! feature extractor addresses frames exclusively through this module.

/// Total landmarks in the standard body layout.
pub const POSE_LANDMARK_COUNT: usize = 33;

pub const NOSE: usize = 0;
pub const LEFT_SHOULDER: usize = 11;
pub const RIGHT_SHOULDER: usize = 12;
pub const LEFT_ELBOW: usize = 13;
pub const RIGHT_ELBOW: usize = 14;
pub const LEFT_WRIST: usize = 15;
pub const RIGHT_WRIST: usize = 16;
pub const LEFT_HIP: usize = 23;
pub const RIGHT_HIP: usize = 24;
pub const LEFT_KNEE: usize = 25;
pub const RIGHT_KNEE: usize = 26;
pub const LEFT_ANKLE: usize = 27;
pub const RIGHT_ANKLE: usize = 28;

/// Which side of the body faces the pitcher.
///
/// The "front" leg is the stride leg: left for a right-handed batter in the
/// conventional side-on camera framing. Configurable because the framing
/// assumption does not hold for left-handed batters or mirrored footage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodySide {
    Left,
    Right,
}

impl BodySide {
    pub fn opposite(&self) -> BodySide {
        match self {
            BodySide::Left => BodySide::Right,
            BodySide::Right => BodySide::Left,
        }
    }

    /// Layout index of this side's hip landmark.
    pub fn hip_index(&self) -> usize {
        match self {
            BodySide::Left => LEFT_HIP,
            BodySide::Right => RIGHT_HIP,
        }
    }

    /// Layout index of this side's knee landmark.
    pub fn knee_index(&self) -> usize {
        match self {
            BodySide::Left => LEFT_KNEE,
            BodySide::Right => RIGHT_KNEE,
        }
    }

    /// Layout index of this side's ankle landmark.
    pub fn ankle_index(&self) -> usize {
        match self {
            BodySide::Left => LEFT_ANKLE,
            BodySide::Right => RIGHT_ANKLE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_are_within_layout() {
        for index in [
            NOSE,
            LEFT_SHOULDER,
            RIGHT_SHOULDER,
            LEFT_ELBOW,
            RIGHT_ELBOW,
            LEFT_WRIST,
            RIGHT_WRIST,
            LEFT_HIP,
            RIGHT_HIP,
            LEFT_KNEE,
            RIGHT_KNEE,
            LEFT_ANKLE,
            RIGHT_ANKLE,
        ] {
            assert!(index < POSE_LANDMARK_COUNT);
        }
    }

    #[test]
    fn test_body_side_indices() {
        assert_eq!(BodySide::Left.ankle_index(), LEFT_ANKLE);
        assert_eq!(BodySide::Right.ankle_index(), RIGHT_ANKLE);
        assert_eq!(BodySide::Left.opposite(), BodySide::Right);
        assert_eq!(BodySide::Left.opposite().knee_index(), RIGHT_KNEE);
    }
}
