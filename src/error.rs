//! Error taxonomy shared by the voting, extraction and refinement stages.
//!
//! Only malformed input is an error. A valid mask that simply produces no
//! qualifying peak is reported as an empty result, never as a `HoughError`.

/// Reasons why a detection run refuses to start.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HoughError {
    /// The mask has zero width or zero height.
    EmptyMask { width: usize, height: usize },
    /// A raw buffer does not match the declared mask dimensions.
    MaskSizeMismatch { expected: usize, actual: usize },
    /// A configured inclusive range has `min > max`.
    EmptyRange {
        axis: &'static str,
        min: i32,
        max: i32,
    },
    /// A scalar parameter is non-finite or outside its admissible domain.
    InvalidParameter { name: &'static str, value: f32 },
}

impl std::fmt::Display for HoughError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HoughError::EmptyMask { width, height } => {
                write!(f, "edge mask has zero area ({width}x{height})")
            }
            HoughError::MaskSizeMismatch { expected, actual } => write!(
                f,
                "mask buffer length {actual} does not match dimensions ({expected} expected)"
            ),
            HoughError::EmptyRange { axis, min, max } => {
                write!(f, "empty {axis} range [{min}, {max}]")
            }
            HoughError::InvalidParameter { name, value } => {
                write!(f, "invalid parameter {name} = {value}")
            }
        }
    }
}

impl std::error::Error for HoughError {}

pub type HoughResult<T> = Result<T, HoughError>;

#[cfg(test)]
mod tests {
    use super::HoughError;

    #[test]
    fn display_names_the_offending_axis() {
        let err = HoughError::EmptyRange {
            axis: "radius",
            min: 35,
            max: 25,
        };
        assert_eq!(err.to_string(), "empty radius range [35, 25]");
    }
}
