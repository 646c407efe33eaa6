use std::path::PathBuf;
use thiserror::Error;

use crate::types::Shape2;

#[derive(Error, Debug)]
pub enum XrayError {
    #[error("Invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f32,
        reason: &'static str,
    },

    #[error("ROI mask selects no pixels")]
    EmptyRoi,

    #[error("Shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch { expected: Shape2, found: Shape2 },

    #[error("Failed to read config file {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, XrayError>;

/// Pass `value` through if it is strictly positive (and not NaN)
pub(crate) fn positive(name: &'static str, value: f32) -> Result<f32> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(XrayError::InvalidParameter { name, value, reason: "must be positive" })
    }
}

pub(crate) fn same_shape(expected: Shape2, found: Shape2) -> Result<()> {
    if expected == found { Ok(()) }
    else                 { Err(XrayError::ShapeMismatch { expected, found }) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1.0e-6)]
    #[case(35.0)]
    #[case(f32::INFINITY)]
    fn positive_accepts(#[case] value: f32) {
        assert_eq!(positive("kvp", value).unwrap(), value);
    }

    #[rstest]
    #[case(0.0)]
    #[case(-0.0)]
    #[case(-20.0)]
    #[case(f32::NAN)]
    fn positive_rejects(#[case] value: f32) {
        let err = positive("kvp", value).unwrap_err();
        assert!(matches!(err, XrayError::InvalidParameter { name: "kvp", .. }));
    }

    #[test]
    fn mismatched_shapes_are_reported_with_both_shapes() {
        let err = same_shape((256, 256), (166, 256)).unwrap_err();
        assert_eq!(err.to_string(), "Shape mismatch: expected (256, 256), found (166, 256)");
    }
}
