//! Total-or-components vector mode

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Which decomposition of the velocity and force vectors is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VectorMode {
    /// One arrow for the whole vector
    #[default]
    Total,
    /// Separate x and y arrows
    Components,
}

impl VectorMode {
    pub const ALL: [VectorMode; 2] = [VectorMode::Total, VectorMode::Components];

    /// Radio-button value for this mode
    pub fn as_str(&self) -> &'static str {
        match self {
            VectorMode::Total => "total",
            VectorMode::Components => "components",
        }
    }

    pub fn is_total(&self) -> bool {
        *self == VectorMode::Total
    }

    pub fn is_components(&self) -> bool {
        *self == VectorMode::Components
    }
}

impl FromStr for VectorMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "total" => Ok(VectorMode::Total),
            "components" => Ok(VectorMode::Components),
            _ => Err(Error::invalid("vector mode", s)),
        }
    }
}

impl fmt::Display for VectorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_modes() {
        assert_eq!("total".parse::<VectorMode>().unwrap(), VectorMode::Total);
        assert_eq!("components".parse::<VectorMode>().unwrap(), VectorMode::Components);
        for mode in VectorMode::ALL {
            assert_eq!(mode.as_str().parse::<VectorMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "sideways".parse::<VectorMode>().unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("sideways"));
    }

    #[test]
    fn test_parse_is_exact() {
        for value in ["component", "TOTAL", " total", "Components", "components ", ""] {
            let err = value.parse::<VectorMode>().unwrap_err();
            assert!(err.is_invalid_argument(), "{:?} should be rejected", value);
        }
    }

    #[test]
    fn test_parse_agrees_with_serde() {
        for value in ["total", "components", "component", "TOTAL", " total"] {
            let parsed = value.parse::<VectorMode>().ok();
            let deserialized = serde_json::from_value::<VectorMode>(serde_json::Value::from(value)).ok();
            assert_eq!(parsed, deserialized, "{:?}", value);
        }
    }

    #[test]
    fn test_serde_uses_wire_names() {
        assert_eq!(serde_json::to_string(&VectorMode::Components).unwrap(), "\"components\"");
        let mode: VectorMode = serde_json::from_str("\"total\"").unwrap();
        assert_eq!(mode, VectorMode::Total);
    }
}
