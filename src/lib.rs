//! Vector Visibility - reactive view state for projectile motion vectors
//!
//! Core modules:
//! - `property`: Observable values with ordered change listeners
//! - `mode`: Total / components vector mode
//! - `visibility`: Input toggles and the derived per-arrow visibility flags
//! - `settings`: Serializable defaults for the toggles
//! - `registry`: Process-wide table of live components (introspection)

pub mod error;
pub mod mode;
pub mod property;
pub mod registry;
pub mod settings;
pub mod visibility;

pub use error::{Error, Result};
pub use mode::VectorMode;
pub use property::{ListenerId, Property};
pub use settings::VisibilityInputs;
pub use visibility::{
    PropertyKey, PropertyValue, VectorFlags, VectorToggles, VectorVisibility, VisibilitySnapshot,
};
