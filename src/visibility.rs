//! Vector visibility state
//!
//! `VectorToggles` holds the user-facing inputs (checkboxes and the
//! total/components radio group). `VectorVisibility` embeds it and adds the
//! four derived flags the scene uses to show or hide each arrow.
//!
//! Every mutation goes through one batched update:
//! 1. write the changed inputs
//! 2. recompute all derived flags
//! 3. notify input listeners, then derived listeners
//!
//! so a listener never sees a half-updated set of flags.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::mode::VectorMode;
use crate::property::{ListenerId, Property};
use crate::registry::{self, Registration};
use crate::settings::VisibilityInputs;

/// Name under which every instance is registered
pub const REGISTRY_NAME: &str = "VectorVisibility";

/// Every observable property of the state, inputs first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PropertyKey {
    VelocityVectorsOn,
    AccelerationVectorsOn,
    ForceVectorsOn,
    Mode,
    TotalVelocityVectorOn,
    ComponentVelocityVectorsOn,
    TotalForceVectorOn,
    ComponentForceVectorsOn,
}

impl PropertyKey {
    pub const ALL: [PropertyKey; 8] = [
        PropertyKey::VelocityVectorsOn,
        PropertyKey::AccelerationVectorsOn,
        PropertyKey::ForceVectorsOn,
        PropertyKey::Mode,
        PropertyKey::TotalVelocityVectorOn,
        PropertyKey::ComponentVelocityVectorsOn,
        PropertyKey::TotalForceVectorOn,
        PropertyKey::ComponentForceVectorsOn,
    ];

    pub const DERIVED: [PropertyKey; 4] = [
        PropertyKey::TotalVelocityVectorOn,
        PropertyKey::ComponentVelocityVectorsOn,
        PropertyKey::TotalForceVectorOn,
        PropertyKey::ComponentForceVectorsOn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyKey::VelocityVectorsOn => "velocity_vectors_on",
            PropertyKey::AccelerationVectorsOn => "acceleration_vectors_on",
            PropertyKey::ForceVectorsOn => "force_vectors_on",
            PropertyKey::Mode => "mode",
            PropertyKey::TotalVelocityVectorOn => "total_velocity_vector_on",
            PropertyKey::ComponentVelocityVectorsOn => "component_velocity_vectors_on",
            PropertyKey::TotalForceVectorOn => "total_force_vector_on",
            PropertyKey::ComponentForceVectorsOn => "component_force_vectors_on",
        }
    }

    /// Derived properties are read-only
    pub fn is_derived(&self) -> bool {
        PropertyKey::DERIVED.contains(self)
    }
}

impl FromStr for PropertyKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PropertyKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| Error::invalid("property name", s))
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of any property, as seen through the keyed API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyValue {
    Bool(bool),
    Mode(VectorMode),
}

impl PropertyValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(on) => Some(*on),
            PropertyValue::Mode(_) => None,
        }
    }

    pub fn as_mode(&self) -> Option<VectorMode> {
        match self {
            PropertyValue::Mode(mode) => Some(*mode),
            PropertyValue::Bool(_) => None,
        }
    }
}

/// Derived arrow visibilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VectorFlags {
    pub total_velocity_vector_on: bool,
    pub component_velocity_vectors_on: bool,
    pub total_force_vector_on: bool,
    pub component_force_vectors_on: bool,
}

impl VectorFlags {
    /// The recompute rule. Pure function of the inputs.
    pub fn from_inputs(inputs: &VisibilityInputs) -> Self {
        let total = inputs.mode.is_total();
        let components = inputs.mode.is_components();
        Self {
            total_velocity_vector_on: inputs.velocity_vectors_on && total,
            component_velocity_vectors_on: inputs.velocity_vectors_on && components,
            total_force_vector_on: inputs.force_vectors_on && total,
            component_force_vectors_on: inputs.force_vectors_on && components,
        }
    }
}

/// Every property value at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilitySnapshot {
    #[serde(flatten)]
    pub inputs: VisibilityInputs,
    #[serde(flatten)]
    pub flags: VectorFlags,
}

/// User-settable inputs of the vector controls
#[derive(Debug)]
pub struct VectorToggles {
    velocity_vectors_on: Property<bool>,
    acceleration_vectors_on: Property<bool>,
    force_vectors_on: Property<bool>,
    mode: Property<VectorMode>,
}

/// Previous values of the inputs that changed in one update
#[derive(Debug, Default)]
struct InputChanges {
    velocity_vectors_on: Option<bool>,
    acceleration_vectors_on: Option<bool>,
    force_vectors_on: Option<bool>,
    mode: Option<VectorMode>,
}

impl InputChanges {
    fn is_empty(&self) -> bool {
        self.velocity_vectors_on.is_none()
            && self.acceleration_vectors_on.is_none()
            && self.force_vectors_on.is_none()
            && self.mode.is_none()
    }
}

impl VectorToggles {
    pub fn new(inputs: VisibilityInputs) -> Self {
        Self {
            velocity_vectors_on: Property::new(inputs.velocity_vectors_on),
            acceleration_vectors_on: Property::new(inputs.acceleration_vectors_on),
            force_vectors_on: Property::new(inputs.force_vectors_on),
            mode: Property::new(inputs.mode),
        }
    }

    pub fn values(&self) -> VisibilityInputs {
        VisibilityInputs {
            velocity_vectors_on: *self.velocity_vectors_on.get(),
            acceleration_vectors_on: *self.acceleration_vectors_on.get(),
            force_vectors_on: *self.force_vectors_on.get(),
            mode: *self.mode.get(),
        }
    }

    fn write(&mut self, target: VisibilityInputs) -> InputChanges {
        InputChanges {
            velocity_vectors_on: self.velocity_vectors_on.replace(target.velocity_vectors_on),
            acceleration_vectors_on: self.acceleration_vectors_on.replace(target.acceleration_vectors_on),
            force_vectors_on: self.force_vectors_on.replace(target.force_vectors_on),
            mode: self.mode.replace(target.mode),
        }
    }

    fn notify(&mut self, changes: &InputChanges) {
        if let Some(old) = changes.velocity_vectors_on {
            self.velocity_vectors_on.notify(&old);
        }
        if let Some(old) = changes.acceleration_vectors_on {
            self.acceleration_vectors_on.notify(&old);
        }
        if let Some(old) = changes.force_vectors_on {
            self.force_vectors_on.notify(&old);
        }
        if let Some(old) = changes.mode {
            self.mode.notify(&old);
        }
    }

    fn flag(&mut self, key: PropertyKey) -> Option<&mut Property<bool>> {
        match key {
            PropertyKey::VelocityVectorsOn => Some(&mut self.velocity_vectors_on),
            PropertyKey::AccelerationVectorsOn => Some(&mut self.acceleration_vectors_on),
            PropertyKey::ForceVectorsOn => Some(&mut self.force_vectors_on),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct DerivedFlags {
    total_velocity_vector_on: Property<bool>,
    component_velocity_vectors_on: Property<bool>,
    total_force_vector_on: Property<bool>,
    component_force_vectors_on: Property<bool>,
}

impl DerivedFlags {
    fn new(flags: VectorFlags) -> Self {
        Self {
            total_velocity_vector_on: Property::new(flags.total_velocity_vector_on),
            component_velocity_vectors_on: Property::new(flags.component_velocity_vectors_on),
            total_force_vector_on: Property::new(flags.total_force_vector_on),
            component_force_vectors_on: Property::new(flags.component_force_vectors_on),
        }
    }

    fn values(&self) -> VectorFlags {
        VectorFlags {
            total_velocity_vector_on: *self.total_velocity_vector_on.get(),
            component_velocity_vectors_on: *self.component_velocity_vectors_on.get(),
            total_force_vector_on: *self.total_force_vector_on.get(),
            component_force_vectors_on: *self.component_force_vectors_on.get(),
        }
    }

    /// Slots in notification order
    fn slots(&mut self) -> [&mut Property<bool>; 4] {
        [
            &mut self.total_velocity_vector_on,
            &mut self.component_velocity_vectors_on,
            &mut self.total_force_vector_on,
            &mut self.component_force_vectors_on,
        ]
    }

    fn flag(&mut self, key: PropertyKey) -> Option<&mut Property<bool>> {
        match key {
            PropertyKey::TotalVelocityVectorOn => Some(&mut self.total_velocity_vector_on),
            PropertyKey::ComponentVelocityVectorsOn => Some(&mut self.component_velocity_vectors_on),
            PropertyKey::TotalForceVectorOn => Some(&mut self.total_force_vector_on),
            PropertyKey::ComponentForceVectorsOn => Some(&mut self.component_force_vectors_on),
            _ => None,
        }
    }
}

/// Reactive vector visibility for one simulation screen
#[derive(Debug)]
pub struct VectorVisibility {
    toggles: VectorToggles,
    derived: DerivedFlags,
    /// Reset target
    defaults: VisibilityInputs,
    passes: u64,
    _registration: Registration,
}

impl Default for VectorVisibility {
    fn default() -> Self {
        Self::new()
    }
}

impl VectorVisibility {
    pub fn new() -> Self {
        Self::with_defaults(VisibilityInputs::default())
    }

    /// Start from `defaults`, which also become the reset target
    pub fn with_defaults(defaults: VisibilityInputs) -> Self {
        Self {
            toggles: VectorToggles::new(defaults),
            derived: DerivedFlags::new(VectorFlags::from_inputs(&defaults)),
            defaults,
            passes: 0,
            _registration: registry::register(REGISTRY_NAME),
        }
    }

    // === Inputs ===

    pub fn velocity_vectors_on(&self) -> bool {
        *self.toggles.velocity_vectors_on.get()
    }

    pub fn acceleration_vectors_on(&self) -> bool {
        *self.toggles.acceleration_vectors_on.get()
    }

    pub fn force_vectors_on(&self) -> bool {
        *self.toggles.force_vectors_on.get()
    }

    pub fn mode(&self) -> VectorMode {
        *self.toggles.mode.get()
    }

    pub fn set_velocity_vectors_on(&mut self, on: bool) {
        self.apply(VisibilityInputs {
            velocity_vectors_on: on,
            ..self.inputs()
        });
    }

    pub fn set_acceleration_vectors_on(&mut self, on: bool) {
        self.apply(VisibilityInputs {
            acceleration_vectors_on: on,
            ..self.inputs()
        });
    }

    pub fn set_force_vectors_on(&mut self, on: bool) {
        self.apply(VisibilityInputs {
            force_vectors_on: on,
            ..self.inputs()
        });
    }

    pub fn set_mode(&mut self, mode: VectorMode) {
        self.apply(VisibilityInputs {
            mode,
            ..self.inputs()
        });
    }

    /// Set the mode from its radio-button value (`"total"` / `"components"`).
    /// Unknown values leave the state untouched.
    pub fn set_mode_named(&mut self, name: &str) -> Result<()> {
        let mode = name.parse::<VectorMode>().inspect_err(|e| log::warn!("Rejected mode change: {}", e))?;
        self.set_mode(mode);
        Ok(())
    }

    // === Derived ===

    pub fn total_velocity_vector_on(&self) -> bool {
        *self.derived.total_velocity_vector_on.get()
    }

    pub fn component_velocity_vectors_on(&self) -> bool {
        *self.derived.component_velocity_vectors_on.get()
    }

    pub fn total_force_vector_on(&self) -> bool {
        *self.derived.total_force_vector_on.get()
    }

    pub fn component_force_vectors_on(&self) -> bool {
        *self.derived.component_force_vectors_on.get()
    }

    // === Whole-state ===

    pub fn inputs(&self) -> VisibilityInputs {
        self.toggles.values()
    }

    pub fn flags(&self) -> VectorFlags {
        self.derived.values()
    }

    pub fn snapshot(&self) -> VisibilitySnapshot {
        VisibilitySnapshot {
            inputs: self.inputs(),
            flags: self.flags(),
        }
    }

    pub fn defaults(&self) -> VisibilityInputs {
        self.defaults
    }

    /// Recomputation passes run since construction
    pub fn recompute_count(&self) -> u64 {
        self.passes
    }

    /// Set any number of inputs in one update with a single recompute pass
    pub fn apply(&mut self, target: VisibilityInputs) {
        let input_changes = self.toggles.write(target);
        if input_changes.is_empty() {
            return;
        }

        let derived_changes = self.recompute();

        self.toggles.notify(&input_changes);
        for (slot, old) in self.derived.slots().into_iter().zip(derived_changes) {
            if let Some(old) = old {
                slot.notify(&old);
            }
        }
    }

    /// Restore the defaults in one update
    pub fn reset(&mut self) {
        log::debug!("Resetting vector visibility");
        self.apply(self.defaults);
    }

    /// Write the derived flags without notifying.
    /// Returns the old value of each slot that changed.
    fn recompute(&mut self) -> [Option<bool>; 4] {
        self.passes += 1;
        let flags = VectorFlags::from_inputs(&self.toggles.values());
        log::debug!("Recompute pass {}: {:?}", self.passes, flags);

        let [tv, cv, tf, cf] = self.derived.slots();
        [
            tv.replace(flags.total_velocity_vector_on),
            cv.replace(flags.component_velocity_vectors_on),
            tf.replace(flags.total_force_vector_on),
            cf.replace(flags.component_force_vectors_on),
        ]
    }

    // === Keyed access ===

    pub fn get(&self, key: PropertyKey) -> PropertyValue {
        match key {
            PropertyKey::VelocityVectorsOn => PropertyValue::Bool(self.velocity_vectors_on()),
            PropertyKey::AccelerationVectorsOn => PropertyValue::Bool(self.acceleration_vectors_on()),
            PropertyKey::ForceVectorsOn => PropertyValue::Bool(self.force_vectors_on()),
            PropertyKey::Mode => PropertyValue::Mode(self.mode()),
            PropertyKey::TotalVelocityVectorOn => PropertyValue::Bool(self.total_velocity_vector_on()),
            PropertyKey::ComponentVelocityVectorsOn => {
                PropertyValue::Bool(self.component_velocity_vectors_on())
            }
            PropertyKey::TotalForceVectorOn => PropertyValue::Bool(self.total_force_vector_on()),
            PropertyKey::ComponentForceVectorsOn => PropertyValue::Bool(self.component_force_vectors_on()),
        }
    }

    pub fn get_named(&self, name: &str) -> Result<PropertyValue> {
        Ok(self.get(name.parse()?))
    }

    /// Register a change listener for `key`, called with `(new, old)`
    pub fn subscribe<F>(&mut self, key: PropertyKey, mut listener: F) -> ListenerId
    where
        F: FnMut(PropertyValue, PropertyValue) + Send + 'static,
    {
        if key == PropertyKey::Mode {
            return self
                .toggles
                .mode
                .subscribe(move |new, old| listener(PropertyValue::Mode(*new), PropertyValue::Mode(*old)));
        }
        self.bool_property(key)
            .subscribe(move |new, old| listener(PropertyValue::Bool(*new), PropertyValue::Bool(*old)))
    }

    pub fn subscribe_named<F>(&mut self, name: &str, listener: F) -> Result<ListenerId>
    where
        F: FnMut(PropertyValue, PropertyValue) + Send + 'static,
    {
        let key = name.parse()?;
        Ok(self.subscribe(key, listener))
    }

    /// Returns false if `id` is not subscribed to `key`
    pub fn unsubscribe(&mut self, key: PropertyKey, id: ListenerId) -> bool {
        if key == PropertyKey::Mode {
            return self.toggles.mode.unsubscribe(id);
        }
        self.bool_property(key).unsubscribe(id)
    }

    pub fn listener_count(&self, key: PropertyKey) -> usize {
        match key {
            PropertyKey::VelocityVectorsOn => self.toggles.velocity_vectors_on.listener_count(),
            PropertyKey::AccelerationVectorsOn => self.toggles.acceleration_vectors_on.listener_count(),
            PropertyKey::ForceVectorsOn => self.toggles.force_vectors_on.listener_count(),
            PropertyKey::Mode => self.toggles.mode.listener_count(),
            PropertyKey::TotalVelocityVectorOn => self.derived.total_velocity_vector_on.listener_count(),
            PropertyKey::ComponentVelocityVectorsOn => {
                self.derived.component_velocity_vectors_on.listener_count()
            }
            PropertyKey::TotalForceVectorOn => self.derived.total_force_vector_on.listener_count(),
            PropertyKey::ComponentForceVectorsOn => self.derived.component_force_vectors_on.listener_count(),
        }
    }

    /// Every key except `Mode` names a bool property
    fn bool_property(&mut self, key: PropertyKey) -> &mut Property<bool> {
        let property = if key.is_derived() {
            self.derived.flag(key)
        } else {
            self.toggles.flag(key)
        };
        property.unwrap_or_else(|| unreachable!("{} is not a bool property", key))
    }
}
