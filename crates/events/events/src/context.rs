//! State handed to callbacks during a fire pass.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::registration::Registration;

/// Dispatch state for one fire pass.
///
/// A single context is allocated per [`Registry::fire`](crate::Registry::fire)
/// call and updated before each callback runs. The value returned by `fire`
/// holds the state of the last invoked callback, or only `target` and `data`
/// when nothing matched.
#[derive(Debug, Clone)]
pub struct EventContext {
    /// Zero-based position within the matched set of this pass.
    pub index: Option<usize>,
    /// The registration being invoked.
    pub registration: Option<Arc<Registration>>,
    /// Data passed to `fire`, constant across the pass.
    pub data: Value,
    /// Data attached to the registration being invoked.
    pub registered_data: Value,
    /// Value returned by the previously invoked callback.
    pub returned: Option<Value>,
    /// The raw name passed to `fire`.
    pub target: String,
    /// `"<namespace>::<name>"` of the registration being invoked.
    pub current_target: Option<String>,
}

impl EventContext {
    /// Creates the context a fire pass starts from.
    pub fn new(target: impl Into<String>, data: Value) -> Self {
        Self {
            index: None,
            registration: None,
            data,
            registered_data: Value::Null,
            returned: None,
            target: target.into(),
            current_target: None,
        }
    }

    /// Points the context at the next registration.
    pub(crate) fn advance(&mut self, index: usize, registration: &Arc<Registration>) {
        self.index = Some(index);
        self.registered_data = registration.data().clone();
        self.current_target = Some(registration.qualified_name());
        self.registration = Some(Arc::clone(registration));
    }

    /// Whether the last invoked callback returned exactly `false`.
    pub fn is_cancelled(&self) -> bool {
        matches!(self.returned, Some(Value::Bool(false)))
    }

    /// Whether any callback ran during the pass.
    pub fn was_dispatched(&self) -> bool {
        self.registration.is_some()
    }

    /// Deserializes the fire data to a specific type.
    pub fn data_as<T: for<'de> Deserialize<'de>>(&self) -> Option<T> {
        T::deserialize(&self.data).ok()
    }

    /// Deserializes the registered data to a specific type.
    pub fn registered_as<T: for<'de> Deserialize<'de>>(&self) -> Option<T> {
        T::deserialize(&self.registered_data).ok()
    }
}
