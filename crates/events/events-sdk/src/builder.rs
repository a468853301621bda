//! Namespace-scoped helpers and payload construction.

use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

use sync_events::{
    Callback, EventContext, EventResult, NAMESPACE_SEPARATOR, Registration, Registry,
    SubscribeOptions, WILDCARD,
};

/// Fires and subscribes inside one fixed namespace.
///
/// `emitter.fire("saved", data)` fires `"<namespace>::saved"`, which only
/// reaches registrations in that namespace.
#[derive(Debug, Clone)]
pub struct NamespacedEmitter<'r> {
    registry: &'r Registry,
    namespace: String,
}

impl<'r> NamespacedEmitter<'r> {
    /// Creates an emitter for `namespace` on `registry`.
    pub fn new(registry: &'r Registry, namespace: impl Into<String>) -> Self {
        Self {
            registry,
            namespace: namespace.into(),
        }
    }

    /// Creates an emitter on the process-wide registry.
    pub fn global(namespace: impl Into<String>) -> NamespacedEmitter<'static> {
        NamespacedEmitter::new(sync_events::global(), namespace)
    }

    /// The namespace events are scoped to.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The underlying registry.
    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Qualifies `name` with this emitter's namespace.
    pub fn qualify(&self, name: &str) -> String {
        format!("{}{}{}", self.namespace, NAMESPACE_SEPARATOR, name)
    }

    /// Fires `name` within the namespace.
    pub fn fire(&self, name: &str, data: impl Into<Value>) -> EventContext {
        self.registry.fire(&self.qualify(name), data)
    }

    /// Subscribes `callback` to `name` within the namespace.
    pub fn subscribe(&self, name: &str, callback: Callback) -> EventResult<Arc<Registration>> {
        self.registry.subscribe(&self.qualify(name), callback)
    }

    /// Subscribes a one-shot `callback` to `name` within the namespace.
    pub fn subscribe_once(&self, name: &str, callback: Callback) -> EventResult<Arc<Registration>> {
        self.registry.subscribe_once(&self.qualify(name), callback)
    }

    /// Subscribes with explicit options within the namespace.
    pub fn subscribe_with(
        &self,
        name: &str,
        callback: Callback,
        options: SubscribeOptions,
    ) -> EventResult<Arc<Registration>> {
        self.registry
            .subscribe_with(&self.qualify(name), callback, options)
    }

    /// Whether anything is subscribed to `name` within the namespace.
    pub fn has(&self, name: &str) -> bool {
        self.registry.has(Some(&self.qualify(name)), None)
    }

    /// Removes every registration in the namespace.
    pub fn unsubscribe_all(&self) -> usize {
        self.registry.unsubscribe(Some(&self.qualify(WILDCARD)), None)
    }
}

/// Builder for JSON object payloads passed as fire or registered data.
#[derive(Debug, Clone, Default)]
pub struct PayloadBuilder {
    data: Map<String, Value>,
}

impl PayloadBuilder {
    /// Creates an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field. Values that fail to serialize become `null`.
    pub fn field(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        self.data.insert(
            key.into(),
            serde_json::to_value(value).unwrap_or(Value::Null),
        );
        self
    }

    /// Adds a field only if `value` is `Some`.
    pub fn optional<T: Serialize>(self, key: impl Into<String>, value: Option<T>) -> Self {
        match value {
            Some(v) => self.field(key, v),
            None => self,
        }
    }

    /// Builds the payload.
    pub fn build(self) -> Value {
        Value::Object(self.data)
    }

    /// Builds the payload and fires `name` with it.
    pub fn fire(self, registry: &Registry, name: &str) -> EventContext {
        registry.fire(name, self.build())
    }
}

impl From<PayloadBuilder> for Value {
    fn from(builder: PayloadBuilder) -> Self {
        builder.build()
    }
}
