//! Subscription records.

use serde_json::Value;
use uuid::Uuid;

use crate::error::{EventError, EventResult};
use crate::handler::Callback;
use crate::name::{self, EventName};

/// Priority given to subscriptions that do not set one.
pub const DEFAULT_PRIORITY: i32 = 5;

/// Optional subscription settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SubscribeOptions {
    /// Data handed back to the callback as `registered_data`.
    pub data: Value,
    /// Stored on the registration. Dispatch order is always insertion order.
    pub priority: Option<i32>,
    /// Remove the registration after its first non-cancelling invocation.
    pub once: bool,
}

impl SubscribeOptions {
    /// Creates default options.
    pub fn new() -> Self {
        Self {
            data: Value::Null,
            priority: None,
            once: false,
        }
    }

    /// Sets the registered data.
    pub fn with_data(mut self, data: impl Into<Value>) -> Self {
        self.data = data.into();
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Marks the subscription as one-shot.
    pub fn once(mut self) -> Self {
        self.once = true;
        self
    }
}

impl Default for SubscribeOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// One subscription of a callback to an event name.
///
/// Registrations are created by [`Registry`](crate::Registry) and never
/// change afterwards. They are shared as `Arc<Registration>`; the registry
/// removes them by identity, so two registrations with identical fields stay
/// distinct.
#[derive(Debug)]
pub struct Registration {
    id: Uuid,
    registry_id: Uuid,
    name: String,
    namespace: Option<String>,
    callback: Callback,
    data: Value,
    priority: i32,
    once: bool,
}

impl Registration {
    /// Validates `raw_name` and builds a registration owned by `registry_id`.
    pub(crate) fn new(
        registry_id: Uuid,
        raw_name: &str,
        callback: Callback,
        options: SubscribeOptions,
        default_priority: i32,
    ) -> EventResult<Self> {
        let parsed = EventName::parse(raw_name)?;

        let name = match parsed.name {
            None => return Err(EventError::MissingName(raw_name.to_string())),
            Some(name) if name == name::WILDCARD => {
                return Err(EventError::WildcardName(raw_name.to_string()));
            }
            Some(name) => name,
        };

        Ok(Self {
            id: Uuid::new_v4(),
            registry_id,
            name,
            namespace: parsed.namespace,
            callback,
            data: options.data,
            priority: options.priority.unwrap_or(default_priority),
            once: options.once,
        })
    }

    /// Unique id of this registration.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Id of the registry that owns this registration.
    pub fn registry_id(&self) -> Uuid {
        self.registry_id
    }

    /// The event name, never the wildcard.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The namespace; `Some("")` is the explicit empty namespace.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// The subscribed callback.
    pub fn callback(&self) -> &Callback {
        &self.callback
    }

    /// Data attached at subscribe time.
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Stored priority.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Whether this registration is removed after its first non-cancelling
    /// invocation.
    pub fn is_once(&self) -> bool {
        self.once
    }

    /// `"<namespace>::<name>"`, with a missing namespace rendered empty.
    pub fn qualified_name(&self) -> String {
        name::qualified(self.namespace(), &self.name)
    }

    /// Whether this registration passes the given filter criteria.
    ///
    /// A missing namespace or name criterion, or a wildcard name, accepts
    /// anything. Namespaces compare exactly, so the empty namespace never
    /// matches a registration without one.
    pub(crate) fn matches(&self, filter: Option<&EventName>, callback: Option<&Callback>) -> bool {
        if let Some(filter) = filter {
            if let Some(namespace) = &filter.namespace {
                if self.namespace.as_ref() != Some(namespace) {
                    return false;
                }
            }

            if let Some(name) = &filter.name {
                if name != name::WILDCARD && *name != self.name {
                    return false;
                }
            }
        }

        callback.is_none_or(|cb| cb.same(&self.callback))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::EventContext;

    fn noop() -> Callback {
        Callback::new(|_: &EventContext| ())
    }

    fn build(raw: &str) -> EventResult<Registration> {
        Registration::new(Uuid::nil(), raw, noop(), SubscribeOptions::new(), DEFAULT_PRIORITY)
    }

    #[test]
    fn test_registration_fields() {
        let reg = Registration::new(
            Uuid::nil(),
            "ns::evt",
            noop(),
            SubscribeOptions::new().with_data(serde_json::json!({"n": 1})).with_priority(9).once(),
            DEFAULT_PRIORITY,
        )
        .unwrap();

        assert_eq!(reg.name(), "evt");
        assert_eq!(reg.namespace(), Some("ns"));
        assert_eq!(reg.data(), &serde_json::json!({"n": 1}));
        assert_eq!(reg.priority(), 9);
        assert!(reg.is_once());
        assert_eq!(reg.registry_id(), Uuid::nil());
        assert_eq!(reg.qualified_name(), "ns::evt");
    }

    #[test]
    fn test_default_priority() {
        let reg = build("evt").unwrap();
        assert_eq!(reg.priority(), DEFAULT_PRIORITY);
        assert!(!reg.is_once());
        assert_eq!(reg.qualified_name(), "::evt");
    }

    #[test]
    fn test_rejections() {
        assert_eq!(build("*").unwrap_err(), EventError::WildcardName("*".into()));
        assert_eq!(build("ns::*").unwrap_err(), EventError::WildcardName("ns::*".into()));
        assert_eq!(build("ns::").unwrap_err(), EventError::MissingName("ns::".into()));
        assert_eq!(build("!!bad!!").unwrap_err(), EventError::InvalidName("!!bad!!".into()));
        assert_eq!(build("").unwrap_err(), EventError::EmptyName);
    }

    #[test]
    fn test_matches_namespace_rules() {
        let named = build("ns1::x").unwrap();
        let empty = build("::x").unwrap();
        let absent = build("x").unwrap();

        let filter = |raw: &str| EventName::parse(raw).unwrap();

        assert!(named.matches(Some(&filter("x")), None));
        assert!(named.matches(Some(&filter("ns1::x")), None));
        assert!(named.matches(Some(&filter("ns1::*")), None));
        assert!(named.matches(Some(&filter("ns1::")), None));
        assert!(!named.matches(Some(&filter("::x")), None));
        assert!(!named.matches(Some(&filter("ns2::x")), None));

        assert!(empty.matches(Some(&filter("x")), None));
        assert!(empty.matches(Some(&filter("::x")), None));
        assert!(empty.matches(Some(&filter("::*")), None));
        assert!(!empty.matches(Some(&filter("ns1::x")), None));

        assert!(absent.matches(Some(&filter("x")), None));
        assert!(absent.matches(Some(&filter("*")), None));
        assert!(!absent.matches(Some(&filter("::x")), None));
        assert!(!absent.matches(Some(&filter("y")), None));
    }

    #[test]
    fn test_matches_callback() {
        let reg = build("x").unwrap();
        let other = noop();

        assert!(reg.matches(None, Some(reg.callback())));
        assert!(!reg.matches(None, Some(&other)));
        assert!(reg.matches(Some(&EventName::parse("x").unwrap()), Some(reg.callback())));
        assert!(!reg.matches(Some(&EventName::parse("x").unwrap()), Some(&other)));
    }
}
