//! The registration store and dispatch loop.

use std::sync::{Arc, LazyLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::Value;
use uuid::Uuid;

use crate::config::RegistryConfig;
use crate::context::EventContext;
use crate::error::EventResult;
use crate::handler::Callback;
use crate::name::EventName;
use crate::registration::{Registration, SubscribeOptions};

static GLOBAL: LazyLock<Registry> = LazyLock::new(Registry::new);

/// The process-wide registry, created on first use.
///
/// Prefer passing a `&Registry` around; this instance exists for callers that
/// have no registry to be handed.
pub fn global() -> &'static Registry {
    &GLOBAL
}

/// An ordered collection of subscriptions.
///
/// Dispatch follows insertion order. The registry may be used from inside
/// its own callbacks: no lock is held while a callback runs, and a fire pass
/// works on the set of registrations matched when it started.
pub struct Registry {
    id: Uuid,
    config: RegistryConfig,
    registrations: RwLock<Vec<Arc<Registration>>>,
}

impl Registry {
    /// Creates an empty registry with default configuration.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Creates an empty registry with the given configuration.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            config,
            registrations: RwLock::new(Vec::new()),
        }
    }

    /// Unique id of this registry, stored on each of its registrations.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The configuration this registry was created with.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Subscribes `callback` to `name`.
    ///
    /// Fails if the name does not parse, has no name part, or is the
    /// wildcard.
    pub fn subscribe(&self, name: &str, callback: Callback) -> EventResult<Arc<Registration>> {
        self.subscribe_with(name, callback, SubscribeOptions::new())
    }

    /// Subscribes `callback` to `name` for a single non-cancelling invocation.
    pub fn subscribe_once(&self, name: &str, callback: Callback) -> EventResult<Arc<Registration>> {
        self.subscribe_with(name, callback, SubscribeOptions::new().once())
    }

    /// Subscribes with explicit data, priority and one-shot settings.
    pub fn subscribe_with(
        &self,
        name: &str,
        callback: Callback,
        options: SubscribeOptions,
    ) -> EventResult<Arc<Registration>> {
        let registration = match Registration::new(
            self.id,
            name,
            callback,
            options,
            self.config.default_priority,
        ) {
            Ok(registration) => Arc::new(registration),
            Err(e) => {
                tracing::warn!(event = name, error = %e, "Rejected subscription");
                return Err(e);
            }
        };

        self.write().push(Arc::clone(&registration));

        tracing::debug!(
            registration_id = %registration.id(),
            event = %registration.qualified_name(),
            once = registration.is_once(),
            "Subscribed"
        );

        Ok(registration)
    }

    /// Removes every registration passing the filter and returns how many
    /// were removed. Without criteria nothing is removed.
    pub fn unsubscribe(&self, name: Option<&str>, callback: Option<&Callback>) -> usize {
        let Some(filter) = Filter::compile(name, callback) else {
            return 0;
        };

        let removed = {
            let mut registrations = self.write();
            let before = registrations.len();
            registrations.retain(|r| !filter.matches(r));
            before - registrations.len()
        };

        if removed > 0 {
            tracing::debug!(filter = ?name, removed, "Unsubscribed");
        }

        removed
    }

    /// Removes one specific registration. Returns `false` if it was not
    /// (or no longer) part of this registry.
    pub fn remove(&self, registration: &Registration) -> bool {
        let mut registrations = self.write();
        match registrations
            .iter()
            .position(|r| std::ptr::eq(Arc::as_ptr(r), registration))
        {
            Some(position) => {
                registrations.remove(position);
                true
            }
            None => false,
        }
    }

    /// Whether any registration passes the filter.
    pub fn has(&self, name: Option<&str>, callback: Option<&Callback>) -> bool {
        match Filter::compile(name, callback) {
            Some(filter) => self.read().iter().any(|r| filter.matches(r)),
            None => false,
        }
    }

    /// Alias for [`has`](Self::has).
    pub fn exists(&self, name: Option<&str>, callback: Option<&Callback>) -> bool {
        self.has(name, callback)
    }

    /// Returns the registrations passing the filter, in insertion order.
    ///
    /// A missing namespace in `name` matches every namespace, and a `*` name
    /// matches every name. Without criteria the result is empty.
    pub fn filter(&self, name: Option<&str>, callback: Option<&Callback>) -> Vec<Arc<Registration>> {
        match Filter::compile(name, callback) {
            Some(filter) => self
                .read()
                .iter()
                .filter(|r| filter.matches(r))
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }

    /// Filters by name only.
    pub fn filter_name(&self, name: &str) -> Vec<Arc<Registration>> {
        self.filter(Some(name), None)
    }

    /// Filters by callback only.
    pub fn filter_callback(&self, callback: &Callback) -> Vec<Arc<Registration>> {
        self.filter(None, Some(callback))
    }

    /// Fires `name`, invoking each matching callback in insertion order.
    ///
    /// A callback returning exactly `false` stops the pass; a one-shot
    /// registration is removed after it runs unless it was the one that
    /// stopped the pass. The returned context reflects the last invocation.
    pub fn fire(&self, name: &str, data: impl Into<Value>) -> EventContext {
        let matches = self.filter(Some(name), None);
        let mut ctx = EventContext::new(name, data.into());

        tracing::debug!(event = name, matched = matches.len(), "Firing event");

        for (index, registration) in matches.iter().enumerate() {
            ctx.advance(index, registration);

            if self.config.log_dispatch {
                tracing::trace!(
                    event = name,
                    index,
                    registration_id = %registration.id(),
                    current_target = ?ctx.current_target,
                    "Invoking callback"
                );
            }

            let returned = registration.callback().call(&ctx);
            ctx.returned = Some(returned);

            if ctx.is_cancelled() {
                tracing::debug!(event = name, index, "Event cancelled");
                break;
            }

            if registration.is_once() {
                self.remove(registration);
            }
        }

        ctx
    }

    /// Fires `name` without data.
    pub fn fire_empty(&self, name: &str) -> EventContext {
        self.fire(name, Value::Null)
    }

    /// Whether `registration` was created by this registry.
    pub fn owns(&self, registration: &Registration) -> bool {
        registration.registry_id() == self.id
    }

    /// Snapshot of all registrations in insertion order.
    pub fn registrations(&self) -> Vec<Arc<Registration>> {
        self.read().clone()
    }

    /// Removes all registrations.
    pub fn clear(&self) {
        self.write().clear();
    }

    /// Returns the number of registrations.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Checks if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A panicking callback never runs under the lock, so a poisoned lock
    // still guards a consistent list.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Arc<Registration>>> {
        self.registrations.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Arc<Registration>>> {
        self.registrations.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("id", &self.id)
            .field("registrations", &self.len())
            .finish()
    }
}

/// Compiled filter criteria.
struct Filter<'a> {
    name: Option<EventName>,
    callback: Option<&'a Callback>,
}

impl<'a> Filter<'a> {
    /// Returns `None` when the criteria can match nothing: no criteria at
    /// all, or a name filter that does not parse.
    fn compile(name: Option<&str>, callback: Option<&'a Callback>) -> Option<Self> {
        if name.is_none() && callback.is_none() {
            return None;
        }

        let name = match name {
            Some(raw) => Some(EventName::parse(raw).ok()?),
            None => None,
        };

        Some(Self { name, callback })
    }

    fn matches(&self, registration: &Registration) -> bool {
        registration.matches(self.name.as_ref(), self.callback)
    }
}
