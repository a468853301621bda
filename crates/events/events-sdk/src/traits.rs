//! Traits for components that listen on a registry.

use std::sync::Arc;

use sync_events::{Callback, EventResult, Registration, Registry, SubscribeOptions};

/// One callback a component wants subscribed.
#[derive(Debug, Clone)]
pub struct Listener {
    /// Event name, `[namespace::]name`.
    pub name: String,
    /// The callback to subscribe.
    pub callback: Callback,
    /// Data, priority and one-shot settings.
    pub options: SubscribeOptions,
}

impl Listener {
    /// Creates a listener with default options.
    pub fn new(name: impl Into<String>, callback: Callback) -> Self {
        Self {
            name: name.into(),
            callback,
            options: SubscribeOptions::new(),
        }
    }

    /// Sets the registered data.
    pub fn with_data(mut self, data: impl Into<serde_json::Value>) -> Self {
        self.options = self.options.with_data(data);
        self
    }

    /// Sets the stored priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.options = self.options.with_priority(priority);
        self
    }

    /// Marks the listener as one-shot.
    pub fn once(mut self) -> Self {
        self.options = self.options.once();
        self
    }
}

/// Trait for components that subscribe a group of callbacks.
///
/// Implement [`listeners`](Self::listeners); [`attach`](Self::attach)
/// subscribes them all and hands back an [`Attachment`] that can later remove
/// exactly those registrations.
pub trait EventSubscriber {
    /// Identifier used in log lines.
    fn subscriber_id(&self) -> &str {
        "anonymous"
    }

    /// The callbacks to subscribe, in dispatch order.
    fn listeners(&self) -> Vec<Listener>;

    /// Subscribes every listener.
    ///
    /// All-or-nothing: if one name is rejected, the listeners subscribed so
    /// far are removed again and the error is returned.
    fn attach(&self, registry: &Registry) -> EventResult<Attachment> {
        let mut registrations = Vec::new();

        for listener in self.listeners() {
            match registry.subscribe_with(&listener.name, listener.callback, listener.options) {
                Ok(registration) => registrations.push(registration),
                Err(e) => {
                    for registration in &registrations {
                        registry.remove(registration);
                    }
                    tracing::warn!(
                        subscriber = self.subscriber_id(),
                        event = %listener.name,
                        error = %e,
                        "Attach failed"
                    );
                    return Err(e);
                }
            }
        }

        tracing::debug!(
            subscriber = self.subscriber_id(),
            listeners = registrations.len(),
            "Attached"
        );

        Ok(Attachment { registrations })
    }
}

/// The registrations created by [`EventSubscriber::attach`].
#[derive(Debug)]
pub struct Attachment {
    registrations: Vec<Arc<Registration>>,
}

impl Attachment {
    /// The created registrations, in subscription order.
    pub fn registrations(&self) -> &[Arc<Registration>] {
        &self.registrations
    }

    /// Removes the registrations that are still present and returns how many
    /// were removed. One-shot listeners that already ran are not counted.
    pub fn detach(self, registry: &Registry) -> usize {
        self.registrations
            .iter()
            .filter(|registration| registry.remove(registration))
            .count()
    }
}
