//! # Sync Events SDK
//!
//! Helpers for components integrating with a [`Registry`]:
//! - Declare a group of listeners and attach/detach them together
//! - Fire and subscribe inside a fixed namespace
//! - Build JSON payloads for fire and registered data
//!
//! ## Example
//!
//! ```rust
//! use sync_events_sdk::{Callback, EventContext, EventSubscriber, Listener, NamespacedEmitter, Registry};
//!
//! struct Mailer;
//!
//! impl EventSubscriber for Mailer {
//!     fn listeners(&self) -> Vec<Listener> {
//!         vec![Listener::new("user::created", Callback::new(|_: &EventContext| ()))]
//!     }
//! }
//!
//! let registry = Registry::new();
//! let attachment = Mailer.attach(&registry).unwrap();
//!
//! let users = NamespacedEmitter::new(&registry, "user");
//! assert!(users.fire("created", serde_json::Value::Null).was_dispatched());
//!
//! assert_eq!(attachment.detach(&registry), 1);
//! ```

mod builder;
mod traits;

pub use builder::{NamespacedEmitter, PayloadBuilder};
pub use traits::{Attachment, EventSubscriber, Listener};

// Re-export core types for convenience
pub use sync_events::{
    Callback, EventContext, EventError, EventName, EventResult, Registration, Registry,
    RegistryConfig, SubscribeOptions, global,
};
