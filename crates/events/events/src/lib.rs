//! # Sync Events
//!
//! In-process, synchronous event registry:
//! - Event names with optional namespaces (`"user::saved"`, `"::saved"`, `"saved"`)
//! - Callbacks invoked in subscription order
//! - Cancellation by returning `false`
//! - One-shot subscriptions
//! - Filtering by name, namespace, wildcard and callback identity
//!
//! ## Example
//!
//! ```rust
//! use sync_events::{Callback, EventContext, Registry};
//!
//! let registry = Registry::new();
//!
//! let log = Callback::new(|ctx: &EventContext| {
//!     println!("{} fired with {}", ctx.target, ctx.data);
//! });
//! registry.subscribe("user::saved", log.clone()).unwrap();
//!
//! // A name without namespace reaches every namespace.
//! let ctx = registry.fire("saved", serde_json::json!({ "id": 7 }));
//! assert_eq!(ctx.index, Some(0));
//! assert_eq!(ctx.current_target.as_deref(), Some("user::saved"));
//!
//! assert_eq!(registry.unsubscribe(Some("user::*"), None), 1);
//! ```

mod config;
mod context;
mod error;
mod handler;
mod name;
mod registration;
mod registry;

pub use config::RegistryConfig;
pub use context::EventContext;
pub use error::{EventError, EventResult};
pub use handler::Callback;
pub use name::{EventName, NAMESPACE_SEPARATOR, WILDCARD};
pub use registration::{DEFAULT_PRIORITY, Registration, SubscribeOptions};
pub use registry::{Registry, global};
