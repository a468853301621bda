//! Event name grammar.
//!
//! An event name is written `[namespace::]name`, where both parts are made of
//! ASCII word characters (`[A-Za-z0-9_]`) and dots. A leading bare `::` marks
//! the *empty* namespace, which is distinct from having no namespace at all.
//! The name part may also be the wildcard `*`, which only makes sense when
//! filtering.

use std::fmt;

use crate::error::{EventError, EventResult};

/// The name token matching every concrete event name.
pub const WILDCARD: &str = "*";

/// Separator between a namespace and a name.
pub const NAMESPACE_SEPARATOR: &str = "::";

/// A parsed event name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventName {
    /// The name part, `None` for inputs like `"ns::"` or `"::"`.
    pub name: Option<String>,
    /// `None` when no namespace was written, `Some("")` for a leading `::`.
    pub namespace: Option<String>,
}

impl EventName {
    /// Parses a raw event name.
    ///
    /// The whole input must match; partial matches are rejected.
    ///
    /// ```
    /// use sync_events::EventName;
    ///
    /// let parsed = EventName::parse("user::saved").unwrap();
    /// assert_eq!(parsed.name.as_deref(), Some("saved"));
    /// assert_eq!(parsed.namespace.as_deref(), Some("user"));
    ///
    /// let parsed = EventName::parse("::saved").unwrap();
    /// assert_eq!(parsed.namespace.as_deref(), Some(""));
    /// ```
    pub fn parse(raw: &str) -> EventResult<Self> {
        if raw.is_empty() {
            return Err(EventError::EmptyName);
        }

        let invalid = || EventError::InvalidName(raw.to_string());

        let (namespace, rest) = match raw.strip_prefix(NAMESPACE_SEPARATOR) {
            Some(rest) => (Some(String::new()), rest),
            None => match raw.split_once(NAMESPACE_SEPARATOR) {
                Some((namespace, rest)) => {
                    if !is_segment(namespace) {
                        return Err(invalid());
                    }
                    (Some(namespace.to_string()), rest)
                }
                None => (None, raw),
            },
        };

        let name = match rest {
            "" => None,
            WILDCARD => Some(WILDCARD.to_string()),
            segment if is_segment(segment) => Some(segment.to_string()),
            _ => return Err(invalid()),
        };

        Ok(Self { name, namespace })
    }

    /// Whether the name part is the wildcard.
    pub fn is_wildcard(&self) -> bool {
        self.name.as_deref() == Some(WILDCARD)
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(namespace) = &self.namespace {
            write!(f, "{}{}", namespace, NAMESPACE_SEPARATOR)?;
        }
        if let Some(name) = &self.name {
            f.write_str(name)?;
        }
        Ok(())
    }
}

/// Renders the `"<namespace>::<name>"` form reported as the current target of
/// a dispatch. A missing namespace renders as empty.
pub(crate) fn qualified(namespace: Option<&str>, name: &str) -> String {
    format!("{}{}{}", namespace.unwrap_or_default(), NAMESPACE_SEPARATOR, name)
}

fn is_segment(s: &str) -> bool {
    !s.is_empty()
        && s
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'.')
}
