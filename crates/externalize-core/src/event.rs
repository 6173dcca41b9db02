//! Domain events and their runtime type descriptors

use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::declaration::Declaration;

/// Separator between namespace segments of a type path
pub const SEPARATOR: &str = "::";

/// Type-erased event or mapped payload, shared across evaluations
pub type Payload = Arc<dyn Event>;

/// Runtime type of an event, identified by its fully qualified path
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventType {
    name: Cow<'static, str>,
}

impl EventType {
    /// Descriptor for a Rust type, named after `std::any::type_name`
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            name: Cow::Borrowed(std::any::type_name::<T>()),
        }
    }

    /// Descriptor with an explicit fully qualified name, e.g. `acme::orders::OrderPlaced`
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self { name: name.into() }
    }

    /// Fully qualified name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Enclosing namespace; empty for top-level types
    pub fn namespace(&self) -> &str {
        let path = self.path();
        path.rfind(SEPARATOR).map_or("", |idx| &path[..idx])
    }

    /// Last path segment, generic arguments included
    pub fn simple_name(&self) -> &str {
        let namespace = self.namespace();
        if namespace.is_empty() {
            &self.name
        } else {
            &self.name[namespace.len() + SEPARATOR.len()..]
        }
    }

    /// Whether the type resides in `namespace` or any namespace below it.
    ///
    /// Matching is per segment: `acme::app` covers `acme::app::orders` but not
    /// `acme::application`.
    pub fn resides_in(&self, namespace: &str) -> bool {
        let namespace = namespace.trim_end_matches(SEPARATOR);
        if namespace.is_empty() {
            return false;
        }
        self.namespace()
            .strip_prefix(namespace)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(SEPARATOR))
    }

    /// Name relative to `namespace`, if the type resides in it
    pub fn relative_to(&self, namespace: &str) -> Option<&str> {
        if !self.resides_in(namespace) {
            return None;
        }
        let namespace = namespace.trim_end_matches(SEPARATOR);
        self.name.get(namespace.len() + SEPARATOR.len()..)
    }

    // Generic arguments may contain separators of their own.
    fn path(&self) -> &str {
        self.name.split('<').next().unwrap_or(&self.name)
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A value raised inside the application that may be externalized
pub trait Event: Any + Send + Sync + fmt::Debug + 'static {
    /// Runtime type of this event
    fn event_type(&self) -> EventType {
        EventType::of::<Self>()
    }

    /// Declarations attached to the event's type
    fn declarations(&self) -> &'static [&'static dyn Declaration] {
        &[]
    }

    /// Rust type name of the concrete event, regardless of [`Event::event_type`]
    fn rust_type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl dyn Event {
    /// Whether the concrete type behind this event is `T`
    pub fn is<T: Event>(&self) -> bool {
        let any: &dyn Any = self;
        any.is::<T>()
    }

    pub fn downcast_ref<T: Event>(&self) -> Option<&T> {
        let any: &dyn Any = self;
        any.downcast_ref::<T>()
    }
}

macro_rules! plain_events {
    ($($ty:ty),* $(,)?) => {
        $(impl Event for $ty {})*
    };
}

plain_events!(
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    String,
    &'static str,
    serde_json::Value,
);
