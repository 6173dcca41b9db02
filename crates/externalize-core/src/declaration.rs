//! Static declarations attached to event types

use std::any::Any;
use std::fmt;

use crate::event::Event;

/// Type-level metadata an event type carries, such as [`Externalized`]
pub trait Declaration: Any + Send + Sync + fmt::Debug + 'static {
    /// Route name carried by the declaration, if it names one
    fn route(&self) -> Option<&str> {
        None
    }
}

/// Marks an event type for externalization, optionally naming its route.
///
/// ```
/// use externalize_core::{Declaration, Event, Externalized};
///
/// #[derive(Debug)]
/// struct OrderPlaced;
///
/// const ORDER_PLACED: &[&dyn Declaration] = &[&Externalized::to("orders.placed")];
///
/// impl Event for OrderPlaced {
///     fn declarations(&self) -> &'static [&'static dyn Declaration] {
///         ORDER_PLACED
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Externalized {
    target: &'static str,
}

impl Externalized {
    /// Declaration without a route name
    pub const fn new() -> Self {
        Self { target: "" }
    }

    pub const fn to(target: &'static str) -> Self {
        Self { target }
    }

    /// Declared target as written, possibly blank
    pub fn value(&self) -> &'static str {
        self.target
    }
}

impl Declaration for Externalized {
    fn route(&self) -> Option<&str> {
        Some(self.target).filter(|target| !target.trim().is_empty())
    }
}

/// First declaration of type `D` attached to the event's type
pub fn find_declaration<D: Declaration>(event: &dyn Event) -> Option<&'static D> {
    event.declarations().iter().find_map(|declaration| {
        let any: &'static dyn Any = *declaration;
        any.downcast_ref::<D>()
    })
}

pub fn has_declaration<D: Declaration>(event: &dyn Event) -> bool {
    find_declaration::<D>(event).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Audited;

    impl Declaration for Audited {}

    #[derive(Debug)]
    struct Declared;

    const DECLARED: &[&dyn Declaration] = &[&Audited, &Externalized::to("declared")];

    impl Event for Declared {
        fn declarations(&self) -> &'static [&'static dyn Declaration] {
            DECLARED
        }
    }

    #[test]
    fn test_blank_target_declares_no_route() {
        assert_eq!(Externalized::new().route(), None);
        assert_eq!(Externalized::to("  ").route(), None);
        assert_eq!(Externalized::to("orders").route(), Some("orders"));
    }

    #[test]
    fn test_find_declaration_by_type() {
        let found = find_declaration::<Externalized>(&Declared);
        assert_eq!(found.map(Externalized::value), Some("declared"));
        assert!(has_declaration::<Audited>(&Declared));
    }

    #[test]
    fn test_undeclared_event() {
        assert!(find_declaration::<Externalized>(&4711_i64).is_none());
        assert!(!has_declaration::<Audited>(&"plain"));
    }
}
