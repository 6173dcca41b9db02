//! Route declaration resolvers and the chain that consults them

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::declaration::{find_declaration, Declaration, Externalized};
use crate::event::Event;

/// Answers whether an event's type declares a route, and which one
pub trait RouteDeclarationResolver: Send + Sync {
    /// Resolver name (unique within a chain)
    fn name(&self) -> &str;

    /// Whether the event's type carries a declaration this resolver recognizes
    fn declares(&self, event: &dyn Event) -> bool;

    /// Route declared for the event's type; blank declarations yield `None`
    fn route_for(&self, event: &dyn Event) -> Option<String>;
}

/// Resolves routes from a [`Declaration`] type attached to the event type
pub struct DeclaredRoute<D> {
    _declaration: PhantomData<fn() -> D>,
}

impl<D: Declaration> DeclaredRoute<D> {
    pub fn new() -> Self {
        Self {
            _declaration: PhantomData,
        }
    }
}

impl<D: Declaration> Default for DeclaredRoute<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Declaration> RouteDeclarationResolver for DeclaredRoute<D> {
    fn name(&self) -> &str {
        std::any::type_name::<D>()
    }

    fn declares(&self, event: &dyn Event) -> bool {
        find_declaration::<D>(event).is_some()
    }

    fn route_for(&self, event: &dyn Event) -> Option<String> {
        find_declaration::<D>(event)
            .and_then(Declaration::route)
            .filter(|route| !route.trim().is_empty())
            .map(str::to_owned)
    }
}

/// Routes declared outside the code, keyed by fully qualified type name.
///
/// An empty route declares the type without naming a route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationTable {
    routes: BTreeMap<String, String>,
}

impl DeclarationTable {
    pub fn new(routes: BTreeMap<String, String>) -> Self {
        Self { routes }
    }

    /// Table with one more declared type
    pub fn declare(mut self, type_name: impl Into<String>, route: impl Into<String>) -> Self {
        self.routes.insert(type_name.into(), route.into());
        self
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl RouteDeclarationResolver for DeclarationTable {
    fn name(&self) -> &str {
        "declaration-table"
    }

    fn declares(&self, event: &dyn Event) -> bool {
        self.routes.contains_key(event.event_type().name())
    }

    fn route_for(&self, event: &dyn Event) -> Option<String> {
        self.routes
            .get(event.event_type().name())
            .filter(|route| !route.trim().is_empty())
            .cloned()
    }
}

/// Resolvers tried in registration order; the first declared route wins
#[derive(Clone)]
pub struct ResolverChain {
    resolvers: Vec<Arc<dyn RouteDeclarationResolver>>,
}

impl ResolverChain {
    /// Chain without any resolver
    pub fn empty() -> Self {
        Self {
            resolvers: Vec::new(),
        }
    }

    /// Chain recognizing [`Externalized`] declarations
    pub fn standard() -> Self {
        Self::empty().with(DeclaredRoute::<Externalized>::new())
    }

    /// Chain with `resolver` appended at the lowest priority
    pub fn with(mut self, resolver: impl RouteDeclarationResolver + 'static) -> Self {
        self.resolvers.push(Arc::new(resolver));
        self
    }

    /// Whether any resolver recognizes a declaration on the event's type
    pub fn declares(&self, event: &dyn Event) -> bool {
        self.resolvers.iter().any(|r| r.declares(event))
    }

    pub fn route_for(&self, event: &dyn Event) -> Option<String> {
        self.resolvers.iter().find_map(|r| r.route_for(event))
    }

    /// Resolver names in priority order
    pub fn names(&self) -> Vec<&str> {
        self.resolvers.iter().map(|r| r.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

impl Default for ResolverChain {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for ResolverChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverChain")
            .field("resolvers", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventType;

    #[derive(Debug)]
    struct Topic(&'static str);

    impl Declaration for Topic {
        fn route(&self) -> Option<&str> {
            Some(self.0)
        }
    }

    #[derive(Debug)]
    struct Both;

    const BOTH: &[&dyn Declaration] = &[&Topic("topic"), &Externalized::to("externalized")];

    impl Event for Both {
        fn declarations(&self) -> &'static [&'static dyn Declaration] {
            BOTH
        }
    }

    #[derive(Debug)]
    struct Unnamed;

    const UNNAMED: &[&dyn Declaration] = &[&Externalized::new()];

    impl Event for Unnamed {
        fn declarations(&self) -> &'static [&'static dyn Declaration] {
            UNNAMED
        }
    }

    #[derive(Debug)]
    struct Remote;

    impl Event for Remote {
        fn event_type(&self) -> EventType {
            EventType::named("acme::billing::InvoiceSent")
        }
    }

    #[test]
    fn test_standard_chain_reads_externalized() {
        let chain = ResolverChain::standard();
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.route_for(&Both), Some("externalized".to_string()));
        assert!(chain.declares(&Unnamed));
        assert_eq!(chain.route_for(&Unnamed), None);
        assert!(!chain.declares(&4711_i64));
    }

    #[test]
    fn test_first_registered_resolver_wins() {
        let chain = ResolverChain::empty()
            .with(DeclaredRoute::<Topic>::new())
            .with(DeclaredRoute::<Externalized>::new());
        assert_eq!(chain.route_for(&Both), Some("topic".to_string()));

        let reversed = ResolverChain::standard().with(DeclaredRoute::<Topic>::new());
        assert_eq!(reversed.route_for(&Both), Some("externalized".to_string()));
    }

    #[test]
    fn test_blank_route_falls_through_to_next_resolver() {
        let table = DeclarationTable::default().declare(EventType::of::<Unnamed>().name(), "table");
        let chain = ResolverChain::standard().with(table);
        assert_eq!(chain.route_for(&Unnamed), Some("table".to_string()));
    }

    #[test]
    fn test_declaration_table() {
        let table = DeclarationTable::default()
            .declare("acme::billing::InvoiceSent", "")
            .declare("acme::billing::InvoicePaid", "billing.paid");
        assert_eq!(table.len(), 2);
        assert!(table.declares(&Remote));
        assert_eq!(table.route_for(&Remote), None);
        assert!(!table.declares(&Both));
    }

    #[test]
    fn test_debug_lists_resolver_names() {
        let chain = ResolverChain::standard().with(DeclarationTable::default());
        let debug = format!("{chain:?}");
        assert!(debug.contains("Externalized"));
        assert!(debug.contains("declaration-table"));
    }
}
