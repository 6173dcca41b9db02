//! Route resolution strategies
//!
//! Each strategy maps an event to an optional route. Strategies compose with
//! [`fallback`]: the first non-empty result wins.

use std::sync::Arc;

use crate::event::Event;
use crate::lookup::ResolverChain;

/// Route declared on the event's type, as answered by `chain`
pub fn by_declarations(
    chain: Arc<ResolverChain>,
) -> impl Fn(&dyn Event) -> Option<String> + Send + Sync + Clone + 'static {
    move |event: &dyn Event| chain.route_for(event)
}

/// Route declared through [`Externalized`](crate::Externalized)
pub fn by_declared_routes() -> impl Fn(&dyn Event) -> Option<String> + Send + Sync + Clone + 'static
{
    by_declarations(Arc::new(ResolverChain::standard()))
}

/// Type name relative to the application namespace it resides in.
///
/// `acme::myapp::mymodule::MyEvent` under `acme::myapp` resolves to
/// `mymodule::MyEvent`. When several namespaces contain the type the longest
/// one wins, whatever order they were given in.
pub fn by_application_local_name<I, S>(
    namespaces: I,
) -> impl Fn(&dyn Event) -> Option<String> + Send + Sync + Clone + 'static
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let namespaces: Arc<[String]> = namespaces.into_iter().map(Into::into).collect();

    move |event: &dyn Event| {
        let event_type = event.event_type();
        namespaces
            .iter()
            .filter(|namespace| event_type.resides_in(namespace))
            .max_by_key(|namespace| namespace.trim_end_matches(crate::event::SEPARATOR).len())
            .and_then(|namespace| event_type.relative_to(namespace))
            .map(str::to_owned)
    }
}

/// Fully qualified type name; never empty.
///
/// Events reporting a blank type name resolve to their Rust type name.
pub fn by_fully_qualified_type_name() -> impl Fn(&dyn Event) -> String + Send + Sync + Clone + 'static
{
    |event: &dyn Event| {
        let event_type = event.event_type();
        if event_type.name().trim().is_empty() {
            event.rust_type_name().to_owned()
        } else {
            event_type.name().to_owned()
        }
    }
}

/// Routes through `primary`, falling back to `secondary` when it yields nothing
pub fn fallback<P, S>(primary: P, secondary: S) -> impl Fn(&dyn Event) -> String + Send + Sync + Clone
where
    P: Fn(&dyn Event) -> Option<String> + Send + Sync + Clone,
    S: Fn(&dyn Event) -> String + Send + Sync + Clone,
{
    move |event: &dyn Event| primary(event).unwrap_or_else(|| secondary(event))
}

/// Like [`fallback`] for two optional strategies
pub fn or<P, S>(primary: P, secondary: S) -> impl Fn(&dyn Event) -> Option<String> + Send + Sync + Clone
where
    P: Fn(&dyn Event) -> Option<String> + Send + Sync + Clone,
    S: Fn(&dyn Event) -> Option<String> + Send + Sync + Clone,
{
    move |event: &dyn Event| primary(event).or_else(|| secondary(event))
}

/// Declared route, else the fully qualified type name
pub fn default_router() -> impl Fn(&dyn Event) -> String + Send + Sync + Clone + 'static {
    default_router_with(Arc::new(ResolverChain::standard()))
}

pub fn default_router_with(
    chain: Arc<ResolverChain>,
) -> impl Fn(&dyn Event) -> String + Send + Sync + Clone + 'static {
    fallback(by_declarations(chain), by_fully_qualified_type_name())
}

/// Declared route, else the application-local name, else the fully qualified type name
pub fn namespaced_router<I, S>(
    namespaces: I,
    chain: Arc<ResolverChain>,
) -> impl Fn(&dyn Event) -> String + Send + Sync + Clone + 'static
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    fallback(
        or(by_declarations(chain), by_application_local_name(namespaces)),
        by_fully_qualified_type_name(),
    )
}
