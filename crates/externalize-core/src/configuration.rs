//! Immutable externalization configuration

use std::fmt;
use std::sync::Arc;

use crate::builder::Selector;
use crate::error::{Error, Result};
use crate::event::{Event, Payload};
use crate::lookup::ResolverChain;
use crate::strategy;
use crate::target::RoutingTarget;

pub(crate) type Filter = Arc<dyn Fn(&dyn Event) -> bool + Send + Sync>;
pub(crate) type Mapper = Arc<dyn Fn(&Payload) -> Result<Payload> + Send + Sync>;
pub(crate) type RouteFn = Arc<dyn Fn(&Payload) -> Result<String> + Send + Sync>;

/// Decides which events get externalized, in which form and where to.
///
/// Built once through [`Configuration::builder`] and shared read-only
/// afterwards; cloning shares the underlying functions.
#[derive(Clone)]
pub struct Configuration {
    filter: Filter,
    mapper: Mapper,
    router: RouteFn,
}

impl Configuration {
    pub(crate) fn new(filter: Filter, mapper: Mapper, router: RouteFn) -> Self {
        Self {
            filter,
            mapper,
            router,
        }
    }

    pub fn builder() -> Selector {
        Selector::new()
    }

    /// Externalizes events that reside in one of `namespaces` and carry an
    /// [`Externalized`](crate::Externalized) declaration.
    ///
    /// Routes are taken from the declaration and default to the
    /// application-local type name, so `acme::myapp::mymodule::MyEvent` under
    /// `acme::myapp` is routed to `mymodule::MyEvent`.
    pub fn defaults<I, S>(namespaces: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::defaults_with(namespaces, ResolverChain::standard())
    }

    /// Like [`Configuration::defaults`], recognizing the declarations `chain` resolves
    pub fn defaults_with<I, S>(namespaces: I, chain: ResolverChain) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let namespaces: Vec<String> = namespaces.into_iter().map(Into::into).collect();
        if namespaces.is_empty() {
            return Err(Error::invalid_argument("Namespaces must not be empty"));
        }

        let chain = Arc::new(chain);
        let declared = {
            let chain = Arc::clone(&chain);
            move |event: &dyn Event| chain.declares(event)
        };
        let router = strategy::namespaced_router(namespaces.clone(), chain);

        Ok(Self::builder()
            .select_by_namespaces_and(namespaces, declared)?
            .route(router))
    }

    /// Whether the event is to be externalized
    pub fn supports(&self, event: &dyn Event) -> bool {
        (self.filter)(event)
    }

    /// Payload to externalize for a supported event
    pub fn map(&self, event: &Payload) -> Result<Payload> {
        (self.mapper)(event)
    }

    /// Target a supported event is sent to
    pub fn determine_target(&self, event: &Payload) -> Result<RoutingTarget> {
        RoutingTarget::new((self.router)(event)?)
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration").finish_non_exhaustive()
    }
}
