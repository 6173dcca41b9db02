//! Fluent construction of a [`Configuration`].
//!
//! [`Selector`] decides which events qualify, [`Router`] refines how they are
//! mapped and routed. Every step returns a new value and leaves the receiver
//! untouched, so partially configured builders can be branched freely:
//!
//! ```
//! use externalize_core::{Configuration, Externalized};
//!
//! let selected = Configuration::builder().select_by_declaration::<Externalized>();
//! let by_type_name = selected.route_by_type_name();
//! let mapped = selected.mapping_for(|amount: &i64| amount.to_string()).build();
//! # let _ = (by_type_name, mapped);
//! ```

use std::fmt;
use std::sync::Arc;

use crate::configuration::{Configuration, Filter, Mapper, RouteFn};
use crate::declaration::{find_declaration, has_declaration, Declaration};
use crate::error::{Error, Result};
use crate::event::{Event, EventType, Payload};
use crate::strategy;

/// Initial builder stage: picks the events to externalize
#[derive(Debug, Clone, Copy)]
pub struct Selector {
    _private: (),
}

impl Selector {
    pub(crate) fn new() -> Self {
        Self { _private: () }
    }

    /// Selects events matching `predicate`
    pub fn select<P>(&self, predicate: P) -> Router
    where
        P: Fn(&dyn Event) -> bool + Send + Sync + 'static,
    {
        Router::new(Arc::new(predicate))
    }

    /// Selects events whose type resides in `namespace` or below it
    pub fn select_by_namespace(&self, namespace: &str) -> Result<Router> {
        let namespace = require_namespace(namespace)?;
        Ok(self.select(move |event: &dyn Event| event.event_type().resides_in(&namespace)))
    }

    /// Selects events residing in the namespace of `T` or below it
    pub fn select_by_namespace_of<T: ?Sized + 'static>(&self) -> Result<Router> {
        self.select_by_namespace(EventType::of::<T>().namespace())
    }

    /// Selects events residing in any of `namespaces` that also match `filter`.
    ///
    /// The namespace check runs first; `filter` only sees events that pass it.
    pub fn select_by_namespaces_and<I, S, P>(&self, namespaces: I, filter: P) -> Result<Router>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        P: Fn(&dyn Event) -> bool + Send + Sync + 'static,
    {
        let namespaces = namespaces
            .into_iter()
            .map(Into::<String>::into)
            .map(|namespace| require_namespace(&namespace))
            .collect::<Result<Vec<_>>>()?;
        if namespaces.is_empty() {
            return Err(Error::invalid_argument("Base namespaces must not be empty"));
        }

        Ok(self.select(move |event: &dyn Event| {
            let event_type = event.event_type();
            namespaces.iter().any(|ns| event_type.resides_in(ns)) && filter(event)
        }))
    }

    /// Selects events whose type carries a `D` declaration
    pub fn select_by_declaration<D: Declaration>(&self) -> Router {
        self.select(has_declaration::<D>)
    }

    /// Selects events of concrete type `T`
    pub fn select_by_type<T: Event>(&self) -> Router {
        self.select(|event: &dyn Event| event.is::<T>())
    }

    /// Selects events by inspecting their runtime type only
    pub fn select_by_event_type<P>(&self, predicate: P) -> Router
    where
        P: Fn(&EventType) -> bool + Send + Sync + 'static,
    {
        self.select(move |event: &dyn Event| predicate(&event.event_type()))
    }

    /// Selects events declaring `D` and routes them by the declaration
    pub fn select_and_route<D, F>(&self, router: F) -> Configuration
    where
        D: Declaration,
        F: Fn(&D) -> String + Send + Sync + 'static,
    {
        self.select_and_route_with(move |_: &dyn Event, declaration: &D| router(declaration))
    }

    /// Like [`Selector::select_and_route`], routing by event and declaration
    pub fn select_and_route_with<D, F>(&self, router: F) -> Configuration
    where
        D: Declaration,
        F: Fn(&dyn Event, &D) -> String + Send + Sync + 'static,
    {
        self.select_by_declaration::<D>()
            .try_route(move |event: &dyn Event| {
                find_declaration::<D>(event)
                    .map(|declaration| router(event, declaration))
                    .ok_or_else(|| {
                        anyhow::anyhow!(
                            "event type carries no {} declaration",
                            std::any::type_name::<D>()
                        )
                    })
            })
    }
}

/// Second builder stage: refines mapping and routing of selected events
#[derive(Clone)]
pub struct Router {
    filter: Filter,
    mapper: Mapper,
    router: RouteFn,
}

impl Router {
    fn new(filter: Filter) -> Self {
        let default_router = strategy::default_router();
        Self {
            filter,
            mapper: Arc::new(identity),
            router: Arc::new(move |event: &Payload| -> Result<String> {
                Ok(default_router(&**event))
            }),
        }
    }

    /// Replaces the mapper
    pub fn mapping<F>(&self, mapper: F) -> Router
    where
        F: Fn(&Payload) -> Payload + Send + Sync + 'static,
    {
        self.with_mapper(Arc::new(move |event: &Payload| -> Result<Payload> {
            Ok(mapper(event))
        }))
    }

    /// Replaces the mapper with one that may fail
    pub fn try_mapping<F>(&self, mapper: F) -> Router
    where
        F: Fn(&Payload) -> anyhow::Result<Payload> + Send + Sync + 'static,
    {
        self.with_mapper(Arc::new(move |event: &Payload| -> Result<Payload> {
            mapper(event).map_err(|source| Error::Mapper {
                event_type: event.event_type(),
                source,
            })
        }))
    }

    /// Maps events of type `T` through `mapper`, leaving others untouched.
    ///
    /// Typed mappers compose: the latest one sees the raw event first and its
    /// output flows through the mappers registered before it.
    pub fn mapping_for<T, P, F>(&self, mapper: F) -> Router
    where
        T: Event,
        P: Event,
        F: Fn(&T) -> P + Send + Sync + 'static,
    {
        let previous = Arc::clone(&self.mapper);
        self.with_mapper(Arc::new(move |event: &Payload| -> Result<Payload> {
            let step: Payload = match event.downcast_ref::<T>() {
                Some(typed) => Arc::new(mapper(typed)),
                None => Arc::clone(event),
            };
            previous(&step)
        }))
    }

    /// Runs the current router against the mapped payload instead of the raw event
    pub fn route_mapped(&self) -> Router {
        let mapper = Arc::clone(&self.mapper);
        let router = Arc::clone(&self.router);
        self.with_router(Arc::new(move |event: &Payload| -> Result<String> {
            router(&mapper(event)?)
        }))
    }

    /// Routes through `router` and finishes the configuration
    pub fn route<F>(&self, router: F) -> Configuration
    where
        F: Fn(&dyn Event) -> String + Send + Sync + 'static,
    {
        self.with_router(Arc::new(move |event: &Payload| -> Result<String> {
            Ok(router(&**event))
        }))
        .build()
    }

    /// Routes through a router that may fail and finishes the configuration
    pub fn try_route<F>(&self, router: F) -> Configuration
    where
        F: Fn(&dyn Event) -> anyhow::Result<String> + Send + Sync + 'static,
    {
        self.with_router(Arc::new(move |event: &Payload| -> Result<String> {
            router(&**event).map_err(|source| Error::Router {
                event_type: event.event_type(),
                source,
            })
        }))
        .build()
    }

    /// Routes by a value extracted from the event
    pub fn route_by<X, E, F>(&self, extractor: E, transform: F) -> Router
    where
        E: Fn(&dyn Event) -> X + Send + Sync + 'static,
        F: Fn(X) -> String + Send + Sync + 'static,
    {
        self.with_router(Arc::new(move |event: &Payload| -> Result<String> {
            Ok(transform(extractor(&**event)))
        }))
    }

    /// Routes through `router`, falling back to the routing configured so far
    /// when it yields no route
    pub fn route_optional<F>(&self, router: F) -> Configuration
    where
        F: Fn(&dyn Event) -> Option<String> + Send + Sync + 'static,
    {
        let fallback = Arc::clone(&self.router);
        self.with_router(Arc::new(move |event: &Payload| -> Result<String> {
            match router(&**event) {
                Some(route) => Ok(route),
                None => fallback(event),
            }
        }))
        .build()
    }

    /// Like [`Router::route_optional`], deciding on the runtime type only
    pub fn route_optional_by_type<F>(&self, router: F) -> Configuration
    where
        F: Fn(&EventType) -> Option<String> + Send + Sync + 'static,
    {
        self.route_optional(move |event: &dyn Event| router(&event.event_type()))
    }

    /// Routes by the event's runtime type
    pub fn route_by_type<F>(&self, router: F) -> Router
    where
        F: Fn(&EventType) -> String + Send + Sync + 'static,
    {
        self.with_router(Arc::new(move |event: &Payload| -> Result<String> {
            Ok(router(&event.event_type()))
        }))
    }

    /// Routes by fully qualified type name and finishes the configuration
    pub fn route_by_type_name(&self) -> Configuration {
        let router = strategy::by_fully_qualified_type_name();
        self.with_router(Arc::new(move |event: &Payload| -> Result<String> {
            Ok(router(&**event))
        }))
        .build()
    }

    pub fn build(&self) -> Configuration {
        Configuration::new(
            Arc::clone(&self.filter),
            Arc::clone(&self.mapper),
            Arc::clone(&self.router),
        )
    }

    fn with_mapper(&self, mapper: Mapper) -> Router {
        Router {
            filter: Arc::clone(&self.filter),
            mapper,
            router: Arc::clone(&self.router),
        }
    }

    fn with_router(&self, router: RouteFn) -> Router {
        Router {
            filter: Arc::clone(&self.filter),
            mapper: Arc::clone(&self.mapper),
            router,
        }
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router").finish_non_exhaustive()
    }
}

fn identity(event: &Payload) -> Result<Payload> {
    Ok(Arc::clone(event))
}

fn require_namespace(namespace: &str) -> Result<String> {
    if namespace.trim().is_empty() {
        return Err(Error::invalid_argument("Base namespace must not be empty"));
    }
    Ok(namespace.to_owned())
}
