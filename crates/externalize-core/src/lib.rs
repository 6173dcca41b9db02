//! Selection, mapping and routing of domain events for externalization

mod builder;
mod configuration;
mod declaration;
mod error;
mod event;
mod lookup;
mod settings;
pub mod strategy;
mod target;

pub use builder::{Router, Selector};
pub use configuration::Configuration;
pub use declaration::{find_declaration, has_declaration, Declaration, Externalized};
pub use error::{Error, Result};
pub use event::{Event, EventType, Payload, SEPARATOR};
pub use lookup::{DeclarationTable, DeclaredRoute, ResolverChain, RouteDeclarationResolver};
pub use settings::Settings;
pub use target::RoutingTarget;
