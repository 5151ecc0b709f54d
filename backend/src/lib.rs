//! User records over HTTP, stored in MongoDB.
//!
//! Layout follows a hexagonal split: [`domain`] holds the record schema,
//! ports and the user service; [`inbound`] adapts HTTP requests onto the
//! driving ports; [`outbound`] implements persistence. [`settings`] holds
//! the process configuration.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

pub use doc::ApiDoc;
pub use middleware::Trace;
