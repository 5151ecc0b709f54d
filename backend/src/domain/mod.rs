//! Domain types, ports, and services.
//!
//! Nothing in this module depends on HTTP or on a storage driver. Inbound
//! adapters call the driving ports in [`ports`]; outbound adapters implement
//! [`ports::UserRepository`].

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_directory;

pub use self::error::{Error, ErrorCode};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    FieldIssue, FieldIssueKind, NewUser, User, UserId, UserPatch, UserValidationError,
};
pub use self::user_directory::UserDirectoryService;
