//! Typed wrappers over the Kepster API resources.
//!
//! Each wrapper is a lightweight handle borrowed from a [`Client`](crate::Client)
//! (`client.users()`, `client.groups()`, ...). Writes are sent as JSON:API
//! documents; reads accept [`QueryOptions`] for filters, pagination and
//! sparse fieldsets.

mod auth;
mod document;
mod fields;
mod groups;
mod sessions;
mod tokens;
mod users;

#[cfg(test)]
mod users_tests;

pub use auth::{EmailAuth, SmsAuth};
pub use document::Resource;
pub use fields::{Fields, QueryOptions};
pub use groups::{DEFAULT_FIELDS as DEFAULT_GROUP_FIELDS, GroupUpdate, Groups, NewGroup};
pub use sessions::{AuditLogs, Realm, Sessions};
pub use tokens::{NewOperationToken, OperationTokens, Tokens};
pub use users::{NewUser, UserUpdate, Users};
