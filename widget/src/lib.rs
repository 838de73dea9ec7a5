//! Chat widget controller for the bug search assistant.
//!
//! This crate holds everything the floating chat widget does that is not
//! markup: the append-only conversation, the two independent query
//! lifecycles (text and image), the open/minimized/closed visibility machine,
//! and the backends that answer queries. A view layer (browser or terminal)
//! renders [`controller::ChatController`] state and feeds user actions back in.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`controller`] | [`controller::ChatController`], request commands, outcomes |
//! | [`message`] | Conversation messages and bug result records |
//! | [`query`] | Pending/result/error tracking per query variant |
//! | [`visibility`] | Closed / expanded / minimized state machine |
//! | [`backend`] | [`backend::QueryBackend`] trait and the canned mock backend |
//! | [`relay`] | HTTP backend talking to the relay server |

pub mod backend;
pub mod controller;
pub mod message;
pub mod query;
pub mod relay;
pub mod visibility;

pub use backend::{ImageUpload, MockBackend, QueryBackend, QueryError, QueryResponse};
pub use controller::ChatController;
pub use message::{BugResult, BugStatus, Message, MessageContent, MessageKind, Severity};
pub use relay::RelayBackend;
pub use visibility::{Visibility, VisibilityEvent};
