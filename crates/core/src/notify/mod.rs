//! Push notification decisions and delivery.

pub mod dispatcher;
pub mod sender;

pub use dispatcher::{DispatchResult, NotificationDispatcher, SkipReason};
pub use sender::PushSender;
