//! Push delivery seam.

use async_trait::async_trait;
use sasper_shared::{FcmClient, PushError, PushMessage};

/// Delivers a single push message.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PushSender: Send + Sync {
    /// Sends `message`, reporting whether the channel accepted it.
    async fn send(&self, message: &PushMessage) -> Result<(), PushError>;
}

#[async_trait]
impl PushSender for FcmClient {
    async fn send(&self, message: &PushMessage) -> Result<(), PushError> {
        FcmClient::send(self, message).await
    }
}
