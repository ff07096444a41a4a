//! Outbound messaging seam.

use async_trait::async_trait;

/// Transactional email collaborator.
///
/// Best-effort: `false` means the provider rejected or failed the send.
/// Callers log the failure and move on; delivery is never retried and
/// never rolls back an already-committed issuance.
#[async_trait]
pub trait MailerTrait: Send + Sync {
    async fn send(
        &self,
        recipient_address: &str,
        recipient_name: &str,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> bool;
}
