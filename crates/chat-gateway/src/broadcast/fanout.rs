//! Broadcast fan-out
//!
//! One spawned task per recipient: persist the copy, then write it to the
//! recipient's transport. A failed save skips the write.

use std::sync::Arc;

use chat_core::{DomainError, Message, MessageRepository, User, UserRepository};
use futures::future::join_all;
use tracing::instrument;

use crate::connection::{SharedTransport, Snapshot, TransportError};

/// Why a single recipient did not get a message
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("failed to persist message: {0}")]
    Persistence(#[from] DomainError),

    #[error("failed to write message: {0}")]
    Transport(#[from] TransportError),

    #[error("delivery task aborted: {0}")]
    Aborted(String),
}

/// A recipient that did not get a message
#[derive(Debug)]
pub struct DeliveryFailure {
    pub recipient_id: String,
    pub error: DeliveryError,
}

/// Outcome of one broadcast round
#[derive(Debug, Default)]
pub struct BroadcastReport {
    /// Recipients whose copy was persisted and written
    pub delivered: usize,
    pub failures: Vec<DeliveryFailure>,
}

impl BroadcastReport {
    /// Number of recipients targeted
    pub fn attempted(&self) -> usize {
        self.delivered + self.failures.len()
    }

    /// Check if every recipient got the message
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Connections in `snapshot` that receive a message from `sender_id`
fn recipients<'a>(
    snapshot: &'a Snapshot,
    sender_id: &str,
) -> Vec<(&'a String, &'a SharedTransport)> {
    snapshot
        .iter()
        .filter(|(user_id, _)| user_id.as_str() != sender_id)
        .collect()
}

async fn deliver(
    messages: Arc<dyn MessageRepository>,
    transport: SharedTransport,
    message: Message,
) -> Result<(), DeliveryError> {
    messages.save(&message).await?;
    transport.send_text(&message.payload).await?;
    Ok(())
}

/// Send `payload` from `sender` to every connection in `snapshot` except the
/// sender's own, waiting for all deliveries to finish.
///
/// Deliveries run as detached tasks, so a dropped caller does not cancel
/// them. Failures are collected into the report and never stop the other
/// recipients.
#[instrument(skip_all, fields(sender_id = %sender.id, recipients = tracing::field::Empty))]
pub async fn fan_out(
    messages: &Arc<dyn MessageRepository>,
    sender: &User,
    payload: &str,
    snapshot: &Snapshot,
) -> BroadcastReport {
    let targets = recipients(snapshot, &sender.id);
    tracing::Span::current().record("recipients", targets.len());

    let (recipient_ids, tasks): (Vec<String>, Vec<_>) = targets
        .into_iter()
        .map(|(user_id, transport)| {
            let message = Message::new(
                uuid::Uuid::new_v4().to_string(),
                sender,
                user_id.clone(),
                payload,
            );
            let task = tokio::spawn(deliver(
                Arc::clone(messages),
                Arc::clone(transport),
                message,
            ));
            (user_id.clone(), task)
        })
        .unzip();

    let mut report = BroadcastReport::default();

    for (recipient_id, outcome) in recipient_ids.into_iter().zip(join_all(tasks).await) {
        let error = match outcome {
            Ok(Ok(())) => {
                report.delivered += 1;
                continue;
            }
            Ok(Err(e)) => e,
            Err(e) => DeliveryError::Aborted(e.to_string()),
        };

        tracing::debug!(recipient_id = %recipient_id, error = %error, "Delivery failed");
        report.failures.push(DeliveryFailure {
            recipient_id,
            error,
        });
    }

    if !report.is_complete() {
        let failed: Vec<&str> = report
            .failures
            .iter()
            .map(|f| f.recipient_id.as_str())
            .collect();

        tracing::warn!(
            sender_id = %sender.id,
            failed = ?failed,
            delivered = report.delivered,
            "Unable to send message to some users"
        );
    }

    report
}

/// Persist a copy of `payload` for every directory user absent from
/// `snapshot`. Returns the number of copies saved.
///
/// # Errors
/// Fails on the first directory or store error.
#[instrument(skip_all, fields(sender_id = %sender.id))]
pub async fn persist_offline(
    users: &dyn UserRepository,
    messages: &dyn MessageRepository,
    sender: &User,
    payload: &str,
    snapshot: &Snapshot,
) -> Result<usize, DomainError> {
    let active: Vec<String> = snapshot.keys().cloned().collect();
    let offline = users.find_not_in_ids(&active).await?;

    for user in &offline {
        let message = Message::new(uuid::Uuid::new_v4().to_string(), sender, &user.id, payload);
        messages.save(&message).await?;
    }

    if !offline.is_empty() {
        tracing::debug!(count = offline.len(), "Stored message for offline users");
    }

    Ok(offline.len())
}
