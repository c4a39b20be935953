//! Message entity <-> model mapper

use chat_core::entities::Message;

use crate::models::MessageModel;

/// Convert MessageModel to Message entity
impl From<MessageModel> for Message {
    fn from(model: MessageModel) -> Self {
        Message {
            id: model.id,
            sender_id: model.sender_id,
            sender_name: model.sender_name,
            recipient_id: model.recipient_id,
            payload: model.payload,
            timestamp: model.time,
        }
    }
}

/// Convert Message entity reference to a row for insertion
impl From<&Message> for MessageModel {
    fn from(message: &Message) -> Self {
        MessageModel {
            id: message.id.clone(),
            sender_id: message.sender_id.clone(),
            sender_name: message.sender_name.clone(),
            recipient_id: message.recipient_id.clone(),
            payload: message.payload.clone(),
            time: message.timestamp,
        }
    }
}
