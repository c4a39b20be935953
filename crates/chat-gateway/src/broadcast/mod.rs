//! Message broadcasting
//!
//! Fan-out of one inbound chat frame to every other live connection, and
//! durable copies for users who are not connected.

mod fanout;

pub use fanout::{
    fan_out, persist_offline, BroadcastReport, DeliveryError, DeliveryFailure,
};
