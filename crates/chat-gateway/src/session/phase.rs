//! Session phases

use std::fmt;

/// Where a connection is in its lifecycle.
///
/// `Closing` is reachable from every phase after registration; there are no
/// retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Redeeming the connect token
    Authenticating,
    /// Adding the connection to the registry
    Registering,
    /// Replaying stored messages
    BacklogDelivery,
    /// Reading and broadcasting inbound frames
    Streaming,
    /// Deregistering and closing the transport
    Closing,
    /// Connection deregistered and transport closed
    Closed,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Authenticating => "authenticating",
            Self::Registering => "registering",
            Self::BacklogDelivery => "backlog_delivery",
            Self::Streaming => "streaming",
            Self::Closing => "closing",
            Self::Closed => "closed",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(SessionPhase::BacklogDelivery.to_string(), "backlog_delivery");
        assert_eq!(SessionPhase::Closed.to_string(), "closed");
    }
}
