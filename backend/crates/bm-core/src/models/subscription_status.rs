use serde::{Deserialize, Serialize};

/// State of the live-update subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Join sent, no reply yet
    #[default]
    Connecting,
    /// Broker acknowledged the join; events are flowing
    Subscribed,
    /// Channel or socket closed
    Closed,
    /// Broker rejected the join or reported an error
    Errored,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Connecting => "connecting",
            Self::Subscribed => "subscribed",
            Self::Closed => "closed",
            Self::Errored => "errored",
        }
    }

    pub fn is_online(&self) -> bool {
        matches!(self, Self::Subscribed)
    }

    /// Whether a new subscription should be opened.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed | Self::Errored)
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
