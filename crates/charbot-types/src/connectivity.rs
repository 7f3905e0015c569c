//! Connectivity status of the exchange path.

use serde::{Deserialize, Serialize};

use std::fmt;

/// Health of the most recent exchange (or credential acquisition).
///
/// A rolling single-slot summary: the last write wins and no history is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectivityStatus {
    #[default]
    Connected,
    Disconnected,
}

impl ConnectivityStatus {
    pub fn is_connected(self) -> bool {
        self == ConnectivityStatus::Connected
    }
}

impl fmt::Display for ConnectivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectivityStatus::Connected => write!(f, "connected"),
            ConnectivityStatus::Disconnected => write!(f, "disconnected"),
        }
    }
}
