use std::io;

use thiserror::Error;

/// Failures that abort a scan. Anything not listed here is degraded to an
/// absent field on the affected device instead.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("invalid subnet '{input}': {reason}")]
    InvalidSubnet { input: String, reason: String },

    #[error("could not determine default IPv4 gateway")]
    NoDefaultRoute,

    #[error("network interface '{0}' not found")]
    InterfaceNotFound(String),

    #[error("no IPv4 address found on interface {0}")]
    NoIpv4Address(String),

    #[error("interface {0} has no hardware address")]
    NoMacAddress(String),

    #[error("no interface is attached to {0}")]
    NoRouteToNetwork(String),

    #[error("insufficient privileges to open a raw socket on {interface} (try running as root)")]
    Permission {
        interface: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to open link-layer channel on {interface}: {reason}")]
    Channel { interface: String, reason: String },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ScanError {
    pub fn invalid_subnet(input: &str, reason: impl ToString) -> Self {
        Self::InvalidSubnet {
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Classifies a failure to open a raw channel on `interface`.
    pub fn from_channel_error(interface: &str, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => Self::Permission {
                interface: interface.to_string(),
                source: err,
            },
            _ => Self::Channel {
                interface: interface.to_string(),
                reason: err.to_string(),
            },
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
