//! Error taxonomy shared by sources, displays and the application loop

use crate::capability::{Capability, CapabilitySet, Requirement};

/// Root error type for gauges operations
#[derive(Debug, thiserror::Error)]
pub enum GaugeError {
    /// A source was bound to a role whose requirement it cannot satisfy.
    ///
    /// Raised at bind time; the caller may retry with another source.
    #[error("display '{display}' cannot bind role '{role}': requires {required}, source '{source_id}' offers {offered}")]
    IncompatibleSource {
        display: String,
        role: String,
        source_id: String,
        required: Requirement,
        offered: CapabilitySet,
    },

    /// A capability method was invoked on a source that does not implement it
    #[error("source '{source_id}' does not support {capability}")]
    UnsupportedCapability {
        source_id: String,
        capability: Capability,
    },

    /// A theme lookup missed and no default theme could supply the role
    #[error("unknown theme role '{role}'")]
    UnknownRole { role: String },

    /// The drawing backend failed to initialize
    #[error("drawing surface unavailable: {reason}")]
    SurfaceUnavailable { reason: String },

    /// Bind was called with a role name the display does not declare
    #[error("display '{display}' has no role named '{role}'")]
    NoSuchRole { display: String, role: String },

    /// A backend failed while drawing or presenting a frame
    #[error("render failed: {context}")]
    Render { context: String },

    /// Configuration values that cannot be turned into a working dashboard
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl GaugeError {
    pub fn unsupported(source_id: impl Into<String>, capability: Capability) -> Self {
        GaugeError::UnsupportedCapability {
            source_id: source_id.into(),
            capability,
        }
    }

    pub fn render(context: impl Into<String>) -> Self {
        GaugeError::Render {
            context: context.into(),
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        GaugeError::InvalidConfig {
            message: message.into(),
        }
    }
}

/// Result alias used across the gauges crates
pub type Result<T> = std::result::Result<T, GaugeError>;
