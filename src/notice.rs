use serde::Serialize;
use tracing::{info, warn};

/// How loudly a notice should be surfaced to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
}

/// Operator-facing event raised while building or running the filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    pub message: String,
}

impl Notice {
    pub fn info(entity: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            entity: entity.map(str::to_string),
            message: message.into(),
        }
    }

    pub fn warning(entity: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            entity: entity.map(str::to_string),
            message: message.into(),
        }
    }
}

/// Destination for notices. Formatting and colouring belong to the implementor.
pub trait NoticeSink: Send + Sync {
    fn emit(&self, notice: Notice);
}

/// Default sink forwarding notices to the `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotices;

impl NoticeSink for TracingNotices {
    fn emit(&self, notice: Notice) {
        let entity = notice.entity.as_deref().unwrap_or("-");
        match notice.severity {
            Severity::Info => info!(entity, "{}", notice.message),
            Severity::Warning => warn!(entity, "{}", notice.message),
        }
    }
}
