//! Configuration-driven admission filter for remote profiles.
//!
//! Rules come from a JSON file (see [`filter::RuleSet`]); profile attributes
//! come from an injected [`profile::ProfileAttributes`] accessor.

pub mod activation;
pub mod config;
pub mod error;
pub mod filter;
pub mod notice;
pub mod profile;
pub mod telemetry;

pub use activation::{ActivationGate, StaticActivation};
pub use filter::{Admission, Filter, Rejection, RuleSet, RuleSetError};
pub use notice::{Notice, NoticeSink, Severity, TracingNotices};
pub use profile::{ProfileAttributes, ProfileSnapshot};
