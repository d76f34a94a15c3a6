//! Health-check execution: probing single endpoints and fanning a target's
//! jobs out under an admission gate.
mod client;
mod dispatch;
mod probe;
mod types;
mod url;

#[cfg(test)]
pub(crate) mod test_support;

pub use client::{DEFAULT_USER_AGENT, build_client};
pub use dispatch::{AdmissionGate, Dispatcher, JobObserver};
pub use probe::{HttpProbe, Probe};
pub use types::{EndpointResult, Job, Outcome, Target};
pub use url::resolve_url;
