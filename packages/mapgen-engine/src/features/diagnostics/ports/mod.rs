pub mod severity_policy;

pub use severity_policy::{DefaultSeverities, SeverityPolicy};
