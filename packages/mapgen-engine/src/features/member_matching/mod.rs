//! Member Matching
//!
//! Pairs source members with target members for one type pair. Explicit
//! renames win, remaining target members pair by name under the configured
//! case policy, and leftovers are reported per `RequiredMappingStrategy`.
//!
//! ```text
//! source pool (readable) ─┐
//!                         ├─ ignores → obsolete filter → renames → names ─→ MemberMatchSet
//! target pool (writable) ─┘
//! ```

pub mod domain;
pub mod infrastructure;

pub use domain::{AmbiguousMatch, MatchOrigin, MemberMatchSet, MemberPair};
pub use infrastructure::MemberMatcher;
