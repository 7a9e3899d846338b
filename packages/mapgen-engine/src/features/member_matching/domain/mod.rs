pub mod member_match;

pub use member_match::{AmbiguousMatch, MatchOrigin, MemberMatchSet, MemberPair};
