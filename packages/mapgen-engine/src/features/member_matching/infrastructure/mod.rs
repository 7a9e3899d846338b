pub mod matcher;
pub mod name_index;

pub use matcher::MemberMatcher;
pub use name_index::NameIndex;
