//! Member matching results

use crate::features::type_graph::domain::MemberDescriptor;
use serde::Serialize;

/// How a pair was formed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchOrigin {
    /// Explicit rename override
    Rename,
    /// Name equality under the configured case policy
    Name,
}

/// Source member feeding one target member
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberPair<'g> {
    pub source: &'g MemberDescriptor,
    pub target: &'g MemberDescriptor,
    pub origin: MatchOrigin,
}

/// Target member with more than one equally good source candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbiguousMatch<'g> {
    pub target: &'g MemberDescriptor,
    pub candidates: Vec<&'g MemberDescriptor>,
}

impl AmbiguousMatch<'_> {
    pub fn candidate_names(&self) -> Vec<&str> {
        self.candidates.iter().map(|m| m.name.as_str()).collect()
    }
}

/// Outcome of matching one (source type, target type) pair.
///
/// Pairs follow target declaration order. Ambiguous targets also appear in
/// `unmatched_target`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberMatchSet<'g> {
    pub pairs: Vec<MemberPair<'g>>,
    pub unmatched_source: Vec<&'g MemberDescriptor>,
    pub unmatched_target: Vec<&'g MemberDescriptor>,
    pub ambiguous: Vec<AmbiguousMatch<'g>>,
}

impl<'g> MemberMatchSet<'g> {
    pub fn pair_for_target(&self, target: &str) -> Option<&MemberPair<'g>> {
        self.pairs.iter().find(|p| p.target.name == target)
    }

    /// Whether `source` feeds at least one target
    pub fn feeds_any(&self, source: &str) -> bool {
        self.pairs.iter().any(|p| p.source.name == source)
    }

    /// Turn a pair without a usable conversion back into unmatched members.
    ///
    /// The source member becomes unmatched only when it feeds no other target.
    pub fn demote(&mut self, target: &str) -> Option<MemberPair<'g>> {
        let index = self.pairs.iter().position(|p| p.target.name == target)?;
        let pair = self.pairs.remove(index);

        self.unmatched_target.push(pair.target);
        if !self.feeds_any(&pair.source.name)
            && !self
                .unmatched_source
                .iter()
                .any(|m| m.name == pair.source.name)
        {
            self.unmatched_source.push(pair.source);
        }
        Some(pair)
    }

    pub fn is_complete(&self) -> bool {
        self.unmatched_source.is_empty() && self.unmatched_target.is_empty()
    }
}
