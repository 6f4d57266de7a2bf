use std::collections::HashMap;
use std::fmt;

/// How a source member was paired with its mirror member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// The source member carries the mirror member's id
    Link,
    /// Both members have exactly the same name
    Name,
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchKind::Link => write!(f, "link"),
            MatchKind::Name => write!(f, "name"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberMatch {
    pub source_id: String,
    pub mirror_id: String,
    pub kind: MatchKind,
}

/// Source member id → mirror member id, in source roster order.
///
/// Holds at most one mirror id per source id and at most one source id per
/// mirror id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Correspondence {
    matches: Vec<MemberMatch>,
    by_source: HashMap<String, usize>,
}

impl Correspondence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pair. Returns false (and changes nothing) if either side is already paired.
    pub(crate) fn insert(&mut self, entry: MemberMatch) -> bool {
        if self.by_source.contains_key(&entry.source_id)
            || self.matches.iter().any(|m| m.mirror_id == entry.mirror_id)
        {
            return false;
        }
        self.by_source
            .insert(entry.source_id.clone(), self.matches.len());
        self.matches.push(entry);
        true
    }

    /// Mirror id paired with `source_id`.
    pub fn get(&self, source_id: &str) -> Option<&str> {
        self.by_source
            .get(source_id)
            .map(|&i| self.matches[i].mirror_id.as_str())
    }

    pub fn contains_source(&self, source_id: &str) -> bool {
        self.by_source.contains_key(source_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MemberMatch> {
        self.matches.iter()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Map source ids to mirror ids, keeping order and dropping unpaired ids.
    pub fn translate(&self, source_ids: &[String]) -> Vec<String> {
        source_ids
            .iter()
            .filter_map(|id| self.get(id))
            .map(str::to_string)
            .collect()
    }
}
