//! Skill tokens and skill sets.
//!
//! Two skill strings are the same skill iff their normalized forms are equal.
//! No stemming, no synonyms: "JavaScript" and "JS" are different skills.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Lowercases and trims a raw skill string. Total: never fails.
pub fn normalize_skill(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// A normalized, non-blank skill token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Skill(String);

impl Skill {
    /// Returns `None` when the input is blank after normalization.
    pub fn new(raw: &str) -> Option<Self> {
        let normalized = normalize_skill(raw);
        if normalized.is_empty() {
            None
        } else {
            Some(Self(normalized))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An insertion-ordered collection of skills with duplicates collapsed to
/// their first occurrence. Blank tokens are dropped on insert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SkillSet {
    skills: Vec<Skill>,
    #[serde(skip)]
    seen: HashSet<Skill>,
}

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a raw skill. Returns `true` if it was new to the set.
    pub fn insert(&mut self, raw: &str) -> bool {
        match Skill::new(raw) {
            Some(skill) => self.insert_skill(skill),
            None => false,
        }
    }

    pub fn insert_skill(&mut self, skill: Skill) -> bool {
        if self.seen.contains(&skill) {
            return false;
        }
        self.seen.insert(skill.clone());
        self.skills.push(skill);
        true
    }

    pub fn contains(&self, skill: &Skill) -> bool {
        self.seen.contains(skill)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Skill> {
        self.skills.iter()
    }

    pub fn to_strings(&self) -> Vec<String> {
        self.skills.iter().map(|s| s.0.clone()).collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for SkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = SkillSet::new();
        for raw in iter {
            set.insert(raw.as_ref());
        }
        set
    }
}

impl<'de> Deserialize<'de> for SkillSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Vec::<String>::deserialize(deserializer)?;
        Ok(raw.into_iter().collect())
    }
}
