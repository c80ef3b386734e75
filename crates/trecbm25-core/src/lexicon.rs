//! Bijective mapping between surface terms and dense 1-based term ids.

use std::collections::HashMap;
use std::io::Write;

use crate::errors::EngineError;

/// A term ↔ term-id bijection, assigning ids in first-sight order.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    ids: HashMap<String, u32>,
    terms: Vec<String>,
}

impl Lexicon {
    /// Creates an empty lexicon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up `term`'s id, assigning the next dense id if it has not been
    /// seen before. Ids are 1-based and immutable once assigned.
    pub fn id_of(&mut self, term: &str) -> u32 {
        if let Some(&id) = self.ids.get(term) {
            return id;
        }
        let id = self.terms.len() as u32 + 1;
        self.terms.push(term.to_string());
        self.ids.insert(term.to_string(), id);
        id
    }

    /// Returns the term for `id`, if assigned.
    pub fn term_of(&self, id: u32) -> Option<&str> {
        self.terms.get((id as usize).checked_sub(1)?).map(String::as_str)
    }

    /// Returns the id already assigned to `term`, without assigning a new one.
    pub fn lookup(&self, term: &str) -> Option<u32> {
        self.ids.get(term).copied()
    }

    /// True if `term` has an assigned id.
    pub fn contains(&self, term: &str) -> bool {
        self.ids.contains_key(term)
    }

    /// Number of distinct terms in the lexicon.
    pub fn size(&self) -> usize {
        self.terms.len()
    }

    /// Writes one term per line, in id order (line *i* is the term with id *i*).
    pub fn emit<W: Write>(&self, mut writer: W) -> Result<(), EngineError> {
        for term in &self.terms {
            writeln!(writer, "{term}")?;
        }
        Ok(())
    }

    /// Rebuilds a lexicon from its persisted line sequence, assigning ids
    /// `1..=n` in file order.
    pub fn from_lines<I: IntoIterator<Item = String>>(lines: I) -> Self {
        let mut lexicon = Self::new();
        for term in lines {
            lexicon.id_of(&term);
        }
        lexicon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assigns_dense_one_based_ids_in_sight_order() {
        let mut lexicon = Lexicon::new();
        assert_eq!(lexicon.id_of("cats"), 1);
        assert_eq!(lexicon.id_of("dogs"), 2);
        assert_eq!(lexicon.id_of("cats"), 1);
        assert_eq!(lexicon.size(), 2);
    }

    #[test]
    fn term_of_is_the_inverse_of_id_of() {
        let mut lexicon = Lexicon::new();
        let id = lexicon.id_of("cats");
        assert_eq!(lexicon.term_of(id), Some("cats"));
        assert_eq!(lexicon.term_of(999), None);
    }

    #[test]
    fn emit_round_trips_through_from_lines() {
        let mut lexicon = Lexicon::new();
        lexicon.id_of("cats");
        lexicon.id_of("dogs");

        let mut buf = Vec::new();
        lexicon.emit(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let reloaded = Lexicon::from_lines(text.lines().map(str::to_string));

        assert_eq!(reloaded.lookup("cats"), Some(1));
        assert_eq!(reloaded.lookup("dogs"), Some(2));
        assert_eq!(reloaded.size(), 2);
    }

    #[test]
    fn contains_reflects_assignment() {
        let mut lexicon = Lexicon::new();
        assert!(!lexicon.contains("cats"));
        lexicon.id_of("cats");
        assert!(lexicon.contains("cats"));
    }
}
