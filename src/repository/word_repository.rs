use std::fmt;

use tracing::{debug, warn};

use super::filter::TaxonomyFilter;
use crate::error::{Error, Result};
use crate::taxonomy::TaxonomyScope;
use crate::types::word_data::WordRecord;

/// In-memory identifier of a word. Assigned on insert or load, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WordId(pub u32);

impl fmt::Display for WordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub id: WordId,
    pub word: String,
    pub word_alts: Vec<String>,
    pub meaning: String,
    pub genre: String,
    pub sub_genre: String,
    pub sub_sub_genre: String,
    pub enabled: bool,
}

impl Word {
    fn from_record(id: WordId, record: WordRecord) -> Self {
        Word {
            id,
            word: record.word,
            word_alts: record.word_alts,
            meaning: record.meaning,
            genre: record.genre,
            sub_genre: record.sub_genre,
            sub_sub_genre: record.sub_sub_genre,
            enabled: record.enabled,
        }
    }

    pub fn to_record(&self) -> WordRecord {
        WordRecord {
            word: self.word.clone(),
            word_alts: self.word_alts.clone(),
            meaning: self.meaning.clone(),
            genre: self.genre.clone(),
            sub_genre: self.sub_genre.clone(),
            sub_sub_genre: self.sub_sub_genre.clone(),
            enabled: self.enabled,
        }
    }

    /// Alternates as shown in the word table.
    pub fn alts_display(&self) -> String {
        self.word_alts.join(" / ")
    }

    /// Alternates as edited in the inline form.
    pub fn alts_input(&self) -> String {
        self.word_alts.join(", ")
    }

    pub fn in_scope(&self, scope: &TaxonomyScope) -> bool {
        scope.contains(&self.genre, &self.sub_genre, &self.sub_sub_genre)
    }

    fn matches_keyword(&self, keyword_lower: &str) -> bool {
        self.word.to_lowercase().contains(keyword_lower)
            || self.meaning.to_lowercase().contains(keyword_lower)
            || self
                .word_alts
                .iter()
                .any(|alt| alt.to_lowercase().contains(keyword_lower))
    }
}

/// Raw registration input, as collected from the form.
#[derive(Debug, Clone, Default)]
pub struct NewWord {
    pub word: String,
    pub alts: String,
    pub meaning: String,
    pub genre: String,
    pub sub_genre: String,
    pub sub_sub_genre: String,
}

/// Splits a comma separated alternates field, trimming and dropping empty entries.
pub fn parse_alternates(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|alt| !alt.is_empty())
        .map(String::from)
        .collect()
}

#[derive(Debug, Default, Clone)]
pub struct WordRepository {
    words: Vec<Word>,
    next_id: u32,
}

impl WordRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads persisted records as-is, assigning fresh ids in document order.
    pub fn from_records(records: Vec<WordRecord>) -> Self {
        let mut repo = WordRepository::new();
        for record in records {
            if repo.find_by_word(&record.word).is_some() {
                warn!("Duplicate word '{}' in stored data; keeping both entries", record.word);
            }
            let id = repo.allocate_id();
            repo.words.push(Word::from_record(id, record));
        }
        repo
    }

    pub fn to_records(&self) -> Vec<WordRecord> {
        self.words.iter().map(Word::to_record).collect()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn all(&self) -> &[Word] {
        &self.words
    }

    pub fn get(&self, id: WordId) -> Option<&Word> {
        self.words.iter().find(|w| w.id == id)
    }

    pub fn find_by_word(&self, word: &str) -> Option<&Word> {
        self.words.iter().find(|w| w.word == word)
    }

    /// Registers a word. Every field except the alternates is required and
    /// the word string must not already be registered.
    pub fn add(&mut self, input: NewWord) -> Result<WordId> {
        let word = input.word.trim();
        let meaning = input.meaning.trim();
        let genre = input.genre.trim();
        let sub_genre = input.sub_genre.trim();
        let sub_sub_genre = input.sub_sub_genre.trim();

        let missing: Vec<&str> = [
            ("word", word),
            ("meaning", meaning),
            ("genre", genre),
            ("sub-genre", sub_genre),
            ("sub-sub-genre", sub_sub_genre),
        ]
        .iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| *field)
        .collect();
        if !missing.is_empty() {
            return Err(Error::Validation(format!(
                "required fields are empty: {}",
                missing.join(", ")
            )));
        }
        if self.find_by_word(word).is_some() {
            return Err(Error::Validation(format!("'{}' is already registered", word)));
        }

        let id = self.allocate_id();
        self.words.push(Word {
            id,
            word: word.to_string(),
            word_alts: parse_alternates(&input.alts),
            meaning: meaning.to_string(),
            genre: genre.to_string(),
            sub_genre: sub_genre.to_string(),
            sub_sub_genre: sub_sub_genre.to_string(),
            enabled: true,
        });
        debug!("Registered '{}' as {}", word, id);
        Ok(id)
    }

    /// Rewrites word, alternates and meaning. The taxonomy fields stay put.
    pub fn update(&mut self, id: WordId, new_word: &str, new_alts: &str, new_meaning: &str) -> Result<()> {
        let new_word = new_word.trim();
        let new_meaning = new_meaning.trim();
        if new_word.is_empty() || new_meaning.is_empty() {
            return Err(Error::Validation("word and meaning must not be empty".to_string()));
        }
        if self.words.iter().any(|w| w.word == new_word && w.id != id) {
            return Err(Error::Validation(format!("'{}' is already registered", new_word)));
        }
        let entry = self.get_mut(id)?;
        entry.word = new_word.to_string();
        entry.word_alts = parse_alternates(new_alts);
        entry.meaning = new_meaning.to_string();
        Ok(())
    }

    pub fn delete(&mut self, id: WordId) -> Result<Word> {
        let index = self
            .words
            .iter()
            .position(|w| w.id == id)
            .ok_or_else(|| Error::NotFound(format!("word {}", id)))?;
        Ok(self.words.remove(index))
    }

    pub fn set_enabled(&mut self, id: WordId, enabled: bool) -> Result<()> {
        self.get_mut(id)?.enabled = enabled;
        Ok(())
    }

    /// Flips the quiz flag and returns the new value.
    pub fn toggle_enabled(&mut self, id: WordId) -> Result<bool> {
        let entry = self.get_mut(id)?;
        entry.enabled = !entry.enabled;
        Ok(entry.enabled)
    }

    /// Removes every word filed inside `scope`, returning how many went.
    pub fn remove_in_scope(&mut self, scope: &TaxonomyScope) -> usize {
        let before = self.words.len();
        self.words.retain(|w| !w.in_scope(scope));
        before - self.words.len()
    }

    pub fn filter_by_taxonomy(&self, filter: &TaxonomyFilter) -> Vec<&Word> {
        self.words
            .iter()
            .filter(|w| filter.matches(&w.genre, &w.sub_genre, &w.sub_sub_genre))
            .collect()
    }

    /// Enabled words under the filter; the quiz pool.
    pub fn eligible(&self, filter: &TaxonomyFilter) -> Vec<&Word> {
        self.filter_by_taxonomy(filter)
            .into_iter()
            .filter(|w| w.enabled)
            .collect()
    }

    pub fn max_quiz_count(&self, filter: &TaxonomyFilter) -> usize {
        self.eligible(filter).len()
    }

    /// Case-insensitive substring search over word, meaning and alternates.
    pub fn search(&self, keyword: &str) -> Vec<&Word> {
        let keyword_lower = keyword.trim().to_lowercase();
        self.words
            .iter()
            .filter(|w| w.matches_keyword(&keyword_lower))
            .collect()
    }

    pub fn words_in_leaf(&self, genre: &str, sub_genre: &str, sub_sub_genre: &str) -> Vec<&Word> {
        self.filter_by_taxonomy(&TaxonomyFilter::leaf(genre, sub_genre, sub_sub_genre))
    }

    fn get_mut(&mut self, id: WordId) -> Result<&mut Word> {
        self.words
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(|| Error::NotFound(format!("word {}", id)))
    }

    fn allocate_id(&mut self) -> WordId {
        let id = WordId(self.next_id);
        self.next_id += 1;
        id
    }
}
