use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::word_data::{GenreDocument, SubGenreDocument, WordRecord};

/// A subtree of the taxonomy, used to scope cascading deletes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaxonomyScope {
    Genre(String),
    SubGenre(String, String),
    SubSubGenre(String, String, String),
}

impl TaxonomyScope {
    /// True when a word filed under (genre, sub, subsub) lies inside this scope.
    pub fn contains(&self, genre: &str, sub_genre: &str, sub_sub_genre: &str) -> bool {
        match self {
            TaxonomyScope::Genre(g) => g == genre,
            TaxonomyScope::SubGenre(g, s) => g == genre && s == sub_genre,
            TaxonomyScope::SubSubGenre(g, s, ss) => {
                g == genre && s == sub_genre && ss == sub_sub_genre
            }
        }
    }

    pub fn describe(&self) -> String {
        match self {
            TaxonomyScope::Genre(g) => g.clone(),
            TaxonomyScope::SubGenre(g, s) => format!("{} → {}", g, s),
            TaxonomyScope::SubSubGenre(g, s, ss) => format!("{} → {} → {}", g, s, ss),
        }
    }
}

/// Three-level genre tree. Genres and sub-genres list in lexicographic order,
/// sub-sub-genres in insertion order.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct GenreTree {
    genres: GenreDocument,
}

fn clean_name(raw: &str, level: &str) -> Result<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(Error::Validation(format!("{} name must not be empty", level)));
    }
    Ok(name.to_string())
}

impl GenreTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_document(genres: GenreDocument) -> Self {
        GenreTree { genres }
    }

    pub fn to_document(&self) -> GenreDocument {
        self.genres.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.genres.is_empty()
    }

    /// Adds a genre. Returns false when it already exists.
    pub fn add_genre(&mut self, name: &str) -> Result<bool> {
        let name = clean_name(name, "Genre")?;
        if self.genres.contains_key(&name) {
            return Ok(false);
        }
        debug!("Adding genre '{}'", name);
        self.genres.insert(name, SubGenreDocument::new());
        Ok(true)
    }

    pub fn add_sub_genre(&mut self, genre: &str, name: &str) -> Result<bool> {
        let name = clean_name(name, "Sub-genre")?;
        let subs = self.sub_map_mut(genre)?;
        if subs.contains_key(&name) {
            return Ok(false);
        }
        debug!("Adding sub-genre '{}' under '{}'", name, genre);
        subs.insert(name, Vec::new());
        Ok(true)
    }

    pub fn add_sub_sub_genre(&mut self, genre: &str, sub_genre: &str, name: &str) -> Result<bool> {
        let name = clean_name(name, "Sub-sub-genre")?;
        let leaves = self
            .sub_map_mut(genre)?
            .get_mut(sub_genre)
            .ok_or_else(|| Error::NotFound(format!("sub-genre '{} → {}'", genre, sub_genre)))?;
        if leaves.contains(&name) {
            return Ok(false);
        }
        debug!("Adding sub-sub-genre '{}' under '{} → {}'", name, genre, sub_genre);
        leaves.push(name);
        Ok(true)
    }

    /// Removes the node named by `scope` together with its descendants.
    /// Words are not touched here; the caller cascades them.
    pub fn remove(&mut self, scope: &TaxonomyScope) -> Result<()> {
        let missing = || Error::NotFound(format!("genre path '{}'", scope.describe()));
        match scope {
            TaxonomyScope::Genre(g) => {
                self.genres.remove(g).ok_or_else(missing)?;
            }
            TaxonomyScope::SubGenre(g, s) => {
                self.genres
                    .get_mut(g)
                    .and_then(|subs| subs.remove(s))
                    .ok_or_else(missing)?;
            }
            TaxonomyScope::SubSubGenre(g, s, ss) => {
                let leaves = self
                    .genres
                    .get_mut(g)
                    .and_then(|subs| subs.get_mut(s))
                    .ok_or_else(missing)?;
                let before = leaves.len();
                leaves.retain(|leaf| leaf != ss);
                if leaves.len() == before {
                    return Err(missing());
                }
            }
        }
        Ok(())
    }

    /// Reconstructs the tree from word data when the tree is empty.
    /// Returns whether any genre was recovered.
    pub fn rebuild_from_words<'a, I>(&mut self, words: I) -> bool
    where
        I: IntoIterator<Item = &'a WordRecord>,
    {
        if !self.genres.is_empty() {
            return false;
        }
        let mut rebuilt = GenreDocument::new();
        for record in words {
            if record.genre.is_empty() {
                continue;
            }
            let leaves = rebuilt
                .entry(record.genre.clone())
                .or_default()
                .entry(record.sub_genre.clone())
                .or_default();
            if !record.sub_sub_genre.is_empty() && !leaves.contains(&record.sub_sub_genre) {
                leaves.push(record.sub_sub_genre.clone());
            }
        }
        if rebuilt.is_empty() {
            return false;
        }
        self.genres = rebuilt;
        true
    }

    pub fn contains_genre(&self, genre: &str) -> bool {
        self.genres.contains_key(genre)
    }

    pub fn contains_path(&self, genre: &str, sub_genre: &str, sub_sub_genre: &str) -> bool {
        self.genres
            .get(genre)
            .and_then(|subs| subs.get(sub_genre))
            .map_or(false, |leaves| leaves.iter().any(|leaf| leaf == sub_sub_genre))
    }

    pub fn genres(&self) -> Vec<&str> {
        self.genres.keys().map(String::as_str).collect()
    }

    pub fn sub_genres(&self, genre: &str) -> Vec<&str> {
        self.genres
            .get(genre)
            .map(|subs| subs.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn sub_sub_genres(&self, genre: &str, sub_genre: &str) -> Vec<&str> {
        self.genres
            .get(genre)
            .and_then(|subs| subs.get(sub_genre))
            .map(|leaves| leaves.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Every (genre, sub-genre, sub-sub-genre) path in display order.
    pub fn leaves(&self) -> Vec<(&str, &str, &str)> {
        let mut paths = Vec::new();
        for (genre, subs) in &self.genres {
            for (sub, leaves) in subs {
                for leaf in leaves {
                    paths.push((genre.as_str(), sub.as_str(), leaf.as_str()));
                }
            }
        }
        paths
    }

    fn sub_map_mut(&mut self, genre: &str) -> Result<&mut BTreeMap<String, Vec<String>>> {
        self.genres
            .get_mut(genre)
            .ok_or_else(|| Error::NotFound(format!("genre '{}'", genre)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(genre: &str, sub: &str, subsub: &str) -> WordRecord {
        WordRecord {
            word: format!("{}-{}-{}", genre, sub, subsub),
            word_alts: Vec::new(),
            meaning: "m".to_string(),
            genre: genre.to_string(),
            sub_genre: sub.to_string(),
            sub_sub_genre: subsub.to_string(),
            enabled: true,
        }
    }

    fn sample_tree() -> GenreTree {
        let mut tree = GenreTree::new();
        tree.add_genre("英語").unwrap();
        tree.add_sub_genre("英語", "動詞").unwrap();
        tree.add_sub_sub_genre("英語", "動詞", "基本").unwrap();
        tree.add_sub_sub_genre("英語", "動詞", "応用").unwrap();
        tree.add_sub_genre("英語", "名詞").unwrap();
        tree
    }

    #[test]
    fn test_add_genre_is_idempotent() {
        let mut tree = GenreTree::new();
        assert!(tree.add_genre("英語").unwrap());
        assert!(!tree.add_genre("英語").unwrap());
        assert!(!tree.add_genre("  英語 ").unwrap());
        assert_eq!(tree.genres(), vec!["英語"]);
    }

    #[test]
    fn test_empty_names_are_rejected() {
        let mut tree = sample_tree();
        let before = tree.clone();
        assert!(matches!(tree.add_genre("   "), Err(Error::Validation(_))));
        assert!(matches!(tree.add_sub_genre("英語", ""), Err(Error::Validation(_))));
        assert!(matches!(
            tree.add_sub_sub_genre("英語", "動詞", " "),
            Err(Error::Validation(_))
        ));
        assert_eq!(tree, before);
    }

    #[test]
    fn test_children_require_existing_parent() {
        let mut tree = sample_tree();
        assert!(matches!(tree.add_sub_genre("数学", "代数"), Err(Error::NotFound(_))));
        assert!(matches!(
            tree.add_sub_sub_genre("英語", "形容詞", "基本"),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_sub_sub_genres_keep_insertion_order_and_dedup() {
        let mut tree = sample_tree();
        assert!(!tree.add_sub_sub_genre("英語", "動詞", "基本").unwrap());
        assert_eq!(tree.sub_sub_genres("英語", "動詞"), vec!["基本", "応用"]);
    }

    #[test]
    fn test_listings_are_sorted() {
        let mut tree = GenreTree::new();
        tree.add_genre("b").unwrap();
        tree.add_genre("a").unwrap();
        tree.add_sub_genre("a", "z").unwrap();
        tree.add_sub_genre("a", "y").unwrap();
        assert_eq!(tree.genres(), vec!["a", "b"]);
        assert_eq!(tree.sub_genres("a"), vec!["y", "z"]);
        assert!(tree.sub_genres("missing").is_empty());
    }

    #[test]
    fn test_remove_scopes() {
        let mut tree = sample_tree();
        tree.remove(&TaxonomyScope::SubSubGenre("英語".into(), "動詞".into(), "基本".into()))
            .unwrap();
        assert_eq!(tree.sub_sub_genres("英語", "動詞"), vec!["応用"]);

        tree.remove(&TaxonomyScope::SubGenre("英語".into(), "名詞".into())).unwrap();
        assert_eq!(tree.sub_genres("英語"), vec!["動詞"]);

        tree.remove(&TaxonomyScope::Genre("英語".into())).unwrap();
        assert!(tree.is_empty());
    }

    #[test]
    fn test_remove_missing_path_is_not_found() {
        let mut tree = sample_tree();
        let before = tree.clone();
        assert!(matches!(
            tree.remove(&TaxonomyScope::Genre("数学".into())),
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            tree.remove(&TaxonomyScope::SubSubGenre("英語".into(), "動詞".into(), "上級".into())),
            Err(Error::NotFound(_))
        ));
        assert_eq!(tree, before);
    }

    #[test]
    fn test_rebuild_produces_exactly_the_word_paths() {
        let words = vec![
            record("英語", "動詞", "基本"),
            record("英語", "動詞", "基本"),
            record("英語", "動詞", "応用"),
            record("数学", "代数", "方程式"),
            record("", "孤立", "x"),
        ];
        let mut tree = GenreTree::new();
        assert!(tree.rebuild_from_words(&words));
        assert_eq!(
            tree.leaves(),
            vec![
                ("数学", "代数", "方程式"),
                ("英語", "動詞", "基本"),
                ("英語", "動詞", "応用"),
            ]
        );
    }

    #[test]
    fn test_rebuild_is_noop_on_non_empty_tree() {
        let mut tree = sample_tree();
        let before = tree.clone();
        assert!(!tree.rebuild_from_words(&[record("数学", "代数", "方程式")]));
        assert_eq!(tree, before);
    }

    #[test]
    fn test_rebuild_is_noop_without_words() {
        let mut tree = GenreTree::new();
        assert!(!tree.rebuild_from_words(&[]));
        assert!(tree.is_empty());
    }

    #[test]
    fn test_rebuild_is_noop_when_no_word_has_a_genre() {
        let mut tree = GenreTree::new();
        assert!(!tree.rebuild_from_words(&[record("", "動詞", "基本"), record("", "", "")]));
        assert!(tree.is_empty());
    }

    #[test]
    fn test_scope_contains() {
        let scope = TaxonomyScope::SubGenre("英語".into(), "動詞".into());
        assert!(scope.contains("英語", "動詞", "基本"));
        assert!(!scope.contains("英語", "名詞", "基本"));
        assert!(TaxonomyScope::Genre("英語".into()).contains("英語", "", ""));
    }
}
