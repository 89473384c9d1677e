//*** START FILE: src/storage_io.rs ***//
use std::collections::HashMap;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::Result;
use crate::types::word_data::{GenreDocument, WordRecord};

pub const WORDS_KEY: &str = "words";
pub const GENRES_KEY: &str = "genres";

/// Minimal key-value persistence, the same shape as browser local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Keeps values in memory only.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Stores each key as `<dir>/<key>.json`, replacing files atomically.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let temp_file = NamedTempFile::new_in(&self.dir)?;
        {
            let mut writer = BufWriter::new(&temp_file);
            writer.write_all(value.as_bytes())?;
            writer.flush()?;
        }
        let path = self.path_for(key);
        temp_file.persist(&path).map_err(|e| e.error)?;
        debug!("Wrote {}", path.display());
        Ok(())
    }
}

/// Loads the word list; an absent key is an empty list.
pub fn load_words(store: &impl KeyValueStore) -> Result<Vec<WordRecord>> {
    match store.get(WORDS_KEY)? {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(Vec::new()),
    }
}

pub fn save_words(store: &mut impl KeyValueStore, words: &[WordRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(words)?;
    store.set(WORDS_KEY, &json)
}

/// Loads the genre tree; an absent key is an empty mapping.
pub fn load_genres(store: &impl KeyValueStore) -> Result<GenreDocument> {
    match store.get(GENRES_KEY)? {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(GenreDocument::new()),
    }
}

pub fn save_genres(store: &mut impl KeyValueStore, genres: &GenreDocument) -> Result<()> {
    let json = serde_json::to_string_pretty(genres)?;
    store.set(GENRES_KEY, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn sample_words() -> Vec<WordRecord> {
        vec![WordRecord {
            word: "run".to_string(),
            word_alts: vec!["ran".to_string()],
            meaning: "走る".to_string(),
            genre: "英語".to_string(),
            sub_genre: "動詞".to_string(),
            sub_sub_genre: "基本".to_string(),
            enabled: false,
        }]
    }

    #[test]
    fn test_absent_keys_default_to_empty() {
        let store = MemoryStore::new();
        assert!(load_words(&store).unwrap().is_empty());
        assert!(load_genres(&store).unwrap().is_empty());
    }

    #[test]
    fn test_file_store_persists_documents() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("data"));
        save_words(&mut store, &sample_words()).unwrap();

        let mut genres = GenreDocument::new();
        genres
            .entry("英語".to_string())
            .or_default()
            .insert("動詞".to_string(), vec!["基本".to_string()]);
        save_genres(&mut store, &genres).unwrap();

        let reopened = FileStore::new(dir.path().join("data"));
        assert_eq!(load_words(&reopened).unwrap(), sample_words());
        assert_eq!(load_genres(&reopened).unwrap(), genres);
        assert!(dir.path().join("data").join("words.json").is_file());
    }

    #[test]
    fn test_reads_documents_written_by_the_browser_app() {
        let mut store = MemoryStore::new();
        store
            .set(
                WORDS_KEY,
                r#"[{"word":"run","wordAlts":["ran"],"meaning":"走る","genre":"英語","subGenre":"動詞","subSubGenre":"基本","enabled":true}]"#,
            )
            .unwrap();
        store
            .set(GENRES_KEY, r#"{"英語":{"動詞":["基本","応用"]}}"#)
            .unwrap();
        let words = load_words(&store).unwrap();
        assert_eq!(words[0].word_alts, vec!["ran"]);
        assert_eq!(load_genres(&store).unwrap()["英語"]["動詞"], vec!["基本", "応用"]);
    }

    #[test]
    fn test_corrupt_document_is_a_json_error() {
        let mut store = MemoryStore::new();
        store.set(WORDS_KEY, "{not json").unwrap();
        assert!(matches!(load_words(&store), Err(Error::Json(_))));
    }
}
//*** END FILE: src/storage_io.rs ***//
