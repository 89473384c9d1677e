use rand::Rng;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::quiz::{QuizEngine, QuizSettings};
use crate::repository::{NewWord, TaxonomyFilter, Word, WordId, WordRepository};
use crate::storage_io::{self, KeyValueStore};
use crate::taxonomy::{GenreTree, TaxonomyScope};

/// Owns the genre tree, the word list and the store they persist to.
/// Every mutator saves before returning.
pub struct VocabularyBook<S: KeyValueStore> {
    tree: GenreTree,
    words: WordRepository,
    store: S,
}

impl<S: KeyValueStore> VocabularyBook<S> {
    /// Loads both documents and repairs an empty tree from the word data.
    pub fn open(store: S) -> Result<Self> {
        let words = WordRepository::from_records(storage_io::load_words(&store)?);
        let tree = GenreTree::from_document(storage_io::load_genres(&store)?);
        let mut book = VocabularyBook { tree, words, store };

        let records = book.words.to_records();
        if book.tree.rebuild_from_words(&records) {
            warn!(
                "Genre tree was empty; rebuilt {} genre(s) from {} word(s)",
                book.tree.genres().len(),
                records.len()
            );
            storage_io::save_genres(&mut book.store, &book.tree.to_document())?;
        }
        info!(
            "Loaded {} word(s) in {} genre(s)",
            book.words.len(),
            book.tree.genres().len()
        );
        Ok(book)
    }

    pub fn tree(&self) -> &GenreTree {
        &self.tree
    }

    pub fn words(&self) -> &WordRepository {
        &self.words
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // --- Taxonomy ---

    pub fn add_genre(&mut self, name: &str) -> Result<bool> {
        self.commit_tree(|tree| tree.add_genre(name))
    }

    pub fn add_sub_genre(&mut self, genre: &str, name: &str) -> Result<bool> {
        self.commit_tree(|tree| tree.add_sub_genre(genre, name))
    }

    pub fn add_sub_sub_genre(&mut self, genre: &str, sub_genre: &str, name: &str) -> Result<bool> {
        self.commit_tree(|tree| tree.add_sub_sub_genre(genre, sub_genre, name))
    }

    /// Deletes a genre and every word filed under it. Returns the number of words removed.
    pub fn delete_genre(&mut self, genre: &str) -> Result<usize> {
        self.delete_scope(TaxonomyScope::Genre(genre.to_string()))
    }

    pub fn delete_sub_genre(&mut self, genre: &str, sub_genre: &str) -> Result<usize> {
        self.delete_scope(TaxonomyScope::SubGenre(genre.to_string(), sub_genre.to_string()))
    }

    pub fn delete_sub_sub_genre(&mut self, genre: &str, sub_genre: &str, sub_sub_genre: &str) -> Result<usize> {
        self.delete_scope(TaxonomyScope::SubSubGenre(
            genre.to_string(),
            sub_genre.to_string(),
            sub_sub_genre.to_string(),
        ))
    }

    fn delete_scope(&mut self, scope: TaxonomyScope) -> Result<usize> {
        let mut tree = self.tree.clone();
        tree.remove(&scope)?;
        let mut words = self.words.clone();
        let removed = words.remove_in_scope(&scope);

        storage_io::save_words(&mut self.store, &words.to_records())?;
        if let Err(e) = storage_io::save_genres(&mut self.store, &tree.to_document()) {
            // Put the old word list back so the two documents stay in step.
            if let Err(restore) = storage_io::save_words(&mut self.store, &self.words.to_records()) {
                warn!("Failed to restore word list after '{}': {}", scope.describe(), restore);
            }
            return Err(e);
        }
        self.tree = tree;
        self.words = words;
        info!("Deleted '{}' and {} word(s)", scope.describe(), removed);
        Ok(removed)
    }

    // --- Words ---

    /// Registers a word under an existing taxonomy leaf.
    pub fn register_word(&mut self, input: NewWord) -> Result<WordId> {
        let (genre, sub_genre, sub_sub_genre) = (
            input.genre.trim(),
            input.sub_genre.trim(),
            input.sub_sub_genre.trim(),
        );
        let fully_selected = !genre.is_empty() && !sub_genre.is_empty() && !sub_sub_genre.is_empty();
        if fully_selected && !self.tree.contains_path(genre, sub_genre, sub_sub_genre) {
            return Err(Error::Validation(format!(
                "genre path '{} → {} → {}' does not exist",
                genre, sub_genre, sub_sub_genre
            )));
        }
        self.commit_words(|words| words.add(input))
    }

    pub fn update_word(&mut self, id: WordId, new_word: &str, new_alts: &str, new_meaning: &str) -> Result<()> {
        self.commit_words(|words| words.update(id, new_word, new_alts, new_meaning))
    }

    pub fn delete_word(&mut self, id: WordId) -> Result<Word> {
        self.commit_words(|words| words.delete(id))
    }

    pub fn set_enabled(&mut self, id: WordId, enabled: bool) -> Result<()> {
        self.commit_words(|words| words.set_enabled(id, enabled))
    }

    pub fn toggle_enabled(&mut self, id: WordId) -> Result<bool> {
        self.commit_words(|words| words.toggle_enabled(id))
    }

    /// Word list for the home page; a blank keyword lists everything.
    pub fn list_words(&self, keyword: &str) -> Vec<&Word> {
        if keyword.trim().is_empty() {
            self.words.all().iter().collect()
        } else {
            self.words.search(keyword)
        }
    }

    pub fn words_in_leaf(&self, genre: &str, sub_genre: &str, sub_sub_genre: &str) -> Vec<&Word> {
        self.words.words_in_leaf(genre, sub_genre, sub_sub_genre)
    }

    // --- Quiz sourcing ---

    pub fn eligible_words(&self, filter: &TaxonomyFilter) -> Vec<&Word> {
        self.words.eligible(filter)
    }

    pub fn max_quiz_count(&self, filter: &TaxonomyFilter) -> usize {
        self.words.max_quiz_count(filter)
    }

    /// Configures `engine` with `settings` and starts a session over the
    /// matching enabled words. Returns the number of questions.
    pub fn start_quiz<R: Rng>(&self, engine: &mut QuizEngine<R>, settings: QuizSettings) -> Result<usize> {
        let eligible = self.words.eligible(&settings.filter);
        engine.configure(settings);
        engine.start_configured(eligible)
    }

    /// Applies `change` to a copy of the tree and keeps it only once the
    /// store has accepted it. Unchanged trees are not written.
    fn commit_tree<F>(&mut self, change: F) -> Result<bool>
    where
        F: FnOnce(&mut GenreTree) -> Result<bool>,
    {
        let mut staged = self.tree.clone();
        let changed = change(&mut staged)?;
        if changed {
            storage_io::save_genres(&mut self.store, &staged.to_document())?;
            self.tree = staged;
        }
        Ok(changed)
    }

    fn commit_words<T, F>(&mut self, change: F) -> Result<T>
    where
        F: FnOnce(&mut WordRepository) -> Result<T>,
    {
        let mut staged = self.words.clone();
        let out = change(&mut staged)?;
        storage_io::save_words(&mut self.store, &staged.to_records())?;
        self.words = staged;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::io;

    use crate::storage_io::{load_genres, load_words, MemoryStore, GENRES_KEY, WORDS_KEY};

    /// Memory store that refuses writes to one key while `failing` is set.
    #[derive(Default)]
    struct FailingStore {
        inner: MemoryStore,
        failing: Cell<Option<&'static str>>,
    }

    impl KeyValueStore for FailingStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<()> {
            if self.failing.get() == Some(key) {
                return Err(Error::Io(io::Error::new(io::ErrorKind::Other, "disk full")));
            }
            self.inner.set(key, value)
        }
    }

    fn failing_book_with_leaf() -> VocabularyBook<FailingStore> {
        let mut book = VocabularyBook::open(FailingStore::default()).unwrap();
        book.add_genre("英語").unwrap();
        book.add_sub_genre("英語", "動詞").unwrap();
        book.add_sub_sub_genre("英語", "動詞", "基本").unwrap();
        book
    }

    fn new_word(word: &str, meaning: &str, leaf: (&str, &str, &str)) -> NewWord {
        NewWord {
            word: word.to_string(),
            meaning: meaning.to_string(),
            genre: leaf.0.to_string(),
            sub_genre: leaf.1.to_string(),
            sub_sub_genre: leaf.2.to_string(),
            ..NewWord::default()
        }
    }

    fn book_with_leaf() -> VocabularyBook<MemoryStore> {
        let mut book = VocabularyBook::open(MemoryStore::new()).unwrap();
        book.add_genre("英語").unwrap();
        book.add_sub_genre("英語", "動詞").unwrap();
        book.add_sub_sub_genre("英語", "動詞", "基本").unwrap();
        book
    }

    #[test]
    fn test_open_rebuilds_tree_from_words() {
        let mut store = MemoryStore::new();
        store
            .set(
                WORDS_KEY,
                r#"[{"word":"run","wordAlts":[],"meaning":"走る","genre":"英語","subGenre":"動詞","subSubGenre":"基本","enabled":true}]"#,
            )
            .unwrap();
        let book = VocabularyBook::open(store).unwrap();
        assert!(book.tree().contains_path("英語", "動詞", "基本"));
        // The repaired tree is written back.
        assert!(load_genres(book.store()).unwrap().contains_key("英語"));
    }

    #[test]
    fn test_open_keeps_existing_tree() {
        let mut store = MemoryStore::new();
        store.set(GENRES_KEY, r#"{"数学":{}}"#).unwrap();
        store
            .set(
                WORDS_KEY,
                r#"[{"word":"run","meaning":"走る","genre":"英語","subGenre":"動詞","subSubGenre":"基本"}]"#,
            )
            .unwrap();
        let book = VocabularyBook::open(store).unwrap();
        assert_eq!(book.tree().genres(), vec!["数学"]);
    }

    #[test]
    fn test_mutations_are_persisted() {
        let mut book = book_with_leaf();
        let id = book.register_word(new_word("run", "走る", ("英語", "動詞", "基本"))).unwrap();
        book.toggle_enabled(id).unwrap();
        let stored = load_words(book.store()).unwrap();
        assert_eq!(stored.len(), 1);
        assert!(!stored[0].enabled);
        assert_eq!(load_genres(book.store()).unwrap(), book.tree().to_document());
    }

    #[test]
    fn test_register_requires_existing_leaf() {
        let mut book = book_with_leaf();
        let result = book.register_word(new_word("run", "走る", ("英語", "動詞", "応用")));
        assert!(matches!(result, Err(Error::Validation(_))));
        assert!(book.words().is_empty());
    }

    #[test]
    fn test_delete_genre_cascades_to_words() {
        let mut book = book_with_leaf();
        book.add_genre("数学").unwrap();
        book.add_sub_genre("数学", "代数").unwrap();
        book.add_sub_sub_genre("数学", "代数", "方程式").unwrap();
        book.register_word(new_word("run", "走る", ("英語", "動詞", "基本"))).unwrap();
        book.register_word(new_word("x", "未知数", ("数学", "代数", "方程式"))).unwrap();

        assert_eq!(book.delete_genre("英語").unwrap(), 1);
        assert!(!book.tree().contains_genre("英語"));
        assert!(book.words().all().iter().all(|w| w.genre != "英語"));
        assert_eq!(load_words(book.store()).unwrap().len(), 1);
    }

    #[test]
    fn test_delete_missing_path_changes_nothing() {
        let mut book = book_with_leaf();
        book.register_word(new_word("run", "走る", ("英語", "動詞", "基本"))).unwrap();
        assert!(matches!(book.delete_sub_genre("英語", "名詞"), Err(Error::NotFound(_))));
        assert_eq!(book.words().len(), 1);
    }

    #[test]
    fn test_list_words_blank_keyword_lists_all() {
        let mut book = book_with_leaf();
        book.register_word(new_word("run", "走る", ("英語", "動詞", "基本"))).unwrap();
        book.register_word(new_word("eat", "食べる", ("英語", "動詞", "基本"))).unwrap();
        assert_eq!(book.list_words("  ").len(), 2);
        assert_eq!(book.list_words("EA").len(), 1);
    }

    #[test]
    fn test_max_quiz_count_tracks_enabled_flag() {
        let mut book = book_with_leaf();
        let id = book.register_word(new_word("run", "走る", ("英語", "動詞", "基本"))).unwrap();
        book.register_word(new_word("eat", "食べる", ("英語", "動詞", "基本"))).unwrap();
        let filter = TaxonomyFilter::leaf("英語", "動詞", "基本");
        assert_eq!(book.max_quiz_count(&filter), 2);
        book.set_enabled(id, false).unwrap();
        assert_eq!(book.max_quiz_count(&filter), 1);
    }

    #[test]
    fn test_failed_genre_save_leaves_tree_unchanged() {
        let mut book = failing_book_with_leaf();
        book.store().failing.set(Some(GENRES_KEY));
        assert!(matches!(book.add_genre("数学"), Err(Error::Io(_))));
        assert!(matches!(book.add_sub_genre("英語", "名詞"), Err(Error::Io(_))));
        assert_eq!(book.tree().genres(), vec!["英語"]);
        assert_eq!(book.tree().sub_genres("英語"), vec!["動詞"]);

        book.store().failing.set(None);
        assert!(book.add_genre("数学").unwrap());
        assert_eq!(load_genres(book.store()).unwrap(), book.tree().to_document());
    }

    #[test]
    fn test_failed_word_save_leaves_words_unchanged() {
        let mut book = failing_book_with_leaf();
        let id = book.register_word(new_word("eat", "食べる", ("英語", "動詞", "基本"))).unwrap();

        book.store().failing.set(Some(WORDS_KEY));
        let result = book.register_word(new_word("run", "走る", ("英語", "動詞", "基本")));
        assert!(matches!(result, Err(Error::Io(_))));
        assert_eq!(book.words().len(), 1);
        assert!(matches!(book.toggle_enabled(id), Err(Error::Io(_))));
        assert!(book.words().get(id).unwrap().enabled);
        assert!(matches!(book.update_word(id, "dine", "", "食事する"), Err(Error::Io(_))));
        assert_eq!(book.words().get(id).unwrap().word, "eat");
        assert!(matches!(book.delete_word(id), Err(Error::Io(_))));
        assert_eq!(book.words().len(), 1);

        // Retrying once the store recovers is not reported as a duplicate.
        book.store().failing.set(None);
        book.register_word(new_word("run", "走る", ("英語", "動詞", "基本"))).unwrap();
        assert_eq!(book.words().len(), 2);
        assert_eq!(load_words(book.store()).unwrap().len(), 2);
    }

    #[test]
    fn test_failed_cascade_keeps_tree_and_words_in_step() {
        let mut book = failing_book_with_leaf();
        book.register_word(new_word("run", "走る", ("英語", "動詞", "基本"))).unwrap();

        book.store().failing.set(Some(GENRES_KEY));
        assert!(matches!(book.delete_genre("英語"), Err(Error::Io(_))));
        assert!(book.tree().contains_path("英語", "動詞", "基本"));
        assert_eq!(book.words().len(), 1);
        // The word document written before the failure is rolled back.
        assert_eq!(load_words(book.store()).unwrap().len(), 1);
    }

    #[test]
    fn test_open_does_not_write_tree_for_genre_less_words() {
        let mut store = MemoryStore::new();
        store
            .set(WORDS_KEY, r#"[{"word":"run","meaning":"走る","genre":""}]"#)
            .unwrap();
        let book = VocabularyBook::open(store).unwrap();
        assert!(book.tree().is_empty());
        assert!(book.store().get(GENRES_KEY).unwrap().is_none());
    }
}
