//*** START FILE: src/lib.rs ***//

pub mod config;
pub mod error;
pub mod types {
    pub mod word_data;
}
pub mod taxonomy;
pub mod repository;
pub mod quiz;
pub mod storage_io;
pub mod vocabulary_book;

pub use error::{Error, Result};
pub use quiz::{QuizEngine, QuizMode, QuizSettings};
pub use repository::{NewWord, Selection, TaxonomyFilter, Word, WordId};
pub use storage_io::{FileStore, KeyValueStore, MemoryStore};
pub use vocabulary_book::VocabularyBook;

//*** END FILE: src/lib.rs ***//
