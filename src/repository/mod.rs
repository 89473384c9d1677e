pub mod filter;
pub mod word_repository;

pub use filter::{Selection, TaxonomyFilter};
pub use word_repository::{parse_alternates, NewWord, Word, WordId, WordRepository};
