pub mod genre_tree;

pub use genre_tree::{GenreTree, TaxonomyScope};
