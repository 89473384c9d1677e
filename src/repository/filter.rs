/// One level of a taxonomy filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    All,
    /// Exact match. The empty string is a legal name ("no sub-genre").
    Only(String),
}

impl Selection {
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(name) => name == value,
        }
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            Selection::All => None,
            Selection::Only(name) => Some(name.as_str()),
        }
    }
}

/// Genre / sub-genre / sub-sub-genre constraints, each independently optional.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaxonomyFilter {
    pub genre: Selection,
    pub sub_genre: Selection,
    pub sub_sub_genre: Selection,
}

impl TaxonomyFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn genre(genre: &str) -> Self {
        TaxonomyFilter {
            genre: Selection::Only(genre.to_string()),
            ..Self::default()
        }
    }

    pub fn leaf(genre: &str, sub_genre: &str, sub_sub_genre: &str) -> Self {
        TaxonomyFilter {
            genre: Selection::Only(genre.to_string()),
            sub_genre: Selection::Only(sub_genre.to_string()),
            sub_sub_genre: Selection::Only(sub_sub_genre.to_string()),
        }
    }

    pub fn matches(&self, genre: &str, sub_genre: &str, sub_sub_genre: &str) -> bool {
        self.genre.matches(genre)
            && self.sub_genre.matches(sub_genre)
            && self.sub_sub_genre.matches(sub_sub_genre)
    }
}
