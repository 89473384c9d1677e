//*** START FILE: src/types/word_data.rs ***//
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sub-genre name -> sub-sub-genre names (insertion order kept)
pub type SubGenreDocument = BTreeMap<String, Vec<String>>;

/// On-disk shape of the genre tree: `{ genre: { subGenre: [subSubGenre, ...] } }`
pub type GenreDocument = BTreeMap<String, SubGenreDocument>;

fn default_enabled() -> bool {
    true
}

/// One entry of the persisted `words` document.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WordRecord {
    pub word: String,
    #[serde(default)]
    pub word_alts: Vec<String>,
    pub meaning: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub sub_genre: String,
    #[serde(default)]
    pub sub_sub_genre: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_uses_camel_case_keys() {
        let record = WordRecord {
            word: "run".to_string(),
            word_alts: vec!["ran".to_string()],
            meaning: "走る".to_string(),
            genre: "英語".to_string(),
            sub_genre: "動詞".to_string(),
            sub_sub_genre: "基本".to_string(),
            enabled: true,
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["wordAlts"][0], "ran");
        assert_eq!(value["subGenre"], "動詞");
        assert_eq!(value["subSubGenre"], "基本");
        assert_eq!(value["enabled"], true);
    }

    #[test]
    fn test_missing_optional_fields_take_defaults() {
        let record: WordRecord =
            serde_json::from_str(r#"{"word":"cat","meaning":"猫","genre":"英語"}"#).unwrap();
        assert!(record.word_alts.is_empty());
        assert!(record.enabled);
        assert_eq!(record.sub_genre, "");
    }
}
//*** END FILE: src/types/word_data.rs ***//
