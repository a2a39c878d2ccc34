//! Example sentence record as returned by the upstream lookup API

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::storage::{StorageEntity, StorageKey};

/// Upstream-assigned example id, stable across re-fetches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExampleId(pub u64);

impl StorageKey for ExampleId {
    fn as_key(&self) -> Cow<'_, str> {
        Cow::Owned(self.0.to_string())
    }
}

/// A single example sentence with its media and provenance metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExampleSentence {
    pub id: ExampleId,
    pub sentence: String,
    /// Anki-style furigana rendering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentence_with_furigana: Option<String>,
    #[serde(default)]
    pub sentence_id: String,
    #[serde(default)]
    pub translation: String,

    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub sound_url: String,
    #[serde(default)]
    pub sound_begin: String,
    #[serde(default)]
    pub sound_end: String,
    #[serde(default)]
    pub timestamp: String,

    /// One of `anime`, `drama`, `games`, `literature` at the time of writing
    #[serde(default)]
    pub category: String,
    /// Series title
    #[serde(default)]
    pub deck_name: String,
    #[serde(default)]
    pub deck_name_japanese: String,
    #[serde(default)]
    pub episode: String,
    #[serde(default)]
    pub channel: String,
    #[serde(default)]
    pub author_japanese: String,
    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub word_list: Vec<String>,
    #[serde(default)]
    pub word_index: Vec<i64>,
    #[serde(default)]
    pub translation_word_list: Vec<String>,
    #[serde(default)]
    pub translation_word_index: Vec<i64>,

    /// Time of the write that produced this version; absent on fresh upstream records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,

    /// Upstream fields this type does not model, kept so a stored record
    /// fully replaces what the upstream sent
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ExampleSentence {
    /// Field holding the sentence text, used for fuzzy store reads
    pub const TEXT_FIELD: &'static str = "sentence";

    pub fn new(id: u64, sentence: impl Into<String>) -> Self {
        Self {
            id: ExampleId(id),
            sentence: sentence.into(),
            sentence_with_furigana: None,
            sentence_id: String::new(),
            translation: String::new(),
            image_url: String::new(),
            sound_url: String::new(),
            sound_begin: String::new(),
            sound_end: String::new(),
            timestamp: String::new(),
            category: String::new(),
            deck_name: String::new(),
            deck_name_japanese: String::new(),
            episode: String::new(),
            channel: String::new(),
            author_japanese: String::new(),
            tags: Vec::new(),
            word_list: Vec::new(),
            word_index: Vec::new(),
            translation_word_list: Vec::new(),
            translation_word_index: Vec::new(),
            updated: None,
            extra: Map::new(),
        }
    }

    pub fn with_translation(mut self, translation: impl Into<String>) -> Self {
        self.translation = translation.into();
        self
    }

    /// Returns the record as it should be written at `now`
    pub fn stamped(mut self, now: DateTime<Utc>) -> Self {
        self.updated = Some(now);
        self
    }
}

impl StorageEntity for ExampleSentence {
    type Key = ExampleId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn upstream_record() -> Value {
        json!({
            "id": 4021,
            "sentence": "ご飯を食べる",
            "sentence_with_furigana": "ご 飯[はん]を 食[た]べる",
            "sentence_id": "0_h_1_1",
            "translation": "I eat rice",
            "image_url": "https://example.invalid/img.jpg",
            "sound_url": "https://example.invalid/snd.mp3",
            "sound_begin": "0:01:02.03",
            "sound_end": "0:01:04.00",
            "timestamp": "0:01:02.03",
            "category": "anime",
            "deck_name": "Example Show",
            "deck_name_japanese": "例の番組",
            "episode": "3",
            "channel": "Example Channel",
            "author_japanese": "",
            "tags": ["Comedy", "School Life"],
            "word_list": ["ご飯", "を", "食べる"],
            "word_index": [0, 1, 2],
            "translation_word_list": ["I", "eat", "rice"],
            "translation_word_index": [0, 1, 2],
            "jlpt": 5
        })
    }

    #[test]
    fn test_deserialize_upstream_record() {
        let record: ExampleSentence = serde_json::from_value(upstream_record()).unwrap();

        assert_eq!(record.id, ExampleId(4021));
        assert_eq!(record.key().as_key(), "4021");
        assert_eq!(record.tags, vec!["Comedy", "School Life"]);
        assert_eq!(record.word_index, vec![0, 1, 2]);
        assert!(record.updated.is_none());
        assert_eq!(record.extra.get("jlpt"), Some(&json!(5)));
    }

    #[test]
    fn test_unknown_fields_survive_serialization() {
        let record: ExampleSentence = serde_json::from_value(upstream_record()).unwrap();
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["jlpt"], json!(5));
        assert!(value.get("updated").is_none());
    }

    #[test]
    fn test_minimal_record_defaults() {
        let record: ExampleSentence =
            serde_json::from_value(json!({ "id": 1, "sentence": "猫" })).unwrap();

        assert!(record.sentence_with_furigana.is_none());
        assert!(record.word_list.is_empty());
        assert_eq!(record, ExampleSentence::new(1, "猫"));
    }

    #[test]
    fn test_stamped_sets_updated() {
        let now = Utc::now();
        let record = ExampleSentence::new(1, "猫").stamped(now);

        assert_eq!(record.updated, Some(now));
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("updated").is_some());
    }
}
