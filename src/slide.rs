use std::path::PathBuf;

use serde::{Deserialize, Deserializer};

/// One full-viewport frame of the hero. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Slide {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, alias = "imageRef", alias = "image")]
    pub image_ref: Option<PathBuf>,
    #[serde(alias = "primaryText", alias = "title")]
    pub primary_text: String,
    #[serde(default, alias = "secondaryText", alias = "subtitle")]
    pub secondary_text: String,
    #[serde(default)]
    pub category: Option<String>,
}

impl Slide {
    pub fn new(id: impl Into<String>, primary_text: impl Into<String>, secondary_text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            image_ref: None,
            primary_text: primary_text.into(),
            secondary_text: secondary_text.into(),
            category: None,
        }
    }

    pub fn with_image(mut self, image_ref: impl Into<PathBuf>) -> Self {
        self.image_ref = Some(image_ref.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Text lines in reveal order.
    pub fn lines(&self) -> [&str; crate::constants::TEXT_LINES] {
        [&self.primary_text, &self.secondary_text]
    }
}

// Ids arrive as strings or numbers depending on the source.
fn deserialize_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_collaborator_field_names() {
        let slide: Slide = serde_json::from_str(
            r#"{"id": 7, "imageRef": "a.jpg", "title": "Dunes", "subtitle": "Namib", "category": "travel"}"#,
        )
        .expect("parse");
        assert_eq!(slide.id, "7");
        assert_eq!(slide.image_ref, Some(PathBuf::from("a.jpg")));
        assert_eq!(slide.primary_text, "Dunes");
        assert_eq!(slide.secondary_text, "Namib");
        assert_eq!(slide.category.as_deref(), Some("travel"));
    }

    #[test]
    fn optional_fields_default() {
        let slide: Slide = serde_json::from_str(r#"{"id": "x", "title": "Only title"}"#).expect("parse");
        assert_eq!(slide.image_ref, None);
        assert_eq!(slide.secondary_text, "");
        assert_eq!(slide.lines(), ["Only title", ""]);
    }
}
