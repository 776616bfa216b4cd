use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque item identifier.
///
/// Deck files spell ids as strings or integers; both normalise to a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Int(i64),
        }

        match RawId::deserialize(deserializer)? {
            RawId::Text(s) => Ok(ItemId(s)),
            RawId::Int(n) => Ok(ItemId(n.to_string())),
        }
    }
}

/// Kind of media shown on a card's front face
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Image,
    Video,
}

impl MediaKind {
    /// Whether the media reports a native "started playing" signal
    pub fn has_start_signal(self) -> bool {
        matches!(self, MediaKind::Video)
    }
}

/// Source references for a card's media
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaSources {
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_webm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
}

/// Immutable deck entry, created once at load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default)]
    pub media_kind: MediaKind,
    #[serde(flatten)]
    pub sources: MediaSources,
    /// Overlay text disclosed after the card has been revealed for a while
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Item {
    pub fn new(id: impl Into<String>, title: impl Into<String>, media_kind: MediaKind) -> Self {
        Self {
            id: ItemId::new(id),
            title: title.into(),
            media_kind,
            sources: MediaSources::default(),
            prompt: None,
            link: None,
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Title to show, falling back to the id for untitled items
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            self.id.as_str()
        } else {
            &self.title
        }
    }
}
