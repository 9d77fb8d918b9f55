use serde::{Deserialize, Serialize};

/// A manga saved by the user. Title and cover are snapshots taken when the
/// bookmark was made and are not refreshed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub manga_id: String,
    pub title: String,
    pub image: String,
    /// milliseconds since unix epoch
    pub added_at: i64,
}

/// Bookmark as submitted by a caller, `added_at` is filled in on write when missing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBookmark {
    pub manga_id: String,
    pub title: String,
    pub image: String,
    #[serde(default)]
    pub added_at: Option<i64>,
}

impl NewBookmark {
    pub fn new(
        manga_id: impl Into<String>,
        title: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            manga_id: manga_id.into(),
            title: title.into(),
            image: image.into(),
            added_at: None,
        }
    }

    pub fn with_added_at(self, added_at: i64) -> Self {
        Self {
            added_at: Some(added_at),
            ..self
        }
    }

    /// A zero timestamp counts as missing
    pub fn into_bookmark(self, now: i64) -> Bookmark {
        Bookmark {
            manga_id: self.manga_id,
            title: self.title,
            image: self.image,
            added_at: self.added_at.filter(|t| *t != 0).unwrap_or(now),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BookmarkOrder {
    /// most recently added first
    #[default]
    Recent,
    Title,
}
