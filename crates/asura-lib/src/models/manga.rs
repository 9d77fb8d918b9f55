use serde::{Deserialize, Serialize};

use super::{Chapter, DetailedChapter};

/// A manga entry as returned by the `latest` listing, with its most recent chapters
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Manga {
    pub id: String,
    pub title: String,
    pub image: String,
    pub status: String,
    pub latest_chapter: String,
    pub chapters: Vec<Chapter>,
    pub rating: String,
}

/// A manga entry as returned by the `series` and `popular` listings
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeriesManga {
    pub id: String,
    pub title: String,
    pub image: String,
    pub status: String,
    pub latest_chapter: String,
    pub rating: String,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecommendedManga {
    pub id: String,
    pub title: String,
    pub image: String,
    pub latest_chapter: String,
    pub status: String,
    pub rating: String,
}

/// Full manga details, including every chapter and recommendations
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DetailedManga {
    pub id: String,
    pub title: String,
    pub image: String,
    pub rating: String,
    pub status: String,
    pub description: String,
    pub authors: Vec<String>,
    pub artist: String,
    pub updated_on: String,
    pub genres: Vec<String>,
    pub recommendations: Vec<RecommendedManga>,
    pub chapters: Vec<DetailedChapter>,
}
