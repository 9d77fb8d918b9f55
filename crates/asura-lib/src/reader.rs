use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    models::{DetailedChapter, PageImage},
};

/// Everything a reader needs to display one chapter
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterView {
    pub manga_id: String,
    pub manga_title: String,
    pub chapter_id: i64,
    pub title: String,
    pub images: Vec<PageImage>,
    pub previous: Option<DetailedChapter>,
    pub next: Option<DetailedChapter>,
}

/// Neighbours of a chapter. `previous` is the older chapter, `next` the newer one.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Navigation {
    pub current: Option<DetailedChapter>,
    pub previous: Option<DetailedChapter>,
    pub next: Option<DetailedChapter>,
}

pub fn parse_chapter_id(chapter_id: &str) -> Result<i64, Error> {
    chapter_id
        .trim()
        .parse::<i64>()
        .map_err(|_| Error::InvalidChapterId(chapter_id.to_string()))
}

/// Sort chapters newest first
pub fn sort_chapters(chapters: &[DetailedChapter]) -> Vec<DetailedChapter> {
    let mut sorted = chapters.to_vec();
    sorted.sort_by(|a, b| b.id.cmp(&a.id));
    sorted
}

pub fn navigate(chapters: &[DetailedChapter], current_id: i64) -> Navigation {
    let sorted = sort_chapters(chapters);

    let Some(index) = sorted.iter().position(|ch| ch.id == current_id) else {
        return Navigation::default();
    };

    Navigation {
        current: sorted.get(index).cloned(),
        previous: sorted.get(index + 1).cloned(),
        next: index.checked_sub(1).and_then(|i| sorted.get(i)).cloned(),
    }
}

/// Case-insensitive match on chapter title or id. A blank query matches everything.
pub fn search_chapters<'a>(
    chapters: &'a [DetailedChapter],
    query: &str,
) -> Vec<&'a DetailedChapter> {
    if query.trim().is_empty() {
        return chapters.iter().collect();
    }

    let query = query.to_lowercase();
    chapters
        .iter()
        .filter(|ch| {
            let title = ch.title.as_deref().unwrap_or_default().to_lowercase();
            title.contains(&query) || ch.id.to_string().contains(&query)
        })
        .collect()
}

pub fn chapter_title(chapter: &DetailedChapter) -> String {
    match chapter.title.as_deref() {
        Some(title) if !title.trim().is_empty() => title.to_string(),
        _ => format!("Chapter {}", chapter.id),
    }
}
