use crate::domain::{
    entities::bookmark::{Bookmark, BookmarkOrder, NewBookmark},
    repositories::bookmark::{BookmarkRepository, BookmarkRepositoryError},
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BookmarkError {
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("failed to write bookmark: {0}")]
    WriteFailed(String),
    #[error("failed to read bookmark: {0}")]
    ReadFailed(String),
}

impl BookmarkError {
    fn write(e: BookmarkRepositoryError) -> Self {
        if e.is_unavailable() {
            Self::StorageUnavailable(e.to_string())
        } else {
            Self::WriteFailed(e.to_string())
        }
    }

    fn read(e: BookmarkRepositoryError) -> Self {
        if e.is_unavailable() {
            Self::StorageUnavailable(e.to_string())
        } else {
            Self::ReadFailed(e.to_string())
        }
    }
}

impl From<BookmarkRepositoryError> for BookmarkError {
    fn from(e: BookmarkRepositoryError) -> Self {
        Self::write(e)
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Bookmark store. Writes report failures, the plain reads (`is_bookmarked`,
/// `get_bookmarks`) log them and answer `false` / empty instead.
#[derive(Clone)]
pub struct BookmarkService<R>
where
    R: BookmarkRepository,
{
    repo: R,
}

impl<R> BookmarkService<R>
where
    R: BookmarkRepository,
{
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Insert or replace the bookmark for `bookmark.manga_id`, stamping
    /// `added_at` with the current time when the caller left it out.
    pub async fn add(&self, bookmark: NewBookmark) -> Result<Bookmark, BookmarkError> {
        let bookmark = bookmark.into_bookmark(now_millis());

        self.repo.insert_bookmark(&bookmark).await.map_err(|e| {
            error!("error adding bookmark {}: {e}", bookmark.manga_id);
            BookmarkError::write(e)
        })?;

        debug!("bookmarked {} at {}", bookmark.manga_id, bookmark.added_at);

        Ok(bookmark)
    }

    pub async fn remove(&self, manga_id: &str) -> Result<(), BookmarkError> {
        self.repo.delete_bookmark(manga_id).await.map_err(|e| {
            error!("error removing bookmark {manga_id}: {e}");
            BookmarkError::write(e)
        })?;

        Ok(())
    }

    pub async fn is_bookmarked(&self, manga_id: &str) -> bool {
        match self.repo.is_bookmarked(manga_id).await {
            Ok(bookmarked) => bookmarked,
            Err(e) => {
                error!("error checking bookmark {manga_id}: {e}");
                false
            }
        }
    }

    /// Every bookmark, most recently added first
    pub async fn get_bookmarks(&self) -> Vec<Bookmark> {
        self.get_bookmarks_by(BookmarkOrder::Recent).await
    }

    pub async fn get_bookmarks_by(&self, order: BookmarkOrder) -> Vec<Bookmark> {
        match self.repo.get_bookmarks(order).await {
            Ok(bookmarks) => bookmarks,
            Err(e) => {
                error!("error getting bookmarks: {e}");
                vec![]
            }
        }
    }

    pub async fn get_bookmark(&self, manga_id: &str) -> Result<Option<Bookmark>, BookmarkError> {
        self.repo
            .get_bookmark(manga_id)
            .await
            .map_err(BookmarkError::read)
    }

    pub async fn count(&self) -> Result<i64, BookmarkError> {
        self.repo.count_bookmarks().await.map_err(BookmarkError::read)
    }

    /// Remove the bookmark if it exists, add it otherwise. Returns whether
    /// the manga is bookmarked afterwards.
    pub async fn toggle(&self, bookmark: NewBookmark) -> Result<bool, BookmarkError> {
        let bookmark = bookmark.into_bookmark(now_millis());

        let bookmarked = self.repo.toggle_bookmark(&bookmark).await.map_err(|e| {
            error!("error toggling bookmark {}: {e}", bookmark.manga_id);
            BookmarkError::write(e)
        })?;

        debug!("toggled {}, bookmarked={bookmarked}", bookmark.manga_id);

        Ok(bookmarked)
    }
}
