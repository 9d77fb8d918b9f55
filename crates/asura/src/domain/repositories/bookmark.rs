use async_trait::async_trait;

use thiserror::Error;

use crate::domain::entities::bookmark::{Bookmark, BookmarkOrder};

#[derive(Debug, Error)]
pub enum BookmarkRepositoryError {
    #[error("cannot open database: {0}")]
    OpenError(sqlx::Error),
    #[error("migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),
    #[error("database error: {0}")]
    DbError(#[from] sqlx::Error),
}

impl BookmarkRepositoryError {
    /// True when the database itself can't be reached, as opposed to a single statement failing
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            Self::OpenError(_)
                | Self::MigrateError(_)
                | Self::DbError(
                    sqlx::Error::PoolClosed | sqlx::Error::PoolTimedOut | sqlx::Error::Io(_)
                )
        )
    }
}

#[async_trait]
pub trait BookmarkRepository: Send + Sync {
    /// Insert or fully replace the bookmark keyed by `bookmark.manga_id`
    async fn insert_bookmark(&self, bookmark: &Bookmark) -> Result<(), BookmarkRepositoryError>;

    async fn delete_bookmark(&self, manga_id: &str) -> Result<(), BookmarkRepositoryError>;

    async fn is_bookmarked(&self, manga_id: &str) -> Result<bool, BookmarkRepositoryError>;

    async fn get_bookmark(
        &self,
        manga_id: &str,
    ) -> Result<Option<Bookmark>, BookmarkRepositoryError>;

    async fn get_bookmarks(
        &self,
        order: BookmarkOrder,
    ) -> Result<Vec<Bookmark>, BookmarkRepositoryError>;

    async fn count_bookmarks(&self) -> Result<i64, BookmarkRepositoryError>;

    /// Delete the bookmark if present, insert it otherwise, in one transaction.
    /// Returns whether the manga is bookmarked afterwards.
    async fn toggle_bookmark(&self, bookmark: &Bookmark) -> Result<bool, BookmarkRepositoryError>;
}
