use async_trait::async_trait;
use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use crate::{
    domain::{
        entities::bookmark::{Bookmark, BookmarkOrder},
        repositories::bookmark::{BookmarkRepository, BookmarkRepositoryError},
    },
    infrastructure::database::Pool,
};

const UPSERT_BOOKMARK: &str = r#"INSERT INTO bookmark (manga_id, title, image, added_at)
    VALUES (?, ?, ?, ?)
    ON CONFLICT(manga_id) DO UPDATE SET
        title = excluded.title,
        image = excluded.image,
        added_at = excluded.added_at"#;

#[derive(Clone)]
pub struct BookmarkRepositoryImpl {
    pool: Pool,
}

impl BookmarkRepositoryImpl {
    pub fn new<P: Into<Pool>>(pool: P) -> Self {
        Self { pool: pool.into() }
    }
}

fn bookmark_from_row(row: SqliteRow) -> Bookmark {
    Bookmark {
        manga_id: row.get(0),
        title: row.get(1),
        image: row.get(2),
        added_at: row.get(3),
    }
}

#[async_trait]
impl BookmarkRepository for BookmarkRepositoryImpl {
    async fn insert_bookmark(&self, bookmark: &Bookmark) -> Result<(), BookmarkRepositoryError> {
        sqlx::query(UPSERT_BOOKMARK)
            .bind(&bookmark.manga_id)
            .bind(&bookmark.title)
            .bind(&bookmark.image)
            .bind(bookmark.added_at)
            .execute(&self.pool as &SqlitePool)
            .await?;

        Ok(())
    }

    async fn delete_bookmark(&self, manga_id: &str) -> Result<(), BookmarkRepositoryError> {
        sqlx::query("DELETE FROM bookmark WHERE manga_id = ?")
            .bind(manga_id)
            .execute(&self.pool as &SqlitePool)
            .await?;

        Ok(())
    }

    async fn is_bookmarked(&self, manga_id: &str) -> Result<bool, BookmarkRepositoryError> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM bookmark WHERE manga_id = ?)")
            .bind(manga_id)
            .fetch_one(&self.pool as &SqlitePool)
            .await?;

        Ok(row.get::<i64, _>(0) != 0)
    }

    async fn get_bookmark(
        &self,
        manga_id: &str,
    ) -> Result<Option<Bookmark>, BookmarkRepositoryError> {
        let bookmark = sqlx::query(
            r#"SELECT manga_id, title, image, added_at
            FROM bookmark
            WHERE manga_id = ?"#,
        )
        .bind(manga_id)
        .fetch_optional(&self.pool as &SqlitePool)
        .await?
        .map(bookmark_from_row);

        Ok(bookmark)
    }

    async fn get_bookmarks(
        &self,
        order: BookmarkOrder,
    ) -> Result<Vec<Bookmark>, BookmarkRepositoryError> {
        // ties on added_at fall back to manga_id, newest key first
        let query = match order {
            BookmarkOrder::Recent => {
                r#"SELECT manga_id, title, image, added_at
                FROM bookmark
                ORDER BY added_at DESC, manga_id DESC"#
            }
            BookmarkOrder::Title => {
                r#"SELECT manga_id, title, image, added_at
                FROM bookmark
                ORDER BY title, manga_id"#
            }
        };

        let bookmarks = sqlx::query(query)
            .fetch_all(&self.pool as &SqlitePool)
            .await?
            .into_iter()
            .map(bookmark_from_row)
            .collect();

        Ok(bookmarks)
    }

    async fn count_bookmarks(&self) -> Result<i64, BookmarkRepositoryError> {
        let row = sqlx::query("SELECT COUNT(1) FROM bookmark")
            .fetch_one(&self.pool as &SqlitePool)
            .await?;

        Ok(row.get(0))
    }

    async fn toggle_bookmark(&self, bookmark: &Bookmark) -> Result<bool, BookmarkRepositoryError> {
        let mut tx = self.pool.begin().await?;

        // write first, a read would leave the transaction unable to take the
        // write lock once another toggle commits
        let deleted = sqlx::query("DELETE FROM bookmark WHERE manga_id = ?")
            .bind(&bookmark.manga_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            sqlx::query(UPSERT_BOOKMARK)
                .bind(&bookmark.manga_id)
                .bind(&bookmark.title)
                .bind(&bookmark.image)
                .bind(bookmark.added_at)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(deleted == 0)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::infrastructure::database::establish_connection;

    async fn repo() -> (tempfile::TempDir, BookmarkRepositoryImpl) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("asura.db");
        let pool = establish_connection(path.to_str().unwrap(), true)
            .await
            .unwrap();

        (dir, BookmarkRepositoryImpl::new(pool))
    }

    fn bookmark(manga_id: &str, title: &str, added_at: i64) -> Bookmark {
        Bookmark {
            manga_id: manga_id.to_string(),
            title: title.to_string(),
            image: format!("http://x/{manga_id}.jpg"),
            added_at,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_bookmark() {
        let (_dir, repo) = repo().await;

        repo.insert_bookmark(&bookmark("m1", "Solo Leveling", 100))
            .await
            .unwrap();

        assert!(repo.is_bookmarked("m1").await.unwrap());
        assert!(!repo.is_bookmarked("m2").await.unwrap());
        assert_eq!(
            repo.get_bookmark("m1").await.unwrap(),
            Some(bookmark("m1", "Solo Leveling", 100))
        );
        assert_eq!(repo.get_bookmark("m2").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_insert_replaces_existing() {
        let (_dir, repo) = repo().await;

        repo.insert_bookmark(&bookmark("m1", "Old", 100)).await.unwrap();
        repo.insert_bookmark(&bookmark("m1", "New", 200)).await.unwrap();

        assert_eq!(repo.count_bookmarks().await.unwrap(), 1);
        assert_eq!(
            repo.get_bookmark("m1").await.unwrap(),
            Some(bookmark("m1", "New", 200))
        );
    }

    #[tokio::test]
    async fn test_delete_missing_is_noop() {
        let (_dir, repo) = repo().await;

        assert!(repo.delete_bookmark("nothing").await.is_ok());
    }

    #[tokio::test]
    async fn test_get_bookmarks_order() {
        let (_dir, repo) = repo().await;

        repo.insert_bookmark(&bookmark("A", "Omniscient Reader", 100))
            .await
            .unwrap();
        repo.insert_bookmark(&bookmark("B", "Bad Born Blood", 300))
            .await
            .unwrap();
        repo.insert_bookmark(&bookmark("C", "Nano Machine", 200))
            .await
            .unwrap();
        repo.insert_bookmark(&bookmark("D", "Absolute Sword Sense", 200))
            .await
            .unwrap();

        let recent: Vec<String> = repo
            .get_bookmarks(BookmarkOrder::Recent)
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.manga_id)
            .collect();
        assert_eq!(recent, vec!["B", "D", "C", "A"]);

        let by_title: Vec<String> = repo
            .get_bookmarks(BookmarkOrder::Title)
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.manga_id)
            .collect();
        assert_eq!(by_title, vec!["D", "B", "C", "A"]);
    }

    #[tokio::test]
    async fn test_toggle_bookmark() {
        let (_dir, repo) = repo().await;
        let b = bookmark("m1", "Solo Leveling", 100);

        assert!(repo.toggle_bookmark(&b).await.unwrap());
        assert!(repo.is_bookmarked("m1").await.unwrap());

        assert!(!repo.toggle_bookmark(&b).await.unwrap());
        assert!(!repo.is_bookmarked("m1").await.unwrap());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_toggles_serialize() {
        let (_dir, repo) = repo().await;

        for round in 0..20 {
            let b = bookmark(&format!("m{round}"), "Solo Leveling", 100);

            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let repo = repo.clone();
                    let b = b.clone();
                    tokio::spawn(async move { repo.toggle_bookmark(&b).await })
                })
                .collect();

            let mut added = 0;
            for handle in handles {
                if handle.await.unwrap().unwrap() {
                    added += 1;
                }
            }

            assert_eq!(added, 2);
            assert!(!repo.is_bookmarked(&b.manga_id).await.unwrap());
        }
    }

    #[tokio::test]
    async fn test_closed_pool_is_unavailable() {
        let (_dir, repo) = repo().await;
        repo.pool.close().await;

        let err = repo
            .insert_bookmark(&bookmark("m1", "Solo Leveling", 100))
            .await
            .unwrap_err();

        assert!(err.is_unavailable());
    }
}
