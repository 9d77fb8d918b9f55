use axum::{
    Json,
    extract::{Extension, Path, Query},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use super::BookmarkSvc;
use crate::domain::{
    entities::bookmark::{Bookmark, BookmarkOrder, NewBookmark},
    services::bookmark::BookmarkError,
};

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    order: BookmarkOrder,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkBody {
    title: String,
    image: String,
    #[serde(default)]
    added_at: Option<i64>,
}

impl BookmarkBody {
    fn into_new_bookmark(self, manga_id: String) -> NewBookmark {
        NewBookmark {
            manga_id,
            title: self.title,
            image: self.image,
            added_at: self.added_at,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct BookmarkStatus {
    pub bookmarked: bool,
}

fn status_code(e: &BookmarkError) -> StatusCode {
    match e {
        BookmarkError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        BookmarkError::WriteFailed(_) | BookmarkError::ReadFailed(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

pub async fn list_bookmarks(
    Query(params): Query<ListParams>,
    Extension(svc): Extension<BookmarkSvc>,
) -> Json<Vec<Bookmark>> {
    Json(svc.get_bookmarks_by(params.order).await)
}

pub async fn check_bookmark(
    Path(manga_id): Path<String>,
    Extension(svc): Extension<BookmarkSvc>,
) -> Json<BookmarkStatus> {
    Json(BookmarkStatus {
        bookmarked: svc.is_bookmarked(&manga_id).await,
    })
}

pub async fn put_bookmark(
    Path(manga_id): Path<String>,
    Extension(svc): Extension<BookmarkSvc>,
    Json(body): Json<BookmarkBody>,
) -> Result<StatusCode, StatusCode> {
    svc.add(body.into_new_bookmark(manga_id))
        .await
        .map_err(|e| status_code(&e))?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_bookmark(
    Path(manga_id): Path<String>,
    Extension(svc): Extension<BookmarkSvc>,
) -> Result<StatusCode, StatusCode> {
    svc.remove(&manga_id).await.map_err(|e| status_code(&e))?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn toggle_bookmark(
    Path(manga_id): Path<String>,
    Extension(svc): Extension<BookmarkSvc>,
    Json(body): Json<BookmarkBody>,
) -> Result<Json<BookmarkStatus>, StatusCode> {
    let bookmarked = svc
        .toggle(body.into_new_bookmark(manga_id))
        .await
        .map_err(|e| status_code(&e))?;

    Ok(Json(BookmarkStatus { bookmarked }))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        domain::services::bookmark::BookmarkService,
        infrastructure::{
            database::{Pool, establish_connection},
            domain::repositories::bookmark::BookmarkRepositoryImpl,
        },
    };

    async fn service() -> (tempfile::TempDir, BookmarkSvc, Pool) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("asura.db");
        let pool = establish_connection(path.to_str().unwrap(), true)
            .await
            .unwrap();

        (
            dir,
            BookmarkService::new(BookmarkRepositoryImpl::new(pool.clone())),
            pool,
        )
    }

    fn body(title: &str) -> BookmarkBody {
        BookmarkBody {
            title: title.to_string(),
            image: "http://x/1.jpg".to_string(),
            added_at: None,
        }
    }

    #[tokio::test]
    async fn test_put_check_delete() {
        let (_dir, svc, _pool) = service().await;

        let status = put_bookmark(
            Path("m1".to_string()),
            Extension(svc.clone()),
            Json(body("Solo Leveling")),
        )
        .await;
        assert_eq!(status, Ok(StatusCode::NO_CONTENT));

        let Json(check) = check_bookmark(Path("m1".to_string()), Extension(svc.clone())).await;
        assert_eq!(check, BookmarkStatus { bookmarked: true });

        let Json(list) =
            list_bookmarks(Query(ListParams::default()), Extension(svc.clone())).await;
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].title, "Solo Leveling");

        let status = delete_bookmark(Path("m1".to_string()), Extension(svc.clone())).await;
        assert_eq!(status, Ok(StatusCode::NO_CONTENT));

        let Json(check) = check_bookmark(Path("m1".to_string()), Extension(svc)).await;
        assert_eq!(check, BookmarkStatus { bookmarked: false });
    }

    #[tokio::test]
    async fn test_toggle() {
        let (_dir, svc, _pool) = service().await;

        let Json(status) = toggle_bookmark(
            Path("m1".to_string()),
            Extension(svc.clone()),
            Json(body("Solo Leveling")),
        )
        .await
        .unwrap();
        assert!(status.bookmarked);

        let Json(status) = toggle_bookmark(
            Path("m1".to_string()),
            Extension(svc),
            Json(body("Solo Leveling")),
        )
        .await
        .unwrap();
        assert!(!status.bookmarked);
    }

    #[tokio::test]
    async fn test_closed_storage_is_service_unavailable() {
        let (_dir, svc, pool) = service().await;
        pool.close().await;

        let status = put_bookmark(
            Path("m1".to_string()),
            Extension(svc),
            Json(body("Solo Leveling")),
        )
        .await;

        assert_eq!(status, Err(StatusCode::SERVICE_UNAVAILABLE));
    }

    #[test]
    fn test_status_code() {
        assert_eq!(
            status_code(&BookmarkError::WriteFailed("quota".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
