use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use asura_lib::models::{DetailedManga, Manga, MangaPage, PageImage, SeriesManga};

use crate::domain::repositories::catalogue::{CatalogueRepository, CatalogueRepositoryError};

#[derive(Clone)]
pub struct CatalogueRepositoryImpl {
    client: reqwest::Client,
    base_url: String,
    request_timeout: Duration,
    chapter_timeout: Duration,
}

impl CatalogueRepositoryImpl {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(15),
            chapter_timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeouts(self, request_timeout: Duration, chapter_timeout: Duration) -> Self {
        Self {
            request_timeout,
            chapter_timeout,
            ..self
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        timeout: Duration,
    ) -> Result<T, CatalogueRepositoryError> {
        let url = format!("{}{path}", self.base_url);
        debug!("GET {url} {query:?}");

        let data = self
            .client
            .get(&url)
            .query(query)
            .timeout(timeout)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(data)
    }
}

fn ensure_id(name: &str, id: &str) -> Result<(), CatalogueRepositoryError> {
    if id.trim().is_empty() {
        return Err(CatalogueRepositoryError::Other(format!(
            "{name} cannot be empty"
        )));
    }

    Ok(())
}

#[async_trait]
impl CatalogueRepository for CatalogueRepositoryImpl {
    async fn fetch_latest_manga(
        &self,
        page: i64,
    ) -> Result<MangaPage<Manga>, CatalogueRepositoryError> {
        self.get_json("/latest", &[("page", page.to_string())], self.request_timeout)
            .await
    }

    async fn fetch_series_manga(
        &self,
        page: i64,
    ) -> Result<MangaPage<SeriesManga>, CatalogueRepositoryError> {
        self.get_json("/series", &[("page", page.to_string())], self.request_timeout)
            .await
    }

    async fn fetch_popular_manga(
        &self,
        page: i64,
    ) -> Result<MangaPage<SeriesManga>, CatalogueRepositoryError> {
        self.get_json("/popular", &[("page", page.to_string())], self.request_timeout)
            .await
    }

    async fn fetch_search_manga(
        &self,
        query: &str,
        page: i64,
    ) -> Result<MangaPage<SeriesManga>, CatalogueRepositoryError> {
        self.get_json(
            "/search",
            &[("query", query.to_string()), ("page", page.to_string())],
            self.request_timeout,
        )
        .await
    }

    async fn fetch_manga_detail(
        &self,
        manga_id: &str,
    ) -> Result<DetailedManga, CatalogueRepositoryError> {
        ensure_id("manga id", manga_id)?;

        self.get_json(&format!("/manga/{manga_id}"), &[], self.request_timeout)
            .await
    }

    async fn fetch_chapter_images(
        &self,
        manga_id: &str,
        chapter_id: &str,
    ) -> Result<Vec<PageImage>, CatalogueRepositoryError> {
        ensure_id("manga id", manga_id)?;
        ensure_id("chapter id", chapter_id)?;

        self.get_json(
            &format!("/chapter/{manga_id}/chapter/{chapter_id}"),
            &[],
            self.chapter_timeout,
        )
        .await
    }
}

#[cfg(all(test, feature = "server"))]
mod test {
    use std::{collections::HashMap, net::SocketAddr};

    use axum::{
        Json, Router,
        extract::{Path, Query},
        http::StatusCode,
        routing::get,
    };
    use serde_json::{Value, json};

    use super::*;

    async fn latest(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
        let page: i64 = params
            .get("page")
            .and_then(|p| p.parse().ok())
            .unwrap_or(1);
        Json(json!({
            "currentPage": page,
            "hasNextPage": page < 3,
            "results": [{"id": "solo-leveling", "title": "Solo Leveling"}]
        }))
    }

    async fn search(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
        Json(json!({
            "currentPage": params.get("page").and_then(|p| p.parse::<i64>().ok()),
            "hasNextPage": false,
            "results": [{"id": "echo", "title": params.get("query")}]
        }))
    }

    async fn manga(Path(id): Path<String>) -> Result<Json<Value>, StatusCode> {
        if id != "solo-leveling" {
            return Err(StatusCode::NOT_FOUND);
        }
        Ok(Json(json!({
            "id": id,
            "title": "Solo Leveling",
            "chapters": [{"id": 1, "title": null, "releaseDate": "2024-01-01"}]
        })))
    }

    async fn chapter(Path((_, chapter_id)): Path<(String, String)>) -> Json<Value> {
        Json(json!([
            {"page": 1, "img": format!("http://x/{chapter_id}/1.jpg")},
            {"page": 2, "img": format!("http://x/{chapter_id}/2.jpg")}
        ]))
    }

    async fn api() -> SocketAddr {
        let router = Router::new()
            .route("/api/latest", get(latest))
            .route("/api/series", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
            .route("/api/search", get(search))
            .route("/api/manga/{id}", get(manga))
            .route("/api/chapter/{manga_id}/chapter/{chapter_id}", get(chapter));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await });
        addr
    }

    #[tokio::test]
    async fn test_fetch_latest_manga() {
        let addr = api().await;
        let repo = CatalogueRepositoryImpl::new(format!("http://{addr}/api/"));

        let page = repo.fetch_latest_manga(2).await.unwrap();

        assert_eq!(page.current_page, 2);
        assert!(page.has_next_page);
        assert_eq!(page.results[0].title, "Solo Leveling");
    }

    #[tokio::test]
    async fn test_fetch_search_manga_encodes_query() {
        let addr = api().await;
        let repo = CatalogueRepositoryImpl::new(format!("http://{addr}/api"));

        let page = repo.fetch_search_manga("solo & leveling?", 2).await.unwrap();

        assert_eq!(page.current_page, 2);
        assert!(!page.has_next_page);
        assert_eq!(page.results[0].title, "solo & leveling?");
    }

    #[tokio::test]
    async fn test_fetch_error_status() {
        let addr = api().await;
        let repo = CatalogueRepositoryImpl::new(format!("http://{addr}/api"));

        let result = repo.fetch_series_manga(1).await;
        assert!(matches!(result, Err(CatalogueRepositoryError::RequestError(_))));

        let result = repo.fetch_manga_detail("unknown").await;
        assert!(matches!(result, Err(CatalogueRepositoryError::RequestError(_))));
    }

    #[tokio::test]
    async fn test_fetch_manga_detail_and_images() {
        let addr = api().await;
        let repo = CatalogueRepositoryImpl::new(format!("http://{addr}/api"));

        let manga = repo.fetch_manga_detail("solo-leveling").await.unwrap();
        assert_eq!(manga.chapters.len(), 1);
        assert_eq!(manga.chapters[0].title, None);

        let images = repo.fetch_chapter_images("solo-leveling", "1").await.unwrap();
        assert_eq!(images.len(), 2);
        assert_eq!(images[1].img, "http://x/1/2.jpg");
    }

    #[tokio::test]
    async fn test_empty_id_is_rejected() {
        let repo = CatalogueRepositoryImpl::new("http://127.0.0.1:1/api");

        let result = repo.fetch_chapter_images("solo-leveling", " ").await;

        assert!(matches!(result, Err(CatalogueRepositoryError::Other(_))));
    }
}
