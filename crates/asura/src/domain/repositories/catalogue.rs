use async_trait::async_trait;

use asura_lib::models::{DetailedManga, Manga, MangaPage, PageImage, SeriesManga};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogueRepositoryError {
    #[error("error request catalogue: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("other error: {0}")]
    Other(String),
}

#[async_trait]
pub trait CatalogueRepository: Send + Sync {
    async fn fetch_latest_manga(
        &self,
        page: i64,
    ) -> Result<MangaPage<Manga>, CatalogueRepositoryError>;

    async fn fetch_series_manga(
        &self,
        page: i64,
    ) -> Result<MangaPage<SeriesManga>, CatalogueRepositoryError>;

    async fn fetch_popular_manga(
        &self,
        page: i64,
    ) -> Result<MangaPage<SeriesManga>, CatalogueRepositoryError>;

    async fn fetch_search_manga(
        &self,
        query: &str,
        page: i64,
    ) -> Result<MangaPage<SeriesManga>, CatalogueRepositoryError>;

    async fn fetch_manga_detail(
        &self,
        manga_id: &str,
    ) -> Result<DetailedManga, CatalogueRepositoryError>;

    async fn fetch_chapter_images(
        &self,
        manga_id: &str,
        chapter_id: &str,
    ) -> Result<Vec<PageImage>, CatalogueRepositoryError>;
}
