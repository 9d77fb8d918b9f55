use axum::{
    Json,
    extract::{Extension, Path, Query},
    http::StatusCode,
};
use serde::Deserialize;

use asura_lib::{
    models::{DetailedChapter, DetailedManga, Manga, MangaPage, SeriesManga},
    reader::ChapterView,
};

use super::CatalogueSvc;

#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(default = "first_page")]
    page: i64,
}

fn first_page() -> i64 {
    1
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    q: String,
}

#[derive(Debug, Deserialize)]
pub struct MangaSearchParams {
    #[serde(default)]
    query: String,
    #[serde(default = "first_page")]
    page: i64,
}

pub async fn latest(
    Query(params): Query<PageParams>,
    Extension(svc): Extension<CatalogueSvc>,
) -> Json<MangaPage<Manga>> {
    Json(svc.latest(params.page).await)
}

pub async fn series(
    Query(params): Query<PageParams>,
    Extension(svc): Extension<CatalogueSvc>,
) -> Json<MangaPage<SeriesManga>> {
    Json(svc.series(params.page).await)
}

pub async fn popular(
    Query(params): Query<PageParams>,
    Extension(svc): Extension<CatalogueSvc>,
) -> Json<MangaPage<SeriesManga>> {
    Json(svc.popular(params.page).await)
}

pub async fn search(
    Query(params): Query<MangaSearchParams>,
    Extension(svc): Extension<CatalogueSvc>,
) -> Json<MangaPage<SeriesManga>> {
    Json(svc.search(&params.query, params.page).await)
}

pub async fn manga_detail(
    Path(manga_id): Path<String>,
    Extension(svc): Extension<CatalogueSvc>,
) -> Result<Json<DetailedManga>, StatusCode> {
    svc.manga_detail(&manga_id)
        .await
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

pub async fn manga_chapters(
    Path(manga_id): Path<String>,
    Query(params): Query<SearchParams>,
    Extension(svc): Extension<CatalogueSvc>,
) -> Result<Json<Vec<DetailedChapter>>, StatusCode> {
    svc.search_chapters(&manga_id, &params.q)
        .await
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

pub async fn chapter(
    Path((manga_id, chapter_id)): Path<(String, String)>,
    Extension(svc): Extension<CatalogueSvc>,
) -> Result<Json<ChapterView>, StatusCode> {
    svc.chapter(&manga_id, &chapter_id)
        .await
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        domain::services::catalogue::CatalogueService,
        infrastructure::domain::repositories::catalogue::CatalogueRepositoryImpl,
    };

    // nothing listens on port 1, every request fails fast
    fn unreachable() -> CatalogueSvc {
        CatalogueService::new(CatalogueRepositoryImpl::new("http://127.0.0.1:1/api"))
    }

    #[tokio::test]
    async fn test_listing_falls_back_to_empty_page() {
        let Json(page) = latest(Query(PageParams { page: 5 }), Extension(unreachable())).await;

        assert_eq!(page, MangaPage::empty(5));
    }

    #[tokio::test]
    async fn test_search_falls_back_to_empty_page() {
        let params = MangaSearchParams {
            query: "solo leveling".to_string(),
            page: 2,
        };

        let Json(page) = search(Query(params), Extension(unreachable())).await;

        assert_eq!(page, MangaPage::empty(2));
    }

    #[tokio::test]
    async fn test_missing_manga_is_not_found() {
        let result = manga_detail(Path("solo-leveling".to_string()), Extension(unreachable())).await;
        assert_eq!(result.err(), Some(StatusCode::NOT_FOUND));

        let result = chapter(
            Path(("solo-leveling".to_string(), "1".to_string())),
            Extension(unreachable()),
        )
        .await;
        assert_eq!(result.err(), Some(StatusCode::NOT_FOUND));
    }
}
