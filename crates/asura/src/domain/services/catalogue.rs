use asura_lib::{
    models::{DetailedChapter, DetailedManga, Manga, MangaPage, PageImage, SeriesManga},
    reader::{self, ChapterView},
};

use crate::domain::repositories::catalogue::CatalogueRepository;

/// Front for the remote manga API. Failures are logged and replaced by an
/// empty page, `None` or an empty image list, so callers always get something
/// to render.
#[derive(Clone)]
pub struct CatalogueService<R>
where
    R: CatalogueRepository,
{
    repo: R,
}

impl<R> CatalogueService<R>
where
    R: CatalogueRepository,
{
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn latest(&self, page: i64) -> MangaPage<Manga> {
        self.repo
            .fetch_latest_manga(page)
            .await
            .unwrap_or_else(|e| {
                error!("error fetching latest manga page {page}: {e}");
                MangaPage::empty(page)
            })
    }

    pub async fn series(&self, page: i64) -> MangaPage<SeriesManga> {
        self.repo
            .fetch_series_manga(page)
            .await
            .unwrap_or_else(|e| {
                error!("error fetching series page {page}: {e}");
                MangaPage::empty(page)
            })
    }

    pub async fn popular(&self, page: i64) -> MangaPage<SeriesManga> {
        self.repo
            .fetch_popular_manga(page)
            .await
            .unwrap_or_else(|e| {
                error!("error fetching popular manga page {page}: {e}");
                MangaPage::empty(page)
            })
    }

    /// Manga whose title matches `query`, as ranked by the API
    pub async fn search(&self, query: &str, page: i64) -> MangaPage<SeriesManga> {
        self.repo
            .fetch_search_manga(query, page)
            .await
            .unwrap_or_else(|e| {
                error!("error searching manga {query:?} page {page}: {e}");
                MangaPage::empty(page)
            })
    }

    pub async fn manga_detail(&self, manga_id: &str) -> Option<DetailedManga> {
        match self.repo.fetch_manga_detail(manga_id).await {
            Ok(manga) => Some(manga),
            Err(e) => {
                error!("error fetching manga {manga_id}: {e}");
                None
            }
        }
    }

    pub async fn chapter_images(&self, manga_id: &str, chapter_id: &str) -> Vec<PageImage> {
        self.repo
            .fetch_chapter_images(manga_id, chapter_id)
            .await
            .unwrap_or_else(|e| {
                error!("error fetching chapter {manga_id}/{chapter_id} images: {e}");
                vec![]
            })
    }

    /// Chapters of a manga newest first, narrowed down by `query`
    pub async fn search_chapters(
        &self,
        manga_id: &str,
        query: &str,
    ) -> Option<Vec<DetailedChapter>> {
        let manga = self.manga_detail(manga_id).await?;
        let sorted = reader::sort_chapters(&manga.chapters);

        Some(
            reader::search_chapters(&sorted, query)
                .into_iter()
                .cloned()
                .collect(),
        )
    }

    /// Chapter images together with the neighbouring chapters. `None` when the
    /// chapter id isn't numeric or the manga can't be fetched.
    pub async fn chapter(&self, manga_id: &str, chapter_id: &str) -> Option<ChapterView> {
        let id = match reader::parse_chapter_id(chapter_id) {
            Ok(id) => id,
            Err(e) => {
                warn!("{e}");
                return None;
            }
        };

        let (manga, images) = tokio::join!(
            self.manga_detail(manga_id),
            self.chapter_images(manga_id, chapter_id)
        );
        let manga = manga?;

        let navigation = reader::navigate(&manga.chapters, id);
        let title = navigation
            .current
            .as_ref()
            .map(reader::chapter_title)
            .unwrap_or_else(|| format!("Chapter {id}"));

        Some(ChapterView {
            manga_id: manga.id,
            manga_title: manga.title,
            chapter_id: id,
            title,
            images,
            previous: navigation.previous,
            next: navigation.next,
        })
    }
}
