pub mod rest;

use anyhow::anyhow;
use axum::{
    Router,
    extract::Extension,
    routing::{get, post},
};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};

use self::rest::{
    BookmarkSvc, CatalogueSvc,
    bookmark::{check_bookmark, delete_bookmark, list_bookmarks, put_bookmark, toggle_bookmark},
    catalogue::{chapter, latest, manga_chapters, manga_detail, popular, search, series},
    health::health_check,
};

pub struct ServerBuilder {
    bookmark_svc: Option<BookmarkSvc>,
    catalogue_svc: Option<CatalogueSvc>,
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self {
            bookmark_svc: None,
            catalogue_svc: None,
        }
    }

    pub fn with_bookmark_svc(self, bookmark_svc: BookmarkSvc) -> Self {
        Self {
            bookmark_svc: Some(bookmark_svc),
            ..self
        }
    }

    pub fn with_catalogue_svc(self, catalogue_svc: CatalogueSvc) -> Self {
        Self {
            catalogue_svc: Some(catalogue_svc),
            ..self
        }
    }

    pub fn build(self) -> Result<Server, anyhow::Error> {
        let bookmark_svc = self
            .bookmark_svc
            .ok_or_else(|| anyhow!("no bookmark service"))?;
        let catalogue_svc = self
            .catalogue_svc
            .ok_or_else(|| anyhow!("no catalogue service"))?;

        Ok(Server::new(bookmark_svc, catalogue_svc))
    }
}

pub struct Server {
    router: Router,
}

impl Server {
    pub fn new(bookmark_svc: BookmarkSvc, catalogue_svc: CatalogueSvc) -> Self {
        let router = Router::new()
            .route("/health", get(health_check))
            .route("/api/bookmarks", get(list_bookmarks))
            .route(
                "/api/bookmarks/{manga_id}",
                get(check_bookmark).put(put_bookmark).delete(delete_bookmark),
            )
            .route("/api/bookmarks/{manga_id}/toggle", post(toggle_bookmark))
            .route("/api/latest", get(latest))
            .route("/api/series", get(series))
            .route("/api/popular", get(popular))
            .route("/api/search", get(search))
            .route("/api/manga/{manga_id}", get(manga_detail))
            .route("/api/manga/{manga_id}/chapters", get(manga_chapters))
            .route("/api/manga/{manga_id}/chapter/{chapter_id}", get(chapter))
            .layer(Extension(bookmark_svc))
            .layer(Extension(catalogue_svc))
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );

        Self { router }
    }

    pub async fn serve<A: Into<SocketAddr>>(self, addr: A) -> Result<(), anyhow::Error> {
        let addr = addr.into();
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("listening on {addr}");

        axum::serve(listener, self.router).await?;

        Ok(())
    }
}
