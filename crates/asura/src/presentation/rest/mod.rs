pub mod bookmark;
pub mod catalogue;
pub mod health;

use crate::{
    domain::services::{bookmark::BookmarkService, catalogue::CatalogueService},
    infrastructure::domain::repositories::{
        bookmark::BookmarkRepositoryImpl, catalogue::CatalogueRepositoryImpl,
    },
};

pub type BookmarkSvc = BookmarkService<BookmarkRepositoryImpl>;
pub type CatalogueSvc = CatalogueService<CatalogueRepositoryImpl>;
