#[macro_use]
extern crate log;

use std::time::Duration;

use anyhow::anyhow;
use asura::{
    domain::{
        entities::bookmark::{BookmarkOrder, NewBookmark},
        services::{
            bookmark::{BookmarkError, BookmarkService},
            catalogue::CatalogueService,
        },
    },
    infrastructure::{
        config::Config,
        database,
        domain::repositories::{
            bookmark::BookmarkRepositoryImpl, catalogue::CatalogueRepositoryImpl,
        },
    },
    presentation::ServerBuilder,
};
use asura_lib::{reader, utils};
use clap::{Parser, Subcommand};
use serde::Serialize;

#[derive(Parser)]
#[clap(version, about)]
struct Opts {
    /// Path to config file
    #[clap(long)]
    config: Option<String>,
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the REST server (default)
    Serve,
    /// Manage local bookmarks
    Bookmark {
        #[clap(subcommand)]
        command: BookmarkCommand,
    },
    Latest {
        #[clap(long, default_value_t = 1)]
        page: i64,
    },
    Series {
        #[clap(long, default_value_t = 1)]
        page: i64,
    },
    Popular {
        #[clap(long, default_value_t = 1)]
        page: i64,
    },
    /// Search manga by title
    Search {
        query: String,
        #[clap(long, default_value_t = 1)]
        page: i64,
    },
    /// Show manga details and its chapters
    Manga {
        id: String,
        /// Only list chapters matching this text
        #[clap(long)]
        query: Option<String>,
    },
    /// Print chapter images with previous and next chapter
    Chapter { manga_id: String, chapter_id: String },
}

#[derive(Subcommand)]
enum BookmarkCommand {
    /// Bookmark a manga, title and cover are fetched from the API
    Add { manga_id: String },
    Remove { manga_id: String },
    Check { manga_id: String },
    List {
        #[clap(long)]
        by_title: bool,
    },
    Toggle { manga_id: String },
}

fn init_logger() {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default());

    if std::env::var("RUST_LOG").is_err() {
        let level = std::env::var("ASURA_LOG").unwrap_or_else(|_| "info".to_string());
        builder.parse_filters(&format!("asura={level},asura_lib={level}"));
    }

    builder.init();
}

fn print_json<T: Serialize>(value: &T) -> Result<(), anyhow::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run_bookmark(
    command: BookmarkCommand,
    bookmark_svc: &BookmarkService<BookmarkRepositoryImpl>,
    catalogue_svc: &CatalogueService<CatalogueRepositoryImpl>,
) -> Result<(), anyhow::Error> {
    match command {
        BookmarkCommand::Add { manga_id } => {
            let manga = catalogue_svc
                .manga_detail(&manga_id)
                .await
                .ok_or_else(|| anyhow!("manga {manga_id} not found"))?;
            let bookmark = bookmark_svc
                .add(NewBookmark::new(manga_id, manga.title, manga.image))
                .await?;
            println!("bookmarked {}", bookmark.title);
        }
        BookmarkCommand::Remove { manga_id } => {
            bookmark_svc.remove(&manga_id).await?;
            println!("removed {manga_id}");
        }
        BookmarkCommand::Check { manga_id } => {
            println!("{}", bookmark_svc.is_bookmarked(&manga_id).await);
        }
        BookmarkCommand::List { by_title } => {
            let order = if by_title {
                BookmarkOrder::Title
            } else {
                BookmarkOrder::Recent
            };
            for bookmark in bookmark_svc.get_bookmarks_by(order).await {
                println!(
                    "{}\t{}\tadded {}",
                    bookmark.manga_id,
                    bookmark.title,
                    utils::format_date(bookmark.added_at)
                );
            }
        }
        BookmarkCommand::Toggle { manga_id } => {
            // un-bookmarking must not depend on the API being reachable
            if bookmark_svc.is_bookmarked(&manga_id).await {
                bookmark_svc.remove(&manga_id).await?;
                println!("{manga_id} removed");
                return Ok(());
            }

            let manga = catalogue_svc
                .manga_detail(&manga_id)
                .await
                .ok_or_else(|| anyhow!("manga {manga_id} not found"))?;
            let bookmarked = bookmark_svc
                .toggle(NewBookmark::new(manga_id, manga.title.clone(), manga.image))
                .await?;
            println!(
                "{} {}",
                manga.title,
                if bookmarked { "bookmarked" } else { "removed" }
            );
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    init_logger();

    let opts: Opts = Opts::parse();
    let config = Config::open(opts.config)?;

    debug!("config: {:?}", config);

    let catalogue_repo = CatalogueRepositoryImpl::new(&config.api_base_url).with_timeouts(
        Duration::from_secs(config.request_timeout),
        Duration::from_secs(config.chapter_timeout),
    );
    let catalogue_svc = CatalogueService::new(catalogue_repo);

    let now = chrono::Utc::now();

    match opts.command.unwrap_or(Command::Serve) {
        Command::Latest { page } => print_json(&catalogue_svc.latest(page).await)?,
        Command::Series { page } => print_json(&catalogue_svc.series(page).await)?,
        Command::Popular { page } => print_json(&catalogue_svc.popular(page).await)?,
        Command::Search { query, page } => {
            print_json(&catalogue_svc.search(&query, page).await)?
        }
        Command::Manga { id, query } => {
            let manga = catalogue_svc
                .manga_detail(&id)
                .await
                .ok_or_else(|| anyhow!("manga {id} not found"))?;
            println!("{} [{}] {}", manga.title, manga.status, manga.rating);
            println!("{}", manga.genres.join(", "));
            println!();

            let sorted = reader::sort_chapters(&manga.chapters);
            let query = query.unwrap_or_default();
            for chapter in reader::search_chapters(&sorted, &query) {
                println!(
                    "{}\t{}\t{}",
                    chapter.id,
                    reader::chapter_title(chapter),
                    utils::format_relative_time(&chapter.release_date, now)
                );
            }
        }
        Command::Chapter {
            manga_id,
            chapter_id,
        } => {
            let view = catalogue_svc
                .chapter(&manga_id, &chapter_id)
                .await
                .ok_or_else(|| anyhow!("chapter {chapter_id} of {manga_id} not found"))?;
            print_json(&view)?;
        }
        Command::Bookmark { command } => {
            let pool =
                database::establish_connection(&config.database_path, config.create_database)
                    .await
                    .map_err(BookmarkError::from)?;
            let bookmark_svc = BookmarkService::new(BookmarkRepositoryImpl::new(pool.clone()));

            let result = run_bookmark(command, &bookmark_svc, &catalogue_svc).await;
            pool.close().await;
            result?;
        }
        Command::Serve => {
            let pool =
                database::establish_connection(&config.database_path, config.create_database)
                    .await
                    .map_err(BookmarkError::from)?;
            let bookmark_svc = BookmarkService::new(BookmarkRepositoryImpl::new(pool.clone()));

            let server = ServerBuilder::new()
                .with_bookmark_svc(bookmark_svc)
                .with_catalogue_svc(catalogue_svc)
                .build()?;

            let result = tokio::select! {
                result = server.serve(([0, 0, 0, 0], config.port)) => {
                    if let Err(e) = &result {
                        error!("server error: {e}");
                    }
                    info!("server shutdown");
                    result
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("ctrl+c signal");
                    Ok(())
                }
            };

            info!("closing database...");
            pool.close().await;
            result?;
        }
    }

    Ok(())
}
