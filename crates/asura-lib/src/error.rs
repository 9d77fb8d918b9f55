use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("chapter id {0:?} is not a number")]
    InvalidChapterId(String),
}
