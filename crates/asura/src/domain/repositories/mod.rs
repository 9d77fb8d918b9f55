pub mod bookmark;
pub mod catalogue;
