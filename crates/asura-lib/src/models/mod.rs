pub mod manga;
pub use manga::*;

pub mod chapter;
pub use chapter::*;

pub mod page;
pub use page::*;
