pub mod extractor;
pub mod fetcher;
pub mod publisher;
pub mod sync_job;

pub use extractor::*;
pub use fetcher::*;
pub use publisher::*;
pub use sync_job::*;
