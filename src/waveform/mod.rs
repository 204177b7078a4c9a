mod cache;
mod thumbnail;

pub use cache::{DEFAULT_CACHE_ENTRIES, ThumbnailCache, ThumbnailKey};
pub use thumbnail::{DEFAULT_THUMBNAIL_RESOLUTION, Thumbnail};
