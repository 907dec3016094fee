pub mod feed_repository;
pub mod ingestion_repository;
pub mod item_repository;

pub use feed_repository::FeedRepository;
pub use ingestion_repository::IngestionRepository;
pub use item_repository::ItemRepository;
