pub mod feed;
pub mod ingestion;
pub mod item;
pub mod parser;
pub mod shared;
pub mod stats;
