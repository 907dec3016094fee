pub mod feed;
pub mod health;
pub mod item;
pub mod stats;
