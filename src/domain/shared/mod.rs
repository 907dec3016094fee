pub mod clock;
pub mod pagination;

pub use clock::{Clock, SystemClock};
pub use pagination::{Page, PageQuery, PageRequest};
