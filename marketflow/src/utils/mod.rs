//! Small helpers for text handling and timestamps.

mod text;
pub mod timestamps;

pub use text::{bullet_list, take_chars, truncate_text};
pub use timestamps::{now_utc, report_date, Timestamp};
