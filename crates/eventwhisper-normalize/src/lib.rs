//! Input normalization for eventwhisper
//!
//! Tool callers pass limits, id lists, keyword lists and timestamps in many
//! shapes: bare values, quoted or backticked strings, comma lists, JSON array
//! strings, real arrays. This crate turns each of them into one canonical
//! form. None of the normalizers fail; unusable input degrades to "nothing"
//! (or the caller's default).

mod lists;
mod quotes;
mod timestamp;
mod value;

pub use lists::{normalize_int_list, normalize_str_list};
pub use quotes::strip_wrapping_quotes;
pub use timestamp::normalize_timestamp;
pub use value::{normalize_positive_int, parse_int};

// Re-export types used in our public API
pub use eventwhisper_types::Param;
