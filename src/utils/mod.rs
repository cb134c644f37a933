//! Utility functions and helpers.

pub mod dates;
pub mod format;
pub mod phone;

pub use dates::{filter_rentals, parse_datetime, DateFilter, DateRange};
pub use format::{format_date, format_date_short, source_text, status_color, status_text};
pub use phone::{is_valid_phone, normalize_phone};
