pub mod dates;
pub mod record;
pub mod status;

pub use dates::{to_range_utc, DateError};
