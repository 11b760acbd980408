pub mod input_utils;
pub mod time_utils;

pub use input_utils::{clearable_text, normalize_text, require_text, NumericInput};
pub use time_utils::{age_on, parse_date, parse_datetime, today_utc};
