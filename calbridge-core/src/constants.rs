/// Civil offset used for every window and zone-less date-time (UTC+9, no DST).
pub const CIVIL_OFFSET_SECS: i32 = 9 * 3600;

/// Windows zone identifier the calendar service understands for UTC+9.
pub const CIVIL_TIME_ZONE_NAME: &str = "Tokyo Standard Time";

/// How far ahead of tomorrow's midnight the calendar view reaches.
pub const QUERY_WINDOW_DAYS: i64 = 30;

/// Upper bound on events returned by a single calendar view page.
pub const QUERY_PAGE_SIZE: u32 = 100;

/// Text values accepted as `true` for boolean tool arguments.
pub const TRUTHY_TOKENS: [&str; 5] = ["true", "1", "yes", "y", "on"];
