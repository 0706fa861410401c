//! UI-wide constants.

/// Announcement list refresh while a send is pending or processing.
pub const POLL_INTERVAL_MS: u32 = 5_000;

/// Delay before a coupon's active toggle is sent to the server.
pub const TOGGLE_DEBOUNCE_MS: u32 = 400;

/// How long a notification stays on screen.
pub const NOTICE_LIFETIME_MS: u32 = 4_000;

/// Countdown refresh on the registration timeline.
pub const COUNTDOWN_TICK_MS: u32 = 1_000;

pub const PAGE_SIZE_OPTIONS: [u32; 4] = [10, 25, 50, 100];

pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Backend port used when no explicit API base was compiled in.
pub const DEFAULT_API_PORT: u16 = 3000;
