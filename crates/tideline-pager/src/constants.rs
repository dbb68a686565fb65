//! Pager configuration constants.
//!
//! Centralizes hardcoded values for easier configuration and documentation.

/// Default number of items requested per fetch when no page size is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Distance from the end of the key history to the cursor used for a
/// backward step.
///
/// With one boundary key pushed at initial load plus one per fetch of `next`,
/// the history is `index + 2` long, and the page preceding the current one
/// starts after `keys[index - 2]`, which is `keys[len - 4]`. At depth 1 the
/// lookup falls off the front and the page source is asked for "from the
/// start". Live insertions rewrite the last entry only, so after one the
/// offset no longer lines up with the window; kept as observed.
pub const PREVIOUS_KEY_OFFSET: usize = 4;
