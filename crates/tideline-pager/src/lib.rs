//! Tideline cursor-paged timeline controller
//!
//! Presents a window over a keyed feed that a backend can only serve forward
//! from a cursor key. The pager keeps the visible page, a prefetched next
//! page, and a history of boundary keys so UI layers can step forward,
//! step back toward the live edge, start over, and splice newly arrived
//! items in at the head.
//!
//! ```no_run
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! use tideline_pager::{json_field, TimelinePager};
//! use serde_json::{json, Value};
//!
//! let mut pager = TimelinePager::<Value, Value, std::io::Error>::builder()
//!     .initial_fetch(|page_size| async move {
//!         Ok((1..=page_size as u64).rev().map(|id| json!({ "id": id })).collect::<Vec<_>>())
//!     })
//!     .fetch_page(|_cursor, _page_size| async move { Ok(Vec::<Value>::new()) })
//!     .key(json_field("id"))
//!     .page_size(20)
//!     .build()?;
//!
//! pager.initial_fetch().await?;
//! assert!(pager.is_live());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod fetch;
pub mod key;
pub mod page;
pub mod pager;
pub mod view;

pub use config::PagerConfig;
pub use error::{ConfigError, InsertError, TimelineError};
pub use fetch::{FetchPageFn, InitialFetchFn, PageSource};
pub use key::{json_field, KeyFn};
pub use page::Fetched;
pub use pager::{TimelinePager, TimelinePagerBuilder, TimelineSnapshot};
pub use view::{EmptyTimeline, Timeline};
