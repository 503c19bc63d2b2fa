//! Favorites store.
//!
//! Holds the set of favorited product ids for one session. The only
//! mutation is [`FavoritesStore::toggle`]; readers take immutable
//! snapshots or subscribe to the change feed.

mod set;
mod store;

pub use set::FavoritesSet;
pub use store::{FavoritesSnapshot, FavoritesStore, FavoritesSubscription, DEFAULT_FEED_CAPACITY};
