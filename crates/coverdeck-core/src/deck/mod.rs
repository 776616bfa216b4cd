mod loader;
mod models;
mod order;

pub use loader::{parse_deck, DeckSource, JsonFileSource};
pub use models::{Item, ItemId, MediaKind, MediaSources};
pub use order::NavigationOrder;
