pub mod config;
pub mod deck;
pub mod draw;
pub mod error;
pub mod gesture;
pub mod nav;
pub mod reveal;
pub mod scheduler;
pub mod session;
pub mod view;

#[cfg(test)]
pub mod test_support;

pub use config::AppConfig;
pub use deck::{Item, ItemId, MediaKind};
pub use draw::{DrawMode, DrawProgress};
pub use error::{Error, Result};
pub use session::Carousel;
