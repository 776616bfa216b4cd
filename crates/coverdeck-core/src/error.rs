use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Deck load error: {0}")]
    DeckLoad(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
