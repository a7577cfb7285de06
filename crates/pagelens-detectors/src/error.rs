use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Pattern matching error: {0}")]
    Pattern(String),
}

pub type Result<T> = std::result::Result<T, Error>;
