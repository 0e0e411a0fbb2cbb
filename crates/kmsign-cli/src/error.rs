use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Key error: {0}")]
    Key(#[from] kmsign_key::Error),

    #[error("Crypto error: {0}")]
    Crypto(#[from] kmsign_crypto::Error),

    #[error("Config error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("File not found: {0}")]
    FileNotFound(String),
}

impl From<figment::Error> for CliError {
    fn from(value: figment::Error) -> Self {
        CliError::Config(Box::new(value))
    }
}

pub type CliResult<T> = Result<T, CliError>;
