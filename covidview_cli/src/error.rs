#[derive(thiserror::Error, Debug)]
pub enum CovidViewCliError {
    #[error("Anyhow error")]
    Anyhow(#[from] anyhow::Error),
    #[error("invalid TOML in config file")]
    TomlError(#[from] toml::de::Error),
    #[error("std IO error")]
    IOError(#[from] std::io::Error),
}

pub type CovidViewCliResult<T> = Result<T, CovidViewCliError>;
