use ferroscreen_core::{
    CatalogError, CompileError, ConfigError, FieldError, ParseError, ScreenerError,
    TransportError,
};
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Screener(#[from] ScreenerError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Screener(error) if error.is_construction_error() => 2,
            Self::Screener(ScreenerError::Serialization(_)) => 4,
            Self::Screener(_) => 3,
            Self::Parse(_) | Self::Config(_) | Self::Usage(_) => 2,
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }
}

macro_rules! via_screener_error {
    ($($source:ty),*) => {
        $(
            impl From<$source> for CliError {
                fn from(error: $source) -> Self {
                    Self::Screener(ScreenerError::from(error))
                }
            }
        )*
    };
}

via_screener_error!(CatalogError, FieldError, CompileError, TransportError);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_error_category() {
        assert_eq!(CliError::from(CompileError::EmptyPage).exit_code(), 2);
        assert_eq!(
            CliError::from(ScreenerError::from(TransportError::new("timeout"))).exit_code(),
            3
        );
        assert_eq!(
            CliError::from(TransportError::non_retryable("failed to build http client")).exit_code(),
            3
        );
        assert_eq!(CliError::Usage(String::from("bad")).exit_code(), 2);
        assert_eq!(
            CliError::from(std::io::Error::other("closed pipe")).exit_code(),
            10
        );
    }
}
