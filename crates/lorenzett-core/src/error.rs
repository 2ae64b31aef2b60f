//! Unified error handling for lorenzett component configuration.
//!
//! Every fallible operation in this crate returns [`Result`]. The "fatal"
//! configuration path is an [`Error`] handed back to the configuration driver,
//! which is expected to stop the job.

/// Unified error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Property name is not in the component's allow-list.
    #[error("Property with name {key} is not allowed for {class} object")]
    InvalidPropertyKey { key: String, class: String },

    /// Property value cannot be coerced to the type the native side expects.
    #[error("Invalid value for property {key} of {class}: expected {expected}, found {found}")]
    InvalidPropertyValue {
        key: String,
        class: String,
        expected: String,
        found: String,
    },

    /// Component instance name is empty or otherwise unusable.
    #[error("Invalid component name: {0:?}")]
    InvalidName(String),

    /// Shared library could not be loaded.
    #[error("Failed to load library: {0}")]
    LoadFailed(String),

    /// Required symbol missing from a loaded library.
    #[error("Missing symbol {symbol} in {library}")]
    SymbolNotFound { symbol: String, library: String },

    /// Library was built against a different ABI.
    #[error("ABI version mismatch: expected {expected}, found {found}")]
    AbiMismatch { expected: u32, found: u32 },

    /// Native constructor returned no object.
    #[error("Native constructor for {class} returned null (name: {name})")]
    CreationFailed { class: String, name: String },

    /// Native property setter reported failure.
    #[error("{class}/{name} rejected property {key} (code {code})")]
    NativeCall {
        class: String,
        name: String,
        key: String,
        code: i32,
    },

    /// Job configuration names a class with no known component kind.
    #[error("Unknown component class: {0}")]
    UnknownClass(String),

    /// Configuration errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding errors.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for convenience.
pub type Result<T> = std::result::Result<T, Error>;

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}

/// Shorthand for [`Error::Config`].
#[macro_export]
macro_rules! config_err {
    ($msg:expr) => {
        $crate::error::Error::Config($msg.into())
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::Error::Config(format!($fmt, $($arg)*))
    };
}
