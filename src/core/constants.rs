//! Constants for environment variables, endpoints and output keys
//!
//! This module defines the names and fixed values shared by configuration,
//! the Custom Search client and the command-line surface.

/// Environment variable names
pub mod env {
    /// Custom Search API key
    pub const GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";

    /// Custom Search Engine identifier (`cx`)
    pub const GOOGLE_CSE_ID: &str = "GOOGLE_CSE_ID";

    /// Override for the API host, mainly for pointing at a mock server
    pub const GOOGLE_CSE_BASE_URL: &str = "GOOGLE_CSE_BASE_URL";

    /// Logging level
    pub const LOG_LEVEL: &str = "LOG_LEVEL";

    /// Request timeout in seconds
    pub const REQUEST_TIMEOUT: &str = "REQUEST_TIMEOUT";

    /// Explicit path of the dotenv file
    pub const DOTENV_PATH: &str = "DOTENV_PATH";
}

/// Custom Search endpoint constants
pub mod endpoint {
    /// Default API host
    pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com";

    /// Path of the Custom Search v1 `list` method
    pub const LIST_PATH: &str = "/customsearch/v1";
}

/// Query parameter names of the `list` method
pub mod param {
    pub const KEY: &str = "key";
    pub const CX: &str = "cx";
    pub const QUERY: &str = "q";
}

/// Key of the flat failure envelope
pub const ERROR_KEY: &str = "error";

/// Default log level; stdout is reserved for JSON so keep stderr quiet
pub const DEFAULT_LOG_LEVEL: &str = "warn";
