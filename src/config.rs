//! Configuration for the gigatile resolution core.
//!
//! Supports command-line arguments via clap, environment variables with the
//! `GIGATILE_` prefix, and sensible defaults for all optional settings.
//!
//! # Environment Variables
//!
//! - `GIGATILE_PREFIX` - Filesystem prefix prepended to request paths
//! - `GIGATILE_PATTERN` - Sequence filename pattern (default: `_pyr_`)
//! - `GIGATILE_CACHE_DESCRIPTORS` - Max descriptors to cache (default: 500)

use clap::Parser;

use crate::image::DEFAULT_DESCRIPTOR_CACHE_CAPACITY;

// =============================================================================
// Default Values
// =============================================================================

/// Default filesystem prefix (resolve relative to the working directory).
pub const DEFAULT_FILESYSTEM_PREFIX: &str = "";

/// Default sequence filename pattern.
pub const DEFAULT_FILENAME_PATTERN: &str = "_pyr_";

// =============================================================================
// CLI Arguments
// =============================================================================

/// gigatile - resolve a tile-request path against the local filesystem.
///
/// Sanitizes the supplied path fragment, probes for a single file or a
/// multi-angle sequence, and reports the detected source metadata.
#[derive(Parser, Debug, Clone)]
#[command(name = "gigatile")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Raw request path fragment (may be percent/plus-encoded).
    pub path: String,

    /// Filesystem prefix prepended to the sanitized path.
    #[arg(long, default_value = DEFAULT_FILESYSTEM_PREFIX, env = "GIGATILE_PREFIX")]
    pub filesystem_prefix: String,

    /// Filename pattern separating a sequence stem from its angle tokens.
    #[arg(long, default_value = DEFAULT_FILENAME_PATTERN, env = "GIGATILE_PATTERN")]
    pub filename_pattern: String,

    /// Maximum number of descriptors to keep in the shared cache.
    #[arg(long, default_value_t = DEFAULT_DESCRIPTOR_CACHE_CAPACITY, env = "GIGATILE_CACHE_DESCRIPTORS")]
    pub cache_descriptors: usize,

    /// Conditional request timestamp to evaluate against the source
    /// (RFC1123, e.g. "Mon, 02 Jan 2006 15:04:05 GMT").
    #[arg(long)]
    pub if_modified_since: Option<String>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.cache_descriptors == 0 {
            return Err("cache_descriptors must be greater than 0".to_string());
        }

        if self.path.is_empty() {
            return Err("a request path is required".to_string());
        }

        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
