/// Sentinel amenity label for "every amenity the project offers"
pub const ALL_AMENITIES: &str = "All Amenities";

/// Tower slug used in configuration ids when the row names no tower
pub const DEFAULT_TOWER_SLUG: &str = "default";

/// Default config file looked up by the CLI in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "listing-ingest.toml";

/// Default directory for JSON reports written by the CLI
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Default directory and file prefix for rolling JSON logs
pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_LOG_FILE_PREFIX: &str = "listing-ingest.log";

/// Default tracing filter directive when RUST_LOG is unset
pub const DEFAULT_LOG_DIRECTIVE: &str = "listing_ingest=info";
