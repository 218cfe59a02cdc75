// Version information for the logbook server

/// Version string of the server crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
