//! Configuration and path management
//!
//! - `paths`: resolution of the itemvault base directory (settings file,
//!   journal file)
//! - `settings`: persisted user settings (source/destination directories,
//!   retention limit, archive prefix, log level)

pub mod paths;
pub mod settings;

pub use paths::VaultPaths;
pub use settings::Settings;
