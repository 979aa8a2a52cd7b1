mod playground;
pub mod preferences;
pub mod registry;

// Re-export all commands for convenience
pub use playground::*;
pub use preferences::*;
