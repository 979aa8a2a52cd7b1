mod general;
mod hub_token;

// Re-export all commands
pub use general::*;
pub use hub_token::*;
