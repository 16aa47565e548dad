// Presenting problems to the user at the command line

mod present;

// Re-export all public symbols
pub use present::*;
