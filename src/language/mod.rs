// Types representing wiki pages going in and the org-mode outline coming out

mod error;
mod outline;
mod types;
mod wiki;

// Re-export all public symbols
pub use error::*;
pub use outline::*;
pub use types::*;
pub use wiki::*;
