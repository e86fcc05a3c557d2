// Receipt Processor - Core Library
// Exposes all modules for use in the CLI, API server, and tests

pub mod config;
pub mod error;
pub mod money;
pub mod points;
pub mod receipt;
pub mod store;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use config::{ConfigError, ServerConfig};
pub use error::{ReceiptError, ValidationError};
pub use money::{Amount, AmountError};
pub use points::{score, PointsBreakdown, PointsEngine};
pub use receipt::{Item, RawItem, RawReceipt, Receipt};
pub use store::{ReceiptId, ReceiptStore};

#[cfg(feature = "server")]
pub use api::{router, AppState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
