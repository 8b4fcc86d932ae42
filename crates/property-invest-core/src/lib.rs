pub mod error;
pub mod investment;
pub mod mortgage;
pub mod types;

pub use error::PropertyInvestError;
pub use types::*;

/// Standard result type for all property-invest operations
pub type PropertyInvestResult<T> = Result<T, PropertyInvestError>;
