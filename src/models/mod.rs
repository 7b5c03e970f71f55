pub mod card;
pub mod price;
pub mod variant;

pub use card::*;
pub use price::*;
pub use variant::*;

/// Wire form of a field that could not be determined
pub const NOT_AVAILABLE: &str = "not_available";
