//! Form-parameter marshalling for the Clearholt payment-gateway client.
//!
//! Flatten typed request records into URL-encoded form parameters with a
//! derive macro, and share a TLS transport pinned to the gateway's
//! certificate bundle.
//!
//! # Example
//!
//! ```
//! use formflat::Flatten;
//!
//! #[derive(Flatten)]
//! struct CreateCharge {
//!     amount: i64,
//!     currency: String,
//!     description: Option<String>,
//! }
//!
//! let charge = CreateCharge {
//!     amount: 1000,
//!     currency: "thb".to_string(),
//!     description: None,
//! };
//!
//! let params = charge.flatten().expect("flatten");
//! assert_eq!(params.to_query_string(), "amount=1000&currency=thb");
//! ```

pub mod prelude;
pub mod transport;

// Re-export core types
pub use formflat_core::{
    Flatten, FlattenError, FormValue, ParamSet, Result, to_form, to_query_string,
};

// Re-export macros
pub use formflat_macro::Flatten;
