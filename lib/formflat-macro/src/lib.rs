//! Procedural macros for the formflat marshalling layer.
//!
//! This crate provides a single derive macro:
//! - `#[derive(Flatten)]` - Derive macro flattening a struct into form parameters
//!
//! # Example
//!
//! ```ignore
//! use formflat::Flatten;
//!
//! #[derive(Flatten)]
//! struct CreateCharge {
//!     amount: i64,
//!     currency: String,
//!     #[form(nested)]
//!     card: Card,
//! }
//!
//! let params = charge.flatten()?;
//! ```

mod flatten_derive;

use proc_macro::TokenStream;

/// Derive the `Flatten` trait for a struct.
///
/// Each named field becomes one form parameter (or several, for map and
/// nested-record fields). Zero-valued fields are omitted unless marked
/// `sendzero`.
///
/// # Field Attributes
///
/// - `#[form(query = "name,sendzero")]` - Full directive: the export name
///   followed by comma-separated options. Recognized option: `sendzero`.
///   An empty name falls through to the next rule.
/// - `#[form(rename = "name")]` - Export name only, lower priority than
///   the `query` directive. Without either, the lower-cased field
///   identifier is used.
/// - `#[form(sendzero)]` - Emit the field even when its value is zero.
/// - `#[form(nested)]` - The field is a record flattened under `name[...]`.
/// - `#[form(inline)]` - The field is a record flattened into the
///   enclosing scope, without a prefix.
///
/// The export name `-` suppresses the field entirely.
///
/// # Example
///
/// ```ignore
/// use formflat::Flatten;
/// use std::collections::HashMap;
///
/// #[derive(Flatten)]
/// struct CreateCharge {
///     amount: i64,
///     currency: String,
///     #[form(query = "capture,sendzero")]
///     capture: bool,
///     description: Option<String>,
///     metadata: HashMap<String, String>,
///     #[form(nested)]
///     card: Card,
///     #[form(rename = "-")]
///     internal: String,          // never emitted
/// }
/// ```
#[proc_macro_derive(Flatten, attributes(form))]
pub fn derive_flatten(input: TokenStream) -> TokenStream {
    flatten_derive::expand_flatten_derive(input.into())
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
