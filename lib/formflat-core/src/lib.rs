//! Core types and traits for the formflat marshalling layer.
//!
//! This crate provides the foundational types used by formflat:
//! - [`ParamSet`] - Ordered multi-valued form/query parameter mapping
//! - [`FlattenError`] and [`Result`] - Error handling
//! - [`Flatten`] - Trait for flattening a record into a [`ParamSet`]
//! - [`FormValue`] - Per-kind scalar conversion rules
//! - [`to_form`] and [`to_query_string`] - Encoding helpers

mod encode;
mod error;
mod params;
pub mod prelude;
mod value;

pub use encode::{to_form, to_query_string};
pub use error::{FlattenError, Result};
pub use params::ParamSet;
pub use value::FormValue;

/// Trait for records that can be flattened into form/query parameters.
///
/// This is automatically implemented by the `#[derive(Flatten)]` macro.
///
/// # Example
///
/// ```ignore
/// use formflat::Flatten;
///
/// #[derive(Flatten)]
/// struct CreateCharge {
///     amount: i64,
///     currency: String,
///     #[form(query = "capture,sendzero")]
///     capture: bool,
///     #[form(nested)]
///     card: Card,
/// }
/// ```
pub trait Flatten {
    /// Flatten this record's fields into `params`.
    ///
    /// `parent` is the enclosing scope: when non-empty, every resolved key
    /// is rewritten as `parent[key]`. Top-level callers pass `""`.
    ///
    /// # Errors
    ///
    /// Returns a [`FlattenError`] for a field whose declared type has no
    /// form representation; `params` may then hold a partial result and
    /// must be discarded.
    fn flatten_into(&self, params: &mut ParamSet, parent: &str) -> Result<()>;

    /// Flatten this record into a freshly built [`ParamSet`].
    ///
    /// # Errors
    ///
    /// Returns a [`FlattenError`] for a field whose declared type has no
    /// form representation.
    fn flatten(&self) -> Result<ParamSet> {
        let mut params = ParamSet::new();
        self.flatten_into(&mut params, "")?;
        Ok(params)
    }
}

impl<T: Flatten + ?Sized> Flatten for &T {
    fn flatten_into(&self, params: &mut ParamSet, parent: &str) -> Result<()> {
        (**self).flatten_into(params, parent)
    }
}

impl<T: Flatten + ?Sized> Flatten for Box<T> {
    fn flatten_into(&self, params: &mut ParamSet, parent: &str) -> Result<()> {
        (**self).flatten_into(params, parent)
    }
}
