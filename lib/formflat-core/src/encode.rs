//! Body encoding helpers on top of [`Flatten`].

use bytes::Bytes;

use crate::{Flatten, Result};

/// Flatten a record and encode it as `application/x-www-form-urlencoded`
/// body bytes.
///
/// # Errors
///
/// Returns an error if the record contains an unmappable field.
///
/// # Example
///
/// ```
/// use formflat_core::{Flatten, ParamSet, Result, to_form};
///
/// struct Charge {
///     amount: i64,
/// }
///
/// impl Flatten for Charge {
///     fn flatten_into(&self, params: &mut ParamSet, _parent: &str) -> Result<()> {
///         params.set("amount", self.amount.to_string());
///         Ok(())
///     }
/// }
///
/// let body = to_form(&Charge { amount: 1000 }).expect("encode");
/// assert_eq!(body.as_ref(), b"amount=1000");
/// ```
pub fn to_form<T: Flatten>(value: &T) -> Result<Bytes> {
    to_query_string(value).map(|s| Bytes::from(s.into_bytes()))
}

/// Flatten a record and encode it as a URL query string.
///
/// # Errors
///
/// Returns an error if the record contains an unmappable field.
pub fn to_query_string<T: Flatten>(value: &T) -> Result<String> {
    value.flatten().map(|params| params.to_query_string())
}
