//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions
//! for easy glob importing:
//!
//! ```ignore
//! use formflat_core::prelude::*;
//! ```

pub use crate::{Flatten, FlattenError, FormValue, ParamSet, Result, to_form, to_query_string};
