//! Per-kind value conversion for scalar form fields.

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};

/// Conversion rules for a scalar field kind.
///
/// Each supported kind declares its own zero predicate and its text
/// rendering, rather than relying on generic equality against a default
/// value. Zero-valued fields are normally omitted from the output unless
/// the field carries a force-include directive.
pub trait FormValue {
    /// Whether the value is the kind's zero value.
    fn is_zero(&self) -> bool;

    /// Render the value as form parameter text.
    ///
    /// An empty string is never written to the output, even under a
    /// force-include directive.
    fn render(&self) -> String;
}

impl FormValue for bool {
    fn is_zero(&self) -> bool {
        !self
    }

    fn render(&self) -> String {
        self.to_string()
    }
}

macro_rules! impl_form_value_int {
    ($($ty:ty),*) => {
        $(
            impl FormValue for $ty {
                fn is_zero(&self) -> bool {
                    *self == 0
                }

                fn render(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_form_value_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! impl_form_value_float {
    ($($ty:ty),*) => {
        $(
            impl FormValue for $ty {
                #[allow(clippy::float_cmp)]
                fn is_zero(&self) -> bool {
                    *self == 0.0
                }

                fn render(&self) -> String {
                    // fixed-point, 4 digits after the decimal point
                    format!("{self:.4}")
                }
            }
        )*
    };
}

impl_form_value_float!(f32, f64);

impl FormValue for String {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn render(&self) -> String {
        self.clone()
    }
}

/// Timestamps use the Unix epoch as their zero value and render in
/// RFC 3339 form with nanosecond precision and an explicit offset.
/// The zero timestamp renders empty so it is suppressed even when the
/// field is force-included.
impl<Tz: TimeZone> FormValue for DateTime<Tz>
where
    Tz::Offset: std::fmt::Display,
{
    fn is_zero(&self) -> bool {
        *self == DateTime::<Utc>::UNIX_EPOCH
    }

    fn render(&self) -> String {
        if self.is_zero() {
            String::new()
        } else {
            self.to_rfc3339_opts(SecondsFormat::Nanos, true)
        }
    }
}
