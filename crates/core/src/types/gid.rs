//! Newtype global ids for type-safe platform references.
//!
//! Shopify identifies every resource with a global id of the form
//! `gid://shopify/<Kind>/<number>`. Use the `define_gid!` macro to create
//! wrappers that keep ids of different resource kinds apart, and that know how
//! to recover the trailing numeric id the AJAX APIs expect.

use thiserror::Error;

/// Errors that can occur when parsing a global id from user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GidError {
    /// The input string is empty.
    #[error("id cannot be empty")]
    Empty,
    /// The input is a global id for another resource kind.
    #[error("expected a {expected} id, got '{input}'")]
    WrongKind {
        /// Resource kind the caller asked for.
        expected: &'static str,
        /// The rejected input.
        input: String,
    },
    /// The input is neither a number nor a global id.
    #[error("malformed id '{0}'")]
    Malformed(String),
}

/// Extract the trailing numeric identifier of an id.
///
/// Everything up to the last run of ASCII digits is treated as namespace and
/// discarded: `gid://shopify/ProductVariant/45034835116228` yields
/// `45034835116228`. Returns `None` when the id does not end in digits or the
/// digits overflow a `u64`.
///
/// ```
/// use stepcart_core::types::gid::trailing_numeric_id;
///
/// assert_eq!(trailing_numeric_id("gid://shopify/ProductVariant/42"), Some(42));
/// assert_eq!(trailing_numeric_id("42"), Some(42));
/// assert_eq!(trailing_numeric_id("gid://shopify/ProductVariant/"), None);
/// ```
#[must_use]
pub fn trailing_numeric_id(raw: &str) -> Option<u64> {
    let namespace = raw.trim_end_matches(|c: char| c.is_ascii_digit());
    let digits = raw.get(namespace.len()..)?;
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Macro to define a type-safe global id wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Constructors: `new()`, `from_numeric()`, `parse()`
/// - Accessors: `as_str()`, `numeric_id()`, `into_inner()`
///
/// # Example
///
/// ```rust
/// # use stepcart_core::define_gid;
/// define_gid!(OrderId, "Order");
///
/// let order = OrderId::from_numeric(1001);
/// assert_eq!(order.as_str(), "gid://shopify/Order/1001");
/// assert_eq!(order.numeric_id(), Some(1001));
/// ```
#[macro_export]
macro_rules! define_gid {
    ($name:ident, $kind:literal) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Resource kind as it appears in the global id path.
            pub const KIND: &'static str = $kind;

            /// Wrap an id exactly as received from the platform.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Build the global id for a numeric resource id.
            #[must_use]
            pub fn from_numeric(id: u64) -> Self {
                Self(format!("gid://shopify/{}/{id}", $kind))
            }

            /// Parse user input that is either a bare number or a global id of
            /// this resource kind.
            ///
            /// # Errors
            ///
            /// Returns a `GidError` for empty input, a global id of another
            /// kind, or anything else that is not an id.
            pub fn parse(input: &str) -> ::core::result::Result<Self, $crate::types::gid::GidError> {
                let input = input.trim();
                if input.is_empty() {
                    return Err($crate::types::gid::GidError::Empty);
                }
                if let Ok(numeric) = input.parse::<u64>() {
                    return Ok(Self::from_numeric(numeric));
                }
                let Some(path) = input.strip_prefix("gid://shopify/") else {
                    return Err($crate::types::gid::GidError::Malformed(input.to_string()));
                };
                match path.split_once('/') {
                    Some((kind, rest)) if kind == $kind && !rest.is_empty() => {
                        Ok(Self(input.to_string()))
                    }
                    Some(_) => Err($crate::types::gid::GidError::WrongKind {
                        expected: $kind,
                        input: input.to_string(),
                    }),
                    None => Err($crate::types::gid::GidError::Malformed(input.to_string())),
                }
            }

            /// Get the id as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Get the trailing numeric id, if the id ends in one.
            #[must_use]
            pub fn numeric_id(&self) -> Option<u64> {
                $crate::types::gid::trailing_numeric_id(&self.0)
            }

            /// Consume the wrapper and return the raw id.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_gid!(ProductId, "Product");
define_gid!(VariantId, "ProductVariant");
define_gid!(PageId, "Page");
