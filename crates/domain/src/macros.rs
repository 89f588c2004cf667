//! Macro for implementing string conversions for wire enums
//!
//! Query parameters such as the statement `format` or the transaction `type`
//! filter travel as lowercase strings. This macro provides `as_str`,
//! `Display` and case-insensitive `FromStr` from a single mapping.
//!
//! # Example
//!
//! ```rust
//! use sigma_domain::impl_wire_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Direction {
//!     Incoming,
//!     Outgoing,
//! }
//!
//! impl_wire_enum_conversions!(Direction {
//!     Incoming => "incoming",
//!     Outgoing => "outgoing",
//! });
//!
//! assert_eq!(Direction::Incoming.as_str(), "incoming");
//! assert_eq!("OUTGOING".parse::<Direction>().unwrap(), Direction::Outgoing);
//! ```

/// Implements `as_str`, `Display` and `FromStr` for wire enums
///
/// - `as_str`/`Display`: the mapped lowercase string
/// - `FromStr`: case-insensitive, errors name the enum and the rejected input
#[macro_export]
macro_rules! impl_wire_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl $enum_name {
            /// Wire representation of this variant.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
