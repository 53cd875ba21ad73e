//! Byte-sized element types and the exotically-sized integers used by MIDI.

use crate::prelude::*;

/// Any `Copy` type with a 1-byte representation that converts losslessly into `u8` and `u16`.
///
/// Buffers are generic over their element type, so that callers holding their own byte-backed
/// wrapper (for example a `#[repr(u8)]` enum, or the [`u7`](num/struct.u7.html) type) can view it
/// in place, without a conversion pass.
///
/// This trait is implemented automatically for every type that meets the requirements, so
/// implementing `From<MyByte> for u8` and `From<MyByte> for u16` is all it takes.
/// The size requirement cannot be expressed as a bound, and is instead checked at compile time
/// whenever a view is built over the type.
pub trait ByteSized: Copy + Into<u8> + Into<u16> {
    /// Widen (or reinterpret) this element as a raw byte.
    #[inline]
    fn to_u8(self) -> u8 {
        Into::<u8>::into(self)
    }

    /// Widen this element to 16 bits.
    #[inline]
    fn to_u16(self) -> u16 {
        Into::<u16>::into(self)
    }
}
impl<T: Copy + Into<u8> + Into<u16>> ByteSized for T {}

/// Compile-time check that `T` is stored in a single byte.
pub(crate) struct OneByte<T>(PhantomData<T>);
impl<T> OneByte<T> {
    pub(crate) const CHECK: () = assert!(
        mem::size_of::<T>() == 1,
        "midi buffer elements must be exactly one byte wide"
    );
}

/// Slightly restricted integers.
macro_rules! restricted_int {
    {$(#[$attr:meta])* $name:ident : $inner:tt => $bits:expr} => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Default)]
        #[repr(transparent)]
        #[allow(non_camel_case_types)]
        pub struct $name($inner);
        impl From<$inner> for $name {
            /// Lossy conversion, loses top bits.
            #[inline]
            fn from(raw: $inner) -> $name {
                $name::new(raw)
            }
        }
        impl From<$name> for $inner {
            #[inline]
            fn from(restricted: $name) -> $inner {restricted.0}
        }
        impl fmt::Display for $name {
            #[inline]
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
        impl $name {
            const MASK: $inner = (1 << $bits) - 1;

            /// The maximum value that this restricted integer can hold.
            #[inline]
            pub const fn max_value() -> $name {
                $name (Self::MASK)
            }

            /// Creates a restricted int from its non-restricted counterpart by masking off the
            /// extra bits.
            #[inline]
            pub const fn new(raw: $inner) -> $name {
                $name (raw & Self::MASK)
            }

            /// Returns `Some` if the raw integer is within range of the restricted integer, and
            /// `None` otherwise.
            #[inline]
            pub fn try_from(raw: $inner) -> Option<$name> {
                if raw <= Self::MASK {
                    Some($name(raw))
                } else {
                    None
                }
            }

            /// Get the inner integer out of the wrapper.
            /// The inner integer is guaranteed to be in range of the restricted wrapper.
            #[inline]
            pub fn as_int(self) -> $inner {
                Into::into(self)
            }

            #[allow(dead_code)]
            #[inline]
            pub(crate) fn check_int(raw: $inner) -> StdResult<$name, &'static ErrorKind> {
                Self::try_from(raw).ok_or_else(
                    || err_data!("invalid integer with top bits set")
                )
            }
        }
        impl PartialEq<$inner> for $name {
            fn eq(&self, rhs: &$inner) -> bool {
                self.as_int() == *rhs
            }
        }
        impl PartialOrd<$inner> for $name {
            fn partial_cmp(&self, rhs: &$inner) -> Option<core::cmp::Ordering> {
                Some(self.as_int().cmp(rhs))
            }
        }
        impl PartialEq<$name> for $inner {
            fn eq(&self, rhs: &$name) -> bool {
                *self == rhs.as_int()
            }
        }
    };
}

/// Byte-backed restricted integers can also be used as buffer elements.
macro_rules! widen_to_u16 {
    {$( $name:ident ),*} => {
        $(
            impl From<$name> for u16 {
                #[inline]
                fn from(restricted: $name) -> u16 {
                    restricted.0 as u16
                }
            }
        )*
    }
}

restricted_int! {
    /// A 14-bit integer type.
    ///
    /// Wraps the `u16` type and ensures that the top two bits are always zero.
    u14: u16 => 14
}
restricted_int! {
    /// A 7-bit integer type.
    ///
    /// Wraps the `u8` type and ensures that the top bit is always zero.
    u7: u8 => 7
}
restricted_int! {
    /// A 4-bit integer type.
    ///
    /// Wraps the `u8` type and ensures that the top 4 bits are always zero.
    u4: u8 => 4
}
widen_to_u16! {u7, u4}
