//! Target descriptors: the static shape of a destination type.
//!
//! A [`Descriptor`] tells the dispatcher what a destination slot accepts:
//! a scalar kind, an enum symbol set, a nullable wrapper, a sequence of
//! element descriptors, or a struct with named writable slots. Shapes are
//! derived from Rust types through [`FromValue`] and [`FromRecord`], once
//! per type, instead of being re-discovered per call.
//!
//! Struct shapes erase the concrete type behind `dyn Any` so that one
//! binder implementation serves every target type; the per-field
//! assigners generated by [`crate::record_struct!`] restore the types at
//! the edges.

use std::any::Any;
use std::collections::VecDeque;
use std::fmt;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::convert::Converted;
use crate::temporal::Timestamp;

/// Static description of what a destination slot accepts.
#[derive(Debug)]
pub enum Descriptor {
    /// Unwraps to the inner descriptor; absent or null input leaves the
    /// slot unset rather than failing.
    Nullable(Box<Descriptor>),

    /// A scalar of the given kind.
    Scalar(ScalarKind),

    /// One of a fixed set of symbols.
    Enum(&'static EnumShape),

    /// An ordered sequence of elements sharing one descriptor.
    Sequence {
        element: Box<Descriptor>,
        shape: SequenceShape,
    },

    /// A complex type with named writable slots.
    Struct(&'static StructShape),
}

/// Primitive kinds a scalar slot can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Bool,
    Integer,
    Float,
    Decimal,
    Text,
    Uuid,
    Timestamp,
}

/// How a converted sequence is reassembled into its destination type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceShape {
    /// Fixed-size array of exactly this many elements.
    Fixed(usize),

    /// Growable sequence (`Vec`), any length.
    Growable,

    /// Custom sequence built from its default by appending in order.
    Extendable,
}

/// Symbol set of an enum target, in declaration order.
#[derive(Debug, PartialEq, Eq)]
pub struct EnumShape {
    /// Type name, for logs.
    pub name: &'static str,

    /// Symbols in declaration order. Ordinal mapping is by position.
    pub symbols: &'static [&'static str],
}

impl EnumShape {
    /// Find the ordinal of a symbol by case-insensitive name.
    pub fn ordinal_of(&self, text: &str) -> Option<usize> {
        self.symbols
            .iter()
            .position(|symbol| symbol.eq_ignore_ascii_case(text))
    }
}

/// Shape of a complex target type: named writable slots plus a way to
/// produce a default-initialized instance.
pub struct StructShape {
    /// Type name, for logs and errors.
    pub name: &'static str,

    /// Produce a default-initialized boxed instance to populate.
    pub construct: fn() -> Box<dyn Any>,

    /// Writable slots in declaration order.
    pub slots: Vec<Slot>,
}

/// One named writable slot of a struct target.
pub struct Slot {
    /// Field name as declared. Input field names match case-insensitively.
    pub name: &'static str,

    /// Shape of the value this slot accepts.
    pub descriptor: Descriptor,

    /// Write a converted value into this slot of an erased instance.
    /// Returns whether the write happened.
    pub assign: fn(&mut dyn Any, Converted) -> bool,
}

impl fmt::Debug for StructShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructShape")
            .field("name", &self.name)
            .field("slots", &self.slots)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("name", &self.name)
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

/// A type usable as a slot of a mapped struct.
///
/// Implementations describe their shape for the dispatcher and absorb a
/// [`Converted`] outcome into a concrete value. Returning `None` means
/// "no value": the slot keeps its default. Implementations for user
/// types are generated by [`crate::record_struct!`] and
/// [`crate::record_enum!`].
pub trait FromValue: Sized + 'static {
    /// The shape this type accepts.
    fn descriptor() -> Descriptor;

    /// Absorb a conversion outcome into a concrete value.
    fn from_converted(converted: Converted) -> Option<Self>;
}

/// A complex target type that can be populated from a structured record.
///
/// The shape is built on first use and cached for the lifetime of the
/// process. Implemented by [`crate::record_struct!`].
pub trait FromRecord: Default + FromValue {
    /// The cached shape of this type.
    fn shape() -> &'static StructShape;
}

impl FromValue for bool {
    fn descriptor() -> Descriptor {
        Descriptor::Scalar(ScalarKind::Bool)
    }

    fn from_converted(converted: Converted) -> Option<Self> {
        match converted {
            Converted::Bool(value) => Some(value),
            _ => None,
        }
    }
}

// Integer widths all share the Integer scalar kind; narrowing from the
// converter's i64 fails to "no value" on overflow.
macro_rules! integer_from_value {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl FromValue for $ty {
                fn descriptor() -> Descriptor {
                    Descriptor::Scalar(ScalarKind::Integer)
                }

                fn from_converted(converted: Converted) -> Option<Self> {
                    match converted {
                        Converted::Integer(value) => <$ty>::try_from(value).ok(),
                        _ => None,
                    }
                }
            }
        )+
    };
}

integer_from_value!(i8, i16, i32, i64, u8, u16, u32, u64);

impl FromValue for f64 {
    fn descriptor() -> Descriptor {
        Descriptor::Scalar(ScalarKind::Float)
    }

    fn from_converted(converted: Converted) -> Option<Self> {
        match converted {
            Converted::Float(value) => Some(value),
            _ => None,
        }
    }
}

impl FromValue for f32 {
    fn descriptor() -> Descriptor {
        Descriptor::Scalar(ScalarKind::Float)
    }

    fn from_converted(converted: Converted) -> Option<Self> {
        match converted {
            Converted::Float(value) => Some(value as f32),
            _ => None,
        }
    }
}

impl FromValue for Decimal {
    fn descriptor() -> Descriptor {
        Descriptor::Scalar(ScalarKind::Decimal)
    }

    fn from_converted(converted: Converted) -> Option<Self> {
        match converted {
            Converted::Decimal(value) => Some(value),
            _ => None,
        }
    }
}

impl FromValue for String {
    fn descriptor() -> Descriptor {
        Descriptor::Scalar(ScalarKind::Text)
    }

    fn from_converted(converted: Converted) -> Option<Self> {
        match converted {
            Converted::Text(value) => Some(value),
            _ => None,
        }
    }
}

impl FromValue for Uuid {
    fn descriptor() -> Descriptor {
        Descriptor::Scalar(ScalarKind::Uuid)
    }

    fn from_converted(converted: Converted) -> Option<Self> {
        match converted {
            Converted::Uuid(value) => Some(value),
            _ => None,
        }
    }
}

impl FromValue for Timestamp {
    fn descriptor() -> Descriptor {
        Descriptor::Scalar(ScalarKind::Timestamp)
    }

    fn from_converted(converted: Converted) -> Option<Self> {
        match converted {
            Converted::Timestamp(value) => Some(value),
            _ => None,
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn descriptor() -> Descriptor {
        Descriptor::Nullable(Box::new(T::descriptor()))
    }

    fn from_converted(converted: Converted) -> Option<Self> {
        T::from_converted(converted).map(Some)
    }
}

impl<T: FromValue + Default> FromValue for Vec<T> {
    fn descriptor() -> Descriptor {
        Descriptor::Sequence {
            element: Box::new(T::descriptor()),
            shape: SequenceShape::Growable,
        }
    }

    fn from_converted(converted: Converted) -> Option<Self> {
        match converted {
            Converted::Sequence(items) => Some(reassemble(items).collect()),
            _ => None,
        }
    }
}

impl<T: FromValue + Default, const N: usize> FromValue for [T; N] {
    fn descriptor() -> Descriptor {
        Descriptor::Sequence {
            element: Box::new(T::descriptor()),
            shape: SequenceShape::Fixed(N),
        }
    }

    fn from_converted(converted: Converted) -> Option<Self> {
        match converted {
            // The element count must match exactly; a mismatched input
            // leaves the slot at its default.
            Converted::Sequence(items) if items.len() == N => {
                let elements: Vec<T> = reassemble(items).collect();
                elements.try_into().ok()
            }
            _ => None,
        }
    }
}

impl<T: FromValue + Default> FromValue for VecDeque<T> {
    fn descriptor() -> Descriptor {
        Descriptor::Sequence {
            element: Box::new(T::descriptor()),
            shape: SequenceShape::Extendable,
        }
    }

    fn from_converted(converted: Converted) -> Option<Self> {
        match converted {
            Converted::Sequence(items) => {
                let mut sequence = VecDeque::default();
                for element in reassemble(items) {
                    sequence.push_back(element);
                }
                Some(sequence)
            }
            _ => None,
        }
    }
}

/// Absorb converted sequence elements in input order. A failed element
/// becomes the element type's default, so output length always equals
/// input length.
fn reassemble<T: FromValue + Default>(
    items: Vec<Option<Converted>>,
) -> impl Iterator<Item = T> {
    items
        .into_iter()
        .map(|item| item.and_then(T::from_converted).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_descriptors() {
        assert!(matches!(
            i32::descriptor(),
            Descriptor::Scalar(ScalarKind::Integer)
        ));
        assert!(matches!(
            String::descriptor(),
            Descriptor::Scalar(ScalarKind::Text)
        ));
        assert!(matches!(
            Timestamp::descriptor(),
            Descriptor::Scalar(ScalarKind::Timestamp)
        ));
    }

    #[test]
    fn test_nullable_descriptor_wraps_inner() {
        let descriptor = <Option<i64>>::descriptor();
        let Descriptor::Nullable(inner) = descriptor else {
            panic!("expected nullable descriptor");
        };
        assert!(matches!(*inner, Descriptor::Scalar(ScalarKind::Integer)));
    }

    #[test]
    fn test_sequence_shapes() {
        assert!(matches!(
            <Vec<String>>::descriptor(),
            Descriptor::Sequence {
                shape: SequenceShape::Growable,
                ..
            }
        ));
        assert!(matches!(
            <[i64; 3]>::descriptor(),
            Descriptor::Sequence {
                shape: SequenceShape::Fixed(3),
                ..
            }
        ));
        assert!(matches!(
            <VecDeque<bool>>::descriptor(),
            Descriptor::Sequence {
                shape: SequenceShape::Extendable,
                ..
            }
        ));
    }

    #[test]
    fn test_integer_narrowing() {
        assert_eq!(i32::from_converted(Converted::Integer(42)), Some(42));
        assert_eq!(i8::from_converted(Converted::Integer(1000)), None);
        assert_eq!(u32::from_converted(Converted::Integer(-1)), None);
        assert_eq!(
            u64::from_converted(Converted::Integer(i64::MAX)),
            Some(i64::MAX as u64)
        );
    }

    #[test]
    fn test_sequence_failed_elements_become_defaults() {
        let items = vec![
            Some(Converted::Integer(1)),
            None,
            Some(Converted::Integer(3)),
        ];
        assert_eq!(<Vec<i64>>::from_converted(Converted::Sequence(items)), Some(vec![1, 0, 3]));
    }

    #[test]
    fn test_fixed_array_length_mismatch() {
        let items = vec![Some(Converted::Integer(1)), Some(Converted::Integer(2))];
        assert_eq!(<[i64; 3]>::from_converted(Converted::Sequence(items)), None);

        let items = vec![
            Some(Converted::Integer(1)),
            Some(Converted::Integer(2)),
            Some(Converted::Integer(3)),
        ];
        assert_eq!(
            <[i64; 3]>::from_converted(Converted::Sequence(items)),
            Some([1, 2, 3])
        );
    }

    #[test]
    fn test_enum_shape_symbol_lookup() {
        static SHAPE: EnumShape = EnumShape {
            name: "Color",
            symbols: &["Red", "Green", "Blue"],
        };
        assert_eq!(SHAPE.ordinal_of("green"), Some(1));
        assert_eq!(SHAPE.ordinal_of("GREEN"), Some(1));
        assert_eq!(SHAPE.ordinal_of("purple"), None);
    }
}
