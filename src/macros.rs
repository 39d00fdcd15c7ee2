//! Macros defining mappable target types.
//!
//! [`record_struct!`] and [`record_enum!`] define a type and derive its
//! mapping descriptors in one step, replacing runtime field discovery
//! with a shape built at first use and cached per type.

/// Define a struct that can be populated from a structured record value.
///
/// The struct is emitted with `Debug`, `Clone`, `Default` and `PartialEq`
/// derives. Every field type must implement [`crate::FromValue`]; nested
/// `record_struct!` types and `record_enum!` types qualify, as do
/// `Option<T>`, `Vec<T>`, `[T; N]` and `VecDeque<T>` of qualifying types.
///
/// ```
/// graph_hydrate::record_struct! {
///     pub struct Greeting {
///         pub message: String,
///         pub recipient: String,
///     }
/// }
/// ```
#[macro_export]
macro_rules! record_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $field_ty:ty
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $field_ty,
            )+
        }

        impl $crate::FromRecord for $name {
            fn shape() -> &'static $crate::StructShape {
                static SHAPE: ::std::sync::OnceLock<$crate::StructShape> =
                    ::std::sync::OnceLock::new();
                SHAPE.get_or_init(|| $crate::StructShape {
                    name: ::std::stringify!($name),
                    construct: || ::std::boxed::Box::new(<$name as ::std::default::Default>::default()),
                    slots: ::std::vec![
                        $(
                            $crate::Slot {
                                name: ::std::stringify!($field),
                                descriptor: <$field_ty as $crate::FromValue>::descriptor(),
                                assign: |instance, converted| {
                                    let ::std::option::Option::Some(instance) =
                                        instance.downcast_mut::<$name>()
                                    else {
                                        return false;
                                    };
                                    match <$field_ty as $crate::FromValue>::from_converted(converted) {
                                        ::std::option::Option::Some(value) => {
                                            instance.$field = value;
                                            true
                                        }
                                        ::std::option::Option::None => false,
                                    }
                                },
                            },
                        )+
                    ],
                })
            }
        }

        impl $crate::FromValue for $name {
            fn descriptor() -> $crate::Descriptor {
                $crate::Descriptor::Struct(<$name as $crate::FromRecord>::shape())
            }

            fn from_converted(
                converted: $crate::Converted,
            ) -> ::std::option::Option<Self> {
                match converted {
                    $crate::Converted::Struct(instance) => {
                        instance.downcast::<$name>().ok().map(|boxed| *boxed)
                    }
                    _ => ::std::option::Option::None,
                }
            }
        }
    };
}

/// Define a unit-variant enum usable as a mapped slot type.
///
/// The first variant is the default. Text input matches variant names
/// case-insensitively; integer input maps by declaration order from 0.
/// Explicit discriminants are deliberately not accepted: the ordinal
/// mapping is positional.
///
/// ```
/// graph_hydrate::record_enum! {
///     pub enum Color { Red, Green, Blue }
/// }
/// ```
#[macro_export]
macro_rules! record_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $first:ident $(, $rest:ident)* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        $vis enum $name {
            #[default]
            $first,
            $($rest,)*
        }

        impl $crate::FromValue for $name {
            fn descriptor() -> $crate::Descriptor {
                static SHAPE: $crate::EnumShape = $crate::EnumShape {
                    name: ::std::stringify!($name),
                    symbols: &[
                        ::std::stringify!($first)
                        $(, ::std::stringify!($rest))*
                    ],
                };
                $crate::Descriptor::Enum(&SHAPE)
            }

            fn from_converted(
                converted: $crate::Converted,
            ) -> ::std::option::Option<Self> {
                match converted {
                    $crate::Converted::Symbol(ordinal) => {
                        const VARIANTS: &[$name] =
                            &[$name::$first $(, $name::$rest)*];
                        VARIANTS.get(ordinal).copied()
                    }
                    _ => ::std::option::Option::None,
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::convert::Converted;
    use crate::{Descriptor, FromRecord, FromValue};

    crate::record_struct! {
        /// A nested address for macro expansion coverage.
        pub struct Address {
            pub street: String,
            pub number: i32,
        }
    }

    crate::record_enum! {
        pub enum Color { Red, Green, Blue }
    }

    #[test]
    fn test_struct_shape_lists_slots_in_declared_order() {
        let shape = Address::shape();
        assert_eq!(shape.name, "Address");
        let names: Vec<&str> = shape.slots.iter().map(|slot| slot.name).collect();
        assert_eq!(names, vec!["street", "number"]);
    }

    #[test]
    fn test_shape_is_cached() {
        assert!(std::ptr::eq(Address::shape(), Address::shape()));
    }

    #[test]
    fn test_assign_rejects_foreign_instance() {
        let shape = Address::shape();
        let mut wrong_instance = 0_i64;
        let assigned = (shape.slots[0].assign)(
            &mut wrong_instance,
            Converted::Text("x".to_string()),
        );
        assert!(!assigned);
    }

    #[test]
    fn test_enum_descriptor_and_ordinals() {
        let Descriptor::Enum(shape) = Color::descriptor() else {
            panic!("expected enum descriptor");
        };
        assert_eq!(shape.symbols, &["Red", "Green", "Blue"]);

        assert_eq!(Color::from_converted(Converted::Symbol(0)), Some(Color::Red));
        assert_eq!(Color::from_converted(Converted::Symbol(2)), Some(Color::Blue));
        assert_eq!(Color::from_converted(Converted::Symbol(3)), None);
        assert_eq!(Color::default(), Color::Red);
    }
}
