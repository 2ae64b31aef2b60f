//! Declarative helper for component kinds.

/// Declare a component kind together with its closed property key set.
///
/// Generates a marker struct implementing [`ComponentKind`] and a key enum
/// implementing [`PropertyKey`], where each variant name is the property name
/// seen by the native class and maps to its declared [`PropertyType`].
///
/// # Example
///
/// ```rust
/// use lorenzett_core::declare_component;
/// use lorenzett_core::component::{ComponentKind, PropertyKey};
/// use lorenzett_core::property::PropertyType;
///
/// declare_component! {
///     pub struct CellDumper: "CellDumper";
///
///     pub enum CellDumperKey {
///         CellsKey => PropertyType::String,
///         OutputLevel => PropertyType::Level,
///     }
/// }
///
/// assert_eq!(CellDumper::CLASS_NAME, "CellDumper");
/// assert_eq!(CellDumperKey::parse("CellsKey"), Some(CellDumperKey::CellsKey));
/// ```
///
/// [`ComponentKind`]: crate::component::ComponentKind
/// [`PropertyKey`]: crate::component::PropertyKey
/// [`PropertyType`]: crate::property::PropertyType
#[macro_export]
macro_rules! declare_component {
    (
        $(#[$kind_meta:meta])*
        $vis:vis struct $kind:ident : $class:literal;

        $(#[$key_meta:meta])*
        $key_vis:vis enum $key:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $ty:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$kind_meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis struct $kind;

        $(#[$key_meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        $key_vis enum $key {
            $(
                $(#[$variant_meta])*
                $variant
            ),+
        }

        impl $crate::component::PropertyKey for $key {
            const ALL: &'static [Self] = &[$($key::$variant),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $($key::$variant => stringify!($variant)),+
                }
            }

            fn property_type(&self) -> $crate::property::PropertyType {
                match self {
                    $($key::$variant => $ty),+
                }
            }
        }

        impl ::std::fmt::Display for $key {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::component::PropertyKey::as_str(self))
            }
        }

        impl $crate::component::ComponentKind for $kind {
            const CLASS_NAME: &'static str = $class;
            type Key = $key;
        }
    };
}
