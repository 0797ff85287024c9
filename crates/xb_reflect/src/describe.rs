//! The `describe!` macro, which writes the reflection impls for a
//! user-defined object type.

/// Implements [`Object`] and friends for a struct from a property list.
///
/// The block names the fields the codec may touch; a field left out is
/// invisible to it and keeps whatever `Default` gives it on load. The string
/// after `=` is the type's document [tag](crate::Tagged).
///
/// Markers and variants:
///
/// - `#[secret]` before a field marks it confidential: its stored form is
///   concealed under the formatter's passphrase-derived key.
/// - `hooks` before the type name skips the no-op [`Lifecycle`] impl so the
///   type can provide its own.
///
/// # Examples
///
/// ```
/// use xb_reflect::{describe, ExtraData, Lifecycle, Object};
///
/// #[derive(Default)]
/// struct Login {
///     user: String,
///     password: String,
///     attempts: u32, // not described, never stored
/// }
///
/// describe! {
///     hooks Login = "Login" { user, #[secret] password }
/// }
///
/// impl Lifecycle for Login {
///     fn after_load(&mut self, _extra: &mut ExtraData) {
///         self.attempts = 0;
///     }
/// }
///
/// let login = Login::default();
/// assert_eq!(login.properties().len(), 2);
/// assert!(login.properties()[1].confidential);
/// ```
///
/// [`Object`]: crate::Object
/// [`Lifecycle`]: crate::Lifecycle
#[macro_export]
macro_rules! describe {
    ($ty:ident = $tag:literal { $($(#[$flag:ident])? $field:ident),* $(,)? }) => {
        impl $crate::Lifecycle for $ty {}

        $crate::describe!(@core $ty = $tag { $($(#[$flag])? $field),* });
    };
    (hooks $ty:ident = $tag:literal { $($(#[$flag:ident])? $field:ident),* $(,)? }) => {
        $crate::describe!(@core $ty = $tag { $($(#[$flag])? $field),* });
    };
    (@secret) => {
        false
    };
    (@secret secret) => {
        true
    };
    (@core $ty:ident = $tag:literal { $($(#[$flag:ident])? $field:ident),* }) => {
        impl $crate::Tagged for $ty {
            const TAG: &'static str = $tag;
        }

        impl $crate::GraphValue for $ty {
            fn kind(&self) -> $crate::ValueKind {
                $crate::ValueKind::Object
            }

            fn value_ref(&self) -> $crate::ValueRef<'_> {
                $crate::ValueRef::Object(self)
            }

            fn value_mut(&mut self) -> $crate::ValueMut<'_> {
                $crate::ValueMut::Object(self)
            }

            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn ::core::any::Any {
                self
            }

            fn into_any(
                self: ::std::boxed::Box<Self>,
            ) -> ::std::boxed::Box<dyn ::core::any::Any> {
                self
            }
        }

        impl $crate::Object for $ty {
            fn type_tag(&self) -> &'static str {
                <$ty as $crate::Tagged>::TAG
            }

            fn properties(&self) -> &'static [$crate::PropertySpec] {
                const PROPS: &[$crate::PropertySpec] = &[
                    $(
                        $crate::PropertySpec {
                            name: stringify!($field),
                            confidential: $crate::describe!(@secret $($flag)?),
                        },
                    )*
                ];
                PROPS
            }

            fn property(
                &self,
                name: &str,
            ) -> ::core::option::Option<&dyn $crate::GraphValue> {
                match name {
                    $(stringify!($field) => ::core::option::Option::Some(&self.$field),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn property_mut(
                &mut self,
                name: &str,
            ) -> ::core::option::Option<&mut dyn $crate::GraphValue> {
                match name {
                    $(stringify!($field) => ::core::option::Option::Some(&mut self.$field),)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    };
}
