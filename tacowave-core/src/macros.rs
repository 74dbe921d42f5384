/// Declares the hyperparameter schema.
///
/// Each entry is `name: Type = default;`, optionally followed by `=> bulk`,
/// `=> derived` or `=> computed`. Doc comments on an entry become the getter's
/// docs and the schema row's description. Generates the `HParams` struct, its
/// getters, compiled-in defaults, name-based read/assign and the `SCHEMA` table.
///
/// `derived` fields get no generated getter; they are given a hand-written one
/// that returns the resolved value.
macro_rules! hparams {
    (@getter [derived] $(#[doc = $doc:literal])* $name:ident : $ty:ty) => {};
    (@getter [$($policy:ident)?] $(#[doc = $doc:literal])* $name:ident : $ty:ty) => {
        $(#[doc = $doc])*
        pub fn $name(&self) -> <$ty as $crate::field::Field>::Ref<'_> {
            $crate::field::Field::get(&self.$name)
        }
    };

    (@render [bulk]) => { $crate::field::Render::Bulk };
    (@render [$($policy:ident)?]) => { $crate::field::Render::Scalar };

    (@origin [derived]) => { $crate::field::Origin::Derived };
    (@origin [computed]) => { $crate::field::Origin::Computed };
    (@origin [$($policy:ident)?]) => { $crate::field::Origin::Input };

    (
        $(
            $(#[doc = $doc:literal])*
            $name:ident : $ty:ty = $default:expr $(=> $policy:ident)?;
        )*
    ) => {
        /// A resolved, validated and immutable hyperparameter set.
        ///
        /// Fields are private; read them through the generated getters or
        /// [`HParams::get`]. A modified configuration is a new value built with
        /// [`HParams::with_overrides`].
        #[derive(Debug, Clone)]
        pub struct HParams {
            $(
                $name: $ty,
            )*
            overrides: $crate::Overrides,
        }

        impl HParams {
            $(
                hparams!(@getter [$($policy)?] $(#[doc = $doc])* $name: $ty);
            )*

            fn compiled_defaults() -> Self {
                Self {
                    $(
                        $name: $default,
                    )*
                    overrides: $crate::Overrides::new(),
                }
            }

            fn field_value(&self, name: &str) -> Option<$crate::Value> {
                match name {
                    $(
                        stringify!($name) => Some($crate::field::Field::to_value(&self.$name)),
                    )*
                    _ => None,
                }
            }

            fn field_values(&self) -> Vec<(&'static str, $crate::Value)> {
                vec![
                    $(
                        (stringify!($name), $crate::field::Field::to_value(&self.$name)),
                    )*
                ]
            }

            fn assign(&mut self, spec: &'static $crate::field::FieldSpec, value: &$crate::Value) -> $crate::Result<()> {
                match spec.name {
                    $(
                        stringify!($name) => store(&mut self.$name, spec.name, value),
                    )*
                    _ => Err($crate::HParamsError::Schema {
                        name: spec.name.to_string(),
                    }),
                }
            }
        }

        pub(crate) static SCHEMA: &[$crate::field::FieldSpec] = &[
            $(
                $crate::field::FieldSpec {
                    name: stringify!($name),
                    kind: <$ty as $crate::field::Field>::kind,
                    render: hparams!(@render [$($policy)?]),
                    origin: hparams!(@origin [$($policy)?]),
                    doc: &[$($doc),*],
                },
            )*
        ];
    };
}
