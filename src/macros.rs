/// Provides convenience functions to deconstruct an enum with new-type variants.
///
/// Used by [`crate::frame::FrameKind`] and [`crate::record::Record`], both of
/// which are closed tagged unions over per-kind structs.
#[macro_export]
macro_rules! inner_enum {
    // macro variant for when the enum variant and its type are the same ident
    ($ty:ident, $var:ident) => {
        inner_enum!($ty, $var, $var);
    };

    // macro variant for when the enum variant and its type are potentially different
    ($ty:ident, $var:ident, $var_ty:ident) => {
        impl $ty {
            ::paste::paste! {
                #[doc = "Gets whether `" $ty "` is the variant `" $var "`."]
                pub fn [<is_ $var:snake>](&self) -> bool {
                    matches!(self, $ty::$var(_))
                }

                #[doc = "Gets a reference to `" $ty "` as the variant `" $var "`'s inner type `" $var_ty "`."]
                pub fn [<as_ $var:snake>](&self) -> Option<&$var_ty> {
                    match self {
                        $ty::$var(inner) => Some(inner),
                        _ => None,
                    }
                }

                #[doc = "Converts `" $ty "` into the variant `" $var "`'s inner type `" $var_ty "`."]
                pub fn [<into_ $var:snake>](self) -> Option<$var_ty> {
                    match self {
                        $ty::$var(inner) => Some(inner),
                        _ => None,
                    }
                }
            }
        }
    };
}
