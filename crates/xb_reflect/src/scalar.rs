use crate::value::{GraphValue, ValueKind, ValueMut, ValueRef};

// -----------------------------------------------------------------------------
// Scalar

/// A value with a canonical single-token text form.
///
/// Scalars carry their whole state in one token: numbers, booleans and
/// characters. [`encode`] produces the token, [`decode`] parses one back,
/// accepting surrounding ASCII whitespace.
///
/// [`encode`]: Scalar::encode
/// [`decode`]: Scalar::decode
pub trait Scalar: GraphValue {
    /// Renders this value as its canonical token.
    fn encode(&self) -> String;

    /// Replaces this value by parsing `text`.
    ///
    /// Leading and trailing whitespace is ignored. On failure the value is
    /// left unchanged.
    fn decode(&mut self, text: &str) -> Result<(), ScalarError>;
}

/// A token failed to parse as the expected scalar shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot parse {text:?} as {shape}")]
pub struct ScalarError {
    /// The scalar shape that was expected, e.g. `"i32"`.
    pub shape: &'static str,
    /// The offending token.
    pub text: String,
}

macro_rules! impl_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl GraphValue for $ty {
                #[inline]
                fn kind(&self) -> ValueKind {
                    ValueKind::Scalar
                }

                #[inline]
                fn value_ref(&self) -> ValueRef<'_> {
                    ValueRef::Scalar(self)
                }

                #[inline]
                fn value_mut(&mut self) -> ValueMut<'_> {
                    ValueMut::Scalar(self)
                }

                #[inline]
                fn as_any(&self) -> &dyn core::any::Any {
                    self
                }

                #[inline]
                fn as_any_mut(&mut self) -> &mut dyn core::any::Any {
                    self
                }

                #[inline]
                fn into_any(self: Box<Self>) -> Box<dyn core::any::Any> {
                    self
                }
            }

            impl Scalar for $ty {
                #[inline]
                fn encode(&self) -> String {
                    self.to_string()
                }

                fn decode(&mut self, text: &str) -> Result<(), ScalarError> {
                    let parsed = text.trim().parse::<$ty>().map_err(|_| ScalarError {
                        shape: stringify!($ty),
                        text: text.to_owned(),
                    })?;
                    *self = parsed;
                    Ok(())
                }
            }
        )*
    };
}

impl_scalar!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_round_trip() {
        let mut n = 0_i32;
        n.decode("-123").unwrap();
        assert_eq!(n, -123);
        assert_eq!(n.encode(), "-123");
    }

    #[test]
    fn decode_trims_whitespace() {
        let mut b = false;
        b.decode("  true\n").unwrap();
        assert!(b);
    }

    #[test]
    fn bad_token_leaves_value_untouched() {
        let mut n = 17_u16;
        let err = n.decode("many").unwrap_err();
        assert_eq!(err.shape, "u16");
        assert_eq!(n, 17);
    }

    #[test]
    fn char_is_a_scalar() {
        let mut c = 'a';
        c.decode("ß").unwrap();
        assert_eq!(c, 'ß');
        assert_eq!(c.encode(), "ß");
    }
}
