//! Operands accepted by the float destination operations.

use std::borrow::Cow;

use crate::BigFloat;

/// One operand of a float operation: another float or a native `u64`.
///
/// Every `set_*` operation on [`BigFloat`] takes `impl Into<Operand>` in
/// each position, so a single signature covers float-float, float-native
/// and native-float calls.
#[derive(Clone, Copy, Debug)]
pub enum Operand<'a> {
    /// A borrowed float.
    Float(&'a BigFloat),
    /// A native unsigned integer, taken exactly.
    Unsigned(u64),
}

impl Operand<'_> {
    /// The operand as an exact float.
    pub(crate) fn as_float(&self) -> Cow<'_, BigFloat> {
        match *self {
            Operand::Float(x) => Cow::Borrowed(x),
            Operand::Unsigned(v) => Cow::Owned(BigFloat::exact_u64(v)),
        }
    }

    pub(crate) fn is_zero(&self) -> bool {
        match *self {
            Operand::Float(x) => x.is_zero(),
            Operand::Unsigned(v) => v == 0,
        }
    }
}

impl<'a> From<&'a BigFloat> for Operand<'a> {
    fn from(x: &'a BigFloat) -> Self {
        Operand::Float(x)
    }
}

impl From<u64> for Operand<'_> {
    fn from(v: u64) -> Self {
        Operand::Unsigned(v)
    }
}

impl From<u32> for Operand<'_> {
    fn from(v: u32) -> Self {
        Operand::Unsigned(u64::from(v))
    }
}
