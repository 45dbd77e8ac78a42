use num_traits::{FromPrimitive, PrimInt, Unsigned};
use std::fmt::Debug;

/// A trait for unsigned integer types the digit utilities operate on.
/// Must support integer arithmetic, debug printing, and conversion from
/// small literals.
pub trait Operand: PrimInt + Unsigned + FromPrimitive + Debug + 'static {}

impl<T: PrimInt + Unsigned + FromPrimitive + Debug + 'static> Operand for T {}
