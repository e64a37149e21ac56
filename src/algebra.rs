use duplicate::duplicate;
use std::borrow::Borrow;

/// Produces the additive identity matching a given value.
///
/// Taking `&self` lets types whose zero depends on runtime data (precision, shape) provide one.
pub trait RefZero<T = Self>: Borrow<T> {
    fn ref_zero(&self) -> T;
}

/// Whether a value is the structural zero of a sparse matrix, i.e. would not be stored.
pub trait IsZero {
    fn is_zero(&self) -> bool;

    fn is_non_zero(&self) -> bool {
        !self.is_zero()
    }
}

impl<T: RefZero + PartialEq> IsZero for T {
    fn is_zero(&self) -> bool {
        self.ref_zero() == *self
    }
}

duplicate! {
    [types zero;
        [f32] [0.0];
        [f64] [0.0];
        [i8] [0];
        [i16] [0];
        [i32] [0];
        [i64] [0];
        [i128] [0];
        [isize] [0];
        [u8] [0];
        [u16] [0];
        [u32] [0];
        [u64] [0];
        [u128] [0];
        [usize] [0];
        ]

    impl RefZero for types{
        fn ref_zero(&self)-> Self{
            zero
        }
    }

    impl RefZero<types> for &types{
        fn ref_zero(&self)-> types{
            zero
        }
    }
}
