use std::ops::{Add, BitAnd, BitOr};

/// Associative reduction used to merge two neighbouring aggregates.
///
/// `left` always covers the indices immediately before `right`, so the
/// operator does not have to be commutative.
pub trait Operator<T> {
    fn combine(&self, left: &T, right: &T) -> T;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Min;

impl<T: PartialOrd + Clone> Operator<T> for Min {
    fn combine(&self, left: &T, right: &T) -> T {
        if right < left {
            right.clone()
        } else {
            left.clone()
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Max;

impl<T: PartialOrd + Clone> Operator<T> for Max {
    fn combine(&self, left: &T, right: &T) -> T {
        if right > left {
            right.clone()
        } else {
            left.clone()
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sum;

impl<T: Add<Output = T> + Clone> Operator<T> for Sum {
    fn combine(&self, left: &T, right: &T) -> T {
        left.clone() + right.clone()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BitwiseAnd;

impl<T: BitAnd<Output = T> + Clone> Operator<T> for BitwiseAnd {
    fn combine(&self, left: &T, right: &T) -> T {
        left.clone() & right.clone()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BitwiseOr;

impl<T: BitOr<Output = T> + Clone> Operator<T> for BitwiseOr {
    fn combine(&self, left: &T, right: &T) -> T {
        left.clone() | right.clone()
    }
}

/// Greatest common divisor, for types that implement [`Euclid`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Gcd;

pub trait Euclid: Copy {
    fn gcd(self, other: Self) -> Self;
}

macro_rules! impl_euclid {
    ($($t:ty),*) => {
        $(
            impl Euclid for $t {
                fn gcd(self, other: Self) -> Self {
                    let (mut a, mut b) = (self, other);
                    while b != 0 {
                        let r = a % b;
                        a = b;
                        b = r;
                    }
                    a
                }
            }
        )*
    };
}

impl_euclid!(u8, u16, u32, u64, u128, usize);

impl<T: Euclid> Operator<T> for Gcd {
    fn combine(&self, left: &T, right: &T) -> T {
        left.gcd(*right)
    }
}

/// Wraps a closure so it can be used as an [`Operator`].
#[derive(Clone, Copy, Debug)]
pub struct FromFn<F>(pub F);

pub fn from_fn<T, F>(f: F) -> FromFn<F>
where
    F: Fn(&T, &T) -> T,
{
    FromFn(f)
}

impl<T, F> Operator<T> for FromFn<F>
where
    F: Fn(&T, &T) -> T,
{
    fn combine(&self, left: &T, right: &T) -> T {
        (self.0)(left, right)
    }
}
