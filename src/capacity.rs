use core::fmt::{Debug, Display};
use core::iter::Sum;
use core::ops::{Add, AddAssign, Sub, SubAssign};
use core::str::FromStr;

use num_traits::{Bounded, CheckedAdd, CheckedSub, Zero};

/// A trait representing an edge capacity (and flow) type which is always an integer.
pub trait Capacity:
    Copy
    + Sum<Self>
    + Add<Output = Self>
    + Sub<Output = Self>
    + Ord
    + AddAssign
    + SubAssign
    + Zero
    + Bounded
    + CheckedAdd
    + CheckedSub
    + FromStr
    + Debug
    + Display
    + Default
{
    fn is_negative(&self) -> bool {
        *self < Self::zero()
    }
}

impl Capacity for i32 {}

impl Capacity for i64 {}

impl Capacity for u32 {}

impl Capacity for u64 {}
