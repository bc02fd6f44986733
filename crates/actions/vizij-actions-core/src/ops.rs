//! Operator sugar over [`ToAction`].
//!
//! | operator | meaning                 | named form         |
//! |----------|-------------------------|--------------------|
//! | `a + b`  | `Sequence[a, b]`        | `a.then(&b)`       |
//! | `a & b`  | `Group[a, b]`           | `a.with(&b)`       |
//! | `a * n`, `n * a` | repeat `a` `n` times | `a.repeated(n)` |
//! | `-a`     | `a.reversed()`          | `a.reversed()`     |
//!
//! `+` and `&` are left-associative: `a + b + c` is `Sequence[Sequence[a, b], c]`.

use std::ops::{Add, BitAnd, Mul, Neg};

use crate::action::Action;
use crate::composite::{Group, Repeat, Sequence};
use crate::error::Result;
use crate::runnable::{Runnable, ToAction};

macro_rules! impl_action_ops {
    ($($ty:ty),* $(,)?) => {$(
        impl<R: ToAction> Add<R> for $ty {
            type Output = Runnable;
            fn add(self, rhs: R) -> Runnable {
                Sequence::from_actions(vec![self.to_action(), rhs.to_action()]).into()
            }
        }

        impl<R: ToAction> BitAnd<R> for $ty {
            type Output = Runnable;
            fn bitand(self, rhs: R) -> Runnable {
                Group::from_actions(vec![self.to_action(), rhs.to_action()]).into()
            }
        }

        impl Mul<u32> for $ty {
            type Output = Runnable;
            fn mul(self, n: u32) -> Runnable {
                Repeat::times(n, vec![self.to_action()]).into()
            }
        }

        impl Mul<$ty> for u32 {
            type Output = Runnable;
            fn mul(self, rhs: $ty) -> Runnable {
                rhs * self
            }
        }

        impl Neg for $ty {
            type Output = Result<Action>;
            fn neg(self) -> Result<Action> {
                self.to_action().reversed()
            }
        }
    )*};
}

impl_action_ops!(Runnable, Action, Sequence, Group, Repeat);
