//! Testing and asserting approximate equality.

use core::iter::zip;

use super::float;

/// Trait for testing approximate equality.
///
/// Two floats are considered approximately equal if their absolute
/// difference is at most some small value, epsilon, scaled by the
/// magnitude of the operands (but never by less than one), so that
/// both tiny and huge values compare sensibly.
pub trait ApproxEq<Other: ?Sized = Self, Epsilon = Self> {
    /// Returns whether `self` and `other` are approximately equal.
    /// Uses the epsilon returned by [`Self::relative_epsilon`].
    fn approx_eq(&self, other: &Other) -> bool {
        self.approx_eq_eps(other, &Self::relative_epsilon())
    }

    /// Returns whether `self` and `other` are approximately equal,
    /// using the relative epsilon `rel_eps`.
    fn approx_eq_eps(&self, other: &Other, rel_eps: &Epsilon) -> bool;

    /// Returns the default relative epsilon of type `E`.
    fn relative_epsilon() -> Epsilon;
}

impl ApproxEq for f32 {
    fn approx_eq_eps(&self, other: &Self, rel_eps: &Self) -> bool {
        let diff = float::abs(self - other);
        diff <= *rel_eps * float::abs(*self).max(1.0)
    }

    fn relative_epsilon() -> Self {
        1e-6
    }
}

impl<E, T: Sized + ApproxEq<T, E>> ApproxEq<Self, E> for [T] {
    fn approx_eq_eps(&self, other: &Self, rel_eps: &E) -> bool {
        self.len() == other.len()
            && zip(self, other).all(|(s, o)| s.approx_eq_eps(o, rel_eps))
    }
    fn relative_epsilon() -> E {
        T::relative_epsilon()
    }
}

impl<E, T: Sized + ApproxEq<T, E>, const N: usize> ApproxEq<Self, E>
    for [T; N]
{
    fn approx_eq_eps(&self, other: &Self, rel_eps: &E) -> bool {
        self.as_slice().approx_eq_eps(other, rel_eps)
    }
    fn relative_epsilon() -> E {
        T::relative_epsilon()
    }
}

/// Asserts that two values are approximately equal.
///
/// Requires that the left operand has an applicable [`ApproxEq`] impl
/// and that both operands impl `Debug` unless a custom message is given.
///
/// # Panics
/// If the given values are not approximately equal.
///
/// # Examples
/// `assert_eq` would fail, but `assert_approx_eq` passes:
/// ```
/// # use geosphere_core::assert_approx_eq;
/// assert_ne!(0.1_f32 + 0.2, 0.3);
/// assert_approx_eq!(0.1_f32 + 0.2, 0.3);
/// ```
/// A custom epsilon can be given:
/// ```
/// # use geosphere_core::assert_approx_eq;
/// assert_approx_eq!(100.0_f32, 101.0, eps = 0.01);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($a:expr, $b:expr) => {
        match (&$a, &$b) {
            (a, b) => $crate::assert_approx_eq!(
                *a, *b,
                "assertion failed: `{a:?} ≅ {b:?}`"
            )
        }
    };
    ($a:expr, $b:expr, eps = $eps:literal) => {
        match (&$a, &$b) {
            (a, b) => $crate::assert_approx_eq!(
                *a, *b, eps = $eps,
                "assertion failed: `{a:?} ≅ {b:?}`"
            )
        }
    };
    ($a:expr, $b:expr, $fmt:literal $(, $args:expr)*) => {{
        use $crate::math::approx::ApproxEq;
        match (&$a, &$b) {
            (a, b) => assert!(ApproxEq::approx_eq(a, b), $fmt $(, $args)*)
        }
    }};
    ($a:expr, $b:expr, eps = $eps:literal, $fmt:literal $(, $args:expr)*) => {{
        use $crate::math::approx::ApproxEq;
        match (&$a, &$b) {
            (a, b) => assert!(
                ApproxEq::approx_eq_eps(a, b, &$eps),
                $fmt $(, $args)*
            )
        }
    }};
}

#[cfg(test)]
mod tests {
    use core::f32::consts::PI;

    use super::float::sin;

    #[test]
    fn tiny_differences_near_zero() {
        assert_approx_eq!(-0.0_f32, 0.0);
        assert_approx_eq!(sin(PI), 0.0);
        assert_approx_eq!(1e-7_f32, -1e-7);
    }

    #[test]
    fn scaled_by_magnitude() {
        assert_approx_eq!(20_480.0_f32, 20_480.01);
        assert_approx_eq!(-3.0e8_f32, -3.0000002e8);
    }

    #[test]
    fn explicit_epsilon() {
        assert_approx_eq!(0.5_f32, 0.504, eps = 0.01);
        assert_approx_eq!([0.0_f32, 1.0, 0.0], [0.001, 0.999, 0.0], eps = 0.01);
    }

    #[test]
    #[should_panic]
    fn default_epsilon_is_tight() {
        assert_approx_eq!(1.0_f32, 1.00001);
    }

    #[test]
    #[should_panic]
    fn nan_is_never_approx_eq() {
        assert_approx_eq!(f32::NAN, f32::NAN);
    }
}
