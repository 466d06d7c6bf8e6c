use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

pub trait Div {
    fn div_floor(&self, other: &Self) -> Self;
    /// Division rounded to the nearest integer, ties away from zero.
    fn div_round(&self, other: &Self) -> Self;
}

impl Div for BigInt {
    fn div_floor(&self, other: &Self) -> Self {
        Integer::div_floor(self, other)
    }

    fn div_round(&self, other: &Self) -> Self {
        let (quo, rem) = self.div_rem(other);
        if rem.is_zero() {
            return quo;
        }
        let rem2: BigInt = rem.abs() << 1;
        if rem2 >= other.abs() {
            if (self.sign() == Sign::Minus) == (other.sign() == Sign::Minus) {
                return quo + BigInt::one();
            }
            return quo - BigInt::one();
        }
        quo
    }
}

impl Div for BigUint {
    fn div_floor(&self, other: &Self) -> Self {
        self / other
    }

    fn div_round(&self, other: &Self) -> Self {
        ((self << 1) + other) / (other << 1)
    }
}

/// Returns x mod q.
pub fn rem_u64(x: &BigUint, q: u64) -> u64 {
    let q128: u128 = q as u128;
    x.iter_u64_digits()
        .rev()
        .fold(0u128, |acc, d| ((acc << 64) | d as u128) % q128) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn div_round_ties_away_from_zero() {
        let cases: [(i64, i64, i64); 8] = [
            (5, 2, 3),
            (-5, 2, -3),
            (5, -2, -3),
            (7, 2, 4),
            (-7, 2, -4),
            (7, 3, 2),
            (-8, 3, -3),
            (6, 3, 2),
        ];
        cases.iter().for_each(|(a, b, want)| {
            assert_eq!(
                BigInt::from(*a).div_round(&BigInt::from(*b)),
                BigInt::from(*want),
                "{}/{}",
                a,
                b
            )
        });
        assert_eq!(BigUint::from(3u32).div_round(&BigUint::from(4u32)), BigUint::from(1u32));
        assert_eq!(BigUint::from(1u32).div_round(&BigUint::from(4u32)), BigUint::from(0u32));
        assert_eq!(BigUint::from(2u32).div_round(&BigUint::from(4u32)), BigUint::from(1u32));
    }

    #[test]
    fn div_floor_rounds_down() {
        let floor = |a: i64, b: i64| Div::div_floor(&BigInt::from(a), &BigInt::from(b));
        assert_eq!(floor(-5, 2), BigInt::from(-3));
        assert_eq!(floor(5, 2), BigInt::from(2));
        assert_eq!(floor(-4, 2), BigInt::from(-2));
    }

    #[test]
    fn rem_u64_matches_bigint_remainder() {
        let x: BigUint = (BigUint::from(0xdeadbeefcafebabeu64) << 130) + BigUint::from(12345u32);
        let q: u64 = 0x1fffffffffe00001;
        assert_eq!(BigUint::from(rem_u64(&x, q)), &x % q);
        assert_eq!(rem_u64(&BigUint::zero(), q), 0);
    }
}
