//! Statutory rounding rules for yen amounts.
//!
//! Every function here is total: non-positive inputs collapse to zero where
//! the rule says so and arithmetic at the edge of the decimal range saturates
//! instead of panicking.

use crate::MonetaryAmount;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::trace;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;
const THOUSAND: Decimal = Decimal::ONE_THOUSAND;

/// Rounds to whole yen, a half yen rounding away from zero.
pub fn round_yen(value: MonetaryAmount) -> MonetaryAmount {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// `base * rate / 100` rounded half up to whole yen.
///
/// Non-positive bases and rates never accrue anything and yield zero.
pub fn apply_rate(base: MonetaryAmount, rate: Decimal) -> MonetaryAmount {
    if base <= Decimal::ZERO || rate <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let amount = match base.checked_mul(rate) {
        Some(product) => product / HUNDRED,
        None => {
            trace!(%base, %rate, "rate product out of range, scaling first");
            (base / HUNDRED).saturating_mul(rate)
        }
    };

    round_yen(amount)
}

/// Rounds up to the next multiple of 1000 yen, zero for non-positive values.
///
/// The result is always whole yen (scale 0), whatever the scale of `value`.
pub fn ceil_thousand(value: MonetaryAmount) -> MonetaryAmount {
    if value <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let rem = value % THOUSAND;
    if rem.is_zero() {
        return value.trunc();
    }

    let floored = (value - rem).trunc();
    floored.checked_add(THOUSAND).unwrap_or_else(|| {
        trace!(%value, "thousand ceiling out of range, saturating");
        Decimal::MAX
    })
}

/// Rounds down to a multiple of 1000 yen, zero for non-positive values.
pub fn floor_thousand(value: MonetaryAmount) -> MonetaryAmount {
    floor_to(value, THOUSAND)
}

/// Rounds down to a multiple of 100 yen, zero for non-positive values.
pub fn floor_hundred(value: MonetaryAmount) -> MonetaryAmount {
    floor_to(value, HUNDRED)
}

#[inline]
fn floor_to(value: MonetaryAmount, unit: Decimal) -> MonetaryAmount {
    if value <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    // `trunc` drops the trailing zero fraction `value % unit` leaves behind
    (value - value % unit).trunc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn non_positive_base_or_rate_is_zero() {
        for (base, rate) in [
            (dec!(0), dec!(10)),
            (dec!(-1000), dec!(10)),
            (dec!(1000), dec!(0)),
            (dec!(1000), dec!(-5)),
            (dec!(-1), dec!(-1)),
            (dec!(-0.5), dec!(50)),
        ] {
            assert_eq!(apply_rate(base, rate), Decimal::ZERO, "{base} @ {rate}");
        }
    }

    #[test]
    fn apply_rate_is_exact_when_divisible() {
        assert_eq!(apply_rate(dec!(1000000), dec!(10)), dec!(100000));
        assert_eq!(apply_rate(dec!(150), dec!(50)), dec!(75));
    }

    #[test]
    fn apply_rate_rounds_half_up() {
        // 5 * 50 / 100 = 2.5
        assert_eq!(apply_rate(dec!(5), dec!(50)), dec!(3));
        // 3 * 50 / 100 = 1.5
        assert_eq!(apply_rate(dec!(3), dec!(50)), dec!(2));
        // 1234 * 10.21 / 100 = 125.9914
        assert_eq!(apply_rate(dec!(1234), dec!(10.21)), dec!(126));
        // 1001 * 0.1 / 100 = 1.001
        assert_eq!(apply_rate(dec!(1001), dec!(0.1)), dec!(1));
    }

    #[test]
    fn apply_rate_does_not_panic_at_the_edge_of_the_range() {
        let result = apply_rate(Decimal::MAX, dec!(200));
        assert!(result > Decimal::ZERO);
    }

    #[test]
    fn round_yen_is_away_from_zero() {
        assert_eq!(round_yen(dec!(2.5)), dec!(3));
        assert_eq!(round_yen(dec!(2.4999)), dec!(2));
        assert_eq!(round_yen(dec!(-2.5)), dec!(-3));
        assert_eq!(round_yen(dec!(7)), dec!(7));
    }

    #[test]
    fn ceil_thousand_boundaries() {
        assert_eq!(ceil_thousand(dec!(0)), dec!(0));
        assert_eq!(ceil_thousand(dec!(-1)), dec!(0));
        assert_eq!(ceil_thousand(dec!(1)), dec!(1000));
        assert_eq!(ceil_thousand(dec!(1000)), dec!(1000));
        assert_eq!(ceil_thousand(dec!(1001)), dec!(2000));
        assert_eq!(ceil_thousand(dec!(1000.01)), dec!(2000));
        assert_eq!(ceil_thousand(dec!(123456789)), dec!(123457000));
    }

    #[test]
    fn ceil_thousand_saturates() {
        assert_eq!(ceil_thousand(Decimal::MAX), Decimal::MAX);
    }

    #[test]
    fn floor_thousand_boundaries() {
        assert_eq!(floor_thousand(dec!(1999)), dec!(1000));
        assert_eq!(floor_thousand(dec!(1000)), dec!(1000));
        assert_eq!(floor_thousand(dec!(999.99)), dec!(0));
        assert_eq!(floor_thousand(dec!(0)), dec!(0));
        assert_eq!(floor_thousand(dec!(-1500)), dec!(0));
    }

    #[test]
    fn thousand_and_hundred_rules_yield_whole_yen() {
        for (result, expected) in [
            (floor_hundred(dec!(12345.6)), "12300"),
            (floor_thousand(dec!(999.5)), "0"),
            (floor_thousand(dec!(1999.99)), "1000"),
            (ceil_thousand(dec!(1000.01)), "2000"),
            (ceil_thousand(dec!(1000.000)), "1000"),
        ] {
            assert_eq!(result.scale(), 0, "{result}");
            assert_eq!(result.to_string(), expected);
        }
    }

    #[test]
    fn floor_hundred_boundaries() {
        assert_eq!(floor_hundred(dec!(199)), dec!(100));
        assert_eq!(floor_hundred(dec!(100)), dec!(100));
        assert_eq!(floor_hundred(dec!(12345.6)), dec!(12300));
        assert_eq!(floor_hundred(dec!(0)), dec!(0));
        assert_eq!(floor_hundred(dec!(-99)), dec!(0));
    }
}
