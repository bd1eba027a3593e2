//! Loan and penalty arithmetic.

use rust_decimal::prelude::*;
use rust_decimal::MathematicalOps;
use temple_admin_api::{ApiError, ApiResult};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Equated monthly installment for `principal` over `months` at a monthly
/// `rate_percent`, rounded to a whole amount.
///
/// `EMI = P × r × (1 + r)^N / ((1 + r)^N − 1)` with `r = rate_percent / 100`.
/// A zero rate spreads the principal evenly.
pub fn calculate_emi(principal: Decimal, rate_percent: Decimal, months: i32) -> ApiResult<Decimal> {
    if months < 1 {
        return Err(ApiError::field("duration_months", "duration must be at least 1 month"));
    }
    let n = Decimal::from(months);

    if rate_percent.is_zero() {
        return Ok(round_whole(principal / n));
    }

    let too_large = || ApiError::field("principal", "loan terms are too large to compute an installment");
    let r = rate_percent / HUNDRED;
    let growth = (Decimal::ONE + r).checked_powi(months as i64).ok_or_else(too_large)?;
    let numerator = principal
        .checked_mul(r)
        .and_then(|v| v.checked_mul(growth))
        .ok_or_else(too_large)?;
    let emi = numerator
        .checked_div(growth - Decimal::ONE)
        .ok_or_else(too_large)?;

    Ok(round_whole(emi))
}

/// `rent_amount × rate_percent / 100`, to two decimal places.
pub fn penalty_amount(rent_amount: Decimal, rate_percent: Decimal) -> Decimal {
    (rent_amount * rate_percent / HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emi_with_interest() {
        let emi = calculate_emi(Decimal::new(10000, 0), Decimal::ONE, 12).unwrap();
        assert_eq!(emi, Decimal::new(888, 0));

        let emi = calculate_emi(Decimal::new(100000, 0), Decimal::new(15, 1), 24).unwrap();
        assert_eq!(emi, Decimal::new(4992, 0));
    }

    #[test]
    fn test_emi_repays_more_than_principal() {
        let principals = [Decimal::new(10000, 0), Decimal::new(55000, 0), Decimal::new(250000, 0)];
        let rates = [Decimal::new(5, 1), Decimal::ONE, Decimal::new(25, 1)];
        for principal in principals {
            for rate in rates {
                for months in [6, 12, 36, 60] {
                    let emi = calculate_emi(principal, rate, months).unwrap();
                    assert!(
                        emi * Decimal::from(months) > principal,
                        "{principal} at {rate}% over {months} months gave {emi}"
                    );
                    assert_eq!(calculate_emi(principal, rate, months).unwrap(), emi);
                }
            }
        }
    }

    #[test]
    fn test_emi_without_interest_spreads_principal() {
        assert_eq!(
            calculate_emi(Decimal::new(12000, 0), Decimal::ZERO, 12).unwrap(),
            Decimal::new(1000, 0)
        );
        assert_eq!(
            calculate_emi(Decimal::new(10000, 0), Decimal::ZERO, 3).unwrap(),
            Decimal::new(3333, 0)
        );
    }

    #[test]
    fn test_emi_rejects_zero_duration() {
        assert!(calculate_emi(Decimal::new(1000, 0), Decimal::ONE, 0).is_err());
    }

    #[test]
    fn test_penalty_amount_rounds_to_paise() {
        assert_eq!(penalty_amount(Decimal::new(6000, 0), Decimal::new(2, 0)), Decimal::new(120, 0));
        assert_eq!(
            penalty_amount(Decimal::new(3333, 0), Decimal::new(15, 1)),
            Decimal::new(5000, 2)
        );
    }
}
