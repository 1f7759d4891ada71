use rust_decimal::Decimal;

use crate::types::{Money, Rate};

/// Compute base^n via iterative multiplication.
pub(crate) fn iterative_pow(base: Decimal, n: u32) -> Decimal {
    let mut result = Decimal::ONE;
    for _ in 0..n {
        result *= base;
    }
    result
}

/// Equated monthly installment for a level-pay loan.
///
/// EMI = P · r · (1+r)^n / ((1+r)^n − 1). A zero rate degenerates to
/// straight-line principal repayment. Callers guarantee `months > 0`.
pub fn monthly_installment(principal: Money, monthly_rate: Rate, months: u32) -> Money {
    if monthly_rate.is_zero() {
        return principal / Decimal::from(months);
    }

    let growth = iterative_pow(Decimal::ONE + monthly_rate, months);
    let denom = growth - Decimal::ONE;
    if denom <= Decimal::ZERO {
        // Rate too small to register at this precision; straight line.
        return principal / Decimal::from(months);
    }

    principal * monthly_rate * growth / denom
}
