use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Money;

/// Cadence of a systematic prepayment plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrepaymentFrequency {
    Monthly,
    Yearly,
}

impl PrepaymentFrequency {
    /// Months between successive prepayments.
    pub fn cadence_months(self) -> u32 {
        match self {
            PrepaymentFrequency::Monthly => 1,
            PrepaymentFrequency::Yearly => 12,
        }
    }
}

/// Extra principal paid on top of the regular installment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum PrepaymentPolicy {
    /// No extra payments.
    #[default]
    None,
    /// A single lump sum in the given month (1-based).
    OneTime { amount: Money, month: u32 },
    /// A recurring lump sum from `start_month` at the given cadence.
    Systematic {
        amount: Money,
        frequency: PrepaymentFrequency,
        start_month: u32,
    },
}

/// Resolve a policy into a month → extra-payment map.
///
/// Zero or out-of-range inputs degrade to an empty map rather than an
/// error: a half-filled prepayment form must not abort the run. Months are
/// 1-based; at most one entry per month.
pub fn derive_prepayments(policy: &PrepaymentPolicy, tenure_months: u32) -> BTreeMap<u32, Money> {
    let mut map = BTreeMap::new();

    match policy {
        PrepaymentPolicy::None => {}
        PrepaymentPolicy::OneTime { amount, month } => {
            if *amount > Decimal::ZERO && *month <= tenure_months {
                map.insert(*month, *amount);
            }
        }
        PrepaymentPolicy::Systematic {
            amount,
            frequency,
            start_month,
        } => {
            if *amount > Decimal::ZERO {
                let mut month = *start_month;
                while month <= tenure_months {
                    map.insert(month, *amount);
                    month += frequency.cadence_months();
                }
            }
        }
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_none_policy_is_empty() {
        assert!(derive_prepayments(&PrepaymentPolicy::None, 240).is_empty());
    }

    #[test]
    fn test_one_time_within_tenure() {
        let policy = PrepaymentPolicy::OneTime {
            amount: dec!(200_000),
            month: 6,
        };
        let map = derive_prepayments(&policy, 12);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&6), Some(&dec!(200_000)));
    }

    #[test]
    fn test_one_time_beyond_tenure_is_dropped() {
        let policy = PrepaymentPolicy::OneTime {
            amount: dec!(200_000),
            month: 13,
        };
        assert!(derive_prepayments(&policy, 12).is_empty());
    }

    #[test]
    fn test_one_time_zero_amount_is_dropped() {
        let policy = PrepaymentPolicy::OneTime {
            amount: Decimal::ZERO,
            month: 6,
        };
        assert!(derive_prepayments(&policy, 12).is_empty());
    }

    #[test]
    fn test_systematic_monthly() {
        let policy = PrepaymentPolicy::Systematic {
            amount: dec!(5_000),
            frequency: PrepaymentFrequency::Monthly,
            start_month: 3,
        };
        let map = derive_prepayments(&policy, 6);
        let months: Vec<u32> = map.keys().copied().collect();
        assert_eq!(months, vec![3, 4, 5, 6]);
        assert!(map.values().all(|amount| *amount == dec!(5_000)));
    }

    #[test]
    fn test_systematic_yearly() {
        let policy = PrepaymentPolicy::Systematic {
            amount: dec!(50_000),
            frequency: PrepaymentFrequency::Yearly,
            start_month: 6,
        };
        let map = derive_prepayments(&policy, 36);
        let months: Vec<u32> = map.keys().copied().collect();
        assert_eq!(months, vec![6, 18, 30]);
    }

    #[test]
    fn test_systematic_zero_amount_is_dropped() {
        let policy = PrepaymentPolicy::Systematic {
            amount: Decimal::ZERO,
            frequency: PrepaymentFrequency::Monthly,
            start_month: 1,
        };
        assert!(derive_prepayments(&policy, 12).is_empty());
    }

    #[test]
    fn test_start_month_past_tenure_is_empty() {
        let policy = PrepaymentPolicy::Systematic {
            amount: dec!(5_000),
            frequency: PrepaymentFrequency::Monthly,
            start_month: 13,
        };
        assert!(derive_prepayments(&policy, 12).is_empty());
    }
}
