//! Weights

use std::{fmt, iter::Sum, ops::Deref};

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors constructing a [`Weight`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WeightError {
    /// Weights must be strictly positive.
    #[error("weight must be positive, got {0}kg")]
    NonPositive(Decimal),
}

/// Represents a physical weight in kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Weight {
    kilograms: Decimal,
}

impl Weight {
    /// Creates a new weight from a number of kilograms.
    ///
    /// # Errors
    ///
    /// Returns [`WeightError::NonPositive`] if `kilograms` is zero or negative.
    pub fn from_kilograms(kilograms: Decimal) -> Result<Self, WeightError> {
        if kilograms <= Decimal::ZERO {
            return Err(WeightError::NonPositive(kilograms));
        }

        Ok(Weight { kilograms })
    }

    /// Weight in kilograms.
    pub fn kilograms(&self) -> Decimal {
        self.kilograms
    }

    /// Weight in grams.
    pub fn grams(&self) -> Decimal {
        self.kilograms * Decimal::ONE_THOUSAND
    }
}

impl Deref for Weight {
    type Target = Decimal;

    fn deref(&self) -> &Self::Target {
        &self.kilograms
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}kg", self.kilograms.normalize())
    }
}

/// Sum of a set of weights, in kilograms. Zero for an empty set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TotalWeight(pub Decimal);

impl Sum<Weight> for TotalWeight {
    fn sum<I: Iterator<Item = Weight>>(iter: I) -> Self {
        TotalWeight(iter.map(|weight| weight.kilograms).sum())
    }
}

impl<'a> Sum<&'a Weight> for TotalWeight {
    fn sum<I: Iterator<Item = &'a Weight>>(iter: I) -> Self {
        TotalWeight(iter.map(Weight::kilograms).sum())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn from_kilograms_rejects_zero_and_negative() {
        assert_eq!(
            Weight::from_kilograms(Decimal::ZERO),
            Err(WeightError::NonPositive(Decimal::ZERO))
        );
        assert_eq!(
            Weight::from_kilograms(Decimal::new(-1, 1)),
            Err(WeightError::NonPositive(Decimal::new(-1, 1)))
        );
    }

    #[test]
    fn grams_scales_kilograms() -> TestResult {
        let weight = Weight::from_kilograms(Decimal::new(4, 1))?;

        assert_eq!(weight.grams(), Decimal::new(400, 0));

        Ok(())
    }

    #[test]
    fn weight_derefs_to_decimal() -> TestResult {
        let weight = Weight::from_kilograms(Decimal::new(15, 1))?;

        assert_eq!(*weight, Decimal::new(15, 1));

        Ok(())
    }

    #[test]
    fn total_weight_sums_kilograms() -> TestResult {
        let weights = [
            Weight::from_kilograms(Decimal::new(4, 1))?,
            Weight::from_kilograms(Decimal::new(4, 1))?,
            Weight::from_kilograms(Decimal::new(7, 1))?,
        ];

        let total: TotalWeight = weights.iter().sum();

        assert_eq!(total, TotalWeight(Decimal::new(15, 1)));

        Ok(())
    }

    #[test]
    fn display_uses_kilograms() -> TestResult {
        assert_eq!(Weight::from_kilograms(Decimal::new(70, 2))?.to_string(), "0.7kg");

        Ok(())
    }
}
