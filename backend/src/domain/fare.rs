//! Fare schedule entity and creation draft.

use std::fmt;

/// Default disability discount applied when a schedule omits one.
pub const DEFAULT_DISABILITY_DISCOUNT: f64 = 0.0;

/// Pricing schedule attached to one matatu.
///
/// A matatu may carry several fare rows; callers treat whichever row they
/// fetch as current. Rates are plain monetary amounts, the discount is a
/// decimal fraction (0.02 for 2%).
#[derive(Debug, Clone, PartialEq)]
pub struct Fare {
    pub id: i32,
    pub matatu_id: i32,
    pub peak_fare: f64,
    pub non_peak_fare: f64,
    pub rainy_peak_fare: f64,
    pub rainy_non_peak_fare: f64,
    pub disability_discount: f64,
}

/// Validation errors returned by [`NewFare::try_from_parts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FareValidationError {
    NegativeRate { field: &'static str },
}

impl fmt::Display for FareValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeRate { field } => {
                write!(f, "{field} must not be negative")
            }
        }
    }
}

impl std::error::Error for FareValidationError {}

/// Validated draft for creating or fully replacing a fare schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFare {
    pub matatu_id: i32,
    pub peak_fare: f64,
    pub non_peak_fare: f64,
    pub rainy_peak_fare: f64,
    pub rainy_non_peak_fare: f64,
    /// Decimal fraction; the range is deliberately not clamped.
    pub disability_discount: f64,
}

impl NewFare {
    /// Validate the four rates and construct a draft.
    ///
    /// `disability_discount` falls back to
    /// [`DEFAULT_DISABILITY_DISCOUNT`] when absent.
    pub fn try_from_parts(
        matatu_id: i32,
        peak_fare: f64,
        non_peak_fare: f64,
        rainy_peak_fare: f64,
        rainy_non_peak_fare: f64,
        disability_discount: Option<f64>,
    ) -> Result<Self, FareValidationError> {
        let rates = [
            ("peakFare", peak_fare),
            ("nonPeakFare", non_peak_fare),
            ("rainyPeakFare", rainy_peak_fare),
            ("rainyNonPeakFare", rainy_non_peak_fare),
        ];
        for (field, rate) in rates {
            if rate < 0.0 {
                return Err(FareValidationError::NegativeRate { field });
            }
        }
        Ok(Self {
            matatu_id,
            peak_fare,
            non_peak_fare,
            rainy_peak_fare,
            rainy_non_peak_fare,
            disability_discount: disability_discount.unwrap_or(DEFAULT_DISABILITY_DISCOUNT),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn draft_defaults_discount_when_absent() {
        let draft =
            NewFare::try_from_parts(1, 100.0, 80.0, 120.0, 90.0, None).expect("valid draft");
        assert_eq!(draft.disability_discount, DEFAULT_DISABILITY_DISCOUNT);
    }

    #[test]
    fn draft_keeps_supplied_discount() {
        let draft =
            NewFare::try_from_parts(1, 100.0, 80.0, 120.0, 90.0, Some(0.02)).expect("valid draft");
        assert_eq!(draft.disability_discount, 0.02);
    }

    #[rstest]
    #[case(-1.0, 80.0, 120.0, 90.0, "peakFare")]
    #[case(100.0, -0.5, 120.0, 90.0, "nonPeakFare")]
    #[case(100.0, 80.0, -3.0, 90.0, "rainyPeakFare")]
    #[case(100.0, 80.0, 120.0, -90.0, "rainyNonPeakFare")]
    fn draft_rejects_negative_rates(
        #[case] peak: f64,
        #[case] non_peak: f64,
        #[case] rainy_peak: f64,
        #[case] rainy_non_peak: f64,
        #[case] field: &'static str,
    ) {
        let err = NewFare::try_from_parts(1, peak, non_peak, rainy_peak, rainy_non_peak, None)
            .expect_err("invalid draft");
        assert_eq!(err, FareValidationError::NegativeRate { field });
    }

    #[test]
    fn discount_range_is_not_clamped() {
        // Permissive on purpose: the stored fraction is whatever the
        // operator submitted.
        let draft =
            NewFare::try_from_parts(1, 100.0, 80.0, 120.0, 90.0, Some(1.5)).expect("valid draft");
        assert_eq!(draft.disability_discount, 1.5);
    }
}
