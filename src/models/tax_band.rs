//! Progressive tax band models.
//!
//! A [`TaxBands`] value is an ordered, validated table of [`TaxBand`]s.
//! Each band covers income from the previous band's upper bound (or zero)
//! up to and including its own upper bound; the final band is unbounded.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A single row of a tax band table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBand {
    /// Inclusive upper bound of the band. `None` marks the unbounded top band.
    #[serde(default)]
    pub upper_bound: Option<Decimal>,
    /// Marginal rate applied within the band, as a fraction in `[0, 1]`.
    pub rate: Decimal,
}

impl TaxBand {
    /// Creates a bounded band.
    pub fn bounded(upper_bound: Decimal, rate: Decimal) -> Self {
        Self {
            upper_bound: Some(upper_bound),
            rate,
        }
    }

    /// Creates the unbounded top band.
    pub fn unbounded(rate: Decimal) -> Self {
        Self {
            upper_bound: None,
            rate,
        }
    }
}

/// A band with its lower edge resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandSegment {
    /// Exclusive lower edge (the previous band's upper bound, or zero).
    pub lower: Decimal,
    /// Inclusive upper edge; `None` for the top band.
    pub upper: Option<Decimal>,
    /// Marginal rate for the segment.
    pub rate: Decimal,
}

impl BandSegment {
    /// Portion of `income` that falls inside this segment.
    pub fn portion_of(&self, income: Decimal) -> Decimal {
        if income <= self.lower {
            return Decimal::ZERO;
        }
        let capped = match self.upper {
            Some(upper) => income.min(upper),
            None => income,
        };
        capped - self.lower
    }
}

/// An ordered tax band table that upholds the band invariants.
///
/// Invariants enforced on construction:
/// - at least one band;
/// - every rate lies in `[0, 1]`;
/// - every band except the last is bounded, and the last is unbounded;
/// - bounds are positive and strictly increasing;
/// - rates never decrease.
///
/// # Example
///
/// ```
/// use paye_engine::models::{TaxBand, TaxBands};
/// use rust_decimal::Decimal;
///
/// let bands = TaxBands::new(vec![
///     TaxBand::bounded(Decimal::from(235_000), Decimal::ZERO),
///     TaxBand::unbounded(Decimal::new(10, 2)),
/// ])
/// .unwrap();
/// assert_eq!(bands.len(), 2);
/// assert_eq!(bands.first_bound(), Some(Decimal::from(235_000)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TaxBand>", into = "Vec<TaxBand>")]
pub struct TaxBands(Vec<TaxBand>);

impl TaxBands {
    /// Validates and wraps a band table.
    pub fn new(bands: Vec<TaxBand>) -> EngineResult<Self> {
        let invalid = |message: String| Err(EngineError::InvalidTaxBands { message });

        let Some(last_index) = bands.len().checked_sub(1) else {
            return invalid("at least one band is required".to_string());
        };

        for (index, band) in bands.iter().enumerate() {
            if band.rate < Decimal::ZERO || band.rate > Decimal::ONE {
                return invalid(format!(
                    "band {} rate {} is outside [0, 1]",
                    index + 1,
                    band.rate
                ));
            }
            match (band.upper_bound, index == last_index) {
                (None, false) => {
                    return invalid(format!(
                        "band {} is unbounded but is not the last band",
                        index + 1
                    ));
                }
                (Some(bound), true) => {
                    return invalid(format!(
                        "last band must be unbounded (found upper bound {})",
                        bound
                    ));
                }
                _ => {}
            }
        }

        let mut previous_bound = Decimal::ZERO;
        for (index, bound) in bands.iter().filter_map(|b| b.upper_bound).enumerate() {
            if bound <= previous_bound {
                return invalid(format!(
                    "band {} upper bound {} must exceed {}",
                    index + 1,
                    bound,
                    previous_bound
                ));
            }
            previous_bound = bound;
        }

        if let Some(window) = bands.windows(2).find(|w| w[1].rate < w[0].rate) {
            return invalid(format!(
                "rates must not decrease ({} followed by {})",
                window[0].rate, window[1].rate
            ));
        }

        Ok(Self(bands))
    }

    /// Number of bands in the table.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a validated table; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Upper bound of the first band, below which no tax is due when its rate is zero.
    pub fn first_bound(&self) -> Option<Decimal> {
        self.0.first().and_then(|b| b.upper_bound)
    }

    /// Highest marginal rate (the rate of the unbounded band).
    pub fn top_rate(&self) -> Decimal {
        self.0.last().map(|b| b.rate).unwrap_or(Decimal::ZERO)
    }

    /// Iterates over the raw bands in order.
    pub fn iter(&self) -> std::slice::Iter<'_, TaxBand> {
        self.0.iter()
    }

    /// Iterates over the bands with their lower edges resolved.
    pub fn segments(&self) -> impl Iterator<Item = BandSegment> + '_ {
        self.0.iter().scan(Decimal::ZERO, |lower, band| {
            let segment = BandSegment {
                lower: *lower,
                upper: band.upper_bound,
                rate: band.rate,
            };
            if let Some(upper) = band.upper_bound {
                *lower = upper;
            }
            Some(segment)
        })
    }
}

impl TryFrom<Vec<TaxBand>> for TaxBands {
    type Error = EngineError;

    fn try_from(bands: Vec<TaxBand>) -> Result<Self, Self::Error> {
        Self::new(bands)
    }
}

impl From<TaxBands> for Vec<TaxBand> {
    fn from(bands: TaxBands) -> Self {
        bands.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn uganda_bands() -> Vec<TaxBand> {
        vec![
            TaxBand::bounded(dec("235000"), dec("0")),
            TaxBand::bounded(dec("335000"), dec("0.10")),
            TaxBand::bounded(dec("410000"), dec("0.20")),
            TaxBand::bounded(dec("10000000"), dec("0.30")),
            TaxBand::unbounded(dec("0.40")),
        ]
    }

    fn expect_invalid(bands: Vec<TaxBand>, fragment: &str) {
        match TaxBands::new(bands) {
            Err(EngineError::InvalidTaxBands { message }) => assert!(
                message.contains(fragment),
                "expected message containing '{}', got '{}'",
                fragment,
                message
            ),
            other => panic!("Expected InvalidTaxBands error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_table_is_accepted() {
        let bands = TaxBands::new(uganda_bands()).unwrap();
        assert_eq!(bands.len(), 5);
        assert_eq!(bands.first_bound(), Some(dec("235000")));
        assert_eq!(bands.top_rate(), dec("0.40"));
    }

    #[test]
    fn test_single_unbounded_band_is_valid() {
        let bands = TaxBands::new(vec![TaxBand::unbounded(dec("0.15"))]).unwrap();
        assert_eq!(bands.first_bound(), None);
    }

    #[test]
    fn test_empty_table_is_rejected() {
        expect_invalid(vec![], "at least one band");
    }

    #[test]
    fn test_bounded_last_band_is_rejected() {
        let mut bands = uganda_bands();
        bands.pop();
        expect_invalid(bands, "last band must be unbounded");
    }

    #[test]
    fn test_unbounded_middle_band_is_rejected() {
        let mut bands = uganda_bands();
        bands[1].upper_bound = None;
        expect_invalid(bands, "band 2 is unbounded");
    }

    #[test]
    fn test_non_increasing_bounds_are_rejected() {
        let mut bands = uganda_bands();
        bands[2].upper_bound = Some(dec("335000"));
        expect_invalid(bands, "must exceed 335000");
    }

    #[test]
    fn test_zero_first_bound_is_rejected() {
        let bands = vec![
            TaxBand::bounded(Decimal::ZERO, dec("0")),
            TaxBand::unbounded(dec("0.1")),
        ];
        expect_invalid(bands, "must exceed 0");
    }

    #[test]
    fn test_decreasing_rates_are_rejected() {
        let mut bands = uganda_bands();
        bands[3].rate = dec("0.15");
        expect_invalid(bands, "rates must not decrease");
    }

    #[test]
    fn test_rate_outside_unit_interval_is_rejected() {
        let mut bands = uganda_bands();
        bands[4].rate = dec("1.5");
        expect_invalid(bands, "outside [0, 1]");
    }

    #[test]
    fn test_segments_resolve_lower_edges() {
        let bands = TaxBands::new(uganda_bands()).unwrap();
        let segments: Vec<BandSegment> = bands.segments().collect();

        assert_eq!(segments[0].lower, Decimal::ZERO);
        assert_eq!(segments[1].lower, dec("235000"));
        assert_eq!(segments[2].lower, dec("335000"));
        assert_eq!(segments[4].lower, dec("10000000"));
        assert_eq!(segments[4].upper, None);
    }

    #[test]
    fn test_segment_portion_is_boundary_inclusive() {
        let segment = BandSegment {
            lower: dec("235000"),
            upper: Some(dec("335000")),
            rate: dec("0.10"),
        };
        assert_eq!(segment.portion_of(dec("235000")), Decimal::ZERO);
        assert_eq!(segment.portion_of(dec("335000")), dec("100000"));
        assert_eq!(segment.portion_of(dec("900000")), dec("100000"));
        assert_eq!(segment.portion_of(dec("235000.5")), dec("0.5"));
    }

    #[test]
    fn test_deserialize_validates_bands() {
        let yaml = r#"
- upper_bound: "100"
  rate: "0.2"
- upper_bound: null
  rate: "0.1"
"#;
        let result: Result<TaxBands, _> = serde_yaml::from_str(yaml);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("rates must not decrease"), "got: {}", err);
    }

    #[test]
    fn test_deserialize_valid_bands() {
        let yaml = r#"
- upper_bound: "235000"
  rate: "0"
- rate: "0.3"
"#;
        let bands: TaxBands = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(bands.len(), 2);
        assert_eq!(bands.top_rate(), dec("0.3"));
    }
}
