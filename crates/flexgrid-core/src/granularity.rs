//! Reconciles the center-frequency granularities of every node on a path.
//!
//! Each node can only address frequencies that are multiples of its own
//! granularity. A channel usable end to end therefore has to sit on the
//! least common multiple of all of them.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::Serialize;

use crate::capabilities::McCapabilities;
use crate::error::{GridError, Result};
use crate::grid::FrequencyGhz;

/// Values accepted as a granularity in GHz.
pub trait IntoGranularity {
    fn into_granularity(self) -> Result<FrequencyGhz>;
}

impl IntoGranularity for Decimal {
    fn into_granularity(self) -> Result<FrequencyGhz> {
        if self.is_sign_negative() || self.is_zero() {
            return Err(GridError::InvalidGranularity(format!(
                "{self} GHz is not positive"
            )));
        }
        Ok(self.normalize())
    }
}

impl IntoGranularity for f64 {
    fn into_granularity(self) -> Result<FrequencyGhz> {
        if !self.is_finite() {
            return Err(GridError::InvalidGranularity(format!("{self} is not finite")));
        }
        Decimal::from_f64(self)
            .ok_or_else(|| GridError::InvalidGranularity(format!("{self} is not representable")))?
            .into_granularity()
    }
}

impl IntoGranularity for f32 {
    fn into_granularity(self) -> Result<FrequencyGhz> {
        if !self.is_finite() {
            return Err(GridError::InvalidGranularity(format!("{self} is not finite")));
        }
        Decimal::from_f32(self)
            .ok_or_else(|| GridError::InvalidGranularity(format!("{self} is not representable")))?
            .into_granularity()
    }
}

impl IntoGranularity for u32 {
    fn into_granularity(self) -> Result<FrequencyGhz> {
        Decimal::from(self).into_granularity()
    }
}

/// Unique set of granularities collected along one path.
///
/// Additions stay permitted after the LCM has been queried; every query
/// recomputes from the current contents.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GranularityCollection {
    values: BTreeSet<FrequencyGhz>,
}

impl GranularityCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the center-frequency granularity of every node in `capabilities`.
    pub fn from_capabilities<'a, I>(capabilities: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a McCapabilities>,
    {
        let mut collection = Self::new();
        for caps in capabilities {
            collection.add(caps.center_freq_granularity)?;
        }
        Ok(collection)
    }

    /// Insert a granularity. Returns `true` when it was not already present.
    pub fn add(&mut self, value: impl IntoGranularity) -> Result<bool> {
        let value = value.into_granularity()?;
        Ok(self.values.insert(value))
    }

    pub fn distinct_values(&self) -> &BTreeSet<FrequencyGhz> {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Least common multiple of all granularities, in GHz.
    ///
    /// Values are lifted to integers by their largest decimal scale, reduced
    /// with an integer GCD, then scaled back. Fails when the collection is
    /// empty or when the result does not fit an exact decimal.
    pub fn least_common_multiple(&self) -> Result<FrequencyGhz> {
        if self.values.is_empty() {
            return Err(GridError::NoLeastCommonMultiple(
                "no granularity collected".to_string(),
            ));
        }
        let scale = self.values.iter().map(Decimal::scale).max().unwrap_or(0);
        let overflow = || {
            GridError::NoLeastCommonMultiple(format!(
                "granularities {} cannot be reconciled exactly",
                self.describe()
            ))
        };

        let mut lcm: u128 = 1;
        for value in &self.values {
            let integer = scaled_integer(*value, scale).ok_or_else(overflow)?;
            lcm = lcm_u128(lcm, integer).ok_or_else(overflow)?;
        }

        // drop trailing zeros first so a small LCM at a high scale still fits
        let (mut mantissa, mut scale) = (lcm, scale);
        while scale > 0 && mantissa % 10 == 0 {
            mantissa /= 10;
            scale -= 1;
        }
        let result = i128::try_from(mantissa)
            .ok()
            .and_then(|m| Decimal::try_from_i128_with_scale(m, scale).ok())
            .ok_or_else(overflow)?
            .normalize();
        tracing::debug!(
            "least common multiple of {} is {result} GHz",
            self.describe()
        );
        Ok(result)
    }

    /// Slots of width `target` needed to cover one least common multiple.
    pub fn slots_for(&self, target: impl IntoGranularity) -> Result<u32> {
        let target = target.into_granularity()?;
        let lcm = self.least_common_multiple()?;
        lcm.checked_div(target)
            .map(|q| q.ceil())
            .and_then(|q| q.to_u32())
            .ok_or_else(|| {
                GridError::NoLeastCommonMultiple(format!(
                    "{lcm} GHz cannot be expressed in slots of {target} GHz"
                ))
            })
    }

    fn describe(&self) -> String {
        let parts: Vec<String> = self.values.iter().map(|v| v.to_string()).collect();
        format!("{{{}}}", parts.join(", "))
    }
}

/// `value` as an integer count of `10^-scale` units.
fn scaled_integer(value: Decimal, scale: u32) -> Option<u128> {
    let mantissa = u128::try_from(value.mantissa()).ok()?;
    10u128
        .checked_pow(scale.checked_sub(value.scale())?)
        .and_then(|factor| mantissa.checked_mul(factor))
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

fn lcm_u128(a: u128, b: u128) -> Option<u128> {
    (a / gcd(a, b)).checked_mul(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn collection(values: &[Decimal]) -> GranularityCollection {
        let mut c = GranularityCollection::new();
        for v in values {
            c.add(*v).unwrap();
        }
        c
    }

    #[test]
    fn test_lcm_of_standard_granularities() {
        let c = collection(&[dec!(12.5), dec!(25), dec!(50)]);
        assert_eq!(c.least_common_multiple(), Ok(dec!(50)));
        assert_eq!(c.slots_for(dec!(12.5)), Ok(4));
    }

    #[test]
    fn test_lcm_of_mixed_scales() {
        let c = collection(&[dec!(25), dec!(37.5)]);
        assert_eq!(c.least_common_multiple(), Ok(dec!(75)));
        assert_eq!(c.slots_for(6.25f64), Ok(12));
    }

    #[test]
    fn test_lcm_at_maximum_scale() {
        let c = collection(&[dec!(50), dec!(0.0000000000000000000000000001)]);
        assert_eq!(c.least_common_multiple(), Ok(dec!(50)));
        let c = collection(&[dec!(12.5), dec!(0.0000000000000000000000000025)]);
        assert_eq!(c.least_common_multiple(), Ok(dec!(12.5)));
    }

    #[test]
    fn test_single_value() {
        let c = collection(&[dec!(100)]);
        assert_eq!(c.least_common_multiple(), Ok(dec!(100)));
        assert_eq!(c.slots_for(12.5f32), Ok(8));
    }

    #[test]
    fn test_slots_round_up() {
        let c = collection(&[dec!(50)]);
        assert_eq!(c.slots_for(dec!(37.5)), Ok(2));
    }

    #[test]
    fn test_empty_collection_fails() {
        let c = GranularityCollection::new();
        assert!(matches!(
            c.least_common_multiple(),
            Err(GridError::NoLeastCommonMultiple(_))
        ));
        assert!(matches!(
            c.slots_for(dec!(12.5)),
            Err(GridError::NoLeastCommonMultiple(_))
        ));
    }

    #[test]
    fn test_unreconcilable_values_fail() {
        let mut c = GranularityCollection::new();
        c.add(1.0f64 / 3.0).unwrap();
        c.add(dec!(12.5)).unwrap();
        assert!(matches!(
            c.least_common_multiple(),
            Err(GridError::NoLeastCommonMultiple(_))
        ));
    }

    #[test]
    fn test_duplicates_collapse() {
        let mut c = GranularityCollection::new();
        assert_eq!(c.add(dec!(12.5)), Ok(true));
        assert_eq!(c.add(dec!(12.50)), Ok(false));
        assert_eq!(c.add(12.5f64), Ok(false));
        assert_eq!(c.add(12.5f32), Ok(false));
        assert_eq!(c.len(), 1);
        assert_eq!(
            c.distinct_values().iter().next().map(|v| v.to_string()),
            Some("12.5".to_string())
        );
    }

    #[test]
    fn test_add_after_lcm_is_permitted() {
        let mut c = collection(&[dec!(12.5)]);
        assert_eq!(c.least_common_multiple(), Ok(dec!(12.5)));
        assert_eq!(c.add(dec!(50)), Ok(true));
        assert_eq!(c.least_common_multiple(), Ok(dec!(50)));
    }

    #[test]
    fn test_rejects_non_positive_and_non_finite() {
        let mut c = GranularityCollection::new();
        assert!(c.add(dec!(0)).is_err());
        assert!(c.add(dec!(-12.5)).is_err());
        assert!(c.add(f64::NAN).is_err());
        assert!(c.add(f32::INFINITY).is_err());
        assert!(c.is_empty());
        assert!(c.slots_for(0u32).is_err());
    }

    #[test]
    fn test_from_capabilities() {
        let caps = [
            McCapabilities::new(dec!(6.25), dec!(12.5), 1, 14),
            McCapabilities::default_for_missing(),
        ];
        let c = GranularityCollection::from_capabilities(&caps).unwrap();
        assert_eq!(c.len(), 2);
        assert_eq!(c.least_common_multiple(), Ok(dec!(50)));
    }

    #[test]
    fn test_gcd_and_lcm() {
        assert_eq!(gcd(125, 250), 125);
        assert_eq!(gcd(7, 0), 7);
        assert_eq!(lcm_u128(4, 6), Some(12));
        assert_eq!(lcm_u128(u128::MAX, 2), None);
    }
}
