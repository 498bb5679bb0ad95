//! Weekend configuration model.
//!
//! A [`WeekendConfig`] is the company-wide set of non-working weekdays. It is
//! passed explicitly into every date rule rather than read from shared state.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The set of weekdays a company treats as non-working.
///
/// Weekdays are addressed by index, `0` = Sunday through `6` = Saturday.
/// The set may be empty, in which case every day is a working day.
///
/// # Example
///
/// ```
/// use hr_engine::models::WeekendConfig;
/// use chrono::Weekday;
///
/// // Friday and Saturday
/// let weekend = WeekendConfig::from_indices(&[5, 6]).unwrap();
/// assert!(weekend.contains(Weekday::Fri));
/// assert!(!weekend.contains(Weekday::Sun));
/// assert_eq!(weekend.indices(), vec![5, 6]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct WeekendConfig {
    mask: u8,
}

impl WeekendConfig {
    /// A configuration where every day is a working day.
    pub fn none() -> Self {
        Self { mask: 0 }
    }

    /// The common Saturday/Sunday weekend.
    pub fn saturday_sunday() -> Self {
        Self::from_weekdays(&[Weekday::Sat, Weekday::Sun])
    }

    /// The Friday/Saturday weekend used across much of the Gulf region.
    pub fn friday_saturday() -> Self {
        Self::from_weekdays(&[Weekday::Fri, Weekday::Sat])
    }

    /// Builds a configuration from weekday indices (0 = Sunday .. 6 = Saturday).
    ///
    /// Returns a validation error if any index is greater than 6.
    pub fn from_indices(indices: &[u8]) -> EngineResult<Self> {
        let mut mask = 0u8;
        for &index in indices {
            if index > 6 {
                return Err(EngineError::validation(
                    "weekend_days",
                    format!("weekday index {} is outside 0..=6", index),
                ));
            }
            mask |= 1 << index;
        }
        Ok(Self { mask })
    }

    /// Builds a configuration from chrono weekdays.
    pub fn from_weekdays(days: &[Weekday]) -> Self {
        let mask = days
            .iter()
            .fold(0u8, |mask, day| mask | (1 << day.num_days_from_sunday()));
        Self { mask }
    }

    /// Returns true if the weekday is a non-working day.
    pub fn contains(&self, weekday: Weekday) -> bool {
        self.mask & (1 << weekday.num_days_from_sunday()) != 0
    }

    /// Returns the configured weekday indices in ascending order.
    pub fn indices(&self) -> Vec<u8> {
        (0u8..7).filter(|i| self.mask & (1 << i) != 0).collect()
    }

    /// Returns the number of non-working weekdays.
    pub fn len(&self) -> usize {
        self.mask.count_ones() as usize
    }

    /// Returns true if no weekday is marked as non-working.
    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }
}

impl TryFrom<Vec<u8>> for WeekendConfig {
    type Error = EngineError;

    fn try_from(indices: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_indices(&indices)
    }
}

impl From<WeekendConfig> for Vec<u8> {
    fn from(config: WeekendConfig) -> Self {
        config.indices()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_indices_maps_sunday_to_zero() {
        let weekend = WeekendConfig::from_indices(&[0]).unwrap();
        assert!(weekend.contains(Weekday::Sun));
        assert!(!weekend.contains(Weekday::Mon));
        assert_eq!(weekend.len(), 1);
    }

    #[test]
    fn test_from_indices_rejects_out_of_range() {
        let result = WeekendConfig::from_indices(&[5, 7]);
        match result {
            Err(EngineError::Validation { field, message }) => {
                assert_eq!(field, "weekend_days");
                assert!(message.contains('7'));
            }
            _ => panic!("Expected Validation error"),
        }
    }

    #[test]
    fn test_empty_config_has_no_weekend() {
        let weekend = WeekendConfig::none();
        assert!(weekend.is_empty());
        assert!(!weekend.contains(Weekday::Sat));
    }

    #[test]
    fn test_duplicate_indices_are_collapsed() {
        let weekend = WeekendConfig::from_indices(&[6, 6, 0]).unwrap();
        assert_eq!(weekend.indices(), vec![0, 6]);
        assert_eq!(weekend, WeekendConfig::saturday_sunday());
    }

    #[test]
    fn test_friday_saturday_preset() {
        let weekend = WeekendConfig::friday_saturday();
        assert_eq!(weekend.indices(), vec![5, 6]);
    }

    #[test]
    fn test_serializes_as_index_list() {
        let json = serde_json::to_string(&WeekendConfig::friday_saturday()).unwrap();
        assert_eq!(json, "[5,6]");
    }

    #[test]
    fn test_deserialize_rejects_bad_index() {
        let result: Result<WeekendConfig, _> = serde_json::from_str("[1, 9]");
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_valid_list() {
        let weekend: WeekendConfig = serde_json::from_str("[0, 6]").unwrap();
        assert!(weekend.contains(Weekday::Sat));
        assert!(weekend.contains(Weekday::Sun));
    }
}
