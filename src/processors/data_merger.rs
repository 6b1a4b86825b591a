use crate::models::DailySeries;
use tracing::debug;

pub struct DataMerger;

impl DataMerger {
    pub fn new() -> Self {
        Self
    }

    /// Union of two daily series by date; `preferred` wins wherever it has a value.
    ///
    /// A missing value in `preferred` never hides a present value in `base`.
    pub fn merge_right_biased(&self, base: &DailySeries, preferred: &DailySeries) -> DailySeries {
        let mut merged = base.clone();
        let mut overridden = 0usize;

        for (date, value) in preferred.iter() {
            match (merged.get(date), value) {
                (Some(Some(_)), None) => continue,
                (Some(Some(_)), Some(_)) => overridden += 1,
                _ => {}
            }
            merged.insert(date, value);
        }

        debug!(
            base = base.len(),
            preferred = preferred.len(),
            merged = merged.len(),
            overridden,
            "merged daily series"
        );

        merged
    }
}

impl Default for DataMerger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2017, 1, d).unwrap()
    }

    #[test]
    fn test_merge_is_right_biased() {
        let reference: DailySeries = vec![(day(1), Some(5.8)), (day(2), Some(6.0))]
            .into_iter()
            .collect();
        let raw: DailySeries = vec![(day(2), Some(7.2)), (day(3), Some(4.4))]
            .into_iter()
            .collect();

        let merged = DataMerger::new().merge_right_biased(&reference, &raw);

        assert_eq!(
            merged.iter().collect::<Vec<_>>(),
            vec![
                (day(1), Some(5.8)),
                (day(2), Some(7.2)),
                (day(3), Some(4.4)),
            ]
        );
    }

    #[test]
    fn test_merge_coverage_is_commutative() {
        let a: DailySeries = vec![(day(1), Some(1.0)), (day(2), Some(2.0))]
            .into_iter()
            .collect();
        let b: DailySeries = vec![(day(2), Some(9.0)), (day(4), Some(4.0))]
            .into_iter()
            .collect();

        let merger = DataMerger::new();
        let ab = merger.merge_right_biased(&a, &b);
        let ba = merger.merge_right_biased(&b, &a);

        assert_eq!(ab.dates().collect::<Vec<_>>(), ba.dates().collect::<Vec<_>>());
        assert_eq!(ab.get(day(2)), Some(Some(9.0)));
        assert_eq!(ba.get(day(2)), Some(Some(2.0)));
    }

    #[test]
    fn test_missing_preferred_value_keeps_base() {
        let base: DailySeries = vec![(day(1), Some(1.0))].into_iter().collect();
        let preferred: DailySeries = vec![(day(1), None), (day(2), None)].into_iter().collect();

        let merged = DataMerger::new().merge_right_biased(&base, &preferred);

        assert_eq!(merged.get(day(1)), Some(Some(1.0)));
        assert_eq!(merged.get(day(2)), Some(None));
    }
}
