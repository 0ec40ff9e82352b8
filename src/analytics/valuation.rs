// Valuation blender - combines the upstream model estimate, the area median
// and a purchase-price growth projection into the headline figure.
// The headline is the median of the available sources; the 70/30 blend is a
// legacy secondary figure. Missing inputs degrade to fewer sources.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::PropertyBaseline;

/// Assumed annual growth rate for the purchase-price projection
pub const ANNUAL_GROWTH_RATE: f64 = 0.04;

/// One contributing estimate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimateSource {
    /// Stable identifier: "model", "area_median" or "growth"
    pub id: &'static str,
    pub label: &'static str,
    pub value: f64,
}

/// The blender's output
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValuationBlend {
    /// Headline figure: median of the available sources
    pub estimated_value: Option<f64>,
    /// 70/30 growth/area-median combination, or the single present one
    pub blended_estimate: Option<f64>,
    pub growth_estimate: Option<f64>,
    pub sources: Vec<EstimateSource>,
}

/// Project the purchase price forward at the assumed annual rate.
/// Years held are counted in rounded 30-day months.
pub fn growth_estimate(baseline: &PropertyBaseline, today: NaiveDate) -> Option<f64> {
    let price = baseline.purchase_price?;
    let purchase_date = baseline.purchase_date?;
    let days = (today - purchase_date).num_days() as f64;
    let months_held = (days / 30.0).round();
    let years_held = months_held / 12.0;
    Some(price * (1.0 + ANNUAL_GROWTH_RATE * years_held))
}

/// Combine up to three optional sources into the blended and median figures.
/// With zero sources every output is None.
pub fn blend_estimates(
    model_estimate: Option<f64>,
    area_median: Option<f64>,
    baseline: &PropertyBaseline,
    today: NaiveDate,
) -> ValuationBlend {
    let growth = growth_estimate(baseline, today);

    let blended_estimate = match (growth, area_median) {
        (Some(g), Some(median)) => Some(g * 0.7 + median * 0.3),
        (Some(g), None) => Some(g),
        (None, Some(median)) => Some(median),
        (None, None) => None,
    };

    let mut sources = Vec::new();
    if let Some(value) = model_estimate {
        sources.push(EstimateSource {
            id: "model",
            label: "Model estimate",
            value,
        });
    }
    if let Some(value) = area_median {
        sources.push(EstimateSource {
            id: "area_median",
            label: "Area median",
            value,
        });
    }
    if let Some(value) = growth {
        sources.push(EstimateSource {
            id: "growth",
            label: "Growth projection",
            value,
        });
    }

    let estimated_value = median(sources.iter().map(|s| s.value));

    ValuationBlend {
        estimated_value,
        blended_estimate,
        growth_estimate: growth,
        sources,
    }
}

fn median(values: impl Iterator<Item = f64>) -> Option<f64> {
    let mut sorted: Vec<f64> = values.collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn baseline(price: Option<f64>, date: Option<NaiveDate>) -> PropertyBaseline {
        PropertyBaseline {
            purchase_price: price,
            purchase_date: date,
            ..Default::default()
        }
    }

    #[test]
    fn test_headline_is_median_not_mean_or_blend() {
        let purchase = day(2018, 1, 1);
        let today = day(2025, 6, 1);
        let b = baseline(Some(200000.0), Some(purchase));
        let growth = growth_estimate(&b, today).unwrap();

        let blend = blend_estimates(Some(200000.0), Some(210000.0), &b, today);
        let mut values = vec![200000.0, 210000.0, growth];
        values.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(blend.estimated_value, Some(values[1]));
        // the blended figure exists but is not the headline
        assert_eq!(
            blend.blended_estimate,
            Some(growth * 0.7 + 210000.0 * 0.3)
        );
    }

    #[test]
    fn test_median_of_three_known_sources() {
        let values = [200000.0, 210000.0, 260000.0];
        assert_eq!(median(values.iter().copied()), Some(210000.0));
    }

    #[test]
    fn test_zero_sources_yields_all_none() {
        let b = baseline(None, None);
        let blend = blend_estimates(None, None, &b, day(2025, 6, 1));
        assert_eq!(blend.estimated_value, None);
        assert_eq!(blend.blended_estimate, None);
        assert_eq!(blend.growth_estimate, None);
        assert!(blend.sources.is_empty());
    }

    #[test]
    fn test_single_source_degradation() {
        let b = baseline(None, None);
        let blend = blend_estimates(None, Some(325000.0), &b, day(2025, 6, 1));
        assert_eq!(blend.estimated_value, Some(325000.0));
        assert_eq!(blend.blended_estimate, Some(325000.0));
        assert_eq!(blend.sources.len(), 1);
        assert_eq!(blend.sources[0].id, "area_median");
    }

    #[test]
    fn test_two_sources_median_is_their_mean() {
        let purchase = day(2020, 1, 1);
        let today = day(2025, 1, 1);
        let b = baseline(Some(100000.0), Some(purchase));
        let growth = growth_estimate(&b, today).unwrap();
        let blend = blend_estimates(None, Some(150000.0), &b, today);
        assert_eq!(blend.estimated_value, Some((growth + 150000.0) / 2.0));
    }

    #[test]
    fn test_growth_uses_rounded_thirty_day_months() {
        // 2022-01-01 to 2022-12-27 is 360 days = exactly 12 thirty-day
        // months = 1.0 years held
        let b = baseline(Some(100000.0), Some(day(2022, 1, 1)));
        let growth = growth_estimate(&b, day(2022, 12, 27)).unwrap();
        assert!((growth - 104000.0).abs() < 1e-9);
    }

    #[test]
    fn test_growth_requires_both_price_and_date() {
        assert_eq!(
            growth_estimate(&baseline(Some(100000.0), None), day(2025, 1, 1)),
            None
        );
        assert_eq!(
            growth_estimate(&baseline(None, Some(day(2020, 1, 1))), day(2025, 1, 1)),
            None
        );
    }
}
