//! Property tests for the calibrator core.

use adcal::calibrator::fit;
use adcal::sample::{Sample, SampleSet};
use proptest::prelude::*;

/// Strategy: well-posed sample sets on an exact line with distinct raws.
fn exact_line_sets() -> impl Strategy<Value = (f64, f64, SampleSet)> {
    (
        -1.0e3_f64..1.0e3,                                   // slope
        -1.0e3_f64..1.0e3,                                   // intercept
        proptest::collection::vec(-1.0e4_f64..1.0e4, 3..32), // raw readings
    )
        .prop_filter_map("raws must have spread", |(slope, intercept, raws)| {
            if slope.abs() < 1e-2 {
                return None;
            }
            let min = raws.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = raws.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            if max - min < 10.0 {
                return None;
            }
            let samples: Vec<Sample> = raws
                .iter()
                .map(|&raw| Sample::new(slope * raw + intercept, raw))
                .collect();
            SampleSet::new(samples)
                .ok()
                .map(|set| (slope, intercept, set))
        })
}

proptest! {
    /// Noise-free samples recover their generating line.
    #[test]
    fn exact_recovery((slope, intercept, samples) in exact_line_sets()) {
        let fitted = fit(&samples).unwrap();

        let scale = slope.abs().max(1.0);
        prop_assert!((fitted.slope - slope).abs() / scale < 1e-6);
        let offset_scale = intercept.abs().max(1.0);
        prop_assert!((fitted.intercept - intercept).abs() / offset_scale < 1e-2);
        prop_assert!(fitted.r_squared > 1.0 - 1e-9);
    }

    /// Round-trip law: invert(predict(raw)) == raw.
    #[test]
    fn round_trip((_slope, _intercept, samples) in exact_line_sets(), raw in -1.0e5_f64..1.0e5) {
        let fitted = fit(&samples).unwrap();
        let back = fitted.invert(fitted.predict(raw)).unwrap();
        prop_assert!((back - raw).abs() < 1e-3 * raw.abs().max(1.0));
    }

    /// Reordering the samples does not change the fit.
    #[test]
    fn order_invariance((_slope, _intercept, samples) in exact_line_sets()) {
        let mut reversed: Vec<Sample> = samples.iter().copied().collect();
        reversed.reverse();
        let reversed = SampleSet::new(reversed).unwrap();

        let a = fit(&samples).unwrap();
        let b = fit(&reversed).unwrap();

        prop_assert!((a.slope - b.slope).abs() <= 1e-9 * a.slope.abs().max(1.0));
        prop_assert!((a.intercept - b.intercept).abs() <= 1e-6 * a.intercept.abs().max(1.0));
    }
}
