//! Property tests for the history store.

use nalgebra::DVector;
use pd_solver::{History, HistoryCapacity};
use proptest::prelude::*;

fn build_history(increments: &[f64], values: &[f64]) -> History {
    let mut h = History::new(
        0.0,
        DVector::from_vec(vec![values[0]]),
        HistoryCapacity::Unbounded,
    );
    let mut t = 0.0;
    for (dt, v) in increments.iter().zip(values[1..].iter()) {
        t += dt;
        h.append(t, DVector::from_vec(vec![*v])).unwrap();
    }
    h
}

proptest! {
    #[test]
    fn committed_samples_read_back_exactly(
        increments in prop::collection::vec(1e-3_f64..10.0, 1..40),
        values in prop::collection::vec(-1e6_f64..1e6, 41),
    ) {
        let h = build_history(&increments, &values);
        for (t, y) in h.iter() {
            let read = h.sample(t).unwrap();
            prop_assert_eq!(&read, y);
        }
    }

    #[test]
    fn interpolant_stays_within_bracketing_samples(
        increments in prop::collection::vec(1e-3_f64..10.0, 1..40),
        values in prop::collection::vec(-1e6_f64..1e6, 41),
        frac in 0.0_f64..1.0,
    ) {
        let h = build_history(&increments, &values);
        let pairs: Vec<(f64, f64)> = h.iter().map(|(t, y)| (t, y[0])).collect();
        for w in pairs.windows(2) {
            let (ta, ya) = w[0];
            let (tb, yb) = w[1];
            let t = ta + frac * (tb - ta);
            let read = h.sample(t).unwrap()[0];
            let (lo, hi) = (ya.min(yb), ya.max(yb));
            prop_assert!(read >= lo - 1e-9 && read <= hi + 1e-9);
        }
    }

    #[test]
    fn pre_start_is_the_initial_constant(
        increments in prop::collection::vec(1e-3_f64..10.0, 1..40),
        values in prop::collection::vec(-1e6_f64..1e6, 41),
        before in -1e9_f64..=0.0,
    ) {
        let h = build_history(&increments, &values);
        let read = h.sample(before).unwrap();
        prop_assert_eq!(read[0], values[0]);
    }

    #[test]
    fn beyond_last_sample_is_refused(
        increments in prop::collection::vec(1e-3_f64..10.0, 1..40),
        values in prop::collection::vec(-1e6_f64..1e6, 41),
        beyond in 1e-6_f64..1e6,
    ) {
        let h = build_history(&increments, &values);
        prop_assert!(h.sample(h.last_time() + beyond).is_err());
    }
}
