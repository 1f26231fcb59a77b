use chi_core::cyclotron_frequency;
use proptest::prelude::*;

proptest! {
    #[test]
    fn cyclotron_frequency_is_linear_in_field(field in 1e-6f64..1e6, scale in 1e-3f64..1e3) {
        let scaled = cyclotron_frequency(scale * field);
        let expected = scale * cyclotron_frequency(field);
        prop_assert!((scaled - expected).abs() <= 1e-12 * expected.abs());
    }

    #[test]
    fn cyclotron_frequency_is_positive_for_positive_field(field in 1e-9f64..1e9) {
        prop_assert!(cyclotron_frequency(field) > 0.0);
    }
}

#[test]
fn doubling_field_doubles_frequency() {
    assert_eq!(cyclotron_frequency(2.0), 2.0 * cyclotron_frequency(1.0));
}
