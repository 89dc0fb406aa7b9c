use experiment_tools::{Error, GenerationRequest, JitterGenerator, UniformBounds, search};

#[test]
fn discrete_values_stay_within_bounds() {
    let generator = JitterGenerator::with_seed(31);
    let outcome = generator
        .generate_uniform(300, |b| b.min_value(2.0).max_value(10.0))
        .unwrap();

    let values = outcome.sequence.as_discrete().unwrap();
    assert!(values.iter().all(|v| (2..=10).contains(v)));
    // Both endpoints are reachable.
    assert!(values.contains(&2));
    assert!(values.contains(&10));
}

#[test]
fn continuous_values_stay_within_bounds() {
    let generator = JitterGenerator::with_seed(32);
    let outcome = generator
        .generate_uniform(300, |b| b.desired_mean(3.0).min_value(0.5).discrete(false))
        .unwrap();

    let values = outcome.sequence.as_continuous().unwrap();
    assert!(values.iter().all(|v| (0.5..=5.5).contains(v)));
    assert!(values.iter().any(|v| v.fract() != 0.0));
}

#[test]
fn any_two_constraints_determine_the_third() {
    let from_min_max = GenerationRequest::uniform(10)
        .min_value(2.0)
        .max_value(10.0)
        .build()
        .unwrap();
    let from_mean_min = GenerationRequest::uniform(10)
        .desired_mean(6.0)
        .min_value(2.0)
        .build()
        .unwrap();
    let from_mean_max = GenerationRequest::uniform(10)
        .desired_mean(6.0)
        .max_value(10.0)
        .build()
        .unwrap();

    for request in [&from_min_max, &from_mean_min, &from_mean_max] {
        assert_eq!(request.desired_mean(), 6.0);
        assert_eq!(request.min_value(), 2.0);
        assert_eq!(request.max_value(), Some(10.0));
    }
}

#[test]
fn wrong_number_of_constraints_is_rejected() {
    let over = GenerationRequest::uniform(10)
        .desired_mean(6.0)
        .min_value(2.0)
        .max_value(10.0)
        .build()
        .unwrap_err();
    assert!(matches!(
        over,
        Error::InvalidParameter {
            name: "constraints",
            ..
        }
    ));
    assert!(over.to_string().contains("over-specified"));

    let under = GenerationRequest::uniform(10).min_value(2.0).build().unwrap_err();
    assert!(under.to_string().contains("under-specified"));
}

#[test]
fn inverted_bounds_are_rejected() {
    assert!(
        GenerationRequest::uniform(10)
            .min_value(10.0)
            .max_value(2.0)
            .build()
            .is_err()
    );
    assert!(
        GenerationRequest::uniform(10)
            .desired_mean(1.0)
            .min_value(3.0)
            .build()
            .is_err()
    );
}

#[test]
fn discrete_rejects_fractional_derived_bound() {
    // 2 * 5.25 - 2 = 8.5
    let err = GenerationRequest::uniform(10)
        .desired_mean(5.25)
        .min_value(2.0)
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("max_value"));

    let ok = GenerationRequest::uniform(10)
        .desired_mean(5.25)
        .min_value(2.0)
        .discrete(false)
        .build()
        .unwrap();
    assert_eq!(ok.max_value(), Some(8.5));
}

#[test]
fn half_integer_mean_from_integer_bounds() {
    let request = GenerationRequest::uniform(40)
        .min_value(1.0)
        .max_value(4.0)
        .build()
        .unwrap();
    assert_eq!(request.desired_mean(), 2.5);

    let outcome = search(&request, &mut fastrand::Rng::with_seed(9));
    assert!(outcome.converged);
    assert!((outcome.mean() - 2.5).abs() <= 0.05);
}

#[test]
fn bounds_helper_matches_builder() {
    let bounds = UniformBounds::derive(Some(4.0), None, Some(7.0)).unwrap();
    let request = GenerationRequest::uniform(5)
        .constraints(Some(4.0), None, Some(7.0))
        .build()
        .unwrap();
    assert_eq!(request.min_value(), bounds.min);
    assert_eq!(request.max_value(), Some(bounds.max));
}

#[test]
fn discrete_bounds_beyond_exact_integer_range_are_rejected() {
    let err = GenerationRequest::uniform(10)
        .min_value(1e19)
        .max_value(3e19)
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("min_value"));

    // A derived bound is checked as well: 2 * 6e15 - 2 = 1.2e16 > 2^53.
    let err = GenerationRequest::uniform(10)
        .desired_mean(6e15)
        .min_value(2.0)
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("max_value"));

    let outcome = JitterGenerator::with_seed(5)
        .generate_uniform(50, |b| {
            b.min_value(1e19).max_value(3e19).discrete(false).tolerance(1e18)
        })
        .unwrap();
    assert!(outcome.sequence.min().unwrap() >= 1e19);
}
