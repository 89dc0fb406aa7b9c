use experiment_tools::{
    GenerationRequest, SearchOutcome, Sequence, build_histogram_html, generate_histogram_html,
    search,
};

#[test]
fn histogram_creates_file() {
    let request = GenerationRequest::skewed(100, 6.0).build().unwrap();
    let outcome = search(&request, &mut fastrand::Rng::with_seed(42));

    let path = std::env::temp_dir().join("test_histogram_creates_file.html");
    generate_histogram_html(&request, &outcome, &path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("<!DOCTYPE html>"));
    assert!(content.contains("plotly"));
    assert!(content.contains("Plotly.newPlot(\"histogram\""));
    std::fs::remove_file(&path).ok();
}

#[test]
fn histogram_summarises_search() {
    let request = GenerationRequest::uniform(3)
        .min_value(2.0)
        .max_value(6.0)
        .build()
        .unwrap();
    let outcome = SearchOutcome {
        sequence: Sequence::Discrete(vec![2, 4, 6]),
        converged: true,
        attempts: 7,
    };
    let html = build_histogram_html(&request, &outcome);

    assert!(html.contains("uniform (discrete)"));
    assert!(html.contains("3 trials"));
    assert!(html.contains("mean 4.000"));
    assert!(html.contains("converged after 7 attempts"));
    // Axis starts at the floor, ends at the largest value.
    assert!(html.contains("[1.5, 6.5]"));
}

#[test]
fn histogram_of_empty_sequence_has_no_chart_script() {
    let request = GenerationRequest::skewed(1, 2.0).build().unwrap();
    let outcome = SearchOutcome {
        sequence: Sequence::Discrete(Vec::new()),
        converged: false,
        attempts: 1,
    };
    let html = build_histogram_html(&request, &outcome);
    assert!(html.contains("</html>"));
    assert!(!html.contains("Plotly.newPlot"));
}

#[test]
fn histogram_to_invalid_path_fails() {
    let request = GenerationRequest::skewed(5, 2.0).build().unwrap();
    let outcome = search(&request, &mut fastrand::Rng::with_seed(1));
    let path = std::env::temp_dir()
        .join("missing_histogram_dir")
        .join("out.html");
    assert!(generate_histogram_html(&request, &outcome, &path).is_err());
}
