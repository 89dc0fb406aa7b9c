//! HTML histogram of a generated sequence.
//!
//! Generate a self-contained HTML file with an embedded
//! [Plotly.js](https://plotly.com/javascript/) histogram for visual
//! inspection of a sequence's shape. Discrete sequences get one bin per
//! integer value; continuous ones get ten bins. The x-axis spans from the
//! requested floor to the largest generated value.
//!
//! Plotting is a side channel: it reads a finished [`SearchOutcome`] and
//! never influences the search.
//!
//! ```no_run
//! use experiment_tools::{GenerationRequest, generate_histogram_html, search};
//!
//! let request = GenerationRequest::skewed(100, 6.0).build().unwrap();
//! let outcome = search(&request, &mut fastrand::Rng::new());
//! generate_histogram_html(&request, &outcome, "iti.html").unwrap();
//! ```
//!
//! An internet connection is needed on first load to fetch `Plotly.js`
//! from a CDN.

use core::fmt::Write as _;
use std::path::Path;

use crate::request::GenerationRequest;
use crate::search::SearchOutcome;
use crate::sequence::Sequence;

/// Bin count for continuous sequences.
const CONTINUOUS_BINS: usize = 10;

/// Write an HTML histogram of `outcome` to `path`.
///
/// # Errors
///
/// Return an I/O error if the file cannot be created or written.
pub fn generate_histogram_html(
    request: &GenerationRequest,
    outcome: &SearchOutcome,
    path: impl AsRef<Path>,
) -> std::io::Result<()> {
    let html = build_histogram_html(request, outcome);
    std::fs::write(path, html)
}

/// Render the histogram page as a string.
#[must_use]
pub fn build_histogram_html(request: &GenerationRequest, outcome: &SearchOutcome) -> String {
    let mut html = String::with_capacity(4096);
    let status = if outcome.converged {
        "converged"
    } else {
        "not converged"
    };

    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>ITI Distribution</title>
<script src="https://cdn.plot.ly/plotly-2.35.2.min.js"></script>
<style>
  * {{ margin: 0; padding: 0; box-sizing: border-box; }}
  body {{ font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
         background: #f5f6fa; color: #2c3e50; padding: 24px; }}
  h1 {{ text-align: center; margin-bottom: 8px; font-size: 1.8em; }}
  .subtitle {{ text-align: center; color: #7f8c8d; margin-bottom: 24px; }}
  .chart {{ background: #fff; border-radius: 8px; box-shadow: 0 2px 8px rgba(0,0,0,0.08);
            margin-bottom: 24px; padding: 16px; }}
</style>
</head>
<body>
<h1>ITI Distribution</h1>
<p class="subtitle">{family} &middot; {n} trials &middot; mean {mean:.3} (target {target}) &middot; {status} after {attempts} attempts</p>
<div class="chart"><div id="histogram"></div></div>
"#,
        family = request.family(),
        n = outcome.sequence.len(),
        mean = outcome.mean(),
        target = request.desired_mean(),
        attempts = outcome.attempts,
    );

    write_histogram(&mut html, request, &outcome.sequence);

    html.push_str("</body>\n</html>\n");
    html
}

fn write_histogram(html: &mut String, request: &GenerationRequest, sequence: &Sequence) {
    let values = sequence.to_f64_vec();
    if values.is_empty() {
        return;
    }

    let low = request.min_value();
    let high = sequence.max().unwrap_or(low);

    let bins = match sequence {
        // Centre one unit-wide bin on every integer.
        Sequence::Discrete(_) => format!(
            "xbins: {{ start: {start}, end: {end}, size: 1 }}",
            start = low - 0.5,
            end = high + 0.5,
        ),
        Sequence::Continuous(_) => format!("nbinsx: {CONTINUOUS_BINS}"),
    };
    let range = if sequence.is_discrete() {
        format!("[{}, {}]", low - 0.5, high + 0.5)
    } else {
        format!("[{low}, {high}]")
    };

    let _ = write!(
        html,
        r##"<script>
Plotly.newPlot("histogram", [{{
  x: {values:?}, type: "histogram", {bins},
  marker: {{ color: "#3498db", line: {{ color: "#fff", width: 1 }} }}
}}], {{ xaxis: {{ title: "ITI", range: {range} }}, yaxis: {{ title: "Count" }},
       bargap: 0.05, margin: {{ t: 10 }} }},
   {{ responsive: true }});
</script>
"##,
    );
}
