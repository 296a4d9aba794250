use typetrial::time_series::ProgressSeries;

/// Compute X (rounds) and Y (wpm / accuracy) bounds for the progress chart
pub fn compute_chart_params(series: &ProgressSeries) -> (f64, f64) {
    let highest = series
        .wpm_data()
        .iter()
        .chain(series.accuracy_data())
        .copied()
        .max()
        .unwrap_or(0);

    let last_round = series.time_points().last().copied().unwrap_or(1).max(2) as f64;

    // round up so the top point never sits on the frame
    let ceiling = ((highest as f64 / 10.0).ceil() * 10.0).max(10.0);

    (last_round, ceiling)
}

/// Format a simple numeric label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}
