pub fn mean(data: &[f64]) -> Option<f64> {
    let sum = data.iter().sum::<f64>();
    let count = data.len();

    match count {
        positive if positive > 0 => Some(sum / count as f64),
        _ => None,
    }
}

/// Mean of whole-number scores rounded to the nearest integer, 0 when empty
pub fn rounded_mean(data: &[u32]) -> u32 {
    let values: Vec<f64> = data.iter().map(|&v| v as f64).collect();
    mean(&values).map_or(0, |m| m.round() as u32)
}
