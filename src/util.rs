//! Small numeric helpers for the dashboard aggregates.

pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

pub fn std_dev(data: &[f64]) -> Option<f64> {
    let m = mean(data)?;
    let variance = data.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / data.len() as f64;
    Some(variance.sqrt())
}
