pub fn mean(data: &[f64]) -> Option<f64> {
    match data.len() {
        0 => None,
        count => Some(data.iter().sum::<f64>() / count as f64),
    }
}

/// Population standard deviation.
pub fn std_dev(data: &[f64]) -> Option<f64> {
    let data_mean = mean(data)?;
    let variance = data
        .iter()
        .map(|value| {
            let diff = data_mean - *value;
            diff * diff
        })
        .sum::<f64>()
        / data.len() as f64;

    Some(variance.sqrt())
}

/// Signed offset in whole milliseconds, e.g. "-42ms" or "+7ms".
pub fn format_offset_ms(offset_secs: f64) -> String {
    let ms = (offset_secs * 1000.0).round() as i64;
    if ms > 0 {
        format!("+{ms}ms")
    } else {
        format!("{ms}ms")
    }
}

/// Whole seconds left on a countdown, rounded up like a game clock.
pub fn countdown_secs(remaining: f64) -> u64 {
    remaining.max(0.0).ceil() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[10., 20., 30., 15., 22.]), Some(19.4));
        assert_eq!(mean(&[-0.1, 0.0, 0.1]), Some(0.0));
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_std_dev() {
        assert_eq!(std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]), Some(2.0));
        assert_eq!(std_dev(&[0.25]), Some(0.0));
        assert_eq!(std_dev(&[]), None);
    }

    #[test]
    fn test_format_offset_ms() {
        assert_eq!(format_offset_ms(0.0421), "+42ms");
        assert_eq!(format_offset_ms(-0.15), "-150ms");
        assert_eq!(format_offset_ms(0.0), "0ms");
    }

    #[test]
    fn test_countdown_secs() {
        assert_eq!(countdown_secs(89.2), 90);
        assert_eq!(countdown_secs(1.0), 1);
        assert_eq!(countdown_secs(0.0), 0);
        assert_eq!(countdown_secs(-3.0), 0);
    }
}
