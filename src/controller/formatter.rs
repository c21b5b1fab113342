use chrono::{DateTime, Utc};

/// Formats a unix timestamp in seconds as a UTC `YYYY-MM-DD HH:MM:SS` string.
///
/// This is the x-axis label formatter handed to every chart widget.
#[must_use]
pub fn timestamp_to_datetime_string(seconds: f64) -> String {
    if !seconds.is_finite() {
        return "nan".to_owned();
    }
    let millis = (seconds * 1_000.0).round();
    if millis > i64::MAX as f64 || millis < i64::MIN as f64 {
        return format!("{seconds:.2}");
    }
    match DateTime::<Utc>::from_timestamp_millis(millis as i64) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => format!("{seconds:.2}"),
    }
}

#[cfg(test)]
mod tests {
    use super::timestamp_to_datetime_string;

    #[test]
    fn formats_epoch_and_fractional_seconds() {
        assert_eq!(timestamp_to_datetime_string(0.0), "1970-01-01 00:00:00");
        assert_eq!(
            timestamp_to_datetime_string(1_700_000_000.4),
            "2023-11-14 22:13:20"
        );
    }

    #[test]
    fn non_finite_input_is_reported_as_nan() {
        assert_eq!(timestamp_to_datetime_string(f64::NAN), "nan");
        assert_eq!(timestamp_to_datetime_string(f64::INFINITY), "nan");
    }
}
