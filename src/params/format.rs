const SIZE_UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

/// Formats a byte count with 1024-based units, rounded to a whole number.
///
/// Zero has no meaningful size and is reported as `n/a`. Counts beyond the
/// terabyte range stay in `TB`.
#[must_use]
pub fn bytes_to_human_readable_size(bytes: u64) -> String {
    if bytes == 0 {
        return "n/a".to_owned();
    }

    let mut unit = 0;
    let mut scaled = bytes;
    while scaled >= 1024 && unit < SIZE_UNITS.len() - 1 {
        scaled /= 1024;
        unit += 1;
    }

    let divisor = 1024_f64.powi(unit as i32);
    let value = (bytes as f64 / divisor).round();
    format!("{value} {}", SIZE_UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::bytes_to_human_readable_size;

    #[test]
    fn rounds_to_nearest_whole_unit() {
        assert_eq!(bytes_to_human_readable_size(1), "1 Bytes");
        assert_eq!(bytes_to_human_readable_size(1023), "1023 Bytes");
        assert_eq!(bytes_to_human_readable_size(1536), "2 KB");
        assert_eq!(bytes_to_human_readable_size(1535), "1 KB");
    }

    #[test]
    fn clamps_to_terabytes() {
        let five_pb = 5 * 1024_u64.pow(5);
        assert_eq!(bytes_to_human_readable_size(five_pb), "5120 TB");
    }
}
