use chrono::{DateTime, Utc};

/// Calendar date for profile labels, e.g. "January 2, 2020".
#[must_use]
pub fn format_date(value: DateTime<Utc>) -> String {
    value.format("%B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use edx_core::time::fixed_now;

    #[test]
    fn formats_long_month_without_padding() {
        assert_eq!(format_date(fixed_now()), "November 14, 2023");
    }
}
