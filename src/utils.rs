// Utility functions
use chrono::{DateTime, Utc};

/// Date as shown in report headings, e.g. `17/03/2024`.
pub fn format_report_date(at: DateTime<Utc>) -> String {
    at.format("%d/%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn report_date_format() {
        let at = Utc.with_ymd_and_hms(2024, 3, 7, 15, 0, 0).unwrap();
        assert_eq!(format_report_date(at), "07/03/2024");
    }
}
