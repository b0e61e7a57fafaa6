//! Footer copyright year.

use time::Date;

pub const YEAR_ELEMENT_ID: &str = "year";

#[must_use]
pub fn copyright_year(today: Date) -> String {
    today.year().to_string()
}

#[cfg(test)]
mod tests {
    use time::Month;

    use super::*;

    #[test]
    fn year_is_calendar_year() {
        let d = Date::from_calendar_date(2026, Month::December, 31).unwrap();
        assert_eq!(copyright_year(d), "2026");
        let d = Date::from_calendar_date(2027, Month::January, 1).unwrap();
        assert_eq!(copyright_year(d), "2027");
    }
}
