//! Date parsing and date-range filtering for the rentals list.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime};

use crate::models::Rental;

/// Selectable date-range filters for the rentals list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFilter {
    /// Trailing 7 days including today.
    Week,
    /// The calendar month containing today.
    Month,
    /// No filtering.
    All,
}

/// An inclusive datetime interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    pub fn contains(&self, t: NaiveDateTime) -> bool {
        t >= self.start && t <= self.end
    }
}

/// Parse a backend or form timestamp. Accepts RFC 3339 as well as the naive
/// `datetime-local` shapes with and without seconds.
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    // A bare date counts as the start of that day.
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map(|d| d.and_time(NaiveTime::MIN)).ok()
}

fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    let last_tick = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).expect("valid clock time");
    date.and_time(last_tick)
}

/// Resolve a filter to an inclusive interval anchored at `today`.
/// `All` has no interval.
pub fn filter_range(filter: DateFilter, today: NaiveDate) -> Option<DateRange> {
    match filter {
        DateFilter::All => None,
        DateFilter::Week => {
            let start_day = today - chrono::Days::new(6);
            Some(DateRange {
                start: start_day.and_time(NaiveTime::MIN),
                end: end_of_day(today),
            })
        }
        DateFilter::Month => {
            let first = today.with_day(1).unwrap_or(today);
            let next_month_first = if today.month() == 12 {
                NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)
            } else {
                NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1)
            };
            let last = next_month_first
                .and_then(|d| d.pred_opt())
                .unwrap_or(today);
            Some(DateRange {
                start: first.and_time(NaiveTime::MIN),
                end: end_of_day(last),
            })
        }
    }
}

/// Overlap semantics, not containment: a rental is in range when its start
/// falls inside, its end falls inside, or it spans the entire range.
/// Rentals with unparseable dates never match a bounded range.
pub fn rental_overlaps(rental: &Rental, range: &DateRange) -> bool {
    let (Some(start), Some(end)) = (
        parse_datetime(&rental.start_date),
        parse_datetime(&rental.end_date),
    ) else {
        return false;
    };

    range.contains(start) || range.contains(end) || (start <= range.start && end >= range.end)
}

/// Apply a date filter to a rentals list, anchored at `today`.
pub fn filter_rentals<'a>(
    rentals: &'a [Rental],
    filter: DateFilter,
    today: NaiveDate,
) -> Vec<&'a Rental> {
    match filter_range(filter, today) {
        None => rentals.iter().collect(),
        Some(range) => rentals
            .iter()
            .filter(|r| rental_overlaps(r, &range))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RentalSource, RentalStatus};

    fn rental(start: &str, end: &str) -> Rental {
        Rental {
            id: 1,
            equipment_id: 1,
            equipment_instance: Some(1),
            start_date: start.to_string(),
            end_date: end.to_string(),
            customer_name: "Иванов Иван".to_string(),
            customer_phone: "79991234567".to_string(),
            needs_delivery: false,
            delivery_address: None,
            rental_price: 1000.0,
            delivery_price: 0.0,
            delivery_costs: 0.0,
            source: RentalSource::Avito,
            comment: None,
            status: RentalStatus::Active,
            created_at: start.to_string(),
            updated_at: start.to_string(),
            equipment_name: None,
        }
    }

    fn anchor() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn test_week_range_is_trailing_seven_days() {
        let range = filter_range(DateFilter::Week, anchor()).unwrap();
        assert_eq!(
            range.start,
            NaiveDate::from_ymd_opt(2024, 6, 9).unwrap().and_time(NaiveTime::MIN)
        );
        assert!(range.contains(parse_datetime("2024-06-15T23:59").unwrap()));
        assert!(!range.contains(parse_datetime("2024-06-16T00:00").unwrap()));
    }

    #[test]
    fn test_week_filter_includes_spanning_rental() {
        // Starts before the window and ends after it, so neither endpoint is
        // inside, yet the rental covers the whole window.
        let spanning = rental("2024-06-01T10:00", "2024-06-30T10:00");
        let range = filter_range(DateFilter::Week, anchor()).unwrap();
        assert!(rental_overlaps(&spanning, &range));
    }

    #[test]
    fn test_week_filter_excludes_past_rental() {
        let past = rental("2024-05-01T10:00", "2024-05-31T10:00");
        let range = filter_range(DateFilter::Week, anchor()).unwrap();
        assert!(!rental_overlaps(&past, &range));
    }

    #[test]
    fn test_boundary_straddling_rentals_included() {
        let range = filter_range(DateFilter::Week, anchor()).unwrap();
        // Ends inside the window.
        assert!(rental_overlaps(&rental("2024-06-05T10:00", "2024-06-10T10:00"), &range));
        // Starts inside the window.
        assert!(rental_overlaps(&rental("2024-06-14T10:00", "2024-06-20T10:00"), &range));
    }

    #[test]
    fn test_month_range_covers_calendar_month() {
        let range = filter_range(DateFilter::Month, anchor()).unwrap();
        assert!(range.contains(parse_datetime("2024-06-01T00:00").unwrap()));
        assert!(range.contains(parse_datetime("2024-06-30T23:59").unwrap()));
        assert!(!range.contains(parse_datetime("2024-07-01T00:00").unwrap()));
    }

    #[test]
    fn test_december_month_range() {
        let december = NaiveDate::from_ymd_opt(2024, 12, 10).unwrap();
        let range = filter_range(DateFilter::Month, december).unwrap();
        assert!(range.contains(parse_datetime("2024-12-31T12:00").unwrap()));
        assert!(!range.contains(parse_datetime("2025-01-01T00:00").unwrap()));
    }

    #[test]
    fn test_all_filter_returns_everything() {
        let rentals = vec![
            rental("2020-01-01T00:00", "2020-01-02T00:00"),
            rental("2030-01-01T00:00", "2030-01-02T00:00"),
        ];
        assert_eq!(filter_rentals(&rentals, DateFilter::All, anchor()).len(), 2);
        assert_eq!(filter_rentals(&rentals, DateFilter::Week, anchor()).len(), 0);
    }

    #[test]
    fn test_parse_datetime_accepts_common_shapes() {
        assert!(parse_datetime("2024-06-15T10:30").is_some());
        assert!(parse_datetime("2024-06-15T10:30:45").is_some());
        assert!(parse_datetime("2024-06-15T10:30:45.123Z").is_some());
        assert!(parse_datetime("2024-06-15").is_some());
        assert!(parse_datetime("not a date").is_none());
    }
}
