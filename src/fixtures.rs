// Fixed sample-data builders. Pure functions, no randomness: the suite
// runs on a corpus of exactly one booking.

use crate::model::{BookingRecord, StayDates};
use chrono::NaiveDate;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("fixture dates are valid")
}

// The record every create scenario posts.
pub fn sample_booking() -> BookingRecord {
    BookingRecord {
        first_name: "Jim".to_string(),
        last_name: "Brown".to_string(),
        total_price: 111,
        deposit_paid: true,
        dates: StayDates {
            check_in: date(2023, 1, 1),
            check_out: date(2023, 1, 2),
        },
        additional_needs: Some("Breakfast".to_string()),
    }
}

// The replacement value the update scenario PUTs over the created record.
pub fn updated_booking() -> BookingRecord {
    BookingRecord {
        first_name: "Updated".to_string(),
        last_name: "Name".to_string(),
        total_price: 222,
        deposit_paid: false,
        dates: StayDates {
            check_in: date(2023, 1, 1),
            check_out: date(2023, 1, 3),
        },
        additional_needs: Some("Lunch".to_string()),
    }
}
