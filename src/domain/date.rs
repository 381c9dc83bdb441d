//! `ddmmyyyy` date parsing for the temperature range endpoints.

use chrono::NaiveDate;
use thiserror::Error;

/// Number of characters in a `ddmmyyyy` date.
pub const DDMMYYYY_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("invalid ddmmyyyy date: {0:?}")]
    InvalidDateFormat(String),
}

/// Parse an 8-digit `ddmmyyyy` string into a calendar date.
///
/// The input must be exactly eight ASCII digits and must name a real day
/// (`31022020` is rejected, `29022020` is accepted). Year `0000` is rejected.
pub fn parse_ddmmyyyy(input: &str) -> Result<NaiveDate, DateError> {
    let invalid = || DateError::InvalidDateFormat(input.to_string());

    if input.len() != DDMMYYYY_LEN || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let day: u32 = input[0..2].parse().map_err(|_| invalid())?;
    let month: u32 = input[2..4].parse().map_err(|_| invalid())?;
    let year: i32 = input[4..8].parse().map_err(|_| invalid())?;

    if year < 1 {
        return Err(invalid());
    }

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use proptest::prelude::*;
    use rstest::rstest;

    #[test]
    fn test_parse_leading_zeros() {
        let date = parse_ddmmyyyy("01012020").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
    }

    #[test]
    fn test_parse_leap_day() {
        let date = parse_ddmmyyyy("29022020").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2020, 2, 29).unwrap());
    }

    #[rstest]
    #[case("")]
    #[case("0101201")]
    #[case("010120200")]
    #[case("01-01-20")]
    #[case("abcdefgh")]
    #[case("31022020")]
    #[case("29022019")]
    #[case("31042017")]
    #[case("00012017")]
    #[case("01132017")]
    #[case("99999999")]
    #[case("01010000")]
    #[case("+1012017")]
    #[case("０１０１２０２０")]
    fn test_parse_rejects_malformed(#[case] input: &str) {
        assert_eq!(
            parse_ddmmyyyy(input),
            Err(DateError::InvalidDateFormat(input.to_string()))
        );
    }

    proptest! {
        #[test]
        fn test_parse_roundtrips_real_dates(days in 0i64..(400 * 365)) {
            let expected = NaiveDate::from_ymd_opt(1800, 1, 1).unwrap()
                + chrono::Duration::days(days);
            let input = format!(
                "{:02}{:02}{:04}",
                expected.day(),
                expected.month(),
                expected.year()
            );
            prop_assert_eq!(parse_ddmmyyyy(&input), Ok(expected));
        }
    }
}
