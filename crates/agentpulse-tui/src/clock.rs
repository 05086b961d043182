//! Navbar clock and number formatting

use chrono::{DateTime, FixedOffset, Utc};

/// Indochina Time, UTC+7
const ICT_OFFSET_SECS: i32 = 7 * 3600;

/// `HH:MM:SS` in ICT
pub fn ict_time(at: DateTime<Utc>) -> String {
    match FixedOffset::east_opt(ICT_OFFSET_SECS) {
        Some(ict) => at.with_timezone(&ict).format("%H:%M:%S").to_string(),
        None => at.format("%H:%M:%S").to_string(),
    }
}

pub fn ict_clock(now: DateTime<Utc>) -> String {
    format!("{} ICT", ict_time(now))
}

/// `12345.678` → `$12,345.68`
pub fn format_usd(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!(
        "{}${}.{:02}",
        if negative { "-" } else { "" },
        grouped,
        cents % 100
    )
}

/// Shorten an address to `0x1234...abcd`
pub fn short_address(address: &str) -> String {
    if address.len() > 12 && address.is_ascii() {
        format!("{}...{}", &address[..6], &address[address.len() - 4..])
    } else {
        address.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_ict_is_utc_plus_seven() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 20, 15, 9).unwrap();
        assert_eq!(ict_clock(now), "03:15:09 ICT");
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(10_000.0), "$10,000.00");
        assert_eq!(format_usd(999.999), "$1,000.00");
        assert_eq!(format_usd(12.3), "$12.30");
        assert_eq!(format_usd(-4_500.5), "-$4,500.50");
    }

    #[test]
    fn test_short_address() {
        assert_eq!(
            short_address("0x00000000000000000000000000000000a9e00001"),
            "0x0000...0001"
        );
        assert_eq!(short_address("0xabc"), "0xabc");
    }
}
