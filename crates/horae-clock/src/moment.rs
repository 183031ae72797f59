use chrono::{Datelike, Local, Timelike};

/// Wall-clock time sampled once per repaint.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Moment {
    /// 0–23.
    pub hour: u32,
    /// 0–59.
    pub minute: u32,
    /// 0–59.
    pub second: u32,
    /// Day of month, 1–31.
    pub day: u32,
}

impl Moment {
    #[inline]
    pub const fn new(hour: u32, minute: u32, second: u32, day: u32) -> Self {
        Self { hour, minute, second, day }
    }

    /// Reads the fields of any chrono date-time.
    pub fn sample<T: Timelike + Datelike>(t: &T) -> Self {
        Self::new(t.hour(), t.minute(), t.second(), t.day())
    }

    /// Current local time.
    pub fn now() -> Self {
        Self::sample(&Local::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn samples_every_field() {
        let t = NaiveDate::from_ymd_opt(2024, 3, 15)
            .and_then(|d| d.and_hms_opt(18, 30, 5))
            .unwrap();
        assert_eq!(Moment::sample(&t), Moment::new(18, 30, 5, 15));
    }

    #[test]
    fn leap_second_reads_as_59() {
        // chrono encodes a leap second as second 59 with nanos >= 1e9.
        let t = NaiveDate::from_ymd_opt(2016, 12, 31)
            .and_then(|d| d.and_hms_milli_opt(23, 59, 59, 1_500))
            .unwrap();
        assert_eq!(Moment::sample(&t).second, 59);
    }
}
