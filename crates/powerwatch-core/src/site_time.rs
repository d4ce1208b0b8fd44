use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// Wall clock in the monitored site's time zone.
///
/// `SiteClock::fixed` pins "now" so classification and day-rollover logic can
/// be exercised deterministically.
#[derive(Debug, Clone, Copy)]
pub struct SiteClock {
    tz: Tz,
    pinned: Option<DateTime<Utc>>,
}

impl SiteClock {
    #[must_use]
    pub fn new(tz: Tz) -> Self {
        Self { tz, pinned: None }
    }

    #[must_use]
    pub fn fixed(tz: Tz, at: DateTime<Utc>) -> Self {
        Self {
            tz,
            pinned: Some(at),
        }
    }

    #[must_use]
    pub fn tz(&self) -> Tz {
        self.tz
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Tz> {
        self.pinned.unwrap_or_else(Utc::now).with_timezone(&self.tz)
    }

    /// Calendar day at the site.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}
