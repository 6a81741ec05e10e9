//! Client record.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use praxis_core::types::id::ClientId;

/// A client of the practice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    /// Unique client ID.
    pub id: ClientId,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Contact e-mail, if known.
    pub email: Option<String>,
    /// Date of birth, if known.
    pub birth_date: Option<NaiveDate>,
    /// When the client last had an appointment.
    pub last_visit_at: Option<DateTime<Utc>>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl Client {
    /// Full display name, "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Whether the client's birthday falls within the next `days` days,
    /// today included.
    ///
    /// The comparison is by calendar month and day. A Feb 29 birthday
    /// matches Mar 1 in non-leap years.
    pub fn birthday_within(&self, today: NaiveDate, days: u32) -> bool {
        let Some(birth_date) = self.birth_date else {
            return false;
        };
        for offset in 0..=days {
            let candidate = today + Duration::days(i64::from(offset));
            let matches = if birth_date.month() == 2 && birth_date.day() == 29 {
                // Feb 29 shifts to Mar 1 when the candidate year has no
                // leap day.
                NaiveDate::from_ymd_opt(candidate.year(), 2, 29)
                    .map(|leap| candidate == leap)
                    .unwrap_or(candidate.month() == 3 && candidate.day() == 1)
            } else {
                candidate.month() == birth_date.month() && candidate.day() == birth_date.day()
            };
            if matches {
                return true;
            }
        }
        false
    }

    /// Whether the client has had no visit since the given cutoff.
    /// Clients with no recorded visit at all count as inactive.
    pub fn inactive_since(&self, cutoff: DateTime<Utc>) -> bool {
        match self.last_visit_at {
            Some(last_visit) => last_visit < cutoff,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_with_birth_date(birth_date: Option<NaiveDate>) -> Client {
        Client {
            id: ClientId::new(),
            first_name: "Ada".to_string(),
            last_name: "Byron".to_string(),
            email: None,
            birth_date,
            last_visit_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_birthday_within_window() {
        let birth = NaiveDate::from_ymd_opt(1990, 6, 15).unwrap();
        let client = client_with_birth_date(Some(birth));

        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        assert!(client.birthday_within(today, 7));
        assert!(!client.birthday_within(today, 4));

        // Today itself counts.
        let on_the_day = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert!(client.birthday_within(on_the_day, 0));
    }

    #[test]
    fn test_birthday_across_year_end() {
        let birth = NaiveDate::from_ymd_opt(1985, 1, 2).unwrap();
        let client = client_with_birth_date(Some(birth));
        let today = NaiveDate::from_ymd_opt(2024, 12, 29).unwrap();
        assert!(client.birthday_within(today, 7));
    }

    #[test]
    fn test_leap_day_birthday_in_common_year() {
        let birth = NaiveDate::from_ymd_opt(1992, 2, 29).unwrap();
        let client = client_with_birth_date(Some(birth));

        // 2023 has no Feb 29; the birthday is observed on Mar 1.
        let today = NaiveDate::from_ymd_opt(2023, 2, 26).unwrap();
        assert!(client.birthday_within(today, 7));

        // 2024 is a leap year; Feb 29 matches directly.
        let today = NaiveDate::from_ymd_opt(2024, 2, 26).unwrap();
        assert!(client.birthday_within(today, 7));
    }

    #[test]
    fn test_missing_birth_date_never_matches() {
        let client = client_with_birth_date(None);
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        assert!(!client.birthday_within(today, 365));
    }

    #[test]
    fn test_inactive_since() {
        let cutoff = Utc::now() - Duration::days(90);
        let mut client = client_with_birth_date(None);

        assert!(client.inactive_since(cutoff));

        client.last_visit_at = Some(Utc::now() - Duration::days(120));
        assert!(client.inactive_since(cutoff));

        client.last_visit_at = Some(Utc::now() - Duration::days(10));
        assert!(!client.inactive_since(cutoff));
    }
}
