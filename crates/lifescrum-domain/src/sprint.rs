use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

pub type SprintId = String;

/// One Monday-to-Sunday planning week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sprint {
    pub id: SprintId,
    pub iso_week: u32,
    pub year: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Sprint {
    /// The sprint whose week contains `date`.
    pub fn containing(date: NaiveDate) -> Self {
        let monday = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
        let week = monday.iso_week();
        Self {
            id: sprint_id(week.week(), week.year()),
            iso_week: week.week(),
            year: week.year(),
            start_date: monday,
            end_date: monday + Duration::days(6),
        }
    }

    pub fn for_week(iso_week: u32, year: i32) -> Option<Self> {
        week_dates(iso_week, year).map(|(monday, _)| Self::containing(monday))
    }

    pub fn next(&self) -> Self {
        Self::containing(self.start_date + Duration::days(7))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

pub fn sprint_id(iso_week: u32, year: i32) -> SprintId {
    format!("Week-{}-{}", iso_week, year)
}

/// ISO week number and ISO week-year of `today`.
pub fn current_week(today: NaiveDate) -> (u32, i32) {
    let week = today.iso_week();
    (week.week(), week.year())
}

/// Monday and Sunday of an ISO week, `None` if the week does not exist in that year.
pub fn week_dates(iso_week: u32, year: i32) -> Option<(NaiveDate, NaiveDate)> {
    NaiveDate::from_isoywd_opt(year, iso_week, Weekday::Mon)
        .map(|monday| (monday, monday + Duration::days(6)))
}

/// `weeks` consecutive sprints starting with the week that contains `today`.
///
/// Weeks follow the ISO calendar, so a long year yields a week 53 before
/// rolling over to week 1 of the next ISO year.
pub fn generate_sprints_from(today: NaiveDate, weeks: u32) -> Vec<Sprint> {
    let mut sprint = Sprint::containing(today);
    let mut sprints = Vec::with_capacity(weeks as usize);
    for _ in 0..weeks {
        let next = sprint.next();
        sprints.push(sprint);
        sprint = next;
    }
    sprints
}

pub fn generate_sprints(weeks: u32) -> Vec<Sprint> {
    generate_sprints_from(today(), weeks)
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_sprint_id_format() {
        assert_eq!(sprint_id(7, 2025), "Week-7-2025");
    }

    #[test]
    fn test_containing_spans_monday_to_sunday() {
        // 2025-01-15 is a Wednesday in ISO week 3
        let sprint = Sprint::containing(date(2025, 1, 15));
        assert_eq!(sprint.id, "Week-3-2025");
        assert_eq!(sprint.start_date, date(2025, 1, 13));
        assert_eq!(sprint.end_date, date(2025, 1, 19));
        assert_eq!(sprint.start_date.weekday(), Weekday::Mon);
        assert_eq!(sprint.end_date.weekday(), Weekday::Sun);
        assert!(sprint.contains(date(2025, 1, 19)));
        assert!(!sprint.contains(date(2025, 1, 20)));
    }

    #[test]
    fn test_generate_count_and_consecutive() {
        let sprints = generate_sprints_from(date(2025, 6, 4), 12);
        assert_eq!(sprints.len(), 12);
        for pair in sprints.windows(2) {
            assert_eq!(pair[1].start_date - pair[0].start_date, Duration::days(7));
            assert_eq!(pair[0].end_date - pair[0].start_date, Duration::days(6));
        }
    }

    #[test]
    fn test_year_rollover_after_week_52() {
        // 2024-12-25 is in ISO week 52 of 2024
        let sprints = generate_sprints_from(date(2024, 12, 25), 2);
        assert_eq!((sprints[0].iso_week, sprints[0].year), (52, 2024));
        assert_eq!((sprints[1].iso_week, sprints[1].year), (1, 2025));
        assert_eq!(sprints[1].id, "Week-1-2025");
        assert_eq!(sprints[1].start_date, date(2024, 12, 30));
    }

    #[test]
    fn test_long_year_has_week_53() {
        // 2026 is a 53-week ISO year
        let sprints = generate_sprints_from(date(2026, 12, 22), 3);
        let weeks: Vec<(u32, i32)> = sprints.iter().map(|s| (s.iso_week, s.year)).collect();
        assert_eq!(weeks, vec![(52, 2026), (53, 2026), (1, 2027)]);
    }

    #[test]
    fn test_week_dates() {
        assert_eq!(
            week_dates(1, 2025),
            Some((date(2024, 12, 30), date(2025, 1, 5)))
        );
        assert_eq!(week_dates(53, 2025), None);
        assert_eq!(current_week(date(2025, 1, 1)), (1, 2025));
    }

    #[test]
    fn test_zero_weeks_is_empty() {
        assert!(generate_sprints_from(date(2025, 1, 1), 0).is_empty());
    }
}
