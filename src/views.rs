//! Derived read-only views over a directory snapshot: search/filter,
//! headline stats, and display helpers for dates and ages.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::models::{EmployeeRecord, Gender};

/// Gender filter: everyone or a single gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenderFilter {
    #[default]
    All,
    Only(Gender),
}

impl GenderFilter {
    pub fn matches(&self, gender: Gender) -> bool {
        match self {
            GenderFilter::All => true,
            GenderFilter::Only(g) => *g == gender,
        }
    }
}

impl FromStr for GenderFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(GenderFilter::All);
        }
        s.parse().map(GenderFilter::Only)
    }
}

impl fmt::Display for GenderFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenderFilter::All => f.write_str("all"),
            GenderFilter::Only(g) => write!(f, "{g}"),
        }
    }
}

/// Active-status filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl StatusFilter {
    pub fn matches(&self, is_active: bool) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => is_active,
            StatusFilter::Inactive => !is_active,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "active" => Ok(StatusFilter::Active),
            "inactive" => Ok(StatusFilter::Inactive),
            other => Err(format!("unknown status '{other}' (expected all, active or inactive)")),
        }
    }
}

/// Search and filter criteria for the employee list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeFilter {
    /// Case-insensitive substring of the full name. Empty matches all.
    pub search: String,
    pub gender: GenderFilter,
    pub status: StatusFilter,
}

impl EmployeeFilter {
    pub fn matches(&self, record: &EmployeeRecord) -> bool {
        let search_match =
            self.search.is_empty() || record.full_name.to_lowercase().contains(&self.search.to_lowercase());

        search_match && self.gender.matches(record.gender) && self.status.matches(record.is_active)
    }
}

/// Records matching `criteria`, in collection order.
pub fn filter<'a>(records: &'a [EmployeeRecord], criteria: &EmployeeFilter) -> Vec<&'a EmployeeRecord> {
    records.iter().filter(|r| criteria.matches(r)).collect()
}

/// Headline counts for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DirectoryStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub active_percentage: u32,
    /// Complement of `active_percentage`, not an independent rounding.
    pub inactive_percentage: u32,
}

/// Compute headline stats for a snapshot.
pub fn stats(records: &[EmployeeRecord]) -> DirectoryStats {
    let total = records.len();
    let active = records.iter().filter(|r| r.is_active).count();
    let inactive = total - active;
    let active_percentage = if total > 0 {
        (active as f64 / total as f64 * 100.0).round() as u32
    } else {
        0
    };

    DirectoryStats {
        total,
        active,
        inactive,
        active_percentage,
        inactive_percentage: 100 - active_percentage,
    }
}

/// Completed years between `date_of_birth` and `today`.
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age
}

/// Long display form, e.g. `May 15, 1990`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::seed_employees;

    fn names<'a>(records: &[&'a EmployeeRecord]) -> Vec<&'a str> {
        records.iter().map(|r| r.full_name.as_str()).collect()
    }

    #[test]
    fn test_identity_filter_keeps_everything_in_order() {
        let seed = seed_employees();
        let result = filter(&seed, &EmployeeFilter::default());
        assert_eq!(result.len(), seed.len());
        for (a, b) in result.iter().zip(seed.iter()) {
            assert_eq!(*a, b);
        }
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let seed = seed_employees();
        let criteria = EmployeeFilter {
            search: "SON".to_string(),
            ..Default::default()
        };
        assert_eq!(
            names(&filter(&seed, &criteria)),
            vec!["Sarah Johnson", "James Anderson"]
        );
    }

    #[test]
    fn test_combined_filters() {
        let seed = seed_employees();
        let criteria = EmployeeFilter {
            search: String::new(),
            gender: GenderFilter::Only(Gender::Female),
            status: StatusFilter::Inactive,
        };
        assert_eq!(names(&filter(&seed, &criteria)), vec!["Emily Rodriguez"]);

        let criteria = EmployeeFilter {
            search: "a".to_string(),
            gender: GenderFilter::Only(Gender::Male),
            status: StatusFilter::Active,
        };
        assert_eq!(
            names(&filter(&seed, &criteria)),
            vec!["Michael Chen", "David Kim", "Robert Taylor"]
        );
    }

    #[test]
    fn test_no_match() {
        let seed = seed_employees();
        let criteria = EmployeeFilter {
            gender: GenderFilter::Only(Gender::Other),
            ..Default::default()
        };
        assert!(filter(&seed, &criteria).is_empty());
    }

    #[test]
    fn test_filter_parsing() {
        assert_eq!("all".parse::<GenderFilter>().unwrap(), GenderFilter::All);
        assert_eq!("Female".parse::<GenderFilter>().unwrap(), GenderFilter::Only(Gender::Female));
        assert!("x".parse::<GenderFilter>().is_err());
        assert_eq!("INACTIVE".parse::<StatusFilter>().unwrap(), StatusFilter::Inactive);
        assert!("maybe".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn test_seed_stats() {
        let s = stats(&seed_employees());
        assert_eq!(s.total, 8);
        assert_eq!(s.active, 6);
        assert_eq!(s.inactive, 2);
        assert_eq!(s.active_percentage, 75);
        assert_eq!(s.inactive_percentage, 25);
        assert_eq!(s.active + s.inactive, s.total);
    }

    #[test]
    fn test_stats_rounding_complement() {
        // 2 of 3 active: 66.67 rounds to 67, inactive is the complement 33
        let mut records = seed_employees();
        records.truncate(3);
        let s = stats(&records);
        assert_eq!((s.active, s.inactive), (2, 1));
        assert_eq!(s.active_percentage, 67);
        assert_eq!(s.inactive_percentage, 33);

        // 5 of 8 active: 62.5 rounds half up to 63
        let mut records = seed_employees();
        records[0].is_active = false;
        let s = stats(&records);
        assert_eq!(s.active, 5);
        assert_eq!(s.active_percentage, 63);
        assert_eq!(s.inactive_percentage, 37);
    }

    #[test]
    fn test_stats_empty() {
        let s = stats(&[]);
        assert_eq!(s.total, 0);
        assert_eq!(s.active_percentage, 0);
        assert_eq!(s.inactive_percentage, 100);
    }

    #[test]
    fn test_age_on_refines_by_day() {
        let dob = NaiveDate::from_ymd_opt(1990, 5, 15).unwrap();
        assert_eq!(age_on(dob, NaiveDate::from_ymd_opt(2025, 5, 14).unwrap()), 34);
        assert_eq!(age_on(dob, NaiveDate::from_ymd_opt(2025, 5, 15).unwrap()), 35);
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(1990, 5, 5).unwrap();
        assert_eq!(format_date(date), "May 5, 1990");
    }
}
