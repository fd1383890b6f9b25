//! Sample employees loaded when storage holds no collection.

use chrono::NaiveDate;

use crate::models::{EmployeeRecord, Gender};

/// (id, full name, gender, birth date, state, avatar number, active)
type SeedRow = (i64, &'static str, Gender, (i32, u32, u32), &'static str, u32, bool);

const SEED: [SeedRow; 8] = [
    (1, "Sarah Johnson", Gender::Female, (1990, 5, 15), "California", 1, true),
    (2, "Michael Chen", Gender::Male, (1988, 8, 22), "New York", 13, true),
    (3, "Emily Rodriguez", Gender::Female, (1992, 3, 10), "Texas", 5, false),
    (4, "David Kim", Gender::Male, (1985, 11, 30), "Florida", 12, true),
    (5, "Jessica Williams", Gender::Female, (1991, 7, 18), "Illinois", 9, true),
    (6, "James Anderson", Gender::Male, (1987, 12, 5), "Washington", 15, false),
    (7, "Amanda Martinez", Gender::Female, (1993, 9, 25), "Massachusetts", 20, true),
    (8, "Robert Taylor", Gender::Male, (1989, 4, 14), "Arizona", 33, true),
];

/// The fixed seed collection, in display order.
pub fn seed_employees() -> Vec<EmployeeRecord> {
    SEED.iter()
        .filter_map(|&(id, full_name, gender, (y, m, d), state, avatar, is_active)| {
            Some(EmployeeRecord {
                id,
                full_name: full_name.to_string(),
                gender,
                date_of_birth: NaiveDate::from_ymd_opt(y, m, d)?,
                state: state.to_string(),
                profile_image: format!("https://i.pravatar.cc/150?img={avatar}"),
                is_active,
            })
        })
        .collect()
}
