//! Employee record, form draft, and create/update DTOs.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Employee gender as shown in the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    Male,
    Female,
    Other,
}

impl Gender {
    /// Get the display name for the gender.
    pub fn name(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            other => Err(format!("unknown gender '{other}' (expected male, female or other)")),
        }
    }
}

/// A stored employee record.
///
/// Serialized with camelCase keys; this is the persisted collection format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRecord {
    pub id: i64,
    pub full_name: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub state: String,
    pub profile_image: String,
    pub is_active: bool,
}

/// Caller-supplied field set for creating an employee, prior to validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeDraft {
    pub full_name: String,
    pub gender: Gender,
    pub date_of_birth: Option<NaiveDate>,
    pub state: String,
    pub profile_image: String,
    pub is_active: bool,
}

impl Default for EmployeeDraft {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            gender: Gender::Male,
            date_of_birth: None,
            state: String::new(),
            profile_image: String::new(),
            is_active: true,
        }
    }
}

impl EmployeeDraft {
    /// Create a draft pre-filled from an existing record, for editing.
    pub fn edit(record: &EmployeeRecord) -> Self {
        Self {
            full_name: record.full_name.clone(),
            gender: record.gender,
            date_of_birth: Some(record.date_of_birth),
            state: record.state.clone(),
            profile_image: record.profile_image.clone(),
            is_active: record.is_active,
        }
    }

    /// Convert into an update that overwrites every editable field.
    pub fn into_update(self) -> UpdateEmployee {
        UpdateEmployee {
            full_name: Some(self.full_name),
            gender: Some(self.gender),
            date_of_birth: self.date_of_birth,
            state: Some(self.state),
            profile_image: Some(self.profile_image),
            is_active: Some(self.is_active),
        }
    }
}

/// DTO for creating an employee. Produced from a draft that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEmployee {
    pub full_name: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub state: String,
    pub profile_image: String,
    pub is_active: bool,
}

impl CreateEmployee {
    /// Build the stored record under `id`.
    pub fn into_record(self, id: i64) -> EmployeeRecord {
        EmployeeRecord {
            id,
            full_name: self.full_name,
            gender: self.gender,
            date_of_birth: self.date_of_birth,
            state: self.state,
            profile_image: self.profile_image,
            is_active: self.is_active,
        }
    }
}

/// DTO for updating an employee. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateEmployee {
    pub full_name: Option<String>,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<NaiveDate>,
    pub state: Option<String>,
    pub profile_image: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateEmployee {
    /// Whether the update carries no changes.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge the present fields into a record. The id is never touched.
    pub fn apply_to(self, record: &mut EmployeeRecord) {
        if let Some(full_name) = self.full_name {
            record.full_name = full_name;
        }
        if let Some(gender) = self.gender {
            record.gender = gender;
        }
        if let Some(date_of_birth) = self.date_of_birth {
            record.date_of_birth = date_of_birth;
        }
        if let Some(state) = self.state {
            record.state = state;
        }
        if let Some(profile_image) = self.profile_image {
            record.profile_image = profile_image;
        }
        if let Some(is_active) = self.is_active {
            record.is_active = is_active;
        }
    }

    /// Draft view of `record` with this update applied, for validating an edit.
    pub fn merged_draft(&self, record: &EmployeeRecord) -> EmployeeDraft {
        let mut merged = record.clone();
        self.clone().apply_to(&mut merged);
        EmployeeDraft::edit(&merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EmployeeRecord {
        EmployeeRecord {
            id: 1,
            full_name: "Sarah Johnson".to_string(),
            gender: Gender::Female,
            date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 15).unwrap(),
            state: "California".to_string(),
            profile_image: "https://i.pravatar.cc/150?img=1".to_string(),
            is_active: true,
        }
    }

    #[test]
    fn test_record_json_uses_camel_case() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(json.contains("\"fullName\":\"Sarah Johnson\""));
        assert!(json.contains("\"dateOfBirth\":\"1990-05-15\""));
        assert!(json.contains("\"profileImage\""));
        assert!(json.contains("\"isActive\":true"));
        assert!(json.contains("\"gender\":\"Female\""));
    }

    #[test]
    fn test_gender_from_str_is_case_insensitive() {
        assert_eq!("FEMALE".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!(" other ".parse::<Gender>().unwrap(), Gender::Other);
        assert!("robot".parse::<Gender>().is_err());
    }

    #[test]
    fn test_update_merges_only_present_fields() {
        let mut record = sample();
        let update = UpdateEmployee {
            state: Some("Texas".to_string()),
            is_active: Some(false),
            ..Default::default()
        };
        update.apply_to(&mut record);

        assert_eq!(record.id, 1);
        assert_eq!(record.full_name, "Sarah Johnson");
        assert_eq!(record.state, "Texas");
        assert!(!record.is_active);
    }

    #[test]
    fn test_empty_update() {
        assert!(UpdateEmployee::default().is_empty());
        let update = UpdateEmployee {
            gender: Some(Gender::Other),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn test_draft_round_trips_through_edit() {
        let record = sample();
        let draft = EmployeeDraft::edit(&record);
        let mut copy = record.clone();
        copy.full_name = "Someone Else".to_string();
        draft.into_update().apply_to(&mut copy);
        assert_eq!(copy, record);
    }
}
