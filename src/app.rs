//! Application state: one session store and one employee directory,
//! constructed at start-up and handed to the front end.
//!
//! `App` is the form layer. Drafts are validated here before they reach the
//! directory store, and ids that don't exist are reported as
//! [`AppError::NotFound`] even though the store itself treats them as no-ops.

use std::path::Path;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::config::{AppConfig, StorageBackend};
use crate::directory::EmployeeDirectory;
use crate::error::{AppError, Result};
use crate::export;
use crate::models::{EmployeeDraft, EmployeeRecord, UpdateEmployee};
use crate::session::{AcceptAnyCredentials, CredentialVerifier, Identity, SessionStore};
use crate::storage::{FileStore, KeyValueStore, MemoryStore};
use crate::validation::{validate_create, validate_draft};
use crate::views::{self, DirectoryStats, EmployeeFilter};

/// Main application state.
#[derive(Debug)]
pub struct App<S, V = AcceptAnyCredentials> {
    config: AppConfig,
    session: SessionStore<V>,
    directory: EmployeeDirectory<S>,
}

impl App<Box<dyn KeyValueStore>> {
    /// Open the storage backend named in the config and load the directory.
    pub fn open(config: AppConfig) -> Result<Self> {
        let storage: Box<dyn KeyValueStore> = match config.storage.backend {
            StorageBackend::File => {
                let dir = config.data_dir();
                info!("Using file storage at {:?}", dir);
                Box::new(FileStore::open(dir)?)
            }
            StorageBackend::Memory => {
                warn!("Using in-memory storage; changes will not be kept");
                Box::new(MemoryStore::new())
            }
        };
        Self::new(config, storage)
    }
}

impl<S: KeyValueStore> App<S> {
    /// Create the app over `storage` with the default credential check.
    pub fn new(config: AppConfig, storage: S) -> Result<Self> {
        Self::with_verifier(config, storage, AcceptAnyCredentials)
    }
}

impl<S: KeyValueStore, V: CredentialVerifier> App<S, V> {
    /// Create the app with a custom credential verifier.
    pub fn with_verifier(config: AppConfig, storage: S, verifier: V) -> Result<Self> {
        let session = SessionStore::with_verifier(verifier, &config.session.display_name, &config.session.role);
        let directory = EmployeeDirectory::load_with_key(storage, config.storage.key.clone())?;
        Ok(Self {
            config,
            session,
            directory,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionStore<V> {
        &self.session
    }

    pub fn directory(&self) -> &EmployeeDirectory<S> {
        &self.directory
    }

    /// Log in to the portal.
    pub fn login(&mut self, identifier: &str, secret: &str) -> Result<Identity> {
        Ok(self.session.login(identifier, secret)?)
    }

    /// Log out. Idempotent.
    pub fn logout(&mut self) {
        self.session.logout();
    }

    fn require_login(&self) -> Result<()> {
        if self.session.is_authenticated() {
            Ok(())
        } else {
            Err(AppError::NotAuthenticated)
        }
    }

    /// Employees matching `filter`, in directory order.
    pub fn employees(&self, filter: &EmployeeFilter) -> Result<Vec<&EmployeeRecord>> {
        self.require_login()?;
        Ok(views::filter(self.directory.list(), filter))
    }

    /// Get employee by ID.
    pub fn employee(&self, id: i64) -> Result<&EmployeeRecord> {
        self.require_login()?;
        self.directory
            .get_by_id(id)
            .ok_or_else(|| AppError::employee_not_found(id))
    }

    /// Headline stats over the whole directory.
    pub fn stats(&self) -> Result<DirectoryStats> {
        self.require_login()?;
        Ok(views::stats(self.directory.list()))
    }

    /// Validate a draft and add the employee.
    pub fn create_employee(&mut self, draft: &EmployeeDraft, today: NaiveDate) -> Result<EmployeeRecord> {
        self.require_login()?;
        let data = validate_create(draft, today)?;
        Ok(self.directory.add(data)?)
    }

    /// Validate the edited employee and apply the update.
    pub fn update_employee(&mut self, id: i64, data: UpdateEmployee, today: NaiveDate) -> Result<EmployeeRecord> {
        self.require_login()?;
        let existing = self
            .directory
            .get_by_id(id)
            .ok_or_else(|| AppError::employee_not_found(id))?;

        validate_draft(&data.merged_draft(existing), today).into_result()?;

        self.directory
            .update(id, data)?
            .ok_or_else(|| AppError::employee_not_found(id))
    }

    /// Delete an employee.
    pub fn delete_employee(&mut self, id: i64) -> Result<()> {
        self.require_login()?;
        if self.directory.delete(id)? {
            Ok(())
        } else {
            Err(AppError::employee_not_found(id))
        }
    }

    /// Flip the active flag, returning the new value.
    pub fn toggle_employee_status(&mut self, id: i64) -> Result<bool> {
        self.require_login()?;
        self.directory
            .toggle_status(id)?
            .ok_or_else(|| AppError::employee_not_found(id))
    }

    /// Discard all changes and reload the seed employees.
    pub fn reset_directory(&mut self) -> Result<()> {
        self.require_login()?;
        Ok(self.directory.reset()?)
    }

    /// Printable table of the filtered employees.
    pub fn print_view(&self, filter: &EmployeeFilter, today: NaiveDate) -> Result<String> {
        let employees = self.employees(filter)?;
        Ok(export::render_print_view(&employees, today))
    }

    /// Export the filtered employees to an Excel file.
    pub fn export_employees(&self, filter: &EmployeeFilter, today: NaiveDate, path: &Path) -> Result<usize> {
        let employees = self.employees(filter)?;
        export::export_employees_to_excel(&employees, today, path)?;
        info!("Exported {} employees to {:?}", employees.len(), path);
        Ok(employees.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;
    use crate::session::AuthError;
    use crate::validation::{Field, FieldError};
    use crate::views::StatusFilter;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn logged_in() -> App<MemoryStore> {
        let mut app = App::new(AppConfig::default(), MemoryStore::new()).unwrap();
        app.login("admin@example.com", "password").unwrap();
        app
    }

    fn draft() -> EmployeeDraft {
        EmployeeDraft {
            full_name: "Nora Patel".to_string(),
            gender: Gender::Female,
            date_of_birth: NaiveDate::from_ymd_opt(1994, 10, 2),
            state: "Oregon".to_string(),
            profile_image: "data:image/png;base64,AAAA".to_string(),
            is_active: true,
        }
    }

    #[test]
    fn test_operations_require_login() {
        let mut app = App::new(AppConfig::default(), MemoryStore::new()).unwrap();
        assert!(matches!(app.stats(), Err(AppError::NotAuthenticated)));
        assert!(matches!(app.delete_employee(1), Err(AppError::NotAuthenticated)));
        assert!(matches!(
            app.create_employee(&draft(), today()),
            Err(AppError::NotAuthenticated)
        ));

        app.login("admin@example.com", "password").unwrap();
        assert_eq!(app.stats().unwrap().total, 8);

        app.logout();
        assert!(matches!(app.employee(1), Err(AppError::NotAuthenticated)));
    }

    #[test]
    fn test_login_uses_configured_identity() {
        let mut config = AppConfig::default();
        config.session.display_name = "Pat".to_string();
        config.session.role = "HR".to_string();
        let mut app = App::new(config, MemoryStore::new()).unwrap();

        let identity = app.login("pat@example.com", "x").unwrap();
        assert_eq!(identity.name, "Pat");
        assert_eq!(identity.role, "HR");

        assert!(matches!(
            app.login("", "x"),
            Err(AppError::Auth(AuthError::MissingCredentials))
        ));
    }

    #[test]
    fn test_create_valid_employee() {
        let mut app = logged_in();
        let record = app.create_employee(&draft(), today()).unwrap();
        assert_eq!(app.employee(record.id).unwrap(), &record);
        assert_eq!(app.stats().unwrap().total, 9);
    }

    #[test]
    fn test_create_invalid_employee_blocks_write() {
        let mut app = logged_in();
        let bad = EmployeeDraft {
            full_name: "A".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2010, 1, 1),
            ..draft()
        };

        match app.create_employee(&bad, today()) {
            Err(AppError::Validation(errors)) => {
                assert_eq!(errors.get(Field::FullName), Some(FieldError::TooShort));
                assert_eq!(errors.get(Field::DateOfBirth), Some(FieldError::OutOfRange));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(app.stats().unwrap().total, 8);
    }

    #[test]
    fn test_update_validates_merged_record() {
        let mut app = logged_in();
        let update = UpdateEmployee {
            state: Some("Narnia".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            app.update_employee(1, update, today()),
            Err(AppError::Validation(_))
        ));
        assert_eq!(app.employee(1).unwrap().state, "California");

        let update = UpdateEmployee {
            state: Some("Nevada".to_string()),
            ..Default::default()
        };
        let updated = app.update_employee(1, update, today()).unwrap();
        assert_eq!(updated.state, "Nevada");
    }

    #[test]
    fn test_missing_ids_report_not_found() {
        let mut app = logged_in();
        let before = app.directory().list().to_vec();

        assert!(matches!(
            app.update_employee(999, UpdateEmployee::default(), today()),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(app.delete_employee(999), Err(AppError::NotFound(_))));
        assert!(matches!(app.toggle_employee_status(999), Err(AppError::NotFound(_))));
        assert!(matches!(app.employee(999), Err(AppError::NotFound(_))));

        assert_eq!(app.directory().list(), before.as_slice());
    }

    #[test]
    fn test_toggle_and_filter() {
        let mut app = logged_in();
        assert!(!app.toggle_employee_status(1).unwrap());

        let inactive = EmployeeFilter {
            status: StatusFilter::Inactive,
            ..Default::default()
        };
        let names: Vec<&str> = app
            .employees(&inactive)
            .unwrap()
            .iter()
            .map(|e| e.full_name.as_str())
            .collect();
        assert_eq!(names, vec!["Sarah Johnson", "Emily Rodriguez", "James Anderson"]);
    }

    #[test]
    fn test_delete_and_reset() {
        let mut app = logged_in();
        app.delete_employee(2).unwrap();
        assert_eq!(app.stats().unwrap().total, 7);

        app.reset_directory().unwrap();
        assert_eq!(app.stats().unwrap().total, 8);
        assert!(app.employee(2).is_ok());
    }

    #[test]
    fn test_print_view_respects_filter() {
        let app = logged_in();
        let filter = EmployeeFilter {
            search: "kim".to_string(),
            ..Default::default()
        };
        let text = app.print_view(&filter, today()).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("David Kim"));
    }

    #[test]
    fn test_custom_storage_key_from_config() {
        let mut config = AppConfig::default();
        config.storage.key = "staff".to_string();
        let app = App::new(config, MemoryStore::new()).unwrap();
        assert!(app.directory().storage().get("staff").unwrap().is_some());
    }
}
