//! Employee directory store.
//!
//! Owns the ordered employee collection and mirrors the whole collection
//! into a [`KeyValueStore`] after every change. Records are assumed to be
//! validated by the caller before they reach the store.
//!
//! Mutations on an id that is not present are silent no-ops: nothing
//! changes and nothing is written. The return values (`Option`/`bool`) let
//! callers tell the two cases apart.

mod seed;

use std::collections::HashSet;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::models::{CreateEmployee, EmployeeRecord, UpdateEmployee};
use crate::storage::{KeyValueStore, StorageError};

pub use seed::seed_employees;

/// Storage key the collection is written under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "employees";

/// In-memory employee collection mirrored into key-value storage.
#[derive(Debug)]
pub struct EmployeeDirectory<S> {
    storage: S,
    key: String,
    employees: Vec<EmployeeRecord>,
    last_id: i64,
}

impl<S: KeyValueStore> EmployeeDirectory<S> {
    /// Load the collection stored under the default key.
    pub fn load(storage: S) -> Result<Self, StorageError> {
        Self::load_with_key(storage, DEFAULT_STORAGE_KEY)
    }

    /// Load the collection stored under `key`.
    ///
    /// A missing or malformed value is replaced by the seed collection,
    /// which is written back immediately.
    pub fn load_with_key(storage: S, key: impl Into<String>) -> Result<Self, StorageError> {
        let mut directory = Self {
            storage,
            key: key.into(),
            employees: Vec::new(),
            last_id: 0,
        };

        match directory.read_stored()? {
            Some(employees) => {
                info!("Loaded {} employees from storage", employees.len());
                directory.employees = employees;
            }
            None => {
                info!("Seeding employee directory");
                directory.employees = seed_employees();
                directory.persist()?;
            }
        }

        directory.last_id = directory.max_id();
        Ok(directory)
    }

    /// Current snapshot, in insertion order.
    pub fn list(&self) -> &[EmployeeRecord] {
        &self.employees
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Get employee by ID.
    pub fn get_by_id(&self, id: i64) -> Option<&EmployeeRecord> {
        self.employees.iter().find(|e| e.id == id)
    }

    /// Create a new employee and append it to the collection.
    pub fn add(&mut self, data: CreateEmployee) -> Result<EmployeeRecord, StorageError> {
        let id = self.next_id()?;
        let record = data.into_record(id);
        self.employees.push(record.clone());
        self.persist()?;

        info!("Employee #{} added: {}", record.id, record.full_name);
        Ok(record)
    }

    /// Update an existing employee.
    ///
    /// Returns the updated record, or `None` when no employee has `id`.
    pub fn update(&mut self, id: i64, data: UpdateEmployee) -> Result<Option<EmployeeRecord>, StorageError> {
        let Some(record) = self.employees.iter_mut().find(|e| e.id == id) else {
            debug!("Update skipped, employee #{} not found", id);
            return Ok(None);
        };

        data.apply_to(record);
        let updated = record.clone();
        self.persist()?;

        info!("Employee #{} updated", id);
        Ok(Some(updated))
    }

    /// Delete an employee by ID.
    ///
    /// Returns `true` if a record was removed.
    pub fn delete(&mut self, id: i64) -> Result<bool, StorageError> {
        let before = self.employees.len();
        self.employees.retain(|e| e.id != id);
        if self.employees.len() == before {
            debug!("Delete skipped, employee #{} not found", id);
            return Ok(false);
        }

        self.persist()?;
        info!("Employee #{} deleted", id);
        Ok(true)
    }

    /// Flip the active flag of an employee.
    ///
    /// Returns the new flag, or `None` when no employee has `id`.
    pub fn toggle_status(&mut self, id: i64) -> Result<Option<bool>, StorageError> {
        let Some(record) = self.employees.iter_mut().find(|e| e.id == id) else {
            debug!("Status toggle skipped, employee #{} not found", id);
            return Ok(None);
        };

        record.is_active = !record.is_active;
        let is_active = record.is_active;
        self.persist()?;

        info!(
            "Employee #{} marked {}",
            id,
            if is_active { "active" } else { "inactive" }
        );
        Ok(Some(is_active))
    }

    /// Drop the stored collection and start over from the seed.
    pub fn reset(&mut self) -> Result<(), StorageError> {
        self.storage.clear(&self.key)?;
        self.employees = seed_employees();
        self.persist()?;
        self.last_id = self.last_id.max(self.max_id());

        info!("Employee directory reset to {} seed records", self.employees.len());
        Ok(())
    }

    /// Storage backend, for inspection.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Give back the storage backend.
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Storage key the collection is written under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Write the entire collection under the storage key.
    fn persist(&mut self) -> Result<(), StorageError> {
        let json = serde_json::to_string(&self.employees)?;
        self.storage.set(&self.key, &json)
    }

    /// Read and parse the stored collection. Malformed content counts as absent.
    fn read_stored(&self) -> Result<Option<Vec<EmployeeRecord>>, StorageError> {
        let blob = match self.storage.get(&self.key) {
            Ok(Some(blob)) => blob,
            Ok(None) => return Ok(None),
            Err(StorageError::Malformed(_)) => {
                warn!("Stored employee data under '{}' is not valid text, reseeding", self.key);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let employees: Vec<EmployeeRecord> = match serde_json::from_str(&blob) {
            Ok(employees) => employees,
            Err(e) => {
                warn!("Stored employee data under '{}' is malformed, reseeding: {}", self.key, e);
                return Ok(None);
            }
        };

        let mut seen = HashSet::new();
        if let Some(dup) = employees.iter().find(|e| !seen.insert(e.id)) {
            warn!(
                "Stored employee data under '{}' repeats id {}, reseeding",
                self.key, dup.id
            );
            return Ok(None);
        }

        // Every stored id needs a successor for the next add
        if employees.iter().any(|e| e.id == i64::MAX) {
            warn!("Stored employee data under '{}' uses the maximum id, reseeding", self.key);
            return Ok(None);
        }

        Ok(Some(employees))
    }

    fn max_id(&self) -> i64 {
        self.employees.iter().map(|e| e.id).max().unwrap_or(0)
    }

    /// Millisecond timestamp, bumped past every id issued or loaded so far.
    fn next_id(&mut self) -> Result<i64, StorageError> {
        let floor = self
            .last_id
            .checked_add(1)
            .ok_or(StorageError::IdsExhausted(self.last_id))?;
        let id = Utc::now().timestamp_millis().max(floor);
        self.last_id = id;
        Ok(id)
    }
}
