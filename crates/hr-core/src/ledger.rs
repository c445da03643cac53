//! In-memory view of the roster and its attendance records.
//!
//! Reads (`resolve`, `aggregate`, views) operate on a ledger loaded from the
//! store, so they are pure functions of a consistent snapshot.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;

use crate::session::AttendanceRecord;
use crate::types::EmployeeId;

#[derive(Debug, Clone, Default)]
pub struct AttendanceLedger {
    employees: BTreeSet<EmployeeId>,
    records: HashMap<EmployeeId, HashMap<NaiveDate, AttendanceRecord>>,
}

impl AttendanceLedger {
    pub fn new(
        employees: impl IntoIterator<Item = EmployeeId>,
        records: impl IntoIterator<Item = AttendanceRecord>,
    ) -> Self {
        let mut ledger = Self {
            employees: employees.into_iter().collect(),
            records: HashMap::new(),
        };
        for record in records {
            ledger.insert(record);
        }
        ledger
    }

    /// Adds or replaces the record for its (employee, date) key.
    pub fn insert(&mut self, record: AttendanceRecord) {
        self.employees.insert(record.employee_id.clone());
        self.records
            .entry(record.employee_id.clone())
            .or_default()
            .insert(record.date, record);
    }

    pub fn record(&self, employee: &EmployeeId, date: NaiveDate) -> Option<&AttendanceRecord> {
        self.records.get(employee)?.get(&date)
    }

    /// Employees in ID order.
    pub fn employees(&self) -> impl Iterator<Item = &EmployeeId> {
        self.employees.iter()
    }

    pub fn contains_employee(&self, employee: &EmployeeId) -> bool {
        self.employees.contains(employee)
    }

    /// Number of records across all employees.
    pub fn len(&self) -> usize {
        self.records.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.records.values().all(HashMap::is_empty)
    }
}
