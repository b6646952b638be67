// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use participium_domain::DomainError;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Serialization/deserialization error.
    SerializationError(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// The requested report does not exist.
    ReportNotFound(i64),
    /// The requested user does not exist.
    UserNotFound(i64),
    /// The requested company does not exist.
    CompanyNotFound(i64),
    /// The notification does not exist or belongs to another user.
    NotificationNotFound(i64),
    /// The report changed since it was read; the conditional write matched no row.
    StaleReport { report_id: i64, expected_version: i64 },
    /// A user with this username already exists.
    DuplicateUsername(String),
    /// A company with this name already exists.
    DuplicateCompany(String),
    /// A stored value could not be mapped back to a domain type.
    InvalidStoredValue(String),
    /// The requested resource was not found.
    NotFound(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::ReportNotFound(id) => write!(f, "Report {id} not found"),
            Self::UserNotFound(id) => write!(f, "User {id} not found"),
            Self::CompanyNotFound(id) => write!(f, "Company {id} not found"),
            Self::NotificationNotFound(id) => write!(f, "Notification {id} not found"),
            Self::StaleReport {
                report_id,
                expected_version,
            } => {
                write!(
                    f,
                    "Report {report_id} was modified concurrently (expected version {expected_version})"
                )
            }
            Self::DuplicateUsername(name) => write!(f, "Username '{name}' is already taken"),
            Self::DuplicateCompany(name) => write!(f, "Company '{name}' already exists"),
            Self::InvalidStoredValue(msg) => write!(f, "Invalid stored value: {msg}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<DomainError> for PersistenceError {
    fn from(err: DomainError) -> Self {
        Self::InvalidStoredValue(err.to_string())
    }
}

/// Returns true if `err` is a unique constraint violation.
pub(crate) const fn is_unique_violation(err: &diesel::result::Error) -> bool {
    matches!(
        err,
        diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            _
        )
    )
}

/// Returns true if `err` is a foreign key violation.
pub(crate) const fn is_foreign_key_violation(err: &diesel::result::Error) -> bool {
    matches!(
        err,
        diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::ForeignKeyViolation,
            _
        )
    )
}
