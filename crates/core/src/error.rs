// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use participium_domain::DomainError;

/// Why `apply` refused a command.
#[derive(Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A lifecycle, role or eligibility rule was violated.
    DomainViolation(DomainError),
    /// The report's version counter cannot be advanced.
    VersionExhausted { report_id: i64 },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Transition refused: {err}"),
            Self::VersionExhausted { report_id } => {
                write!(f, "Report {report_id} has no versions left")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
