//! Row shapes flowing between the generate, process and notify stages.

use serde::{Deserialize, Serialize};

/// A synthetic member as written by the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRecord {
    pub membership_id: String,
    pub name: String,
    pub email: String,
    pub phoneno: String,
    pub department: String,
    pub year: String,
}

impl MemberRecord {
    pub const COLUMNS: [&'static str; 6] =
        ["membership_id", "name", "email", "phoneno", "department", "year"];
}

/// The subset of a processed row the simulated bulk sender needs.
///
/// Phone columns are optional because hand-edited sheets leave them blank.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BulkRecipient {
    pub membership_id: String,
    #[serde(default)]
    pub phoneno_clean: Option<String>,
    #[serde(default)]
    pub phoneno: Option<String>,
}

impl BulkRecipient {
    pub const COLUMNS: [&'static str; 2] = ["membership_id", "phoneno_clean"];
}

/// A row of the live notifier's input table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StudentContact {
    pub membership_id: String,
    pub name: String,
    pub phoneno: String,
    pub phoneno_last4: String,
}

impl StudentContact {
    pub const COLUMNS: [&'static str; 4] = ["membership_id", "name", "phoneno", "phoneno_last4"];
}
