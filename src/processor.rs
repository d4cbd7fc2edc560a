use crate::constants::LAST4_LEN;
use crate::error::{NotifyError, Result};
use csv::StringRecord;
use once_cell::sync::Lazy;
use regex::Regex;

pub const PHONE_COLUMN: &str = "phoneno";
pub const CLEAN_COLUMN: &str = "phoneno_clean";
pub const LAST4_COLUMN: &str = "phoneno_last4";

static NON_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\D").expect("static pattern"));

/// Removes every non-digit character from a phone value.
pub fn clean_phone(raw: &str) -> String {
    NON_DIGIT.replace_all(raw, "").into_owned()
}

/// The last four characters of `phone`, or all of it when shorter.
pub fn get_last4(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    let start = chars.len().saturating_sub(LAST4_LEN);
    chars[start..].iter().collect()
}

/// Derived phone columns for one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneColumns {
    pub phoneno_clean: String,
    pub phoneno_last4: String,
}

pub fn process_member(phoneno: &str) -> PhoneColumns {
    let phoneno_clean = clean_phone(phoneno);
    let phoneno_last4 = get_last4(&phoneno_clean);
    PhoneColumns {
        phoneno_clean,
        phoneno_last4,
    }
}

/// Adds `phoneno_clean` and `phoneno_last4` to every record, preserving row
/// order and every existing column.
///
/// Columns already named `phoneno_clean` or `phoneno_last4` are overwritten
/// in place; otherwise the two columns are appended at the end.
pub fn process_members(
    headers: &StringRecord,
    records: &[StringRecord],
) -> Result<(StringRecord, Vec<StringRecord>)> {
    let position = |name: &str| headers.iter().position(|h| h == name);
    let phone_idx = position(PHONE_COLUMN).ok_or_else(|| NotifyError::MissingField {
        column: PHONE_COLUMN.to_string(),
        path: "input table".to_string(),
    })?;

    let mut out_headers = headers.clone();
    let clean_idx = position(CLEAN_COLUMN).unwrap_or_else(|| {
        out_headers.push_field(CLEAN_COLUMN);
        out_headers.len() - 1
    });
    let last4_idx = position(LAST4_COLUMN).unwrap_or_else(|| {
        out_headers.push_field(LAST4_COLUMN);
        out_headers.len() - 1
    });

    let out_records = records
        .iter()
        .map(|record| {
            let derived = process_member(record.get(phone_idx).unwrap_or(""));
            let mut fields: Vec<String> = record.iter().map(str::to_string).collect();
            fields.resize(out_headers.len(), String::new());
            fields[clean_idx] = derived.phoneno_clean;
            fields[last4_idx] = derived.phoneno_last4;
            StringRecord::from(fields)
        })
        .collect();

    Ok((out_headers, out_records))
}
