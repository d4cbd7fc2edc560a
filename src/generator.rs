//! Synthesizes dummy member rows for exercising the rest of the pipeline.
//!
//! Structural fields (membership id, name, department, year) are
//! deterministic in the row index; only phone digits are random.

use crate::constants::{
    EMAIL_DOMAIN, MEMBERSHIP_BASE_NUMBER, MEMBERSHIP_NUMBER_DIGITS, MEMBERSHIP_PREFIXES,
    PHONE_LEADING_DIGITS, PHONE_LENGTH, ROSTER,
};
use crate::domain::MemberRecord;
use crate::error::{NotifyError, Result};
use rand::seq::SliceRandom;
use rand::Rng;

/// Largest row count whose membership numbers still fit in the fixed digit width.
pub fn max_member_count() -> usize {
    let ceiling = 10u64.pow(MEMBERSHIP_NUMBER_DIGITS as u32);
    (ceiling - MEMBERSHIP_BASE_NUMBER) as usize
}

/// Membership id for row `index`: a cycled prefix followed by a zero-padded number.
pub fn membership_id(index: usize) -> String {
    let prefix = MEMBERSHIP_PREFIXES[index % MEMBERSHIP_PREFIXES.len()];
    let number = MEMBERSHIP_BASE_NUMBER + index as u64;
    format!("{prefix}{number:0width$}", width = MEMBERSHIP_NUMBER_DIGITS)
}

/// A random 10-digit mobile number starting with 6, 7, 8 or 9.
pub fn random_phone<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut phone = String::with_capacity(PHONE_LENGTH);
    // The array is non-empty so `choose` always yields a digit.
    if let Some(lead) = PHONE_LEADING_DIGITS.choose(rng) {
        phone.push(*lead);
    }
    while phone.len() < PHONE_LENGTH {
        let digit = rng.gen_range(0..10u32);
        phone.push(char::from_digit(digit, 10).unwrap_or('0'));
    }
    phone
}

pub fn email_for(name: &str) -> String {
    format!("{}@{}", name.to_lowercase().replace(' ', "."), EMAIL_DOMAIN)
}

/// Builds `count` member rows, cycling through the fixed roster.
pub fn generate_members<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Result<Vec<MemberRecord>> {
    if count > max_member_count() {
        return Err(NotifyError::Config(format!(
            "member_count {} exceeds the {}-digit membership number range (max {})",
            count,
            MEMBERSHIP_NUMBER_DIGITS,
            max_member_count()
        )));
    }

    let members = (0..count)
        .map(|index| {
            let (name, department, year) = ROSTER[index % ROSTER.len()];
            MemberRecord {
                membership_id: membership_id(index),
                name: name.to_string(),
                email: email_for(name),
                phoneno: random_phone(rng),
                department: department.to_string(),
                year: year.to_string(),
            }
        })
        .collect();

    Ok(members)
}
