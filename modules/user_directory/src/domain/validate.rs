//! Field normalization and validation for user records.
//!
//! Both the create and the update path go through the same per-field checker,
//! parameterized by a presence policy, so the two modes cannot drift apart.

use std::collections::BTreeMap;

use crate::contract::model::{NewUser, UserPatch};

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_EMAIL_LEN: usize = 320;
pub const MAX_DEPARTMENT_LEN: usize = 200;
pub const MAX_TITLE_LEN: usize = 100;
pub const MAX_PHONE_LEN: usize = 30;

/// Per-field error messages, keyed by the field's wire name. The pseudo-field
/// `request` scopes errors about the request as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&Vec<String>> {
        self.0.get(field)
    }

    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }
}

/// Presence policy for a field under validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Presence {
    /// The field must resolve to a value after normalization.
    Required,
    /// The field may be absent, but a supplied value must survive normalization.
    Optional,
}

/// Normalized create request: required fields resolved, optional fields
/// normalized-or-absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCreate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: String,
    pub title: Option<String>,
    pub phone: Option<String>,
    pub is_active: Option<bool>,
}

/// Normalized partial patch: only the fields that were supplied, trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub title: Option<String>,
    pub phone: Option<String>,
    pub is_active: Option<bool>,
}

/// Trim the value; an empty or whitespace-only result means "absent".
/// Idempotent: normalizing an already-normalized value returns it unchanged.
pub fn normalize(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Structural email check: exactly one `@`, non-empty local and domain parts,
/// an interior dot in the domain, no whitespace.
pub fn is_structurally_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((head, tail)) = domain.rsplit_once('.') else {
        return false;
    };
    !head.is_empty() && !tail.is_empty()
}

/// The single per-field checker shared by both validation modes.
///
/// Returns the normalized value when the field is acceptable, recording
/// errors otherwise. `Required` absence reads "is required"; an `Optional`
/// field supplied as blank reads "cannot be empty".
fn check_text(
    errors: &mut FieldErrors,
    field: &'static str,
    label: &'static str,
    raw: Option<&str>,
    presence: Presence,
    max_len: usize,
) -> Option<String> {
    let normalized = raw.and_then(normalize);
    match normalized {
        Some(value) => {
            if value.chars().count() > max_len {
                errors.push(field, format!("{label} must be at most {max_len} characters."));
                None
            } else {
                Some(value)
            }
        }
        None => {
            match presence {
                Presence::Required => errors.push(field, format!("{label} is required.")),
                Presence::Optional => {
                    // Only a supplied-but-blank value is an error; absence is fine.
                    if raw.is_some() {
                        errors.push(field, format!("{label} cannot be empty."));
                    }
                }
            }
            None
        }
    }
}

fn check_email(
    errors: &mut FieldErrors,
    raw: Option<&str>,
    presence: Presence,
) -> Option<String> {
    let value = check_text(errors, "email", "Email", raw, presence, MAX_EMAIL_LEN)?;
    if !is_structurally_valid_email(&value) {
        errors.push("email", "Email is not valid.");
        return None;
    }
    Some(value)
}

/// Validate a create request. Every violated field is reported, not just the
/// first. On success the normalized values are returned so callers never
/// re-normalize.
pub fn validate_create(req: &NewUser) -> Result<ValidCreate, FieldErrors> {
    let mut errors = FieldErrors::default();

    let first_name = check_text(
        &mut errors,
        "firstName",
        "First name",
        req.first_name.as_deref(),
        Presence::Required,
        MAX_NAME_LEN,
    );
    let last_name = check_text(
        &mut errors,
        "lastName",
        "Last name",
        req.last_name.as_deref(),
        Presence::Required,
        MAX_NAME_LEN,
    );
    let email = check_email(&mut errors, req.email.as_deref(), Presence::Required);
    let department = check_text(
        &mut errors,
        "department",
        "Department",
        req.department.as_deref(),
        Presence::Required,
        MAX_DEPARTMENT_LEN,
    );
    let title = check_text(
        &mut errors,
        "title",
        "Title",
        req.title.as_deref(),
        Presence::Optional,
        MAX_TITLE_LEN,
    );
    let phone = check_text(
        &mut errors,
        "phone",
        "Phone",
        req.phone.as_deref(),
        Presence::Optional,
        MAX_PHONE_LEN,
    );

    if !errors.is_empty() {
        return Err(errors);
    }

    let (Some(first_name), Some(last_name), Some(email), Some(department)) =
        (first_name, last_name, email, department)
    else {
        return Err(errors);
    };

    Ok(ValidCreate {
        first_name,
        last_name,
        email,
        department,
        title,
        phone,
        is_active: req.is_active,
    })
}

/// Validate a partial patch. Only supplied fields are checked; a patch with
/// no fields at all is rejected with a `request`-scoped error.
pub fn validate_patch(patch: &UserPatch) -> Result<ValidPatch, FieldErrors> {
    let mut errors = FieldErrors::default();

    if patch.is_empty() {
        errors.push("request", "At least one field must be provided.");
        return Err(errors);
    }

    let first_name = check_text(
        &mut errors,
        "firstName",
        "First name",
        patch.first_name.as_deref(),
        Presence::Optional,
        MAX_NAME_LEN,
    );
    let last_name = check_text(
        &mut errors,
        "lastName",
        "Last name",
        patch.last_name.as_deref(),
        Presence::Optional,
        MAX_NAME_LEN,
    );
    let email = check_email(&mut errors, patch.email.as_deref(), Presence::Optional);
    let department = check_text(
        &mut errors,
        "department",
        "Department",
        patch.department.as_deref(),
        Presence::Optional,
        MAX_DEPARTMENT_LEN,
    );
    let title = check_text(
        &mut errors,
        "title",
        "Title",
        patch.title.as_deref(),
        Presence::Optional,
        MAX_TITLE_LEN,
    );
    let phone = check_text(
        &mut errors,
        "phone",
        "Phone",
        patch.phone.as_deref(),
        Presence::Optional,
        MAX_PHONE_LEN,
    );

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ValidPatch {
        first_name,
        last_name,
        email,
        department,
        title,
        phone,
        is_active: patch.is_active,
    })
}
