//! Row-to-entity mapping helpers shared by the MySQL repositories.

use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::Row;
use uuid::Uuid;

use jl_core::domain::entities::{
    Account, AccountProfile, OtpChallenge, PendingRegistration, Role,
};
use jl_core::errors::DomainError;

pub(crate) fn db_err(e: sqlx::Error) -> DomainError {
    DomainError::Database {
        message: e.to_string(),
    }
}

pub(crate) fn parse_role(raw: &str) -> Result<Role, DomainError> {
    match raw {
        "jobseeker" => Ok(Role::JobSeeker),
        "recruiter" => Ok(Role::Recruiter),
        other => Err(DomainError::Database {
            message: format!("unknown role value: {other}"),
        }),
    }
}

pub(crate) fn parse_uuid(raw: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(raw).map_err(|e| DomainError::Database {
        message: format!("invalid UUID in row: {e}"),
    })
}

/// Challenge columns are identical on pending registrations and account
/// profiles.
pub(crate) fn challenge_from_row(row: &MySqlRow) -> Result<OtpChallenge, DomainError> {
    Ok(OtpChallenge {
        otp_digest: row.try_get("otp_digest").map_err(db_err)?,
        otp_issued_at: row
            .try_get::<Option<DateTime<Utc>>, _>("otp_issued_at")
            .map_err(db_err)?,
        otp_attempts: row.try_get("otp_attempts").map_err(db_err)?,
        last_sent_at: row
            .try_get::<Option<DateTime<Utc>>, _>("last_sent_at")
            .map_err(db_err)?,
        resend_count: row.try_get("resend_count").map_err(db_err)?,
    })
}

pub(crate) fn pending_from_row(row: &MySqlRow) -> Result<PendingRegistration, DomainError> {
    let role: String = row.try_get("role").map_err(db_err)?;
    Ok(PendingRegistration {
        email: row.try_get("email").map_err(db_err)?,
        username: row.try_get("username").map_err(db_err)?,
        name: row.try_get("name").map_err(db_err)?,
        role: parse_role(&role)?,
        password_hash: row.try_get("password_hash").map_err(db_err)?,
        challenge: challenge_from_row(row)?,
        created_at: row.try_get("created_at").map_err(db_err)?,
        updated_at: row.try_get("updated_at").map_err(db_err)?,
    })
}

pub(crate) fn account_from_row(row: &MySqlRow) -> Result<Account, DomainError> {
    let id: String = row.try_get("id").map_err(db_err)?;
    Ok(Account {
        id: parse_uuid(&id)?,
        username: row.try_get("username").map_err(db_err)?,
        email: row.try_get("email").map_err(db_err)?,
        password_hash: row.try_get("password_hash").map_err(db_err)?,
        created_at: row.try_get("created_at").map_err(db_err)?,
        updated_at: row.try_get("updated_at").map_err(db_err)?,
    })
}

/// Expects the profile columns joined with the owning account's email.
pub(crate) fn profile_from_row(row: &MySqlRow) -> Result<AccountProfile, DomainError> {
    let account_id: String = row.try_get("account_id").map_err(db_err)?;
    let role: String = row.try_get("role").map_err(db_err)?;
    Ok(AccountProfile {
        account_id: parse_uuid(&account_id)?,
        name: row.try_get("name").map_err(db_err)?,
        role: parse_role(&role)?,
        phone: row.try_get("phone").map_err(db_err)?,
        location: row.try_get("location").map_err(db_err)?,
        is_verified: row.try_get("is_verified").map_err(db_err)?,
        challenge: challenge_from_row(row)?,
        email: row.try_get("email").map_err(db_err)?,
        updated_at: row.try_get("updated_at").map_err(db_err)?,
    })
}
