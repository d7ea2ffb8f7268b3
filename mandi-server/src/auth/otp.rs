//! One-time code issuing and verification
//!
//! Codes live in memory only (a restart invalidates outstanding codes,
//! which is acceptable for a login flow). Only a SHA-256 hash of the code
//! is kept; the plain code goes to the SMS channel and nowhere else.

use dashmap::DashMap;
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Code lifetime in milliseconds (5 minutes)
const OTP_TTL_MS: i64 = 5 * 60 * 1000;
/// Failed attempts allowed before the code is burned
const MAX_ATTEMPTS: u32 = 5;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum OtpError {
    #[error("No code issued for this phone number")]
    NotIssued,

    #[error("Code expired")]
    Expired,

    #[error("Code does not match")]
    Mismatch,

    #[error("Too many failed attempts")]
    TooManyAttempts,
}

impl From<OtpError> for shared::AppError {
    fn from(err: OtpError) -> Self {
        use shared::{AppError, ErrorCode};
        match err {
            OtpError::Expired => AppError::otp_expired(),
            OtpError::TooManyAttempts => AppError::new(ErrorCode::TooManyOtpAttempts),
            OtpError::NotIssued | OtpError::Mismatch => AppError::invalid_otp(),
        }
    }
}

struct PendingOtp {
    code_hash: String,
    issued_at: i64,
    attempts: u32,
}

fn hash_code(phone: &str, code: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(phone.as_bytes());
    hasher.update(b":");
    hasher.update(code.as_bytes());
    hex::encode(hasher.finalize())
}

/// In-memory store of pending login codes, keyed by phone number
#[derive(Default)]
pub struct OtpStore {
    pending: DashMap<String, PendingOtp>,
}

impl OtpStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh 6-digit code for a phone number, replacing any
    /// outstanding one. Returns the plain code for delivery.
    pub fn issue(&self, phone: &str) -> String {
        use rand::Rng;
        let code = format!("{:06}", rand::thread_rng().gen_range(0..1_000_000));
        self.pending.insert(
            phone.to_string(),
            PendingOtp {
                code_hash: hash_code(phone, &code),
                issued_at: shared::util::now_millis(),
                attempts: 0,
            },
        );
        code
    }

    /// Verify a submitted code. The pending entry is consumed on success,
    /// on expiry, and after too many failures; a plain mismatch leaves it
    /// in place with the attempt counter bumped.
    pub fn verify(&self, phone: &str, code: &str) -> Result<(), OtpError> {
        let mut entry = self.pending.get_mut(phone).ok_or(OtpError::NotIssued)?;

        if shared::util::now_millis() - entry.issued_at > OTP_TTL_MS {
            drop(entry);
            self.pending.remove(phone);
            return Err(OtpError::Expired);
        }

        if entry.attempts >= MAX_ATTEMPTS {
            drop(entry);
            self.pending.remove(phone);
            return Err(OtpError::TooManyAttempts);
        }

        if entry.code_hash != hash_code(phone, code) {
            entry.attempts += 1;
            let burned = entry.attempts >= MAX_ATTEMPTS;
            drop(entry);
            if burned {
                self.pending.remove(phone);
                return Err(OtpError::TooManyAttempts);
            }
            return Err(OtpError::Mismatch);
        }

        drop(entry);
        self.pending.remove(phone);
        Ok(())
    }
}

/// Delivery channel for one-time codes
///
/// The production build would back this with an SMS gateway; the default
/// implementation logs the code, which is how local and test environments
/// run.
pub trait OtpSender: Send + Sync {
    fn send_code(&self, phone: &str, code: &str);
}

/// Logs codes instead of sending SMS; the phone is masked to its last
/// four digits so full numbers stay out of the log files.
pub struct LogOtpSender;

impl OtpSender for LogOtpSender {
    fn send_code(&self, phone: &str, code: &str) {
        tracing::info!(phone = %mask_phone(phone), code, "OTP issued (log delivery)");
    }
}

fn mask_phone(phone: &str) -> String {
    let len = phone.chars().count();
    let tail: String = phone.chars().skip(len.saturating_sub(4)).collect();
    format!("****{tail}")
}
