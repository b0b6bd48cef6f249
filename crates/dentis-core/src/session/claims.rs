//! Access-token claim inspection.
//!
//! The SDK holds no verification key; tokens are verified by the backends on
//! every request. Claims are decoded here only to derive session expiry and
//! to cross-check the login response against its own token. A login response
//! that disagrees with its token is a backend-contract violation and is
//! rejected, never patched from the claims.

use jiff::{Span, Timestamp};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::TRACING_TARGET_CLAIMS;
use crate::error::CoreResult;
use crate::session::RoleIdentifiers;

/// Claims carried by a Dentis access token.
///
/// Contains the RFC 7519 registered claims the auth service issues plus the
/// private role claims. All timestamps are Unix seconds on the wire.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct AccessClaims {
    /// JWT ID (unique identifier for the token).
    #[serde(rename = "jti", skip_serializing_if = "Option::is_none")]
    pub token_id: Option<Uuid>,
    /// Subject ID (unique identifier for the associated account).
    #[serde(rename = "sub")]
    pub account_id: Uuid,

    /// Issued at (as UTC timestamp).
    #[serde(rename = "iat", with = "jiff::fmt::serde::timestamp::second::required")]
    pub issued_at: Timestamp,
    /// Expiration time (as UTC timestamp).
    #[serde(rename = "exp", with = "jiff::fmt::serde::timestamp::second::required")]
    pub expires_at: Timestamp,

    // Private claims.
    /// Numeric role code.
    #[serde(rename = "rol")]
    pub role_code: u16,
    /// Administrator identifier.
    #[serde(rename = "adm", skip_serializing_if = "Option::is_none", default)]
    pub admin_id: Option<Uuid>,
    /// Doctor identifier.
    #[serde(rename = "doc", skip_serializing_if = "Option::is_none", default)]
    pub doctor_id: Option<Uuid>,
    /// Receptionist identifier.
    #[serde(rename = "rcp", skip_serializing_if = "Option::is_none", default)]
    pub receptionist_id: Option<Uuid>,
    /// Clinic identifier.
    #[serde(rename = "cli", skip_serializing_if = "Option::is_none", default)]
    pub clinic_id: Option<Uuid>,
}

impl AccessClaims {
    /// Default threshold for token expiration (5 minutes).
    const SOON_THRESHOLD_MINUTES: i64 = 5;

    /// Decodes the claim payload of an access token without verifying it.
    ///
    /// Signature verification is deliberately disabled: the client never
    /// holds the signing key, and the backends re-verify the token on every
    /// request. Expiry is not validated here either; callers check it via
    /// [`AccessClaims::is_expired`] so that an already-expired token still
    /// decodes and can be reported precisely.
    ///
    /// # Errors
    ///
    /// Returns a token decode error for structurally invalid tokens or
    /// payloads missing required claims.
    pub fn decode(token: &str) -> CoreResult<Self> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["sub", "iat", "exp"]);

        let token_data = decode::<Self>(token, &DecodingKey::from_secret(&[]), &validation)?;
        let claims = token_data.claims;

        tracing::debug!(
            target: TRACING_TARGET_CLAIMS,
            account_id = %claims.account_id,
            role_code = claims.role_code,
            expires_at = %claims.expires_at,
            "Access token claims decoded"
        );

        Ok(claims)
    }

    /// Returns the identifiers carried by the private claims.
    pub fn identifiers(&self) -> RoleIdentifiers {
        RoleIdentifiers {
            admin_id: self.admin_id,
            doctor_id: self.doctor_id,
            receptionist_id: self.receptionist_id,
            clinic_id: self.clinic_id,
        }
    }

    /// Checks if the token has expired based on current UTC time.
    #[inline]
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Timestamp::now()
    }

    /// Checks if the token will expire soon and should be refreshed.
    #[inline]
    #[must_use]
    pub fn expires_soon(&self) -> bool {
        let remaining = self.expires_at - Timestamp::now();
        remaining.get_minutes() < Self::SOON_THRESHOLD_MINUTES
    }

    /// Returns the remaining lifetime of this token.
    ///
    /// # Returns
    ///
    /// The duration until expiration, or zero if already expired.
    #[inline]
    #[must_use]
    pub fn remaining_lifetime(&self) -> Span {
        let remaining = self.expires_at - Timestamp::now();
        if remaining.get_seconds() > 0 {
            remaining
        } else {
            Span::new()
        }
    }
}
