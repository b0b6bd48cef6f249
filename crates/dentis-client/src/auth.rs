//! Auth service client: login, staff registration, logout.

use dentis_core::{AccessClaims, CoreError, Role, RoleCode, RoleIdentifiers, Session};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::{ApiError, ApiResult};
use crate::transport::{HttpTransport, Service};

/// Tracing target for auth operations.
pub const TRACING_TARGET: &str = "dentis_client::auth";

/// Login credentials.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    /// Account email address.
    #[validate(email)]
    pub email: String,
    /// Account password, sent verbatim over TLS.
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

/// Login response issued by the auth service.
///
/// The role arrives as a legacy numeric code plus the identifiers the role
/// operates with; [`AuthClient::login`] decodes the pair into a [`Role`]
/// exactly once.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Issued bearer token.
    pub access_token: String,
    /// Account the token belongs to.
    pub account_id: Uuid,
    /// Numeric role code.
    pub role_code: u16,
    /// Identifiers attached to the role.
    #[serde(flatten)]
    pub identifiers: RoleIdentifiers,
}

/// Staff registration form submitted by clinic administrators.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StaffRegistration {
    /// Full display name.
    #[validate(length(min = 1, max = 120))]
    pub full_name: String,
    /// Email address the new account signs in with.
    #[validate(email)]
    pub email: String,
    /// Initial password.
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    /// Role granted to the new account.
    pub role: RoleCode,
    /// Clinic the account is scoped to, for clinic-bound roles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinic_id: Option<Uuid>,
}

/// A staff account created through registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffAccount {
    /// Unique account identifier.
    pub id: Uuid,
    /// Full display name.
    pub full_name: String,
    /// Email address.
    pub email: String,
    /// Granted role.
    pub role: RoleCode,
    /// Clinic the account is scoped to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinic_id: Option<Uuid>,
    /// When the account was created.
    pub created_at: Timestamp,
}

/// Client for the auth service.
#[derive(Clone, Debug)]
pub struct AuthClient {
    transport: HttpTransport,
}

impl AuthClient {
    /// Creates a new auth client over the shared transport.
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }

    /// Authenticates an account and installs the resulting session.
    ///
    /// The role is decoded here, once, from the response's numeric code and
    /// identifiers. The token's claims are cross-checked against the
    /// response; a response that disagrees with its own token, or that
    /// omits an identifier its role requires, is rejected as malformed
    /// rather than patched from the claims.
    ///
    /// # Errors
    ///
    /// Returns validation errors for malformed credentials, transport and
    /// status errors for failed requests, and [`ApiError::Malformed`] for
    /// backend-contract violations.
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<Session> {
        credentials.validate()?;

        let response: LoginResponse = self
            .transport
            .post_public(Service::Auth, "login", credentials)
            .await?;

        let claims = AccessClaims::decode(&response.access_token).map_err(ApiError::Malformed)?;
        Self::cross_check(&claims, &response)?;

        let code = RoleCode::from_wire(response.role_code).map_err(ApiError::Malformed)?;
        let role = Role::decode(code, &response.identifiers).map_err(ApiError::Malformed)?;

        let session = Session::new(response.access_token, &claims, role);
        self.transport.session().login(session.clone());

        tracing::info!(
            target: TRACING_TARGET,
            account_id = %session.account_id,
            role = %session.role.code(),
            "Login completed"
        );

        Ok(session)
    }

    /// Registers a new staff account.
    pub async fn register_staff(&self, registration: &StaffRegistration) -> ApiResult<StaffAccount> {
        registration.validate()?;

        let account: StaffAccount = self
            .transport
            .post(Service::Auth, "staff", registration)
            .await?;

        tracing::info!(
            target: TRACING_TARGET,
            account_id = %account.id,
            role = %account.role,
            "Staff account registered"
        );

        Ok(account)
    }

    /// Clears the active session.
    ///
    /// Returns whether a session was present. Tokens are stateless, so no
    /// backend call is involved; the session simply stops being attached.
    pub fn logout(&self) -> bool {
        self.transport.session().logout()
    }

    /// Verifies that the login response agrees with its own token claims.
    fn cross_check(claims: &AccessClaims, response: &LoginResponse) -> ApiResult<()> {
        if claims.account_id != response.account_id {
            return Err(ApiError::Malformed(CoreError::Inconsistent(
                "token subject does not match the response account".into(),
            )));
        }

        if claims.role_code != response.role_code {
            return Err(ApiError::Malformed(CoreError::Inconsistent(
                "token role code does not match the response role code".into(),
            )));
        }

        let claim_ids = claims.identifiers();
        let pairs = [
            (claim_ids.admin_id, response.identifiers.admin_id),
            (claim_ids.doctor_id, response.identifiers.doctor_id),
            (
                claim_ids.receptionist_id,
                response.identifiers.receptionist_id,
            ),
            (claim_ids.clinic_id, response.identifiers.clinic_id),
        ];
        for (from_claims, from_response) in pairs {
            if let (Some(a), Some(b)) = (from_claims, from_response)
                && a != b
            {
                return Err(ApiError::Malformed(CoreError::Inconsistent(
                    "token identifiers do not match the response identifiers".into(),
                )));
            }
        }

        Ok(())
    }
}
