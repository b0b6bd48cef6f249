//! Role model for multi-role clinic accounts.
//!
//! The backend identifies roles by a numeric wire code and attaches the
//! identifiers each role operates with (clinic, doctor, receptionist). This
//! module decodes that pair into a closed tagged type once, so downstream
//! code never re-derives a role from response-shape heuristics.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};

/// Numeric role code used on the authentication wire.
///
/// This is the closed set of codes the auth service issues. Anything outside
/// it is rejected at decode time with [`CoreError::UnknownRole`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum RoleCode {
    /// Platform administrator.
    Admin,
    /// Independent doctor account.
    Doctor,
    /// Front-desk receptionist bound to one clinic.
    Receptionist,
    /// Doctor account scoped to a clinic.
    ClinicDoctor,
    /// Combined doctor and clinic-owner account.
    HybridDoctorClinic,
}

impl RoleCode {
    /// Decodes a numeric wire code into a role code.
    pub fn from_wire(code: u16) -> CoreResult<Self> {
        match code {
            1 => Ok(RoleCode::Admin),
            2 => Ok(RoleCode::Doctor),
            3 => Ok(RoleCode::Receptionist),
            4 => Ok(RoleCode::ClinicDoctor),
            5 => Ok(RoleCode::HybridDoctorClinic),
            other => Err(CoreError::UnknownRole(other)),
        }
    }

    /// Returns the numeric wire representation of this role code.
    #[inline]
    pub const fn as_wire(self) -> u16 {
        match self {
            RoleCode::Admin => 1,
            RoleCode::Doctor => 2,
            RoleCode::Receptionist => 3,
            RoleCode::ClinicDoctor => 4,
            RoleCode::HybridDoctorClinic => 5,
        }
    }
}

/// Identifiers attached to an authentication response.
///
/// Which fields are required depends on the role code; [`Role::decode`]
/// enforces per-role presence.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleIdentifiers {
    /// Administrator identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_id: Option<Uuid>,
    /// Doctor identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor_id: Option<Uuid>,
    /// Receptionist identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receptionist_id: Option<Uuid>,
    /// Clinic identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinic_id: Option<Uuid>,
}

/// Authenticated role with the identifiers it operates with.
///
/// Decoded once at authentication time; every variant carries exactly the
/// identifiers that role needs, so call sites match on the variant instead
/// of probing optional fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum Role {
    /// Platform administrator.
    Admin {
        /// Administrator identifier.
        admin_id: Uuid,
    },
    /// Independent doctor account.
    Doctor {
        /// Doctor identifier.
        doctor_id: Uuid,
    },
    /// Front-desk receptionist bound to one clinic.
    Receptionist {
        /// Receptionist identifier.
        receptionist_id: Uuid,
        /// Clinic the receptionist works for.
        clinic_id: Uuid,
    },
    /// Doctor account scoped to a clinic.
    ClinicDoctor {
        /// Clinic the doctor belongs to.
        clinic_id: Uuid,
        /// Doctor identifier.
        doctor_id: Uuid,
    },
    /// Combined doctor and clinic-owner account.
    HybridDoctorClinic {
        /// Doctor identifier.
        doctor_id: Uuid,
        /// Clinic owned by the doctor.
        clinic_id: Uuid,
    },
}

impl Role {
    /// Decodes a role from its wire code and attached identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingIdentifier`] when the response omits an
    /// identifier the role requires.
    pub fn decode(code: RoleCode, ids: &RoleIdentifiers) -> CoreResult<Self> {
        let require = |id: Option<Uuid>, name: &'static str| {
            id.ok_or(CoreError::MissingIdentifier(name))
        };

        match code {
            RoleCode::Admin => Ok(Role::Admin {
                admin_id: require(ids.admin_id, "adminId")?,
            }),
            RoleCode::Doctor => Ok(Role::Doctor {
                doctor_id: require(ids.doctor_id, "doctorId")?,
            }),
            RoleCode::Receptionist => Ok(Role::Receptionist {
                receptionist_id: require(ids.receptionist_id, "receptionistId")?,
                clinic_id: require(ids.clinic_id, "clinicId")?,
            }),
            RoleCode::ClinicDoctor => Ok(Role::ClinicDoctor {
                clinic_id: require(ids.clinic_id, "clinicId")?,
                doctor_id: require(ids.doctor_id, "doctorId")?,
            }),
            RoleCode::HybridDoctorClinic => Ok(Role::HybridDoctorClinic {
                doctor_id: require(ids.doctor_id, "doctorId")?,
                clinic_id: require(ids.clinic_id, "clinicId")?,
            }),
        }
    }

    /// Returns the wire code for this role.
    #[inline]
    pub const fn code(&self) -> RoleCode {
        match self {
            Role::Admin { .. } => RoleCode::Admin,
            Role::Doctor { .. } => RoleCode::Doctor,
            Role::Receptionist { .. } => RoleCode::Receptionist,
            Role::ClinicDoctor { .. } => RoleCode::ClinicDoctor,
            Role::HybridDoctorClinic { .. } => RoleCode::HybridDoctorClinic,
        }
    }

    /// Returns whether this role has administrative privileges.
    #[inline]
    pub const fn is_administrator(&self) -> bool {
        matches!(self, Role::Admin { .. })
    }

    /// Returns the clinic identifier this role is scoped to, if any.
    #[inline]
    pub const fn clinic_id(&self) -> Option<Uuid> {
        match self {
            Role::Receptionist { clinic_id, .. }
            | Role::ClinicDoctor { clinic_id, .. }
            | Role::HybridDoctorClinic { clinic_id, .. } => Some(*clinic_id),
            Role::Admin { .. } | Role::Doctor { .. } => None,
        }
    }

    /// Returns the doctor identifier this role carries, if any.
    #[inline]
    pub const fn doctor_id(&self) -> Option<Uuid> {
        match self {
            Role::Doctor { doctor_id }
            | Role::ClinicDoctor { doctor_id, .. }
            | Role::HybridDoctorClinic { doctor_id, .. } => Some(*doctor_id),
            Role::Admin { .. } | Role::Receptionist { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> RoleIdentifiers {
        RoleIdentifiers {
            admin_id: Some(Uuid::new_v4()),
            doctor_id: Some(Uuid::new_v4()),
            receptionist_id: Some(Uuid::new_v4()),
            clinic_id: Some(Uuid::new_v4()),
        }
    }

    #[test]
    fn role_code_wire_roundtrip() {
        for code in 1..=5u16 {
            let decoded = RoleCode::from_wire(code).expect("known code");
            assert_eq!(decoded.as_wire(), code);
        }
    }

    #[test]
    fn role_code_unknown_is_rejected() {
        assert!(matches!(
            RoleCode::from_wire(0),
            Err(CoreError::UnknownRole(0))
        ));
        assert!(matches!(
            RoleCode::from_wire(42),
            Err(CoreError::UnknownRole(42))
        ));
    }

    #[test]
    fn decode_each_role_variant() {
        let ids = ids();

        let admin = Role::decode(RoleCode::Admin, &ids).expect("admin");
        assert!(admin.is_administrator());
        assert_eq!(admin.clinic_id(), None);

        let doctor = Role::decode(RoleCode::Doctor, &ids).expect("doctor");
        assert_eq!(doctor.doctor_id(), ids.doctor_id);

        let receptionist = Role::decode(RoleCode::Receptionist, &ids).expect("receptionist");
        assert_eq!(receptionist.clinic_id(), ids.clinic_id);
        assert_eq!(receptionist.doctor_id(), None);

        let hybrid = Role::decode(RoleCode::HybridDoctorClinic, &ids).expect("hybrid");
        assert_eq!(hybrid.clinic_id(), ids.clinic_id);
        assert_eq!(hybrid.doctor_id(), ids.doctor_id);
    }

    #[test]
    fn decode_missing_identifier_is_rejected() {
        let partial = RoleIdentifiers {
            doctor_id: Some(Uuid::new_v4()),
            ..RoleIdentifiers::default()
        };

        let result = Role::decode(RoleCode::ClinicDoctor, &partial);
        assert!(matches!(result, Err(CoreError::MissingIdentifier("clinicId"))));
    }

    #[test]
    fn role_serde_is_tagged() {
        let role = Role::Receptionist {
            receptionist_id: Uuid::nil(),
            clinic_id: Uuid::nil(),
        };

        let json = serde_json::to_value(&role).expect("serialize");
        assert_eq!(json["role"], "receptionist");
        assert!(json["receptionistId"].is_string());
        assert!(json["clinicId"].is_string());
    }
}
