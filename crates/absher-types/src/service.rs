//! Service type tags and service definitions.
//!
//! A [`ServiceType`] distinguishes the three simulated government services.
//! Each has a short tag used by the API and the intent router, and a dataset
//! tag used by the `service_type` field of synthetic user records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The simulated government services, in declaration order.
///
/// Declaration order matters: the intent router breaks score ties in favour
/// of the service declared first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    Iqama,
    NationalId,
    Vehicle,
}

impl ServiceType {
    /// All service types in declaration order.
    pub const ALL: [ServiceType; 3] = [
        ServiceType::Iqama,
        ServiceType::NationalId,
        ServiceType::Vehicle,
    ];

    /// Short tag used by the API and the intent router (`iqama`, `national_id`, `vehicle`).
    pub fn tag(&self) -> &'static str {
        match self {
            ServiceType::Iqama => "iqama",
            ServiceType::NationalId => "national_id",
            ServiceType::Vehicle => "vehicle",
        }
    }

    /// Value of the `service_type` field in the synthetic user dataset.
    pub fn dataset_tag(&self) -> &'static str {
        match self {
            ServiceType::Iqama => "IQAMA_RENEWAL",
            ServiceType::NationalId => "NATIONAL_ID",
            ServiceType::Vehicle => "VEHICLE_REGISTRATION",
        }
    }

    /// Human label for the kind of user a service applies to.
    pub fn holder_label(&self) -> &'static str {
        match self {
            ServiceType::Iqama => "Iqama Holder",
            ServiceType::NationalId => "National ID Holder",
            ServiceType::Vehicle => "Vehicle Owner",
        }
    }

    /// Resolve a dataset tag (`IQAMA_RENEWAL`, ...) back to a service type.
    pub fn from_dataset_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.dataset_tag() == tag)
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ServiceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "iqama" | "iqama_renewal" => Ok(ServiceType::Iqama),
            "national_id" | "national-id" => Ok(ServiceType::NationalId),
            "vehicle" | "vehicle_registration" => Ok(ServiceType::Vehicle),
            other => Err(format!("invalid service type: '{other}'")),
        }
    }
}

/// Static description of one government service.
///
/// Defined once at process start and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDefinition {
    pub id: String,
    pub service_type: ServiceType,
    pub name_ar: String,
    pub name_en: String,
    pub description_ar: String,
    pub description_en: String,
    /// Documents the applicant must provide, in display order.
    pub required_documents: Vec<String>,
    /// Workflow step strings, already numbered ("1. ...").
    pub workflow: Vec<String>,
    pub eligibility_checks: Vec<String>,
    pub cost: String,
    pub processing_time: String,
}
