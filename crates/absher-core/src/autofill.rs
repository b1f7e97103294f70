//! Form auto-fill from the selected user profile.
//!
//! Common fields are copied for every service; service-specific fields come
//! from an enum-keyed rule table, so adding a service means adding a rule
//! rather than editing a conditional chain.

use chrono::NaiveDate;
use serde::Serialize;

use absher_types::error::AutoFillError;
use absher_types::form::FormData;
use absher_types::service::ServiceType;
use absher_types::transaction::{TransactionRecord, TransactionStatus};
use absher_types::user::UserRecord;

use crate::transaction::TransactionLog;

/// Upper bound accepted for the "documents uploaded" counter.
pub const MAX_DOCUMENTS: u32 = 10;

/// `(form key, user record field)` pairs copied for every service.
const COMMON_FIELDS: [(&str, &str); 5] = [
    ("name", "name_en"),
    ("email", "email"),
    ("phone", "phone"),
    ("national_id", "national_id"),
    ("status", "status"),
];

/// Service-specific `(form key, user record field)` pairs.
pub fn service_fields(service: ServiceType) -> &'static [(&'static str, &'static str)] {
    match service {
        ServiceType::Iqama => &[
            ("iqama_id", "iqama_id"),
            ("employer", "employer_name"),
            ("occupation", "occupation"),
        ],
        ServiceType::NationalId => &[("birth_date", "birth_date"), ("region", "region")],
        ServiceType::Vehicle => &[("vehicle_plate", "vehicle_plate"), ("vehicle_type", "vehicle_type")],
    }
}

/// Build the pre-filled form for `service` from `user`.
///
/// Missing profile fields become empty strings.
pub fn auto_fill(service: ServiceType, user: Option<&UserRecord>) -> Result<FormData, AutoFillError> {
    let user = user.ok_or(AutoFillError::NoUser)?;

    let mut form = FormData::new();
    for (key, field) in COMMON_FIELDS.iter().chain(service_fields(service)) {
        form.push(key, user.field_or_empty(field));
    }
    Ok(form)
}

/// Receipt for a submitted application.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationReceipt {
    pub service: ServiceType,
    pub documents_uploaded: u32,
    pub appointment_date: NaiveDate,
    pub transaction: TransactionRecord,
}

/// Submit an auto-filled application.
///
/// Validates the extra details and logs a `service_application` transaction.
pub fn submit_application(
    service: ServiceType,
    user: Option<&UserRecord>,
    documents_uploaded: u32,
    appointment_date: NaiveDate,
    today: NaiveDate,
    log: &mut TransactionLog,
) -> Result<ApplicationReceipt, AutoFillError> {
    let user = user.ok_or(AutoFillError::NoUser)?;
    if documents_uploaded > MAX_DOCUMENTS {
        return Err(AutoFillError::DocumentCount {
            max: MAX_DOCUMENTS,
            got: documents_uploaded,
        });
    }
    if appointment_date < today {
        return Err(AutoFillError::AppointmentInPast(appointment_date.to_string()));
    }

    let transaction = log
        .append(
            user.user_id().unwrap_or_default(),
            "service_application",
            TransactionStatus::Completed,
            format!(
                "{service}: {documents_uploaded} documents, appointment {appointment_date}"
            ),
        )
        .clone();

    tracing::info!(service = %service, txn = %transaction.transaction_id, "Application submitted");

    Ok(ApplicationReceipt {
        service,
        documents_uploaded,
        appointment_date,
        transaction,
    })
}
