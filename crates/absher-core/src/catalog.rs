//! Static service catalog.
//!
//! The three service definitions are built once at startup and never mutated.

use absher_types::service::{ServiceDefinition, ServiceType};

/// Immutable lookup from [`ServiceType`] to its [`ServiceDefinition`].
#[derive(Debug, Clone)]
pub struct ServiceCatalog {
    services: Vec<ServiceDefinition>,
}

impl ServiceCatalog {
    /// The standard catalog: iqama renewal, national ID, vehicle registration.
    pub fn standard() -> Self {
        Self {
            services: vec![iqama_renewal(), national_id(), vehicle_registration()],
        }
    }

    /// Definition for a service type.
    pub fn get(&self, service: ServiceType) -> &ServiceDefinition {
        // The standard catalog holds every variant, in declaration order.
        &self.services[service as usize]
    }

    /// All definitions in declaration order.
    pub fn all(&self) -> &[ServiceDefinition] {
        &self.services
    }

    /// Remaining workflow steps from `current_step` (0-based).
    ///
    /// Returns an empty slice once `current_step` is past the last step.
    pub fn next_steps(&self, service: ServiceType, current_step: usize) -> &[String] {
        let workflow = &self.get(service).workflow;
        workflow.get(current_step..).unwrap_or(&[])
    }
}

impl Default for ServiceCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn iqama_renewal() -> ServiceDefinition {
    ServiceDefinition {
        id: "v004_iqama_renewal".to_string(),
        service_type: ServiceType::Iqama,
        name_ar: "تجديد الإقامة".to_string(),
        name_en: "Iqama Renewal".to_string(),
        description_ar: "خدمة تجديد الإقامة للعاملين بالقطاع الخاص والحكومي".to_string(),
        description_en: "Service for renewing residency for private and government employees"
            .to_string(),
        required_documents: strings(&[
            "Valid Iqama",
            "Employer's letter",
            "Medical examination certificate",
            "Police clearance",
        ]),
        workflow: strings(&[
            "1. Login and select Iqama Renewal",
            "2. Review requirements",
            "3. Upload documents",
            "4. Confirm employer details",
            "5. Pay fees",
            "6. Schedule appointment",
            "7. Track status",
        ]),
        eligibility_checks: strings(&[
            "Must have valid Iqama",
            "Iqama must be expiring within 90 days",
            "No criminal record",
            "Employment status verified",
        ]),
        cost: "100 SAR".to_string(),
        processing_time: "7-14 days".to_string(),
    }
}

fn national_id() -> ServiceDefinition {
    ServiceDefinition {
        id: "v002_national_id".to_string(),
        service_type: ServiceType::NationalId,
        name_ar: "استخراج الهوية الوطنية".to_string(),
        name_en: "National ID Issuance".to_string(),
        description_ar: "خدمة استخراج أو تجديد الهوية الوطنية".to_string(),
        description_en: "Service for issuing or renewing national ID".to_string(),
        required_documents: strings(&[
            "Birth certificate",
            "Parent's national ID",
            "Residence proof",
            "2 passport photos",
        ]),
        workflow: strings(&[
            "1. Verify citizenship",
            "2. Collect biometric data",
            "3. Upload supporting documents",
            "4. Pay application fee",
            "5. Schedule biometric appointment",
            "6. Receive ID",
            "7. Track status",
        ]),
        eligibility_checks: strings(&[
            "Saudi citizen",
            "Age 18 or older",
            "Valid civil registry record",
            "No outstanding legal issues",
        ]),
        cost: "85 SAR".to_string(),
        processing_time: "5-10 days".to_string(),
    }
}

fn vehicle_registration() -> ServiceDefinition {
    ServiceDefinition {
        id: "v005_vehicle_registration".to_string(),
        service_type: ServiceType::Vehicle,
        name_ar: "تجديد تسجيل المركبة".to_string(),
        name_en: "Vehicle Registration Renewal".to_string(),
        description_ar: "خدمة تجديد تسجيل المركبة وإصدار ملصقات الفحص الفني".to_string(),
        description_en:
            "Service for vehicle registration renewal and technical inspection stickers"
                .to_string(),
        required_documents: strings(&[
            "Current registration document",
            "Vehicle inspection certificate",
            "Insurance document",
            "Owner ID",
            "Vehicle keys for inspection",
        ]),
        workflow: strings(&[
            "1. Enter vehicle plate number",
            "2. Review vehicle details",
            "3. Upload required documents",
            "4. Schedule inspection appointment",
            "5. Complete technical inspection",
            "6. Pay renewal fee",
            "7. Receive updated registration",
        ]),
        eligibility_checks: strings(&[
            "Vehicle ownership verified",
            "Insurance is active",
            "Previous registration valid",
            "No traffic violations unpaid",
        ]),
        cost: "200 SAR".to_string(),
        processing_time: "1-3 days".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_indexes_match_service_types() {
        let catalog = ServiceCatalog::standard();
        for service in ServiceType::ALL {
            assert_eq!(catalog.get(service).service_type, service);
        }
    }

    #[test]
    fn test_catalog_costs() {
        let catalog = ServiceCatalog::standard();
        assert_eq!(catalog.get(ServiceType::Iqama).cost, "100 SAR");
        assert_eq!(catalog.get(ServiceType::NationalId).cost, "85 SAR");
        assert_eq!(catalog.get(ServiceType::Vehicle).cost, "200 SAR");
    }

    #[test]
    fn test_next_steps() {
        let catalog = ServiceCatalog::standard();
        let steps = catalog.next_steps(ServiceType::Vehicle, 5);
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0], "6. Pay renewal fee");

        assert_eq!(catalog.next_steps(ServiceType::Vehicle, 0).len(), 7);
        assert!(catalog.next_steps(ServiceType::Vehicle, 7).is_empty());
        assert!(catalog.next_steps(ServiceType::Vehicle, 100).is_empty());
    }

    #[test]
    fn test_all_in_declaration_order() {
        let catalog = ServiceCatalog::standard();
        let ids: Vec<&str> = catalog.all().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["v004_iqama_renewal", "v002_national_id", "v005_vehicle_registration"]
        );
    }
}
