//! In-memory synthetic user store.
//!
//! Loaded once at startup and read-only afterwards. Partitioning by service
//! is an equality filter on the record's `service_type` tag.

use absher_types::service::ServiceType;
use absher_types::user::UserRecord;

#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: Vec<UserRecord>,
}

impl UserDirectory {
    pub fn new(users: Vec<UserRecord>) -> Self {
        Self { users }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn all(&self) -> &[UserRecord] {
        &self.users
    }

    /// Users tagged with `service`, in dataset order.
    pub fn by_service(&self, service: ServiceType) -> Vec<&UserRecord> {
        let tag = service.dataset_tag();
        self.users
            .iter()
            .filter(|u| u.field("service_type") == Some(tag))
            .collect()
    }

    /// The `index`-th user of a service partition.
    pub fn get(&self, service: ServiceType, index: usize) -> Option<&UserRecord> {
        self.by_service(service).get(index).copied()
    }

    /// First user whose `field` equals `value` exactly.
    pub fn find_by(&self, field: &str, value: &str) -> Option<&UserRecord> {
        self.users.iter().find(|u| u.field(field) == Some(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn directory() -> UserDirectory {
        let users: Vec<UserRecord> = serde_json::from_value(json!([
            {"service_type": "IQAMA_RENEWAL", "name_en": "Ravi", "iqama_id": "2001"},
            {"service_type": "NATIONAL_ID", "name_en": "Ahmed", "national_id": "1122334455"},
            {"service_type": "IQAMA_RENEWAL", "name_en": "Maria", "iqama_id": "2002", "residency_id": "R-77"},
            {"service_type": "VEHICLE_REGISTRATION", "name_en": "Sara", "vehicle_plate": "ABC 123"}
        ]))
        .unwrap();
        UserDirectory::new(users)
    }

    #[test]
    fn partitions_by_service_tag() {
        let dir = directory();
        let iqama = dir.by_service(ServiceType::Iqama);
        assert_eq!(iqama.len(), 2);
        assert_eq!(iqama[0].name_en(), "Ravi");
        assert_eq!(iqama[1].name_en(), "Maria");
        assert_eq!(dir.by_service(ServiceType::Vehicle).len(), 1);
    }

    #[test]
    fn get_by_partition_index() {
        let dir = directory();
        assert_eq!(dir.get(ServiceType::Iqama, 1).unwrap().name_en(), "Maria");
        assert!(dir.get(ServiceType::NationalId, 1).is_none());
    }

    #[test]
    fn find_by_exact_field() {
        let dir = directory();
        assert_eq!(dir.find_by("national_id", "1122334455").unwrap().name_en(), "Ahmed");
        assert_eq!(dir.find_by("residency_id", "R-77").unwrap().name_en(), "Maria");
        assert!(dir.find_by("national_id", "112233445").is_none());
    }

    #[test]
    fn empty_directory() {
        let dir = UserDirectory::default();
        assert!(dir.is_empty());
        assert!(dir.by_service(ServiceType::Iqama).is_empty());
    }
}
