use crate::models::ServiceType;

/// The service catalog is static: the clinic backend assigns stable numeric
/// identifiers and the portal exposes human-facing keys for them.
pub const SERVICE_CATALOG: &[ServiceType] = &[
    ServiceType {
        key: "checkup",
        display_name: "Dental Checkup",
        service_id: 1,
        duration_minutes: 30,
    },
    ServiceType {
        key: "cleaning",
        display_name: "Teeth Cleaning",
        service_id: 2,
        duration_minutes: 30,
    },
    ServiceType {
        key: "whitening",
        display_name: "Teeth Whitening",
        service_id: 3,
        duration_minutes: 60,
    },
    ServiceType {
        key: "filling",
        display_name: "Cavity Filling",
        service_id: 4,
        duration_minutes: 45,
    },
    ServiceType {
        key: "extraction",
        display_name: "Tooth Extraction",
        service_id: 5,
        duration_minutes: 45,
    },
    ServiceType {
        key: "root-canal",
        display_name: "Root Canal Treatment",
        service_id: 6,
        duration_minutes: 90,
    },
    ServiceType {
        key: "emergency",
        display_name: "Emergency Visit",
        service_id: 7,
        duration_minutes: 30,
    },
];

/// Resolve a human-facing service key to its catalog entry.
pub fn resolve_service(key: &str) -> Option<&'static ServiceType> {
    let key = key.trim().to_lowercase();
    SERVICE_CATALOG.iter().find(|service| service.key == key)
}
