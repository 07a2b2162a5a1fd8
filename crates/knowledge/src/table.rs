//! The knowledge table the fallback matcher answers from.

use serde::{Deserialize, Serialize};

/// How to reach the branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl Default for ContactInfo {
    fn default() -> Self {
        Self {
            phone: "+91 91500 78405".into(),
            email: "5kcc.bangaloreec@gmail.com".into(),
            address: "15th Cross, Behind Village Hyper Market, Neeladri Road, Electronic City"
                .into(),
        }
    }
}

/// Static facts about the business.
///
/// Loaded once at startup (built-in values, optionally overridden by the
/// `[knowledge]` config section) and shared read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeTable {
    /// Car wash offerings
    #[serde(default = "default_car_wash")]
    pub car_wash: Vec<String>,

    /// Every service line
    #[serde(default = "default_services")]
    pub services: Vec<String>,

    /// Opening hours, phrased to follow "5K Car Care is ..."
    #[serde(default = "default_hours")]
    pub hours: String,

    #[serde(default)]
    pub contact: ContactInfo,
}

fn default_car_wash() -> Vec<String> {
    ["RO Water Wash", "Exterior Car Spa", "Sanitizer Foam Car Spa"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_services() -> Vec<String> {
    [
        "Car Wash",
        "Anti-Bacteria Treatment",
        "Teflon Coating",
        "Ceramic Coating",
        "Interior Enrichment",
        "Car AC Services",
        "Car Detailing",
        "Special Treatments",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_hours() -> String {
    "Open 365 days, 10 AM to 7 PM".into()
}

impl KnowledgeTable {
    /// The built-in table for the Electronic City branch.
    pub fn builtin() -> Self {
        Self {
            car_wash: default_car_wash(),
            services: default_services(),
            hours: default_hours(),
            contact: ContactInfo::default(),
        }
    }

    /// Car wash offerings as a comma-separated list.
    pub fn car_wash_list(&self) -> String {
        self.car_wash.join(", ")
    }

    /// All services as a comma-separated list.
    pub fn service_list(&self) -> String {
        self.services.join(", ")
    }
}

impl Default for KnowledgeTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_lists() {
        let table = KnowledgeTable::builtin();
        assert_eq!(
            table.car_wash_list(),
            "RO Water Wash, Exterior Car Spa, Sanitizer Foam Car Spa"
        );
        assert_eq!(table.services.len(), 8);
        assert!(table.service_list().starts_with("Car Wash, Anti-Bacteria Treatment"));
    }

    #[test]
    fn partial_override_keeps_builtin_values() {
        let table: KnowledgeTable = toml::from_str(
            r#"
hours = "Open 7 days, 9 AM to 9 PM"

[contact]
phone = "+91 00000 00000"
email = "branch@example.com"
address = "Somewhere"
"#,
        )
        .unwrap();

        assert_eq!(table.hours, "Open 7 days, 9 AM to 9 PM");
        assert_eq!(table.contact.phone, "+91 00000 00000");
        assert_eq!(table.car_wash, KnowledgeTable::builtin().car_wash);
    }
}
