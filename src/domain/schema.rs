use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// One selectable feature within a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureDef {
    pub id: &'static str,
    pub label: &'static str,
    pub importance: &'static str,
}

/// A named group of features tracked together on the checklist.
#[derive(Debug, Clone, Copy)]
pub struct FeaturePackage {
    pub key: &'static str,
    pub name: &'static str,
    pub features: &'static [FeatureDef],
}

const fn feature(id: &'static str, label: &'static str, importance: &'static str) -> FeatureDef {
    FeatureDef {
        id,
        label,
        importance,
    }
}

/// The form schema: every package and feature the checklist tracks, in
/// display order. Records denormalize labels from here at save time.
pub const PACKAGES: &[FeaturePackage] = &[
    FeaturePackage {
        key: "executive",
        name: "Executive Package",
        features: &[
            feature("adaptive-led", "Adaptive LED Headlights", "high"),
            feature("harman-kardon", "Harman Kardon Surround Sound", "medium"),
            feature("heated-steering", "Heated Steering Wheel", "medium"),
            feature("wireless-charging", "Wireless Phone Charging", "low"),
            feature("wifi-hotspot", "WiFi Hotspot", "low"),
        ],
    },
    FeaturePackage {
        key: "premium",
        name: "Premium Package",
        features: &[
            feature("head-up-display", "Head-Up Display", "high"),
            feature("comfort-access", "Comfort Access Keyless Entry", "medium"),
            feature("live-cockpit-pro", "Live Cockpit Professional", "high"),
            feature("lumbar-support", "Lumbar Support", "medium"),
        ],
    },
    FeaturePackage {
        key: "driving",
        name: "Driving Assistance",
        features: &[
            feature("active-cruise", "Active Cruise Control", "high"),
            feature("lane-keep", "Lane Keeping Assistant", "high"),
            feature("blind-spot", "Blind Spot Detection", "medium"),
        ],
    },
    FeaturePackage {
        key: "parking",
        name: "Parking Assistance",
        features: &[
            feature("surround-view", "Surround View Camera", "medium"),
            feature("reversing-assistant", "Reversing Assistant", "low"),
        ],
    },
    FeaturePackage {
        key: "exterior",
        name: "Exterior Features",
        features: &[
            feature("adaptive-suspension", "Adaptive M Suspension", "high"),
            feature("m-sport-brakes", "M Sport Brakes", "high"),
            feature("19-inch-wheels", "19\" Alloy Wheels", "medium"),
            feature("power-tailgate", "Power Tailgate", "low"),
            feature("sunroof", "Panoramic Sunroof", "medium"),
        ],
    },
    FeaturePackage {
        key: "interior",
        name: "Interior Features",
        features: &[
            feature("heated-seats", "Heated Front Seats", "high"),
            feature("vernasca-leather", "Vernasca Leather Upholstery", "medium"),
            feature("ambient-lighting", "Ambient Interior Lighting", "low"),
            feature("m-sport-steering", "M Sport Steering Wheel", "medium"),
        ],
    },
    FeaturePackage {
        key: "mechanical",
        name: "Mechanical Features",
        features: &[
            feature("xtraboost", "XtraBoost Overboost Mode", "high"),
            feature("m-sport-diff", "M Sport Differential", "medium"),
            feature("driving-modes", "Selectable Driving Modes", "medium"),
        ],
    },
];

static FEATURE_INDEX: Lazy<HashMap<&'static str, (&'static FeaturePackage, &'static FeatureDef)>> =
    Lazy::new(|| {
        let mut index = HashMap::new();
        for package in PACKAGES {
            for feature in package.features {
                index.insert(feature.id, (package, feature));
            }
        }
        index
    });

pub fn packages() -> &'static [FeaturePackage] {
    PACKAGES
}

/// Looks up a feature definition by id.
pub fn find_feature(id: &str) -> Option<&'static FeatureDef> {
    FEATURE_INDEX.get(id).map(|(_, feature)| *feature)
}

/// Package a feature belongs to, if the id is known.
pub fn package_of(id: &str) -> Option<&'static FeaturePackage> {
    FEATURE_INDEX.get(id).map(|(package, _)| *package)
}

pub fn feature_count() -> usize {
    FEATURE_INDEX.len()
}

/// Iterates every feature id in schema (display) order.
pub fn feature_ids() -> impl Iterator<Item = &'static str> {
    PACKAGES
        .iter()
        .flat_map(|package| package.features.iter().map(|feature| feature.id))
}

/// Progress of one package against a set of checked feature ids.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackageProgress {
    pub key: String,
    pub name: String,
    pub checked: usize,
    pub total: usize,
}

impl PackageProgress {
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            0
        } else {
            ((self.checked as f64 / self.total as f64) * 100.0).round() as u32
        }
    }
}

/// Per-package progress over the given checked ids, in schema order.
pub fn progress(checked: &HashSet<&str>) -> Vec<PackageProgress> {
    PACKAGES
        .iter()
        .map(|package| PackageProgress {
            key: package.key.to_string(),
            name: package.name.to_string(),
            checked: package
                .features
                .iter()
                .filter(|feature| checked.contains(feature.id))
                .count(),
            total: package.features.len(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_ids_are_unique() {
        let ids: Vec<_> = feature_ids().collect();
        let distinct: HashSet<_> = ids.iter().copied().collect();
        assert_eq!(ids.len(), distinct.len());
        assert_eq!(feature_count(), ids.len());
    }

    #[test]
    fn find_feature_resolves_package() {
        let feature = find_feature("sunroof").expect("sunroof is in the schema");
        assert_eq!(feature.label, "Panoramic Sunroof");
        assert_eq!(package_of("sunroof").unwrap().key, "exterior");
        assert!(find_feature("flux-capacitor").is_none());
    }

    #[test]
    fn progress_counts_only_schema_members() {
        let checked: HashSet<&str> = ["sunroof", "heated-seats", "not-a-feature"]
            .into_iter()
            .collect();
        let summary = progress(&checked);
        let exterior = summary.iter().find(|p| p.key == "exterior").unwrap();
        assert_eq!(exterior.checked, 1);
        assert_eq!(exterior.total, 5);
        assert_eq!(exterior.percent(), 20);
        let interior = summary.iter().find(|p| p.key == "interior").unwrap();
        assert_eq!(interior.checked, 1);
    }
}
