use serde::{Deserialize, Serialize};

/// A marketing carrier in the roster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carrier {
    pub name: &'static str,
    pub code: &'static str,
    /// Brand color as a CSS hex string
    pub color: &'static str,
}

pub const CARRIERS: [Carrier; 8] = [
    Carrier { name: "Delta Air Lines", code: "DL", color: "#0033A0" },
    Carrier { name: "United Airlines", code: "UA", color: "#0066CC" },
    Carrier { name: "American Airlines", code: "AA", color: "#CC0000" },
    Carrier { name: "Southwest Airlines", code: "WN", color: "#FF6600" },
    Carrier { name: "JetBlue Airways", code: "B6", color: "#0033CC" },
    Carrier { name: "Alaska Airlines", code: "AS", color: "#006B5A" },
    Carrier { name: "Spirit Airlines", code: "NK", color: "#FFD700" },
    Carrier { name: "Frontier Airlines", code: "F9", color: "#008080" },
];

/// Cabin classes, cheapest first
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CabinClass {
    Economy,
    #[serde(rename = "Premium Economy")]
    PremiumEconomy,
    Business,
    #[serde(rename = "First Class")]
    FirstClass,
}

impl CabinClass {
    /// The tiers the synthetic generator hands out. Business and First are never quoted.
    pub const GENERATED: [CabinClass; 2] = [CabinClass::Economy, CabinClass::PremiumEconomy];

    pub fn label(&self) -> &'static str {
        match self {
            CabinClass::Economy => "Economy",
            CabinClass::PremiumEconomy => "Premium Economy",
            CabinClass::Business => "Business",
            CabinClass::FirstClass => "First Class",
        }
    }
}

impl std::fmt::Display for CabinClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_codes_are_unique() {
        let mut codes: Vec<_> = CARRIERS.iter().map(|c| c.code).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), CARRIERS.len());
    }

    #[test]
    fn test_cabin_class_wire_names() {
        assert_eq!(
            serde_json::to_string(&CabinClass::PremiumEconomy).unwrap(),
            "\"Premium Economy\""
        );
        let first: CabinClass = serde_json::from_str("\"First Class\"").unwrap();
        assert_eq!(first, CabinClass::FirstClass);
        assert!(!CabinClass::GENERATED.contains(&CabinClass::Business));
    }
}
