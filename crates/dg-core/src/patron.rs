//! The patron deities a player can pick for their demigod.

/// A selectable divine parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patron {
    /// Stable id stored on the sheet.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Emblem shown next to the name.
    pub symbol: &'static str,
    /// Divine domain.
    pub domain: &'static str,
}

/// Every patron on the roster, in menu order.
pub const PATRONS: &[Patron] = &[
    Patron {
        id: "helio",
        name: "Helios",
        symbol: "☀️",
        domain: "God of the Sun",
    },
    Patron {
        id: "artemis",
        name: "Artemis",
        symbol: "🏹",
        domain: "Goddess of the Hunt",
    },
    Patron {
        id: "hecate",
        name: "Hecate",
        symbol: "🔮",
        domain: "Goddess of Magic",
    },
    Patron {
        id: "dionysus",
        name: "Dionysus",
        symbol: "🍷",
        domain: "God of Wine",
    },
    Patron {
        id: "demeter",
        name: "Demeter",
        symbol: "🌾",
        domain: "Goddess of the Harvest",
    },
    Patron {
        id: "poseidon",
        name: "Poseidon",
        symbol: "🌊",
        domain: "God of the Seas",
    },
];

impl Patron {
    /// Find a patron by id, ignoring case.
    pub fn find(id: &str) -> Option<&'static Patron> {
        let id = id.trim();
        PATRONS.iter().find(|p| p.id.eq_ignore_ascii_case(id))
    }

    /// All patrons on the roster.
    pub fn all() -> &'static [Patron] {
        PATRONS
    }
}

impl std::fmt::Display for Patron {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} ({})", self.symbol, self.name, self.domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_has_six_unique_ids() {
        assert_eq!(PATRONS.len(), 6);
        for (i, a) in PATRONS.iter().enumerate() {
            for b in &PATRONS[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn find_is_case_insensitive() {
        assert_eq!(Patron::find("POSEIDON").map(|p| p.name), Some("Poseidon"));
        assert_eq!(Patron::find(" helio ").map(|p| p.name), Some("Helios"));
        assert!(Patron::find("zeus").is_none());
    }

    #[test]
    fn display() {
        let artemis = Patron::find("artemis").unwrap();
        assert_eq!(artemis.to_string(), "🏹 Artemis (Goddess of the Hunt)");
    }
}
