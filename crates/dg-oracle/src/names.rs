//! Greek name generator.

use dg_core::{CharacterSheet, NameKind};
use dg_mechanics::RandomSource;
use serde::Serialize;

/// Masculine hero names.
pub const MALE_NAMES: &[&str] = &[
    "Alexandros",
    "Nikias",
    "Lysander",
    "Theron",
    "Demetrios",
    "Odysseus",
    "Achilleus",
    "Hektor",
    "Perseus",
    "Theseus",
    "Orion",
    "Apollo",
    "Hermes",
    "Dionysios",
    "Aristides",
    "Kleomenes",
    "Pericles",
    "Sophokles",
    "Euripides",
    "Aeschylus",
];

/// Feminine hero names.
pub const FEMALE_NAMES: &[&str] = &[
    "Kassandra",
    "Penelope",
    "Andromeda",
    "Ariadne",
    "Elektra",
    "Antigone",
    "Iphigenia",
    "Helena",
    "Klytemnestra",
    "Medea",
    "Daphne",
    "Artemis",
    "Athena",
    "Persephone",
    "Sappho",
    "Aspasia",
    "Lysistrata",
    "Atalanta",
    "Ismene",
    "Eurydice",
];

/// Names of gods, titans, and primordials.
pub const GOD_NAMES: &[&str] = &[
    "Zeus",
    "Hera",
    "Poseidon",
    "Demeter",
    "Athena",
    "Apollo",
    "Artemis",
    "Ares",
    "Aphrodite",
    "Hephaestus",
    "Hermes",
    "Dionysus",
    "Hades",
    "Persephone",
    "Hestia",
    "Hecate",
    "Pan",
    "Nyx",
    "Helios",
    "Selene",
    "Eos",
    "Iris",
    "Nemesis",
    "Tyche",
    "Hypnos",
    "Morpheus",
    "Thanatos",
    "Erebus",
    "Chaos",
    "Gaia",
];

/// One hero name and one god name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedNames {
    /// A name for the character.
    pub hero: &'static str,
    /// A name for the divine parent.
    pub god: &'static str,
}

impl GeneratedNames {
    /// The name for the given sheet field.
    pub fn get(&self, kind: NameKind) -> &'static str {
        match kind {
            NameKind::Character => self.hero,
            NameKind::God => self.god,
        }
    }

    /// Write the chosen name into `sheet`.
    pub fn apply(&self, sheet: &mut CharacterSheet, kind: NameKind) {
        sheet.apply_name(kind, self.get(kind));
    }
}

/// Draw a hero name from both hero lists and a god name.
pub fn generate_names(rng: &mut impl RandomSource) -> GeneratedNames {
    let heroes = MALE_NAMES.len() + FEMALE_NAMES.len();
    let pick = rng.pick(heroes);
    let hero = MALE_NAMES
        .iter()
        .chain(FEMALE_NAMES)
        .nth(pick)
        .copied()
        .unwrap_or(MALE_NAMES[0]);
    let god = GOD_NAMES[rng.pick(GOD_NAMES.len())];
    GeneratedNames { hero, god }
}
