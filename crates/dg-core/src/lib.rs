//! Core types for Demigod: the character sheet, its attributes, and persistence.
//!
//! This crate defines the record a player edits (a demigod's identity,
//! attributes, divine powers, and narrative notes) together with the
//! key-value persistence and JSON transfer used to keep it around. It knows
//! nothing about dice; see `dg-mechanics` for rolls and combat.

/// Attribute catalogue, labels, and the canonical bonus rule.
pub mod attribute;
/// Error types used throughout the crate.
pub mod error;
/// The roster of selectable patron deities.
pub mod patron;
/// Named sheet persistence on top of a key-value store.
pub mod repository;
/// The character sheet record and divine powers.
pub mod sheet;
/// Key-value store backends.
pub mod store;
/// Divine transformation level derived from a sheet.
pub mod transformation;
/// JSON export and import of character sheets.
pub mod transfer;

/// Re-export attribute types.
pub use attribute::{Attribute, AttributeGroup, attribute_bonus};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export patron types.
pub use patron::Patron;
/// Re-export repository types.
pub use repository::{SheetRepository, SheetSession};
/// Re-export sheet types.
pub use sheet::{CharacterSheet, DivinePower, NameKind, VitalCondition};
/// Re-export store types.
pub use store::{DirStore, KeyValueStore, MemoryStore};
/// Re-export transformation types.
pub use transformation::{Transformation, TransformationStage};
