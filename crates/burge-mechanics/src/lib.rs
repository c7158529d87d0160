//! Character mechanics for BURGE, a Call of Cthulhu 7th edition variant.
//!
//! Provides percentile dice with bonus/penalty dice, a tiered success
//! classifier with exact odds, investigator sheets with derived resources,
//! skill advancement, and Dhole's House import/export. The engine is pure:
//! callers pass in a [`Character`] and a [`DiceSource`], and persist the
//! result through a [`CharacterStore`] of their choosing.

pub mod advancement;
pub mod dice;
pub mod error;
pub mod interchange;
pub mod resolution;
pub mod service;
pub mod sheet;
pub mod skills;
pub mod store;

pub use advancement::{AdvancementReport, SkillAdvance, SpendResult};
pub use dice::{DiceExpr, DiceSource, Die, PercentileDice, PercentileRoll, ScriptedDice, roll_d100};
pub use error::{MechError, MechResult};
pub use resolution::{Difficulty, SuccessLevel, SuccessOdds, TotalDistribution, classify};
pub use service::RollResult;
pub use sheet::{
    Character, Characteristic, HistoryEntry, ResourceChange, ResourceKind, ResourceUpdate, Skill,
    SkillChange, Track,
};
pub use skills::{ResolvedSkill, SkillMatch, resolve_skill};
pub use store::{CharacterStore, MemoryStore, with_character};
