//! Investigator sheets: characteristics, skills, resources, and history.
//!
//! A [`Character`] is the one mutable aggregate in the engine. Derived maxima
//! (HP, MP, Sanity) are recomputed whenever their sources change, and every
//! mutation records a pending change line for the next history entry.

pub mod history;
pub mod track;

pub use history::HistoryEntry;
pub use track::Track;

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dice::{DiceExpr, DiceSource, ExprRoll};
use crate::error::{MechError, MechResult};
use crate::skills::{self, CTHULHU_MYTHOS, DODGE, LANGUAGE_OWN, ResolvedSkill};

/// One of the eight investigator characteristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Characteristic {
    /// Strength.
    #[serde(rename = "STR")]
    Str,
    /// Constitution.
    #[serde(rename = "CON")]
    Con,
    /// Dexterity.
    #[serde(rename = "DEX")]
    Dex,
    /// Size.
    #[serde(rename = "SIZ")]
    Siz,
    /// Power.
    #[serde(rename = "POW")]
    Pow,
    /// Appearance.
    #[serde(rename = "APP")]
    App,
    /// Intelligence.
    #[serde(rename = "INT")]
    Int,
    /// Education.
    #[serde(rename = "EDU")]
    Edu,
}

impl Characteristic {
    /// All characteristics in sheet order.
    pub const ALL: [Self; 8] = [
        Self::Str,
        Self::Con,
        Self::Dex,
        Self::Siz,
        Self::Pow,
        Self::App,
        Self::Int,
        Self::Edu,
    ];

    /// The three-letter abbreviation used on sheets.
    pub fn abbreviation(self) -> &'static str {
        match self {
            Self::Str => "STR",
            Self::Con => "CON",
            Self::Dex => "DEX",
            Self::Siz => "SIZ",
            Self::Pow => "POW",
            Self::App => "APP",
            Self::Int => "INT",
            Self::Edu => "EDU",
        }
    }
}

impl FromStr for Characteristic {
    type Err = MechError;

    fn from_str(s: &str) -> MechResult<Self> {
        let upper = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|c| c.abbreviation() == upper)
            .ok_or_else(|| MechError::InvalidRequest(format!("unknown characteristic: {s}")))
    }
}

impl std::fmt::Display for Characteristic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

/// Maximum HP: (CON + SIZ) / 10, rounded half up, at least 1.
pub fn hp_max(con: u32, siz: u32) -> u32 {
    ((con + siz + 5) / 10).max(1)
}

/// Maximum MP: POW / 5, rounded half up.
pub fn mp_max(pow: u32) -> u32 {
    (pow * 2 + 5) / 10
}

/// Maximum Sanity: 99 minus Cthulhu Mythos, never below 0.
pub fn sanity_max(mythos: u32) -> u32 {
    99u32.saturating_sub(mythos)
}

/// HP at or below which a single loss counts as a major wound.
pub fn major_wound_threshold(con: u32) -> u32 {
    con / 2
}

/// A skill entry on the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Skill {
    /// Current value, 0-99.
    pub value: u32,
    /// Flagged for the next advancement roll.
    #[serde(default)]
    pub checked: bool,
}

/// Luck, with the value it started the campaign at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Luck {
    /// Current luck.
    pub current: u32,
    /// Luck at creation or import. Only [`Character::set_starting_luck`]
    /// and import write it.
    pub starting: u32,
}

/// Resource pools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resources {
    /// Hit points.
    pub hp: Track,
    /// Magic points.
    pub mp: Track,
    /// Sanity.
    pub sanity: Track,
    /// Luck.
    pub luck: Luck,
    /// Unspent experience.
    pub xp: u32,
}

/// A resource that can be viewed or adjusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Hit points.
    Hp,
    /// Magic points.
    Mp,
    /// Sanity.
    Sanity,
    /// Luck.
    Luck,
    /// Experience.
    Xp,
}

impl FromStr for ResourceKind {
    type Err = MechError;

    fn from_str(s: &str) -> MechResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "hp" => Ok(Self::Hp),
            "mp" => Ok(Self::Mp),
            "san" | "sanity" => Ok(Self::Sanity),
            "luck" => Ok(Self::Luck),
            "xp" => Ok(Self::Xp),
            other => Err(MechError::InvalidRequest(format!(
                "unknown resource '{other}': use hp, mp, san, luck, or xp"
            ))),
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hp => write!(f, "hp"),
            Self::Mp => write!(f, "mp"),
            Self::Sanity => write!(f, "san"),
            Self::Luck => write!(f, "luck"),
            Self::Xp => write!(f, "xp"),
        }
    }
}

/// How to change a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceUpdate {
    /// Add (or subtract) from the current value.
    Delta(i32),
    /// Replace the current value.
    Set(u32),
    /// Restore to the maximum.
    Max,
    /// Roll dice and add the total, or subtract it when `negative`.
    Roll {
        /// Subtract the rolled total instead of adding it.
        negative: bool,
        /// The dice to roll.
        expr: DiceExpr,
    },
}

impl FromStr for ResourceUpdate {
    type Err = MechError;

    /// Accepts `max`, `+N`/`-N`, a bare `N`, or dice such as `-1d6`, `+1d3`
    /// or `1d4+1` (unsigned dice are a gain).
    fn from_str(s: &str) -> MechResult<Self> {
        let s = s.trim();
        let invalid = || MechError::InvalidRequest(format!("invalid value: {s}"));
        if s.eq_ignore_ascii_case("max") {
            return Ok(Self::Max);
        }
        let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
        if unsigned.to_ascii_lowercase().contains('d') {
            let expr = DiceExpr::parse(unsigned).map_err(|_| invalid())?;
            return Ok(Self::Roll {
                negative: s.starts_with('-'),
                expr,
            });
        }
        if unsigned.len() < s.len() {
            s.parse().map(Self::Delta).map_err(|_| invalid())
        } else {
            s.parse().map(Self::Set).map_err(|_| invalid())
        }
    }
}

/// A [`ResourceUpdate`] with any dice already rolled.
#[derive(Debug, Clone, Copy)]
enum Adjustment {
    Delta(i32),
    Set(u32),
    Max,
}

/// The effect of a resource update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceChange {
    /// Which resource changed.
    pub resource: ResourceKind,
    /// Value before.
    pub old: u32,
    /// Value after.
    pub new: u32,
    /// The maximum, for bounded resources.
    pub max: Option<u32>,
    /// HP fell from above the major-wound threshold to at or below it.
    /// The `major_wound` flag itself is left to the caller.
    pub major_wound_threshold_crossed: bool,
    /// HP reached zero.
    pub unconscious: bool,
    /// The dice rolled for a [`ResourceUpdate::Roll`].
    pub roll: Option<ExprRoll>,
}

/// The effect of setting a skill value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillChange {
    /// Canonical skill name.
    pub name: String,
    /// Previous value, if the skill was already on the sheet.
    pub old: Option<u32>,
    /// New value.
    pub new: u32,
    /// True if the skill is not on the standard list.
    pub custom: bool,
}

/// An investigator's full mechanical record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Investigator name.
    pub name: String,
    /// Occupation, possibly empty.
    pub occupation: String,
    characteristics: BTreeMap<Characteristic, u32>,
    skills: BTreeMap<String, Skill>,
    resources: Resources,
    #[serde(default)]
    major_wound: bool,
    #[serde(default)]
    history: Vec<HistoryEntry>,
    #[serde(default)]
    pending: Vec<String>,
    version: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Character {
    /// Create an empty investigator: characteristics at 0, no skills.
    pub fn new(name: impl Into<String>, occupation: impl Into<String>) -> Self {
        let now = Utc::now();
        let mut character = Self {
            name: name.into(),
            occupation: occupation.into(),
            characteristics: Characteristic::ALL.into_iter().map(|c| (c, 0)).collect(),
            skills: BTreeMap::new(),
            resources: Resources {
                hp: Track::with_current(0, 0),
                mp: Track::with_current(0, 0),
                sanity: Track::with_current(0, 0),
                luck: Luck::default(),
                xp: 0,
            },
            major_wound: false,
            history: Vec::new(),
            pending: Vec::new(),
            version: 1,
            created_at: now,
            updated_at: now,
        };
        character.recompute_derived();
        character
    }

    /// Build a character from already-validated characteristics, with no
    /// pending changes. Resources start empty.
    pub(crate) fn from_characteristics(
        name: impl Into<String>,
        occupation: impl Into<String>,
        values: [u32; 8],
    ) -> Self {
        let mut character = Self::new(name, occupation);
        for (c, v) in Characteristic::ALL.into_iter().zip(values) {
            character.characteristics.insert(c, v);
        }
        character.recompute_derived();
        character
    }

    // ---------------------------------------------------------------------
    // Characteristics
    // ---------------------------------------------------------------------

    /// Current value of a characteristic.
    pub fn characteristic(&self, c: Characteristic) -> u32 {
        self.characteristics.get(&c).copied().unwrap_or(0)
    }

    /// All characteristics in sheet order.
    pub fn characteristics(&self) -> impl Iterator<Item = (Characteristic, u32)> + '_ {
        Characteristic::ALL
            .into_iter()
            .map(|c| (c, self.characteristic(c)))
    }

    /// Set one characteristic, clamped to 1-99. Returns `(old, new)`.
    pub fn set_characteristic(&mut self, c: Characteristic, value: u32) -> (u32, u32) {
        let old = self.characteristic(c);
        let new = value.clamp(1, 99);
        self.characteristics.insert(c, new);
        self.recompute_derived();
        self.record(format!("{c}: {old}→{new}"));
        (old, new)
    }

    /// Set all eight characteristics at once (sheet order), then fill HP and
    /// MP to their maxima and start Sanity at POW.
    pub fn set_characteristics(&mut self, values: [u32; 8]) -> MechResult<()> {
        if let Some((c, v)) = Characteristic::ALL
            .into_iter()
            .zip(values)
            .find(|(_, v)| !(1..=99).contains(v))
        {
            return Err(MechError::InvalidRequest(format!(
                "{c} must be between 1 and 99, got {v}"
            )));
        }
        for (c, v) in Characteristic::ALL.into_iter().zip(values) {
            self.characteristics.insert(c, v);
        }
        self.recompute_derived();
        self.resources.hp.fill();
        self.resources.mp.fill();
        let pow = self.characteristic(Characteristic::Pow);
        self.resources.sanity.set(pow);

        let line = Characteristic::ALL
            .into_iter()
            .zip(values)
            .map(|(c, v)| format!("{c} {v}"))
            .collect::<Vec<_>>()
            .join(", ");
        self.record(format!("characteristics: {line}"));
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Skills
    // ---------------------------------------------------------------------

    /// All skills on the sheet, ordered by name.
    pub fn skills(&self) -> &BTreeMap<String, Skill> {
        &self.skills
    }

    /// Resolve a skill name against this sheet and the standard list.
    pub fn resolve_skill(&self, name: &str) -> ResolvedSkill {
        skills::resolve_skill(name, self.skills.keys().map(String::as_str))
    }

    /// Look up a skill by any accepted spelling.
    pub fn skill(&self, name: &str) -> Option<(&str, &Skill)> {
        let resolved = self.resolve_skill(name);
        self.skills
            .get_key_value(&resolved.name)
            .map(|(k, v)| (k.as_str(), v))
    }

    /// Untrained base value for a canonical skill name.
    pub fn base_value(&self, canonical: &str) -> u32 {
        match canonical {
            DODGE => self.characteristic(Characteristic::Dex) / 2,
            LANGUAGE_OWN => self.characteristic(Characteristic::Edu),
            other => skills::standard_base(other),
        }
    }

    /// Current Cthulhu Mythos value.
    pub fn mythos(&self) -> u32 {
        self.skills.get(CTHULHU_MYTHOS).map(|s| s.value).unwrap_or(0)
    }

    /// Set a skill value, clamped to 0-99, creating the skill if needed.
    pub fn set_skill(&mut self, name: &str, value: u32) -> SkillChange {
        let resolved = self.resolve_skill(name);
        let value = value.min(99);
        let old = self.skills.get(&resolved.name).map(|s| s.value);
        self.skills.entry(resolved.name.clone()).or_default().value = value;
        if resolved.name == CTHULHU_MYTHOS {
            self.recompute_derived();
        }
        match old {
            Some(old) => self.record(format!("{}: {old}→{value}", resolved.name)),
            None => self.record(format!("{}: added at {value}", resolved.name)),
        }
        SkillChange {
            custom: !skills::is_standard(&resolved.name),
            name: resolved.name,
            old,
            new: value,
        }
    }

    /// Resolve a name and make sure the skill is on the sheet, adding it at
    /// its base value if absent. Returns the canonical name.
    pub(crate) fn ensure_skill(&mut self, name: &str) -> String {
        let resolved = self.resolve_skill(name);
        if !self.skills.contains_key(&resolved.name) {
            let base = self.base_value(&resolved.name);
            self.skills.insert(
                resolved.name.clone(),
                Skill {
                    value: base,
                    checked: false,
                },
            );
        }
        resolved.name
    }

    pub(crate) fn skill_mut(&mut self, canonical: &str) -> Option<&mut Skill> {
        self.skills.get_mut(canonical)
    }

    /// Write the value of a skill already on the sheet, clamped to 0-99,
    /// recomputing derived maxima when it is Cthulhu Mythos. Returns the old
    /// value, or `None` if the skill is absent.
    pub(crate) fn set_skill_value(&mut self, canonical: &str, value: u32) -> Option<u32> {
        let skill = self.skills.get_mut(canonical)?;
        let old = std::mem::replace(&mut skill.value, value.min(99));
        if canonical == CTHULHU_MYTHOS {
            self.recompute_derived();
        }
        Some(old)
    }

    pub(crate) fn insert_skill(&mut self, canonical: String, skill: Skill) {
        self.skills.insert(canonical, skill);
    }

    // ---------------------------------------------------------------------
    // Resources
    // ---------------------------------------------------------------------

    /// Resource pools.
    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    pub(crate) fn resources_mut(&mut self) -> &mut Resources {
        &mut self.resources
    }

    /// Recompute HP, MP, and Sanity maxima and re-clamp current values.
    pub fn recompute_derived(&mut self) {
        let con = self.characteristic(Characteristic::Con);
        let siz = self.characteristic(Characteristic::Siz);
        let pow = self.characteristic(Characteristic::Pow);
        let mythos = self.mythos();
        self.resources.hp.set_max(hp_max(con, siz));
        self.resources.mp.set_max(mp_max(pow));
        self.resources.sanity.set_max(sanity_max(mythos));
    }

    /// Luck at the start of play: sets both current and starting Luck.
    pub fn set_starting_luck(&mut self, value: u32) {
        self.resources.luck = Luck {
            current: value,
            starting: value,
        };
        self.record(format!("luck: starting {value}"));
    }

    /// Apply an update to a resource. Dice in a [`ResourceUpdate::Roll`] are
    /// drawn from `source`; other updates draw nothing.
    pub fn update_resource(
        &mut self,
        kind: ResourceKind,
        update: ResourceUpdate,
        source: &mut impl DiceSource,
    ) -> MechResult<ResourceChange> {
        if matches!(update, ResourceUpdate::Max)
            && matches!(kind, ResourceKind::Luck | ResourceKind::Xp)
        {
            return Err(MechError::InvalidRequest(format!("{kind} has no maximum")));
        }
        let (adjustment, roll) = match update {
            ResourceUpdate::Delta(d) => (Adjustment::Delta(d), None),
            ResourceUpdate::Set(v) => (Adjustment::Set(v), None),
            ResourceUpdate::Max => (Adjustment::Max, None),
            ResourceUpdate::Roll { negative, expr } => {
                let roll = expr.roll(source);
                let total = i32::try_from(roll.total()).unwrap_or(i32::MAX);
                let delta = if negative { -total } else { total };
                (Adjustment::Delta(delta), Some(roll))
            }
        };

        let (old, new, max) = match kind {
            ResourceKind::Hp | ResourceKind::Mp | ResourceKind::Sanity => {
                let track = match kind {
                    ResourceKind::Hp => &mut self.resources.hp,
                    ResourceKind::Mp => &mut self.resources.mp,
                    _ => &mut self.resources.sanity,
                };
                let old = track.current;
                let new = match adjustment {
                    Adjustment::Delta(d) => track.adjust(d),
                    Adjustment::Set(v) => track.set(v),
                    Adjustment::Max => track.fill(),
                };
                (old, new, Some(track.max))
            }
            ResourceKind::Luck => {
                let luck = &mut self.resources.luck;
                let old = luck.current;
                luck.current = apply_unbounded(old, adjustment);
                (old, luck.current, None)
            }
            ResourceKind::Xp => {
                let old = self.resources.xp;
                self.resources.xp = apply_unbounded(old, adjustment);
                (old, self.resources.xp, None)
            }
        };

        let (crossed, unconscious) = if kind == ResourceKind::Hp {
            let threshold = major_wound_threshold(self.characteristic(Characteristic::Con));
            (old > threshold && new <= threshold, new == 0 && old > 0)
        } else {
            (false, false)
        };

        let line = match (&roll, adjustment) {
            (Some(r), Adjustment::Delta(d)) => {
                format!("{kind}: {old}→{new} ({d:+}, rolled {})", r.expr)
            }
            (None, Adjustment::Delta(d)) => format!("{kind}: {old}→{new} ({d:+})"),
            _ => format!("{kind}: {old}→{new}"),
        };
        self.record(line);

        Ok(ResourceChange {
            resource: kind,
            old,
            new,
            max,
            major_wound_threshold_crossed: crossed,
            unconscious,
            roll,
        })
    }

    // ---------------------------------------------------------------------
    // Conditions
    // ---------------------------------------------------------------------

    /// True while a major wound ruling is in effect.
    pub fn major_wound(&self) -> bool {
        self.major_wound
    }

    /// Apply or clear the major wound ruling. Returns the previous state.
    pub fn set_major_wound(&mut self, wounded: bool) -> bool {
        let old = self.major_wound;
        self.major_wound = wounded;
        if old != wounded {
            self.record(format!(
                "major wound: {}",
                if wounded { "on" } else { "off" }
            ));
        }
        old
    }

    // ---------------------------------------------------------------------
    // History
    // ---------------------------------------------------------------------

    /// Record a change line for the next history entry.
    pub fn record(&mut self, change: impl Into<String>) {
        self.pending.push(change.into());
        self.updated_at = Utc::now();
    }

    /// Change lines not yet committed.
    pub fn pending(&self) -> &[String] {
        &self.pending
    }

    /// Committed history, oldest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Sheet version; bumped by every committed history entry.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// When the character was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the character was last changed.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Commit pending changes as a new history entry.
    ///
    /// An empty note becomes "Session N". Fails if nothing is pending.
    pub fn save_session(&mut self, note: &str) -> MechResult<&HistoryEntry> {
        if self.pending.is_empty() {
            return Err(MechError::InvalidRequest(
                "no pending changes to save".to_string(),
            ));
        }
        self.version += 1;
        let note = match note.trim() {
            "" => format!("Session {}", self.version),
            n => n.to_string(),
        };
        let now = Utc::now();
        self.history.push(HistoryEntry {
            version: self.version,
            timestamp: now,
            note,
            changes: std::mem::take(&mut self.pending),
        });
        self.updated_at = now;
        Ok(&self.history[self.history.len() - 1])
    }
}

/// Apply an adjustment to a resource with no maximum, floored at 0.
fn apply_unbounded(old: u32, adjustment: Adjustment) -> u32 {
    match adjustment {
        Adjustment::Delta(d) => {
            (i64::from(old) + i64::from(d)).clamp(0, i64::from(u32::MAX)) as u32
        }
        Adjustment::Set(v) => v,
        Adjustment::Max => old,
    }
}
