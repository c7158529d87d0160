//! Serde model of the Dhole's House character export.
//!
//! Field names follow the third-party format exactly. Numeric fields are kept
//! as raw JSON values because the format writes numbers as strings and some
//! exports leave them empty; they are validated when converted to a
//! [`Character`](crate::sheet::Character). Unknown fields are ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The whole document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// The single investigator in the document.
    #[serde(rename = "Investigator", default)]
    pub investigator: Option<Investigator>,
}

/// An investigator record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Investigator {
    /// Exporter metadata.
    #[serde(rename = "Header", default, skip_serializing_if = "Option::is_none")]
    pub header: Option<Header>,
    /// Name and occupation.
    #[serde(rename = "PersonalDetails", default)]
    pub personal_details: PersonalDetails,
    /// Characteristics and resources.
    #[serde(rename = "Characteristics", default)]
    pub characteristics: Characteristics,
    /// Skill lists.
    #[serde(rename = "Skills", default)]
    pub skills: Skills,
}

/// Exporter metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Header {
    /// Document title.
    #[serde(default)]
    pub title: String,
    /// Program that wrote the document.
    #[serde(default)]
    pub creator: String,
    /// Game line.
    #[serde(default)]
    pub game_name: String,
    /// Game edition.
    #[serde(default)]
    pub game_version: String,
    /// Exporter version.
    #[serde(default)]
    pub version: String,
}

/// Name and occupation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PersonalDetails {
    /// Investigator name.
    #[serde(default)]
    pub name: Option<String>,
    /// Occupation.
    #[serde(default)]
    pub occupation: Option<String>,
}

/// Characteristics and current/maximum resources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct Characteristics {
    #[serde(rename = "STR", default)]
    pub strength: Option<Value>,
    #[serde(rename = "CON", default)]
    pub constitution: Option<Value>,
    #[serde(rename = "DEX", default)]
    pub dexterity: Option<Value>,
    #[serde(rename = "SIZ", default)]
    pub size: Option<Value>,
    #[serde(rename = "POW", default)]
    pub power: Option<Value>,
    #[serde(rename = "APP", default)]
    pub appearance: Option<Value>,
    #[serde(rename = "INT", default)]
    pub intelligence: Option<Value>,
    #[serde(rename = "EDU", default)]
    pub education: Option<Value>,
    #[serde(rename = "HitPts", default, skip_serializing_if = "Option::is_none")]
    pub hit_pts: Option<Value>,
    #[serde(rename = "HitPtsMax", default, skip_serializing_if = "Option::is_none")]
    pub hit_pts_max: Option<Value>,
    #[serde(rename = "MagicPts", default, skip_serializing_if = "Option::is_none")]
    pub magic_pts: Option<Value>,
    #[serde(rename = "MagicPtsMax", default, skip_serializing_if = "Option::is_none")]
    pub magic_pts_max: Option<Value>,
    #[serde(rename = "Luck", default, skip_serializing_if = "Option::is_none")]
    pub luck: Option<Value>,
    #[serde(rename = "Sanity", default, skip_serializing_if = "Option::is_none")]
    pub sanity: Option<Value>,
    #[serde(rename = "SanityMax", default, skip_serializing_if = "Option::is_none")]
    pub sanity_max: Option<Value>,
}

impl Characteristics {
    /// The eight characteristic fields in sheet order, with their keys.
    pub fn core(&self) -> [(&'static str, Option<&Value>); 8] {
        [
            ("STR", self.strength.as_ref()),
            ("CON", self.constitution.as_ref()),
            ("DEX", self.dexterity.as_ref()),
            ("SIZ", self.size.as_ref()),
            ("POW", self.power.as_ref()),
            ("APP", self.appearance.as_ref()),
            ("INT", self.intelligence.as_ref()),
            ("EDU", self.education.as_ref()),
        ]
    }
}

/// Standard and custom skill lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skills {
    /// Skills from the standard sheet, including specializations.
    #[serde(rename = "Skill", default)]
    pub skill: Vec<SkillEntry>,
    /// Custom skills.
    #[serde(rename = "Misc", default, skip_serializing_if = "Vec::is_empty")]
    pub misc: Vec<MiscEntry>,
}

/// A standard skill. Specializations carry the family in `name` and the
/// specialty in `subskill`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillEntry {
    /// Skill or family name.
    #[serde(default)]
    pub name: String,
    /// Specialty; the format writes `"None"` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subskill: Option<String>,
    /// Full value.
    #[serde(default)]
    pub value: Option<Value>,
    /// Half value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub half: Option<Value>,
    /// Fifth value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fifth: Option<Value>,
}

impl SkillEntry {
    /// The specialty, ignoring blanks and the `"None"` placeholder.
    pub fn specialty(&self) -> Option<&str> {
        self.subskill
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty() && *s != "None")
    }
}

/// A custom skill.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MiscEntry {
    /// Skill name.
    #[serde(default)]
    pub name: String,
    /// Value.
    #[serde(default)]
    pub value: Option<Value>,
}
