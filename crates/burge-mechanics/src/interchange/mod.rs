//! Import and export of Dhole's House character sheets.
//!
//! Import validates the whole document before a [`Character`] exists, so a
//! malformed sheet never yields a partial character. Export writes standard
//! skills to `Skills.Skill` and custom skills to `Skills.Misc`.

pub mod schema;

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{MechError, MechResult};
use crate::sheet::{Character, Characteristic, Skill};
use crate::skills;

pub use schema::{Characteristics, Document, Header, Investigator, MiscEntry, PersonalDetails, SkillEntry, Skills};

/// Name written for investigators without one.
pub const UNKNOWN_NAME: &str = "Unknown Investigator";

/// Read a numeric field. Accepts JSON numbers and numeric strings; an empty
/// string reads as 0 and a fractional number is truncated.
fn number(field: &str, value: &Value) -> MechResult<u32> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && *f >= 0.0)
                    .map(|f| f.trunc() as u64)
            })
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| {
                MechError::schema(field, format!("expected a non-negative number, got {n}"))
            }),
        Value::String(s) if s.trim().is_empty() => Ok(0),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| MechError::schema(field, format!("expected a number, got '{s}'"))),
        other => Err(MechError::schema(
            field,
            format!("expected a number, got {other}"),
        )),
    }
}

fn optional_number(field: &str, value: Option<&Value>) -> MechResult<Option<u32>> {
    value.map(|v| number(field, v)).transpose()
}

fn skill_value(field: &str, value: Option<&Value>) -> MechResult<u32> {
    let v = optional_number(field, value)?.unwrap_or(0);
    if v > 99 {
        return Err(MechError::schema(
            field,
            format!("skill value must be between 0 and 99, got {v}"),
        ));
    }
    Ok(v)
}

/// Parse and import a Dhole's House JSON export.
pub fn import_json(text: &str) -> MechResult<Character> {
    let document: Document =
        serde_json::from_str(text).map_err(|e| MechError::schema("$", e.to_string()))?;
    import_document(&document)
}

/// Convert a parsed document into a character.
pub fn import_document(document: &Document) -> MechResult<Character> {
    let inv = document
        .investigator
        .as_ref()
        .ok_or_else(|| MechError::schema("Investigator", "missing"))?;
    let chars = &inv.characteristics;

    let mut values = [0u32; 8];
    for (slot, (key, raw)) in values.iter_mut().zip(chars.core()) {
        let field = format!("Investigator.Characteristics.{key}");
        let raw = raw.ok_or_else(|| MechError::schema(&field, "missing"))?;
        let v = number(&field, raw)?;
        if !(1..=99).contains(&v) {
            return Err(MechError::schema(
                &field,
                format!("must be between 1 and 99, got {v}"),
            ));
        }
        *slot = v;
    }

    let field = |name: &str| format!("Investigator.Characteristics.{name}");
    let hp = optional_number(&field("HitPts"), chars.hit_pts.as_ref())?;
    let mp = optional_number(&field("MagicPts"), chars.magic_pts.as_ref())?;
    let sanity = optional_number(&field("Sanity"), chars.sanity.as_ref())?;
    let luck = optional_number(&field("Luck"), chars.luck.as_ref())?;
    // Maxima are derived, but a non-numeric value is still a malformed sheet.
    optional_number(&field("HitPtsMax"), chars.hit_pts_max.as_ref())?;
    optional_number(&field("MagicPtsMax"), chars.magic_pts_max.as_ref())?;
    optional_number(&field("SanityMax"), chars.sanity_max.as_ref())?;

    // (canonical name, source name, value), validated before anything is built.
    let mut entries: Vec<(String, String, u32)> = Vec::new();
    for (i, entry) in inv.skills.skill.iter().enumerate() {
        let name = entry.name.trim();
        if name.is_empty() {
            continue;
        }
        let source = match (name, entry.specialty()) {
            ("Misc", Some(sub)) => sub.to_string(),
            ("Misc", None) => continue,
            (name, Some(sub)) => format!("{name} ({sub})"),
            (name, None) => name.to_string(),
        };
        let v = skill_value(
            &format!("Investigator.Skills.Skill[{i}].value"),
            entry.value.as_ref(),
        )?;
        entries.push((String::new(), source, v));
    }
    for (i, entry) in inv.skills.misc.iter().enumerate() {
        let name = entry.name.trim();
        if name.is_empty() {
            continue;
        }
        let v = skill_value(
            &format!("Investigator.Skills.Misc[{i}].value"),
            entry.value.as_ref(),
        )?;
        entries.push((String::new(), name.to_string(), v));
    }

    let mut seen: BTreeMap<String, String> = BTreeMap::new();
    for (canonical, source, _) in entries.iter_mut() {
        let resolved = skills::resolve_skill(source, seen.keys().map(String::as_str));
        if let Some(first) = seen.get(&resolved.name) {
            return Err(MechError::DuplicateSkill {
                name: resolved.name,
                first: first.clone(),
                second: source.clone(),
            });
        }
        seen.insert(resolved.name.clone(), source.clone());
        *canonical = resolved.name;
    }

    let details = &inv.personal_details;
    let name = details
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(UNKNOWN_NAME);
    let occupation = details.occupation.as_deref().unwrap_or("").trim();

    let mut character = Character::from_characteristics(name, occupation, values);
    let count = entries.len();
    for (canonical, _, value) in entries {
        character.insert_skill(
            canonical,
            Skill {
                value,
                checked: false,
            },
        );
    }
    character.recompute_derived();

    let pow = character.characteristic(Characteristic::Pow);
    let resources = character.resources_mut();
    match hp {
        Some(v) => resources.hp.set(v),
        None => resources.hp.fill(),
    };
    match mp {
        Some(v) => resources.mp.set(v),
        None => resources.mp.fill(),
    };
    resources.sanity.set(sanity.unwrap_or(pow));
    let luck = luck.unwrap_or(0);
    resources.luck.current = luck;
    resources.luck.starting = luck;

    character.record(format!("imported from Dhole's House ({count} skills)"));
    Ok(character)
}

fn text(v: u32) -> Option<Value> {
    Some(Value::String(v.to_string()))
}

/// Split `Family (Specialty)` into its parts.
fn split_specialty(name: &str) -> (&str, Option<&str>) {
    match (name.find('('), name.rfind(')')) {
        (Some(open), Some(close)) if open < close => (
            name[..open].trim(),
            Some(name[open + 1..close].trim()).filter(|s| !s.is_empty()),
        ),
        _ => (name, None),
    }
}

/// Build the interchange document for a character.
pub fn export_document(character: &Character) -> Document {
    let r = character.resources();
    let c = |ch: Characteristic| text(character.characteristic(ch));

    let mut lists = Skills::default();
    for (name, skill) in character.skills() {
        if skills::is_standard(name) {
            let (base, sub) = split_specialty(name);
            lists.skill.push(SkillEntry {
                name: base.to_string(),
                subskill: sub.map(str::to_string),
                value: text(skill.value),
                half: text(skill.value / 2),
                fifth: text(skill.value / 5),
            });
        } else {
            lists.misc.push(MiscEntry {
                name: name.clone(),
                value: text(skill.value),
            });
        }
    }

    Document {
        investigator: Some(Investigator {
            header: Some(Header {
                title: "Investigator Export: Character Sheet".to_string(),
                creator: "burge".to_string(),
                game_name: "Call of Cthulhu TM".to_string(),
                game_version: "7th Edition".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            }),
            personal_details: PersonalDetails {
                name: Some(character.name.clone()),
                occupation: Some(character.occupation.clone()),
            },
            characteristics: Characteristics {
                strength: c(Characteristic::Str),
                constitution: c(Characteristic::Con),
                dexterity: c(Characteristic::Dex),
                size: c(Characteristic::Siz),
                power: c(Characteristic::Pow),
                appearance: c(Characteristic::App),
                intelligence: c(Characteristic::Int),
                education: c(Characteristic::Edu),
                hit_pts: text(r.hp.current),
                hit_pts_max: text(r.hp.max),
                magic_pts: text(r.mp.current),
                magic_pts_max: text(r.mp.max),
                luck: text(r.luck.current),
                sanity: text(r.sanity.current),
                sanity_max: text(r.sanity.max),
            },
            skills: lists,
        }),
    }
}

/// Export a character as pretty-printed Dhole's House JSON.
pub fn export_json(character: &Character) -> MechResult<String> {
    serde_json::to_string_pretty(&export_document(character))
        .map_err(|e| MechError::InvalidRequest(format!("could not serialize sheet: {e}")))
}
