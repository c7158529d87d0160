//! Standard skill list, aliases, and skill-name resolution.
//!
//! Skill names typed by players (or found in imported sheets) go through a
//! fixed pipeline: exact canonical match, alias lookup, case-insensitive
//! match, and finally a new custom skill named verbatim.

use serde::{Deserialize, Serialize};

/// The skill whose value lowers maximum sanity.
pub const CTHULHU_MYTHOS: &str = "Cthulhu Mythos";
/// Base value is half DEX.
pub const DODGE: &str = "Dodge";
/// Base value is EDU.
pub const LANGUAGE_OWN: &str = "Language (Own)";

/// A skill from the standard investigator sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardSkill {
    /// Canonical display name.
    pub name: &'static str,
    /// Base value for an untrained investigator.
    pub base: u32,
}

const fn std_skill(name: &'static str, base: u32) -> StandardSkill {
    StandardSkill { name, base }
}

/// Standard skills and their untrained base values.
///
/// Dodge and Language (Own) are listed at 0; their real bases come from
/// DEX and EDU.
pub const STANDARD_SKILLS: &[StandardSkill] = &[
    // Combat
    std_skill("Dodge", 0),
    std_skill("Fighting (Brawl)", 25),
    std_skill("Firearms (Handgun)", 20),
    std_skill("Firearms (Rifle/Shotgun)", 25),
    std_skill("Throw", 20),
    // Investigation
    std_skill("Library Use", 20),
    std_skill("Listen", 20),
    std_skill("Spot Hidden", 25),
    std_skill("Track", 10),
    // Social
    std_skill("Charm", 15),
    std_skill("Fast Talk", 5),
    std_skill("Intimidate", 15),
    std_skill("Persuade", 10),
    std_skill("Psychology", 10),
    // Technical
    std_skill("Art/Craft (Any)", 5),
    std_skill("Electrical Repair", 10),
    std_skill("First Aid", 30),
    std_skill("Locksmith", 1),
    std_skill("Mechanical Repair", 10),
    std_skill("Medicine", 1),
    std_skill("Operate Heavy Machinery", 1),
    // Knowledge
    std_skill("Accounting", 5),
    std_skill("Anthropology", 1),
    std_skill("Appraise", 5),
    std_skill("Archaeology", 1),
    std_skill("Cthulhu Mythos", 0),
    std_skill("History", 5),
    std_skill("Law", 5),
    std_skill("Natural World", 10),
    std_skill("Occult", 5),
    std_skill("Science (Any)", 1),
    // Languages
    std_skill("Language (Own)", 0),
    std_skill("Language (Other)", 1),
    // Physical
    std_skill("Climb", 20),
    std_skill("Drive Auto", 20),
    std_skill("Jump", 20),
    std_skill("Pilot (Any)", 1),
    std_skill("Ride", 5),
    std_skill("Stealth", 20),
    std_skill("Swim", 20),
    // Other
    std_skill("Credit Rating", 0),
    std_skill("Disguise", 5),
    std_skill("Navigate", 10),
    std_skill("Sleight of Hand", 10),
    std_skill("Survival (Any)", 10),
];

/// Shorthand names players use, keyed in lowercase.
pub const SKILL_ALIASES: &[(&str, &str)] = &[
    ("brawl", "Fighting (Brawl)"),
    ("fight", "Fighting (Brawl)"),
    ("handgun", "Firearms (Handgun)"),
    ("pistol", "Firearms (Handgun)"),
    ("rifle", "Firearms (Rifle/Shotgun)"),
    ("shotgun", "Firearms (Rifle/Shotgun)"),
    ("spot", "Spot Hidden"),
    ("library", "Library Use"),
    ("lib use", "Library Use"),
    ("firstaid", "First Aid"),
    ("first-aid", "First Aid"),
    ("mythos", "Cthulhu Mythos"),
    ("elec repair", "Electrical Repair"),
    ("mech repair", "Mechanical Repair"),
    ("heavy machinery", "Operate Heavy Machinery"),
    ("own language", "Language (Own)"),
    ("native language", "Language (Own)"),
    ("sleight", "Sleight of Hand"),
    ("cr", "Credit Rating"),
];

/// Which stage of the pipeline produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillMatch {
    /// The input was already a canonical name.
    Exact,
    /// The input was a known alias.
    Alias,
    /// The input matched a canonical name ignoring case.
    CaseInsensitive,
    /// Nothing matched; the input names a new custom skill.
    Custom,
}

/// The outcome of resolving a skill name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSkill {
    /// Canonical name to store and display.
    pub name: String,
    /// How the name was found.
    pub matched: SkillMatch,
}

/// Look up an exact standard skill.
pub fn standard_skill(name: &str) -> Option<&'static StandardSkill> {
    STANDARD_SKILLS.iter().find(|s| s.name == name)
}

/// Look up an alias (case-insensitive).
pub fn alias_target(name: &str) -> Option<&'static str> {
    let key = name.trim().to_lowercase();
    SKILL_ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, target)| *target)
}

/// The part of a name before a parenthesised specialization.
fn family(name: &str) -> &str {
    name.split('(').next().unwrap_or(name).trim()
}

/// The standard entry covering a skill, directly or through its family.
///
/// `Science (Chemistry)` is covered by `Science (Any)`, `Language (French)`
/// by `Language (Other)`.
fn covering_standard(name: &str) -> Option<&'static StandardSkill> {
    if let Some(skill) = standard_skill(name) {
        return Some(skill);
    }
    if !name.contains('(') {
        return None;
    }
    let fam = family(name);
    let members: Vec<&'static StandardSkill> = STANDARD_SKILLS
        .iter()
        .filter(|s| family(s.name) == fam)
        .collect();
    members
        .iter()
        .find(|s| s.name.ends_with("(Any)"))
        .or_else(|| members.iter().find(|s| s.name.ends_with("(Other)")))
        .or_else(|| members.first())
        .copied()
}

/// True if the skill is on the standard sheet, including specializations
/// of a standard family such as `Science (Biology)`.
pub fn is_standard(name: &str) -> bool {
    covering_standard(name).is_some()
}

/// Untrained base value from the standard table; 0 for custom skills.
///
/// Characteristic-derived bases (Dodge, Language (Own)) are applied by the
/// character sheet.
pub fn standard_base(name: &str) -> u32 {
    covering_standard(name).map(|s| s.base).unwrap_or(0)
}

/// Resolve a skill name against a character's existing skills and the
/// standard list.
///
/// Stages, first match wins: (a) exact canonical name, (b) alias table,
/// (c) case-insensitive name, (d) new custom skill named verbatim.
pub fn resolve_skill<'a, I>(input: &str, existing: I) -> ResolvedSkill
where
    I: IntoIterator<Item = &'a str>,
{
    let input = input.trim();
    let existing: Vec<&str> = existing.into_iter().collect();
    let known = || {
        existing
            .iter()
            .copied()
            .chain(STANDARD_SKILLS.iter().map(|s| s.name))
    };
    let case_insensitive = |name: &str| known().find(|k| k.eq_ignore_ascii_case(name));

    if known().any(|k| k == input) {
        return ResolvedSkill {
            name: input.to_string(),
            matched: SkillMatch::Exact,
        };
    }

    if let Some(target) = alias_target(input) {
        // Prefer the character's stored casing of the alias target.
        let name = case_insensitive(target).unwrap_or(target);
        return ResolvedSkill {
            name: name.to_string(),
            matched: SkillMatch::Alias,
        };
    }

    if let Some(name) = case_insensitive(input) {
        return ResolvedSkill {
            name: name.to_string(),
            matched: SkillMatch::CaseInsensitive,
        };
    }

    ResolvedSkill {
        name: input.to_string(),
        matched: SkillMatch::Custom,
    }
}

/// Suggest the closest known skill name for a typo, if any is close enough.
pub fn suggest_skill<'a, I>(input: &str, existing: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let needle = input.trim().to_lowercase();
    existing
        .into_iter()
        .chain(STANDARD_SKILLS.iter().map(|s| s.name))
        .map(|name| (strsim::jaro_winkler(&needle, &name.to_lowercase()), name))
        .filter(|(score, _)| *score >= 0.85)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, name)| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: [&str; 0] = [];

    #[test]
    fn exact_standard_name() {
        let r = resolve_skill("Spot Hidden", NONE);
        assert_eq!(r.name, "Spot Hidden");
        assert_eq!(r.matched, SkillMatch::Exact);
    }

    #[test]
    fn exact_existing_custom_name() {
        let r = resolve_skill("Underwater Basketry", ["Underwater Basketry"]);
        assert_eq!(r.matched, SkillMatch::Exact);
    }

    #[test]
    fn alias_lookup_is_case_insensitive() {
        let r = resolve_skill("Lib Use", NONE);
        assert_eq!(r.name, "Library Use");
        assert_eq!(r.matched, SkillMatch::Alias);

        let r = resolve_skill("MYTHOS", NONE);
        assert_eq!(r.name, CTHULHU_MYTHOS);
    }

    #[test]
    fn case_insensitive_match() {
        let r = resolve_skill("spot hidden", NONE);
        assert_eq!(r.name, "Spot Hidden");
        assert_eq!(r.matched, SkillMatch::CaseInsensitive);

        let r = resolve_skill("underwater basketry", ["Underwater Basketry"]);
        assert_eq!(r.name, "Underwater Basketry");
        assert_eq!(r.matched, SkillMatch::CaseInsensitive);
    }

    #[test]
    fn unknown_name_is_custom_verbatim() {
        let r = resolve_skill("  Wizardry ", NONE);
        assert_eq!(r.name, "Wizardry");
        assert_eq!(r.matched, SkillMatch::Custom);
    }

    #[test]
    fn exact_wins_over_alias() {
        // A custom skill literally named "spot" shadows the alias.
        let r = resolve_skill("spot", ["spot"]);
        assert_eq!(r.name, "spot");
        assert_eq!(r.matched, SkillMatch::Exact);
    }

    #[test]
    fn standard_families() {
        assert!(is_standard("Spot Hidden"));
        assert!(is_standard("Science (Chemistry)"));
        assert!(is_standard("Language (French)"));
        assert!(!is_standard("Underwater Basketry"));
        assert!(!is_standard("Misc (Knots)"));
    }

    #[test]
    fn base_values() {
        assert_eq!(standard_base("Spot Hidden"), 25);
        assert_eq!(standard_base("First Aid"), 30);
        assert_eq!(standard_base("Science (Chemistry)"), 1);
        assert_eq!(standard_base("Art/Craft (Photography)"), 5);
        assert_eq!(standard_base("Language (French)"), 1);
        assert_eq!(standard_base("Fighting (Axe)"), 25);
        assert_eq!(standard_base("Wizardry"), 0);
    }

    #[test]
    fn suggestions() {
        assert_eq!(
            suggest_skill("Spot Hiden", NONE).as_deref(),
            Some("Spot Hidden")
        );
        assert_eq!(suggest_skill("qqqq", NONE), None);
    }

    #[test]
    fn aliases_point_at_standard_skills() {
        for (alias, target) in SKILL_ALIASES {
            assert_eq!(*alias, alias.to_lowercase());
            assert!(standard_skill(target).is_some(), "{alias} -> {target}");
        }
    }
}
