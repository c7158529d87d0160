//! Skill advancement: checks, end-of-session improvement rolls, and XP.

use serde::{Deserialize, Serialize};

use crate::dice::{DiceSource, PercentileDice, PercentileRoll, roll_d10, roll_d100};
use crate::error::{MechError, MechResult};
use crate::sheet::Character;

/// Totals at or below this always pass an improvement roll.
pub const AUTO_IMPROVE_MAX: u32 = 5;

/// Highest value a skill can reach.
pub const SKILL_CAP: u32 = 99;

/// Flag a skill for the next advancement pass.
///
/// A skill not yet on the sheet is added at its base value. Checking a skill
/// that is already checked changes nothing. Returns the canonical name.
pub fn check(character: &mut Character, skill: &str) -> String {
    let canonical = character.ensure_skill(skill);
    let newly_checked = character
        .skill_mut(&canonical)
        .map(|s| !std::mem::replace(&mut s.checked, true))
        .unwrap_or(false);
    if newly_checked {
        character.record(format!("{canonical}: checked"));
    }
    canonical
}

/// One skill's improvement roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillAdvance {
    /// Canonical skill name.
    pub skill: String,
    /// The d100 improvement roll.
    pub roll: PercentileRoll,
    /// Whether the roll passed.
    pub passed: bool,
    /// Value before the roll.
    pub old: u32,
    /// Value after the roll.
    pub new: u32,
}

impl SkillAdvance {
    /// Points actually gained.
    pub fn gain(&self) -> u32 {
        self.new - self.old
    }
}

/// Every improvement roll from one advancement pass, in skill-name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvancementReport {
    /// Per-skill results.
    pub results: Vec<SkillAdvance>,
}

impl AdvancementReport {
    /// True if no skill was checked.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Results that improved their skill.
    pub fn improved(&self) -> impl Iterator<Item = &SkillAdvance> {
        self.results.iter().filter(|r| r.passed)
    }
}

/// Whether an improvement roll passes against the current value.
pub fn improvement_passes(total: u32, value: u32) -> bool {
    total > value || total <= AUTO_IMPROVE_MAX
}

/// Roll improvement for every checked skill and clear every check.
pub fn advance(character: &mut Character, source: &mut impl DiceSource) -> AdvancementReport {
    let checked: Vec<(String, u32)> = character
        .skills()
        .iter()
        .filter(|(_, s)| s.checked)
        .map(|(name, s)| (name.clone(), s.value))
        .collect();

    let mut report = AdvancementReport::default();
    for (skill, old) in checked {
        let roll = roll_d100(source, PercentileDice::PLAIN);
        let passed = improvement_passes(roll.total, old);
        let new = if passed {
            (old + roll_d10(source)).min(SKILL_CAP)
        } else {
            old
        };

        character.set_skill_value(&skill, new);
        if let Some(entry) = character.skill_mut(&skill) {
            entry.checked = false;
        }
        if passed {
            character.record(format!("{skill}: {old}→{new} (advanced)"));
        } else {
            character.record(format!("{skill}: no improvement ({})", roll.total));
        }
        report.results.push(SkillAdvance {
            skill,
            roll,
            passed,
            old,
            new,
        });
    }
    report
}

/// The effect of spending XP on a skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendResult {
    /// Canonical skill name.
    pub skill: String,
    /// Skill value before.
    pub old: u32,
    /// Skill value after.
    pub new: u32,
    /// XP deducted (equal to the gain).
    pub spent: u32,
    /// XP left in the pool.
    pub xp_remaining: u32,
}

/// Move `amount` XP into a skill.
///
/// The skill must already be on the sheet. Gain stops at 99 and only the
/// points gained are deducted.
pub fn spend(character: &mut Character, skill: &str, amount: u32) -> MechResult<SpendResult> {
    if amount == 0 {
        return Err(MechError::InvalidRequest(
            "spend amount must be at least 1".to_string(),
        ));
    }
    let (name, old) = character
        .skill(skill)
        .map(|(name, s)| (name.to_string(), s.value))
        .ok_or_else(|| MechError::NotFound(format!("skill '{skill}' is not on the sheet")))?;

    let have = character.resources().xp;
    if have < amount {
        return Err(MechError::InsufficientXp { have, need: amount });
    }
    if old >= SKILL_CAP {
        return Err(MechError::InvalidRequest(format!(
            "{name} is already at {SKILL_CAP}"
        )));
    }

    let gain = amount.min(SKILL_CAP - old);
    let new = old + gain;
    character.set_skill_value(&name, new);
    let resources = character.resources_mut();
    resources.xp -= gain;
    let xp_remaining = resources.xp;
    character.record(format!("{name}: {old}→{new} (spent {gain} XP)"));

    Ok(SpendResult {
        skill: name,
        old,
        new,
        spent: gain,
        xp_remaining,
    })
}

/// Add XP to the pool. Returns the new total.
pub fn grant_xp(character: &mut Character, amount: u32) -> u32 {
    let resources = character.resources_mut();
    let old = resources.xp;
    resources.xp = old.saturating_add(amount);
    let new = resources.xp;
    character.record(format!("xp: {old}→{new} (+{amount})"));
    new
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;
    use crate::sheet::{ResourceKind, ResourceUpdate};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn investigator() -> Character {
        let mut c = Character::new("Agatha Crane", "Dilettante");
        c.set_characteristics([45, 50, 60, 55, 70, 80, 75, 85])
            .unwrap();
        c
    }

    #[test]
    fn check_adds_unknown_skill_at_base() {
        let mut c = investigator();
        assert_eq!(check(&mut c, "spot"), "Spot Hidden");
        let skill = c.skills()["Spot Hidden"];
        assert_eq!(skill.value, 25);
        assert!(skill.checked);

        check(&mut c, "Dodge");
        assert_eq!(c.skills()["Dodge"].value, 30);

        check(&mut c, "Underwater Basketry");
        assert_eq!(c.skills()["Underwater Basketry"].value, 0);
    }

    #[test]
    fn check_is_idempotent() {
        let mut c = investigator();
        check(&mut c, "Listen");
        let pending = c.pending().len();
        check(&mut c, "listen");
        assert_eq!(c.pending().len(), pending);
        assert!(c.skills()["Listen"].checked);
    }

    #[test]
    fn forced_low_roll_always_improves() {
        let mut c = investigator();
        c.set_skill("Spot Hidden", 50);
        check(&mut c, "Spot Hidden");

        // tens 0, units 3 -> total 3; then d10 digit 7.
        let mut dice = ScriptedDice::new([0, 3, 7]);
        let report = advance(&mut c, &mut dice);

        assert_eq!(report.results.len(), 1);
        let r = &report.results[0];
        assert_eq!(r.roll.total, 3);
        assert!(r.passed);
        assert_eq!((r.old, r.new), (50, 57));
        assert_eq!(r.gain(), 7);
        assert_eq!(c.skills()["Spot Hidden"].value, 57);
        assert!(!c.skills()["Spot Hidden"].checked);
    }

    #[test]
    fn failed_roll_still_clears_check() {
        let mut c = investigator();
        c.set_skill("Spot Hidden", 50);
        check(&mut c, "Spot Hidden");

        // total 42 <= 50 and above 5: fails.
        let mut dice = ScriptedDice::new([4, 2]);
        let report = advance(&mut c, &mut dice);
        assert!(!report.results[0].passed);
        assert_eq!(c.skills()["Spot Hidden"].value, 50);
        assert!(!c.skills()["Spot Hidden"].checked);
        assert_eq!(report.improved().count(), 0);
    }

    #[test]
    fn improvement_caps_at_99() {
        let mut c = investigator();
        c.set_skill("Occult", 95);
        check(&mut c, "Occult");
        // total 98 > 95 passes; d10 digit 0 reads as 10.
        let mut dice = ScriptedDice::new([9, 8, 0]);
        let report = advance(&mut c, &mut dice);
        assert_eq!(report.results[0].new, 99);
    }

    #[test]
    fn advance_without_checks_is_empty() {
        let mut c = investigator();
        c.set_skill("Listen", 40);
        let mut rng = StdRng::seed_from_u64(7);
        assert!(advance(&mut c, &mut rng).is_empty());
    }

    #[test]
    fn pass_rule() {
        assert!(improvement_passes(51, 50));
        assert!(!improvement_passes(50, 50));
        assert!(improvement_passes(5, 90));
        assert!(!improvement_passes(6, 90));
        assert!(improvement_passes(100, 99));
    }

    #[test]
    fn spend_with_too_little_xp_changes_nothing() {
        let mut c = investigator();
        c.set_skill("Library Use", 40);
        grant_xp(&mut c, 3);
        let before = c.clone();

        let err = spend(&mut c, "Library Use", 5).unwrap_err();
        assert_eq!(err, MechError::InsufficientXp { have: 3, need: 5 });
        assert_eq!(c, before);
    }

    #[test]
    fn spend_moves_xp_into_skill() {
        let mut c = investigator();
        c.set_skill("Library Use", 40);
        grant_xp(&mut c, 10);
        let r = spend(&mut c, "lib use", 4).unwrap();
        assert_eq!(r.skill, "Library Use");
        assert_eq!((r.old, r.new, r.spent, r.xp_remaining), (40, 44, 4, 6));
        assert_eq!(c.resources().xp, 6);
    }

    #[test]
    fn spend_only_deducts_what_fits_under_cap() {
        let mut c = investigator();
        c.set_skill("Occult", 97);
        grant_xp(&mut c, 10);
        let r = spend(&mut c, "Occult", 5).unwrap();
        assert_eq!((r.new, r.spent, r.xp_remaining), (99, 2, 8));

        let err = spend(&mut c, "Occult", 1).unwrap_err();
        assert!(matches!(err, MechError::InvalidRequest(_)));
    }

    #[test]
    fn spend_rejects_missing_skill_and_zero() {
        let mut c = investigator();
        grant_xp(&mut c, 10);
        assert!(matches!(
            spend(&mut c, "Navigate", 1),
            Err(MechError::NotFound(_))
        ));
        c.set_skill("Navigate", 10);
        assert!(matches!(
            spend(&mut c, "Navigate", 0),
            Err(MechError::InvalidRequest(_))
        ));
    }

    #[test]
    fn advancing_mythos_lowers_sanity_max() {
        let mut c = investigator();
        check(&mut c, "Cthulhu Mythos");
        // Tens 5, units 0: 50 beats 0, then +7.
        let mut dice = ScriptedDice::new([5, 0, 7]);
        advance(&mut c, &mut dice);
        assert_eq!(c.mythos(), 7);
        assert_eq!(c.resources().sanity.max, 92);
    }

    #[test]
    fn spending_into_mythos_reclamps_sanity() {
        let mut c = investigator();
        c.set_skill("Cthulhu Mythos", 0);
        c.update_resource(ResourceKind::Sanity, ResourceUpdate::Set(95), &mut ScriptedDice::default())
            .unwrap();
        assert_eq!(c.resources().sanity.current, 95);
        grant_xp(&mut c, 10);

        spend(&mut c, "Cthulhu Mythos", 10).unwrap();
        assert_eq!(c.mythos(), 10);
        assert_eq!(c.resources().sanity.max, 89);
        assert_eq!(c.resources().sanity.current, 89);
    }
}
