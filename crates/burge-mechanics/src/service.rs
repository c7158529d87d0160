//! The character service: one function per logical operation.
//!
//! Hosts load a [`Character`], call one of these with parsed arguments and a
//! [`DiceSource`], render the returned value, and persist the character.
//! Nothing here keeps state between calls.

use serde::{Deserialize, Serialize};

use crate::advancement::{self, AdvancementReport, SpendResult};
use crate::dice::{DiceSource, PercentileDice, roll_d100};
use crate::error::{MechError, MechResult};
use crate::interchange;
use crate::resolution::{Difficulty, SuccessLevel, SuccessOdds, classify};
use crate::sheet::{
    Character, Characteristic, HistoryEntry, ResourceChange, ResourceKind, ResourceUpdate,
    SkillChange,
};
use crate::skills;

/// The outcome of a d100 check. Built once and never changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    /// What was checked, e.g. "Spot Hidden" or "DEX".
    pub name: String,
    /// Every tens die as a two-digit value (0, 10, ..., 90), in draw order.
    pub dice_rolled: Vec<u32>,
    /// The tens digit that was kept.
    pub chosen_tens: u32,
    /// The units digit.
    pub units: u32,
    /// The final result, 1-100.
    pub total: u32,
    /// The finest tier reached.
    pub success_level: SuccessLevel,
    /// The value rolled against.
    pub target_value: u32,
    /// The difficulty asked for.
    pub difficulty: Difficulty,
    /// Bonus/penalty dice used, after any major-wound penalty.
    pub dice: PercentileDice,
    /// The target was an untrained base value.
    pub is_base: bool,
    /// The skill was flagged for advancement by this roll.
    pub marked: bool,
}

impl RollResult {
    /// Whether the roll passed at the requested difficulty.
    pub fn passed(&self) -> bool {
        self.success_level.meets(self.difficulty)
    }

    /// The value that had to be rolled under for the requested difficulty.
    pub fn threshold(&self) -> u32 {
        self.difficulty.threshold(self.target_value)
    }
}

fn resolve(
    name: String,
    target_value: u32,
    difficulty: Difficulty,
    dice: PercentileDice,
    is_base: bool,
    source: &mut impl DiceSource,
) -> RollResult {
    let roll = roll_d100(source, dice);
    RollResult {
        name,
        dice_rolled: roll.tens_rolled.iter().map(|t| t * 10).collect(),
        chosen_tens: roll.chosen_tens,
        units: roll.units,
        total: roll.total,
        success_level: classify(roll.total, target_value),
        target_value,
        difficulty,
        dice,
        is_base,
        marked: false,
    }
}

/// Bonus/penalty dice after the major-wound penalty, if any.
fn effective_dice(character: &Character, dice: PercentileDice) -> MechResult<PercentileDice> {
    if character.major_wound() {
        dice.with_extra_penalty()
    } else {
        Ok(dice)
    }
}

/// Create a character, optionally with all eight characteristics.
pub fn create(
    name: &str,
    occupation: &str,
    characteristics: Option<[u32; 8]>,
) -> MechResult<Character> {
    let name = name.trim();
    if name.is_empty() {
        return Err(MechError::InvalidRequest(
            "character name must not be empty".to_string(),
        ));
    }
    let mut character = Character::new(name, occupation.trim());
    match characteristics {
        Some(values) => character.set_characteristics(values)?,
        None => character.record(format!("created {name}")),
    }
    Ok(character)
}

/// Roll a skill check.
///
/// A skill missing from the sheet is rolled at its base value. A passing
/// roll on a skill the character has marks it for advancement.
pub fn skill_check(
    character: &mut Character,
    skill: &str,
    difficulty: Difficulty,
    dice: PercentileDice,
    source: &mut impl DiceSource,
) -> MechResult<RollResult> {
    let dice = effective_dice(character, dice)?;
    let stored = character
        .skill(skill)
        .map(|(name, s)| (name.to_string(), s.value));

    let (name, target, is_base) = match stored {
        Some((name, value)) => (name, value, false),
        None => {
            let resolved = character.resolve_skill(skill);
            let base = character.base_value(&resolved.name);
            (resolved.name, base, true)
        }
    };

    let mut result = resolve(name, target, difficulty, dice, is_base, source);
    if !is_base && result.passed() {
        let was_checked = character
            .skill(&result.name)
            .map(|(_, s)| s.checked)
            .unwrap_or(false);
        advancement::check(character, &result.name);
        result.marked = !was_checked;
    }
    Ok(result)
}

/// Roll a characteristic check.
pub fn characteristic_check(
    character: &Character,
    characteristic: Characteristic,
    difficulty: Difficulty,
    dice: PercentileDice,
    source: &mut impl DiceSource,
) -> MechResult<RollResult> {
    let dice = effective_dice(character, dice)?;
    let target = character.characteristic(characteristic);
    Ok(resolve(
        characteristic.to_string(),
        target,
        difficulty,
        dice,
        false,
        source,
    ))
}

/// Roll against a bare value, e.g. Luck or a keeper-assigned target.
pub fn value_check(
    name: &str,
    target: u32,
    difficulty: Difficulty,
    dice: PercentileDice,
    source: &mut impl DiceSource,
) -> RollResult {
    resolve(name.to_string(), target, difficulty, dice, false, source)
}

/// Flag a skill for advancement. Returns the canonical name.
pub fn check(character: &mut Character, skill: &str) -> String {
    advancement::check(character, skill)
}

/// Run the advancement pass over every checked skill.
pub fn advance(character: &mut Character, source: &mut impl DiceSource) -> AdvancementReport {
    advancement::advance(character, source)
}

/// Spend XP on a skill; `amount` defaults to 1.
pub fn spend(character: &mut Character, skill: &str, amount: Option<u32>) -> MechResult<SpendResult> {
    advancement::spend(character, skill, amount.unwrap_or(1))
}

/// Build a character from a Dhole's House export.
pub fn import_json(text: &str) -> MechResult<Character> {
    interchange::import_json(text)
}

/// Write a character as a Dhole's House export.
pub fn export_json(character: &Character) -> MechResult<String> {
    interchange::export_json(character)
}

/// Change HP, MP, Sanity, Luck, or XP. Rolled updates such as `-1d6` draw
/// from `source`.
pub fn adjust_resource(
    character: &mut Character,
    kind: ResourceKind,
    update: ResourceUpdate,
    source: &mut impl DiceSource,
) -> MechResult<ResourceChange> {
    character.update_resource(kind, update, source)
}

/// Record the Luck an investigator starts play with.
pub fn set_starting_luck(character: &mut Character, value: u32) {
    character.set_starting_luck(value);
}

/// Set one characteristic. Returns `(old, new)`.
pub fn set_characteristic(
    character: &mut Character,
    characteristic: Characteristic,
    value: u32,
) -> (u32, u32) {
    character.set_characteristic(characteristic, value)
}

/// Set a skill value, adding the skill if needed.
pub fn set_skill(character: &mut Character, skill: &str, value: u32) -> MechResult<SkillChange> {
    if skill.trim().is_empty() {
        return Err(MechError::InvalidRequest(
            "skill name must not be empty".to_string(),
        ));
    }
    Ok(character.set_skill(skill, value))
}

/// Apply or clear the major wound ruling. Returns the previous state.
pub fn set_wound(character: &mut Character, wounded: bool) -> bool {
    character.set_major_wound(wounded)
}

/// Commit pending changes as a history entry.
pub fn save_session(character: &mut Character, note: &str) -> MechResult<HistoryEntry> {
    character.save_session(note).cloned()
}

/// Exact success odds for a target and dice configuration.
pub fn odds(target: u32, dice: PercentileDice) -> SuccessOdds {
    SuccessOdds::compute(target, dice)
}

/// Closest skill name for an unknown input, for "did you mean" hints.
pub fn suggest_skill(character: &Character, input: &str) -> Option<String> {
    skills::suggest_skill(input, character.skills().keys().map(String::as_str))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn investigator() -> Character {
        create(
            "Harvey Walters",
            "Journalist",
            Some([50, 60, 70, 55, 65, 45, 80, 75]),
        )
        .unwrap()
    }

    #[test]
    fn create_validates() {
        assert!(matches!(
            create("  ", "", None),
            Err(MechError::InvalidRequest(_))
        ));
        assert!(create("Nobody", "", Some([0; 8])).is_err());
        let c = create("Nobody", "", None).unwrap();
        assert_eq!(c.characteristic(Characteristic::Str), 0);
        assert_eq!(c.pending(), ["created Nobody"]);
    }

    #[test]
    fn critical_on_one_regardless_of_target() {
        let mut c = investigator();
        c.set_skill("Spot Hidden", 5);
        let mut dice = ScriptedDice::new([0, 1]);
        let r = skill_check(&mut c, "Spot Hidden", Difficulty::Regular, PercentileDice::PLAIN, &mut dice)
            .unwrap();
        assert_eq!(r.total, 1);
        assert_eq!(r.success_level, SuccessLevel::Critical);
        assert_eq!(r.target_value, 5);
        assert!(r.marked);
        assert!(c.skills()["Spot Hidden"].checked);
    }

    #[test]
    fn passing_skill_check_marks_once() {
        let mut c = investigator();
        c.set_skill("Library Use", 60);
        let mut dice = ScriptedDice::new([4, 0]);
        let r = skill_check(&mut c, "library", Difficulty::Regular, PercentileDice::PLAIN, &mut dice)
            .unwrap();
        assert_eq!(r.name, "Library Use");
        assert_eq!(r.success_level, SuccessLevel::Regular);
        assert!(r.marked);

        let r = skill_check(&mut c, "library", Difficulty::Regular, PercentileDice::PLAIN, &mut dice)
            .unwrap();
        assert!(r.passed());
        assert!(!r.marked);
    }

    #[test]
    fn failed_or_hard_miss_does_not_mark() {
        let mut c = investigator();
        c.set_skill("Listen", 60);
        // 40 is a Regular success but misses a Hard check (threshold 30).
        let mut dice = ScriptedDice::new([4, 0]);
        let r = skill_check(&mut c, "Listen", Difficulty::Hard, PercentileDice::PLAIN, &mut dice)
            .unwrap();
        assert_eq!(r.success_level, SuccessLevel::Regular);
        assert!(!r.passed());
        assert_eq!(r.threshold(), 30);
        assert!(!c.skills()["Listen"].checked);
    }

    #[test]
    fn missing_skill_rolls_at_base_without_marking() {
        let mut c = investigator();
        let mut dice = ScriptedDice::new([1, 0]);
        let r = skill_check(&mut c, "dodge", Difficulty::Regular, PercentileDice::PLAIN, &mut dice)
            .unwrap();
        assert_eq!(r.name, "Dodge");
        assert_eq!(r.target_value, 35);
        assert!(r.is_base);
        assert!(r.passed());
        assert!(!r.marked);
        assert!(c.skills().is_empty());

        let r = skill_check(&mut c, "Wizardry", Difficulty::Regular, PercentileDice::PLAIN, &mut dice)
            .unwrap();
        assert_eq!(r.target_value, 0);
    }

    #[test]
    fn major_wound_adds_a_penalty_die() {
        let mut c = investigator();
        c.set_skill("Stealth", 50);
        set_wound(&mut c, true);
        // Two tens dice (1 and 7), units 2: the penalty keeps 72.
        let mut dice = ScriptedDice::new([1, 7, 2]);
        let r = skill_check(&mut c, "Stealth", Difficulty::Regular, PercentileDice::PLAIN, &mut dice)
            .unwrap();
        assert_eq!(r.dice, PercentileDice::new(0, 1).unwrap());
        assert_eq!(r.dice_rolled, vec![10, 70]);
        assert_eq!(r.total, 72);
        assert_eq!(r.success_level, SuccessLevel::Failure);

        // A bonus die cancels against the wound penalty.
        let mut dice = ScriptedDice::new([1, 2]);
        let r = skill_check(
            &mut c,
            "Stealth",
            Difficulty::Regular,
            PercentileDice::new(1, 0).unwrap(),
            &mut dice,
        )
        .unwrap();
        assert_eq!(r.dice, PercentileDice::PLAIN);
        assert_eq!(r.total, 12);
    }

    #[test]
    fn characteristic_and_value_checks() {
        let c = investigator();
        let mut dice = ScriptedDice::new([9, 7]);
        let r = characteristic_check(&c, Characteristic::Int, Difficulty::Regular, PercentileDice::PLAIN, &mut dice)
            .unwrap();
        assert_eq!(r.name, "INT");
        assert_eq!(r.target_value, 80);
        assert_eq!(r.success_level, SuccessLevel::Failure);

        let mut dice = ScriptedDice::new([9, 7]);
        let r = value_check("Luck", 40, Difficulty::Regular, PercentileDice::PLAIN, &mut dice);
        assert_eq!(r.success_level, SuccessLevel::Fumble);
    }

    #[test]
    fn seeded_checks_are_reproducible() {
        let mut a = investigator();
        let mut b = a.clone();
        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let ra = skill_check(&mut a, "Spot Hidden", Difficulty::Regular, PercentileDice::PLAIN, &mut rng_a)
                .unwrap();
            let rb = skill_check(&mut b, "Spot Hidden", Difficulty::Regular, PercentileDice::PLAIN, &mut rng_b)
                .unwrap();
            assert_eq!(ra, rb);
        }
    }

    #[test]
    fn spend_defaults_to_one() {
        let mut c = investigator();
        c.set_skill("Occult", 20);
        adjust_resource(&mut c, ResourceKind::Xp, ResourceUpdate::Set(2), &mut ScriptedDice::default())
            .unwrap();
        let r = spend(&mut c, "Occult", None).unwrap();
        assert_eq!((r.new, r.xp_remaining), (21, 1));
    }

    #[test]
    fn sanity_loss_by_dice() {
        let mut c = investigator();
        let update = "-1d4".parse().unwrap();
        let mut dice = ScriptedDice::new([1]);
        let change = adjust_resource(&mut c, ResourceKind::Sanity, update, &mut dice).unwrap();
        assert_eq!((change.old, change.new), (65, 63));
        assert_eq!(change.roll.unwrap().values, vec![2]);
    }

    #[test]
    fn starting_luck_is_explicit() {
        let mut c = investigator();
        set_starting_luck(&mut c, 60);
        adjust_resource(&mut c, ResourceKind::Luck, ResourceUpdate::Delta(-10), &mut ScriptedDice::default())
            .unwrap();
        assert_eq!(c.resources().luck.current, 50);
        assert_eq!(c.resources().luck.starting, 60);
    }

    #[test]
    fn session_flow() {
        let mut c = investigator();
        set_skill(&mut c, "Spot Hidden", 50).unwrap();
        check(&mut c, "Spot Hidden");
        let mut dice = ScriptedDice::new([0, 3, 4]);
        let report = advance(&mut c, &mut dice);
        assert_eq!(report.results[0].new, 54);
        let entry = save_session(&mut c, "The Haunting").unwrap();
        assert_eq!(entry.note, "The Haunting");
        assert!(entry.changes.iter().any(|l| l.contains("(advanced)")));
        assert!(set_skill(&mut c, " ", 10).is_err());
    }

    #[test]
    fn export_then_import() {
        let mut c = investigator();
        set_skill(&mut c, "Spot Hidden", 50).unwrap();
        set_skill(&mut c, "Underwater Basketry", 30).unwrap();
        let back = import_json(&export_json(&c).unwrap()).unwrap();
        assert_eq!(back.skills()["Spot Hidden"].value, 50);
        assert_eq!(back.skills()["Underwater Basketry"].value, 30);
    }

    #[test]
    fn suggestions_include_sheet_skills() {
        let mut c = investigator();
        c.set_skill("Underwater Basketry", 30);
        assert_eq!(
            suggest_skill(&c, "Underwater Baskety").as_deref(),
            Some("Underwater Basketry")
        );
    }

    #[test]
    fn odds_match_classifier() {
        let o = odds(50, PercentileDice::PLAIN);
        assert_eq!(o.count(SuccessLevel::Critical), 1);
    }
}
