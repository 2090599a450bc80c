/// Tunable rules of the reference simulator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LiteRules {
    /// Floor of the boss room. Winning the boss fight wins the run.
    pub final_floor: i32,

    /// Monster hit points as a percentage of their base values.
    pub monster_hp_percent: i32,

    /// Monster attack damage as a percentage of the rolled values.
    pub monster_damage_percent: i32,

    pub starting_gold: i32,
}

impl LiteRules {
    pub const DEFAULT_FINAL_FLOOR: i32 = 12;
    pub const DEFAULT_STARTING_GOLD: i32 = 99;

    /// Extra monster HP percentage per ascension level.
    pub const ASCENSION_HP_STEP: i32 = 2;

    /// Monster HP after scaling, never below 1.
    pub fn scale_hp(&self, base: i32, ascension: u8) -> i32 {
        let percent = self.monster_hp_percent + Self::ASCENSION_HP_STEP * i32::from(ascension);
        (base * percent / 100).max(1)
    }

    pub fn scale_damage(&self, rolled: i32) -> i32 {
        (rolled * self.monster_damage_percent / 100).max(0)
    }
}

impl Default for LiteRules {
    fn default() -> Self {
        Self {
            final_floor: Self::DEFAULT_FINAL_FLOOR,
            monster_hp_percent: 100,
            monster_damage_percent: 100,
            starting_gold: Self::DEFAULT_STARTING_GOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaling_respects_floors() {
        let rules = LiteRules {
            monster_hp_percent: 1,
            monster_damage_percent: 0,
            ..LiteRules::default()
        };
        assert_eq!(rules.scale_hp(12, 0), 1);
        assert_eq!(rules.scale_damage(15), 0);

        let default = LiteRules::default();
        assert_eq!(default.scale_hp(40, 0), 40);
        assert_eq!(default.scale_hp(100, 5), 110);
    }
}
