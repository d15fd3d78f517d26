// ============================================================================
// Counterattack
// ============================================================================

/// Retaliation an NPC deals to its attacker, before the attacker's hit lands.
///
/// # Formula
///
/// ```text
/// diff = attacker_level - defender_level
/// diff >= 0: ceil(base / (1 + diff))
/// diff <  0: base * (1 + |diff|)
/// ```
///
/// Out-levelling the defender shrinks the counter; being out-levelled
/// multiplies it.
pub fn counter_damage(attacker_level: u32, defender_level: u32, base_damage: u32) -> u32 {
    let diff = i64::from(attacker_level) - i64::from(defender_level);
    let factor = 1 + diff.unsigned_abs();

    if diff >= 0 {
        u64::from(base_damage).div_ceil(factor) as u32
    } else {
        u64::from(base_damage)
            .saturating_mul(factor)
            .min(u64::from(u32::MAX)) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_levels_deal_base_damage() {
        assert_eq!(counter_damage(4, 4, 10), 10);
    }

    #[test]
    fn higher_attacker_rounds_up() {
        assert_eq!(counter_damage(3, 1, 10), 4);
        assert_eq!(counter_damage(2, 1, 30), 15);
        assert_eq!(counter_damage(10, 1, 1), 1);
    }

    #[test]
    fn lower_attacker_is_multiplied() {
        assert_eq!(counter_damage(1, 3, 10), 30);
        assert_eq!(counter_damage(1, 3, 30), 90);
    }

    #[test]
    fn zero_base_never_counters() {
        assert_eq!(counter_damage(1, 9, 0), 0);
        assert_eq!(counter_damage(9, 1, 0), 0);
    }
}
