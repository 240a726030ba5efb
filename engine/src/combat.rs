// ═══════════════════════════════════════════════════════════════════════
// Combat — dice rolling and loss resolution
// Pure functions; the attack handler applies losses and decides conquest.
// ═══════════════════════════════════════════════════════════════════════

use rand::Rng;
use serde::{Deserialize, Serialize};

pub const MAX_ATTACKER_DICE: u32 = 3;
pub const MAX_DEFENDER_DICE: u32 = 2;

/// Raw dice and the losses they imply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatOutcome {
    /// Sorted highest first.
    pub attacker_rolls: Vec<u8>,
    /// Sorted highest first.
    pub defender_rolls: Vec<u8>,
    pub attacker_losses: u32,
    pub defender_losses: u32,
}

/// Attacker keeps one army at home.
pub fn attacker_dice(source_armies: u32) -> u32 {
    source_armies.saturating_sub(1).min(MAX_ATTACKER_DICE)
}

pub fn defender_dice(destination_armies: u32) -> u32 {
    destination_armies.min(MAX_DEFENDER_DICE)
}

/// Roll `count` six-sided dice, highest first.
pub fn roll_dice<R: Rng + ?Sized>(rng: &mut R, count: u32) -> Vec<u8> {
    let mut dice: Vec<u8> = (0..count).map(|_| rng.gen_range(1..=6)).collect();
    dice.sort_unstable_by(|a, b| b.cmp(a));
    dice
}

/// Compare sorted dice pairwise. Ties go to the defender.
/// Returns (attacker_losses, defender_losses).
pub fn compare_dice(attacker: &[u8], defender: &[u8]) -> (u32, u32) {
    let mut attacker_losses = 0;
    let mut defender_losses = 0;
    for (a, d) in attacker.iter().zip(defender.iter()) {
        if a > d {
            defender_losses += 1;
        } else {
            attacker_losses += 1;
        }
    }
    (attacker_losses, defender_losses)
}

/// Roll both sides and resolve.
pub fn resolve<R: Rng + ?Sized>(rng: &mut R, attacker_dice: u32, defender_dice: u32) -> CombatOutcome {
    let attacker_rolls = roll_dice(rng, attacker_dice);
    let defender_rolls = roll_dice(rng, defender_dice);
    let (attacker_losses, defender_losses) = compare_dice(&attacker_rolls, &defender_rolls);
    CombatOutcome { attacker_rolls, defender_rolls, attacker_losses, defender_losses }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_dice_counts() {
        assert_eq!(attacker_dice(1), 0);
        assert_eq!(attacker_dice(2), 1);
        assert_eq!(attacker_dice(4), 3);
        assert_eq!(attacker_dice(20), 3);
        assert_eq!(defender_dice(1), 1);
        assert_eq!(defender_dice(2), 2);
        assert_eq!(defender_dice(9), 2);
    }

    #[test]
    fn test_ties_favor_defender() {
        assert_eq!(compare_dice(&[6, 4], &[6, 4]), (2, 0));
        assert_eq!(compare_dice(&[5], &[5]), (1, 0));
    }

    #[test]
    fn test_pairwise_comparison() {
        // 6 beats 5, 3 loses to 4
        assert_eq!(compare_dice(&[6, 3, 1], &[5, 4]), (1, 1));
        assert_eq!(compare_dice(&[6, 6, 6], &[5, 5]), (0, 2));
        // Only as many comparisons as the smaller side
        assert_eq!(compare_dice(&[2], &[6, 6]), (1, 0));
    }

    #[test]
    fn test_rolls_sorted_and_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            let dice = roll_dice(&mut rng, 3);
            assert_eq!(dice.len(), 3);
            assert!(dice.iter().all(|d| (1..=6).contains(d)));
            assert!(dice.windows(2).all(|w| w[0] >= w[1]));
        }
    }

    #[test]
    fn test_losses_sum_to_comparisons() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for a in 1..=3 {
            for d in 1..=2 {
                let outcome = resolve(&mut rng, a, d);
                assert_eq!(outcome.attacker_losses + outcome.defender_losses, a.min(d));
                assert_eq!(outcome.attacker_rolls.len(), a as usize);
                assert_eq!(outcome.defender_rolls.len(), d as usize);
            }
        }
    }

    #[test]
    fn test_seeded_resolve_is_deterministic() {
        let a = resolve(&mut ChaCha8Rng::seed_from_u64(99), 3, 2);
        let b = resolve(&mut ChaCha8Rng::seed_from_u64(99), 3, 2);
        assert_eq!(a, b);
    }
}
