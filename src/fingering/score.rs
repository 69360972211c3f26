//! Fingering ranking
//!
//! Higher scores are better. Points come from:
//! - **Sounded strings**: +10 each
//! - **Fret height**: -2 per fret of the highest sounded fret
//! - **Root in the bass**: +50 when the lowest sounded string plays the root
//! - **Finger count**: -10 for each finger beyond four

use crate::chord::ChordTones;
use crate::pitch::PitchClass;

use super::types::Fingering;

const POINTS_PER_STRING: i32 = 10;
const FRET_PENALTY: i32 = 2;
const ROOT_IN_BASS_BONUS: i32 = 50;
const EXTRA_FINGER_PENALTY: i32 = 10;
const COMFORTABLE_FINGERS: usize = 4;

/// Score one fingering played on `tuning` for a chord whose root is the first of `tones`
pub fn score_fingering(fingering: &Fingering, tuning: &[PitchClass], tones: &ChordTones) -> i32 {
    let mut score = fingering.sounded_count() as i32 * POINTS_PER_STRING;

    score -= fingering.highest_fret() as i32 * FRET_PENALTY;

    let bass = fingering
        .bass_string()
        .and_then(|i| fingering.frets[i].sounding(*tuning.get(i)?));
    if bass.is_some() && bass == tones.root() {
        score += ROOT_IN_BASS_BONUS;
    }

    let extra_fingers = fingering.fingers_used().len().saturating_sub(COMFORTABLE_FINGERS);
    score -= extra_fingers as i32 * EXTRA_FINGER_PENALTY;

    score
}

/// Sort by score, best first, and keep the top `limit`.
///
/// The sort is stable, so equal scores keep their discovery order.
pub fn rank(
    fingerings: Vec<Fingering>,
    tuning: &[PitchClass],
    tones: &ChordTones,
    limit: usize,
) -> Vec<Fingering> {
    let mut scored: Vec<(i32, Fingering)> = fingerings
        .into_iter()
        .map(|f| (score_fingering(&f, tuning, tones), f))
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().take(limit).map(|(_, f)| f).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chord::{chord_notes, ChordQuality};
    use crate::fingering::assign::process_fingering;
    use crate::fingering::types::FretChoice::*;

    fn guitar() -> Vec<PitchClass> {
        [4, 9, 2, 7, 11, 4].iter().map(|s| PitchClass::new(*s)).collect()
    }

    fn c_major() -> ChordTones {
        chord_notes(PitchClass::new(0), ChordQuality::Major)
    }

    #[test]
    fn test_open_c_score() {
        // x32010: 5 strings, max fret 3, C in the bass
        let f = process_fingering(&[Muted, Fretted(3), Fretted(2), Open, Fretted(1), Open]).unwrap();
        assert_eq!(score_fingering(&f, &guitar(), &c_major()), 50 - 6 + 50);
    }

    #[test]
    fn test_no_root_bonus() {
        // 032010: E in the bass
        let f = process_fingering(&[Open, Fretted(3), Fretted(2), Open, Fretted(1), Open]).unwrap();
        assert_eq!(score_fingering(&f, &guitar(), &c_major()), 60 - 6);
    }

    #[test]
    fn test_rank_stable_and_limited() {
        let a = process_fingering(&[Muted, Fretted(3), Fretted(2), Open, Fretted(1), Open]).unwrap();
        let b = process_fingering(&[Open, Fretted(3), Fretted(2), Open, Fretted(1), Open]).unwrap();
        let c = process_fingering(&[Open, Fretted(3), Fretted(2), Open, Fretted(1), Fretted(3)]).unwrap();
        // scores: a = 94, b = 54, c = 54
        let ranked = rank(vec![b.clone(), c.clone(), a.clone()], &guitar(), &c_major(), 6);
        assert_eq!(ranked, vec![a.clone(), b.clone(), c.clone()]);

        let ranked = rank(vec![c.clone(), b.clone(), a.clone()], &guitar(), &c_major(), 2);
        assert_eq!(ranked, vec![a, c]);
    }
}
