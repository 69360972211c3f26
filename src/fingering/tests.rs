use super::*;
use crate::chord::{chord_notes, ChordQuality};
use crate::instrument::InstrumentRegistry;
use crate::parse_chord_token;
use crate::pitch::PitchClass;

fn tabs(fingerings: &[Fingering]) -> Vec<String> {
    fingerings.iter().map(|f| f.to_string()).collect()
}

fn search(instrument: &str, chord: &str) -> Vec<Fingering> {
    let registry = InstrumentRegistry::builtin();
    let chord = parse_chord_token(chord).unwrap();
    generate_fingerings(registry.get(instrument).unwrap(), &chord.required_notes, 5)
}

#[test]
fn test_guitar_c_major() {
    let result = search("guitar", "C");
    assert_eq!(
        tabs(&result),
        vec!["x32010", "x32013", "x32053", "x35050", "x35550", "x35553"]
    );

    // Open C: ring on A, middle on D, index on B
    assert_eq!(result[0].barre, None);
    assert_eq!(result[0].fingers, vec![None, Some(3), Some(2), None, Some(1), None]);

    // Last one barres the 3rd fret from the A string up
    assert_eq!(
        result[5].barre,
        Some(Barre { fret: 3, from_string: 1, to_string: 5 })
    );
    assert_eq!(
        result[5].fingers,
        vec![None, Some(1), Some(2), Some(3), Some(4), Some(1)]
    );
}

#[test]
fn test_guitar_c_major_stats() {
    let registry = InstrumentRegistry::builtin();
    let guitar = registry.get("guitar").unwrap();
    let tones = chord_notes(PitchClass::new(0), ChordQuality::Major);
    let (result, stats) = search_with_stats(guitar, &tones, &SearchOptions::default());

    assert_eq!(stats.generated, 486);
    assert_eq!(stats.rejected_by_validity, 261);
    assert_eq!(stats.rejected_by_playability, 205);
    assert_eq!(stats.playable, 20);
    assert_eq!(result.len(), DEFAULT_LIMIT);
}

#[test]
fn test_guitar_f_major_barre_first() {
    let result = search("guitar", "F");
    assert_eq!(
        tabs(&result),
        vec!["133211", "xx3211", "x03211", "x33211", "xxx211"]
    );
    assert_eq!(
        result[0].barre,
        Some(Barre { fret: 1, from_string: 0, to_string: 5 })
    );
}

#[test]
fn test_guitar_am7() {
    let result = search("guitar", "Am7");
    assert_eq!(
        tabs(&result),
        vec!["505550", "532050", "535050", "x02010", "x02013", "x02213"]
    );
}

#[test]
fn test_ukulele_c_major() {
    let result = search("ukulele", "C");
    assert_eq!(tabs(&result), vec!["5433", "0003", "0403", "0433", "x433"]);
    assert_eq!(
        result[0].barre,
        Some(Barre { fret: 3, from_string: 2, to_string: 3 })
    );
}

#[test]
fn test_charango_g_major() {
    let result = search("charango", "G");
    assert_eq!(tabs(&result), vec!["02323", "x2323"]);
}

#[test]
fn test_nothing_playable_is_empty() {
    let registry = InstrumentRegistry::builtin();
    let guitar = registry.get("guitar").unwrap();
    let tones = chord_notes(PitchClass::new(0), ChordQuality::Major);

    // Open strings alone have no C
    assert!(generate_fingerings(guitar, &tones, 0).is_empty());
    // No tones, nothing to sound
    assert!(generate_fingerings(guitar, &ChordTones::new([]), 5).is_empty());
}

#[test]
fn test_generate_is_deterministic() {
    let registry = InstrumentRegistry::builtin();
    for instrument in registry.iter() {
        let tones = chord_notes(PitchClass::new(7), ChordQuality::Dom7);
        let first = generate_fingerings(instrument, &tones, 5);
        let second = generate_fingerings(instrument, &tones, 5);
        assert_eq!(first, second, "{}", instrument.id());
    }
}

#[test]
fn test_results_satisfy_invariants() {
    let registry = InstrumentRegistry::builtin();
    for instrument in registry.iter() {
        let tuning = instrument.strings();
        for root in 0..12 {
            for quality in ChordQuality::ALL {
                let tones = chord_notes(PitchClass::new(root), quality);
                let result = generate_fingerings(instrument, &tones, 5);
                assert!(result.len() <= DEFAULT_LIMIT);

                for fingering in &result {
                    let label = format!("{} {:?} {:?} {}", instrument.id(), root, quality, fingering);
                    let sounded: Vec<PitchClass> =
                        fingering.sounded_notes(tuning).into_iter().flatten().collect();

                    assert!(tones.iter().all(|t| sounded.contains(&t)), "{}", label);
                    assert!(sounded.len() >= 3, "{}", label);
                    assert_eq!(fingering.frets.len(), tuning.len(), "{}", label);
                    assert_eq!(fingering.fingers.len(), tuning.len(), "{}", label);

                    let first_sounded = fingering.bass_string().unwrap();
                    assert!(
                        fingering.frets[first_sounded..].iter().all(|f| !f.is_muted()),
                        "{}",
                        label
                    );

                    if let Some(barre) = fingering.barre {
                        assert!(
                            fingering.frets[barre.from_string..].iter().all(|f| !f.is_open()),
                            "{}",
                            label
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn test_wider_search_finds_more() {
    let registry = InstrumentRegistry::builtin();
    let guitar = registry.get("guitar").unwrap();
    let tones = chord_notes(PitchClass::new(0), ChordQuality::Major);
    let narrow = search_with_stats(guitar, &tones, &SearchOptions { max_fret: 5, limit: 100 });
    let wide = search_with_stats(guitar, &tones, &SearchOptions { max_fret: 8, limit: 100 });
    assert!(wide.1.generated > narrow.1.generated);
    assert!(wide.0.len() >= narrow.0.len());
}
