//! fretwise - print playable chord fingerings for fretted instruments
//!
//! **Usage:**
//! ```bash
//! fretwise C Am F G7
//! fretwise -i ukulele -i charango --max-fret 7 Dm7
//! fretwise --tuning D,A,D,G,B,E --format yaml D
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

use fretwise::config::MAX_CONFIGURABLE_FRET;
use fretwise::{
    parse_chord_sequence, ChordBook, ChordDescriptor, Config, Fingering, Instrument, PitchClass,
};

/// Playable chord fingerings for fretted instruments
#[derive(Parser, Debug)]
#[clap(name = "fretwise", version)]
#[clap(about = "Find and rank playable chord fingerings for fretted instruments")]
struct Args {
    /// Chord symbols, e.g. C Am7 F#sus4 Bb
    #[clap(required_unless_present = "list_instruments")]
    chords: Vec<String>,

    /// Instrument id (repeatable)
    #[clap(short, long = "instrument", value_name = "ID", default_value = "guitar")]
    instruments: Vec<String>,

    /// Highest fret to search (1-24)
    #[clap(long, value_name = "N", value_parser = clap::value_parser!(u8).range(1..=MAX_CONFIGURABLE_FRET as i64))]
    max_fret: Option<u8>,

    /// Number of fingerings to show per chord
    #[clap(long, value_name = "N")]
    limit: Option<usize>,

    /// Retune the selected instruments, lowest string first (e.g. D,A,D,G,B,E)
    #[clap(long, value_name = "NOTES")]
    tuning: Option<String>,

    /// YAML configuration file
    #[clap(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format
    #[clap(short, long, value_enum, default_value = "text")]
    format: Format,

    /// Print the instrument table and exit
    #[clap(long)]
    list_instruments: bool,

    /// Debug logging
    #[clap(short, long)]
    verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Text,
    Yaml,
    Json,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChordReport {
    chord: ChordDescriptor,
    fingerings: Vec<Fingering>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InstrumentReport {
    instrument: Instrument,
    chords: Vec<ChordReport>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(max_fret) = args.max_fret {
        config.search.max_fret = max_fret;
    }
    if let Some(limit) = args.limit {
        config.search.limit = limit;
    }
    info!(max_fret = config.search.max_fret, limit = config.search.limit, "search options");

    let mut book = ChordBook::from_config(config);

    if args.list_instruments {
        print_output(args.format, book.instruments(), |out| {
            for inst in book.instruments().iter() {
                out.push_str(&format!(
                    "{:<10} {} {:<20} {}\n",
                    inst.id(),
                    inst.icon(),
                    inst.name(),
                    tuning_text(inst.strings())
                ));
            }
        })?;
        return Ok(());
    }

    if let Some(tuning) = &args.tuning {
        let pitches = parse_tuning(tuning)?;
        for id in &args.instruments {
            book.retune(id, &pitches)
                .with_context(|| format!("cannot apply tuning {} to {}", tuning, id))?;
        }
    }

    let chords = parse_chord_sequence(&args.chords.join(" "));
    if chords.is_empty() {
        bail!("no valid chord symbols in: {}", args.chords.join(" "));
    }
    debug!(count = chords.len(), "parsed chords");

    let mut reports = Vec::new();
    for id in &args.instruments {
        let mut chord_reports = Vec::new();
        for chord in &chords {
            let fingerings = book.fingerings_for(id, chord)?.to_vec();
            chord_reports.push(ChordReport {
                chord: chord.clone(),
                fingerings,
            });
        }
        reports.push(InstrumentReport {
            instrument: book.instrument(id)?.clone(),
            chords: chord_reports,
        });
    }

    print_output(args.format, &reports, |out| {
        for report in &reports {
            write_text_report(out, report);
        }
    })
}

/// Serialize `value` as YAML/JSON, or build text output with `text`
fn print_output<T: Serialize>(format: Format, value: &T, text: impl FnOnce(&mut String)) -> Result<()> {
    let output = match format {
        Format::Yaml => serde_yaml::to_string(value)?,
        Format::Json => serde_json::to_string_pretty(value)? + "\n",
        Format::Text => {
            let mut out = String::new();
            text(&mut out);
            out
        }
    };
    print!("{}", output);
    Ok(())
}

fn write_text_report(out: &mut String, report: &InstrumentReport) {
    let inst = &report.instrument;
    out.push_str(&format!(
        "{} {} [{}]",
        inst.icon(),
        inst.name(),
        tuning_text(inst.strings())
    ));
    if inst.is_modified() {
        out.push_str(&format!(" (standard: {})", tuning_text(inst.original_tuning())));
    }
    out.push('\n');

    for chord in &report.chords {
        let tones: Vec<&str> = chord.chord.required_notes.iter().map(|pc| pc.name()).collect();
        out.push_str(&format!(
            "  {} - {} ({})\n",
            chord.chord.symbol,
            chord.chord.quality,
            tones.join(" ")
        ));
        if chord.fingerings.is_empty() {
            out.push_str("    no playable fingering\n");
            continue;
        }
        for (i, fingering) in chord.fingerings.iter().enumerate() {
            let fingers: String = fingering
                .fingers
                .iter()
                .map(|f| f.map(|n| char::from(b'0' + n)).unwrap_or('-'))
                .collect();
            let notes: Vec<&str> = fingering
                .sounded_notes(inst.strings())
                .into_iter()
                .map(|pc| pc.map(|p| p.name()).unwrap_or("-"))
                .collect();
            out.push_str(&format!(
                "    {}. {:<8} fingers {:<8} notes {}",
                i + 1,
                fingering.to_string(),
                fingers,
                notes.join(" ")
            ));
            if let Some(barre) = fingering.barre {
                out.push_str(&format!(
                    "  barre fret {} strings {}-{}",
                    barre.fret,
                    barre.from_string + 1,
                    barre.to_string + 1
                ));
            }
            out.push('\n');
        }
    }
    out.push('\n');
}

fn tuning_text(strings: &[PitchClass]) -> String {
    strings.iter().map(|pc| pc.name()).collect::<Vec<_>>().join(" ")
}

fn parse_tuning(text: &str) -> Result<Vec<PitchClass>> {
    text.split(',')
        .map(|name| {
            PitchClass::from_name(name.trim())
                .with_context(|| format!("invalid tuning note '{}'", name.trim()))
        })
        .collect()
}
