use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use arbor_assembler::{analyze_document, PipelineConfig};
use arbor_protocol::Lexicon;
use arbor_senses::{LexiconArchive, SenseRepository};
use clap::{Parser, Subcommand};
use rkyv::ser::{serializers::AllocSerializer, Serializer};
use rkyv::AlignedVec;

#[derive(Parser)]
#[command(author, version, about = "Dependency parses to syntactic trees")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compiles a JSON sense lexicon to an rkyv archive
    CompileLexicon {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Analyzes a CoNLL-U document and prints the tree report as JSON
    Analyze {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Compiled lexicon; without one no senses are attached
        #[arg(short, long, value_name = "FILE")]
        lexicon: Option<PathBuf>,

        /// Pipeline configuration (JSON)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Write the report here instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::CompileLexicon { input, output } => compile_lexicon(input, output),
        Command::Analyze {
            input,
            lexicon,
            config,
            output,
        } => analyze(input, lexicon, config, output),
    }
}

fn compile_lexicon(input: PathBuf, output: PathBuf) -> anyhow::Result<()> {
    println!("📖 Reading JSON from {:?}...", input);
    let input_data = fs::read_to_string(&input)?;
    let lexicon: Lexicon = serde_json::from_str(&input_data).context("lexicon JSON is malformed")?;

    println!(
        "⚙️  Compiling lexicon version {} with {} entries...",
        lexicon.version,
        lexicon.entries.len()
    );

    let mut serializer = AllocSerializer::<256>::default();
    serializer
        .serialize_value(&lexicon)
        .map_err(|e| anyhow::anyhow!("rkyv serialization failed: {:?}", e))?;
    let bytes = serializer.into_serializer().into_inner();

    // Refuse to write an archive the engine would reject
    LexiconArchive::from_bytes(&bytes)?;

    fs::write(&output, bytes.as_slice())?;
    println!("✅ Success! Binary written to {:?}", output);
    Ok(())
}

fn analyze(
    input: PathBuf,
    lexicon: Option<PathBuf>,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let config = match config {
        Some(path) => {
            let text = fs::read_to_string(&path)?;
            PipelineConfig::from_json(&text).with_context(|| format!("bad config in {:?}", path))?
        }
        None => PipelineConfig::default(),
    };

    let document = fs::read_to_string(&input)?;

    let mut aligned = AlignedVec::new();
    let empty = Lexicon::default();
    let archive;
    let repository: &dyn SenseRepository = match lexicon {
        Some(path) => {
            aligned.extend_from_slice(&fs::read(&path)?);
            archive = LexiconArchive::from_bytes(&aligned)?;
            eprintln!("📚 Lexicon version {} with {} entries", archive.version(), archive.len());
            &archive
        }
        None => &empty,
    };

    let report = analyze_document(&document, repository, &config)?;
    let fallbacks = report.sentences.iter().filter(|s| !s.structured).count();
    eprintln!(
        "🌳 Analyzed {} sentence(s), {} flat fallback(s)",
        report.sentences.len(),
        fallbacks
    );

    let json = serde_json::to_string_pretty(&report)?;
    match output {
        Some(path) => {
            fs::write(&path, json)?;
            eprintln!("✅ Report written to {:?}", path);
        }
        None => println!("{}", json),
    }
    Ok(())
}
