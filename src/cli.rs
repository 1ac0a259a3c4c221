use clap::{ArgAction, Parser, Subcommand};
use env_logger::fmt::Color;
use log::{Level, LevelFilter};
use std::{
    io::Write,
    path::{Path, PathBuf},
};

type Result<T> = std::result::Result<T, String>;

#[derive(Parser)]
#[command(name="annoblast",
          version=env!("CARGO_PKG_VERSION"),
          about="Homology search and annotation pipeline built on BLAST+, UniProt and KEGG",
          long_about = None,
          disable_help_subcommand = true,
          help_template = "{name} {version}\n{about-section}\n{usage-heading}\n    {usage}\n\n{all-args}",
          )]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = ArgAction::Count, help = "Specify multiple times to increase verbosity level (e.g., -vv for more verbosity)")]
    pub verbosity: u8,
}

#[derive(Subcommand)]
pub enum Command {
    #[clap(about = "Run the full search and annotation pipeline")]
    Run(RunArgs),
    #[clap(about = "Search a query sequence against a local protein database")]
    Search(SearchArgs),
    #[clap(about = "Annotate a protein accession via UniProt and KEGG")]
    Annotate(AnnotateArgs),
    #[clap(about = "Count annotated enzymes per genus for an EC number and taxon")]
    Enzymes(EnzymesArgs),
}

#[derive(Parser, Debug)]
#[command(arg_required_else_help(true))]
pub struct SearchArgs {
    #[clap(required = true)]
    #[clap(short = 'q')]
    #[clap(long = "query")]
    #[clap(help = "Single-record nucleotide FASTA to search with")]
    #[clap(value_name = "FASTA")]
    #[arg(value_parser = check_file_exists)]
    pub query_path: PathBuf,

    #[clap(required = true)]
    #[clap(short = 'r')]
    #[clap(long = "reference")]
    #[clap(help = "Multi-record protein FASTA to build the database from")]
    #[clap(value_name = "FAA")]
    #[arg(value_parser = check_file_exists)]
    pub reference_path: PathBuf,

    #[clap(required = true)]
    #[clap(short = 'o')]
    #[clap(long = "outdir")]
    #[clap(help = "Directory for database artifacts and result tables")]
    #[clap(value_name = "OUTDIR")]
    pub outdir: PathBuf,

    #[clap(long = "db-title")]
    #[clap(value_name = "TITLE")]
    #[clap(help = "Title for the protein database")]
    #[clap(default_value = "reference_protein")]
    #[arg(value_parser = check_name_nonempty)]
    pub db_title: String,

    #[clap(long = "top")]
    #[clap(value_name = "N")]
    #[clap(help = "Number of alignments to report")]
    #[clap(default_value = "5")]
    pub top: usize,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "makeblastdb-exe")]
    #[clap(value_name = "EXE")]
    #[clap(help = "Name or path of the makeblastdb executable")]
    #[clap(default_value = "makeblastdb")]
    pub makeblastdb_exe: String,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "blastx-exe")]
    #[clap(value_name = "EXE")]
    #[clap(help = "Name or path of the blastx executable")]
    #[clap(default_value = "blastx")]
    pub blastx_exe: String,
}

#[derive(Parser, Debug)]
#[command(arg_required_else_help(true))]
pub struct RunArgs {
    #[clap(flatten)]
    pub search: SearchArgs,

    #[clap(long = "skip-annotation")]
    #[clap(help = "Stop after the alignment table is loaded (no remote queries)")]
    pub skip_annotation: bool,
}

#[derive(Parser, Debug)]
#[command(arg_required_else_help(true))]
pub struct AnnotateArgs {
    #[clap(required = true)]
    #[clap(short = 'a')]
    #[clap(long = "accession")]
    #[clap(help = "Protein accession to annotate (version suffix allowed)")]
    #[clap(value_name = "ACCESSION")]
    #[arg(value_parser = check_name_nonempty)]
    pub accession: String,

    #[clap(required = true)]
    #[clap(short = 'o')]
    #[clap(long = "outdir")]
    #[clap(help = "Directory for downloaded pathway diagrams")]
    #[clap(value_name = "OUTDIR")]
    pub outdir: PathBuf,

    #[clap(long = "gene")]
    #[clap(value_name = "GENE")]
    #[clap(help = "Gene name for the pathway lookup (default: first gene name reported by UniProt)")]
    #[clap(default_value = None)]
    pub gene: Option<String>,
}

#[derive(Parser, Debug)]
#[command(arg_required_else_help(true))]
pub struct EnzymesArgs {
    #[clap(required = true)]
    #[clap(short = 'e')]
    #[clap(long = "ec")]
    #[clap(help = "Enzyme Classification number, e.g. 3.1.1.3")]
    #[clap(value_name = "EC")]
    #[arg(value_parser = check_name_nonempty)]
    pub ec: String,

    #[clap(required = true)]
    #[clap(short = 't')]
    #[clap(long = "taxon")]
    #[clap(help = "Taxonomic scope, e.g. enterobacterales")]
    #[clap(value_name = "TAXON")]
    #[arg(value_parser = check_name_nonempty)]
    pub taxon: String,
}

pub fn init_verbose(args: &Cli) {
    let filter_level: LevelFilter = match args.verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let level = record.level();
            let mut style = buf.style();
            match record.level() {
                Level::Error => style.set_color(Color::Red),
                Level::Warn => style.set_color(Color::Yellow),
                Level::Info => style.set_color(Color::Green),
                Level::Debug => style.set_color(Color::Blue),
                Level::Trace => style.set_color(Color::Cyan),
            };

            writeln!(
                buf,
                "{} [{}] - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                style.value(level),
                record.args()
            )
        })
        .filter_level(filter_level)
        .init();
}

fn check_file_exists(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if !path.exists() {
        Err(format!("File does not exist: {}", path.display()))
    } else {
        Ok(path.to_path_buf())
    }
}

fn check_name_nonempty(s: &str) -> Result<String> {
    if s.trim().is_empty() {
        Err("Value cannot be an empty string".to_string())
    } else {
        Ok(s.to_string())
    }
}
