use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::PathBuf;
use std::process;

use taxo_cluster_stats::genome_select::select_genomes_file;
use taxo_cluster_stats::taxo_compare::{read_taxonomy_list_file, GeneComparison};
use taxo_cluster_stats::{run_cluster_report, KeywordFilter, OutputPaths, Result};

#[derive(Parser, Debug)]
#[command(name = "taxo-cluster-stats")]
#[command(author, version, about = "Taxonomic discrimination statistics for ecoPCR clusters", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Filter clusters by taxonomy, write corrected clusters and statistics
    Stats(StatsArgs),
    /// Filter FASTA headers by taxonomy and extract genome names
    SelectGenomes(SelectArgs),
    /// Compare taxonomy lists of a target gene with the 16S gene
    Compare(CompareArgs),
}

#[derive(Args, Debug)]
struct KeywordArgs {
    /// Keywords that must be present in taxonomy to keep a line (e.g. f__Lactobacillaceae)
    #[arg(short, long = "include-keywords", alias = "include_keywords", num_args = 0..)]
    include_keywords: Vec<String>,

    /// Keywords that, if present, will cause a line to be excluded (e.g. f__Planococcaceae)
    #[arg(short, long = "exclude-keywords", alias = "exclude_keywords", num_args = 0..)]
    exclude_keywords: Vec<String>,
}

impl KeywordArgs {
    fn to_filter(&self) -> KeywordFilter {
        KeywordFilter::new(Some(self.include_keywords.clone()), Some(self.exclude_keywords.clone()))
    }
}

#[derive(Args, Debug)]
struct StatsArgs {
    /// Input file containing cluster information (e.g. cluster.txt)
    #[arg(short, long = "cluster-file", alias = "cluster_file")]
    cluster_file: PathBuf,

    /// Output file for the statistics report (e.g. stats.txt)
    #[arg(short = 'o', long = "output-stats-file", alias = "output_stats_file")]
    output_stats_file: PathBuf,

    /// Output file for the filtered clusters (e.g. cluster_corrected.txt)
    #[arg(short = 'r', long = "output-corrected-file", alias = "output_corrected_file")]
    output_corrected_file: PathBuf,

    #[command(flatten)]
    keywords: KeywordArgs,

    /// Output file to log rejected clusters
    #[arg(short, long = "log-file", alias = "log_file")]
    log_file: Option<PathBuf>,

    /// Output file for unique taxonomies
    #[arg(short, long = "unique-taxo-file", alias = "unique_taxo_file", default_value = "uniq_taxo.txt")]
    unique_taxo_file: PathBuf,

    /// Output file for good discriminated taxonomies
    #[arg(
        short = 'g',
        long = "unique-taxo-good-discriminated-file",
        alias = "unique_taxo_good_discriminated_file",
        default_value = "uniq_taxo_good_discriminated.txt"
    )]
    unique_taxo_good_discriminated_file: PathBuf,
}

#[derive(Args, Debug)]
struct SelectArgs {
    /// Input file containing sequences with taxonomy (e.g. name_seq_with_taxo.txt)
    #[arg(short, long = "seq-file", alias = "seq_file")]
    seq_file: PathBuf,

    /// Output file for the filtered sequences
    #[arg(short, long = "output-file", alias = "output_file")]
    output_file: PathBuf,

    #[command(flatten)]
    keywords: KeywordArgs,

    /// Output file to log rejected lines
    #[arg(short, long = "log-file", alias = "log_file")]
    log_file: Option<PathBuf>,

    /// Output file for the selected genome names
    #[arg(short = 'n', long = "genome-names-file", env = "GENOME_NAMES_FILE", default_value = "genome_name_selected.txt")]
    genome_names_file: PathBuf,
}

#[derive(Args, Debug)]
struct CompareArgs {
    /// Unique taxonomies caught by the target gene
    #[arg(long = "taxo-target-gene", alias = "taxo_target_gene")]
    taxo_target_gene: PathBuf,

    /// Unique taxonomies caught by the 16S gene
    #[arg(long = "taxo-16S-gene", alias = "taxo_16S_gene")]
    taxo_16s_gene: PathBuf,

    /// Good discriminated taxonomies of the target gene
    #[arg(long = "good-discrimination-target-gene", alias = "good_discrimination_target_gene")]
    good_target_gene: PathBuf,

    /// Good discriminated taxonomies of the 16S gene
    #[arg(long = "good-discrimination-16S", alias = "good_discrimination_16S")]
    good_16s_gene: PathBuf,

    /// Output file for the comparison summary
    #[arg(long)]
    output: PathBuf,
}

fn spinner(color: &str, message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
        .template(&format!("{{spinner:.{color}}} {{msg}}"))
    {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner
}

fn run_stats(args: &StatsArgs) -> Result<()> {
    // 1. Parse, filter, and classify
    let sp = spinner("blue", "Filtering clusters...");
    let report = match run_cluster_report(&args.cluster_file, &args.keywords.to_filter()) {
        Ok(report) => report,
        Err(e) => {
            sp.abandon();
            return Err(e);
        }
    };
    sp.finish_with_message(format!(
        "Kept {} cluster(s), rejected {}.",
        report.filtered_clusters.len(),
        report.rejected_clusters.len()
    ));

    // 2. Write outputs
    let paths = OutputPaths {
        stats_file: args.output_stats_file.clone(),
        corrected_file: args.output_corrected_file.clone(),
        rejected_file: args.log_file.clone(),
        unique_taxo_file: args.unique_taxo_file.clone(),
        good_taxo_file: args.unique_taxo_good_discriminated_file.clone(),
    };
    let sp = spinner("yellow", "Writing output files...");
    report.write_outputs(&paths)?;
    sp.finish_with_message("Output files created.");

    let stats = &report.statistics;
    println!("Number of unique taxonomies: {}", stats.num_unique_taxonomies());
    println!("Number of good discriminated taxonomies: {}", stats.num_good_discriminated_taxonomies());
    println!("Percentage of good discriminated taxonomies: {:.2}%", stats.percentage_good_taxonomies);
    println!("Number of taxonomies both good and bad discriminated: {}", stats.num_overlapping_taxonomies());

    println!("Statistics written to {}", paths.stats_file.display());
    println!("Filtered clusters written to {}", paths.corrected_file.display());
    if let Some(log_file) = &paths.rejected_file {
        println!("Rejected clusters logged to {}", log_file.display());
    }
    println!("Unique taxonomies written to {}", paths.unique_taxo_file.display());
    println!("Good discriminated taxonomies written to {}", paths.good_taxo_file.display());
    Ok(())
}

fn run_select(args: &SelectArgs) -> Result<()> {
    let sp = spinner("green", "Selecting genomes...");
    let selection = select_genomes_file(&args.seq_file, &args.keywords.to_filter())?;
    fs::write(&args.output_file, selection.kept_text())?;
    if let Some(log_file) = &args.log_file {
        fs::write(log_file, selection.rejected_log_text())?;
    }
    fs::write(&args.genome_names_file, selection.genome_names_text())?;
    sp.finish_with_message("Genome selection finished.");

    println!("Filtered lines written to {}", args.output_file.display());
    println!("Genome names written to {}", args.genome_names_file.display());
    if let Some(log_file) = &args.log_file {
        println!("Rejected lines logged to {}", log_file.display());
    }
    Ok(())
}

fn run_compare(args: &CompareArgs) -> Result<()> {
    let comparison = GeneComparison::new(
        &read_taxonomy_list_file(&args.taxo_target_gene)?,
        &read_taxonomy_list_file(&args.taxo_16s_gene)?,
        &read_taxonomy_list_file(&args.good_target_gene)?,
        &read_taxonomy_list_file(&args.good_16s_gene)?,
    );
    fs::write(&args.output, comparison.summary_text())?;
    println!("Taxonomy comparison saved to '{}'", args.output.display());
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let result = match &cli.command {
        Command::Stats(args) => run_stats(args),
        Command::SelectGenomes(args) => run_select(args),
        Command::Compare(args) => run_compare(args),
    };

    if let Err(e) = result {
        log::error!("{e}");
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
