
use indicatif::ParallelProgressIterator;
use log::{LevelFilter, debug, error, info};
use rayon::prelude::*;
use std::time::Instant;

use hapreplay::cli::compare::{CompareSettings, check_compare_settings};
use hapreplay::cli::core::{Commands, get_cli};
use hapreplay::data_types::vcf_side::VcfSide;
use hapreplay::duo_comparison::{ChromosomeOutcome, ComparisonConfigBuilder, apply_outcome, compare_chromosome};
use hapreplay::parsing::bed::ConfidenceRegions;
use hapreplay::parsing::problem::ComparisonProblem;
use hapreplay::provider::{InMemoryVariantProvider, ProviderConfigBuilder, VariantProvider};
use hapreplay::replay::path_replay::ReplayConfigBuilder;
use hapreplay::util::json_io::save_json;
use hapreplay::util::progress_bar::get_progress_style;
use hapreplay::writers::summary::SummaryWriter;
use hapreplay::writers::sync_points::SyncPointWriter;
use hapreplay::writers::variant_status::VariantStatusWriter;

fn run_compare(settings: CompareSettings) {
    // start the timer
    let start_time = Instant::now();

    // set up logging before we check the other settings
    let filter_level: LevelFilter = match settings.verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace
    };
    env_logger::builder()
        .format_timestamp_millis()
        .filter_level(filter_level)
        .init();

    let settings = match check_compare_settings(settings) {
        Ok(s) => s,
        Err(e) => {
            error!("Error while verifying settings: {e:#}");
            std::process::exit(exitcode::CONFIG);
        }
    };

    // set up the number of threads for rayon
    match rayon::ThreadPoolBuilder::new().num_threads(settings.threads).build_global() {
        Ok(()) => {},
        Err(e) => {
            error!("Error while building thread pool: {e}");
            std::process::exit(exitcode::OSERR);
        }
    };

    // create the primary output folder
    info!("Creating output folder at {:?}...", settings.output_folder);
    match std::fs::create_dir_all(&settings.output_folder) {
        Ok(()) => {},
        Err(e) => {
            error!("Error while creating output folder: {e}");
            std::process::exit(exitcode::IOERR);
        }
    }

    // create a debug folder if specified
    if let Some(debug_folder) = settings.debug_folder.as_ref() {
        info!("Creating debug folder at {debug_folder:?}...");
        match std::fs::create_dir_all(debug_folder) {
            Ok(()) => {},
            Err(e) => {
                error!("Error while creating debug folder: {e}");
                std::process::exit(exitcode::IOERR);
            }
        }

        // save the CLI options
        let cli_json = debug_folder.join("cli_settings.json");
        info!("Saving CLI options to {cli_json:?}...");
        if let Err(e) = save_json(&settings, &cli_json) {
            error!("Error while saving CLI options: {e}");
            std::process::exit(exitcode::IOERR);
        }
    }

    // load the problem
    info!("Loading comparison problem from {:?}...", settings.input_filename);
    let problem = match ComparisonProblem::from_file(&settings.input_filename) {
        Ok(p) => p,
        Err(e) => {
            error!("Error while loading comparison problem: {e:#}");
            std::process::exit(exitcode::IOERR);
        }
    };

    // load any confidence regions also
    let regions = settings.regions.as_deref().map(|bed_fn| {
        info!("Pre-loading confidence regions into memory...");
        match ConfidenceRegions::from_bed(bed_fn) {
            Ok(r) => r,
            Err(e) => {
                error!("Error while loading confidence regions: {e:#}");
                std::process::exit(exitcode::IOERR);
            }
        }
    });

    // build our configurations
    let provider_config = match ProviderConfigBuilder::default()
        .ref_overlap(!settings.disable_ref_overlap)
        .filter_enabled(!settings.disable_filter)
        .snp_only(settings.snp_only)
        .indel_only(settings.indel_only)
        .max_variant_size(settings.max_variant_size)
        .build() {
        Ok(pc) => pc,
        Err(e) => {
            error!("Error while building provider config: {e:?}");
            std::process::exit(exitcode::SOFTWARE);
        }
    };

    let comparison_config = match ReplayConfigBuilder::default()
        .max_path_size(settings.max_path_size)
        .max_iteration_count(settings.max_iterations)
        .build()
        .map_err(anyhow::Error::from)
        .and_then(|replay_config| {
            ComparisonConfigBuilder::default()
                .replay_config(replay_config)
                .allele_match(!settings.disable_allele_match)
                .build()
                .map_err(anyhow::Error::from)
        }) {
        Ok(cc) => cc,
        Err(e) => {
            error!("Error while building comparison config: {e:?}");
            std::process::exit(exitcode::SOFTWARE);
        }
    };

    // normalize and filter everything up front
    info!("Normalizing variants...");
    let mut provider = match InMemoryVariantProvider::new(&problem, regions.as_ref(), &provider_config) {
        Ok(p) => p,
        Err(e) => {
            error!("Error while loading variants: {e:#}");
            std::process::exit(exitcode::IOERR);
        }
    };
    drop(problem);

    // run the parallel iterator to solve each chromosome
    let style = match get_progress_style() {
        Ok(s) => s,
        Err(e) => {
            error!("Error while building progress bar: {e:#}");
            std::process::exit(exitcode::SOFTWARE);
        }
    };
    let chromosomes = provider.chromosome_names();
    info!("Comparing {} chromosomes...", chromosomes.len());
    let all_results: Vec<(String, Option<ChromosomeOutcome>)> = chromosomes.into_par_iter()
        .map(|chromosome| {
            let outcome = match compare_chromosome(&provider, &chromosome, &comparison_config) {
                Ok(o) => Some(o),
                Err(e) => {
                    error!("Error while comparing {chromosome}: {e:#}");
                    None
                }
            };
            (chromosome, outcome)
        })
        .progress_with_style(style)
        .collect();
    info!("Chromosome comparisons complete, reconciling statuses...");

    // statuses are applied in one thread after the search has joined
    for outcome in all_results.iter().filter_map(|(_, o)| o.as_ref()) {
        debug!("{} genotype pass stats: {:?}", outcome.chromosome, outcome.genotype_stats);
        apply_outcome(&mut provider, outcome);
    }

    // now write things
    if let Err(e) = write_outputs(&settings, &provider, &all_results) {
        error!("Error while saving output files: {e:#}");
        std::process::exit(exitcode::IOERR);
    }

    info!("Comparisons completed in {} seconds.", start_time.elapsed().as_secs_f64());
}

/// Tallies the metrics and writes every output file
fn write_outputs(settings: &CompareSettings, provider: &InMemoryVariantProvider, all_results: &[(String, Option<ChromosomeOutcome>)]) -> anyhow::Result<()> {
    let mut summary_writer = SummaryWriter::new();
    let variants_fn = settings.output_folder.join("variants.tsv");
    info!("Saving variant statuses to {variants_fn:?}...");
    let mut variant_writer = VariantStatusWriter::new(&variants_fn)?;
    let mut sync_writer = if settings.generate_sync_points {
        let sync_fn = settings.output_folder.join("sync_points.tsv");
        info!("Saving sync points to {sync_fn:?}...");
        Some(SyncPointWriter::new(&sync_fn)?)
    } else {
        None
    };

    let mut solved_chromosomes = 0;
    let mut error_chromosomes = 0;
    for (chromosome, opt_outcome) in all_results.iter() {
        variant_writer.write_chromosome(provider, chromosome, opt_outcome.as_ref())?;
        match opt_outcome {
            Some(outcome) => {
                summary_writer.add_chromosome(
                    chromosome,
                    provider.variant_list(VcfSide::Base, chromosome),
                    provider.variant_list(VcfSide::Called, chromosome)
                );
                if let Some(writer) = sync_writer.as_mut() {
                    writer.write_outcome(outcome)?;
                }
                solved_chromosomes += 1;
            },
            None => {
                error_chromosomes += 1;
            }
        };
    }
    variant_writer.finalize()?;
    if let Some(writer) = sync_writer {
        writer.finalize()?;
    }

    let joint_metrics = summary_writer.all_metrics();
    info!("Joint GT: {:?}", joint_metrics.genotype);
    info!("\tRecall: {:?}", joint_metrics.genotype.recall());
    info!("\tPrecision: {:?}", joint_metrics.genotype.precision());
    info!("\tF1: {:?}", joint_metrics.genotype.f1());
    info!("Joint AL: {:?}", joint_metrics.allele);
    info!("\tRecall: {:?}", joint_metrics.allele.recall());
    info!("\tPrecision: {:?}", joint_metrics.allele.precision());
    info!("\tF1: {:?}", joint_metrics.allele.f1());
    info!("Solved:error chromosomes: {solved_chromosomes} : {error_chromosomes}");

    let summary_fn = settings.output_folder.join("summary.tsv");
    info!("Saving output summary to {summary_fn:?}...");
    summary_writer.write_summary(&summary_fn)?;
    Ok(())
}

fn main() {
    let cli = get_cli();
    match cli.command {
        Commands::Compare(settings) => {
            run_compare(*settings);
        }
    }

    info!("Process finished successfully.");
}
