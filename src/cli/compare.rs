
use anyhow::bail;
use clap::Args;
use log::info;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::core::{check_optional_filename, check_required_filename, AFTER_HELP, FULL_VERSION};
use crate::provider::DEFAULT_MAX_VARIANT_SIZE;
use crate::replay::path_replay::{DEFAULT_MAX_ITERATION_COUNT, DEFAULT_MAX_PATH_SIZE};

#[derive(Args, Clone, Default, Serialize)]
#[clap(author, about,
    after_help = &**AFTER_HELP
)]
pub struct CompareSettings {
    #[clap(default_value = "")]
    #[clap(hide = true)]
    hapreplay_version: String,

    /// Comparison problem with contigs, baseline, and called variants (JSON or JSON.gz)
    #[clap(required = true)]
    #[clap(short = 'i')]
    #[clap(long = "input")]
    #[clap(value_name = "JSON")]
    #[clap(help_heading = Some("Input/Output"))]
    pub input_filename: PathBuf,

    /// Confidence regions (BED)
    #[clap(short = 'b')]
    #[clap(long = "regions")]
    #[clap(value_name = "BED")]
    #[clap(help_heading = Some("Input/Output"))]
    pub regions: Option<PathBuf>,

    /// Output directory containing the summary and variant files
    #[clap(required = true)]
    #[clap(short = 'o')]
    #[clap(long = "output-dir")]
    #[clap(value_name = "DIR")]
    #[clap(help_heading = Some("Input/Output"))]
    pub output_folder: PathBuf,

    /// Optional output debug folder
    #[clap(long = "output-debug")]
    #[clap(value_name = "DIR")]
    #[clap(help_heading = Some("Input/Output"))]
    pub debug_folder: Option<PathBuf>,

    /// Writes the sync point intervals of the genotype pass to sync_points.tsv
    #[clap(long = "generate-sync-points")]
    #[clap(help_heading = Some("Input/Output"))]
    pub generate_sync_points: bool,

    /// Disables reference-overlap trimming; only a shared anchor base is removed from alleles
    #[clap(long = "disable-ref-overlap")]
    #[clap(help_heading = Some("Variant filters"))]
    pub disable_ref_overlap: bool,

    /// Assesses all records, not only those that PASS
    #[clap(long = "disable-filter")]
    #[clap(help_heading = Some("Variant filters"))]
    pub disable_filter: bool,

    /// Only assess SNP records
    #[clap(long = "snp-only")]
    #[clap(help_heading = Some("Variant filters"))]
    pub snp_only: bool,

    /// Only assess INDEL records
    #[clap(long = "indel-only")]
    #[clap(help_heading = Some("Variant filters"))]
    pub indel_only: bool,

    /// Records with an allele longer than this are not assessed
    #[clap(long = "max-variant-size")]
    #[clap(value_name = "BP")]
    #[clap(help_heading = Some("Variant filters"))]
    #[clap(default_value_t = DEFAULT_MAX_VARIANT_SIZE)]
    pub max_variant_size: usize,

    /// Number of unresolved paths before a region is declared too complex
    #[clap(long = "max-path-size")]
    #[clap(value_name = "INT")]
    #[clap(help_heading = Some("Compare parameters"))]
    #[clap(default_value_t = DEFAULT_MAX_PATH_SIZE)]
    pub max_path_size: usize,

    /// Number of iterations between sync points before a region is declared too complex
    #[clap(long = "max-iterations")]
    #[clap(value_name = "INT")]
    #[clap(help_heading = Some("Compare parameters"))]
    #[clap(default_value_t = DEFAULT_MAX_ITERATION_COUNT)]
    pub max_iterations: usize,

    /// Disables the allele pass; everything that is not a genotype match is reported as no match
    #[clap(long = "disable-allele-match")]
    #[clap(help_heading = Some("Compare parameters"))]
    pub disable_allele_match: bool,

    /// Number of threads to use in the comparison step
    #[clap(long = "threads")]
    #[clap(value_name = "THREADS")]
    #[clap(default_value = "1")]
    pub threads: usize,

    /// Enable verbose output.
    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

pub fn check_compare_settings(mut settings: CompareSettings) -> anyhow::Result<CompareSettings> {
    // hard code the version in
    settings.hapreplay_version = FULL_VERSION.clone();
    info!("hapreplay version: {:?}", &settings.hapreplay_version);
    info!("Sub-command: compare");
    info!("Inputs:");

    // check for all the required input files
    check_required_filename(&settings.input_filename, "Input problem")?;
    check_optional_filename(settings.regions.as_deref(), "Regions")?;

    // dump stuff to the logger
    info!("\tInput: {:?}", &settings.input_filename);
    if let Some(hcr_fn) = settings.regions.as_deref() {
        info!("\tRegions: {hcr_fn:?}");
    } else {
        info!("\tRegions: None");
    }

    // outputs
    info!("Outputs:");
    info!("\tOutput folder: {:?}", &settings.output_folder);
    if let Some(debug_folder) = settings.debug_folder.as_ref() {
        info!("\tDebug folder: {debug_folder:?}");
    }
    info!("\tSync points: {}", if settings.generate_sync_points { "ENABLED" } else { "DISABLED" });

    // filters
    info!("Variant filters:");
    if settings.snp_only && settings.indel_only {
        bail!("--snp-only and --indel-only are mutually exclusive");
    }
    if settings.max_variant_size == 0 {
        bail!("--max-variant-size must be >0");
    }
    info!("\tReference overlap: {}", if settings.disable_ref_overlap { "DISABLED" } else { "ENABLED" });
    info!("\tPASS only: {}", if settings.disable_filter { "DISABLED" } else { "ENABLED" });
    if settings.snp_only {
        info!("\tVariant types: SNP only");
    } else if settings.indel_only {
        info!("\tVariant types: INDEL only");
    } else {
        info!("\tVariant types: ALL");
    }
    info!("\tMax variant size: {}", settings.max_variant_size);

    // search parameters
    info!("Compare parameters:");
    if settings.max_path_size == 0 {
        bail!("--max-path-size must be >0");
    }
    if settings.max_iterations == 0 {
        bail!("--max-iterations must be >0");
    }
    info!("\tMax path size: {}", settings.max_path_size);
    info!("\tMax iterations: {}", settings.max_iterations);
    info!("\tAllele match: {}", if settings.disable_allele_match { "DISABLED" } else { "ENABLED" });

    if settings.threads == 0 {
        settings.threads = 1;
    }
    info!("Processing threads: {}", settings.threads);

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> CompareSettings {
        CompareSettings {
            // any file that exists will do
            input_filename: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml"),
            output_folder: std::env::temp_dir(),
            max_variant_size: DEFAULT_MAX_VARIANT_SIZE,
            max_path_size: DEFAULT_MAX_PATH_SIZE,
            max_iterations: DEFAULT_MAX_ITERATION_COUNT,
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_settings() {
        let checked = check_compare_settings(settings()).unwrap();
        assert_eq!(checked.threads, 1);
        assert_eq!(checked.hapreplay_version, *FULL_VERSION);
    }

    #[test]
    fn test_invalid_settings() {
        let mut both_types = settings();
        both_types.snp_only = true;
        both_types.indel_only = true;
        assert!(check_compare_settings(both_types).is_err());

        let mut missing_input = settings();
        missing_input.input_filename = PathBuf::from("/nonexistent/hapreplay/problem.json");
        assert!(check_compare_settings(missing_input).is_err());

        let mut missing_regions = settings();
        missing_regions.regions = Some(PathBuf::from("/nonexistent/hapreplay/regions.bed"));
        assert!(check_compare_settings(missing_regions).is_err());

        let mut no_paths = settings();
        no_paths.max_path_size = 0;
        assert!(check_compare_settings(no_paths).is_err());
    }
}
