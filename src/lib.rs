
/// Command line interface functionality
pub mod cli;
/// Contains various shared data types
pub mod data_types;
/// Genotype and allele passes over a single chromosome
pub mod duo_comparison;
/// Tooling for parsing input files into meaningful structs / data
pub mod parsing;
/// Normalized variant access for the comparison engine
pub mod provider;
/// Core haplotype replay search
pub mod replay;
/// Various utility functions that tend to be very generic
pub mod util;
/// All output writers
pub mod writers;
