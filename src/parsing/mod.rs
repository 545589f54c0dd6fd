/*!
# Parsing module
Contains the logic for parsing input files into meaningful structs / data.
*/
/// Confidence region loading from BED files
pub mod bed;
/// The JSON comparison problem description
pub mod problem;
