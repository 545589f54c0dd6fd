/*!
# Writers module
Contains the logic for writing the output files for the compare command.
*/
/// Generates the summary file
pub mod summary;
/// Generates the debug file of sync point intervals
pub mod sync_points;
/// Generates the per-variant status file
pub mod variant_status;
