
use indicatif::{ProgressState, ProgressStyle};

/// Shared function to pull our progress bar styling
/// # Errors
/// * if the template fails to parse
pub fn get_progress_style() -> anyhow::Result<ProgressStyle> {
    let style = ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} ({percent}); ETA: {eta_precise}; Speed: {per_sec} {msg}")?
        .with_key("percent", |state: &ProgressState, w: &mut dyn std::fmt::Write| {
            let _ = write!(w, "{:.1}%", state.fraction() * 100.0);
        })
        .with_key("per_sec", |state: &ProgressState, w: &mut dyn std::fmt::Write| {
            let _ = write!(w, "{:.0}/s", state.per_sec());
        })
        .progress_chars("##-");
    Ok(style)
}
