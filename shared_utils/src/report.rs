//! Report Module
//!
//! Summary reporting and final acknowledgments for batch operations.

use crate::batch::BatchResult;
use crate::types::FileSize;
use console::style;
use std::time::Duration;

pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 3600 {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    } else if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{:.2}s", duration.as_secs_f64())
    }
}

/// Reduction of `output_bytes` against `input_bytes`, in percent. Negative
/// when the output grew.
pub fn size_reduction_percent(input_bytes: u64, output_bytes: u64) -> f64 {
    if input_bytes > 0 {
        (1.0 - output_bytes as f64 / input_bytes as f64) * 100.0
    } else {
        0.0
    }
}

/// Lines of the boxed summary table, without the skipped-file listing.
pub fn summary_lines(
    result: &BatchResult,
    duration: Duration,
    input_bytes: u64,
    output_bytes: u64,
    operation_name: &str,
) -> Vec<String> {
    let reduction = size_reduction_percent(input_bytes, output_bytes);
    let rule = "╠══════════════════════════════════════════════════════════════╣".to_string();

    vec![
        "╔══════════════════════════════════════════════════════════════╗".to_string(),
        format!("║  📊 {:<57}║", format!("{} Summary Report", operation_name)),
        rule.clone(),
        format!("║  📁 Files Processed:    {:>10}                           ║", result.total),
        format!("║  ✅ Converted:          {:>10}                           ║", result.succeeded),
        format!("║  🎯 Target Missed:      {:>10}                           ║", result.target_missed),
        format!("║  ⏭️  Skipped:            {:>10}                           ║", result.skipped),
        format!("║  📈 Success Rate:       {:>9.1}%                           ║", result.success_rate()),
        rule.clone(),
        format!(
            "║  💾 Input Size:         {:>10}                           ║",
            FileSize::new(input_bytes).display()
        ),
        format!(
            "║  💾 Output Size:        {:>10}                           ║",
            FileSize::new(output_bytes).display()
        ),
        format!("║  📉 Size Reduction:     {:>9.1}%                           ║", reduction),
        rule,
        format!(
            "║  ⏱️  Total Time:         {:>10}                           ║",
            format_duration(duration)
        ),
        "╚══════════════════════════════════════════════════════════════╝".to_string(),
    ]
}

pub fn print_summary_report(
    result: &BatchResult,
    duration: Duration,
    input_bytes: u64,
    output_bytes: u64,
    operation_name: &str,
) {
    println!();
    for line in summary_lines(result, duration, input_bytes, output_bytes, operation_name) {
        println!("{line}");
    }

    if !result.errors.is_empty() {
        println!();
        println!("⏭️ Skipped files:");
        for (path, reason) in &result.errors {
            println!("   {} → {}", path.display(), reason);
        }
    }
}

/// Final acknowledgment once the whole batch completed.
pub fn print_success(msg: &str) {
    println!("{} {}", style("✅").green(), style(msg).green().bold());
}

/// Acknowledgment for a run that failed, including pre-flight validation.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("❌ Error:").red().bold(), msg);
}
