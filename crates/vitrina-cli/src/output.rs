//! Styled terminal output for scenario runs.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use vitrina::flows::Flow;
use vitrina::ScenarioReport;

pub fn print_listing(flows: &[Flow]) {
    for flow in flows {
        println!(
            "{}  {}",
            style(format!("{:<26}", flow.name)).cyan(),
            flow.description
        );
    }
}

pub fn progress(total: u64) -> ProgressBar {
    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );
    bar
}

pub fn print_report(report: &ScenarioReport) {
    if report.passed {
        println!(
            "{} {} ({}ms)",
            style("✓").green().bold(),
            report.name,
            report.elapsed_ms
        );
        return;
    }

    println!(
        "{} {} ({}ms)",
        style("✗").red().bold(),
        report.name,
        report.elapsed_ms
    );
    if let Some(failure) = &report.failure {
        println!("    {}", style(&failure.error).red());
        if let Some(url) = &failure.last_url {
            println!("    last url: {url}");
        }
        if let Some(shot) = &failure.screenshot {
            println!("    screenshot: {}", shot.display());
        }
    }
}

pub fn print_summary(reports: &[ScenarioReport]) {
    let passed = reports.iter().filter(|report| report.passed).count();
    let failed = reports.len() - passed;
    println!();
    if failed == 0 {
        println!(
            "{}",
            style(format!("{passed} scenario(s) passed")).green().bold()
        );
    } else {
        println!(
            "{}",
            style(format!("{passed} passed, {failed} failed")).red().bold()
        );
    }
}
