//! Output formatters for console, JSON and Markdown

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::*;
use colored::{Color, Colorize};
use std::path::Path;

const MISSING: &str = "—";

/// Trait for formatting reports
pub trait OutputFormatter {
    fn format_report(&self, report: &Report) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors
pub struct ConsoleFormatter {
    use_colors: bool,
}

/// JSON formatter for scripting and structured data
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for sharing shortlists
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

fn salary_text(salary: Option<u64>) -> String {
    match salary {
        Some(s) => format!("${}", thousands(s)),
        None => MISSING.to_string(),
    }
}

/// 1234567 -> "1,234,567"
fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn join_display<T: ToString>(items: &[T]) -> String {
    if items.is_empty() {
        return MISSING.to_string();
    }
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_budget(&self, report: &ShortlistReport) -> String {
        let average = salary_text(report.average_salary);
        match (report.budget_avg, report.within_budget()) {
            (Some(budget), Some(true)) => format!(
                "Average salary: {} {}",
                average,
                self.colorize(&format!("(within ${} budget)", thousands(budget)), Color::Green)
            ),
            (Some(budget), Some(false)) => format!(
                "Average salary: {} {}",
                average,
                self.colorize(&format!("(over ${} budget)", thousands(budget)), Color::Red)
            ),
            _ => format!("Average salary: {}", average),
        }
    }

    fn format_ranking(&self, report: &RankingReport) -> String {
        let mut output = self.format_header("Candidate Ranking", 1);
        if let Some(query) = &report.query {
            output.push_str(&format!("Search: \"{}\"\n", query));
        }
        let (first, last) = report.page.showing();
        output.push_str(&format!(
            "Showing {}-{} of {} (page {}/{}, {} candidates total)\n\n",
            first,
            last,
            report.page.total_rows,
            report.page.number,
            report.page.page_count,
            report.total_candidates
        ));

        for row in &report.rows {
            output.push_str(&format!(
                "{:>4}. {} {}\n",
                row.rank,
                self.colorize(&row.label, Color::Cyan),
                self.colorize(&format!("[{:.1}]", row.score), Color::Yellow)
            ));
            if let Some(email) = &row.email {
                output.push_str(&format!("      {}\n", email));
            }
            output.push_str(&format!(
                "      {}  •  {}  •  {}\n",
                row.region,
                salary_text(row.salary),
                join_display(&row.categories)
            ));
        }

        let pages: Vec<String> = report
            .page
            .window()
            .into_iter()
            .map(|n| {
                if n == report.page.number {
                    self.colorize(&format!("[{}]", n), Color::Green)
                } else {
                    n.to_string()
                }
            })
            .collect();
        let prev = if report.page.is_first() { "" } else { "‹ prev  " };
        let next = if report.page.is_last() { "" } else { "  next ›" };
        output.push_str(&format!("\nPages: {}{}{}\n", prev, pages.join(" "), next));
        output
    }

    fn format_shortlist(&self, report: &ShortlistReport) -> String {
        let mut output = self.format_header("Shortlist", 1);
        if report.entries.is_empty() {
            output.push_str("No candidates selected.\n");
            return output;
        }

        for (i, entry) in report.entries.iter().enumerate() {
            output.push_str(&self.format_header(
                &format!(
                    "{}. {} ({})",
                    i + 1,
                    entry.label,
                    entry.role_group.as_deref().unwrap_or(MISSING)
                ),
                2,
            ));
            output.push_str(&format!(
                "Score: {}\n",
                self.colorize(&format!("{:.1}", entry.score), Color::Yellow)
            ));
            if let Some(email) = &entry.email {
                output.push_str(&format!("Email: {}\n", email));
            }
            for bullet in &entry.explanation.bullets {
                output.push_str(&format!("  • {}\n", bullet));
            }
        }

        output.push_str(&self.format_header("Summary", 3));
        output.push_str(&format!("{}\n", self.format_budget(report)));
        output.push_str(&format!("Regions covered: {}\n", report.regions_covered));
        if let Some(path) = &report.export_path {
            output.push_str(&format!(
                "Exported to: {}\n",
                self.colorize(path, Color::Green)
            ));
        }
        output
    }

    fn format_explanation(&self, report: &ExplanationReport) -> String {
        let mut output = self.format_header(&report.label, 1);
        output.push_str(&format!(
            "Score: {}  •  Roles: {}\n\n",
            self.colorize(&format!("{:.1}", report.score), Color::Yellow),
            join_display(&report.explanation.role_categories)
        ));
        for bullet in &report.explanation.bullets {
            output.push_str(&format!("  • {}\n", bullet));
        }
        output
    }

    fn format_snapshot(&self, report: &SnapshotReport) -> String {
        let mut output = self.format_header("Region Snapshot", 1);
        output.push_str(&format!(
            "Candidates: {} (average salary {})\n",
            report.total_candidates,
            salary_text(report.pool_average_salary)
        ));
        output.push_str(&format!(
            "Shortlisted: {} (average salary {})\n\n",
            report.shortlist_count,
            salary_text(report.shortlist_average_salary)
        ));
        for entry in &report.regions {
            output.push_str(&format!(
                "  {:<8} {}\n",
                entry.region.as_str(),
                self.colorize(&entry.count.to_string(), Color::Cyan)
            ));
        }
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        Ok(match report {
            Report::Ranking(r) => self.format_ranking(r),
            Report::Shortlist(r) => self.format_shortlist(r),
            Report::Explanation(r) => self.format_explanation(r),
            Report::Snapshot(r) => self.format_snapshot(r),
        })
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn metadata_line(&self, metadata: &ReportMetadata) -> String {
        if !self.include_metadata {
            return String::new();
        }
        format!(
            "**Generated:** {} | **Source:** `{}`\n\n",
            metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            metadata.source_file
        )
    }

    fn format_ranking(&self, report: &RankingReport) -> String {
        let mut output = String::from("# Candidate Ranking\n\n");
        output.push_str(&self.metadata_line(&report.metadata));
        let (first, last) = report.page.showing();
        output.push_str(&format!(
            "Showing {}-{} of {} (page {} of {})\n\n",
            first, last, report.page.total_rows, report.page.number, report.page.page_count
        ));
        output.push_str("| # | Candidate | Score | Region | Salary | Categories |\n");
        output.push_str("|---|-----------|-------|--------|--------|------------|\n");
        for row in &report.rows {
            output.push_str(&format!(
                "| {} | {} | {:.1} | {} | {} | {} |\n",
                row.rank,
                row.label,
                row.score,
                row.region,
                salary_text(row.salary),
                join_display(&row.categories)
            ));
        }
        output
    }

    fn format_shortlist(&self, report: &ShortlistReport) -> String {
        let mut output = String::from("# Shortlist\n\n");
        output.push_str(&self.metadata_line(&report.metadata));
        for (i, entry) in report.entries.iter().enumerate() {
            output.push_str(&format!(
                "## {}. {}\n\n**Role group:** {} | **Score:** {:.1}\n\n",
                i + 1,
                entry.label,
                entry.role_group.as_deref().unwrap_or(MISSING),
                entry.score
            ));
            for bullet in &entry.explanation.bullets {
                output.push_str(&format!("- {}\n", bullet));
            }
            output.push('\n');
        }
        output.push_str("## Summary\n\n");
        output.push_str(&format!(
            "- **Average salary:** {}\n",
            salary_text(report.average_salary)
        ));
        if let Some(budget) = report.budget_avg {
            output.push_str(&format!("- **Budget:** ${}\n", thousands(budget)));
        }
        output.push_str(&format!(
            "- **Regions covered:** {}\n",
            report.regions_covered
        ));
        output
    }

    fn format_explanation(&self, report: &ExplanationReport) -> String {
        let mut output = format!("# {}\n\n", report.label);
        output.push_str(&self.metadata_line(&report.metadata));
        output.push_str(&format!(
            "**Score:** {:.1} | **Roles:** {}\n\n",
            report.score,
            join_display(&report.explanation.role_categories)
        ));
        for bullet in &report.explanation.bullets {
            output.push_str(&format!("- {}\n", bullet));
        }
        output
    }

    fn format_snapshot(&self, report: &SnapshotReport) -> String {
        let mut output = String::from("# Region Snapshot\n\n");
        output.push_str(&self.metadata_line(&report.metadata));
        output.push_str("| Region | Candidates |\n|--------|------------|\n");
        for entry in &report.regions {
            output.push_str(&format!("| {} | {} |\n", entry.region, entry.count));
        }
        output.push_str(&format!(
            "\n**Total:** {} | **Average salary:** {}\n",
            report.total_candidates,
            salary_text(report.pool_average_salary)
        ));
        output.push_str(&format!(
            "\n**Shortlisted:** {} | **Shortlist average salary:** {}\n",
            report.shortlist_count,
            salary_text(report.shortlist_average_salary)
        ));
        output
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        Ok(match report {
            Report::Ranking(r) => self.format_ranking(r),
            Report::Shortlist(r) => self.format_shortlist(r),
            Report::Explanation(r) => self.format_explanation(r),
            Report::Snapshot(r) => self.format_snapshot(r),
        })
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
        }
    }

    pub fn with_options(use_colors: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    pub fn generate_report(&self, report: &Report, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

/// Default export name, e.g. `hirepilot-shortlist-1718000000000.json`
pub fn suggest_export_filename() -> String {
    format!(
        "hirepilot-shortlist-{}.json",
        chrono::Utc::now().timestamp_millis()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::candidate::Candidate;
    use crate::processing::scorer::Weights;
    use serde_json::json;

    fn shortlist_report() -> Report {
        let candidates: Vec<Candidate> = serde_json::from_value(json!([
            {"name": "Ana", "skills": ["React"], "location": "London",
             "annual_salary_expectation": {"full-time": "$120,000"}}
        ]))
        .unwrap();
        Report::Shortlist(ShortlistReport::build(
            ReportMetadata::new("pool.json", false),
            &candidates,
            &Weights::new(),
            Some(100_000),
        ))
    }

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_console_without_colors() {
        let output = ConsoleFormatter::new(false)
            .format_report(&shortlist_report())
            .unwrap();
        assert!(output.contains("1. Ana (frontend)"));
        assert!(output.contains("  • Skills: React"));
        assert!(output.contains("Average salary: $120,000 (over $100,000 budget)"));
    }

    #[test]
    fn test_markdown_shortlist() {
        let output = MarkdownFormatter::new(false)
            .format_report(&shortlist_report())
            .unwrap();
        assert!(output.starts_with("# Shortlist\n\n## 1. Ana"));
        assert!(output.contains("- Region: EU  •  Expected salary: $120,000"));
        assert!(output.contains("- **Budget:** $100,000"));
    }

    #[test]
    fn test_markdown_snapshot_shows_shortlist() {
        let candidates: Vec<Candidate> = serde_json::from_value(json!([
            {"name": "Ana", "annual_salary_expectation": {"full-time": "$120,000"}},
            {"name": "Bo", "annual_salary_expectation": {"full-time": "$80,000"}}
        ]))
        .unwrap();
        let report = Report::Snapshot(SnapshotReport::build(
            ReportMetadata::new("pool.json", false),
            &candidates,
            &candidates[1..],
        ));
        let output = MarkdownFormatter::new(false).format_report(&report).unwrap();
        assert!(output.contains("**Total:** 2 | **Average salary:** $100,000"));
        assert!(output.contains("**Shortlisted:** 1 | **Shortlist average salary:** $80,000"));
    }

    #[test]
    fn test_generator_routes_json() {
        let output = ReportGenerator::with_options(false, false, false)
            .generate_report(&shortlist_report(), &OutputFormat::Json)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["kind"], "shortlist");
        assert_eq!(value["entries"][0]["label"], "Ana");
    }

    #[test]
    fn test_export_filename() {
        let name = suggest_export_filename();
        assert!(name.starts_with("hirepilot-shortlist-"));
        assert!(name.ends_with(".json"));
    }
}
