//! Human-readable output: the HTML report and the console summary.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};
use common::{display_host, NewJob};
use html_escape::{encode_double_quoted_attribute, encode_text};
use tracing::info;

use crate::aggregator::RunReport;

const STYLE: &str = r#"
    body { font-family: Arial, sans-serif; line-height: 1.6; max-width: 1200px; margin: 0 auto; padding: 20px; }
    h1, h2, h3 { color: #333; }
    .company { margin-bottom: 30px; border-bottom: 1px solid #eee; padding-bottom: 20px; }
    .job { margin-bottom: 15px; padding: 15px; border-radius: 5px; }
    .new-job { background-color: #e6f7e6; border-left: 4px solid #28a745; }
    .regular-job { background-color: #f8f9fa; }
    .job-title { font-weight: bold; font-size: 18px; margin-bottom: 5px; }
    .job-location { color: #666; margin-bottom: 10px; }
    .job-link { display: inline-block; background-color: #007bff; color: white; padding: 5px 10px; text-decoration: none; border-radius: 3px; }
    .job-link:hover { background-color: #0056b3; }
    .summary { background-color: #f8f9fa; padding: 15px; border-radius: 5px; margin-bottom: 20px; }
    .new-jobs-section { margin-bottom: 30px; }
    .timestamp { color: #666; font-style: italic; margin-top: 5px; }
    .error { color: red; }
"#;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Renders the whole run as a standalone HTML page.
pub fn render_html(report: &RunReport, generated_at: DateTime<Utc>) -> String {
    let mut html = String::new();
    // Writing into a String cannot fail.
    let _ = write_document(&mut html, report, generated_at);
    html
}

fn write_document(out: &mut String, report: &RunReport, generated_at: DateTime<Utc>) -> std::fmt::Result {
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html lang=\"en\">\n<head>")?;
    writeln!(out, "  <meta charset=\"UTF-8\">")?;
    writeln!(out, "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">")?;
    writeln!(out, "  <title>Job Search Results</title>")?;
    writeln!(out, "  <style>{STYLE}  </style>\n</head>\n<body>")?;
    writeln!(out, "  <h1>Job Search Results</h1>")?;
    writeln!(
        out,
        "  <div class=\"timestamp\">Last updated: {}</div>",
        generated_at.format(TIME_FORMAT)
    )?;

    writeln!(out, "  <div class=\"summary\">\n    <h2>Summary</h2>")?;
    writeln!(
        out,
        "    <p>Checked {} career sites and found {} matching jobs.</p>",
        report.snapshot.len(),
        report.total_jobs()
    )?;
    if report.new_jobs.is_empty() {
        writeln!(out, "    <p>No new jobs found in this run.</p>")?;
    } else {
        writeln!(out, "    <p>🎉 Found {} new matching jobs!</p>", report.new_jobs.len())?;
    }
    writeln!(out, "  </div>")?;

    if !report.new_jobs.is_empty() {
        writeln!(out, "  <div class=\"new-jobs-section\">\n    <h2>New Jobs</h2>")?;
        for job in &report.new_jobs {
            write_new_job(out, job)?;
        }
        writeln!(out, "  </div>")?;
    }

    writeln!(out, "  <h2>All Matching Jobs</h2>")?;
    for site in &report.snapshot {
        writeln!(out, "  <div class=\"company\">")?;
        writeln!(out, "    <h3>{}</h3>", encode_text(&display_host(&site.career_url)))?;
        writeln!(
            out,
            "    <p>Career URL: <a href=\"{}\" target=\"_blank\">{}</a></p>",
            encode_double_quoted_attribute(&site.career_url),
            encode_text(&site.career_url)
        )?;
        writeln!(out, "    <p>Last checked: {}</p>", site.last_checked.format(TIME_FORMAT))?;
        if let Some(error) = &site.error {
            writeln!(out, "    <p class=\"error\">Error: {}</p>", encode_text(error))?;
        }
        if site.jobs.is_empty() {
            writeln!(out, "    <p>No matching jobs found</p>")?;
        }
        for job in &site.jobs {
            let is_new = report.is_new(&job.link);
            writeln!(
                out,
                "    <div class=\"job {}\">",
                if is_new { "new-job" } else { "regular-job" }
            )?;
            writeln!(
                out,
                "      <div class=\"job-title\">{}{}</div>",
                encode_text(&job.title),
                if is_new { " (NEW)" } else { "" }
            )?;
            if !job.location.is_empty() {
                writeln!(out, "      <div class=\"job-location\">Location: {}</div>", encode_text(&job.location))?;
            }
            writeln!(
                out,
                "      <a href=\"{}\" target=\"_blank\" class=\"job-link\">View Job</a>",
                encode_double_quoted_attribute(&job.link)
            )?;
            writeln!(out, "    </div>")?;
        }
        writeln!(out, "  </div>")?;
    }

    writeln!(out, "</body>\n</html>")
}

fn write_new_job(out: &mut String, job: &NewJob) -> std::fmt::Result {
    writeln!(out, "    <div class=\"job new-job\">")?;
    writeln!(out, "      <div class=\"job-title\">{}</div>", encode_text(&job.listing.title))?;
    write!(out, "      <div class=\"job-location\">Company: {}", encode_text(&job.company))?;
    if !job.listing.location.is_empty() {
        write!(out, " | Location: {}", encode_text(&job.listing.location))?;
    }
    writeln!(out, "</div>")?;
    writeln!(
        out,
        "      <a href=\"{}\" target=\"_blank\" class=\"job-link\">View Job</a>",
        encode_double_quoted_attribute(&job.listing.link)
    )?;
    writeln!(out, "    </div>")
}

/// Renders the report and overwrites `path` with it.
pub fn write_html(report: &RunReport, path: &Path) -> anyhow::Result<()> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    }
    fs::write(path, render_html(report, Utc::now()))
        .with_context(|| format!("failed to write report {}", path.display()))?;
    info!("HTML report generated: {}", path.display());
    Ok(())
}

/// The end-of-run console text listing every new job.
pub fn console_summary(new_jobs: &[NewJob]) -> String {
    if new_jobs.is_empty() {
        return "No new jobs found matching your criteria.\n".to_string();
    }

    let mut out = String::from("🎉 NEW JOBS FOUND! 🎉\n---------------------\n");
    for (index, job) in new_jobs.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", index + 1, job.listing.title));
        out.push_str(&format!("   Company: {}\n", job.company));
        if !job.listing.location.is_empty() {
            out.push_str(&format!("   Location: {}\n", job.listing.location));
        }
        out.push_str(&format!("   Link: {}\n\n", job.listing.link));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{JobListing, SiteResult};

    fn sample_report() -> RunReport {
        let fresh = JobListing::new("Product Manager <Payments>", "Amsterdam", "https://www.acme.test/jobs/2");
        let old = JobListing::new("Program Manager", "", "https://www.acme.test/jobs/1");
        RunReport {
            snapshot: vec![
                SiteResult::success("https://www.acme.test/careers", vec![old, fresh.clone()]),
                SiteResult::failure("https://www.epam.com/careers", "Access denied by website"),
            ],
            new_jobs: vec![NewJob::from_listing(fresh, "https://www.acme.test/careers")],
        }
    }

    #[test]
    fn test_summary_counts() {
        let html = render_html(&sample_report(), Utc::now());
        assert!(html.contains("Checked 2 career sites and found 2 matching jobs."));
        assert!(html.contains("Found 1 new matching jobs!"));
    }

    #[test]
    fn test_new_jobs_are_marked() {
        let html = render_html(&sample_report(), Utc::now());
        assert!(html.contains("<h2>New Jobs</h2>"));
        assert!(html.contains("Company: acme | Location: Amsterdam"));
        assert!(html.contains("Product Manager &lt;Payments&gt; (NEW)"));
        assert!(html.contains("Program Manager</div>"));
        assert_eq!(html.matches("job new-job").count(), 2);
        assert_eq!(html.matches("job regular-job").count(), 1);
    }

    #[test]
    fn test_links_and_text_are_escaped() {
        let job = JobListing::new("R&D <Lead>", "", "https://x.test/jobs?id=1&q=\"pm\"");
        let report = RunReport {
            snapshot: vec![SiteResult::success("https://x.test/careers?a=1&b=2", vec![job])],
            new_jobs: vec![],
        };
        let html = render_html(&report, Utc::now());
        assert!(html.contains("href=\"https://x.test/jobs?id=1&amp;q=&quot;pm&quot;\""));
        assert!(html.contains("R&amp;D &lt;Lead&gt;</div>"));
        assert!(html.contains(">https://x.test/careers?a=1&amp;b=2</a>"));
    }

    #[test]
    fn test_error_site_rendered() {
        let html = render_html(&sample_report(), Utc::now());
        assert!(html.contains("<h3>epam.com</h3>"));
        assert!(html.contains("Error: Access denied by website"));
        assert!(html.contains("No matching jobs found"));
    }

    #[test]
    fn test_no_new_jobs_section_when_nothing_new() {
        let mut report = sample_report();
        report.new_jobs.clear();
        let html = render_html(&report, Utc::now());
        assert!(!html.contains("<h2>New Jobs</h2>"));
        assert!(html.contains("No new jobs found in this run."));
        assert!(!html.contains("(NEW)"));
    }

    #[test]
    fn test_console_summary() {
        let report = sample_report();
        let text = console_summary(&report.new_jobs);
        assert!(text.starts_with("🎉 NEW JOBS FOUND! 🎉"));
        assert!(text.contains("1. Product Manager <Payments>\n   Company: acme\n   Location: Amsterdam\n"));
        assert!(text.contains("   Link: https://www.acme.test/jobs/2"));
        assert_eq!(console_summary(&[]), "No new jobs found matching your criteria.\n");
    }
}
