//! HTML output format for attention reports
//!
//! Standalone page with embedded CSS: one summary table and one AOI
//! breakdown table per worker.

use crate::metrics::{format_value, PerformanceLevel};
use crate::report::{WorkerReport, NO_DATA_MESSAGE};

/// HTML report formatter
#[derive(Debug, Default)]
pub struct HtmlOutput {
    reports: Vec<WorkerReport>,
}

impl HtmlOutput {
    /// Create a new HTML output formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a worker report to the output
    pub fn add_report(&mut self, report: &WorkerReport) {
        self.reports.push(report.clone());
    }

    /// Escape HTML special characters to prevent XSS
    fn escape_html(text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&#39;")
    }

    /// Generate embedded CSS styles
    fn generate_styles() -> &'static str {
        r#"
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            margin: 20px;
            background-color: #f5f5f5;
        }
        h1, h2 {
            color: #333;
        }
        table {
            border-collapse: collapse;
            width: 100%;
            background-color: white;
            box-shadow: 0 1px 3px rgba(0,0,0,0.1);
            margin-bottom: 20px;
        }
        th, td {
            border: 1px solid #ddd;
            padding: 8px;
            text-align: left;
        }
        th {
            background-color: #4a90d9;
            color: white;
            font-weight: bold;
        }
        tr:nth-child(even) {
            background-color: #f9f9f9;
        }
        .value {
            font-family: monospace;
        }
        .level-efficient { color: #2e7d32; font-weight: bold; }
        .level-acceptable { color: #558b2f; font-weight: bold; }
        .level-needs-attention { color: #ef6c00; font-weight: bold; }
        .level-high-risk { color: #cc0000; font-weight: bold; }
        .aoi-table th {
            background-color: #5cb85c;
        }
        .warning {
            padding: 10px;
            background-color: #fff3cd;
            border: 1px solid #ffe08a;
        }
        .footer {
            margin-top: 20px;
            font-size: 0.8em;
            color: #888;
            text-align: center;
        }
        "#
    }

    fn level_class(level: PerformanceLevel) -> &'static str {
        match level {
            PerformanceLevel::Efficient => "level-efficient",
            PerformanceLevel::Acceptable => "level-acceptable",
            PerformanceLevel::NeedsAttention => "level-needs-attention",
            PerformanceLevel::HighRisk => "level-high-risk",
        }
    }

    fn metric_row(label: &str, value: &str) -> String {
        format!(
            "        <tr><td>{}</td><td class=\"value\">{}</td></tr>\n",
            label,
            Self::escape_html(value)
        )
    }

    /// Render one worker section
    fn render_report(report: &WorkerReport) -> String {
        let mut html = String::new();

        html.push_str(&format!(
            "    <h2>Summary for {}</h2>\n",
            Self::escape_html(&report.worker_id)
        ));

        let Some(metrics) = &report.metrics else {
            html.push_str(&format!(
                "    <p class=\"warning\">{}</p>\n",
                Self::escape_html(NO_DATA_MESSAGE)
            ));
            return html;
        };

        html.push_str("    <table>\n");
        html.push_str("        <tr><th>Metric</th><th>Value</th></tr>\n");
        html.push_str(&Self::metric_row(
            "AOI Coverage (%)",
            &format!("{:.2}", metrics.aoi_coverage),
        ));
        html.push_str(&Self::metric_row(
            "Average Fixation Duration (ms)",
            &format_value(metrics.avg_fixation_duration),
        ));
        html.push_str(&Self::metric_row(
            "Time to First Fixation (ms)",
            &format_value(metrics.time_to_first_fixation),
        ));
        html.push_str(&Self::metric_row(
            "Efficiency Score",
            &metrics.efficiency_score.to_string(),
        ));
        html.push_str(&format!(
            "        <tr><td>Performance Level</td><td class=\"{}\">{}</td></tr>\n",
            Self::level_class(metrics.performance_level),
            metrics.performance_level
        ));
        html.push_str("    </table>\n");

        html.push_str("    <table class=\"aoi-table\">\n");
        html.push_str("        <tr><th>AOI</th><th>Fixation (ms)</th></tr>\n");
        for (aoi, ms) in &report.fixation_by_aoi {
            html.push_str(&Self::metric_row(
                &Self::escape_html(aoi),
                &format!("{:.2}", ms),
            ));
        }
        html.push_str("    </table>\n");

        html
    }

    /// Generate complete HTML document
    pub fn to_html(&self) -> String {
        let mut html = String::new();

        html.push_str("<!DOCTYPE html>\n");
        html.push_str("<html lang=\"en\">\n");

        html.push_str("<head>\n");
        html.push_str("    <meta charset=\"UTF-8\">\n");
        html.push_str(
            "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        html.push_str("    <title>Gaze Attention Report</title>\n");
        html.push_str("    <style>");
        html.push_str(Self::generate_styles());
        html.push_str("</style>\n");
        html.push_str("</head>\n");

        html.push_str("<body>\n");
        html.push_str("    <h1>Eye-Tracking Worker Efficiency Report</h1>\n");

        for report in &self.reports {
            html.push_str(&Self::render_report(report));
        }

        html.push_str("    <div class=\"footer\">\n");
        html.push_str("        Generated by gazemetrics\n");
        html.push_str("    </div>\n");

        html.push_str("</body>\n");
        html.push_str("</html>\n");

        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MetricsRecord;
    use std::collections::BTreeMap;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            HtmlOutput::escape_html("<script>alert('x')</script>"),
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"
        );
        assert_eq!(HtmlOutput::escape_html("A & B"), "A &amp; B");
    }

    #[test]
    fn test_html_document_structure() {
        let html = HtmlOutput::new().to_html();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Gaze Attention Report</title>"));
        assert!(html.contains("<style>"));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_html_report_section() {
        let mut fixation_by_aoi = BTreeMap::new();
        fixation_by_aoi.insert("Instruction Label".to_string(), 50.0);
        fixation_by_aoi.insert("Outside".to_string(), 950.0);

        let mut output = HtmlOutput::new();
        output.add_report(&WorkerReport {
            worker_id: "<worker>".to_string(),
            samples: 2,
            metrics: Some(MetricsRecord {
                aoi_coverage: 5.0,
                avg_fixation_duration: Some(500.0),
                time_to_first_fixation: Some(500.0),
                efficiency_score: 15,
                performance_level: PerformanceLevel::HighRisk,
            }),
            fixation_by_aoi,
        });

        let html = output.to_html();
        assert!(html.contains("Summary for &lt;worker&gt;"));
        assert!(html.contains("<td class=\"level-high-risk\">High Risk</td>"));
        assert!(html.contains("<td>Instruction Label</td><td class=\"value\">50.00</td>"));
        assert!(html.contains("<td>AOI Coverage (%)</td><td class=\"value\">5.00</td>"));
    }

    #[test]
    fn test_html_no_data_warning() {
        let mut output = HtmlOutput::new();
        output.add_report(&WorkerReport {
            worker_id: "idle".to_string(),
            samples: 0,
            metrics: None,
            fixation_by_aoi: BTreeMap::new(),
        });

        let html = output.to_html();
        assert!(html.contains("class=\"warning\""));
        assert!(html.contains("No meaningful gaze data found in this file."));
    }
}
