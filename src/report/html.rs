//! HTML summary rendering
//!
//! Renders the run summary as a single self-contained HTML document with the
//! same fields as the structured sink, in stable order.

use std::fmt::Write;

use crate::models::RunSummary;

/// Render the summary document.
pub fn render_summary(summary: &RunSummary) -> String {
    let mut output = String::new();

    writeln!(output, "<!DOCTYPE html>").unwrap();
    writeln!(output, "<html>").unwrap();
    writeln!(output, "<head>").unwrap();
    writeln!(output, "    <title>Appium Test Summary</title>").unwrap();
    writeln!(output, "    <style>").unwrap();
    writeln!(output, "        body {{ font-family: Arial, sans-serif; margin: 40px; }}").unwrap();
    writeln!(output, "        .header {{ background: #f5f5f5; padding: 20px; border-radius: 5px; }}").unwrap();
    writeln!(output, "        .stats {{ display: flex; gap: 20px; margin: 20px 0; }}").unwrap();
    writeln!(output, "        .stat {{ padding: 15px; border-radius: 5px; text-align: center; min-width: 100px; }}").unwrap();
    writeln!(output, "        .passed {{ background: #d4edda; color: #155724; }}").unwrap();
    writeln!(output, "        .failed {{ background: #f8d7da; color: #721c24; }}").unwrap();
    writeln!(output, "        .total {{ background: #d1ecf1; color: #0c5460; }}").unwrap();
    writeln!(output, "        .results {{ margin-top: 30px; }}").unwrap();
    writeln!(output, "        .result {{ margin: 10px 0; padding: 15px; border-radius: 5px; }}").unwrap();
    writeln!(output, "        .success {{ background: #d4edda; }}").unwrap();
    writeln!(output, "        .failure {{ background: #f8d7da; }}").unwrap();
    writeln!(output, "    </style>").unwrap();
    writeln!(output, "</head>").unwrap();
    writeln!(output, "<body>").unwrap();

    writeln!(output, "    <div class=\"header\">").unwrap();
    writeln!(output, "        <h1>🧪 Appium Test Execution Summary</h1>").unwrap();
    writeln!(
        output,
        "        <p>Execution Time: {}</p>",
        summary.execution_time.format("%Y-%m-%d %H:%M:%S")
    )
    .unwrap();
    writeln!(output, "    </div>").unwrap();

    writeln!(output, "    <div class=\"stats\">").unwrap();
    stat_box(&mut output, "total", summary.total, "Total Test Suites");
    stat_box(&mut output, "passed", summary.passed, "Passed");
    stat_box(&mut output, "failed", summary.failed, "Failed");
    writeln!(output, "    </div>").unwrap();

    writeln!(output, "    <div class=\"results\">").unwrap();
    writeln!(output, "        <h2>Test Results</h2>").unwrap();
    writeln!(
        output,
        "        <p>Success Rate: {:.1}%</p>",
        summary.success_rate
    )
    .unwrap();

    for outcome in &summary.outcomes {
        let (class, icon, status) = if outcome.succeeded {
            ("success", "✅", "Passed")
        } else {
            ("failure", "❌", "Failed")
        };
        writeln!(output, "        <div class=\"result {class}\">").unwrap();
        writeln!(
            output,
            "            <h3>{icon} {} Tests</h3>",
            escape(outcome.request.kind.name())
        )
        .unwrap();
        writeln!(
            output,
            "            <p>Filter: {}</p>",
            escape(outcome.request.filter_or_all())
        )
        .unwrap();
        writeln!(output, "            <p>Status: {status}</p>").unwrap();
        writeln!(
            output,
            "            <p>Log: {}</p>",
            escape(&outcome.log_location)
        )
        .unwrap();
        if let Some(artifact_error) = &outcome.artifact_error {
            writeln!(
                output,
                "            <p>Report copy warning: {}</p>",
                escape(artifact_error)
            )
            .unwrap();
        }
        writeln!(output, "        </div>").unwrap();
    }

    writeln!(output, "    </div>").unwrap();
    writeln!(output, "</body>").unwrap();
    writeln!(output, "</html>").unwrap();

    output
}

fn stat_box(output: &mut String, class: &str, value: usize, label: &str) {
    writeln!(output, "        <div class=\"stat {class}\">").unwrap();
    writeln!(output, "            <h3>{value}</h3>").unwrap();
    writeln!(output, "            <p>{label}</p>").unwrap();
    writeln!(output, "        </div>").unwrap();
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RunOutcome, SuiteKind, TestRunRequest};

    fn summary() -> RunSummary {
        RunSummary::from_outcomes(vec![
            RunOutcome::completed(
                TestRunRequest::new(SuiteKind::Gradle).with_filter("quickstart"),
                true,
                "logs/gradle_tests_1.log",
            ),
            RunOutcome::completed(
                TestRunRequest::new(SuiteKind::Pytest),
                false,
                "logs/pytest_tests_1.log",
            ),
        ])
    }

    #[test]
    fn test_renders_counts_and_rate() {
        let html = render_summary(&summary());
        assert!(html.contains("Total Test Suites"));
        assert!(html.contains("Success Rate: 50.0%"));
        assert!(html.contains("logs/gradle_tests_1.log"));
        assert!(html.contains("Filter: quickstart"));
        assert!(html.contains("Filter: All"));
    }

    #[test]
    fn test_rendering_is_stable() {
        let summary = summary();
        assert_eq!(render_summary(&summary), render_summary(&summary));
    }

    #[test]
    fn test_log_text_is_escaped() {
        let summary = RunSummary::from_outcomes(vec![RunOutcome::failed(
            TestRunRequest::new(SuiteKind::Gradle),
            "spawn failed: <no such file>",
        )]);
        let html = render_summary(&summary);
        assert!(html.contains("&lt;no such file&gt;"));
        assert!(!html.contains("<no such file>"));
    }
}
