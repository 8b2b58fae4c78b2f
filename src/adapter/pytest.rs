//! pytest suite adapter
//!
//! Builds the `uv run pytest` invocation: verbose output with short
//! tracebacks, a self-contained HTML report inside the shared reports area,
//! and keyword/marker test selection.

use crate::config::Workspace;
use crate::models::{SuiteKind, TestRunRequest};

use super::Invocation;

pub(super) fn invocation(request: &TestRunRequest, workspace: &Workspace) -> Invocation {
    let mut command: Vec<String> = ["uv", "run", "pytest", "-v", "--tb=short"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let html_report = workspace.report_subdir(SuiteKind::Pytest).join("report.html");
    command.push("--html".to_string());
    command.push(html_report.to_string_lossy().into_owned());
    command.push("--self-contained-html".to_string());

    if let Some(filter) = &request.filter {
        command.extend(selection_args(filter));
    }

    Invocation {
        command,
        cwd: workspace.python_dir(),
    }
}

/// Map a filter keyword to pytest selection flags.
///
/// "quickstart" becomes a substring match, the platform keywords select by
/// marker, and anything else is a substring match on the literal filter.
/// Total: every input yields a selection.
pub fn selection_args(filter: &str) -> Vec<String> {
    let (flag, value) = match filter {
        "quickstart" => ("-k", "quick_start"),
        "android" => ("-m", "android"),
        "ios" => ("-m", "ios"),
        other => ("-k", other),
    };
    vec![flag.to_string(), value.to_string()]
}
