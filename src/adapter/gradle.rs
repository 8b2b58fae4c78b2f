//! Gradle/TestNG suite adapter
//!
//! Builds the `./gradlew test` invocation: fork count at the JVM level,
//! TestNG method-level parallelism, HTML report generation, suite manifest
//! selection, and the test-name filter.

use crate::config::Workspace;
use crate::models::{TestRunRequest, DEFAULT_TESTNG_SUITES};

use super::Invocation;

pub(super) fn invocation(request: &TestRunRequest, workspace: &Workspace) -> Invocation {
    let mut command: Vec<String> = ["./gradlew", "test", "--no-daemon"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    // Parallelism: maxForks at the Gradle/JVM level, methods at the TestNG
    // level.
    command.push(format!("-PmaxForks={}", request.fork_count));
    command.push("-Dtestng.parallel=methods".to_string());

    command.push("-Dtest.html.report=true".to_string());

    command.push(format!(
        "-Psuites={}",
        request.suites.as_deref().unwrap_or(DEFAULT_TESTNG_SUITES)
    ));

    if let Some(filter) = &request.filter {
        command.push("--tests".to_string());
        command.push(test_name_glob(filter));
    }

    Invocation {
        command,
        cwd: workspace.java_dir(),
    }
}

/// Map a filter keyword to a TestNG test-name glob.
///
/// Well-known keywords select the matching example suites; anything else is
/// wrapped verbatim as `*<keyword>*`. Total: every input yields a glob.
pub fn test_name_glob(filter: &str) -> String {
    match filter {
        "quickstart" => "*QuickStart*".to_string(),
        "advanced" => "*AdvancedCommands*".to_string(),
        "optional" => "*OptionalCapabilities*".to_string(),
        "android" => "*Android*".to_string(),
        "ios" => "*IOS*".to_string(),
        other => format!("*{other}*"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SuiteKind;

    fn command_for(request: &TestRunRequest) -> Vec<String> {
        invocation(request, &Workspace::new("/work")).command
    }

    #[test]
    fn test_base_command_shape() {
        let request = TestRunRequest::new(SuiteKind::Gradle).with_fork_count(4);
        let command = command_for(&request);

        assert_eq!(command[..3], ["./gradlew", "test", "--no-daemon"]);
        assert!(command.contains(&"-PmaxForks=4".to_string()));
        assert!(command.contains(&"-Dtestng.parallel=methods".to_string()));
        assert!(command.contains(&"-Dtest.html.report=true".to_string()));
        assert!(command.contains(&"-Psuites=testng.xml".to_string()));
    }

    #[test]
    fn test_suite_manifest_override() {
        let request = TestRunRequest::new(SuiteKind::Gradle).with_suites("smoke.xml");
        assert!(command_for(&request).contains(&"-Psuites=smoke.xml".to_string()));
    }

    #[test]
    fn test_working_directory_is_java_project() {
        let request = TestRunRequest::new(SuiteKind::Gradle);
        let invocation = invocation(&request, &Workspace::new("/work"));
        assert_eq!(invocation.cwd, std::path::PathBuf::from("/work/java"));
    }

    #[test]
    fn test_known_keyword_globs() {
        assert_eq!(test_name_glob("quickstart"), "*QuickStart*");
        assert_eq!(test_name_glob("advanced"), "*AdvancedCommands*");
        assert_eq!(test_name_glob("optional"), "*OptionalCapabilities*");
        assert_eq!(test_name_glob("android"), "*Android*");
        assert_eq!(test_name_glob("ios"), "*IOS*");
    }

    #[test]
    fn test_unknown_keyword_is_wrapped_verbatim() {
        assert_eq!(test_name_glob("foo"), "*foo*");
        assert_eq!(test_name_glob("Login.smoke"), "*Login.smoke*");
        assert_eq!(test_name_glob(""), "**");
    }

    #[test]
    fn test_filter_lands_after_tests_flag() {
        let request = TestRunRequest::new(SuiteKind::Gradle).with_filter("foo");
        let command = command_for(&request);
        let pos = command.iter().position(|a| a == "--tests").unwrap();
        assert_eq!(command[pos + 1], "*foo*");
    }

    #[test]
    fn test_no_filter_means_no_tests_flag() {
        let request = TestRunRequest::new(SuiteKind::Gradle);
        assert!(!command_for(&request).contains(&"--tests".to_string()));
    }
}
