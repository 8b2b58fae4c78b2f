//! Environment variable pass-through configuration
//!
//! The cloud credentials and device filters are consumed by the test suites
//! themselves; the orchestrator only validates their presence and warns when
//! something is missing. No value is ever required here.

use std::env;
use tracing::warn;

/// Cloud endpoint URL consumed by both suites
pub const CLOUD_URL: &str = "CLOUD_URL";
/// Access credential for the testing cloud
pub const ACCESS_KEY: &str = "ACCESS_KEY";
/// Appium server version requested by the suites
pub const APPIUM_VERSION: &str = "APPIUM_VERSION";
/// Device selection filter for Android runs
pub const ANDROID_DEVICE_QUERY: &str = "ANDROID_DEVICE_QUERY";
/// Device selection filter for iOS runs
pub const IOS_DEVICE_QUERY: &str = "IOS_DEVICE_QUERY";

const ALL_VARS: [&str; 5] = [
    CLOUD_URL,
    ACCESS_KEY,
    APPIUM_VERSION,
    ANDROID_DEVICE_QUERY,
    IOS_DEVICE_QUERY,
];

/// Snapshot of the cloud-related environment variables.
#[derive(Clone, Debug, Default)]
pub struct CloudEnv {
    pub cloud_url: Option<String>,
    pub access_key: Option<String>,
    pub appium_version: Option<String>,
    pub android_device_query: Option<String>,
    pub ios_device_query: Option<String>,
}

impl CloudEnv {
    /// Load the current process environment.
    pub fn load() -> Self {
        Self {
            cloud_url: env::var(CLOUD_URL).ok(),
            access_key: env::var(ACCESS_KEY).ok(),
            appium_version: env::var(APPIUM_VERSION).ok(),
            android_device_query: env::var(ANDROID_DEVICE_QUERY).ok(),
            ios_device_query: env::var(IOS_DEVICE_QUERY).ok(),
        }
    }

    /// Names of variables that are not set.
    pub fn missing(&self) -> Vec<&'static str> {
        let values = [
            &self.cloud_url,
            &self.access_key,
            &self.appium_version,
            &self.android_device_query,
            &self.ios_device_query,
        ];

        ALL_VARS
            .iter()
            .zip(values)
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| *name)
            .collect()
    }

    /// Warn about missing variables. Suites fall back to their own defaults,
    /// so this never fails the run.
    pub fn warn_if_incomplete(&self) {
        let missing = self.missing();
        if !missing.is_empty() {
            warn!(
                "missing environment variables: {} - suites will use default values \
                 or may fail if cloud connectivity is required",
                missing.join(", ")
            );
        }
    }
}
