//! Session configuration.
//!
//! The host application usually ships these values with its build flavor;
//! [`ReachConfig::from_json`] accepts a partial JSON object and fills in
//! defaults for anything missing.

use serde::{Deserialize, Serialize};

use crate::contacts::RegionHint;

/// Default minimum length of a typed-in invite number, `+` included.
pub const DEFAULT_MIN_CUSTOM_PHONE_LEN: usize = 8;

/// Default download link inserted into invite messages.
pub const DEFAULT_DOWNLOAD_URL: &str = "getcode.com/download";

/// Default invite message; `{url}` is replaced by the download link.
pub const DEFAULT_INVITE_TEMPLATE: &str = "Join me on Code! Download it here: {url}";

/// Configuration for a Reach session.
///
/// # Example
///
/// ```
/// use reach_core::ReachConfig;
/// use reach_core::contacts::RegionHint;
///
/// let config = ReachConfig::default()
///     .with_region(RegionHint::new(44))
///     .with_download_url("example.com/app");
///
/// assert_eq!(
///     config.invite_message(),
///     "Join me on Code! Download it here: example.com/app"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReachConfig {
    /// Typed-in numbers shorter than this are rejected without a remote call.
    pub min_custom_phone_len: usize,
    /// Download link inserted into invite messages.
    pub download_url: String,
    /// Invite message template.
    pub invite_message_template: String,
    /// Region used to interpret typed-in national numbers.
    pub region: Option<RegionHint>,
}

impl Default for ReachConfig {
    fn default() -> Self {
        Self {
            min_custom_phone_len: DEFAULT_MIN_CUSTOM_PHONE_LEN,
            download_url: DEFAULT_DOWNLOAD_URL.to_string(),
            invite_message_template: DEFAULT_INVITE_TEMPLATE.to_string(),
            region: None,
        }
    }
}

impl ReachConfig {
    /// Parses a configuration from JSON, defaulting missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not a valid configuration object.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Sets the region hint for typed-in numbers.
    #[must_use]
    pub fn with_region(mut self, region: RegionHint) -> Self {
        self.region = Some(region);
        self
    }

    /// Sets the download link.
    #[must_use]
    pub fn with_download_url(mut self, url: impl Into<String>) -> Self {
        self.download_url = url.into();
        self
    }

    /// Sets the invite message template.
    #[must_use]
    pub fn with_invite_template(mut self, template: impl Into<String>) -> Self {
        self.invite_message_template = template.into();
        self
    }

    /// Sets the minimum typed-in number length.
    #[must_use]
    pub fn with_min_custom_phone_len(mut self, len: usize) -> Self {
        self.min_custom_phone_len = len;
        self
    }

    /// Renders the invite message.
    #[must_use]
    pub fn invite_message(&self) -> String {
        self.invite_message_template
            .replace("{url}", &self.download_url)
    }
}
