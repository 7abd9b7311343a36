//! Static descriptor consumed by an external update checker.

use serde::Serialize;

pub const DISPLAY_NAME: &str = "Buildleds Plugin";
const GITHUB_USER: &str = "andyjduncan";
const GITHUB_REPO: &str = "OctoPrint-Buildleds";

/// Where to look for new releases and how to fetch them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateInfo {
    pub display_name: &'static str,
    pub display_version: &'static str,
    /// Version check method.
    #[serde(rename = "type")]
    pub check_type: &'static str,
    pub user: &'static str,
    pub repo: &'static str,
    pub current: &'static str,
    /// Archive URL; `{target_version}` is filled in by the checker.
    pub download_url: String,
}

impl UpdateInfo {
    /// Descriptor for this build.
    pub fn current() -> Self {
        let version = env!("CARGO_PKG_VERSION");
        UpdateInfo {
            display_name: DISPLAY_NAME,
            display_version: version,
            check_type: "github_release",
            user: GITHUB_USER,
            repo: GITHUB_REPO,
            current: version,
            download_url: format!(
                "https://github.com/{GITHUB_USER}/{GITHUB_REPO}/archive/{{target_version}}.zip"
            ),
        }
    }

    /// Download URL for a specific release.
    pub fn download_url_for(&self, target_version: &str) -> String {
        self.download_url.replace("{target_version}", target_version)
    }
}
