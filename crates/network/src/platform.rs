//! Platform variant and host OS labels advertised in device metadata.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Platform/user-agent variant a linked device registers as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlatformType {
    Desktop,
    Mac,
    Android,
    AndroidPhone,
    AndroidTablet,
    IosPhone,
    IosCatalyst,
    Ipad,
    WearOs,
    Ie,
    Edge,
    Chrome,
    Safari,
    Firefox,
    Opera,
    Uwp,
    Aloha,
    TvTcl,
    Unknown,
}

impl PlatformType {
    /// Resolve a user-agent label from configuration.  Unrecognized labels
    /// map to `Unknown` rather than failing.
    pub fn from_label(label: &str) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "desktop" => Self::Desktop,
            "mac" => Self::Mac,
            "android" => Self::Android,
            "android-phone" => Self::AndroidPhone,
            "android-tablet" => Self::AndroidTablet,
            "ios-phone" => Self::IosPhone,
            "ios-catalyst" => Self::IosCatalyst,
            "ipad" => Self::Ipad,
            "wearos" => Self::WearOs,
            "ie" => Self::Ie,
            "edge" => Self::Edge,
            "chrome" => Self::Chrome,
            "safari" => Self::Safari,
            "firefox" => Self::Firefox,
            "opera" => Self::Opera,
            "uwp" => Self::Uwp,
            "aloha" => Self::Aloha,
            "tv-tcl" => Self::TvTcl,
            _ => Self::Unknown,
        }
    }
}

impl FromStr for PlatformType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_label(s))
    }
}

/// Operating-system label for the host this process runs on, as shown in
/// the counterpart's linked-devices list.
pub fn host_os_label() -> &'static str {
    match std::env::consts::OS {
        "windows" => "Windows",
        "macos" => "macOS",
        _ => "Linux",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels_resolve() {
        assert_eq!(PlatformType::from_label("chrome"), PlatformType::Chrome);
        assert_eq!(PlatformType::from_label("Firefox"), PlatformType::Firefox);
        assert_eq!(
            PlatformType::from_label("android-tablet"),
            PlatformType::AndroidTablet
        );
        assert_eq!(PlatformType::from_label("tv-tcl"), PlatformType::TvTcl);
    }

    #[test]
    fn unknown_label_is_unknown() {
        assert_eq!(PlatformType::from_label("netscape"), PlatformType::Unknown);
    }

    #[test]
    fn host_os_label_is_one_of_three() {
        assert!(["Windows", "macOS", "Linux"].contains(&host_os_label()));
    }
}
