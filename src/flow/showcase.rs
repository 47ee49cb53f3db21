//! Feature buttons that require a session, and the local video selection
//! stub standing in for an upload endpoint.

use std::fmt;

pub const LOGIN_PROMPT: &str =
    "You need to be logged in to access this feature.\n\nClick OK to Log In or Cancel to Sign Up.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SocialProvider {
    Google,
    Facebook,
}

impl SocialProvider {
    #[must_use]
    pub fn placeholder_notice(self) -> String {
        format!("{self} Sign-In would be implemented here using OAuth")
    }
}

impl fmt::Display for SocialProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Google => f.write_str("Google"),
            Self::Facebook => f.write_str("Facebook"),
        }
    }
}

#[must_use]
pub fn coming_soon_notice(label: &str) -> String {
    format!(
        "{} feature will be available soon!\n\nThis feature is currently in development and will be implemented when the backend is ready.",
        label.trim()
    )
}

/// Metadata of a file picked for upload. Nothing is read or sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoFile {
    pub name: String,
    pub size_bytes: u64,
    pub mime_type: String,
}

impl VideoFile {
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn size_mb(&self) -> String {
        format!("{:.2}", self.size_bytes as f64 / (1024.0 * 1024.0))
    }

    #[must_use]
    pub fn selection_notice(&self) -> String {
        format!(
            "Video selected: {}\nSize: {} MB\n\nVideo upload functionality will be implemented when backend is ready.",
            self.name,
            self.size_mb()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_is_reported_in_mebibytes_with_two_decimals() {
        let video = VideoFile {
            name: "match.mp4".to_string(),
            size_bytes: 5 * 1024 * 1024 + 512 * 1024,
            mime_type: "video/mp4".to_string(),
        };
        assert_eq!(video.size_mb(), "5.50");
        assert!(video
            .selection_notice()
            .starts_with("Video selected: match.mp4\nSize: 5.50 MB"));
    }

    #[test]
    fn notices_use_the_button_label() {
        assert!(coming_soon_notice("  Shot Analysis ")
            .starts_with("Shot Analysis feature will be available soon!"));
        assert_eq!(
            SocialProvider::Facebook.placeholder_notice(),
            "Facebook Sign-In would be implemented here using OAuth"
        );
    }
}
