//! Result sharing
//!
//! Builds deep links for the supported share targets. The native share sheet
//! is offered by the page script; these links are always rendered alongside it.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SharePlatform {
    Facebook,
    Twitter,
    LinkedIn,
    WhatsApp,
    Telegram,
}

impl SharePlatform {
    pub const ALL: [SharePlatform; 5] = [
        SharePlatform::Facebook,
        SharePlatform::Twitter,
        SharePlatform::LinkedIn,
        SharePlatform::WhatsApp,
        SharePlatform::Telegram,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SharePlatform::Facebook => "Facebook",
            SharePlatform::Twitter => "Twitter / X",
            SharePlatform::LinkedIn => "LinkedIn",
            SharePlatform::WhatsApp => "WhatsApp",
            SharePlatform::Telegram => "Telegram",
        }
    }

    /// Platform share URL with `title`, `text` and `url` percent-encoded
    pub fn link(&self, request: &ShareRequest) -> String {
        let title = urlencoding::encode(&request.title);
        let text = urlencoding::encode(&request.text);
        let url = urlencoding::encode(&request.url);
        match self {
            SharePlatform::Facebook => {
                format!("https://www.facebook.com/sharer/sharer.php?u={url}&quote={text}")
            }
            SharePlatform::Twitter => {
                format!("https://twitter.com/intent/tweet?text={text}&url={url}")
            }
            SharePlatform::LinkedIn => format!(
                "https://www.linkedin.com/shareArticle?mini=true&url={url}&title={title}&summary={text}"
            ),
            SharePlatform::WhatsApp => {
                let message = urlencoding::encode(&format!("{}\n{}", request.text, request.url))
                    .into_owned();
                format!("https://wa.me/?text={message}")
            }
            SharePlatform::Telegram => {
                format!("https://t.me/share/url?url={url}&text={text}")
            }
        }
    }
}

/// What is being shared
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShareRequest {
    pub title: String,
    pub text: String,
    pub url: String,
}

impl ShareRequest {
    pub fn new(title: impl Into<String>, text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            url: url.into(),
        }
    }

    pub fn links(&self) -> Vec<ShareLink> {
        SharePlatform::ALL
            .iter()
            .map(|platform| ShareLink {
                platform: *platform,
                label: platform.label(),
                href: platform.link(self),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShareLink {
    pub platform: SharePlatform,
    pub label: &'static str,
    pub href: String,
}

/// Deep links for every supported platform
pub fn share_links(title: &str, text: &str, url: &str) -> Vec<ShareLink> {
    ShareRequest::new(title, text, url).links()
}
