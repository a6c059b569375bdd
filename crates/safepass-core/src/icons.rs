//! Service icon lookup heuristics.
//!
//! Maps free-text service labels to a favicon URL: known services resolve
//! through a domain table, anything containing a dot is treated as a
//! domain, and everything else falls back to `<name>.com`.

const FAVICON_ENDPOINT: &str = "https://www.google.com/s2/favicons";

const SERVICE_DOMAINS: &[(&str, &str)] = &[
    // Social
    ("gmail", "gmail.com"),
    ("google", "google.com"),
    ("facebook", "facebook.com"),
    ("twitter", "twitter.com"),
    ("instagram", "instagram.com"),
    ("linkedin", "linkedin.com"),
    ("reddit", "reddit.com"),
    ("whatsapp", "whatsapp.com"),
    ("telegram", "telegram.org"),
    ("discord", "discord.com"),
    // Streaming
    ("netflix", "netflix.com"),
    ("spotify", "spotify.com"),
    ("youtube", "youtube.com"),
    ("amazon", "amazon.com"),
    ("twitch", "twitch.tv"),
    // Tech
    ("apple", "apple.com"),
    ("icloud", "icloud.com"),
    ("microsoft", "microsoft.com"),
    ("outlook", "outlook.com"),
    ("github", "github.com"),
    ("gitlab", "gitlab.com"),
    ("dropbox", "dropbox.com"),
    ("notion", "notion.so"),
    ("slack", "slack.com"),
    ("zoom", "zoom.us"),
    ("figma", "figma.com"),
    // Finance
    ("paypal", "paypal.com"),
    ("stripe", "stripe.com"),
    ("coinbase", "coinbase.com"),
];

/// Resolve a favicon URL for a service label.
#[must_use]
pub fn service_icon_url(service: &str) -> String {
    let service_lower = service.trim().to_lowercase();

    for (key, domain) in SERVICE_DOMAINS {
        if service_lower.contains(key) {
            return favicon_url(domain);
        }
    }

    if service_lower.contains('.') {
        return favicon_url(&service_lower);
    }

    favicon_url(&format!("{service_lower}.com"))
}

fn favicon_url(domain: &str) -> String {
    format!("{FAVICON_ENDPOINT}?domain={domain}&sz=64")
}
