use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

pub const FALLBACK_TITLE: &str = "Untitled video";

/// Best-effort label enrichment. Purely cosmetic: never fails, never blocks
/// job creation beyond its own short timeout.
#[async_trait]
pub trait TitleResolver: Send + Sync {
    async fn resolve(&self, source_url: &str) -> String;
}

pub struct HttpTitleResolver {
    client: reqwest::Client,
}

impl HttpTitleResolver {
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self { client }
    }
}

#[async_trait]
impl TitleResolver for HttpTitleResolver {
    async fn resolve(&self, source_url: &str) -> String {
        let page = match self.client.get(source_url).send().await {
            Ok(resp) => match resp.text().await {
                Ok(body) => body,
                Err(e) => {
                    debug!("title resolve: failed to read body for {}: {}", source_url, e);
                    return placeholder_title(source_url);
                }
            },
            Err(e) => {
                debug!("title resolve: request to {} failed: {}", source_url, e);
                return placeholder_title(source_url);
            }
        };

        extract_title(&page).unwrap_or_else(|| placeholder_title(source_url))
    }
}

/// Pulls the first `<title>` element out of an HTML document.
pub fn extract_title(html: &str) -> Option<String> {
    let open = html.find("<title")?;
    let rest = &html[open..];
    let start = rest.find('>')? + 1;
    let end = rest.find("</title")?;
    if end <= start {
        return None;
    }
    let title = decode_entities(rest[start..end].trim());
    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}

fn decode_entities(s: &str) -> String {
    s.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
}

/// Derives a readable label from the URL's last path segment, falling back
/// to a generic placeholder.
pub fn placeholder_title(source_url: &str) -> String {
    let segment = url::Url::parse(source_url).ok().and_then(|u| {
        u.path_segments()?
            .filter(|s| !s.is_empty())
            .next_back()
            .map(|s| s.to_string())
    });

    match segment {
        Some(seg) => {
            let stem = seg.rsplit_once('.').map(|(s, _)| s).unwrap_or(&seg);
            let pretty = stem.replace(['-', '_'], " ").trim().to_string();
            if pretty.is_empty() {
                FALLBACK_TITLE.to_string()
            } else {
                pretty
            }
        }
        None => FALLBACK_TITLE.to_string(),
    }
}
