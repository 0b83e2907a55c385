//! Page fetching and content extraction.
//!
//! A fetch never fails outward: every outcome is a [`PageRecord`], with
//! failures carrying a specific reason in their status. The caller decides
//! what to do with failed pages (the digest builder drops them).

use std::time::Duration;

use chrono::Utc;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};
use url::Url;

use crate::config::FetchConfig;
use crate::types::{FetchStatus, PageRecord, Result, WebloomError};
use crate::web::clean::TextCleaner;

/// Content containers tried in order before falling back to the whole body
const PRIORITY_SELECTORS: &[&str] = &[
    "main",
    "article",
    ".content",
    ".main-content",
    "#content",
    ".post-content",
    ".entry-content",
];

/// Subtrees skipped during text extraction
const SKIP_TAGS: &[&str] = &[
    "script", "style", "nav", "header", "footer", "aside", "noscript", "iframe", "form", "button",
];

/// Fetches pages and extracts their readable text
pub struct PageFetcher {
    client: reqwest::Client,
    cleaner: TextCleaner,
    priority: Vec<Selector>,
    max_content_chars: usize,
    timeout_secs: u64,
}

impl PageFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| WebloomError::Config(format!("HTTP client setup failed: {e}")))?;

        let priority = PRIORITY_SELECTORS
            .iter()
            .map(|s| Selector::parse(s).expect("static selector"))
            .collect();

        Ok(Self {
            client,
            cleaner: TextCleaner::new(),
            priority,
            max_content_chars: config.max_content_chars,
            timeout_secs: config.timeout_secs,
        })
    }

    /// Fetch one URL and extract title, description, and cleaned body text.
    ///
    /// Any failure (transport, timeout, HTTP status) is recorded in the
    /// returned record's status, never raised.
    pub async fn fetch(&self, url: &str) -> PageRecord {
        debug!(url, "Fetching page");

        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(url, error = %e, "Invalid URL");
                return PageRecord::failed(url, format!("invalid url: {e}"));
            }
        };

        let response = match self.client.get(parsed).send().await {
            Ok(resp) => resp,
            Err(e) if e.is_timeout() => {
                warn!(url, "Fetch timed out");
                return PageRecord::failed(url, format!("timeout after {}s", self.timeout_secs));
            }
            Err(e) if e.is_connect() => {
                warn!(url, error = %e, "Connection failed");
                return PageRecord::failed(url, format!("connection error: {e}"));
            }
            Err(e) => {
                warn!(url, error = %e, "Request failed");
                return PageRecord::failed(url, format!("request error: {e}"));
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(url, status = status.as_u16(), "Non-success HTTP status");
            return PageRecord::failed(url, format!("http status {}", status.as_u16()));
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(url, error = %e, "Failed to read response body");
                return PageRecord::failed(url, format!("body read error: {e}"));
            }
        };

        let extracted = self.extract(&body);
        let cleaned = self.cleaner.clean(&extracted.main_text);
        let capped: String = cleaned.chars().take(self.max_content_chars).collect();

        if capped.is_empty() && extracted.description.is_empty() {
            warn!(url, "Page yielded no extractable text");
            return PageRecord::failed(url, "no extractable text");
        }

        PageRecord {
            url: url.to_string(),
            title: extracted.title,
            description: extracted.description,
            cleaned_text: capped,
            status: FetchStatus::Success,
            fetched_at: Utc::now(),
        }
    }

    /// Parse the document and pull out title, meta description, and the text
    /// under the best available content container.
    fn extract(&self, body: &str) -> ExtractedContent {
        let document = Html::parse_document(body);

        let title = Selector::parse("title")
            .ok()
            .and_then(|sel| document.select(&sel).next())
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        let description = Selector::parse(r#"meta[name="description"]"#)
            .ok()
            .and_then(|sel| document.select(&sel).next())
            .and_then(|el| el.value().attr("content"))
            .map(|s| s.trim().to_string())
            .unwrap_or_default();

        let mut main_text = String::new();
        for selector in &self.priority {
            if let Some(element) = document.select(selector).next() {
                collect_text(element, &mut main_text);
                break;
            }
        }
        if main_text.is_empty() {
            let root = Selector::parse("body")
                .ok()
                .and_then(|sel| document.select(&sel).next());
            match root {
                Some(body_el) => collect_text(body_el, &mut main_text),
                None => main_text = document.root_element().text().collect(),
            }
        }

        ExtractedContent {
            title,
            description,
            main_text,
        }
    }
}

struct ExtractedContent {
    title: String,
    description: String,
    main_text: String,
}

/// Depth-first text extraction that skips non-content subtrees
fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            scraper::Node::Text(text) => {
                out.push_str(&text.text);
                out.push('\n');
            }
            scraper::Node::Element(el) => {
                if SKIP_TAGS.contains(&el.name()) {
                    continue;
                }
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_text(child_el, out);
                }
            }
            _ => {}
        }
    }
}
