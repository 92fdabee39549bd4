use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// One headline as returned by the backend's `news` array.
///
/// Immutable once received; list order is display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub title: String,
    pub link: String,
    /// Publication timestamp (`publishedAt` upstream). Optional: older
    /// backend versions omit it, and display never depends on it.
    #[serde(
        default,
        rename = "publishedAt",
        skip_serializing_if = "Option::is_none"
    )]
    pub published_at: Option<DateTime<Utc>>,
}

impl ArticleSummary {
    /// Short clock label for the publication time, if known.
    pub fn published_label(&self) -> Option<String> {
        self.published_at
            .map(|dt| dt.format("%H:%M").to_string())
    }
}

/// Response envelope of a headline endpoint: a JSON object whose `news`
/// field holds the ordered article list.
#[derive(Debug, Deserialize)]
pub struct HeadlineResponse {
    pub news: Vec<ArticleSummary>,
}

/// A panel's immutable identity: what it is called and where it polls.
#[derive(Debug, Clone)]
pub struct PanelConfig {
    pub label: String,
    pub endpoint: Url,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_news_array_preserves_order() {
        let body = r#"{"news":[
            {"title":"B","link":"http://example.com/b"},
            {"title":"A","link":"http://example.com/a"},
            {"title":"C","link":"http://example.com/c"}
        ]}"#;

        let response: HeadlineResponse = serde_json::from_str(body).unwrap();
        let titles: Vec<&str> = response.news.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_parse_empty_news_array() {
        let response: HeadlineResponse = serde_json::from_str(r#"{"news":[]}"#).unwrap();
        assert!(response.news.is_empty());
    }

    #[test]
    fn test_missing_news_field_is_an_error() {
        let result = serde_json::from_str::<HeadlineResponse>(r#"{"articles":[]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_published_at_is_optional() {
        let with: ArticleSummary = serde_json::from_str(
            r#"{"title":"A","link":"http://x","publishedAt":"2025-06-01T12:34:00Z"}"#,
        )
        .unwrap();
        assert_eq!(with.published_label().as_deref(), Some("12:34"));

        let without: ArticleSummary =
            serde_json::from_str(r#"{"title":"A","link":"http://x"}"#).unwrap();
        assert_eq!(without.published_label(), None);
    }
}
