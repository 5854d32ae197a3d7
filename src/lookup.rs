//! Minimal MediaWiki Action API client.
//!
//! Only the four lookups the searcher needs: category members, plain-text
//! intros, full-text title search and rendered section HTML.

use crate::error::Result;
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

pub const USER_AGENT: &str = "BritishDaysBot/1.0 (Educational Language Learning App)";
const CATEGORY_PAGE_SIZE: &str = "50";
const SEARCH_PAGE_SIZE: &str = "20";

/// One page of category members plus the token for the next page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryPage {
    pub titles: Vec<String>,
    pub next: Option<String>,
}

// --- Response shapes ---

#[derive(Debug, Deserialize)]
struct QueryResponse<Q> {
    query: Option<Q>,
    #[serde(rename = "continue")]
    continuation: Option<Continuation>,
}

#[derive(Debug, Deserialize)]
struct Continuation {
    cmcontinue: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TitleEntry {
    title: String,
}

#[derive(Debug, Deserialize)]
struct CategoryMembers {
    #[serde(default)]
    categorymembers: Vec<TitleEntry>,
}

#[derive(Debug, Deserialize)]
struct SearchHits {
    #[serde(default)]
    search: Vec<TitleEntry>,
}

#[derive(Debug, Deserialize)]
struct Pages {
    #[serde(default)]
    pages: HashMap<String, PageExtract>,
}

#[derive(Debug, Deserialize)]
struct PageExtract {
    #[serde(default)]
    extract: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ParseResponse {
    parse: Option<ParsedPage>,
}

#[derive(Debug, Deserialize)]
struct ParsedPage {
    text: Option<ParsedText>,
}

#[derive(Debug, Deserialize)]
struct ParsedText {
    #[serde(rename = "*")]
    html: String,
}

/// HTTP client shared by all MediaWiki sources.
#[derive(Clone)]
pub struct MediaWikiClient {
    http: Client,
}

impl MediaWikiClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(MediaWikiClient { http })
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        debug!("GET {} {:?}", endpoint, params);
        let response = self
            .http
            .get(endpoint)
            .query(params)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<T>().await?)
    }

    /// Lists article titles in `category`, starting at `continue_from`.
    pub async fn category_members(
        &self,
        endpoint: &str,
        category: &str,
        continue_from: Option<&str>,
    ) -> Result<CategoryPage> {
        let mut params = vec![
            ("action", "query"),
            ("format", "json"),
            ("list", "categorymembers"),
            ("cmtitle", category),
            ("cmlimit", CATEGORY_PAGE_SIZE),
            ("cmtype", "page"),
        ];
        if let Some(token) = continue_from {
            params.push(("cmcontinue", token));
        }
        let response: QueryResponse<CategoryMembers> = self.get_json(endpoint, &params).await?;
        Ok(CategoryPage {
            titles: response
                .query
                .map(|q| q.categorymembers.into_iter().map(|m| m.title).collect())
                .unwrap_or_default(),
            next: response.continuation.and_then(|c| c.cmcontinue),
        })
    }

    /// Plain-text intro of the article `title`, if it has one.
    pub async fn page_extract(&self, endpoint: &str, title: &str) -> Result<Option<String>> {
        let params = [
            ("action", "query"),
            ("format", "json"),
            ("titles", title),
            ("prop", "extracts"),
            ("exintro", "1"),
            ("explaintext", "1"),
        ];
        let response: QueryResponse<Pages> = self.get_json(endpoint, &params).await?;
        Ok(response
            .query
            .and_then(|q| q.pages.into_values().find_map(|p| p.extract))
            .filter(|e| !e.trim().is_empty()))
    }

    /// Full-text search over article titles in the main namespace.
    pub async fn search_titles(&self, endpoint: &str, query: &str) -> Result<Vec<String>> {
        let params = [
            ("action", "query"),
            ("format", "json"),
            ("list", "search"),
            ("srsearch", query),
            ("srlimit", SEARCH_PAGE_SIZE),
            ("srnamespace", "0"),
        ];
        let response: QueryResponse<SearchHits> = self.get_json(endpoint, &params).await?;
        Ok(response
            .query
            .map(|q| q.search.into_iter().map(|h| h.title).collect())
            .unwrap_or_default())
    }

    /// Rendered HTML of section 0 of `page`.
    pub async fn section_html(&self, endpoint: &str, page: &str) -> Result<Option<String>> {
        let params = [
            ("action", "parse"),
            ("format", "json"),
            ("page", page),
            ("prop", "text"),
            ("section", "0"),
        ];
        let response: ParseResponse = self.get_json(endpoint, &params).await?;
        Ok(response.parse.and_then(|p| p.text).map(|t| t.html))
    }
}
