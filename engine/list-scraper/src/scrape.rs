use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use scraper::{Html, Selector};
use tracing::{info, warn};
use upgrade_core::{ProviderError, RankingEntry, RankingsProvider};

use crate::cache::{self, ListSnapshot};

const PROVIDER: &str = "pitcher-list";
const BASE_URL: &str = "https://www.pitcherlist.com";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Scraper for The List, Pitcher List's weekly SP rankings
pub struct ListScraper {
    client: reqwest::Client,
    base_url: String,
    cache_dir: PathBuf,
}

impl ListScraper {
    /// Create a scraper that caches daily snapshots under `cache_dir`
    pub fn new(cache_dir: impl Into<PathBuf>) -> Result<Self, ProviderError> {
        let cache_dir = cache_dir.into();
        std::fs::create_dir_all(&cache_dir).map_err(|e| {
            ProviderError::unavailable(PROVIDER, format!("cannot create cache dir: {e}"))
        })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ProviderError::unavailable(PROVIDER, e.to_string()))?;

        Ok(Self { client, base_url: BASE_URL.to_string(), cache_dir })
    }

    async fn fetch_html(&self, url: &str) -> Result<String, ProviderError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ProviderError::unavailable(PROVIDER, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::unavailable(
                PROVIDER,
                format!("request to {url} failed with status {status}"),
            ));
        }

        response
            .text()
            .await
            .map_err(|e| ProviderError::bad_response(PROVIDER, e.to_string()))
    }

    /// Find the link to the most recent edition of The List
    async fn find_latest_list_url(&self) -> Result<String, ProviderError> {
        let url = format!("{}/category/fantasy/the-list", self.base_url);
        let html = self.fetch_html(&url).await?;

        let href = parse_latest_article_href(&html)?.ok_or_else(|| {
            ProviderError::bad_response(PROVIDER, "no article link found on the category page")
        })?;

        // Hrefs on the category page are usually absolute already
        let latest = if href.starts_with("http") {
            href
        } else {
            format!("{}{}", self.base_url, href)
        };

        info!("Found latest list article: {}", latest);
        Ok(latest)
    }

    async fn scrape_today(&self, today: &str) -> Result<ListSnapshot, ProviderError> {
        let article_url = self.find_latest_list_url().await?;
        let html = self.fetch_html(&article_url).await?;

        let entries = parse_rankings_table(&html)?;
        if entries.is_empty() {
            return Err(ProviderError::bad_response(
                PROVIDER,
                format!("no ranking rows parsed from {article_url}"),
            ));
        }

        info!("Scraped {} ranked pitchers from {}", entries.len(), article_url);
        Ok(ListSnapshot { date: today.to_string(), source_url: article_url, entries })
    }
}

#[async_trait]
impl RankingsProvider for ListScraper {
    async fn rankings(&self) -> Result<Vec<RankingEntry>, ProviderError> {
        let today = Utc::now().format("%Y-%m-%d").to_string();
        let path = cache::path_for(&self.cache_dir, &today);

        if let Some(snapshot) = cache::load(&path) {
            info!("Using cached rankings for {} ({} entries)", today, snapshot.entries.len());
            return Ok(snapshot.entries);
        }

        let snapshot = self.scrape_today(&today).await?;
        cache::store(&path, &snapshot);
        Ok(snapshot.entries)
    }

    fn name(&self) -> &str {
        PROVIDER
    }
}

fn selector(css: &str) -> Result<Selector, ProviderError> {
    Selector::parse(css)
        .map_err(|e| ProviderError::bad_response(PROVIDER, format!("bad selector '{css}': {e}")))
}

/// Pull the first article link out of the category page's title block
fn parse_latest_article_href(html: &str) -> Result<Option<String>, ProviderError> {
    let document = Html::parse_document(html);
    let title_selector = selector("div.title a")?;

    let href = document
        .select(&title_selector)
        .find_map(|a| a.value().attr("href"))
        .map(|h| h.to_string());

    Ok(href)
}

/// Parse the article's rankings table into entries.
///
/// Rows are shaped `rank | movement | pitcher | badge...`; any row whose
/// first cell is not a number (headers, section breaks) is skipped, and a
/// row with a rank but no recognizable name is logged and dropped.
fn parse_rankings_table(html: &str) -> Result<Vec<RankingEntry>, ProviderError> {
    let document = Html::parse_document(html);
    let row_selector = selector("table tr")?;
    let cell_selector = selector("td")?;

    let mut entries = Vec::new();
    for row in document.select(&row_selector) {
        let cells: Vec<String> = row
            .select(&cell_selector)
            .map(|c| c.text().collect::<String>().trim().to_string())
            .collect();

        if cells.len() < 2 {
            continue;
        }
        let Ok(rank) = cells[0].parse::<u32>() else {
            continue;
        };

        let Some(name_idx) = cells.iter().skip(1).position(|c| looks_like_name(c)).map(|i| i + 1)
        else {
            warn!("Skipping rank {} row: no pitcher name among {:?}", rank, cells);
            continue;
        };

        let badge = cells[name_idx + 1..]
            .iter()
            .find(|c| !c.is_empty())
            .cloned();

        entries.push(RankingEntry { rank, name: cells[name_idx].clone(), badge });
    }

    Ok(entries)
}

/// A pitcher name cell has at least two word-like tokens ("Tarik Skubal"),
/// which keeps movement markers like "+2", "NEW" or "—" out.
fn looks_like_name(cell: &str) -> bool {
    let word_tokens = cell
        .split_whitespace()
        .filter(|t| t.chars().all(|c| c.is_alphabetic() || matches!(c, '.' | ',' | '\'' | '-')))
        .filter(|t| t.chars().any(|c| c.is_alphabetic()))
        .count();
    word_tokens >= 2
}
