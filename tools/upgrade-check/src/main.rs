use std::path::Path;

use anyhow::{Context, Result};
use list_scraper::ListScraper;
use name_mapper::{JsonMappingStore, NameResolver, TokenSortMatcher};
use tracing::info;
use upgrade_core::{UpgradeAssistant, UpgradeReport};
use yahoo_roster::YahooRosterClient;

mod config;

use config::AssistantConfig;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.json".to_string());
    let config = AssistantConfig::load(&config_path)?;

    info!("Running upgrade check for league {}", config.yahoo.league_key);

    let cache_dir = Path::new(&config.cache_dir);
    std::fs::create_dir_all(cache_dir)
        .with_context(|| format!("failed to create cache dir {cache_dir:?}"))?;

    let store = JsonMappingStore::open(cache_dir.join("name_mappings.json"))
        .context("failed to open the name-mapping cache")?;
    let resolver = NameResolver::new(Box::new(TokenSortMatcher::new()), Box::new(store));

    let roster = YahooRosterClient::new(&config.yahoo.access_token, &config.yahoo.league_key)
        .context("failed to build the Yahoo client")?;
    let rankings = ListScraper::new(cache_dir).context("failed to build the rankings scraper")?;

    let mut assistant = UpgradeAssistant::new(Box::new(roster), Box::new(rankings), resolver);
    let report = assistant
        .run_check(config.match_threshold, config.rank_slack)
        .await
        .context("upgrade check failed")?;

    print_report(&report);
    Ok(())
}

fn print_report(report: &UpgradeReport) {
    println!("\nMy starting pitchers:");
    println!("{:<10} {:<24} {}", "Rank", "Pitcher", "Pos");
    println!("{}", "-".repeat(44));
    for starter in &report.my_starters {
        println!("{:<10} {:<24} {}", starter.rank.to_string(), starter.source_name, starter.position);
    }

    if report.recommendations.is_empty() {
        println!("\nNo upgrades available.");
    } else {
        println!("\nRecommended pickups:");
        println!("{:<10} {:<24} {:<8} {}", "Rank", "Pitcher", "Gain", "Drop for");
        println!("{}", "-".repeat(76));
        for rec in &report.recommendations {
            let drops: Vec<&str> =
                rec.drop_candidates.iter().map(|s| s.source_name.as_str()).collect();
            println!(
                "{:<10} {:<24} {:<8} {}",
                rec.candidate.rank.to_string(),
                rec.candidate.source_name,
                rec.rank_improvement,
                drops.join(", ")
            );
        }
    }

    if !report.is_complete() {
        println!("\nIncomplete steps:");
        for step in &report.incomplete {
            println!("  - {step}");
        }
    }

    println!(
        "\n{} rostered starters, {} available, {} recommendations",
        report.my_starters.len(),
        report.available_starters.len(),
        report.recommendations.len()
    );
}
