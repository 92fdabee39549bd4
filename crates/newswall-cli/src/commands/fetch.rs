use anyhow::Result;

use newswall_core::{AppConfig, HeadlineFetcher};

/// One-shot fetch: run a single cycle for one outlet and print the result
pub async fn run(config: &AppConfig, label: &str) -> Result<()> {
    let panel = config.panel_for_label(label)?;
    let fetcher = HeadlineFetcher::new(config)?;

    let articles = fetcher.fetch(&panel.endpoint).await?;

    if articles.is_empty() {
        println!("No {} news found.", panel.label);
        return Ok(());
    }

    println!("{} Latest News", panel.label);
    for (i, article) in articles.iter().enumerate() {
        match article.published_label() {
            Some(time) => println!("{:>3}. [{}] {}", i + 1, time, article.title),
            None => println!("{:>3}. {}", i + 1, article.title),
        }
        println!("     {}", article.link);
    }

    Ok(())
}
