use clap::Parser;
use news_scraper::{ArticleRecord, ReducedChunks, ScrapeError, Scraper};

mod args;
use args::Args;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Pick up OPENAI_API_KEY and friends from .env before clap reads the environment
    news_scraper::load_env_file();

    // Parse command-line arguments
    let args = Args::parse();

    ::log::info!("Starting scrape of: {}", args.url);

    let scraper = match build_scraper(&args) {
        Ok(scraper) => scraper,
        Err(e) => {
            ::log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let start_time = std::time::Instant::now();

    if args.reduce_only {
        match scraper.reduce().await {
            Ok(reduced) => print_reduced(&reduced),
            Err(e) => fail(e),
        }
    } else {
        match scraper.run().await {
            Ok(records) => print_records(&records, args.json),
            Err(e) => fail(e),
        }
    }

    ::log::info!(
        "Scrape complete in {:.2} seconds",
        start_time.elapsed().as_secs_f64()
    );
}

/// Apply the config file first, then any command-line overrides
fn build_scraper(args: &Args) -> Result<Scraper, ScrapeError> {
    let mut scraper = Scraper::new(&args.url);

    if let Some(path) = &args.config {
        scraper = scraper.with_config_file(path)?;
    }
    if let Some(max_chunk_size) = args.max_chunk_size {
        scraper = scraper.with_max_chunk_size(max_chunk_size);
    }
    if let Some(model) = &args.model {
        scraper = scraper.with_model(model);
    }
    if let Some(api_base) = &args.api_base {
        scraper = scraper.with_api_base(api_base);
    }
    if let Some(api_key) = &args.api_key {
        scraper = scraper.with_api_key(api_key);
    }
    if let Some(fetcher) = args.fetcher {
        scraper = scraper.with_fetcher_kind(fetcher.into());
    }
    if let Some(webdriver_url) = &args.webdriver_url {
        scraper = scraper.with_webdriver_url(webdriver_url);
    }

    Ok(scraper)
}

fn print_reduced(reduced: &ReducedChunks) {
    for (i, chunk) in reduced.chunks.iter().enumerate() {
        println!("--- chunk {} ---", i + 1);
        println!("{}", chunk);
    }
    println!("--- {} links ---", reduced.links.len());
    for link in &reduced.links {
        println!("{}", link);
    }
}

fn print_records(records: &[ArticleRecord], json: bool) {
    if json {
        match serde_json::to_string_pretty(records) {
            Ok(rendered) => println!("{}", rendered),
            Err(e) => ::log::error!("Failed to render records as JSON: {}", e),
        }
    } else {
        for record in records {
            println!("{}", record);
        }
    }
    ::log::debug!("Printed {} records", records.len());
}

fn fail(e: ScrapeError) -> ! {
    ::log::error!("Scrape failed: {}", e);
    eprintln!("error: {}", e);
    std::process::exit(1);
}
