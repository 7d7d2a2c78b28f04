use std::io::{self, Write};
use std::time::Duration;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};

use comics_downloader::options::DEFAULT_CONCURRENCY;
use comics_downloader::{load_comic_from_source, DownloadError, Options};

/// Resolve comic issues from a supported site and print them as JSON
#[derive(Debug, Parser)]
#[command(version, about, long_about = "Resolve comic and manga issues from www.comicextra.com, www.mangatown.com, www.mangareader.net or readcomiconline.to and print their image links as JSON")]
pub struct Args {
    /// The link to the issue to start from
    #[arg(short, long)]
    pub url: String,

    /// Site host; inferred from the link when omitted
    #[arg(short, long)]
    pub source: Option<String>,

    /// Every issue of the series
    #[arg(short, long)]
    pub all: bool,

    /// Only the most recent issue of the series
    #[arg(short, long)]
    pub last: bool,

    /// Inclusive numeric range of issues, e.g. 5-7
    #[arg(short = 'r', long)]
    pub issues_range: Option<String>,

    /// Name to use instead of the one found on the site
    #[arg(short = 'n', long)]
    pub custom_comic_name: Option<String>,

    /// Output format for the download step
    #[arg(short, long, default_value = "pdf")]
    pub format: String,

    /// Image format for the download step
    #[arg(long, default_value = "jpg")]
    pub images_format: String,

    /// Output folder for the download step (default: the user's download directory)
    #[arg(short, long)]
    pub output_folder: Option<String>,

    /// Maximum number of pages fetched at once
    #[arg(short, long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,
}

impl Args {
    fn into_options(self) -> Result<Options, DownloadError> {
        let source = match self.source {
            Some(source) => source,
            None => url::Url::parse(&self.url)?
                .host_str()
                .map(str::to_string)
                .ok_or_else(|| DownloadError::InvalidUrl(format!("{} has no host", self.url)))?,
        };

        let output_folder = self.output_folder.unwrap_or_else(|| {
            dirs::download_dir()
                .unwrap_or_else(|| ".".into())
                .to_string_lossy()
                .into_owned()
        });

        Ok(Options {
            source,
            url: self.url,
            all: self.all,
            last: self.last,
            issues_range: self.issues_range.unwrap_or_default(),
            custom_comic_name: self.custom_comic_name.unwrap_or_default(),
            format: self.format,
            images_format: self.images_format,
            output_folder,
            images_only: false,
            concurrency: self.concurrency,
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), DownloadError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = Args::parse().into_options()?;
    info!("Source: {}", options.source);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋ ", "⠙ ", "⠹ ", "⠸ ", "⠼ ", "⠴ ", "⠦ ", "⠧ ", "⠇ ", "⠏ "]),
    );
    spinner.set_message(format!("Resolving issues from {}...", options.url));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let collection = match load_comic_from_source(&options).await {
        Ok(collection) => collection,
        Err(e) => {
            spinner.abandon_with_message(format!("✗ {}", e));
            return Err(e);
        }
    };
    spinner.finish_with_message(format!("✓ Resolved {} issue(s)", collection.len()));

    for comic in collection.iter().filter(|c| c.links.is_empty()) {
        warn!("{} {} has no images", comic.name, comic.issue_number);
    }

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &collection)?;
    writeln!(stdout)?;

    Ok(())
}
