use anyhow::{Context, Result};
use clap::Parser;
use ghsite::{
    catalog::{self, CatalogSource, CategoryFilter, Filter},
    changelog::{self, PageLocation, StdoutClipboard, SystemClipboard},
    config::{Config, DEFAULT_REPO},
    markdown,
    provider::RepoId,
    release_info,
    runtime::{RealRuntime, Runtime},
    site::{self, SiteInputs},
};
use log::info;
use std::io::Read;
use std::path::PathBuf;

/// ghsite - release pages for a downloadable tool
///
/// Renders the download panel, the changelog and the update catalog of the
/// project website as HTML fragments.
///
/// If the GITHUB_TOKEN environment variable is set, it will be used for authentication.
///
/// Examples:
///   ghsite changelog --page https://example.com/whatsnew.html
///   ghsite updates updates.json --category agi --search drag
#[derive(Parser, Debug)]
#[command(author, version = env!("GHSITE_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// The GitHub repository in the format "owner/repo"
    #[arg(
        long,
        env = "GHSITE_REPO",
        value_name = "OWNER/REPO",
        default_value = DEFAULT_REPO,
        global = true
    )]
    repo: String,

    /// GitHub API URL (defaults to https://api.github.com)
    #[arg(long = "api-url", value_name = "URL", global = true)]
    api_url: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Render the download panel for the latest release
    Latest,

    /// Render the changelog cards
    Changelog(PageArgs),

    /// Render the filtered update catalog
    Updates(UpdatesArgs),

    /// Convert Markdown release notes to HTML
    Markdown(MarkdownArgs),

    /// Print or copy the permalink of a release card
    Permalink(PermalinkArgs),

    /// Write every fragment into a directory
    Build(BuildArgs),
}

#[derive(clap::Args, Debug)]
struct PageArgs {
    /// Absolute URL of the changelog page, used for permalinks
    #[arg(long, value_name = "URL", default_value = "http://localhost/whatsnew.html")]
    page: String,
}

#[derive(clap::Args, Debug)]
struct FilterArgs {
    /// Category tag to show, or "all"
    #[arg(long, default_value = "all")]
    category: CategoryFilter,

    /// Case-insensitive hero name search
    #[arg(long, default_value = "")]
    search: String,
}

#[derive(clap::Args, Debug)]
struct UpdatesArgs {
    /// Path or URL of updates.json
    #[arg(value_name = "SOURCE")]
    source: String,

    #[command(flatten)]
    filter: FilterArgs,
}

#[derive(clap::Args, Debug)]
struct MarkdownArgs {
    /// Markdown file to convert (reads stdin when omitted)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
struct PermalinkArgs {
    /// Release tag the link points at
    #[arg(value_name = "TAG")]
    tag: String,

    #[command(flatten)]
    page: PageArgs,

    /// Copy to the clipboard instead of printing
    #[arg(long)]
    copy: bool,
}

#[derive(clap::Args, Debug)]
struct BuildArgs {
    /// Path or URL of updates.json
    #[arg(value_name = "SOURCE")]
    source: String,

    /// Output directory for the fragments
    #[arg(long, short = 'o', value_name = "DIR")]
    out: PathBuf,

    #[command(flatten)]
    page: PageArgs,

    #[command(flatten)]
    filter: FilterArgs,
}

impl FilterArgs {
    fn to_filter(&self) -> Filter {
        Filter::new(self.category.clone(), &self.search)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let config = || -> Result<Config<RealRuntime>> {
        let repo: RepoId = cli.repo.parse()?;
        Config::new(RealRuntime, repo, cli.api_url.clone())
    };

    match cli.command {
        Commands::Latest => {
            let config = config()?;
            let info = release_info::fetch(&config.provider, &config.repo).await;
            print!("{}", release_info::render_download_panel(&info));
        }
        Commands::Changelog(args) => {
            let config = config()?;
            let location = PageLocation::parse(&args.page)?;
            let releases = changelog::fetch(&config.provider, &config.repo).await;
            print!("{}", changelog::render_changelog(&releases, &location));
        }
        Commands::Updates(args) => {
            let config = config()?;
            let source = CatalogSource::from(args.source.as_str());
            let entries = catalog::load(&config.runtime, &config.http_client, &source).await;
            print!(
                "{}",
                catalog::render_catalog(&entries, &args.filter.to_filter())
            );
        }
        Commands::Build(args) => {
            let config = config()?;
            build(&config, args).await?;
        }
        Commands::Markdown(args) => {
            let input = match args.file {
                Some(path) => RealRuntime.read_to_string(&path)?,
                None => {
                    let mut input = String::new();
                    std::io::stdin()
                        .read_to_string(&mut input)
                        .context("Failed to read standard input")?;
                    input
                }
            };
            print!("{}", markdown::to_html(&input));
        }
        Commands::Permalink(args) => {
            let location = PageLocation::parse(&args.page.page)?;
            let link = changelog::permalink(&location, &args.tag);
            if args.copy {
                let feedback =
                    changelog::copy_permalink(&SystemClipboard, &StdoutClipboard, &link).await?;
                info!("Copied ({})", feedback.class);
                eprintln!("Copied {}", link);
            } else {
                println!("{}", link);
            }
        }
    }
    Ok(())
}

async fn build<R: Runtime>(config: &Config<R>, args: BuildArgs) -> Result<()> {
    let location = PageLocation::parse(&args.page.page)?;
    let source = CatalogSource::from(args.source.as_str());
    let filter = args.filter.to_filter();

    let fragments = site::build(
        &config.provider,
        &config.runtime,
        &config.http_client,
        SiteInputs {
            repo: &config.repo,
            catalog: &source,
            location: &location,
            filter: &filter,
        },
    )
    .await;

    site::write(&config.runtime, &args.out, &fragments)?;
    if let Some(date) = &fragments.updates_date {
        println!("Latest update: {}", date);
    }
    Ok(())
}
