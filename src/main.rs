use clap::{Parser, Subcommand};
use nbpress::{config, fetch, generate, output, scan};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nbpress")]
#[command(about = "Static site generator for notebook blogs")]
#[command(long_about = "\
Static site generator for notebook blogs

Every directory under the posts directory is a post. Its name is the slug
(dashes become spaces, words are capitalized) and it must hold exactly one
notebook. Each post gets an index.html linking the notebook in Colab and on
GitHub; the site root gets an index.html listing every post.

Site structure:

  site/
  ├── site.toml                    # Config (optional, see gen-config)
  ├── index.html                   # Generated homepage
  └── posts/
      ├── my-first-post/           # → \"My First Post\"
      │   ├── analysis.ipynb       # Exactly one notebook
      │   └── index.html           # Generated post page
      └── utils.py                 # Scripts are skipped

Run 'nbpress gen-config' to print a documented site.toml.")]
#[command(version)]
struct Cli {
    /// Site root containing site.toml and the posts directory
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Output directory (defaults to the site root)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan posts and write every page
    Build,
    /// Validate the posts directory without writing pages
    Check,
    /// Print the scanned posts as JSON
    Scan,
    /// Download a URL to a file, printing progress
    Fetch {
        /// URL to download
        url: String,
        /// Destination file
        destination: PathBuf,
        /// Print a progress line every STEP percent
        #[arg(long, default_value_t = fetch::DEFAULT_STEP,
              value_parser = clap::value_parser!(u32).range(1..=100))]
        step: u32,
    },
    /// Print a stock site.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            let site_config = config::load_config(&cli.root)?;
            let output_dir = cli.output.unwrap_or_else(|| cli.root.clone());

            println!("==> Scanning {}", cli.root.join(&site_config.posts_dir).display());
            let manifest = scan::scan(&cli.root, &site_config)?;

            println!("==> Generating HTML → {}", output_dir.display());
            let pages = generate::generate(&manifest, &output_dir)?;
            output::print_build_output(&pages);
        }
        Command::Check => {
            let site_config = config::load_config(&cli.root)?;
            let manifest = scan::scan(&cli.root, &site_config)?;
            output::print_check_output(&manifest);
            site_config.repository.urls()?;
            println!("==> Site is valid");
        }
        Command::Scan => {
            let site_config = config::load_config(&cli.root)?;
            let manifest = scan::scan(&cli.root, &site_config)?;
            println!("{}", serde_json::to_string_pretty(&manifest)?);
        }
        Command::Fetch {
            url,
            destination,
            step,
        } => {
            let summary = fetch::fetch(&url, &destination, step, output::print_fetch_event)?;
            println!("{}", output::format_fetch_summary(summary.bytes, &destination));
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
