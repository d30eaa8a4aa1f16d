use clap::{Parser, Subcommand};
use folio::collection::Audience;
use folio::{config, data, output, scan};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Content model for a personal portfolio and blog")]
#[command(long_about = "\
Content model for a personal portfolio and blog

Loads the presentation block, the project list, and a directory of markdown
posts with front-matter, then reports what a renderer would see.

Content structure:

  content/
  ├── config.toml                  # Build config (optional)
  ├── site.toml                    # Presentation and projects (required)
  └── posts/
      ├── 2024-01-01-hello.md      # Dated file name (date is checked, not used)
      ├── draft-post.md            # isPublish: false → hidden from listings
      └── notes-on-rust/
          └── index.md             # Directory name is the file-name slug

Front-matter (all keys except description are required):

  ---
  title: \"Hello, world\"
  publishedAt: 2024-01-01
  description: \"Why this site exists.\"
  slug: \"hello\"
  isPublish: true
  ---

Run 'folio gen-config' for a documented config.toml and 'folio init-data'
for a starter site.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory for manifest.json
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Log debug output to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load content and write manifest.json
    Scan,
    /// Validate content; exits non-zero on any error diagnostic
    Check,
    /// List posts, newest first
    List {
        /// Include drafts
        #[arg(long)]
        all: bool,
    },
    /// Print one post by slug
    Show {
        slug: String,
        /// Allow drafts to be shown
        #[arg(long)]
        preview: bool,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
    /// Print a starter site.toml
    InitData,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Scan => {
            let site = load(&cli.source)?;
            let path = site.write_manifest(&cli.output)?;
            output::print_scan_output(&site);
            println!("==> Wrote {}", path.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let site = load(&cli.source)?;
            output::print_scan_output(&site);
            if site.has_errors() {
                eprintln!("==> Content has errors");
                std::process::exit(1);
            }
            println!("==> Content is valid");
        }
        Command::List { all } => {
            let site = load(&cli.source)?;
            let posts = if all {
                site.posts.list_all()
            } else {
                site.posts.list_published()
            };
            output::print_post_list(&posts);
        }
        Command::Show { slug, preview } => {
            let site = load(&cli.source)?;
            let post = if preview {
                site.posts.get_by_slug_as(&slug, Audience::Preview)
            } else {
                site.posts.get_by_slug(&slug)
            };
            match post {
                Some(post) => output::print_post_detail(post),
                None => {
                    eprintln!("No post with slug '{slug}'");
                    std::process::exit(1);
                }
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::InitData => {
            print!("{}", data::stock_site_toml());
        }
    }

    Ok(())
}

/// Load the site after sizing the rayon pool from its config.
fn load(source: &std::path::Path) -> Result<scan::Site, Box<dyn std::error::Error>> {
    let site_config = config::load_config(source)?;
    init_thread_pool(&site_config.processing);
    Ok(scan::load_site_with(source, site_config)?)
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise `warn`, or `debug` with `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "folio=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores: the user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
