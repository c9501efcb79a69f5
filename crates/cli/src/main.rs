mod commands;
mod logging;

use blog_kit_core::ArticleVariant;
use clap::{Args, CommandFactory, Parser};
use clap_complete::{Shell, generate};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "blog-kit")]
#[command(version, about = "Static site generator for a personal blog", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Initialize new site directory
    Init {
        /// Path to create site directory
        path: PathBuf,

        /// Site title
        #[arg(long)]
        title: Option<String>,

        /// Author name
        #[arg(long)]
        author: Option<String>,
    },

    /// Validate site configuration and assets
    Validate {
        /// Path to site directory
        path: PathBuf,
    },

    /// Preview site locally with hot reload
    Preview {
        /// Path to site directory
        path: PathBuf,

        /// Port to serve on
        #[arg(short, long, default_value = "8080")]
        port: u16,

        #[command(flatten)]
        variant: VariantArgs,
    },

    /// Build site into an output directory
    Build {
        /// Path to site directory
        path: PathBuf,

        /// Output directory for generated site
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        variant: VariantArgs,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Overrides `[article] variant` from site.toml
#[derive(Args, Debug, Clone, Copy)]
struct VariantArgs {
    /// Render articles with the ad slot
    #[arg(long, conflicts_with = "plain")]
    with_ad: bool,

    /// Render articles without the ad slot
    #[arg(long)]
    plain: bool,
}

impl VariantArgs {
    fn into_override(self) -> Option<ArticleVariant> {
        match (self.with_ad, self.plain) {
            (true, _) => Some(ArticleVariant::WithAd),
            (_, true) => Some(ArticleVariant::Plain),
            _ => None,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Command::Init {
            path,
            title,
            author,
        } => commands::init::run(path, title, author).await,
        Command::Validate { path } => commands::validate::run(path).await,
        Command::Preview {
            path,
            port,
            variant,
        } => commands::preview::run(path, port, variant.into_override()).await,
        Command::Build {
            path,
            output,
            variant,
        } => commands::build::run(path, output, variant.into_override()).await,
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "blog-kit", &mut io::stdout());
            Ok(())
        }
    }
}
