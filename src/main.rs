//! CLI entry point for mdxpress

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mdxpress")]
#[command(version)]
#[command(about = "A small blog server that renders MDX content directories", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the blog server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// List content by type (post, page)
    List {
        /// Content type to list
        #[arg(default_value = "post")]
        r#type: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        "mdxpress=debug,info"
    } else {
        "mdxpress=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Server { port, ip } => {
            let blog = mdxpress::Blog::new(&base_dir)?;
            tracing::info!("Serving content from {:?}", blog.content_dir);
            mdxpress::server::start(&blog, &ip, port).await?;
        }

        Commands::List { r#type } => {
            let blog = mdxpress::Blog::new(&base_dir)?;
            mdxpress::commands::list::run(&blog, &r#type)?;
        }
    }

    Ok(())
}
