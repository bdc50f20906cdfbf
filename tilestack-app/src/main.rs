//! tilestack - emit, inspect and render layered tile map views.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tilestack::{prelude::*, rendering::save_png};

#[derive(Parser)]
#[command(name = "tilestack")]
#[command(about = "Bootstrap layered tile map views", long_about = None)]
struct Cli {
    /// Bootstrap config (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the initial center latitude
    #[arg(long, global = true, allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Override the initial center longitude
    #[arg(long, global = true, allow_hyphen_values = true)]
    lng: Option<f64>,

    /// Override the initial zoom level
    #[arg(long, global = true)]
    zoom: Option<u8>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the Leaflet bootstrap script
    Script,
    /// Write a standalone HTML page
    Page {
        /// Output file (stdout if omitted)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Page title
        #[arg(long, default_value = "Map")]
        title: String,
    },
    /// List the tile URLs each layer requests for a viewport
    Tiles {
        #[arg(long, default_value = "1024")]
        width: u32,
        #[arg(long, default_value = "768")]
        height: u32,
    },
    /// Composite the view into a PNG
    Stitch {
        #[arg(long, default_value = "1024")]
        width: u32,
        #[arg(long, default_value = "768")]
        height: u32,
        #[arg(long)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let view = config.bootstrap()?;
    log::info!(
        "view at {} zoom {} with {} layer(s)",
        view.center(),
        view.zoom(),
        view.layer_count()
    );

    match cli.command {
        Command::Script => {
            let script = LeafletScript::new(&view).container(&config.container)?.render()?;
            print!("{}", script);
        }
        Command::Page { output, title } => {
            let page = LeafletPage::for_config(&view, &config)?.title(title).render()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, page)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("Wrote {}", path.display());
                }
                None => print!("{}", page),
            }
        }
        Command::Tiles { width, height } => {
            let center = view.center();
            for layer in view.layers() {
                println!("{} {}", layer.id, layer.spec.url_template());
                if !layer.spec.covers_zoom(view.zoom()) {
                    println!("  (above max zoom {})", layer.spec.effective_max_zoom());
                    continue;
                }
                for placement in tiles_covering(&center, view.zoom(), width, height) {
                    println!(
                        "  {} @ ({}, {}) {}",
                        placement.coord,
                        placement.offset_x,
                        placement.offset_y,
                        layer.spec.url(placement.coord)
                    );
                }
            }
        }
        Command::Stitch {
            width,
            height,
            output,
        } => {
            if width == 0 || height == 0 {
                bail!("viewport must be at least 1x1 pixels");
            }
            let fetcher = HttpTileFetcher::new();
            let composite = render_view(&fetcher, &view, width, height)
                .await
                .context("compositing view")?;
            save_png(&composite, &output).with_context(|| format!("writing {}", output.display()))?;

            println!("Wrote {}x{} composite to {}", width, height, output.display());
            let attributions = view.attributions();
            if !attributions.is_empty() {
                println!("Attribution:");
                for attribution in attributions {
                    println!("  {}", attribution);
                }
            }
        }
    }

    Ok(())
}

/// Loads the config and applies any view overrides from the command line.
fn load_config(cli: &Cli) -> anyhow::Result<BootstrapConfig> {
    let Some(path) = &cli.config else {
        bail!("--config <file.json> is required");
    };
    let config = BootstrapConfig::load(path)
        .with_context(|| format!("loading config {}", path.display()))?;
    apply_view_overrides(config, cli.lat, cli.lng, cli.zoom)
}

/// Replaces only the view fields that were given; the rest come from `config`.
fn apply_view_overrides(
    config: BootstrapConfig,
    lat: Option<f64>,
    lng: Option<f64>,
    zoom: Option<u8>,
) -> anyhow::Result<BootstrapConfig> {
    if lat.is_none() && lng.is_none() && zoom.is_none() {
        return Ok(config);
    }
    let center = config.view.center();
    let view = ViewConfig::from_lat_lng(
        lat.unwrap_or(center.lat),
        lng.unwrap_or(center.lng),
        zoom.unwrap_or(config.view.zoom()),
    )
    .context("applying view overrides")?;
    Ok(config.with_view(view))
}
