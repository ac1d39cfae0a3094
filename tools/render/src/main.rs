//! Renders the synthetic wave field as a filled-contour map on a plate
//! carrée projection and writes it as a PNG.

mod coastlines;
mod colormap;
mod contourf;
mod figure;
mod projection;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use gridmap_core::levels::ContourLevels;
use gridmap_core::{GridFieldGenerator, GridSpec, ScalarField};
use tracing::{debug, info, warn};

use crate::coastlines::Coastlines;
use crate::figure::{create_parent_dir, Figure, FigureSize, BLACK};
use crate::projection::GeoAxes;

#[derive(Parser, Debug)]
#[command(name = "render", about = "Render the synthetic lon/lat wave field as a filled-contour map")]
struct Args {
    /// Output PNG path.
    #[arg(short, long, default_value = "contourf_map.png")]
    output: PathBuf,

    /// JSON grid spec replacing the fixed 25×25 grid.
    #[arg(long)]
    grid: Option<PathBuf>,

    /// GeoJSON file with coastline geometries.
    #[arg(long)]
    coastlines: Option<PathBuf>,

    /// Figure width in inches.
    #[arg(long, default_value_t = 6.0)]
    width_in: f64,

    /// Figure height in inches.
    #[arg(long, default_value_t = 3.0)]
    height_in: f64,

    /// Pixels per inch.
    #[arg(long, default_value_t = 100.0)]
    dpi: f64,

    /// Maximum number of automatically chosen bands.
    #[arg(long, default_value_t = 8)]
    levels: usize,

    /// Explicit ascending contour levels (comma separated); overrides --levels.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    level_values: Option<Vec<f64>>,

    /// Draw black lines along the band edges.
    #[arg(long)]
    isolines: bool,

    /// Also write the generated field as JSON.
    #[arg(long)]
    dump_field: Option<PathBuf>,

    /// Verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Everything the map drawing needs besides the field itself.
struct MapOptions {
    size: FigureSize,
    levels: ContourLevels,
    coastlines: Option<Coastlines>,
    isolines: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);
    run(args)
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    // A second init (e.g. under a test harness) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(args: Args) -> Result<()> {
    let generator = match &args.grid {
        Some(path) => load_generator(path)?,
        None => GridFieldGenerator::new(),
    };

    info!("Generating field");
    let field = generator.generate();
    debug!(min = field.min(), max = field.max(), "field range");

    if let Some(path) = &args.dump_field {
        let json = field.to_json().context("failed to serialise field")?;
        create_parent_dir(path)?;
        std::fs::write(path, json).with_context(|| format!("cannot write {}", path.display()))?;
        info!("Wrote {}", path.display());
    }

    let coastlines = match &args.coastlines {
        Some(path) => {
            let c = Coastlines::from_path(path)?;
            info!(lines = c.lines.len(), points = c.point_count(), "Loaded coastlines");
            Some(c)
        }
        None => {
            warn!("no --coastlines file given; drawing the map without coastlines");
            None
        }
    };

    let levels = match args.level_values {
        Some(values) => ContourLevels::Explicit(values),
        None => ContourLevels::Auto { max_bins: args.levels },
    };

    let options = MapOptions {
        size: FigureSize { width_in: args.width_in, height_in: args.height_in, dpi: args.dpi },
        levels,
        coastlines,
        isolines: args.isolines,
    };

    info!("Rendering map");
    let fig = render_map(&field, &options)?;
    save(&fig, &args.output)
}

fn load_generator(path: &Path) -> Result<GridFieldGenerator> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read grid spec {}", path.display()))?;
    let spec = GridSpec::from_json_str(&text)
        .with_context(|| format!("invalid grid spec {}", path.display()))?;
    Ok(GridFieldGenerator::from_spec(spec)?)
}

/// Figure → global plate carrée axes → filled contours → band edges →
/// coastlines → frame.
fn render_map(field: &ScalarField, options: &MapOptions) -> Result<Figure> {
    let mut fig = Figure::new(options.size)?;
    let mut ax = GeoAxes::new(&fig);
    ax.set_global();

    let levels = options
        .levels
        .resolve(field.min(), field.max())
        .context("cannot choose contour levels")?;
    debug!(?levels, "contour levels");

    let palette = colormap::viridis_palette(levels.len() - 1);
    let painted = contourf::fill(&mut fig, &ax, field, &levels, &palette);
    debug!(painted, "filled contour pixels");

    if options.isolines {
        let segments = contourf::draw_band_edges(&mut fig, &ax, field, &levels, BLACK);
        debug!(segments, "band edge segments");
    }

    if let Some(coastlines) = &options.coastlines {
        coastlines.draw(&mut fig, &ax, BLACK);
    }

    fig.draw_frame(ax.rect(), BLACK);
    Ok(fig)
}

fn save(fig: &Figure, path: &Path) -> Result<()> {
    fig.save(path)?;
    info!("Wrote {}", path.display());
    Ok(())
}
