use clap::{Parser, ValueEnum};
use findimg::io::{load_raster, save_gray, save_raster};
use findimg::visualize::{overlay_matches, similarity_map};
use findimg::{write_text, Raster, Rect, SearchConfig, Searcher};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Find a subimage inside an image")]
struct Cli {
    /// Image to search in.
    image: PathBuf,
    /// Image to search for; not needed with --random.
    subimage: Option<PathBuf>,
    /// Result output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
    /// Crop a random subimage of IMAGE and search for it.
    #[arg(long)]
    random: bool,
    /// Seed for --random.
    #[arg(long)]
    seed: Option<u64>,
    /// Log every pyramid step to stderr.
    #[arg(short, long)]
    verbose: bool,
    /// Minimum image width (0 = default).
    #[arg(long, default_value_t = 0)]
    img_min_width: usize,
    /// Maximum image width (0 = default).
    #[arg(long, default_value_t = 0)]
    img_max_width: usize,
    /// Minimum subimage area (0 = default).
    #[arg(long, default_value_t = 0)]
    sub_min_area: usize,
    /// Maximum subimage division (0 = default).
    #[arg(long, default_value_t = 0)]
    sub_max_div: usize,
    /// Number of top matches to keep (0 = default).
    #[arg(short, default_value_t = 0)]
    k: usize,
    /// Scan on the calling thread only.
    #[arg(long)]
    sequential: bool,
    /// Row slices per scan (0 = twice the cores).
    #[arg(long, default_value_t = 0)]
    workers: usize,
    /// Write the haystack with the final matches painted over it.
    #[arg(long, value_name = "PNG")]
    overlay: Option<PathBuf>,
    /// Write the similarity map of the subimage at native scale.
    #[arg(long, value_name = "PNG")]
    similarity_map: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    fn search_config(&self) -> SearchConfig {
        SearchConfig {
            img_min_width: self.img_min_width,
            img_max_width: self.img_max_width,
            sub_min_area: self.sub_min_area,
            sub_max_div: self.sub_max_div,
            k: self.k,
            parallel: !self.sequential,
            workers: self.workers,
        }
    }
}

/// Picks a random non-empty rectangle inside a `width x height` image.
fn random_rect<R: Rng>(rng: &mut R, width: usize, height: usize) -> Rect {
    let x = rng.random_range(0..width);
    let y = rng.random_range(0..height);
    let w = rng.random_range(0..width - x) + 1;
    let h = rng.random_range(0..height - y) + 1;
    Rect::from_size(x, y, w, h)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("findimg=info".parse()?))
            .with_target(false)
            .with_writer(io::stderr)
            .init();
    }

    let haystack = load_raster(&cli.image)?;
    let needle: Raster = if cli.random {
        let mut rng = match cli.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let rect = random_rect(&mut rng, haystack.width(), haystack.height());
        info!(%rect, "random subimage");
        haystack.crop(rect)?
    } else {
        let path = cli
            .subimage
            .as_ref()
            .ok_or("a subimage path is required unless --random is set")?;
        load_raster(path)?
    };

    let searcher = Searcher::new().with_config(cli.search_config());
    let matches = searcher.search(&haystack, &needle)?;

    match cli.output {
        OutputFormat::Text => write_text(io::stdout().lock(), &matches)?,
        OutputFormat::Json => println!("{}", serde_json::to_string(&matches)?),
    }

    if let Some(path) = &cli.overlay {
        save_raster(&overlay_matches(&haystack, &matches)?, path)?;
    }
    if let Some(path) = &cli.similarity_map {
        save_gray(&similarity_map(&haystack, &needle)?, path)?;
    }

    Ok(())
}
