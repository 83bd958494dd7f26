//! Command-line interface running one segmentation method over a PNG image

use crate::analysis::features::{gradient_features, linear};
use crate::forest::engine::PropagationEngine;
use crate::forest::pool::BufferPool;
use crate::io::configuration::{
    COST_SUFFIX, DEFAULT_CONNECTIVITY, DEFAULT_FUZZY_MEAN, DEFAULT_FUZZY_SIGMA_DIFF,
    DEFAULT_FUZZY_SIGMA_MEAN, LABEL_SUFFIX, PATH_SUFFIX,
};
use crate::io::error::{Result, SegmentationError, invalid_parameter};
use crate::io::image::{export_cost_map, export_label_map, export_path_overlay, load_intensity};
use crate::io::progress::ProgressManager;
use crate::spatial::{Connectivity, GridPoint};
use crate::variants::fast_marching::fast_marching;
use crate::variants::fuzzy::AdaptiveFuzzy;
use crate::variants::livewire::Livewire;
use crate::variants::region_growing::RegionGrowingRule;
use crate::variants::distance::distance_map;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

/// Segmentation method selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Method {
    /// Competitive multi-seed region growing
    RegionGrowing,
    /// Livewire contour from the first seed
    Livewire,
    /// Adaptive fuzzy connectedness from the first seed
    Fuzzy,
    /// Fast-marching wavefront from the seeds
    FastMarching,
    /// Euclidean distance to a thresholded region boundary
    Distance,
}

/// Command-line arguments for the segmentation tool
#[derive(Parser)]
#[command(name = "seedpath")]
#[command(
    author,
    version,
    about = "Seeded shortest-path forest segmentation over a PNG image"
)]
pub struct Cli {
    /// Input PNG image
    #[arg(value_name = "IMAGE")]
    pub image: PathBuf,

    /// Segmentation method to run
    #[arg(short, long, value_enum)]
    pub method: Method,

    /// Seed pixel as `x,y` or `x,y,label` (repeatable)
    #[arg(short, long = "seed", value_name = "X,Y[,LABEL]")]
    pub seeds: Vec<String>,

    /// Path target pixel as `x,y` (livewire contour endpoint)
    #[arg(short, long, value_name = "X,Y")]
    pub target: Option<String>,

    /// Grid connectivity (4 or 8)
    #[arg(short, long, default_value_t = DEFAULT_CONNECTIVITY)]
    pub connectivity: u8,

    /// Intensity threshold for the distance method's region
    #[arg(long, default_value_t = 0.5)]
    pub threshold: f32,

    /// Target mean intensity for the fuzzy affinity
    #[arg(long, default_value_t = DEFAULT_FUZZY_MEAN)]
    pub fuzzy_mean: f32,

    /// Spread of the fuzzy object-intensity Gaussian
    #[arg(long, default_value_t = DEFAULT_FUZZY_SIGMA_MEAN)]
    pub fuzzy_sigma_mean: f32,

    /// Spread of the fuzzy homogeneity Gaussian
    #[arg(long, default_value_t = DEFAULT_FUZZY_SIGMA_DIFF)]
    pub fuzzy_sigma_diff: f32,

    /// Output path for the cost map (defaults to `<image>_cost.png`)
    #[arg(long, value_name = "PATH")]
    pub cost_out: Option<PathBuf>,

    /// Output path for the label map (defaults to `<image>_labels.png`)
    #[arg(long, value_name = "PATH")]
    pub label_out: Option<PathBuf>,

    /// Output path for the path overlay (defaults to `<image>_path.png`)
    #[arg(long, value_name = "PATH")]
    pub path_out: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Parsed seed: position plus class label
#[derive(Debug, Clone, Copy)]
pub struct Seed {
    /// Seed position
    pub point: GridPoint,
    /// Class label (defaults to the 1-based seed order)
    pub label: f32,
}

/// Parse a `x,y[,label]` seed argument
///
/// `ordinal` supplies the default label for competitive growing when the
/// argument omits one.
///
/// # Errors
///
/// Returns an error when the argument is not two or three comma-separated
/// numbers.
pub fn parse_seed(argument: &str, ordinal: usize) -> Result<Seed> {
    let mut parts = argument.split(',');
    let x = parse_coordinate(parts.next(), argument)?;
    let y = parse_coordinate(parts.next(), argument)?;
    let label = match parts.next() {
        Some(raw) => raw
            .trim()
            .parse::<f32>()
            .map_err(|e| invalid_parameter("seed", argument, &e))?,
        None => ordinal as f32,
    };
    if parts.next().is_some() {
        return Err(invalid_parameter(
            "seed",
            argument,
            "expected `x,y` or `x,y,label`",
        ));
    }
    Ok(Seed {
        point: GridPoint::new(x, y),
        label,
    })
}

fn parse_coordinate(part: Option<&str>, argument: &str) -> Result<u32> {
    part.ok_or_else(|| invalid_parameter("seed", argument, "expected `x,y` or `x,y,label`"))?
        .trim()
        .parse::<u32>()
        .map_err(|e| invalid_parameter("seed", argument, &e))
}

/// Orchestrates the load, feature, propagation and export pipeline
pub struct SegmentationRunner {
    cli: Cli,
    progress: Option<ProgressManager>,
}

impl SegmentationRunner {
    /// Create a runner from parsed CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress = cli.should_show_progress().then(ProgressManager::new);
        Self { cli, progress }
    }

    /// Run the configured method end to end
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be loaded, a parameter fails
    /// validation, a seed lies outside the image, or an output cannot be
    /// written.
    pub fn run(&mut self) -> Result<()> {
        let connectivity = match self.cli.connectivity {
            4 => Connectivity::Four,
            8 => Connectivity::Eight,
            other => {
                return Err(invalid_parameter(
                    "connectivity",
                    &other,
                    &"must be 4 or 8",
                ));
            }
        };

        self.stage("loading image");
        let intensity = load_intensity(&self.cli.image)?;
        let (height, width) = intensity.dim();

        self.stage("preparing features");
        let maps = gradient_features(&intensity);

        let seeds = self.parse_seeds(width, height)?;
        if seeds.is_empty() && self.cli.method != Method::Distance {
            return Err(invalid_parameter(
                "seed",
                &"<none>",
                &"at least one seed is required",
            ));
        }

        self.stage("propagating");
        let pool = BufferPool::new();
        match self.cli.method {
            Method::RegionGrowing => {
                let gradient = linear(&maps.magnitude);
                let labels = paint_labels(&seeds, width, height);
                let engine = PropagationEngine::new(
                    &pool,
                    width,
                    height,
                    &gradient,
                    &gradient,
                    &labels,
                    connectivity,
                    RegionGrowingRule,
                );
                self.stage("exporting");
                self.export_costs(engine.costs(), width, height)?;
                self.export_labels(engine.labels(), width, height)?;
            }
            Method::Livewire => {
                let anchor = seeds.first().map_or(GridPoint::new(0, 0), |s| s.point);
                let wire = Livewire::new(
                    &pool,
                    width,
                    height,
                    &linear(&maps.edge_strength),
                    &linear(&maps.direction),
                    anchor,
                );
                self.stage("exporting");
                self.export_costs(wire.engine().costs(), width, height)?;
                if let Some(target) = self.parse_target(width, height)? {
                    let points = wire.path_to(target);
                    let out = self.output_path(&self.cli.path_out, PATH_SUFFIX);
                    export_path_overlay(&points, width, height, &out)?;
                }
            }
            Method::Fuzzy => {
                let seed = seeds.first().map_or(GridPoint::new(0, 0), |s| s.point);
                let session = AdaptiveFuzzy::new(
                    &pool,
                    width,
                    height,
                    &linear(&intensity),
                    seed,
                    self.cli.fuzzy_mean,
                    self.cli.fuzzy_sigma_mean,
                    self.cli.fuzzy_sigma_diff,
                );
                self.stage("exporting");
                self.export_costs(session.engine().costs(), width, height)?;
            }
            Method::FastMarching => {
                let labels = paint_labels(&seeds, width, height);
                let engine =
                    fast_marching(&pool, width, height, &linear(&maps.edge_strength), &labels);
                self.stage("exporting");
                self.export_costs(engine.costs(), width, height)?;
            }
            Method::Distance => {
                let region: Vec<f32> = intensity
                    .iter()
                    .map(|&v| if v >= self.cli.threshold { 1.0 } else { 0.0 })
                    .collect();
                let engine = distance_map(&pool, width, height, &region, 1.0);
                self.stage("exporting");
                self.export_costs(engine.costs(), width, height)?;
            }
        }

        if let Some(ref progress) = self.progress {
            progress.finish();
        }
        Ok(())
    }

    fn parse_seeds(&self, width: usize, height: usize) -> Result<Vec<Seed>> {
        let mut seeds = Vec::with_capacity(self.cli.seeds.len());
        for (ordinal, raw) in self.cli.seeds.iter().enumerate() {
            let seed = parse_seed(raw, ordinal + 1)?;
            if (seed.point.x as usize) >= width || (seed.point.y as usize) >= height {
                return Err(SegmentationError::InvalidSeed {
                    x: seed.point.x,
                    y: seed.point.y,
                    width,
                    height,
                });
            }
            seeds.push(seed);
        }
        Ok(seeds)
    }

    fn parse_target(&self, width: usize, height: usize) -> Result<Option<GridPoint>> {
        let Some(raw) = self.cli.target.as_deref() else {
            return Ok(None);
        };
        let seed = parse_seed(raw, 1)?;
        if (seed.point.x as usize) >= width || (seed.point.y as usize) >= height {
            return Err(SegmentationError::InvalidSeed {
                x: seed.point.x,
                y: seed.point.y,
                width,
                height,
            });
        }
        Ok(Some(seed.point))
    }

    fn export_costs(&self, costs: &[f32], width: usize, height: usize) -> Result<()> {
        let out = self.output_path(&self.cli.cost_out, COST_SUFFIX);
        export_cost_map(costs, width, height, &out)
    }

    fn export_labels(&self, labels: &[f32], width: usize, height: usize) -> Result<()> {
        let out = self.output_path(&self.cli.label_out, LABEL_SUFFIX);
        export_label_map(labels, width, height, &out)
    }

    fn output_path(&self, explicit: &Option<PathBuf>, suffix: &str) -> PathBuf {
        explicit
            .clone()
            .unwrap_or_else(|| derive_output_path(&self.cli.image, suffix))
    }

    fn stage(&self, message: &'static str) {
        if let Some(ref progress) = self.progress {
            progress.stage(message);
        }
    }
}

/// Paint scalar seed labels into a zeroed label field
fn paint_labels(seeds: &[Seed], width: usize, height: usize) -> Vec<f32> {
    let mut labels = vec![0.0f32; width * height];
    for seed in seeds {
        let index = seed.point.y as usize * width + seed.point.x as usize;
        if let Some(cell) = labels.get_mut(index) {
            *cell = seed.label;
        }
    }
    labels
}

fn derive_output_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default();
    let name = format!("{}{suffix}.png", stem.to_string_lossy());
    input.parent().map_or_else(|| PathBuf::from(&name), |p| p.join(&name))
}
