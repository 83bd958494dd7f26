//! Tool constants and runtime configuration defaults

/// Default connectivity flag accepted on the command line
pub const DEFAULT_CONNECTIVITY: u8 = 4;

/// Default target mean intensity for the fuzzy affinity (normalized units)
pub const DEFAULT_FUZZY_MEAN: f32 = 0.5;
/// Default spread of the fuzzy object-intensity Gaussian
pub const DEFAULT_FUZZY_SIGMA_MEAN: f32 = 0.25;
/// Default spread of the fuzzy homogeneity Gaussian
pub const DEFAULT_FUZZY_SIGMA_DIFF: f32 = 0.1;

/// Suffix added to exported cost-map filenames
pub const COST_SUFFIX: &str = "_cost";
/// Suffix added to exported label-map filenames
pub const LABEL_SUFFIX: &str = "_labels";
/// Suffix added to exported path-overlay filenames
pub const PATH_SUFFIX: &str = "_path";

/// Pipeline stages reported by the progress display
pub const PIPELINE_STAGES: u64 = 4;
