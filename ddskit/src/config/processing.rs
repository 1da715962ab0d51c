//! Per-call processing options.

use crate::error::DdsError;

/// Default DXT1 alpha threshold.
pub const DEFAULT_DXT1_ALPHA_THRESHOLD: f32 = 0.2;

/// Options for one encode or decode call.
///
/// # Example
///
/// ```
/// use ddskit::config::ProcessingConfig;
///
/// // Defaults: rayon's global pool, CPU path, 0.2 alpha threshold
/// let config = ProcessingConfig::default();
/// assert_eq!(config.parallelism(), 0);
/// assert!(!config.accelerate());
///
/// // Single-threaded, half-transparent pixels dropped in DXT1
/// let config = ProcessingConfig::new()
///     .with_parallelism(1)
///     .with_dxt1_alpha_threshold(0.5);
/// assert_eq!(config.alpha_cutoff(), 128);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessingConfig {
    /// Worker threads: 0 uses rayon's global pool, 1 runs inline,
    /// anything larger builds a dedicated pool of that size.
    parallelism: usize,
    /// Request the hardware path. Not available; the CPU path runs instead.
    accelerate: bool,
    /// Requested fraction of full alpha below which a DXT1 pixel is
    /// transparent. Sanitised on read.
    dxt1_alpha_threshold: f32,
}

impl ProcessingConfig {
    pub fn new() -> Self {
        Self {
            parallelism: 0,
            accelerate: false,
            dxt1_alpha_threshold: DEFAULT_DXT1_ALPHA_THRESHOLD,
        }
    }

    /// Set the worker count.
    pub fn with_parallelism(mut self, threads: usize) -> Self {
        self.parallelism = threads;
        self
    }

    /// Request hardware acceleration.
    pub fn with_acceleration(mut self, accelerate: bool) -> Self {
        self.accelerate = accelerate;
        self
    }

    /// Set the DXT1 alpha threshold. Values outside `0.0..=1.0` are clamped
    /// and NaN falls back to the default; see [`Self::alpha_threshold_adjusted`].
    pub fn with_dxt1_alpha_threshold(mut self, threshold: f32) -> Self {
        self.dxt1_alpha_threshold = threshold;
        self
    }

    pub fn parallelism(&self) -> usize {
        self.parallelism
    }

    pub fn accelerate(&self) -> bool {
        self.accelerate
    }

    /// The effective threshold, always within `0.0..=1.0`.
    pub fn dxt1_alpha_threshold(&self) -> f32 {
        sanitise_threshold(self.dxt1_alpha_threshold)
    }

    /// The requested threshold when it had to be clamped or replaced.
    ///
    /// Orchestrators report this through their logger.
    pub fn alpha_threshold_adjusted(&self) -> Option<f32> {
        let requested = self.dxt1_alpha_threshold;
        (sanitise_threshold(requested) != requested).then_some(requested)
    }

    /// The threshold as an 8-bit alpha value: `round(threshold * 255)`.
    ///
    /// DXT1 encoding writes pixels with alpha strictly below this as
    /// transparent.
    pub fn alpha_cutoff(&self) -> u8 {
        (self.dxt1_alpha_threshold() * 255.0).round() as u8
    }

    /// Build the dedicated pool, if this configuration asks for one.
    pub(crate) fn build_pool(&self) -> Result<Option<rayon::ThreadPool>, DdsError> {
        if self.parallelism <= 1 {
            return Ok(None);
        }
        rayon::ThreadPoolBuilder::new()
            .num_threads(self.parallelism)
            .thread_name(|i| format!("ddskit-worker-{}", i))
            .build()
            .map(Some)
            .map_err(|e| DdsError::WorkerPool(e.to_string()))
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn sanitise_threshold(value: f32) -> f32 {
    if value.is_nan() {
        DEFAULT_DXT1_ALPHA_THRESHOLD
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ProcessingConfig::default();
        assert_eq!(config.parallelism(), 0);
        assert!(!config.accelerate());
        assert_eq!(config.dxt1_alpha_threshold(), DEFAULT_DXT1_ALPHA_THRESHOLD);
        assert_eq!(config.alpha_cutoff(), 51);
    }

    #[test]
    fn test_builder_chain() {
        let config = ProcessingConfig::new()
            .with_parallelism(8)
            .with_acceleration(true)
            .with_dxt1_alpha_threshold(0.0);
        assert_eq!(config.parallelism(), 8);
        assert!(config.accelerate());
        assert_eq!(config.alpha_cutoff(), 0);
    }

    #[test]
    fn test_threshold_is_clamped() {
        assert_eq!(
            ProcessingConfig::new()
                .with_dxt1_alpha_threshold(3.0)
                .dxt1_alpha_threshold(),
            1.0
        );
        assert_eq!(
            ProcessingConfig::new()
                .with_dxt1_alpha_threshold(-1.0)
                .alpha_cutoff(),
            0
        );
        assert_eq!(
            ProcessingConfig::new()
                .with_dxt1_alpha_threshold(f32::NAN)
                .dxt1_alpha_threshold(),
            DEFAULT_DXT1_ALPHA_THRESHOLD
        );
    }

    #[test]
    fn test_adjusted_threshold_is_reported() {
        let config = ProcessingConfig::new().with_dxt1_alpha_threshold(1.5);
        assert_eq!(config.alpha_threshold_adjusted(), Some(1.5));
        assert_eq!(config.alpha_cutoff(), 255);

        assert!(ProcessingConfig::new()
            .with_dxt1_alpha_threshold(f32::NAN)
            .alpha_threshold_adjusted()
            .is_some_and(f32::is_nan));
        assert_eq!(
            ProcessingConfig::new()
                .with_dxt1_alpha_threshold(1.0)
                .alpha_threshold_adjusted(),
            None
        );
        assert_eq!(ProcessingConfig::default().alpha_threshold_adjusted(), None);
    }

    #[test]
    fn test_copy_semantics() {
        let config1 = ProcessingConfig::new().with_parallelism(2);
        let config2 = config1;
        assert_eq!(config1, config2);
    }

    #[test]
    fn test_pool_only_for_multiple_workers() {
        assert!(ProcessingConfig::new().build_pool().unwrap().is_none());
        assert!(ProcessingConfig::new()
            .with_parallelism(1)
            .build_pool()
            .unwrap()
            .is_none());

        let pool = ProcessingConfig::new()
            .with_parallelism(3)
            .build_pool()
            .unwrap()
            .unwrap();
        assert_eq!(pool.current_num_threads(), 3);
    }
}
