//! Row-band execution for one mip level.
//!
//! A level is processed as pairs of bands: a mutable band of the output and
//! the matching read-only band of the input. Bands never overlap, so workers
//! write without locking.

use rayon::prelude::*;

use crate::config::ProcessingConfig;
use crate::error::DdsError;

pub(crate) struct BandExecutor {
    pool: Option<rayon::ThreadPool>,
    inline: bool,
}

impl BandExecutor {
    pub(crate) fn new(config: &ProcessingConfig) -> Result<Self, DdsError> {
        Ok(Self {
            pool: config.build_pool()?,
            inline: config.parallelism() == 1,
        })
    }

    /// Run `work` over `dest` in `dest_band`-byte bands paired with `src` in
    /// `src_band`-byte bands. Stops at the first error.
    pub(crate) fn run<F>(
        &self,
        dest: &mut [u8],
        dest_band: usize,
        src: &[u8],
        src_band: usize,
        work: F,
    ) -> Result<(), DdsError>
    where
        F: Fn(&mut [u8], &[u8]) -> Result<(), DdsError> + Send + Sync,
    {
        if dest_band == 0 || src_band == 0 {
            return Ok(());
        }

        if self.inline {
            return dest
                .chunks_mut(dest_band)
                .zip(src.chunks(src_band))
                .try_for_each(|(d, s)| work(d, s));
        }

        let mut parallel = || {
            dest.par_chunks_mut(dest_band)
                .zip(src.par_chunks(src_band))
                .try_for_each(|(d, s)| work(d, s))
        };
        match &self.pool {
            Some(pool) => pool.install(parallel),
            None => parallel(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn double_into(config: ProcessingConfig) -> Vec<u8> {
        let src: Vec<u8> = (0..64).collect();
        let mut dest = vec![0u8; 64];
        BandExecutor::new(&config)
            .unwrap()
            .run(&mut dest, 16, &src, 16, |d, s| {
                for (o, i) in d.iter_mut().zip(s) {
                    *o = i * 2;
                }
                Ok(())
            })
            .unwrap();
        dest
    }

    #[test]
    fn test_all_modes_agree() {
        let expected: Vec<u8> = (0..64).map(|i| i * 2).collect();
        assert_eq!(double_into(ProcessingConfig::new()), expected);
        assert_eq!(double_into(ProcessingConfig::new().with_parallelism(1)), expected);
        assert_eq!(double_into(ProcessingConfig::new().with_parallelism(3)), expected);
    }

    #[test]
    fn test_error_is_propagated() {
        let mut dest = vec![0u8; 32];
        let result = BandExecutor::new(&ProcessingConfig::new().with_parallelism(1))
            .unwrap()
            .run(&mut dest, 8, &[0; 32], 8, |_, _| {
                Err(DdsError::UnsupportedFormat("test".to_string()))
            });
        assert!(matches!(result, Err(DdsError::UnsupportedFormat(_))));
    }
}
