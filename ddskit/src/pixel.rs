//! Pixel buffers, mip chains and buffer pooling.
//!
//! All pixel data in the crate is 8-bit BGRA, row-major, with no row
//! padding. A [`PixelBuffer`] always holds exactly `width * height * 4`
//! bytes; a [`MipChain`] always starts with the largest level and halves
//! each dimension (flooring, never below 1) from one level to the next.

use std::sync::atomic::{AtomicUsize, Ordering};

use image::RgbaImage;
use parking_lot::Mutex;

use crate::error::DdsError;

/// Owned BGRA8 pixel data with its dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap existing BGRA bytes.
    ///
    /// # Errors
    ///
    /// `InvalidDimensions` for a zero dimension, `BufferSizeMismatch` when
    /// `data.len() != width * height * 4`.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, DdsError> {
        if width == 0 || height == 0 {
            return Err(DdsError::InvalidDimensions(width, height));
        }
        let expected = Self::byte_len(width, height);
        if data.len() != expected {
            return Err(DdsError::BufferSizeMismatch {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A zero-filled (transparent black) buffer.
    pub fn zeroed(width: u32, height: u32) -> Result<Self, DdsError> {
        Self::new(width, height, vec![0; Self::byte_len(width, height)])
    }

    /// Bytes needed for a `width`×`height` buffer.
    pub fn byte_len(width: u32, height: u32) -> usize {
        width as usize * height as usize * 4
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width as usize * 4
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// BGRA value at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let offset = y as usize * self.stride() + x as usize * 4;
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.data[offset..offset + 4]);
        px
    }

    /// Convert from an RGBA image, swapping red and blue.
    pub fn from_rgba_image(image: &RgbaImage) -> Result<Self, DdsError> {
        let mut data = image.as_raw().clone();
        for px in data.chunks_exact_mut(4) {
            px.swap(0, 2);
        }
        Self::new(image.width(), image.height(), data)
    }

    /// Convert to an RGBA image, swapping red and blue.
    pub fn to_rgba_image(&self) -> RgbaImage {
        let mut data = self.data.clone();
        for px in data.chunks_exact_mut(4) {
            px.swap(0, 2);
        }
        // Length is width * height * 4 by construction
        RgbaImage::from_raw(self.width, self.height, data)
            .unwrap_or_else(|| RgbaImage::new(self.width, self.height))
    }
}

/// Dimensions of the level below a `width`×`height` level.
pub fn next_level_size(width: u32, height: u32) -> (u32, u32) {
    ((width / 2).max(1), (height / 2).max(1))
}

/// An ordered mip chain, level 0 largest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MipChain {
    levels: Vec<PixelBuffer>,
}

impl MipChain {
    /// Build a chain from levels, checking the halving rule.
    pub fn new(levels: Vec<PixelBuffer>) -> Result<Self, DdsError> {
        if levels.is_empty() {
            return Err(DdsError::InvalidMipmapChain(
                "Empty mipmap chain".to_string(),
            ));
        }
        for (i, pair) in levels.windows(2).enumerate() {
            let expected = next_level_size(pair[0].width(), pair[0].height());
            let actual = (pair[1].width(), pair[1].height());
            if expected != actual {
                return Err(DdsError::InvalidMipmapChain(format!(
                    "level {} is {}×{}, expected {}×{}",
                    i + 1,
                    actual.0,
                    actual.1,
                    expected.0,
                    expected.1
                )));
            }
        }
        Ok(Self { levels })
    }

    /// A chain holding only the top level.
    pub fn single(top: PixelBuffer) -> Self {
        Self { levels: vec![top] }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always false; a chain has at least one level.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn top(&self) -> &PixelBuffer {
        &self.levels[0]
    }

    pub fn level(&self, index: usize) -> Option<&PixelBuffer> {
        self.levels.get(index)
    }

    pub fn levels(&self) -> &[PixelBuffer] {
        &self.levels
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PixelBuffer> {
        self.levels.iter()
    }

    /// Keep only the first `count` levels (at least one).
    pub fn truncate(&mut self, count: usize) {
        self.levels.truncate(count.max(1));
    }

    pub fn into_levels(self) -> Vec<PixelBuffer> {
        self.levels
    }
}

impl<'a> IntoIterator for &'a MipChain {
    type Item = &'a PixelBuffer;
    type IntoIter = std::slice::Iter<'a, PixelBuffer>;

    fn into_iter(self) -> Self::IntoIter {
        self.levels.iter()
    }
}

/// Recycles pixel storage across decode calls.
///
/// Buffers handed out by [`BufferPool::acquire`] are owned exclusively by
/// the caller. Giving them back with [`BufferPool::release`] is optional; a
/// dropped buffer is simply freed.
#[derive(Debug)]
pub struct BufferPool {
    free: Mutex<Vec<Vec<u8>>>,
    max_retained: usize,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl BufferPool {
    /// Create a pool that keeps at most `max_retained` idle buffers.
    pub fn new(max_retained: usize) -> Self {
        Self {
            free: Mutex::new(Vec::new()),
            max_retained,
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    /// A zero-filled buffer of `width`×`height`.
    pub fn acquire(&self, width: u32, height: u32) -> Result<PixelBuffer, DdsError> {
        let len = PixelBuffer::byte_len(width, height);
        let reused = {
            let mut free = self.free.lock();
            free.iter()
                .position(|v| v.capacity() >= len)
                .map(|i| free.swap_remove(i))
        };

        let data = match reused {
            Some(mut v) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                v.clear();
                v.resize(len, 0);
                v
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                vec![0; len]
            }
        };
        PixelBuffer::new(width, height, data)
    }

    /// Return a buffer's storage to the pool.
    pub fn release(&self, buffer: PixelBuffer) {
        let mut free = self.free.lock();
        if free.len() < self.max_retained {
            free.push(buffer.into_vec());
        }
    }

    /// Return every level of a chain to the pool.
    pub fn release_chain(&self, chain: MipChain) {
        for level in chain.into_levels() {
            self.release(level);
        }
    }

    /// Idle buffers currently held.
    pub fn retained(&self) -> usize {
        self.free.lock().len()
    }

    /// Acquisitions served from recycled storage.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    /// Acquisitions that had to allocate.
    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new(16)
    }
}
