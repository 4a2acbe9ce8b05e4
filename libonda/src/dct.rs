// Orthonormal DCT-II / DCT-III over fixed-length blocks

use std::f64::consts::PI;

use crate::types::BLOCK_SIZE;

/// Forward (type-II) and inverse (type-III) discrete cosine transform in the
/// orthonormal scaling:
///
/// Forward: `X[k] = scale(k) * Σ_n x[n] * cos(π(2n+1)k / 2L)`
/// Inverse: `x[n] = X[0]/√L + √(2/L) * Σ_{k≥1} X[k] * cos(π(2n+1)k / 2L)`
///
/// with `scale(0) = 1/√L` and `scale(k>0) = √(2/L)`. The pair is exactly
/// inverse, so a round trip reproduces the block up to f64 rounding.
///
/// Evaluation is the direct O(L²) sum, deliberate since L is small and
/// fixed. The cosine argument only depends on `(2n+1)k mod 4L` (the angle
/// gains a full 2π whenever the product grows by 4L), so all factors come
/// from one table of 4L entries computed up front.
pub struct Dct {
    block_size: usize,
    cos_table: Vec<f64>,
    dc_scale: f64,
    ac_scale: f64,
}

impl Dct {
    /// Transform for blocks of `block_size` samples.
    pub fn new(block_size: usize) -> Self {
        assert!(block_size > 0, "block size must be positive");

        let period = 4 * block_size;
        let cos_table: Vec<f64> = (0..period)
            .map(|m| (PI * m as f64 / (2.0 * block_size as f64)).cos())
            .collect();

        Dct {
            block_size,
            cos_table,
            dc_scale: 1.0 / (block_size as f64).sqrt(),
            ac_scale: (2.0 / block_size as f64).sqrt(),
        }
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Forward DCT-II: a time-domain block into frequency coefficients.
    pub fn forward(&self, samples: &[f64], coefficients: &mut [f64]) {
        assert_eq!(samples.len(), self.block_size, "sample block length mismatch");
        assert_eq!(
            coefficients.len(),
            self.block_size,
            "coefficient buffer length mismatch"
        );

        let period = 4 * self.block_size;
        for (k, coefficient) in coefficients.iter_mut().enumerate() {
            let mut sum = 0.0;
            for (n, &sample) in samples.iter().enumerate() {
                sum += sample * self.cos_table[((2 * n + 1) * k) % period];
            }
            let scale = if k == 0 { self.dc_scale } else { self.ac_scale };
            *coefficient = scale * sum;
        }
    }

    /// Inverse DCT-III: frequency coefficients back into a time-domain block.
    pub fn inverse(&self, coefficients: &[f64], samples: &mut [f64]) {
        assert_eq!(
            coefficients.len(),
            self.block_size,
            "coefficient buffer length mismatch"
        );
        assert_eq!(samples.len(), self.block_size, "sample block length mismatch");

        let period = 4 * self.block_size;
        for (n, sample) in samples.iter_mut().enumerate() {
            let mut sum = self.dc_scale * coefficients[0];
            for (k, &coefficient) in coefficients.iter().enumerate().skip(1) {
                sum += self.ac_scale * coefficient * self.cos_table[((2 * n + 1) * k) % period];
            }
            *sample = sum;
        }
    }
}

impl Default for Dct {
    fn default() -> Self {
        Dct::new(BLOCK_SIZE)
    }
}
