// Frequency-weighted scalar quantization of transform coefficients

/// Per-coefficient quantization step sizes, coarser toward higher
/// frequencies. Indices past the end reuse the last entry, so everything
/// above index 15 is quantized with the coarsest step.
pub const STEP_TABLE: [f64; 16] = [
    4.0, 4.0, 8.0, 8.0, 16.0, 16.0, 32.0, 32.0, 64.0, 64.0, 128.0, 128.0, 256.0, 256.0, 512.0,
    512.0,
];

/// Scalar quantizer over a static step table.
///
/// Lossy by construction: each coefficient is divided by its step, rounded
/// to the nearest integer with ties away from zero, and clamped to the
/// signed 32-bit range; dequantization multiplies back. The reconstruction
/// error per coefficient is at most half its step.
pub struct Quantizer {
    steps: &'static [f64],
}

impl Quantizer {
    /// Quantizer over `steps`, which must be non-empty and non-decreasing.
    pub fn new(steps: &'static [f64]) -> Self {
        assert!(!steps.is_empty(), "step table must not be empty");
        debug_assert!(
            steps.windows(2).all(|pair| pair[0] <= pair[1]),
            "step table must be non-decreasing"
        );
        Quantizer { steps }
    }

    /// Step size for coefficient `index`; indices beyond the table reuse the
    /// last entry.
    pub fn step(&self, index: usize) -> f64 {
        self.steps[index.min(self.steps.len() - 1)]
    }

    /// Quantize each coefficient into `quantized`.
    pub fn quantize(&self, coefficients: &[f64], quantized: &mut [i32]) {
        debug_assert_eq!(coefficients.len(), quantized.len());
        for (index, (&coefficient, slot)) in
            coefficients.iter().zip(quantized.iter_mut()).enumerate()
        {
            let scaled = (coefficient / self.step(index)).round();
            *slot = scaled.clamp(i32::MIN as f64, i32::MAX as f64) as i32;
        }
    }

    /// Undo [`quantize`](Self::quantize), up to the discarded remainder.
    pub fn dequantize(&self, quantized: &[i32], coefficients: &mut [f64]) {
        debug_assert_eq!(quantized.len(), coefficients.len());
        for (index, (&value, slot)) in quantized.iter().zip(coefficients.iter_mut()).enumerate() {
            *slot = value as f64 * self.step(index);
        }
    }
}

impl Default for Quantizer {
    fn default() -> Self {
        Quantizer::new(&STEP_TABLE)
    }
}
