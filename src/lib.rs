//! # rdft - real FFT engine for sample-rate conversion
//!
//! The transform core of an FFT-based audio resampler: an in-place,
//! power-of-two real FFT and its exact inverse. A resampling pipeline moves
//! a block of real PCM samples into the frequency domain, multiplies the
//! spectrum by its band-limiting filter, and moves it back; this crate is
//! that transform pair and nothing else. Filter design, polyphase
//! buffering, PCM container handling and overlap-add framing live with the
//! caller.
//!
//! ## Contract
//!
//! - **In place**: both directions transform a caller-owned `&mut [T]` of
//!   exactly the configured length; the engine borrows it per call and
//!   retains nothing.
//! - **Half-complex packing**: the forward output stores the `n/2 + 1`
//!   Hermitian-independent bins in the same `n` real slots (layout
//!   documented in [`rdft`]).
//! - **Scaling**: forward unscaled, inverse scaled by `1/n`, so
//!   `real_inverse_dft(real_dft(x)) == x` up to rounding.
//! - **Fail fast**: non-power-of-two sizes, mismatched buffer lengths and
//!   uninitialized use return an [`FftError`] without touching the buffer.
//!
//! ## Example
//!
//! ```
//! use rdft::{RdftImpl, ScalarRdftImpl};
//!
//! let engine = ScalarRdftImpl::<f64>::with_size(8).unwrap();
//! let mut block = [1.0, 0.5, 0.0, -0.5, -1.0, -0.5, 0.0, 0.5];
//! let original = block;
//! engine.real_dft(&mut block).unwrap();
//! // ... multiply the packed spectrum by filter coefficients here ...
//! engine.real_inverse_dft(&mut block).unwrap();
//! for (a, b) in block.iter().zip(original.iter()) {
//!     assert!((a - b).abs() < 1e-12);
//! }
//! ```
//!
//! ## Cargo features
//!
//! - `std` (default): use the standard library's float intrinsics; without
//!   it the crate is `no_std` and routes math through `libm`.
//! - `verbose-logging`: emit `log` trace records during table construction.

#![no_std]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod fft;
pub mod num;
/// The public real-FFT engine: [`rdft::RdftImpl`], the scalar engine and
/// the packed-spectrum helpers.
pub mod rdft;

pub use fft::FftError;
pub use num::{Complex, Complex32, Complex64, Float};
pub use rdft::{multiply_packed, scale_packed, RdftImpl, ScalarRdftImpl, MIN_LEN};

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn dc_signal_concentrates_in_bin_zero() {
        let engine = ScalarRdftImpl::<f64>::with_size(8).unwrap();
        let mut a = vec![1.0; 8];
        engine.real_dft(&mut a).unwrap();
        assert!((a[0] - 8.0).abs() < 1e-12);
        for v in &a[1..] {
            assert!(v.abs() < 1e-12, "leakage: {}", v);
        }
    }

    #[test]
    fn alternating_signal_concentrates_at_nyquist() {
        let engine = ScalarRdftImpl::<f64>::with_size(8).unwrap();
        let mut a = vec![1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0];
        engine.real_dft(&mut a).unwrap();
        assert!((a[1] - 8.0).abs() < 1e-12);
        assert!(a[0].abs() < 1e-12);
        for v in &a[2..] {
            assert!(v.abs() < 1e-12, "leakage: {}", v);
        }
    }

    #[test]
    fn forward_then_inverse_restores_the_block() {
        let engine = ScalarRdftImpl::<f64>::with_size(16).unwrap();
        let mut a: Vec<f64> = (0..16).map(|i| (i as f64 * 0.37).sin()).collect();
        let orig = a.clone();
        engine.real_dft(&mut a).unwrap();
        engine.real_inverse_dft(&mut a).unwrap();
        for (x, y) in a.iter().zip(orig.iter()) {
            assert!((x - y).abs() < 1e-12, "{} vs {}", x, y);
        }
    }

    #[test]
    fn uninitialized_engine_rejects_transforms() {
        let engine = ScalarRdftImpl::<f64>::new();
        let mut a = vec![0.0; 8];
        assert_eq!(engine.real_dft(&mut a), Err(FftError::Uninitialized));
        assert_eq!(engine.real_inverse_dft(&mut a), Err(FftError::Uninitialized));
        assert_eq!(engine.size(), None);
    }

    #[test]
    fn reset_before_init_is_harmless() {
        let mut engine = ScalarRdftImpl::<f32>::new();
        engine.reset();
        engine.init(4).unwrap();
        engine.reset();
        let mut a = vec![1.0f32, 2.0, 3.0, 4.0];
        engine.real_dft(&mut a).unwrap();
        assert!((a[0] - 10.0).abs() < 1e-5);
    }
}
