//! Real-input FFT engine with in-place half-complex packing.
//!
//! This is the transform primitive an FFT-based sample-rate converter sits
//! on: a block of `n` real PCM samples is moved to the frequency domain with
//! [`RdftImpl::real_dft`], filtered there by the caller, and moved back with
//! [`RdftImpl::real_inverse_dft`]. Both directions run in place over the
//! caller's buffer; the engine owns only its precomputed tables.
//!
//! # Packed half-complex layout
//!
//! For a transform of size `n` (`m = n/2`), using the DFT convention
//! `X[k] = sum_j a[j]·exp(-2πi·jk/n)`, the `n` real slots after
//! [`RdftImpl::real_dft`] hold the `m + 1` independent frequency bins:
//!
//! ```text
//! a[0]            Re X[0]      (DC, imaginary part is zero)
//! a[1]            Re X[m]      (Nyquist, imaginary part is zero)
//! a[2k], a[2k+1]  Re X[k], Im X[k]   for 1 <= k < m
//! ```
//!
//! Bins `m+1..n-1` are the conjugates of bins `1..m-1` (Hermitian symmetry)
//! and are not stored. Frequency-domain filter code multiplying spectra must
//! use this layout; [`multiply_packed`] and [`scale_packed`] implement the
//! two common operations.
//!
//! # Scaling
//!
//! The forward transform is unscaled; the inverse carries the full `1/n`
//! factor, so `real_inverse_dft(real_dft(x)) == x` up to rounding. This is
//! the usual convention for FFT convolution filters.

use alloc::vec::Vec;
use core::cell::RefCell;

use crate::fft::{CfftTables, FftError};
use crate::num::{Complex, Float};

/// Smallest supported transform length.
pub const MIN_LEN: usize = 2;

/// A real-input FFT engine over buffers of one configured power-of-two size.
///
/// Lifecycle: uninitialized → `init(n)` → any number of transforms and
/// `reset` calls → optionally `init` again with a new size. Transform calls
/// borrow the buffer for the duration of the call only and are pure
/// functions of the instance tables and the buffer contents.
///
/// The trait is object-safe so a resampling controller can pick an engine
/// variant at runtime behind `&mut dyn RdftImpl<T>`.
pub trait RdftImpl<T: Float> {
    /// (Re)build the internal tables for transforms of length `n`.
    ///
    /// `n` must be a power of two and at least [`MIN_LEN`]. On error the
    /// engine keeps whatever configuration it had before the call.
    fn init(&mut self, n: usize) -> Result<(), FftError>;

    /// Clear retained scratch state between independent signal segments.
    ///
    /// The configured size and its tables survive; a transform call after
    /// `reset` needs no new `init`. Safe at any time, including before the
    /// first `init`.
    fn reset(&mut self);

    /// Forward transform: replace `n` real time-domain samples with the
    /// packed half-complex spectrum (unscaled).
    fn real_dft(&self, a: &mut [T]) -> Result<(), FftError>;

    /// Inverse transform: replace a packed half-complex spectrum with `n`
    /// real time-domain samples (scaled by `1/n`).
    fn real_inverse_dft(&self, a: &mut [T]) -> Result<(), FftError>;

    /// The configured transform length, or `None` before the first
    /// successful [`RdftImpl::init`].
    fn size(&self) -> Option<usize>;
}

/// Pack/unpack twiddles for the real↔half-complex recombination:
/// `exp(-πi·k/m)` for `k = 0..m`.
fn build_pack_twiddles<T: Float>(m: usize) -> Result<Vec<Complex<T>>, FftError> {
    let m_t = T::from_usize(m).ok_or(FftError::InvalidValue)?;
    let mut table = Vec::with_capacity(m);
    for k in 0..m {
        let k_t = T::from_usize(k).ok_or(FftError::InvalidValue)?;
        table.push(Complex::expi(-(T::pi() * k_t) / m_t));
    }
    Ok(table)
}

struct RdftTables<T: Float> {
    n: usize,
    cfft: CfftTables<T>,
    pack_twiddles: Vec<Complex<T>>,
}

/// Scalar [`RdftImpl`] engine.
///
/// Packs the `n` real samples as `n/2` complex samples, runs a half-size
/// in-place complex FFT over instance-owned twiddle and bit-reversal tables,
/// and recombines via the split formulas with the pack twiddles
/// `exp(-πi·k/m)`. One engine per thread; `init` mutates the tables while
/// the transforms only read them.
pub struct ScalarRdftImpl<T: Float> {
    tables: Option<RdftTables<T>>,
    scratch: RefCell<Vec<Complex<T>>>,
}

impl<T: Float> Default for ScalarRdftImpl<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> ScalarRdftImpl<T> {
    /// Create an uninitialized engine; call [`RdftImpl::init`] before
    /// transforming.
    pub fn new() -> Self {
        Self {
            tables: None,
            scratch: RefCell::new(Vec::new()),
        }
    }

    /// Create an engine ready for buffers of length `n`.
    pub fn with_size(n: usize) -> Result<Self, FftError> {
        let mut engine = Self::new();
        engine.init(n)?;
        Ok(engine)
    }
}

impl<T: Float> RdftImpl<T> for ScalarRdftImpl<T> {
    fn init(&mut self, n: usize) -> Result<(), FftError> {
        if n == 0 {
            return Err(FftError::EmptyInput);
        }
        if n < MIN_LEN || !n.is_power_of_two() {
            return Err(FftError::NonPowerOfTwo);
        }
        let m = n / 2;
        let cfft = CfftTables::new(m)?;
        let pack_twiddles = build_pack_twiddles(m)?;
        #[cfg(feature = "verbose-logging")]
        log::trace!(
            "rdft init: n={}, stage table {} entries, pack table {} entries",
            n,
            m / 2,
            m
        );
        self.tables = Some(RdftTables {
            n,
            cfft,
            pack_twiddles,
        });
        self.reset();
        Ok(())
    }

    fn reset(&mut self) {
        self.scratch.get_mut().clear();
    }

    fn real_dft(&self, a: &mut [T]) -> Result<(), FftError> {
        let tables = self.tables.as_ref().ok_or(FftError::Uninitialized)?;
        if a.len() != tables.n {
            return Err(FftError::MismatchedLengths);
        }
        let m = tables.cfft.size();
        let mut scratch = self.scratch.borrow_mut();
        if scratch.len() < m {
            scratch.resize(m, Complex::zero());
        }
        let scratch = &mut scratch[..m];

        for (i, z) in scratch.iter_mut().enumerate() {
            *z = Complex::new(a[2 * i], a[2 * i + 1]);
        }
        tables.cfft.forward(scratch);

        let half = T::from_f32(0.5);
        let z0 = scratch[0];
        a[0] = z0.re + z0.im;
        a[1] = z0.re - z0.im;
        for k in 1..m {
            let zk = scratch[k];
            let zc = scratch[m - k].conj();
            let sum = zk.add(zc);
            let diff = zk.sub(zc);
            let t = tables.pack_twiddles[k].mul(diff);
            a[2 * k] = (sum.re + t.im) * half;
            a[2 * k + 1] = (sum.im - t.re) * half;
        }
        Ok(())
    }

    fn real_inverse_dft(&self, a: &mut [T]) -> Result<(), FftError> {
        let tables = self.tables.as_ref().ok_or(FftError::Uninitialized)?;
        if a.len() != tables.n {
            return Err(FftError::MismatchedLengths);
        }
        let m = tables.cfft.size();
        let mut scratch = self.scratch.borrow_mut();
        if scratch.len() < m {
            scratch.resize(m, Complex::zero());
        }
        let scratch = &mut scratch[..m];

        let half = T::from_f32(0.5);
        scratch[0] = Complex::new((a[0] + a[1]) * half, (a[0] - a[1]) * half);
        for k in 1..m {
            let xk = Complex::new(a[2 * k], a[2 * k + 1]);
            let xc = Complex::new(a[2 * (m - k)], -a[2 * (m - k) + 1]);
            let sum = xk.add(xc);
            let diff = xk.sub(xc);
            let t = tables.pack_twiddles[k].conj().mul(diff);
            scratch[k] = Complex::new((sum.re - t.im) * half, (sum.im + t.re) * half);
        }
        tables.cfft.inverse(scratch);

        for (i, &z) in scratch.iter().enumerate() {
            a[2 * i] = z.re;
            a[2 * i + 1] = z.im;
        }
        Ok(())
    }

    fn size(&self) -> Option<usize> {
        self.tables.as_ref().map(|t| t.n)
    }
}

/// Pointwise product of two packed half-complex spectra, stored into `a`.
///
/// Both buffers must use the layout documented at the module level and have
/// the same power-of-two length. Multiplying the forward spectra of two
/// signals and running [`RdftImpl::real_inverse_dft`] yields their circular
/// convolution, which is how a resampler applies its band-limiting filter.
pub fn multiply_packed<T: Float>(a: &mut [T], b: &[T]) -> Result<(), FftError> {
    if a.is_empty() {
        return Err(FftError::EmptyInput);
    }
    if a.len() != b.len() {
        return Err(FftError::MismatchedLengths);
    }
    if a.len() < MIN_LEN || !a.len().is_power_of_two() {
        return Err(FftError::NonPowerOfTwo);
    }
    let m = a.len() / 2;
    // DC and Nyquist bins are purely real.
    a[0] = a[0] * b[0];
    a[1] = a[1] * b[1];
    for k in 1..m {
        let x = Complex::new(a[2 * k], a[2 * k + 1]);
        let y = Complex::new(b[2 * k], b[2 * k + 1]);
        let p = x.mul(y);
        a[2 * k] = p.re;
        a[2 * k + 1] = p.im;
    }
    Ok(())
}

/// Scale every bin of a packed half-complex spectrum by `c`.
pub fn scale_packed<T: Float>(a: &mut [T], c: T) {
    for v in a.iter_mut() {
        *v = *v * c;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn roundtrip_smallest_size() {
        let engine = ScalarRdftImpl::<f64>::with_size(2).unwrap();
        let mut a = vec![0.75, -0.25];
        engine.real_dft(&mut a).unwrap();
        // n = 2 packs to DC and Nyquist only.
        assert!((a[0] - 0.5).abs() < 1e-15);
        assert!((a[1] - 1.0).abs() < 1e-15);
        engine.real_inverse_dft(&mut a).unwrap();
        assert!((a[0] - 0.75).abs() < 1e-15);
        assert!((a[1] + 0.25).abs() < 1e-15);
    }

    #[test]
    fn pack_twiddles_cover_the_half_circle() {
        let table = build_pack_twiddles::<f64>(8).unwrap();
        assert_eq!(table.len(), 8);
        assert!((table[0].re - 1.0).abs() < 1e-15);
        // k = m/2 is a quarter turn: exp(-πi/2) = -i.
        assert!(table[4].re.abs() < 1e-15);
        assert!((table[4].im + 1.0).abs() < 1e-15);
    }

    #[test]
    fn init_failure_keeps_previous_configuration() {
        let mut engine = ScalarRdftImpl::<f64>::with_size(8).unwrap();
        assert_eq!(engine.init(12), Err(FftError::NonPowerOfTwo));
        assert_eq!(engine.size(), Some(8));
        let mut a = vec![1.0; 8];
        engine.real_dft(&mut a).unwrap();
        assert!((a[0] - 8.0).abs() < 1e-12);
    }

    #[test]
    fn engine_is_usable_through_a_trait_object() {
        let mut engine = ScalarRdftImpl::<f64>::new();
        let dyn_engine: &mut dyn RdftImpl<f64> = &mut engine;
        dyn_engine.init(4).unwrap();
        let mut a = vec![1.0, 0.0, -1.0, 0.0];
        dyn_engine.real_dft(&mut a).unwrap();
        assert!((a[2] - 2.0).abs() < 1e-15);
    }

    #[test]
    fn multiply_packed_validates_lengths() {
        let mut a = vec![1.0f64; 8];
        let b = vec![1.0f64; 4];
        assert_eq!(multiply_packed(&mut a, &b), Err(FftError::MismatchedLengths));
        let b6 = vec![1.0f64; 6];
        let mut a6 = vec![1.0f64; 6];
        assert_eq!(multiply_packed(&mut a6, &b6), Err(FftError::NonPowerOfTwo));
    }
}
