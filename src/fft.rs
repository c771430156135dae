//! Complex FFT core backing the real transform.
//!
//! This module is the butterfly machinery of the crate: per-size twiddle and
//! bit-reversal tables ([`CfftTables`]) and an iterative in-place radix-2
//! decimation-in-time transform built on the
//! [Cooley–Tukey algorithm](https://en.wikipedia.org/wiki/Cooley%E2%80%93Tukey_FFT_algorithm).
//! Sizes 2, 4 and 8 dispatch to hardcoded kernels. The forward direction is
//! the unscaled DFT `X[k] = sum_j x[j]·exp(-2πi·jk/m)`; the inverse applies
//! the `1/m` scale so the pair is an exact round trip.

use alloc::vec::Vec;

use crate::num::{Complex, Float};

/// Errors surfaced by table construction and the transform entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FftError {
    /// A zero size or an empty buffer was supplied.
    EmptyInput,
    /// The requested transform size is not a supported power of two.
    NonPowerOfTwo,
    /// A buffer length disagrees with the configured transform size.
    MismatchedLengths,
    /// A transform was requested before any successful `init`.
    Uninitialized,
    /// A size is not exactly representable in the floating-point type.
    InvalidValue,
}

#[inline(always)]
fn fft2<T: Float>(buf: &mut [Complex<T>]) {
    debug_assert_eq!(buf.len(), 2);
    let a = buf[0];
    let b = buf[1];
    buf[0] = a.add(b);
    buf[1] = a.sub(b);
}

#[inline(always)]
fn fft4<T: Float>(buf: &mut [Complex<T>]) {
    debug_assert_eq!(buf.len(), 4);
    let a0 = buf[0];
    let a1 = buf[1];
    let a2 = buf[2];
    let a3 = buf[3];
    let even0 = a0.add(a2);
    let even1 = a0.sub(a2);
    let odd0 = a1.add(a3);
    let odd1 = a1.sub(a3);
    // exp(-2πi/4) = -i
    let t = Complex::new(odd1.im, -odd1.re);
    buf[0] = even0.add(odd0);
    buf[1] = even1.add(t);
    buf[2] = even0.sub(odd0);
    buf[3] = even1.sub(t);
}

#[inline(always)]
fn fft8<T: Float>(buf: &mut [Complex<T>]) {
    debug_assert_eq!(buf.len(), 8);
    let x0 = buf[0];
    let x1 = buf[1];
    let x2 = buf[2];
    let x3 = buf[3];
    let x4 = buf[4];
    let x5 = buf[5];
    let x6 = buf[6];
    let x7 = buf[7];

    // Size-4 transform over the even indices (0,2,4,6).
    let a0 = x0.add(x4);
    let a1 = x0.sub(x4);
    let a2 = x2.add(x6);
    let a3 = x2.sub(x6);
    let t = Complex::new(a3.im, -a3.re);
    let e0 = a0.add(a2);
    let e1 = a1.add(t);
    let e2 = a0.sub(a2);
    let e3 = a1.sub(t);

    // Size-4 transform over the odd indices (1,3,5,7).
    let b0 = x1.add(x5);
    let b1 = x1.sub(x5);
    let b2 = x3.add(x7);
    let b3 = x3.sub(x7);
    let u = Complex::new(b3.im, -b3.re);
    let o0 = b0.add(b2);
    let o1 = b1.add(u);
    let o2 = b0.sub(b2);
    let o3 = b1.sub(u);

    // Combine with the size-8 twiddles: w^k = exp(-2πi·k/8), computed in
    // `T` precision so the inverse cancels them exactly.
    let w1 = Complex::expi(-T::pi() / T::from_f32(4.0));
    let w2 = Complex::new(T::zero(), -T::one());
    let w3 = w1.mul(w2);
    let t0 = o0;
    let t1 = o1.mul(w1);
    let t2 = o2.mul(w2);
    let t3 = o3.mul(w3);
    buf[0] = e0.add(t0);
    buf[1] = e1.add(t1);
    buf[2] = e2.add(t2);
    buf[3] = e3.add(t3);
    buf[4] = e0.sub(t0);
    buf[5] = e1.sub(t1);
    buf[6] = e2.sub(t2);
    buf[7] = e3.sub(t3);
}

/// Build the stage twiddle table for a size-`m` transform: `m/2` factors
/// `exp(-2πi·k/m)` for `k = 0..m/2`. Stage `len` of the butterfly network
/// reads the table with stride `m/len`, so one table serves every stage.
fn build_stage_twiddles<T: Float>(m: usize) -> Result<Vec<Complex<T>>, FftError> {
    let m_t = T::from_usize(m).ok_or(FftError::InvalidValue)?;
    let half = m / 2;
    let mut table = Vec::with_capacity(half);
    let two = T::from_f32(2.0);
    for k in 0..half {
        // `k < m/2 < 2^53`, representable whenever `m` is.
        let k_t = T::from_usize(k).ok_or(FftError::InvalidValue)?;
        table.push(Complex::expi(-(two * T::pi() * k_t) / m_t));
    }
    Ok(table)
}

/// Build the bit-reversal permutation table for a power-of-two size `m`.
fn build_bit_reversal(m: usize) -> Vec<u32> {
    debug_assert!(m.is_power_of_two());
    let mut table = Vec::with_capacity(m);
    table.push(0);
    let mut j = 0usize;
    for _ in 1..m {
        let mut bit = m >> 1;
        while j & bit != 0 {
            j ^= bit;
            bit >>= 1;
        }
        j ^= bit;
        table.push(j as u32);
    }
    table
}

/// Precomputed tables for one in-place complex transform size.
///
/// Tables are immutable after construction; the transform methods borrow the
/// caller's buffer for the duration of one call and retain nothing.
pub(crate) struct CfftTables<T: Float> {
    m: usize,
    stage_twiddles: Vec<Complex<T>>,
    bitrev: Vec<u32>,
    inv_scale: T,
}

impl<T: Float> CfftTables<T> {
    /// Build tables for a size-`m` complex transform. `m` must be a
    /// non-zero power of two.
    pub(crate) fn new(m: usize) -> Result<Self, FftError> {
        if m == 0 {
            return Err(FftError::EmptyInput);
        }
        if !m.is_power_of_two() {
            return Err(FftError::NonPowerOfTwo);
        }
        let stage_twiddles = build_stage_twiddles(m)?;
        let bitrev = build_bit_reversal(m);
        let m_t = T::from_usize(m).ok_or(FftError::InvalidValue)?;
        Ok(Self {
            m,
            stage_twiddles,
            bitrev,
            inv_scale: T::one() / m_t,
        })
    }

    pub(crate) fn size(&self) -> usize {
        self.m
    }

    /// In-place forward transform of exactly `m` complex samples, unscaled.
    pub(crate) fn forward(&self, buf: &mut [Complex<T>]) {
        debug_assert_eq!(buf.len(), self.m);
        let m = self.m;
        match m {
            1 => return,
            2 => return fft2(buf),
            4 => return fft4(buf),
            8 => return fft8(buf),
            _ => {}
        }

        for (i, &rev) in self.bitrev.iter().enumerate() {
            let j = rev as usize;
            if i < j {
                buf.swap(i, j);
            }
        }

        let mut len = 2;
        while len <= m {
            let half = len / 2;
            let step = m / len;
            let mut base = 0;
            while base < m {
                for k in 0..half {
                    let w = self.stage_twiddles[k * step];
                    let u = buf[base + k];
                    let v = buf[base + k + half].mul(w);
                    buf[base + k] = u.add(v);
                    buf[base + k + half] = u.sub(v);
                }
                base += len;
            }
            len <<= 1;
        }
    }

    /// In-place inverse transform of exactly `m` complex samples, scaled by
    /// `1/m`: the exact inverse of [`CfftTables::forward`].
    pub(crate) fn inverse(&self, buf: &mut [Complex<T>]) {
        debug_assert_eq!(buf.len(), self.m);
        for c in buf.iter_mut() {
            c.im = -c.im;
        }
        self.forward(buf);
        let scale = self.inv_scale;
        for c in buf.iter_mut() {
            c.im = -c.im;
            *c = c.scale(scale);
        }
    }
}
