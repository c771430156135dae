use proptest::collection::vec as prop_vec;
use proptest::prelude::*;

use rdft::{RdftImpl, ScalarRdftImpl};

fn real_block() -> impl Strategy<Value = Vec<f64>> {
    // Power-of-two lengths from 4 to 1024 with bounded sample magnitudes.
    (2u32..=10).prop_flat_map(|e| prop_vec(-1.0f64..1.0, 1usize << e))
}

proptest! {
    #[test]
    fn roundtrip_recovers_any_block(block in real_block()) {
        let engine = ScalarRdftImpl::<f64>::with_size(block.len()).unwrap();
        let mut a = block.clone();
        engine.real_dft(&mut a).unwrap();
        engine.real_inverse_dft(&mut a).unwrap();
        for (x, y) in a.iter().zip(block.iter()) {
            prop_assert!((x - y).abs() < 1e-9, "{} vs {}", x, y);
        }
    }

    #[test]
    fn dc_bin_equals_sample_sum(block in real_block()) {
        let sum: f64 = block.iter().sum();
        let engine = ScalarRdftImpl::<f64>::with_size(block.len()).unwrap();
        let mut a = block;
        engine.real_dft(&mut a).unwrap();
        prop_assert!((a[0] - sum).abs() < 1e-9, "{} vs {}", a[0], sum);
    }

    #[test]
    fn parseval_energy_is_preserved(block in real_block()) {
        let n = block.len();
        let m = n / 2;
        let time_energy: f64 = block.iter().map(|x| x * x).sum();
        let engine = ScalarRdftImpl::<f64>::with_size(n).unwrap();
        let mut a = block;
        engine.real_dft(&mut a).unwrap();
        // Sum |X[k]|^2 over all n bins, expanding the Hermitian half.
        let mut freq_energy = a[0] * a[0] + a[1] * a[1];
        for k in 1..m {
            freq_energy += 2.0 * (a[2 * k] * a[2 * k] + a[2 * k + 1] * a[2 * k + 1]);
        }
        freq_energy /= n as f64;
        prop_assert!(
            (time_energy - freq_energy).abs() < 1e-6 * (1.0 + time_energy),
            "{} vs {}",
            time_energy,
            freq_energy
        );
    }
}
