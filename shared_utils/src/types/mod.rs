//! Type-Safe Wrappers Module
//!
//! ## Modules
//! - `file_size`: file size in bytes, with the KB view used by size targets

pub mod file_size;

pub use file_size::FileSize;

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn kb_is_bytes_over_1024(bytes in 0u64..(1u64 << 40)) {
            let size = FileSize::new(bytes);
            prop_assert_eq!(size.kb(), bytes as f64 / 1024.0);
        }

        #[test]
        fn fits_within_kb_matches_float_comparison(bytes in 0u64..10_000_000, target in 1u64..10_000) {
            let size = FileSize::new(bytes);
            prop_assert_eq!(size.fits_within_kb(target), size.kb() <= target as f64);
        }

        #[test]
        fn exact_kb_multiple_fits_its_own_target(kb in 1u64..1_000_000) {
            prop_assert!(FileSize::new(kb * FileSize::KB).fits_within_kb(kb));
            prop_assert!(!FileSize::new(kb * FileSize::KB + 1).fits_within_kb(kb));
        }
    }
}
