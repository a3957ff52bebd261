//! Tests for the TAP grading computation
//! Verifies the fixed deduction table, the Over Ripe tolerance, and the
//! baseline deduction behavior

use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::{
    base_deduction, condition_deduction, condition_percentage, BunchCounts, FruitCondition,
    GradingResult,
};

/// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

// =============================================================================
// Percentage Computation Tests
// =============================================================================

mod percentages {
    use super::*;

    #[test]
    fn percentage_is_count_over_total() {
        assert_eq!(condition_percentage(10, 100), dec("10"));
        assert_eq!(condition_percentage(25, 50), dec("50"));
        assert_eq!(condition_percentage(3, 4), dec("75"));
    }

    #[test]
    fn zero_count_is_zero_percent() {
        assert_eq!(condition_percentage(0, 100), Decimal::ZERO);
        assert_eq!(condition_percentage(0, 1), Decimal::ZERO);
    }

    #[test]
    fn full_sample_is_one_hundred_percent() {
        assert_eq!(condition_percentage(77, 77), dec("100"));
    }

    #[test]
    fn result_reports_every_condition() {
        let result = GradingResult::compute(100, &BunchCounts::default()).unwrap();
        assert_eq!(result.conditions.len(), FruitCondition::ALL.len());
        for row in &result.conditions {
            assert_eq!(row.percentage, Decimal::ZERO);
        }
    }
}

// =============================================================================
// Deduction Table Tests
// The five coefficients are a fixed business rule and must match exactly
// =============================================================================

mod deduction_table {
    use super::*;

    #[test]
    fn mengkal_half_of_percentage() {
        assert_eq!(
            condition_deduction(FruitCondition::Mengkal, dec("10")),
            Some(dec("5.0"))
        );
    }

    #[test]
    fn tikus_fifteen_percent_of_percentage() {
        assert_eq!(
            condition_deduction(FruitCondition::Tikus, dec("5")),
            Some(dec("0.75"))
        );
    }

    #[test]
    fn tangkai_panjang_one_percent_of_percentage() {
        assert_eq!(
            condition_deduction(FruitCondition::TangkaiPanjang, dec("2")),
            Some(dec("0.02"))
        );
    }

    #[test]
    fn partenocarpic_fifteen_percent_of_percentage() {
        assert_eq!(
            condition_deduction(FruitCondition::Partenocarpic, dec("3")),
            Some(dec("0.45"))
        );
    }

    #[test]
    fn informational_conditions_never_deduct() {
        for condition in FruitCondition::ALL {
            if condition.is_deductible() {
                continue;
            }
            assert_eq!(condition_deduction(condition, dec("80")), None);
        }
    }

    /// Worked example from the mill's grading standard
    #[test]
    fn worked_example_total_100() {
        let counts = BunchCounts {
            mengkal: 10,
            over_ripe: 20,
            tikus: 5,
            tangkai_panjang: 2,
            partenocarpic: 3,
            ..Default::default()
        };
        let result = GradingResult::compute(100, &counts).unwrap();

        assert_eq!(result.percentage(FruitCondition::Mengkal), Some(dec("10")));
        assert_eq!(result.percentage(FruitCondition::OverRipe), Some(dec("20")));
        assert_eq!(result.percentage(FruitCondition::Tikus), Some(dec("5")));
        assert_eq!(
            result.percentage(FruitCondition::TangkaiPanjang),
            Some(dec("2"))
        );
        assert_eq!(
            result.percentage(FruitCondition::Partenocarpic),
            Some(dec("3"))
        );

        assert_eq!(result.deduction(FruitCondition::Mengkal), Some(dec("5.0")));
        assert_eq!(result.deduction(FruitCondition::OverRipe), Some(dec("3.75")));
        assert_eq!(result.deduction(FruitCondition::Tikus), Some(dec("0.75")));
        assert_eq!(
            result.deduction(FruitCondition::TangkaiPanjang),
            Some(dec("0.02"))
        );
        assert_eq!(
            result.deduction(FruitCondition::Partenocarpic),
            Some(dec("0.45"))
        );

        assert_eq!(result.total_deduction, dec("11.97"));
    }
}

// =============================================================================
// Over Ripe Tolerance Tests
// Up to 5% overripe is a free allowance; the deduction must be continuous
// at the threshold
// =============================================================================

mod overripe_tolerance {
    use super::*;

    #[test]
    fn zero_below_threshold() {
        assert_eq!(
            condition_deduction(FruitCondition::OverRipe, dec("0")),
            Some(Decimal::ZERO)
        );
        assert_eq!(
            condition_deduction(FruitCondition::OverRipe, dec("3")),
            Some(Decimal::ZERO)
        );
        assert_eq!(
            condition_deduction(FruitCondition::OverRipe, dec("4.99")),
            Some(Decimal::ZERO)
        );
    }

    #[test]
    fn exactly_zero_at_threshold() {
        assert_eq!(
            condition_deduction(FruitCondition::OverRipe, dec("5")),
            Some(Decimal::ZERO)
        );
    }

    #[test]
    fn quarter_of_excess_above_threshold() {
        assert_eq!(
            condition_deduction(FruitCondition::OverRipe, dec("20")),
            Some(dec("3.75"))
        );
        assert_eq!(
            condition_deduction(FruitCondition::OverRipe, dec("100")),
            Some(dec("23.75"))
        );
    }

    #[test]
    fn continuous_at_threshold() {
        // Just past the allowance the deduction is still nearly zero
        let just_over = condition_deduction(FruitCondition::OverRipe, dec("5.0001")).unwrap();
        assert_eq!(just_over, dec("0.000025"));
    }
}

// =============================================================================
// Baseline Deduction Tests
// =============================================================================

mod baseline {
    use super::*;

    #[test]
    fn base_is_two_percent() {
        assert_eq!(base_deduction(), dec("2"));
    }

    #[test]
    fn clean_sample_deducts_exactly_the_baseline() {
        for total in [1, 50, 100, 10_000] {
            let result = GradingResult::compute(total, &BunchCounts::default()).unwrap();
            assert_eq!(result.total_deduction, dec("2"));
            assert_eq!(result.total_deduction_display(), dec("2.00"));
        }
    }

    #[test]
    fn informational_counts_do_not_move_the_total() {
        let counts = BunchCounts {
            mentah: 30,
            sampah: 12,
            janjang_kosong: 7,
            ..Default::default()
        };
        let result = GradingResult::compute(100, &counts).unwrap();
        assert_eq!(result.total_deduction, dec("2"));
    }

    #[test]
    fn total_deduction_is_unbounded_above() {
        // An extreme sample can push the total past 100%; no clamp applies
        let counts = BunchCounts {
            mengkal: 10_000,
            ..Default::default()
        };
        let result = GradingResult::compute(10_000, &counts).unwrap();
        assert_eq!(result.total_deduction, dec("52"));

        let severe = BunchCounts {
            mengkal: 100,
            over_ripe: 100,
            tikus: 100,
            ..Default::default()
        };
        let result = GradingResult::compute(100, &severe).unwrap();
        assert!(result.total_deduction > dec("90"));
    }
}

// =============================================================================
// Validation Failure Tests
// =============================================================================

mod validation_failures {
    use super::*;

    #[test]
    fn zero_total_is_rejected() {
        assert!(GradingResult::compute(0, &BunchCounts::default()).is_err());
    }

    #[test]
    fn negative_total_is_rejected() {
        assert!(GradingResult::compute(-5, &BunchCounts::default()).is_err());
    }

    #[test]
    fn negative_count_is_rejected() {
        let counts = BunchCounts {
            over_ripe: -1,
            ..Default::default()
        };
        assert!(GradingResult::compute(100, &counts).is_err());
    }
}

// =============================================================================
// Rounding Policy Tests
// Sum first, round last: the total is computed from unrounded deductions
// =============================================================================

mod rounding {
    use super::*;

    #[test]
    fn display_rounds_to_two_decimals() {
        let counts = BunchCounts {
            mengkal: 1,
            ..Default::default()
        };
        let result = GradingResult::compute(3, &counts).unwrap();

        // 1/3 of the sample: percentage 33.33..., deduction 16.66...
        let pct = result.percentage(FruitCondition::Mengkal).unwrap();
        assert_eq!(pct.round_dp(2), dec("33.33"));

        let potongan = result.deduction(FruitCondition::Mengkal).unwrap();
        assert_eq!(potongan.round_dp(2), dec("16.67"));
    }

    #[test]
    fn audit_rounds_to_four_decimals() {
        let counts = BunchCounts {
            mengkal: 1,
            ..Default::default()
        };
        let result = GradingResult::compute(3, &counts).unwrap();

        let pct = result.percentage(FruitCondition::Mengkal).unwrap();
        assert_eq!(pct.round_dp(4), dec("33.3333"));
        assert_eq!(result.total_deduction_audit(), dec("18.6667"));
    }

    #[test]
    fn total_sums_unrounded_deductions() {
        let counts = BunchCounts {
            mengkal: 1,
            tikus: 1,
            ..Default::default()
        };
        let result = GradingResult::compute(7, &counts).unwrap();

        let expected = base_deduction()
            + result.deduction(FruitCondition::Mengkal).unwrap()
            + result.deduction(FruitCondition::Tikus).unwrap();
        assert_eq!(result.total_deduction, expected);
    }
}

// =============================================================================
// Property-Based Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Percentages are non-negative and zero exactly when the count is zero
    #[test]
    fn prop_percentage_sign(count in 0i32..=10_000, total in 1i32..=10_000) {
        let pct = condition_percentage(count, total);
        prop_assert!(pct >= Decimal::ZERO);
        prop_assert_eq!(pct == Decimal::ZERO, count == 0);
    }

    /// Each deduction is monotonically non-decreasing in its own percentage
    #[test]
    fn prop_deduction_monotonic(a in 0i32..=10_000, b in 0i32..=10_000) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let total = 10_000;

        for condition in FruitCondition::DEDUCTIBLE {
            let d_lo = condition_deduction(condition, condition_percentage(lo, total)).unwrap();
            let d_hi = condition_deduction(condition, condition_percentage(hi, total)).unwrap();
            prop_assert!(d_lo <= d_hi, "{} deduction decreased: {} -> {}", condition, d_lo, d_hi);
        }
    }

    /// Deductions are never negative
    #[test]
    fn prop_deduction_non_negative(count in 0i32..=10_000, total in 1i32..=10_000) {
        for condition in FruitCondition::DEDUCTIBLE {
            let d = condition_deduction(condition, condition_percentage(count, total)).unwrap();
            prop_assert!(d >= Decimal::ZERO);
        }
    }

    /// The total deduction never drops below the baseline
    #[test]
    fn prop_total_at_least_baseline(
        mengkal in 0i32..=1_000,
        over_ripe in 0i32..=1_000,
        tikus in 0i32..=1_000,
        tangkai_panjang in 0i32..=1_000,
        partenocarpic in 0i32..=1_000,
        total in 1i32..=1_000,
    ) {
        let counts = BunchCounts {
            mengkal,
            over_ripe,
            tikus,
            tangkai_panjang,
            partenocarpic,
            ..Default::default()
        };
        let result = GradingResult::compute(total, &counts).unwrap();
        prop_assert!(result.total_deduction >= base_deduction());
    }

    /// A non-positive total is always a validation failure
    #[test]
    fn prop_non_positive_total_rejected(total in -1_000i32..=0) {
        prop_assert!(GradingResult::compute(total, &BunchCounts::default()).is_err());
    }
}
