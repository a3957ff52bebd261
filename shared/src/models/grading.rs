//! Fruit bunch grading models
//!
//! Implements the mill's TAP deduction table: percentages per sampled
//! condition and the fixed potongan formulas applied on top of the 2%
//! baseline deduction.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::validation::{validate_bunch_counts, validate_total_sample};

/// Recognized fruit bunch conditions
///
/// The first five carry a deduction formula; the rest are informational and
/// only get a percentage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FruitCondition {
    Mengkal,
    OverRipe,
    Tikus,
    TangkaiPanjang,
    Partenocarpic,
    Mentah,
    Busuk,
    JanjangKosong,
    BrondolanSegar,
    BrondolanBusuk,
    Sampah,
    Abnormal,
    Burung,
    Tupai,
    Kempet,
}

impl FruitCondition {
    /// All conditions in form order: deduction-bearing first
    pub const ALL: [FruitCondition; 15] = [
        FruitCondition::Mengkal,
        FruitCondition::OverRipe,
        FruitCondition::Tikus,
        FruitCondition::TangkaiPanjang,
        FruitCondition::Partenocarpic,
        FruitCondition::Mentah,
        FruitCondition::Busuk,
        FruitCondition::JanjangKosong,
        FruitCondition::BrondolanSegar,
        FruitCondition::BrondolanBusuk,
        FruitCondition::Sampah,
        FruitCondition::Abnormal,
        FruitCondition::Burung,
        FruitCondition::Tupai,
        FruitCondition::Kempet,
    ];

    /// The five conditions subject to a deduction formula
    pub const DEDUCTIBLE: [FruitCondition; 5] = [
        FruitCondition::Mengkal,
        FruitCondition::OverRipe,
        FruitCondition::Tikus,
        FruitCondition::TangkaiPanjang,
        FruitCondition::Partenocarpic,
    ];

    /// Human-readable label as printed on the grading form
    pub fn label(&self) -> &'static str {
        match self {
            FruitCondition::Mengkal => "Mengkal",
            FruitCondition::OverRipe => "Over Ripe",
            FruitCondition::Tikus => "Tikus",
            FruitCondition::TangkaiPanjang => "Tangkai Panjang",
            FruitCondition::Partenocarpic => "Partenocarpic",
            FruitCondition::Mentah => "Mentah",
            FruitCondition::Busuk => "Busuk",
            FruitCondition::JanjangKosong => "Janjang Kosong",
            FruitCondition::BrondolanSegar => "Brondolan Segar",
            FruitCondition::BrondolanBusuk => "Brondolan Busuk",
            FruitCondition::Sampah => "Sampah",
            FruitCondition::Abnormal => "Abnormal",
            FruitCondition::Burung => "Burung",
            FruitCondition::Tupai => "Tupai",
            FruitCondition::Kempet => "Kempet",
        }
    }

    /// Snake-case field name, matching [`BunchCounts`] and input payloads
    pub fn field_name(&self) -> &'static str {
        match self {
            FruitCondition::Mengkal => "mengkal",
            FruitCondition::OverRipe => "over_ripe",
            FruitCondition::Tikus => "tikus",
            FruitCondition::TangkaiPanjang => "tangkai_panjang",
            FruitCondition::Partenocarpic => "partenocarpic",
            FruitCondition::Mentah => "mentah",
            FruitCondition::Busuk => "busuk",
            FruitCondition::JanjangKosong => "janjang_kosong",
            FruitCondition::BrondolanSegar => "brondolan_segar",
            FruitCondition::BrondolanBusuk => "brondolan_busuk",
            FruitCondition::Sampah => "sampah",
            FruitCondition::Abnormal => "abnormal",
            FruitCondition::Burung => "burung",
            FruitCondition::Tupai => "tupai",
            FruitCondition::Kempet => "kempet",
        }
    }

    /// Resolve a form label to a condition
    ///
    /// Accepts the label variants seen across form revisions: "Tikus >50%"
    /// versus plain "Tikus", and "Parteno" versus "Partenocarpic".
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label.trim();
        let normalized = normalized
            .strip_suffix(">50%")
            .map(str::trim)
            .unwrap_or(normalized);

        match normalized.to_lowercase().as_str() {
            "mengkal" => Some(FruitCondition::Mengkal),
            "over ripe" | "overripe" => Some(FruitCondition::OverRipe),
            "tikus" => Some(FruitCondition::Tikus),
            "tangkai panjang" | "tangkai" => Some(FruitCondition::TangkaiPanjang),
            "partenocarpic" | "parteno" => Some(FruitCondition::Partenocarpic),
            "mentah" => Some(FruitCondition::Mentah),
            "busuk" => Some(FruitCondition::Busuk),
            "janjang kosong" => Some(FruitCondition::JanjangKosong),
            "brondolan segar" => Some(FruitCondition::BrondolanSegar),
            "brondolan busuk" => Some(FruitCondition::BrondolanBusuk),
            "sampah" => Some(FruitCondition::Sampah),
            "abnormal" => Some(FruitCondition::Abnormal),
            "burung" => Some(FruitCondition::Burung),
            "tupai" => Some(FruitCondition::Tupai),
            "kempet" => Some(FruitCondition::Kempet),
            _ => None,
        }
    }

    /// Deduction coefficient applied to the condition percentage
    ///
    /// None for informational conditions, which never deduct.
    pub fn deduction_rate(&self) -> Option<Decimal> {
        match self {
            FruitCondition::Mengkal => Some(Decimal::new(50, 2)),
            FruitCondition::OverRipe => Some(Decimal::new(25, 2)),
            FruitCondition::Tikus => Some(Decimal::new(15, 2)),
            FruitCondition::TangkaiPanjang => Some(Decimal::new(1, 2)),
            FruitCondition::Partenocarpic => Some(Decimal::new(15, 2)),
            _ => None,
        }
    }

    /// Free percentage allowance before the deduction starts
    ///
    /// Over Ripe tolerates up to 5% before being penalized; every other
    /// deductible condition is penalized from the first bunch.
    pub fn tolerance_percent(&self) -> Decimal {
        match self {
            FruitCondition::OverRipe => Decimal::from(5),
            _ => Decimal::ZERO,
        }
    }

    pub fn is_deductible(&self) -> bool {
        self.deduction_rate().is_some()
    }
}

impl std::fmt::Display for FruitCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Sampled bunch counts per condition
///
/// Informational counts default to zero so older two-step forms that only
/// submit the five deductible conditions keep working.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BunchCounts {
    pub mengkal: i32,
    pub over_ripe: i32,
    pub tikus: i32,
    pub tangkai_panjang: i32,
    pub partenocarpic: i32,
    #[serde(default)]
    pub mentah: i32,
    #[serde(default)]
    pub busuk: i32,
    #[serde(default)]
    pub janjang_kosong: i32,
    #[serde(default)]
    pub brondolan_segar: i32,
    #[serde(default)]
    pub brondolan_busuk: i32,
    #[serde(default)]
    pub sampah: i32,
    #[serde(default)]
    pub abnormal: i32,
    #[serde(default)]
    pub burung: i32,
    #[serde(default)]
    pub tupai: i32,
    #[serde(default)]
    pub kempet: i32,
}

impl BunchCounts {
    pub fn count(&self, condition: FruitCondition) -> i32 {
        match condition {
            FruitCondition::Mengkal => self.mengkal,
            FruitCondition::OverRipe => self.over_ripe,
            FruitCondition::Tikus => self.tikus,
            FruitCondition::TangkaiPanjang => self.tangkai_panjang,
            FruitCondition::Partenocarpic => self.partenocarpic,
            FruitCondition::Mentah => self.mentah,
            FruitCondition::Busuk => self.busuk,
            FruitCondition::JanjangKosong => self.janjang_kosong,
            FruitCondition::BrondolanSegar => self.brondolan_segar,
            FruitCondition::BrondolanBusuk => self.brondolan_busuk,
            FruitCondition::Sampah => self.sampah,
            FruitCondition::Abnormal => self.abnormal,
            FruitCondition::Burung => self.burung,
            FruitCondition::Tupai => self.tupai,
            FruitCondition::Kempet => self.kempet,
        }
    }
}

/// Baseline deduction applied to every delivery regardless of conditions
pub fn base_deduction() -> Decimal {
    Decimal::TWO
}

/// Round a value for display with exactly two decimal places
///
/// Keeps the table and CSV output aligned, e.g. `10` renders as `10.00`.
pub fn display_rounded(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp(2);
    rounded.rescale(2);
    rounded
}

/// Percentage of the sample in the given condition
///
/// Callers must have validated `total >= 1`.
pub fn condition_percentage(count: i32, total: i32) -> Decimal {
    Decimal::from(count) / Decimal::from(total) * Decimal::ONE_HUNDRED
}

/// Deduction for a condition at the given percentage
///
/// None for informational conditions. The Over Ripe tolerance is clamped so
/// percentages at or below the allowance deduct exactly zero.
pub fn condition_deduction(condition: FruitCondition, percentage: Decimal) -> Option<Decimal> {
    let rate = condition.deduction_rate()?;
    let over_tolerance = (percentage - condition.tolerance_percent()).max(Decimal::ZERO);
    Some(rate * over_tolerance)
}

/// Per-condition grading outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionResult {
    pub condition: FruitCondition,
    pub count: i32,
    /// Unrounded percentage of the sample
    pub percentage: Decimal,
    /// Unrounded deduction; None for informational conditions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deduction: Option<Decimal>,
}

/// Complete grading outcome for one delivery sample
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradingResult {
    pub total_janjang: i32,
    /// Per-condition results in form order
    pub conditions: Vec<ConditionResult>,
    /// Baseline plus the five deductions, summed before any rounding
    pub total_deduction: Decimal,
}

impl GradingResult {
    /// Grade a sample
    ///
    /// Rejects a non-positive total and negative counts before computing
    /// anything. The total deduction is summed from unrounded per-condition
    /// deductions; rounding happens only at the display and persistence
    /// boundaries.
    pub fn compute(total_janjang: i32, counts: &BunchCounts) -> Result<Self, &'static str> {
        validate_total_sample(total_janjang)?;
        validate_bunch_counts(counts)?;

        let conditions: Vec<ConditionResult> = FruitCondition::ALL
            .iter()
            .map(|&condition| {
                let count = counts.count(condition);
                let percentage = condition_percentage(count, total_janjang);
                ConditionResult {
                    condition,
                    count,
                    percentage,
                    deduction: condition_deduction(condition, percentage),
                }
            })
            .collect();

        let total_deduction = base_deduction()
            + conditions
                .iter()
                .filter_map(|c| c.deduction)
                .sum::<Decimal>();

        Ok(Self {
            total_janjang,
            conditions,
            total_deduction,
        })
    }

    pub fn percentage(&self, condition: FruitCondition) -> Option<Decimal> {
        self.conditions
            .iter()
            .find(|c| c.condition == condition)
            .map(|c| c.percentage)
    }

    pub fn deduction(&self, condition: FruitCondition) -> Option<Decimal> {
        self.conditions
            .iter()
            .find(|c| c.condition == condition)
            .and_then(|c| c.deduction)
    }

    /// Total deduction rounded for display (2 dp)
    pub fn total_deduction_display(&self) -> Decimal {
        display_rounded(self.total_deduction)
    }

    /// Total deduction rounded for the audit trail (4 dp)
    pub fn total_deduction_audit(&self) -> Decimal {
        self.total_deduction.round_dp(4)
    }
}
