//! Validation utilities for the TAP Grading Platform
//!
//! Includes Indonesia-specific validations for the shipment paperwork
//! accompanying deliveries.

use crate::models::BunchCounts;

// ============================================================================
// Grading Sample Validations
// ============================================================================

/// Validate the total sampled bunch count
///
/// A non-positive total is a validation error, never a computed zero:
/// percentages must not be taken against it.
pub fn validate_total_sample(total: i32) -> Result<(), &'static str> {
    if total < 1 {
        return Err("Total janjang sampel must be at least 1");
    }
    Ok(())
}

/// Validate that every condition count is non-negative
pub fn validate_bunch_counts(counts: &BunchCounts) -> Result<(), &'static str> {
    let all = [
        counts.mengkal,
        counts.over_ripe,
        counts.tikus,
        counts.tangkai_panjang,
        counts.partenocarpic,
        counts.mentah,
        counts.busuk,
        counts.janjang_kosong,
        counts.brondolan_segar,
        counts.brondolan_busuk,
        counts.sampah,
        counts.abnormal,
        counts.burung,
        counts.tupai,
        counts.kempet,
    ];
    if all.iter().any(|&c| c < 0) {
        return Err("Condition counts cannot be negative");
    }
    Ok(())
}

// ============================================================================
// Shipment Identity Validations
// ============================================================================

/// Validate an SPB (surat pengantar buah) number
///
/// Accepts alphanumeric document numbers with the separators used on mill
/// paperwork, e.g. SPB/2025/00123 or SPB-0456.
pub fn validate_spb_number(spb: &str) -> Result<(), &'static str> {
    let trimmed = spb.trim();
    if trimmed.is_empty() {
        return Err("SPB number is required");
    }
    if trimmed.len() > 30 {
        return Err("SPB number must be at most 30 characters");
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '/' || c == '.')
    {
        return Err("SPB number contains invalid characters");
    }
    Ok(())
}

/// Validate the supplying estate name
pub fn validate_supplier(supplier: &str) -> Result<(), &'static str> {
    if supplier.trim().is_empty() {
        return Err("Supplier is required");
    }
    if supplier.len() > 100 {
        return Err("Supplier must be at most 100 characters");
    }
    Ok(())
}

/// Validate the driver name
pub fn validate_driver_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Driver name is required");
    }
    if name.len() > 100 {
        return Err("Driver name must be at most 100 characters");
    }
    Ok(())
}

// ============================================================================
// Indonesia-Specific Validations
// ============================================================================

/// Validate an Indonesian vehicle registration plate
///
/// Accepts: BM 1234 XY, B1234XY, bm-8821-tc. One or two region letters,
/// one to four digits, up to three trailing letters.
pub fn validate_vehicle_plate(plate: &str) -> Result<(), &'static str> {
    let normalized: String = plate
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect::<String>()
        .to_uppercase();

    if normalized.is_empty() {
        return Err("Vehicle plate is required");
    }
    if !normalized.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err("Vehicle plate contains invalid characters");
    }

    let region_len = normalized.chars().take_while(|c| c.is_ascii_alphabetic()).count();
    if region_len == 0 || region_len > 2 {
        return Err("Vehicle plate must start with a one or two letter region code");
    }

    let rest = &normalized[region_len..];
    let digit_len = rest.chars().take_while(|c| c.is_ascii_digit()).count();
    if digit_len == 0 || digit_len > 4 {
        return Err("Vehicle plate must contain one to four digits");
    }

    let suffix = &rest[digit_len..];
    if suffix.len() > 3 || !suffix.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err("Vehicle plate suffix must be at most three letters");
    }

    Ok(())
}
