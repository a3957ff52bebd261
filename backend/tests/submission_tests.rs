//! Tests for the delivery submission workflow and the audit row contract

use chrono::{NaiveDate, NaiveDateTime};
use shared::{BunchCounts, DeliveryDraft, GradedDelivery, MediaReference, ShipmentIdentity};

fn identity() -> ShipmentIdentity {
    ShipmentIdentity {
        delivery_date: NaiveDate::from_ymd_opt(2025, 8, 5).unwrap(),
        spb_number: "SPB/2025/00123".to_string(),
        supplier: "Kebun Sei Galuh".to_string(),
        driver_name: "Budi Santoso".to_string(),
        vehicle_plate: "BM 8821 TC".to_string(),
        driver_photo: None,
    }
}

fn sample_counts() -> BunchCounts {
    BunchCounts {
        mengkal: 10,
        over_ripe: 20,
        tikus: 5,
        tangkai_panjang: 2,
        partenocarpic: 3,
        ..Default::default()
    }
}

// =============================================================================
// Two-Step Workflow Tests
// =============================================================================

mod workflow {
    use super::*;

    #[test]
    fn valid_identity_opens_a_draft() {
        let draft = DeliveryDraft::new(identity()).unwrap();
        assert_eq!(draft.identity.spb_number, "SPB/2025/00123");
    }

    #[test]
    fn bad_plate_is_rejected_at_step_one() {
        let mut bad = identity();
        bad.vehicle_plate = "12345".to_string();
        assert!(DeliveryDraft::new(bad).is_err());
    }

    #[test]
    fn empty_spb_is_rejected_at_step_one() {
        let mut bad = identity();
        bad.spb_number = "  ".to_string();
        assert!(DeliveryDraft::new(bad).is_err());
    }

    #[test]
    fn grading_closes_the_draft() {
        let graded = DeliveryDraft::new(identity())
            .unwrap()
            .grade(100, sample_counts())
            .unwrap();

        assert_eq!(graded.result.total_janjang, 100);
        assert_eq!(graded.result.total_deduction_display().to_string(), "11.97");
        assert_eq!(graded.identity.driver_name, "Budi Santoso");
    }

    #[test]
    fn invalid_total_fails_step_two() {
        let draft = DeliveryDraft::new(identity()).unwrap();
        assert!(draft.grade(0, sample_counts()).is_err());
    }

    #[test]
    fn submissions_get_distinct_ids() {
        let a = DeliveryDraft::new(identity())
            .unwrap()
            .grade(100, sample_counts())
            .unwrap();
        let b = DeliveryDraft::new(identity())
            .unwrap()
            .grade(100, sample_counts())
            .unwrap();
        assert_ne!(a.id, b.id);
    }
}

// =============================================================================
// Audit Row Contract Tests
// The header and row layout must stay compatible with the existing sheet
// =============================================================================

mod audit_row {
    use super::*;

    #[test]
    fn header_order_is_stable() {
        assert_eq!(
            GradedDelivery::sheet_header(),
            vec![
                "timestamp",
                "spb_number",
                "supplier",
                "driver_name",
                "vehicle_plate",
                "driver_photo_url",
                "total_janjang",
                "mengkal_jjg",
                "overripe_jjg",
                "tikus_jjg",
                "tangkai_jjg",
                "parteno_jjg",
                "mengkal_pct",
                "overripe_pct",
                "tikus_pct",
                "tangkai_pct",
                "parteno_pct",
                "mengkal_potongan",
                "overripe_potongan",
                "tikus_potongan",
                "tangkai_potongan",
                "parteno_potongan",
                "total_potongan_pct",
            ]
        );
    }

    #[test]
    fn row_matches_header_length() {
        let graded = DeliveryDraft::new(identity())
            .unwrap()
            .grade(100, sample_counts())
            .unwrap();
        assert_eq!(
            graded.to_sheet_row().len(),
            GradedDelivery::sheet_header().len()
        );
    }

    #[test]
    fn row_carries_identity_and_counts() {
        let graded = DeliveryDraft::new(identity())
            .unwrap()
            .grade(100, sample_counts())
            .unwrap();
        let row = graded.to_sheet_row();

        assert_eq!(row[1], "SPB/2025/00123");
        assert_eq!(row[2], "Kebun Sei Galuh");
        assert_eq!(row[3], "Budi Santoso");
        assert_eq!(row[4], "BM 8821 TC");
        assert_eq!(row[5], ""); // no photo uploaded
        assert_eq!(row[6], "100");
        assert_eq!(&row[7..12], ["10", "20", "5", "2", "3"]);
    }

    #[test]
    fn row_timestamp_uses_sheet_format() {
        let graded = DeliveryDraft::new(identity())
            .unwrap()
            .grade(100, sample_counts())
            .unwrap();
        let row = graded.to_sheet_row();

        assert!(NaiveDateTime::parse_from_str(&row[0], "%Y-%m-%d %H:%M:%S").is_ok());
    }

    #[test]
    fn row_values_are_rounded_to_four_decimals() {
        let counts = BunchCounts {
            mengkal: 1,
            ..Default::default()
        };
        let graded = DeliveryDraft::new(identity())
            .unwrap()
            .grade(3, counts)
            .unwrap();
        let row = graded.to_sheet_row();

        assert_eq!(row[12], "33.3333"); // mengkal_pct
        assert_eq!(row[17], "16.6667"); // mengkal_potongan
        assert_eq!(row[22], "18.6667"); // total_potongan_pct
    }

    #[test]
    fn photo_url_is_an_opaque_passthrough() {
        let mut with_photo = identity();
        with_photo.driver_photo = Some(MediaReference::photo(
            "https://drive.google.com/file/d/abc123/view".to_string(),
            Some("driver.jpg".to_string()),
        ));

        let graded = DeliveryDraft::new(with_photo)
            .unwrap()
            .grade(100, sample_counts())
            .unwrap();
        let row = graded.to_sheet_row();

        assert_eq!(row[5], "https://drive.google.com/file/d/abc123/view");
    }

    #[test]
    fn worked_example_row_totals() {
        let graded = DeliveryDraft::new(identity())
            .unwrap()
            .grade(100, sample_counts())
            .unwrap();
        let row = graded.to_sheet_row();

        assert_eq!(&row[12..17], ["10", "20", "5", "2", "3"]); // percentages
        assert_eq!(&row[17..22], ["5", "3.75", "0.75", "0.02", "0.45"]);
        assert_eq!(row[22], "11.97");
    }
}
