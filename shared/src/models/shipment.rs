//! Shipment identity models
//!
//! Identity data collected in step one of the delivery form, before any
//! bunches are counted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::MediaReference;

/// Identity of one truck delivery arriving at the mill
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipmentIdentity {
    pub delivery_date: NaiveDate,
    /// Surat pengantar buah number from the accompanying delivery note
    pub spb_number: String,
    /// Supplying estate or kebun
    pub supplier: String,
    pub driver_name: String,
    pub vehicle_plate: String,
    /// Uploaded driver photo; the URL is an opaque string produced by the
    /// drive collaborator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_photo: Option<MediaReference>,
}

impl ShipmentIdentity {
    pub fn driver_photo_url(&self) -> &str {
        self.driver_photo.as_ref().map(|p| p.url.as_str()).unwrap_or("")
    }
}
