use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Feedback, JobId, JobStatus, TruckType, UserId, pricing};

pub const MAX_GOODS_PHOTOS: usize = 3;

/// Shipment request as submitted by a shipper, before the platform assigns
/// identity, pricing and status.
#[derive(Debug, Clone, PartialEq)]
pub struct NewJob {
    pub pickup_address: String,
    pub dropoff_address: String,
    pub goods_description: String,
    pub goods_photos: Vec<String>,
    pub truck_type_requested: TruckType,
    pub estimated_distance: f64,
}

impl NewJob {
    pub fn validate(&self) -> Result<(), String> {
        if self.pickup_address.trim().is_empty() {
            return Err("pickup address is required".to_string());
        }
        if self.dropoff_address.trim().is_empty() {
            return Err("dropoff address is required".to_string());
        }
        if self.goods_description.trim().is_empty() {
            return Err("goods description is required".to_string());
        }
        if self.goods_photos.len() > MAX_GOODS_PHOTOS {
            return Err(format!(
                "at most {} photos allowed, got {}",
                MAX_GOODS_PHOTOS,
                self.goods_photos.len()
            ));
        }
        if !self.estimated_distance.is_finite() || self.estimated_distance < 0.0 {
            return Err(format!(
                "estimated distance must be a non-negative number, got {}",
                self.estimated_distance
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    pub shipper_id: UserId,
    pub driver_id: Option<UserId>,
    pub pickup_address: String,
    pub dropoff_address: String,
    pub goods_description: String,
    pub goods_photos: Vec<String>,
    pub truck_type_requested: TruckType,
    pub status: JobStatus,
    pub estimated_price: f64,
    pub estimated_distance: f64,
    pub final_fare: Option<f64>,
    pub commission: f64,
    pub created_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub started_trip_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    /// Left by the driver about the shipper.
    pub shipper_feedback: Option<Feedback>,
    /// Left by the shipper about the driver.
    pub driver_feedback: Option<Feedback>,
}

impl Job {
    pub fn new(details: NewJob, shipper_id: UserId, created_at: DateTime<Utc>) -> Self {
        let estimated_price =
            pricing::estimate_price(details.truck_type_requested, details.estimated_distance);
        Self {
            id: JobId::new(),
            shipper_id,
            driver_id: None,
            pickup_address: details.pickup_address,
            dropoff_address: details.dropoff_address,
            goods_description: details.goods_description,
            goods_photos: details.goods_photos,
            truck_type_requested: details.truck_type_requested,
            status: JobStatus::Pending,
            estimated_price,
            estimated_distance: details.estimated_distance,
            final_fare: None,
            commission: pricing::commission(estimated_price),
            created_at,
            accepted_at: None,
            started_trip_at: None,
            completed_at: None,
            shipper_feedback: None,
            driver_feedback: None,
        }
    }
}
