use chrono::{DateTime, Utc};

use super::TruckType;

/// Platform share of every job price.
pub const COMMISSION_RATE: f64 = 0.20;

/// Billing floor for a trip, in minutes.
pub const MIN_TRIP_MINUTES: f64 = 1.0;

/// Quote shown before the trip: no time component since duration is unknown.
pub fn estimate_price(truck_type: TruckType, estimated_distance: f64) -> f64 {
    let rate = truck_type.pricing();
    rate.base_fare + rate.per_mile_rate * estimated_distance
}

pub fn final_fare(truck_type: TruckType, estimated_distance: f64, duration_minutes: f64) -> f64 {
    let rate = truck_type.pricing();
    rate.base_fare
        + rate.per_mile_rate * estimated_distance
        + rate.per_minute_rate * duration_minutes
}

pub fn commission(price: f64) -> f64 {
    price * COMMISSION_RATE
}

/// Elapsed trip time in fractional minutes, never below [`MIN_TRIP_MINUTES`].
pub fn trip_duration_minutes(started_at: DateTime<Utc>, completed_at: DateTime<Utc>) -> f64 {
    let elapsed_ms = (completed_at - started_at).num_milliseconds() as f64;
    (elapsed_ms / 60_000.0).max(MIN_TRIP_MINUTES)
}
