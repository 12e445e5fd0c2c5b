use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TruckType {
    #[serde(rename = "Pickup Truck")]
    Pickup,
    #[serde(rename = "Cargo Van")]
    CargoVan,
    #[serde(rename = "Small Box Truck (10ft)")]
    SmallBoxTruck,
}

/// Fixed fare components for one truck category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingRate {
    pub base_fare: f64,
    pub per_mile_rate: f64,
    pub per_minute_rate: f64,
}

/// Load limits for one truck category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruckSpecs {
    pub max_payload_lbs: u32,
    pub max_volume_cubic_ft: u32,
}

impl TruckType {
    pub const ALL: [TruckType; 3] = [
        TruckType::Pickup,
        TruckType::CargoVan,
        TruckType::SmallBoxTruck,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TruckType::Pickup => "Pickup Truck",
            TruckType::CargoVan => "Cargo Van",
            TruckType::SmallBoxTruck => "Small Box Truck (10ft)",
        }
    }

    pub fn pricing(&self) -> PricingRate {
        match self {
            TruckType::Pickup => PricingRate {
                base_fare: 25.0,
                per_mile_rate: 1.50,
                per_minute_rate: 0.25,
            },
            TruckType::CargoVan => PricingRate {
                base_fare: 40.0,
                per_mile_rate: 2.00,
                per_minute_rate: 0.40,
            },
            TruckType::SmallBoxTruck => PricingRate {
                base_fare: 60.0,
                per_mile_rate: 2.75,
                per_minute_rate: 0.60,
            },
        }
    }

    pub fn specs(&self) -> TruckSpecs {
        match self {
            TruckType::Pickup => TruckSpecs {
                max_payload_lbs: 1500,
                max_volume_cubic_ft: 50,
            },
            TruckType::CargoVan => TruckSpecs {
                max_payload_lbs: 3000,
                max_volume_cubic_ft: 250,
            },
            TruckType::SmallBoxTruck => TruckSpecs {
                max_payload_lbs: 5000,
                max_volume_cubic_ft: 450,
            },
        }
    }
}

impl FromStr for TruckType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TruckType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Invalid truck type: {}", s))
    }
}

impl fmt::Display for TruckType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A driver's registered vehicle. Capacity comes from the category, never from
/// user input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Truck {
    pub id: String,
    #[serde(rename = "type")]
    pub truck_type: TruckType,
    pub license_plate: String,
    pub make: String,
    pub model: String,
    pub year: String,
    pub max_payload_lbs: u32,
    pub max_volume_cubic_ft: u32,
}

impl Truck {
    pub fn new(
        truck_type: TruckType,
        license_plate: impl Into<String>,
        make: impl Into<String>,
        model: impl Into<String>,
        year: impl Into<String>,
    ) -> Self {
        let specs = truck_type.specs();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            truck_type,
            license_plate: license_plate.into(),
            make: make.into(),
            model: model.into(),
            year: year.into(),
            max_payload_lbs: specs.max_payload_lbs,
            max_volume_cubic_ft: specs.max_volume_cubic_ft,
        }
    }
}
