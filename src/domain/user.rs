use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{JobId, Role, Truck, TruckType, UserId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub profile: Profile,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            id: UserId::new(),
            name: name.into(),
            email: email.into(),
            phone: None,
            profile: Profile::default_for(role),
        }
    }

    pub fn role(&self) -> Role {
        self.profile.role()
    }

    pub fn driver_profile(&self) -> Option<&DriverProfile> {
        match &self.profile {
            Profile::Driver(profile) => Some(profile),
            Profile::Shipper(_) => None,
        }
    }

    pub fn driver_profile_mut(&mut self) -> Option<&mut DriverProfile> {
        match &mut self.profile {
            Profile::Driver(profile) => Some(profile),
            Profile::Shipper(_) => None,
        }
    }

    pub fn shipper_profile(&self) -> Option<&ShipperProfile> {
        match &self.profile {
            Profile::Shipper(profile) => Some(profile),
            Profile::Driver(_) => None,
        }
    }

    /// Truck category this user can currently be matched on. `None` unless the
    /// user is a driver marked available with a truck on file.
    pub fn matchable_truck_type(&self) -> Option<TruckType> {
        let profile = self.driver_profile()?;
        if !profile.is_available {
            return None;
        }
        profile.truck.as_ref().map(|t| t.truck_type)
    }
}

/// Role-specific profile data. The variant is the user's role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", content = "profileData")]
pub enum Profile {
    #[serde(rename = "SHIPPER")]
    Shipper(ShipperProfile),
    #[serde(rename = "DRIVER")]
    Driver(DriverProfile),
}

impl Profile {
    pub fn default_for(role: Role) -> Self {
        match role {
            Role::Shipper => Profile::Shipper(ShipperProfile::default()),
            Role::Driver => Profile::Driver(DriverProfile::default()),
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Profile::Shipper(_) => Role::Shipper,
            Profile::Driver(_) => Role::Driver,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipperProfile {
    pub payment_methods: Vec<PaymentMethod>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverProfile {
    pub documents: Vec<UserDocument>,
    pub truck: Option<Truck>,
    pub is_available: bool,
    pub payout_details: PayoutDetails,
    pub earnings_history: Vec<Earning>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    pub id: String,
    #[serde(rename = "type")]
    pub method_type: String,
    pub last4: String,
    /// MM/YY
    pub expiry: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDocument {
    pub id: String,
    pub name: String,
    pub file_name: String,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutDetails {
    pub account_number_last4: Option<String>,
    pub routing_number_last4: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Earning {
    pub id: String,
    pub job_id: JobId,
    pub amount: f64,
    pub date: DateTime<Utc>,
}
