mod feedback;
mod job;
mod job_id;
mod job_status;
mod notification;
pub mod pricing;
mod role;
mod storage_key;
mod truck;
mod user;
mod user_id;

pub use feedback::{Feedback, MAX_RATING, MIN_RATING, RatingSummary};
pub use job::{Job, MAX_GOODS_PHOTOS, NewJob};
pub use job_id::JobId;
pub use job_status::JobStatus;
pub use notification::{Notification, NotificationKind};
pub use role::Role;
pub use storage_key::StorageKey;
pub use truck::{PricingRate, Truck, TruckSpecs, TruckType};
pub use user::{
    DriverProfile, Earning, PaymentMethod, PayoutDetails, Profile, ShipperProfile, User,
    UserDocument,
};
pub use user_id::UserId;
