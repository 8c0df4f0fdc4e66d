use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Booking-related settings owned by a coach's business account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct BusinessSettings {
    pub business_user_id: Uuid,
    /// IANA zone name as typed in the settings screen. May be garbage.
    pub timezone: String,
    pub limit_customer_to_one_upcoming_appointment: bool,
}

impl BusinessSettings {
    /// Settings for a business that never saved any: UTC, no booking limit.
    pub fn defaults_for(business_user_id: Uuid) -> Self {
        Self {
            business_user_id,
            timezone: "UTC".into(),
            limit_customer_to_one_upcoming_appointment: false,
        }
    }
}
