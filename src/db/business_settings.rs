use async_trait::async_trait;
use uuid::Uuid;

use super::{BusinessSettingsStore, PgStore};
use crate::models::business::BusinessSettings;

#[async_trait]
impl BusinessSettingsStore for PgStore {
    async fn find_business_settings(
        &self,
        business_user_id: Uuid,
    ) -> anyhow::Result<Option<BusinessSettings>> {
        let settings = sqlx::query_as::<_, BusinessSettings>(
            r#"
            SELECT business_user_id, timezone, limit_customer_to_one_upcoming_appointment
            FROM business_settings
            WHERE business_user_id = $1
            "#,
        )
        .bind(business_user_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(settings)
    }
}
