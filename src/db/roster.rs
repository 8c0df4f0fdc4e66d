use async_trait::async_trait;
use uuid::Uuid;

use super::{PgStore, RosterStore};

#[async_trait]
impl RosterStore for PgStore {
    async fn is_client_of(&self, business_user_id: Uuid, client_id: Uuid) -> anyhow::Result<bool> {
        let linked = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM coach_clients
                WHERE business_user_id = $1 AND client_id = $2
            )
            "#,
        )
        .bind(business_user_id)
        .bind(client_id)
        .fetch_one(&self.db)
        .await?;

        Ok(linked)
    }
}
