//! Published receipts, stored as JSON documents in `shared_receipts`.

use engine::{EngineError, ResultEngine, SummaryDocument, SummarySink};
use sea_orm::{ActiveValue, entity::prelude::*};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "shared_receipts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub document: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Summary sink backed by the database. Rows are inserted, never updated.
#[derive(Clone, Debug)]
pub struct ReceiptStore {
    db: DatabaseConnection,
}

impl ReceiptStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl SummarySink for ReceiptStore {
    async fn publish(&self, document: &SummaryDocument) -> ResultEngine<String> {
        let json = serde_json::to_string(document)
            .map_err(|err| EngineError::Publish(err.to_string()))?;
        let id = document.id.to_string();
        let model = ActiveModel {
            id: ActiveValue::Set(id.clone()),
            title: ActiveValue::Set(document.title.clone()),
            document: ActiveValue::Set(json),
            created_at: ActiveValue::Set(document.created_at),
        };
        Entity::insert(model).exec(&self.db).await.map_err(|err| {
            tracing::error!("failed to store receipt {id}: {err}");
            EngineError::Publish("Failed to publish receipt".to_string())
        })?;
        Ok(id)
    }

    async fn fetch(&self, id: &str) -> ResultEngine<SummaryDocument> {
        let model = Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|err| {
                tracing::error!("failed to load receipt {id}: {err}");
                EngineError::Publish("Failed to load receipt".to_string())
            })?
            .ok_or_else(|| EngineError::SummaryNotFound(id.to_string()))?;
        serde_json::from_str(&model.document).map_err(|err| {
            tracing::error!("stored receipt {id} is corrupt: {err}");
            EngineError::Publish("Failed to load receipt".to_string())
        })
    }
}
