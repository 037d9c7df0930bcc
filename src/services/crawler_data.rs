use tracing::info;

use crate::config::UnchangedUpdate;
use crate::db::Database;
use crate::error::{AppError, AppResult};
use crate::models::crawler_data::{CrawlerData, CrawlerDataUpdateForm};
use crate::models::crawler_source::CrawlerSource;
use crate::models::Record;

pub struct CrawlerDataService<'a> {
    db: &'a Database,
}

impl<'a> CrawlerDataService<'a> {
    pub fn new(db: &'a Database) -> Self {
        CrawlerDataService { db }
    }

    /// `sourceId` must name an existing crawler source
    async fn ensure_source_exists(&self, source_id: &str) -> AppResult<()> {
        let exists = self
            .db
            .collection::<CrawlerSource>()
            .get_by_id(source_id)
            .await?
            .is_some();

        if exists {
            Ok(())
        } else {
            Err(AppError::Validation(format!(
                "sourceId: {}",
                CrawlerSource::not_found_message(source_id)
            )))
        }
    }

    pub async fn insert_new_data(&self, data: &CrawlerData) -> AppResult<CrawlerData> {
        self.ensure_source_exists(&data.source_id).await?;

        let items = self.db.collection::<CrawlerData>();
        let id = items.insert(data).await?;
        info!("Created crawler data {} for source {}", id, data.source_id);

        items
            .get_by_id(&id)
            .await?
            .ok_or_else(|| AppError::Internal("Failed to create crawler data".to_string()))
    }

    pub async fn get_data_by_id(&self, id: &str) -> AppResult<Option<CrawlerData>> {
        Ok(self.db.collection::<CrawlerData>().get_by_id(id).await?)
    }

    pub async fn get_data(&self, limit: usize) -> AppResult<Vec<CrawlerData>> {
        Ok(self.db.collection::<CrawlerData>().list(limit).await?)
    }

    pub async fn update_data_by_id(
        &self,
        id: &str,
        form: &CrawlerDataUpdateForm,
        unchanged: UnchangedUpdate,
    ) -> AppResult<CrawlerData> {
        // Only a changed reference is checked; the stored source may be gone
        if let Some(ref source_id) = form.source_id {
            let stored = self.get_data_by_id(id).await?;
            if stored.is_some_and(|data| &data.source_id != source_id) {
                self.ensure_source_exists(source_id).await?;
            }
        }

        let fields = form.to_fields()?;
        super::merge_update(self.db, id, fields, unchanged).await
    }

    pub async fn delete_data_by_id(&self, id: &str) -> AppResult<bool> {
        let deleted = self.db.collection::<CrawlerData>().delete_by_id(id).await?;
        if deleted > 0 {
            info!("Deleted crawler data {}", id);
        }
        Ok(deleted > 0)
    }
}
