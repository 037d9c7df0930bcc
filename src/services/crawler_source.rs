use tracing::info;

use crate::config::UnchangedUpdate;
use crate::db::Database;
use crate::error::{AppError, AppResult};
use crate::models::crawler_source::{CrawlerSource, CrawlerSourceUpdateForm};

pub struct CrawlerSourceService<'a> {
    db: &'a Database,
}

impl<'a> CrawlerSourceService<'a> {
    pub fn new(db: &'a Database) -> Self {
        CrawlerSourceService { db }
    }

    /// Store a new source and return it as read back from the store
    pub async fn insert_new_source(&self, source: &CrawlerSource) -> AppResult<CrawlerSource> {
        let sources = self.db.collection::<CrawlerSource>();
        let id = sources.insert(source).await?;
        info!("Created crawler source {} ({})", id, source.source_domain);

        sources
            .get_by_id(&id)
            .await?
            .ok_or_else(|| AppError::Internal("Failed to create crawler source".to_string()))
    }

    pub async fn get_source_by_id(&self, id: &str) -> AppResult<Option<CrawlerSource>> {
        Ok(self.db.collection::<CrawlerSource>().get_by_id(id).await?)
    }

    pub async fn get_sources(&self, limit: usize) -> AppResult<Vec<CrawlerSource>> {
        Ok(self.db.collection::<CrawlerSource>().list(limit).await?)
    }

    pub async fn update_source_by_id(
        &self,
        id: &str,
        form: &CrawlerSourceUpdateForm,
        unchanged: UnchangedUpdate,
    ) -> AppResult<CrawlerSource> {
        let fields = form.to_fields()?;
        super::merge_update(self.db, id, fields, unchanged).await
    }

    /// Returns false when no source had that id
    pub async fn delete_source_by_id(&self, id: &str) -> AppResult<bool> {
        let deleted = self.db.collection::<CrawlerSource>().delete_by_id(id).await?;
        if deleted > 0 {
            info!("Deleted crawler source {}", id);
        }
        Ok(deleted > 0)
    }
}
