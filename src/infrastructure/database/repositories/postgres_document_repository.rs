use async_trait::async_trait;
use diesel::prelude::*;

use crate::domain::entities::Document;
use crate::domain::repositories::document_repository::{
    DocumentRepository, DocumentRepositoryError, ResolvedDocument,
};
use crate::domain::value_objects::UploadPath;
use crate::infrastructure::database::models::{DocumentModel, NewDocumentModel};
use crate::infrastructure::database::schema::user_documents;
use crate::infrastructure::database::{DbPool, with_connection};

pub struct PostgresDocumentRepository {
    pool: DbPool,
}

impl PostgresDocumentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentRepository for PostgresDocumentRepository {
    async fn resolve_or_create(
        &self,
        upload: &UploadPath,
    ) -> Result<ResolvedDocument, DocumentRepositoryError> {
        let candidate = Document::new(
            upload.user_id().to_string(),
            upload.file_name().to_string(),
            upload.storage_key().to_string(),
        );
        let new_document = NewDocumentModel::from(&candidate);
        let key = upload.storage_key().to_string();

        let (model, was_existing) = with_connection(&self.pool, move |conn| {
            let existing = user_documents::table
                .filter(user_documents::s3_key.eq(&key))
                .select(DocumentModel::as_select())
                .first(conn)
                .optional()?;
            if let Some(existing) = existing {
                return Ok((existing, true));
            }

            // The unique constraint on s3_key settles concurrent inserts; the
            // loser gets no row back and reads the winner's.
            let inserted = diesel::insert_into(user_documents::table)
                .values(&new_document)
                .on_conflict(user_documents::s3_key)
                .do_nothing()
                .get_result::<DocumentModel>(conn)
                .optional()?;

            match inserted {
                Some(model) => Ok((model, false)),
                None => {
                    let winner = user_documents::table
                        .filter(user_documents::s3_key.eq(&key))
                        .select(DocumentModel::as_select())
                        .first(conn)?;
                    Ok((winner, true))
                }
            }
        })
        .await
        .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        Ok(ResolvedDocument {
            document: Document::from(model),
            was_existing,
        })
    }

    async fn find_by_storage_key(
        &self,
        storage_key: &str,
    ) -> Result<Option<Document>, DocumentRepositoryError> {
        let key = storage_key.to_string();

        let model = with_connection(&self.pool, move |conn| {
            user_documents::table
                .filter(user_documents::s3_key.eq(&key))
                .select(DocumentModel::as_select())
                .first(conn)
                .optional()
        })
        .await
        .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        Ok(model.map(Document::from))
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Document>, DocumentRepositoryError> {
        let owner = user_id.to_string();

        let models = with_connection(&self.pool, move |conn| {
            user_documents::table
                .filter(user_documents::user_id.eq(&owner))
                .order(user_documents::created_at.desc())
                .select(DocumentModel::as_select())
                .load(conn)
        })
        .await
        .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        Ok(models.into_iter().map(Document::from).collect())
    }
}
