use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::Document as DomainDocument;
use crate::infrastructure::database::schema::user_documents;

#[derive(Debug, Clone, Queryable, Selectable, Serialize, Identifiable)]
#[diesel(table_name = user_documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DocumentModel {
    pub id: Uuid,
    pub user_id: String,
    pub file_name: String,
    pub s3_key: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = user_documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewDocumentModel {
    pub id: Uuid,
    pub user_id: String,
    pub file_name: String,
    pub s3_key: String,
    pub created_at: DateTime<Utc>,
}

impl From<&DomainDocument> for NewDocumentModel {
    fn from(document: &DomainDocument) -> Self {
        Self {
            id: document.id(),
            user_id: document.user_id().to_string(),
            file_name: document.file_name().to_string(),
            s3_key: document.storage_key().to_string(),
            created_at: document.created_at(),
        }
    }
}

impl From<DocumentModel> for DomainDocument {
    fn from(model: DocumentModel) -> Self {
        DomainDocument::restore(
            model.id,
            model.user_id,
            model.file_name,
            model.s3_key,
            model.created_at,
        )
    }
}
