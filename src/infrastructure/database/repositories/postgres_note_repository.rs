use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::StudyNote;
use crate::domain::repositories::note_repository::{NoteRepository, NoteRepositoryError};
use crate::infrastructure::database::models::NewNoteModel;
use crate::infrastructure::database::schema::study_notes;
use crate::infrastructure::database::{DbPool, with_connection};

pub struct PostgresNoteRepository {
    pool: DbPool,
}

impl PostgresNoteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NoteRepository for PostgresNoteRepository {
    // A single INSERT outside any transaction, so it is committed on return.
    async fn save(&self, note: &StudyNote) -> Result<(), NoteRepositoryError> {
        let new_note = NewNoteModel::from(note);

        with_connection(&self.pool, move |conn| {
            diesel::insert_into(study_notes::table)
                .values(&new_note)
                .execute(conn)
        })
        .await
        .map_err(|e| NoteRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn count_by_document_id(&self, document_id: Uuid) -> Result<i64, NoteRepositoryError> {
        with_connection(&self.pool, move |conn| {
            study_notes::table
                .filter(study_notes::document_id.eq(document_id))
                .count()
                .get_result(conn)
        })
        .await
        .map_err(|e| NoteRepositoryError::DatabaseError(e.to_string()))
    }
}
