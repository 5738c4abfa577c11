use diesel::prelude::*;
use pgvector::Vector;
use uuid::Uuid;

use crate::domain::entities::StudyNote;
use crate::infrastructure::database::schema::study_notes;

#[derive(Debug, Insertable)]
#[diesel(table_name = study_notes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewNoteModel {
    pub id: Uuid,
    pub content: String,
    pub embedding: Vector,
    pub user_id: String,
    pub document_id: Uuid,
}

impl From<&StudyNote> for NewNoteModel {
    fn from(note: &StudyNote) -> Self {
        Self {
            id: note.id(),
            content: note.content().to_string(),
            embedding: note.embedding().clone(),
            user_id: note.user_id().to_string(),
            document_id: note.document_id(),
        }
    }
}
