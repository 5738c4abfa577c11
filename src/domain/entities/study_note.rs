use pgvector::Vector;
use uuid::Uuid;

/// One embedded chunk of a document's text.
#[derive(Debug, Clone, PartialEq)]
pub struct StudyNote {
    id: Uuid,
    user_id: String,
    document_id: Uuid,
    content: String,
    embedding: Vector,
}

impl StudyNote {
    pub fn new(user_id: String, document_id: Uuid, content: String, embedding: Vector) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            document_id,
            content,
            embedding,
        }
    }

    // Getters
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn document_id(&self) -> Uuid {
        self.document_id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn embedding(&self) -> &Vector {
        &self.embedding
    }
}
