use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

use crate::application::use_cases::{
    ListDocumentsUseCase, list_documents::ListDocumentsError,
};
use crate::presentation::http::dto::{
    ApiResponse, DocumentListResponseDto, DocumentResponseDto, ListDocumentsQueryDto,
};

pub struct DocumentHandler {
    list_documents_use_case: Arc<ListDocumentsUseCase>,
}

impl DocumentHandler {
    pub fn new(list_documents_use_case: Arc<ListDocumentsUseCase>) -> Self {
        Self {
            list_documents_use_case,
        }
    }

    pub async fn list_documents(
        State(handler): State<Arc<DocumentHandler>>,
        Query(query): Query<ListDocumentsQueryDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let user_id = query.user_id.unwrap_or_default();

        match handler.list_documents_use_case.execute(&user_id).await {
            Ok(summaries) => {
                let documents: Vec<DocumentResponseDto> = summaries
                    .into_iter()
                    .map(DocumentResponseDto::from)
                    .collect();
                let dto = DocumentListResponseDto {
                    total: documents.len(),
                    documents,
                };

                Ok((StatusCode::OK, Json(ApiResponse::success(dto))))
            }
            Err(ListDocumentsError::ValidationError(message)) => Ok((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<DocumentListResponseDto>::error(
                    "INVALID_USER".to_string(),
                    message,
                    None,
                )),
            )),
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<DocumentListResponseDto>::error(
                    "LIST_FAILED".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
        }
    }
}
