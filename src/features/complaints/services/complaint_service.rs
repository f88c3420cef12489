use reqwest::multipart::{Form, Part};
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::auth::models::Session;
use crate::features::complaints::dtos::{BackendStatusUpdate, SubmissionReceiptDto};
use crate::features::complaints::models::{
    Attachment, Complaint, ComplaintDraft, ComplaintEnvelope, ComplaintStatus,
};
use crate::modules::backend::BackendClient;
use crate::shared::validation::ensure_identifier;

/// Complaint reads and mutations against the backend
pub struct ComplaintService {
    backend: Arc<BackendClient>,
}

impl ComplaintService {
    pub fn new(backend: Arc<BackendClient>) -> Self {
        Self { backend }
    }

    // ========================================================================
    // Reads
    // ========================================================================

    pub async fn get(&self, complaint_id: &str) -> Result<Complaint> {
        ensure_identifier("complaint id", complaint_id)?;
        let path = format!("/api/complaints/{}", BackendClient::segment(complaint_id));

        let envelope: ComplaintEnvelope = self.backend.get_json(&path, &[]).await?;
        envelope
            .into_first()
            .ok_or_else(|| AppError::NotFound(format!("Complaint {} not found", complaint_id)))
    }

    pub async fn list_all(&self) -> Result<Vec<Complaint>> {
        let envelope: ComplaintEnvelope = self.backend.get_json("/api/complaints/all", &[]).await?;
        Ok(envelope.into_vec())
    }

    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<Complaint>> {
        ensure_identifier("user id", user_id)?;
        let path = format!("/api/complaints/user/{}", BackendClient::segment(user_id));

        let envelope: ComplaintEnvelope = self.backend.get_json(&path, &[]).await?;
        Ok(envelope.into_vec())
    }

    /// Admins see every complaint, everyone else only their own
    pub async fn list_for_session(&self, session: &Session) -> Result<Vec<Complaint>> {
        if session.is_admin() {
            return self.list_all().await;
        }
        let user_id = session.user_id().ok_or_else(|| {
            AppError::Unauthorized("Session does not carry a user id".to_string())
        })?;
        self.list_for_user(user_id).await
    }

    // ========================================================================
    // Submission
    // ========================================================================

    /// Post the draft. Validation failures return before any request is sent.
    /// The draft is cleared only after the backend accepts it.
    pub async fn submit(&self, draft: &mut ComplaintDraft) -> Result<SubmissionReceiptDto> {
        let submission = draft.validate()?;

        let mut form = Form::new()
            .text("title", submission.title.clone())
            .text("description", submission.description.clone())
            .text("latitude", submission.location.latitude.to_string())
            .text("longitude", submission.location.longitude.to_string())
            .part("image", attachment_part(&submission.image)?);

        if let Some(audio) = &submission.audio {
            form = form.part("audio", attachment_part(audio)?);
        }
        if let Some(user_id) = &submission.user_id {
            form = form.text("user_id", user_id.clone());
        }

        let response: serde_json::Value = self
            .backend
            .post_multipart("/api/complaints/submit", form)
            .await
            .map_err(|e| {
                tracing::error!("Complaint submission failed: {}", e);
                e
            })?;

        let receipt = SubmissionReceiptDto::from_backend(&response);
        tracing::info!(
            "Complaint '{}' submitted (id: {})",
            submission.title,
            receipt.complaint_id.as_deref().unwrap_or("-")
        );
        draft.reset();
        Ok(receipt)
    }

    // ========================================================================
    // Status
    // ========================================================================

    /// Ask the backend for a status transition and return the updated complaint
    pub async fn update_status(
        &self,
        complaint_id: &str,
        status: ComplaintStatus,
        updated_by: &str,
        comment: Option<&str>,
    ) -> Result<Complaint> {
        ensure_identifier("complaint id", complaint_id)?;
        let path = format!(
            "/api/complaints/{}/status",
            BackendClient::segment(complaint_id)
        );
        let body = BackendStatusUpdate {
            status: status.as_str(),
            updated_by,
            comment: comment.unwrap_or(""),
        };

        self.backend
            .patch_json::<_, serde_json::Value>(&path, &body)
            .await
            .map_err(|e| {
                tracing::error!(
                    "Failed to set complaint {} to {}: {}",
                    complaint_id,
                    status,
                    e
                );
                e
            })?;

        tracing::info!("Complaint {} set to {} by {}", complaint_id, status, updated_by);
        self.get(complaint_id).await
    }

    pub async fn resolve(
        &self,
        complaint_id: &str,
        updated_by: &str,
        comment: Option<&str>,
    ) -> Result<Complaint> {
        let comment = comment.filter(|c| !c.trim().is_empty()).unwrap_or("Marked as resolved");
        self.update_status(complaint_id, ComplaintStatus::Resolved, updated_by, Some(comment))
            .await
    }
}

fn attachment_part(attachment: &Attachment) -> Result<Part> {
    Part::bytes(attachment.bytes.clone())
        .file_name(attachment.file_name.clone())
        .mime_str(&attachment.content_type)
        .map_err(|e| {
            AppError::Validation(format!(
                "Invalid content type '{}': {}",
                attachment.content_type, e
            ))
        })
}
