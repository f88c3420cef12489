use std::sync::Arc;
use std::time::Duration;

use axum::{extract::Request, middleware::Next, response::Response, Router};
use chrono::{TimeZone, Utc};
use fake::faker::lorem::en::Sentence;
use fake::Fake;
use wiremock::MockServer;

use crate::core::config::BackendConfig;
use crate::features::auth::models::{Role, Session};
use crate::features::complaints::models::{
    Attachment, Complaint, ComplaintDraft, ComplaintStatus, GeoPoint, Priority,
};
use crate::modules::backend::BackendClient;

/// Backend client pointed at a wiremock server
pub fn backend_for(server: &MockServer) -> Arc<BackendClient> {
    let config = BackendConfig {
        base_url: server.uri(),
        timeout: Duration::from_secs(5),
        user_agent: "complaint-portal-tests".to_string(),
    };
    Arc::new(BackendClient::new(&config).expect("test backend client"))
}

pub fn admin_session() -> Session {
    Session::new(Some("admin-1".to_string()), "admin@example.com", Role::Admin)
}

pub fn user_session(id: &str) -> Session {
    Session::new(Some(id.to_string()), format!("{}@example.com", id), Role::User)
}

/// Router that sees `session` on every request, as if the cookie had been sent
pub fn with_session(router: Router, session: Session) -> Router {
    router.layer(axum::middleware::from_fn(
        move |mut request: Request, next: Next| {
            let session = session.clone();
            async move {
                request.extensions_mut().insert(session);
                let response: Response = next.run(request).await;
                response
            }
        },
    ))
}

pub fn sample_complaint(
    id: &str,
    title: &str,
    category: &str,
    priority: Priority,
    status: ComplaintStatus,
) -> Complaint {
    Complaint {
        id: id.to_string(),
        title: title.to_string(),
        description: Sentence(3..8).fake(),
        category: category.to_string(),
        priority: Some(priority.as_str().to_string()),
        status: status.as_str().to_string(),
        location: Some(GeoPoint::new(19.0760, 72.8777)),
        address: None,
        assigned_department: None,
        status_history: Vec::new(),
        image_url: None,
        audio_url: None,
        user_id: Some("u1".to_string()),
        verified_by_citizen: None,
        is_duplicate: None,
        related_complaints: Vec::new(),
        created_at: Utc.with_ymd_and_hms(2024, 10, 12, 8, 30, 0).single(),
        updated_at: None,
        resolved_at: None,
    }
}

pub fn jpeg_attachment() -> Attachment {
    Attachment::new("pothole.jpg", "image/jpeg", b"jpeg-bytes".to_vec())
}

/// Draft with every required field filled in
pub fn complete_draft() -> ComplaintDraft {
    ComplaintDraft {
        title: "Pothole".to_string(),
        description: Sentence(4..10).fake(),
        location: Some(GeoPoint::new(19.1, 72.9)),
        image: Some(jpeg_attachment()),
        audio: None,
        user_id: None,
    }
}
