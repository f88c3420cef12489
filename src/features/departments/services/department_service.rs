use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use futures::future::join_all;

use crate::core::error::{AppError, Result};
use crate::features::complaints::services::ComplaintService;
use crate::features::departments::dtos::*;
use crate::features::departments::models::{
    Department, ReassignmentControl, REASSIGN_BUSY_MESSAGE,
};
use crate::modules::backend::BackendClient;

/// Department stats, department complaint lists and reassignment
pub struct DepartmentService {
    backend: Arc<BackendClient>,
    complaints: Arc<ComplaintService>,
    /// Complaint ids with a reassignment request in flight
    in_flight: Mutex<HashSet<String>>,
}

/// Holds a complaint id in the in-flight set until dropped
struct InFlightGuard<'a> {
    set: &'a Mutex<HashSet<String>>,
    id: String,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        let mut set = self.set.lock().unwrap_or_else(|e| e.into_inner());
        set.remove(&self.id);
    }
}

impl DepartmentService {
    pub fn new(backend: Arc<BackendClient>, complaints: Arc<ComplaintService>) -> Self {
        Self {
            backend,
            complaints,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    // ========================================================================
    // Stats
    // ========================================================================

    pub async fn stats(&self, department: Department) -> Result<DepartmentStatsDto> {
        let path = format!(
            "/api/departments/{}/stats",
            BackendClient::segment(department.label())
        );
        self.backend.get_json(&path, &[]).await
    }

    /// Stats for every department, fetched concurrently. A department whose
    /// request fails is left out.
    pub async fn overview(&self) -> DepartmentsOverviewDto {
        let results = join_all(Department::ALL.into_iter().map(|d| self.stats(d))).await;

        let stats = Department::ALL
            .into_iter()
            .zip(results)
            .filter_map(|(department, result)| match result {
                Ok(stats) => Some(stats),
                Err(e) => {
                    tracing::warn!("Skipping stats for {}: {}", department, e);
                    None
                }
            })
            .collect();

        DepartmentsOverviewDto::from_stats(stats)
    }

    // ========================================================================
    // Complaints
    // ========================================================================

    pub async fn complaints(
        &self,
        department: Department,
        query: DepartmentComplaintsQuery,
    ) -> Result<DepartmentComplaintsDto> {
        let path = format!(
            "/api/departments/{}/complaints",
            BackendClient::segment(department.label())
        );
        let envelope: DepartmentComplaintsEnvelope = self.backend.get_json(&path, &[]).await?;
        let all = envelope.into_vec();

        let counts = DepartmentCountsDto::tally(&all);
        let complaints = all
            .into_iter()
            .filter(|c| query.matches(c))
            .map(DepartmentComplaintRowDto::from)
            .collect();

        Ok(DepartmentComplaintsDto {
            department,
            complaints,
            counts,
            filters: query,
        })
    }

    // ========================================================================
    // Reassignment
    // ========================================================================

    fn acquire(&self, complaint_id: &str) -> Result<InFlightGuard<'_>> {
        let mut set = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        if !set.insert(complaint_id.to_string()) {
            return Err(AppError::Conflict(REASSIGN_BUSY_MESSAGE.to_string()));
        }
        Ok(InFlightGuard {
            set: &self.in_flight,
            id: complaint_id.to_string(),
        })
    }

    /// Move a complaint to another department. The previous department is
    /// reported back unchanged when the backend refuses.
    pub async fn reassign(
        &self,
        complaint_id: &str,
        department: Option<Department>,
        assigned_by: Option<&str>,
    ) -> Result<ReassignmentDto> {
        let mut control = ReassignmentControl::new(complaint_id, None);
        if let Some(department) = department {
            control.select(department);
        }
        // fails before any request when nothing is selected
        let target = control.begin()?;
        let _guard = self.acquire(complaint_id)?;

        let current = self.complaints.get(complaint_id).await?;
        control.load_displayed(current.department());

        let path = format!(
            "/api/departments/assign/{}",
            BackendClient::segment(complaint_id)
        );
        let body = BackendAssignment {
            department: target.label(),
            assigned_by,
        };
        let outcome = self
            .backend
            .patch_json::<_, serde_json::Value>(&path, &body)
            .await
            .map(|_| ());
        control.finish(&outcome);

        match outcome {
            Ok(()) => {
                tracing::info!(
                    "Complaint {} reassigned from {:?} to {}",
                    complaint_id,
                    current.department(),
                    target
                );
                Ok(ReassignmentDto {
                    complaint_id: control.complaint_id().to_string(),
                    previous_department: current.department(),
                    department: target,
                })
            }
            Err(e) => {
                tracing::error!("Failed to reassign complaint {}: {}", complaint_id, e);
                let message = control.error().unwrap_or_default().to_string();
                Err(match e {
                    AppError::Upstream { status, .. } => AppError::Upstream { status, message },
                    AppError::MalformedResponse(_) => AppError::MalformedResponse(message),
                    _ => AppError::ExternalServiceError(message),
                })
            }
        }
    }
}
