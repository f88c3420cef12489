mod complaint;
mod envelope;
mod filter;
mod form;

pub use complaint::{Complaint, ComplaintStatus, GeoPoint, Priority, StatusHistoryEntry};
pub use envelope::ComplaintEnvelope;
pub use filter::{ComplaintFilters, ComplaintListView, FilterField};
pub use form::{
    Attachment, ComplaintDraft, ComplaintSubmission, LocationFix, MAX_ATTACHMENT_SIZE,
    MISSING_FIELDS_MESSAGE,
};
