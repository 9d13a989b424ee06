//! Repository layer: one zero-sized struct per table (or aggregate) with
//! async functions taking `&PgPool` first.

pub mod activity_log_repo;
pub mod case_repo;
pub mod case_suspect_repo;
pub mod dashboard_repo;
pub mod evidence_repo;
pub mod forensic_action_repo;
pub mod suspect_repo;
pub mod victim_repo;

pub use activity_log_repo::ActivityLogRepo;
pub use case_repo::CaseRepo;
pub use case_suspect_repo::CaseSuspectRepo;
pub use dashboard_repo::DashboardRepo;
pub use evidence_repo::EvidenceRepo;
pub use forensic_action_repo::ForensicActionRepo;
pub use suspect_repo::SuspectRepo;
pub use victim_repo::VictimRepo;
