//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod language_repo;
pub mod reservation_repo;
pub mod survey_invitation_repo;
pub mod survey_question_repo;
pub mod survey_repo;
pub mod survey_response_repo;
pub mod tenant_repo;

pub use language_repo::LanguageRepo;
pub use reservation_repo::ReservationRepo;
pub use survey_invitation_repo::SurveyInvitationRepo;
pub use survey_question_repo::SurveyQuestionRepo;
pub use survey_repo::SurveyRepo;
pub use survey_response_repo::SurveyResponseRepo;
pub use tenant_repo::TenantRepo;
