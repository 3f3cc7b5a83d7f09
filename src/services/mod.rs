pub mod alternate_titles;
pub mod feedback;
pub mod form_validator;
pub mod percentage_validator;
pub mod presence_validator;
pub mod record_expander;
pub mod reference_loader;
pub mod select_config;

pub use alternate_titles::collect_alternate_titles;
pub use feedback::{Banner, BannerKind, ConsoleFeedback, FeedbackSurface};
pub use form_validator::{validate_form, ValidationVerdict, MAX_EPISODES_PER_BLOCK};
pub use percentage_validator::validate_percentages;
pub use presence_validator::has_participation_data;
pub use record_expander::{collect_exhibition_records, expand_records};
pub use reference_loader::ReferenceDataLoader;
pub use select_config::{MatchMode, SelectConfig};
