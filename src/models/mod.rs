pub mod form;
pub mod loaders;
pub mod record;
pub mod reference;

pub use form::{
    AlternateTitle, EpisodeBlock, EpisodeEntry, Exhibition, FormatType, GeneralInfo,
    ParticipationLine, WorkForm,
};
pub use loaders::{load_all_form_files, load_form_file};
pub use record::{
    AlternateTitleRecord, BatchKind, EpisodeFields, ExhibitionRecord, MasterFields,
    ParticipationFields, SubmissionRecord,
};
pub use reference::{ReferenceKind, ReferenceLists};
