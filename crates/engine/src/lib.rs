pub use allocation::{Allocation, Share, SplitKind};
pub use candidates::{CandidateItem, CandidateList};
pub use draft::{DraftSplit, SplitDraft};
pub use error::EngineError;
pub use extraction::{
    ExtractedItem, ExtractionOutcome, ReceiptExtractor, ReceiptImage, extract_receipt,
};
pub use items::{ItemId, LineItem, LineItemStore};
pub use liability::Liability;
pub use money::MoneyCents;
pub use ops::{Session, SessionBuilder, SessionExport, export_file_name};
pub use participants::{Participant, ParticipantId, Registry};
pub use publish::{MemorySink, SummarySink};
pub use summary::{DEFAULT_TITLE, SummaryDocument, build_summary, build_summary_at};
pub use totals::{
    AllocationStatus, BreakdownLine, Classification, Totals, aggregate_totals, allocation_status,
    classify, grand_total, items_by_participant, liability_of, participant_breakdown,
    unequal_remaining, validate_unequal_complete,
};

mod allocation;
mod candidates;
mod draft;
mod error;
mod extraction;
mod items;
mod liability;
mod money;
mod ops;
mod participants;
mod publish;
mod summary;
mod totals;

pub type ResultEngine<T> = Result<T, EngineError>;
