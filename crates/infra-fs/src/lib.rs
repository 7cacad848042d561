// pincrawl Infrastructure - File Adapters
// Implements: CandidateSource (dictionary file), ProgressLedger (append-only ledger file)

mod dictionary;
mod ledger;

pub use dictionary::FileCandidateSource;
pub use ledger::FileProgressLedger;
