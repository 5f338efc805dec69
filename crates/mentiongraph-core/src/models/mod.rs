pub mod mention;
pub mod record;
pub mod table;

pub use mention::{Mention, MentionGraph};
pub use record::{Corpus, Record, DATE_FIELD, JOURNAL_FIELD};
pub use table::{Cell, DATE_FORMAT, Table};
