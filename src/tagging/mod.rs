// Tagging module for Fieldnote
// Offline keyword classification of note text: the full-note auto-tagger and
// the token-based live suggestion table

pub mod autotag;
pub mod suggest;

pub use autotag::auto_tag_note;
pub use suggest::{is_leading_question, suggest_tags};
