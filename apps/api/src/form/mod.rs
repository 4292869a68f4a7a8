// Form progress: section schema, flat input record, and the completion scorer
// the front end polls to draw its progress bar and section checklist.

pub mod completeness;
pub mod handlers;
pub mod input;
pub mod schema;
