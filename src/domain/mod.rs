pub mod content_hash;
pub mod election_row;
pub mod page_snapshot;
pub mod sync_state;
