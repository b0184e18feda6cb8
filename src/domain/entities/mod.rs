pub mod contact_sync_status;
pub mod waitlist_entry;
pub mod waitlist_status;
