pub mod document_type;
pub mod referral;
pub mod waitlist_entry;
