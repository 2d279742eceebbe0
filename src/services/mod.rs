pub mod store;
pub mod supabase;
pub mod telegram;
