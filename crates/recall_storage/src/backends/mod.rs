pub mod memory;
pub mod supabase;

pub use memory::MemoryFeed;
pub use supabase::SupabaseFeed;
