pub mod binding;
pub mod paging;
