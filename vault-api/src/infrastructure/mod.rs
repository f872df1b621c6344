pub(crate) mod cache;
pub mod poller;

pub(crate) use cache::MemoCache;
