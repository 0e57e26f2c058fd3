pub mod caller;
pub use caller::CallerAgent;
