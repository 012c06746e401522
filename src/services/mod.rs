pub mod notify;
pub mod submissions;

pub use notify::TracingNotifier;
pub use submissions::SubmissionService;
