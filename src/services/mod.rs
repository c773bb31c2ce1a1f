pub mod attendance_submitter;
pub mod credential_resolver;
pub mod token_decoder;

pub use attendance_submitter::AttendanceSubmitter;
pub use credential_resolver::CredentialResolver;
pub use token_decoder::decode_token;
