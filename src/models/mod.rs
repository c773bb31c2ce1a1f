pub mod loaders;
pub mod outcome;
pub mod student;

pub use loaders::{load_roster, parse_roster};
pub use outcome::{Outcome, Step};
pub use student::{AuthResult, QrPayload, StudentRecord};
