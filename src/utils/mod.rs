pub mod logging;
pub mod report;

pub use report::{render, render_line, summarize, Summary};
