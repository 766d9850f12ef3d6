//! Chat interview: session state and the terminal front end

mod repl;
mod session;

pub use repl::InterviewRepl;
pub use session::{
    ADD_AREA_MESSAGE, DisplayedMessage, FINISH_MESSAGE, Interview, InterviewRecord, Reply, START_MESSAGE,
    WELCOME_FALLBACK,
};
