// src/tally/job.rs
// =============================================================================
// A Job is one validated URL waiting for a worker.
//
// Raw arguments that fail to parse, or that have no scheme, never become
// jobs. The coordinator turns them straight into Failure outcomes instead.
// =============================================================================

use url::Url;

use crate::error::TallyError;

pub type JobSender = async_channel::Sender<Job>;
pub type JobReceiver = async_channel::Receiver<Job>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// The argument exactly as the user typed it, used for display.
    pub source: String,
    /// The parsed URL that gets fetched.
    pub url: Url,
}

impl Job {
    /// Parses a raw argument into a job. An explicit scheme is required.
    pub fn parse(raw: &str) -> Result<Self, TallyError> {
        match Url::parse(raw) {
            Ok(url) => Ok(Job {
                source: raw.to_string(),
                url,
            }),
            Err(url::ParseError::RelativeUrlWithoutBase) => Err(TallyError::MissingScheme {
                input: raw.to_string(),
            }),
            Err(source) => Err(TallyError::UrlParse {
                input: raw.to_string(),
                source,
            }),
        }
    }
}
