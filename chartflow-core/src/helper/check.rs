//! Equality oracle used to verify stream alignment.

use std::fmt::Debug;

use thiserror::Error;

use super::stream::Stream;

/// Why two streams were found to differ.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HelperError {
    #[error("index {index}: actual {actual} is not equal to expected {expected}")]
    Mismatch {
        index: usize,
        actual: String,
        expected: String,
    },
    #[error("index {index}: {ended} stream ended before the other")]
    LengthMismatch { index: usize, ended: &'static str },
}

/// Consumes both streams pairwise and reports the first divergence.
///
/// Succeeds only when both streams yield equal elements and close at the
/// same index.
pub fn check_equals<T>(actual: Stream<T>, expected: Stream<T>) -> Result<(), HelperError>
where
    T: PartialEq + Debug,
{
    let mut index = 0;
    loop {
        match (actual.recv(), expected.recv()) {
            (None, None) => return Ok(()),
            (None, Some(_)) => {
                return Err(HelperError::LengthMismatch {
                    index,
                    ended: "actual",
                })
            }
            (Some(_), None) => {
                return Err(HelperError::LengthMismatch {
                    index,
                    ended: "expected",
                })
            }
            (Some(a), Some(e)) if a != e => {
                return Err(HelperError::Mismatch {
                    index,
                    actual: format!("{a:?}"),
                    expected: format!("{e:?}"),
                })
            }
            (Some(_), Some(_)) => index += 1,
        }
    }
}
