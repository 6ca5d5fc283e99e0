//! Replays scripted scroll and resize interactions against a sticky panel on a
//! static document and reports its status and style after each one.

pub mod replay;
pub mod script;

pub use replay::{ReplayLine, replay, write_lines};
pub use script::{Script, Step};

use anyhow::Error;
use std::io::Write;
use std::path::Path;

/// Load the script at `path`, play it and write the result to `writer`.
///
/// # Errors
///
/// Returns an error if the script cannot be loaded or the output cannot be written.
pub fn run<W: Write>(path: &Path, writer: W) -> Result<(), Error> {
    let script = Script::load(path)?;
    let lines = replay(script);
    write_lines(&lines, writer)
}
