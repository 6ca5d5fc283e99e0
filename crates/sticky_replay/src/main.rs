use anyhow::{Context as _, Error, anyhow};
use std::env;
use std::io;
use std::path::PathBuf;

fn main() -> Result<(), Error> {
    env_logger::init();
    let path = env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("usage: sticky_replay <script.json>"))?;
    let stdout = io::stdout();
    sticky_replay::run(&path, stdout.lock())
        .with_context(|| format!("replaying {}", path.display()))
}
