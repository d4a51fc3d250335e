//! Dump parameters to a JSON descriptor file.

use std::path::Path;

use super::{output, Target};
use crate::error::Result;

pub fn execute(target: &Target, file: &Path, recursive: bool, decrypt: bool) -> Result<()> {
    let confit = super::client(target)?;

    if decrypt {
        output::warn("exporting SecureString values as plaintext");
    }

    let count = confit.export(file, recursive, decrypt)?;

    output::success(&format!(
        "exported {} parameters from {} to {}",
        count,
        confit.path(),
        file.display()
    ));
    Ok(())
}
