//! Bulk-write parameters from a JSON descriptor file.

use std::path::Path;

use super::{output, Target};
use crate::error::Result;

pub fn execute(target: &Target, file: &Path) -> Result<()> {
    let confit = super::client(target)?;
    let written = confit.import(file)?;

    output::success(&format!(
        "imported {} parameters to {}",
        written,
        confit.path()
    ));
    Ok(())
}
