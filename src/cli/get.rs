//! Print a single parameter value.

use super::Target;
use crate::error::{Result, StoreError};

pub fn execute(target: &Target, name: &str) -> Result<()> {
    let confit = super::client(target)?;
    let set = confit.fetch(false, true)?;

    match set.get(name) {
        Some(value) => {
            println!("{}", value);
            Ok(())
        }
        None => Err(StoreError::NotFound(format!("{}/{}", confit.path(), name)).into()),
    }
}
