//! JSON descriptor files for bulk import and export.
//!
//! A descriptor file is a top-level JSON array of write descriptors:
//!
//! ```json
//! [{
//!     "Name": "APP_URL",
//!     "Description": "The URL",
//!     "Value": "http://www.mrcoolice.com/app",
//!     "Type": "String"
//! }, {
//!     "Name": "APP_KEY",
//!     "Value": "abcde12345",
//!     "Type": "SecureString"
//! }]
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use tracing::debug;

use crate::core::parameters::ParameterSet;
use crate::core::writer::WriteDescriptor;
use crate::error::Result;

/// Read a descriptor list from a JSON file.
pub fn read_descriptors(path: &Path) -> Result<Vec<WriteDescriptor>> {
    let file = File::open(path)?;
    let descriptors: Vec<WriteDescriptor> = serde_json::from_reader(BufReader::new(file))?;
    debug!(path = %path.display(), descriptors = descriptors.len(), "read descriptor file");
    Ok(descriptors)
}

/// Write a fetched parameter set to a JSON descriptor file.
///
/// Entries carry their local name and `Overwrite: true`, so importing the
/// file back into a path replaces whatever is there.
pub fn write_descriptors(path: &Path, set: &ParameterSet) -> Result<usize> {
    let descriptors: Vec<WriteDescriptor> = set
        .iter()
        .map(|(name, parameter)| WriteDescriptor {
            name: name.to_string(),
            value: parameter.value.clone(),
            kind: parameter.kind,
            description: None,
            overwrite: Some(true),
            key_id: None,
        })
        .collect();

    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), &descriptors)?;
    debug!(path = %path.display(), descriptors = descriptors.len(), "wrote descriptor file");

    Ok(descriptors.len())
}
