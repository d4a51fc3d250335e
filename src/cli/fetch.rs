//! Fetch and print all parameters under the resolved path.

use serde_json::{Map, Value};

use super::{output, Target};
use crate::error::Result;

pub fn execute(target: &Target, recursive: bool, decrypt: bool, json: bool) -> Result<()> {
    let confit = super::client(target)?;
    let set = confit.fetch(recursive, decrypt)?;

    if json {
        let map: Map<String, Value> = set
            .iter()
            .map(|(name, parameter)| (name.to_string(), Value::String(parameter.value.clone())))
            .collect();
        println!("{}", serde_json::to_string_pretty(&Value::Object(map))?);
        return Ok(());
    }

    output::header(confit.path());
    if set.is_empty() {
        println!("  (no parameters)");
        return Ok(());
    }
    for (name, parameter) in set.iter() {
        output::kv(name, &parameter.value);
    }

    Ok(())
}
