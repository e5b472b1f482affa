//! Export block schemas for the authoring tool

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::schema;

/// Print the schemas, or write them to `out` when given
pub fn run(out: Option<&Path>) -> Result<()> {
    let json = schema::to_json()?;

    match out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, format!("{}\n", json))?;
            tracing::info!("Wrote {} schema(s) to {:?}", schema::all().len(), path);
        }
        None => println!("{}", json),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_schema_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("studio/schemas.json");
        run(Some(&path)).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written[0]["name"], "divider");
    }
}
