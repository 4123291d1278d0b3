//! Status command handler

use anyhow::Result;

use rolodex_core::{ContactStore, LoadReport, LoadStatus};

use crate::output::{Output, OutputFormat};

/// Show where the contacts live and how loading went
pub fn show(store: &ContactStore, report: &LoadReport, output: &Output) -> Result<()> {
    let path = store.path();
    let file_size = std::fs::metadata(path).map(|m| m.len()).ok();
    let load_state = match &report.status {
        LoadStatus::Loaded(_) => "loaded",
        LoadStatus::Missing => "missing",
        LoadStatus::Failed(_) if report.is_parse_failure() => "parse_failure",
        LoadStatus::Failed(_) => "load_failure",
    };

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "contacts_file": path,
                    "file_exists": file_size.is_some(),
                    "file_size": file_size,
                    "load": load_state,
                    "message": report.message,
                    "count": store.len(),
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", store.len());
        }
        OutputFormat::Human => {
            println!("Rolodex Status");
            println!("==============");
            println!();
            println!("Storage:");
            println!("  File:  {}", path.display());
            match file_size {
                Some(size) => println!("  Size:  {} bytes", size),
                None => println!("  Size:  (no file yet)"),
            }
            println!();
            println!("Load:");
            println!("  {}", report.message);
            println!();
            println!("Contents:");
            println!("  Contacts: {}", store.len());
        }
    }

    Ok(())
}
