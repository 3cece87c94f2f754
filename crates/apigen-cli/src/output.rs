use std::fs;
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};

use apigen_core::GeneratedFile;

/// Write generated files to disk under the given base directory.
pub fn write_files(base: &Path, files: &[GeneratedFile]) -> Result<()> {
    fs::create_dir_all(base)
        .with_context(|| format!("failed to create output directory {}", base.display()))?;
    for file in files {
        let path = base.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        fs::write(&path, &file.content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("  wrote {}", path.display());
    }
    Ok(())
}

/// Try to run Prettier over the generated files. A missing or failing
/// formatter only prints a note.
pub fn try_run_prettier(output_dir: &Path, files: &[GeneratedFile]) {
    let mut args = vec![
        "prettier".to_string(),
        "--write".to_string(),
        "--single-quote".to_string(),
        "--tab-width".to_string(),
        "2".to_string(),
    ];
    args.extend(files.iter().map(|f| f.path.clone()));

    match Command::new("npx")
        .args(&args)
        .current_dir(output_dir)
        .output()
    {
        Ok(result) if result.status.success() => {
            eprintln!("  formatted with prettier");
        }
        Ok(_) => {
            eprintln!(
                "  warning: prettier formatting had issues (non-zero exit), output may need manual formatting"
            );
        }
        Err(_) => {
            eprintln!(
                "  note: prettier not found, run `npx prettier --write --single-quote .` in {} to format",
                output_dir.display()
            );
        }
    }
}
