use crate::output::{OutputError, OutputResult};
use crate::recipe::Recipe;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes recipes to a file, replacing any existing content
///
/// # Arguments
///
/// * `path` - Destination file
/// * `recipes` - Recipes in output order
pub fn write_recipes(path: &Path, recipes: &[Recipe]) -> OutputResult<()> {
    let wrap = |source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(wrap)?;
    let mut writer = BufWriter::new(file);
    write_recipes_to(&mut writer, recipes).map_err(wrap)?;
    writer.flush().map_err(wrap)?;

    tracing::info!("Wrote {} recipes to {}", recipes.len(), path.display());
    Ok(())
}

/// Writes each recipe followed by a blank line
pub fn write_recipes_to<W: Write>(writer: &mut W, recipes: &[Recipe]) -> std::io::Result<()> {
    for recipe in recipes {
        writeln!(writer, "{}", recipe)?;
        writeln!(writer)?;
    }
    Ok(())
}

/// Formats recipes in the output layout
pub fn format_recipes(recipes: &[Recipe]) -> String {
    let mut out = String::new();
    for recipe in recipes {
        out.push_str(&recipe.to_string());
        out.push_str("\n\n");
    }
    out
}
