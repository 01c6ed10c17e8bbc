//! Config command implementation.

use std::io::Write;

use crate::errors::Result;
use crate::interface::Context;

/// Writes the effective configuration as TOML.
pub fn show_config(ctx: &Context, out: &mut impl Write) -> Result<()> {
    let text = toml::to_string_pretty(&ctx.config)?;
    out.write_all(text.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{read_config_file, Language, LineDirective};
    use tempfile::tempdir;

    #[test]
    fn test_show_config_reads_back() {
        let dir = tempdir().unwrap();
        let mut ctx = Context::default_for_dir(dir.path().to_path_buf());
        ctx.config.sources = vec!["README.md".to_string()];
        ctx.config.languages = vec![Language::new("cpp", LineDirective::C)];

        let mut out = Vec::new();
        show_config(&ctx, &mut out).unwrap();

        let path = dir.path().join("lmt.toml");
        std::fs::write(&path, &out).unwrap();
        assert_eq!(read_config_file(&path).unwrap(), ctx.config);
    }
}
