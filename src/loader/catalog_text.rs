// src/loader/catalog_text.rs
//
// Line format: `name-spriteColumn-spriteRow-layer`
// Lines starting with `//` or `#` are comments, blank lines are ignored.

use crate::error::{Error, Result};

/// One catalog line before its sprite is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTileRecord {
    pub line: usize,
    pub name: String,
    pub sprite_col: usize,
    pub sprite_row: usize,
    pub layer: i32,
}

pub(crate) fn is_comment(line: &str) -> bool {
    line.starts_with("//") || line.starts_with('#')
}

/// Parse the whole catalog source. The first malformed line aborts the parse.
pub fn parse_catalog(src: &str) -> Result<Vec<RawTileRecord>> {
    let mut out = Vec::new();
    for (idx, raw) in src.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || is_comment(line) {
            continue;
        }

        let fields: Vec<&str> = line.split('-').map(str::trim).collect();
        if fields.len() != 4 {
            return Err(Error::config(
                line_no,
                format!("expected 4 `-` separated fields, found {}", fields.len()),
            ));
        }
        if fields[0].is_empty() {
            return Err(Error::config(line_no, "tile name is empty"));
        }

        let sprite_col = fields[1].parse::<usize>().map_err(|_| {
            Error::config(line_no, format!("sprite column `{}` is not an integer", fields[1]))
        })?;
        let sprite_row = fields[2].parse::<usize>().map_err(|_| {
            Error::config(line_no, format!("sprite row `{}` is not an integer", fields[2]))
        })?;
        let layer = fields[3].parse::<i32>().map_err(|_| {
            Error::config(line_no, format!("layer `{}` is not an integer", fields[3]))
        })?;

        out.push(RawTileRecord {
            line: line_no,
            name: fields[0].to_owned(),
            sprite_col,
            sprite_row,
            layer,
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_comments_and_blank_lines() {
        let src = "// tiles\n# more\n\ngrass-0-0-0\r\nwall-1-0-1\n";
        let recs = parse_catalog(src).expect("parse");
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].name, "grass");
        assert_eq!(recs[1].line, 5);
        assert_eq!((recs[1].sprite_col, recs[1].sprite_row, recs[1].layer), (1, 0, 1));
    }

    #[test]
    fn reports_field_count_with_line() {
        let err = parse_catalog("grass-0-0-0\nwall-1-0\n").unwrap_err();
        assert!(matches!(err, Error::ConfigFormat { line: 2, .. }));
    }

    #[test]
    fn reports_non_integer_field() {
        let err = parse_catalog("grass-zero-0-0\n").unwrap_err();
        assert!(matches!(err, Error::ConfigFormat { line: 1, reason } if reason.contains("zero")));
    }
}
