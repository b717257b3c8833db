//! In-place repair of a facility file's `type` column.

use std::path::{Path, PathBuf};

use bangdeng_core::Category;
use bangdeng_source::{RawRow, SourceError, read_rows, write_rows};

use crate::error::EtlError;

/// `dir/stem_backup.csv` next to `path`.
pub fn backup_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{stem}_backup.csv"))
}

/// Give every row whose `type` is not a canonical label the category
/// `CANONICAL[row % 5]`. Rows are otherwise untouched.
///
/// Returns the number of rows changed.
pub fn retype_rows(rows: &mut [RawRow]) -> usize {
    let mut changed = 0;
    for row in rows.iter_mut() {
        let canonical = Category::from_label(row.get("type")).is_some_and(|c| c.is_canonical());
        if !canonical {
            row.set("type", Category::cyclic(row.index).label());
            changed += 1;
        }
    }
    changed
}

/// Rewrite the file at `path` with repaired types. The original file is
/// moved to [`backup_path`] first.
pub fn retype_csv(path: &Path) -> Result<usize, EtlError> {
    let mut rows = read_rows(path)?.collect::<Result<Vec<_>, SourceError>>()?;
    let changed = retype_rows(&mut rows);

    let backup = backup_path(path);
    std::fs::rename(path, &backup)?;
    log::info!("Backed up {} to {}", path.display(), backup.display());

    write_rows(path, &rows)?;
    log::info!("Retyped {changed} of {} rows in {}", rows.len(), path.display());
    Ok(changed)
}
