//! Result tables: one whitespace-separated text file per crystal type.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr};
use dilute_sim::config::CrystalType;
use dilute_sim::{ConcentrationRow, SweepResult};

pub fn table_path(dir: &Path, crystal: CrystalType) -> PathBuf {
    dir.join(format!("clusters_{}.txt", crystal.tag()))
}

/// `#`-prefixed header, then one line per concentration.
pub fn write_rows<W: Write>(writer: &mut W, rows: &[ConcentrationRow]) -> Result<()> {
    writeln!(writer, "# {}", ConcentrationRow::COLUMNS.join(" "))?;
    for row in rows {
        let [c, rest @ ..] = row.fields();
        write!(writer, "{c:.4}")?;
        for v in rest {
            write!(writer, " {v:.8e}")?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// Write `result` into `dir`, creating the directory if needed, and return the
/// path of the file written.
pub fn write_sweep(dir: &Path, result: &SweepResult) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .wrap_err_with(|| format!("Unable to create output directory: {}", dir.display()))?;
    let path = table_path(dir, result.crystal);
    let file = File::create(&path)
        .wrap_err_with(|| format!("Unable to create output file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_rows(&mut writer, &result.rows)?;
    writer.flush()?;
    Ok(path)
}
