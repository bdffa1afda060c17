//! CSV export of anomaly tables, mirrored map samples and gridded fields.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use engine::griddata::GridField;
use engine::mirror::MirroredPoint;
use engine::AnomalyTable;

/// Write one row per anomaly.
pub fn write_table_csv<W: Write>(table: &AnomalyTable, mut out: W) -> std::io::Result<()> {
    writeln!(out, "distance_from_ridge_km,polarity,age_myr")?;
    for r in table {
        writeln!(out, "{:.6},{},{:.6}", r.distance_from_ridge, r.polarity.sign(), r.age)?;
    }
    out.flush()
}

/// Write one row per mirrored map sample.
pub fn write_mirrored_csv<W: Write>(points: &[MirroredPoint], mut out: W) -> std::io::Result<()> {
    writeln!(out, "distance_from_ridge_km,along_ridge_km,polarity,age_myr")?;
    for p in points {
        writeln!(
            out,
            "{:.6},{:.6},{},{:.6}",
            p.distance_from_ridge,
            p.along_ridge,
            p.polarity.sign(),
            p.age
        )?;
    }
    out.flush()
}

/// Write one row per grid node, y-major.
pub fn write_grid_csv<W: Write>(grid: &GridField, mut out: W) -> std::io::Result<()> {
    writeln!(out, "x,y,value")?;
    for iy in 0..grid.spec.ny {
        let y = grid.y_at(iy);
        for ix in 0..grid.spec.nx {
            writeln!(out, "{:.6},{:.6},{:.6}", grid.x_at(ix), y, grid.value(ix, iy))?;
        }
    }
    out.flush()
}

fn create<P: AsRef<Path>>(path: P) -> std::io::Result<BufWriter<File>> {
    Ok(BufWriter::new(File::create(path)?))
}

/// Write `anomalies.csv`, `mirrored.csv` and `grid_<field>.csv` into `dir`.
pub fn export_all<P: AsRef<Path>>(
    dir: P,
    table: &AnomalyTable,
    points: &[MirroredPoint],
    grid: &GridField,
    grid_name: &str,
) -> std::io::Result<()> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;
    write_table_csv(table, create(dir.join("anomalies.csv"))?)?;
    write_mirrored_csv(points, create(dir.join("mirrored.csv"))?)?;
    write_grid_csv(grid, create(dir.join(format!("grid_{grid_name}.csv")))?)?;
    tracing::info!("[export] wrote {} rows, {} map samples to {}", table.len(), points.len(), dir.display());
    Ok(())
}
