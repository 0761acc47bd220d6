//! Batch driver: walks a raw export tree and writes the generated
//! per-station tables. Fully sequential; every file is parsed into its own
//! independent bucket and written before the next file is touched.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use regex::Regex;

use crate::{
    error::Result,
    models::{SectionTable, ServicePattern},
    parsing, writer,
};

/// `{station}_{suffix}.txt`, e.g. `Y08_12345.txt`.
static SCHEDULE_FILE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z]\d{2})_(\d+)\.txt$").unwrap());

pub struct Normalizer {
    raw_root: PathBuf,
    generated_root: PathBuf,
    sections: SectionTable,
}

impl Normalizer {
    pub fn new(
        raw_root: impl Into<PathBuf>,
        generated_root: impl Into<PathBuf>,
        sections: SectionTable,
    ) -> Self {
        Self {
            raw_root: raw_root.into(),
            generated_root: generated_root.into(),
            sections,
        }
    }

    /// Processes every structured station export under the raw root: one
    /// subdirectory per line, one CSV per service pattern. A structural
    /// violation aborts the run with that file's error; no partial table is
    /// written for the broken file.
    pub fn process_exports(&self) -> Result<()> {
        for entry in fs::read_dir(&self.raw_root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let line = entry.file_name().to_string_lossy().into_owned();
            self.process_line_dir(&line, &entry.path())?;
        }
        Ok(())
    }

    fn process_line_dir(&self, line: &str, dir: &Path) -> Result<()> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|extension| extension.to_str()) != Some("csv") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            let Ok(pattern) = stem.parse::<ServicePattern>() else {
                log::warn!(
                    "Skipping {}: unknown service pattern suffix {stem:?}",
                    path.display()
                );
                continue;
            };

            let buckets = parsing::load_station_export(&path.to_string_lossy())?;
            writer::write_station_tables(
                &self.generated_root,
                line,
                &pattern.to_string(),
                &buckets,
            )?;
        }
        Ok(())
    }

    /// Processes the semistructured schedules of one line-family, kept in a
    /// dedicated subdirectory of the raw root. File names encode the station
    /// and suffix; anything else in the directory is ignored.
    pub fn process_line_schedules(&self, subdir: &str) -> Result<()> {
        let out_dir = self.generated_root.join(subdir);

        for entry in fs::read_dir(self.raw_root.join(subdir))? {
            let path = entry?.path();
            let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            let Some(captures) = SCHEDULE_FILE_NAME.captures(name) else {
                continue;
            };

            let trips = parsing::load_line_schedule(&path.to_string_lossy(), &self.sections)?;
            writer::write_schedule_table(&out_dir, &captures[1], &captures[2], &trips)?;
        }
        Ok(())
    }
}
