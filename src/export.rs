use crate::search::SearchOutcome;
use crate::sequence::Sequence;

impl SearchOutcome {
    /// Write the sequence to a writer in CSV format.
    ///
    /// Columns: `trial` (1-based), `iti`. Integer durations are written
    /// without a fractional part.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if writing fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use experiment_tools::{SearchOutcome, Sequence};
    ///
    /// let outcome = SearchOutcome {
    ///     sequence: Sequence::Discrete(vec![2, 7]),
    ///     converged: true,
    ///     attempts: 1,
    /// };
    /// let mut buf = Vec::new();
    /// outcome.to_csv(&mut buf).unwrap();
    /// assert_eq!(String::from_utf8(buf).unwrap(), "trial,iti\n1,2\n2,7\n");
    /// ```
    pub fn to_csv(&self, mut writer: impl std::io::Write) -> std::io::Result<()> {
        writeln!(writer, "trial,iti")?;
        match &self.sequence {
            Sequence::Discrete(values) => {
                for (i, v) in values.iter().enumerate() {
                    writeln!(writer, "{},{v}", i + 1)?;
                }
            }
            Sequence::Continuous(values) => {
                for (i, v) in values.iter().enumerate() {
                    writeln!(writer, "{},{v}", i + 1)?;
                }
            }
        }
        Ok(())
    }

    /// Write the sequence as a CSV timing file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be created or written.
    pub fn export_csv(&self, path: impl AsRef<std::path::Path>) -> std::io::Result<()> {
        let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
        self.to_csv(&mut file)?;
        std::io::Write::flush(&mut file)
    }
}

#[cfg(feature = "serde")]
impl SearchOutcome {
    /// Save the outcome to a JSON file.
    ///
    /// The file is written next to its destination first and then renamed,
    /// so an interrupted write never leaves a truncated file behind.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be created or written.
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> std::io::Result<()> {
        let path = path.as_ref();
        let parent = path.parent().unwrap_or(std::path::Path::new("."));
        let tmp_path = parent.join(format!(
            ".{}.tmp",
            path.file_name().unwrap_or_default().to_string_lossy()
        ));
        let file = std::fs::File::create(&tmp_path)?;
        serde_json::to_writer_pretty(file, self).map_err(std::io::Error::other)?;
        std::fs::rename(&tmp_path, path)
    }

    /// Load an outcome from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<std::path::Path>) -> std::io::Result<Self> {
        let file = std::fs::File::open(path)?;
        serde_json::from_reader(std::io::BufReader::new(file))
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}
