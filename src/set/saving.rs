use std::{
    fmt::Display,
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use super::Set;

impl<T: Display, E> Set<T, E> {
    /// Saves a set to a file, replacing anything already in it.
    ///
    /// Only elements whose text has balanced parentheses can be read back
    /// with [`Set::load`].
    pub fn save(&self, file: impl AsRef<Path>) -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(file)?);
        self.save_to_writer(&mut writer)?;
        writer.flush()
    }

    /// Writes this set into the given writer, returning the number of bytes
    /// written.
    pub fn save_to_writer<W: Write>(&self, mut writer: W) -> io::Result<usize> {
        let text = self.to_string();
        writer.write_all(text.as_bytes())?;
        Ok(text.len())
    }
}

#[cfg(test)]
mod tests {
    use std::{env, fs, path::PathBuf, process};

    use smartstring::alias::String;

    use super::*;

    fn scratch_file(name: &str) -> PathBuf {
        env::temp_dir().join(format!("catalog_set-{}-{name}", process::id()))
    }

    fn strings(items: &[&str]) -> Set<String> {
        items.iter().copied().map(String::from).collect()
    }

    #[test]
    fn save_to_writer_canonical() {
        let mut buf = vec![];
        let written = strings(&["a", "b"]).save_to_writer(&mut buf).unwrap();
        assert_eq!(buf, b"2 (a) (b)");
        assert_eq!(written, buf.len());
    }

    #[test]
    fn save_to_writer_empty_set() {
        let mut buf = vec![];
        Set::<String>::new().save_to_writer(&mut buf).unwrap();
        assert_eq!(buf, b"0");
    }

    #[test]
    fn save_keeps_text_verbatim() {
        let mut buf = vec![];
        strings(&["Venere (copia)", "  "])
            .save_to_writer(&mut buf)
            .unwrap();
        assert_eq!(buf, b"2 (Venere (copia)) (  )");
    }

    #[test]
    fn save_truncates_existing_file() {
        let path = scratch_file("truncate.txt");
        fs::write(&path, "a much longer piece of text than the set").unwrap();
        strings(&["a", "b"]).save(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "2 (a) (b)");
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn save_reports_unopenable_path() {
        let path = scratch_file("missing-dir").join("set.txt");
        let err = strings(&["a"]).save(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
