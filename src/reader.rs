use std::fs::File;
use std::io;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::bufread::MultiGzDecoder;

pub(crate) enum ReaderMaybeGzip {
    GZIP(MultiGzDecoder<BufReader<File>>),
    UNCOMPRESSED(BufReader<File>),
}

impl Read for ReaderMaybeGzip {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            ReaderMaybeGzip::GZIP(backer) => backer.read(buf),
            ReaderMaybeGzip::UNCOMPRESSED(backer) => backer.read(buf),
        }
    }
}

/// Open a text input for line-by-line reading, sniffing the two magic bytes
/// to decide whether to route it through a gzip decoder. Also reports
/// whether the input was compressed.
pub(crate) fn reader_maybe_gzip(path: &Path) -> io::Result<(BufReader<ReaderMaybeGzip>, bool)> {
    let mut file = File::open(path)?;
    let mut magic = [0; 2];
    file.read(&mut magic[..])?;

    let reopen = BufReader::new(File::open(path)?);

    if magic.eq(&[0x1f, 0x8b]) {
        Ok((BufReader::new(ReaderMaybeGzip::GZIP(MultiGzDecoder::new(reopen))), true))
    } else {
        Ok((BufReader::new(ReaderMaybeGzip::UNCOMPRESSED(reopen)), false))
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufRead, Write};
    use std::path::PathBuf;

    use flate2::write::GzEncoder;
    use flate2::Compression;

    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("loon-reader-{}-{name}", std::process::id()))
    }

    #[test]
    fn plain_text_is_read_as_is() {
        let path = scratch_path("plain.sam");
        std::fs::write(&path, "@HD\tVN:1.6\nline two\n").unwrap();

        let (reader, was_compressed) = reader_maybe_gzip(&path).unwrap();
        assert!(!was_compressed);
        let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines, vec!["@HD\tVN:1.6", "line two"]);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn gzip_input_is_sniffed_and_decoded() {
        let path = scratch_path("compressed.sam.gz");
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"@HD\tVN:1.6\nline two\n").unwrap();
        std::fs::write(&path, encoder.finish().unwrap()).unwrap();

        let (reader, was_compressed) = reader_maybe_gzip(&path).unwrap();
        assert!(was_compressed);
        let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines, vec!["@HD\tVN:1.6", "line two"]);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(reader_maybe_gzip(&scratch_path("nope.sam")).is_err());
    }
}
