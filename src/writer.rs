use std::fs;
use std::fs::{File, OpenOptions};
use std::io;
use std::io::{BufWriter, Write};
use std::path::Path;

use bio::io::fastq;
use flate2::write::GzEncoder;
use flate2::Compression;

pub(crate) enum WriterMaybeGzip {
    GZIP(GzEncoder<File>),
    UNCOMPRESSED(File),
}

impl Write for WriterMaybeGzip {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            WriterMaybeGzip::GZIP(backer) => backer.write(buf),
            WriterMaybeGzip::UNCOMPRESSED(backer) => backer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            WriterMaybeGzip::GZIP(backer) => backer.flush(),
            WriterMaybeGzip::UNCOMPRESSED(backer) => backer.flush(),
        }
    }
}

/// Open a FASTQ output, compressing when the file name ends in .gz or
/// .gzip. Refuses to clobber an existing non-empty file. Also reports
/// whether the output is compressed.
pub(crate) fn writer_maybe_gzip(path: &Path) -> io::Result<(fastq::Writer<WriterMaybeGzip>, bool)> {
    if fs::metadata(path).is_ok_and(|meta| meta.len() > 0) {
        return Err(io::Error::other(format!(
            "refusing to overwrite non-empty file {}",
            path.display()
        )));
    }

    let file = OpenOptions::new().write(true).create(true).truncate(true).open(path)?;

    if matches!(path.extension(), Some(ext) if ext == "gz" || ext == "gzip") {
        Ok((
            fastq::Writer::from_bufwriter(BufWriter::new(WriterMaybeGzip::GZIP(GzEncoder::new(
                file,
                Compression::default(),
            )))),
            true,
        ))
    } else {
        Ok((fastq::Writer::from_bufwriter(BufWriter::new(WriterMaybeGzip::UNCOMPRESSED(file))), false))
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufReader, Read};
    use std::path::PathBuf;

    use flate2::bufread::MultiGzDecoder;

    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("loon-writer-{}-{name}", std::process::id()))
    }

    #[test]
    fn plain_extension_writes_plain_fastq() {
        let path = scratch_path("mate1.fastq");
        {
            let (mut writer, was_compressed) = writer_maybe_gzip(&path).unwrap();
            assert!(!was_compressed);
            writer.write("T/1", None, b"ACGT", b"IIII").unwrap();
            writer.flush().unwrap();
        }
        assert_eq!(fs::read_to_string(&path).unwrap(), "@T/1\nACGT\n+\nIIII\n");
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn gz_extension_writes_gzip() {
        let path = scratch_path("mate1.fastq.gz");
        {
            let (mut writer, was_compressed) = writer_maybe_gzip(&path).unwrap();
            assert!(was_compressed);
            writer.write("T/1", None, b"ACGT", b"IIII").unwrap();
            // dropping the writer finishes the gzip stream
        }
        let mut decoded = String::new();
        MultiGzDecoder::new(BufReader::new(File::open(&path).unwrap()))
            .read_to_string(&mut decoded)
            .unwrap();
        assert_eq!(decoded, "@T/1\nACGT\n+\nIIII\n");
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn non_empty_file_is_not_overwritten() {
        let path = scratch_path("occupied.fastq");
        fs::write(&path, "do not clobber").unwrap();
        assert!(writer_maybe_gzip(&path).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "do not clobber");
        fs::remove_file(&path).unwrap();
    }
}
