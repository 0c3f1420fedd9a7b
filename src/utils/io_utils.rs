use crate::utils::Result;
use flate2::{write::GzEncoder, Compression};
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

/// Report or FASTA sink. Call [`OutputWriter::finish`] once writing is done
/// so that a gzip trailer failure surfaces as an error.
pub enum OutputWriter {
    Stdout(BufWriter<io::Stdout>),
    File(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
}

impl OutputWriter {
    pub fn finish(self) -> Result<()> {
        let result = match self {
            OutputWriter::Stdout(mut writer) => writer.flush(),
            OutputWriter::File(mut writer) => writer.flush(),
            OutputWriter::Gzip(encoder) => encoder.finish().and_then(|mut file| file.flush()),
        };
        result.map_err(|e| format!("Error finishing output: {}", e))
    }
}

impl Write for OutputWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputWriter::Stdout(writer) => writer.write(buf),
            OutputWriter::File(writer) => writer.write(buf),
            OutputWriter::Gzip(encoder) => encoder.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputWriter::Stdout(writer) => writer.flush(),
            OutputWriter::File(writer) => writer.flush(),
            OutputWriter::Gzip(encoder) => encoder.flush(),
        }
    }
}

/// Opens stdout for `None` or `-`, a gzip stream for paths ending in `.gz`,
/// and a plain file otherwise.
pub fn open_output_writer(path: Option<&Path>) -> Result<OutputWriter> {
    let path = match path {
        Some(path) if path.as_os_str() != "-" => path,
        _ => return Ok(OutputWriter::Stdout(BufWriter::new(io::stdout()))),
    };
    let file = File::create(path).map_err(|e| format!("File {}: {}", path.display(), e))?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(OutputWriter::Gzip(GzEncoder::new(
            BufWriter::new(file),
            Compression::default(),
        )))
    } else {
        Ok(OutputWriter::File(BufWriter::new(file)))
    }
}
