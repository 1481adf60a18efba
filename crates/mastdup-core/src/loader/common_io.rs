// crates/mastdup-core/src/loader/common_io.rs
use crate::error::{MastError, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::Path;

#[cfg(feature = "compact")]
use flate2::{read::GzDecoder, write::GzEncoder, Compression};

/// `true` when the file name ends in `.<ext>`, ASCII case-insensitive.
///
/// `ext` may itself contain dots (`"json.gz"`).
pub fn has_extension(path: &Path, ext: &str) -> bool {
    let Some(name) = path.file_name().map(|n| n.to_string_lossy().to_ascii_lowercase()) else {
        return false;
    };
    let suffix = format!(".{}", ext.to_ascii_lowercase());
    name.len() > suffix.len() && name.ends_with(&suffix)
}

/// Opens a file, buffers it, and wraps it in a Gzip decoder when asked.
/// Returns a generic Reader so the caller doesn't care about the compression.
pub fn open_stream(path: &Path, gzip: bool) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => {
            MastError::NotFound(format!("file not found at {}: {}", path.display(), e))
        }
        _ => MastError::Io(e),
    })?;
    let reader = BufReader::new(file);

    if gzip {
        #[cfg(feature = "compact")]
        {
            return Ok(Box::new(GzDecoder::new(reader)));
        }
        #[cfg(not(feature = "compact"))]
        {
            return Err(MastError::InvalidData(
                "Gzip requested but 'compact' disabled".into(),
            ));
        }
    }

    Ok(Box::new(reader))
}

/// Creates (truncating) a file for writing, optionally gzip-compressed.
///
/// Callers must `flush()` the returned writer; dropping a gzip encoder
/// finishes the stream but swallows errors.
pub fn create_stream(path: &Path, gzip: bool) -> Result<Box<dyn Write>> {
    let writer = BufWriter::new(File::create(path)?);

    if gzip {
        #[cfg(feature = "compact")]
        {
            return Ok(Box::new(GzEncoder::new(writer, Compression::default())));
        }
        #[cfg(not(feature = "compact"))]
        {
            return Err(MastError::InvalidData(
                "Gzip requested but 'compact' disabled".into(),
            ));
        }
    }

    Ok(Box::new(writer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_matching() {
        assert!(has_extension(Path::new("targets.csv"), "csv"));
        assert!(has_extension(Path::new("/tmp/TARGETS.CSV"), "csv"));
        assert!(has_extension(Path::new("out.json.gz"), "json.gz"));
        assert!(!has_extension(Path::new("out.json.gz"), "json"));
        assert!(!has_extension(Path::new("targets.csv.bak"), "csv"));
        assert!(!has_extension(Path::new(".csv"), "csv"));
        assert!(!has_extension(Path::new("targets"), "csv"));
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = open_stream(Path::new("/no/such/file.csv"), false)
            .err()
            .unwrap();
        assert!(matches!(err, MastError::NotFound(_)));
    }

    #[test]
    fn other_open_failures_stay_io_errors() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("targets.csv");
        std::fs::write(&file, "name\nM31\n").unwrap();

        // A regular file used as a directory: the path exists but cannot be opened.
        let err = open_stream(&file.join("inner.csv"), false).err().unwrap();
        assert!(matches!(err, MastError::Io(_)), "got {err:?}");
    }
}
