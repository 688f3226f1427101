//! Command handlers.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use v8probe::{
    parse_handle, Grammar, GrammarKind, ImageMemory, Probe, ProbeError, RawMemory, ReplayDumper,
};

use crate::cli::{Convention, GrammarArg};

/// Stand-in memory source for runs without an image: every raw read is a
/// miss, so bundle conventions resolve to the sentinel instead of erroring.
struct NoMemory;

impl RawMemory for NoMemory {
    fn read_bytes(&self, addr: u64, len: usize) -> Result<Vec<u8>, ProbeError> {
        Err(ProbeError::Unreadable { addr, size: len })
    }
}

fn load_memory(image: Option<&Path>, image_base: &str) -> Result<Box<dyn RawMemory>> {
    match image {
        Some(path) => {
            let base = parse_handle(image_base).context("Invalid --image-base")?;
            let memory = ImageMemory::load(path, base)
                .with_context(|| format!("Failed to load image {}", path.display()))?;
            Ok(Box::new(memory))
        }
        None => Ok(Box::new(NoMemory)),
    }
}

pub fn resolve(
    kind: Convention,
    handle: &str,
    dumps: &Path,
    image: Option<PathBuf>,
    image_base: &str,
    grammar: GrammarArg,
) -> Result<()> {
    let handle = parse_handle(handle)?;
    let dumper = ReplayDumper::load(dumps)
        .with_context(|| format!("Failed to load dumps {}", dumps.display()))?;
    let memory = load_memory(image.as_deref(), image_base)?;
    let grammar = Grammar::get(match grammar {
        GrammarArg::Inline => GrammarKind::InlineLabels,
        GrammarArg::Marker => GrammarKind::MarkerDelimited,
    });

    let probe = Probe::new(&dumper, memory.as_ref(), grammar);
    let result = match kind {
        Convention::Callback => probe.resolve_callback(handle),
        Convention::NapiInvoke => probe.resolve_napi_invoke(handle),
        Convention::Napi => probe.resolve_napi(handle),
        Convention::NapiGetset => probe.resolve_napi_getset(handle),
        Convention::Nan => probe.resolve_nan(handle),
        Convention::Name => probe.resolve_name(handle),
    };

    println!("{result}");
    Ok(())
}

pub fn dump(handle: &str, dumps: &Path) -> Result<()> {
    let handle = parse_handle(handle)?;
    let dumper = ReplayDumper::load(dumps)
        .with_context(|| format!("Failed to load dumps {}", dumps.display()))?;
    let memory = NoMemory;

    let probe = Probe::new(&dumper, &memory, Grammar::inline_labels());
    println!("{}", probe.dump_raw(handle));
    Ok(())
}

pub fn identity(handle: &str, image: &Path, image_base: &str) -> Result<()> {
    let handle = parse_handle(handle)?;
    let base = parse_handle(image_base).context("Invalid --image-base")?;
    let memory = ImageMemory::load(image, base)
        .with_context(|| format!("Failed to load image {}", image.display()))?;

    let word = memory
        .read_u64(handle)
        .with_context(|| format!("No word at {handle:#x} in the image"))?;
    println!("{word}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_dumps(dir: &Path) -> PathBuf {
        let path = dir.join("dumps.json");
        let json = r#"{
            "0x1d0a00049c19": " - shared_info: 0x1d0a0031a2b9 <SharedFunctionInfo f>\n - name: readFileSync\n"
        }"#;
        std::fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn test_resolve_name_from_recorded_dumps() {
        let dir = tempfile::tempdir().unwrap();
        let dumps = write_dumps(dir.path());
        let result = resolve(
            Convention::Name,
            "0x1d0a00049c19",
            &dumps,
            None,
            "0",
            GrammarArg::Inline,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_non_numeric_handle_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let dumps = write_dumps(dir.path());
        let result = resolve(
            Convention::Name,
            "not-a-number",
            &dumps,
            None,
            "0",
            GrammarArg::Inline,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_identity_reads_image_word() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("heap.bin");
        std::fs::write(&image, 0x1d0a_0028_2e31u64.to_le_bytes()).unwrap();
        assert!(identity("0x1000", &image, "0x1000").is_ok());
        assert!(identity("0x2000", &image, "0x1000").is_err());
    }

    #[test]
    fn test_no_memory_always_misses() {
        assert!(NoMemory.read_bytes(0x1000, 8).is_err());
    }
}
