//! Font discovery.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

/// Environment variable naming a TTF/OTF file to use instead of the system fonts.
pub const FONT_ENV: &str = "HORAE_FONT";

/// Bold sans-serif faces first, then regular weights.
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/ibm-plex/IBMPlexSans-Bold.ttf",
    "/usr/share/fonts/opentype/ibm-plex/IBMPlexSans-Bold.otf",
    "/usr/share/fonts/TTF/IBMPlexSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/noto/NotoSans-Bold.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Raw font file contents and where they came from.
#[derive(Debug, Clone)]
pub struct FontFile {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

/// Finds the clock font: `$HORAE_FONT` if set, else the first readable
/// system candidate.
pub fn discover() -> Result<FontFile> {
    let explicit = std::env::var_os(FONT_ENV).map(PathBuf::from);
    find_font(explicit.as_deref(), SYSTEM_FONTS.iter().map(Path::new))
}

fn find_font<'p>(
    explicit: Option<&Path>,
    candidates: impl IntoIterator<Item = &'p Path>,
) -> Result<FontFile> {
    if let Some(path) = explicit {
        let bytes = std::fs::read(path)
            .with_context(|| format!("{FONT_ENV}={} could not be read", path.display()))?;
        return Ok(FontFile { path: path.to_path_buf(), bytes });
    }

    let mut tried = 0usize;
    for path in candidates {
        tried += 1;
        match std::fs::read(path) {
            Ok(bytes) => return Ok(FontFile { path: path.to_path_buf(), bytes }),
            Err(err) => log::trace!("font candidate {}: {err}", path.display()),
        }
    }

    bail!("no usable font found among {tried} system paths; set {FONT_ENV} to a TTF or OTF file")
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Writes `bytes` to a fresh file under the system temp dir.
    fn temp_file(name: &str, bytes: &[u8]) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("horae-fonts-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    fn missing(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("horae-missing-{}-{name}", std::process::id()))
    }

    #[test]
    fn explicit_path_wins_over_candidates() {
        let chosen = temp_file("explicit.ttf", b"explicit");
        let other = temp_file("candidate.ttf", b"candidate");

        let font = find_font(Some(chosen.as_path()), [other.as_path()]).unwrap();
        assert_eq!(font.path, chosen);
        assert_eq!(font.bytes, b"explicit");
    }

    #[test]
    fn unreadable_explicit_path_is_an_error() {
        let fallback = temp_file("fallback.ttf", b"fallback");
        let err = find_font(Some(missing("env.ttf").as_path()), [fallback.as_path()]).unwrap_err();
        assert!(format!("{err:#}").contains(FONT_ENV));
    }

    #[test]
    fn first_readable_candidate_is_used() {
        let gone = missing("a.ttf");
        let present = temp_file("b.ttf", b"b");
        let later = temp_file("c.ttf", b"c");

        let font = find_font(None, [gone.as_path(), present.as_path(), later.as_path()]).unwrap();
        assert_eq!(font.path, present);
    }

    #[test]
    fn no_candidates_names_the_override() {
        let gone = missing("only.ttf");
        let err = find_font(None, [gone.as_path()]).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("1 system paths"));
        assert!(msg.contains(FONT_ENV));
    }
}
