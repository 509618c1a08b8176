//! Font lookup by family name.
//!
//! Searches the usual system and user font directories for a TrueType file
//! whose name matches the family. File names are compared with case, spaces,
//! dashes and underscores ignored, so "Courier New" finds `CourierNew.ttf`
//! and "DejaVu Sans Mono" finds `DejaVuSansMono-Bold.ttf`.

use std::path::{Path, PathBuf};

use super::TrueTypeMetrics;
use crate::error::DotprintError;

/// Subdirectory depth searched below each font directory.
const MAX_DEPTH: usize = 4;

const FONT_DIRS: &[&str] = &[
    "/usr/share/fonts",
    "/usr/local/share/fonts",
    "/Library/Fonts",
    "/System/Library/Fonts",
    "C:\\Windows\\Fonts",
];

const USER_FONT_DIRS: &[&str] = &[".local/share/fonts", ".fonts", "Library/Fonts"];

/// Stand-ins for families that ship under another name. Liberation Mono and
/// FreeMono share Courier New's metrics.
const ALIASES: &[(&str, &[&str])] = &[
    ("couriernew", &["cour", "liberationmono", "freemono"]),
    ("courier", &["couriernew", "cour", "liberationmono", "freemono"]),
];

/// Directories searched by [`find_face`], in order.
pub fn font_dirs() -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = FONT_DIRS.iter().map(PathBuf::from).collect();
    if let Some(home) = std::env::var_os("HOME") {
        let home = PathBuf::from(home);
        dirs.extend(USER_FONT_DIRS.iter().map(|d| home.join(d)));
    }
    dirs
}

/// Find the regular (or bold) face of `family` in the system font directories.
pub fn find_face(family: &str, bold: bool) -> Option<PathBuf> {
    find_face_in(&font_dirs(), family, bold)
}

/// Find the regular (or bold) face of `family` below `dirs`.
pub fn find_face_in(dirs: &[PathBuf], family: &str, bold: bool) -> Option<PathBuf> {
    let wanted = candidate_names(family, bold);
    if wanted.is_empty() {
        return None;
    }

    let mut files = Vec::new();
    for dir in dirs {
        collect_fonts(dir, MAX_DEPTH, &mut files);
    }

    // Earlier candidates win: the family itself before any alias.
    wanted.iter().find_map(|name| {
        files
            .iter()
            .find(|path| normalized_stem(path).as_deref() == Some(name.as_str()))
            .cloned()
    })
}

/// Load `family` with its bold face when one is installed.
///
/// Returns `Ok(None)` when no regular face is found.
pub fn load_family(family: &str) -> Result<Option<TrueTypeMetrics>, DotprintError> {
    let Some(path) = find_face(family, false) else {
        return Ok(None);
    };
    log::info!("Loaded font: {}", path.display());
    let mut faces = TrueTypeMetrics::from_file(&path)?;

    if let Some(bold) = find_face(family, true) {
        log::info!("Loaded bold font: {}", bold.display());
        faces = faces.with_bold_file(&bold)?;
    }
    Ok(Some(faces))
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn normalized_stem(path: &Path) -> Option<String> {
    path.file_stem().map(|s| normalize(&s.to_string_lossy()))
}

fn candidate_names(family: &str, bold: bool) -> Vec<String> {
    let key = normalize(family);
    if key.is_empty() {
        return Vec::new();
    }

    let mut bases = vec![key.clone()];
    if let Some((_, aliases)) = ALIASES.iter().find(|(name, _)| *name == key) {
        bases.extend(aliases.iter().map(|a| a.to_string()));
    }

    let suffixes: &[&str] = if bold { &["bold", "bd", "b"] } else { &["", "regular", "r"] };
    bases
        .iter()
        .flat_map(|base| suffixes.iter().map(move |s| format!("{}{}", base, s)))
        .collect()
}

fn collect_fonts(dir: &Path, depth: usize, out: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            if depth > 0 {
                collect_fonts(&path, depth - 1, out);
            }
        } else if is_font_file(&path) {
            out.push(path);
        }
    }
}

fn is_font_file(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("ttf") || e.eq_ignore_ascii_case("otf"))
        .unwrap_or(false)
}
