// src/chart/fonts.rs
// plotters is built without a system font stack; a TTF is registered once
// per process. Without one, charts are drawn without text.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use plotters::style::{FontStyle, register_font};

use crate::config::consts::{FONT_ENV, FONT_FAMILY};

static REGISTERED: OnceLock<bool> = OnceLock::new();

const CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
];

/// Register a font for chart text. Tries `explicit`, then `$IMDB_SCRAPE_FONT`,
/// then common system locations. First call wins; returns whether text is on.
pub fn init(explicit: Option<&Path>) -> bool {
    *REGISTERED.get_or_init(|| {
        let env = std::env::var_os(FONT_ENV).map(PathBuf::from);
        let candidates = explicit
            .map(Path::to_path_buf)
            .into_iter()
            .chain(env)
            .chain(CANDIDATES.iter().map(PathBuf::from));

        for path in candidates {
            if try_register(&path) {
                return true;
            }
        }
        logw!("Fonts: no usable TTF found; charts will have no labels (set {})", FONT_ENV);
        false
    })
}

/// Whether chart text is enabled. False until `init` succeeds.
pub fn available() -> bool {
    REGISTERED.get().copied().unwrap_or(false)
}

fn try_register(path: &Path) -> bool {
    let bytes = match fs::read(path) {
        Ok(b) => b,
        Err(_) => return false,
    };
    // plotters keeps a &'static reference for the life of the process
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    match register_font(FONT_FAMILY, FontStyle::Normal, bytes) {
        Ok(()) => {
            logd!("Fonts: registered {}", path.display());
            true
        }
        Err(_) => {
            loge!("Fonts: {} is not a usable font", path.display());
            false
        }
    }
}
