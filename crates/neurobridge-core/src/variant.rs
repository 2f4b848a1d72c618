//! Frame variants and the on-disk layout of their image sequences.
//!
//! Every variant shares the same frame count and numbering; only the directory
//! differs. Frame files are numbered from `001`, while indices inside the
//! engine start at zero.

use std::path::PathBuf;

/// Visual variant of the frame sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Variant {
    #[default]
    Light,
    Dark,
}

impl Variant {
    pub fn toggled(self) -> Self {
        match self {
            Variant::Light => Variant::Dark,
            Variant::Dark => Variant::Light,
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Variant::Light => "light",
            Variant::Dark => "dark",
        };
        write!(f, "{}", label)
    }
}

/// Where the numbered frame images live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetLayout {
    pub root: PathBuf,
    pub light_dir: String,
    pub dark_dir: String,
    pub prefix: String,
    pub extension: String,
    pub frame_count: usize,
}

impl Default for AssetLayout {
    fn default() -> Self {
        AssetLayout {
            root: PathBuf::from("public"),
            light_dir: "frames-white".to_string(),
            dark_dir: "frames-black".to_string(),
            prefix: "ezgif-frame-".to_string(),
            extension: "jpg".to_string(),
            frame_count: 240,
        }
    }
}

impl AssetLayout {
    pub fn variant_dir(&self, variant: Variant) -> PathBuf {
        let dir = match variant {
            Variant::Light => &self.light_dir,
            Variant::Dark => &self.dark_dir,
        };
        self.root.join(dir)
    }

    /// File name for a zero-based frame index, e.g. index 0 -> `ezgif-frame-001.jpg`.
    pub fn frame_file_name(&self, index: usize) -> String {
        format!("{}{:03}.{}", self.prefix, index + 1, self.extension)
    }

    pub fn frame_path(&self, variant: Variant, index: usize) -> PathBuf {
        self.variant_dir(variant).join(self.frame_file_name(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn frame_numbers_are_one_based_and_padded() {
        let layout = AssetLayout::default();
        assert_eq!(layout.frame_file_name(0), "ezgif-frame-001.jpg");
        assert_eq!(layout.frame_file_name(41), "ezgif-frame-042.jpg");
        assert_eq!(layout.frame_file_name(239), "ezgif-frame-240.jpg");
    }

    #[test]
    fn variants_only_switch_the_directory() {
        let layout = AssetLayout {
            root: PathBuf::from("/srv/site"),
            ..AssetLayout::default()
        };
        assert_eq!(
            layout.frame_path(Variant::Light, 9),
            Path::new("/srv/site/frames-white/ezgif-frame-010.jpg")
        );
        assert_eq!(
            layout.frame_path(Variant::Dark, 9),
            Path::new("/srv/site/frames-black/ezgif-frame-010.jpg")
        );
        assert_eq!(Variant::Light.toggled(), Variant::Dark);
        assert_eq!(Variant::Dark.toggled(), Variant::Light);
    }
}
