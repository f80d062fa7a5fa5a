use log::{debug, info, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::config::Config;
use crate::errors::ListingError;
use crate::services::thumbnail_service::generate_thumbnail;

/// Namespace every listing upload is stored under.
pub const LISTINGS_DIR: &str = "listings";

// ===================================
//         NAMING
// ===================================

/// Text after the last `.`; the whole name when there is none.
fn extension_of(filename: &str) -> &str {
    filename.rsplit('.').next().unwrap_or(filename)
}

/// Storage name for an upload owned by a listing record.
///
/// A saved record names the file after its id (`listings/42.jpg`); an unsaved
/// one gets a random 32-hex-digit name instead.
pub fn listing_dir_path(id: Option<i64>, filename: &str) -> String {
    let ext = extension_of(filename);
    let name = match id {
        Some(id) => format!("{}.{}", id, ext),
        None => format!("{}.{}", Uuid::new_v4().simple(), ext),
    };
    format!("{}/{}", LISTINGS_DIR, name)
}

/// Storage name for a document attached to a listing.
pub fn listing_file_path(filename: &str) -> String {
    format!(
        "{}/files/{}.{}",
        LISTINGS_DIR,
        Uuid::new_v4().simple(),
        extension_of(filename)
    )
}

/// Where the headshot of a stored image lives: `thumbs/` next to it, always JPEG.
pub fn thumbnail_path(relative: &str) -> String {
    let path = Path::new(relative);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    match path.parent().map(|p| p.to_string_lossy().to_string()) {
        Some(parent) if !parent.is_empty() => format!("{}/thumbs/{}.jpg", parent, stem),
        _ => format!("thumbs/{}.jpg", stem),
    }
}

// ===================================
//         STORAGE
// ===================================

/// An upload written to disk whose database reference is not yet saved.
#[derive(Debug, Clone)]
pub struct StagedImage {
    previous: String,
    current: String,
    backup: Option<Vec<u8>>,
}

impl StagedImage {
    pub fn path(&self) -> &str {
        &self.current
    }
}

/// Media files on local disk, addressed by their media-relative path.
#[derive(Debug, Clone)]
pub struct MediaStorage {
    root: PathBuf,
    thumbnail_size: u32,
    thumbnail_quality: u8,
}

impl MediaStorage {
    pub fn new<P: Into<PathBuf>>(root: P, thumbnail_size: u32, thumbnail_quality: u8) -> Self {
        Self {
            root: root.into(),
            thumbnail_size,
            thumbnail_quality,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.media_root,
            config.thumbnail_size,
            config.thumbnail_quality,
        )
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_of(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.path_of(relative).is_file()
    }

    /// Stores an uploaded image as-is and writes its headshot thumbnail.
    /// Uploads that do not decode as an image are rejected before anything is written.
    pub fn save_image(&self, relative: &str, bytes: &[u8]) -> Result<(), ListingError> {
        let image = image::load_from_memory(bytes)?;
        self.store_decoded(relative, bytes, &image)
    }

    /// Writes a new upload at `relative` while keeping what is needed to undo
    /// it. `previous` stays on disk until [`MediaStorage::commit_image`].
    pub fn stage_image(
        &self,
        previous: &str,
        relative: &str,
        bytes: &[u8],
    ) -> Result<StagedImage, ListingError> {
        let image = image::load_from_memory(bytes)?;

        // the write below may overwrite the previous file or its thumbnail slot
        let backup = if previous.is_empty() {
            None
        } else {
            match fs::read(self.path_of(previous)) {
                Ok(bytes) => Some(bytes),
                Err(e) if e.kind() == io::ErrorKind::NotFound => None,
                Err(e) => return Err(e.into()),
            }
        };

        self.store_decoded(relative, bytes, &image)?;

        Ok(StagedImage {
            previous: previous.to_string(),
            current: relative.to_string(),
            backup,
        })
    }

    /// Drops the replaced file once the new reference is persisted.
    pub fn commit_image(&self, staged: &StagedImage) {
        if staged.previous.is_empty() || staged.previous == staged.current {
            return;
        }

        let mut stale = vec![self.path_of(&staged.previous)];
        let old_thumb = thumbnail_path(&staged.previous);
        if old_thumb != thumbnail_path(&staged.current) {
            stale.push(self.path_of(&old_thumb));
        }

        for path in stale {
            if let Err(e) = fs::remove_file(&path) {
                if e.kind() != io::ErrorKind::NotFound {
                    warn!("Could not remove replaced file {}: {}", path.display(), e);
                }
            }
        }
    }

    /// Removes the staged upload and puts the previous image back.
    pub fn rollback_image(&self, staged: &StagedImage) {
        if staged.previous != staged.current {
            if let Err(e) = self.delete(&staged.current) {
                warn!("Could not remove staged image {}: {}", staged.current, e);
            }
        }

        if let Some(bytes) = &staged.backup {
            if let Err(e) = self.save_image(&staged.previous, bytes) {
                warn!("Could not restore image {}: {}", staged.previous, e);
            }
        }
    }

    fn store_decoded(
        &self,
        relative: &str,
        bytes: &[u8],
        image: &image::DynamicImage,
    ) -> Result<(), ListingError> {
        self.write(relative, bytes)?;

        let thumb = self.path_of(&thumbnail_path(relative));
        generate_thumbnail(
            image,
            &thumb,
            self.thumbnail_size,
            self.thumbnail_size,
            self.thumbnail_quality,
        )?;

        info!("Stored image {} with headshot {}", relative, thumb.display());
        Ok(())
    }

    pub fn save_file(&self, relative: &str, bytes: &[u8]) -> Result<(), ListingError> {
        self.write(relative, bytes)?;
        info!("Stored file {}", relative);
        Ok(())
    }

    fn write(&self, relative: &str, bytes: &[u8]) -> io::Result<()> {
        let path = self.path_of(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, bytes)
    }

    /// Removes a stored file and its thumbnail. Already-missing files are fine.
    pub fn delete(&self, relative: &str) -> Result<(), ListingError> {
        for path in [
            self.path_of(relative),
            self.path_of(&thumbnail_path(relative)),
        ] {
            match fs::remove_file(&path) {
                Ok(()) => debug!("Deleted {}", path.display()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    debug!("Nothing to delete at {}", path.display())
                }
                Err(e) => {
                    warn!("Failed to delete {}: {}", path.display(), e);
                    return Err(e.into());
                }
            }
        }
        Ok(())
    }
}
