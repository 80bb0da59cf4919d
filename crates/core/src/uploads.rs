//! Upload acceptance rules and stored-file naming.
//!
//! Files are checked before anything touches the disk: extension allow-list,
//! an `image/*` content type, a per-file size cap and a per-resource count.

use rand::Rng;

use crate::error::FieldError;

/// Accepted image extensions (lowercase, without the dot).
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpeg", "jpg", "png", "webp"];

/// Maximum size of a single uploaded file (5 MiB).
pub const MAX_FILE_BYTES: usize = 5 * 1024 * 1024;

/// URL prefix under which stored uploads are served.
pub const PUBLIC_PREFIX: &str = "/uploads";

/// Which resource an upload belongs to. Determines the multipart field name,
/// the stored-name prefix and how many files are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    PuppyImage,
    NewsImage,
    DogPhoto,
}

impl UploadKind {
    pub fn field(self) -> &'static str {
        match self {
            UploadKind::PuppyImage => "images",
            UploadKind::NewsImage => "image",
            UploadKind::DogPhoto => "photo",
        }
    }

    pub fn prefix(self) -> &'static str {
        match self {
            UploadKind::PuppyImage => "puppy",
            UploadKind::NewsImage => "news",
            UploadKind::DogPhoto => "dog",
        }
    }

    pub fn max_files(self) -> usize {
        match self {
            UploadKind::PuppyImage => crate::listing::MAX_IMAGES,
            UploadKind::NewsImage | UploadKind::DogPhoto => 1,
        }
    }

    /// Upper bound for a whole request body carrying this kind of upload,
    /// with headroom for the text fields and multipart framing.
    pub fn body_limit(self) -> usize {
        self.max_files() * MAX_FILE_BYTES + 1024 * 1024
    }
}

/// Lowercased extension of `file_name`, if it has one.
pub fn extension_of(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Check a single uploaded file. Returns its normalized extension.
pub fn check_file(
    kind: UploadKind,
    file_name: &str,
    content_type: Option<&str>,
    size: usize,
) -> Result<String, FieldError> {
    let field = kind.field();
    let ext = extension_of(file_name)
        .filter(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
        .ok_or_else(|| {
            FieldError::new(field, "Only image files are allowed (jpeg, jpg, png, webp)")
        })?;

    if !content_type.is_some_and(|ct| ct.starts_with("image/")) {
        return Err(FieldError::new(
            field,
            "Only image files are allowed (jpeg, jpg, png, webp)",
        ));
    }
    if size == 0 {
        return Err(FieldError::new(field, format!("{file_name} is empty")));
    }
    if size > MAX_FILE_BYTES {
        return Err(FieldError::new(
            field,
            format!("{file_name} exceeds the 5 MB size limit"),
        ));
    }
    Ok(ext)
}

/// Check the number of files sent for `kind`.
pub fn check_count(kind: UploadKind, count: usize) -> Result<(), FieldError> {
    if count > kind.max_files() {
        Err(FieldError::new(
            kind.field(),
            format!("At most {} file(s) may be uploaded", kind.max_files()),
        ))
    } else {
        Ok(())
    }
}

/// Generate a collision-resistant stored name: `<prefix>-<millis>-<random>.<ext>`.
pub fn stored_file_name(kind: UploadKind, ext: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: u32 = rand::rng().random_range(0..1_000_000_000);
    format!("{}-{millis}-{suffix}.{ext}", kind.prefix())
}

/// Public URL path for a stored file name.
pub fn public_path(stored_name: &str) -> String {
    format!("{PUBLIC_PREFIX}/{stored_name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(extension_of("Photo.JPG").as_deref(), Some("jpg"));
        assert_eq!(extension_of("archive.tar.gz").as_deref(), Some("gz"));
        assert_eq!(extension_of("noext"), None);
        assert_eq!(extension_of(".hidden"), None);
    }

    #[test]
    fn accepts_images_within_limits() {
        let ext = check_file(UploadKind::PuppyImage, "a.png", Some("image/png"), 10).unwrap();
        assert_eq!(ext, "png");
    }

    #[test]
    fn rejects_wrong_extension_or_type() {
        assert!(check_file(UploadKind::PuppyImage, "a.gif", Some("image/gif"), 10).is_err());
        assert!(check_file(UploadKind::PuppyImage, "a.png", Some("text/plain"), 10).is_err());
        assert!(check_file(UploadKind::PuppyImage, "a.png", None, 10).is_err());
    }

    #[test]
    fn rejects_oversized_and_empty_files() {
        let err = check_file(UploadKind::DogPhoto, "big.jpg", Some("image/jpeg"), MAX_FILE_BYTES + 1)
            .unwrap_err();
        assert_eq!(err.field, "photo");
        assert!(check_file(UploadKind::DogPhoto, "e.jpg", Some("image/jpeg"), 0).is_err());
    }

    #[test]
    fn count_limits_per_kind() {
        assert!(check_count(UploadKind::PuppyImage, 5).is_ok());
        assert!(check_count(UploadKind::PuppyImage, 6).is_err());
        assert!(check_count(UploadKind::NewsImage, 2).is_err());
    }

    #[test]
    fn stored_names_are_prefixed_and_unique() {
        let a = stored_file_name(UploadKind::PuppyImage, "jpg");
        let b = stored_file_name(UploadKind::PuppyImage, "jpg");
        assert!(a.starts_with("puppy-") && a.ends_with(".jpg"));
        assert_ne!(a, b);
        assert_eq!(public_path("x.png"), "/uploads/x.png");
    }
}
