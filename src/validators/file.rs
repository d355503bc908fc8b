//! File validators
//!
//! Only the file name and size are inspected; file contents are never read.

use crate::result::ValidationErrors;
use crate::validator::ValueValidator;

const BYTES_PER_MEGABYTE: u64 = 1024 * 1024;

/// The parts of a selected file that validators look at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileInfo {
    /// File name, including its extension.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
}

impl FileInfo {
    /// Describe a file.
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        FileInfo {
            name: name.into(),
            size,
        }
    }
}

impl crate::presence::Blank for FileInfo {}

/// Rejects file names without one of the allowed extensions.
///
/// Matching is case-insensitive. The empty name is accepted; combine with
/// [`required`](crate::required) to insist on a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileExtension {
    extensions: Vec<String>,
    suffixes: Vec<String>,
}

impl FileExtension {
    /// The allowed extensions, as given.
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }
}

impl ValueValidator<str> for FileExtension {
    fn validate(&self, value: &str) -> ValidationErrors {
        if value.is_empty() {
            return Vec::new();
        }

        let name = value.to_lowercase();
        if self.suffixes.iter().any(|suffix| name.ends_with(suffix.as_str())) {
            Vec::new()
        } else {
            vec![format!(
                "Please choose a file of one of the following types: {}",
                self.extensions.join(", ")
            )]
        }
    }
}

impl ValueValidator<String> for FileExtension {
    #[inline]
    fn validate(&self, value: &String) -> ValidationErrors {
        ValueValidator::<str>::validate(self, value.as_str())
    }
}

/// Require a file name ending in `.ext` for one of `extensions`.
///
/// # Example
///
/// ```rust
/// use composable_validation::ValueValidator;
/// use composable_validation::validators::file_extension;
///
/// let images = file_extension(["png", "JPEG", "tiff"]);
/// assert!(images.validate("valid.PNG").is_empty());
/// assert!(images.validate("").is_empty());
/// assert_eq!(
///     images.validate("invalid.pix"),
///     vec!["Please choose a file of one of the following types: png, JPEG, tiff"]
/// );
/// ```
pub fn file_extension<I, S>(extensions: I) -> FileExtension
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let extensions: Vec<String> = extensions.into_iter().map(Into::into).collect();
    let suffixes = extensions
        .iter()
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .collect();
    FileExtension {
        extensions,
        suffixes,
    }
}

/// [`FileExtension`] applied to the name of a [`FileInfo`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HasFileType(FileExtension);

impl ValueValidator<FileInfo> for HasFileType {
    #[inline]
    fn validate(&self, value: &FileInfo) -> ValidationErrors {
        ValueValidator::<str>::validate(&self.0, &value.name)
    }
}

impl ValueValidator<Option<FileInfo>> for HasFileType {
    fn validate(&self, value: &Option<FileInfo>) -> ValidationErrors {
        match value {
            Some(file) => ValueValidator::<FileInfo>::validate(self, file),
            None => Vec::new(),
        }
    }
}

/// Require the selected file to have one of `extensions`. No file is valid.
///
/// # Example
///
/// ```rust
/// use composable_validation::ValueValidator;
/// use composable_validation::validators::{has_file_type, FileInfo};
///
/// let images = has_file_type(["jpg", "png"]);
/// assert!(!images.validate(&Some(FileInfo::new("hello.gif", 10))).is_empty());
/// assert!(images.validate(&None::<FileInfo>).is_empty());
/// ```
pub fn has_file_type<I, S>(extensions: I) -> HasFileType
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    HasFileType(file_extension(extensions))
}

/// Rejects byte counts above a number of megabytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxMegabytes {
    megabytes: u64,
}

impl ValueValidator<u64> for MaxMegabytes {
    fn validate(&self, value: &u64) -> ValidationErrors {
        if *value > self.megabytes.saturating_mul(BYTES_PER_MEGABYTE) {
            vec![format!("Please select a file less than {}MB", self.megabytes)]
        } else {
            Vec::new()
        }
    }
}

/// Allow at most `megabytes` MiB, given a size in bytes.
///
/// # Example
///
/// ```rust
/// use composable_validation::ValueValidator;
/// use composable_validation::validators::max_megabytes;
///
/// let fifty_megabytes: u64 = 50 * 1024 * 1024;
/// assert!(max_megabytes(50).validate(&fifty_megabytes).is_empty());
/// assert_eq!(max_megabytes(10).validate(&fifty_megabytes), vec!["Please select a file less than 10MB"]);
/// ```
pub fn max_megabytes(megabytes: u64) -> MaxMegabytes {
    MaxMegabytes { megabytes }
}

/// [`MaxMegabytes`] applied to the size of a [`FileInfo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxFileSizeInMegabytes(MaxMegabytes);

impl ValueValidator<FileInfo> for MaxFileSizeInMegabytes {
    #[inline]
    fn validate(&self, value: &FileInfo) -> ValidationErrors {
        self.0.validate(&value.size)
    }
}

impl ValueValidator<Option<FileInfo>> for MaxFileSizeInMegabytes {
    fn validate(&self, value: &Option<FileInfo>) -> ValidationErrors {
        match value {
            Some(file) => self.0.validate(&file.size),
            None => Vec::new(),
        }
    }
}

/// Limit the selected file to `megabytes` MiB. No file is valid.
pub fn max_file_size_in_megabytes(megabytes: u64) -> MaxFileSizeInMegabytes {
    MaxFileSizeInMegabytes(max_megabytes(megabytes))
}
