//! Uploaded files
//!
//! The schema only looks at the declared size and MIME type of a file; the
//! bytes are read later, by the [`FileEncoder`](crate::FileEncoder), and only
//! once the submission has passed validation.

use bytes::Bytes;
use std::io;
use std::path::{Path, PathBuf};

/// Where the file content lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
	Memory(Bytes),
	Disk(PathBuf),
}

/// A file picked by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
	pub name: String,
	/// Declared size in bytes.
	pub size: u64,
	/// Declared MIME type, e.g. `image/png`.
	pub content_type: String,
	pub source: FileSource,
}

impl UploadedFile {
	/// In-memory file; the size is taken from the content.
	///
	/// # Examples
	///
	/// ```
	/// use formcards_forms::UploadedFile;
	///
	/// let file = UploadedFile::from_bytes("avatar.png", "image/png", vec![0x89, b'P', b'N', b'G']);
	/// assert_eq!(file.size, 4);
	/// ```
	pub fn from_bytes(
		name: impl Into<String>,
		content_type: impl Into<String>,
		content: impl Into<Bytes>,
	) -> Self {
		let content = content.into();
		Self {
			name: name.into(),
			size: content.len() as u64,
			content_type: content_type.into(),
			source: FileSource::Memory(content),
		}
	}

	/// File on disk. The size comes from the file metadata.
	pub async fn from_path(path: impl AsRef<Path>, content_type: impl Into<String>) -> io::Result<Self> {
		let path = path.as_ref();
		let metadata = tokio::fs::metadata(path).await?;
		let name = path
			.file_name()
			.map(|n| n.to_string_lossy().into_owned())
			.unwrap_or_default();
		Ok(Self {
			name,
			size: metadata.len(),
			content_type: content_type.into(),
			source: FileSource::Disk(path.to_path_buf()),
		})
	}

	/// Read the whole content.
	pub async fn read(&self) -> io::Result<Bytes> {
		match &self.source {
			FileSource::Memory(bytes) => Ok(bytes.clone()),
			FileSource::Disk(path) => tokio::fs::read(path).await.map(Bytes::from),
		}
	}
}

/// The value of a file input: zero or more files, only the first of which is
/// used.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileList(Vec<UploadedFile>);

impl FileList {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn single(file: UploadedFile) -> Self {
		Self(vec![file])
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn get(&self, index: usize) -> Option<&UploadedFile> {
		self.0.get(index)
	}

	pub fn first(&self) -> Option<&UploadedFile> {
		self.0.first()
	}

	pub fn iter(&self) -> std::slice::Iter<'_, UploadedFile> {
		self.0.iter()
	}
}

impl From<Vec<UploadedFile>> for FileList {
	fn from(files: Vec<UploadedFile>) -> Self {
		Self(files)
	}
}

impl FromIterator<UploadedFile> for FileList {
	fn from_iter<I: IntoIterator<Item = UploadedFile>>(iter: I) -> Self {
		Self(iter.into_iter().collect())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::io::Write;

	#[rstest]
	#[tokio::test]
	async fn test_memory_source_reads_back() {
		// Arrange
		let file = UploadedFile::from_bytes("a.png", "image/png", &b"abc"[..]);

		// Act
		let bytes = file.read().await.unwrap();

		// Assert
		assert_eq!(&bytes[..], b"abc");
	}

	#[rstest]
	#[tokio::test]
	async fn test_disk_source_takes_name_and_size_from_file() {
		// Arrange
		let mut tmp = tempfile::Builder::new().suffix(".jpg").tempfile().unwrap();
		tmp.write_all(&[0xFF, 0xD8, 0xFF, 0xE0]).unwrap();

		// Act
		let file = UploadedFile::from_path(tmp.path(), "image/jpeg").await.unwrap();
		let bytes = file.read().await.unwrap();

		// Assert
		assert_eq!(file.size, 4);
		assert!(file.name.ends_with(".jpg"));
		assert_eq!(&bytes[..], &[0xFF, 0xD8, 0xFF, 0xE0]);
	}

	#[rstest]
	#[tokio::test]
	async fn test_missing_disk_file_is_an_error() {
		// Arrange
		let dir = tempfile::tempdir().unwrap();
		let file = UploadedFile {
			name: "gone.png".to_string(),
			size: 10,
			content_type: "image/png".to_string(),
			source: FileSource::Disk(dir.path().join("gone.png")),
		};

		// Act
		let result = file.read().await;

		// Assert
		assert_eq!(result.unwrap_err().kind(), io::ErrorKind::NotFound);
	}

	#[rstest]
	fn test_file_list_access() {
		// Arrange
		let list: FileList = ["a.png", "b.png"]
			.into_iter()
			.map(|n| UploadedFile::from_bytes(n, "image/png", Vec::new()))
			.collect();

		// Assert
		assert_eq!(list.len(), 2);
		assert_eq!(list.first().map(|f| f.name.as_str()), Some("a.png"));
		assert_eq!(list.get(1).map(|f| f.name.as_str()), Some("b.png"));
		assert!(list.get(2).is_none());
		assert!(FileList::new().is_empty());
	}
}
