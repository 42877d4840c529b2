//! Data-URI encoding of uploaded pictures

use crate::file::UploadedFile;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use formcards_conf::EncoderSettings;
use formcards_core::validators::{MimeTypeValidator, Validator};
use std::io;

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
	#[error("Invalid file format: {content_type}")]
	InvalidFormat { content_type: String },
	#[error("Failed to read {name}: {source}")]
	Read {
		name: String,
		#[source]
		source: io::Error,
	},
}

/// Turns an [`UploadedFile`] into a `data:<mime>;base64,<payload>` string.
#[derive(Debug, Clone)]
pub struct FileEncoder {
	allowed: MimeTypeValidator,
}

impl Default for FileEncoder {
	fn default() -> Self {
		Self::new(&EncoderSettings::default())
	}
}

impl FileEncoder {
	pub fn new(settings: &EncoderSettings) -> Self {
		Self {
			allowed: MimeTypeValidator::new(&settings.allowed_types),
		}
	}

	pub fn allowed_types(&self) -> &[String] {
		self.allowed.allowed()
	}

	/// Encode the full file content.
	///
	/// The declared MIME type is checked before anything is read.
	///
	/// # Examples
	///
	/// ```
	/// # #[tokio::main(flavor = "current_thread")]
	/// # async fn main() {
	/// use formcards_forms::{FileEncoder, UploadedFile};
	///
	/// let file = UploadedFile::from_bytes("dot.png", "image/png", &b"\x89PNG"[..]);
	/// let uri = FileEncoder::default().encode(&file).await.unwrap();
	/// assert_eq!(uri, "data:image/png;base64,iVBORw==");
	/// # }
	/// ```
	pub async fn encode(&self, file: &UploadedFile) -> Result<String, EncodeError> {
		if !self.allowed.is_valid(file.content_type.as_str()) {
			tracing::warn!(
				file = %file.name,
				content_type = %file.content_type,
				"rejecting file with unsupported format"
			);
			return Err(EncodeError::InvalidFormat {
				content_type: file.content_type.clone(),
			});
		}

		let content = file.read().await.map_err(|source| EncodeError::Read {
			name: file.name.clone(),
			source,
		})?;
		tracing::debug!(file = %file.name, bytes = content.len(), "encoded file");

		Ok(format!(
			"data:{};base64,{}",
			file.content_type,
			STANDARD.encode(&content)
		))
	}

	/// Encode the file if there is one.
	pub async fn encode_optional(
		&self,
		file: Option<&UploadedFile>,
	) -> Result<Option<String>, EncodeError> {
		match file {
			Some(file) => self.encode(file).await.map(Some),
			None => Ok(None),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::file::FileSource;
	use rstest::rstest;

	const PNG_HEADER: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

	#[rstest]
	#[tokio::test]
	async fn test_png_becomes_data_uri() {
		// Arrange
		let file = UploadedFile::from_bytes("avatar.png", "image/png", PNG_HEADER);

		// Act
		let uri = FileEncoder::default().encode(&file).await.unwrap();

		// Assert
		assert!(uri.starts_with("data:image/png;base64,"));
		assert_eq!(uri, "data:image/png;base64,iVBORw0KGgo=");
	}

	#[rstest]
	#[case("image/jpeg")]
	#[case("image/jpg")]
	#[tokio::test]
	async fn test_jpeg_variants_accepted(#[case] content_type: &str) {
		// Arrange
		let file = UploadedFile::from_bytes("photo", content_type, &b"\xFF\xD8"[..]);

		// Act
		let uri = FileEncoder::default().encode(&file).await.unwrap();

		// Assert
		assert_eq!(uri, format!("data:{content_type};base64,/9g="));
	}

	#[rstest]
	#[tokio::test]
	async fn test_pdf_rejected_before_read() {
		// Arrange: the source does not exist, so any read attempt would fail with Read.
		let file = UploadedFile {
			name: "doc.pdf".to_string(),
			size: 100,
			content_type: "application/pdf".to_string(),
			source: FileSource::Disk("/nonexistent/doc.pdf".into()),
		};

		// Act
		let err = FileEncoder::default().encode(&file).await.unwrap_err();

		// Assert
		assert!(matches!(
			err,
			EncodeError::InvalidFormat { ref content_type } if content_type == "application/pdf"
		));
	}

	#[rstest]
	#[tokio::test]
	async fn test_read_failure_surfaces_io_error() {
		// Arrange
		let dir = tempfile::tempdir().unwrap();
		let file = UploadedFile {
			name: "gone.png".to_string(),
			size: 1,
			content_type: "image/png".to_string(),
			source: FileSource::Disk(dir.path().join("gone.png")),
		};

		// Act
		let err = FileEncoder::default().encode(&file).await.unwrap_err();

		// Assert
		match err {
			EncodeError::Read { source, .. } => assert_eq!(source.kind(), io::ErrorKind::NotFound),
			other => panic!("expected read error, got {other:?}"),
		}
	}

	#[rstest]
	#[tokio::test]
	async fn test_encoder_respects_settings() {
		// Arrange
		let mut settings = EncoderSettings::default();
		settings.allowed_types = vec!["image/png".to_string()];
		let encoder = FileEncoder::new(&settings);
		let file = UploadedFile::from_bytes("photo.jpg", "image/jpeg", &b"\xFF\xD8"[..]);

		// Act
		let result = encoder.encode(&file).await;

		// Assert
		assert!(matches!(result, Err(EncodeError::InvalidFormat { .. })));
		assert_eq!(encoder.allowed_types(), ["image/png".to_string()]);
	}

	#[rstest]
	#[tokio::test]
	async fn test_no_file_encodes_to_none() {
		let encoded = FileEncoder::default().encode_optional(None).await.unwrap();
		assert_eq!(encoded, None);
	}
}
