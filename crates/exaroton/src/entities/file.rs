//! The `File` entity: info, content, transfers.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use exaroton_protocol::{FileInfoData, ResourcePath, normalize_file_path};
use exaroton_transport::{ByteStream, HttpTransport, ReqwestTransport, RequestBody};
use futures_util::TryStreamExt;
use tokio::io::{AsyncRead, AsyncWriteExt};

use crate::endpoint::{CONTENT_TYPE_DIRECTORY, Endpoint};
use crate::session::Session;
use crate::ExarotonError;

/// A file or directory on a server.
///
/// Directories fetched through [`Server::get_file`](crate::Server::get_file)
/// carry their children; plain files don't.
pub struct File<T = ReqwestTransport> {
    session: Arc<Session<T>>,
    server_id: String,
    path: String,
    name: String,
    is_text_file: bool,
    is_config_file: bool,
    is_directory: bool,
    is_log: bool,
    is_readable: bool,
    is_writable: bool,
    size: u64,
    children: Option<Vec<File<T>>>,
}

impl<T> Clone for File<T> {
    fn clone(&self) -> Self {
        Self {
            session: Arc::clone(&self.session),
            server_id: self.server_id.clone(),
            path: self.path.clone(),
            name: self.name.clone(),
            is_text_file: self.is_text_file,
            is_config_file: self.is_config_file,
            is_directory: self.is_directory,
            is_log: self.is_log,
            is_readable: self.is_readable,
            is_writable: self.is_writable,
            size: self.size,
            children: self.children.clone(),
        }
    }
}

impl<T> fmt::Debug for File<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("File")
            .field("server_id", &self.server_id)
            .field("path", &self.path)
            .field("is_directory", &self.is_directory)
            .field("size", &self.size)
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}

impl<T> File<T> {
    pub(crate) fn from_data(session: Arc<Session<T>>, server_id: String, data: FileInfoData) -> Self {
        let children = data.children.map(|children| {
            children
                .into_iter()
                .map(|child| File::from_data(Arc::clone(&session), server_id.clone(), child))
                .collect()
        });
        Self {
            session,
            server_id,
            path: normalize_file_path(&data.path),
            name: data.name,
            is_text_file: data.is_text_file,
            is_config_file: data.is_config_file,
            is_directory: data.is_directory,
            is_log: data.is_log,
            is_readable: data.is_readable,
            is_writable: data.is_writable,
            size: data.size,
            children,
        }
    }

    pub(crate) fn unfetched(session: Arc<Session<T>>, server_id: String, path: &str) -> Self {
        let path = normalize_file_path(path);
        Self {
            session,
            server_id,
            name: name_of(&path).to_string(),
            path,
            is_text_file: false,
            is_config_file: false,
            is_directory: false,
            is_log: false,
            is_readable: false,
            is_writable: false,
            size: 0,
            children: None,
        }
    }

    /// A handle for another path on the same server.
    ///
    /// Leading slashes are stripped, so `"//a/b"` and `"a/b"` address the
    /// same file. Nothing is fetched; the info fields are unset until
    /// [`refresh`](Self::refresh).
    pub fn with_path(&self, path: &str) -> File<T> {
        File::unfetched(Arc::clone(&self.session), self.server_id.clone(), path)
    }

    /// Path relative to the server root, without leading slashes.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_text_file(&self) -> bool {
        self.is_text_file
    }

    /// Whether the server treats this as a config file.
    pub fn is_config_file(&self) -> bool {
        self.is_config_file
    }

    pub fn is_directory(&self) -> bool {
        self.is_directory
    }

    pub fn is_log(&self) -> bool {
        self.is_log
    }

    pub fn is_readable(&self) -> bool {
        self.is_readable
    }

    pub fn is_writable(&self) -> bool {
        self.is_writable
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Directory entries. `None` for plain files and for directories
    /// whose listing wasn't included.
    pub fn children(&self) -> Option<&[File<T>]> {
        self.children.as_deref()
    }

    fn data_path(&self) -> ResourcePath {
        ResourcePath::file_data(&self.server_id, &self.path)
    }
}

fn partial_path(target: &Path) -> PathBuf {
    let mut name = target.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}

async fn write_body(path: &Path, mut body: ByteStream) -> Result<(), ExarotonError> {
    let mut file = tokio::fs::File::create(path)
        .await
        .map_err(|e| ExarotonError::io(path, e))?;
    while let Some(chunk) = body.try_next().await? {
        file.write_all(&chunk)
            .await
            .map_err(|e| ExarotonError::io(path, e))?;
    }
    file.flush().await.map_err(|e| ExarotonError::io(path, e))
}

fn name_of(path: &str) -> &str {
    path.trim_end_matches('/').rsplit('/').next().unwrap_or_default()
}

impl<T: HttpTransport> File<T> {
    pub(crate) async fn fetch(
        session: Arc<Session<T>>,
        server_id: &str,
        path: &str,
    ) -> Result<Self, ExarotonError> {
        let data: FileInfoData = session
            .enveloped(Endpoint::get(
                ResourcePath::file_info(server_id, path),
                "getting the file information",
            ))
            .await?;
        Ok(File::from_data(session, server_id.to_string(), data))
    }

    /// Fetches fresh information for this path.
    pub async fn refresh(&self) -> Result<File<T>, ExarotonError> {
        File::fetch(Arc::clone(&self.session), &self.server_id, &self.path).await
    }

    /// Reads the whole file as text. Invalid UTF-8 is replaced.
    pub async fn get_content(&self) -> Result<String, ExarotonError> {
        let response = self
            .session
            .raw(Endpoint::get(self.data_path(), "getting the file content"))
            .await?;
        Ok(response.text().await?)
    }

    /// Downloads the file to `target`, replacing it if it exists.
    ///
    /// The body is written to `<target>.part` first and only renamed over
    /// `target` once it has been read completely, so a failed download
    /// leaves `target` untouched.
    ///
    /// # Errors
    /// `Io` if `target` can't be created or written; the download itself
    /// fails with `Api` or `Transport`.
    pub async fn download(&self, target: impl AsRef<Path>) -> Result<(), ExarotonError> {
        let target = target.as_ref();
        let body = self.download_stream().await?;

        let partial = partial_path(target);
        if let Err(e) = write_body(&partial, body).await {
            if let Err(cleanup) = tokio::fs::remove_file(&partial).await {
                tracing::warn!(path = %partial.display(), error = %cleanup, "failed to remove partial download");
            }
            return Err(e);
        }
        tokio::fs::rename(&partial, target)
            .await
            .map_err(|e| ExarotonError::io(target, e))?;

        tracing::debug!(path = %self.path, target = %target.display(), "file downloaded");
        Ok(())
    }

    /// Opens the file for reading without buffering it.
    pub async fn download_stream(&self) -> Result<ByteStream, ExarotonError> {
        let response = self
            .session
            .raw(Endpoint::get(self.data_path(), "downloading the file"))
            .await?;
        Ok(response.into_stream())
    }

    /// Replaces the file's content with `content`.
    pub async fn put_content(&self, content: &str) -> Result<(), ExarotonError> {
        let endpoint = Endpoint::put(self.data_path(), "writing the file content")
            .body(RequestBody::Bytes(content.as_bytes().to_vec()));
        self.session.raw(endpoint).await?;
        Ok(())
    }

    /// Uploads the local file at `source` as this file's content.
    pub async fn upload(&self, source: impl AsRef<Path>) -> Result<(), ExarotonError> {
        let source = source.as_ref();
        let file = tokio::fs::File::open(source)
            .await
            .map_err(|e| ExarotonError::io(source, e))?;
        self.upload_stream(file).await
    }

    /// Uploads everything `reader` yields as this file's content.
    pub async fn upload_stream<R>(&self, reader: R) -> Result<(), ExarotonError>
    where
        R: AsyncRead + Send + Unpin + 'static,
    {
        let endpoint = Endpoint::put(self.data_path(), "uploading the file")
            .body(RequestBody::from_reader(reader));
        self.session.raw(endpoint).await?;
        Ok(())
    }

    /// Deletes the file or directory.
    pub async fn delete(&self) -> Result<(), ExarotonError> {
        self.session
            .raw(Endpoint::delete(self.data_path(), "deleting the file"))
            .await?;
        Ok(())
    }

    /// Creates a directory at this path.
    pub async fn create_as_directory(&self) -> Result<(), ExarotonError> {
        let endpoint = Endpoint::put(self.data_path(), "creating the directory")
            .content_type(CONTENT_TYPE_DIRECTORY);
        self.session.raw(endpoint).await?;
        Ok(())
    }
}
