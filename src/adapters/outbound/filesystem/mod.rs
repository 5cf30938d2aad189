/// Filesystem adapters for file I/O operations
mod api_key_store;
mod file_writer;
mod upload_reader;

pub use api_key_store::{FileApiKeyStore, HOME_ENV};
pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use upload_reader::read_upload_file;
