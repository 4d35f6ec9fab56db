pub mod captured_log;
pub mod mock_download_client;
