//! Catalog retrieval and staging

use crate::Result;
use std::fs;
use std::path::Path;
use tracing::info;

/// Public GP catalog endpoint (active objects, CSV format).
pub const CELESTRAK_GP_URL: &str =
    "https://celestrak.org/NORAD/elements/gp.php?GROUP=active&FORMAT=csv";

/// Download the catalog CSV and stage it at `stage_path`.
///
/// A non-success HTTP status or transport failure is an error; the caller
/// treats it as fatal for the whole run.
pub fn fetch_catalog(url: &str, stage_path: impl AsRef<Path>) -> Result<()> {
    let stage_path = stage_path.as_ref();
    info!("Fetching catalog from {}", url);

    let response = reqwest::blocking::get(url)?.error_for_status()?;
    let body = response.bytes()?;

    if let Some(parent) = stage_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(stage_path, &body)?;

    info!("Staged {} bytes to {:?}", body.len(), stage_path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CatalogError;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;
    use tempfile::tempdir;

    /// Serve exactly one HTTP response on a loopback port and return its URL.
    fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = [0u8; 4096];
            let _ = stream.read(&mut request);
            let response = format!(
                "{}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_fetch_catalog_stages_body_verbatim() {
        let body = "OBJECT_NAME,EPOCH\nISS (ZARYA),2022-11-10T05:26:24\n";
        let url = serve_once("HTTP/1.1 200 OK", body);

        let dir = tempdir().unwrap();
        // Nested path: the staging directory must be created as needed.
        let stage = dir.path().join("staged").join("catalog.csv");

        fetch_catalog(&url, &stage).unwrap();
        assert_eq!(std::fs::read_to_string(&stage).unwrap(), body);
    }

    #[test]
    fn test_fetch_catalog_error_status_stages_nothing() {
        let url = serve_once("HTTP/1.1 500 Internal Server Error", "");

        let dir = tempdir().unwrap();
        let stage = dir.path().join("catalog.csv");

        let result = fetch_catalog(&url, &stage);
        assert!(matches!(result, Err(CatalogError::Http(_))));
        assert!(!stage.exists());
    }
}
